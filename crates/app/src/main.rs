//! restkit - command line REST resource client
//!
//! Loads client settings, builds a resource for the requested route and
//! prints the result of one call as pretty JSON.

mod cli;
mod user;

use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use restkit_application::{HttpClient, Resource, ResourceFactory};
use restkit_domain::{ModelMapper, RequestConfig, SerdeModel};
use restkit_infrastructure::ClientSettings;
use serde::Serialize;
use serde_json::Value;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::cli::{Cli, Command, ModelKind, parse_body, parse_search_params};
use crate::user::User;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let mut settings = ClientSettings::load(cli.config.as_deref())
        .context("failed to load client settings")?;
    if let Some(base_url) = &cli.base_url {
        settings.base_url = Some(base_url.clone());
    }
    if let Some(origin) = &cli.origin {
        settings.origin = Some(origin.clone());
    }

    let client = settings.build_client()?;
    let factory = ResourceFactory::with_config(Arc::new(client), settings.resource_config());
    let request_config = cli.request_config()?;

    tracing::info!(
        route = %cli.route,
        base_url = ?settings.base_url,
        "calling resource"
    );

    let output = match cli.model {
        ModelKind::Raw => {
            let resource = factory.resource(&cli.route)?;
            run(&resource, cli.command, request_config).await?
        }
        ModelKind::User => {
            let resource = factory.model_resource(&cli.route, SerdeModel::<User>::new())?;
            run(&resource, cli.command, request_config).await?
        }
    };

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

async fn run<C, M>(
    resource: &Resource<C, M>,
    command: Command,
    config: RequestConfig,
) -> anyhow::Result<Value>
where
    C: HttpClient + ?Sized,
    M: ModelMapper,
    M::Output: Serialize,
    M::List: Serialize,
{
    let output = match command {
        Command::Get { pk } => serde_json::to_value(resource.get(pk, config).await?)?,
        Command::Search { params } => {
            let params = parse_search_params(&params)?;
            serde_json::to_value(resource.search(Some(&params), config).await?)?
        }
        Command::Create { body } => resource.create(&parse_body(&body)?, config).await?,
        Command::Update { pk, body } => resource.update(pk, &parse_body(&body)?, config).await?,
        Command::Delete { pk } => {
            let response = resource.delete(pk, config).await?;
            tracing::info!(status = %response.status, "deleted");
            serde_json::to_value(response)?
        }
    };
    Ok(output)
}
