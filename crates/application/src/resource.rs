//! REST resource bound to one backend route.
//!
//! A `Resource` turns the five standard calls into single HTTP requests
//! against `baseURL/route`:
//!
//! | Call | Request | Resolves with |
//! |---|---|---|
//! | `get` | `GET route/pk` | mapped object |
//! | `create` | `POST route` | raw `data` |
//! | `update` | `PUT route/pk` | raw `data` |
//! | `search` | `GET route?query` | mapped list |
//! | `delete` | `DELETE route/pk` | full response |
//!
//! Failures are never retried or translated.

use std::fmt;
use std::sync::Arc;

use restkit_domain::{
    ApiResponse, DomainError, HttpMethod, ModelMapper, Passthrough, RequestConfig, ResourceConfig,
    ResourceId, SearchParams,
};
use serde::Serialize;
use serde_json::Value;

use crate::error::{ResourceError, ResourceResult};
use crate::ports::HttpClient;

/// A client for one REST route.
///
/// Immutable after construction; clone-free concurrent use is safe because
/// every call builds its own request.
///
/// # Example
///
/// ```ignore
/// let config = ResourceConfig::new().with_base_url("https://api.example.com");
/// let users = Resource::new(client, "users", SerdeModel::<User>::new(), config)?;
///
/// let user = users.get(5, RequestConfig::default()).await?;
/// ```
pub struct Resource<C: ?Sized, M = Passthrough> {
    client: Arc<C>,
    route: String,
    model: M,
    options: ResourceConfig,
}

impl<C, M> Resource<C, M>
where
    C: HttpClient + ?Sized,
    M: ModelMapper,
{
    /// Creates a resource for `route` using already-merged `options`.
    ///
    /// The full route is `options.baseURL + "/" + route`. Leading slashes
    /// on `route` are dropped so `"users"` and `"/users"` are the same.
    ///
    /// # Errors
    ///
    /// Returns `ResourceError::Config` if the route is empty or absolute,
    /// or if `baseURL` is missing or not a string.
    pub fn new(
        client: Arc<C>,
        route: &str,
        model: M,
        options: ResourceConfig,
    ) -> ResourceResult<Self> {
        let segment = validate_route(route).map_err(ResourceError::Config)?;
        let base_url = options.base_url().map_err(ResourceError::Config)?;
        let route = format!("{base_url}/{segment}");

        Ok(Self {
            client,
            route,
            model,
            options,
        })
    }

    /// Returns the full route (`baseURL/route`).
    #[must_use]
    pub fn route(&self) -> &str {
        &self.route
    }

    /// Returns the effective options captured at construction.
    #[must_use]
    pub const fn options(&self) -> &ResourceConfig {
        &self.options
    }

    /// Returns the model mapper.
    #[must_use]
    pub const fn model(&self) -> &M {
        &self.model
    }

    fn item_url(&self, pk: &ResourceId) -> String {
        format!("{}/{pk}", self.route)
    }

    /// Fetches one object: `GET route/pk`.
    ///
    /// # Errors
    ///
    /// Returns `ResourceError::Transport` if the request fails and
    /// `ResourceError::Mapping` if the payload does not fit the model.
    pub async fn get(
        &self,
        pk: impl Into<ResourceId>,
        config: RequestConfig,
    ) -> ResourceResult<M::Output> {
        let url = self.item_url(&pk.into());
        log_request(HttpMethod::Get, &url);

        let response = self.client.get(&url, config).await?;
        self.model
            .map_one(response.data)
            .map_err(ResourceError::Mapping)
    }

    /// Creates an object: `POST route`, resolving with the raw body.
    ///
    /// # Errors
    ///
    /// Returns `ResourceError::Request` if `obj` cannot be serialized and
    /// `ResourceError::Transport` if the request fails.
    pub async fn create<B>(&self, obj: &B, config: RequestConfig) -> ResourceResult<Value>
    where
        B: Serialize + ?Sized,
    {
        let body = to_body(obj)?;
        log_request(HttpMethod::Post, &self.route);

        let response = self.client.post(&self.route, body, config).await?;
        Ok(response.data)
    }

    /// Replaces an object: `PUT route/pk`, resolving with the raw body.
    ///
    /// # Errors
    ///
    /// Returns `ResourceError::Request` if `obj` cannot be serialized and
    /// `ResourceError::Transport` if the request fails.
    pub async fn update<B>(
        &self,
        pk: impl Into<ResourceId>,
        obj: &B,
        config: RequestConfig,
    ) -> ResourceResult<Value>
    where
        B: Serialize + ?Sized,
    {
        let url = self.item_url(&pk.into());
        let body = to_body(obj)?;
        log_request(HttpMethod::Put, &url);

        let response = self.client.put(&url, body, config).await?;
        Ok(response.data)
    }

    /// Lists objects: `GET route?query`.
    ///
    /// `None` or empty params issue the GET without a query string.
    ///
    /// # Errors
    ///
    /// Returns `ResourceError::Request` if the params cannot be encoded,
    /// `ResourceError::Transport` if the request fails and
    /// `ResourceError::Mapping` if the payload does not fit the model.
    pub async fn search(
        &self,
        params: Option<&SearchParams>,
        config: RequestConfig,
    ) -> ResourceResult<M::List> {
        let url = match params.filter(|p| !p.is_empty()) {
            Some(params) => {
                let query = params.to_query_string().map_err(ResourceError::Request)?;
                format!("{}?{query}", self.route)
            }
            None => self.route.clone(),
        };
        log_request(HttpMethod::Get, &url);

        let response = self.client.get(&url, config).await?;
        self.model
            .map_many(response.data)
            .map_err(ResourceError::Mapping)
    }

    /// Deletes an object: `DELETE route/pk`.
    ///
    /// Unlike the other calls this resolves with the whole transport
    /// response, status and headers included.
    ///
    /// # Errors
    ///
    /// Returns `ResourceError::Transport` if the request fails.
    pub async fn delete(
        &self,
        pk: impl Into<ResourceId>,
        config: RequestConfig,
    ) -> ResourceResult<ApiResponse> {
        let url = self.item_url(&pk.into());
        log_request(HttpMethod::Delete, &url);

        Ok(self.client.delete(&url, config).await?)
    }
}

impl<C: ?Sized, M: fmt::Debug> fmt::Debug for Resource<C, M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Resource")
            .field("route", &self.route)
            .field("model", &self.model)
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

fn validate_route(route: &str) -> Result<&str, DomainError> {
    let segment = route.trim_start_matches('/');
    if segment.trim().is_empty() {
        return Err(DomainError::InvalidRoute(
            "route must not be empty".to_string(),
        ));
    }
    if segment.contains("://") {
        return Err(DomainError::InvalidRoute(format!(
            "route must be a path, not a URL: {route}"
        )));
    }
    Ok(segment)
}

fn to_body<B: Serialize + ?Sized>(obj: &B) -> ResourceResult<Value> {
    serde_json::to_value(obj)
        .map_err(|e| ResourceError::Request(DomainError::InvalidBody(e.to_string())))
}

fn log_request(method: HttpMethod, url: &str) {
    tracing::debug!(%method, url, "issuing resource request");
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::time::Duration;

    use pretty_assertions::assert_eq;
    use restkit_domain::{ApiRequest, FnMapper, SerdeModel, StatusCode};
    use serde::Deserialize;
    use serde_json::json;

    use crate::ports::HttpClientError;
    use crate::testing::RecordingClient;

    #[derive(Debug, PartialEq, Deserialize)]
    struct User {
        id: u32,
        name: String,
    }

    fn api() -> ResourceConfig {
        ResourceConfig::new().with_base_url("/api")
    }

    fn users(client: &Arc<RecordingClient>) -> Resource<RecordingClient> {
        Resource::new(Arc::clone(client), "users", Passthrough, api()).unwrap()
    }

    #[test]
    fn test_route_joins_base_url() {
        let client = Arc::new(RecordingClient::returning(Value::Null));
        assert_eq!(users(&client).route(), "/api/users");
    }

    #[test]
    fn test_leading_slash_is_dropped() {
        let client = Arc::new(RecordingClient::returning(Value::Null));
        let resource = Resource::new(client, "/users", Passthrough, api()).unwrap();
        assert_eq!(resource.route(), "/api/users");
    }

    #[test]
    fn test_empty_base_url_gives_root_relative_route() {
        let client = Arc::new(RecordingClient::returning(Value::Null));
        let config = ResourceConfig::new().with_base_url("");
        let resource = Resource::new(client, "users", Passthrough, config).unwrap();
        assert_eq!(resource.route(), "/users");
    }

    #[test]
    fn test_missing_base_url_fails_fast() {
        let client = Arc::new(RecordingClient::returning(Value::Null));
        let result = Resource::new(client, "users", Passthrough, ResourceConfig::new());

        assert_eq!(
            result.unwrap_err(),
            ResourceError::Config(DomainError::MissingBaseUrl)
        );
    }

    #[test]
    fn test_invalid_routes() {
        let client = Arc::new(RecordingClient::returning(Value::Null));
        for route in ["", "/", "  ", "https://evil.example.com/users"] {
            let result = Resource::new(Arc::clone(&client), route, Passthrough, api());
            assert!(
                matches!(result, Err(ResourceError::Config(DomainError::InvalidRoute(_)))),
                "route {route:?} should be rejected"
            );
        }
    }

    #[tokio::test]
    async fn test_get_without_model_returns_raw_payload() {
        let payload = json!({"id": 5, "name": "ada", "tags": ["x"]});
        let client = Arc::new(RecordingClient::returning(payload.clone()));

        let result = users(&client).get(5, RequestConfig::default()).await.unwrap();

        assert_eq!(result, payload);
        assert_eq!(client.last_request().unwrap(), ApiRequest::get("/api/users/5"));
    }

    #[tokio::test]
    async fn test_get_with_model_maps_payload() {
        let client = Arc::new(RecordingClient::returning(json!({"id": 5, "name": "ada"})));
        let resource =
            Resource::new(Arc::clone(&client), "users", SerdeModel::<User>::new(), api()).unwrap();

        let user = resource.get(5, RequestConfig::default()).await.unwrap();

        assert_eq!(
            user,
            User {
                id: 5,
                name: "ada".to_string()
            }
        );
    }

    #[tokio::test]
    async fn test_get_applies_function_model() {
        let client = Arc::new(RecordingClient::returning(json!({"name": "ada"})));
        let mapper = FnMapper::new(|raw: Value| raw["name"].as_str().unwrap_or_default().len());
        let resource = Resource::new(client, "users", mapper, api()).unwrap();

        assert_eq!(resource.get("a", RequestConfig::default()).await.unwrap(), 3);
    }

    #[tokio::test]
    async fn test_get_mapping_failure() {
        let client = Arc::new(RecordingClient::returning(json!({"id": "x"})));
        let resource = Resource::new(client, "users", SerdeModel::<User>::new(), api()).unwrap();

        let result = resource.get(1, RequestConfig::default()).await;
        assert!(matches!(result, Err(ResourceError::Mapping(_))));
    }

    #[tokio::test]
    async fn test_get_passes_request_config_through() {
        let client = Arc::new(RecordingClient::returning(Value::Null));
        let config = RequestConfig::new()
            .header("Authorization", "Bearer t")
            .query("expand", "groups")
            .timeout(Duration::from_secs(2));

        users(&client).get(1, config.clone()).await.unwrap();

        assert_eq!(client.last_request().unwrap().config, config);
    }

    #[tokio::test]
    async fn test_create_posts_body_and_returns_data() {
        let client = Arc::new(RecordingClient::returning(json!({"id": 9})));
        let resource = Resource::new(
            Arc::clone(&client),
            "users",
            SerdeModel::<User>::new(),
            api(),
        )
        .unwrap();

        let result = resource
            .create(&json!({"name": "ada"}), RequestConfig::default())
            .await
            .unwrap();

        // write paths are never mapped, even with a model
        assert_eq!(result, json!({"id": 9}));
        assert_eq!(
            client.last_request().unwrap(),
            ApiRequest::post("/api/users", json!({"name": "ada"}))
        );
    }

    #[tokio::test]
    async fn test_update_puts_body_to_item_url() {
        let client = Arc::new(RecordingClient::returning(json!({"ok": true})));

        #[derive(Serialize)]
        struct Rename<'a> {
            name: &'a str,
        }

        let result = users(&client)
            .update(3, &Rename { name: "grace" }, RequestConfig::default())
            .await
            .unwrap();

        assert_eq!(result, json!({"ok": true}));
        assert_eq!(
            client.last_request().unwrap(),
            ApiRequest::put("/api/users/3", json!({"name": "grace"}))
        );
    }

    #[tokio::test]
    async fn test_search_encodes_params() {
        let client = Arc::new(RecordingClient::returning(json!([])));
        let params = SearchParams::from([("name", "a b"), ("role", "admin&ops")]);

        users(&client)
            .search(Some(&params), RequestConfig::default())
            .await
            .unwrap();

        let url = client.last_request().unwrap().url;
        let (path, query) = url.split_once('?').expect("query string");
        assert_eq!(path, "/api/users");
        let decoded: Vec<(String, String)> = serde_urlencoded::from_str(query).unwrap();
        assert_eq!(decoded, params.pairs());
    }

    #[tokio::test]
    async fn test_search_without_params_has_no_query() {
        let client = Arc::new(RecordingClient::returning(json!([])));

        users(&client)
            .search(None, RequestConfig::default())
            .await
            .unwrap();
        users(&client)
            .search(Some(&SearchParams::new()), RequestConfig::default())
            .await
            .unwrap();

        for request in client.requests() {
            assert_eq!(request, ApiRequest::get("/api/users"));
        }
    }

    #[tokio::test]
    async fn test_search_maps_each_item() {
        let client = Arc::new(RecordingClient::returning(json!([
            {"id": 1, "name": "ada"},
            {"id": 2, "name": "grace"}
        ])));
        let resource = Resource::new(client, "users", SerdeModel::<User>::new(), api()).unwrap();

        let found = resource
            .search(None, RequestConfig::default())
            .await
            .unwrap();

        assert_eq!(found.len(), 2);
        assert_eq!(found[1].name, "grace");
    }

    #[tokio::test]
    async fn test_search_with_model_on_empty_body() {
        let client = Arc::new(RecordingClient::new(|_| {
            Ok(ApiResponse::new(204, HashMap::new(), Value::Null, Duration::ZERO))
        }));
        let resource = Resource::new(client, "users", SerdeModel::<User>::new(), api()).unwrap();

        let found = resource
            .search(None, RequestConfig::default())
            .await
            .unwrap();

        assert!(found.is_empty());
    }

    #[tokio::test]
    async fn test_search_with_model_on_keyed_object() {
        let client = Arc::new(RecordingClient::returning(json!({
            "u2": {"id": 2, "name": "grace"},
            "u1": {"id": 1, "name": "ada"}
        })));
        let resource = Resource::new(client, "users", SerdeModel::<User>::new(), api()).unwrap();

        let found = resource
            .search(None, RequestConfig::default())
            .await
            .unwrap();

        let ids: Vec<u32> = found.iter().map(|user| user.id).collect();
        assert_eq!(ids, vec![2, 1]);
    }

    #[tokio::test]
    async fn test_search_without_model_returns_raw_payload() {
        let payload = json!({"results": [1, 2], "count": 2});
        let client = Arc::new(RecordingClient::returning(payload.clone()));

        let found = users(&client)
            .search(None, RequestConfig::default())
            .await
            .unwrap();

        assert_eq!(found, payload);
    }

    #[tokio::test]
    async fn test_delete_returns_full_response() {
        let client = Arc::new(RecordingClient::new(|_| {
            Ok(ApiResponse::new(
                204,
                HashMap::from([("x-request-id".to_string(), "abc".to_string())]),
                Value::Null,
                Duration::from_millis(3),
            ))
        }));

        let response = users(&client)
            .delete(5, RequestConfig::default())
            .await
            .unwrap();

        assert_eq!(response.status, StatusCode(204));
        assert_eq!(
            response.get_header("X-Request-Id").map(String::as_str),
            Some("abc")
        );
        assert_eq!(client.last_request().unwrap(), ApiRequest::delete("/api/users/5"));
    }

    #[tokio::test]
    async fn test_create_and_update_return_data_only() {
        let client = Arc::new(RecordingClient::new(|_| {
            Ok(ApiResponse::new(
                201,
                HashMap::from([("location".to_string(), "/api/users/1".to_string())]),
                json!({"id": 1}),
                Duration::ZERO,
            ))
        }));
        let resource = users(&client);

        let created = resource
            .create(&json!({}), RequestConfig::default())
            .await
            .unwrap();
        let updated = resource
            .update(1, &json!({}), RequestConfig::default())
            .await
            .unwrap();
        let deleted = resource.delete(1, RequestConfig::default()).await.unwrap();

        assert_eq!(created, json!({"id": 1}));
        assert_eq!(updated, json!({"id": 1}));
        assert_eq!(deleted.data, json!({"id": 1}));
        assert_eq!(deleted.status, StatusCode(201));
    }

    #[tokio::test]
    async fn test_transport_errors_propagate_unchanged() {
        let error = HttpClientError::Status {
            status: StatusCode(404),
            body: json!({"detail": "not found"}),
        };
        let client = Arc::new(RecordingClient::failing(error.clone()));
        let resource = users(&client);

        let get = resource.get(1, RequestConfig::default()).await.unwrap_err();
        let create = resource
            .create(&json!({}), RequestConfig::default())
            .await
            .unwrap_err();
        let delete = resource.delete(1, RequestConfig::default()).await.unwrap_err();

        for result in [get, create, delete] {
            assert_eq!(result.as_transport(), Some(&error));
        }
        assert_eq!(client.requests().len(), 3);
    }

    #[tokio::test]
    async fn test_empty_pk_reaches_transport() {
        let client = Arc::new(RecordingClient::returning(Value::Null));

        users(&client).get("", RequestConfig::default()).await.unwrap();

        assert_eq!(client.last_request().unwrap().url, "/api/users/");
    }

    #[tokio::test]
    async fn test_concurrent_calls_do_not_interfere() {
        let client = Arc::new(
            RecordingClient::new(|request| Ok(ApiResponse::ok(json!({"url": request.url}))))
                .with_delay(|request| {
                    // later ids finish first
                    let id = request.url.rsplit('/').next().unwrap_or_default();
                    Duration::from_millis(30 - id.parse::<u64>().unwrap_or(0) * 10)
                }),
        );
        let resource = users(&client);

        let (first, second, third, listed) = tokio::join!(
            resource.get(0, RequestConfig::default()),
            resource.get(1, RequestConfig::default()),
            resource.get(2, RequestConfig::default()),
            resource.search(None, RequestConfig::default()),
        );

        assert_eq!(first.unwrap(), json!({"url": "/api/users/0"}));
        assert_eq!(second.unwrap(), json!({"url": "/api/users/1"}));
        assert_eq!(third.unwrap(), json!({"url": "/api/users/2"}));
        assert_eq!(listed.unwrap(), json!({"url": "/api/users"}));
        assert_eq!(client.requests().len(), 4);
    }
}
