use std::sync::Arc;

use parse_object::{ObjectRegistry, RemoteObject};
use parse_types::constants::headers;
use serde_json::Value;
use tracing::debug;

use crate::config::{Credentials, ParseConfig};
use crate::error::{SdkError, SdkResult};
use crate::global;

/// Entry point bundling a validated configuration with the object registry
/// used to instantiate server data.
///
/// Cheap to clone; clones share the registry.
#[derive(Clone, Debug)]
pub struct ParseClient {
    config: ParseConfig,
    registry: Arc<ObjectRegistry>,
}

impl ParseClient {
    /// Create a client with its own registry holding the built-in classes.
    pub fn new(config: ParseConfig) -> SdkResult<Self> {
        Self::with_registry(config, Arc::new(ObjectRegistry::with_defaults()))
    }

    /// Create a client sharing an existing registry.
    pub fn with_registry(config: ParseConfig, registry: Arc<ObjectRegistry>) -> SdkResult<Self> {
        config.validate()?;
        debug!(
            application_id = %config.application_id,
            endpoint = %config.api_endpoint,
            "created client"
        );
        Ok(Self { config, registry })
    }

    /// Create a client from the process-wide credentials.
    pub fn from_global() -> SdkResult<Self> {
        let credentials = global::credentials().ok_or(SdkError::NotInitialized)?;
        Self::new(ParseConfig::from_credentials(&credentials))
    }

    pub fn config(&self) -> &ParseConfig {
        &self.config
    }

    pub fn credentials(&self) -> Credentials {
        self.config.credentials()
    }

    pub fn registry(&self) -> &Arc<ObjectRegistry> {
        &self.registry
    }

    /// Full URL for an endpoint or class path, e.g. `classes/GameScore`.
    pub fn api_url(&self, endpoint: &str) -> String {
        format!(
            "{}/{}/{}",
            self.config.api_endpoint.trim_end_matches('/'),
            self.config.api_version,
            endpoint.trim_start_matches('/')
        )
    }

    /// Headers authenticating a request as this application.
    pub fn auth_headers(&self) -> [(&'static str, &str); 2] {
        [
            (headers::APPLICATION_ID, self.config.application_id.as_str()),
            (headers::CLIENT_KEY, self.config.client_key.as_str()),
        ]
    }

    /// Instantiate an empty object for `class_name`.
    pub fn create_object(&self, class_name: &str) -> Box<dyn RemoteObject> {
        self.registry.create(class_name)
    }

    /// Instantiate an object from server JSON.
    pub fn decode_object(&self, class_name: &str, json: &Value) -> SdkResult<Box<dyn RemoteObject>> {
        Ok(parse_object::decode_object(&self.registry, class_name, json)?)
    }

    /// Decode the `results` array of a query response.
    pub fn decode_results(&self, class_name: &str, response: &Value) -> SdkResult<Vec<Box<dyn RemoteObject>>> {
        let results = response
            .get("results")
            .and_then(Value::as_array)
            .ok_or_else(|| SdkError::MalformedResponse("missing `results` array".into()))?;
        results
            .iter()
            .map(|item| self.decode_object(class_name, item))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parse_object::{ParseObject, ParseRole, ParseUser};
    use serde_json::json;

    fn client() -> ParseClient {
        ParseClient::new(ParseConfig::new("app", "key")).unwrap()
    }

    #[test]
    fn rejects_missing_credentials() {
        assert!(matches!(
            ParseClient::new(ParseConfig::new("app", "")),
            Err(SdkError::MissingCredential("client_key"))
        ));
    }

    #[test]
    fn api_url_joins_segments() {
        let c = client();
        assert_eq!(c.api_url("classes/GameScore"), "https://api.parse.com/1/classes/GameScore");
        assert_eq!(c.api_url("/users"), "https://api.parse.com/1/users");
        assert_eq!(c.api_url(""), "https://api.parse.com/1/");
    }

    #[test]
    fn api_url_tolerates_trailing_slash() {
        let mut config = ParseConfig::new("app", "key");
        config.api_endpoint = "http://localhost:1337/parse/".into();
        let c = ParseClient::new(config).unwrap();
        assert_eq!(c.api_url("roles"), "http://localhost:1337/parse/1/roles");
    }

    #[test]
    fn auth_headers_carry_credentials() {
        assert_eq!(
            client().auth_headers(),
            [("X-Parse-Application-Id", "app"), ("X-Parse-Client-Key", "key")]
        );
    }

    #[test]
    fn create_object_dispatches_on_tag() {
        let c = client();
        assert!(c.create_object("users").is::<ParseUser>());
        assert!(c.create_object("_Role").is::<ParseRole>());
        assert!(c.create_object("GameScore").is::<ParseObject>());
    }

    #[test]
    fn clients_share_registry() {
        let a = client();
        let b = ParseClient::with_registry(ParseConfig::new("other", "key"), Arc::clone(a.registry())).unwrap();
        a.registry().register("Alias", |_: &str| -> Box<dyn RemoteObject> {
            Box::new(ParseRole::new())
        });
        assert!(b.create_object("Alias").is::<ParseRole>());
    }

    #[test]
    fn decode_results_builds_each_object() {
        let response = json!({
            "results": [
                { "objectId": "a", "username": "alice" },
                { "objectId": "b", "username": "bob" },
            ]
        });
        let users = client().decode_results("_User", &response).unwrap();
        let names: Vec<_> = users
            .iter()
            .filter_map(|u| u.downcast_ref::<ParseUser>())
            .filter_map(ParseUser::username)
            .collect();
        assert_eq!(names, ["alice", "bob"]);
    }

    #[test]
    fn decode_results_requires_results_array() {
        assert!(matches!(
            client().decode_results("_User", &json!({})),
            Err(SdkError::MalformedResponse(_))
        ));
    }
}
