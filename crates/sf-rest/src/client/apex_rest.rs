use serde::{de::DeserializeOwned, Serialize};
use tracing::instrument;

use sfauto_client::security::soql;

use crate::error::{Error, ErrorKind, Result};

impl super::SalesforceRestClient {
    /// POST to a custom Apex REST resource at `/services/apexrest/<resource>/`.
    ///
    /// `resource` may contain `/`-separated segments; each must be a plain
    /// identifier. An empty response body yields `None`.
    #[instrument(skip(self, body))]
    pub async fn apex_rest_post<T, B>(&self, resource: &str, body: &B) -> Result<Option<T>>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let resource = resource.trim_matches('/');
        if resource.is_empty() || !resource.split('/').all(soql::is_safe_sobject_name) {
            return Err(Error::invalid_input(format!(
                "invalid Apex REST resource: {resource:?}"
            )));
        }

        let url = self.client.url(&format!("/services/apexrest/{resource}/"));
        self.client
            .post_json_optional(&url, body)
            .await
            .map_err(|e| {
                Error::from_client(e, |message| ErrorKind::ApexRest {
                    resource: resource.to_string(),
                    message,
                })
            })
    }
}

#[cfg(test)]
mod tests {
    use crate::client::test_support::client;
    use crate::error::ErrorKind;
    use serde_json::{json, Value};
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_apex_rest_post() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/services/apexrest/TestData/Reset/"))
            .and(body_json(json!({"scope": "cases"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"deleted": 12})))
            .expect(1)
            .mount(&mock_server)
            .await;

        let result: Option<Value> = client(&mock_server.uri())
            .apex_rest_post("/TestData/Reset", &json!({"scope": "cases"}))
            .await
            .unwrap();
        assert_eq!(result, Some(json!({"deleted": 12})));
    }

    #[tokio::test]
    async fn test_apex_rest_rejects_traversal() {
        let err = client("https://acme.my.salesforce.com")
            .apex_rest_post::<Value, _>("../data/v62.0/sobjects", &json!({}))
            .await
            .unwrap_err();
        assert!(matches!(err.kind, ErrorKind::InvalidInput(_)));
    }
}
