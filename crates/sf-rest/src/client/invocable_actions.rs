use tracing::{info, instrument, warn};

use crate::invocable_actions::{EmailSimpleInput, InvocableActionRequest, InvocableActionResult};

impl super::SalesforceRestClient {
    /// Send a plain-text email through the `emailSimple` standard action.
    ///
    /// Best-effort: a failed send is logged at `warn` and yields `None`, so a
    /// notification problem never fails the run that triggered it.
    #[instrument(skip(self, addresses, body))]
    pub async fn send_email<I, S>(
        &self,
        addresses: I,
        subject: &str,
        body: &str,
    ) -> Option<Vec<InvocableActionResult>>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let input = EmailSimpleInput::new(addresses, subject, body);
        if input.email_addresses.is_empty() {
            warn!("No recipients, email not sent");
            return None;
        }

        let url = self.client.rest_url("actions/standard/emailSimple");
        let request = InvocableActionRequest {
            inputs: vec![input],
        };

        match self
            .client
            .post_json::<Vec<InvocableActionResult>, _>(&url, &request)
            .await
        {
            Ok(results) => {
                if results.iter().all(|r| r.is_success) {
                    info!("Email sent");
                } else {
                    let errors: Vec<String> = results
                        .iter()
                        .flat_map(|r| r.errors.iter().map(ToString::to_string))
                        .collect();
                    warn!(?errors, "Email action reported errors");
                }
                Some(results)
            }
            Err(e) => {
                warn!(error = %e, "Failed to send email");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::client::test_support::{client, BASE};
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_send_email() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path(format!("{BASE}/actions/standard/emailSimple")))
            .and(body_json(json!({"inputs": [{
                "emailBody": "3 suites failed",
                "emailAddresses": "qa@example.com,lead@example.com",
                "emailSubject": "Nightly regression"
            }]})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
                "actionName": "emailSimple",
                "errors": null,
                "isSuccess": true,
                "outputValues": null
            }])))
            .expect(1)
            .mount(&mock_server)
            .await;

        let results = client(&mock_server.uri())
            .send_email(
                ["qa@example.com", "lead@example.com"],
                "Nightly regression",
                "3 suites failed",
            )
            .await
            .unwrap();
        assert!(results[0].is_success);
    }

    #[tokio::test]
    async fn test_send_email_failure_is_swallowed() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path(format!("{BASE}/actions/standard/emailSimple")))
            .respond_with(ResponseTemplate::new(500).set_body_string("oops"))
            .expect(1)
            .mount(&mock_server)
            .await;

        let results = client(&mock_server.uri())
            .send_email(["qa@example.com"], "subject", "body")
            .await;
        assert!(results.is_none());
    }

    #[tokio::test]
    async fn test_send_email_without_recipients_skips_request() {
        let mock_server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&mock_server)
            .await;

        let results = client(&mock_server.uri())
            .send_email(Vec::<String>::new(), "subject", "body")
            .await;
        assert!(results.is_none());
    }
}
