use tracing::{debug, instrument};

use crate::error::{Error, ErrorKind, Result};
use crate::picklist::{PicklistValues, MASTER_RECORD_TYPE_ID};

impl super::SalesforceRestClient {
    /// Active values of a picklist field for the master record type.
    #[instrument(skip(self))]
    pub async fn picklist_values(&self, sobject: &str, picklist: &str) -> Result<Vec<String>> {
        super::check_sobject(sobject)?;
        super::check_field(picklist)?;
        let url = self.client.rest_url(&format!(
            "ui-api/object-info/{sobject}/picklist-values/{MASTER_RECORD_TYPE_ID}/{picklist}"
        ));

        let response: PicklistValues = self.client.get_json(&url).await.map_err(|e| {
            Error::from_client(e, |message| ErrorKind::PicklistFetch {
                sobject: sobject.to_string(),
                picklist: picklist.to_string(),
                message,
            })
        })?;

        let values: Vec<String> = response.values.into_iter().map(|v| v.value).collect();
        debug!(count = values.len(), "Fetched picklist values");
        Ok(values)
    }
}

#[cfg(test)]
mod tests {
    use crate::client::test_support::{client, BASE};
    use crate::error::ErrorKind;
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_picklist_values() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path(format!(
                "{BASE}/ui-api/object-info/Case/picklist-values/012000000000000AAA/Status"
            )))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "controllerValues": {},
                "defaultValue": {"label": "New", "value": "New", "validFor": []},
                "values": [
                    {"label": "New", "value": "New", "validFor": []},
                    {"label": "On Hold", "value": "On_Hold", "validFor": []}
                ]
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let values = client(&mock_server.uri())
            .picklist_values("Case", "Status")
            .await
            .unwrap();
        assert_eq!(values, vec!["New", "On_Hold"]);
    }

    #[tokio::test]
    async fn test_picklist_values_unknown_field() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(400).set_body_json(json!([{
                "errorCode": "INVALID_TYPE",
                "message": "Field Nope__c is not a picklist"
            }])))
            .mount(&mock_server)
            .await;

        let err = client(&mock_server.uri())
            .picklist_values("Case", "Nope__c")
            .await
            .unwrap_err();
        match err.kind {
            ErrorKind::PicklistFetch { picklist, .. } => assert_eq!(picklist, "Nope__c"),
            other => panic!("unexpected kind: {other:?}"),
        }
    }
}
