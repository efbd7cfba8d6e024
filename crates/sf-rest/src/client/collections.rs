use tracing::{debug, instrument, warn};

use crate::collections::{
    BatchOutcome, CollectionRequest, CollectionResult, RecordUpdate, MAX_RECORDS_PER_REQUEST,
};
use crate::error::{Error, ErrorKind, Result};

impl super::SalesforceRestClient {
    /// Update up to 200 records, possibly of different types, in one request.
    ///
    /// Runs with `allOrNone: false`: records that fail do not roll back the
    /// others, and the per-record outcome is returned as-is.
    #[instrument(skip(self, records), fields(records = records.len()))]
    pub async fn update_multiple_records(&self, records: &[RecordUpdate]) -> Result<BatchOutcome> {
        if records.is_empty() {
            return Ok(BatchOutcome::default());
        }
        if records.len() > MAX_RECORDS_PER_REQUEST {
            return Err(Error::invalid_input(format!(
                "{} records exceed the limit of {MAX_RECORDS_PER_REQUEST} per collection update",
                records.len()
            )));
        }
        for record in records {
            super::check_sobject(&record.sobject)?;
            super::check_id(&record.id)?;
        }

        let url = self.client.rest_url("composite/sobjects");
        let request = CollectionRequest {
            all_or_none: false,
            records,
        };

        let results: Vec<CollectionResult> = self
            .client
            .patch_json_response(&url, &request)
            .await
            .map_err(|e| Error::from_client(e, ErrorKind::BulkUpdate))?;

        let outcome = BatchOutcome { results };
        let failed = outcome.failed().count();
        if failed > 0 {
            warn!(failed, total = outcome.len(), "Some records were not updated");
        } else {
            debug!(total = outcome.len(), "All records updated");
        }
        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use crate::client::test_support::{client, BASE};
    use crate::collections::RecordUpdate;
    use crate::error::ErrorKind;
    use crate::sobject::RecordFields;
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn updates() -> Vec<RecordUpdate> {
        vec![
            RecordUpdate::new(
                "Case",
                "500xx000000bcd1AAA",
                RecordFields::new().set("Status", "Closed"),
            ),
            RecordUpdate::new(
                "Case",
                "500xx000000bcd2AAA",
                RecordFields::new().set("Status", "Bogus"),
            ),
        ]
    }

    #[tokio::test]
    async fn test_update_multiple_records_partial_success() {
        let mock_server = MockServer::start().await;

        Mock::given(method("PATCH"))
            .and(path(format!("{BASE}/composite/sobjects")))
            .and(body_json(json!({
                "allOrNone": false,
                "records": [
                    {"attributes": {"type": "Case"}, "Id": "500xx000000bcd1AAA", "Status": "Closed"},
                    {"attributes": {"type": "Case"}, "Id": "500xx000000bcd2AAA", "Status": "Bogus"}
                ]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"id": "500xx000000bcd1AAA", "success": true, "errors": []},
                {"success": false, "errors": [{
                    "statusCode": "INVALID_OR_NULL_FOR_RESTRICTED_PICKLIST",
                    "message": "Status: bad value for restricted picklist field: Bogus",
                    "fields": ["Status"]
                }]}
            ])))
            .expect(1)
            .mount(&mock_server)
            .await;

        let outcome = client(&mock_server.uri())
            .update_multiple_records(&updates())
            .await
            .unwrap();

        assert_eq!(outcome.len(), 2);
        assert!(outcome.results[0].success);
        assert!(!outcome.results[1].success);
        assert!(!outcome.is_complete_success());
    }

    #[tokio::test]
    async fn test_update_multiple_records_transport_failure() {
        let mock_server = MockServer::start().await;

        Mock::given(method("PATCH"))
            .and(path(format!("{BASE}/composite/sobjects")))
            .respond_with(ResponseTemplate::new(503).set_body_string("Service Unavailable"))
            .mount(&mock_server)
            .await;

        let err = client(&mock_server.uri())
            .update_multiple_records(&updates())
            .await
            .unwrap_err();
        assert!(matches!(err.kind, ErrorKind::BulkUpdate(_)));
        assert_eq!(err.status(), Some(503));
    }

    #[tokio::test]
    async fn test_update_multiple_records_empty_is_noop() {
        let mock_server = MockServer::start().await;
        Mock::given(method("PATCH"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&mock_server)
            .await;

        let outcome = client(&mock_server.uri())
            .update_multiple_records(&[])
            .await
            .unwrap();
        assert!(outcome.is_empty());
    }
}
