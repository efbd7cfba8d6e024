use tracing::{debug, instrument, warn};

use sfauto_client::ApiError;

use crate::collections::MAX_RECORDS_PER_REQUEST;
use crate::composite::{
    CompositeGraphRequest, CompositeGraphResponse, CompositeTreeRecord, CompositeTreeRequest,
    CompositeTreeResponse,
};
use crate::error::{Error, ErrorKind, Result};

/// First real error among the failed graphs. Nodes rolled back because a
/// sibling failed report `PROCESSING_HALTED`, which says nothing useful.
fn first_graph_error(response: &CompositeGraphResponse) -> Option<String> {
    response
        .graphs
        .iter()
        .filter(|g| !g.is_successful)
        .flat_map(|g| g.graph_response.responses.iter())
        .filter(|r| r.http_status_code >= 400)
        .filter_map(|r| serde_json::from_value::<Vec<ApiError>>(r.body.clone()).ok())
        .flatten()
        .find(|e| e.error_code != "PROCESSING_HALTED")
        .map(|e| format!("{}: {}", e.error_code, e.message))
}

impl super::SalesforceRestClient {
    /// Insert a record tree of one root type with the composite tree API.
    ///
    /// At most 200 root records per call; more is rejected before any request.
    /// On rejection the per-record results from the response body are kept
    /// on [`ErrorKind::BatchInsert`].
    #[instrument(skip(self, records), fields(records = records.len()))]
    pub async fn insert_multiple_records(
        &self,
        sobject: &str,
        records: &[CompositeTreeRecord],
    ) -> Result<CompositeTreeResponse> {
        super::check_sobject(sobject)?;
        if records.is_empty() {
            return Err(Error::invalid_input("no records to insert"));
        }
        if records.len() > MAX_RECORDS_PER_REQUEST {
            return Err(Error::invalid_input(format!(
                "{} records exceed the limit of {MAX_RECORDS_PER_REQUEST} per tree insert",
                records.len()
            )));
        }

        let url = self.client.rest_url(&format!("composite/tree/{sobject}/"));
        let request = CompositeTreeRequest {
            records: records.to_vec(),
        };

        let response: CompositeTreeResponse =
            self.client.post_json(&url, &request).await.map_err(|e| {
                let results = e
                    .body
                    .clone()
                    .and_then(|body| serde_json::from_value::<CompositeTreeResponse>(body).ok())
                    .map(|r| r.results)
                    .unwrap_or_default();
                let first_error = results
                    .iter()
                    .flat_map(|r| r.errors.iter())
                    .next()
                    .map(ToString::to_string);
                Error::from_client(e, |message| ErrorKind::BatchInsert {
                    sobject: sobject.to_string(),
                    message: first_error.unwrap_or(message),
                    results,
                })
            })?;

        if response.has_errors {
            return Err(Error::new(ErrorKind::BatchInsert {
                sobject: sobject.to_string(),
                message: "response reported errors".to_string(),
                results: response.results,
            }));
        }

        debug!(inserted = response.results.len(), "Tree insert complete");
        Ok(response)
    }

    /// Submit a composite graph request.
    ///
    /// Any graph that did not commit fails the call with
    /// [`ErrorKind::GraphInsert`], which carries the full response.
    #[instrument(skip(self, request), fields(graphs = request.graphs.len()))]
    pub async fn insert_via_graph(
        &self,
        request: &CompositeGraphRequest,
    ) -> Result<CompositeGraphResponse> {
        if request.graphs.is_empty() {
            return Err(Error::invalid_input("no graphs to submit"));
        }

        let url = self.client.rest_url("composite/graph");
        let response: CompositeGraphResponse =
            self.client.post_json(&url, request).await.map_err(|e| {
                Error::from_client(e, |message| ErrorKind::GraphInsert {
                    failed_graphs: request.graph_ids(),
                    message,
                    response: None,
                })
            })?;

        let failed_graphs = response.failed_graph_ids();
        if !failed_graphs.is_empty() {
            let mut message = format!(
                "{} of {} graphs failed",
                failed_graphs.len(),
                response.graphs.len()
            );
            if let Some(first) = first_graph_error(&response) {
                message.push_str("; ");
                message.push_str(&first);
            }
            warn!(failed = ?failed_graphs, "Composite graph insert failed");
            return Err(Error::new(ErrorKind::GraphInsert {
                failed_graphs,
                message,
                response: Some(Box::new(response)),
            }));
        }

        debug!("Composite graph insert complete");
        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use crate::client::test_support::{client, BASE};
    use crate::composite::{
        CompositeGraphRequest, CompositeSubrequest, CompositeTreeRecord, GraphRequest,
    };
    use crate::error::ErrorKind;
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn accounts(count: usize) -> Vec<CompositeTreeRecord> {
        (0..count)
            .map(|i| CompositeTreeRecord::new("Account", format!("acct{i}")).field("Name", format!("Account {i}")))
            .collect()
    }

    fn graph(id: &str) -> GraphRequest {
        GraphRequest::new(id).node(CompositeSubrequest::post(
            format!("{BASE}/sobjects/Account/"),
            "acct",
            json!({"Name": id}),
        ))
    }

    #[tokio::test]
    async fn test_insert_multiple_records() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path(format!("{BASE}/composite/tree/Account/")))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({
                "hasErrors": false,
                "results": [
                    {"referenceId": "acct0", "id": "001xx000003Dg00AAA"},
                    {"referenceId": "acct1", "id": "001xx000003Dg01AAA"}
                ]
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let response = client(&mock_server.uri())
            .insert_multiple_records("Account", &accounts(2))
            .await
            .unwrap();
        assert_eq!(response.id_for("acct1"), Some("001xx000003Dg01AAA"));
    }

    #[tokio::test]
    async fn test_insert_multiple_records_keeps_server_results() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path(format!("{BASE}/composite/tree/Account/")))
            .respond_with(ResponseTemplate::new(400).set_body_json(json!({
                "hasErrors": true,
                "results": [{
                    "referenceId": "acct1",
                    "errors": [{
                        "statusCode": "INVALID_EMAIL_ADDRESS",
                        "message": "Email: invalid email address: nope",
                        "fields": ["Email__c"]
                    }]
                }]
            })))
            .mount(&mock_server)
            .await;

        let err = client(&mock_server.uri())
            .insert_multiple_records("Account", &accounts(2))
            .await
            .unwrap_err();

        assert_eq!(err.status(), Some(400));
        match err.kind {
            ErrorKind::BatchInsert {
                sobject,
                message,
                results,
            } => {
                assert_eq!(sobject, "Account");
                assert!(message.contains("INVALID_EMAIL_ADDRESS"));
                assert_eq!(results.len(), 1);
                assert_eq!(results[0].reference_id, "acct1");
            }
            other => panic!("unexpected kind: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_insert_multiple_records_limit_is_local() {
        let mock_server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(201))
            .expect(0)
            .mount(&mock_server)
            .await;

        let err = client(&mock_server.uri())
            .insert_multiple_records("Account", &accounts(201))
            .await
            .unwrap_err();
        assert!(matches!(err.kind, ErrorKind::InvalidInput(_)));
    }

    #[tokio::test]
    async fn test_insert_via_graph() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path(format!("{BASE}/composite/graph")))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "graphs": [{
                    "graphId": "g1",
                    "graphResponse": {"compositeResponse": [{
                        "body": {"id": "001xx000003Dg00AAA", "success": true, "errors": []},
                        "httpHeaders": {},
                        "httpStatusCode": 201,
                        "referenceId": "acct"
                    }]},
                    "isSuccessful": true
                }]
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let response = client(&mock_server.uri())
            .insert_via_graph(&CompositeGraphRequest::new(vec![graph("g1")]))
            .await
            .unwrap();
        assert!(response.is_successful());
    }

    #[tokio::test]
    async fn test_insert_via_graph_reports_failed_graphs() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path(format!("{BASE}/composite/graph")))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "graphs": [
                    {
                        "graphId": "g1",
                        "graphResponse": {"compositeResponse": []},
                        "isSuccessful": true
                    },
                    {
                        "graphId": "g2",
                        "graphResponse": {"compositeResponse": [
                            {
                                "body": [{"errorCode": "DUPLICATE_VALUE", "message": "duplicate value found"}],
                                "httpHeaders": {},
                                "httpStatusCode": 400,
                                "referenceId": "acct"
                            },
                            {
                                "body": [{"errorCode": "PROCESSING_HALTED", "message": "halted"}],
                                "httpHeaders": {},
                                "httpStatusCode": 400,
                                "referenceId": "contact"
                            }
                        ]},
                        "isSuccessful": false
                    }
                ]
            })))
            .mount(&mock_server)
            .await;

        let err = client(&mock_server.uri())
            .insert_via_graph(&CompositeGraphRequest::new(vec![graph("g1"), graph("g2")]))
            .await
            .unwrap_err();

        match err.kind {
            ErrorKind::GraphInsert {
                failed_graphs,
                message,
                response,
            } => {
                assert_eq!(failed_graphs, vec!["g2".to_string()]);
                assert_eq!(message, "1 of 2 graphs failed; DUPLICATE_VALUE: duplicate value found");
                assert_eq!(response.unwrap().graphs.len(), 2);
            }
            other => panic!("unexpected kind: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_insert_via_graph_transport_failure_names_all_graphs() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path(format!("{BASE}/composite/graph")))
            .respond_with(ResponseTemplate::new(500).set_body_string("upstream unavailable"))
            .mount(&mock_server)
            .await;

        let err = client(&mock_server.uri())
            .insert_via_graph(&CompositeGraphRequest::new(vec![graph("g1"), graph("g2")]))
            .await
            .unwrap_err();

        match err.kind {
            ErrorKind::GraphInsert {
                failed_graphs,
                response,
                ..
            } => {
                assert_eq!(failed_graphs, vec!["g1".to_string(), "g2".to_string()]);
                assert!(response.is_none());
            }
            other => panic!("unexpected kind: {other:?}"),
        }
    }
}
