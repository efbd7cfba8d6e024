//! End-to-end workflow against a mocked org: authenticate once, then seed
//! and query data and run a batch job with the resulting key pair.

use std::time::Duration;

use serde_json::{json, Value};
use wiremock::matchers::{body_partial_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use sfauto::auth::DEFAULT_GRANT_SERVICE;
use sfauto::rest::{CompositeTreeRecord, RecordFields, RecordUpdate};
use sfauto::{
    authenticate, AccessKeyPair, ApiSettings, Credential, PollConfig, SalesforceRestClient,
    ToolingClient,
};

const BASE: &str = "/services/data/v62.0";
const ACCOUNT_ID: &str = "001xx000003DGb1AAG";

fn settings() -> ApiSettings {
    ApiSettings::new("/services/data", "62.0", DEFAULT_GRANT_SERVICE).unwrap()
}

fn credential(login_url: &str) -> Credential {
    Credential::from_lookup("QA_ORG", |name| {
        let value = match name {
            "QA_ORG_USERNAME" => "qa@example.com".to_string(),
            "QA_ORG_PASSWORD" => "hunter2token".to_string(),
            "QA_ORG_LOGIN_URL" => login_url.to_string(),
            "QA_ORG_CLIENT_ID" => "3MVG9client".to_string(),
            "QA_ORG_CLIENT_SECRET" => "secret".to_string(),
            _ => return None,
        };
        Some(value)
    })
    .unwrap()
}

async fn login(mock_server: &MockServer) -> AccessKeyPair {
    Mock::given(method("POST"))
        .and(path("/services/oauth2/token"))
        .and(query_param("grant_type", "password"))
        .and(query_param("username", "qa@example.com"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "00Dxx!session",
            "instance_url": mock_server.uri(),
            "id": "https://login.salesforce.com/id/00Dxx/005xx",
            "token_type": "Bearer",
            "issued_at": "1700000000000",
            "signature": "sig"
        })))
        .expect(1)
        .mount(mock_server)
        .await;

    authenticate(&settings(), &credential(&mock_server.uri()))
        .await
        .unwrap()
}

#[tokio::test]
async fn test_seed_and_query_records() {
    let mock_server = MockServer::start().await;
    let keys = login(&mock_server).await;
    assert_eq!(keys.base_url(), format!("{}{BASE}", mock_server.uri()));

    Mock::given(method("POST"))
        .and(path(format!("{BASE}/sobjects/Account/")))
        .and(header("Authorization", "Bearer 00Dxx!session"))
        .and(body_partial_json(json!({"Name": "Acme"})))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": ACCOUNT_ID,
            "success": true,
            "errors": []
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("POST"))
        .and(path(format!("{BASE}/composite/tree/Contact/")))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "hasErrors": false,
            "results": [
                {"referenceId": "c1", "id": "003xx0000000001AAA"},
                {"referenceId": "c2", "id": "003xx0000000002AAA"}
            ]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("PATCH"))
        .and(path(format!("{BASE}/composite/sobjects")))
        .and(body_partial_json(json!({"allOrNone": false})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": "003xx0000000001AAA", "success": true, "errors": []},
            {"id": "003xx0000000002AAA", "success": false, "errors": [
                {"statusCode": "FIELD_CUSTOM_VALIDATION_EXCEPTION", "message": "Title required", "fields": []}
            ]}
        ])))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path(format!("{BASE}/query")))
        .and(query_param(
            "q",
            "SELECT Id, LastName FROM Contact WHERE Id IN ('003xx0000000001AAA', '003xx0000000002AAA')",
        ))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "totalSize": 2,
            "done": true,
            "records": [
                {"Id": "003xx0000000001AAA", "LastName": "Lovelace"},
                {"Id": "003xx0000000002AAA", "LastName": "Hopper"}
            ]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let rest = SalesforceRestClient::new(keys).unwrap();

    let account = rest
        .create_record("Account", &RecordFields::new().set("Name", "Acme"))
        .await
        .unwrap();
    assert_eq!(account.id, ACCOUNT_ID);

    let contacts = [
        CompositeTreeRecord::new("Contact", "c1")
            .field("LastName", "Lovelace")
            .field("AccountId", ACCOUNT_ID),
        CompositeTreeRecord::new("Contact", "c2")
            .field("LastName", "Hopper")
            .field("AccountId", ACCOUNT_ID),
    ];
    let tree = rest
        .insert_multiple_records("Contact", &contacts)
        .await
        .unwrap();
    let ids: Vec<String> = ["c1", "c2"]
        .iter()
        .map(|r| tree.id_for(r).unwrap().to_string())
        .collect();

    let updates: Vec<RecordUpdate> = ids
        .iter()
        .map(|id| RecordUpdate::new("Contact", id, RecordFields::new().set("Title", "Engineer")))
        .collect();
    let outcome = rest.update_multiple_records(&updates).await.unwrap();
    assert_eq!(outcome.succeeded().count(), 1);
    assert_eq!(outcome.failed().count(), 1);

    let records: Vec<Value> = rest
        .query_by_id_batch("SELECT Id, LastName FROM Contact", &ids)
        .await
        .unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[1]["LastName"], "Hopper");
}

#[tokio::test]
async fn test_run_batch_job_after_login() {
    let mock_server = MockServer::start().await;
    let keys = login(&mock_server).await;

    Mock::given(method("GET"))
        .and(path(format!("{BASE}/tooling/executeAnonymous/")))
        .and(query_param(
            "anonymousBody",
            "Database.executeBatch(new AccountCleanupBatch());",
        ))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "line": -1,
            "column": -1,
            "compiled": true,
            "success": true
        })))
        .expect(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path(format!("{BASE}/query")))
        .and(query_param(
            "q",
            "SELECT Id FROM ApexClass WHERE Name = 'AccountCleanupBatch'",
        ))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "done": true,
            "records": [{"Id": "01pxx0000000007AAA"}]
        })))
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path(format!("{BASE}/query")))
        .and(query_param(
            "q",
            "SELECT Status FROM AsyncApexJob WHERE ApexClassId = '01pxx0000000007AAA' ORDER BY CreatedDate DESC LIMIT 1",
        ))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "done": true,
            "records": [{"Status": "Preparing"}]
        })))
        .up_to_n_times(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path(format!("{BASE}/query")))
        .and(query_param(
            "q",
            "SELECT Status FROM AsyncApexJob WHERE ApexClassId = '01pxx0000000007AAA' ORDER BY CreatedDate DESC LIMIT 1",
        ))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "done": true,
            "records": [{"Status": "Completed"}]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let tooling = ToolingClient::new(keys)
        .unwrap()
        .with_poll_config(PollConfig::default().with_initial_delay(Duration::from_millis(1)));

    assert!(tooling.submit_batch_job("AccountCleanupBatch").await.unwrap());
}

#[tokio::test]
async fn test_bad_password_is_authentication_failure() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/services/oauth2/token"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "error": "invalid_grant",
            "error_description": "authentication failure"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let err = authenticate(&settings(), &credential(&mock_server.uri()))
        .await
        .unwrap_err();
    assert!(err.is_authentication_failure());
}

#[test]
fn test_missing_setting_fails_before_network() {
    let err = ApiSettings::from_lookup(|name| match name {
        "REST_ENDPOINT" => Some("/services/data".to_string()),
        "API_VERSION" => Some("62.0".to_string()),
        _ => None,
    })
    .unwrap_err();
    assert!(err.is_configuration());
    assert!(err.to_string().contains("GRANT_SERVICE"));
}
