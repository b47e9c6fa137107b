//! Integration tests for n8n-client API operations.
//!
//! These tests use wiremock to simulate server responses and verify
//! that the client correctly handles various API scenarios.

use n8n_client::{
    Client, ClientError, Confirmation, ExecutionFilter, ExecutionStatus, JsonObject, MASK,
    TerminalState, TriggerOptions, TriggerOutcome, WorkflowDefinition, WorkflowFilter,
    WorkflowUpdate,
};
use serde_json::{Value, json};
use std::time::Duration;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> Client {
    Client::new(server.uri()).unwrap().with_api_key("test-key")
}

fn fast_wait(timeout: Duration) -> TriggerOptions {
    TriggerOptions::default()
        .wait()
        .with_timeout(timeout)
        .with_poll_interval(Duration::from_millis(50))
}

async fn request_count(server: &MockServer) -> usize {
    server.received_requests().await.map_or(0, |r| r.len())
}

#[tokio::test]
async fn test_api_key_header_is_sent() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/workflows"))
        .and(header("X-N8N-API-KEY", "test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": [] })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let mut client = client_for(&mock_server);
    let session = client.connect().unwrap();
    let workflows = session.list_workflows(&WorkflowFilter::default()).await.unwrap();
    assert!(workflows.is_empty());
}

#[tokio::test]
async fn test_list_workflows_filters_client_side() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/workflows"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [
                { "id": "1", "name": "Prod sync", "active": true, "tags": [{ "name": "prod" }] },
                { "id": 2, "name": "Dev sync", "active": false, "tags": [{ "name": "dev" }] },
                { "id": "3", "name": "Untagged", "active": true }
            ]
        })))
        .mount(&mock_server)
        .await;

    let mut client = client_for(&mock_server);
    let session = client.connect().unwrap();

    let all = session.list_workflows(&WorkflowFilter::default()).await.unwrap();
    assert_eq!(all.len(), 3);
    assert_eq!(all[1].id, "2");

    let active = session
        .list_workflows(&WorkflowFilter::default().with_active(true))
        .await
        .unwrap();
    assert_eq!(active.iter().map(|w| w.id.as_str()).collect::<Vec<_>>(), vec!["1", "3"]);

    let tagged = session
        .list_workflows(&WorkflowFilter::default().with_tag("dev").with_tag("prod"))
        .await
        .unwrap();
    assert_eq!(tagged.len(), 2);
}

#[tokio::test]
async fn test_list_workflows_tolerates_unnamed_tags() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/workflows"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [
                { "id": "1", "name": "Odd tags", "active": true, "tags": [{ "id": "t1" }] },
                { "id": "2", "name": "Prod", "active": true, "tags": [{ "id": "t2", "name": "prod" }] }
            ]
        })))
        .mount(&mock_server)
        .await;

    let mut client = client_for(&mock_server);
    let session = client.connect().unwrap();

    let all = session.list_workflows(&WorkflowFilter::default()).await.unwrap();
    assert_eq!(all.len(), 2);

    let filter = WorkflowFilter::default().with_tag("prod");
    let prod = session.list_workflows(&filter).await.unwrap();
    assert_eq!(prod.len(), 1);
    assert_eq!(prod[0].id, "2");
}

#[tokio::test]
async fn test_get_workflow_not_found() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/workflows/missing"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "message": "Not Found"
        })))
        .mount(&mock_server)
        .await;

    let mut client = client_for(&mock_server);
    let session = client.connect().unwrap();
    let result = session.get_workflow("missing").await;

    match result {
        Err(ClientError::NotFound { resource, id }) => {
            assert_eq!(resource, "Workflow");
            assert_eq!(id, "missing");
        }
        other => panic!("Expected NotFound error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_server_error_maps_to_api_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/workflows/1"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({
            "message": "Internal server error"
        })))
        .mount(&mock_server)
        .await;

    let mut client = client_for(&mock_server);
    let session = client.connect().unwrap();

    match session.get_workflow("1").await {
        Err(ClientError::Api { status, message }) => {
            assert_eq!(status, 500);
            assert!(message.contains("Internal server error"));
        }
        other => panic!("Expected API error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_create_workflow_posts_definition() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/workflows"))
        .and(body_json(json!({ "name": "New", "nodes": [], "connections": {} })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "10",
            "name": "New",
            "active": false
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let object = JsonObject::parse(r#"{"nodes": [], "connections": {}}"#, "workflow").unwrap();
    let definition = WorkflowDefinition::for_create(object, Some("New")).unwrap();

    let mut client = client_for(&mock_server);
    let session = client.connect().unwrap();
    let created = session.create_workflow(definition, false).await.unwrap();
    assert_eq!(created.id, "10");
    assert!(!created.active);
}

#[tokio::test]
async fn test_create_workflow_and_activate() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/workflows"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "11", "name": "New", "active": false
        })))
        .mount(&mock_server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/v1/workflows/11/activate"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "11", "name": "New", "active": true
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let object = JsonObject::parse(r#"{"name": "New", "nodes": []}"#, "workflow").unwrap();
    let definition = WorkflowDefinition::for_create(object, None).unwrap();

    let mut client = client_for(&mock_server);
    let session = client.connect().unwrap();
    let created = session.create_workflow(definition, true).await.unwrap();
    assert!(created.active);
}

#[tokio::test]
async fn test_create_workflow_validation_from_server() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/workflows"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "message": "request/body/nodes must be array"
        })))
        .mount(&mock_server)
        .await;

    let object = JsonObject::parse(r#"{"name": "Bad", "nodes": 1}"#, "workflow").unwrap();
    let definition = WorkflowDefinition::for_create(object, None).unwrap();

    let mut client = client_for(&mock_server);
    let session = client.connect().unwrap();

    match session.create_workflow(definition, false).await {
        Err(ClientError::Validation(msg)) => assert_eq!(msg, "request/body/nodes must be array"),
        other => panic!("Expected validation error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_partial_update_fetches_then_patches() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/workflows/5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "5",
            "name": "Old",
            "active": false,
            "nodes": [{ "name": "Start" }],
            "connections": {}
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("PATCH"))
        .and(path("/api/v1/workflows/5"))
        .and(body_json(json!({
            "id": "5",
            "name": "Renamed",
            "active": true,
            "nodes": [{ "name": "Start" }],
            "connections": {}
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "5",
            "name": "Renamed",
            "active": true
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let update = WorkflowUpdate {
        name: Some("Renamed".to_string()),
        activate: true,
        ..Default::default()
    };

    let mut client = client_for(&mock_server);
    let session = client.connect().unwrap();
    let updated = session.update_workflow("5", update).await.unwrap();
    assert_eq!(updated.name, "Renamed");
    assert!(updated.active);
}

#[tokio::test]
async fn test_full_update_strips_id_and_skips_fetch() {
    let mock_server = MockServer::start().await;

    Mock::given(method("PATCH"))
        .and(path("/api/v1/workflows/5"))
        .and(body_json(json!({ "name": "Replaced", "nodes": [] })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "5", "name": "Replaced", "active": false
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let object =
        JsonObject::parse(r#"{"id": "999", "name": "Replaced", "nodes": []}"#, "workflow").unwrap();
    let update = WorkflowUpdate {
        definition: Some(WorkflowDefinition::for_update(object).unwrap()),
        ..Default::default()
    };

    let mut client = client_for(&mock_server);
    let session = client.connect().unwrap();
    session.update_workflow("5", update).await.unwrap();
    assert_eq!(request_count(&mock_server).await, 1);
}

#[tokio::test]
async fn test_update_aborts_when_fetch_fails() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/workflows/5"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;

    Mock::given(method("PATCH"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let update = WorkflowUpdate {
        deactivate: true,
        ..Default::default()
    };

    let mut client = client_for(&mock_server);
    let session = client.connect().unwrap();
    let result = session.update_workflow("5", update).await;
    assert!(matches!(result, Err(ClientError::NotFound { .. })));
}

#[tokio::test]
async fn test_update_rejects_non_object_workflow() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/workflows/5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!("not a workflow")))
        .mount(&mock_server)
        .await;

    Mock::given(method("PATCH"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let update = WorkflowUpdate {
        activate: true,
        ..Default::default()
    };

    let mut client = client_for(&mock_server);
    let session = client.connect().unwrap();
    let result = session.update_workflow("5", update).await;
    assert!(matches!(result, Err(ClientError::Deserialize(_))));
}

#[tokio::test]
async fn test_invalid_update_sends_nothing() {
    let mock_server = MockServer::start().await;

    let update = WorkflowUpdate {
        activate: true,
        deactivate: true,
        ..Default::default()
    };

    let mut client = client_for(&mock_server);
    let session = client.connect().unwrap();
    let result = session.update_workflow("5", update).await;
    assert!(matches!(result, Err(ClientError::Validation(_))));
    assert_eq!(request_count(&mock_server).await, 0);
}

#[tokio::test]
async fn test_delete_without_confirmation_sends_nothing() {
    let mock_server = MockServer::start().await;

    let mut client = client_for(&mock_server);
    let session = client.connect().unwrap();

    let result = session.delete_workflow("456", Confirmation::None).await;
    match result {
        Err(ClientError::Validation(msg)) => assert!(msg.contains("requires confirmation")),
        other => panic!("Expected validation error, got {other:?}"),
    }

    let result = session.delete_credential("1", Confirmation::None).await;
    assert!(matches!(result, Err(ClientError::Validation(_))));
    assert_eq!(request_count(&mock_server).await, 0);
}

#[tokio::test]
async fn test_delete_active_workflow_requires_force() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/workflows/7"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "7", "name": "Live", "active": true
        })))
        .mount(&mock_server)
        .await;

    Mock::given(method("DELETE"))
        .and(path("/api/v1/workflows/7"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "7", "name": "Live", "active": true
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let mut client = client_for(&mock_server);
    let session = client.connect().unwrap();

    let result = session.delete_workflow("7", Confirmation::Confirmed).await;
    match result {
        Err(ClientError::Validation(msg)) => assert!(msg.contains("currently active")),
        other => panic!("Expected validation error, got {other:?}"),
    }

    let deleted = session.delete_workflow("7", Confirmation::Forced).await.unwrap();
    assert_eq!(deleted.name, "Live");
}

#[tokio::test]
async fn test_activate_already_active_is_ok() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/workflows/3/activate"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "3", "name": "Always on", "active": true
        })))
        .expect(2)
        .mount(&mock_server)
        .await;

    let mut client = client_for(&mock_server);
    let session = client.connect().unwrap();
    for _ in 0..2 {
        let workflow = session.activate_workflow("3").await.unwrap();
        assert!(workflow.active);
    }
}

#[tokio::test]
async fn test_deactivate_workflow() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/workflows/3/deactivate"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "3", "name": "Off", "active": false
        })))
        .mount(&mock_server)
        .await;

    let mut client = client_for(&mock_server);
    let session = client.connect().unwrap();
    assert!(!session.deactivate_workflow("3").await.unwrap().active);
}

#[tokio::test]
async fn test_trigger_without_wait_does_not_poll() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/workflows/123/execute"))
        .and(body_json(json!({})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "executionId": "e1" })))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let mut client = client_for(&mock_server);
    let session = client.connect().unwrap();
    let outcome = session
        .trigger_workflow("123", None, TriggerOptions::default())
        .await
        .unwrap();

    assert_eq!(outcome.to_json(), &json!({ "executionId": "e1" }));
}

#[tokio::test]
async fn test_trigger_response_is_passed_through() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/workflows/123/execute"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "executionId": 77 })))
        .mount(&mock_server)
        .await;

    let mut client = client_for(&mock_server);
    let session = client.connect().unwrap();
    let outcome = session
        .trigger_workflow("123", None, TriggerOptions::default())
        .await
        .unwrap();

    assert_eq!(outcome.to_json(), &json!({ "executionId": 77 }));
}

#[tokio::test]
async fn test_trigger_empty_execution_id_is_not_polled() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/workflows/123/execute"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "executionId": "", "ok": true })),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404))
        .expect(0)
        .mount(&mock_server)
        .await;

    let mut client = client_for(&mock_server);
    let session = client.connect().unwrap();
    let outcome = session
        .trigger_workflow("123", None, fast_wait(Duration::from_secs(5)))
        .await
        .unwrap();

    assert!(matches!(outcome, TriggerOutcome::Submitted(_)));
    assert_eq!(outcome.to_json(), &json!({ "executionId": "", "ok": true }));
    assert_eq!(request_count(&mock_server).await, 1);
}

#[tokio::test]
async fn test_trigger_sends_input_and_waits_for_success() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/workflows/123/execute"))
        .and(body_json(json!({ "customer": "acme" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "executionId": 77 })))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/v1/executions/77"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 77,
            "workflowId": "123",
            "status": "running"
        })))
        .up_to_n_times(2)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/v1/executions/77"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 77,
            "workflowId": "123",
            "status": "SUCCESS",
            "data": { "resultData": {} }
        })))
        .mount(&mock_server)
        .await;

    let input = JsonObject::parse(r#"{"customer": "acme"}"#, "input").unwrap();

    let mut client = client_for(&mock_server);
    let session = client.connect().unwrap();
    let outcome = session
        .trigger_workflow("123", Some(&input), fast_wait(Duration::from_secs(10)))
        .await
        .unwrap();

    match outcome {
        TriggerOutcome::Finished { state, execution } => {
            assert_eq!(state, TerminalState::Succeeded);
            assert_eq!(execution.id, "77");
            assert_eq!(execution.status, ExecutionStatus::Success);
        }
        other => panic!("Expected finished execution, got {other:?}"),
    }
}

#[tokio::test]
async fn test_trigger_reports_failed_execution() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/workflows/9/execute"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "executionId": "e9" })))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/v1/executions/e9"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "e9", "status": "crashed"
        })))
        .mount(&mock_server)
        .await;

    let mut client = client_for(&mock_server);
    let session = client.connect().unwrap();
    let outcome = session
        .trigger_workflow("9", None, fast_wait(Duration::from_secs(10)))
        .await
        .unwrap();

    assert!(matches!(
        outcome,
        TriggerOutcome::Finished {
            state: TerminalState::Failed,
            ..
        }
    ));
}

#[tokio::test]
async fn test_trigger_times_out() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/workflows/123/execute"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "executionId": "e1" })))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/v1/executions/e1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "e1", "status": "running"
        })))
        .mount(&mock_server)
        .await;

    let mut client = client_for(&mock_server);
    let session = client.connect().unwrap();

    let started = std::time::Instant::now();
    let result = session
        .trigger_workflow("123", None, fast_wait(Duration::from_secs(1)))
        .await;

    match result {
        Err(err @ ClientError::Timeout { .. }) => {
            assert_eq!(err.to_string(), "Execution timed out after 1 seconds");
        }
        other => panic!("Expected timeout, got {other:?}"),
    }
    assert!(started.elapsed() >= Duration::from_secs(1));
    assert!(started.elapsed() < Duration::from_secs(5));
}

#[tokio::test]
async fn test_trigger_poll_failure_propagates() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/workflows/123/execute"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "executionId": "gone" })))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/v1/executions/gone"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&mock_server)
        .await;

    let mut client = client_for(&mock_server);
    let session = client.connect().unwrap();
    let result = session
        .trigger_workflow("123", None, fast_wait(Duration::from_secs(10)))
        .await;

    assert!(matches!(
        result,
        Err(ClientError::NotFound {
            resource: "Execution",
            ..
        })
    ));
}

#[tokio::test]
async fn test_trigger_inactive_workflow_is_validation_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/workflows/123/execute"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "message": "Workflow is not active"
        })))
        .mount(&mock_server)
        .await;

    let mut client = client_for(&mock_server);
    let session = client.connect().unwrap();
    let result = session
        .trigger_workflow("123", None, TriggerOptions::default())
        .await;

    assert!(matches!(result, Err(ClientError::Validation(ref msg)) if msg.contains("active")));
}

#[tokio::test]
async fn test_get_credential_masks_sensitive_fields() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/credentials/1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "1",
            "name": "Basic auth",
            "type": "httpBasicAuth",
            "data": { "user": "admin", "password": "supersecret123" }
        })))
        .mount(&mock_server)
        .await;

    let mut client = client_for(&mock_server);
    let session = client.connect().unwrap();
    let credential = session.get_credential("1").await.unwrap();
    let data = credential.data.as_ref().unwrap();

    assert_eq!(data["user"], "admin");
    assert_eq!(data["password"], MASK);
    assert_eq!(credential.credential_type, "httpBasicAuth");
}

#[tokio::test]
async fn test_list_credentials_by_type() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/credentials"))
        .and(query_param("type", "slackApi"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [{
                "id": 4,
                "name": "Slack",
                "type": "slackApi",
                "data": { "accessToken": "xoxb-1" }
            }]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let mut client = client_for(&mock_server);
    let session = client.connect().unwrap();
    let credentials = session.list_credentials(Some("slackApi")).await.unwrap();

    assert_eq!(credentials.len(), 1);
    assert_eq!(credentials[0].id, "4");
    assert_eq!(credentials[0].data.as_ref().unwrap()["accessToken"], MASK);
}

#[tokio::test]
async fn test_create_credential_masks_response() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/credentials"))
        .and(body_json(json!({
            "name": "API",
            "type": "httpHeaderAuth",
            "data": { "name": "Authorization", "value": "Bearer x", "apiKey": "k" }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "20",
            "name": "API",
            "type": "httpHeaderAuth",
            "data": { "name": "Authorization", "value": "Bearer x", "apiKey": "k" }
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let data = JsonObject::parse(
        r#"{"name": "Authorization", "value": "Bearer x", "apiKey": "k"}"#,
        "credential data",
    )
    .unwrap();

    let mut client = client_for(&mock_server);
    let session = client.connect().unwrap();
    let credential = session
        .create_credential("API", "httpHeaderAuth", &data)
        .await
        .unwrap();

    let data = credential.data.as_ref().unwrap();
    assert_eq!(data["apiKey"], MASK);
    assert_eq!(data["name"], "Authorization");
}

#[tokio::test]
async fn test_credential_schema() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/credentials/schema/httpBasicAuth"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "additionalProperties": false,
            "type": "object",
            "properties": {
                "user": { "type": "string" },
                "password": { "type": "string" }
            },
            "required": ["user", "password"]
        })))
        .mount(&mock_server)
        .await;

    let mut client = client_for(&mock_server);
    let session = client.connect().unwrap();
    let schema = session.credential_schema("httpBasicAuth").await.unwrap();

    let names: Vec<_> = schema.fields().into_iter().map(|f| f.name).collect();
    assert_eq!(names, vec!["user", "password"]);
    assert_eq!(schema.json()["type"], "object");
}

#[tokio::test]
async fn test_list_executions_sends_query() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/executions"))
        .and(query_param("workflowId", "123"))
        .and(query_param("status", "error"))
        .and(query_param("limit", "5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [{ "id": "1", "workflowId": "123", "status": "error" }],
            "nextCursor": null
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let filter = ExecutionFilter {
        workflow_id: Some("123".to_string()),
        status: Some(ExecutionStatus::parse("ERROR")),
        limit: Some(5),
    };

    let mut client = client_for(&mock_server);
    let session = client.connect().unwrap();
    let executions = session.list_executions(&filter).await.unwrap();

    assert_eq!(executions.len(), 1);
    assert_eq!(executions[0].workflow_id.as_deref(), Some("123"));
}

#[tokio::test]
async fn test_delete_credential() {
    let mock_server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/api/v1/credentials/8"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&mock_server)
        .await;

    let mut client = client_for(&mock_server);
    let session = client.connect().unwrap();
    session
        .delete_credential("8", Confirmation::Confirmed)
        .await
        .unwrap();
}

#[tokio::test]
async fn test_health_check() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/healthz"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "status": "ok" })))
        .mount(&mock_server)
        .await;

    let mut client = client_for(&mock_server);
    let session = client.connect().unwrap();
    assert!(session.health_check().await);
}

#[tokio::test]
async fn test_health_check_unreachable() {
    let mut client = Client::new("http://127.0.0.1:9")
        .unwrap()
        .with_timeout(Duration::from_secs(2));
    let session = client.connect().unwrap();
    assert!(!session.health_check().await);
}

#[tokio::test]
async fn test_workflow_passthrough_is_lossless() {
    let mock_server = MockServer::start().await;

    let body = json!({
        "id": "1",
        "name": "W",
        "active": false,
        "nodes": [],
        "connections": {},
        "settings": { "executionOrder": "v1" },
        "staticData": null,
        "createdAt": "2024-01-01T00:00:00.000Z"
    });

    Mock::given(method("GET"))
        .and(path("/api/v1/workflows/1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body.clone()))
        .mount(&mock_server)
        .await;

    let mut client = client_for(&mock_server);
    let session = client.connect().unwrap();
    let workflow = session.get_workflow("1").await.unwrap();
    let value: Value = serde_json::to_value(&workflow).unwrap();
    assert_eq!(value, body);
}

#[tokio::test]
async fn test_get_execution_keeps_numeric_ids() {
    let mock_server = MockServer::start().await;
    let body = json!({
        "id": 1000,
        "workflowId": 5,
        "status": "success",
        "finished": true,
        "stoppedAt": null
    });

    Mock::given(method("GET"))
        .and(path("/api/v1/executions/1000"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body.clone()))
        .mount(&mock_server)
        .await;

    let mut client = client_for(&mock_server);
    let session = client.connect().unwrap();
    let execution = session.get_execution("1000").await.unwrap();

    assert_eq!(execution.id, "1000");
    assert_eq!(execution.workflow_id.as_deref(), Some("5"));
    assert_eq!(serde_json::to_value(&execution).unwrap(), body);
}

#[tokio::test]
async fn test_credential_nested_secrets_are_masked() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/credentials/3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 3,
            "name": "Nested",
            "type": "custom",
            "data": {
                "secret": { "value": "hunter2" },
                "apiKey": [{ "v": "k1" }],
                "host": "example.com"
            }
        })))
        .mount(&mock_server)
        .await;

    let mut client = client_for(&mock_server);
    let session = client.connect().unwrap();
    let credential = session.get_credential("3").await.unwrap();

    let rendered = serde_json::to_string(&credential).unwrap();
    assert!(!rendered.contains("hunter2"), "{rendered}");
    assert!(!rendered.contains("k1"), "{rendered}");
    assert_eq!(credential.json()["id"], 3);
    assert_eq!(credential.json()["data"]["host"], "example.com");
}
