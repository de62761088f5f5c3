use bridgekit_core::{
    api::{Api, ApiMethodCall, BaseRequest, BridgeClient, CallError, NoReturnValue},
    relation::{EncodingMode, OptionalParent, Parent, scope_encoding_mode},
};
use fake_transport::FakeTransport;
use futures_util::StreamExt;
use http::Method;
use models::{Pet, person};
use serde::Serialize;
use serde_json::json;

mod fake_transport;
mod models;

#[derive(Serialize)]
struct GetPet {
    id: i64,
}

impl ApiMethodCall for GetPet {
    type Output = Pet;
    const TYPE_NAME: &'static str = "PetAPI";
    const METHOD_ID: &'static str = "getPet";
}

#[derive(Serialize)]
struct SavePet {
    pet: Pet,
}

impl ApiMethodCall for SavePet {
    type Output = NoReturnValue;
    const TYPE_NAME: &'static str = "PetAPI";
    const METHOD_ID: &'static str = "savePet";
}

fn api(transport: &FakeTransport) -> Api<FakeTransport> {
    let base_request = BaseRequest::parse("http://localhost:8080/api")
        .unwrap()
        .with_bearer_token("secret")
        .unwrap();

    Api::new(base_request, BridgeClient::new(transport.clone()))
}

fn rex() -> Pet {
    Pet {
        id: Some(1),
        name: "Rex".into(),
        owner: Parent::from_value(person(7, "Alice")).unwrap(),
        sitter: OptionalParent::none(),
    }
}

#[tokio::test]
async fn test_request_shape() {
    let transport = FakeTransport::default();
    transport.respond(200, json!({ "id": 1, "name": "Rex", "owner": { "id": 7 } }));

    let pet = api(&transport).perform(&GetPet { id: 1 }).await.unwrap();

    assert_eq!(pet.name, "Rex");
    assert_eq!(pet.owner.id(), &7);
    assert!(pet.sitter.is_none());

    let requests = transport.requests();
    assert_eq!(requests.len(), 1);

    let request = &requests[0];
    assert_eq!(request.method, Method::POST);
    assert_eq!(request.uri, "http://localhost:8080/api");
    assert_eq!(request.headers["API-Type"], "PetAPI");
    assert_eq!(request.headers["API-Method"], "getPet");
    assert_eq!(request.headers["Content-Type"], "application/json");
    assert_eq!(request.headers["Authorization"], "Bearer secret");
    assert_eq!(request.body, json!({ "id": 1 }));
}

#[tokio::test]
async fn test_call_body_follows_ambient_mode() {
    let transport = FakeTransport::default();
    transport.respond_raw(200, Vec::new());
    transport.respond_raw(200, b"{}".to_vec());

    let api = api(&transport);
    let call = SavePet { pet: rex() };

    let output = api.perform(&call).await.unwrap();
    assert_eq!(output, NoReturnValue);

    scope_encoding_mode(EncodingMode::WriteBack, api.perform(&call))
        .await
        .unwrap();

    let requests = transport.requests();
    assert_eq!(
        requests[0].body["pet"]["owner"],
        json!({ "id": 7, "name": "Alice", "mentor": { "id": null } })
    );
    assert_eq!(requests[1].body["pet"]["owner"], json!({ "id": 7 }));
}

#[tokio::test]
async fn test_status_error_with_reason() {
    let transport = FakeTransport::default();
    transport.respond(401, json!({ "error": true, "reason": "Not logged in" }));

    let err = api(&transport).perform(&GetPet { id: 1 }).await.unwrap_err();
    let http_error = err.as_http_error().unwrap();

    assert!(http_error.is_unauthorized());
    assert_eq!(http_error.reason.as_deref(), Some("Not logged in"));
    assert_eq!(err.to_string(), "Not logged in (401)");
}

#[tokio::test]
async fn test_status_error_without_reason() {
    let transport = FakeTransport::default();
    transport.respond_raw(500, b"<html>oops</html>".to_vec());

    let err = api(&transport).perform(&GetPet { id: 1 }).await.unwrap_err();

    assert_eq!(err.as_http_error().unwrap().reason, None);
    assert_eq!(err.to_string(), "Internal Server Error (500)");
}

#[tokio::test]
async fn test_transport_and_decode_failures() {
    let transport = FakeTransport::default();
    transport.fail("connection reset");
    transport.respond(200, json!({ "id": 1, "name": "Rex", "owner": "seven" }));

    let api = api(&transport);

    let err = api.perform(&GetPet { id: 1 }).await.unwrap_err();
    assert!(matches!(err, CallError::Transport(_)));
    assert!(err.to_string().contains("connection reset"));

    let err = api.perform(&GetPet { id: 1 }).await.unwrap_err();
    match err {
        CallError::Decode { body, path, .. } => {
            assert!(body.contains("seven"));
            assert_eq!(path, "owner");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn test_failures_are_broadcast_to_every_subscriber() {
    let transport = FakeTransport::default();
    transport.respond(404, json!({ "error": true, "reason": "No such pet" }));
    transport.respond(200, json!({ "id": 1, "name": "Rex", "owner": { "id": 7 } }));
    transport.respond(409, json!({ "error": true, "reason": "Conflict" }));

    let api = api(&transport);
    let mut first = api.errors();
    let mut second = api.errors();

    assert!(api.perform(&GetPet { id: 2 }).await.is_err());
    assert!(api.perform(&GetPet { id: 1 }).await.is_ok());

    first.cancel();
    assert!(api.perform(&GetPet { id: 1 }).await.is_err());

    let reasons = |err: CallError| err.as_http_error().unwrap().reason.clone().unwrap();

    assert_eq!(reasons(second.next().await.unwrap()), "No such pet");
    assert_eq!(reasons(second.next().await.unwrap()), "Conflict");

    assert_eq!(reasons(first.next().await.unwrap()), "No such pet");
    assert!(first.next().await.is_none());
}

#[derive(Serialize)]
struct RenamePet {
    name: String,
}

impl ApiMethodCall for RenamePet {
    type Output = NoReturnValue;
    const TYPE_NAME: &'static str = "PetAPI";
    const METHOD_ID: &'static str = "rename\npet";
}

#[tokio::test]
async fn test_invalid_header_is_reported_and_broadcast() {
    let transport = FakeTransport::default();
    let api = api(&transport);
    let mut errors = api.errors();

    let err = api
        .perform(&RenamePet { name: "Max".into() })
        .await
        .unwrap_err();

    assert!(matches!(err, CallError::InvalidHeader { name: "API-Method", .. }));
    assert!(matches!(
        errors.next().await.unwrap(),
        CallError::InvalidHeader { name: "API-Method", .. }
    ));
    assert!(transport.requests().is_empty());
}
