use std::{marker::PhantomData, sync::Arc, sync::Mutex};

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{header::CONTENT_TYPE, Request, StatusCode},
    response::Response,
    Router,
};
use estate_app::{
    common::store::Fields,
    modules::{
        unit_manage::{
            models::{CreateUnitManageDto, UpdateUnitManageDto},
            UnitManageModule,
        },
        user_manage::{
            models::{CreateUserManageDto, UpdateUserManageDto},
            UserManageModule,
        },
    },
    CrudService, NumericId,
};
use estate_http::{build_router, error::AppError};
use estate_kernel::{settings::Settings, ModuleRegistry};
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use tower::ServiceExt;

#[derive(Debug, Clone, PartialEq)]
enum Call {
    Create(Fields),
    FindAll,
    FindOne(NumericId),
    Update(NumericId, Fields),
    Remove(NumericId),
}

/// Service double that records every call and answers with a canned value.
struct Recording<C, U> {
    calls: Mutex<Vec<Call>>,
    reply: Value,
    _payloads: PhantomData<fn() -> (C, U)>,
}

impl<C, U> Recording<C, U> {
    fn new(reply: Value) -> Arc<Self> {
        Arc::new(Self {
            calls: Mutex::new(Vec::new()),
            reply,
            _payloads: PhantomData,
        })
    }

    fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl<C, U> CrudService for Recording<C, U>
where
    C: Into<Fields> + DeserializeOwned + Send + 'static,
    U: Into<Fields> + DeserializeOwned + Send + 'static,
{
    type Create = C;
    type Update = U;
    type Record = Value;

    fn resource(&self) -> &'static str {
        "recording"
    }

    async fn create(&self, dto: C) -> Result<Value, AppError> {
        self.record(Call::Create(dto.into()));
        Ok(self.reply.clone())
    }

    async fn find_all(&self) -> Result<Vec<Value>, AppError> {
        self.record(Call::FindAll);
        Ok(vec![self.reply.clone()])
    }

    async fn find_one(&self, id: NumericId) -> Result<Option<Value>, AppError> {
        self.record(Call::FindOne(id));
        Ok(Some(self.reply.clone()))
    }

    async fn update(&self, id: NumericId, dto: U) -> Result<Option<Value>, AppError> {
        self.record(Call::Update(id, dto.into()));
        Ok(Some(self.reply.clone()))
    }

    async fn remove(&self, id: NumericId) -> Result<Option<Value>, AppError> {
        self.record(Call::Remove(id));
        Ok(Some(self.reply.clone()))
    }
}

type UnitRecording = Recording<CreateUnitManageDto, UpdateUnitManageDto>;
type UserRecording = Recording<CreateUserManageDto, UpdateUserManageDto>;

fn recorded_app(reply: Value) -> (Router, Arc<UnitRecording>, Arc<UserRecording>) {
    let units = UnitRecording::new(reply.clone());
    let users = UserRecording::new(reply);

    let mut registry = ModuleRegistry::new();
    registry.register(Arc::new(UnitManageModule::new(units.clone())));
    registry.register(Arc::new(UserManageModule::new(users.clone())));

    (build_router(&registry, &Settings::default()), units, users)
}

fn store_app() -> Router {
    build_router(&estate_app::app::registry(), &Settings::default())
}

fn request(method: &str, uri: &str, body: Option<Value>) -> Request<Body> {
    let builder = Request::builder().method(method).uri(uri);
    match body {
        Some(body) => builder
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> Response {
    app.clone().oneshot(request(method, uri, body)).await.unwrap()
}

async fn json_body(response: Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn fields(value: Value) -> Fields {
    match value {
        Value::Object(map) => map,
        other => panic!("expected object, got {other}"),
    }
}

#[tokio::test]
async fn find_one_receives_the_number_not_the_string() {
    let (app, units, _) = recorded_app(json!({"id": 7}));

    let response = send(&app, "GET", "/unit-manage/7", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(units.calls(), vec![Call::FindOne(NumericId::new(7.0))]);
}

#[tokio::test]
async fn non_numeric_id_is_passed_through_as_nan() {
    let (app, units, _) = recorded_app(json!(null));

    let response = send(&app, "GET", "/unit-manage/foo", None).await;
    assert_eq!(response.status(), StatusCode::OK);

    let calls = units.calls();
    assert_eq!(calls.len(), 1);
    match calls[0] {
        Call::FindOne(id) => assert!(id.is_nan()),
        ref other => panic!("unexpected call {other:?}"),
    }
}

#[tokio::test]
async fn update_and_remove_use_the_same_coercion() {
    let (app, units, _) = recorded_app(json!({"ok": true}));

    send(&app, "PATCH", "/unit-manage/0x1F", Some(json!({"floor": 2}))).await;
    send(&app, "DELETE", "/unit-manage/abc", None).await;
    send(&app, "PATCH", "/unit-manage/1.5", Some(json!({}))).await;

    assert_eq!(
        units.calls(),
        vec![
            Call::Update(NumericId::new(31.0), fields(json!({"floor": 2}))),
            Call::Remove(NumericId::new(f64::NAN)),
            Call::Update(NumericId::new(1.5), Fields::new()),
        ]
    );
}

#[tokio::test]
async fn remove_returns_service_result_verbatim() {
    let reply = json!({"removed": true, "nested": {"list": [1, 2, 3]}});
    let (app, units, users) = recorded_app(reply.clone());

    let response = send(&app, "DELETE", "/user-manage/3", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await, reply);
    assert_eq!(users.calls(), vec![Call::Remove(NumericId::new(3.0))]);
    assert!(units.calls().is_empty());
}

#[tokio::test]
async fn create_passes_body_untransformed() {
    let (app, _, users) = recorded_app(json!({"id": 1}));
    let payload = json!({
        "id": "client-side",
        "fullName": "  Ada  ",
        "tags": ["a", "b"],
        "address": {"block": "C", "unit": 12}
    });

    let response = send(&app, "POST", "/user-manage", Some(payload.clone())).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(users.calls(), vec![Call::Create(fields(payload))]);
}

#[tokio::test]
async fn find_all_takes_no_arguments() {
    let (app, units, _) = recorded_app(json!({"id": 1}));

    let response = send(&app, "GET", "/unit-manage?page=2&sort=id", None).await;
    assert_eq!(json_body(response).await, json!([{"id": 1}]));
    assert_eq!(units.calls(), vec![Call::FindAll]);
}

#[tokio::test]
async fn non_object_body_is_rejected_before_the_service() {
    let (app, units, _) = recorded_app(json!({}));

    let response = send(&app, "POST", "/unit-manage", Some(json!([1, 2]))).await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(json_body(response).await["error"]["code"], "validation_error");
    assert!(units.calls().is_empty());
}

#[tokio::test]
async fn unit_lifecycle_against_the_store() {
    let app = store_app();

    let created = json_body(
        send(&app, "POST", "/unit-manage", Some(json!({"block": "A", "floor": 1}))).await,
    )
    .await;
    assert_eq!(created, json!({"id": 1, "block": "A", "floor": 1}));

    let updated = json_body(send(&app, "PATCH", "/unit-manage/1", Some(json!({"floor": 4}))).await).await;
    assert_eq!(updated, json!({"id": 1, "block": "A", "floor": 4}));

    let all = json_body(send(&app, "GET", "/unit-manage", None).await).await;
    assert_eq!(all, json!([{"id": 1, "block": "A", "floor": 4}]));

    let removed = json_body(send(&app, "DELETE", "/unit-manage/1", None).await).await;
    assert_eq!(removed, updated);

    let response = send(&app, "GET", "/unit-manage/1", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await, Value::Null);
}

#[tokio::test]
async fn resources_do_not_share_storage() {
    let app = store_app();

    send(&app, "POST", "/user-manage", Some(json!({"name": "Bo"}))).await;

    let units = json_body(send(&app, "GET", "/unit-manage", None).await).await;
    assert_eq!(units, json!([]));
    let user = json_body(send(&app, "GET", "/user-manage/1", None).await).await;
    assert_eq!(user, json!({"id": 1, "name": "Bo"}));
    let missing = json_body(send(&app, "GET", "/user-manage/foo", None).await).await;
    assert_eq!(missing, Value::Null);
}

#[tokio::test]
async fn openapi_document_lists_resource_paths() {
    let app = store_app();

    let spec = json_body(send(&app, "GET", "/docs/openapi.json", None).await).await;
    for path in ["/unit-manage", "/unit-manage/{id}", "/user-manage", "/user-manage/{id}"] {
        assert!(spec["paths"][path].is_object(), "{path} missing");
    }
    assert!(spec["components"]["schemas"]["CreateUserManageDto"].is_object());
}
