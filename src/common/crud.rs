//! Generic resource controller.
//!
//! Every resource module is the same five routes over a [`CrudService`]. The
//! controller binds the body or coerces the path id and hands both to the
//! service untouched; whatever the service returns is the response.

use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use estate_http::{error::AppError, extract::ValidatedJson};
use estate_kernel::RouteInfo;
use serde::{de::DeserializeOwned, Serialize};
use serde_json::json;

use super::id::NumericId;

/// Service contract behind a resource controller.
#[async_trait]
pub trait CrudService: Send + Sync + 'static {
    type Create: DeserializeOwned + Send + 'static;
    type Update: DeserializeOwned + Send + 'static;
    type Record: Serialize + Send + 'static;

    /// Resource name used in logs.
    fn resource(&self) -> &'static str;

    async fn create(&self, dto: Self::Create) -> Result<Self::Record, AppError>;

    async fn find_all(&self) -> Result<Vec<Self::Record>, AppError>;

    async fn find_one(&self, id: NumericId) -> Result<Option<Self::Record>, AppError>;

    async fn update(
        &self,
        id: NumericId,
        dto: Self::Update,
    ) -> Result<Option<Self::Record>, AppError>;

    async fn remove(&self, id: NumericId) -> Result<Option<Self::Record>, AppError>;
}

/// Routes for one resource, relative to its mount point.
pub fn router<S: CrudService>(service: Arc<S>) -> Router {
    Router::new()
        .route("/", get(find_all::<S>).post(create::<S>))
        .route(
            "/{id}",
            get(find_one::<S>).patch(update::<S>).delete(remove::<S>),
        )
        .with_state(service)
}

/// The route table matching [`router`].
pub fn route_table() -> Vec<RouteInfo> {
    vec![
        RouteInfo {
            method: "POST",
            path: "/",
            operation: "create",
        },
        RouteInfo {
            method: "GET",
            path: "/",
            operation: "findAll",
        },
        RouteInfo {
            method: "GET",
            path: "/{id}",
            operation: "findOne",
        },
        RouteInfo {
            method: "PATCH",
            path: "/{id}",
            operation: "update",
        },
        RouteInfo {
            method: "DELETE",
            path: "/{id}",
            operation: "remove",
        },
    ]
}

async fn create<S: CrudService>(
    State(service): State<Arc<S>>,
    ValidatedJson(dto): ValidatedJson<S::Create>,
) -> Result<Json<S::Record>, AppError> {
    tracing::debug!(resource = service.resource(), "create");
    Ok(Json(service.create(dto).await?))
}

async fn find_all<S: CrudService>(
    State(service): State<Arc<S>>,
) -> Result<Json<Vec<S::Record>>, AppError> {
    tracing::debug!(resource = service.resource(), "findAll");
    Ok(Json(service.find_all().await?))
}

async fn find_one<S: CrudService>(
    State(service): State<Arc<S>>,
    Path(id): Path<String>,
) -> Result<Json<Option<S::Record>>, AppError> {
    let id = NumericId::coerce(&id);
    tracing::debug!(resource = service.resource(), %id, "findOne");
    Ok(Json(service.find_one(id).await?))
}

async fn update<S: CrudService>(
    State(service): State<Arc<S>>,
    Path(id): Path<String>,
    ValidatedJson(dto): ValidatedJson<S::Update>,
) -> Result<Json<Option<S::Record>>, AppError> {
    let id = NumericId::coerce(&id);
    tracing::debug!(resource = service.resource(), %id, "update");
    Ok(Json(service.update(id, dto).await?))
}

async fn remove<S: CrudService>(
    State(service): State<Arc<S>>,
    Path(id): Path<String>,
) -> Result<Json<Option<S::Record>>, AppError> {
    let id = NumericId::coerce(&id);
    tracing::debug!(resource = service.resource(), %id, "remove");
    Ok(Json(service.remove(id).await?))
}

/// OpenAPI fragment for a resource mounted with [`router`].
///
/// `schema` names the record's component schema, e.g. `UnitManage` yields `UnitManage`,
/// `CreateUnitManageDto` and `UpdateUnitManageDto` schemas.
pub fn openapi(tag: &str, schema: &str) -> serde_json::Value {
    let record_ref = json!({ "$ref": format!("#/components/schemas/{schema}") });
    let nullable_record = json!({ "oneOf": [record_ref.clone(), { "type": "null" }] });
    let create_ref = json!({ "$ref": format!("#/components/schemas/Create{schema}Dto") });
    let update_ref = json!({ "$ref": format!("#/components/schemas/Update{schema}Dto") });
    let id_param = json!([{
        "name": "id",
        "in": "path",
        "required": true,
        "description": "Record id; coerced to a number without validation",
        "schema": { "type": "string" }
    }]);
    let error_response = json!({
        "description": "Request body rejected",
        "content": { "application/json": { "schema": { "$ref": "#/components/schemas/ErrorResponse" } } }
    });
    let ok = |description: &str, content: &serde_json::Value| {
        json!({
            "description": description,
            "content": { "application/json": { "schema": content } }
        })
    };
    let body = |content: &serde_json::Value| {
        json!({
            "required": true,
            "content": { "application/json": { "schema": content } }
        })
    };

    json!({
        "paths": {
            "/": {
                "post": {
                    "summary": format!("Create {tag}"),
                    "tags": [tag],
                    "requestBody": body(&create_ref),
                    "responses": {
                        "200": ok("Created record", &record_ref),
                        "400": error_response.clone(),
                        "422": error_response.clone()
                    }
                },
                "get": {
                    "summary": format!("List {tag}"),
                    "tags": [tag],
                    "responses": {
                        "200": ok("All records", &json!({ "type": "array", "items": record_ref.clone() }))
                    }
                }
            },
            "/{id}": {
                "get": {
                    "summary": format!("Get {tag}"),
                    "tags": [tag],
                    "parameters": id_param.clone(),
                    "responses": {
                        "200": ok("Record, or null when absent", &nullable_record)
                    }
                },
                "patch": {
                    "summary": format!("Update {tag}"),
                    "tags": [tag],
                    "parameters": id_param.clone(),
                    "requestBody": body(&update_ref),
                    "responses": {
                        "200": ok("Updated record, or null when absent", &nullable_record),
                        "400": error_response.clone(),
                        "422": error_response
                    }
                },
                "delete": {
                    "summary": format!("Remove {tag}"),
                    "tags": [tag],
                    "parameters": id_param,
                    "responses": {
                        "200": ok("Removed record, or null when absent", &nullable_record)
                    }
                }
            }
        },
        "components": {
            "schemas": {
                schema: {
                    "type": "object",
                    "properties": {
                        "id": { "type": "integer", "format": "int64", "minimum": 1 }
                    },
                    "required": ["id"],
                    "additionalProperties": true
                },
                format!("Create{schema}Dto"): {
                    "type": "object",
                    "additionalProperties": true
                },
                format!("Update{schema}Dto"): {
                    "type": "object",
                    "additionalProperties": true
                }
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn route_table_covers_every_operation() {
        let ops: Vec<_> = route_table().iter().map(|r| (r.method, r.path, r.operation)).collect();
        assert_eq!(
            ops,
            vec![
                ("POST", "/", "create"),
                ("GET", "/", "findAll"),
                ("GET", "/{id}", "findOne"),
                ("PATCH", "/{id}", "update"),
                ("DELETE", "/{id}", "remove"),
            ]
        );
    }

    #[test]
    fn openapi_names_schemas_after_resource() {
        let spec = openapi("Units", "UnitManage");
        let schemas = &spec["components"]["schemas"];
        assert!(schemas["UnitManage"].is_object());
        assert!(schemas["CreateUnitManageDto"].is_object());
        assert!(schemas["UpdateUnitManageDto"].is_object());
        assert_eq!(spec["paths"]["/"]["post"]["tags"][0], "Units");
        assert!(spec["paths"]["/{id}"]["delete"].is_object());
    }
}
