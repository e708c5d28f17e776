//! Fixture HTTP server for exercising JSON clients end to end.
//!
//! Serves a small in-memory `items` resource plus fixed responses covering
//! the content-type cases a client has to tell apart: HTML, plain text,
//! malformed JSON, an empty body, a body with no content-type, and arbitrary
//! status codes. `/echo` reflects the request back as JSON.

use std::{
    collections::{BTreeMap, HashMap},
    sync::Arc,
};

use axum::{
    body::{Body, Bytes},
    extract::{Path, State},
    http::{header, HeaderMap, Method, StatusCode},
    response::{Html, IntoResponse, Response},
    routing::{any, get},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tokio::{net::TcpListener, sync::RwLock};
use uuid::Uuid;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub id: Uuid,
    pub name: String,
    pub quantity: u32,
}

#[derive(Deserialize)]
pub struct NewItem {
    pub name: String,
    #[serde(default)]
    pub quantity: u32,
}

#[derive(Deserialize)]
pub struct ItemPatch {
    pub name: Option<String>,
    pub quantity: Option<u32>,
}

/// What `/echo` saw. Header names are lowercase.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Echo {
    pub method: String,
    pub headers: BTreeMap<String, String>,
    pub body: String,
}

pub type Db = Arc<RwLock<HashMap<Uuid, Item>>>;

pub fn app() -> Router {
    let db: Db = Arc::new(RwLock::new(HashMap::new()));
    Router::new()
        .route("/items", get(list_items).post(create_item))
        .route(
            "/items/{id}",
            get(get_item).put(replace_item).patch(patch_item).delete(delete_item),
        )
        .route("/echo", any(echo))
        .route("/html", get(html))
        .route("/plain", get(plain))
        .route("/broken-json", any(broken_json))
        .route("/empty", any(empty))
        .route("/untyped", get(untyped))
        .route("/status/{code}", any(status))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    if let Ok(addr) = listener.local_addr() {
        tracing::info!(%addr, "fixture server listening");
    }
    axum::serve(listener, app()).await
}

async fn list_items(State(db): State<Db>) -> Json<Vec<Item>> {
    let items = db.read().await;
    Json(items.values().cloned().collect())
}

async fn create_item(State(db): State<Db>, Json(input): Json<NewItem>) -> (StatusCode, Json<Item>) {
    let item = Item {
        id: Uuid::new_v4(),
        name: input.name,
        quantity: input.quantity,
    };
    db.write().await.insert(item.id, item.clone());
    (StatusCode::CREATED, Json(item))
}

async fn get_item(State(db): State<Db>, Path(id): Path<Uuid>) -> Result<Json<Item>, StatusCode> {
    let items = db.read().await;
    items.get(&id).cloned().map(Json).ok_or(StatusCode::NOT_FOUND)
}

async fn replace_item(
    State(db): State<Db>,
    Path(id): Path<Uuid>,
    Json(input): Json<NewItem>,
) -> Result<Json<Item>, StatusCode> {
    let mut items = db.write().await;
    let item = items.get_mut(&id).ok_or(StatusCode::NOT_FOUND)?;
    item.name = input.name;
    item.quantity = input.quantity;
    Ok(Json(item.clone()))
}

async fn patch_item(
    State(db): State<Db>,
    Path(id): Path<Uuid>,
    Json(input): Json<ItemPatch>,
) -> Result<Json<Item>, StatusCode> {
    let mut items = db.write().await;
    let item = items.get_mut(&id).ok_or(StatusCode::NOT_FOUND)?;
    if let Some(name) = input.name {
        item.name = name;
    }
    if let Some(quantity) = input.quantity {
        item.quantity = quantity;
    }
    Ok(Json(item.clone()))
}

async fn delete_item(State(db): State<Db>, Path(id): Path<Uuid>) -> Result<StatusCode, StatusCode> {
    let mut items = db.write().await;
    items.remove(&id).map(|_| StatusCode::NO_CONTENT).ok_or(StatusCode::NOT_FOUND)
}

async fn echo(method: Method, headers: HeaderMap, body: Bytes) -> Json<Echo> {
    let headers = headers
        .iter()
        .map(|(name, value)| {
            (
                name.as_str().to_string(),
                String::from_utf8_lossy(value.as_bytes()).into_owned(),
            )
        })
        .collect();
    Json(Echo {
        method: method.to_string(),
        headers,
        body: String::from_utf8_lossy(&body).into_owned(),
    })
}

async fn html() -> Html<&'static str> {
    Html("<!doctype html><html><body><h1>Not an API</h1></body></html>")
}

async fn plain() -> &'static str {
    "plain text"
}

async fn broken_json() -> Response {
    ([(header::CONTENT_TYPE, "application/json")], r#"{"unterminated": "#).into_response()
}

async fn empty() -> Response {
    ([(header::CONTENT_LENGTH, "0")], Body::empty()).into_response()
}

async fn untyped() -> Response {
    Body::from("raw bytes").into_response()
}

async fn status(Path(code): Path<u16>) -> Response {
    let status = StatusCode::from_u16(code).unwrap_or(StatusCode::BAD_REQUEST);
    (status, Json(json!({ "status": status.as_u16() }))).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn item_serializes_to_json() {
        let item = Item {
            id: Uuid::nil(),
            name: "Widget".to_string(),
            quantity: 3,
        };
        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json["id"], "00000000-0000-0000-0000-000000000000");
        assert_eq!(json["name"], "Widget");
        assert_eq!(json["quantity"], 3);
    }

    #[test]
    fn new_item_defaults_quantity_to_zero() {
        let input: NewItem = serde_json::from_str(r#"{"name":"No quantity"}"#).unwrap();
        assert_eq!(input.name, "No quantity");
        assert_eq!(input.quantity, 0);
    }

    #[test]
    fn new_item_rejects_missing_name() {
        let result: Result<NewItem, _> = serde_json::from_str(r#"{"quantity":1}"#);
        assert!(result.is_err());
    }

    #[test]
    fn item_patch_all_fields_optional() {
        let input: ItemPatch = serde_json::from_str(r#"{}"#).unwrap();
        assert!(input.name.is_none());
        assert!(input.quantity.is_none());
    }

    #[test]
    fn echo_roundtrips_through_json() {
        let echo = Echo {
            method: "PATCH".to_string(),
            headers: BTreeMap::from([("x-foo".to_string(), "bar".to_string())]),
            body: "{}".to_string(),
        };
        let back: Echo = serde_json::from_str(&serde_json::to_string(&echo).unwrap()).unwrap();
        assert_eq!(back, echo);
    }
}
