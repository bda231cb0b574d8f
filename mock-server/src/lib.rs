use std::{
    collections::{BTreeMap, HashSet},
    sync::Arc,
};

use axum::{
    extract::{Path, Query, State},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tokio::{net::TcpListener, sync::RwLock};
use uuid::Uuid;

pub const DEFAULT_PAGE_SIZE: u32 = 10;
const MAX_PAGE_SIZE: u32 = 100;
const NAME_MAX_CHARS: usize = 50;
const PRICE_MAX: f64 = 99_999.99;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub price: f64,
}

#[derive(Deserialize)]
pub struct ItemInput {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub price: f64,
}

#[derive(Deserialize)]
pub struct LoginInput {
    pub username: String,
    pub password: String,
}

#[derive(Deserialize)]
pub struct ListParams {
    pub page: Option<u32>,
    pub page_size: Option<u32>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Meta {
    pub total_count: u64,
    pub page: u32,
    pub page_size: u32,
    pub total_pages: u32,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ItemPage {
    pub data: Vec<Item>,
    pub meta: Meta,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FieldViolation {
    pub field: String,
    pub message: String,
}

/// The single account the server accepts.
#[derive(Clone, Debug)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Default for Credentials {
    fn default() -> Self {
        Self {
            username: "admin".to_string(),
            password: "admin".to_string(),
        }
    }
}

impl Credentials {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            username: std::env::var("MOCK_USERNAME").unwrap_or(defaults.username),
            password: std::env::var("MOCK_PASSWORD").unwrap_or(defaults.password),
        }
    }
}

#[derive(Default)]
struct Store {
    items: BTreeMap<i64, Item>,
    next_id: i64,
    tokens: HashSet<String>,
}

#[derive(Clone)]
struct AppState {
    store: Arc<RwLock<Store>>,
    credentials: Arc<Credentials>,
}

enum Failure {
    Unauthorized,
    BadCredentials,
    NotFound,
    Invalid(Vec<FieldViolation>),
}

impl IntoResponse for Failure {
    fn into_response(self) -> Response {
        match self {
            Failure::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                Json(json!({"detail": "Not authenticated"})),
            )
                .into_response(),
            Failure::BadCredentials => (
                StatusCode::UNAUTHORIZED,
                Json(json!({"detail": "Incorrect username or password"})),
            )
                .into_response(),
            Failure::NotFound => (
                StatusCode::NOT_FOUND,
                Json(json!({"detail": "Item not found"})),
            )
                .into_response(),
            Failure::Invalid(detail) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(json!({ "detail": detail })),
            )
                .into_response(),
        }
    }
}

pub fn app() -> Router {
    app_with(Credentials::default())
}

pub fn app_with(credentials: Credentials) -> Router {
    let state = AppState {
        store: Arc::new(RwLock::new(Store {
            next_id: 1,
            ..Store::default()
        })),
        credentials: Arc::new(credentials),
    };
    Router::new()
        .route("/api/auth/login", post(login))
        .route("/api/items", get(list_items).post(create_item))
        .route(
            "/api/items/{id}",
            get(get_item).put(update_item).delete(delete_item),
        )
        .with_state(state)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app_with(Credentials::from_env())).await
}

async fn authorize(state: &AppState, headers: &HeaderMap) -> Result<(), Failure> {
    let token = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .ok_or(Failure::Unauthorized)?;
    if state.store.read().await.tokens.contains(token) {
        Ok(())
    } else {
        Err(Failure::Unauthorized)
    }
}

/// Field checks plus name uniqueness among items other than `except`.
fn validate(store: &Store, input: &ItemInput, except: Option<i64>) -> Result<(), Failure> {
    let mut detail = Vec::new();
    let mut violation = |field: &str, message: &str| {
        detail.push(FieldViolation {
            field: field.to_string(),
            message: message.to_string(),
        })
    };

    let name = input.name.trim();
    if name.is_empty() {
        violation("name", "Name is required");
    } else if name.chars().count() > NAME_MAX_CHARS {
        violation("name", "Name cannot exceed 50 characters");
    } else if store
        .items
        .values()
        .any(|item| Some(item.id) != except && item.name.eq_ignore_ascii_case(name))
    {
        violation("name", "An item with this name already exists");
    }

    if !input.price.is_finite() || input.price < 0.0 || input.price > PRICE_MAX {
        violation("price", "Price must be between 0 and 99999.99");
    } else if ((input.price * 100.0).round() - input.price * 100.0).abs() > 1e-6 {
        violation("price", "Price must have at most two decimal places");
    }

    if detail.is_empty() {
        Ok(())
    } else {
        Err(Failure::Invalid(detail))
    }
}

async fn login(
    State(state): State<AppState>,
    Json(input): Json<LoginInput>,
) -> Result<Json<serde_json::Value>, Failure> {
    if input.username != state.credentials.username || input.password != state.credentials.password {
        tracing::warn!(username = %input.username, "rejected login");
        return Err(Failure::BadCredentials);
    }
    let token = Uuid::new_v4().simple().to_string();
    state.store.write().await.tokens.insert(token.clone());
    tracing::info!(username = %input.username, "issued token");
    Ok(Json(json!({"access_token": token, "token_type": "bearer"})))
}

async fn list_items(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(params): Query<ListParams>,
) -> Result<Json<ItemPage>, Failure> {
    authorize(&state, &headers).await?;
    let page = params.page.unwrap_or(1).max(1);
    let page_size = params
        .page_size
        .unwrap_or(DEFAULT_PAGE_SIZE)
        .clamp(1, MAX_PAGE_SIZE);

    let store = state.store.read().await;
    let total_count = store.items.len() as u64;
    let total_pages = total_count.div_ceil(u64::from(page_size)) as u32;
    let data = store
        .items
        .values()
        .skip((page as usize - 1).saturating_mul(page_size as usize))
        .take(page_size as usize)
        .cloned()
        .collect();

    Ok(Json(ItemPage {
        data,
        meta: Meta {
            total_count,
            page,
            page_size,
            total_pages,
        },
    }))
}

async fn create_item(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(input): Json<ItemInput>,
) -> Result<(StatusCode, Json<Item>), Failure> {
    authorize(&state, &headers).await?;
    let mut store = state.store.write().await;
    validate(&store, &input, None)?;

    let item = Item {
        id: store.next_id,
        name: input.name,
        description: input.description,
        price: input.price,
    };
    store.next_id += 1;
    store.items.insert(item.id, item.clone());
    tracing::info!(id = item.id, "created item");
    Ok((StatusCode::CREATED, Json(item)))
}

async fn get_item(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<i64>,
) -> Result<Json<Item>, Failure> {
    authorize(&state, &headers).await?;
    let store = state.store.read().await;
    store.items.get(&id).cloned().map(Json).ok_or(Failure::NotFound)
}

async fn update_item(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<i64>,
    Json(input): Json<ItemInput>,
) -> Result<Json<Item>, Failure> {
    authorize(&state, &headers).await?;
    let mut store = state.store.write().await;
    if !store.items.contains_key(&id) {
        return Err(Failure::NotFound);
    }
    validate(&store, &input, Some(id))?;

    let item = Item {
        id,
        name: input.name,
        description: input.description,
        price: input.price,
    };
    store.items.insert(id, item.clone());
    tracing::info!(id, "updated item");
    Ok(Json(item))
}

async fn delete_item(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<i64>,
) -> Result<Json<serde_json::Value>, Failure> {
    authorize(&state, &headers).await?;
    let mut store = state.store.write().await;
    store.items.remove(&id).ok_or(Failure::NotFound)?;
    tracing::info!(id, "deleted item");
    Ok(Json(json!({"message": "Item deleted successfully"})))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(name: &str, price: f64) -> ItemInput {
        ItemInput {
            name: name.to_string(),
            description: String::new(),
            price,
        }
    }

    fn store_with(name: &str) -> Store {
        let mut store = Store::default();
        store.items.insert(
            1,
            Item {
                id: 1,
                name: name.to_string(),
                description: String::new(),
                price: 1.0,
            },
        );
        store
    }

    fn violations(result: Result<(), Failure>) -> Vec<FieldViolation> {
        match result {
            Err(Failure::Invalid(detail)) => detail,
            Ok(()) => Vec::new(),
            Err(_) => panic!("unexpected failure kind"),
        }
    }

    #[test]
    fn item_input_defaults_description() {
        let input: ItemInput = serde_json::from_str(r#"{"name":"A","price":2.5}"#).unwrap();
        assert_eq!(input.description, "");
    }

    #[test]
    fn item_input_rejects_missing_price() {
        let result: Result<ItemInput, _> = serde_json::from_str(r#"{"name":"A"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn validate_accepts_well_formed_input() {
        assert!(violations(validate(&Store::default(), &input("Lamp", 19.99), None)).is_empty());
    }

    #[test]
    fn validate_rejects_duplicate_names_except_self() {
        let store = store_with("Lamp");
        let detail = violations(validate(&store, &input("lamp", 1.0), None));
        assert_eq!(detail[0].field, "name");
        assert!(violations(validate(&store, &input("Lamp", 1.0), Some(1))).is_empty());
    }

    #[test]
    fn validate_rejects_bad_prices() {
        let store = Store::default();
        for price in [-1.0, 100_000.0, 1.234, f64::NAN] {
            let detail = violations(validate(&store, &input("Lamp", price), None));
            assert_eq!(detail.len(), 1, "{price}");
            assert_eq!(detail[0].field, "price");
        }
    }
}
