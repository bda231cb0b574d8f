//! Synchronous client core for the item admin console.
//!
//! # Overview
//! Builds `HttpRequest` values and parses `HttpResponse` values without
//! touching the network (host-does-IO pattern). On top of that sit the
//! validation schema for item forms, the resource hooks that drive list,
//! fetch, create, update and delete, and the login gate.
//!
//! # Design
//! - `ItemClient` is stateless; it holds only `base_url`.
//! - `Gateway` is the only place a request meets a `Transport`. It attaches
//!   the bearer token and handles 401 for every caller.
//! - The session token lives behind `TokenStore`; nothing else reads or
//!   writes it.
//! - Hooks (`ItemList`, `ItemFetch`, `CreateItem`, `UpdateItem`,
//!   `DeleteItem`) convert every failure into state. Nothing is retried.

pub mod auth;
pub mod client;
pub mod error;
pub mod fetch;
pub mod field_errors;
pub mod gateway;
pub mod http;
pub mod list;
pub mod mutation;
pub mod schema;
pub mod session;
pub mod types;

pub use auth::{AuthGate, LoginError};
pub use client::ItemClient;
pub use error::{ApiError, HookError};
pub use fetch::{parse_item_id, ItemFetch};
pub use field_errors::{FieldErrorMap, GENERAL_KEY};
pub use gateway::Gateway;
pub use http::{HttpMethod, HttpRequest, HttpResponse, Transport, TransportError};
pub use list::{ItemList, DEFAULT_PAGE_SIZE};
pub use mutation::{CreateItem, DeleteItem, MutationState, UpdateItem};
pub use schema::{validate_item, ItemForm, PriceInput};
#[allow(deprecated)]
pub use schema::LegacyItemSchema;
pub use session::{MemoryTokenStore, Navigator, Route, TokenStore, TOKEN_KEY};
pub use types::{
    DeleteResponse, Item, ItemPage, ItemPayload, LoginRequest, LoginResponse, PageMeta,
    SessionToken, ValidationDetail, ValidationErrorBody,
};
