//! Stateless HTTP request builder and response parser for the item API.
//!
//! # Design
//! `ItemClient` holds only a `base_url` and carries no mutable state between
//! calls. Each operation is split into a `build_*` method that produces an
//! `HttpRequest` and a `parse_*` method that consumes an `HttpResponse`.
//! Authentication headers and the actual round-trip are the `Gateway`'s job.

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::ApiError;
use crate::field_errors::FieldErrorMap;
use crate::http::{HttpRequest, HttpResponse};
use crate::types::{
    DeleteResponse, Item, ItemPage, ItemPayload, LoginRequest, LoginResponse, ValidationErrorBody,
};

/// Synchronous, stateless client for the item API.
#[derive(Debug, Clone)]
pub struct ItemClient {
    base_url: String,
}

impl ItemClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn build_login(&self, credentials: &LoginRequest) -> Result<HttpRequest, ApiError> {
        Ok(HttpRequest::post(
            format!("{}/api/auth/login", self.base_url),
            to_json(credentials)?,
        ))
    }

    pub fn build_list_items(&self, page: u32, page_size: u32) -> HttpRequest {
        HttpRequest::get(format!(
            "{}/api/items?page={page}&page_size={page_size}",
            self.base_url
        ))
    }

    pub fn build_get_item(&self, id: i64) -> HttpRequest {
        HttpRequest::get(format!("{}/api/items/{id}", self.base_url))
    }

    pub fn build_create_item(&self, input: &ItemPayload) -> Result<HttpRequest, ApiError> {
        Ok(HttpRequest::post(
            format!("{}/api/items", self.base_url),
            to_json(input)?,
        ))
    }

    pub fn build_update_item(&self, id: i64, input: &ItemPayload) -> Result<HttpRequest, ApiError> {
        Ok(HttpRequest::put(
            format!("{}/api/items/{id}", self.base_url),
            to_json(input)?,
        ))
    }

    pub fn build_delete_item(&self, id: i64) -> HttpRequest {
        HttpRequest::delete(format!("{}/api/items/{id}", self.base_url))
    }

    pub fn parse_login(&self, response: HttpResponse) -> Result<LoginResponse, ApiError> {
        parse_json(response)
    }

    pub fn parse_list_items(&self, response: HttpResponse) -> Result<ItemPage, ApiError> {
        parse_json(response)
    }

    pub fn parse_get_item(&self, response: HttpResponse) -> Result<Item, ApiError> {
        parse_json(response)
    }

    pub fn parse_create_item(&self, response: HttpResponse) -> Result<Item, ApiError> {
        parse_json(response)
    }

    pub fn parse_update_item(&self, response: HttpResponse) -> Result<Item, ApiError> {
        parse_json(response)
    }

    pub fn parse_delete_item(&self, response: HttpResponse) -> Result<DeleteResponse, ApiError> {
        parse_json(response)
    }
}

fn to_json<T: Serialize>(value: &T) -> Result<String, ApiError> {
    serde_json::to_string(value).map_err(|e| ApiError::SerializationError(e.to_string()))
}

fn parse_json<T: DeserializeOwned>(response: HttpResponse) -> Result<T, ApiError> {
    check_status(&response)?;
    serde_json::from_str(&response.body).map_err(|e| ApiError::DeserializationError(e.to_string()))
}

/// Map non-success status codes to the appropriate `ApiError` variant.
fn check_status(response: &HttpResponse) -> Result<(), ApiError> {
    match response.status {
        200..=299 => Ok(()),
        401 => Err(ApiError::Unauthorized),
        404 => Err(ApiError::NotFound),
        422 => match serde_json::from_str::<ValidationErrorBody>(&response.body) {
            Ok(body) => Err(ApiError::Validation(FieldErrorMap::from_details(&body.detail))),
            Err(_) => Err(http_error(response)),
        },
        _ => Err(http_error(response)),
    }
}

fn http_error(response: &HttpResponse) -> ApiError {
    ApiError::HttpError {
        status: response.status,
        body: response.body.clone(),
    }
}
