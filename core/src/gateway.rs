//! Authenticated execution of item API requests.
//!
//! # Design
//! `Gateway` is the one place where a built request meets the network. It
//! stamps the bearer credential from the `TokenStore`, hands the request to
//! the host's `Transport` exactly once, and reacts to 401 globally: the token
//! is cleared and the host is sent to the login view, while the caller still
//! receives `ApiError::Unauthorized` for its own handling.

use tracing::{debug, error, warn};

use crate::client::ItemClient;
use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse, Transport};
use crate::session::{Navigator, Route, TokenStore};
use crate::types::{DeleteResponse, Item, ItemPage, ItemPayload, LoginRequest, LoginResponse};

pub struct Gateway<T, S, N> {
    client: ItemClient,
    transport: T,
    tokens: S,
    navigator: N,
}

impl<T, S, N> Gateway<T, S, N>
where
    T: Transport,
    S: TokenStore,
    N: Navigator,
{
    pub fn new(client: ItemClient, transport: T, tokens: S, navigator: N) -> Self {
        Self {
            client,
            transport,
            tokens,
            navigator,
        }
    }

    pub fn client(&self) -> &ItemClient {
        &self.client
    }

    pub fn tokens(&self) -> &S {
        &self.tokens
    }

    pub fn navigator(&self) -> &N {
        &self.navigator
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Send one request with the current credential attached.
    pub fn execute(&self, mut request: HttpRequest) -> Result<HttpResponse, ApiError> {
        if let Some(token) = self.tokens.get() {
            request
                .headers
                .retain(|(k, _)| !k.eq_ignore_ascii_case("authorization"));
            request
                .headers
                .push(("authorization".to_string(), token.bearer()));
        }

        debug!(method = %request.method, path = %request.path, "sending request");
        let response = self.transport.send(&request).map_err(|e| {
            error!(method = %request.method, path = %request.path, error = %e, "request failed");
            ApiError::from(e)
        })?;
        debug!(status = response.status, path = %request.path, "received response");

        if response.status == 401 {
            warn!(path = %request.path, "session rejected, returning to login");
            self.tokens.clear();
            self.navigator.navigate(Route::Login);
            return Err(ApiError::Unauthorized);
        }
        Ok(response)
    }

    pub fn login(&self, credentials: &LoginRequest) -> Result<LoginResponse, ApiError> {
        let request = self.client.build_login(credentials)?;
        self.client.parse_login(self.execute(request)?)
    }

    pub fn list_items(&self, page: u32, page_size: u32) -> Result<ItemPage, ApiError> {
        let request = self.client.build_list_items(page, page_size);
        self.client.parse_list_items(self.execute(request)?)
    }

    pub fn get_item(&self, id: i64) -> Result<Item, ApiError> {
        let request = self.client.build_get_item(id);
        self.client.parse_get_item(self.execute(request)?)
    }

    pub fn create_item(&self, input: &ItemPayload) -> Result<Item, ApiError> {
        let request = self.client.build_create_item(input)?;
        self.client.parse_create_item(self.execute(request)?)
    }

    pub fn update_item(&self, id: i64, input: &ItemPayload) -> Result<Item, ApiError> {
        let request = self.client.build_update_item(id, input)?;
        self.client.parse_update_item(self.execute(request)?)
    }

    pub fn delete_item(&self, id: i64) -> Result<DeleteResponse, ApiError> {
        let request = self.client.build_delete_item(id);
        self.client.parse_delete_item(self.execute(request)?)
    }
}
