//! Fetching a single item by identifier.

use tracing::warn;

use crate::error::{ApiError, HookError};
use crate::gateway::Gateway;
use crate::http::Transport;
use crate::session::{Navigator, TokenStore};
use crate::types::Item;

/// Resolve a route parameter into an item identifier.
pub fn parse_item_id(raw: &str) -> Option<i64> {
    raw.trim().parse().ok()
}

#[derive(Debug, Clone, Default)]
pub struct ItemFetch {
    item: Option<Item>,
    loading: bool,
    error: Option<HookError>,
}

impl ItemFetch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn item(&self) -> Option<&Item> {
        self.item.as_ref()
    }

    pub fn loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&HookError> {
        self.error.as_ref()
    }

    /// Load the item with `id`. A missing identifier fails immediately with
    /// `HookError::InvalidIdentifier` and sends nothing.
    pub fn load<T, S, N>(&mut self, gateway: &Gateway<T, S, N>, id: Option<i64>) -> bool
    where
        T: Transport,
        S: TokenStore,
        N: Navigator,
    {
        self.item = None;
        let Some(id) = id else {
            self.loading = false;
            self.error = Some(HookError::InvalidIdentifier);
            return false;
        };

        self.loading = true;
        self.error = None;
        let ok = match gateway.get_item(id) {
            Ok(item) => {
                self.item = Some(item);
                true
            }
            Err(e) => {
                warn!(id, error = %e, "error fetching item");
                self.error = Some(fetch_error(e));
                false
            }
        };
        self.loading = false;
        ok
    }
}

fn fetch_error(err: ApiError) -> HookError {
    match err {
        ApiError::NotFound => HookError::NotFound,
        ApiError::Unauthorized => HookError::Unauthorized,
        ApiError::Transport(_) => HookError::Generic("No response received from server".to_string()),
        ApiError::HttpError { status, body } => {
            let reason = server_message(&body).unwrap_or_else(|| format!("HTTP {status}"));
            HookError::Generic(format!("Error fetching item: {reason}"))
        }
        other => HookError::Generic(format!("Error fetching item: {other}")),
    }
}

/// Pull a human-readable reason out of a JSON error body.
fn server_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    ["message", "detail"]
        .iter()
        .find_map(|key| value.get(*key)?.as_str().map(str::to_string))
}
