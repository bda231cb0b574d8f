//! Create, update and delete workflows.
//!
//! All three follow the same protocol: clear the previous error, mark the
//! operation loading, send at most one request, translate a 422 into field
//! errors and anything else into one `general` message, and always finish
//! with `loading == false`. Each hook is driven through `&mut self`, so a
//! second submission cannot start while one is running.

use tracing::{info, warn};

use crate::error::{ApiError, HookError};
use crate::field_errors::FieldErrorMap;
use crate::gateway::Gateway;
use crate::http::Transport;
use crate::schema::{validate_item, ItemForm};
use crate::session::{Navigator, TokenStore};
use crate::types::Item;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    Create,
    Update,
    Delete,
}

impl Action {
    fn verb(self) -> &'static str {
        match self {
            Action::Create => "create",
            Action::Update => "update",
            Action::Delete => "delete",
        }
    }
}

/// Loading and error state shared by the mutating hooks.
#[derive(Debug, Clone, Default)]
pub struct MutationState {
    loading: bool,
    error: Option<HookError>,
}

impl MutationState {
    pub fn loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&HookError> {
        self.error.as_ref()
    }

    /// The last failure as a field map, `None` after a success.
    pub fn field_errors(&self) -> Option<FieldErrorMap> {
        self.error.as_ref().map(HookError::field_errors)
    }

    fn begin(&mut self) {
        self.loading = true;
        self.error = None;
    }

    fn finish<R>(&mut self, action: Action, result: Result<R, HookError>) -> Option<R> {
        let outcome = match result {
            Ok(value) => Some(value),
            Err(err) => {
                warn!(action = action.verb(), error = %err, "item {} failed", action.verb());
                self.error = Some(err);
                None
            }
        };
        self.loading = false;
        outcome
    }
}

fn mutation_error(action: Action, err: ApiError) -> HookError {
    match err {
        ApiError::Validation(fields) => HookError::FieldErrors(fields),
        _ => HookError::Generic(format!(
            "Failed to {} item. Please try again later.",
            action.verb()
        )),
    }
}

#[derive(Debug, Clone, Default)]
pub struct CreateItem {
    state: MutationState,
}

impl CreateItem {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &MutationState {
        &self.state
    }

    /// Validate `form` and create the item. Returns the persisted item.
    pub fn submit<T, S, N>(&mut self, gateway: &Gateway<T, S, N>, form: &ItemForm) -> Option<Item>
    where
        T: Transport,
        S: TokenStore,
        N: Navigator,
    {
        self.state.begin();
        let result = validate_item(form)
            .map_err(HookError::FieldErrors)
            .and_then(|payload| {
                gateway
                    .create_item(&payload)
                    .map_err(|e| mutation_error(Action::Create, e))
            });
        if let Ok(item) = &result {
            info!(id = ?item.id, "item created");
        }
        self.state.finish(Action::Create, result)
    }
}

#[derive(Debug, Clone, Default)]
pub struct UpdateItem {
    state: MutationState,
}

impl UpdateItem {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &MutationState {
        &self.state
    }

    /// Validate `form` and replace item `id` with it.
    pub fn submit<T, S, N>(
        &mut self,
        gateway: &Gateway<T, S, N>,
        id: Option<i64>,
        form: &ItemForm,
    ) -> Option<Item>
    where
        T: Transport,
        S: TokenStore,
        N: Navigator,
    {
        self.state.begin();
        let result = match id {
            None => Err(HookError::InvalidIdentifier),
            Some(id) => validate_item(form)
                .map_err(HookError::FieldErrors)
                .and_then(|payload| {
                    gateway
                        .update_item(id, &payload)
                        .map_err(|e| mutation_error(Action::Update, e))
                }),
        };
        if let Ok(item) = &result {
            info!(id = ?item.id, "item updated");
        }
        self.state.finish(Action::Update, result)
    }
}

#[derive(Debug, Clone, Default)]
pub struct DeleteItem {
    state: MutationState,
}

impl DeleteItem {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &MutationState {
        &self.state
    }

    pub fn submit<T, S, N>(&mut self, gateway: &Gateway<T, S, N>, id: Option<i64>) -> bool
    where
        T: Transport,
        S: TokenStore,
        N: Navigator,
    {
        self.state.begin();
        let result = match id {
            None => Err(HookError::InvalidIdentifier),
            Some(id) => gateway
                .delete_item(id)
                .map(|resp| info!(id, message = %resp.message, "item deleted"))
                .map_err(|e| mutation_error(Action::Delete, e)),
        };
        self.state.finish(Action::Delete, result).is_some()
    }
}
