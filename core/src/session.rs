//! The session token slot and the navigation seam.
//!
//! # Design
//! The persisted token is the only state shared between operations. Every
//! read and write goes through a `TokenStore`; nothing else touches the
//! underlying storage. Navigation is likewise a trait so the core can request
//! "go to login" without knowing whether it runs behind a terminal, a test,
//! or something else.

use std::sync::Mutex;

use crate::types::SessionToken;

/// Well-known key the token is stored under.
pub const TOKEN_KEY: &str = "token";

/// Process-wide persisted slot holding at most one session token.
pub trait TokenStore {
    fn get(&self) -> Option<SessionToken>;
    fn set(&self, token: SessionToken);
    fn clear(&self);
}

/// In-memory token slot.
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    slot: Mutex<Option<SessionToken>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(token: SessionToken) -> Self {
        Self {
            slot: Mutex::new(Some(token)),
        }
    }
}

impl TokenStore for MemoryTokenStore {
    fn get(&self) -> Option<SessionToken> {
        self.slot.lock().ok().and_then(|slot| slot.clone())
    }

    fn set(&self, token: SessionToken) {
        if let Ok(mut slot) = self.slot.lock() {
            *slot = Some(token);
        }
    }

    fn clear(&self) {
        if let Ok(mut slot) = self.slot.lock() {
            *slot = None;
        }
    }
}

impl<S: TokenStore + ?Sized> TokenStore for &S {
    fn get(&self) -> Option<SessionToken> {
        (**self).get()
    }

    fn set(&self, token: SessionToken) {
        (**self).set(token)
    }

    fn clear(&self) {
        (**self).clear()
    }
}

/// Views the core may ask the host to switch to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Login,
    Home,
    Item(i64),
    NotFound,
}

impl Route {
    pub fn path(&self) -> String {
        match self {
            Route::Login => "/auth/login".to_string(),
            Route::Home => "/".to_string(),
            Route::Item(id) => format!("/item/{id}"),
            Route::NotFound => "/not-found".to_string(),
        }
    }
}

pub trait Navigator {
    fn navigate(&self, route: Route);
}

impl<N: Navigator + ?Sized> Navigator for &N {
    fn navigate(&self, route: Route) {
        (**self).navigate(route)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_store_set_get_clear() {
        let store = MemoryTokenStore::new();
        assert!(store.get().is_none());
        store.set(SessionToken::new("abc"));
        assert_eq!(store.get(), Some(SessionToken::new("abc")));
        store.set(SessionToken::new("def"));
        assert_eq!(store.get(), Some(SessionToken::new("def")));
        store.clear();
        assert!(store.get().is_none());
    }

    #[test]
    fn route_paths() {
        assert_eq!(Route::Login.path(), "/auth/login");
        assert_eq!(Route::Item(7).path(), "/item/7");
    }
}
