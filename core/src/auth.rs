//! Login, logout and the guard run before every protected view.

use thiserror::Error;
use tracing::{info, warn};

use crate::gateway::Gateway;
use crate::http::Transport;
use crate::session::{Navigator, Route, TokenStore};
use crate::types::{LoginRequest, SessionToken};

/// Login failed. The server's reason is logged, never shown.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("Invalid credentials.")]
pub struct LoginError;

pub struct AuthGate;

impl AuthGate {
    /// Allow a protected view only while a token is present; otherwise send
    /// the user to login. Expiry is left to the server's 401.
    pub fn guard<S: TokenStore, N: Navigator>(tokens: &S, navigator: &N) -> bool {
        if tokens.get().is_some() {
            return true;
        }
        navigator.navigate(Route::Login);
        false
    }

    pub fn logout<S: TokenStore, N: Navigator>(tokens: &S, navigator: &N) {
        tokens.clear();
        info!("logged out");
        navigator.navigate(Route::Login);
    }

    /// Exchange credentials for a token, persist it and go to the main view.
    pub fn login<T, S, N>(
        gateway: &Gateway<T, S, N>,
        username: &str,
        password: &str,
    ) -> Result<(), LoginError>
    where
        T: Transport,
        S: TokenStore,
        N: Navigator,
    {
        let credentials = LoginRequest {
            username: username.to_string(),
            password: password.to_string(),
        };
        match gateway.login(&credentials) {
            Ok(response) => {
                gateway.tokens().set(SessionToken::new(response.access_token));
                info!(username, "logged in");
                gateway.navigator().navigate(Route::Home);
                Ok(())
            }
            Err(e) => {
                warn!(username, error = %e, "login failed");
                Err(LoginError)
            }
        }
    }
}
