use std::cell::Cell;

use item_admin_core::{Navigator, Route};
use tracing::debug;

/// Remembers the last view the core asked for; the command loop reads it
/// after each command to print the matching hint.
#[derive(Debug, Default)]
pub struct TerminalNavigator {
    last: Cell<Option<Route>>,
}

impl TerminalNavigator {
    pub fn last(&self) -> Option<Route> {
        self.last.get()
    }
}

impl Navigator for TerminalNavigator {
    fn navigate(&self, route: Route) {
        debug!(path = %route.path(), "navigate");
        self.last.set(Some(route));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_most_recent_route() {
        let nav = TerminalNavigator::default();
        assert_eq!(nav.last(), None);
        nav.navigate(Route::Home);
        nav.navigate(Route::Login);
        assert_eq!(nav.last(), Some(Route::Login));
    }
}
