//! Paginated item listing.

use tracing::warn;

use crate::gateway::Gateway;
use crate::http::Transport;
use crate::session::{Navigator, TokenStore};
use crate::types::Item;

pub const DEFAULT_PAGE_SIZE: u32 = 5;

const FETCH_FAILED: &str = "Failed to fetch items. Please try again later.";
const INVALID_PAGE: &str = "Page must be at least 1.";

/// One page of items plus the metadata of the last successful fetch.
///
/// Nothing loads implicitly: call `reload` when the view first appears and
/// `set_page` when the user pages. Each fetch replaces the page wholesale.
#[derive(Debug, Clone)]
pub struct ItemList {
    items: Vec<Item>,
    page: u32,
    page_size: u32,
    total_pages: u32,
    total_count: u64,
    loading: bool,
    error: Option<String>,
}

impl Default for ItemList {
    fn default() -> Self {
        Self::new(1, DEFAULT_PAGE_SIZE)
    }
}

impl ItemList {
    pub fn new(initial_page: u32, page_size: u32) -> Self {
        Self {
            items: Vec::new(),
            page: initial_page.max(1),
            page_size: page_size.max(1),
            total_pages: 0,
            total_count: 0,
            loading: false,
            error: None,
        }
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    pub fn total_pages(&self) -> u32 {
        self.total_pages
    }

    pub fn total_count(&self) -> u64 {
        self.total_count
    }

    pub fn loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Fetch the current page. Returns whether the fetch succeeded.
    pub fn reload<T, S, N>(&mut self, gateway: &Gateway<T, S, N>) -> bool
    where
        T: Transport,
        S: TokenStore,
        N: Navigator,
    {
        self.loading = true;
        self.error = None;

        let ok = match gateway.list_items(self.page, self.page_size) {
            Ok(page) => {
                self.items = page.data;
                self.total_pages = page.meta.total_pages;
                self.total_count = page.meta.total_count;
                true
            }
            Err(e) => {
                warn!(page = self.page, error = %e, "error fetching items");
                self.error = Some(FETCH_FAILED.to_string());
                false
            }
        };

        self.loading = false;
        ok
    }

    /// Move to `page` and fetch it. Selecting the page already shown issues
    /// no request.
    pub fn set_page<T, S, N>(&mut self, gateway: &Gateway<T, S, N>, page: u32) -> bool
    where
        T: Transport,
        S: TokenStore,
        N: Navigator,
    {
        if page == 0 {
            self.error = Some(INVALID_PAGE.to_string());
            return false;
        }
        if page == self.page {
            return true;
        }
        self.page = page;
        self.reload(gateway)
    }
}
