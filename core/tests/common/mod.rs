//! Scripted transport and recording navigator shared by the core tests.

#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::VecDeque;

use item_admin_core::{
    Gateway, HttpRequest, HttpResponse, ItemClient, MemoryTokenStore, Navigator, Route,
    SessionToken, Transport, TransportError,
};

pub const BASE_URL: &str = "http://localhost:8000";

/// Replays queued responses in order and records every request it sees.
#[derive(Default)]
pub struct ScriptedTransport {
    replies: RefCell<VecDeque<Result<HttpResponse, TransportError>>>,
    requests: RefCell<Vec<HttpRequest>>,
}

impl ScriptedTransport {
    pub fn reply(&self, status: u16, body: &str) -> &Self {
        self.replies
            .borrow_mut()
            .push_back(Ok(HttpResponse::new(status, body)));
        self
    }

    pub fn fail(&self, reason: &str) -> &Self {
        self.replies
            .borrow_mut()
            .push_back(Err(TransportError(reason.to_string())));
        self
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.borrow().clone()
    }

    pub fn request_count(&self) -> usize {
        self.requests.borrow().len()
    }
}

impl Transport for ScriptedTransport {
    fn send(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
        self.requests.borrow_mut().push(request.clone());
        self.replies
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| panic!("no scripted reply for {} {}", request.method, request.path))
    }
}

#[derive(Default)]
pub struct RecordingNavigator {
    routes: RefCell<Vec<Route>>,
}

impl RecordingNavigator {
    pub fn routes(&self) -> Vec<Route> {
        self.routes.borrow().clone()
    }
}

impl Navigator for RecordingNavigator {
    fn navigate(&self, route: Route) {
        self.routes.borrow_mut().push(route);
    }
}

pub type TestGateway = Gateway<ScriptedTransport, MemoryTokenStore, RecordingNavigator>;

pub fn gateway() -> TestGateway {
    Gateway::new(
        ItemClient::new(BASE_URL),
        ScriptedTransport::default(),
        MemoryTokenStore::new(),
        RecordingNavigator::default(),
    )
}

pub fn logged_in_gateway() -> TestGateway {
    Gateway::new(
        ItemClient::new(BASE_URL),
        ScriptedTransport::default(),
        MemoryTokenStore::with_token(SessionToken::new("tok-1")),
        RecordingNavigator::default(),
    )
}

pub fn page_body(page: u32, total_pages: u32, names: &[&str]) -> String {
    let data: Vec<serde_json::Value> = names
        .iter()
        .enumerate()
        .map(|(i, name)| {
            serde_json::json!({"id": i as i64 + 1, "name": name, "description": "", "price": 1.0})
        })
        .collect();
    serde_json::json!({
        "data": data,
        "meta": {
            "total_count": total_pages * 5,
            "page": page,
            "page_size": 5,
            "total_pages": total_pages,
        }
    })
    .to_string()
}
