//! In-memory port implementations shared by the service tests.

use std::cell::{Cell, RefCell};
use std::collections::{HashMap, VecDeque};
use std::future::Future;
use std::time::Duration;

use benchhub_domain::error::TransportError;
use benchhub_domain::http::{HttpRequest, HttpResponse};

use crate::ports::{Browser, CredentialSource, HttpTransport, PreferenceStore, Timer};

#[derive(Default)]
pub struct FakeCredentials {
    pub meta: Option<String>,
    pub session: RefCell<HashMap<String, String>>,
    pub cookies: String,
}

impl FakeCredentials {
    pub fn with_meta(token: &str) -> Self {
        Self {
            meta: Some(token.to_string()),
            ..Self::default()
        }
    }
}

impl CredentialSource for FakeCredentials {
    fn meta_content(&self, _name: &str) -> Option<String> {
        self.meta.clone()
    }

    fn session_item(&self, key: &str) -> Option<String> {
        self.session.borrow().get(key).cloned()
    }

    fn set_session_item(&self, key: &str, value: &str) {
        self.session
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
    }

    fn cookies(&self) -> String {
        self.cookies.clone()
    }
}

#[derive(Default)]
pub struct FakeTransport {
    pub responses: RefCell<VecDeque<Result<HttpResponse, TransportError>>>,
    pub requests: RefCell<Vec<HttpRequest>>,
}

impl FakeTransport {
    pub fn respond(&self, status: u16, body: &str) {
        self.responses
            .borrow_mut()
            .push_back(Ok(HttpResponse::new(status, body)));
    }

    pub fn fail(&self, message: &str) {
        self.responses
            .borrow_mut()
            .push_back(Err(TransportError::Network(message.to_string())));
    }

    pub fn sent(&self) -> Vec<HttpRequest> {
        self.requests.borrow().clone()
    }
}

impl HttpTransport for FakeTransport {
    fn send(
        &self,
        request: HttpRequest,
    ) -> impl Future<Output = Result<HttpResponse, TransportError>> {
        self.requests.borrow_mut().push(request);
        let next = self
            .responses
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Err(TransportError::Network("no response queued".to_string())));
        async move { next }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BrowserEvent {
    Navigate(String),
    Reload,
    ReloadAfter(Duration),
    CloseModal(String),
    Alert(String),
    Confirm(String),
}

pub struct FakeBrowser {
    pub events: RefCell<Vec<BrowserEvent>>,
    pub confirm_answer: Cell<bool>,
    pub table: bool,
    pub path: String,
}

impl Default for FakeBrowser {
    fn default() -> Self {
        Self {
            events: RefCell::new(Vec::new()),
            confirm_answer: Cell::new(true),
            table: false,
            path: "/dashboard/devices".to_string(),
        }
    }
}

impl FakeBrowser {
    pub fn events(&self) -> Vec<BrowserEvent> {
        self.events.borrow().clone()
    }
}

impl Browser for FakeBrowser {
    fn navigate(&self, url: &str) {
        self.events
            .borrow_mut()
            .push(BrowserEvent::Navigate(url.to_string()));
    }

    fn reload(&self) {
        self.events.borrow_mut().push(BrowserEvent::Reload);
    }

    fn reload_after(&self, delay: Duration) {
        self.events.borrow_mut().push(BrowserEvent::ReloadAfter(delay));
    }

    fn close_modal(&self, modal_id: &str) {
        self.events
            .borrow_mut()
            .push(BrowserEvent::CloseModal(modal_id.to_string()));
    }

    fn alert(&self, message: &str) {
        self.events
            .borrow_mut()
            .push(BrowserEvent::Alert(message.to_string()));
    }

    fn confirm(&self, message: &str) -> bool {
        self.events
            .borrow_mut()
            .push(BrowserEvent::Confirm(message.to_string()));
        self.confirm_answer.get()
    }

    fn has_data_table(&self) -> bool {
        self.table
    }

    fn current_path(&self) -> String {
        self.path.clone()
    }
}

#[derive(Default)]
pub struct FakeTimer {
    pub slept: RefCell<Vec<Duration>>,
}

impl Timer for FakeTimer {
    fn sleep(&self, delay: Duration) -> impl Future<Output = ()> {
        self.slept.borrow_mut().push(delay);
        std::future::ready(())
    }
}

#[derive(Default)]
pub struct FakePreferences {
    pub values: RefCell<HashMap<String, String>>,
}

impl PreferenceStore for FakePreferences {
    fn get(&self, key: &str) -> Option<String> {
        self.values.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        self.values
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
    }
}
