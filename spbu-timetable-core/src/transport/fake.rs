use std::{
    collections::HashMap,
    sync::{
        Arc, Mutex,
        atomic::{AtomicUsize, Ordering},
    },
};

use async_trait::async_trait;
use reqwest::Url;
use serde_json::Value;

use super::Transport;
use crate::{Error, Result, Session};

pub(crate) const BASE_URL: &str = "https://timetable.test/api/v1";

/// Serves canned bodies keyed by the path below [`BASE_URL`] and records every call.
#[derive(Default)]
pub(crate) struct FakeTransport {
    routes: HashMap<String, Vec<u8>>,
    calls: AtomicUsize,
    requested: Mutex<Vec<String>>,
}

impl FakeTransport {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn route(self, path: &str, body: Value) -> Self {
        self.route_raw(path, body.to_string().into_bytes())
    }

    pub(crate) fn route_raw(mut self, path: &str, body: Vec<u8>) -> Self {
        self.routes.insert(path.to_string(), body);
        self
    }

    pub(crate) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub(crate) fn requested(&self) -> Vec<String> {
        self.requested
            .lock()
            .map(|urls| urls.clone())
            .unwrap_or_default()
    }

    /// A session over this transport, returning the shared handle for inspection.
    pub(crate) fn into_session(self) -> (Session, Arc<Self>) {
        let transport = Arc::new(self);
        let session =
            Session::with_transport(BASE_URL, transport.clone()).expect("valid test base url");
        (session, transport)
    }
}

#[async_trait]
impl Transport for FakeTransport {
    async fn get(&self, url: &Url) -> Result<Vec<u8>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut urls) = self.requested.lock() {
            urls.push(url.to_string());
        }

        let mut key = url.path().trim_start_matches("/api/v1/").to_string();
        if let Some(query) = url.query() {
            key.push('?');
            key.push_str(query);
        }

        self.routes.get(&key).cloned().ok_or(Error::Status {
            url: url.to_string(),
            status: 404,
        })
    }
}
