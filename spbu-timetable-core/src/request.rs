//! The fetch → decode → bind pipeline.
//!
//! A [`Request`] is one execution of the pipeline. It can be awaited directly
//! or completed through a callback with [`Request::on_complete`]; both forms
//! drive the same future, so they issue the same single transport call and
//! perform the same binding pass.

use std::{
    fmt,
    future::{Future, IntoFuture},
    pin::Pin,
    task::{Context, Poll, Waker},
};

use reqwest::Url;
use serde_json::Value;
use tokio::runtime::Handle;

use crate::{
    Error, Result, Session,
    decode::{Decode, DecodeError, DecodeRule},
    link::{Bind, SessionLink},
};

/// Relative path, query parameters and response envelope of one API call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    segments: Vec<String>,
    params: Vec<(String, String)>,
    envelope: Vec<String>,
}

impl Query {
    /// Start from a `/`-separated relative path.
    pub fn new(path: &str) -> Self {
        Self {
            segments: path
                .split('/')
                .filter(|segment| !segment.is_empty())
                .map(str::to_string)
                .collect(),
            ..Self::default()
        }
    }

    /// Append one path segment; it is percent-encoded as a whole.
    pub fn segment(mut self, segment: impl ToString) -> Self {
        self.segments.push(segment.to_string());
        self
    }

    pub fn param(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.params.push((key.into(), value.to_string()));
        self
    }

    /// Decode the value under `key` instead of the whole response.
    /// Calls chain into nested objects.
    pub fn select(mut self, key: impl Into<String>) -> Self {
        self.envelope.push(key.into());
        self
    }

    pub fn path(&self) -> String {
        self.segments.join("/")
    }

    pub fn params(&self) -> &[(String, String)] {
        &self.params
    }

    pub fn url(&self, base: &Url) -> Result<Url> {
        let mut url = base.clone();
        url.path_segments_mut()
            .map_err(|()| Error::Config(format!("{} cannot be used as a base URL", base)))?
            .pop_if_empty()
            .extend(&self.segments);
        if !self.params.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in &self.params {
                pairs.append_pair(key, value);
            }
        }
        Ok(url)
    }

    fn unwrap_envelope<'a>(&self, json: &'a Value) -> std::result::Result<&'a Value, DecodeError> {
        self.envelope.iter().try_fold(json, |value, key| {
            value
                .get(key)
                .ok_or_else(|| DecodeError::missing_envelope(key, value))
        })
    }
}

pub(crate) type Pending<T> = Pin<Box<dyn Future<Output = Result<T>> + Send>>;

type Attach<T> = Box<dyn FnOnce(&mut T) + Send>;

/// One pending fetch of a `T`.
#[must_use = "a request does nothing until it is awaited or completed"]
pub struct Request<T> {
    session: Result<Session>,
    query: Query,
    mock: Option<Vec<u8>>,
    decode: DecodeRule<T>,
    attach: Option<Attach<T>>,
    deliver_on: Option<Handle>,
}

impl<T: Decode> Request<T> {
    pub(crate) fn new(session: Session, query: Query) -> Self {
        Self::with_session(Ok(session), query)
    }

    /// A request on behalf of an entity. A gone session surfaces when the
    /// request runs, before any transport call.
    pub(crate) fn from_link(link: &SessionLink, query: Query) -> Self {
        Self::with_session(link.upgrade(), query)
    }

    fn with_session(session: Result<Session>, query: Query) -> Self {
        Self {
            session,
            query,
            mock: None,
            decode: T::decode,
            attach: None,
            deliver_on: None,
        }
    }
}

impl<T> Request<T>
where
    T: Bind + Send + 'static,
{
    /// Use `payload` as the response body instead of calling the network.
    pub fn with_mock(mut self, payload: impl Into<Vec<u8>>) -> Self {
        self.mock = Some(payload.into());
        self
    }

    /// Replace the decode rule of `T`.
    pub fn with_decoder(mut self, decode: DecodeRule<T>) -> Self {
        self.decode = decode;
        self
    }

    /// Runtime on which [`Request::on_complete`] delivers network results.
    pub fn deliver_on(mut self, handle: Handle) -> Self {
        self.deliver_on = Some(handle);
        self
    }

    /// Run `attach` on the value right after the session binding pass.
    pub(crate) fn then_bind(mut self, attach: impl FnOnce(&mut T) + Send + 'static) -> Self {
        self.attach = Some(Box::new(attach));
        self
    }

    pub fn query(&self) -> &Query {
        &self.query
    }

    pub fn is_mock(&self) -> bool {
        self.mock.is_some()
    }

    /// Await the result. Equivalent to awaiting the request itself.
    pub async fn send(self) -> Result<T> {
        self.execute().await
    }

    /// Deliver the result to `callback`.
    ///
    /// With a mock payload the callback runs before this method returns, on
    /// the calling thread. Otherwise the request is spawned on the delivery
    /// runtime (the one given to [`Request::deliver_on`], else the current
    /// one) and the callback runs inside that task.
    pub fn on_complete<F>(self, callback: F)
    where
        F: FnOnce(Result<T>) + Send + 'static,
    {
        let handle = self.deliver_on.clone();
        let is_mock = self.is_mock();
        deliver(Box::pin(self.execute()), is_mock, handle, callback);
    }

    async fn execute(self) -> Result<T> {
        let Self {
            session,
            query,
            mock,
            decode,
            attach,
            ..
        } = self;
        let session = session?;

        let body = match mock {
            Some(payload) => {
                tracing::debug!("Using mock payload for {}", query.path());
                payload
            }
            None => {
                let url = query.url(session.base_url())?;
                tracing::debug!("GET {}", url);
                session.transport().get(&url).await?
            }
        };

        let json: Value = serde_json::from_slice(&body)?;
        let mut value = decode(query.unwrap_envelope(&json)?)?;
        value.bind(&session.link());
        if let Some(attach) = attach {
            attach(&mut value);
        }
        Ok(value)
    }
}

/// Hand the outcome of `pending` to `callback`.
///
/// A `synchronous` future never reaches the network, so it is polled once on
/// the calling thread. Anything else runs on `handle`, else on the current
/// runtime.
pub(crate) fn deliver<T, F>(
    mut pending: Pending<T>,
    synchronous: bool,
    handle: Option<Handle>,
    callback: F,
) where
    T: Send + 'static,
    F: FnOnce(Result<T>) + Send + 'static,
{
    if synchronous {
        let mut cx = Context::from_waker(Waker::noop());
        if let Poll::Ready(result) = pending.as_mut().poll(&mut cx) {
            callback(result);
            return;
        }
    }

    match handle.or_else(|| Handle::try_current().ok()) {
        Some(handle) => {
            handle.spawn(async move { callback(pending.await) });
        }
        None => callback(Err(Error::Internal(
            "no async runtime available to deliver the result".to_string(),
        ))),
    }
}

impl<T> IntoFuture for Request<T>
where
    T: Bind + Send + 'static,
{
    type Output = Result<T>;
    type IntoFuture = Pending<T>;

    fn into_future(self) -> Self::IntoFuture {
        Box::pin(self.execute())
    }
}

impl<T> fmt::Debug for Request<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Request")
            .field("query", &self.query)
            .field("mock", &self.mock.is_some())
            .field("attach", &self.attach.is_some())
            .field("session", &self.session.is_ok())
            .finish()
    }
}

#[cfg(test)]
mod tests;
