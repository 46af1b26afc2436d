//! Locations of events and their resolution to catalogued rooms.
//!
//! The API describes where an event happens with a free-text display name
//! such as `"Университетская наб., д. 7-9, ауд. 1304"`. [`Location::resolve_room`] maps
//! that text onto the address and room catalogs by substring containment:
//!
//! 1. the first address (in catalog order) whose name occurs in the text,
//! 2. then, in what is left of the text after removing that address name,
//!    the room with the longest name that occurs there.
//!
//! A [`Resolution`] runs the matching; it can be awaited or completed through
//! a callback, and either catalog fetch can be answered by a mock payload.
//!
//! This is a best-effort heuristic. A location that does correspond to a real
//! room can still fail to resolve (for example when the display name
//! abbreviates the address differently from the catalog); callers must treat
//! [`Error::NoMatchingRoom`] as an expected outcome.

use std::{fmt, future::IntoFuture};

use serde_json::Value;
use tokio::runtime::Handle;

use crate::{
    Error, Result, Session,
    cache::{CachePolicy, Cached},
    decode::{Decode, DecodeError, Fields},
    entities::{Address, Room, impl_fetchable},
    link::{Bind, SessionLink},
    request::{Pending, deliver},
};

/// Where an event takes place
#[derive(Debug, Clone, PartialEq)]
pub struct Location {
    pub display_name: String,
    pub is_empty: bool,
    pub has_coordinates: bool,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub educators_display_text: Option<String>,
    room: Cached<Room>,
    session: SessionLink,
}

impl Location {
    /// The room found by a previous successful resolution.
    pub fn room(&self) -> Option<&Room> {
        self.room.fetched()
    }

    /// A resolution of this location's display name, to be configured and run.
    pub fn resolution(&self) -> Resolution {
        Resolution::new(self.session.upgrade(), self.display_name.clone())
    }

    /// Resolve this location to a room, caching the answer on the location.
    ///
    /// With [`CachePolicy::UseCache`] a previously resolved room is returned
    /// without any request, and the address and room catalogs are reused if
    /// the session already holds them. [`CachePolicy::Reload`] refetches both
    /// catalogs and resolves again.
    pub async fn resolve_room(&mut self, policy: CachePolicy) -> Result<Room> {
        let resolution = self.resolution().policy(policy);
        self.resolve_with(resolution).await
    }

    /// Run `resolution` (for instance one carrying catalog mocks) and cache
    /// its room on this location under the resolution's policy.
    pub async fn resolve_with(&mut self, resolution: Resolution) -> Result<Room> {
        self.session.upgrade()?;
        let policy = resolution.policy;
        let room = self
            .room
            .get_or_fetch(policy, || resolution.send())
            .await?;
        Ok(room.clone())
    }
}

/// One matching of a display name against the session's catalogs.
///
/// Awaiting it and [`Resolution::on_complete`] run the same resolution. The
/// result is not cached on any [`Location`]; use [`Location::resolve_with`]
/// for that.
#[must_use = "a resolution does nothing until it is awaited or completed"]
pub struct Resolution {
    session: Result<Session>,
    display_name: String,
    policy: CachePolicy,
    addresses_mock: Option<Vec<u8>>,
    rooms_mock: Option<Vec<u8>>,
    deliver_on: Option<Handle>,
}

impl Resolution {
    pub(crate) fn new(session: Result<Session>, display_name: String) -> Self {
        Self {
            session,
            display_name,
            policy: CachePolicy::default(),
            addresses_mock: None,
            rooms_mock: None,
            deliver_on: None,
        }
    }

    pub fn policy(mut self, policy: CachePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Answer an address catalog miss with `payload`.
    pub fn with_addresses_mock(mut self, payload: impl Into<Vec<u8>>) -> Self {
        self.addresses_mock = Some(payload.into());
        self
    }

    /// Answer a room catalog miss of the matched address with `payload`.
    pub fn with_rooms_mock(mut self, payload: impl Into<Vec<u8>>) -> Self {
        self.rooms_mock = Some(payload.into());
        self
    }

    pub fn deliver_on(mut self, handle: Handle) -> Self {
        self.deliver_on = Some(handle);
        self
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    /// Both catalogs are mocked, so the resolution never touches the network.
    pub fn is_mock(&self) -> bool {
        self.addresses_mock.is_some() && self.rooms_mock.is_some()
    }

    pub async fn send(self) -> Result<Room> {
        self.execute().await
    }

    /// Deliver the room to `callback`, the same way
    /// [`Request::on_complete`](crate::request::Request::on_complete) does:
    /// synchronously when fully mocked, otherwise on the delivery runtime.
    pub fn on_complete<F>(self, callback: F)
    where
        F: FnOnce(Result<Room>) + Send + 'static,
    {
        let handle = self.deliver_on.clone();
        let is_mock = self.is_mock();
        deliver(Box::pin(self.execute()), is_mock, handle, callback);
    }

    async fn execute(self) -> Result<Room> {
        let session = self.session?;
        let display_name = self.display_name.as_str();
        let name = display_name.to_lowercase();
        let no_match = || {
            tracing::warn!("No room matches location '{}'", display_name);
            Error::NoMatchingRoom(display_name.to_string())
        };

        let mut catalog = session.address_catalog();
        if let Some(payload) = self.addresses_mock {
            catalog = catalog.with_mock(payload);
        }
        let addresses = session.addresses_from(self.policy, catalog).await?;
        let address = first_containing(&name, &addresses).ok_or_else(no_match)?;
        let remainder = strip_first(&name, &address.name().to_lowercase());

        let mut request = address.rooms_request();
        if let Some(payload) = self.rooms_mock {
            request = request.with_mock(payload);
        }
        let rooms = address.rooms_from(self.policy, request).await?;
        let room = longest_contained(&remainder, &rooms)
            .cloned()
            .ok_or_else(no_match)?;

        tracing::info!(
            "Resolved location '{}' to room '{}' at '{}'",
            display_name,
            room.name,
            address.name()
        );
        Ok(room)
    }
}

impl IntoFuture for Resolution {
    type Output = Result<Room>;
    type IntoFuture = Pending<Room>;

    fn into_future(self) -> Self::IntoFuture {
        Box::pin(self.execute())
    }
}

impl fmt::Debug for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Resolution")
            .field("display_name", &self.display_name)
            .field("policy", &self.policy)
            .field("mock", &self.is_mock())
            .finish()
    }
}

/// Anything matched by its display name.
pub trait Named {
    fn name(&self) -> &str;
}

impl Named for Address {
    fn name(&self) -> &str {
        &self.name
    }
}

impl Named for Room {
    fn name(&self) -> &str {
        &self.name
    }
}

impl<T: Named> Named for std::sync::Arc<T> {
    fn name(&self) -> &str {
        (**self).name()
    }
}

/// First item whose lower-cased name occurs in `haystack`.
pub fn first_containing<'a, T: Named>(haystack: &str, items: &'a [T]) -> Option<&'a T> {
    items
        .iter()
        .find(|item| haystack.contains(&item.name().to_lowercase()))
}

/// Item with the longest lower-cased name occurring in `haystack`; the first wins ties.
pub fn longest_contained<'a, T: Named>(haystack: &str, items: &'a [T]) -> Option<&'a T> {
    let mut best: Option<(&'a T, usize)> = None;
    for item in items {
        let name = item.name().to_lowercase();
        if !haystack.contains(&name) {
            continue;
        }
        let len = name.chars().count();
        if best.is_none_or(|(_, best_len)| len > best_len) {
            best = Some((item, len));
        }
    }
    best.map(|(item, _)| item)
}

/// `haystack` with the first occurrence of `needle` removed.
pub fn strip_first(haystack: &str, needle: &str) -> String {
    haystack.replacen(needle, "", 1)
}

impl Decode for Location {
    fn decode(json: &Value) -> std::result::Result<Self, DecodeError> {
        let fields = Fields::of::<Self>(json)?;
        Ok(Self {
            display_name: fields.required("DisplayName")?,
            is_empty: fields.optional("IsEmpty")?.unwrap_or(false),
            has_coordinates: fields.optional("HasGeographicCoordinates")?.unwrap_or(false),
            latitude: fields.optional("Latitude")?,
            longitude: fields.optional("Longitude")?,
            educators_display_text: fields.optional("EducatorsDisplayText")?,
            room: Cached::Unfetched,
            session: SessionLink::default(),
        })
    }
}

impl Bind for Location {
    fn bind(&mut self, session: &SessionLink) {
        self.session = session.clone();
    }
}

impl_fetchable!(Location);
