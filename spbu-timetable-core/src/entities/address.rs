use std::sync::Arc;

use serde_json::Value;
use tokio::sync::Mutex;

use crate::{
    Result,
    cache::{CachePolicy, Cached},
    decode::{Decode, DecodeError, Fields},
    entities::impl_fetchable,
    link::{Bind, Link, SessionLink},
    request::{Query, Request},
};

/// A university building
#[derive(Debug)]
pub struct Address {
    pub oid: String,
    pub name: String,
    pub matches: Option<String>,
    pub wanting_equipment: Option<String>,
    rooms: Mutex<Cached<Vec<Room>>>,
    session: SessionLink,
}

/// A classroom inside an [`Address`]
#[derive(Debug, Clone, PartialEq)]
pub struct Room {
    pub oid: String,
    pub name: String,
    pub seating: Option<String>,
    pub capacity: Option<i64>,
    pub additional_info: Option<String>,
    address: Link<Address>,
    session: SessionLink,
}

impl Address {
    pub(crate) fn query() -> Query {
        Query::new("addresses")
    }

    /// One fetch of this address's room catalog, bypassing the cache.
    ///
    /// Every returned room links back to this address, whether the body comes
    /// from the network or from a mock payload.
    pub fn rooms_request(self: &Arc<Self>) -> Request<Vec<Room>> {
        let owner = Link::new(self);
        Request::from_link(&self.session, Room::query(&self.oid)).then_bind(move |rooms: &mut Vec<Room>| {
            for room in rooms {
                room.address = owner.clone();
            }
        })
    }

    /// Rooms of this address, fetched on first use.
    pub async fn rooms(self: &Arc<Self>, policy: CachePolicy) -> Result<Vec<Room>> {
        self.rooms_from(policy, self.rooms_request()).await
    }

    /// Like [`Address::rooms`], but a cache miss is answered by `request`,
    /// usually [`Address::rooms_request`] carrying a mock payload.
    pub async fn rooms_from(
        &self,
        policy: CachePolicy,
        request: Request<Vec<Room>>,
    ) -> Result<Vec<Room>> {
        let mut catalog = self.rooms.lock().await;
        let rooms = catalog
            .get_or_fetch(policy, || async {
                let rooms = request.await?;
                tracing::info!("Fetched {} rooms for address '{}'", rooms.len(), self.name);
                Ok(rooms)
            })
            .await?;
        Ok(rooms.clone())
    }

    /// Rooms from a previous fetch, if still fresh.
    pub async fn cached_rooms(&self) -> Option<Vec<Room>> {
        self.rooms.lock().await.fetched().cloned()
    }
}

impl Room {
    pub(crate) fn query(address_oid: &str) -> Query {
        Query::new("addresses").segment(address_oid).segment("classrooms")
    }

    /// The address whose room catalog contained this room.
    ///
    /// Set for rooms fetched through [`Address::rooms_request`] (and so
    /// [`Address::rooms`]). A room decoded any other way has no owner and
    /// fails with [`Error::ContextGone`](crate::Error::ContextGone).
    pub fn address(&self) -> Result<Arc<Address>> {
        self.address.ensure_valid("address")
    }
}

impl Decode for Address {
    fn decode(json: &Value) -> std::result::Result<Self, DecodeError> {
        let fields = Fields::of::<Self>(json)?;
        Ok(Self {
            oid: fields.required("Oid")?,
            name: fields.required("DisplayName1")?,
            matches: fields.optional("Matches")?,
            wanting_equipment: fields.optional("WantingEquipment")?,
            rooms: Mutex::new(Cached::Unfetched),
            session: SessionLink::default(),
        })
    }
}

impl Decode for Room {
    fn decode(json: &Value) -> std::result::Result<Self, DecodeError> {
        let fields = Fields::of::<Self>(json)?;
        Ok(Self {
            oid: fields.required("Oid")?,
            name: fields.required("DisplayName1")?,
            seating: fields.optional("Seating")?,
            capacity: fields.optional("Capacity")?,
            additional_info: fields.optional("AdditionalInfo")?,
            address: Link::default(),
            session: SessionLink::default(),
        })
    }
}

impl Bind for Address {
    fn bind(&mut self, session: &SessionLink) {
        self.session = session.clone();
    }
}

impl Bind for Room {
    fn bind(&mut self, session: &SessionLink) {
        self.session = session.clone();
    }
}

impl_fetchable!(Address, Room);
