//! SPbU Timetable Core Library
//!
//! A typed client for the Saint Petersburg State University timetable API.
//! Responses are decoded into entities that stay linked to the [`Session`]
//! that fetched them, so an entity can issue its own follow-up requests
//! (a group fetches its week, a week its neighbours, a location its room).

pub mod cache;
pub mod decode;
pub mod entities;
pub mod error;
pub mod link;
pub mod location;
pub mod request;
pub mod session;
pub mod transport;

pub use error::{Error, Result};
pub use session::{Session, SessionConfig};

/// Commonly used items
pub mod prelude {
    pub use crate::{
        Error, Result, Session, SessionConfig,
        cache::CachePolicy,
        decode::{Decode, DecodeError, Fields},
        entities::*,
        link::{Bind, Fetchable},
        location::Location,
        request::{Query, Request},
    };
}
