//! Non-owning back-references from entities to the context that produced them.
//!
//! A [`Link`] is either unset (freshly decoded), set, or gone (the target was
//! dropped). It never keeps its target alive, and every read goes through a
//! checked upgrade that turns an unset or gone link into
//! [`Error::ContextGone`].

use std::{
    fmt,
    sync::{Arc, Weak},
};

use crate::{
    Error, Result,
    session::{Session, SessionInner},
};

/// Checked weak handle to a `T` owned elsewhere.
pub struct Link<T> {
    target: Option<Weak<T>>,
}

impl<T> Link<T> {
    pub fn new(target: &Arc<T>) -> Self {
        Self {
            target: Some(Arc::downgrade(target)),
        }
    }

    /// Whether binding ever set this link, regardless of the target's liveness.
    pub fn is_set(&self) -> bool {
        self.target.is_some()
    }

    pub fn is_alive(&self) -> bool {
        self.target.as_ref().is_some_and(|weak| weak.strong_count() > 0)
    }

    pub fn get(&self) -> Option<Arc<T>> {
        self.target.as_ref().and_then(Weak::upgrade)
    }

    pub fn points_to(&self, target: &Arc<T>) -> bool {
        self.target
            .as_ref()
            .is_some_and(|weak| std::ptr::eq(weak.as_ptr(), Arc::as_ptr(target)))
    }

    pub(crate) fn ensure_valid(&self, owner: &'static str) -> Result<Arc<T>> {
        self.get().ok_or(Error::ContextGone(owner))
    }
}

impl<T> Default for Link<T> {
    fn default() -> Self {
        Self { target: None }
    }
}

impl<T> Clone for Link<T> {
    fn clone(&self) -> Self {
        Self {
            target: self.target.clone(),
        }
    }
}

/// Two links are equal when they point at the same allocation (or are both unset).
impl<T> PartialEq for Link<T> {
    fn eq(&self, other: &Self) -> bool {
        match (&self.target, &other.target) {
            (Some(a), Some(b)) => Weak::ptr_eq(a, b),
            (None, None) => true,
            _ => false,
        }
    }
}

impl<T> fmt::Debug for Link<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = match &self.target {
            None => "unset",
            Some(_) if self.is_alive() => "alive",
            Some(_) => "gone",
        };
        write!(f, "Link({})", state)
    }
}

/// Back-reference from an entity to the [`Session`] that fetched it.
#[derive(Clone, Default, PartialEq)]
pub struct SessionLink(Link<SessionInner>);

impl SessionLink {
    pub(crate) fn new(inner: &Arc<SessionInner>) -> Self {
        Self(Link::new(inner))
    }

    /// Recover the session, or fail with [`Error::ContextGone`].
    pub fn upgrade(&self) -> Result<Session> {
        self.0.ensure_valid("session").map(Session::from_inner)
    }

    pub fn is_set(&self) -> bool {
        self.0.is_set()
    }

    pub fn is_bound_to(&self, session: &Session) -> bool {
        self.0.points_to(session.inner())
    }
}

impl fmt::Debug for SessionLink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Session{:?}", self.0)
    }
}

/// Attach a session to a freshly decoded value and everything it owns.
pub trait Bind {
    fn bind(&mut self, session: &SessionLink);
}

/// An entity that carries its own session back-reference.
pub trait Fetchable: Bind {
    fn session(&self) -> &SessionLink;
}

impl<T: Bind> Bind for Vec<T> {
    fn bind(&mut self, session: &SessionLink) {
        for item in self {
            item.bind(session);
        }
    }
}

impl<T: Bind> Bind for Option<T> {
    fn bind(&mut self, session: &SessionLink) {
        if let Some(item) = self {
            item.bind(session);
        }
    }
}

impl Bind for serde_json::Value {
    fn bind(&mut self, _session: &SessionLink) {}
}
