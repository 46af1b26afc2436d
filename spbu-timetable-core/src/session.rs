use std::{fmt, sync::Arc};

use chrono::NaiveDate;
use reqwest::Url;
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use crate::{
    Error, Result,
    cache::{CachePolicy, Cached},
    decode::Decode,
    entities::{
        Address, Division, Educator, EducatorSchedule, EventBoard, StudentGroup, StudyLevel,
        Week,
    },
    link::{Bind, SessionLink},
    location::Resolution,
    request::{Query, Request},
    transport::{HttpTransportBuilder, Transport},
};

pub const DEFAULT_BASE_URL: &str = "https://timetable.spbu.ru/api/v1";

/// Session configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Root of the timetable API
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout: Option<u64>,
    pub user_agent: Option<String>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Some(30),
            user_agent: None,
        }
    }
}

impl SessionConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| Error::Config(format!("Invalid session config: {}", e)))
    }
}

pub(crate) struct SessionInner {
    base_url: Url,
    transport: Arc<dyn Transport>,
    addresses: Mutex<Cached<Vec<Arc<Address>>>>,
}

/// Root context of every request: the API base address plus the transport.
///
/// Cloning is cheap and yields a handle to the same session. Entities only
/// keep weak links to it, so once every handle is dropped their chained
/// requests fail with [`Error::ContextGone`].
#[derive(Clone)]
pub struct Session {
    inner: Arc<SessionInner>,
}

impl Session {
    pub fn new() -> Result<Self> {
        Self::with_config(SessionConfig::default())
    }

    pub fn with_config(config: SessionConfig) -> Result<Self> {
        let mut builder = HttpTransportBuilder::new();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        if let Some(user_agent) = config.user_agent {
            builder = builder.user_agent(user_agent);
        }
        Self::with_transport(&config.base_url, builder.build()?)
    }

    pub fn with_transport(base_url: &str, transport: impl Transport + 'static) -> Result<Self> {
        let base_url = Url::parse(base_url)
            .map_err(|e| Error::Config(format!("Invalid base URL '{}': {}", base_url, e)))?;
        if base_url.cannot_be_a_base() {
            return Err(Error::Config(format!(
                "'{}' cannot be used as a base URL",
                base_url
            )));
        }

        Ok(Self {
            inner: Arc::new(SessionInner {
                base_url,
                transport: Arc::new(transport),
                addresses: Mutex::new(Cached::Unfetched),
            }),
        })
    }

    pub(crate) fn from_inner(inner: Arc<SessionInner>) -> Self {
        Self { inner }
    }

    pub(crate) fn inner(&self) -> &Arc<SessionInner> {
        &self.inner
    }

    pub(crate) fn transport(&self) -> &dyn Transport {
        self.inner.transport.as_ref()
    }

    pub fn base_url(&self) -> &Url {
        &self.inner.base_url
    }

    pub fn link(&self) -> SessionLink {
        SessionLink::new(&self.inner)
    }

    /// Generic entry point for schemas not modelled by this crate.
    pub fn request<T>(&self, query: Query) -> Request<T>
    where
        T: Decode + Bind + Send + 'static,
    {
        Request::new(self.clone(), query)
    }

    pub fn divisions(&self) -> Request<Vec<Division>> {
        self.request(Division::query())
    }

    pub fn study_levels(&self, division_alias: &str) -> Request<Vec<StudyLevel>> {
        self.request(StudyLevel::query(division_alias))
    }

    pub fn groups(&self, study_program_id: i64) -> Request<Vec<StudentGroup>> {
        self.request(StudentGroup::query(study_program_id))
    }

    /// The week of `group_id` starting at `monday`, or the current week.
    pub fn group_week(&self, group_id: i64, monday: Option<NaiveDate>) -> Request<Week> {
        self.request(Week::query(group_id, monday))
    }

    pub fn search_educators(&self, name: &str) -> Request<Vec<Educator>> {
        self.request(Educator::search_query(name))
    }

    pub fn educator_schedule(
        &self,
        educator_id: i64,
        range: Option<(NaiveDate, NaiveDate)>,
    ) -> Request<EducatorSchedule> {
        self.request(EducatorSchedule::query(educator_id, range))
    }

    /// The extracurricular event board published under `alias`.
    pub fn event_board(&self, alias: &str) -> Request<EventBoard> {
        self.request(EventBoard::query(alias))
    }

    /// A one-off fetch of the address catalog, bypassing the session cache.
    pub fn address_catalog(&self) -> Request<Vec<Address>> {
        self.request(Address::query())
    }

    /// The address catalog, fetched once and shared by every room resolution.
    pub async fn addresses(&self, policy: CachePolicy) -> Result<Vec<Arc<Address>>> {
        self.addresses_from(policy, self.address_catalog()).await
    }

    /// Like [`Session::addresses`], but a cache miss is answered by `request`,
    /// usually [`Session::address_catalog`] carrying a mock payload.
    pub async fn addresses_from(
        &self,
        policy: CachePolicy,
        request: Request<Vec<Address>>,
    ) -> Result<Vec<Arc<Address>>> {
        let mut catalog = self.inner.addresses.lock().await;
        let addresses = catalog
            .get_or_fetch(policy, || async {
                let addresses = request.await?;
                tracing::info!("Fetched {} addresses", addresses.len());
                Ok(addresses.into_iter().map(Arc::new).collect())
            })
            .await?;
        Ok(addresses.clone())
    }

    /// Resolution of a location display name to a catalogued room.
    pub fn resolve_room(&self, display_name: impl Into<String>) -> Resolution {
        Resolution::new(Ok(self.clone()), display_name.into())
    }

    /// Mark the cached address catalog stale.
    pub async fn invalidate_addresses(&self) {
        self.inner.addresses.lock().await.invalidate();
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("base_url", &self.inner.base_url.as_str())
            .finish()
    }
}
