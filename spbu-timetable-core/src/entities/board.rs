use chrono::NaiveDateTime;
use serde_json::Value;

use crate::{
    decode::{Decode, DecodeError, Fields},
    entities::impl_fetchable,
    link::{Bind, SessionLink},
    request::{Query, Request},
};

/// An extracurricular event board, such as a faculty's open lectures
#[derive(Debug, Clone, PartialEq)]
pub struct EventBoard {
    pub alias: String,
    pub title: String,
    pub days: Vec<BoardDay>,
    session: SessionLink,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BoardDay {
    pub date: NaiveDateTime,
    pub display_text: String,
    pub events: Vec<BoardEvent>,
    session: SessionLink,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BoardEvent {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub subject: String,
    pub time_interval: String,
    pub locations_display_text: Option<String>,
    session: SessionLink,
}

impl EventBoard {
    pub(crate) fn query(alias: &str) -> Query {
        Query::new("extracur/events").segment(alias)
    }

    pub fn reload(&self) -> Request<EventBoard> {
        Request::from_link(&self.session, Self::query(&self.alias))
    }

    pub fn events(&self) -> impl Iterator<Item = &BoardEvent> {
        self.days.iter().flat_map(|day| day.events.iter())
    }
}

impl Decode for EventBoard {
    fn decode(json: &Value) -> Result<Self, DecodeError> {
        let fields = Fields::of::<Self>(json)?;
        Ok(Self {
            alias: fields.required("Alias")?,
            title: fields.required("Title")?,
            days: fields.list("Days")?,
            session: SessionLink::default(),
        })
    }
}

impl Decode for BoardDay {
    fn decode(json: &Value) -> Result<Self, DecodeError> {
        let fields = Fields::of::<Self>(json)?;
        Ok(Self {
            date: fields.required("Day")?,
            display_text: fields.required("DayString")?,
            events: fields.list("DayEvents")?,
            session: SessionLink::default(),
        })
    }
}

impl Decode for BoardEvent {
    fn decode(json: &Value) -> Result<Self, DecodeError> {
        let fields = Fields::of::<Self>(json)?;
        Ok(Self {
            start: fields.required("Start")?,
            end: fields.required("End")?,
            subject: fields.required("Subject")?,
            time_interval: fields.required("TimeIntervalString")?,
            locations_display_text: fields.optional("LocationsDisplayText")?,
            session: SessionLink::default(),
        })
    }
}

impl Bind for EventBoard {
    fn bind(&mut self, session: &SessionLink) {
        self.session = session.clone();
        self.days.bind(session);
    }
}

impl Bind for BoardDay {
    fn bind(&mut self, session: &SessionLink) {
        self.session = session.clone();
        self.events.bind(session);
    }
}

impl Bind for BoardEvent {
    fn bind(&mut self, session: &SessionLink) {
        self.session = session.clone();
    }
}

impl_fetchable!(EventBoard, BoardDay, BoardEvent);
