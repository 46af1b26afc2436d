use chrono::{NaiveDate, NaiveDateTime};
use serde_json::Value;

use crate::{
    decode::{Decode, DecodeError, Fields},
    entities::impl_fetchable,
    link::{Bind, SessionLink},
    location::Location,
    request::{Query, Request},
};

/// One week of a student group's timetable
#[derive(Debug, Clone, PartialEq)]
pub struct Week {
    pub group_id: i64,
    pub group_display_name: String,
    /// Date range of the week as the API renders it
    pub display_text: String,
    pub monday: NaiveDate,
    pub previous_monday: NaiveDate,
    pub next_monday: NaiveDate,
    pub has_previous: bool,
    pub has_next: bool,
    pub days: Vec<Day>,
    session: SessionLink,
}

/// A day with at least one event
#[derive(Debug, Clone, PartialEq)]
pub struct Day {
    pub date: NaiveDateTime,
    pub display_text: String,
    pub events: Vec<Event>,
    session: SessionLink,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Event {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub subject: String,
    /// e.g. "09:30–11:05"
    pub time_interval: String,
    pub locations_display_text: Option<String>,
    pub educators_display_text: Option<String>,
    pub is_cancelled: bool,
    /// Timetable kind code. The API always sends the key, possibly as `null`.
    pub kind: Option<i64>,
    /// Always sent, possibly as `null`.
    pub contingent_units_display_text: Option<String>,
    pub locations: Vec<Location>,
    session: SessionLink,
}

impl Week {
    pub(crate) fn query(group_id: i64, monday: Option<NaiveDate>) -> Query {
        let query = Query::new("groups").segment(group_id).segment("events");
        match monday {
            Some(monday) => query.segment(monday.format("%Y-%m-%d")),
            None => query,
        }
    }

    pub fn next(&self) -> Option<Request<Week>> {
        self.has_next.then(|| self.at(self.next_monday))
    }

    pub fn previous(&self) -> Option<Request<Week>> {
        self.has_previous.then(|| self.at(self.previous_monday))
    }

    /// Refetch this same week.
    pub fn reload(&self) -> Request<Week> {
        self.at(self.monday)
    }

    fn at(&self, monday: NaiveDate) -> Request<Week> {
        Request::from_link(&self.session, Self::query(self.group_id, Some(monday)))
    }

    pub fn events(&self) -> impl Iterator<Item = &Event> {
        self.days.iter().flat_map(|day| day.events.iter())
    }

    pub fn locations_mut(&mut self) -> impl Iterator<Item = &mut Location> {
        self.days
            .iter_mut()
            .flat_map(|day| day.events.iter_mut())
            .flat_map(|event| event.locations.iter_mut())
    }
}

impl Decode for Week {
    fn decode(json: &Value) -> Result<Self, DecodeError> {
        let fields = Fields::of::<Self>(json)?;
        Ok(Self {
            group_id: fields.required("StudentGroupId")?,
            group_display_name: fields.required("StudentGroupDisplayName")?,
            display_text: fields.required("WeekDisplayText")?,
            monday: fields.required("WeekMonday")?,
            previous_monday: fields.required("PreviousWeekMonday")?,
            next_monday: fields.required("NextWeekMonday")?,
            has_previous: fields.required("IsPreviousWeekReferenceAvailable")?,
            has_next: fields.required("IsNextWeekReferenceAvailable")?,
            // A week must never silently lose a day.
            days: fields.strict_list("Days")?,
            session: SessionLink::default(),
        })
    }
}

impl Decode for Day {
    fn decode(json: &Value) -> Result<Self, DecodeError> {
        let fields = Fields::of::<Self>(json)?;
        Ok(Self {
            date: fields.required("Day")?,
            display_text: fields.required("DayString")?,
            events: fields.list("DayStudyEvents")?,
            session: SessionLink::default(),
        })
    }
}

impl Decode for Event {
    fn decode(json: &Value) -> Result<Self, DecodeError> {
        let fields = Fields::of::<Self>(json)?;
        Ok(Self {
            start: fields.required("Start")?,
            end: fields.required("End")?,
            subject: fields.required("Subject")?,
            time_interval: fields.required("TimeIntervalString")?,
            locations_display_text: fields.optional("LocationsDisplayText")?,
            educators_display_text: fields.optional("EducatorsDisplayText")?,
            is_cancelled: fields.optional("IsCancelled")?.unwrap_or(false),
            kind: fields.nullable("StudyEventsTimeTableKindCode")?,
            contingent_units_display_text: fields.nullable("ContingentUnitName")?,
            locations: fields.list("EventLocations")?,
            session: SessionLink::default(),
        })
    }
}

impl Bind for Week {
    fn bind(&mut self, session: &SessionLink) {
        self.session = session.clone();
        self.days.bind(session);
    }
}

impl Bind for Day {
    fn bind(&mut self, session: &SessionLink) {
        self.session = session.clone();
        self.events.bind(session);
    }
}

impl Bind for Event {
    fn bind(&mut self, session: &SessionLink) {
        self.session = session.clone();
        self.locations.bind(session);
    }
}

impl_fetchable!(Week, Day, Event);
