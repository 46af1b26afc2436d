use chrono::NaiveDate;
use serde_json::Value;

use crate::{
    decode::{Decode, DecodeError, Fields},
    entities::{Day, impl_fetchable},
    link::{Bind, SessionLink},
    request::{Query, Request},
};

#[derive(Debug, Clone, PartialEq)]
pub struct Educator {
    pub id: i64,
    pub display_name: String,
    pub full_name: String,
    pub employments: Vec<Employment>,
    session: SessionLink,
}

/// Position held by an educator in a department
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Employment {
    pub position: String,
    pub department: String,
}

/// Events of one educator over a date range
#[derive(Debug, Clone, PartialEq)]
pub struct EducatorSchedule {
    pub educator_id: i64,
    pub display_text: String,
    pub long_display_text: String,
    pub days: Vec<Day>,
    session: SessionLink,
}

impl Educator {
    pub(crate) fn search_query(name: &str) -> Query {
        Query::new("educators/search")
            .segment(name)
            .select("Educators")
    }

    /// Events of this educator between `range.0` and `range.1`, or for the current week.
    pub fn schedule(&self, range: Option<(NaiveDate, NaiveDate)>) -> Request<EducatorSchedule> {
        Request::from_link(&self.session, EducatorSchedule::query(self.id, range))
    }
}

impl EducatorSchedule {
    pub(crate) fn query(educator_id: i64, range: Option<(NaiveDate, NaiveDate)>) -> Query {
        let query = Query::new("educators")
            .segment(educator_id)
            .segment("events");
        match range {
            Some((from, to)) => query
                .segment(from.format("%Y-%m-%d"))
                .segment(to.format("%Y-%m-%d")),
            None => query,
        }
    }
}

impl Decode for Educator {
    fn decode(json: &Value) -> Result<Self, DecodeError> {
        let fields = Fields::of::<Self>(json)?;
        Ok(Self {
            id: fields.required("Id")?,
            display_name: fields.required("DisplayName")?,
            full_name: fields.required("FullName")?,
            employments: fields.list("Employments")?,
            session: SessionLink::default(),
        })
    }
}

impl Decode for Employment {
    fn decode(json: &Value) -> Result<Self, DecodeError> {
        let fields = Fields::of::<Self>(json)?;
        Ok(Self {
            position: fields.required("Position")?,
            department: fields.required("Department")?,
        })
    }
}

impl Decode for EducatorSchedule {
    fn decode(json: &Value) -> Result<Self, DecodeError> {
        let fields = Fields::of::<Self>(json)?;
        Ok(Self {
            educator_id: fields.required("EducatorMasterId")?,
            display_text: fields.required("EducatorDisplayText")?,
            long_display_text: fields.required("EducatorLongDisplayText")?,
            days: fields.list("EducatorEventsDays")?,
            session: SessionLink::default(),
        })
    }
}

impl Bind for Educator {
    fn bind(&mut self, session: &SessionLink) {
        self.session = session.clone();
    }
}

impl Bind for EducatorSchedule {
    fn bind(&mut self, session: &SessionLink) {
        self.session = session.clone();
        self.days.bind(session);
    }
}

impl_fetchable!(Educator, EducatorSchedule);
