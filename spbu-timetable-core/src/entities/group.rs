use chrono::NaiveDate;
use serde_json::Value;

use crate::{
    decode::{Decode, DecodeError, Fields},
    entities::{Week, impl_fetchable},
    link::{Bind, SessionLink},
    request::{Query, Request},
};

/// A student group of one study program intake
#[derive(Debug, Clone, PartialEq)]
pub struct StudentGroup {
    pub id: i64,
    pub name: String,
    /// e.g. "очная"
    pub study_form: Option<String>,
    pub profiles: Option<String>,
    session: SessionLink,
}

impl StudentGroup {
    pub(crate) fn query(study_program_id: i64) -> Query {
        // The API really spells it "progams".
        Query::new("progams")
            .segment(study_program_id)
            .segment("groups")
            .select("Groups")
    }

    /// The week starting at `monday`, or the current one.
    pub fn week(&self, monday: Option<NaiveDate>) -> Request<Week> {
        Request::from_link(&self.session, Week::query(self.id, monday))
    }
}

impl Decode for StudentGroup {
    fn decode(json: &Value) -> Result<Self, DecodeError> {
        let fields = Fields::of::<Self>(json)?;
        Ok(Self {
            id: fields.required("StudentGroupId")?,
            name: fields.required("StudentGroupName")?,
            study_form: fields.optional("StudentGroupStudyForm")?,
            profiles: fields.optional("StudentGroupProfiles")?,
            session: SessionLink::default(),
        })
    }
}

impl Bind for StudentGroup {
    fn bind(&mut self, session: &SessionLink) {
        self.session = session.clone();
    }
}

impl_fetchable!(StudentGroup);
