use serde_json::Value;

use crate::{
    decode::{Decode, DecodeError, Fields},
    entities::{StudentGroup, impl_fetchable},
    link::{Bind, SessionLink},
    request::{Query, Request},
};

/// A faculty or institute
#[derive(Debug, Clone, PartialEq)]
pub struct Division {
    /// Short code used in URLs, e.g. `MATH`
    pub alias: String,
    pub name: String,
    pub oid: String,
    session: SessionLink,
}

/// A level of study (bachelor, master, ...) offered by a division
#[derive(Debug, Clone, PartialEq)]
pub struct StudyLevel {
    pub name: String,
    pub name_english: Option<String>,
    pub has_course6: bool,
    pub combinations: Vec<ProgramCombination>,
    session: SessionLink,
}

/// A study program together with its yearly intakes
#[derive(Debug, Clone, PartialEq)]
pub struct ProgramCombination {
    pub name: String,
    pub name_english: Option<String>,
    pub admission_years: Vec<AdmissionYear>,
    session: SessionLink,
}

/// One intake of a study program; the unit that student groups belong to
#[derive(Debug, Clone, PartialEq)]
pub struct AdmissionYear {
    pub study_program_id: i64,
    pub year_name: String,
    pub year_number: i64,
    pub is_empty: bool,
    session: SessionLink,
}

impl Division {
    pub(crate) fn query() -> Query {
        Query::new("study/divisions")
    }

    pub fn study_levels(&self) -> Request<Vec<StudyLevel>> {
        Request::from_link(&self.session, StudyLevel::query(&self.alias))
    }
}

impl StudyLevel {
    pub(crate) fn query(division_alias: &str) -> Query {
        Query::new("study/divisions")
            .segment(division_alias)
            .segment("programs")
            .segment("levels")
    }
}

impl AdmissionYear {
    pub fn groups(&self) -> Request<Vec<StudentGroup>> {
        Request::from_link(&self.session, StudentGroup::query(self.study_program_id))
    }
}

impl Decode for Division {
    fn decode(json: &Value) -> Result<Self, DecodeError> {
        let fields = Fields::of::<Self>(json)?;
        Ok(Self {
            alias: fields.required("Alias")?,
            name: fields.required("Name")?,
            oid: fields.required("Oid")?,
            session: SessionLink::default(),
        })
    }
}

impl Decode for StudyLevel {
    fn decode(json: &Value) -> Result<Self, DecodeError> {
        let fields = Fields::of::<Self>(json)?;
        Ok(Self {
            name: fields.required("StudyLevelName")?,
            name_english: fields.optional("StudyLevelNameEnglish")?,
            has_course6: fields.optional("HasCourse6")?.unwrap_or(false),
            combinations: fields.list("StudyProgramCombinations")?,
            session: SessionLink::default(),
        })
    }
}

impl Decode for ProgramCombination {
    fn decode(json: &Value) -> Result<Self, DecodeError> {
        let fields = Fields::of::<Self>(json)?;
        Ok(Self {
            name: fields.required("Name")?,
            name_english: fields.optional("NameEnglish")?,
            admission_years: fields.list("AdmissionYears")?,
            session: SessionLink::default(),
        })
    }
}

impl Decode for AdmissionYear {
    fn decode(json: &Value) -> Result<Self, DecodeError> {
        let fields = Fields::of::<Self>(json)?;
        Ok(Self {
            study_program_id: fields.required("StudyProgramId")?,
            year_name: fields.required("YearName")?,
            year_number: fields.required("YearNumber")?,
            is_empty: fields.optional("IsEmpty")?.unwrap_or(false),
            session: SessionLink::default(),
        })
    }
}

impl Bind for Division {
    fn bind(&mut self, session: &SessionLink) {
        self.session = session.clone();
    }
}

impl Bind for StudyLevel {
    fn bind(&mut self, session: &SessionLink) {
        self.session = session.clone();
        self.combinations.bind(session);
    }
}

impl Bind for ProgramCombination {
    fn bind(&mut self, session: &SessionLink) {
        self.session = session.clone();
        self.admission_years.bind(session);
    }
}

impl Bind for AdmissionYear {
    fn bind(&mut self, session: &SessionLink) {
        self.session = session.clone();
    }
}

impl_fetchable!(Division, StudyLevel, ProgramCombination, AdmissionYear);
