//! Typed views of the timetable API payloads.
//!
//! Only the fields this crate works with are modelled; unknown keys are
//! ignored. Every entity carries a [`SessionLink`](crate::link::SessionLink)
//! that the pipeline binds after decoding, which is what lets an entity issue
//! follow-up requests on its own.

/// Implements [`Fetchable`](crate::link::Fetchable) for entities with a `session` field.
macro_rules! impl_fetchable {
    ($($entity:ty),+ $(,)?) => {
        $(
            impl $crate::link::Fetchable for $entity {
                fn session(&self) -> &$crate::link::SessionLink {
                    &self.session
                }
            }
        )+
    };
}

pub(crate) use impl_fetchable;

pub mod address;
pub mod board;
pub mod division;
pub mod educator;
pub mod group;
pub mod week;

pub use address::{Address, Room};
pub use board::{BoardDay, BoardEvent, EventBoard};
pub use division::{AdmissionYear, Division, ProgramCombination, StudyLevel};
pub use educator::{Educator, EducatorSchedule, Employment};
pub use group::StudentGroup;
pub use week::{Day, Event, Week};

#[cfg(test)]
pub(crate) mod fixtures;
