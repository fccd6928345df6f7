//! Core data structures for `rdplaunch`

mod event;
mod profile;

pub use event::{LifecycleEvent, Severity};
pub(crate) use profile::ProfileRecord;
pub use profile::{ConnectionProfile, FREE_FORM_NAME, ProfileField, ResolvedConnection};
