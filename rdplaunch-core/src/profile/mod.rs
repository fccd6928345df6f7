//! Connection profiles: loading and selection

mod selector;
mod store;

pub use selector::{ConnectionSelector, SELECT_PROMPT, candidate_names, find_profile};
pub use store::{JsonProfileStore, ProfileStore, validate_profiles};
