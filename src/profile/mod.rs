//! Identifiers and device profiles.
//!
//! A profile pairs the offset table (button -> field offset) with the action table
//! (action -> bit flag) for one firmware layout.

pub mod ids;
pub mod tables;

pub use ids::{ActionId, ButtonId, ParseIdError, labels_match};
pub use tables::{
    ActionFlag, BUILTIN, ButtonSlot, DEFAULT_PROFILE, HOME_UNTESTED, Profile, STANDARD, by_name,
    default_profile,
};
