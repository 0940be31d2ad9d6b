//! Helpers shared by the validator and the decision engine.
//!
//! - [`paths`] - Case-insensitive, trailing-slash-normalized path comparison
//! - [`return_url`] - Return URL encoding, base resolution and prefix check

pub mod paths;
pub mod return_url;
