//! Helpers shared by the backend's unit and integration tests.

pub mod logging;
pub mod unique_helpers;
