//! Shared helpers for Escalier unit and integration tests.

pub mod logging;
