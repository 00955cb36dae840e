//! Fuzzy replacement of model-produced text fragments in file content.
//!
//! The driver tries a cascade of matching strategies against the file,
//! the edit operation wraps the driver with diff display, confirmation,
//! and persistence.

pub mod confirm;
pub mod diff;
pub mod driver;
pub mod operation;
pub mod replacer;
