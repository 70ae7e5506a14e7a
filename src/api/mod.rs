//! API Module
//!
//! The interactive surface over the pipeline.
//!
//! Structure:
//! - commands.rs: field table and line parsing
//! - form.rs: terminal session (render, read, trigger)

pub mod commands;
pub mod form;

pub use commands::{FieldSpec, FieldValue, FormCommand, FormInputError, FIELDS};
pub use form::{run, FormError};
