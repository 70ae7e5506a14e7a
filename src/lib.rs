//! Fire Type Classifier
//!
//! MODIS fire-pixel readings → standardized features → pre-trained
//! classifier → fire type label. The pipeline lives in `logic` and has no
//! knowledge of the terminal form in `api`.

pub mod api;
pub mod constants;
pub mod error;
pub mod logic;

pub use error::{ClassifierError, Result};
