//! Media Renamer Library
//!
//! Renames batches of photos and videos so that alphanumeric order matches
//! the intended order (by name, by embedded number, or by capture time).

pub mod cli;
pub mod core;
pub mod error;
pub mod models;
pub mod preflight;
pub mod services;
pub mod utils;

pub use error::{Error, Result};
