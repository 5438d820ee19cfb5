//! Data models.

pub mod config;
pub mod entry;
pub mod plan;
pub mod report;
