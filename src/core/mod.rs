//! Core business logic modules.

pub mod collision;
pub mod convention;
pub mod executor;
pub mod planner;
pub mod report;
pub mod runner;
pub mod scanner;
pub mod sequencer;
