//! Collision resolution for embedded numbers.
//!
//! When two files claim the same number, the one placed first keeps it and the
//! later one moves up to the next free key. Callers feed files in
//! case-insensitive name order, so the alphanumerically earlier name always
//! ends up with the lower key.

use crate::{Error, Result};
use std::collections::HashSet;

/// Occupancy map of numeric keys.
#[derive(Debug, Default)]
pub struct CollisionResolver {
    occupied: HashSet<u64>,
}

impl CollisionResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Place a key, bumping it by one until a free slot is found.
    pub fn place(&mut self, key: u64) -> Result<u64> {
        let mut key = key;
        while self.occupied.contains(&key) {
            key = key.checked_add(1).ok_or(Error::SequenceOverflow {
                ordinal: u64::MAX,
                max_digits: crate::models::config::MAX_SUPPORTED_DIGITS,
            })?;
        }
        self.occupied.insert(key);
        Ok(key)
    }
}
