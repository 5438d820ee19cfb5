//! Sequence assignment.
//!
//! Computes a dense 1..N ordinal for every file under one of three strategies:
//! - by name: case-insensitive file name order
//! - by number: the number embedded in the file name, with collisions moved up
//! - by time: the capture timestamp, with ties kept in file name order
//!
//! Every strategy is all-or-nothing: when its prerequisites are not met no
//! ordinal is handed out. The only exception is force mode for the number
//! strategy, which rejects the mismatching files and ranks the rest.

use super::collision::CollisionResolver;
use super::convention::match_convention;
use crate::models::config::SortStrategy;
use crate::{Error, Result};
use std::collections::HashSet;

/// Ordinals assigned to a set of files, aligned with the input order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Ranking {
    /// Ordinal per input file; `None` for rejected files.
    pub ordinals: Vec<Option<u64>>,
    /// Indices of files excluded in force mode.
    pub rejected: Vec<usize>,
    /// Convention the number strategy ranked against.
    pub convention: Option<String>,
}

impl Ranking {
    /// Highest assigned ordinal.
    pub fn max_ordinal(&self) -> Option<u64> {
        self.ordinals.iter().flatten().copied().max()
    }

    /// Number of ranked files.
    pub fn ranked(&self) -> usize {
        self.ordinals.iter().flatten().count()
    }
}

/// Capture timestamps, aligned with the names passed to [`assign`].
pub type Timestamps = [Option<String>];

/// Assign ordinals with the chosen strategy.
pub fn assign(
    names: &[&str],
    strategy: SortStrategy,
    force: bool,
    timestamps: Option<&Timestamps>,
) -> Result<Ranking> {
    match strategy {
        SortStrategy::Name => Ok(rank_by_name(names)),
        SortStrategy::Number => rank_by_number(names, force),
        SortStrategy::Time => match timestamps {
            Some(ts) => rank_by_time(names, ts),
            None => Err(Error::MissingTimestamps(
                names.iter().map(|n| n.to_string()).collect(),
            )),
        },
    }
}

/// Indices of `names` in case-insensitive order, exact name as tie-break.
pub fn filename_order(names: &[&str]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..names.len()).collect();
    order.sort_by_cached_key(|&i| (names[i].to_lowercase(), names[i]));
    order
}

/// Rank by case-insensitive file name. Always succeeds.
pub fn rank_by_name(names: &[&str]) -> Ranking {
    let mut ordinals = vec![None; names.len()];
    for (rank, idx) in filename_order(names).into_iter().enumerate() {
        ordinals[idx] = Some(rank as u64 + 1);
    }
    Ranking {
        ordinals,
        ..Default::default()
    }
}

/// Rank by the number embedded in each file name.
pub fn rank_by_number(names: &[&str], force: bool) -> Result<Ranking> {
    let order = filename_order(names);
    let conventions: Vec<_> = names.iter().map(|n| match_convention(n)).collect();

    // The first matching file, in name order, fixes the convention.
    let reference = order.iter().find_map(|&i| conventions[i].as_ref());
    let Some(reference) = reference else {
        if force || names.is_empty() {
            return Ok(Ranking {
                ordinals: vec![None; names.len()],
                rejected: order,
                convention: None,
            });
        }
        return Err(Error::NoConvention(
            names.iter().map(|n| n.to_string()).collect(),
        ));
    };

    let mismatched: Vec<usize> = order
        .iter()
        .copied()
        .filter(|&i| {
            conventions[i]
                .as_ref()
                .map_or(true, |c| !c.same_convention(reference))
        })
        .collect();

    if !mismatched.is_empty() && !force {
        return Err(Error::ConventionMismatch {
            expected: reference.display_base.clone(),
            offenders: mismatched.iter().map(|&i| names[i].to_string()).collect(),
        });
    }

    let mut resolver = CollisionResolver::new();
    let mut keys: Vec<(u64, usize)> = Vec::with_capacity(names.len());
    for &idx in &order {
        if mismatched.contains(&idx) {
            continue;
        }
        if let Some(conv) = &conventions[idx] {
            let key = resolver.place(conv.number)?;
            if key != conv.number {
                tracing::debug!("{}: number {} taken, using {}", names[idx], conv.number, key);
            }
            keys.push((key, idx));
        }
    }
    keys.sort_unstable();

    let mut ordinals = vec![None; names.len()];
    for (rank, (_, idx)) in keys.into_iter().enumerate() {
        ordinals[idx] = Some(rank as u64 + 1);
    }

    Ok(Ranking {
        ordinals,
        rejected: mismatched,
        convention: Some(reference.display_base.clone()),
    })
}

/// Rank by capture timestamp.
///
/// Timestamps must share one fixed-width format so that string order is time
/// order. Equal timestamps get a `.<n>` suffix in file name order; the suffix is
/// zero-padded to the width of the batch size so it stays fixed-width too.
pub fn rank_by_time(names: &[&str], timestamps: &Timestamps) -> Result<Ranking> {
    let missing: Vec<String> = filename_order(names)
        .into_iter()
        .filter(|&i| timestamps.get(i).map_or(true, |t| t.is_none()))
        .map(|i| names[i].to_string())
        .collect();
    if !missing.is_empty() {
        return Err(Error::MissingTimestamps(missing));
    }

    let width = digit_count(names.len() as u64);
    let mut taken: HashSet<String> = HashSet::with_capacity(names.len());
    let mut keys: Vec<(String, usize)> = Vec::with_capacity(names.len());

    for idx in filename_order(names) {
        let Some(Some(stamp)) = timestamps.get(idx) else {
            continue;
        };
        let mut key = stamp.clone();
        let mut suffix = 0usize;
        while taken.contains(&key) {
            key = format!("{}.{:0width$}", stamp, suffix, width = width);
            suffix += 1;
        }
        taken.insert(key.clone());
        keys.push((key, idx));
    }
    keys.sort();

    let mut ordinals = vec![None; names.len()];
    for (rank, (_, idx)) in keys.into_iter().enumerate() {
        ordinals[idx] = Some(rank as u64 + 1);
    }

    Ok(Ranking {
        ordinals,
        ..Default::default()
    })
}

/// Remap assigned ordinals to a dense run starting at `origin`, keeping order.
pub fn compact(ranking: &mut Ranking, origin: u64) -> Result<()> {
    let mut assigned: Vec<(u64, usize)> = ranking
        .ordinals
        .iter()
        .enumerate()
        .filter_map(|(i, o)| o.map(|o| (o, i)))
        .collect();
    assigned.sort_unstable();

    for (offset, (_, idx)) in assigned.into_iter().enumerate() {
        let ordinal = origin
            .checked_add(offset as u64)
            .ok_or(Error::SequenceOverflow {
                ordinal: u64::MAX,
                max_digits: crate::models::config::MAX_SUPPORTED_DIGITS,
            })?;
        ranking.ordinals[idx] = Some(ordinal);
    }
    Ok(())
}

/// Fail when the highest ordinal needs more than `max_digits` digits.
pub fn check_width(ranking: &Ranking, max_digits: usize) -> Result<()> {
    match ranking.max_ordinal() {
        Some(max) if digit_count(max) > max_digits => Err(Error::SequenceOverflow {
            ordinal: max,
            max_digits,
        }),
        _ => Ok(()),
    }
}

/// Decimal digit count.
pub fn digit_count(n: u64) -> usize {
    n.checked_ilog10().map_or(1, |d| d as usize + 1)
}
