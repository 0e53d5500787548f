//! Selection policies.
//!
//! Each policy is a pure function of the roster and a [`Picker`]. The
//! picker is the only source of randomness, so swapping it (seeded RNG in
//! production, a scripted sequence in tests, a weighted picker later) never
//! changes the call sites.

use rand::Rng;
use rand::rngs::StdRng;

use crate::error::{RcResult, RollCallError};
use crate::roster::Roster;

/// Source of uniform indices.
pub trait Picker {
    /// Return an index in `0..len`. Callers never pass `len == 0`.
    fn pick_index(&mut self, len: usize) -> usize;
}

impl Picker for StdRng {
    fn pick_index(&mut self, len: usize) -> usize {
        self.random_range(0..len)
    }
}

/// A picker that replays a fixed list of indices, wrapping each one into range.
///
/// Once the script runs out it keeps returning index 0.
#[derive(Debug, Clone, Default)]
pub struct ScriptedPicker {
    script: Vec<usize>,
    next: usize,
}

impl ScriptedPicker {
    /// Create a picker that will return `script` in order.
    pub fn new(script: Vec<usize>) -> Self {
        Self { script, next: 0 }
    }

    /// Queue one more index at the end of the script.
    pub fn push(&mut self, index: usize) {
        self.script.push(index);
    }
}

impl Picker for ScriptedPicker {
    fn pick_index(&mut self, len: usize) -> usize {
        let index = self.script.get(self.next).copied().unwrap_or(0);
        self.next += 1;
        index % len
    }
}

/// The name under the round-robin cursor. The cursor wraps modulo roster length.
pub fn round_robin(roster: &Roster, cursor: usize) -> RcResult<&str> {
    if roster.is_empty() {
        return Err(RollCallError::EmptyRoster);
    }
    Ok(&roster.names()[cursor % roster.len()])
}

/// One uniformly random name.
pub fn single_draw<'r, P: Picker + ?Sized>(
    roster: &'r Roster,
    picker: &mut P,
) -> RcResult<&'r str> {
    if roster.is_empty() {
        return Err(RollCallError::EmptyRoster);
    }
    let index = picker.pick_index(roster.len());
    Ok(&roster.names()[index])
}

/// `count` uniformly random names, possibly repeated. Used for suspense frames.
pub fn sample_with_replacement<P: Picker + ?Sized>(
    roster: &Roster,
    count: usize,
    picker: &mut P,
) -> RcResult<Vec<String>> {
    if roster.is_empty() {
        return Err(RollCallError::EmptyRoster);
    }
    Ok((0..count)
        .map(|_| roster.names()[picker.pick_index(roster.len())].clone())
        .collect())
}

/// `count` distinct names in draw order.
///
/// Each step removes a uniformly random remaining candidate from a working
/// copy of the roster.
pub fn draw_without_replacement<P: Picker + ?Sized>(
    roster: &Roster,
    count: usize,
    picker: &mut P,
) -> RcResult<Vec<String>> {
    if roster.is_empty() {
        return Err(RollCallError::EmptyRoster);
    }
    if count > roster.len() {
        return Err(RollCallError::InsufficientCandidates {
            requested: count,
            available: roster.len(),
        });
    }

    let mut candidates = roster.names().to_vec();
    let mut picked = Vec::with_capacity(count);
    while picked.len() < count {
        let index = picker.pick_index(candidates.len());
        picked.push(candidates.remove(index));
    }
    Ok(picked)
}
