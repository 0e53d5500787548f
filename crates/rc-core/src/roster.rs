//! The class roster: an ordered set of unique names plus per-name weights.
//!
//! Roster order is stable and is the order the round-robin cursor walks.
//! Weights are advisory metadata. They are initialised to 1 for every name
//! that enters the roster and are never consulted by a selection policy.

use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};
use strsim::jaro_winkler;

use crate::error::{RcResult, RollCallError};

/// Minimum similarity score for fuzzy name matching (0.0-1.0).
const FUZZY_THRESHOLD: f64 = 0.8;

/// Default weight given to a name the first time it is seen.
pub const DEFAULT_WEIGHT: f64 = 1.0;

/// The ordered list of participants and their weights.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Roster {
    names: Vec<String>,
    weights: BTreeMap<String, f64>,
}

impl Roster {
    /// Create an empty roster.
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a roster from persisted parts.
    ///
    /// Names are normalised the same way [`Roster::set`] does, so a hand-edited
    /// file with duplicates or blank lines still yields a valid roster.
    pub fn from_parts(names: Vec<String>, weights: BTreeMap<String, f64>) -> Self {
        let mut roster = Self {
            names: Vec::new(),
            weights,
        };
        roster.set(names);
        roster
    }

    /// Replace the roster wholesale.
    ///
    /// Trims every entry, drops empty ones and keeps the first occurrence of
    /// each name. Weights of names that leave the roster are kept.
    /// Returns the new roster size.
    pub fn set<I, S>(&mut self, names: I) -> usize
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut seen = HashSet::new();
        self.names = names
            .into_iter()
            .map(|n| n.as_ref().trim().to_string())
            .filter(|n| !n.is_empty())
            .filter(|n| seen.insert(n.clone()))
            .collect();

        for name in &self.names {
            self.weights.entry(name.clone()).or_insert(DEFAULT_WEIGHT);
        }
        self.names.len()
    }

    /// Append names to the end of the roster. Returns how many were new.
    pub fn add<I, S>(&mut self, names: I) -> usize
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let before = self.names.len();
        let combined: Vec<String> = self
            .names
            .iter()
            .cloned()
            .chain(names.into_iter().map(|n| n.as_ref().to_string()))
            .collect();
        self.set(combined) - before
    }

    /// Remove every name and every weight.
    pub fn clear(&mut self) {
        self.names.clear();
        self.weights.clear();
    }

    /// Names in roster order.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Name at the given position, if any.
    pub fn get(&self, index: usize) -> Option<&str> {
        self.names.get(index).map(String::as_str)
    }

    /// Number of participants.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Whether the roster has no participants.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Whether the exact name is on the roster.
    pub fn contains(&self, name: &str) -> bool {
        self.names.iter().any(|n| n == name)
    }

    /// The weight recorded for a name, including stale entries.
    pub fn weight(&self, name: &str) -> Option<f64> {
        self.weights.get(name).copied()
    }

    /// All recorded weights, including names no longer on the roster.
    pub fn weights(&self) -> &BTreeMap<String, f64> {
        &self.weights
    }

    /// Resolve typed input to a roster name.
    ///
    /// Tries an exact match, then a case-insensitive one, then the closest
    /// Jaro-Winkler match above the fuzzy threshold.
    pub fn resolve(&self, input: &str) -> RcResult<&str> {
        let input = input.trim();
        if let Some(name) = self.names.iter().find(|n| *n == input) {
            return Ok(name.as_str());
        }

        let lower = input.to_lowercase();
        if let Some(name) = self.names.iter().find(|n| n.to_lowercase() == lower) {
            return Ok(name.as_str());
        }

        let best = self
            .names
            .iter()
            .map(|n| (n, jaro_winkler(&n.to_lowercase(), &lower)))
            .max_by(|a, b| a.1.total_cmp(&b.1));

        match best {
            Some((name, score)) if score >= FUZZY_THRESHOLD && input.chars().count() > 2 => {
                Ok(name.as_str())
            }
            Some((name, score)) if score >= FUZZY_THRESHOLD / 2.0 => {
                Err(RollCallError::UnknownParticipant {
                    name: input.to_string(),
                    suggestion: Some(name.clone()),
                })
            }
            _ => Err(RollCallError::UnknownParticipant {
                name: input.to_string(),
                suggestion: None,
            }),
        }
    }
}

/// Split pasted or imported roster text into candidate lines.
///
/// Handles both `\n` and `\r\n` line endings. Normalisation (trim, dedup)
/// happens in [`Roster::set`].
pub fn parse_roster_text(text: &str) -> Vec<String> {
    text.lines().map(str::to_string).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_trims_dedups_and_drops_empty() {
        let mut r = Roster::new();
        let n = r.set(["x", "x", " y ", "", "y"]);
        assert_eq!(n, 2);
        assert_eq!(r.names(), ["x", "y"]);
    }

    #[test]
    fn set_replaces_wholesale() {
        let mut r = Roster::new();
        r.set(["Amy", "Bo"]);
        r.set(["Cy"]);
        assert_eq!(r.names(), ["Cy"]);
    }

    #[test]
    fn weights_default_to_one_and_go_stale() {
        let mut r = Roster::new();
        r.set(["Amy", "Bo"]);
        assert_eq!(r.weight("Amy"), Some(1.0));

        r.set(["Cy"]);
        assert!(!r.contains("Amy"));
        assert_eq!(r.weight("Amy"), Some(1.0));
        assert_eq!(r.weights().len(), 3);
    }

    #[test]
    fn existing_weight_is_not_overwritten() {
        let mut weights = BTreeMap::new();
        weights.insert("Amy".to_string(), 2.5);
        let r = Roster::from_parts(vec!["Amy".into(), "Bo".into()], weights);
        assert_eq!(r.weight("Amy"), Some(2.5));
        assert_eq!(r.weight("Bo"), Some(1.0));
    }

    #[test]
    fn clear_drops_names_and_weights() {
        let mut r = Roster::new();
        r.set(["Amy"]);
        r.clear();
        assert!(r.is_empty());
        assert!(r.weights().is_empty());
    }

    #[test]
    fn add_appends_only_new_names() {
        let mut r = Roster::new();
        r.set(["Amy", "Bo"]);
        let added = r.add(["Bo", "Cy", " Dee "]);
        assert_eq!(added, 2);
        assert_eq!(r.names(), ["Amy", "Bo", "Cy", "Dee"]);
    }

    #[test]
    fn parse_text_handles_crlf() {
        let lines = parse_roster_text("Amy\r\nBo\n\nCy");
        let mut r = Roster::new();
        r.set(lines);
        assert_eq!(r.names(), ["Amy", "Bo", "Cy"]);
    }

    #[test]
    fn resolve_exact_and_case_insensitive() {
        let mut r = Roster::new();
        r.set(["Amy", "Bo"]);
        assert_eq!(r.resolve("Amy").unwrap(), "Amy");
        assert_eq!(r.resolve("  bo ").unwrap(), "Bo");
    }

    #[test]
    fn resolve_fuzzy() {
        let mut r = Roster::new();
        r.set(["Jonathan", "Bo"]);
        assert_eq!(r.resolve("Jonathon").unwrap(), "Jonathan");
    }

    #[test]
    fn resolve_unknown() {
        let mut r = Roster::new();
        r.set(["Amy"]);
        let err = r.resolve("Zzzzzz").unwrap_err();
        assert!(matches!(err, RollCallError::UnknownParticipant { .. }));
    }

    #[test]
    fn resolve_on_empty_roster() {
        let r = Roster::new();
        assert_eq!(
            r.resolve("Amy").unwrap_err(),
            RollCallError::UnknownParticipant {
                name: "Amy".into(),
                suggestion: None,
            }
        );
    }

    #[test]
    fn round_trip_serde() {
        let mut r = Roster::new();
        r.set(["Amy", "Bo"]);
        let json = serde_json::to_string(&r).unwrap();
        let r2: Roster = serde_json::from_str(&json).unwrap();
        assert_eq!(r, r2);
    }
}
