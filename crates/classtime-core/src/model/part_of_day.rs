//! Parts of the day in which course offerings may be scheduled.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ParseError;

/// Coarse daily bands used to restrict where a course may be placed.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum PartOfDay {
    Morning = 0,
    Afternoon = 1,
    Night = 2,
}

impl PartOfDay {
    /// Parses a part-of-day token into the set of parts it denotes.
    ///
    /// Recognized tokens (case and surrounding whitespace insensitive):
    ///
    /// - `morning`, `manhã`, `manha`, `m` -> {Morning}
    /// - `afternoon`, `tarde`, `t`, `a` -> {Afternoon}
    /// - `night`, `noite`, `n` -> {Night}
    /// - `integral`, `i` -> {Morning, Afternoon}
    pub fn set_from_token(token: &str) -> Result<BTreeSet<PartOfDay>, ParseError> {
        let set = match token.trim().to_lowercase().as_str() {
            "morning" | "manhã" | "manha" | "m" => [PartOfDay::Morning].into(),
            "afternoon" | "tarde" | "t" | "a" => [PartOfDay::Afternoon].into(),
            "night" | "noite" | "n" => [PartOfDay::Night].into(),
            "integral" | "i" => [PartOfDay::Morning, PartOfDay::Afternoon].into(),
            _ => return Err(ParseError::InvalidPartOfDay(token.trim().to_string())),
        };
        Ok(set)
    }
}

impl fmt::Display for PartOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PartOfDay::Morning => "morning",
            PartOfDay::Afternoon => "afternoon",
            PartOfDay::Night => "night",
        };
        f.write_str(name)
    }
}
