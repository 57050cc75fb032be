//! Time-of-day constraints attached to tasks.
//!
//! A constraint is submitted as free text and parsed once, at validation
//! time, into a [`ConstraintKind`]. Keywords are matched exactly on the
//! lower-cased text; otherwise the text is searched for an `after:` marker,
//! then a `before:` marker. Anything else is kept verbatim and accepts every
//! start time.
//!
//! | text            | accepted start times        |
//! |-----------------|-----------------------------|
//! | `morning`       | before 12:00                |
//! | `afternoon`     | 12:00 up to (not incl.) 17:00 |
//! | `evening`       | 16:30 onwards               |
//! | `after:HH:MM`   | at or after HH:MM           |
//! | `before:HH:MM`  | strictly before HH:MM       |
//!
//! `afternoon` and `evening` overlap between 16:30 and 17:00.

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::clock::parse_hhmm;
use crate::error::ValidationError;

const AFTER_MARKER: &str = "after:";
const BEFORE_MARKER: &str = "before:";

fn clock(hour: u32, minute: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, minute, 0).unwrap_or(NaiveTime::MIN)
}

/// Parsed form of a constraint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "at")]
pub enum ConstraintKind {
    Morning,
    Afternoon,
    Evening,
    After(NaiveTime),
    Before(NaiveTime),
    /// Unrecognized text; never restricts placement.
    Unrestricted,
}

impl ConstraintKind {
    /// Whether a block may start at `at`.
    pub fn accepts(&self, at: NaiveTime) -> bool {
        match *self {
            ConstraintKind::Morning => at < clock(12, 0),
            ConstraintKind::Afternoon => clock(12, 0) <= at && at < clock(17, 0),
            ConstraintKind::Evening => at >= clock(16, 30),
            ConstraintKind::After(limit) => at >= limit,
            ConstraintKind::Before(limit) => at < limit,
            ConstraintKind::Unrestricted => true,
        }
    }
}

/// A task constraint: the submitted text plus its parsed kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Constraint {
    raw: String,
    kind: ConstraintKind,
}

impl Constraint {
    /// Parse constraint text.
    ///
    /// Fails only when an `after:`/`before:` payload is not a valid `HH:MM`.
    /// The returned error uses the field name `constraint`.
    pub fn parse(text: &str) -> Result<Self, ValidationError> {
        let lowered = text.to_lowercase();
        let kind = match lowered.as_str() {
            "morning" => ConstraintKind::Morning,
            "afternoon" => ConstraintKind::Afternoon,
            "evening" => ConstraintKind::Evening,
            other => {
                if let Some(payload) = payload_after(other, AFTER_MARKER) {
                    ConstraintKind::After(parse_payload(text, payload)?)
                } else if let Some(payload) = payload_after(other, BEFORE_MARKER) {
                    ConstraintKind::Before(parse_payload(text, payload)?)
                } else {
                    ConstraintKind::Unrestricted
                }
            }
        };

        Ok(Self {
            raw: text.to_string(),
            kind,
        })
    }

    /// The text as submitted (original casing).
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn kind(&self) -> ConstraintKind {
        self.kind
    }

    pub fn accepts(&self, at: NaiveTime) -> bool {
        self.kind.accepts(at)
    }
}

impl fmt::Display for Constraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

/// Evaluate an optional constraint; no constraint accepts every time.
pub fn fits_constraint(at: NaiveTime, constraint: Option<&Constraint>) -> bool {
    constraint.map_or(true, |c| c.accepts(at))
}

/// Text between the first occurrence of `marker` and the next one (if any).
fn payload_after<'a>(text: &'a str, marker: &str) -> Option<&'a str> {
    let start = text.find(marker)? + marker.len();
    let rest = &text[start..];
    Some(rest.find(marker).map_or(rest, |end| &rest[..end]))
}

fn parse_payload(raw: &str, payload: &str) -> Result<NaiveTime, ValidationError> {
    parse_hhmm(payload).ok_or_else(|| ValidationError::InvalidConstraint {
        field: "constraint".to_string(),
        value: raw.to_string(),
        message: format!("'{payload}' is not a valid HH:MM clock time"),
    })
}
