//! Task types for day planning.
//!
//! A [`Task`] is the validated, immutable form of a submitted task: a
//! non-empty name, a positive duration in hours, a [`Priority`] and an
//! optional [`Constraint`].

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::clock::format_hours;
use crate::constraint::Constraint;

/// Task priority.
///
/// Ordering follows the planner's rank: `High` sorts first.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Priority {
    /// Sort rank: high = 0, medium = 1, low = 2.
    pub fn rank(&self) -> u8 {
        match self {
            Priority::High => 0,
            Priority::Medium => 1,
            Priority::Low => 2,
        }
    }
}

impl Default for Priority {
    fn default() -> Self {
        Priority::Medium
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Priority::High => write!(f, "high"),
            Priority::Medium => write!(f, "medium"),
            Priority::Low => write!(f, "low"),
        }
    }
}

/// Error returned when a priority string is not low/medium/high.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsePriorityError(pub String);

impl fmt::Display for ParsePriorityError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown priority: {}", self.0)
    }
}

impl std::error::Error for ParsePriorityError {}

impl FromStr for Priority {
    type Err = ParsePriorityError;

    /// Exact, lower-case match.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "high" => Ok(Priority::High),
            "medium" => Ok(Priority::Medium),
            "low" => Ok(Priority::Low),
            other => Err(ParsePriorityError(other.to_string())),
        }
    }
}

/// A validated task ready for planning.
#[derive(Debug, Clone, PartialEq)]
pub struct Task {
    pub name: String,
    /// Duration in hours.
    pub duration: f64,
    pub priority: Priority,
    pub constraint: Option<Constraint>,
}

impl Task {
    pub fn new(name: impl Into<String>, duration: f64) -> Self {
        Self {
            name: name.into(),
            duration,
            priority: Priority::default(),
            constraint: None,
        }
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_constraint(mut self, constraint: Constraint) -> Self {
        self.constraint = Some(constraint);
        self
    }

    /// Whether the task carries any constraint text (recognized or not).
    pub fn is_constrained(&self) -> bool {
        self.constraint.is_some()
    }

    /// Label used on the task's block and checklist entry.
    pub fn title(&self) -> String {
        title_case(&self.name)
    }

    /// Worked minutes credited toward the next break (truncated).
    pub fn worked_minutes(&self) -> i64 {
        (self.duration * 60.0) as i64
    }

    /// Unchecked checklist line, e.g. `[ ] Write Report (2.0h)`.
    pub fn checklist_entry(&self) -> String {
        format!("[ ] {} ({}h)", self.title(), format_hours(self.duration))
    }
}

/// Title-case a name: a letter is upper-cased when it follows a non-letter
/// (or starts the text) and lower-cased otherwise.
///
/// `write report` -> `Write Report`, `e-mail BOB` -> `E-Mail Bob`.
pub fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut prev_is_letter = false;
    for ch in text.chars() {
        if ch.is_alphabetic() {
            if prev_is_letter {
                out.extend(ch.to_lowercase());
            } else {
                out.extend(ch.to_uppercase());
            }
            prev_is_letter = true;
        } else {
            out.push(ch);
            prev_is_letter = false;
        }
    }
    out
}
