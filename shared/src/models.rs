//! Domain enums and derived statistics types

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Parse error for domain enums
#[derive(Debug, Error)]
#[error("invalid {kind}: '{value}'")]
pub struct ParseEnumError {
    pub kind: &'static str,
    pub value: String,
}

/// Student cohort label determining which rotation slot applies
///
/// Stored on the user profile; `None` until the student picks one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Group {
    A,
    B,
    C,
}

impl Group {
    pub fn as_str(&self) -> &'static str {
        match self {
            Group::A => "A",
            Group::B => "B",
            Group::C => "C",
        }
    }
}

impl fmt::Display for Group {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Group {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "A" => Ok(Group::A),
            "B" => Ok(Group::B),
            "C" => Ok(Group::C),
            other => Err(ParseEnumError {
                kind: "group",
                value: other.to_string(),
            }),
        }
    }
}

/// Terminal attendance status for a class session
///
/// The UI also shows "Future" / "Pending" availability states, but those are
/// computed client-side and never persisted; the store only admits these
/// three values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AttendanceStatus {
    Present,
    Absent,
    Cancelled,
}

impl AttendanceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AttendanceStatus::Present => "Present",
            AttendanceStatus::Absent => "Absent",
            AttendanceStatus::Cancelled => "Cancelled",
        }
    }
}

impl fmt::Display for AttendanceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for AttendanceStatus {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Present" => Ok(AttendanceStatus::Present),
            "Absent" => Ok(AttendanceStatus::Absent),
            "Cancelled" => Ok(AttendanceStatus::Cancelled),
            other => Err(ParseEnumError {
                kind: "attendance status",
                value: other.to_string(),
            }),
        }
    }
}

/// Per-subject attendance summary, derived per request and never persisted
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubjectStat {
    pub subject: String,
    pub total_classes: u32,
    pub attended_classes: u32,
    pub cancelled_classes: u32,
}

impl SubjectStat {
    /// Attendance percentage with cancelled sessions excluded from the
    /// denominator; 0 when every counted session was cancelled.
    pub fn percentage(&self) -> u32 {
        let denominator = self.total_classes - self.cancelled_classes;
        if denominator == 0 {
            return 0;
        }
        ((self.attended_classes as f64 / denominator as f64) * 100.0).round() as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_round_trips_through_strings() {
        for status in [
            AttendanceStatus::Present,
            AttendanceStatus::Absent,
            AttendanceStatus::Cancelled,
        ] {
            assert_eq!(status.as_str().parse::<AttendanceStatus>().unwrap(), status);
        }
        assert!("Future".parse::<AttendanceStatus>().is_err());
    }

    #[test]
    fn percentage_excludes_cancelled_from_denominator() {
        let stat = SubjectStat {
            subject: "Pathology".to_string(),
            total_classes: 4,
            attended_classes: 2,
            cancelled_classes: 1,
        };
        assert_eq!(stat.percentage(), 67);
    }

    #[test]
    fn percentage_is_zero_when_all_cancelled() {
        let stat = SubjectStat {
            subject: "Surgery".to_string(),
            total_classes: 2,
            attended_classes: 0,
            cancelled_classes: 2,
        };
        assert_eq!(stat.percentage(), 0);
    }
}
