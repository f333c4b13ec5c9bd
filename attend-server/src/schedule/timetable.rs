//! Academic timetable data
//!
//! The timetable is a static ordered list of day records loaded once at
//! startup. Each day carries the raw topic text for the four fixed slots.

use serde::Deserialize;

/// The four fixed daily time windows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeSlot {
    Morning8To9,
    Morning9To12,
    Afternoon1To2,
    Afternoon2To4,
}

impl TimeSlot {
    pub const ALL: [TimeSlot; 4] = [
        TimeSlot::Morning8To9,
        TimeSlot::Morning9To12,
        TimeSlot::Afternoon1To2,
        TimeSlot::Afternoon2To4,
    ];

    /// Stable key used in API payloads and record addressing
    pub fn key(&self) -> &'static str {
        match self {
            TimeSlot::Morning8To9 => "time_8_9_AM",
            TimeSlot::Morning9To12 => "time_9_AM_12_Noon",
            TimeSlot::Afternoon1To2 => "time_1_2_PM",
            TimeSlot::Afternoon2To4 => "time_2_4_PM",
        }
    }

    /// Human-readable label shown in the timetable
    pub fn label(&self) -> &'static str {
        match self {
            TimeSlot::Morning8To9 => "8-9 AM",
            TimeSlot::Morning9To12 => "9 AM-12 Noon",
            TimeSlot::Afternoon1To2 => "1-2 PM",
            TimeSlot::Afternoon2To4 => "2-4 PM",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|slot| slot.key() == key)
    }
}

/// One timetable day as stored in `academic_timetable.json`
///
/// Dates use the portal's DD-MM-YYYY convention; the weekday name is stored
/// alongside rather than derived so the data stays a verbatim copy of the
/// published schedule.
#[derive(Debug, Clone, Deserialize)]
pub struct DayRecord {
    pub date: String,
    pub day: String,
    #[serde(rename = "time_8_9_AM", default)]
    pub time_8_9_am: String,
    #[serde(rename = "time_9_AM_12_Noon", default)]
    pub time_9_am_12_noon: String,
    #[serde(rename = "time_1_2_PM", default)]
    pub time_1_2_pm: String,
    #[serde(rename = "time_2_4_PM", default)]
    pub time_2_4_pm: String,
}

impl DayRecord {
    /// Raw topic text for one slot
    pub fn topic(&self, slot: TimeSlot) -> &str {
        match slot {
            TimeSlot::Morning8To9 => &self.time_8_9_am,
            TimeSlot::Morning9To12 => &self.time_9_am_12_noon,
            TimeSlot::Afternoon1To2 => &self.time_1_2_pm,
            TimeSlot::Afternoon2To4 => &self.time_2_4_pm,
        }
    }
}

/// Wrapper matching the JSON file layout
#[derive(Debug, Clone, Deserialize)]
pub struct TimetableFile {
    pub timetable: Vec<DayRecord>,
}
