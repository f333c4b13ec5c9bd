//! Schedule Module
//!
//! Term configuration (timetable + rotation tables) and the group-aware
//! subject resolver built on top of it.

pub mod config;
pub mod resolver;
pub mod timetable;

use std::path::Path;

use shared::client::TimetableEntry;
use shared::models::Group;

use crate::utils::error::AppResult;
use config::ScheduleData;
use timetable::TimeSlot;

pub use config::{RotationPeriod, SglConfig, SglPeriod};
pub use timetable::DayRecord;

/// Loaded schedule data plus the resolution entry points the handlers use
#[derive(Debug, Clone)]
pub struct ScheduleService {
    data: ScheduleData,
}

impl ScheduleService {
    /// Load schedule configuration from a directory (built-in defaults
    /// cover any missing file)
    pub fn load(dir: &Path) -> AppResult<Self> {
        Ok(Self {
            data: ScheduleData::load(dir)?,
        })
    }

    /// Parse schedule configuration from raw JSON texts
    pub fn from_texts(postings: &str, sgl: &str, timetable: &str) -> AppResult<Self> {
        Ok(Self {
            data: ScheduleData::from_texts(postings, sgl, timetable)?,
        })
    }

    /// Display subject for one timetable cell, personalized by group
    pub fn resolve_subject(&self, topic: &str, date: &str, weekday: &str, group: Group) -> String {
        resolver::resolve_subject(&self.data, topic, date, weekday, group)
    }

    /// The full timetable flattened into per-slot entries for one group.
    ///
    /// Slots that resolve to a non-attendable label (free slots, holidays,
    /// unresolved rotation markers) are dropped, matching what the portal
    /// renders as markable sessions.
    pub fn personalized_timetable(&self, group: Group) -> Vec<TimetableEntry> {
        let mut entries = Vec::new();
        for day in &self.data.timetable {
            for slot in TimeSlot::ALL {
                let topic = day.topic(slot);
                let subject = self.resolve_subject(topic, &day.date, &day.day, group);
                if matches!(
                    subject.as_str(),
                    "N/A" | "CLINICS" | "SMALL GROUP LEARNING"
                ) || subject.contains("HOLIDAY")
                {
                    continue;
                }
                entries.push(TimetableEntry {
                    date: day.date.clone(),
                    day: day.day.clone(),
                    time_slot: slot.label().to_string(),
                    time_slot_key: slot.key().to_string(),
                    subject,
                    topic: topic.to_string(),
                });
            }
        }
        entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const POSTINGS: &str = r#"{"periods": [
        {"range": "01/11/2025 TO 20/11/2025",
         "departments": {"MEDICINE": "A", "SURGERY": "B", "OBG": "C"}}
    ]}"#;

    const SGL: &str = r#"{
        "assessment_dates": {},
        "periods": {
            "before_first_assessment": {
                "MONDAY": {"Pathology": "A", "Pharmacology": "C", "Microbiology": "B"}
            }
        }
    }"#;

    const TIMETABLE: &str = r#"{"timetable": [
        {"date": "03-11-2025", "day": "MONDAY",
         "time_8_9_AM": "PA 1.1: Cell Injury",
         "time_9_AM_12_Noon": "CLINICS",
         "time_1_2_PM": "SMALL GROUP LEARNING",
         "time_2_4_PM": ""},
        {"date": "09-11-2025", "day": "SUNDAY",
         "time_8_9_AM": "HOLIDAY", "time_9_AM_12_Noon": "HOLIDAY",
         "time_1_2_PM": "HOLIDAY", "time_2_4_PM": "HOLIDAY"}
    ]}"#;

    fn service() -> ScheduleService {
        ScheduleService::from_texts(POSTINGS, SGL, TIMETABLE).unwrap()
    }

    #[test]
    fn personalized_timetable_resolves_rotations_per_group() {
        let entries = service().personalized_timetable(Group::A);
        let subjects: Vec<&str> = entries.iter().map(|e| e.subject.as_str()).collect();
        assert_eq!(
            subjects,
            vec!["Pathology", "MEDICINE CLINIC", "Pathology (SGL)"]
        );
        assert_eq!(entries[1].time_slot_key, "time_9_AM_12_Noon");
        assert_eq!(entries[1].time_slot, "9 AM-12 Noon");
    }

    #[test]
    fn holidays_and_free_slots_are_not_markable() {
        let entries = service().personalized_timetable(Group::B);
        assert!(entries.iter().all(|e| e.date != "09-11-2025"));
        assert!(entries.iter().all(|e| !e.subject.contains("HOLIDAY")));
    }
}
