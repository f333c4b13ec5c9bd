//! Statistics Aggregator
//!
//! Per-subject attendance summary derived from a user's full record set.
//! Request-scoped; nothing here is persisted.

use std::collections::BTreeMap;

use shared::models::{AttendanceStatus, SubjectStat};

use crate::db::models::Attendance;

/// Group records by subject and count totals, attendances and cancellations.
///
/// Records without a subject are skipped with a warning. Subjects with no
/// counted classes are dropped. The result is sorted for display: highest
/// percentage first, subject name as the tiebreak.
pub fn compute_subject_stats(records: &[Attendance]) -> Vec<SubjectStat> {
    let mut by_subject: BTreeMap<&str, SubjectStat> = BTreeMap::new();

    for record in records {
        let subject = record.subject.trim();
        if subject.is_empty() {
            tracing::warn!(
                "Skipping attendance record without subject ({} {})",
                record.class_date,
                record.time_slot_key
            );
            continue;
        }

        let stat = by_subject.entry(subject).or_insert_with(|| SubjectStat {
            subject: subject.to_string(),
            total_classes: 0,
            attended_classes: 0,
            cancelled_classes: 0,
        });

        stat.total_classes += 1;
        match record.status {
            AttendanceStatus::Present => stat.attended_classes += 1,
            AttendanceStatus::Cancelled => stat.cancelled_classes += 1,
            AttendanceStatus::Absent => {}
        }
    }

    let mut stats: Vec<SubjectStat> = by_subject
        .into_values()
        .filter(|s| s.total_classes > 0)
        .collect();
    stats.sort_by(|a, b| {
        b.percentage()
            .cmp(&a.percentage())
            .then_with(|| a.subject.cmp(&b.subject))
    });
    stats
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use surrealdb::RecordId;

    fn record(subject: &str, status: AttendanceStatus) -> Attendance {
        Attendance {
            id: None,
            user: RecordId::from_table_key("user", "test"),
            class_date: "03-11-2025".to_string(),
            time_slot_key: "time_8_9_AM".to_string(),
            time_slot: "8-9 AM".to_string(),
            subject: subject.to_string(),
            status,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn counts_per_subject_with_cancelled_excluded_from_denominator() {
        use AttendanceStatus::*;
        let records = vec![
            record("Pathology", Present),
            record("Pathology", Present),
            record("Pathology", Absent),
            record("Pathology", Cancelled),
        ];
        let stats = compute_subject_stats(&records);
        assert_eq!(stats.len(), 1);
        let stat = &stats[0];
        assert_eq!(stat.total_classes, 4);
        assert_eq!(stat.attended_classes, 2);
        assert_eq!(stat.cancelled_classes, 1);
        assert_eq!(stat.percentage(), 67);
    }

    #[test]
    fn records_without_subject_are_skipped() {
        use AttendanceStatus::*;
        let records = vec![record("", Present), record("  ", Present), record("Surgery", Present)];
        let stats = compute_subject_stats(&records);
        assert_eq!(stats.len(), 1);
        assert_eq!(stats[0].subject, "Surgery");
    }

    #[test]
    fn sorted_descending_by_percentage() {
        use AttendanceStatus::*;
        let records = vec![
            record("Pharmacology", Present),
            record("Pharmacology", Absent),
            record("Microbiology", Present),
            record("Pathology", Absent),
        ];
        let stats = compute_subject_stats(&records);
        let order: Vec<&str> = stats.iter().map(|s| s.subject.as_str()).collect();
        assert_eq!(order, vec!["Microbiology", "Pharmacology", "Pathology"]);
    }

    #[test]
    fn attended_never_exceeds_countable_classes() {
        use AttendanceStatus::*;
        let records = vec![
            record("Pathology", Present),
            record("Pathology", Cancelled),
            record("Surgery", Present),
            record("Surgery", Present),
            record("Surgery", Absent),
        ];
        for stat in compute_subject_stats(&records) {
            assert!(stat.attended_classes <= stat.total_classes - stat.cancelled_classes);
        }
    }

    #[test]
    fn empty_input_yields_no_stats() {
        assert!(compute_subject_stats(&[]).is_empty());
    }
}
