//! Group-aware subject resolution
//!
//! Maps one raw timetable cell (topic text, class date, weekday) plus the
//! student's group letter to the display subject name. Pure over its inputs
//! and the loaded schedule data: identical inputs always resolve to the
//! same label, and every input resolves to something.

use shared::models::Group;

use super::config::ScheduleData;
use crate::utils::time::parse_day_date;

/// Ordered subject classification rules, evaluated top to bottom
///
/// `code` matches the leading abbreviation token of lecture entries
/// ("PA 1.1: ..."); `aliases` are substrings that identify the subject when
/// it is written out in full.
struct SubjectRule {
    code: &'static str,
    canonical: &'static str,
    aliases: &'static [&'static str],
}

const SUBJECT_RULES: &[SubjectRule] = &[
    SubjectRule {
        code: "IM",
        canonical: "Internal Medicine",
        aliases: &["Internal Medicine"],
    },
    SubjectRule {
        code: "MI",
        canonical: "Microbiology",
        aliases: &["Microbiology"],
    },
    SubjectRule {
        code: "PH",
        canonical: "Pharmacology",
        aliases: &["Pharmacology"],
    },
    SubjectRule {
        code: "PA",
        canonical: "Pathology",
        aliases: &["Pathology"],
    },
    SubjectRule {
        code: "SU",
        canonical: "Surgery",
        aliases: &["Surgery"],
    },
    SubjectRule {
        code: "FM",
        canonical: "Forensic Medicine",
        aliases: &["Forensic Medicine"],
    },
    SubjectRule {
        code: "OG",
        canonical: "Obstetrics & Gynecology",
        aliases: &["Obstetrics", "Gynaecology", "Gynecology"],
    },
    SubjectRule {
        code: "CM",
        canonical: "Community Medicine",
        aliases: &["Community Medicine"],
    },
];

/// Resolve the display subject for one timetable cell.
///
/// Priority order, first match wins: holiday/empty, clinical posting
/// rotation, SGL rotation, fixed special activities, subject rules,
/// first-token fallback. Rotation lookups that find no entry for the
/// caller's group degrade to the generic marker rather than failing.
pub fn resolve_subject(
    schedule: &ScheduleData,
    topic: &str,
    date: &str,
    weekday: &str,
    group: Group,
) -> String {
    if topic.is_empty() {
        return "N/A".to_string();
    }
    if topic.contains("HOLIDAY") {
        return topic.to_string();
    }

    if topic.contains("CLINICS") {
        if let Some(period) = parse_day_date(date).and_then(|d| schedule.clinical_period_for(d)) {
            if let Some(department) = period.department_for(group) {
                return format!("{} CLINIC", department);
            }
        }
        return "CLINICS".to_string();
    }

    if topic.contains("SMALL GROUP LEARNING") {
        let period = schedule.sgl.period_for(parse_day_date(date));
        if let Some(subject) = schedule.sgl.subject_for(period, weekday, group) {
            return format!("{} (SGL)", subject);
        }
        return "SMALL GROUP LEARNING".to_string();
    }

    // Group-independent special activities
    if topic.contains("FAMILY ADOPTION PROGRAMME") {
        return "FAMILY ADOPTION PROGRAMME".to_string();
    }
    if topic.contains("SDL") {
        return "Self-Directed Learning (SDL)".to_string();
    }
    if topic.contains("AETCOM") {
        return "AETCOM".to_string();
    }

    let tokens: Vec<&str> = topic
        .split(|c: char| c.is_whitespace() || c == '.' || c == ':')
        .filter(|t| !t.is_empty())
        .collect();
    let prefix = tokens.first().map(|t| t.to_uppercase()).unwrap_or_default();
    let two_tokens = match tokens.get(..2) {
        Some(pair) => pair.join(" ").to_uppercase(),
        None => String::new(),
    };

    for rule in SUBJECT_RULES {
        if prefix == rule.code
            || (!two_tokens.is_empty() && two_tokens == rule.canonical.to_uppercase())
            || rule.aliases.iter().any(|alias| topic.contains(alias))
        {
            return rule.canonical.to_string();
        }
    }

    // Fallback: first token, digits stripped
    match tokens.first() {
        Some(token) => {
            let stripped: String = token.chars().filter(|c| !c.is_ascii_digit()).collect();
            if stripped.is_empty() {
                "Class/Activity".to_string()
            } else {
                stripped
            }
        }
        None => "Class/Activity".to_string(),
    }
}
