//! Rotation configuration files
//!
//! 轮转表属于按学期版本化的配置数据, 不允许硬编码在代码里:
//! 服务启动时从配置目录加载 JSON 文件, 缺失时回退到内置的默认数据.
//!
//! Three files make up a term's schedule data:
//! - `clinical_postings.json`: ordered clinical-posting periods, each a date
//!   range plus a department→group assignment
//! - `sgl_schedules.json`: assessment-date boundaries plus, per period, a
//!   weekday → (subject → group) table
//! - `academic_timetable.json`: the day-by-day class timetable

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use chrono::NaiveDate;
use serde::Deserialize;
use shared::models::Group;

use crate::utils::error::{AppError, AppResult};
use crate::utils::time::{parse_date_range, parse_day_date};

use super::timetable::{DayRecord, TimetableFile};

pub const CLINICAL_POSTINGS_FILE: &str = "clinical_postings.json";
pub const SGL_SCHEDULES_FILE: &str = "sgl_schedules.json";
pub const TIMETABLE_FILE: &str = "academic_timetable.json";

// Built-in defaults for the current academic term
const DEFAULT_CLINICAL_POSTINGS: &str = include_str!("../../config/clinical_postings.json");
const DEFAULT_SGL_SCHEDULES: &str = include_str!("../../config/sgl_schedules.json");
const DEFAULT_TIMETABLE: &str = include_str!("../../config/academic_timetable.json");

/// One clinical-posting rotation window
///
/// The range is inclusive on both ends; `range` keeps the original
/// "DD/MM/YYYY TO DD/MM/YYYY" text for logs and debugging.
#[derive(Debug, Clone)]
pub struct RotationPeriod {
    pub range: String,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub departments: BTreeMap<String, Group>,
}

impl RotationPeriod {
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }

    /// Department assigned to `group` in this window, if any
    pub fn department_for(&self, group: Group) -> Option<&str> {
        self.departments
            .iter()
            .find(|(_, g)| **g == group)
            .map(|(dept, _)| dept.as_str())
    }
}

/// SGL period bucket relative to the assessment-date boundaries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SglPeriod {
    BeforeFirstAssessment,
    FirstToSecondAssessment,
    SecondToThirdAssessment,
}

impl SglPeriod {
    /// Key under `periods` in `sgl_schedules.json`
    pub fn as_key(&self) -> &'static str {
        match self {
            SglPeriod::BeforeFirstAssessment => "before_first_assessment",
            SglPeriod::FirstToSecondAssessment => "first_to_second_assessment",
            SglPeriod::SecondToThirdAssessment => "second_to_third_assessment",
        }
    }
}

/// weekday name (upper case) → subject → group
pub type WeekdayTable = BTreeMap<String, BTreeMap<String, Group>>;

#[derive(Debug, Clone, Deserialize, Default)]
pub struct AssessmentDates {
    #[serde(default)]
    pub first: Option<String>,
    #[serde(default)]
    pub second: Option<String>,
    #[serde(default)]
    pub third: Option<String>,
}

/// Parsed SGL schedule configuration
#[derive(Debug, Clone)]
pub struct SglConfig {
    first_assessment: Option<NaiveDate>,
    second_assessment: Option<NaiveDate>,
    periods: BTreeMap<String, WeekdayTable>,
}

impl SglConfig {
    /// Which SGL bucket a class date falls into.
    ///
    /// Boundaries are half-open: a date on an assessment day already counts
    /// toward the following bucket. The third assessment date only documents
    /// the end of term, so every date past the second boundary stays in the
    /// second-to-third bucket. Unparseable dates and unset boundaries fall
    /// back to the first bucket.
    pub fn period_for(&self, date: Option<NaiveDate>) -> SglPeriod {
        let Some(date) = date else {
            return SglPeriod::BeforeFirstAssessment;
        };
        match (self.first_assessment, self.second_assessment) {
            (Some(first), _) if date < first => SglPeriod::BeforeFirstAssessment,
            (Some(_), Some(second)) if date < second => SglPeriod::FirstToSecondAssessment,
            (Some(_), Some(_)) => SglPeriod::SecondToThirdAssessment,
            (Some(_), None) => SglPeriod::FirstToSecondAssessment,
            (None, _) => SglPeriod::BeforeFirstAssessment,
        }
    }

    /// Subject assigned to `group` on `weekday` within `period`, if any
    pub fn subject_for(&self, period: SglPeriod, weekday: &str, group: Group) -> Option<&str> {
        let day_schedule = self
            .periods
            .get(period.as_key())?
            .get(weekday.to_uppercase().as_str())?;
        day_schedule
            .iter()
            .find(|(_, g)| **g == group)
            .map(|(subject, _)| subject.as_str())
    }
}

#[derive(Debug, Deserialize)]
struct ClinicalPostingsFile {
    periods: Vec<RawRotationPeriod>,
}

#[derive(Debug, Deserialize)]
struct RawRotationPeriod {
    range: String,
    departments: BTreeMap<String, Group>,
}

#[derive(Debug, Deserialize)]
struct SglFile {
    #[serde(default)]
    assessment_dates: AssessmentDates,
    periods: BTreeMap<String, WeekdayTable>,
}

/// All schedule data for one academic term
#[derive(Debug, Clone)]
pub struct ScheduleData {
    pub postings: Vec<RotationPeriod>,
    pub sgl: SglConfig,
    pub timetable: Vec<DayRecord>,
}

impl ScheduleData {
    /// Load schedule data from `dir`, falling back to the built-in term
    /// defaults for any file that is absent.
    pub fn load(dir: &Path) -> AppResult<Self> {
        let postings_text = read_or_default(dir, CLINICAL_POSTINGS_FILE, DEFAULT_CLINICAL_POSTINGS)?;
        let sgl_text = read_or_default(dir, SGL_SCHEDULES_FILE, DEFAULT_SGL_SCHEDULES)?;
        let timetable_text = read_or_default(dir, TIMETABLE_FILE, DEFAULT_TIMETABLE)?;

        Self::from_texts(&postings_text, &sgl_text, &timetable_text)
    }

    /// Parse schedule data from raw JSON texts (also used by tests)
    pub fn from_texts(postings: &str, sgl: &str, timetable: &str) -> AppResult<Self> {
        let postings_file: ClinicalPostingsFile = serde_json::from_str(postings)
            .map_err(|e| AppError::validation(format!("Invalid clinical postings config: {}", e)))?;
        let sgl_file: SglFile = serde_json::from_str(sgl)
            .map_err(|e| AppError::validation(format!("Invalid SGL schedule config: {}", e)))?;
        let timetable_file: TimetableFile = serde_json::from_str(timetable)
            .map_err(|e| AppError::validation(format!("Invalid timetable config: {}", e)))?;

        let mut periods = Vec::with_capacity(postings_file.periods.len());
        for raw in postings_file.periods {
            let (start, end) = parse_date_range(&raw.range)?;
            periods.push(RotationPeriod {
                range: raw.range,
                start,
                end,
                departments: raw.departments,
            });
        }
        validate_periods(&periods)?;

        let first_assessment = parse_assessment(&sgl_file.assessment_dates.first, "first")?;
        let second_assessment = parse_assessment(&sgl_file.assessment_dates.second, "second")?;
        // The third date is parsed only to reject malformed config
        parse_assessment(&sgl_file.assessment_dates.third, "third")?;

        Ok(Self {
            postings: periods,
            sgl: SglConfig {
                first_assessment,
                second_assessment,
                periods: sgl_file.periods,
            },
            timetable: timetable_file.timetable,
        })
    }

    /// Rotation period containing `date` (linear scan, ranges inclusive)
    pub fn clinical_period_for(&self, date: NaiveDate) -> Option<&RotationPeriod> {
        self.postings.iter().find(|p| p.contains(date))
    }
}

fn parse_assessment(value: &Option<String>, which: &str) -> AppResult<Option<NaiveDate>> {
    match value.as_deref() {
        None => Ok(None),
        Some(text) => parse_day_date(text).map(Some).ok_or_else(|| {
            AppError::validation(format!(
                "Invalid {} assessment date '{}', expected DD-MM-YYYY",
                which, text
            ))
        }),
    }
}

/// Ranges must be ordered and disjoint; gaps are tolerated but logged
fn validate_periods(periods: &[RotationPeriod]) -> AppResult<()> {
    for pair in periods.windows(2) {
        let (prev, next) = (&pair[0], &pair[1]);
        if next.start <= prev.end {
            return Err(AppError::validation(format!(
                "Clinical posting ranges overlap: '{}' and '{}'",
                prev.range, next.range
            )));
        }
        if next.start > prev.end + chrono::Days::new(1) {
            tracing::warn!(
                "Gap in clinical posting schedule between '{}' and '{}'",
                prev.range,
                next.range
            );
        }
    }
    Ok(())
}

fn read_or_default(dir: &Path, name: &str, default: &str) -> AppResult<String> {
    let path = dir.join(name);
    if path.exists() {
        tracing::info!("Loading schedule config from {}", path.display());
        fs::read_to_string(&path).map_err(|e| {
            AppError::internal(format!("Failed to read {}: {}", path.display(), e))
        })
    } else {
        tracing::info!("Using built-in {} (no file at {})", name, path.display());
        Ok(default.to_string())
    }
}
