use regex::Regex;
use tracing::debug;

use crate::enrolment::checker::dates::{format_from_timestamp, normalize_day_first};
use crate::enrolment::checker::error::Result;
use crate::enrolment::checker::model::{DatabaseRecord, DatabaseRow, PlatformRecord, PlatformRow};

/// Course code marking a learning platform row that is not a real enrolment.
pub const SKIP_MARKER: &str = "Skip";

/// Course codes look like `XXX-XX-XXX`.
pub const DEFAULT_COURSE_PATTERN: &str = r"[A-Za-z0-9]{3}-[A-Za-z0-9]{2}-[A-Za-z0-9]{3}";

/// Pulls a course code out of a free-text course label.
pub trait CourseCodeExtractor {
    fn extract(&self, label: &str) -> String;
}

impl<F> CourseCodeExtractor for F
where
    F: Fn(&str) -> String,
{
    fn extract(&self, label: &str) -> String {
        self(label)
    }
}

/// Extracts the first match of a course-code pattern, or [`SKIP_MARKER`]
/// when the label carries no code (navigation and internal courses).
#[derive(Debug, Clone)]
pub struct PatternExtractor {
    pattern: Regex,
}

impl PatternExtractor {
    pub fn new(pattern: &str) -> Result<Self> {
        Ok(Self {
            pattern: Regex::new(pattern)?,
        })
    }
}

impl CourseCodeExtractor for PatternExtractor {
    fn extract(&self, label: &str) -> String {
        self.pattern
            .find(label)
            .map(|found| found.as_str().to_string())
            .unwrap_or_else(|| SKIP_MARKER.to_string())
    }
}

/// Projects student database rows onto the canonical record, trimming the
/// identifier and course and zero-padding both dates. Order is preserved and
/// no row is dropped.
pub fn clean_database(rows: &[DatabaseRow]) -> Vec<DatabaseRecord> {
    rows.iter()
        .map(|row| DatabaseRecord {
            student_id: row.student_id.trim().to_string(),
            course: row.course.trim().to_string(),
            start_date: normalize_day_first(&row.enrolment_date),
            expiry_date: normalize_day_first(&row.expiry_date),
        })
        .collect()
}

/// Projects learning platform rows onto the canonical record and drops rows
/// whose extracted course code is exactly [`SKIP_MARKER`].
pub fn clean_platform(
    rows: &[PlatformRow],
    extractor: &dyn CourseCodeExtractor,
) -> Vec<PlatformRecord> {
    let cleaned: Vec<PlatformRecord> = rows
        .iter()
        .map(|row| PlatformRecord {
            student_id: row.student_id.trim().to_string(),
            student_name: row.student_name.trim().to_string(),
            course_code: extractor.extract(&row.course_label).trim().to_string(),
            start_date: format_from_timestamp(&row.enrolment_date),
            expiry_date: format_from_timestamp(&row.expiry_date),
        })
        .filter(|record| record.course_code != SKIP_MARKER)
        .collect();
    debug!(
        input = rows.len(),
        kept = cleaned.len(),
        "cleaned learning platform rows"
    );
    cleaned
}
