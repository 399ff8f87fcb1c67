use tracing::debug;

use crate::enrolment::checker::model::{DatabaseRow, PlatformRow, Source};
use crate::enrolment::checker::sink::ReportSink;

/// Outcome of checking one source export for missing fields.
///
/// Errors mark fields the reconciliation depends on; warnings mark fields
/// that are only informational. Neither stops processing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationReport {
    source: Source,
    errors: Vec<String>,
    warnings: Vec<String>,
    has_warnings: bool,
}

impl ValidationReport {
    fn new(source: Source, errors: Vec<String>, findings: Vec<String>) -> Self {
        let has_warnings = !findings.is_empty();
        let mut warnings = Vec::with_capacity(findings.len() + 1);
        warnings.push(source.warning_header().to_string());
        warnings.extend(findings);
        Self {
            source,
            errors,
            warnings,
            has_warnings,
        }
    }

    pub fn source(&self) -> Source {
        self.source
    }

    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    /// Warning lines, always opened by the source's header line.
    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    /// True only when something beyond the header was recorded.
    pub fn has_warnings(&self) -> bool {
        self.has_warnings
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Number of warnings excluding the header line.
    pub fn warning_count(&self) -> usize {
        self.warnings.len() - 1
    }
}

/// Checks student database rows: missing course or dates are errors, a
/// missing tutor is a warning.
pub fn validate_database(rows: &[DatabaseRow]) -> ValidationReport {
    let mut errors = Vec::new();
    let mut warnings = Vec::new();
    for row in rows {
        let id = &row.student_id;
        if is_missing(&row.course) {
            errors.push(format!("Course code is missing for student with Student ID {id}"));
        }
        if is_missing(&row.tutor) {
            warnings.push(format!("Tutor is missing for student with Student ID {id}"));
        }
        if is_missing(&row.enrolment_date) {
            errors.push(format!("Enrolment Date is missing for student with Student ID {id}"));
        }
        if is_missing(&row.expiry_date) {
            errors.push(format!("Expiry Date is missing for student with Student ID {id}"));
        }
    }
    finish(Source::Database, rows.len(), errors, warnings)
}

/// Checks learning platform rows: missing course or dates are errors, a
/// missing student name is a warning.
pub fn validate_platform(rows: &[PlatformRow]) -> ValidationReport {
    let mut errors = Vec::new();
    let mut warnings = Vec::new();
    for row in rows {
        let id = &row.student_id;
        if is_missing(&row.student_name) {
            warnings.push(format!("Student Name is missing for student with Student ID {id}"));
        }
        if is_missing(&row.course_label) {
            errors.push(format!("Course is missing for student with Student ID {id}"));
        }
        if is_missing(&row.enrolment_date) {
            errors.push(format!("Enrolment Date is missing for student with Student ID {id}"));
        }
        if is_missing(&row.expiry_date) {
            errors.push(format!("Expiry Date is missing for student with Student ID {id}"));
        }
    }
    finish(Source::Platform, rows.len(), errors, warnings)
}

/// Validates student database rows and persists an error log when any
/// errors were found.
pub fn check_database(rows: &[DatabaseRow], sink: &mut dyn ReportSink) -> ValidationReport {
    let report = validate_database(rows);
    persist_errors(&report, sink);
    report
}

/// Validates learning platform rows and persists an error log when any
/// errors were found.
pub fn check_platform(rows: &[PlatformRow], sink: &mut dyn ReportSink) -> ValidationReport {
    let report = validate_platform(rows);
    persist_errors(&report, sink);
    report
}

fn persist_errors(report: &ValidationReport, sink: &mut dyn ReportSink) {
    if report.has_errors() {
        sink.persist_error_log(report.errors(), report.source().report_label());
    }
}

fn finish(
    source: Source,
    row_count: usize,
    errors: Vec<String>,
    warnings: Vec<String>,
) -> ValidationReport {
    debug!(
        %source,
        row_count,
        error_count = errors.len(),
        warning_count = warnings.len(),
        "validated source rows"
    );
    ValidationReport::new(source, errors, warnings)
}

fn is_missing(value: &str) -> bool {
    value.is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enrolment::checker::sink::MemorySink;

    fn database_row(fields: [&str; 5]) -> DatabaseRow {
        DatabaseRow::from_fields(1, fields.map(String::from).to_vec()).expect("row built")
    }

    fn platform_row(fields: [&str; 5]) -> PlatformRow {
        PlatformRow::from_fields(1, fields.map(String::from).to_vec()).expect("row built")
    }

    #[test]
    fn database_missing_course_is_an_error() {
        let report = validate_database(&[database_row(["1", "", "T", "1/1/2020", "1/1/2021"])]);
        assert_eq!(
            report.errors(),
            ["Course code is missing for student with Student ID 1"]
        );
        assert!(!report.has_warnings());
        assert_eq!(report.warnings().len(), 1);
    }

    #[test]
    fn database_missing_tutor_is_a_warning() {
        let report = validate_database(&[database_row(["9", "C", "", "1/1/2020", "1/1/2021"])]);
        assert!(!report.has_errors());
        assert!(report.has_warnings());
        assert_eq!(
            report.warnings(),
            [
                "Enrolment Dates (Student Database) Report Warnings:",
                "Tutor is missing for student with Student ID 9",
            ]
        );
    }

    #[test]
    fn platform_missing_name_is_a_warning() {
        let report = validate_platform(&[platform_row(["1", "", "C", "1/1/2020", "1/1/2021"])]);
        assert!(report.errors().is_empty());
        assert!(report.has_warnings());
        assert_eq!(report.warning_count(), 1);
    }

    #[test]
    fn platform_errors_keep_row_then_field_order() {
        let rows = [
            platform_row(["1", "Ann", "", "", "2021-01-01"]),
            platform_row(["2", "Bob", "C", "2020-01-01", ""]),
        ];
        let report = validate_platform(&rows);
        assert_eq!(
            report.errors(),
            [
                "Course is missing for student with Student ID 1",
                "Enrolment Date is missing for student with Student ID 1",
                "Expiry Date is missing for student with Student ID 2",
            ]
        );
    }

    #[test]
    fn error_log_is_only_written_when_errors_exist() {
        let mut sink = MemorySink::default();
        check_platform(&[platform_row(["1", "", "C", "d", "d"])], &mut sink);
        assert!(sink.error_logs.is_empty());

        check_database(&[database_row(["2", "", "T", "d", "d"])], &mut sink);
        assert_eq!(sink.error_logs.len(), 1);
        assert_eq!(
            sink.error_logs[0].0,
            "Enrolment Dates (Student Database) Report"
        );
    }
}
