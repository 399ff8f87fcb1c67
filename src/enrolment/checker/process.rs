use serde::Serialize;
use tracing::{info, instrument};

use crate::enrolment::checker::clean::{CourseCodeExtractor, clean_database, clean_platform};
use crate::enrolment::checker::dates::parse_canonical;
use crate::enrolment::checker::error::Result;
use crate::enrolment::checker::model::{
    DatabaseRow, EXPIRY_DATE, PlatformRecord, PlatformRow, START_DATE, Source, Table,
};
use crate::enrolment::checker::reconcile::compare_sources;
use crate::enrolment::checker::sink::ReportSink;
use crate::enrolment::checker::validate::{ValidationReport, check_database, check_platform};

/// Header of the combined warning log written by [`process_enrolment_dates`].
pub const ENROLMENT_DATES_WARNINGS: &str = "Processing Enrolment Dates data Warnings:";
/// Header of the warning log written by [`process_enrolments`].
pub const ENROLMENTS_WARNINGS: &str = "Processing Enrolments data Warnings:";

/// What a processing run read, found and wrote.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    pub sources: Vec<SourceSummary>,
    pub comparisons: Vec<ComparisonSummary>,
    pub exported: Vec<String>,
    pub has_warnings: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourceSummary {
    pub source: Source,
    pub rows_read: usize,
    pub rows_kept: usize,
    pub error_count: usize,
    pub warning_count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComparisonSummary {
    pub column: String,
    pub mismatches: usize,
    pub file_name: String,
}

/// Finds students whose start or expiry date differs between the learning
/// platform and the student database, exporting one table per date.
///
/// Missing fields never stop the run: they are written to per-source error
/// logs and a combined warning log, and students with missing data surface as
/// mismatches.
#[instrument(
    level = "info",
    skip_all,
    fields(platform_rows = platform_rows.len(), database_rows = database_rows.len())
)]
pub fn process_enrolment_dates(
    platform_rows: &[PlatformRow],
    database_rows: &[DatabaseRow],
    extractor: &dyn CourseCodeExtractor,
    sink: &mut dyn ReportSink,
    time_string: &str,
) -> Result<RunSummary> {
    let platform_report = check_platform(platform_rows, sink);
    let platform = clean_platform(platform_rows, extractor);
    let database_report = check_database(database_rows, sink);
    let database = clean_database(database_rows);

    let mut comparisons = Vec::with_capacity(2);
    for (column, prefix) in [(START_DATE, "Start_Dates"), (EXPIRY_DATE, "Expiry_Dates")] {
        let differing = compare_sources(&platform, &database, column)?;
        let file_name = format!("{prefix}_{time_string}.xlsx");
        sink.export_table(&differing, &file_name)?;
        info!(column, mismatches = differing.len(), file = %file_name, "date comparison exported");
        comparisons.push(ComparisonSummary {
            column: column.to_string(),
            mismatches: differing.len(),
            file_name,
        });
    }

    let reports = [&platform_report, &database_report];
    let (warnings, has_warnings) = combine_warnings(ENROLMENT_DATES_WARNINGS, &reports);
    sink.persist_warning_log(&warnings, has_warnings);

    Ok(RunSummary {
        sources: vec![
            summarize(&platform_report, platform_rows.len(), platform.len()),
            summarize(&database_report, database_rows.len(), database.len()),
        ],
        exported: comparisons.iter().map(|c| c.file_name.clone()).collect(),
        comparisons,
        has_warnings,
    })
}

/// Cleans the learning platform export on its own and exports it ordered by
/// start date. Rows whose start date cannot be read sort last.
#[instrument(level = "info", skip_all, fields(platform_rows = platform_rows.len()))]
pub fn process_enrolments(
    platform_rows: &[PlatformRow],
    extractor: &dyn CourseCodeExtractor,
    sink: &mut dyn ReportSink,
    time_string: &str,
) -> Result<RunSummary> {
    let report = check_platform(platform_rows, sink);
    let mut platform = clean_platform(platform_rows, extractor);
    sort_by_start_date(&mut platform);

    let file_name = format!("Enrolment_Dates_{time_string}.xlsx");
    sink.export_table(&Table::from(platform.as_slice()), &file_name)?;
    info!(rows = platform.len(), file = %file_name, "enrolments exported");

    let (warnings, has_warnings) = combine_warnings(ENROLMENTS_WARNINGS, &[&report]);
    sink.persist_warning_log(&warnings, has_warnings);

    Ok(RunSummary {
        sources: vec![summarize(&report, platform_rows.len(), platform.len())],
        comparisons: Vec::new(),
        exported: vec![file_name],
        has_warnings,
    })
}

fn sort_by_start_date(records: &mut [PlatformRecord]) {
    records.sort_by_key(|record| {
        let date = parse_canonical(&record.start_date);
        (date.is_none(), date)
    });
}

/// Folds the warnings of each report under one run header. Reports without
/// warnings contribute nothing, not even their own header.
fn combine_warnings(header: &str, reports: &[&ValidationReport]) -> (Vec<String>, bool) {
    let mut warnings = vec![header.to_string()];
    for report in reports.iter().filter(|report| report.has_warnings()) {
        warnings.extend(report.warnings().iter().cloned());
    }
    let has_warnings = warnings.len() > 1;
    (warnings, has_warnings)
}

fn summarize(report: &ValidationReport, rows_read: usize, rows_kept: usize) -> SourceSummary {
    SourceSummary {
        source: report.source(),
        rows_read,
        rows_kept,
        error_count: report.errors().len(),
        warning_count: report.warning_count(),
    }
}
