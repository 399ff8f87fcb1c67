//! Left join of two tables on a shared key and comparison of one date column
//! pair per call.

use std::collections::{HashMap, HashSet};

use tracing::{debug, instrument};

use crate::enrolment::checker::error::{CheckerError, Result};
use crate::enrolment::checker::model::{
    COURSE, DatabaseRecord, PlatformRecord, STUDENT, STUDENT_ID, Source, Table,
};

/// Suffix given to an overlapping column from the left table.
pub const LEFT_SUFFIX: &str = "_1";
/// Suffix given to an overlapping column from the right table.
pub const RIGHT_SUFFIX: &str = "_2";

/// Joins every row of `left` to the rows of `right` sharing its `key`.
///
/// Left rows without a match appear once with null right-hand cells; left
/// rows with several matches appear once per match, in right table order.
/// Columns other than the key present on both sides are suffixed with
/// [`LEFT_SUFFIX`] and [`RIGHT_SUFFIX`].
pub fn left_join(left: &Table, right: &Table, key: &str) -> Result<Table> {
    let left_key = require_column(left, key)?;
    let right_key = require_column(right, key)?;

    let left_names: HashSet<&str> = left.columns().iter().map(String::as_str).collect();
    let right_names: HashSet<&str> = right.columns().iter().map(String::as_str).collect();
    let overlapping =
        |name: &str| name != key && left_names.contains(name) && right_names.contains(name);

    let mut columns: Vec<String> = left
        .columns()
        .iter()
        .map(String::as_str)
        .map(|name| suffixed(name, overlapping(name), LEFT_SUFFIX))
        .collect();
    let right_columns: Vec<usize> = (0..right.columns().len())
        .filter(|index| *index != right_key)
        .collect();
    columns.extend(right_columns.iter().map(|index| {
        let name = right.columns()[*index].as_str();
        suffixed(name, overlapping(name), RIGHT_SUFFIX)
    }));

    let mut index: HashMap<&str, Vec<usize>> = HashMap::new();
    for (row_idx, row) in right.rows().iter().enumerate() {
        if let Some(value) = row[right_key].as_deref() {
            index.entry(value).or_default().push(row_idx);
        }
    }

    let mut rows = Vec::with_capacity(left.len());
    for row in left.rows() {
        let matches = row[left_key]
            .as_deref()
            .and_then(|value| index.get(value))
            .map(Vec::as_slice)
            .unwrap_or_default();
        if matches.is_empty() {
            let mut joined = row.clone();
            joined.extend(right_columns.iter().map(|_| None));
            rows.push(joined);
            continue;
        }
        for right_idx in matches {
            let right_row = &right.rows()[*right_idx];
            let mut joined = row.clone();
            joined.extend(right_columns.iter().map(|index| right_row[*index].clone()));
            rows.push(joined);
        }
    }

    Table::new(columns, rows)
}

/// Returns the joined rows whose `date_column` differs between `left` and
/// `right`, projected onto `output_columns`.
///
/// Values are compared as exact strings. A null marker on either side always
/// counts as a difference, so students missing from `right` are reported.
#[instrument(
    level = "debug",
    skip(left, right, output_columns),
    fields(left_rows = left.len(), right_rows = right.len())
)]
pub fn compare_dates(
    left: &Table,
    right: &Table,
    key: &str,
    date_column: &str,
    output_columns: &[&str],
) -> Result<Table> {
    require_column(left, date_column)?;
    require_column(right, date_column)?;

    let joined = left_join(left, right, key)?;
    let left_date = require_column(&joined, &format!("{date_column}{LEFT_SUFFIX}"))?;
    let right_date = require_column(&joined, &format!("{date_column}{RIGHT_SUFFIX}"))?;
    let projection = output_columns
        .iter()
        .map(|name| require_column(&joined, name))
        .collect::<Result<Vec<_>>>()?;

    let differing: Vec<Vec<Option<String>>> = joined
        .rows()
        .iter()
        .filter(|row| dates_differ(row[left_date].as_deref(), row[right_date].as_deref()))
        .map(|row| projection.iter().map(|index| row[*index].clone()).collect())
        .collect();
    debug!(
        joined_rows = joined.len(),
        differing = differing.len(),
        "compared date columns"
    );

    let columns = output_columns.iter().map(|name| name.to_string()).collect();
    Table::new(columns, differing)
}

/// Two dates agree only when both are present and textually identical.
pub fn dates_differ(left: Option<&str>, right: Option<&str>) -> bool {
    match (left, right) {
        (Some(left), Some(right)) => left != right,
        _ => true,
    }
}

/// Compares one date column of the cleaned learning platform records (left)
/// against the cleaned student database records (right).
///
/// The result carries `StudentID`, `Student`, `Course` and the two dates,
/// labelled `<date_column> LP` and `<date_column> SD`.
pub fn compare_sources(
    platform: &[PlatformRecord],
    database: &[DatabaseRecord],
    date_column: &str,
) -> Result<Table> {
    let left = Table::from(platform);
    let right = Table::from(database);

    let course = format!("{COURSE}{LEFT_SUFFIX}");
    let left_date = format!("{date_column}{LEFT_SUFFIX}");
    let right_date = format!("{date_column}{RIGHT_SUFFIX}");
    let left_label = format!("{date_column} {}", Source::Platform.column_suffix());
    let right_label = format!("{date_column} {}", Source::Database.column_suffix());

    let headings = [STUDENT_ID, STUDENT, course.as_str(), left_date.as_str(), right_date.as_str()];
    let differing = compare_dates(&left, &right, STUDENT_ID, date_column, &headings)?;
    Ok(differing.rename_columns(&[
        (course.as_str(), COURSE),
        (left_date.as_str(), left_label.as_str()),
        (right_date.as_str(), right_label.as_str()),
    ]))
}

fn require_column(table: &Table, name: &str) -> Result<usize> {
    table
        .column_index(name)
        .ok_or_else(|| CheckerError::UnknownColumn(name.to_string()))
}

fn suffixed(name: &str, overlapping: bool, suffix: &str) -> String {
    if overlapping {
        format!("{name}{suffix}")
    } else {
        name.to_string()
    }
}
