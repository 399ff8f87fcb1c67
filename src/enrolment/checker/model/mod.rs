use serde::Serialize;

use crate::enrolment::checker::error::{CheckerError, Result};

/// Column holding the join key shared by both sources.
pub const STUDENT_ID: &str = "StudentID";
/// Column holding the student's display name (learning platform only).
pub const STUDENT: &str = "Student";
/// Column holding the course code.
pub const COURSE: &str = "Course";
/// Column holding the enrolment (start) date.
pub const START_DATE: &str = "Start Date";
/// Column holding the enrolment expiry date.
pub const EXPIRY_DATE: &str = "Expiry Date";

/// Identifies which system of record a set of rows came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Source {
    /// Student database export: StudentID, Course, Tutor, Enrolment Date, Expiry Date.
    Database,
    /// Learning platform export: StudentID, Student, Course, Enrolment Date, Expiry Date.
    Platform,
}

impl Source {
    /// Label used to name the error log written for this source.
    pub fn report_label(self) -> &'static str {
        match self {
            Source::Database => "Enrolment Dates (Student Database) Report",
            Source::Platform => "Enrolment Dates (Learning Platform) Report",
        }
    }

    /// Header line opening the warnings collected for this source.
    pub fn warning_header(self) -> &'static str {
        match self {
            Source::Database => "Enrolment Dates (Student Database) Report Warnings:",
            Source::Platform => "Enrolment Dates (Learning Platform) Report Warnings:",
        }
    }

    /// Short suffix distinguishing this source's columns in comparison output.
    pub fn column_suffix(self) -> &'static str {
        match self {
            Source::Database => "SD",
            Source::Platform => "LP",
        }
    }

    /// Human readable name of the system of record.
    pub fn name(self) -> &'static str {
        match self {
            Source::Database => "student database",
            Source::Platform => "learning platform",
        }
    }
}

impl std::fmt::Display for Source {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Raw row from the student database export, fields as read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatabaseRow {
    pub student_id: String,
    pub course: String,
    pub tutor: String,
    pub enrolment_date: String,
    pub expiry_date: String,
}

impl DatabaseRow {
    /// Builds a typed row from positional fields. `line` is the 1-based data
    /// line used when reporting a short row.
    pub fn from_fields(line: usize, fields: Vec<String>) -> Result<Self> {
        let [student_id, course, tutor, enrolment_date, expiry_date] =
            take_fields(Source::Database, line, fields)?;
        Ok(Self {
            student_id,
            course,
            tutor,
            enrolment_date,
            expiry_date,
        })
    }
}

/// Raw row from the learning platform export, fields as read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlatformRow {
    pub student_id: String,
    pub student_name: String,
    pub course_label: String,
    pub enrolment_date: String,
    pub expiry_date: String,
}

impl PlatformRow {
    /// Builds a typed row from positional fields. `line` is the 1-based data
    /// line used when reporting a short row.
    pub fn from_fields(line: usize, fields: Vec<String>) -> Result<Self> {
        let [student_id, student_name, course_label, enrolment_date, expiry_date] =
            take_fields(Source::Platform, line, fields)?;
        Ok(Self {
            student_id,
            student_name,
            course_label,
            enrolment_date,
            expiry_date,
        })
    }
}

const FIELD_COUNT: usize = 5;

fn take_fields(source: Source, line: usize, fields: Vec<String>) -> Result<[String; FIELD_COUNT]> {
    let found = fields.len();
    if found < FIELD_COUNT {
        return Err(CheckerError::MalformedRow {
            schema: source.name(),
            line,
            expected: FIELD_COUNT,
            found,
        });
    }
    let mut fields = fields.into_iter();
    Ok(std::array::from_fn(|_| fields.next().unwrap_or_default()))
}

/// Cleaned student database record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DatabaseRecord {
    pub student_id: String,
    pub course: String,
    pub start_date: String,
    pub expiry_date: String,
}

/// Cleaned learning platform record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlatformRecord {
    pub student_id: String,
    pub student_name: String,
    pub course_code: String,
    pub start_date: String,
    pub expiry_date: String,
}

/// A named-column table of optional string cells. `None` is the null marker
/// produced when a join finds no matching row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Vec<Option<String>>>,
}

impl Table {
    /// Creates a table, rejecting any row without exactly one cell per column.
    pub fn new(columns: Vec<String>, rows: Vec<Vec<Option<String>>>) -> Result<Self> {
        if let Some((index, row)) = rows
            .iter()
            .enumerate()
            .find(|(_, row)| row.len() != columns.len())
        {
            return Err(CheckerError::RaggedRow {
                row: index,
                expected: columns.len(),
                found: row.len(),
            });
        }
        Ok(Self { columns, rows })
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<Option<String>>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Position of the named column, if present.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|column| column == name)
    }

    /// Cell at `row` in the named column. Null markers and unknown columns
    /// both yield `None`.
    pub fn cell(&self, row: usize, column: &str) -> Option<&str> {
        let index = self.column_index(column)?;
        self.rows.get(row)?.get(index)?.as_deref()
    }

    /// Returns a new table whose headers are renamed per `(from, to)` pairs.
    /// Headers not mentioned are kept.
    pub fn rename_columns(self, renames: &[(&str, &str)]) -> Table {
        let columns = self
            .columns
            .into_iter()
            .map(|column| {
                renames
                    .iter()
                    .find(|(from, _)| *from == column)
                    .map(|(_, to)| (*to).to_string())
                    .unwrap_or(column)
            })
            .collect();
        Table {
            columns,
            rows: self.rows,
        }
    }
}

impl From<&[DatabaseRecord]> for Table {
    fn from(records: &[DatabaseRecord]) -> Self {
        let columns = [STUDENT_ID, COURSE, START_DATE, EXPIRY_DATE]
            .map(String::from)
            .to_vec();
        let rows = records
            .iter()
            .map(|record| {
                vec![
                    Some(record.student_id.clone()),
                    Some(record.course.clone()),
                    Some(record.start_date.clone()),
                    Some(record.expiry_date.clone()),
                ]
            })
            .collect();
        Table { columns, rows }
    }
}

impl From<&[PlatformRecord]> for Table {
    fn from(records: &[PlatformRecord]) -> Self {
        let columns = [STUDENT_ID, STUDENT, COURSE, START_DATE, EXPIRY_DATE]
            .map(String::from)
            .to_vec();
        let rows = records
            .iter()
            .map(|record| {
                vec![
                    Some(record.student_id.clone()),
                    Some(record.student_name.clone()),
                    Some(record.course_code.clone()),
                    Some(record.start_date.clone()),
                    Some(record.expiry_date.clone()),
                ]
            })
            .collect();
        Table { columns, rows }
    }
}
