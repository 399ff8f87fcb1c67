use std::fs;
use std::path::PathBuf;

use tracing::{error, info, warn};

use crate::enrolment::checker::error::Result;
use crate::enrolment::checker::io::excel_write;
use crate::enrolment::checker::model::Table;

/// Destination for everything a processing run persists.
///
/// Logs are fire-and-forget: implementations report their own failures.
/// Exports return an error so a run can stop when its output cannot be
/// written.
pub trait ReportSink {
    /// Records the fatal field errors found in one source export.
    fn persist_error_log(&mut self, errors: &[String], report_label: &str);

    /// Records the warnings accumulated by one top-level run.
    fn persist_warning_log(&mut self, warnings: &[String], has_warnings: bool);

    /// Writes a result table under `file_name`.
    fn export_table(&mut self, table: &Table, file_name: &str) -> Result<()>;
}

/// Local time stamp used to make output file names unique per run.
pub fn generate_time_string() -> String {
    chrono::Local::now().format("%Y-%m-%d_%H%M%S").to_string()
}

/// Writes logs as text files and tables as `.xlsx` workbooks into one
/// output directory.
#[derive(Debug, Clone)]
pub struct FileSink {
    output_dir: PathBuf,
    time_string: String,
}

impl FileSink {
    /// Creates a sink stamping every file with `time_string`.
    pub fn with_time_string(
        output_dir: impl Into<PathBuf>,
        time_string: impl Into<String>,
    ) -> Self {
        Self {
            output_dir: output_dir.into(),
            time_string: time_string.into(),
        }
    }

    fn write_lines(&self, file_name: &str, lines: &[String]) {
        let path = self.output_dir.join(file_name);
        let mut contents = lines.join("\n");
        contents.push('\n');
        if let Err(err) = fs::write(&path, contents) {
            error!(path = %path.display(), error = %err, "failed to write log file");
        }
    }
}

impl ReportSink for FileSink {
    fn persist_error_log(&mut self, errors: &[String], report_label: &str) {
        let file_name = format!(
            "Error_Log_{}_{}.txt",
            report_label.replace(' ', "_"),
            self.time_string
        );
        warn!(
            report = report_label,
            error_count = errors.len(),
            file = %file_name,
            "errors found in source data"
        );
        self.write_lines(&file_name, errors);
    }

    fn persist_warning_log(&mut self, warnings: &[String], has_warnings: bool) {
        if !has_warnings {
            info!("no warnings to report");
            return;
        }
        for warning in warnings.iter().skip(1) {
            warn!("{warning}");
        }
        let file_name = format!("Warning_Log_{}.txt", self.time_string);
        self.write_lines(&file_name, warnings);
    }

    fn export_table(&mut self, table: &Table, file_name: &str) -> Result<()> {
        let path = self.output_dir.join(file_name);
        excel_write::write_table(&path, table)?;
        info!(path = %path.display(), rows = table.len(), "table exported");
        Ok(())
    }
}

/// Keeps everything it is given in memory.
#[derive(Debug, Default)]
pub struct MemorySink {
    /// `(report label, errors)` per persisted error log.
    pub error_logs: Vec<(String, Vec<String>)>,
    /// `(warnings, has_warnings)` per persisted warning log.
    pub warning_logs: Vec<(Vec<String>, bool)>,
    /// `(file name, table)` per export.
    pub exports: Vec<(String, Table)>,
}

impl MemorySink {
    /// The exported table with the given file name, if any.
    pub fn export(&self, file_name: &str) -> Option<&Table> {
        self.exports
            .iter()
            .find(|(name, _)| name == file_name)
            .map(|(_, table)| table)
    }
}

impl ReportSink for MemorySink {
    fn persist_error_log(&mut self, errors: &[String], report_label: &str) {
        self.error_logs
            .push((report_label.to_string(), errors.to_vec()));
    }

    fn persist_warning_log(&mut self, warnings: &[String], has_warnings: bool) {
        self.warning_logs.push((warnings.to_vec(), has_warnings));
    }

    fn export_table(&mut self, table: &Table, file_name: &str) -> Result<()> {
        self.exports.push((file_name.to_string(), table.clone()));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn error_log_is_written_per_label() {
        let dir = tempdir().expect("temporary directory");
        let mut sink = FileSink::with_time_string(dir.path(), "2020-01-01_000000");
        sink.persist_error_log(&["first".to_string(), "second".to_string()], "Some Report");

        let path = dir.path().join("Error_Log_Some_Report_2020-01-01_000000.txt");
        let written = fs::read_to_string(path).expect("error log read");
        assert_eq!(written, "first\nsecond\n");
    }

    #[test]
    fn warning_log_is_skipped_without_warnings() {
        let dir = tempdir().expect("temporary directory");
        let mut sink = FileSink::with_time_string(dir.path(), "stamp");
        sink.persist_warning_log(&["Header:".to_string()], false);
        assert!(!dir.path().join("Warning_Log_stamp.txt").exists());

        sink.persist_warning_log(&["Header:".to_string(), "one".to_string()], true);
        let written =
            fs::read_to_string(dir.path().join("Warning_Log_stamp.txt")).expect("warning log read");
        assert_eq!(written, "Header:\none\n");
    }

    #[test]
    fn time_string_has_date_and_time_parts() {
        let stamp = generate_time_string();
        assert_eq!(stamp.len(), "2020-01-01_000000".len());
        assert_eq!(stamp.as_bytes()[10], b'_');
    }
}
