//! CSV export of the per-day analysis table.
//!
//! One row per analyzed day, matching the layout downstream spreadsheets
//! already consume: compact date, `DD/MM/YYYY` date, hours on, and duty
//! cycle percentage, the numeric columns with two decimals.

use std::io::Write;
use std::path::Path;

use crate::error::Result;
use crate::model::DailyRecord;
use crate::util::AtomicFile;

/// Header row of the analysis table.
const HEADER: [&str; 4] = ["Standard Date", "Date", "Time ON (hours)", "Time ON (%)"];

/// CSV exporter for daily records.
#[derive(Debug, Clone)]
pub struct CsvExporter {
    /// Include header row.
    include_header: bool,
    /// Field delimiter.
    delimiter: char,
    /// Quote character.
    quote_char: char,
}

impl Default for CsvExporter {
    fn default() -> Self {
        Self::new()
    }
}

impl CsvExporter {
    /// Create a new CSV exporter.
    #[must_use]
    pub fn new() -> Self {
        Self {
            include_header: true,
            delimiter: ',',
            quote_char: '"',
        }
    }

    /// Include or exclude the header row.
    #[must_use]
    pub fn with_header(mut self, include: bool) -> Self {
        self.include_header = include;
        self
    }

    /// Set the field delimiter.
    #[must_use]
    pub fn with_delimiter(mut self, delim: char) -> Self {
        self.delimiter = delim;
        self
    }

    /// Write the table to a writer.
    pub fn export<W: Write>(&self, writer: &mut W, records: &[DailyRecord]) -> Result<()> {
        if self.include_header {
            self.write_row(writer, &HEADER)?;
        }

        for record in records {
            self.write_row(
                writer,
                &[
                    &record.day.compact(),
                    &record.day.day_month_year(),
                    &format!("{:.2}", record.on_hours()),
                    &format!("{:.2}", record.duty_cycle_percent()),
                ],
            )?;
        }

        Ok(())
    }

    /// Render the table to a string.
    pub fn export_to_string(&self, records: &[DailyRecord]) -> Result<String> {
        let mut buffer = Vec::new();
        self.export(&mut buffer, records)?;
        String::from_utf8(buffer)
            .map_err(|e| crate::error::DutylineError::export(format!("invalid UTF-8 in CSV: {e}")))
    }

    /// Write the table to a file atomically.
    pub fn export_to_path(&self, path: &Path, records: &[DailyRecord]) -> Result<()> {
        let mut file = AtomicFile::create(path)?;
        self.export(file.writer(), records)?;
        file.finish()
    }

    /// Escape a field value for CSV.
    fn escape_field(&self, value: &str) -> String {
        let needs_quoting = value.contains(self.delimiter)
            || value.contains(self.quote_char)
            || value.contains('\n')
            || value.contains('\r');

        if needs_quoting {
            let escaped = value.replace(
                self.quote_char,
                &format!("{}{}", self.quote_char, self.quote_char),
            );
            format!("{}{}{}", self.quote_char, escaped, self.quote_char)
        } else {
            value.to_string()
        }
    }

    /// Write a CSV row.
    fn write_row<W: Write>(&self, writer: &mut W, fields: &[&str]) -> Result<()> {
        let line: Vec<String> = fields.iter().map(|f| self.escape_field(f)).collect();
        writeln!(writer, "{}", line.join(&self.delimiter.to_string()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Day;
    use pretty_assertions::assert_eq;

    fn sample_records() -> Vec<DailyRecord> {
        // 2020-01-05 onwards.
        let base = Day::from_timestamp(1_578_182_400);
        vec![
            DailyRecord::new(base, 43_200),
            DailyRecord::new(base.succ(), 86_400),
            DailyRecord::new(base.succ().succ(), 0),
        ]
    }

    #[test]
    fn test_export_matches_expected_layout() {
        let csv = CsvExporter::new()
            .export_to_string(&sample_records())
            .unwrap();
        assert_eq!(
            csv,
            "Standard Date,Date,Time ON (hours),Time ON (%)\n\
             20200105,05/01/2020,12.00,50.00\n\
             20200106,06/01/2020,24.00,100.00\n\
             20200107,07/01/2020,0.00,0.00\n"
        );
    }

    #[test]
    fn test_header_can_be_suppressed() {
        let csv = CsvExporter::new()
            .with_header(false)
            .export_to_string(&sample_records())
            .unwrap();
        assert!(csv.starts_with("20200105"));
    }

    #[test]
    fn test_custom_delimiter() {
        let csv = CsvExporter::new()
            .with_delimiter(';')
            .export_to_string(&sample_records())
            .unwrap();
        assert!(csv.starts_with("Standard Date;Date;"));
    }

    #[test]
    fn test_escape_field() {
        let exporter = CsvExporter::new();

        assert_eq!(exporter.escape_field("simple"), "simple");
        assert_eq!(exporter.escape_field("with,comma"), "\"with,comma\"");
        assert_eq!(exporter.escape_field("with\"quote"), "\"with\"\"quote\"");
        assert_eq!(exporter.escape_field("with\nnewline"), "\"with\nnewline\"");
    }

    #[test]
    fn test_export_to_path_writes_atomically() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("analysis.csv");
        CsvExporter::new()
            .export_to_path(&path, &sample_records())
            .unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.starts_with("Standard Date,"));
        assert_eq!(written.lines().count(), 4);

        // No stray temp files left behind.
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
    }
}
