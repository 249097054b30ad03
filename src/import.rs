// 📥 Bulk Import - line format + summary
//
// File format: one patron per line, `id-name-address-fine`, no header, no escaping.
// A field containing `-` corrupts the split and surfaces as a column mismatch.

use crate::entities::{Patron, RECORD_SEPARATOR};
use serde::Serialize;
use std::fmt;

// ============================================================================
// LINE FORMAT
// ============================================================================

/// Fields expected on every import line
pub const IMPORT_COLUMNS: usize = 4;

/// Literal field delimiter
pub const FIELD_DELIMITER: char = '-';

/// Split an import line into raw (untrimmed) fields
///
/// Trailing empty fields are dropped, so `a-b-c-` has 3 fields,
/// while an empty line still counts as a single empty field.
pub fn split_fields(line: &str) -> Vec<&str> {
    if line.is_empty() {
        return vec![line];
    }

    let mut fields: Vec<&str> = line.split(FIELD_DELIMITER).collect();
    while fields.last().is_some_and(|field| field.is_empty()) {
        fields.pop();
    }
    fields
}

// ============================================================================
// IMPORT SUMMARY
// ============================================================================

/// One line that could not be imported
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImportFailure {
    /// 1-based position in the source
    pub line_number: usize,

    /// Original line text, or `<unreadable line N>` when the line could not be read
    pub line: String,

    /// Why the line was rejected
    pub message: String,
}

/// Outcome of a bulk import: success count plus failures in encounter order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ImportSummary {
    pub imported: usize,
    pub failures: Vec<ImportFailure>,
}

impl ImportSummary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_success(&mut self) {
        self.imported += 1;
    }

    pub fn record_failure(&mut self, line_number: usize, line: impl Into<String>, message: impl Into<String>) {
        self.failures.push(ImportFailure {
            line_number,
            line: line.into(),
            message: message.into(),
        });
    }

    pub fn has_failures(&self) -> bool {
        !self.failures.is_empty()
    }

    /// Lines processed, successful or not
    pub fn total(&self) -> usize {
        self.imported + self.failures.len()
    }
}

impl fmt::Display for ImportSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Successfully imported {} patrons.", self.imported)?;

        if self.has_failures() {
            write!(f, "\nThe following lines failed")?;
        }

        for failure in &self.failures {
            write!(
                f,
                "\nLine: {} Exception: {}\n{}",
                failure.line, failure.message, RECORD_SEPARATOR
            )?;
        }

        Ok(())
    }
}

/// JSON document for `import --json`: the summary fields plus the registry contents
#[derive(Debug, Serialize)]
pub struct ImportReport<'a> {
    #[serde(flatten)]
    pub summary: &'a ImportSummary,

    /// Every patron held after the import, in id order
    pub patrons: Vec<&'a Patron>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_fields_four_columns() {
        assert_eq!(
            split_fields("1234567-Alice-123 Main St-10.00"),
            vec!["1234567", "Alice", "123 Main St", "10.00"]
        );
        assert_eq!(split_fields("bad-line-only-three").len(), 4);
    }

    #[test]
    fn test_split_fields_keeps_whitespace() {
        assert_eq!(
            split_fields(" 1234567 - Bob -Elm- 1.5 "),
            vec![" 1234567 ", " Bob ", "Elm", " 1.5 "]
        );
    }

    #[test]
    fn test_split_fields_drops_trailing_empty() {
        assert_eq!(split_fields("a-b-c-"), vec!["a", "b", "c"]);
        assert_eq!(split_fields("a-b-c---"), vec!["a", "b", "c"]);
        assert_eq!(split_fields("---").len(), 0);
    }

    #[test]
    fn test_split_fields_keeps_inner_empty() {
        assert_eq!(split_fields("a--b-c"), vec!["a", "", "b", "c"]);
        assert_eq!(split_fields("-a-b-c"), vec!["", "a", "b", "c"]);
    }

    #[test]
    fn test_split_fields_empty_line() {
        assert_eq!(split_fields(""), vec![""]);
        assert_eq!(split_fields("no delimiter"), vec!["no delimiter"]);
    }

    #[test]
    fn test_summary_without_failures() {
        let mut summary = ImportSummary::new();
        summary.record_success();
        summary.record_success();

        assert_eq!(summary.to_string(), "Successfully imported 2 patrons.");
        assert!(!summary.has_failures());
        assert_eq!(summary.total(), 2);
    }

    #[test]
    fn test_summary_lists_failures_in_order() {
        let mut summary = ImportSummary::new();
        summary.record_success();
        summary.record_failure(2, "only-three-fields", "Invalid data format. Expected 4 columns, found 3.");
        summary.record_failure(3, "123-A-B-1", "Patron ID must be 7 digits.");

        assert_eq!(
            summary.to_string(),
            "Successfully imported 1 patrons.\
             \nThe following lines failed\
             \nLine: only-three-fields Exception: Invalid data format. Expected 4 columns, found 3.\
             \n-----------------------------\
             \nLine: 123-A-B-1 Exception: Patron ID must be 7 digits.\
             \n-----------------------------"
        );
        assert_eq!(summary.total(), 3);
    }

    #[test]
    fn test_summary_serializes_to_json() {
        let mut summary = ImportSummary::new();
        summary.record_failure(1, "x", "bad");

        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["imported"], 0);
        assert_eq!(json["failures"][0]["line_number"], 1);
        assert_eq!(json["failures"][0]["line"], "x");
        assert_eq!(json["failures"][0]["message"], "bad");
    }

    #[test]
    fn test_report_json_shape() {
        let mut summary = ImportSummary::new();
        summary.record_success();
        summary.record_failure(2, "only-three-fields", "Invalid data format. Expected 4 columns, found 3.");
        let patron = Patron::new("1234567", "Alice", "123 Main St", "10.00").unwrap();

        let report = ImportReport {
            summary: &summary,
            patrons: vec![&patron],
        };
        let json = serde_json::to_value(&report).unwrap();

        let mut keys: Vec<&str> = json.as_object().unwrap().keys().map(String::as_str).collect();
        keys.sort_unstable();
        assert_eq!(keys, vec!["failures", "imported", "patrons"]);

        assert_eq!(json["imported"], 1);
        assert_eq!(json["failures"][0]["line_number"], 2);
        assert_eq!(json["patrons"][0]["id"], "1234567");
        assert_eq!(json["patrons"][0]["name"], "Alice");
        assert_eq!(json["patrons"][0]["address"], "123 Main St");
    }
}
