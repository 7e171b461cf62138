//! Table output formatting using the `tabled` crate

use super::OutputConfig;
use tabled::{
    builder::Builder,
    settings::{object::Columns, style::Style, Alignment, Modify},
};

/// Table output formatter
pub struct TableOutput;

impl TableOutput {
    /// Create a simple table from rows of strings
    ///
    /// Columns listed in `right_aligned` are right-aligned.
    pub fn from_rows(
        headers: &[&str],
        rows: &[Vec<String>],
        right_aligned: &[usize],
        config: &OutputConfig,
    ) -> String {
        if rows.is_empty() {
            return "(no results)".to_string();
        }

        let mut builder = Builder::default();
        builder.push_record(headers.iter().copied());

        for row in rows {
            builder.push_record(row.iter().map(|s| s.as_str()));
        }

        let mut table = builder.build();

        if config.compact {
            table.with(Style::blank());
        } else {
            table.with(Style::rounded());
        }

        for &i in right_aligned {
            table.with(Modify::new(Columns::single(i)).with(Alignment::right()));
        }

        table.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::super::OutputFormat;
    use super::*;

    #[test]
    fn test_from_rows() {
        let headers = ["Col1", "Col2"];
        let rows = vec![
            vec!["a".to_string(), "b".to_string()],
            vec!["c".to_string(), "42".to_string()],
        ];

        let config = OutputConfig::new(OutputFormat::Table);
        let output = TableOutput::from_rows(&headers, &rows, &[1], &config);

        assert!(output.contains("Col1"));
        assert!(output.contains("Col2"));
        assert!(output.contains('a'));
        assert!(output.contains("42"));
    }

    #[test]
    fn test_empty_rows() {
        let config = OutputConfig::new(OutputFormat::Table);
        let output = TableOutput::from_rows(&["Name"], &[], &[], &config);
        assert_eq!(output, "(no results)");
    }
}
