//! Operator tables and agent JSON for command results.

use colored::Colorize;
use comfy_table::{presets::UTF8_FULL, Attribute, Cell, ContentArrangement, Table};
use serde::Serialize;

/// One input amount and what became of it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AmountRow {
    pub row: usize,
    pub input: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl AmountRow {
    pub fn ok(row: usize, input: &str, output: String) -> Self {
        Self {
            row,
            input: input.to_string(),
            output: Some(output),
            error: None,
        }
    }

    pub fn failed(row: usize, input: &str, error: impl ToString) -> Self {
        Self {
            row,
            input: input.to_string(),
            output: None,
            error: Some(error.to_string()),
        }
    }
}

/// Result of one command over all of its amounts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Report {
    pub operation: &'static str,
    pub unit: &'static str,
    pub success: bool,
    pub rows: Vec<AmountRow>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
}

impl Report {
    pub fn new(
        operation: &'static str,
        unit: &'static str,
        rows: Vec<AmountRow>,
        warnings: Vec<String>,
    ) -> Self {
        let success = rows.iter().all(|row| row.error.is_none());
        Self {
            operation,
            unit,
            success,
            rows,
            warnings,
        }
    }

    pub fn error_count(&self) -> usize {
        self.rows.iter().filter(|row| row.error.is_some()).count()
    }
}

/// Agent-mode error payload for failures that stop a command before any row is processed.
#[derive(Debug, Clone, Serialize)]
pub struct AgentError {
    pub error: String,
    pub code: i32,
    pub message: String,
}

fn human_header(title: &str) -> String {
    let rule = "═".repeat(63);
    format!(
        "{}\n{}\n{}",
        format!("╔{rule}╗").bright_white(),
        format!("║  {title:<61}║").bright_white(),
        format!("╚{rule}╝").bright_white()
    )
}

fn render_rows_table(report: &Report) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);

    table.set_header(vec![
        Cell::new("Row").add_attribute(Attribute::Bold),
        Cell::new("Input").add_attribute(Attribute::Bold),
        Cell::new("Result").add_attribute(Attribute::Bold),
        Cell::new("Status").add_attribute(Attribute::Bold),
    ]);

    for row in &report.rows {
        let (result, status) = match (&row.output, &row.error) {
            (_, Some(error)) => (
                error.red().to_string(),
                format!("{} {}", "✗".red(), "Rejected".red()),
            ),
            (Some(output), None) => (
                output.clone(),
                format!("{} {}", "✓".green(), "Ok".green()),
            ),
            (None, None) => ("-".to_string(), "-".to_string()),
        };
        table.add_row(vec![
            Cell::new(row.row),
            Cell::new(&row.input),
            Cell::new(result),
            Cell::new(status),
        ]);
    }

    table
}

/// Operator-mode rendering: header, table, then warnings and a summary line.
pub fn render_human(report: &Report) -> String {
    let title = format!("TALLY — {} ({})", report.operation, report.unit);
    let mut out = String::new();
    out.push_str(&human_header(&title));
    out.push_str("\n\n");
    out.push_str(&render_rows_table(report).to_string());
    out.push('\n');

    for warning in &report.warnings {
        out.push_str(&format!("{} {}\n", "⚠".yellow(), warning.yellow()));
    }

    let errors = report.error_count();
    if errors == 0 {
        out.push_str(&format!(
            "{} {}\n",
            "Amounts:".bright_white().bold(),
            report.rows.len().to_string().bright_white().bold()
        ));
    } else {
        out.push_str(&format!(
            "{} {} of {} amounts rejected.\n",
            "✗".red(),
            errors,
            report.rows.len()
        ));
    }
    out
}

/// Agent-mode rendering: a single compact JSON document.
pub fn render_agent(report: &Report) -> Result<String, serde_json::Error> {
    serde_json::to_string(report)
}

#[cfg(test)]
mod tests {
    use serde_json::Value;

    use super::*;

    fn sample_report() -> Report {
        Report::new(
            "balance",
            "satoshi",
            vec![
                AmountRow::ok(1, "123456789", "1.23456789".to_string()),
                AmountRow::failed(2, "abc", "amount is not a finite number (got NaN)"),
            ],
            vec!["row 2: 'abc' is not an exact integer amount".to_string()],
        )
    }

    #[test]
    fn success_reflects_row_errors() {
        let report = sample_report();
        assert!(!report.success);
        assert_eq!(report.error_count(), 1);

        let clean = Report::new(
            "balance",
            "satoshi",
            vec![AmountRow::ok(1, "1", "0.00000001".into())],
            Vec::new(),
        );
        assert!(clean.success);
    }

    #[test]
    fn agent_json_skips_absent_fields() {
        let rendered = render_agent(&sample_report()).unwrap();
        let parsed: Value = serde_json::from_str(&rendered).unwrap();

        assert_eq!(parsed["operation"], "balance");
        assert_eq!(parsed["success"], false);
        assert_eq!(parsed["rows"][0]["output"], "1.23456789");
        assert!(parsed["rows"][0].get("error").is_none());
        assert!(parsed["rows"][1].get("output").is_none());
        assert_eq!(parsed["warnings"].as_array().unwrap().len(), 1);
    }

    #[test]
    fn agent_json_omits_empty_warnings() {
        let report = Report::new("reward", "wei", Vec::new(), Vec::new());
        let parsed: Value = serde_json::from_str(&render_agent(&report).unwrap()).unwrap();
        assert!(parsed.get("warnings").is_none());
    }

    #[test]
    fn human_output_lists_every_row() {
        colored::control::set_override(false);
        let rendered = render_human(&sample_report());
        assert!(rendered.contains("TALLY — balance (satoshi)"));
        assert!(rendered.contains("1.23456789"));
        assert!(rendered.contains("abc"));
        assert!(rendered.contains("1 of 2 amounts rejected."));
    }
}
