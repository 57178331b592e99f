use crate::logic::types::ReportRow;
use tracing::info;

const HEADERS: [&str; 7] = [
    "Input Token",
    "Output Token",
    "Input Amount",
    "Pool Return",
    "Aggregator Expected Rate",
    "Aggregator Worst Rate",
    "Timestamp",
];

/// Sink for a tick's rows.
pub trait Reporter: Send + Sync {
    fn render(&self, rows: &[ReportRow]);
}

/// Writes every batch as a table to the tracing log.
#[derive(Debug, Clone, Copy, Default)]
pub struct TableReporter;

impl Reporter for TableReporter {
    fn render(&self, rows: &[ReportRow]) {
        info!("\n{}", format_table(rows));
    }
}

fn cells(row: &ReportRow) -> [String; 7] {
    [
        row.input_symbol.clone(),
        row.output_symbol.clone(),
        row.input_amount.clone(),
        row.pool_return.clone(),
        row.aggregator_expected_rate.clone(),
        row.aggregator_worst_rate.clone(),
        row.captured_at.to_rfc3339(),
    ]
}

/// Header line followed by one line per row, columns padded to their widest cell.
pub fn format_table(rows: &[ReportRow]) -> String {
    let body: Vec<[String; 7]> = rows.iter().map(cells).collect();

    let mut widths = HEADERS.map(str::len);
    for line in &body {
        for (width, cell) in widths.iter_mut().zip(line) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let format_line = |line: &[String]| {
        line.iter()
            .zip(widths)
            .map(|(cell, width)| format!("{:<width$}", cell, width = width))
            .collect::<Vec<_>>()
            .join(" | ")
            .trim_end()
            .to_string()
    };

    let header = HEADERS.map(str::to_string);
    let mut lines = Vec::with_capacity(rows.len() + 2);
    lines.push(format_line(&header[..]));
    lines.push(widths.iter().map(|w| "-".repeat(*w)).collect::<Vec<_>>().join("-+-"));
    lines.extend(body.iter().map(|line| format_line(&line[..])));
    lines.join("\n")
}
