use super::ExtractionStrategy;
use crate::config::ExtractionConfig;
use crate::models::{truncate_chars, FileDescriptor, StrategyKind};

/// Workbooks are summarised, not dumped: sheet names plus a small sample of
/// the first sheet.
#[derive(Debug, Default)]
pub struct Spreadsheet;

impl ExtractionStrategy for Spreadsheet {
    fn kind(&self) -> StrategyKind {
        StrategyKind::Spreadsheet
    }

    fn extract(&self, file: &FileDescriptor, limits: &ExtractionConfig) -> anyhow::Result<String> {
        let (sheets, rows) = read_sample(file, limits)?;
        let sample = rows.join("\n");
        let summary = format!(
            "Spreadsheet: {}\nSheets: {}\nSample rows:\n{}",
            file.file_name,
            sheets.join(", "),
            truncate_chars(&sample, limits.sample_chars)
        );
        Ok(truncate_chars(&summary, limits.max_chars).to_string())
    }

    fn describe_failure(&self, file: &FileDescriptor) -> String {
        format!("spreadsheet read error: {}", file.file_name)
    }
}

#[cfg(feature = "office")]
fn read_sample(
    file: &FileDescriptor,
    limits: &ExtractionConfig,
) -> anyhow::Result<(Vec<String>, Vec<String>)> {
    use calamine::{open_workbook_auto, DataType, Reader};

    let mut workbook = open_workbook_auto(&file.path)?;
    let sheets: Vec<String> = workbook.sheet_names().to_vec();
    if sheets.is_empty() {
        return Ok((sheets, Vec::new()));
    }
    let first = sheets[0].clone();
    let range = workbook
        .worksheet_range(&first)
        .ok_or_else(|| anyhow::anyhow!("sheet {first} not found"))??;

    let rows = range
        .rows()
        .take(limits.sample_rows)
        .map(|row| {
            row.iter()
                .take(limits.sample_cols)
                .filter(|cell| !matches!(cell, DataType::Empty))
                .map(|cell| cell.to_string())
                .collect::<Vec<_>>()
                .join(" | ")
        })
        .filter(|line| !line.is_empty())
        .collect();
    Ok((sheets, rows))
}

#[cfg(not(feature = "office"))]
fn read_sample(
    _file: &FileDescriptor,
    _limits: &ExtractionConfig,
) -> anyhow::Result<(Vec<String>, Vec<String>)> {
    anyhow::bail!("built without the `office` feature")
}
