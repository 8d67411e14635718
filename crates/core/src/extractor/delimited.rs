use super::text::decode;
use super::ExtractionStrategy;
use crate::config::ExtractionConfig;
use crate::models::{truncate_chars, FileDescriptor, StrategyKind};
use anyhow::Context;
use csv::{ReaderBuilder, StringRecord, Trim};
use std::fs;

/// CSV-like data: the first records, fields re-joined with commas.
#[derive(Debug)]
pub struct DelimitedText {
    delimiter: u8,
}

impl DelimitedText {
    pub fn new(delimiter: u8) -> Self {
        Self { delimiter }
    }
}

impl ExtractionStrategy for DelimitedText {
    fn kind(&self) -> StrategyKind {
        StrategyKind::Delimited
    }

    fn extract(&self, file: &FileDescriptor, limits: &ExtractionConfig) -> anyhow::Result<String> {
        let bytes = fs::read(&file.path)
            .with_context(|| format!("reading {}", file.path.display()))?;
        let text = decode(bytes);
        let mut reader = ReaderBuilder::new()
            .delimiter(self.delimiter)
            .has_headers(false)
            .flexible(true)
            .trim(Trim::All)
            .from_reader(text.as_bytes());

        let mut rows = Vec::new();
        for record in reader.records() {
            if rows.len() >= limits.delimited_rows {
                break;
            }
            let record = record.with_context(|| format!("parsing {}", file.file_name))?;
            if record.iter().all(str::is_empty) {
                continue;
            }
            rows.push(join_record(&record));
        }
        let body = format!("Delimited data: {}\n{}", file.file_name, rows.join("\n"));
        Ok(truncate_chars(&body, limits.max_chars).to_string())
    }

    fn describe_failure(&self, file: &FileDescriptor) -> String {
        format!("delimited data read error: {}", file.file_name)
    }
}

/// One output line per record; line breaks inside quoted fields become spaces.
fn join_record(record: &StringRecord) -> String {
    record
        .iter()
        .map(|field| field.split_whitespace().collect::<Vec<_>>().join(" "))
        .collect::<Vec<_>>()
        .join(",")
}
