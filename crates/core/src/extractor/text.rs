use super::ExtractionStrategy;
use crate::config::ExtractionConfig;
use crate::models::{truncate_chars, FileDescriptor, StrategyKind};
use anyhow::Context;
use std::fs;

/// Text, markup, config and source files. UTF-8 first, Latin-1 otherwise.
#[derive(Debug, Default)]
pub struct PlainText;

impl ExtractionStrategy for PlainText {
    fn kind(&self) -> StrategyKind {
        StrategyKind::PlainText
    }

    fn extract(&self, file: &FileDescriptor, limits: &ExtractionConfig) -> anyhow::Result<String> {
        let bytes = fs::read(&file.path)
            .with_context(|| format!("reading {}", file.path.display()))?;
        let text = decode(bytes);
        Ok(format!(
            "File: {}\n\n{}",
            file.file_name,
            truncate_chars(&text, limits.max_chars)
        ))
    }

    fn describe_failure(&self, file: &FileDescriptor) -> String {
        format!("unreadable text file: {}", file.file_name)
    }
}

pub(crate) fn decode(bytes: Vec<u8>) -> String {
    match String::from_utf8(bytes) {
        Ok(text) => text,
        // Latin-1 maps every byte to the code point of the same value.
        Err(err) => err.into_bytes().iter().map(|&b| b as char).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_utf8_falls_back_to_latin1() {
        assert_eq!(decode(b"caf\xe9".to_vec()), "café");
        assert_eq!(decode("café".as_bytes().to_vec()), "café");
    }
}
