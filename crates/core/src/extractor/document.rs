//! Word-processor and PDF documents.

use super::ExtractionStrategy;
use crate::config::ExtractionConfig;
use crate::models::{truncate_chars, FileDescriptor, StrategyKind};

#[derive(Debug, Default)]
pub struct WordDocument;

impl ExtractionStrategy for WordDocument {
    fn kind(&self) -> StrategyKind {
        StrategyKind::WordDocument
    }

    fn extract(&self, file: &FileDescriptor, limits: &ExtractionConfig) -> anyhow::Result<String> {
        let text = docx_text(file)?;
        Ok(format!(
            "Document: {}\n\n{}",
            file.file_name,
            truncate_chars(&text, limits.max_chars)
        ))
    }

    fn describe_failure(&self, file: &FileDescriptor) -> String {
        format!("document read error: {}", file.file_name)
    }
}

#[cfg(feature = "office")]
fn docx_text(file: &FileDescriptor) -> anyhow::Result<String> {
    use docx_rs::{DocumentChild, ParagraphChild, RunChild};

    let bytes = std::fs::read(&file.path)?;
    let doc = docx_rs::read_docx(&bytes)
        .map_err(|e| anyhow::anyhow!("parsing {}: {:?}", file.path.display(), e))?;

    let mut paragraphs = Vec::new();
    for child in &doc.document.children {
        if let DocumentChild::Paragraph(para) = child {
            let mut line = String::new();
            for p_child in &para.children {
                if let ParagraphChild::Run(run) = p_child {
                    for run_child in &run.children {
                        if let RunChild::Text(t) = run_child {
                            line.push_str(&t.text);
                        }
                    }
                }
            }
            paragraphs.push(line);
        }
    }
    Ok(paragraphs.join("\n"))
}

#[cfg(not(feature = "office"))]
fn docx_text(_file: &FileDescriptor) -> anyhow::Result<String> {
    anyhow::bail!("built without the `office` feature")
}

#[derive(Debug, Default)]
pub struct PdfDocument;

impl ExtractionStrategy for PdfDocument {
    fn kind(&self) -> StrategyKind {
        StrategyKind::Pdf
    }

    fn extract(&self, file: &FileDescriptor, limits: &ExtractionConfig) -> anyhow::Result<String> {
        let text = pdf_text(file)?;
        Ok(format!(
            "PDF: {}\n\n{}",
            file.file_name,
            truncate_chars(&text, limits.max_chars)
        ))
    }

    fn describe_failure(&self, file: &FileDescriptor) -> String {
        format!("PDF read error: {}", file.file_name)
    }
}

#[cfg(feature = "pdf")]
fn pdf_text(file: &FileDescriptor) -> anyhow::Result<String> {
    let doc = lopdf::Document::load(&file.path)?;
    let mut pages = Vec::new();
    for page in doc.get_pages().keys() {
        // A page without extractable text counts as empty.
        pages.push(doc.extract_text(&[*page]).unwrap_or_default());
    }
    let text = pages.join("\n");
    if !text.trim().is_empty() {
        return Ok(text);
    }

    // Fonts lopdf cannot decode sometimes still work with pdf-extract, which can panic
    // on malformed glyph tables.
    let bytes = std::fs::read(&file.path)?;
    match std::panic::catch_unwind(|| pdf_extract::extract_text_from_mem(&bytes)) {
        Ok(Ok(text)) => Ok(text),
        Ok(Err(e)) => {
            tracing::debug!(path = %file.path.display(), error = %e, "pdf-extract found no text");
            Ok(String::new())
        }
        Err(_) => {
            tracing::warn!(path = %file.path.display(), "pdf-extract panicked");
            Ok(String::new())
        }
    }
}

#[cfg(not(feature = "pdf"))]
fn pdf_text(_file: &FileDescriptor) -> anyhow::Result<String> {
    anyhow::bail!("built without the `pdf` feature")
}
