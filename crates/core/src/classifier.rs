//! Turns one file into one folder-safe category label.
//!
//! `Classifier::classify` never fails: extraction problems, backend errors and
//! unusable model replies all map to sentinel labels so a batch keeps going.

use crate::config::{ClassificationConfig, LabelConfig};
use crate::extractor::ExtractorRegistry;
use crate::models::{truncate_chars, CategoryLabel, ExtractedContent, FileDescriptor, Sentinel};
use crate::prompt;
use providers::LlmProvider;
use std::sync::Arc;
use tracing::{debug, warn};

pub struct Classifier {
    provider: Arc<dyn LlmProvider>,
    extractors: Arc<ExtractorRegistry>,
    settings: ClassificationConfig,
    labels: LabelConfig,
}

impl Classifier {
    pub fn new(
        provider: Arc<dyn LlmProvider>,
        extractors: Arc<ExtractorRegistry>,
        settings: ClassificationConfig,
        labels: LabelConfig,
    ) -> Self {
        Self {
            provider,
            extractors,
            settings,
            labels,
        }
    }

    /// Extraction runs on the blocking pool; a panic there counts as "nothing extracted".
    pub async fn extract(&self, file: &FileDescriptor) -> Option<ExtractedContent> {
        let extractors = self.extractors.clone();
        let owned = file.clone();
        match tokio::task::spawn_blocking(move || extractors.extract(&owned)).await {
            Ok(content) => Some(content),
            Err(err) => {
                warn!(path = %file.path.display(), error = %err, "extraction task aborted");
                None
            }
        }
    }

    pub async fn classify(&self, file: &FileDescriptor) -> CategoryLabel {
        match self.extract(file).await {
            Some(content) if !content.is_blank() => {
                debug!(
                    path = %file.path.display(),
                    strategy = ?content.strategy,
                    degraded = content.degraded,
                    chars = content.text.chars().count(),
                    "extracted"
                );
                self.classify_content(&content).await
            }
            _ => {
                warn!(path = %file.path.display(), "no content extracted, leaving file unprocessed");
                self.sentinel(Sentinel::NotProcessed)
            }
        }
    }

    pub async fn classify_content(&self, content: &ExtractedContent) -> CategoryLabel {
        if content.is_blank() {
            return self.sentinel(Sentinel::NotProcessed);
        }
        let bounded = truncate_chars(&content.text, self.settings.prompt_chars);
        let prompt = prompt::build(bounded, &self.settings);

        let raw = match self.provider.complete(&prompt.system, &prompt.user).await {
            Ok(raw) => raw,
            Err(err) => {
                warn!(error = %err, "classification backend failed");
                return self.sentinel(Sentinel::ClassificationError);
            }
        };

        let name = normalize_reply(&raw, self.settings.max_label_chars);
        if name.is_empty() {
            debug!(raw = %raw, "model reply had no usable characters");
            return self.sentinel(Sentinel::Indefinite);
        }
        CategoryLabel::category(name)
    }

    pub fn sentinel(&self, sentinel: Sentinel) -> CategoryLabel {
        let name = match sentinel {
            Sentinel::NotProcessed => &self.labels.not_processed,
            Sentinel::Indefinite => &self.labels.indefinite,
            Sentinel::ClassificationError => &self.labels.error,
        };
        CategoryLabel {
            name: name.clone(),
            kind: sentinel.into(),
        }
    }
}

/// Sanitizes the first non-blank line of a model reply.
pub fn normalize_reply(raw: &str, max_chars: usize) -> String {
    let line = raw.lines().find(|l| !l.trim().is_empty()).unwrap_or("");
    sanitize_label(line, max_chars)
}

/// Keeps alphanumerics, space, `_` and `-`; trims; turns spaces into `_` and
/// collapses underscore runs. Applying it twice gives the same result.
pub fn sanitize_label(raw: &str, max_chars: usize) -> String {
    let kept: String = raw
        .chars()
        .filter(|c| c.is_alphanumeric() || matches!(c, ' ' | '_' | '-'))
        .collect();

    let mut label = String::with_capacity(kept.len());
    for c in kept.trim().chars() {
        let c = if c == ' ' { '_' } else { c };
        if c == '_' && label.ends_with('_') {
            continue;
        }
        label.push(c);
    }

    if label.chars().count() > max_chars {
        label = truncate_chars(&label, max_chars)
            .trim_end_matches('_')
            .to_string();
    }
    label
}
