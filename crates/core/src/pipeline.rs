use crate::classifier::Classifier;
use crate::config::AppConfig;
use crate::extractor::ExtractorRegistry;
use anyhow::Context;
use providers::gemini::{GeminiConfig, GeminiProvider};
use providers::noop::NoopProvider;
use providers::openai::{OpenAiConfig, OpenAiProvider};
use providers::ProviderRegistry;
use std::sync::Arc;
use tracing::{info, warn};

/// Registers `noop` plus the configured backend when it can be built.
pub fn build_registry(config: &AppConfig) -> ProviderRegistry {
    let mut reg = ProviderRegistry::new().with_llm("noop", Arc::new(NoopProvider));
    let p = &config.provider;

    match p.kind.as_str() {
        "gemini" => match GeminiProvider::new(GeminiConfig {
            api_key: p.api_key.clone().unwrap_or_default(),
            base_url: p
                .base_url
                .clone()
                .unwrap_or_else(|| providers::gemini::DEFAULT_BASE_URL.to_string()),
            model: p.model.clone(),
            timeout_secs: p.timeout_secs,
        }) {
            Ok(provider) => reg = reg.with_llm("gemini", Arc::new(provider)),
            Err(e) => warn!(error = %e, "gemini provider unavailable"),
        },
        "openai" => match OpenAiProvider::new(OpenAiConfig {
            api_key: p.api_key.clone(),
            base_url: p
                .base_url
                .clone()
                .unwrap_or_else(|| providers::openai::DEFAULT_BASE_URL.to_string()),
            chat_model: p.model.clone(),
            timeout_secs: p.timeout_secs,
        }) {
            Ok(provider) => reg = reg.with_llm("openai", Arc::new(provider)),
            Err(e) => warn!(error = %e, "openai provider unavailable"),
        },
        "noop" => {}
        other => warn!(provider = other, "unknown provider kind"),
    }

    reg.set_preferred_llm(&p.kind)
}

pub fn build_classifier(config: &AppConfig) -> anyhow::Result<Classifier> {
    let registry = build_registry(config);
    let provider = registry
        .llm(None)
        .with_context(|| format!("provider {:?} is not available", config.provider.kind))?;
    info!(
        provider = %config.provider.kind,
        model = %config.provider.model,
        "classifier ready"
    );
    Ok(Classifier::new(
        provider,
        Arc::new(ExtractorRegistry::with_defaults(config.extraction.clone())),
        config.classification.clone(),
        config.labels.clone(),
    ))
}
