use crate::classifier::sanitize_label;
use anyhow::{bail, Context};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub provider: ProviderConfig,
    #[serde(default)]
    pub extraction: ExtractionConfig,
    #[serde(default)]
    pub classification: ClassificationConfig,
    #[serde(default)]
    pub labels: LabelConfig,
    #[serde(default)]
    pub organize: OrganizeConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderConfig {
    /// gemini | openai | noop
    pub kind: String,
    pub model: String,
    pub base_url: Option<String>,
    pub api_key: Option<String>,
    /// Environment variable consulted when `api_key` is unset.
    pub api_key_env: Option<String>,
    pub timeout_secs: Option<u64>,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            kind: "gemini".to_string(),
            model: providers::gemini::DEFAULT_MODEL.to_string(),
            base_url: None,
            api_key: None,
            api_key_env: None,
            timeout_secs: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    pub max_chars: usize,
    pub sample_rows: usize,
    pub sample_cols: usize,
    pub sample_chars: usize,
    pub delimited_rows: usize,
    pub sniff_unknown: bool,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            max_chars: 10_000,
            sample_rows: 5,
            sample_cols: 5,
            sample_chars: 1_000,
            delimited_rows: 10,
            sniff_unknown: true,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassificationConfig {
    pub prompt_chars: usize,
    pub max_label_chars: usize,
    pub example_categories: Vec<String>,
    pub broad_category: String,
}

impl Default for ClassificationConfig {
    fn default() -> Self {
        Self {
            prompt_chars: 10_000,
            max_label_chars: 64,
            example_categories: [
                "Finance",
                "Reports",
                "Contracts",
                "Invoices",
                "Images",
                "Source Code",
                "Personal Documents",
                "Study Material",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
            broad_category: "General".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LabelConfig {
    pub not_processed: String,
    pub indefinite: String,
    pub error: String,
}

impl Default for LabelConfig {
    fn default() -> Self {
        Self {
            not_processed: "Not_Processed".to_string(),
            indefinite: "Unsorted".to_string(),
            error: "Classification_Error".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OrganizeConfig {
    pub dry_run: bool,
    /// rename | skip | overwrite
    pub conflict: String,
    pub copy_then_delete: bool,
    pub include_hidden: bool,
    pub exclude: Vec<String>,
}

impl Default for OrganizeConfig {
    fn default() -> Self {
        Self {
            dry_run: false,
            conflict: "rename".to_string(),
            copy_then_delete: false,
            include_hidden: false,
            exclude: vec![".env".to_string(), "*.part".to_string()],
        }
    }
}

impl AppConfig {
    pub fn validate(&self) -> anyhow::Result<()> {
        for (field, value) in [
            ("labels.not_processed", &self.labels.not_processed),
            ("labels.indefinite", &self.labels.indefinite),
            ("labels.error", &self.labels.error),
        ] {
            let clean = sanitize_label(value, self.classification.max_label_chars);
            if clean.is_empty() || &clean != value {
                bail!("{field} = {value:?} is not a folder-safe label (try {clean:?})");
            }
        }
        if self.extraction.max_chars == 0 || self.classification.prompt_chars == 0 {
            bail!("extraction.max_chars and classification.prompt_chars must be positive");
        }
        if self.classification.max_label_chars == 0 {
            bail!("classification.max_label_chars must be positive");
        }
        Ok(())
    }

    /// Fills `provider.api_key` from the environment when it was not configured.
    pub fn resolve_api_key(&mut self) {
        if self.provider.api_key.is_some() {
            return;
        }
        let var = self.provider.api_key_env.clone().or_else(|| {
            match self.provider.kind.as_str() {
                "gemini" => Some("GOOGLE_API_KEY".to_string()),
                "openai" => Some("OPENAI_API_KEY".to_string()),
                _ => None,
            }
        });
        if let Some(var) = var {
            self.provider.api_key = std::env::var(&var).ok().filter(|v| !v.trim().is_empty());
        }
    }
}

/// Loads the TOML file (or `config/default` when present), then `SORTER__SECTION__KEY`
/// environment overrides.
pub fn load(path: Option<&str>) -> anyhow::Result<AppConfig> {
    let mut settings = config::Config::builder();
    if let Some(p) = path {
        settings = settings.add_source(config::File::with_name(p));
    } else {
        settings = settings.add_source(config::File::with_name("config/default").required(false));
    }
    settings = settings.add_source(
        config::Environment::with_prefix("SORTER")
            .separator("__")
            .try_parsing(true),
    );
    let cfg = settings.build().context("reading configuration")?;
    let mut cfg: AppConfig = cfg.try_deserialize().context("parsing configuration")?;
    cfg.resolve_api_key();
    cfg.validate()?;
    Ok(cfg)
}
