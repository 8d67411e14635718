use providers::scripted::ScriptedProvider;
use providers::ProviderError;
use sorter_core::classifier::Classifier;
use sorter_core::config::{AppConfig, ClassificationConfig, ExtractionConfig, LabelConfig};
use sorter_core::extractor::{ExtractionStrategy, ExtractorRegistry};
use sorter_core::models::{FileDescriptor, LabelKind, Sentinel, StrategyKind};
use sorter_core::pipeline;
use std::fs;
use std::sync::Arc;
use tempfile::tempdir;

fn classifier_with(provider: Arc<ScriptedProvider>, settings: ClassificationConfig) -> Classifier {
    Classifier::new(
        provider,
        Arc::new(ExtractorRegistry::with_defaults(ExtractionConfig::default())),
        settings,
        LabelConfig::default(),
    )
}

fn classifier(provider: Arc<ScriptedProvider>) -> Classifier {
    classifier_with(provider, ClassificationConfig::default())
}

fn text_file(dir: &std::path::Path, name: &str, body: &str) -> FileDescriptor {
    let path = dir.join(name);
    fs::write(&path, body).unwrap();
    FileDescriptor::new(path)
}

#[tokio::test]
async fn model_reply_is_sanitized_into_a_folder_name() {
    let temp = tempdir().unwrap();
    let file = text_file(temp.path(), "q3.txt", "Revenue grew 12% over the quarter.");
    let provider = Arc::new(ScriptedProvider::new().reply("  Relatórios Financeiros!!  "));

    let label = classifier(provider.clone()).classify(&file).await;
    assert_eq!(label.kind, LabelKind::Category);
    assert_eq!(label.name, "Relatórios_Financeiros");
    assert!(!label.is_sentinel());

    let calls = provider.calls();
    assert_eq!(calls.len(), 1);
    assert!(calls[0].system.contains("1 to 3 words"));
    assert!(calls[0].user.contains("File: q3.txt"));
    assert!(calls[0].user.contains("Revenue grew 12%"));
}

#[tokio::test]
async fn punctuation_only_reply_is_indefinite() {
    let temp = tempdir().unwrap();
    let file = text_file(temp.path(), "misc.txt", "???");
    let provider = Arc::new(ScriptedProvider::new().reply("!!!"));

    let label = classifier(provider).classify(&file).await;
    assert_eq!(label.kind, LabelKind::Indefinite);
    assert_eq!(label.name, "Unsorted");
}

#[tokio::test]
async fn backend_failures_become_the_error_label() {
    let temp = tempdir().unwrap();
    let file = text_file(temp.path(), "a.txt", "hello");
    let provider = Arc::new(
        ScriptedProvider::new()
            .fail(ProviderError::Timeout)
            .fail(ProviderError::QuotaExceeded("daily limit".into()))
            .fail(ProviderError::MalformedResponse("no candidates".into())),
    );
    let classifier = classifier(provider);

    for _ in 0..3 {
        let label = classifier.classify(&file).await;
        assert_eq!(label.kind, LabelKind::ClassificationError);
        assert_eq!(label.name, "Classification_Error");
    }
}

#[tokio::test]
async fn awkward_inputs_still_get_a_label() {
    let temp = tempdir().unwrap();
    let empty = text_file(temp.path(), "empty.txt", "");
    let no_ext = text_file(temp.path(), "LICENSE", "MIT License");
    let missing = FileDescriptor::new(temp.path().join("missing.pdf"));

    let provider = Arc::new(
        ScriptedProvider::new()
            .reply("General")
            .reply("Legal")
            .reply("Documents"),
    );
    let classifier = classifier(provider.clone());

    let labels = [
        classifier.classify(&empty).await,
        classifier.classify(&no_ext).await,
        classifier.classify(&missing).await,
    ];
    let names: Vec<&str> = labels.iter().map(|l| l.name.as_str()).collect();
    assert_eq!(names, vec!["General", "Legal", "Documents"]);

    let calls = provider.calls();
    assert!(calls[1].user.contains("not content-processable: LICENSE, extension none"));
    assert!(calls[2].user.contains("PDF read error: missing.pdf"));
}

#[tokio::test]
async fn prompt_content_is_bounded() {
    let temp = tempdir().unwrap();
    let file = text_file(temp.path(), "long.txt", &"word ".repeat(10_000));
    let provider = Arc::new(ScriptedProvider::new().reply("Notes"));
    let settings = ClassificationConfig {
        prompt_chars: 200,
        ..ClassificationConfig::default()
    };

    classifier_with(provider.clone(), settings).classify(&file).await;
    let user = &provider.calls()[0].user;
    let payload = user.trim_start_matches("File content:\n");
    assert_eq!(payload.chars().count(), 200);
}

struct Silent;

impl ExtractionStrategy for Silent {
    fn kind(&self) -> StrategyKind {
        StrategyKind::PlainText
    }

    fn extract(&self, _file: &FileDescriptor, _limits: &ExtractionConfig) -> anyhow::Result<String> {
        Ok(String::new())
    }

    fn describe_failure(&self, _file: &FileDescriptor) -> String {
        String::new()
    }
}

#[tokio::test]
async fn blank_extraction_is_not_processed_and_skips_the_model() {
    let provider = Arc::new(ScriptedProvider::new().reply("Anything"));
    let extractors = ExtractorRegistry::with_defaults(ExtractionConfig::default())
        .with_strategy("void", Arc::new(Silent));
    let classifier = Classifier::new(
        provider.clone(),
        Arc::new(extractors),
        ClassificationConfig::default(),
        LabelConfig::default(),
    );

    let label = classifier.classify(&FileDescriptor::new("/nowhere/x.void")).await;
    assert_eq!(label.kind, LabelKind::NotProcessed);
    assert_eq!(label.name, "Not_Processed");
    assert!(provider.calls().is_empty());
}

#[tokio::test]
async fn sentinel_names_follow_configuration() {
    let temp = tempdir().unwrap();
    let file = text_file(temp.path(), "a.txt", "conteúdo");
    let provider = Arc::new(
        ScriptedProvider::new()
            .reply("...")
            .fail(ProviderError::RequestFailed("connection reset".into())),
    );
    let labels = LabelConfig {
        not_processed: "Nao_Processado".into(),
        indefinite: "Indefinidos".into(),
        error: "Erro_IA".into(),
    };
    let classifier = Classifier::new(
        provider,
        Arc::new(ExtractorRegistry::with_defaults(ExtractionConfig::default())),
        ClassificationConfig::default(),
        labels,
    );

    assert_eq!(classifier.classify(&file).await.name, "Indefinidos");
    assert_eq!(classifier.classify(&file).await.name, "Erro_IA");
}

#[test]
fn every_sentinel_maps_to_its_own_kind_and_name() {
    let classifier = classifier(Arc::new(ScriptedProvider::new()));
    for (sentinel, kind, name) in [
        (Sentinel::NotProcessed, LabelKind::NotProcessed, "Not_Processed"),
        (Sentinel::Indefinite, LabelKind::Indefinite, "Unsorted"),
        (Sentinel::ClassificationError, LabelKind::ClassificationError, "Classification_Error"),
    ] {
        let label = classifier.sentinel(sentinel);
        assert_eq!(label.kind, kind);
        assert_eq!(label.name, name);
        assert!(label.is_sentinel());
    }
}

#[tokio::test]
async fn noop_backend_yields_error_label() {
    let temp = tempdir().unwrap();
    let file = text_file(temp.path(), "a.txt", "hello");
    let mut cfg = AppConfig::default();
    cfg.provider.kind = "noop".into();

    let classifier = pipeline::build_classifier(&cfg).unwrap();
    let label = classifier.classify(&file).await;
    assert_eq!(label.kind, LabelKind::ClassificationError);
}

#[test]
fn missing_credentials_fail_at_construction() {
    let cfg = AppConfig::default();
    assert_eq!(cfg.provider.kind, "gemini");
    assert!(pipeline::build_classifier(&cfg).is_err());

    let mut cfg = AppConfig::default();
    cfg.provider.api_key = Some("test-key".into());
    assert!(pipeline::build_classifier(&cfg).is_ok());
    assert_eq!(
        pipeline::build_registry(&cfg).names(),
        vec!["gemini".to_string(), "noop".to_string()]
    );
}
