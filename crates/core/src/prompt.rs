use crate::config::ClassificationConfig;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt {
    pub system: String,
    pub user: String,
}

pub fn system_directive(settings: &ClassificationConfig) -> String {
    let examples = settings.example_categories.join(", ");
    format!(
        "You are a file organization assistant. Read the file content sent by the user and \
         reply with ONLY a concise category name of 1 to 3 words that works as a folder name.\n\
         Example categories: {examples}.\n\
         Do not use quotes, punctuation or any explanatory text.\n\
         If the content is ambiguous or too short to judge, reply with a broad category such as {broad}.",
        broad = settings.broad_category
    )
}

/// Builds the instruction pair for content already truncated by the caller.
pub fn build(content: &str, settings: &ClassificationConfig) -> Prompt {
    Prompt {
        system: system_directive(settings),
        user: format!("File content:\n{content}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn directive_carries_examples_and_fallback() {
        let mut settings = ClassificationConfig::default();
        settings.example_categories = vec!["Finanças".into(), "Contratos".into()];
        settings.broad_category = "Diversos".into();
        let prompt = build("hello", &settings);
        assert!(prompt.system.contains("Finanças, Contratos"));
        assert!(prompt.system.contains("Diversos"));
        assert!(prompt.system.contains("ONLY"));
        assert!(prompt.user.ends_with("hello"));
    }
}
