use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::Deserialize;

use crate::chunk::MAX_CHUNK_CHARS;

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com";
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";
pub const DEFAULT_TARGET_LANG: &str = "中文";
pub const DEFAULT_STYLE: &str = "信达雅";

/// Everything a run needs, resolved from CLI flags and the optional config
/// file. Immutable once the worker starts.
#[derive(Clone, Debug)]
pub struct RunConfig {
    pub api_key: Option<String>,
    pub base_url: String,
    pub model: String,
    pub target_lang: String,
    pub style: String,
    pub output_dir: PathBuf,
    pub chunk_chars: usize,
}

/// Optional TOML overlay; every field has a flag that overrides it.
#[derive(Clone, Debug, Deserialize, Default)]
pub struct ConfigFile {
    #[serde(default)]
    pub api: ApiSection,
    #[serde(default)]
    pub translate: TranslateSection,
    #[serde(default)]
    pub output: OutputSection,
}

#[derive(Clone, Debug, Deserialize, Default)]
pub struct ApiSection {
    #[serde(default)]
    pub key: Option<String>,
    #[serde(default)]
    pub base_url: Option<String>,
    #[serde(default)]
    pub model: Option<String>,
}

#[derive(Clone, Debug, Deserialize, Default)]
pub struct TranslateSection {
    #[serde(default)]
    pub target_lang: Option<String>,
    #[serde(default)]
    pub style: Option<String>,
    #[serde(default)]
    pub chunk_chars: Option<usize>,
}

#[derive(Clone, Debug, Deserialize, Default)]
pub struct OutputSection {
    #[serde(default)]
    pub dir: Option<PathBuf>,
}

pub fn load_config_file(path: &Path) -> anyhow::Result<ConfigFile> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("read config: {}", path.display()))?;
    toml::from_str(&text).context("parse config toml")
}

/// Flag values win over file values win over defaults.
#[allow(clippy::too_many_arguments)]
pub fn resolve_config(
    file: ConfigFile,
    api_key: Option<String>,
    base_url: Option<String>,
    model: Option<String>,
    target_lang: Option<String>,
    style: Option<String>,
    output_dir: Option<PathBuf>,
    chunk_chars: Option<usize>,
) -> RunConfig {
    RunConfig {
        api_key: api_key
            .or(file.api.key)
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty()),
        base_url: base_url
            .or(file.api.base_url)
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
        model: model
            .or(file.api.model)
            .unwrap_or_else(|| DEFAULT_MODEL.to_string()),
        target_lang: target_lang
            .or(file.translate.target_lang)
            .unwrap_or_else(|| DEFAULT_TARGET_LANG.to_string()),
        style: style
            .or(file.translate.style)
            .unwrap_or_else(|| DEFAULT_STYLE.to_string()),
        output_dir: output_dir
            .or(file.output.dir)
            .unwrap_or_else(|| PathBuf::from(".")),
        chunk_chars: chunk_chars
            .or(file.translate.chunk_chars)
            .unwrap_or(MAX_CHUNK_CHARS),
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::{resolve_config, ConfigFile, DEFAULT_BASE_URL, DEFAULT_MODEL};
    use crate::chunk::MAX_CHUNK_CHARS;

    #[test]
    fn defaults_apply_when_nothing_is_set() {
        let cfg = resolve_config(
            ConfigFile::default(),
            None,
            None,
            None,
            None,
            None,
            None,
            None,
        );
        assert_eq!(cfg.base_url, DEFAULT_BASE_URL);
        assert_eq!(cfg.model, DEFAULT_MODEL);
        assert_eq!(cfg.api_key, None);
        assert_eq!(cfg.output_dir, PathBuf::from("."));
        assert_eq!(cfg.chunk_chars, MAX_CHUNK_CHARS);
    }

    #[test]
    fn flags_override_file_values() {
        let file: ConfigFile = toml::from_str(
            r#"
            [api]
            key = "file-key"
            model = "file-model"

            [translate]
            target_lang = "日本語"
            chunk_chars = 500
            "#,
        )
        .expect("parse toml");
        let cfg = resolve_config(
            file,
            None,
            None,
            Some("flag-model".to_string()),
            None,
            None,
            None,
            None,
        );
        assert_eq!(cfg.model, "flag-model");
        assert_eq!(cfg.api_key.as_deref(), Some("file-key"));
        assert_eq!(cfg.target_lang, "日本語");
        assert_eq!(cfg.chunk_chars, 500);
    }

    #[test]
    fn blank_api_key_counts_as_absent() {
        let cfg = resolve_config(
            ConfigFile::default(),
            Some("   ".to_string()),
            None,
            None,
            None,
            None,
            None,
            None,
        );
        assert_eq!(cfg.api_key, None);
    }
}
