use std::fs;
use std::path::Path;

use crate::docx;
use crate::error::PipelineError;

/// Closed set of supported source formats, decided purely by extension.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SourceFormat {
    PlainText,
    ModernDocument,
    LegacyDocument,
}

impl SourceFormat {
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "txt" => Some(Self::PlainText),
            "docx" => Some(Self::ModernDocument),
            "doc" => Some(Self::LegacyDocument),
            _ => None,
        }
    }
}

#[derive(Debug)]
pub enum LegacyError {
    /// The host has no word-processor automation to delegate to. Reported
    /// distinctly from a failed conversion so the caller can name the
    /// missing dependency.
    Unavailable,
    Failed(String),
}

/// Optional OS-level capability for reading legacy binary documents.
/// Injectable so the core stays portable; the default implementation is
/// simply absent.
pub trait LegacyConverter: Send + Sync {
    fn convert(&self, path: &Path) -> Result<String, LegacyError>;
}

pub struct NoLegacySupport;

impl LegacyConverter for NoLegacySupport {
    fn convert(&self, _path: &Path) -> Result<String, LegacyError> {
        Err(LegacyError::Unavailable)
    }
}

pub struct DocumentExtractor {
    legacy: Box<dyn LegacyConverter>,
}

impl Default for DocumentExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl DocumentExtractor {
    pub fn new() -> Self {
        Self {
            legacy: Box::new(NoLegacySupport),
        }
    }

    pub fn with_legacy(legacy: Box<dyn LegacyConverter>) -> Self {
        Self { legacy }
    }

    pub fn extract(&self, path: &Path) -> Result<String, PipelineError> {
        let format = SourceFormat::from_path(path)
            .ok_or_else(|| PipelineError::Extraction("unsupported format".to_string()))?;
        match format {
            SourceFormat::PlainText => read_text_lossy(path),
            SourceFormat::ModernDocument => read_modern(path),
            SourceFormat::LegacyDocument => match self.legacy.convert(path) {
                Ok(text) => Ok(text),
                Err(LegacyError::Unavailable) => Err(PipelineError::Extraction(
                    "missing legacy-format dependency".to_string(),
                )),
                Err(LegacyError::Failed(detail)) => Err(PipelineError::Extraction(format!(
                    "automation failure: {detail}"
                ))),
            },
        }
    }
}

/// Lossy UTF-8 decode: malformed bytes become replacement characters, never
/// an error.
fn read_text_lossy(path: &Path) -> Result<String, PipelineError> {
    let bytes = fs::read(path)
        .map_err(|e| PipelineError::Extraction(format!("read {}: {e}", path.display())))?;
    let (text, _, _) = encoding_rs::UTF_8.decode(&bytes);
    Ok(text.into_owned())
}

fn read_modern(path: &Path) -> Result<String, PipelineError> {
    match docx::read::read_paragraphs(path) {
        Ok(paragraphs) => Ok(paragraphs.join("\n")),
        // Structured parse failed; fall back to the tolerant run scan.
        Err(structured) => docx::read::read_all_text_runs(path).map_err(|loose| {
            PipelineError::Extraction(format!("{structured:#}; fallback: {loose:#}"))
        }),
    }
}
