use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};

use crate::chunk::split_chunks;
use crate::client::{directive_prompt, HttpTransport, TranslationClient};
use crate::error::PipelineError;
use crate::extract::DocumentExtractor;
use crate::output::write_outputs;

/// Collaborator boundary: fire-and-forget log and progress callbacks. The
/// worker never depends on a return value.
pub trait EventSink: Send + Sync {
    fn log(&self, msg: &str);
    fn progress(&self, completed: usize, total: usize);
}

/// One file's worth of work. Fixed for the lifetime of a run.
#[derive(Clone, Debug)]
pub struct TranslationJob {
    pub path: PathBuf,
    pub target_lang: String,
    pub style: String,
    pub output_dir: PathBuf,
}

#[derive(Clone, Debug)]
pub enum JobStatus {
    Success {
        txt_path: PathBuf,
        docx_path: PathBuf,
    },
    Failed(String),
    Skipped,
}

/// Terminal status of one file within a run; reported exactly once.
#[derive(Clone, Debug)]
pub struct JobOutcome {
    pub path: PathBuf,
    pub status: JobStatus,
}

/// Drives the per-file pipeline: extract, chunk, translate in chunk order,
/// join, write. Files are processed strictly sequentially; one file's
/// failure never aborts the run.
pub struct BatchTranslator<T: HttpTransport> {
    extractor: DocumentExtractor,
    client: TranslationClient<T>,
    chunk_budget: usize,
}

impl<T: HttpTransport> BatchTranslator<T> {
    pub fn new(
        extractor: DocumentExtractor,
        client: TranslationClient<T>,
        chunk_budget: usize,
    ) -> Self {
        Self {
            extractor,
            client,
            chunk_budget,
        }
    }

    /// Runs all jobs in order. The cancel flag is honored between files
    /// only; an in-flight file finishes before the flag takes effect, and
    /// every remaining job reports `Skipped`.
    pub fn run(
        &self,
        jobs: &[TranslationJob],
        cancel: &AtomicBool,
        sink: &dyn EventSink,
    ) -> Vec<JobOutcome> {
        let total = jobs.len();
        let mut outcomes = Vec::with_capacity(total);
        let mut cancelled = false;
        for (idx, job) in jobs.iter().enumerate() {
            if !cancelled && cancel.load(Ordering::SeqCst) {
                cancelled = true;
                sink.log("stop requested; skipping remaining files");
            }
            let name = display_name(&job.path);
            let status = if cancelled {
                sink.log(&format!("skipped: {name}"));
                JobStatus::Skipped
            } else {
                sink.log(&format!("translating {name} ({}/{total})", idx + 1));
                match self.run_job(job, sink) {
                    Ok((txt_path, docx_path)) => {
                        sink.log(&format!("done: {name}"));
                        JobStatus::Success {
                            txt_path,
                            docx_path,
                        }
                    }
                    Err(err) => {
                        sink.log(&format!("failed {name}: {err}"));
                        JobStatus::Failed(err.to_string())
                    }
                }
            };
            outcomes.push(JobOutcome {
                path: job.path.clone(),
                status,
            });
            sink.progress(idx + 1, total);
        }
        if cancelled {
            sink.log("run cancelled");
        } else {
            sink.log("run complete");
        }
        outcomes
    }

    fn run_job(
        &self,
        job: &TranslationJob,
        sink: &dyn EventSink,
    ) -> Result<(PathBuf, PathBuf), PipelineError> {
        let raw = self.extractor.extract(&job.path)?;
        if raw.trim().is_empty() {
            return Err(PipelineError::EmptyContent);
        }

        let system_prompt = directive_prompt(&job.target_lang, &job.style);
        let chunks = split_chunks(&raw, self.chunk_budget);
        let total = chunks.len();
        let mut results: Vec<String> = Vec::with_capacity(total);
        for (i, chunk) in chunks.iter().enumerate() {
            sink.log(&format!("chunk {}/{total}", i + 1));
            results.push(self.client.translate(chunk, &system_prompt)?);
        }

        let final_text = results.join("\n");
        let stem = job
            .path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("output");
        let (txt_path, docx_path) = write_outputs(&final_text, &job.output_dir, stem)?;
        sink.log(&format!("saved: {}", txt_path.display()));
        sink.log(&format!("saved: {}", docx_path.display()));
        Ok((txt_path, docx_path))
    }
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .and_then(|s| s.to_str())
        .map(|s| s.to_string())
        .unwrap_or_else(|| path.display().to_string())
}
