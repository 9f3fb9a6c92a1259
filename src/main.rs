use std::path::PathBuf;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use std::thread;

use anyhow::Context;
use clap::Parser;

use doc_batch_translator::client::{ReqwestTransport, TranslationClient};
use doc_batch_translator::config::{load_config_file, resolve_config, ConfigFile};
use doc_batch_translator::extract::DocumentExtractor;
use doc_batch_translator::orchestrator::{BatchTranslator, JobStatus, TranslationJob};
use doc_batch_translator::progress::ConsoleProgress;

#[derive(Parser, Debug)]
#[command(name = "doc-batch-translator")]
#[command(about = "Batch document translator over OpenAI-compatible chat endpoints", long_about = None)]
struct Args {
    /// Input documents (.txt / .docx / .doc)
    #[arg(value_name = "FILE", required = true)]
    files: Vec<PathBuf>,

    /// API key, sent as a Bearer token when set
    #[arg(long)]
    api_key: Option<String>,

    /// Endpoint base URL, e.g. https://api.openai.com or http://host:8000/v1
    #[arg(long)]
    base_url: Option<String>,

    /// Model name
    #[arg(long)]
    model: Option<String>,

    /// Target language directive
    #[arg(long)]
    target_lang: Option<String>,

    /// Translation style directive
    #[arg(long)]
    style: Option<String>,

    /// Output directory (created if absent)
    #[arg(short, long, value_name = "DIR")]
    output_dir: Option<PathBuf>,

    /// Per-chunk character budget
    #[arg(long)]
    chunk_chars: Option<usize>,

    /// Config file path (TOML; flags override its values)
    #[arg(long, value_name = "TOML")]
    config: Option<PathBuf>,

    /// Suppress log and progress output
    #[arg(long)]
    quiet: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let file_cfg = match args.config.as_ref() {
        Some(p) => load_config_file(p).context("load config")?,
        None => ConfigFile::default(),
    };
    let cfg = resolve_config(
        file_cfg,
        args.api_key,
        args.base_url,
        args.model,
        args.target_lang,
        args.style,
        args.output_dir,
        args.chunk_chars,
    );

    let jobs: Vec<TranslationJob> = args
        .files
        .iter()
        .map(|p| TranslationJob {
            path: p.clone(),
            target_lang: cfg.target_lang.clone(),
            style: cfg.style.clone(),
            output_dir: cfg.output_dir.clone(),
        })
        .collect();

    let transport = ReqwestTransport::new().context("build http client")?;
    let client = TranslationClient::new(
        transport,
        &cfg.base_url,
        cfg.model.clone(),
        cfg.api_key.clone(),
    );
    let translator = BatchTranslator::new(DocumentExtractor::new(), client, cfg.chunk_chars);

    let progress = ConsoleProgress::new(!args.quiet);
    let cancel = Arc::new(AtomicBool::new(false));
    let worker_cancel = cancel.clone();

    // Dedicated worker thread; the main thread stays free for a fuller
    // collaborator (a UI would set `cancel` from here).
    let outcomes = thread::spawn(move || translator.run(&jobs, &worker_cancel, &progress))
        .join()
        .map_err(|_| anyhow::anyhow!("worker thread panicked"))?;

    let failed = outcomes
        .iter()
        .filter(|o| matches!(o.status, JobStatus::Failed(_)))
        .count();
    if failed > 0 {
        anyhow::bail!("{failed} of {} files failed", outcomes.len());
    }
    Ok(())
}
