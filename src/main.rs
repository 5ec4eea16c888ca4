use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use echomind::journal::{JournalStats, JournalWorkflow, WorkflowPhase};
use echomind::{
    create_router, AppState, Config, EntryStore, FileAudioSource, JsonFileStore, SummaryClient,
    TranscriptionClient,
};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};

#[derive(Parser)]
#[command(name = "echomind", version, about = "Voice journal: transcribe recordings, summarize them, keep the entries")]
struct Cli {
    /// Config file (TOML); ECHOMIND_* environment variables override it
    #[arg(short, long, default_value = "config/echomind")]
    config: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run the HTTP control API
    Serve,
    /// Transcribe and summarize one recording, then save it to the journal
    Transcribe {
        /// Path to the finished recording
        file: PathBuf,
    },
    /// Print stored journal entries, newest first
    List,
    /// Print crude journal analytics
    Stats,
    /// Delete every stored entry
    Clear,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let cfg = Config::load(&cli.config)?;

    info!("{} v{}", cfg.service.name, env!("CARGO_PKG_VERSION"));

    if cfg.transcription.api_key.is_empty() {
        warn!("No transcription API key configured (ECHOMIND_TRANSCRIPTION__API_KEY)");
    }

    let transcription = TranscriptionClient::new(
        cfg.transcription.base_url.clone(),
        cfg.transcription.api_key.clone(),
    );
    let summary = SummaryClient::new(
        cfg.summary.base_url.clone(),
        cfg.summary.api_key.clone(),
        cfg.summary.model.clone(),
    )
    .with_limits(cfg.summary.max_tokens, cfg.summary.temperature);
    let store: Arc<dyn EntryStore> =
        Arc::new(JsonFileStore::new(cfg.journal.expanded_entries_path()));
    let poll = cfg.transcription.poll_config();

    match cli.command {
        Command::Serve => {
            let state = AppState::new(transcription, summary, store, poll);
            let router = create_router(state);

            let addr = format!("{}:{}", cfg.service.http.bind, cfg.service.http.port);
            info!("HTTP server listening on {}", addr);

            let listener = tokio::net::TcpListener::bind(&addr).await?;
            axum::serve(listener, router).await?;
        }

        Command::Transcribe { file } => {
            let workflow = JournalWorkflow::spawn(
                format!("journal-{}", uuid::Uuid::new_v4()),
                Arc::new(FileAudioSource::new(&file)),
                transcription,
                summary,
                Arc::clone(&store),
                poll,
            );
            workflow.join().await;

            match workflow.phase() {
                WorkflowPhase::Done { entry_id } => {
                    let entries = store.list().await?;
                    match entries.iter().find(|e| e.id == entry_id) {
                        Some(entry) => {
                            println!("Saved entry {}", entry.id);
                            println!("Recorded:   {}", entry.recorded_at);
                            println!("Transcript: {}", entry.transcript);
                            println!("Summary:\n{}", entry.summary);
                        }
                        None => println!("Saved entry {}", entry_id),
                    }
                }
                WorkflowPhase::Failed { error } => bail!("Workflow failed: {}", error),
                WorkflowPhase::Cancelled => bail!("Workflow cancelled"),
                phase => bail!("Workflow ended in unexpected phase: {:?}", phase),
            }
        }

        Command::List => {
            let entries = store.list().await?;
            if entries.is_empty() {
                println!("Journal is empty");
            }
            for entry in entries {
                let first_line = entry.summary.lines().next().unwrap_or_default();
                println!("{}  {}", entry.recorded_at.format("%Y-%m-%d %H:%M"), entry.id);
                println!("    {} words  {}", entry.word_count(), first_line);
            }
        }

        Command::Stats => {
            let entries = store.list().await?;
            let stats = JournalStats::from_entries(&entries);
            println!("Entries:        {}", stats.entry_count);
            println!("Total words:    {}", stats.total_words);
            println!("Average words:  {:.1}", stats.average_words);
            println!("Audio duration: {:.1}s", stats.total_duration_seconds);
            if let (Some(first), Some(last)) = (stats.first_entry_at, stats.last_entry_at) {
                println!("Span:           {} .. {}", first, last);
            }
        }

        Command::Clear => {
            store.clear().await?;
            info!("Journal cleared");
        }
    }

    Ok(())
}
