use std::path::{Path, PathBuf};
use std::sync::Arc;

use clap::{Parser, Subcommand};
use docuchat::api::{DocumentId, UploadFile};
use docuchat::controller::{ExchangeOutcome, UploadOutcome};
use docuchat::view::{EntryView, render_document_detail};
use docuchat::{ClientConfig, ClientError, HttpDocsApi, NoticeLevel, SessionController, SessionEvent};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error(transparent)]
    Client(#[from] ClientError),
    #[error("could not read {path}: {source}")]
    ReadFile { path: PathBuf, source: std::io::Error },
    #[error("stdin read failed: {0}")]
    Stdin(std::io::Error),
    #[error("invalid JSON payload: {0}")]
    InvalidJson(#[from] serde_json::Error),
    #[error("{0}")]
    Failed(String),
}

#[derive(Parser, Debug)]
#[command(name = "docuchat", about = "Upload documents and ask questions about them")]
struct Cli {
    /// Backend base URL (defaults to http://localhost:8000).
    #[arg(long, env = "DOCUCHAT_BASE_URL")]
    base_url: Option<String>,

    /// Print raw JSON for listing and detail commands.
    #[arg(long, global = true, default_value_t = false)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Check the backend is reachable.
    Ping,
    /// List uploaded documents.
    Docs,
    /// Show one document.
    Show { id: DocumentId },
    /// Delete one document.
    Delete { id: DocumentId },
    /// Upload a .pdf, .docx or .txt file.
    Upload { path: PathBuf },
    /// Ask one question.
    Ask {
        question: String,
        /// Restrict the search to one document.
        #[arg(long)]
        document: Option<DocumentId>,
    },
    /// Interactive session.
    Chat,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    if let Err(e) = run(cli).await {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let config = ClientConfig::from_env_with_base_url(cli.base_url.as_deref())?;
    tracing::debug!(base_url = %config.base_url, "cli: config loaded");
    let session = SessionController::new(Arc::new(HttpDocsApi::new(&config)?));

    match cli.command {
        Command::Ping => run_ping(&session).await,
        Command::Docs => run_docs(&session, cli.json).await,
        Command::Show { id } => run_show(&session, id, cli.json).await,
        Command::Delete { id } => run_delete(&session, id).await,
        Command::Upload { path } => run_upload(&session, &path).await,
        Command::Ask { question, document } => run_ask(&session, &question, document).await,
        Command::Chat => run_chat(&session).await,
    }
}

// =============================================================================
// ONE-SHOT COMMANDS
// =============================================================================

async fn run_ping(session: &SessionController) -> Result<(), CliError> {
    let health = session.health().await?;
    match health.version {
        Some(version) => println!("{} ({version})", health.status),
        None => println!("{}", health.status),
    }
    Ok(())
}

async fn run_docs(session: &SessionController, json: bool) -> Result<(), CliError> {
    if !session.load_documents().await {
        return Err(failure(session));
    }
    if json {
        println!("{}", serde_json::to_string_pretty(&session.session().documents)?);
    } else {
        print_catalog(session);
    }
    Ok(())
}

async fn run_show(session: &SessionController, id: DocumentId, json: bool) -> Result<(), CliError> {
    let Some(doc) = session.document_details(id).await else {
        return Err(failure(session));
    };
    if json {
        println!("{}", serde_json::to_string_pretty(&doc)?);
    } else {
        println!("{}", render_document_detail(&doc).to_text());
    }
    Ok(())
}

async fn run_delete(session: &SessionController, id: DocumentId) -> Result<(), CliError> {
    let deleted = session.delete_document(id).await;
    print_notices(session);
    if deleted { Ok(()) } else { Err(CliError::Failed(format!("document {id} was not deleted"))) }
}

async fn run_upload(session: &SessionController, path: &Path) -> Result<(), CliError> {
    let file = read_upload(path).await?;
    let mut events = session.subscribe();
    session.open_upload_modal();

    let task = tokio::spawn({
        let session = session.clone();
        async move { session.upload_file(file).await }
    });
    let printer = tokio::spawn(async move {
        while let Some(event) = events.recv().await {
            if let SessionEvent::UploadChanged { progress, .. } = event {
                if progress > 0 {
                    eprint!("\r{progress:>3}%");
                }
            }
        }
    });

    let outcome = task
        .await
        .map_err(|e| CliError::Failed(format!("upload task stopped: {e}")))?;
    printer.abort();
    eprintln!();
    print_notices(session);

    match outcome {
        UploadOutcome::Uploaded(receipt) => {
            if let Some(id) = receipt.id {
                println!("document id {id}");
            }
            Ok(())
        }
        UploadOutcome::Rejected(e) => Err(CliError::Failed(e.to_string())),
        UploadOutcome::Failed(reason) => Err(CliError::Failed(format!("Upload failed: {reason}"))),
        UploadOutcome::Busy => Err(CliError::Failed("another upload is in progress".into())),
    }
}

async fn run_ask(session: &SessionController, question: &str, document: Option<DocumentId>) -> Result<(), CliError> {
    if !session.load_documents().await {
        return Err(failure(session));
    }
    if let Some(id) = document {
        if !session.select_document(id) {
            return Err(failure(session));
        }
    }
    match session.send_question(question).await {
        ExchangeOutcome::Answered { .. } => {
            print_last_entry(session);
            Ok(())
        }
        ExchangeOutcome::Errored(reason) => Err(CliError::Failed(reason)),
        ExchangeOutcome::Ignored => Err(CliError::Failed("question is empty".into())),
        ExchangeOutcome::Rejected => Err(CliError::Failed("no documents uploaded yet".into())),
    }
}

// =============================================================================
// INTERACTIVE
// =============================================================================

const HELP: &str = "\
/docs            list documents
/select <id>     ask about one document
/all             ask about every document
/show <id>       document details
/upload <path>   upload a file
/delete <id>     delete a document
/help            this text
/quit            leave
anything else is sent as a question";

async fn run_chat(session: &SessionController) -> Result<(), CliError> {
    session.load_documents().await;
    print_notices(session);
    print_catalog(session);
    println!("{}", session.composer_view().placeholder);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await.map_err(CliError::Stdin)? {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let (command, arg) = line.split_once(' ').map_or((line, ""), |(c, a)| (c, a.trim()));
        match command {
            "/quit" | "/exit" => break,
            "/help" => println!("{HELP}"),
            "/docs" => {
                session.load_documents().await;
                print_catalog(session);
            }
            "/all" => {
                session.clear_selection();
                print_catalog(session);
            }
            "/select" => {
                if let Some(id) = parse_id(arg) {
                    session.select_document(id);
                    print_catalog(session);
                }
            }
            "/show" => {
                if let Some(id) = parse_id(arg) {
                    if let Some(doc) = session.document_details(id).await {
                        println!("{}", render_document_detail(&doc).to_text());
                    }
                }
            }
            "/delete" => {
                if let Some(id) = parse_id(arg) {
                    session.delete_document(id).await;
                }
            }
            "/upload" => match read_upload(Path::new(arg)).await {
                Ok(file) => {
                    if let UploadOutcome::Failed(reason) = session.upload_file(file).await {
                        eprintln!("error: Upload failed: {reason}");
                    }
                }
                Err(e) => eprintln!("error: {e}"),
            },
            _ => match session.send_question(line).await {
                ExchangeOutcome::Rejected => eprintln!("{}", session.composer_view().placeholder),
                ExchangeOutcome::Ignored => {}
                ExchangeOutcome::Answered { .. } | ExchangeOutcome::Errored(_) => print_last_entry(session),
            },
        }
        print_notices(session);
    }
    Ok(())
}

fn parse_id(arg: &str) -> Option<DocumentId> {
    match arg.parse::<DocumentId>() {
        Ok(id) => Some(id),
        Err(_) => {
            eprintln!("error: expected a document id, got '{arg}'");
            None
        }
    }
}

// =============================================================================
// OUTPUT
// =============================================================================

async fn read_upload(path: &Path) -> Result<UploadFile, CliError> {
    let bytes = tokio::fs::read(path)
        .await
        .map_err(|source| CliError::ReadFile { path: path.to_path_buf(), source })?;
    let name = path
        .file_name()
        .map_or_else(|| path.display().to_string(), |n| n.to_string_lossy().into_owned());
    Ok(UploadFile::new(name, bytes))
}

fn print_catalog(session: &SessionController) {
    let view = session.catalog_view();
    if view.is_empty() {
        println!("{}", docuchat::view::catalog::EMPTY_CATALOG_TEXT);
        return;
    }
    for item in &view.items {
        let marker = if item.active { '*' } else { ' ' };
        println!("{marker} {:>4}  {}  ({})", item.id.0, item.name, item.meta);
    }
}

fn print_last_entry(session: &SessionController) {
    if let Some(entry @ EntryView::Message(_)) = session.transcript_view().entries.last() {
        println!("{}", entry.to_text());
    }
}

fn print_notices(session: &SessionController) {
    for notice in session.drain_notices() {
        match notice.level {
            NoticeLevel::Error => eprintln!("error: {}", notice.text),
            NoticeLevel::Success => eprintln!("{}", notice.text),
        }
    }
}

/// Turn the notices a failed command left behind into its error.
fn failure(session: &SessionController) -> CliError {
    let texts: Vec<String> = session.drain_notices().into_iter().map(|n| n.text).collect();
    CliError::Failed(texts.join("; "))
}
