mod http;
mod terminal;

#[cfg(test)]
#[path = "main_test.rs"]
mod main_test;

use std::io::{self, BufRead, IsTerminal, Write};
use std::time::Duration;

use chat_core::{
    AlwaysOnline, ChatController, ChatCopy, Endpoint, QueryError, QueryTransport, SendOutcome, normalize_input,
};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::http::ReqwestTransport;
use crate::terminal::TerminalView;

const DEFAULT_BASE_URL: &str = "http://localhost:8000";

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("invalid base URL: {0}")]
    InvalidBaseUrl(String),
    #[error("http client setup failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("terminal I/O failed: {0}")]
    Io(#[from] io::Error),
    #[error("query text is empty")]
    EmptyQuery,
    #[error("query failed: {0}")]
    Query(#[from] QueryError),
}

#[derive(Parser, Debug)]
#[command(name = "book-chat", about = "Terminal client for the book assistant query endpoint")]
struct Cli {
    #[arg(long, env = "BOOK_CHAT_BASE_URL", default_value = DEFAULT_BASE_URL)]
    base_url: String,

    /// Send an `Origin` header mirroring the service host.
    #[arg(long, default_value_t = false)]
    send_origin: bool,

    /// Per-request HTTP timeout; unbounded when absent.
    #[arg(long, env = "BOOK_CHAT_TIMEOUT_SECS")]
    timeout_secs: Option<u64>,

    /// Ask a single question and exit instead of starting a chat session.
    #[arg(long, short)]
    query: Option<String>,
}

type TerminalController<W, T> = ChatController<TerminalView<W>, T, AlwaysOnline>;

#[tokio::main]
async fn main() -> Result<(), CliError> {
    init_tracing();
    let cli = Cli::parse();

    let endpoint = Endpoint::new(&cli.base_url);
    if endpoint.origin().is_none() {
        return Err(CliError::InvalidBaseUrl(cli.base_url));
    }
    let transport = ReqwestTransport::new(&endpoint, cli.send_origin, cli.timeout_secs.map(Duration::from_secs))?;
    tracing::debug!(url = transport.url(), origin = ?transport.origin(), "book chat client ready");

    let copy = ChatCopy::default();
    let view = TerminalView::new(io::stdout(), io::stdout().is_terminal(), &copy);
    let controller = ChatController::new(view, transport, AlwaysOnline, copy);

    match cli.query {
        Some(query) => run_once(&controller, &query).await,
        None => run_interactive(&controller, io::stdin().lock()).await,
    }
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .init();
}

/// Submit one query; failures become the process error.
async fn run_once<W: Write, T: QueryTransport>(
    controller: &TerminalController<W, T>,
    query: &str,
) -> Result<(), CliError> {
    let view = controller.view();
    if let Some(text) = normalize_input(query) {
        view.echo(text);
    }
    let outcome = controller.submit(query).await;
    log_outcome(&outcome);
    match outcome {
        SendOutcome::Replied(_) | SendOutcome::Offline => {}
        SendOutcome::Ignored => return Err(CliError::EmptyQuery),
        SendOutcome::Failed(e) => return Err(CliError::Query(e)),
    }
    match view.take_error() {
        Some(e) => Err(CliError::Io(e)),
        None => Ok(()),
    }
}

/// Read questions line by line until `exit` or end of input.
async fn run_interactive<W: Write, T: QueryTransport>(
    controller: &TerminalController<W, T>,
    mut input: impl BufRead,
) -> Result<(), CliError> {
    let view = controller.view();
    view.notice("Book Chatbot Test Interface");
    view.notice("Type 'exit' to quit the chat, '/clear' to start over\n");
    controller.greet();

    loop {
        view.prompt();
        if let Some(e) = view.take_error() {
            return Err(CliError::Io(e));
        }
        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            view.notice("");
            break;
        }

        match parse_command(&line) {
            Command::Exit => {
                view.notice("\nGoodbye!");
                break;
            }
            Command::Clear => controller.clear(),
            Command::Ask(text) => {
                let outcome = controller.submit(text).await;
                log_outcome(&outcome);
            }
        }
    }
    tracing::debug!(messages = view.transcript().len(), "chat session ended");
    Ok(())
}

#[derive(Debug, PartialEq, Eq)]
enum Command<'a> {
    Exit,
    Clear,
    Ask(&'a str),
}

fn parse_command(line: &str) -> Command<'_> {
    let trimmed = line.trim();
    if trimmed.eq_ignore_ascii_case("exit") {
        Command::Exit
    } else if trimmed == "/clear" {
        Command::Clear
    } else {
        Command::Ask(line)
    }
}

fn log_outcome(outcome: &SendOutcome) {
    match outcome {
        SendOutcome::Failed(e) => tracing::warn!(kind = e.kind(), error = %e, "query failed"),
        SendOutcome::Replied(reply) => tracing::debug!(chars = reply.len(), "query answered"),
        SendOutcome::Offline | SendOutcome::Ignored => {}
    }
}
