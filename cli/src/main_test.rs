use std::cell::RefCell;
use std::collections::VecDeque;
use std::io::Cursor;
use std::rc::Rc;

use chat_core::HttpReply;

use super::*;

// =============================================================
// Test doubles
// =============================================================

#[derive(Clone, Default)]
struct SharedBuf(Rc<RefCell<Vec<u8>>>);

impl SharedBuf {
    fn contents(&self) -> String {
        String::from_utf8(self.0.borrow().clone()).unwrap()
    }
}

impl Write for SharedBuf {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.borrow_mut().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[derive(Default)]
struct CannedTransport {
    replies: RefCell<VecDeque<Result<HttpReply, QueryError>>>,
    calls: Rc<RefCell<Vec<String>>>,
}

#[async_trait::async_trait(?Send)]
impl QueryTransport for CannedTransport {
    async fn post_query(&self, query: &str) -> Result<HttpReply, QueryError> {
        self.calls.borrow_mut().push(query.to_owned());
        self.replies
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Err(QueryError::Transport("no canned reply".to_owned())))
    }
}

fn success(text: &str) -> Result<HttpReply, QueryError> {
    Ok(HttpReply {
        status: 200,
        body: serde_json::json!({ "status": "success", "response": text }).to_string(),
    })
}

struct Harness {
    out: SharedBuf,
    calls: Rc<RefCell<Vec<String>>>,
    controller: TerminalController<SharedBuf, CannedTransport>,
}

fn harness(replies: Vec<Result<HttpReply, QueryError>>) -> Harness {
    let out = SharedBuf::default();
    let transport = CannedTransport { replies: RefCell::new(replies.into()), calls: Rc::default() };
    let calls = Rc::clone(&transport.calls);
    let copy = ChatCopy::default();
    let view = TerminalView::new(out.clone(), false, &copy);
    Harness { out, calls, controller: ChatController::new(view, transport, AlwaysOnline, copy) }
}

// =============================================================
// Argument parsing
// =============================================================

#[test]
fn cli_defaults_to_local_service() {
    let cli = Cli::try_parse_from(["book-chat"]).unwrap();
    assert_eq!(cli.base_url, DEFAULT_BASE_URL);
    assert!(!cli.send_origin);
    assert_eq!(cli.query, None);
}

#[test]
fn cli_accepts_one_shot_options() {
    let cli = Cli::try_parse_from([
        "book-chat",
        "--base-url",
        "https://books.example.com",
        "--send-origin",
        "--timeout-secs",
        "30",
        "-q",
        "who is the narrator?",
    ])
    .unwrap();
    assert_eq!(cli.base_url, "https://books.example.com");
    assert!(cli.send_origin);
    assert_eq!(cli.timeout_secs, Some(30));
    assert_eq!(cli.query.as_deref(), Some("who is the narrator?"));
}

#[test]
fn cli_rejects_non_numeric_timeout() {
    assert!(Cli::try_parse_from(["book-chat", "--timeout-secs", "soon"]).is_err());
}

// =============================================================
// Commands
// =============================================================

#[test]
fn exit_is_case_insensitive() {
    assert_eq!(parse_command("exit\n"), Command::Exit);
    assert_eq!(parse_command("  EXIT "), Command::Exit);
}

#[test]
fn clear_command() {
    assert_eq!(parse_command("/clear\n"), Command::Clear);
}

#[test]
fn anything_else_is_a_question() {
    assert_eq!(parse_command("exit the chapter?\n"), Command::Ask("exit the chapter?\n"));
}

// =============================================================
// Transport setup
// =============================================================

#[test]
fn transport_derives_origin_when_requested() {
    let endpoint = Endpoint::new("http://localhost:8000/");
    let transport = ReqwestTransport::new(&endpoint, true, None).unwrap();
    assert_eq!(transport.url(), "http://localhost:8000/query/");
    assert_eq!(transport.origin(), Some("http://localhost:8000"));
}

#[test]
fn transport_without_origin_header() {
    let endpoint = Endpoint::new("http://localhost:8000");
    let transport = ReqwestTransport::new(&endpoint, false, Some(Duration::from_secs(5))).unwrap();
    assert_eq!(transport.origin(), None);
}

#[test]
fn transport_rejects_origin_for_hostless_url() {
    let endpoint = Endpoint::new("localhost");
    assert!(matches!(ReqwestTransport::new(&endpoint, true, None), Err(CliError::InvalidBaseUrl(_))));
}

// =============================================================
// Sessions
// =============================================================

#[tokio::test]
async fn interactive_session_answers_then_says_goodbye() {
    let h = harness(vec![success("Hello! I am your book assistant.")]);

    run_interactive(&h.controller, Cursor::new("hello\nexit\nnever sent\n")).await.unwrap();

    let out = h.out.contents();
    assert!(out.starts_with("Book Chatbot Test Interface\n"));
    assert!(out.contains("\nAssistant: Hello! I am your book assistant.\n"));
    assert!(out.ends_with("\nGoodbye!\n"));
    assert_eq!(*h.calls.borrow(), vec!["hello".to_owned()]);
}

#[tokio::test]
async fn interactive_session_skips_blank_lines_and_stops_at_eof() {
    let h = harness(vec![]);

    run_interactive(&h.controller, Cursor::new("   \n\n")).await.unwrap();

    assert!(h.calls.borrow().is_empty());
    assert!(!h.out.contents().contains("Goodbye!"));
}

#[tokio::test]
async fn interactive_failure_shows_generic_message_and_continues() {
    let h = harness(vec![Ok(HttpReply { status: 500, body: String::new() }), success("second")]);

    run_interactive(&h.controller, Cursor::new("one\ntwo\nexit\n")).await.unwrap();

    let out = h.out.contents();
    assert!(out.contains(&format!("Assistant: {}", ChatCopy::default().failure)));
    assert!(out.contains("Assistant: second"));
    assert_eq!(h.calls.borrow().len(), 2);
}

#[tokio::test]
async fn run_once_succeeds_on_reply() {
    let h = harness(vec![success("A storm.")]);
    run_once(&h.controller, "what happens?").await.unwrap();
    assert!(h.out.contents().contains("Assistant: A storm."));
}

#[tokio::test]
async fn run_once_echoes_the_trimmed_question() {
    let h = harness(vec![success("A storm.")]);
    run_once(&h.controller, "  what happens?\n").await.unwrap();
    assert!(h.out.contents().starts_with("You: what happens?\n"));
}

struct ClosedPipe;

impl Write for ClosedPipe {
    fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
        Err(io::Error::from(io::ErrorKind::BrokenPipe))
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[tokio::test]
async fn run_once_reports_closed_stdout() {
    let copy = ChatCopy::default();
    let view = TerminalView::new(ClosedPipe, false, &copy);
    let transport = CannedTransport { replies: RefCell::new(vec![success("A storm.")].into()), calls: Rc::default() };
    let controller = ChatController::new(view, transport, AlwaysOnline, copy);

    let err = run_once(&controller, "what happens?").await.unwrap_err();

    assert!(matches!(err, CliError::Io(ref e) if e.kind() == io::ErrorKind::BrokenPipe));
}

#[tokio::test]
async fn interactive_session_stops_when_stdout_is_closed() {
    let copy = ChatCopy::default();
    let view = TerminalView::new(ClosedPipe, false, &copy);
    let transport = CannedTransport::default();
    let calls = Rc::clone(&transport.calls);
    let controller = ChatController::new(view, transport, AlwaysOnline, copy);

    let err = run_interactive(&controller, Cursor::new("hello\nexit\n")).await.unwrap_err();

    assert!(matches!(err, CliError::Io(_)));
    assert!(calls.borrow().is_empty());
}

#[tokio::test]
async fn run_once_surfaces_failure_cause() {
    let h = harness(vec![Ok(HttpReply { status: 502, body: String::new() })]);
    let err = run_once(&h.controller, "what happens?").await.unwrap_err();
    assert!(matches!(err, CliError::Query(QueryError::Http { status: 502 })));
}

#[tokio::test]
async fn run_once_rejects_blank_query() {
    let h = harness(vec![]);
    let err = run_once(&h.controller, "   ").await.unwrap_err();
    assert!(matches!(err, CliError::EmptyQuery));
    assert!(h.calls.borrow().is_empty());
}
