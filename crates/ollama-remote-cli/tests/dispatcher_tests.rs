//! Dispatcher tests against a mock Ollama server

use std::sync::Arc;

use mockito::{Matcher, Mock, ServerGuard};
use ollama_remote_cli::{CommandKind, CommandRequest, CommandStatus, Dispatcher, OutputStyle, Surface};
use ollama_remote_client::{ClientConfig, Endpoint, OllamaClient};
use serde_json::json;

fn dispatcher_for(server: &ServerGuard) -> Dispatcher {
    let endpoint = Endpoint::parse(&server.url()).unwrap();
    let client = OllamaClient::new(ClientConfig::new(endpoint)).unwrap();
    Dispatcher::new(Arc::new(client), OutputStyle::plain())
}

async fn dispatch(dispatcher: &Dispatcher, request: CommandRequest) -> (CommandStatus, String) {
    let mut out = Vec::new();
    let status = dispatcher.dispatch(&request, &mut out).await.unwrap();
    (status, String::from_utf8(out).unwrap())
}

const ROUTES: [(&str, &str); 8] = [
    ("POST", "/api/chat"),
    ("POST", "/api/generate"),
    ("GET", "/api/tags"),
    ("POST", "/api/pull"),
    ("POST", "/api/push"),
    ("POST", "/api/create"),
    ("DELETE", "/api/delete"),
    ("POST", "/api/show"),
];

/// One mock per endpoint, each expecting no traffic
async fn forbid_all_endpoints(server: &mut ServerGuard) -> Vec<Mock> {
    let mut mocks = Vec::new();
    for (method, path) in ROUTES {
        mocks.push(server.mock(method, path).expect(0).create_async().await);
    }
    mocks
}

// ============================================================================
// Validation
// ============================================================================

#[tokio::test]
async fn test_missing_fields_make_no_remote_calls() {
    let mut server = mockito::Server::new_async().await;
    let mocks = forbid_all_endpoints(&mut server).await;
    let dispatcher = dispatcher_for(&server);

    for kind in CommandKind::ALL {
        if kind.required_fields().is_empty() {
            continue;
        }
        let (status, text) = dispatch(&dispatcher, CommandRequest::new(kind)).await;

        assert_eq!(status, CommandStatus::Rejected, "{kind} should be rejected");
        assert!(text.contains(&kind.flag_usage()), "{kind} printed: {text}");
    }

    for mock in mocks {
        mock.assert_async().await;
    }
}

#[tokio::test]
async fn test_interactive_surface_prints_positional_usage() {
    let mut server = mockito::Server::new_async().await;
    let mocks = forbid_all_endpoints(&mut server).await;
    let dispatcher = dispatcher_for(&server).with_surface(Surface::Interactive);

    let request = CommandRequest::new(CommandKind::Show)
        .with_model("llama3")
        .with_extra(vec!["extra".to_string()]);
    let (status, text) = dispatch(&dispatcher, request).await;

    assert_eq!(status, CommandStatus::Rejected);
    assert!(text.contains("Usage: show <model>"));
    assert!(text.contains("unexpected argument(s): extra"));

    for mock in mocks {
        mock.assert_async().await;
    }
}

// ============================================================================
// Rendering
// ============================================================================

#[tokio::test]
async fn test_list_prints_one_line_per_model_in_order() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/api/tags")
        .with_status(200)
        .with_body(
            r#"{"models":[
                {"name":"zephyr:latest","size":1,"modified_at":"2024-03-01T10:00:00Z"},
                {"name":"alpha:7b","size":22,"modified_at":"2024-02-01T10:00:00Z"},
                {"name":"mid:latest","size":333,"modified_at":"2024-01-01T10:00:00Z"}
            ]}"#,
        )
        .create_async()
        .await;

    let dispatcher = dispatcher_for(&server);
    let (status, text) = dispatch(&dispatcher, CommandRequest::new(CommandKind::List)).await;

    assert_eq!(status, CommandStatus::Completed);
    let lines: Vec<_> = text.lines().collect();
    assert_eq!(
        lines,
        vec![
            "Name: zephyr:latest, Size: 1, Modified: 2024-03-01T10:00:00Z",
            "Name: alpha:7b, Size: 22, Modified: 2024-02-01T10:00:00Z",
            "Name: mid:latest, Size: 333, Modified: 2024-01-01T10:00:00Z",
        ]
    );
    mock.assert_async().await;
}

#[tokio::test]
async fn test_empty_list_prints_nothing() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", "/api/tags")
        .with_status(200)
        .with_body(r#"{"models":[]}"#)
        .create_async()
        .await;

    let dispatcher = dispatcher_for(&server);
    let (status, text) = dispatch(&dispatcher, CommandRequest::new(CommandKind::List)).await;

    assert_eq!(status, CommandStatus::Completed);
    assert!(text.is_empty());
}

#[tokio::test]
async fn test_chat_prints_reply() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/api/chat")
        .match_body(Matcher::Json(json!({
            "model": "llama3",
            "messages": [{ "role": "user", "content": "Hello there" }],
            "stream": false
        })))
        .with_status(200)
        .with_body(r#"{"message":{"role":"assistant","content":"General Kenobi!"},"done":true}"#)
        .create_async()
        .await;

    let dispatcher = dispatcher_for(&server);
    let request = CommandRequest::new(CommandKind::Chat)
        .with_model("llama3")
        .with_prompt("Hello there");
    let (status, text) = dispatch(&dispatcher, request).await;

    assert_eq!(status, CommandStatus::Completed);
    assert_eq!(text, "General Kenobi!\n");
    mock.assert_async().await;
}

#[tokio::test]
async fn test_create_sends_modelfile_and_confirms() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/api/create")
        .match_body(Matcher::PartialJson(json!({
            "model": "mario",
            "modelfile": "FROM llama3"
        })))
        .with_status(200)
        .with_body(r#"{"status":"success"}"#)
        .create_async()
        .await;

    let dispatcher = dispatcher_for(&server);
    let request = CommandRequest::new(CommandKind::Create)
        .with_model("mario")
        .with_modelfile("FROM llama3");
    let (_, text) = dispatch(&dispatcher, request).await;

    assert_eq!(text, "✓ Successfully created model: mario\n");
    mock.assert_async().await;
}

// ============================================================================
// Remote failures
// ============================================================================

#[tokio::test]
async fn test_show_not_found_reports_message_and_status() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", "/api/show")
        .with_status(404)
        .with_body(r#"{"error":"model not found"}"#)
        .create_async()
        .await;

    let dispatcher = dispatcher_for(&server);
    let request = CommandRequest::new(CommandKind::Show).with_model("ghost");
    let (status, text) = dispatch(&dispatcher, request).await;

    assert_eq!(status, CommandStatus::Failed);
    assert!(text.contains("model not found"));
    assert!(text.contains("404"));
}

#[tokio::test]
async fn test_every_command_reports_server_errors() {
    let mut server = mockito::Server::new_async().await;
    let mut mocks = Vec::new();
    for (method, path) in ROUTES {
        mocks.push(
            server
                .mock(method, path)
                .with_status(500)
                .with_body(r#"{"error":"boom"}"#)
                .create_async()
                .await,
        );
    }

    let dispatcher = dispatcher_for(&server);
    let requests = [
        CommandRequest::new(CommandKind::Chat).with_model("m").with_prompt("p"),
        CommandRequest::new(CommandKind::Generate).with_model("m").with_prompt("p"),
        CommandRequest::new(CommandKind::List),
        CommandRequest::new(CommandKind::Pull).with_model("m"),
        CommandRequest::new(CommandKind::Push).with_model("m"),
        CommandRequest::new(CommandKind::Create).with_model("m").with_modelfile("FROM m"),
        CommandRequest::new(CommandKind::Delete).with_model("m"),
        CommandRequest::new(CommandKind::Show).with_model("m"),
    ];

    for request in requests {
        let kind = request.kind;
        let (status, text) = dispatch(&dispatcher, request).await;
        assert_eq!(status, CommandStatus::Failed, "{kind}");
        assert_eq!(text, "✗ Error: boom (status 500)\n", "{kind}");
    }

    for mock in mocks {
        mock.assert_async().await;
    }
}

#[tokio::test]
async fn test_unreachable_server_is_reported() {
    let endpoint = Endpoint::parse("http://127.0.0.1:9").unwrap();
    let client = OllamaClient::new(ClientConfig::new(endpoint)).unwrap();
    let dispatcher = Dispatcher::new(Arc::new(client), OutputStyle::plain());

    let (status, text) = dispatch(&dispatcher, CommandRequest::new(CommandKind::List)).await;

    assert_eq!(status, CommandStatus::Failed);
    assert!(text.starts_with("✗ Error: could not reach server"), "{text}");
}
