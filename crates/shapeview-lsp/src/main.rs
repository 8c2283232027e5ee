//! Shapeview Language Server: inline previews of CSS exclusion shapes.
//!
//! A `tower-lsp` based LSP server that wraps `shapeview-core`: hovering a
//! `shape-inside` / `shape-outside` declaration previews the shape, and the
//! `shapeview.toggle` command opens or closes a preview on a line.

mod cli;
mod hover;
mod session;
mod state;

use cli::OutputFormat;
use serde::Deserialize;
use serde_json::Value;
use shapeview_core::ViewerConfig;
use state::{ServerState, config_from_options};
use std::sync::Mutex;
use tower_lsp::jsonrpc::Result;
use tower_lsp::lsp_types::*;
use tower_lsp::{Client, LanguageServer, LspService, Server};

const TOGGLE_COMMAND: &str = "shapeview.toggle";

/// Arguments of `shapeview.toggle`: `[uri, line, character]`.
#[derive(Debug, Deserialize)]
struct ToggleArgs(Url, u32, u32);

/// The Shapeview language server backend.
struct ShapeviewServer {
    client: Client,
    state: Mutex<ServerState>,
}

impl ShapeviewServer {
    fn new(client: Client) -> Self {
        Self {
            client,
            state: Mutex::new(ServerState::new(ViewerConfig::default())),
        }
    }
}

#[tower_lsp::async_trait]
impl LanguageServer for ShapeviewServer {
    async fn initialize(&self, params: InitializeParams) -> Result<InitializeResult> {
        self.state
            .lock()
            .unwrap()
            .set_config(config_from_options(params.initialization_options));

        Ok(InitializeResult {
            capabilities: ServerCapabilities {
                text_document_sync: Some(TextDocumentSyncCapability::Kind(
                    TextDocumentSyncKind::FULL,
                )),
                hover_provider: Some(HoverProviderCapability::Simple(true)),
                execute_command_provider: Some(ExecuteCommandOptions {
                    commands: vec![TOGGLE_COMMAND.to_string()],
                    ..Default::default()
                }),
                ..Default::default()
            },
            ..Default::default()
        })
    }

    async fn initialized(&self, _: InitializedParams) {
        self.client
            .log_message(MessageType::INFO, "shapeview-lsp initialized")
            .await;
    }

    async fn shutdown(&self) -> Result<()> {
        Ok(())
    }

    async fn did_open(&self, params: DidOpenTextDocumentParams) {
        self.state
            .lock()
            .unwrap()
            .update_document(params.text_document.uri, &params.text_document.text);
    }

    async fn did_change(&self, params: DidChangeTextDocumentParams) {
        let uri = params.text_document.uri;
        if let Some(change) = params.content_changes.into_iter().next_back() {
            self.state.lock().unwrap().update_document(uri, &change.text);
        }
    }

    async fn did_close(&self, params: DidCloseTextDocumentParams) {
        self.state
            .lock()
            .unwrap()
            .close_document(&params.text_document.uri);
    }

    async fn hover(&self, params: HoverParams) -> Result<Option<Hover>> {
        let uri = &params.text_document_position_params.text_document.uri;
        let pos = params.text_document_position_params.position;
        Ok(self.state.lock().unwrap().hover(uri, pos))
    }

    async fn execute_command(&self, params: ExecuteCommandParams) -> Result<Option<Value>> {
        if params.command != TOGGLE_COMMAND {
            return Err(tower_lsp::jsonrpc::Error::method_not_found());
        }
        let ToggleArgs(uri, line, character) =
            serde_json::from_value(Value::Array(params.arguments))
                .map_err(|e| tower_lsp::jsonrpc::Error::invalid_params(e.to_string()))?;

        let response = self
            .state
            .lock()
            .unwrap()
            .toggle(&uri, Position::new(line, character));
        serde_json::to_value(response)
            .map(Some)
            .map_err(|_| tower_lsp::jsonrpc::Error::internal_error())
    }
}

#[tokio::main]
async fn main() {
    env_logger::init();

    // ── `shapeview-lsp --svg|--json LINE:COL` mode ──────────────────────
    // Reads CSS from stdin and prints the shape under LINE:COL, as an SVG
    // document or a JSON descriptor, then exits.
    let args: Vec<String> = std::env::args().collect();
    if let Some(format) = args.get(1).and_then(|a| OutputFormat::from_flag(a)) {
        use std::io::Read;
        let flag = format.flag();
        let mut text = String::new();
        if let Err(e) = std::io::stdin().read_to_string(&mut text) {
            eprintln!("shapeview-lsp {flag} error: failed to read stdin: {e}");
            std::process::exit(1);
        }

        match cli::run(format, args.get(2).map_or("", String::as_str), &text) {
            Ok(output) => println!("{output}"),
            Err(e) => {
                eprintln!("shapeview-lsp {flag} error: {e}");
                std::process::exit(e.exit_code());
            }
        }
        return;
    }

    // ── Standard LSP server mode ─────────────────────────────────────────
    let stdin = tokio::io::stdin();
    let stdout = tokio::io::stdout();

    let (service, socket) = LspService::new(ShapeviewServer::new);
    Server::new(stdin, stdout, socket).serve(service).await;
}
