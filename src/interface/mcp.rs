//! MCP Server for library-catalog
//!
//! MCP Protocol (stdio) <-> application::CatalogRepository
//!
//! 5 tools: add_book, remove_book, find_books, list_books, update_status

use std::path::PathBuf;
use std::sync::{Arc, Mutex, MutexGuard};

use rmcp::{
    handler::server::{tool::ToolCallContext, tool::ToolRouter, wrapper::Parameters},
    model::{
        CallToolRequestParams, CallToolResult, Content, Implementation, ListToolsResult,
        PaginatedRequestParams, ProtocolVersion, ServerCapabilities, ServerInfo,
    },
    service::{RequestContext, RoleServer},
    tool, tool_router,
    transport::stdio,
    ErrorData as McpError, ServerHandler, ServiceExt,
};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::application::error::AppError;
use crate::application::outcome::Outcome;
use crate::application::repository::CatalogRepository;
use crate::domain::model::book::Book;
use crate::domain::model::id::BookId;
use crate::infra::json_store::JsonCatalogBackend;

use super::input::{self, InputError};

type Repo = CatalogRepository<JsonCatalogBackend>;

// =============================================================================
// Public entry point
// =============================================================================

/// Catalogを読み込み、MCP Serverを起動する。
pub async fn run(catalog_path: PathBuf) -> anyhow::Result<()> {
    let repo = CatalogRepository::open(JsonCatalogBackend::new(&catalog_path))?;
    tracing::info!(
        path = %catalog_path.display(),
        books = repo.len(),
        "starting MCP server"
    );
    let server = CatalogMcpServer::new(repo);
    let service = server.serve(stdio()).await?;
    service.waiting().await?;
    Ok(())
}

// =============================================================================
// MCP Server
// =============================================================================

/// Repositoryは1つだけ。Mutexで操作を1件ずつに直列化する。
#[derive(Clone)]
struct CatalogMcpServer {
    repo: Arc<Mutex<Repo>>,
    tool_router: ToolRouter<Self>,
}

impl CatalogMcpServer {
    fn new(repo: Repo) -> Self {
        Self {
            repo: Arc::new(Mutex::new(repo)),
            tool_router: Self::tool_router(),
        }
    }

    fn repo(&self) -> Result<MutexGuard<'_, Repo>, McpError> {
        self.repo
            .lock()
            .map_err(|_| McpError::internal_error("Lock poisoned", None))
    }

    fn to_mcp_error(e: AppError) -> McpError {
        McpError::internal_error(format!("{e}"), None)
    }

    fn input_error(e: InputError) -> McpError {
        McpError::invalid_params(e.to_string(), None)
    }
}

/// 短縮IDとして受け付ける最小の長さ（`BookId::short()` と同じ8文字）
const MIN_ID_PREFIX_CHARS: usize = 8;

/// Full ID / 8文字以上の短縮プレフィックス → BookId。
///
/// 一致しない場合は入力をそのままIDとして返し、未登録の判定はRepositoryに任せる。
fn resolve_id(repo: &Repo, s: &str) -> Result<BookId, McpError> {
    let s = s.trim();
    if s.is_empty() {
        return Err(McpError::invalid_params("id must not be empty", None));
    }

    let exact = BookId::from(s);
    if repo.get(&exact).is_some() {
        return Ok(exact);
    }
    if s.chars().count() < MIN_ID_PREFIX_CHARS {
        return Ok(exact);
    }

    let matches: Vec<&Book> = repo
        .list()
        .iter()
        .filter(|b| b.id().as_str().starts_with(s))
        .collect();
    match matches.len() {
        0 => Ok(exact),
        1 => Ok(matches[0].id().clone()),
        n => Err(McpError::invalid_params(
            format!("Ambiguous ID prefix: '{s}' matches {n} books"),
            None,
        )),
    }
}

// =============================================================================
// ServerHandler impl
// =============================================================================

impl ServerHandler for CatalogMcpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2025_03_26,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "library-catalog".to_string(),
                title: Some("Library Catalog".to_string()),
                description: Some(
                    "Personal library catalog. Add, find, check out and return books."
                        .to_string(),
                ),
                version: env!("CARGO_PKG_VERSION").to_string(),
                icons: None,
                website_url: None,
            },
            instructions: Some(
                "Manage a personal book catalog stored as a JSON file.\n\
                 \n\
                 Tools: `list_books` or `find_books` to see IDs → `update_status` / `remove_book`. \
                 `add_book` to register a new book. IDs may be shortened to a unique prefix of at least 8 characters."
                    .to_string(),
            ),
        }
    }

    async fn list_tools(
        &self,
        _request: Option<PaginatedRequestParams>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListToolsResult, McpError> {
        Ok(ListToolsResult {
            tools: self.tool_router.list_all(),
            next_cursor: None,
            meta: None,
        })
    }

    async fn call_tool(
        &self,
        request: CallToolRequestParams,
        context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, McpError> {
        let tool_ctx = ToolCallContext::new(self, request, context);
        self.tool_router.call(tool_ctx).await
    }
}

// =============================================================================
// Request types
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
struct McpAddBookRequest {
    #[schemars(description = "Book title (required)")]
    pub title: String,
    #[schemars(description = "Book author (required)")]
    pub author: String,
    #[schemars(description = "Publication year, 1800-2030")]
    pub year: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
struct McpRemoveBookRequest {
    #[schemars(description = "Book ID from `list_books` output. A unique prefix of 8+ characters is accepted.")]
    pub id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
struct McpFindBooksRequest {
    #[schemars(
        description = "Text to search in title or author (case-insensitive), or part of the year. At least 2 characters."
    )]
    pub query: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
struct McpListBooksRequest {}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
struct McpUpdateStatusRequest {
    #[schemars(description = "Book ID from `list_books` output. A unique prefix of 8+ characters is accepted.")]
    pub id: String,
    #[schemars(
        description = "New status: 'available' (or '1') / 'checked_out' (or '2')"
    )]
    pub status: String,
}

// =============================================================================
// Tool implementations
// =============================================================================

#[tool_router]
impl CatalogMcpServer {
    #[tool(
        name = "add_book",
        description = "Add a book to the catalog. A book with the same title and author is not added twice.",
        annotations(
            read_only_hint = false,
            destructive_hint = false,
            idempotent_hint = true,
            open_world_hint = false
        )
    )]
    async fn add_book(
        &self,
        Parameters(req): Parameters<McpAddBookRequest>,
    ) -> Result<CallToolResult, McpError> {
        let title = input::validate_text("title", &req.title).map_err(Self::input_error)?;
        let author = input::validate_text("author", &req.author).map_err(Self::input_error)?;
        let year = input::validate_year(req.year).map_err(Self::input_error)?;

        let mut repo = self.repo()?;
        let outcome = repo
            .add(title, author, year)
            .map_err(Self::to_mcp_error)?;

        Ok(CallToolResult::success(vec![Content::text(render_outcome(
            &repo, &outcome,
        ))]))
    }

    #[tool(
        name = "remove_book",
        description = "Remove a book from the catalog by ID.",
        annotations(
            read_only_hint = false,
            destructive_hint = true,
            idempotent_hint = true,
            open_world_hint = false
        )
    )]
    async fn remove_book(
        &self,
        Parameters(req): Parameters<McpRemoveBookRequest>,
    ) -> Result<CallToolResult, McpError> {
        let mut repo = self.repo()?;
        let id = resolve_id(&repo, &req.id)?;
        let title = repo.get(&id).map(|b| b.title().to_string());

        let outcome = repo.remove(&id).map_err(Self::to_mcp_error)?;

        let text = match (&outcome, title) {
            (Outcome::Removed(_), Some(title)) => format!("{outcome} ('{title}')"),
            _ => outcome.to_string(),
        };
        Ok(CallToolResult::success(vec![Content::text(text)]))
    }

    #[tool(
        name = "find_books",
        description = "Search books by title or author (case-insensitive substring) or by year.",
        annotations(
            read_only_hint = true,
            destructive_hint = false,
            open_world_hint = false
        )
    )]
    async fn find_books(
        &self,
        Parameters(req): Parameters<McpFindBooksRequest>,
    ) -> Result<CallToolResult, McpError> {
        let query = input::validate_query(&req.query).map_err(Self::input_error)?;
        let repo = self.repo()?;
        let found = repo.find(query);

        if found.is_empty() {
            return Ok(CallToolResult::success(vec![Content::text(format!(
                "No books found matching '{query}'."
            ))]));
        }
        Ok(CallToolResult::success(vec![Content::text(format_books(
            &found,
        ))]))
    }

    #[tool(
        name = "list_books",
        description = "List every book in the catalog in the order they were added.",
        annotations(
            read_only_hint = true,
            destructive_hint = false,
            open_world_hint = false
        )
    )]
    async fn list_books(
        &self,
        #[allow(unused_variables)] Parameters(_req): Parameters<McpListBooksRequest>,
    ) -> Result<CallToolResult, McpError> {
        let repo = self.repo()?;
        if repo.is_empty() {
            return Ok(CallToolResult::success(vec![Content::text(
                "The catalog is empty. Use `add_book` to add books.",
            )]));
        }
        let books: Vec<&Book> = repo.list().iter().collect();
        Ok(CallToolResult::success(vec![Content::text(format_books(
            &books,
        ))]))
    }

    #[tool(
        name = "update_status",
        description = "Mark a book as available or checked out.",
        annotations(
            read_only_hint = false,
            destructive_hint = false,
            idempotent_hint = true,
            open_world_hint = false
        )
    )]
    async fn update_status(
        &self,
        Parameters(req): Parameters<McpUpdateStatusRequest>,
    ) -> Result<CallToolResult, McpError> {
        let status = input::parse_status_input(&req.status);
        let mut repo = self.repo()?;
        let id = resolve_id(&repo, &req.id)?;

        let outcome = repo
            .update_status(&id, &status)
            .map_err(Self::to_mcp_error)?;

        Ok(CallToolResult::success(vec![Content::text(render_outcome(
            &repo, &outcome,
        ))]))
    }
}

// =============================================================================
// Helpers: rendering
// =============================================================================

/// Outcomeのメッセージに、対象の蔵書があればその表示を添える。
fn render_outcome(repo: &Repo, outcome: &Outcome) -> String {
    let id = match outcome {
        Outcome::Added(id)
        | Outcome::StatusChanged { id, .. }
        | Outcome::StatusUnchanged { id, .. } => Some(id),
        Outcome::Removed(_) | Outcome::Rejected(_) => None,
    };
    match id.and_then(|id| repo.get(id)) {
        Some(book) => format!("{outcome}\n{book}"),
        None => outcome.to_string(),
    }
}

fn format_books(books: &[&Book]) -> String {
    let mut output = format!("# Books ({})\n\n", books.len());
    for book in books {
        output.push_str(&book.to_string());
        output.push('\n');
    }
    output
}

// =============================================================================
// Tests
// =============================================================================
