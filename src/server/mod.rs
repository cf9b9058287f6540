//! Preview server with on-demand page generation
//!
//! Pre-built detail pages are served from the public directory. A request
//! for a page that was not pre-built gets the loading page while the page is
//! assembled in the background; once written, later requests get the page.

use anyhow::Result;
use axum::{
    body::Body,
    extract::{Path, State},
    http::{Request, StatusCode, Uri},
    response::{Html, IntoResponse, Redirect, Response},
    routing::get,
    Router,
};
use std::collections::HashMap;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::Mutex;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::cms::CmsError;
use crate::generator::{is_safe_blog_id, Generator};
use crate::page::DEFAULT_BLOG_ID;

/// On-demand build progress for one identifier
#[derive(Debug, Clone, PartialEq, Eq)]
enum BuildStatus {
    Pending,
    Failed(StatusCode),
}

/// Server state
struct ServerState {
    public_dir: PathBuf,
    /// Site root without the trailing slash, empty for `/`
    prefix: String,
    generator: Arc<Generator>,
    builds: Mutex<HashMap<String, BuildStatus>>,
}

impl ServerState {
    fn new(public_dir: PathBuf, root: &str, generator: Arc<Generator>) -> Self {
        Self {
            public_dir,
            prefix: match root.trim_matches('/') {
                "" => String::new(),
                root => format!("/{}", root),
            },
            generator,
            builds: Mutex::new(HashMap::new()),
        }
    }
}

/// Build the router over `generator`'s output, mounted at the site root
fn router(state: Arc<ServerState>) -> Router {
    let prefix = state.prefix.clone();

    let mut router = Router::new().route(&format!("{}/", prefix), get(index_handler));
    if !prefix.is_empty() {
        router = router.route(&prefix, get(index_handler));
    }
    router
        .route(&format!("{}/:blog_id", prefix), get(detail_handler))
        .route(&format!("{}/:blog_id/", prefix), get(detail_handler))
        .fallback(static_handler)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Start the server
pub async fn start(
    public_dir: PathBuf,
    root: &str,
    generator: Arc<Generator>,
    ip: &str,
    port: u16,
    open: bool,
) -> Result<()> {
    let state = Arc::new(ServerState::new(public_dir, root, generator));
    let app = router(state.clone());

    // Parse address - handle "localhost" specially
    let bind_ip = if ip == "localhost" { "127.0.0.1" } else { ip };
    let addr: SocketAddr = format!("{}:{}", bind_ip, port).parse()?;

    let url = format!("http://{}:{}{}/", ip, port, state.prefix);
    println!("Server running at {}", url);
    println!("Press Ctrl+C to stop.");

    if open {
        if let Err(e) = open_browser(&url) {
            tracing::warn!("Failed to open browser: {}", e);
        }
    }

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

async fn index_handler(State(state): State<Arc<ServerState>>) -> Redirect {
    Redirect::temporary(&format!("{}/{}/", state.prefix, DEFAULT_BLOG_ID))
}

/// Serve a detail page, starting an on-demand build when it is missing
async fn detail_handler(
    State(state): State<Arc<ServerState>>,
    Path(blog_id): Path<String>,
    request: Request<Body>,
) -> Response {
    if !is_safe_blog_id(&blog_id) {
        return static_handler(State(state), request).await;
    }
    detail_response(&state, &blog_id).await
}

async fn detail_response(state: &Arc<ServerState>, blog_id: &str) -> Response {
    let page_path = match state.generator.page_output_path(blog_id) {
        Ok(path) => path,
        Err(_) => return (StatusCode::NOT_FOUND, "Not found").into_response(),
    };
    if let Ok(content) = tokio::fs::read_to_string(&page_path).await {
        return Html(content).into_response();
    }

    let mut builds = state.builds.lock().await;
    // A build may have finished between the read above and taking the lock.
    if let Ok(content) = tokio::fs::read_to_string(&page_path).await {
        return Html(content).into_response();
    }
    match builds.get(blog_id).cloned() {
        Some(BuildStatus::Failed(status)) => {
            // Report once, then let the next request try again.
            builds.remove(blog_id);
            return (status, "Failed to build page").into_response();
        }
        Some(BuildStatus::Pending) => {}
        None => {
            builds.insert(blog_id.to_string(), BuildStatus::Pending);
            spawn_build(state.clone(), blog_id.to_string());
        }
    }
    drop(builds);

    match state.generator.render_loading() {
        Ok(html) => Html(html).into_response(),
        Err(e) => {
            tracing::error!("Failed to render loading page: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Server error").into_response()
        }
    }
}

fn spawn_build(state: Arc<ServerState>, blog_id: String) {
    tokio::spawn(async move {
        tracing::info!("Building {} on demand", blog_id);
        let result = state.generator.generate_page(&blog_id).await;

        let mut builds = state.builds.lock().await;
        match result {
            Ok(_) => {
                builds.remove(&blog_id);
            }
            Err(e) => {
                tracing::error!("On-demand build of {} failed: {:#}", blog_id, e);
                builds.insert(blog_id, BuildStatus::Failed(failure_status(&e)));
            }
        }
    });
}

/// 404 when the CMS has no such post, 500 otherwise
fn failure_status(error: &anyhow::Error) -> StatusCode {
    match error.downcast_ref::<CmsError>() {
        Some(CmsError::Status { status, .. }) if status.as_u16() == 404 => StatusCode::NOT_FOUND,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Serve any other file under the site root from the public directory
async fn static_handler(
    State(state): State<Arc<ServerState>>,
    mut request: Request<Body>,
) -> Response {
    let path = match request.uri().path().strip_prefix(state.prefix.as_str()) {
        Some("") => "/",
        Some(rest) if rest.starts_with('/') => rest,
        _ => return (StatusCode::NOT_FOUND, "Not found").into_response(),
    };
    let path_and_query = match request.uri().query() {
        Some(query) => format!("{}?{}", path, query),
        None => path.to_string(),
    };
    match path_and_query.parse::<Uri>() {
        Ok(uri) => *request.uri_mut() = uri,
        Err(_) => return (StatusCode::BAD_REQUEST, "Bad request").into_response(),
    }

    let mut service = ServeDir::new(&state.public_dir).append_index_html_on_directories(true);
    match service.try_call(request).await {
        Ok(response) => response.into_response(),
        Err(_) => (StatusCode::INTERNAL_SERVER_ERROR, "Server error").into_response(),
    }
}

/// Open a URL in the default browser
fn open_browser(url: &str) -> Result<()> {
    #[cfg(target_os = "macos")]
    {
        std::process::Command::new("open").arg(url).spawn()?;
    }

    #[cfg(target_os = "linux")]
    {
        std::process::Command::new("xdg-open").arg(url).spawn()?;
    }

    #[cfg(target_os = "windows")]
    {
        std::process::Command::new("cmd")
            .args(["/c", "start", url])
            .spawn()?;
    }

    Ok(())
}
