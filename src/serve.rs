//! Preview server for the `dist` output tree.
//!
//! A lightweight HTTP server built on `tiny_http`:
//!
//! - Static file serving relative to `dist`
//! - Automatic `index.html` resolution for `/` and for directories
//! - Content type chosen by file extension; unknown extensions fall back
//!   to `application/octet-stream`
//! - File responses are streamed from the open file, not buffered
//!
//! The listener is long-lived: [`PreviewServer::spawn`] detaches the
//! accept loop onto its own thread and leaves teardown to the caller,
//! while [`serve_blocking`] runs it in the foreground with a Ctrl+C
//! handler. The server only ever reads `dist`; a page viewed mid-rebuild
//! can observe a partial file, which is acceptable for a local preview.

use crate::log;
use anyhow::{Context, Result, anyhow, bail};
use std::{
    borrow::Cow,
    fs::File,
    path::{Path, PathBuf},
    sync::Arc,
    thread,
};
use tiny_http::{Header, Request, Response, Server, StatusCode};

/// Default HTTP port for the preview server.
pub const DEFAULT_PORT: u16 = 8080;

/// A bound preview server, ready to accept requests.
pub struct PreviewServer {
    server: Arc<Server>,
    root: PathBuf,
    port: u16,
}

impl PreviewServer {
    /// Bind to `127.0.0.1:<port>` serving files relative to `root`.
    ///
    /// Fails when `root` does not exist (there is nothing to serve) or
    /// when the port cannot be bound.
    pub fn bind(root: &Path, port: u16) -> Result<Self> {
        if !root.is_dir() {
            bail!(
                "output directory {} does not exist, build the site first",
                root.display()
            );
        }

        let server = Server::http(("127.0.0.1", port))
            .map_err(|err| anyhow!("failed to bind 127.0.0.1:{port}: {err}"))?;

        Ok(Self {
            server: Arc::new(server),
            root: root.to_path_buf(),
            port,
        })
    }

    pub fn url(&self) -> String {
        format!("http://127.0.0.1:{}/", self.port)
    }

    pub const fn port(&self) -> u16 {
        self.port
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Shared handle for unblocking the accept loop from another thread.
    pub fn server_handle(&self) -> Arc<Server> {
        Arc::clone(&self.server)
    }

    /// Accept requests until the server is unblocked.
    pub fn run(&self) {
        for request in self.server.incoming_requests() {
            if let Err(err) = handle_request(request, &self.root) {
                log!("serve"; "request error: {err}");
            }
        }
    }

    /// Detach the accept loop onto its own thread. Teardown is the
    /// caller's responsibility; the listener is not stopped on idle.
    pub fn spawn(self) {
        thread::spawn(move || self.run());
    }
}

/// Run the preview server in the foreground until Ctrl+C.
pub fn serve_blocking(root: &Path, port: u16) -> Result<()> {
    let preview = PreviewServer::bind(root, port)?;

    let server = preview.server_handle();
    ctrlc::set_handler(move || {
        log!("serve"; "shutting down...");
        server.unblock();
    })
    .context("failed to set Ctrl+C handler")?;

    log!("serve"; "{}", preview.url());
    preview.run();
    Ok(())
}

// ============================================================================
// Request Handling
// ============================================================================

/// Handle a single HTTP request.
///
/// Resolution order: exact file, then `index.html` inside a directory,
/// then 404.
fn handle_request(request: Request, root: &Path) -> Result<()> {
    match resolve_request_path(root, request.url()) {
        Some(path) => serve_file(request, &path),
        None => serve_not_found(request),
    }
}

/// Map a request URL onto a file under `root`.
///
/// Decodes percent-escapes and strips any query string before joining.
/// `/` resolves to `index.html`; a directory resolves to its own
/// `index.html` or nothing.
fn resolve_request_path(root: &Path, url: &str) -> Option<PathBuf> {
    let url = urlencoding::decode(url)
        .map(Cow::into_owned)
        .unwrap_or_default();
    let without_query = url.split('?').next().unwrap_or(&url);
    let request_path = without_query.trim_matches('/');

    let local_path = root.join(request_path);
    if local_path.is_file() {
        return Some(local_path);
    }

    if local_path.is_dir() {
        let index_path = local_path.join("index.html");
        if index_path.is_file() {
            return Some(index_path);
        }
    }

    None
}

/// Serve a file with the appropriate content type, streaming its content.
fn serve_file(request: Request, path: &Path) -> Result<()> {
    let file = match File::open(path) {
        Ok(file) => file,
        Err(err) => return serve_error(request, &format!("{}: {err}", path.display())),
    };

    let response = Response::from_file(file)
        .with_header(Header::from_bytes("Content-Type", guess_content_type(path)).unwrap());

    request.respond(response)?;
    Ok(())
}

/// Serve 404 Not Found response.
fn serve_not_found(request: Request) -> Result<()> {
    let response = Response::new(
        StatusCode(404),
        vec![Header::from_bytes("Content-Type", "text/plain").unwrap()],
        std::io::Cursor::new("404 Not Found"),
        Some(13),
        None,
    );
    request.respond(response)?;
    Ok(())
}

/// Serve a best-effort 500; headers may already be partially sent.
fn serve_error(request: Request, message: &str) -> Result<()> {
    log!("serve"; "500: {message}");
    let body = "500 Internal Server Error";
    let response = Response::new(
        StatusCode(500),
        vec![Header::from_bytes("Content-Type", "text/plain").unwrap()],
        std::io::Cursor::new(body),
        Some(body.len()),
        None,
    );
    request.respond(response)?;
    Ok(())
}

// ============================================================================
// Content Type Detection
// ============================================================================

/// Guess MIME content type from file extension.
///
/// Returns `application/octet-stream` for unknown extensions.
fn guess_content_type(path: &Path) -> &'static str {
    match path.extension().and_then(|e| e.to_str()) {
        // Web content
        Some("html" | "htm") => "text/html; charset=utf-8",
        Some("css") => "text/css; charset=utf-8",
        Some("js" | "mjs") => "application/javascript; charset=utf-8",
        Some("json") => "application/json; charset=utf-8",
        Some("xml") => "application/xml; charset=utf-8",

        // Images
        Some("svg") => "image/svg+xml",
        Some("png") => "image/png",
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("ico") => "image/x-icon",

        // Audio / video
        Some("mp4") => "video/mp4",
        Some("webm") => "video/webm",
        Some("mp3") => "audio/mpeg",
        Some("wav") => "audio/wav",
        Some("ogg") => "audio/ogg",

        // Fonts
        Some("woff") => "font/woff",
        Some("woff2") => "font/woff2",
        Some("ttf") => "font/ttf",
        Some("otf") => "font/otf",

        // Documents
        Some("pdf") => "application/pdf",
        Some("txt") => "text/plain; charset=utf-8",

        // Default binary
        _ => "application/octet-stream",
    }
}
