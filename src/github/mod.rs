// src/github/mod.rs
// =============================================================================
// This module talks to the GitHub REST API.
//
// Currently implements:
// - A shared HTTP client configured for the API (client.rs)
// - Fetching a repository's README metadata (fetch.rs)
// - Listing a user's public repositories and turning them into cards (repos.rs)
//
// Rust concepts:
// - Modules: Organizing related functionality
// - impl blocks spread over several files for one type
// =============================================================================

mod client;
mod fetch;
mod repos;

pub use client::GithubClient;
pub use fetch::{ReadmePayload, ReadmeRequest};
pub use repos::{Listing, RepoCard};

#[cfg(test)]
pub(crate) mod test_server {
    // One-shot HTTP server for tests: answers the first request with a canned
    // response, then closes. Returns the base URL to point clients at.
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    pub async fn serve_once(status_line: &'static str, body: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = [0u8; 8192];
            let _ = socket.read(&mut buf).await;
            let response = format!(
                "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status_line,
                body.len(),
                body
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            let _ = socket.shutdown().await;
        });

        format!("http://{}", addr)
    }

    // Base URL of a port nobody listens on
    pub async fn closed_port() -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        format!("http://{}", addr)
    }
}
