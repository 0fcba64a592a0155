// src/readme/mod.rs
// =============================================================================
// The README pipeline.
//
//   Fetcher -> Decoder -> Renderer -> Link Rewriter & Indexer
//
// Each stage either hands its output to the next one or fails, and a failure
// stops everything after it. Nothing is retried.
//
// Submodules:
// - decode: base64 payload -> UTF-8 markdown
// - render: markdown (and embedded HTML) -> DocumentTree
// - rewrite: absolute image URLs + image identifiers + the image index
//
// The fetch lives in github/fetch.rs, next to the other API calls.
// =============================================================================

mod decode;
mod render;
mod rewrite;

pub use decode::decode_payload;
pub use render::render_markdown;
pub use rewrite::{rewrite_and_index, ImageReference};

use serde::Serialize;
use tracing::debug;

use crate::document::DocumentTree;
use crate::error::ReadmeError;
use crate::github::{GithubClient, ReadmePayload, ReadmeRequest};

/// The pipeline stage currently running
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    Fetching,
    Decoding,
    Rendering,
    Indexing,
}

// Everything one successful invocation produces
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedReadme {
    pub request: ReadmeRequest,
    pub document: DocumentTree,
    pub images: Vec<ImageReference>,
}

// Runs the whole pipeline for `request`.
// `on_stage` is told about every stage before it starts.
pub async fn run<F>(
    client: &GithubClient,
    request: &ReadmeRequest,
    raw_base: &str,
    mut on_stage: F,
) -> Result<RenderedReadme, ReadmeError>
where
    F: FnMut(Stage),
{
    on_stage(Stage::Fetching);
    let payload = client.fetch_readme(request).await?;
    process(payload, request, raw_base, on_stage)
}

// The synchronous part of the pipeline: everything after the network call
pub fn process<F>(
    payload: ReadmePayload,
    request: &ReadmeRequest,
    raw_base: &str,
    mut on_stage: F,
) -> Result<RenderedReadme, ReadmeError>
where
    F: FnMut(Stage),
{
    on_stage(Stage::Decoding);
    let text = decode_payload(&payload)?;
    debug!(bytes = text.len(), "README decoded");

    on_stage(Stage::Rendering);
    let mut document = render_markdown(&text);

    on_stage(Stage::Indexing);
    let images = rewrite_and_index(&mut document, request, raw_base)?;

    Ok(RenderedReadme {
        request: request.clone(),
        document,
        images,
    })
}
