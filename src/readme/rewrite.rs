// src/readme/rewrite.rs
// =============================================================================
// The Link Rewriter & Indexer stage.
//
// README images are usually written relative to the repository root
// (`![demo](img/demo.png)`). Shown anywhere but on GitHub those paths break,
// so we point them at the raw content host:
//
//   img/demo.png  ->  https://raw.githubusercontent.com/{owner}/{repo}/main/img/demo.png
//
// While walking the images we also give each one a stable identifier and
// record it in an index. The thumbnail strip is built from that index, and a
// thumbnail click finds its image again by identifier.
// =============================================================================

use serde::Serialize;
use tracing::debug;
use url::Url;

use crate::document::DocumentTree;
use crate::error::ReadmeError;
use crate::github::ReadmeRequest;

// One image found in the README, in document order
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImageReference {
    pub original_source: String,
    pub resolved_source: String,
    pub assigned_identifier: String,
    /// Position among images only, not among all nodes
    pub ordinal_index: usize,
}

// Identifier given to the `index`-th image of `repo`'s README
pub fn image_identifier(repo: &str, index: usize) -> String {
    format!("readme-image-{}-{}", repo, index)
}

// Base every relative image path is resolved against
pub fn raw_base_url(raw_base: &str, request: &ReadmeRequest) -> String {
    format!(
        "{}/{}/{}/main/",
        raw_base.trim_end_matches('/'),
        request.owner,
        request.repo
    )
}

// Rewrites relative image sources in place, assigns identifiers, and returns
// the image index
pub fn rewrite_and_index(
    document: &mut DocumentTree,
    request: &ReadmeRequest,
    raw_base: &str,
) -> Result<Vec<ImageReference>, ReadmeError> {
    let base_str = raw_base_url(raw_base, request);
    let base = Url::parse(&base_str).map_err(|e| ReadmeError::Render {
        reason: format!("invalid raw content base '{}': {}", base_str, e),
    })?;

    let mut references = Vec::new();
    let mut failure = None;

    document.for_each_image_mut(|image| {
        if failure.is_some() {
            return;
        }
        let index = references.len();

        let resolved = match resolve_source(&base, &image.src) {
            Ok(resolved) => resolved,
            Err(e) => {
                failure = Some(e);
                return;
            }
        };
        let id = image_identifier(&request.repo, index);

        references.push(ImageReference {
            original_source: std::mem::replace(&mut image.src, resolved.clone()),
            resolved_source: resolved,
            assigned_identifier: id.clone(),
            ordinal_index: index,
        });
        image.id = Some(id);
    });

    if let Some(e) = failure {
        return Err(e);
    }

    debug!(repo = %request.repo, images = references.len(), "indexed README images");
    Ok(references)
}

// Absolute http(s) sources and empty sources are left alone; everything else
// is joined onto the base the way a browser resolves a relative URL
fn resolve_source(base: &Url, src: &str) -> Result<String, ReadmeError> {
    if src.is_empty() || is_absolute_http(src) {
        return Ok(src.to_string());
    }
    base.join(src)
        .map(|url| url.to_string())
        .map_err(|e| ReadmeError::Render {
            reason: format!("cannot resolve image source '{}': {}", src, e),
        })
}

fn is_absolute_http(src: &str) -> bool {
    src.starts_with("http://") || src.starts_with("https://")
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why collect the error in `failure` instead of using `?`?
//    - The walk happens inside a closure that returns ()
//    - `?` can't escape the closure, so we remember the first error and
//      skip the remaining images
//
// 2. What does Url::join do?
//    - It resolves a reference the same way a browser does
//    - "img/a.png" and "./docs/../img/a.png" both end up under the base
//    - The base must end with '/', otherwise its last segment is replaced
// -----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{ElementKind, Image, Node};

    const RAW: &str = "https://raw.githubusercontent.com";

    fn doc_with(sources: &[&str]) -> DocumentTree {
        DocumentTree::new(
            sources
                .iter()
                .map(|src| Node::Element {
                    kind: ElementKind::Paragraph,
                    children: vec![Node::Image(Image {
                        src: src.to_string(),
                        ..Image::default()
                    })],
                })
                .collect(),
        )
    }

    #[test]
    fn test_relative_source_is_resolved() {
        let mut doc = doc_with(&["img/demo.png"]);
        let refs = rewrite_and_index(&mut doc, &ReadmeRequest::new("bar", "foo"), RAW).unwrap();

        assert_eq!(
            refs[0].resolved_source,
            "https://raw.githubusercontent.com/bar/foo/main/img/demo.png"
        );
        assert_eq!(refs[0].original_source, "img/demo.png");
        assert_eq!(doc.images()[0].src, refs[0].resolved_source);
    }

    #[test]
    fn test_absolute_sources_unchanged() {
        let sources = ["http://example.com/a.png", "https://example.com/b%20c.png?x=1"];
        let mut doc = doc_with(&sources);
        let refs = rewrite_and_index(&mut doc, &ReadmeRequest::new("bar", "foo"), RAW).unwrap();

        for (reference, src) in refs.iter().zip(sources) {
            assert_eq!(reference.resolved_source, src);
        }
    }

    #[test]
    fn test_dot_segments_normalized() {
        let mut doc = doc_with(&["./docs/../img/a.png"]);
        let refs = rewrite_and_index(&mut doc, &ReadmeRequest::new("bar", "foo"), RAW).unwrap();
        assert_eq!(
            refs[0].resolved_source,
            "https://raw.githubusercontent.com/bar/foo/main/img/a.png"
        );
    }

    #[test]
    fn test_identifiers_are_sequential_and_unique() {
        let mut doc = doc_with(&["a.png", "https://x.io/b.png", "c.png", "d.png"]);
        let refs = rewrite_and_index(&mut doc, &ReadmeRequest::new("bar", "foo"), RAW).unwrap();

        let ids: Vec<_> = refs.iter().map(|r| r.assigned_identifier.as_str()).collect();
        assert_eq!(
            ids,
            vec![
                "readme-image-foo-0",
                "readme-image-foo-1",
                "readme-image-foo-2",
                "readme-image-foo-3"
            ]
        );
        for (i, reference) in refs.iter().enumerate() {
            assert_eq!(reference.ordinal_index, i);
            // each identifier lands on exactly one image node
            let matches = doc
                .images()
                .iter()
                .filter(|img| img.id.as_deref() == Some(reference.assigned_identifier.as_str()))
                .count();
            assert_eq!(matches, 1);
        }
    }

    #[test]
    fn test_empty_source_kept_but_indexed() {
        let mut doc = doc_with(&[""]);
        let refs = rewrite_and_index(&mut doc, &ReadmeRequest::new("bar", "foo"), RAW).unwrap();
        assert_eq!(refs.len(), 1);
        assert_eq!(refs[0].resolved_source, "");
        assert_eq!(refs[0].assigned_identifier, "readme-image-foo-0");
    }

    #[test]
    fn test_no_images_no_references() {
        let mut doc = DocumentTree::new(vec![Node::Text("plain".into())]);
        let refs = rewrite_and_index(&mut doc, &ReadmeRequest::new("bar", "foo"), RAW).unwrap();
        assert!(refs.is_empty());
    }

    #[test]
    fn test_invalid_base_is_render_error() {
        let mut doc = doc_with(&["a.png"]);
        let err = rewrite_and_index(&mut doc, &ReadmeRequest::new("bar", "foo"), "not a url")
            .unwrap_err();
        assert!(matches!(err, ReadmeError::Render { .. }));
    }
}
