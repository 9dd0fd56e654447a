//! Reference location in serialized HTML
//!
//! Elements are found with lol_html's tokenizer, so references inside
//! comments, script bodies or attribute values of other elements never match,
//! and matching is by exact attribute value rather than substring.

use lol_html::{HtmlRewriter, Settings, element};
use std::cell::RefCell;

use super::attributes;
use super::types::{Reference, TagKind};
use crate::bundle::{Artifact, ArtifactKind};
use crate::error::InlineResult;
use crate::utils::{is_remote_reference, join_base, strip_leading_separator};

/// Value a referencing attribute must carry for `artifact`
///
/// Local outputs are prefixed with the deployment base; remote artifacts are
/// already full URLs.
#[must_use]
pub fn reference_key(artifact: &Artifact, base: &str) -> String {
    if artifact.is_remote() {
        artifact.name.clone()
    } else {
        join_base(base, &artifact.name)
    }
}

/// True when an attribute value points at `key`, tolerating a leading `/` or `./`
#[must_use]
pub fn value_matches_key(value: &str, key: &str) -> bool {
    strip_leading_separator(value.trim()) == strip_leading_separator(key)
}

/// True when a `rel` value lists the `stylesheet` link type
#[must_use]
pub fn is_stylesheet_rel(rel: Option<&str>) -> bool {
    rel.is_some_and(|rel| {
        rel.split_ascii_whitespace()
            .any(|token| token.eq_ignore_ascii_case("stylesheet"))
    })
}

/// Find the first element whose `src` (or `href` for stylesheets) equals `key`
///
/// `Ok(None)` is the not-matched condition; errors only come from the tokenizer.
pub fn locate(artifact: &Artifact, key: &str, document: &str) -> InlineResult<Option<Reference>> {
    let attribute = artifact.kind.reference_attribute();
    let selector = format!("[{attribute}]");
    let mut found: Option<Reference> = None;

    let mut rewriter = HtmlRewriter::new(
        Settings {
            element_content_handlers: vec![element!(selector, |el| {
                if found.is_some() {
                    return Ok(());
                }
                let Some(value) = el.get_attribute(attribute) else {
                    return Ok(());
                };
                if !value_matches_key(&value, key) {
                    return Ok(());
                }

                let matched_tag = el.tag_name();
                // Preload, icon and other non-stylesheet links are not style references
                if matched_tag.eq_ignore_ascii_case("link")
                    && !is_stylesheet_rel(el.get_attribute("rel").as_deref())
                {
                    return Ok(());
                }
                let pairs: Vec<(String, String)> = el
                    .attributes()
                    .iter()
                    .map(|attr| (attr.name(), attr.value()))
                    .collect();

                found = Some(Reference {
                    artifact_name: artifact.name.clone(),
                    reference_attribute: attribute,
                    reference_value: value,
                    tag_kind: TagKind::for_matched_tag(&matched_tag),
                    matched_tag,
                    attributes: attributes::from_pairs(pairs),
                });
                Ok(())
            })],
            ..Settings::default()
        },
        |_: &[u8]| {},
    );

    rewriter.write(document.as_bytes())?;
    rewriter.end()?;

    Ok(found)
}

/// Collect `<script src>` and `<link rel="stylesheet" href>` values that point
/// outside the build
///
/// Returned in document order, without duplicates. Other `<link>` types
/// (preload, icon, manifest) are ignored.
pub fn remote_references(document: &str) -> InlineResult<Vec<(String, ArtifactKind)>> {
    let found: RefCell<Vec<(String, ArtifactKind)>> = RefCell::new(Vec::new());

    let push = |value: String, kind: ArtifactKind| {
        let value = value.trim().to_string();
        if !is_remote_reference(&value) {
            return;
        }
        let mut found = found.borrow_mut();
        if !found.iter().any(|(existing, _)| *existing == value) {
            found.push((value, kind));
        }
    };

    let mut rewriter = HtmlRewriter::new(
        Settings {
            element_content_handlers: vec![
                element!("script[src]", |el| {
                    if let Some(src) = el.get_attribute("src") {
                        push(src, ArtifactKind::Script);
                    }
                    Ok(())
                }),
                element!("link[href]", |el| {
                    if !is_stylesheet_rel(el.get_attribute("rel").as_deref()) {
                        return Ok(());
                    }
                    if let Some(href) = el.get_attribute("href") {
                        push(href, ArtifactKind::Style);
                    }
                    Ok(())
                }),
            ],
            ..Settings::default()
        },
        |_: &[u8]| {},
    );

    rewriter.write(document.as_bytes())?;
    rewriter.end()?;

    Ok(found.into_inner())
}
