//! Replacement of a located reference with an inline element

use lol_html::html_content::ContentType;
use lol_html::{HtmlRewriter, Settings, element};
use std::borrow::Cow;

use super::locator::is_stylesheet_rel;
use super::types::{Attribute, Reference};
use crate::error::{InlineError, InlineResult};

/// Build `<tag attrs...>content</tag>` for a reference
///
/// Any `</tag` inside `content` is written as `<\/tag` so the body cannot
/// close the element early.
#[must_use]
pub fn synthesize(reference: &Reference, content: &str) -> String {
    let tag = reference.tag_kind.as_str();
    let attributes: Vec<String> = reference.attributes.iter().map(Attribute::to_fragment).collect();
    let content = escape_closing_tag(content, tag);

    if attributes.is_empty() {
        format!("<{tag}>{content}</{tag}>")
    } else {
        format!("<{tag} {}>{content}</{tag}>", attributes.join(" "))
    }
}

/// Rewrite every case-insensitive `</tag` in `content` as `<\/tag`
fn escape_closing_tag<'a>(content: &'a str, tag: &str) -> Cow<'a, str> {
    let bytes = content.as_bytes();
    let tag = tag.as_bytes();
    let mut escaped: Option<String> = None;
    let mut copied = 0;
    let mut search = 0;

    while let Some(offset) = content[search..].find("</") {
        let start = search + offset;
        let name_end = start + 2 + tag.len();
        if name_end <= bytes.len() && bytes[start + 2..name_end].eq_ignore_ascii_case(tag) {
            let out = escaped.get_or_insert_with(|| String::with_capacity(content.len() + 8));
            out.push_str(&content[copied..start + 1]);
            out.push('\\');
            copied = start + 1;
        }
        search = start + 2;
    }

    match escaped {
        Some(mut out) => {
            out.push_str(&content[copied..]);
            Cow::Owned(out)
        }
        None => Cow::Borrowed(content),
    }
}

/// Replace the element `reference` was located from with `markup`
///
/// Exactly one element is replaced: the first carrying the same tag name and
/// the same raw reference value (and, for `<link>`, a stylesheet `rel`),
/// which is the one `locate` returned. All other
/// bytes of the document pass through unchanged.
pub fn replace(document: &str, reference: &Reference, markup: &str) -> InlineResult<String> {
    let mut output = Vec::with_capacity(document.len() + markup.len());
    let mut replaced = false;
    let selector = format!("[{}]", reference.reference_attribute);

    let mut rewriter = HtmlRewriter::new(
        Settings {
            element_content_handlers: vec![element!(selector, |el| {
                if replaced || !el.tag_name().eq_ignore_ascii_case(&reference.matched_tag) {
                    return Ok(());
                }
                if reference.matched_tag.eq_ignore_ascii_case("link")
                    && !is_stylesheet_rel(el.get_attribute("rel").as_deref())
                {
                    return Ok(());
                }
                if el.get_attribute(reference.reference_attribute).as_deref()
                    == Some(reference.reference_value.as_str())
                {
                    el.replace(markup, ContentType::Html);
                    replaced = true;
                }
                Ok(())
            })],
            ..Settings::default()
        },
        |c: &[u8]| output.extend_from_slice(c),
    );

    rewriter.write(document.as_bytes())?;
    rewriter.end()?;

    if !replaced {
        return Err(InlineError::Rewrite(format!(
            "element {} disappeared before it could be replaced",
            reference.describe()
        )));
    }

    String::from_utf8(output)
        .map_err(|e| InlineError::Rewrite(format!("Invalid UTF-8 in rewritten HTML: {e}")))
}
