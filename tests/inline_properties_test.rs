//! Property-based tests for reference matching and document rewriting
//!
//! Uses proptest to verify properties that should hold for all inputs.

mod common;

use common::{bundle_with, document_of, plain_config};
use kodegen_tools_inline_resource::inline_resource::locator::value_matches_key;
use kodegen_tools_inline_resource::{Artifact, Bundle, InlineReport, NonMatchedLevel, inline_bundle};
use proptest::prelude::*;

fn run_pass(level: NonMatchedLevel, bundle: &mut Bundle) -> InlineReport {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .expect("runtime")
        .block_on(inline_bundle(plain_config(level), bundle))
        .expect("pass succeeds")
}

fn attribute_strategy() -> impl Strategy<Value = Vec<(String, String)>> {
    prop::collection::vec(("[a-z]{1,4}", "[a-z0-9]{0,4}"), 0..5).prop_map(|pairs| {
        pairs
            .into_iter()
            .enumerate()
            .map(|(i, (name, value))| (format!("data-{i}-{name}"), value))
            .collect()
    })
}

proptest! {
    /// Non-reference attributes survive in source order
    #[test]
    fn attributes_carried_in_order(attributes in attribute_strategy(), code in "[a-z]{1,12}\\(\\)") {
        let source: String = attributes
            .iter()
            .map(|(name, value)| format!(" {name}=\"{value}\""))
            .collect();

        let html = format!(r#"<script src="/app.js"{source}></script>"#);
        let mut bundle = bundle_with(&html, vec![Artifact::chunk("app.js", code.clone())]);
        run_pass(NonMatchedLevel::Error, &mut bundle);

        // Empty values on non-boolean attributes keep their `=""`
        let expected = format!("<script{source}>{code}</script>");
        prop_assert_eq!(document_of(&bundle), expected);
    }

    /// Text around the reference is never touched
    #[test]
    fn surrounding_text_preserved(
        before in "[a-zA-Z0-9 .,\n]{0,40}",
        after in "[a-zA-Z0-9 .,\n]{0,40}",
    ) {
        let html = format!(r#"<p>{before}</p><script src="./app.js"></script><p>{after}</p>"#);
        let mut bundle = bundle_with(&html, vec![Artifact::chunk("app.js", "go()")]);
        run_pass(NonMatchedLevel::Error, &mut bundle);

        prop_assert_eq!(
            document_of(&bundle),
            format!("<p>{before}</p><script>go()</script><p>{after}</p>")
        );
    }

    /// A second pass over an inlined document changes nothing
    #[test]
    fn second_pass_is_noop(names in prop::collection::hash_set("[a-z]{1,8}", 1..5)) {
        let outputs: Vec<Artifact> = names
            .iter()
            .map(|name| Artifact::chunk(format!("{name}.js"), format!("{name}()")))
            .collect();
        let html: String = names
            .iter()
            .map(|name| format!("<script src=\"/{name}.js\"></script>\n"))
            .collect();

        let mut bundle = bundle_with(&html, outputs);
        let first = run_pass(NonMatchedLevel::Silent, &mut bundle);
        prop_assert_eq!(first.inlined.len(), names.len());
        let inlined = document_of(&bundle);

        let second = run_pass(NonMatchedLevel::Silent, &mut bundle);
        prop_assert!(second.inlined.is_empty());
        prop_assert_eq!(document_of(&bundle), inlined);
    }

    /// Leading "/" and "./" are tolerated, other prefixes are not
    #[test]
    fn key_matching_is_exact(name in "[a-z]{1,8}\\.js", dir in "[a-z]{1,5}") {
        let rooted = format!("/{name}");
        let dotted = format!("./{name}");
        let nested = format!("/{dir}/{name}");
        let suffixed = format!("{name}.map");

        prop_assert!(value_matches_key(&name, &name));
        prop_assert!(value_matches_key(&rooted, &name));
        prop_assert!(value_matches_key(&dotted, &name));
        prop_assert!(!value_matches_key(&nested, &name));
        prop_assert!(!value_matches_key(&suffixed, &name));
    }
}
