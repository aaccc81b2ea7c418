//! Property tests for the block parser and renderer.

use gazette::blocks;
use proptest::prelude::*;

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 96,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: parsing never panics, whatever the input.
    #[test]
    fn property_parse_never_panics(content in "(?s).{0,512}") {
        let _ = blocks::parse_blocks(&content);
    }

    /// PROPERTY: rendering never panics and always produces something
    /// for non-empty input.
    #[test]
    fn property_render_never_panics(content in "(?s).{0,512}") {
        let rendered = blocks::render(&content);
        if !content.trim().is_empty() {
            prop_assert!(!rendered.html.is_empty());
        }
    }

    /// PROPERTY: a well-formed paragraph block always round-trips its
    /// body into the rendered HTML.
    #[test]
    fn property_paragraph_body_survives_rendering(
        body in "[A-Za-z0-9 ,.]{0,64}"
    ) {
        let content = format!(
            "<!-- blk:paragraph -->{body}<!-- /blk:paragraph -->"
        );
        let rendered = blocks::render(&content);
        prop_assert!(rendered.html.contains(body.trim()));
        prop_assert!(rendered.warnings.is_empty());
    }
}
