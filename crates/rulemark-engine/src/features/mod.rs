//! The built-in feature set.
//!
//! Order is load-bearing and deliberate: block structures are consumed first
//! (fenced code, headings, horizontal rule, lists, blockquote), inline
//! emphasis and links second, and paragraph wrapping - the most permissive
//! pattern of all - runs last so it cannot eat anything that belongs to an
//! earlier transform. The pipeline performs no reordering and no conflict
//! detection; an integrator who registers over these names owns the
//! consequences.

mod blocks;
mod inline;
mod paragraph;

use crate::registry::Transform;

/// Every built-in transform, in default pipeline order.
pub fn builtins() -> Vec<Transform> {
    vec![
        blocks::fenced_code(),
        blocks::heading(),
        blocks::horizontal_rule(),
        blocks::unordered_list(),
        blocks::ordered_list(),
        blocks::blockquote(),
        inline::bold(),
        inline::italic(),
        inline::strikethrough(),
        inline::inline_code(),
        inline::image(),
        inline::link(),
        paragraph::paragraph(),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_order_puts_blocks_before_inline_and_paragraph_last() {
        let names: Vec<_> = builtins().iter().map(|t| t.name().to_string()).collect();
        assert_eq!(
            names,
            vec![
                "codeblock",
                "heading",
                "hr",
                "ulist",
                "olist",
                "blockquote",
                "bold",
                "italic",
                "strikethrough",
                "code",
                "image",
                "link",
                "paragraph",
            ]
        );
    }
}
