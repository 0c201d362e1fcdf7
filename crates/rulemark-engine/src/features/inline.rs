//! Inline built-ins: emphasis, inline code, images, links.
//!
//! The underscore emphasis forms guard both ends with lookarounds so that
//! `snake_case` identifiers and URLs containing underscores are never treated
//! as markup. Link matching uses a negative lookbehind for `!` so it cannot
//! consume the bracket half of an image.

use crate::pattern::Flags;
use crate::registry::Transform;

/// Picks whichever alternation branch actually matched.
fn branch<'a>(first: &'a str, second: &'a str) -> &'a str {
    if first.is_empty() { second } else { first }
}

pub(super) fn bold() -> Transform {
    Transform::new("bold")
        .description("Strong emphasis with ** or __")
        .usage("**important** or __important__")
        .pattern(r"\*\*(?P<star>[^\n*]+?)\*\*|(?<![\w_])__(?P<under>[^\n_]+?)__(?![\w_])")
        .flags(Flags::global())
        .render(|caps| {
            let text = branch(caps.get("star"), caps.get("under"));
            Ok(format!("<strong>{text}</strong>"))
        })
}

pub(super) fn italic() -> Transform {
    Transform::new("italic")
        .description("Emphasis with * or _")
        .usage("*emphasis* or _emphasis_")
        .pattern(r"\*(?P<star>[^\n*]+?)\*|(?<![\w_])_(?P<under>[^\n_]+?)_(?![\w_])")
        .flags(Flags::global())
        .render(|caps| {
            let text = branch(caps.get("star"), caps.get("under"));
            Ok(format!("<em>{text}</em>"))
        })
}

pub(super) fn strikethrough() -> Transform {
    Transform::new("strikethrough")
        .description("Strikethrough with ~~")
        .usage("~~removed~~")
        .pattern(r"~~(?P<text>[^\n~]+?)~~")
        .flags(Flags::global())
        .render(|caps| Ok(format!("<del>{}</del>", caps.get("text"))))
}

pub(super) fn inline_code() -> Transform {
    Transform::new("code")
        .description("Inline code span, HTML-escaped")
        .usage("`code`")
        .pattern(r"`(?P<code>[^`\n]+)`")
        .flags(Flags::global())
        .render(|caps| {
            let code = html_escape::encode_text(caps.get("code"));
            Ok(format!("<code>{code}</code>"))
        })
}

pub(super) fn image() -> Transform {
    Transform::new("image")
        .description("Inline image")
        .usage("![alt text](https://example.com/cat.png)")
        .pattern(r"!\[(?P<alt>[^\]\n]*)\]\((?P<src>[^)\s]+)\)")
        .flags(Flags::global())
        .render(|caps| {
            let src = html_escape::encode_double_quoted_attribute(caps.get("src"));
            let alt = html_escape::encode_double_quoted_attribute(caps.get("alt"));
            Ok(format!("<img src=\"{src}\" alt=\"{alt}\" />"))
        })
}

pub(super) fn link() -> Transform {
    Transform::new("link")
        .description("Inline link")
        .usage("[link text](https://example.com)")
        .pattern(r"(?<!\!)\[(?P<text>[^\]\n]+)\]\((?P<href>[^)\s]+)\)")
        .flags(Flags::global())
        .render(|caps| {
            let href = html_escape::encode_double_quoted_attribute(caps.get("href"));
            Ok(format!("<a href=\"{href}\">{}</a>", caps.get("text")))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::Parser;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn apply(transform: Transform, input: &str) -> String {
        let mut parser = Parser::empty();
        parser.register(transform).unwrap();
        parser.parse(input).unwrap()
    }

    #[rstest]
    #[case("**x**", "<strong>x</strong>")]
    #[case("__x__", "<strong>x</strong>")]
    #[case("a **b** c", "a <strong>b</strong> c")]
    fn bold_forms(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(apply(bold(), input), expected);
    }

    #[rstest]
    #[case("*x*", "<em>x</em>")]
    #[case("_x_", "<em>x</em>")]
    fn italic_forms(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(apply(italic(), input), expected);
    }

    #[test]
    fn snake_case_is_not_emphasis() {
        assert_eq!(apply(italic(), "a snake_case_name here"), "a snake_case_name here");
        assert_eq!(apply(bold(), "a long__private__field here"), "a long__private__field here");
    }

    #[test]
    fn url_underscores_are_not_emphasis() {
        let url = "see https://x.com/some_page_here for details";
        assert_eq!(apply(italic(), url), url);
    }

    #[test]
    fn strikethrough_wraps_in_del() {
        assert_eq!(apply(strikethrough(), "~~gone~~"), "<del>gone</del>");
    }

    #[test]
    fn inline_code_escapes_html() {
        assert_eq!(
            apply(inline_code(), "`<b>`"),
            "<code>&lt;b&gt;</code>"
        );
    }

    #[test]
    fn link_renders_exact_anchor() {
        assert_eq!(
            apply(link(), "[T](https://x.com)"),
            "<a href=\"https://x.com\">T</a>"
        );
    }

    #[test]
    fn link_does_not_eat_image_syntax() {
        // The leading ! belongs to an image; the link transform must skip it.
        assert_eq!(apply(link(), "![alt](pic.png)"), "![alt](pic.png)");
    }

    #[test]
    fn image_renders_img_tag() {
        assert_eq!(
            apply(image(), "![cat](cat.png)"),
            "<img src=\"cat.png\" alt=\"cat\" />"
        );
    }

    #[test]
    fn image_alt_may_be_empty() {
        assert_eq!(
            apply(image(), "![](cat.png)"),
            "<img src=\"cat.png\" alt=\"\" />"
        );
    }

    #[test]
    fn href_with_quote_is_attribute_escaped() {
        let out = apply(link(), "[x](https://x.com/a\"b)");
        assert!(out.contains("&quot;"));
        assert!(!out.contains("a\"b\">"));
    }
}
