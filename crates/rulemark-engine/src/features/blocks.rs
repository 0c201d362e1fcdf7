//! Block-level built-ins: fenced code, headings, rules, lists, blockquotes.

use crate::pattern::Flags;
use crate::registry::Transform;

/// Fenced code blocks. Runs first so nothing inside a fence is ever seen by
/// another transform as markup; the body is HTML-escaped.
pub(super) fn fenced_code() -> Transform {
    Transform::new("codeblock")
        .description("Fenced code block, HTML-escaped, with optional language class")
        .usage("```lang\ncode\n```")
        .pattern(r"```(?P<lang>[^\n`]*)\n(?P<code>[\s\S]*?)\n?```")
        .flags(Flags::global())
        .render(|caps| {
            let code = html_escape::encode_text(caps.get("code"));
            let lang = caps.get("lang").trim();
            Ok(if lang.is_empty() {
                format!("<pre><code>{code}</code></pre>")
            } else {
                format!("<pre><code class=\"language-{lang}\">{code}</code></pre>")
            })
        })
}

/// ATX headings, `#` through `######`.
pub(super) fn heading() -> Transform {
    Transform::new("heading")
        .description("ATX heading; the number of # characters picks h1-h6")
        .usage("## Section title")
        .pattern(r"^(?P<level>#{1,6})[ \t]+(?P<text>.+)$")
        .flags(Flags::global().multiline())
        .render(|caps| {
            let level = caps.get("level").len();
            let text = caps.get("text").trim();
            Ok(format!("<h{level}>{text}</h{level}>"))
        })
}

pub(super) fn horizontal_rule() -> Transform {
    Transform::new("hr")
        .description("Horizontal rule from a line of ---, *** or ___")
        .usage("---")
        .pattern(r"^(?:-{3,}|\*{3,}|_{3,})[ \t]*$")
        .flags(Flags::global().multiline())
        .render(|_| Ok("<hr />".to_string()))
}

/// A run of consecutive `-` or `*` bullet lines becomes one `<ul>`.
pub(super) fn unordered_list() -> Transform {
    Transform::new("ulist")
        .description("Unordered list from consecutive - or * bullet lines")
        .usage("- first\n- second")
        .pattern(r"^(?P<items>[-*][ \t]+\S.*(?:\n[-*][ \t]+\S.*)*)")
        .flags(Flags::global().multiline())
        .render(|caps| {
            let items: String = caps
                .get("items")
                .lines()
                .map(|line| format!("<li>{}</li>", line[1..].trim()))
                .collect();
            Ok(format!("<ul>{items}</ul>"))
        })
}

/// A run of consecutive `1.`-style lines becomes one `<ol>`.
pub(super) fn ordered_list() -> Transform {
    Transform::new("olist")
        .description("Ordered list from consecutive numbered lines")
        .usage("1. first\n2. second")
        .pattern(r"^(?P<items>\d+\.[ \t]+\S.*(?:\n\d+\.[ \t]+\S.*)*)")
        .flags(Flags::global().multiline())
        .render(|caps| {
            let items: String = caps
                .get("items")
                .lines()
                .map(|line| {
                    let text = line.split_once('.').map_or("", |(_, rest)| rest).trim();
                    format!("<li>{text}</li>")
                })
                .collect();
            Ok(format!("<ol>{items}</ol>"))
        })
}

pub(super) fn blockquote() -> Transform {
    Transform::new("blockquote")
        .description("Blockquote from consecutive > lines")
        .usage("> quoted text")
        .pattern(r"^(?P<lines>>[ \t]?.*(?:\n>[ \t]?.*)*)")
        .flags(Flags::global().multiline())
        .render(|caps| {
            let text = caps
                .get("lines")
                .lines()
                .map(|line| {
                    let rest = &line[1..];
                    // The pattern admits one space or tab after the marker.
                    rest.strip_prefix([' ', '\t']).unwrap_or(rest)
                })
                .collect::<Vec<_>>()
                .join("\n");
            Ok(format!("<blockquote>{text}</blockquote>"))
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
    #[case("# Hello World", "<h1>Hello World</h1>")]
    #[case("### Third", "<h3>Third</h3>")]
    #[case("###### Deep", "<h6>Deep</h6>")]
    fn heading_levels(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(apply(heading(), input), expected);
    }

    #[test]
    fn heading_without_space_is_left_alone() {
        assert_eq!(apply(heading(), "#hashtag"), "#hashtag");
    }

    #[test]
    fn fenced_code_escapes_html() {
        let out = apply(fenced_code(), "```\n<script>alert(1)</script>\n```");
        assert_eq!(
            out,
            "<pre><code>&lt;script&gt;alert(1)&lt;/script&gt;</code></pre>"
        );
    }

    #[test]
    fn fenced_code_keeps_language_tag() {
        let out = apply(fenced_code(), "```rust\nlet x = 1;\n```");
        assert_eq!(
            out,
            "<pre><code class=\"language-rust\">let x = 1;</code></pre>"
        );
    }

    #[test]
    fn horizontal_rule_variants() {
        assert_eq!(apply(horizontal_rule(), "---"), "<hr />");
        assert_eq!(apply(horizontal_rule(), "*****"), "<hr />");
        // Two dashes are not a rule.
        assert_eq!(apply(horizontal_rule(), "--"), "--");
    }

    #[test]
    fn bullet_run_becomes_one_list() {
        let out = apply(unordered_list(), "- a\n- b");
        assert_eq!(out, "<ul><li>a</li><li>b</li></ul>");
    }

    #[test]
    fn star_bullets_work_but_emphasis_does_not_trigger() {
        assert_eq!(apply(unordered_list(), "* item"), "<ul><li>item</li></ul>");
        // No whitespace after the marker means emphasis, not a bullet.
        assert_eq!(apply(unordered_list(), "*italic*"), "*italic*");
    }

    #[test]
    fn separate_runs_become_separate_lists() {
        let out = apply(unordered_list(), "- a\n\n- b");
        assert_eq!(out, "<ul><li>a</li></ul>\n\n<ul><li>b</li></ul>");
    }

    #[test]
    fn numbered_run_becomes_ordered_list() {
        let out = apply(ordered_list(), "1. one\n2. two\n10. ten");
        assert_eq!(out, "<ol><li>one</li><li>two</li><li>ten</li></ol>");
    }

    #[test]
    fn quote_lines_collapse_into_one_blockquote() {
        let out = apply(blockquote(), "> first\n> second");
        assert_eq!(out, "<blockquote>first\nsecond</blockquote>");
    }

    #[test]
    fn tab_after_quote_marker_is_stripped() {
        let out = apply(blockquote(), ">\tfirst\n> second");
        assert_eq!(out, "<blockquote>first\nsecond</blockquote>");
    }

    #[test]
    fn bare_quote_marker_is_kept_as_empty_line() {
        let out = apply(blockquote(), "> a\n>\n> b");
        assert_eq!(out, "<blockquote>a\n\nb</blockquote>");
    }
}
