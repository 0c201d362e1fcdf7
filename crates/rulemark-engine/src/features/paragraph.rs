//! Paragraph wrapping, the last and most permissive transform.

use crate::pattern::Flags;
use crate::registry::Transform;

/// Wraps each run of non-blank lines in `<p>`, unless the run already starts
/// with a tag - by the time this runs, every earlier transform has replaced
/// its markup with HTML, so a leading `<` marks content to leave alone.
///
/// Must stay at the end of the pipeline: its pattern matches almost anything,
/// and anything it consumes is lost to the transforms that should have seen
/// it first.
pub(super) fn paragraph() -> Transform {
    Transform::new("paragraph")
        .description("Paragraph wrapping for any remaining run of text lines")
        .usage("plain text separated by blank lines")
        .pattern(r"^(?P<text>[^\n]+(?:\n[^\n]+)*)")
        .flags(Flags::global().multiline())
        .render(|caps| {
            let text = caps.get("text").trim();
            Ok(if text.starts_with('<') {
                caps.whole().to_string()
            } else {
                format!("<p>{text}</p>")
            })
        })
}
