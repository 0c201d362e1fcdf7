//! The parser instance: a registry plus the sequential pipeline executor.

use tracing::debug;

use crate::error::TransformError;
use crate::features;
use crate::help::{self, DisplayMode};
use crate::registry::{Registry, Transform, TransformMeta};

/// One independent converter instance.
///
/// Each instance exclusively owns its registry; instances share nothing and
/// may be used from different threads without coordination. All calls are
/// synchronous, and no state survives between calls to [`parse`](Self::parse).
pub struct Parser {
    registry: Registry,
    display_mode: DisplayMode,
}

impl Default for Parser {
    fn default() -> Self {
        Self::new()
    }
}

impl Parser {
    /// An instance pre-populated with the built-in feature set, in its fixed
    /// default order.
    pub fn new() -> Self {
        let mut parser = Self::empty();
        for transform in features::builtins() {
            parser
                .registry
                .register(transform)
                .expect("built-in transform is valid");
        }
        parser
    }

    /// An instance with no transforms at all; `parse` is the identity until
    /// something is registered.
    pub fn empty() -> Self {
        Self {
            registry: Registry::new(),
            display_mode: DisplayMode::default(),
        }
    }

    pub fn with_display_mode(mut self, mode: DisplayMode) -> Self {
        self.display_mode = mode;
        self
    }

    pub fn set_display_mode(&mut self, mode: DisplayMode) {
        self.display_mode = mode;
    }

    /// Register a transform; replaces any existing definition with the same
    /// name in place. Returns `self` so registrations chain.
    pub fn register(&mut self, transform: Transform) -> Result<&mut Self, TransformError> {
        self.registry.register(transform)?;
        Ok(self)
    }

    /// Remove a transform by name; unknown names are a no-op.
    pub fn unregister(&mut self, name: &str) -> &mut Self {
        self.registry.unregister(name);
        self
    }

    /// Registered transform names in pipeline order.
    pub fn list(&self) -> Vec<&str> {
        self.registry.list()
    }

    pub fn lookup(&self, name: &str) -> Option<&TransformMeta> {
        self.registry.lookup(name)
    }

    /// Metadata for every registered transform, in pipeline order.
    pub fn transforms(&self) -> impl Iterator<Item = &TransformMeta> {
        self.registry.entries().iter().map(|e| &e.meta)
    }

    /// Documentation text for one transform, or an index of all of them.
    ///
    /// An unknown name produces a "not found" message, not an error.
    pub fn help(&self, name: Option<&str>) -> String {
        help::render(&self.registry, name, self.display_mode)
    }

    /// Convert `text` to HTML by applying every registered transform, in
    /// order, as a whole-buffer scan-and-replace pass.
    ///
    /// Empty input returns empty output without running any transform.
    /// Identical registry state and input always produce identical output.
    /// The registry order is fixed for the duration of the call: `&self`
    /// rules out interleaved mutation, so the iteration is a consistent
    /// snapshot by construction.
    pub fn parse(&self, text: &str) -> Result<String, TransformError> {
        if text.is_empty() {
            return Ok(String::new());
        }
        debug!(transforms = self.registry.len(), bytes = text.len(), "parse");
        let mut buffer = text.to_string();
        for entry in self.registry.entries() {
            buffer = entry.apply(&buffer)?;
        }
        Ok(buffer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TransformError;
    use crate::pattern::Flags;

    fn shout() -> Transform {
        Transform::new("shout")
            .pattern(r"!!(?P<text>[^!]+)!!")
            .flags(Flags::global())
            .render(|caps| Ok(format!("<shout>{}</shout>", caps.get("text"))))
    }

    #[test]
    fn empty_input_returns_empty_output() {
        assert_eq!(Parser::new().parse("").unwrap(), "");
        assert_eq!(Parser::empty().parse("").unwrap(), "");
    }

    #[test]
    fn empty_parser_is_the_identity() {
        assert_eq!(Parser::empty().parse("**raw**").unwrap(), "**raw**");
    }

    #[test]
    fn parse_is_deterministic() {
        let parser = Parser::new();
        let input = "# Title\n\nSome *text* with [a link](https://x.com).";
        let first = parser.parse(input).unwrap();
        for _ in 0..10 {
            assert_eq!(parser.parse(input).unwrap(), first);
        }
    }

    #[test]
    fn register_then_unregister_restores_behavior() {
        let mut parser = Parser::new();
        let before = parser.parse("plain text").unwrap();

        parser.register(shout()).unwrap();
        parser.unregister("shout");

        assert_eq!(parser.parse("plain text").unwrap(), before);
        assert_eq!(parser.list(), Parser::new().list());
    }

    #[test]
    fn registrations_chain() {
        let mut parser = Parser::empty();
        parser
            .register(shout())
            .unwrap()
            .register(
                Transform::new("quiet")
                    .pattern(r"\.\.\.")
                    .flags(Flags::global())
                    .render(|_| Ok("&hellip;".to_string())),
            )
            .unwrap();
        assert_eq!(parser.list(), vec!["shout", "quiet"]);
    }

    #[test]
    fn custom_transform_participates_in_the_pipeline() {
        let mut parser = Parser::new();
        parser.register(shout()).unwrap();
        let out = parser.parse("!!hey!!").unwrap();
        assert!(out.contains("<shout>hey</shout>"));
    }

    #[test]
    fn runaway_backtracking_surfaces_as_match_error() {
        // The engine's backtrack limit is the matching budget; overruns must
        // come back as an error, not hang or get swallowed.
        let mut parser = Parser::empty();
        parser
            .register(
                Transform::new("runaway")
                    .pattern(r"(a|a)*$(?<!x)")
                    .flags(Flags::global())
                    .render(|_| Ok(String::new())),
            )
            .unwrap();
        let input = format!("{}x", "a".repeat(30));
        let err = parser.parse(&input).unwrap_err();
        match err {
            TransformError::Match { name, .. } => assert_eq!(name, "runaway"),
            other => panic!("expected Match error, got {other:?}"),
        }
    }

    #[test]
    fn instances_do_not_share_registries() {
        let mut custom = Parser::new();
        custom.unregister("bold");
        let stock = Parser::new();
        assert!(stock.list().contains(&"bold"));
        assert!(!custom.list().contains(&"bold"));
    }
}
