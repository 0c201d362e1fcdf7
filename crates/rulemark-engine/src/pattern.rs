//! Pattern compilation.
//!
//! A transform's textual pattern plus its [`Flags`] compile into a [`Matcher`]
//! bound to nothing until it is handed a buffer to scan. Matching runs on
//! [`fancy_regex`] because the built-in feature set depends on lookaround
//! assertions (negative lookbehind keeps link matching out of image syntax,
//! negative lookahead keeps underscore emphasis out of `snake_case` words and
//! URLs), which the plain `regex` engine does not support.

use std::fmt;
use std::str::FromStr;

use fancy_regex::{CaptureMatches, Captures, Regex};
use serde::Serialize;

use crate::captures::CaptureBag;
use crate::error::TransformError;

/// Matching options for one transform.
///
/// `global` selects all non-overlapping occurrences instead of only the first;
/// the other three map onto the regex engine's inline `m`/`i`/`s` flags.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Flags {
    pub global: bool,
    pub multiline: bool,
    pub insensitive: bool,
    pub dot_all: bool,
}

impl Flags {
    pub const fn none() -> Self {
        Self {
            global: false,
            multiline: false,
            insensitive: false,
            dot_all: false,
        }
    }

    pub const fn global() -> Self {
        Self {
            global: true,
            ..Self::none()
        }
    }

    pub const fn multiline(mut self) -> Self {
        self.multiline = true;
        self
    }

    pub const fn insensitive(mut self) -> Self {
        self.insensitive = true;
        self
    }

    pub const fn dot_all(mut self) -> Self {
        self.dot_all = true;
        self
    }

    /// Parse a compact flags string such as `"gm"`.
    pub fn parse(s: &str) -> Result<Self, TransformError> {
        let mut flags = Self::none();
        for c in s.chars() {
            match c {
                'g' => flags.global = true,
                'm' => flags.multiline = true,
                'i' => flags.insensitive = true,
                's' => flags.dot_all = true,
                other => return Err(TransformError::Flag(other)),
            }
        }
        Ok(flags)
    }

    /// Inline flag group prepended to the pattern source, e.g. `(?mi)`.
    ///
    /// `global` has no inline equivalent; it controls the scan loop instead.
    fn inline_prefix(&self) -> String {
        let mut letters = String::new();
        if self.multiline {
            letters.push('m');
        }
        if self.insensitive {
            letters.push('i');
        }
        if self.dot_all {
            letters.push('s');
        }
        if letters.is_empty() {
            String::new()
        } else {
            format!("(?{letters})")
        }
    }
}

impl FromStr for Flags {
    type Err = TransformError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Flags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.global {
            write!(f, "g")?;
        }
        if self.multiline {
            write!(f, "m")?;
        }
        if self.insensitive {
            write!(f, "i")?;
        }
        if self.dot_all {
            write!(f, "s")?;
        }
        Ok(())
    }
}

/// A compiled pattern plus its compile-time name-to-index capture table.
#[derive(Debug)]
pub(crate) struct Matcher {
    regex: Regex,
    names: Vec<Option<String>>,
    global: bool,
}

impl Matcher {
    /// Compile `pattern` under `flags`.
    ///
    /// Malformed syntax fails here with [`TransformError::Pattern`] and
    /// propagates to the caller immediately; it is never deferred to `parse`.
    pub(crate) fn compile(name: &str, pattern: &str, flags: Flags) -> Result<Self, TransformError> {
        let source = format!("{}{}", flags.inline_prefix(), pattern);
        let regex = Regex::new(&source).map_err(|e| TransformError::pattern(name, &e))?;
        let names = regex
            .capture_names()
            .map(|n| n.map(str::to_owned))
            .collect();
        Ok(Self {
            regex,
            names,
            global: flags.global,
        })
    }

    pub(crate) fn is_global(&self) -> bool {
        self.global
    }

    /// All non-overlapping matches, leftmost first.
    pub(crate) fn captures_iter<'r, 'h>(&'r self, haystack: &'h str) -> CaptureMatches<'r, 'h> {
        self.regex.captures_iter(haystack)
    }

    /// Build the capture bag for one raw match.
    pub(crate) fn capture_bag(&self, caps: &Captures<'_>) -> CaptureBag {
        CaptureBag::from_captures(caps, &self.names)
    }
}
