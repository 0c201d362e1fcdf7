//! Per-match capture extraction.

use fancy_regex::Captures;

/// The values extracted from one pattern match, handed to a render function.
///
/// A bag is either a named-field record (when the pattern declares named
/// groups) or a positional fallback (when it declares none). Either way,
/// groups that did not participate in the match read as `""` - a render
/// function never has to special-case an absent optional group.
///
/// Bags are rebuilt for every match and carry no state across matches or
/// transforms.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CaptureBag {
    Named {
        whole: String,
        fields: Vec<(String, String)>,
    },
    Positional {
        whole: String,
        groups: Vec<String>,
    },
}

impl CaptureBag {
    /// Build a bag from a raw match using the matcher's name table.
    ///
    /// `names` is index-aligned with the pattern's groups; entry 0 (the full
    /// match) is always `None`. Any named entry switches the bag to the
    /// named-field variant, which then carries only the named groups.
    pub(crate) fn from_captures(caps: &Captures<'_>, names: &[Option<String>]) -> Self {
        let group = |i: usize| {
            caps.get(i)
                .map(|m| m.as_str().to_owned())
                .unwrap_or_default()
        };
        let whole = group(0);

        if names.iter().any(Option::is_some) {
            let fields = names
                .iter()
                .enumerate()
                .filter_map(|(i, name)| name.as_ref().map(|name| (name.clone(), group(i))))
                .collect();
            Self::Named { whole, fields }
        } else {
            let groups = (1..caps.len()).map(group).collect();
            Self::Positional { whole, groups }
        }
    }

    /// The full matched span.
    pub fn whole(&self) -> &str {
        match self {
            Self::Named { whole, .. } | Self::Positional { whole, .. } => whole,
        }
    }

    /// Named-field access; `""` for unknown names and for positional bags.
    pub fn get(&self, name: &str) -> &str {
        match self {
            Self::Named { fields, .. } => fields
                .iter()
                .find(|(n, _)| n == name)
                .map(|(_, v)| v.as_str())
                .unwrap_or(""),
            Self::Positional { .. } => "",
        }
    }

    /// Positional access: index 0 is the full match, 1.. are the groups.
    ///
    /// On a named bag only index 0 resolves; out-of-range reads are `""`.
    pub fn pos(&self, index: usize) -> &str {
        if index == 0 {
            return self.whole();
        }
        match self {
            Self::Named { .. } => "",
            Self::Positional { groups, .. } => groups
                .get(index - 1)
                .map(String::as_str)
                .unwrap_or(""),
        }
    }

    pub fn is_named(&self) -> bool {
        matches!(self, Self::Named { .. })
    }
}
