//! Human-readable documentation over the registry's read surface.
//!
//! Built entirely on `lookup`/`list`; nothing here touches the pipeline.

use crossterm::style::Stylize;

use crate::registry::{Registry, TransformMeta};

/// How help text is presented.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DisplayMode {
    /// Plain documentation text.
    #[default]
    Plain,
    /// ANSI-styled output for terminals.
    Decorated,
}

pub(crate) fn render(registry: &Registry, name: Option<&str>, mode: DisplayMode) -> String {
    match name {
        Some(name) => match registry.lookup(name) {
            Some(meta) => describe(meta, mode),
            // A miss is a message, not an error.
            None => format!("no transform named \"{name}\" is registered"),
        },
        None => index(registry, mode),
    }
}

fn styled_name(name: &str, mode: DisplayMode) -> String {
    match mode {
        DisplayMode::Plain => name.to_string(),
        DisplayMode::Decorated => name.bold().cyan().to_string(),
    }
}

fn styled_label(label: &str, mode: DisplayMode) -> String {
    match mode {
        DisplayMode::Plain => label.to_string(),
        DisplayMode::Decorated => label.dark_grey().to_string(),
    }
}

fn index(registry: &Registry, mode: DisplayMode) -> String {
    let mut out = String::from("transforms in pipeline order:\n");
    let width = registry
        .list()
        .iter()
        .map(|name| name.len())
        .max()
        .unwrap_or(0);
    for name in registry.list() {
        let description = registry
            .lookup(name)
            .map(|meta| meta.description.as_str())
            .unwrap_or("");
        let padding = " ".repeat(width - name.len());
        out.push_str(&format!(
            "  {}{padding}  {description}\n",
            styled_name(name, mode)
        ));
    }
    out
}

fn describe(meta: &TransformMeta, mode: DisplayMode) -> String {
    let mut out = format!("{}\n", styled_name(&meta.name, mode));
    if !meta.description.is_empty() {
        out.push_str(&format!("  {}\n", meta.description));
    }
    if !meta.usage.is_empty() {
        out.push_str(&format!(
            "  {} {}\n",
            styled_label("usage:", mode),
            meta.usage.replace('\n', "\n         ")
        ));
    }
    out.push_str(&format!(
        "  {} {}\n",
        styled_label("pattern:", mode),
        meta.pattern
    ));
    out.push_str(&format!(
        "  {} {}\n",
        styled_label("flags:", mode),
        meta.flags
    ));
    out
}
