//! The ordered, name-keyed transform registry.

use serde::Serialize;
use tracing::debug;

use crate::captures::CaptureBag;
use crate::error::TransformError;
use crate::pattern::{Flags, Matcher};

/// A stored render function: capture bag in, output markup out.
///
/// The registry treats these as opaque data; only the pipeline invokes them.
/// They are expected to be pure string producers - the engine assumes no
/// side effects are needed for correctness, though it does not prevent them.
pub type RenderFn = Box<dyn Fn(&CaptureBag) -> anyhow::Result<String> + Send + Sync>;

/// Documentation-facing view of a registered transform.
///
/// `description` and `usage` are metadata only; they have no runtime effect.
#[derive(Debug, Clone, Serialize)]
pub struct TransformMeta {
    pub name: String,
    pub description: String,
    pub usage: String,
    pub pattern: String,
    pub flags: Flags,
}

/// A transform definition under construction.
///
/// `name`, `pattern`, and `render` are required; a definition lacking any of
/// them is rejected at registration with [`TransformError::MissingField`].
pub struct Transform {
    meta: TransformMeta,
    render: Option<RenderFn>,
}

impl Transform {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            meta: TransformMeta {
                name: name.into(),
                description: String::new(),
                usage: String::new(),
                pattern: String::new(),
                flags: Flags::none(),
            },
            render: None,
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.meta.description = description.into();
        self
    }

    pub fn usage(mut self, usage: impl Into<String>) -> Self {
        self.meta.usage = usage.into();
        self
    }

    pub fn pattern(mut self, pattern: impl Into<String>) -> Self {
        self.meta.pattern = pattern.into();
        self
    }

    pub fn flags(mut self, flags: Flags) -> Self {
        self.meta.flags = flags;
        self
    }

    pub fn render<F>(mut self, render: F) -> Self
    where
        F: Fn(&CaptureBag) -> anyhow::Result<String> + Send + Sync + 'static,
    {
        self.render = Some(Box::new(render));
        self
    }

    pub fn name(&self) -> &str {
        &self.meta.name
    }
}

/// A validated, compiled registry entry.
pub(crate) struct Entry {
    pub(crate) meta: TransformMeta,
    render: RenderFn,
    matcher: Matcher,
}

impl Entry {
    /// One whole-buffer scan-and-replace pass.
    ///
    /// Non-overlapping matches are replaced leftmost first; a non-global
    /// transform stops after the first. Render failures and mid-scan engine
    /// errors abort the pass.
    pub(crate) fn apply(&self, buffer: &str) -> Result<String, TransformError> {
        let mut out = String::with_capacity(buffer.len());
        let mut last = 0;
        let mut matches = 0usize;
        for caps in self.matcher.captures_iter(buffer) {
            let caps = caps.map_err(|e| TransformError::match_failure(&self.meta.name, &e))?;
            let Some(full) = caps.get(0) else { continue };
            let bag = self.matcher.capture_bag(&caps);
            let rendered = (self.render)(&bag).map_err(|cause| TransformError::Render {
                name: self.meta.name.clone(),
                cause,
            })?;
            out.push_str(&buffer[last..full.start()]);
            out.push_str(&rendered);
            last = full.end();
            matches += 1;
            if !self.matcher.is_global() {
                break;
            }
        }
        out.push_str(&buffer[last..]);
        debug!(transform = %self.meta.name, matches, "applied transform");
        Ok(out)
    }
}

/// Insertion-ordered collection of transforms, at most one per name.
///
/// Iteration order is pipeline order. Re-registering an existing name
/// replaces the definition *in place*, keeping its pipeline position; new
/// names append at the end.
#[derive(Default)]
pub struct Registry {
    entries: Vec<Entry>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate, compile, and store a definition.
    ///
    /// Fails with [`TransformError::MissingField`] when `name`, `pattern`, or
    /// `render` is absent, and with [`TransformError::Pattern`] when the
    /// pattern does not compile. The registry is unchanged on failure.
    pub fn register(&mut self, transform: Transform) -> Result<(), TransformError> {
        let Transform { meta, render } = transform;
        let Some(render) = render else {
            return Err(TransformError::MissingField);
        };
        if meta.name.is_empty() || meta.pattern.is_empty() {
            return Err(TransformError::MissingField);
        }
        let matcher = Matcher::compile(&meta.name, &meta.pattern, meta.flags)?;

        let entry = Entry {
            meta,
            render,
            matcher,
        };
        match self.position(&entry.meta.name) {
            Some(index) => {
                debug!(transform = %entry.meta.name, index, "replaced transform");
                self.entries[index] = entry;
            }
            None => {
                debug!(transform = %entry.meta.name, "registered transform");
                self.entries.push(entry);
            }
        }
        Ok(())
    }

    /// Remove a transform by name; unknown names are a silent no-op.
    pub fn unregister(&mut self, name: &str) {
        if let Some(index) = self.position(name) {
            debug!(transform = %name, "unregistered transform");
            self.entries.remove(index);
        }
    }

    /// Registered names in pipeline order; never contains duplicates.
    pub fn list(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.meta.name.as_str()).collect()
    }

    pub fn lookup(&self, name: &str) -> Option<&TransformMeta> {
        self.entries
            .iter()
            .find(|e| e.meta.name == name)
            .map(|e| &e.meta)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub(crate) fn entries(&self) -> &[Entry] {
        &self.entries
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.entries.iter().position(|e| e.meta.name == name)
    }
}
