//! Formatter registry

use relnote_core::ChangelogError;

use super::{ChangelogFormatter, JsonFormatter, MarkdownFormatter};
use crate::types::RenderConfig;

type FormatterFactory = Box<dyn Fn(RenderConfig) -> Box<dyn ChangelogFormatter> + Send + Sync>;

struct RegisteredFormatter {
    names: Vec<&'static str>,
    factory: FormatterFactory,
}

/// Registry of available output formats, looked up by name
pub struct FormatterRegistry {
    formatters: Vec<RegisteredFormatter>,
}

impl FormatterRegistry {
    /// Create a new registry with all built-in formatters
    pub fn new() -> Self {
        let mut registry = Self::empty();
        registry.register(&["md", "markdown"], |config| -> Box<dyn ChangelogFormatter> {
            Box::new(MarkdownFormatter::new(config))
        });
        registry.register(&["json"], |config| -> Box<dyn ChangelogFormatter> {
            Box::new(JsonFormatter::new(config))
        });
        registry
    }

    /// Create an empty registry
    pub fn empty() -> Self {
        Self {
            formatters: Vec::new(),
        }
    }

    /// Register a formatter factory under one or more names
    pub fn register<F>(&mut self, names: &[&'static str], factory: F)
    where
        F: Fn(RenderConfig) -> Box<dyn ChangelogFormatter> + Send + Sync + 'static,
    {
        self.formatters.push(RegisteredFormatter {
            names: names.to_vec(),
            factory: Box::new(factory),
        });
    }

    /// Check whether a format name is known
    pub fn contains(&self, name: &str) -> bool {
        self.find(name).is_some()
    }

    /// Build the formatter registered under `name`
    pub fn create(
        &self,
        name: &str,
        config: RenderConfig,
    ) -> Result<Box<dyn ChangelogFormatter>, ChangelogError> {
        let registered = self
            .find(name)
            .ok_or_else(|| ChangelogError::UnknownFormat {
                name: name.to_string(),
                available: self.names().join(", "),
            })?;
        Ok((registered.factory)(config))
    }

    /// All registered names, aliases included
    pub fn names(&self) -> Vec<&'static str> {
        self.formatters
            .iter()
            .flat_map(|f| f.names.iter().copied())
            .collect()
    }

    fn find(&self, name: &str) -> Option<&RegisteredFormatter> {
        self.formatters
            .iter()
            .find(|f| f.names.iter().any(|n| n.eq_ignore_ascii_case(name)))
    }
}

impl Default for FormatterRegistry {
    fn default() -> Self {
        Self::new()
    }
}
