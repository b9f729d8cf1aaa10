//! Template context and errors.
//!
//! Every key a template needs is looked up in the [`TemplateContext`] before
//! the template engine runs. A missing key is a [`TemplateError::MissingKey`],
//! never an empty substitution.

use std::collections::BTreeMap;

/// Errors raised while rendering a template
#[derive(Debug, thiserror::Error)]
pub enum TemplateError {
    #[error("template '{template}' references undefined key '{key}'")]
    MissingKey { template: String, key: String },

    #[error("template engine error: {0}")]
    Engine(#[from] minijinja::Error),
}

/// Values available to a template during rendering.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TemplateContext {
    values: BTreeMap<String, String>,
}

impl TemplateContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a value, builder style
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.values.insert(key.into(), value.into());
        self
    }

    /// Resolve `key` or fail with [`TemplateError::MissingKey`].
    pub fn lookup(&self, template: &str, key: &str) -> Result<&str, TemplateError> {
        self.values
            .get(key)
            .map(String::as_str)
            .ok_or_else(|| TemplateError::MissingKey {
                template: template.to_string(),
                key: key.to_string(),
            })
    }

    /// Resolve every key in `keys`, stopping at the first missing one.
    pub fn resolve<'a>(
        &'a self,
        template: &str,
        keys: &[&'a str],
    ) -> Result<BTreeMap<&'a str, &'a str>, TemplateError> {
        keys.iter()
            .map(|&key| Ok((key, self.lookup(template, key)?)))
            .collect()
    }
}
