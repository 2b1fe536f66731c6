//! Declarative schemas for the provider and its resources.

use serde::Serialize;
use std::collections::BTreeMap;

/// Plan-time behavior attached to an attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PlanModifier {
    /// Keep the prior state value instead of showing "(known after apply)".
    UseStateForUnknown,
}

/// A string attribute.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Attribute {
    /// Plain-text description
    pub description: String,
    /// Markdown description
    pub markdown_description: String,
    /// Must be set in configuration
    pub required: bool,
    /// May be set in configuration
    pub optional: bool,
    /// Set by the provider
    pub computed: bool,
    /// Hidden from plan output
    pub sensitive: bool,
    /// Plan modifiers
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub plan_modifiers: Vec<PlanModifier>,
}

impl Attribute {
    /// A required attribute.
    #[must_use]
    pub fn required() -> Self {
        Self {
            required: true,
            ..Self::default()
        }
    }

    /// An optional attribute.
    #[must_use]
    pub fn optional() -> Self {
        Self {
            optional: true,
            ..Self::default()
        }
    }

    /// A provider-computed attribute.
    #[must_use]
    pub fn computed() -> Self {
        Self {
            computed: true,
            ..Self::default()
        }
    }

    /// Also let the provider compute the value when configuration omits it.
    #[must_use]
    pub const fn and_computed(mut self) -> Self {
        self.computed = true;
        self
    }

    /// Mark as sensitive.
    #[must_use]
    pub const fn sensitive(mut self) -> Self {
        self.sensitive = true;
        self
    }

    /// Set both descriptions.
    #[must_use]
    pub fn describe(mut self, description: impl Into<String>, markdown: impl Into<String>) -> Self {
        self.description = description.into();
        self.markdown_description = markdown.into();
        self
    }

    /// Add a plan modifier.
    #[must_use]
    pub fn plan_modifier(mut self, modifier: PlanModifier) -> Self {
        self.plan_modifiers.push(modifier);
        self
    }
}

/// A provider or resource schema.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Schema {
    /// Plain-text description
    pub description: String,
    /// Markdown description
    pub markdown_description: String,
    /// Attributes by name
    pub attributes: BTreeMap<String, Attribute>,
}

impl Schema {
    /// Create a schema with descriptions and no attributes.
    #[must_use]
    pub fn new(description: impl Into<String>, markdown: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            markdown_description: markdown.into(),
            attributes: BTreeMap::new(),
        }
    }

    /// Add an attribute.
    #[must_use]
    pub fn with_attribute(mut self, name: &str, attribute: Attribute) -> Self {
        self.attributes.insert(name.to_string(), attribute);
        self
    }

    /// Look up an attribute.
    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<&Attribute> {
        self.attributes.get(name)
    }

    /// Names of attributes only the provider sets.
    pub fn computed_only(&self) -> impl Iterator<Item = &str> {
        self.attributes
            .iter()
            .filter(|(_, a)| a.computed && !a.required && !a.optional)
            .map(|(name, _)| name.as_str())
    }
}
