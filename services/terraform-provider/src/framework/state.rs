//! Plan, config and state objects.
//!
//! Values arrive as a JSON object keyed by attribute name. Unknown and null
//! attributes are both `null`, so typed models use `Option` fields.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::diagnostics::Diagnostics;

/// An object value: resource plan, configuration, or state.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct State(Value);

impl State {
    /// An absent object (no prior state).
    #[must_use]
    pub const fn null() -> Self {
        Self(Value::Null)
    }

    /// Wrap a raw JSON value.
    #[must_use]
    pub const fn from_value(value: Value) -> Self {
        Self(value)
    }

    /// The raw JSON value.
    #[must_use]
    pub const fn raw(&self) -> &Value {
        &self.0
    }

    /// Whether the object is absent.
    #[must_use]
    pub fn is_null(&self) -> bool {
        self.0.is_null()
    }

    /// Decode into a typed model. A null object decodes as an empty one.
    ///
    /// # Errors
    ///
    /// Returns a "Value Conversion Error" diagnostic if the object does not
    /// match the model.
    pub fn get<T: DeserializeOwned>(&self) -> Result<T, Diagnostics> {
        let value = if self.0.is_null() {
            Value::Object(Map::new())
        } else {
            self.0.clone()
        };

        serde_json::from_value(value).map_err(|e| conversion_error(&e.to_string()))
    }

    /// Replace the whole object with an encoded model.
    pub fn set<T: Serialize>(&mut self, model: &T) -> Diagnostics {
        match serde_json::to_value(model) {
            Ok(value @ Value::Object(_)) => {
                self.0 = value;
                Diagnostics::new()
            }
            Ok(other) => conversion_error(&format!("expected an object, got {other}")),
            Err(e) => conversion_error(&e.to_string()),
        }
    }

    /// Set one top-level attribute, creating the object if absent.
    pub fn set_attribute(&mut self, name: &str, value: impl Into<Value>) -> Diagnostics {
        if self.0.is_null() {
            self.0 = Value::Object(Map::new());
        }

        match self.0.as_object_mut() {
            Some(object) => {
                object.insert(name.to_string(), value.into());
                Diagnostics::new()
            }
            None => conversion_error("cannot set an attribute on a non-object value"),
        }
    }

    /// Look up one top-level attribute.
    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<&Value> {
        self.0.get(name)
    }
}

fn conversion_error(detail: &str) -> Diagnostics {
    let mut diags = Diagnostics::new();
    diags.add_error(
        "Value Conversion Error",
        format!(
            "An unexpected error was encountered converting between the provider model and the \
             Terraform value. Please report this issue to the provider developers.\n\n{detail}"
        ),
    );
    diags
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug, Default, PartialEq, Serialize, Deserialize)]
    struct Model {
        #[serde(default)]
        id: Option<String>,
        #[serde(default)]
        name: Option<String>,
    }

    #[test]
    fn test_null_decodes_as_empty_model() {
        let model: Model = State::null().get().unwrap();
        assert_eq!(model, Model::default());
    }

    #[test]
    fn test_set_then_get() {
        let mut state = State::null();
        let diags = state.set(&Model {
            id: Some("abc".to_string()),
            name: None,
        });

        assert!(diags.is_empty());
        assert_eq!(state.raw(), &json!({"id": "abc", "name": null}));
        assert_eq!(state.get::<Model>().unwrap().id.as_deref(), Some("abc"));
    }

    #[test]
    fn test_get_type_mismatch() {
        let state = State::from_value(json!({"id": 42}));
        let diags = state.get::<Model>().unwrap_err();
        assert!(diags.has_error());
        assert_eq!(diags.iter().next().unwrap().summary, "Value Conversion Error");
    }

    #[test]
    fn test_set_attribute_on_null() {
        let mut state = State::null();
        assert!(state.set_attribute("id", "abc").is_empty());
        assert_eq!(state.raw(), &json!({"id": "abc"}));
        assert_eq!(state.attribute("id"), Some(&json!("abc")));
    }

    #[test]
    fn test_set_rejects_non_object() {
        let mut state = State::null();
        assert!(state.set(&"scalar").has_error());
        assert!(state.is_null());
    }
}
