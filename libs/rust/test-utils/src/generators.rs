//! Shared proptest generators.

use proptest::prelude::*;

/// Generate organization ids (UUID shaped).
pub fn organization_id_strategy() -> impl Strategy<Value = String> {
    uuid_strategy()
}

/// Generate lowercase hyphenated UUID strings.
pub fn uuid_strategy() -> impl Strategy<Value = String> {
    "[0-9a-f]{8}-[0-9a-f]{4}-4[0-9a-f]{3}-[89ab][0-9a-f]{3}-[0-9a-f]{12}"
}

/// Generate project names, including spaces and punctuation.
pub fn project_name_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("example".to_string()),
        Just("Production Secrets".to_string()),
        "[A-Za-z][A-Za-z0-9 _.-]{0,40}",
    ]
}

/// Generate secret keys in the usual environment-variable style.
pub fn secret_key_strategy() -> impl Strategy<Value = String> {
    "[A-Z][A-Z0-9_]{2,30}"
}

/// Generate secret values.
pub fn secret_value_strategy() -> impl Strategy<Value = String> {
    "[A-Za-z0-9!@#$%^&*()_+=-]{8,64}"
}

/// Generate optional notes.
pub fn note_strategy() -> impl Strategy<Value = String> {
    prop_oneof![Just(String::new()), "[A-Za-z0-9 .,]{1,80}"]
}

/// Generate API error messages.
pub fn error_message_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("Resource not found.".to_string()),
        Just("You do not have permission to access this project.".to_string()),
        "[A-Z][a-z ]{5,40}\\.",
    ]
}
