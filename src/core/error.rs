//! Errors raised by guards and actions.

use std::any::Any;
use thiserror::Error;

/// Error type returned by guard and action hooks.
///
/// The engine never inspects it: a failing hook turns the event into a
/// `Failed` outcome that carries this error unmodified.
pub type HookError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// A hook panicked while the engine was processing an event.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("Hook panicked: {message}")]
pub struct HookPanic {
    pub message: String,
}

impl HookPanic {
    pub(crate) fn from_payload(payload: Box<dyn Any + Send>) -> Self {
        let message = match payload.downcast::<String>() {
            Ok(message) => *message,
            Err(payload) => match payload.downcast::<&'static str>() {
                Ok(message) => (*message).to_string(),
                Err(_) => "non-string panic payload".to_string(),
            },
        };
        Self { message }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn panic_message_is_extracted() {
        let literal = HookPanic::from_payload(Box::new("boom"));
        let formatted = HookPanic::from_payload(Box::new(format!("code {}", 7)));
        let opaque = HookPanic::from_payload(Box::new(42_u8));

        assert_eq!(literal.message, "boom");
        assert_eq!(formatted.to_string(), "Hook panicked: code 7");
        assert_eq!(opaque.message, "non-string panic payload");
    }
}
