//! Per-event parameter bag.

use std::any::{type_name, Any};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

/// Errors raised when reading a typed value out of [`TransitionParameters`].
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ParameterError {
    #[error("No parameter for key '{key}'")]
    Missing { key: String },

    #[error("Parameter '{key}' is not a {expected}")]
    TypeMismatch { key: String, expected: &'static str },
}

/// Immutable, string-keyed bag of arbitrary values sent along with an event.
///
/// Every guard and action invoked while processing the event can read it.
/// Cloning is cheap: values are reference counted.
///
/// # Example
///
/// ```rust
/// use waymark::core::TransitionParameters;
///
/// let params = TransitionParameters::builder()
///     .with("amount", 250_u64)
///     .with("currency", "EUR".to_string())
///     .build();
///
/// assert_eq!(params.get::<u64>("amount"), Some(&250));
/// assert!(params.value::<String>("amount").is_err());
/// ```
#[derive(Clone, Default)]
pub struct TransitionParameters {
    values: HashMap<String, Arc<dyn Any + Send + Sync>>,
}

impl TransitionParameters {
    /// An empty parameter bag.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn builder() -> ParametersBuilder {
        ParametersBuilder::default()
    }

    /// Typed lookup; `None` when the key is absent or holds another type.
    pub fn get<T: Any>(&self, key: &str) -> Option<&T> {
        self.values.get(key).and_then(|value| value.downcast_ref())
    }

    /// Typed lookup that explains why a value is unavailable.
    ///
    /// `ParameterError` converts into [`HookError`](crate::core::HookError),
    /// so hooks can use `?` directly.
    pub fn value<T: Any>(&self, key: &str) -> Result<&T, ParameterError> {
        let value = self.values.get(key).ok_or_else(|| ParameterError::Missing {
            key: key.to_string(),
        })?;
        value
            .downcast_ref()
            .ok_or_else(|| ParameterError::TypeMismatch {
                key: key.to_string(),
                expected: type_name::<T>(),
            })
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl fmt::Debug for TransitionParameters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut keys: Vec<&str> = self.keys().collect();
        keys.sort_unstable();
        f.debug_struct("TransitionParameters")
            .field("keys", &keys)
            .finish()
    }
}

impl<K, V> FromIterator<(K, V)> for TransitionParameters
where
    K: Into<String>,
    V: Any + Send + Sync,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        iter.into_iter()
            .fold(Self::builder(), |builder, (key, value)| builder.with(key, value))
            .build()
    }
}

/// Builder for [`TransitionParameters`].
#[derive(Default)]
pub struct ParametersBuilder {
    values: HashMap<String, Arc<dyn Any + Send + Sync>>,
}

impl ParametersBuilder {
    /// Add a value, replacing any earlier value under the same key.
    pub fn with<V: Any + Send + Sync>(mut self, key: impl Into<String>, value: V) -> Self {
        self.values.insert(key.into(), Arc::new(value));
        self
    }

    pub fn build(self) -> TransitionParameters {
        TransitionParameters {
            values: self.values,
        }
    }
}
