//! Fallback options and the resolution policy shared by every lookup.
//!
//! A lookup first asks its mapping for a value. When the mapping has none,
//! the policy tries, in order:
//!
//! 1. the custom transformer, if one is set and it returns `Some`;
//! 2. the default value, either a literal or one computed from the input;
//! 3. failure, formatted by the error message function (throwing lookups)
//!    or `None` (undefined-tolerant lookups).
//!
//! Options given at construction time can be overridden per call. Merging is
//! field-by-field: a field set on the call options wins, otherwise the
//! construction-time field applies.

use std::fmt;
use std::sync::Arc;

use crate::MappingError;

/// The fallback used when neither the mapping nor the transformer produced
/// a value.
pub enum DefaultValue<O, F: ?Sized> {
    /// Returned as is.
    Value(O),
    /// Called with the input (and argument) to produce the value.
    Computed(Arc<F>),
}

impl<O: Clone, F: ?Sized> Clone for DefaultValue<O, F> {
    fn clone(&self) -> Self {
        match self {
            DefaultValue::Value(value) => DefaultValue::Value(value.clone()),
            DefaultValue::Computed(f) => DefaultValue::Computed(Arc::clone(f)),
        }
    }
}

impl<O: fmt::Debug, F: ?Sized> fmt::Debug for DefaultValue<O, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DefaultValue::Value(value) => f.debug_tuple("Value").field(value).finish(),
            DefaultValue::Computed(_) => f.write_str("Computed(..)"),
        }
    }
}

pub type KeyTransformer<K, O> = dyn Fn(&K) -> Option<O> + Send + Sync;
pub type KeyDefault<K, O> = dyn Fn(&K) -> O + Send + Sync;
pub type KeyMessage<K> = dyn Fn(&K) -> String + Send + Sync;

pub type ArgumentTransformer<K, A, O> = dyn Fn(&K, &A) -> Option<O> + Send + Sync;
pub type ArgumentDefault<K, A, O> = dyn Fn(&K, &A) -> O + Send + Sync;
pub type ArgumentMessage<K, A> = dyn Fn(&K, &A) -> String + Send + Sync;

/// Options for direct lookups keyed by `K`.
pub type MapOptions<K, O> =
    ResolutionOptions<O, KeyTransformer<K, O>, KeyDefault<K, O>, KeyMessage<K>>;

/// Options for lookups whose mapped values take an extra argument `A`.
pub type ArgumentMapOptions<K, A, O> = ResolutionOptions<
    O,
    ArgumentTransformer<K, A, O>,
    ArgumentDefault<K, A, O>,
    ArgumentMessage<K, A>,
>;

/// Options for reverse lookups: the input is an output value `O` and the
/// result is a key `K`.
pub type ReverseMapOptions<K, O> = MapOptions<O, K>;

/// Custom transformer, default value and error message for a lookup.
///
/// Every field is optional and independent. Use the [`MapOptions`],
/// [`ArgumentMapOptions`] or [`ReverseMapOptions`] aliases, whose builder
/// methods accept plain closures.
///
/// ## Example
///
/// ```
/// use mapping_fn::{create_map_fn, MapOptions, Mapping};
///
/// let mapping = Mapping::new().with("foo", "FOO");
/// let map_fn = create_map_fn(mapping, MapOptions::new().default_value("DEFAULT"));
///
/// assert_eq!(map_fn.map(&"foo")?, "FOO");
/// assert_eq!(map_fn.map(&"bar")?, "DEFAULT");
/// # Ok::<(), mapping_fn::MappingError>(())
/// ```
#[must_use = "options do nothing until passed to a lookup"]
pub struct ResolutionOptions<O, T: ?Sized, D: ?Sized, M: ?Sized> {
    custom_transformer: Option<Arc<T>>,
    default_value: Option<DefaultValue<O, D>>,
    error_message: Option<Arc<M>>,
}

impl<O, T: ?Sized, D: ?Sized, M: ?Sized> Default for ResolutionOptions<O, T, D, M> {
    fn default() -> Self {
        Self {
            custom_transformer: None,
            default_value: None,
            error_message: None,
        }
    }
}

impl<O: Clone, T: ?Sized, D: ?Sized, M: ?Sized> Clone for ResolutionOptions<O, T, D, M> {
    fn clone(&self) -> Self {
        Self {
            custom_transformer: self.custom_transformer.clone(),
            default_value: self.default_value.clone(),
            error_message: self.error_message.clone(),
        }
    }
}

impl<O: fmt::Debug, T: ?Sized, D: ?Sized, M: ?Sized> fmt::Debug for ResolutionOptions<O, T, D, M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResolutionOptions")
            .field("custom_transformer", &self.custom_transformer.is_some())
            .field("default_value", &self.default_value)
            .field("error_message", &self.error_message.is_some())
            .finish()
    }
}

impl<O, T: ?Sized, D: ?Sized, M: ?Sized> ResolutionOptions<O, T, D, M> {
    /// Creates options with every field unset.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a literal default value.
    pub fn default_value(mut self, value: O) -> Self {
        self.default_value = Some(DefaultValue::Value(value));
        self
    }

    /// Returns true if a custom transformer is set on these options.
    ///
    /// Only these options are inspected; fields inherited at merge time are
    /// not reflected.
    pub fn has_custom_transformer(&self) -> bool {
        self.custom_transformer.is_some()
    }

    /// Returns true if a literal or computed default is set.
    pub fn has_default_value(&self) -> bool {
        self.default_value.is_some()
    }

    /// Returns true if an error message function is set.
    pub fn has_error_message(&self) -> bool {
        self.error_message.is_some()
    }

    /// Overlays `call` on top of these options, field by field.
    pub(crate) fn merge<'a>(&'a self, call: Option<&'a Self>) -> Merged<'a, O, T, D, M> {
        Merged {
            custom_transformer: call
                .and_then(|c| c.custom_transformer.as_deref())
                .or(self.custom_transformer.as_deref()),
            default_value: call
                .and_then(|c| c.default_value.as_ref())
                .or(self.default_value.as_ref()),
            error_message: call
                .and_then(|c| c.error_message.as_deref())
                .or(self.error_message.as_deref()),
        }
    }
}

impl<K, O> MapOptions<K, O> {
    /// Sets a transformer consulted when the mapping has no value.
    pub fn custom_transformer(
        mut self,
        f: impl Fn(&K) -> Option<O> + Send + Sync + 'static,
    ) -> Self {
        self.custom_transformer = Some(Arc::new(f));
        self
    }

    /// Sets a default computed from the input.
    pub fn default_with(mut self, f: impl Fn(&K) -> O + Send + Sync + 'static) -> Self {
        self.default_value = Some(DefaultValue::Computed(Arc::new(f)));
        self
    }

    /// Sets the message of the error raised when nothing resolves.
    pub fn error_message(mut self, f: impl Fn(&K) -> String + Send + Sync + 'static) -> Self {
        self.error_message = Some(Arc::new(f));
        self
    }
}

impl<K, A, O> ArgumentMapOptions<K, A, O> {
    /// Sets a transformer consulted when the resolver has no value.
    pub fn custom_transformer(
        mut self,
        f: impl Fn(&K, &A) -> Option<O> + Send + Sync + 'static,
    ) -> Self {
        self.custom_transformer = Some(Arc::new(f));
        self
    }

    /// Sets a default computed from the input and argument.
    pub fn default_with(mut self, f: impl Fn(&K, &A) -> O + Send + Sync + 'static) -> Self {
        self.default_value = Some(DefaultValue::Computed(Arc::new(f)));
        self
    }

    /// Sets the message of the error raised when nothing resolves.
    pub fn error_message(mut self, f: impl Fn(&K, &A) -> String + Send + Sync + 'static) -> Self {
        self.error_message = Some(Arc::new(f));
        self
    }
}

/// Construction-time options with call options laid over them.
pub(crate) struct Merged<'a, O, T: ?Sized, D: ?Sized, M: ?Sized> {
    custom_transformer: Option<&'a T>,
    default_value: Option<&'a DefaultValue<O, D>>,
    error_message: Option<&'a M>,
}

impl<O: Clone, T: ?Sized, D: ?Sized, M: ?Sized> Merged<'_, O, T, D, M> {
    /// Applies the fallback chain to the mapping's candidate `output`.
    ///
    /// `transform` and `compute` adapt the stored closures to the lookup's
    /// inputs.
    pub(crate) fn resolve(
        &self,
        output: Option<O>,
        transform: impl FnOnce(&T) -> Option<O>,
        compute: impl FnOnce(&D) -> O,
    ) -> Option<O> {
        if output.is_some() {
            return output;
        }

        if let Some(transformed) = self.custom_transformer.and_then(transform) {
            tracing::trace!("value produced by custom transformer");
            return Some(transformed);
        }

        let value = match self.default_value? {
            DefaultValue::Value(value) => value.clone(),
            DefaultValue::Computed(f) => compute(f),
        };
        tracing::trace!("value produced by default");
        Some(value)
    }

    /// Builds the error for an unresolved lookup.
    ///
    /// A configured error message always wins over `fallback`.
    pub(crate) fn error(
        &self,
        format: impl FnOnce(&M) -> String,
        fallback: impl FnOnce() -> String,
    ) -> MappingError {
        let message = match self.error_message {
            Some(f) => format(f),
            None => fallback(),
        };
        MappingError::new(message)
    }
}
