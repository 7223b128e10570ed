use std::fmt::Display;
use std::hash::Hash;

use crate::mapping::{Exhaustive, Mapping};
use crate::resolve::MapOptions;
use crate::MappingError;

/// A lookup function over a static key/value mapping that fails when no value
/// can be resolved.
///
/// ## Example
///
/// ```
/// use mapping_fn::{create_map_fn, MapOptions, Mapping};
///
/// let map_fn = create_map_fn(
///     Mapping::new().with("foo", "FOO").with("bar", "BAR"),
///     MapOptions::new(),
/// );
///
/// assert_eq!(map_fn.map(&"foo")?, "FOO");
/// assert_eq!(
///     map_fn.map(&"foobar").unwrap_err().to_string(),
///     r#"Unable to map "foobar", default value is not provided"#,
/// );
/// assert_eq!(
///     map_fn.map_with(&"foobar", &MapOptions::new().default_value("DEFAULT"))?,
///     "DEFAULT",
/// );
/// # Ok::<(), mapping_fn::MappingError>(())
/// ```
#[derive(Debug, Clone)]
pub struct MapFn<K, O> {
    mapping: Mapping<K, O>,
    options: MapOptions<K, O>,
}

impl<K, O> MapFn<K, O>
where
    K: Eq + Hash + Clone + Display,
    O: Clone,
{
    pub fn new(mapping: Mapping<K, O>, options: MapOptions<K, O>) -> Self {
        Self { mapping, options }
    }

    pub fn mapping(&self) -> &Mapping<K, O> {
        &self.mapping
    }

    /// Resolves `input` using the construction-time options.
    pub fn map(&self, input: &K) -> Result<O, MappingError> {
        self.resolve(input, None)
    }

    /// Resolves `input`, with `options` overriding construction-time options
    /// field by field.
    pub fn map_with(&self, input: &K, options: &MapOptions<K, O>) -> Result<O, MappingError> {
        self.resolve(input, Some(options))
    }

    fn resolve(&self, input: &K, call: Option<&MapOptions<K, O>>) -> Result<O, MappingError> {
        let merged = self.options.merge(call);
        let output = self.mapping.get(input).cloned();

        merged
            .resolve(output, |t| t(input), |d| d(input))
            .ok_or_else(|| {
                tracing::debug!(input = %input, "no value resolved");
                merged.error(
                    |m| m(input),
                    || format!(r#"Unable to map "{input}", default value is not provided"#),
                )
            })
    }
}

/// A lookup function over a static key/value mapping that returns `None`
/// instead of failing.
///
/// Error message options are ignored.
#[derive(Debug, Clone)]
pub struct MapFnUndefined<K, O> {
    mapping: Mapping<K, O>,
    options: MapOptions<K, O>,
}

impl<K, O> MapFnUndefined<K, O>
where
    K: Eq + Hash + Clone,
    O: Clone,
{
    pub fn new(mapping: Mapping<K, O>, options: MapOptions<K, O>) -> Self {
        Self { mapping, options }
    }

    pub fn mapping(&self) -> &Mapping<K, O> {
        &self.mapping
    }

    pub fn map(&self, input: &K) -> Option<O> {
        self.resolve(input, None)
    }

    pub fn map_with(&self, input: &K, options: &MapOptions<K, O>) -> Option<O> {
        self.resolve(input, Some(options))
    }

    fn resolve(&self, input: &K, call: Option<&MapOptions<K, O>>) -> Option<O> {
        let output = self.mapping.get(input).cloned();
        self.options
            .merge(call)
            .resolve(output, |t| t(input), |d| d(input))
    }
}

/// Creates a lookup function that fails on unresolvable keys.
pub fn create_map_fn<K, O>(mapping: Mapping<K, O>, options: MapOptions<K, O>) -> MapFn<K, O>
where
    K: Eq + Hash + Clone + Display,
    O: Clone,
{
    MapFn::new(mapping, options)
}

/// Creates a failing lookup function from a total function over every key.
pub fn create_map_fn_strict<K, O>(
    total: impl FnMut(&K) -> O,
    options: MapOptions<K, O>,
) -> MapFn<K, O>
where
    K: Exhaustive + Eq + Hash + Clone + Display,
    O: Clone,
{
    MapFn::new(Mapping::total(total), options)
}

/// Creates a lookup function that returns `None` on unresolvable keys.
pub fn create_map_fn_undefined<K, O>(
    mapping: Mapping<K, O>,
    options: MapOptions<K, O>,
) -> MapFnUndefined<K, O>
where
    K: Eq + Hash + Clone,
    O: Clone,
{
    MapFnUndefined::new(mapping, options)
}

/// Creates a `None`-returning lookup function from a total function over
/// every key.
pub fn create_map_fn_strict_undefined<K, O>(
    total: impl FnMut(&K) -> O,
    options: MapOptions<K, O>,
) -> MapFnUndefined<K, O>
where
    K: Exhaustive + Eq + Hash + Clone,
    O: Clone,
{
    MapFnUndefined::new(Mapping::total(total), options)
}
