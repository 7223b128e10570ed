use std::fmt::Display;
use std::hash::Hash;
use std::sync::Arc;

use crate::mapping::{Exhaustive, Mapping};
use crate::resolve::ArgumentMapOptions;
use crate::MappingError;

/// A mapped value that is computed from an extra argument.
///
/// Returning `None` leaves the lookup to its fallbacks.
pub type Resolver<A, O> = Arc<dyn Fn(&A) -> Option<O> + Send + Sync>;

/// Wraps a closure that always produces a value.
pub fn resolver<A, O>(f: impl Fn(&A) -> O + Send + Sync + 'static) -> Resolver<A, O>
where
    A: 'static,
    O: 'static,
{
    Arc::new(move |argument: &A| Some(f(argument)))
}

/// Wraps a closure that may decline to produce a value.
pub fn partial_resolver<A, O>(
    f: impl Fn(&A) -> Option<O> + Send + Sync + 'static,
) -> Resolver<A, O> {
    Arc::new(f)
}

impl<K, A, O> Mapping<K, Resolver<A, O>>
where
    K: Eq + Hash + Clone,
    A: 'static,
    O: 'static,
{
    /// Builder-style insert of a resolver that always produces a value.
    pub fn with_resolver(self, key: K, f: impl Fn(&A) -> O + Send + Sync + 'static) -> Self {
        self.with(key, resolver(f))
    }

    /// Builder-style insert of a resolver that may decline to produce a value.
    pub fn with_partial_resolver(
        self,
        key: K,
        f: impl Fn(&A) -> Option<O> + Send + Sync + 'static,
    ) -> Self {
        self.with(key, partial_resolver(f))
    }
}

/// A lookup function whose mapped values are resolvers of an extra argument.
///
/// The resolver's output goes through the same fallbacks as a direct lookup;
/// the transformer, computed default and error message also receive the
/// argument.
///
/// ## Example
///
/// ```
/// use mapping_fn::{create_argument_map_fn, ArgumentMapOptions, Mapping};
///
/// let map_fn = create_argument_map_fn(
///     Mapping::new().with_resolver("foo", |id: &u32| if *id <= 3 { "FOO" } else { "BAR" }),
///     ArgumentMapOptions::new(),
/// );
///
/// assert_eq!(map_fn.map(&"foo", &3)?, "FOO");
/// assert_eq!(map_fn.map(&"foo", &5)?, "BAR");
/// # Ok::<(), mapping_fn::MappingError>(())
/// ```
#[derive(Clone)]
pub struct ArgumentMapFn<K, A, O> {
    mapping: Mapping<K, Resolver<A, O>>,
    options: ArgumentMapOptions<K, A, O>,
}

impl<K, A, O> ArgumentMapFn<K, A, O>
where
    K: Eq + Hash + Clone + Display,
    A: Display,
    O: Clone,
{
    pub fn new(mapping: Mapping<K, Resolver<A, O>>, options: ArgumentMapOptions<K, A, O>) -> Self {
        Self { mapping, options }
    }

    pub fn map(&self, input: &K, argument: &A) -> Result<O, MappingError> {
        self.resolve(input, argument, None)
    }

    pub fn map_with(
        &self,
        input: &K,
        argument: &A,
        options: &ArgumentMapOptions<K, A, O>,
    ) -> Result<O, MappingError> {
        self.resolve(input, argument, Some(options))
    }

    fn resolve(
        &self,
        input: &K,
        argument: &A,
        call: Option<&ArgumentMapOptions<K, A, O>>,
    ) -> Result<O, MappingError> {
        let merged = self.options.merge(call);
        let output = resolve_candidate(&self.mapping, input, argument);

        merged
            .resolve(output, |t| t(input, argument), |d| d(input, argument))
            .ok_or_else(|| {
                tracing::debug!(input = %input, argument = %argument, "no value resolved");
                merged.error(
                    |m| m(input, argument),
                    || {
                        format!(
                            "Unable to map \"{input}\" with argument \"{argument}\", \
                             default value is not provided"
                        )
                    },
                )
            })
    }
}

/// The `None`-returning twin of [`ArgumentMapFn`].
#[derive(Clone)]
pub struct ArgumentMapFnUndefined<K, A, O> {
    mapping: Mapping<K, Resolver<A, O>>,
    options: ArgumentMapOptions<K, A, O>,
}

impl<K, A, O> ArgumentMapFnUndefined<K, A, O>
where
    K: Eq + Hash + Clone,
    O: Clone,
{
    pub fn new(mapping: Mapping<K, Resolver<A, O>>, options: ArgumentMapOptions<K, A, O>) -> Self {
        Self { mapping, options }
    }

    pub fn map(&self, input: &K, argument: &A) -> Option<O> {
        self.resolve(input, argument, None)
    }

    pub fn map_with(
        &self,
        input: &K,
        argument: &A,
        options: &ArgumentMapOptions<K, A, O>,
    ) -> Option<O> {
        self.resolve(input, argument, Some(options))
    }

    fn resolve(
        &self,
        input: &K,
        argument: &A,
        call: Option<&ArgumentMapOptions<K, A, O>>,
    ) -> Option<O> {
        let output = resolve_candidate(&self.mapping, input, argument);
        self.options
            .merge(call)
            .resolve(output, |t| t(input, argument), |d| d(input, argument))
    }
}

fn resolve_candidate<K, A, O>(
    mapping: &Mapping<K, Resolver<A, O>>,
    input: &K,
    argument: &A,
) -> Option<O>
where
    K: Eq + Hash + Clone,
{
    mapping.get(input).and_then(|f| f(argument))
}

pub fn create_argument_map_fn<K, A, O>(
    mapping: Mapping<K, Resolver<A, O>>,
    options: ArgumentMapOptions<K, A, O>,
) -> ArgumentMapFn<K, A, O>
where
    K: Eq + Hash + Clone + Display,
    A: Display,
    O: Clone,
{
    ArgumentMapFn::new(mapping, options)
}

/// Builds the mapping from a total function that yields a resolver per key.
pub fn create_argument_map_fn_strict<K, A, O>(
    total: impl FnMut(&K) -> Resolver<A, O>,
    options: ArgumentMapOptions<K, A, O>,
) -> ArgumentMapFn<K, A, O>
where
    K: Exhaustive + Eq + Hash + Clone + Display,
    A: Display,
    O: Clone,
{
    ArgumentMapFn::new(Mapping::total(total), options)
}

pub fn create_argument_map_fn_undefined<K, A, O>(
    mapping: Mapping<K, Resolver<A, O>>,
    options: ArgumentMapOptions<K, A, O>,
) -> ArgumentMapFnUndefined<K, A, O>
where
    K: Eq + Hash + Clone,
    O: Clone,
{
    ArgumentMapFnUndefined::new(mapping, options)
}

pub fn create_argument_map_fn_strict_undefined<K, A, O>(
    total: impl FnMut(&K) -> Resolver<A, O>,
    options: ArgumentMapOptions<K, A, O>,
) -> ArgumentMapFnUndefined<K, A, O>
where
    K: Exhaustive + Eq + Hash + Clone,
    O: Clone,
{
    ArgumentMapFnUndefined::new(Mapping::total(total), options)
}
