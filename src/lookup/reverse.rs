use std::fmt::Display;
use std::hash::Hash;

use super::direct::{MapFn, MapFnUndefined};
use crate::mapping::{Exhaustive, Mapping};
use crate::resolve::ReverseMapOptions;
use crate::MappingError;

/// Finds the key that a mapping associates with a given value.
///
/// The mapping is inverted once at construction. When several keys share a
/// value, the key that comes first in the mapping wins.
///
/// ## Example
///
/// ```
/// use mapping_fn::{create_reverse_map_fn, MapKey, Mapping, ReverseMapOptions};
///
/// let mapping = Mapping::new()
///     .with(MapKey::from("1"), "active")
///     .with(MapKey::from("2"), "archived");
/// let reverse = create_reverse_map_fn(&mapping, ReverseMapOptions::new());
///
/// assert_eq!(reverse.map(&"archived")?, MapKey::Int(2));
/// # Ok::<(), mapping_fn::MappingError>(())
/// ```
#[derive(Debug, Clone)]
pub struct ReverseMapFn<K, O> {
    inner: MapFn<O, K>,
}

impl<K, O> ReverseMapFn<K, O>
where
    K: Eq + Hash + Clone,
    O: Eq + Hash + Clone + Display,
{
    pub fn new(mapping: &Mapping<K, O>, options: ReverseMapOptions<K, O>) -> Self {
        Self {
            inner: MapFn::new(mapping.invert(), options),
        }
    }

    pub fn map(&self, output: &O) -> Result<K, MappingError> {
        self.inner.map(output)
    }

    pub fn map_with(
        &self,
        output: &O,
        options: &ReverseMapOptions<K, O>,
    ) -> Result<K, MappingError> {
        self.inner.map_with(output, options)
    }
}

/// The `None`-returning twin of [`ReverseMapFn`].
#[derive(Debug, Clone)]
pub struct ReverseMapFnUndefined<K, O> {
    inner: MapFnUndefined<O, K>,
}

impl<K, O> ReverseMapFnUndefined<K, O>
where
    K: Eq + Hash + Clone,
    O: Eq + Hash + Clone,
{
    pub fn new(mapping: &Mapping<K, O>, options: ReverseMapOptions<K, O>) -> Self {
        Self {
            inner: MapFnUndefined::new(mapping.invert(), options),
        }
    }

    pub fn map(&self, output: &O) -> Option<K> {
        self.inner.map(output)
    }

    pub fn map_with(&self, output: &O, options: &ReverseMapOptions<K, O>) -> Option<K> {
        self.inner.map_with(output, options)
    }
}

pub fn create_reverse_map_fn<K, O>(
    mapping: &Mapping<K, O>,
    options: ReverseMapOptions<K, O>,
) -> ReverseMapFn<K, O>
where
    K: Eq + Hash + Clone,
    O: Eq + Hash + Clone + Display,
{
    ReverseMapFn::new(mapping, options)
}

pub fn create_reverse_map_fn_strict<K, O>(
    total: impl FnMut(&K) -> O,
    options: ReverseMapOptions<K, O>,
) -> ReverseMapFn<K, O>
where
    K: Exhaustive + Eq + Hash + Clone,
    O: Eq + Hash + Clone + Display,
{
    ReverseMapFn::new(&Mapping::total(total), options)
}

pub fn create_reverse_map_fn_undefined<K, O>(
    mapping: &Mapping<K, O>,
    options: ReverseMapOptions<K, O>,
) -> ReverseMapFnUndefined<K, O>
where
    K: Eq + Hash + Clone,
    O: Eq + Hash + Clone,
{
    ReverseMapFnUndefined::new(mapping, options)
}

pub fn create_reverse_map_fn_strict_undefined<K, O>(
    total: impl FnMut(&K) -> O,
    options: ReverseMapOptions<K, O>,
) -> ReverseMapFnUndefined<K, O>
where
    K: Exhaustive + Eq + Hash + Clone,
    O: Eq + Hash + Clone,
{
    ReverseMapFnUndefined::new(&Mapping::total(total), options)
}

/// Finds the key for a value by scanning the mapping on every call.
///
/// Unlike [`ReverseMapFn`], outputs only need `PartialEq`, so values such as
/// `f64` work. Each call is linear in the size of the mapping; the first key
/// whose value is equal wins.
///
/// ## Example
///
/// ```
/// use mapping_fn::{create_reverse_scan_fn, Mapping, ReverseMapOptions};
///
/// let rates = Mapping::new().with("reduced", 0.07).with("standard", 0.19);
/// let rate_name = create_reverse_scan_fn(rates, ReverseMapOptions::new());
///
/// assert_eq!(rate_name.map(&0.19)?, "standard");
/// # Ok::<(), mapping_fn::MappingError>(())
/// ```
#[derive(Debug, Clone)]
pub struct ReverseScanFn<K, O> {
    mapping: Mapping<K, O>,
    options: ReverseMapOptions<K, O>,
}

impl<K, O> ReverseScanFn<K, O>
where
    K: Clone,
    O: PartialEq + Display,
{
    pub fn new(mapping: Mapping<K, O>, options: ReverseMapOptions<K, O>) -> Self {
        Self { mapping, options }
    }

    pub fn map(&self, output: &O) -> Result<K, MappingError> {
        self.resolve(output, None)
    }

    pub fn map_with(
        &self,
        output: &O,
        options: &ReverseMapOptions<K, O>,
    ) -> Result<K, MappingError> {
        self.resolve(output, Some(options))
    }

    fn resolve(
        &self,
        output: &O,
        call: Option<&ReverseMapOptions<K, O>>,
    ) -> Result<K, MappingError> {
        let merged = self.options.merge(call);
        let key = scan(&self.mapping, output);

        merged
            .resolve(key, |t| t(output), |d| d(output))
            .ok_or_else(|| {
                tracing::debug!(output = %output, "no key resolved");
                merged.error(
                    |m| m(output),
                    || format!(r#"Unable to map "{output}", default value is not provided"#),
                )
            })
    }
}

/// The `None`-returning twin of [`ReverseScanFn`].
#[derive(Debug, Clone)]
pub struct ReverseScanFnUndefined<K, O> {
    mapping: Mapping<K, O>,
    options: ReverseMapOptions<K, O>,
}

impl<K, O> ReverseScanFnUndefined<K, O>
where
    K: Clone,
    O: PartialEq,
{
    pub fn new(mapping: Mapping<K, O>, options: ReverseMapOptions<K, O>) -> Self {
        Self { mapping, options }
    }

    pub fn map(&self, output: &O) -> Option<K> {
        self.resolve(output, None)
    }

    pub fn map_with(&self, output: &O, options: &ReverseMapOptions<K, O>) -> Option<K> {
        self.resolve(output, Some(options))
    }

    fn resolve(&self, output: &O, call: Option<&ReverseMapOptions<K, O>>) -> Option<K> {
        let key = scan(&self.mapping, output);
        self.options
            .merge(call)
            .resolve(key, |t| t(output), |d| d(output))
    }
}

fn scan<K: Clone, O: PartialEq>(mapping: &Mapping<K, O>, output: &O) -> Option<K> {
    mapping
        .iter()
        .find(|(_, value)| *value == output)
        .map(|(key, _)| key.clone())
}

pub fn create_reverse_scan_fn<K, O>(
    mapping: Mapping<K, O>,
    options: ReverseMapOptions<K, O>,
) -> ReverseScanFn<K, O>
where
    K: Clone,
    O: PartialEq + Display,
{
    ReverseScanFn::new(mapping, options)
}

pub fn create_reverse_scan_fn_undefined<K, O>(
    mapping: Mapping<K, O>,
    options: ReverseMapOptions<K, O>,
) -> ReverseScanFnUndefined<K, O>
where
    K: Clone,
    O: PartialEq,
{
    ReverseScanFnUndefined::new(mapping, options)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lookup::direct::create_map_fn;
    use crate::mapping::MapKey;
    use crate::resolve::MapOptions;

    type Options = ReverseMapOptions<&'static str, &'static str>;

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    enum Letter {
        Foo,
        Bar,
        Baz,
        Foobar,
        Barbaz,
    }

    impl Exhaustive for Letter {
        const ALL: &'static [Self] = &[
            Letter::Foo,
            Letter::Bar,
            Letter::Baz,
            Letter::Foobar,
            Letter::Barbaz,
        ];
    }

    fn mapping() -> Mapping<&'static str, &'static str> {
        Mapping::new()
            .with("foo", "FOO")
            .with("bar", "BAR")
            .with("baz", "BAZ")
    }

    fn letter_to_upper(letter: &Letter) -> &'static str {
        match letter {
            Letter::Foo | Letter::Foobar => "FOO",
            Letter::Bar | Letter::Barbaz => "BAR",
            Letter::Baz => "BAZ",
        }
    }

    fn transform() -> Options {
        Options::new().custom_transformer(|output| {
            Some(if *output == "CUSTOM" { "foobar" } else { "foo" })
        })
    }

    #[test]
    fn test_existing_values() {
        let fns = [
            create_reverse_map_fn(&mapping(), Options::new()),
            create_reverse_map_fn(&mapping(), Options::new().default_value("foo")),
            create_reverse_map_fn(&mapping(), transform()),
        ];

        for reverse in &fns {
            assert_eq!(reverse.map(&"FOO"), Ok("foo"));
            assert_eq!(reverse.map(&"BAR"), Ok("bar"));
            assert_eq!(reverse.map(&"BAZ"), Ok("baz"));
        }
    }

    #[test]
    fn test_default_value() {
        let reverse = create_reverse_map_fn(&mapping(), Options::new());
        let reverse_default =
            create_reverse_map_fn(&mapping(), Options::new().default_value("foo"));

        let call = Options::new().default_value("foo");
        assert_eq!(reverse.map_with(&"CUSTOM", &call), Ok("foo"));
        assert_eq!(reverse_default.map(&"CUSTOM"), Ok("foo"));

        let call = Options::new().default_value("bar");
        assert_eq!(reverse_default.map_with(&"CUSTOM", &call), Ok("bar"));
    }

    #[test]
    fn test_error_on_missing_value() {
        let reverse = create_reverse_map_fn(&mapping(), Options::new());
        assert_eq!(
            reverse.map(&"CUSTOM"),
            Err(MappingError::new(
                r#"Unable to map "CUSTOM", default value is not provided"#
            ))
        );

        let call = Options::new()
            .error_message(|output| format!(r#"Output is not found for "{output}""#));
        assert_eq!(
            reverse.map_with(&"CUSTOM", &call).unwrap_err().to_string(),
            r#"Output is not found for "CUSTOM""#
        );
    }

    #[test]
    fn test_custom_transformation() {
        let reverse = create_reverse_map_fn(&mapping(), Options::new());
        let reverse_custom = create_reverse_map_fn(&mapping(), transform());

        assert_eq!(reverse.map_with(&"BAR", &transform()), Ok("bar"));
        assert_eq!(reverse.map_with(&"CUSTOM", &transform()), Ok("foobar"));
        assert_eq!(reverse.map_with(&"ANOTHER_CUSTOM", &transform()), Ok("foo"));
        assert_eq!(reverse_custom.map(&"CUSTOM"), Ok("foobar"));
    }

    #[test]
    fn test_first_key_wins_on_duplicate_values() {
        let reverse = create_reverse_map_fn_strict(letter_to_upper, ReverseMapOptions::new());

        for _ in 0..3 {
            assert_eq!(reverse.map(&"FOO"), Ok(Letter::Foo));
            assert_eq!(reverse.map(&"BAR"), Ok(Letter::Bar));
            assert_eq!(reverse.map(&"BAZ"), Ok(Letter::Baz));
        }

        let reverse_undefined =
            create_reverse_map_fn_strict_undefined(letter_to_upper, ReverseMapOptions::new());
        assert_eq!(reverse_undefined.map(&"FOO"), Some(Letter::Foo));
        assert_eq!(reverse_undefined.map(&"QUX"), None);
    }

    #[test]
    fn test_undefined_variant() {
        let reverse = create_reverse_map_fn_undefined(&mapping(), Options::new());
        let reverse_default =
            create_reverse_map_fn_undefined(&mapping(), Options::new().default_value("foo"));

        assert_eq!(reverse.map(&"FOO"), Some("foo"));
        assert_eq!(reverse.map(&"DEFAULT"), None);
        assert_eq!(reverse.map(&"CUSTOM"), None);
        assert_eq!(reverse_default.map(&"CUSTOM"), Some("foo"));
        assert_eq!(reverse.map_with(&"CUSTOM", &transform()), Some("foobar"));
    }

    #[test]
    fn test_round_trip() {
        let forward = create_map_fn(mapping(), MapOptions::new());
        let reverse = create_reverse_map_fn(&mapping(), Options::new());

        for key in mapping().keys() {
            let value = forward.map(key).unwrap();
            assert_eq!(reverse.map(&value).as_ref(), Ok(key));
        }
    }

    #[test]
    fn test_numeric_keys_are_recovered() {
        let mapping = Mapping::new()
            .with(MapKey::from("1"), "one")
            .with(MapKey::from("2"), "two")
            .with(MapKey::from("three"), "three");
        let reverse = create_reverse_map_fn(&mapping, ReverseMapOptions::new());

        assert_eq!(reverse.map(&"one"), Ok(MapKey::Int(1)));
        assert_eq!(reverse.map(&"two"), Ok(MapKey::Int(2)));
        assert_eq!(reverse.map(&"three"), Ok(MapKey::Str("three".into())));
    }

    #[test]
    fn test_padded_numeric_key_keeps_its_own_entry() {
        let mapping = Mapping::new()
            .with(MapKey::from("1"), "a")
            .with(MapKey::from("01"), "b");
        let reverse = create_reverse_map_fn(&mapping, ReverseMapOptions::new());

        assert_eq!(reverse.map(&"a"), Ok(MapKey::Int(1)));
        assert_eq!(reverse.map(&"b"), Ok(MapKey::Str("01".into())));
    }

    #[test]
    fn test_toml_declared_mapping() {
        let mapping: Mapping<MapKey, String> = Mapping::from_toml_str(
            r#"
            10 = "pending"
            20 = "shipped"
            30 = "pending"
            "#,
        )
        .unwrap();
        let reverse = create_reverse_map_fn(&mapping, ReverseMapOptions::new());

        assert_eq!(reverse.map(&"shipped".to_string()), Ok(MapKey::Int(20)));
        assert_eq!(reverse.map(&"pending".to_string()), Ok(MapKey::Int(10)));
    }

    #[test]
    fn test_scan_supports_partial_eq_outputs() {
        let rates = Mapping::new()
            .with("zero", 0.0)
            .with("reduced", 0.07)
            .with("standard", 0.19)
            .with("legacy", 0.07);
        let rate_name = create_reverse_scan_fn(rates.clone(), ReverseMapOptions::new());

        assert_eq!(rate_name.map(&0.19), Ok("standard"));
        assert_eq!(rate_name.map(&0.07), Ok("reduced"));
        assert_eq!(
            rate_name.map(&0.5),
            Err(MappingError::new(
                r#"Unable to map "0.5", default value is not provided"#
            ))
        );

        let call = ReverseMapOptions::new().default_value("custom");
        assert_eq!(rate_name.map_with(&0.5, &call), Ok("custom"));

        let rate_name = create_reverse_scan_fn_undefined(rates, ReverseMapOptions::new());
        assert_eq!(rate_name.map(&0.0), Some("zero"));
        assert_eq!(rate_name.map(&0.5), None);
    }

    #[test]
    fn test_scan_matches_inverted_lookup() {
        let scan = create_reverse_scan_fn(mapping(), Options::new());
        let inverted = create_reverse_map_fn(&mapping(), Options::new());

        for output in ["FOO", "BAR", "BAZ", "QUX"] {
            assert_eq!(scan.map(&output), inverted.map(&output));
        }
        assert_eq!(scan.map_with(&"CUSTOM", &transform()), Ok("foobar"));
    }
}
