//! Build lookup functions from partial key/value mappings.
//!
//! A lookup resolves a key through its mapping and, when the mapping has no
//! value, falls back to a custom transformer, then to a default value, and
//! finally to a [`MappingError`] (or `None` for the `*_undefined` variants).
//!
//! Three families share that policy:
//!
//! - direct lookups ([`create_map_fn`]) map keys to static values;
//! - argument lookups ([`create_argument_map_fn`]) map keys to resolvers of
//!   an extra argument;
//! - reverse lookups ([`create_reverse_map_fn`]) find the key for a value;
//!   [`create_reverse_scan_fn`] does the same for outputs that only
//!   implement `PartialEq`.

mod error;
pub mod lookup;
pub mod mapping;
pub mod resolve;

pub use error::{Error, MappingError};
pub use lookup::*;
pub use mapping::{Exhaustive, MapKey, Mapping};
pub use resolve::{
    ArgumentMapOptions, DefaultValue, MapOptions, ResolutionOptions, ReverseMapOptions,
};
