//! Lookup functions built from mappings.

mod argument;
mod direct;
mod reverse;

pub use argument::{
    create_argument_map_fn, create_argument_map_fn_strict,
    create_argument_map_fn_strict_undefined, create_argument_map_fn_undefined, partial_resolver,
    resolver, ArgumentMapFn, ArgumentMapFnUndefined, Resolver,
};
pub use direct::{
    create_map_fn, create_map_fn_strict, create_map_fn_strict_undefined,
    create_map_fn_undefined, MapFn, MapFnUndefined,
};
pub use reverse::{
    create_reverse_map_fn, create_reverse_map_fn_strict, create_reverse_map_fn_strict_undefined,
    create_reverse_map_fn_undefined, create_reverse_scan_fn, create_reverse_scan_fn_undefined,
    ReverseMapFn, ReverseMapFnUndefined, ReverseScanFn, ReverseScanFnUndefined,
};
