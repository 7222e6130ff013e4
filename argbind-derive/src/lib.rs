//! Derive macros for argbind
//!
//! This crate provides derive macros for argument schemas:
//!
//! - `Arguments`: Declares the command-line parameters of a configuration struct
//! - `ArgEnum`: Lets a fieldless enum be selected by member name
//!
//! # Container Attributes
//!
//! - `#[arg(details = "...")]` - Description shown in the usage text
//!
//! # Field Attributes
//!
//! Only fields carrying `#[arg(...)]` become parameters; the rest keep their
//! `Default` value.
//!
//! - `#[arg(flag)]` - Boolean presence switch (field must be `bool`)
//! - `#[arg(array)]` - List of values (field must be a collection)
//! - `#[arg(short = "s")]` - Short key, used as `-s` or `/s`
//! - `#[arg(long = "str")]` - Long key, used as `--str`
//! - `#[arg(details = "...")]` - Help text
//! - `#[arg(optional)]` - The parameter may be omitted
//! - `#[arg(default = 42)]` - Value bound when omitted; implies `optional`
//!
//! # Example
//!
//! ```ignore
//! use argbind::{ArgEnum, Arguments};
//!
//! #[derive(Debug, Default, Clone, Copy, ArgEnum)]
//! enum Level {
//!     #[default]
//!     Low,
//!     High,
//! }
//!
//! #[derive(Debug, Default, Arguments)]
//! #[arg(details = "Copies files")]
//! struct Options {
//!     #[arg(short = "s", long = "source", details = "Source directory")]
//!     source: String,
//!
//!     #[arg(array, short = "x", optional, details = "Extensions to skip")]
//!     skip: Vec<String>,
//!
//!     #[arg(flag, short = "f", long = "force", optional)]
//!     force: bool,
//!
//!     #[arg(short = "l", default = "high")]
//!     level: Level,
//! }
//! ```

mod arg_enum;
mod arguments;
mod attrs;

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

/// Derive macro for the Arguments trait
///
/// This macro implements `argbind::Arguments` for a struct with named fields,
/// declaring one parameter per field annotated with `#[arg(...)]`, in field
/// order. Declarations are validated when the schema is built, not at
/// compile time.
///
/// # Example
///
/// ```ignore
/// use argbind::Arguments;
///
/// #[derive(Default, Arguments)]
/// struct Options {
///     #[arg(short = "n", long = "name", details = "Who to greet")]
///     name: String,
///     #[arg(short = "c", default = 1)]
///     count: u32,
/// }
/// ```
#[proc_macro_derive(Arguments, attributes(arg))]
pub fn derive_arguments(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    match arguments::derive_arguments_impl(input) {
        Ok(tokens) => tokens.into(),
        Err(e) => e.to_compile_error().into(),
    }
}

/// Derive macro for the ArgEnum trait
///
/// Generates `argbind::ArgEnum` and `argbind::ArgValue` for a fieldless enum.
/// Members are matched by name, ignoring case; `#[arg(name = "...")]` on a
/// variant overrides the name.
///
/// # Example
///
/// ```ignore
/// use argbind::ArgEnum;
///
/// #[derive(ArgEnum)]
/// enum Format {
///     Json,
///     #[arg(name = "yml")]
///     Yaml,
/// }
/// ```
#[proc_macro_derive(ArgEnum, attributes(arg))]
pub fn derive_arg_enum(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    match arg_enum::derive_arg_enum_impl(input) {
        Ok(tokens) => tokens.into(),
        Err(e) => e.to_compile_error().into(),
    }
}
