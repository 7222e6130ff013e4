#![deny(
    unsafe_code,
    unused_must_use,
    unreachable_pub,
    rust_2018_idioms,
    missing_docs,
    clippy::pedantic
)]

//! Declarative Command-Line Argument Binding
//!
//! This crate binds command-line tokens to the fields of a plain configuration
//! struct. Each bound field is declared once, as a flag, a single value or an
//! array, with a short and/or long key, help text, optionality and a default.
//! From that declaration the crate derives both the parser and the usage text.
//!
//! # Features
//!
//! - **Three prefixes**: `-s`, `--str` and `/s` are interchangeable
//! - **Inline or separate values**: `-s:value`, `-s=value` and `-s value`
//! - **Arrays**: `-a:x,y;z` or `-a x y z`, up to the next parameter
//! - **Typed fields**: integers, floats, `bool`, `char`, `String`, `PathBuf`,
//!   `Option<T>` and case-insensitive enumerations
//! - **Defaults and required parameters**, checked after every token is read
//! - **Help**: `/?`, `-h` and `--help` stop parsing and report a help request
//! - **Usage text** laid out in aligned columns
//!
//! # Examples
//!
//! ## Derive
//!
//! ```
//! use argbind::{ArgEnum, Arguments, ParseOutcome, try_parse};
//!
//! #[derive(Debug, Clone, Copy, Default, PartialEq, ArgEnum)]
//! enum Mode {
//!     #[default]
//!     Copy,
//!     Move,
//! }
//!
//! #[derive(Debug, Default, Arguments)]
//! #[arg(details = "Copies files into a directory")]
//! struct Options {
//!     #[arg(short = "d", long = "dest", details = "Target directory")]
//!     dest: String,
//!
//!     #[arg(array, short = "f", long = "files", details = "Files to copy")]
//!     files: Vec<String>,
//!
//!     #[arg(short = "m", default = "move", details = "Copy or move")]
//!     mode: Mode,
//!
//!     #[arg(flag, short = "v", optional, details = "Log every file")]
//!     verbose: bool,
//! }
//!
//! let outcome = try_parse::<Options, _>(&["/d:out", "-f", "a.txt", "b.txt", "-v"])?;
//! let ParseOutcome::Parsed(options) = outcome else { unreachable!() };
//!
//! assert_eq!(options.dest, "out");
//! assert_eq!(options.files, vec!["a.txt", "b.txt"]);
//! assert_eq!(options.mode, Mode::Move);
//! assert!(options.verbose);
//! # Ok::<(), argbind::ArgsError>(())
//! ```
//!
//! ## Parser with a Logger
//!
//! ```
//! use argbind::{ArgumentParser, Arguments};
//! use argbind::logging::MemoryLogger;
//!
//! #[derive(Debug, Default, Arguments)]
//! struct Options {
//!     #[arg(short = "s", long = "str", details = "String value")]
//!     string: String,
//! }
//!
//! let logger = MemoryLogger::new();
//! let mut parser = ArgumentParser::<Options>::new()?
//!     .with_logger(&logger)
//!     .with_process_name("tool");
//!
//! assert!(parser.parse(&["-x"]).is_none());
//! assert_eq!(logger.errors(), vec!["Error: Unrecognized parameter '-x'."]);
//!
//! assert!(parser.parse(&["--help"]).is_none());
//! assert!(parser.help_requested());
//! assert!(parser.usage().contains("--str"));
//! # Ok::<(), argbind::ConfigurationError>(())
//! ```

mod coerce;
mod errors;
pub mod logging;
mod parser;
mod schema;
mod table;
mod token;
mod usage;

pub use coerce::{ArgCollection, ArgEnum, ArgValue, coerce_all, coerce_enum, split_list};
pub use errors::{ArgsError, ArgsResult, CoercionError, ConfigurationError, UserInputError};
pub use parser::{ArgumentParser, ParseOutcome, parse_logged, parse_with_table, try_parse, usage};
pub use schema::{
    ArgumentSchema, Arguments, FieldAccess, HELP_LONG_KEY, HELP_SHORT_KEY, ParamKind, ParamSpec,
    ParameterDescriptor, SchemaBuilder,
};
pub use table::{HELP_INDEX, SchemaTable};
pub use token::{HELP_TOKEN, ParamToken, is_param, parse_param};
pub use usage::{process_name, render_usage, usage_line};

#[cfg(feature = "derive")]
pub use argbind_derive::{ArgEnum, Arguments};
