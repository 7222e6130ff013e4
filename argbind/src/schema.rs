//! Schema extraction: plain-data parameter descriptors for a configuration type
//!
//! A configuration type declares its parameters once, either through
//! `#[derive(Arguments)]` or by implementing [`Arguments`] with a
//! [`SchemaBuilder`] by hand. The parse engine only ever sees the resulting
//! [`ArgumentSchema`], never the declaration mechanism.

use std::any::TypeId;
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::coerce::{ArgCollection, ArgValue, coerce_all};
use crate::errors::{CoercionError, ConfigurationError};

/// How a parameter consumes its value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ParamKind {
    /// Boolean presence switch, optionally `-f:false`
    Flag,
    /// One scalar value, inline or in the next token
    Single,
    /// A list of values, inline (`,`/`;` separated) or in the following tokens
    Array,
}

impl ParamKind {
    /// Lower-case name of the kind
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Flag => "flag",
            Self::Single => "single",
            Self::Array => "array",
        }
    }
}

impl fmt::Display for ParamKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Declared metadata of one parameter
///
/// This is pure data; it says nothing about how the value reaches the field.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ParamSpec {
    /// Parameter kind
    pub kind: ParamKind,
    /// Short key, e.g. `s` for `-s`
    pub short: Option<String>,
    /// Long key, e.g. `str` for `--str`
    pub long: Option<String>,
    /// Help text
    pub details: String,
    /// Whether the parameter may be omitted
    pub optional: bool,
    /// Literal applied when an optional parameter is omitted
    pub default: Option<String>,
    /// Name of the bound field, used in configuration errors
    pub field: String,
}

impl ParamSpec {
    /// Create a spec of the given kind with no keys
    #[must_use]
    pub fn new(kind: ParamKind) -> Self {
        Self {
            kind,
            short: None,
            long: None,
            details: String::new(),
            optional: false,
            default: None,
            field: String::new(),
        }
    }

    /// Create a flag spec
    #[must_use]
    pub fn flag() -> Self {
        Self::new(ParamKind::Flag)
    }

    /// Create a single-value spec
    #[must_use]
    pub fn single() -> Self {
        Self::new(ParamKind::Single)
    }

    /// Create an array spec
    #[must_use]
    pub fn array() -> Self {
        Self::new(ParamKind::Array)
    }

    /// Set the short key
    #[must_use]
    pub fn short(mut self, key: impl Into<String>) -> Self {
        self.short = Some(key.into());
        self
    }

    /// Set the long key
    #[must_use]
    pub fn long(mut self, key: impl Into<String>) -> Self {
        self.long = Some(key.into());
        self
    }

    /// Set the help text
    #[must_use]
    pub fn details(mut self, details: impl Into<String>) -> Self {
        self.details = details.into();
        self
    }

    /// Mark the parameter optional
    #[must_use]
    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    /// Mark the parameter optional with a default literal
    #[must_use]
    pub fn default_value(mut self, literal: impl Into<String>) -> Self {
        self.optional = true;
        self.default = Some(literal.into());
        self
    }

    /// Name the bound field
    #[must_use]
    pub fn field(mut self, name: impl Into<String>) -> Self {
        self.field = name.into();
        self
    }

    /// Display name combining the keys, e.g. `-s or --str`
    #[must_use]
    pub fn name(&self) -> String {
        match (self.short.as_deref(), self.long.as_deref()) {
            (Some(short), Some(long)) => format!("-{short} or --{long}"),
            (Some(short), None) => format!("-{short}"),
            (None, Some(long)) => format!("--{long}"),
            (None, None) => String::new(),
        }
    }

    /// Keys declared by this parameter, short first
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.short.as_deref().into_iter().chain(self.long.as_deref())
    }
}

type ScalarSetter<T> = Box<dyn Fn(&mut T, &str) -> Result<(), CoercionError> + Send + Sync>;
type CollectionSetter<T> = Box<dyn Fn(&mut T, &[String]) -> Result<(), CoercionError> + Send + Sync>;

/// Typed write access to one field of `T`, resolved once per schema
pub enum FieldAccess<T> {
    /// Field holding one value
    Scalar {
        /// Display name of the field type
        type_name: &'static str,
        /// Whether the field type is `bool`
        is_bool: bool,
        /// Convert a literal and store it
        set: ScalarSetter<T>,
    },
    /// Field holding a collection
    Collection {
        /// Display name of the element type
        type_name: &'static str,
        /// Convert every literal and store the collection
        set: CollectionSetter<T>,
    },
}

impl<T: 'static> FieldAccess<T> {
    /// Access a scalar field through a projection
    ///
    /// # Examples
    ///
    /// ```
    /// use argbind::FieldAccess;
    ///
    /// #[derive(Default)]
    /// struct Config { count: i32 }
    ///
    /// let access = FieldAccess::scalar(|c: &mut Config| &mut c.count);
    /// let mut config = Config::default();
    /// access.set_literal(&mut config, "7")?;
    /// assert_eq!(config.count, 7);
    /// # Ok::<(), argbind::CoercionError>(())
    /// ```
    pub fn scalar<F: ArgValue + 'static>(project: fn(&mut T) -> &mut F) -> Self {
        Self::Scalar {
            type_name: F::type_name(),
            is_bool: TypeId::of::<F>() == TypeId::of::<bool>(),
            set: Box::new(move |target: &mut T, literal: &str| {
                *project(target) = F::coerce(literal)?;
                Ok(())
            }),
        }
    }

    /// Access a collection field through a projection
    pub fn collection<C: ArgCollection + 'static>(project: fn(&mut T) -> &mut C) -> Self {
        Self::Collection {
            type_name: C::Element::type_name(),
            set: Box::new(move |target: &mut T, literals: &[String]| {
                *project(target) = coerce_all::<C>(literals)?;
                Ok(())
            }),
        }
    }
}

impl<T> FieldAccess<T> {
    /// Display name of the field (or element) type
    #[must_use]
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Scalar { type_name, .. } | Self::Collection { type_name, .. } => *type_name,
        }
    }

    /// Convert a single literal and store it
    ///
    /// A collection field receives a one-element list.
    ///
    /// # Errors
    ///
    /// Returns the coercion failure; the field is left untouched.
    pub fn set_literal(&self, target: &mut T, literal: &str) -> Result<(), CoercionError> {
        match self {
            Self::Scalar { set, .. } => set(target, literal),
            Self::Collection { set, .. } => set(target, &[literal.to_string()]),
        }
    }

    /// Convert a list of literals and store them
    ///
    /// A scalar field receives the first literal.
    ///
    /// # Errors
    ///
    /// Returns the aggregate coercion failure; the field is left untouched.
    pub fn set_literals(&self, target: &mut T, literals: &[String]) -> Result<(), CoercionError> {
        match self {
            Self::Scalar { set, .. } => set(target, literals.first().map_or("", String::as_str)),
            Self::Collection { set, .. } => set(target, literals),
        }
    }

    fn accepts(&self, kind: ParamKind) -> bool {
        match (kind, self) {
            (ParamKind::Flag, Self::Scalar { is_bool, .. }) => *is_bool,
            (ParamKind::Single, Self::Scalar { .. }) | (ParamKind::Array, Self::Collection { .. }) => true,
            _ => false,
        }
    }
}

impl<T> fmt::Debug for FieldAccess<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Scalar { type_name, .. } => f.debug_tuple("Scalar").field(type_name).finish(),
            Self::Collection { type_name, .. } => {
                f.debug_tuple("Collection").field(type_name).finish()
            }
        }
    }
}

/// One bindable parameter: its metadata plus access to its field
///
/// The synthesized help parameter is the only descriptor without a field.
#[derive(Debug)]
pub struct ParameterDescriptor<T> {
    spec: ParamSpec,
    access: Option<FieldAccess<T>>,
}

impl<T> ParameterDescriptor<T> {
    /// Validate a declaration and pair it with its field
    ///
    /// Blank keys are dropped before validation.
    ///
    /// # Errors
    ///
    /// - [`ConfigurationError::MissingKeys`] when no key is left
    /// - [`ConfigurationError::IncompatibleFieldType`] when the kind cannot bind the field
    pub fn new(mut spec: ParamSpec, access: FieldAccess<T>) -> Result<Self, ConfigurationError> {
        spec.short = spec.short.filter(|k| !k.trim().is_empty());
        spec.long = spec.long.filter(|k| !k.trim().is_empty());
        spec.default = spec.default.filter(|d| !d.trim().is_empty());

        if spec.short.is_none() && spec.long.is_none() {
            return Err(ConfigurationError::MissingKeys { field: spec.field });
        }
        if !access.accepts(spec.kind) {
            return Err(ConfigurationError::IncompatibleFieldType {
                field: spec.field,
                kind: spec.kind,
                type_name: access.type_name().to_string(),
            });
        }

        Ok(Self {
            spec,
            access: Some(access),
        })
    }

    /// The synthesized `-h`/`--help` flag
    #[must_use]
    pub fn help() -> Self {
        Self {
            spec: ParamSpec::flag()
                .short(HELP_SHORT_KEY)
                .long(HELP_LONG_KEY)
                .details("Prints this help text")
                .optional()
                .field("help"),
            access: None,
        }
    }

    /// Declared metadata
    #[must_use]
    pub fn spec(&self) -> &ParamSpec {
        &self.spec
    }

    /// Field access, absent for the help parameter
    #[must_use]
    pub fn access(&self) -> Option<&FieldAccess<T>> {
        self.access.as_ref()
    }

    /// Whether this is the synthesized help parameter
    #[must_use]
    pub fn is_help(&self) -> bool {
        self.access.is_none()
    }
}

/// Reserved short key for the help parameter
pub const HELP_SHORT_KEY: &str = "h";
/// Reserved long key for the help parameter
pub const HELP_LONG_KEY: &str = "help";

/// Validated, ordered parameter list of a configuration type
#[derive(Debug)]
pub struct ArgumentSchema<T> {
    details: Option<String>,
    params: Vec<ParameterDescriptor<T>>,
}

impl<T> ArgumentSchema<T> {
    /// Type-level description
    #[must_use]
    pub fn details(&self) -> Option<&str> {
        self.details.as_deref()
    }

    /// Declared parameters in declaration order, help excluded
    #[must_use]
    pub fn params(&self) -> &[ParameterDescriptor<T>] {
        &self.params
    }

    /// Declared metadata of every parameter, in declaration order
    pub fn specs(&self) -> impl Iterator<Item = &ParamSpec> {
        self.params.iter().map(ParameterDescriptor::spec)
    }

    pub(crate) fn into_parts(self) -> (Option<String>, Vec<ParameterDescriptor<T>>) {
        (self.details, self.params)
    }
}

/// Collects parameter declarations for a configuration type
///
/// Declarations are validated by [`SchemaBuilder::build`]; the first invalid
/// one is reported.
///
/// # Examples
///
/// ```
/// use argbind::{FieldAccess, ParamSpec, SchemaBuilder};
///
/// #[derive(Default)]
/// struct Config { input: String, verbose: bool }
///
/// let schema = SchemaBuilder::new()
///     .details("Copies things")
///     .param(
///         ParamSpec::single().short("i").long("input").field("input"),
///         FieldAccess::scalar(|c: &mut Config| &mut c.input),
///     )
///     .param(
///         ParamSpec::flag().short("v").optional().field("verbose"),
///         FieldAccess::scalar(|c: &mut Config| &mut c.verbose),
///     )
///     .build()?;
///
/// assert_eq!(schema.params().len(), 2);
/// assert_eq!(schema.details(), Some("Copies things"));
/// # Ok::<(), argbind::ConfigurationError>(())
/// ```
pub struct SchemaBuilder<T> {
    details: Option<String>,
    params: Vec<(ParamSpec, FieldAccess<T>)>,
}

impl<T> Default for SchemaBuilder<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> SchemaBuilder<T> {
    /// Create an empty builder
    #[must_use]
    pub fn new() -> Self {
        Self {
            details: None,
            params: Vec::new(),
        }
    }

    /// Set the type-level description
    #[must_use]
    pub fn details(mut self, details: impl Into<String>) -> Self {
        let details: String = details.into();
        self.details = Some(details).filter(|d| !d.is_empty());
        self
    }

    /// Declare a parameter
    #[must_use]
    pub fn param(mut self, spec: ParamSpec, access: FieldAccess<T>) -> Self {
        self.params.push((spec, access));
        self
    }

    /// Validate every declaration
    ///
    /// # Errors
    ///
    /// Returns the first [`ConfigurationError`] found, in declaration order.
    pub fn build(self) -> Result<ArgumentSchema<T>, ConfigurationError> {
        let params = self
            .params
            .into_iter()
            .map(|(spec, access)| ParameterDescriptor::new(spec, access))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(ArgumentSchema {
            details: self.details,
            params,
        })
    }
}

/// A configuration type that can be bound from command-line arguments
///
/// Usually implemented with `#[derive(Arguments)]`.
pub trait Arguments: Default + Sized + 'static {
    /// Declare the parameters of this type
    fn declare() -> SchemaBuilder<Self>;

    /// Declare and validate the parameters of this type
    ///
    /// # Errors
    ///
    /// Returns the first [`ConfigurationError`] in the declaration.
    fn schema() -> Result<ArgumentSchema<Self>, ConfigurationError> {
        Self::declare().build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Default)]
    struct Config {
        name: String,
        count: i32,
        verbose: bool,
        items: Vec<String>,
    }

    #[test]
    fn test_spec_name() {
        assert_eq!(ParamSpec::single().short("s").long("str").name(), "-s or --str");
        assert_eq!(ParamSpec::single().short("a").name(), "-a");
        assert_eq!(ParamSpec::single().long("all").name(), "--all");
    }

    #[test]
    fn test_default_implies_optional() {
        let spec = ParamSpec::single().short("iv").default_value("42");
        assert!(spec.optional);
        assert_eq!(spec.default.as_deref(), Some("42"));
    }

    #[test]
    fn test_blank_keys_rejected() {
        let err = ParameterDescriptor::new(
            ParamSpec::single().short(" ").long("").field("name"),
            FieldAccess::scalar(|c: &mut Config| &mut c.name),
        )
        .unwrap_err();
        assert_eq!(
            err,
            ConfigurationError::MissingKeys {
                field: "name".to_string()
            }
        );
    }

    #[test]
    fn test_blank_key_dropped() {
        let descriptor = ParameterDescriptor::new(
            ParamSpec::single().short("n").long("  ").field("name"),
            FieldAccess::scalar(|c: &mut Config| &mut c.name),
        )
        .unwrap();
        assert_eq!(descriptor.spec().long, None);
        assert_eq!(descriptor.spec().keys().collect::<Vec<_>>(), vec!["n"]);
    }

    #[test]
    fn test_flag_requires_bool() {
        let err = ParameterDescriptor::new(
            ParamSpec::flag().short("c").field("count"),
            FieldAccess::scalar(|c: &mut Config| &mut c.count),
        )
        .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Incompatible type 'i32' specified for flag field 'count'"
        );

        assert!(
            ParameterDescriptor::new(
                ParamSpec::flag().short("v").field("verbose"),
                FieldAccess::scalar(|c: &mut Config| &mut c.verbose),
            )
            .is_ok()
        );
    }

    #[test]
    fn test_array_requires_collection() {
        let err = ParameterDescriptor::new(
            ParamSpec::array().short("n").field("name"),
            FieldAccess::scalar(|c: &mut Config| &mut c.name),
        )
        .unwrap_err();
        assert!(matches!(
            err,
            ConfigurationError::IncompatibleFieldType {
                kind: ParamKind::Array,
                ..
            }
        ));

        let err = ParameterDescriptor::new(
            ParamSpec::single().short("i").field("items"),
            FieldAccess::collection(|c: &mut Config| &mut c.items),
        )
        .unwrap_err();
        assert!(matches!(
            err,
            ConfigurationError::IncompatibleFieldType {
                kind: ParamKind::Single,
                ..
            }
        ));
    }

    #[test]
    fn test_field_access_sets_values() {
        let mut config = Config::default();
        let count = FieldAccess::scalar(|c: &mut Config| &mut c.count);
        count.set_literal(&mut config, "12").unwrap();
        assert_eq!(config.count, 12);
        assert!(count.set_literal(&mut config, "twelve").is_err());
        assert_eq!(config.count, 12);

        let items = FieldAccess::collection(|c: &mut Config| &mut c.items);
        items
            .set_literals(&mut config, &["x".to_string(), "y".to_string()])
            .unwrap();
        assert_eq!(config.items, vec!["x", "y"]);
    }

    #[test]
    fn test_builder_reports_first_error() {
        let err = SchemaBuilder::<Config>::new()
            .param(
                ParamSpec::single().field("name"),
                FieldAccess::scalar(|c: &mut Config| &mut c.name),
            )
            .param(
                ParamSpec::flag().short("c").field("count"),
                FieldAccess::scalar(|c: &mut Config| &mut c.count),
            )
            .build()
            .unwrap_err();
        assert!(matches!(err, ConfigurationError::MissingKeys { .. }));
    }

    #[test]
    fn test_help_descriptor() {
        let help = ParameterDescriptor::<Config>::help();
        assert!(help.is_help());
        assert_eq!(help.spec().kind, ParamKind::Flag);
        assert!(help.spec().optional);
        assert_eq!(help.spec().name(), "-h or --help");
        assert_eq!(help.spec().details, "Prints this help text");
    }
}
