//! Shared attribute parsing for argbind derive macros

use darling::{FromDeriveInput, FromField, FromVariant};

/// Container-level attributes for `#[derive(Arguments)]`
#[derive(Debug, FromDeriveInput)]
#[darling(attributes(arg), supports(struct_named))]
pub struct ArgumentsOpts {
    pub ident: syn::Ident,
    pub generics: syn::Generics,

    /// Description shown under the process name in the usage text
    #[darling(default)]
    pub details: Option<String>,
}

/// Field-level attributes for a bound parameter
///
/// Only fields carrying `#[arg(...)]` become parameters.
#[derive(Debug, Clone, FromField)]
#[darling(attributes(arg))]
pub struct ArgFieldOpts {
    pub ident: Option<syn::Ident>,
    pub ty: syn::Type,

    /// Boolean presence switch.
    /// Use `#[arg(flag)]` on the field (flag-style).
    #[darling(default)]
    pub flag: bool,

    /// List of values.
    /// Use `#[arg(array)]` on the field (flag-style).
    #[darling(default)]
    pub array: bool,

    /// Short key, used as `-key` or `/key`
    #[darling(default)]
    pub short: Option<String>,

    /// Long key, used as `--key`
    #[darling(default)]
    pub long: Option<String>,

    /// Help text
    #[darling(default)]
    pub details: Option<String>,

    /// The parameter may be omitted
    #[darling(default)]
    pub optional: bool,

    /// Literal bound when omitted; implies `optional`
    #[darling(default)]
    pub default: Option<syn::Lit>,
}

/// Variant-level attributes for `#[derive(ArgEnum)]`
#[derive(Debug, Clone, FromVariant)]
#[darling(attributes(arg))]
pub struct ArgVariantOpts {
    pub ident: syn::Ident,

    /// Name matched on the command line instead of the identifier
    #[darling(default)]
    pub name: Option<String>,
}

/// Parse the `#[arg]` fields of a struct, in declaration order
pub fn parse_fields(input: &syn::DeriveInput) -> Result<Vec<ArgFieldOpts>, syn::Error> {
    let fields = match &input.data {
        syn::Data::Struct(data) => match &data.fields {
            syn::Fields::Named(fields) => &fields.named,
            _ => {
                return Err(syn::Error::new_spanned(
                    input,
                    "Arguments can only be derived for structs with named fields",
                ));
            }
        },
        _ => {
            return Err(syn::Error::new_spanned(
                input,
                "Arguments can only be derived for structs",
            ));
        }
    };

    fields
        .iter()
        .filter(|f| f.attrs.iter().any(|a| a.path().is_ident("arg")))
        .map(|f| {
            ArgFieldOpts::from_field(f).map_err(|e| {
                syn::Error::new_spanned(f, format!("Failed to parse field attributes: {}", e))
            })
        })
        .collect()
}

/// Render a `default = ...` literal as the string the parser will coerce
pub fn literal_text(lit: &syn::Lit) -> Result<String, syn::Error> {
    match lit {
        syn::Lit::Str(s) => Ok(s.value()),
        syn::Lit::Int(i) => Ok(i.base10_digits().to_string()),
        syn::Lit::Float(f) => Ok(f.base10_digits().to_string()),
        syn::Lit::Bool(b) => Ok(b.value.to_string()),
        syn::Lit::Char(c) => Ok(c.value().to_string()),
        other => Err(syn::Error::new_spanned(
            other,
            "default must be a string, integer, float, bool or char literal",
        )),
    }
}
