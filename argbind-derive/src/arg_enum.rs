//! ArgEnum derive macro implementation

use darling::FromVariant;
use proc_macro2::TokenStream;
use quote::quote;
use syn::DeriveInput;

use crate::attrs::ArgVariantOpts;

/// Implement the ArgEnum derive macro
///
/// Generates `ArgEnum` with the member names in declaration order, and an
/// `ArgValue` implementation that selects a member by case-insensitive name.
pub fn derive_arg_enum_impl(input: DeriveInput) -> Result<TokenStream, syn::Error> {
    let syn::Data::Enum(data) = &input.data else {
        return Err(syn::Error::new_spanned(
            &input,
            "ArgEnum can only be derived for enums",
        ));
    };

    let name = &input.ident;
    let type_name = name.to_string();
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let variants = data
        .variants
        .iter()
        .map(|v| {
            if !matches!(v.fields, syn::Fields::Unit) {
                return Err(syn::Error::new_spanned(
                    v,
                    "ArgEnum variants cannot carry fields",
                ));
            }
            ArgVariantOpts::from_variant(v).map_err(|e| {
                syn::Error::new_spanned(v, format!("Failed to parse variant attributes: {}", e))
            })
        })
        .collect::<Result<Vec<_>, syn::Error>>()?;

    let names: Vec<String> = variants
        .iter()
        .map(|v| v.name.clone().unwrap_or_else(|| v.ident.to_string()))
        .collect();
    let arms = variants.iter().enumerate().map(|(index, v)| {
        let ident = &v.ident;
        quote! { #index => ::core::option::Option::Some(Self::#ident), }
    });

    let expanded = quote! {
        impl #impl_generics ::argbind::ArgEnum for #name #ty_generics #where_clause {
            const VARIANTS: &'static [&'static str] = &[#(#names),*];

            fn from_variant_index(index: usize) -> ::core::option::Option<Self> {
                match index {
                    #(#arms)*
                    _ => ::core::option::Option::None,
                }
            }
        }

        impl #impl_generics ::argbind::ArgValue for #name #ty_generics #where_clause {
            fn type_name() -> &'static str {
                #type_name
            }

            fn coerce(literal: &str) -> ::core::result::Result<Self, ::argbind::CoercionError> {
                ::argbind::coerce_enum(literal)
            }
        }
    };

    Ok(expanded)
}
