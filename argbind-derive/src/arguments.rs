//! Arguments derive macro implementation

use darling::FromDeriveInput;
use proc_macro2::TokenStream;
use quote::quote;
use syn::DeriveInput;

use crate::attrs::{ArgFieldOpts, ArgumentsOpts, literal_text, parse_fields};

/// Implement the Arguments derive macro
pub fn derive_arguments_impl(input: DeriveInput) -> Result<TokenStream, syn::Error> {
    let opts = ArgumentsOpts::from_derive_input(&input)
        .map_err(|e| syn::Error::new_spanned(&input, e.to_string()))?;

    let name = &opts.ident;
    let (impl_generics, ty_generics, where_clause) = opts.generics.split_for_impl();

    let details = opts.details.as_ref().map(|details| {
        quote! { .details(#details) }
    });

    let params = parse_fields(&input)?
        .iter()
        .map(param_tokens)
        .collect::<Result<Vec<_>, _>>()?;

    let expanded = quote! {
        impl #impl_generics ::argbind::Arguments for #name #ty_generics #where_clause {
            fn declare() -> ::argbind::SchemaBuilder<Self> {
                ::argbind::SchemaBuilder::new()
                    #details
                    #(#params)*
            }
        }
    };

    Ok(expanded)
}

/// `.param(spec, access)` call for one field
fn param_tokens(field: &ArgFieldOpts) -> Result<TokenStream, syn::Error> {
    let Some(ident) = field.ident.as_ref() else {
        return Err(syn::Error::new_spanned(&field.ty, "expected a named field"));
    };
    // Strip r# prefix for raw identifiers (e.g., r#type -> type)
    let field_name_raw = ident.to_string();
    let field_name = field_name_raw.strip_prefix("r#").unwrap_or(&field_name_raw);

    if field.flag && field.array {
        return Err(syn::Error::new_spanned(
            ident,
            "a parameter cannot be both `flag` and `array`",
        ));
    }

    let kind = if field.flag {
        quote! { ::argbind::ParamKind::Flag }
    } else if field.array {
        quote! { ::argbind::ParamKind::Array }
    } else {
        quote! { ::argbind::ParamKind::Single }
    };

    let short = field.short.as_ref().map(|k| quote! { .short(#k) });
    let long = field.long.as_ref().map(|k| quote! { .long(#k) });
    let details = field.details.as_ref().map(|d| quote! { .details(#d) });
    let optional = field.optional.then(|| quote! { .optional() });
    let default = match &field.default {
        Some(lit) => {
            let text = literal_text(lit)?;
            Some(quote! { .default_value(#text) })
        }
        None => None,
    };

    let access = if field.array {
        quote! { ::argbind::FieldAccess::collection(|target: &mut Self| &mut target.#ident) }
    } else {
        quote! { ::argbind::FieldAccess::scalar(|target: &mut Self| &mut target.#ident) }
    };

    Ok(quote! {
        .param(
            ::argbind::ParamSpec::new(#kind)
                #short
                #long
                #details
                #optional
                #default
                .field(#field_name),
            #access,
        )
    })
}
