//! Procedural macros for todo-atom

use darling::{FromDeriveInput, FromField};
use proc_macro::TokenStream;
use quote::{format_ident, quote};
use syn::{parse_macro_input, DeriveInput};

/// Container-level attributes for #[derive(Patchable)]
#[derive(Debug, FromDeriveInput)]
#[darling(attributes(patch), supports(struct_named))]
struct PatchableOpts {
    ident: syn::Ident,
    vis: syn::Visibility,
    data: darling::ast::Data<(), PatchableField>,

    /// Name of the generated partial struct (defaults to `{Name}Partial`)
    #[darling(default)]
    name: Option<String>,

    /// Extra derives forwarded to the generated partial struct
    #[darling(default)]
    derive: Option<darling::util::PathList>,
}

/// Field-level attributes
#[derive(Debug, FromField)]
#[darling(attributes(patch))]
struct PatchableField {
    ident: Option<syn::Ident>,
    ty: syn::Type,

    /// Exclude this field from the partial; merges never touch it
    #[darling(default)]
    skip: bool,
}

/// Derive macro for the Patchable trait
///
/// Generates the all-fields-optional partial struct for a named-field state
/// struct, plus the `Patchable` impl whose `merge()` replaces exactly the
/// fields present in the partial (shallow merge).
///
/// The partial struct derives `Debug`, `Clone`, and `Default`, carries one
/// chainable setter per field, and an `is_empty()` query.
///
/// Attributes:
/// - `#[patch(name = "...")]` on the struct renames the partial
/// - `#[patch(derive(...))]` on the struct forwards extra derives to it
/// - `#[patch(skip)]` on a field excludes it from the partial entirely
///
/// # Example
/// ```ignore
/// #[derive(Patchable, Clone, Default)]
/// #[patch(derive(PartialEq))]
/// struct Settings {
///     theme: String,
///     font_size: u32,
///     #[patch(skip)]
///     dirty: bool,
/// }
///
/// let mut settings = Settings::default();
/// settings.merge(SettingsPartial::default().font_size(14));
/// assert_eq!(settings.font_size, 14);
/// ```
#[proc_macro_derive(Patchable, attributes(patch))]
pub fn derive_patchable(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    let opts = match PatchableOpts::from_derive_input(&input) {
        Ok(opts) => opts,
        Err(e) => return e.write_errors().into(),
    };

    let name = &opts.ident;
    let vis = &opts.vis;

    let fields = match &opts.data {
        darling::ast::Data::Struct(fields) => fields,
        _ => {
            return syn::Error::new_spanned(
                &input,
                "Patchable can only be derived for structs with named fields",
            )
            .to_compile_error()
            .into();
        }
    };

    let partial_ident = match &opts.name {
        Some(name) => format_ident!("{}", name),
        None => format_ident!("{}Partial", name),
    };

    let kept: Vec<&PatchableField> = fields.iter().filter(|f| !f.skip).collect();

    let partial_fields = kept.iter().map(|f| {
        let ident = &f.ident;
        let ty = &f.ty;
        quote! { pub #ident: ::core::option::Option<#ty> }
    });

    let merge_arms = kept.iter().map(|f| {
        let ident = &f.ident;
        quote! {
            if let ::core::option::Option::Some(value) = partial.#ident {
                self.#ident = value;
            }
        }
    });

    let setters = kept.iter().map(|f| {
        let ident = f.ident.as_ref().expect("named fields only");
        let ty = &f.ty;
        let doc = format!("Set the `{}` field of this partial.", ident);
        quote! {
            #[doc = #doc]
            pub fn #ident(mut self, value: #ty) -> Self {
                self.#ident = ::core::option::Option::Some(value);
                self
            }
        }
    });

    let is_empty_body = if kept.is_empty() {
        quote! { true }
    } else {
        let checks = kept.iter().map(|f| {
            let ident = &f.ident;
            quote! { self.#ident.is_none() }
        });
        quote! { #(#checks)&&* }
    };

    let extra_derives = match &opts.derive {
        Some(paths) => {
            let paths = paths.iter();
            quote! { #(#paths),* }
        }
        None => quote! {},
    };
    let derives = if opts.derive.is_some() {
        quote! { #[derive(::core::fmt::Debug, ::core::clone::Clone, ::core::default::Default, #extra_derives)] }
    } else {
        quote! { #[derive(::core::fmt::Debug, ::core::clone::Clone, ::core::default::Default)] }
    };

    let partial_doc = format!(
        "Shallow-merge partial form of [`{}`].\n\n\
         Generated by `#[derive(Patchable)]`. A present field replaces the \
         corresponding field of `{}` wholesale when merged.",
        name, name
    );

    let expanded = quote! {
        #[doc = #partial_doc]
        #derives
        #vis struct #partial_ident {
            #(#partial_fields,)*
        }

        impl #partial_ident {
            /// True when no field is present.
            pub fn is_empty(&self) -> bool {
                #is_empty_body
            }

            #(#setters)*
        }

        impl todo_atom::Patchable for #name {
            type Partial = #partial_ident;

            fn merge(&mut self, partial: #partial_ident) {
                #(#merge_arms)*
            }
        }
    };

    TokenStream::from(expanded)
}
