//! Procedural macros for Verdict
//!
//! - `#[derive(Schema)]` - static name table and structural rule walk
//! - `#[derive(FromQuery)]` - per-field query parameter conversion
//! - `#[derive(FromBody)]` - in-place assignment from a JSON object body
//!
//! Generated code refers to items through the `verdict` facade crate.

mod attr;

use attr::{ContainerAttrs, RenameAll, SerdeField, Step};
use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::{format_ident, quote};
use syn::{parse_macro_input, Data, DeriveInput, Field, Fields, Type};

/// Derive `verdict::Schema`.
///
/// Field names follow serde: `#[serde(rename = "...")]`, container
/// `rename_all` and `#[serde(skip)]` are honoured, so reported paths use the
/// names clients send. Rules are listed in `#[validate(...)]` and run in
/// declared order.
///
/// # Example
///
/// ```rust,ignore
/// #[derive(Deserialize, Schema)]
/// struct Signup {
///     #[serde(rename = "first_name")]
///     #[validate(required, length(max = 50))]
///     name: String,
///
///     #[validate(required, dive)]
///     addresses: Vec<Address>,
/// }
/// ```
#[proc_macro_derive(Schema, attributes(validate))]
pub fn derive_schema(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    expand_schema(input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}

/// Derive `verdict::FromQuery`.
///
/// Each field not skipped for deserialization is looked up under its serde
/// name and converted through `verdict::FromParam`; absent parameters leave
/// the field untouched.
#[proc_macro_derive(FromQuery)]
pub fn derive_from_query(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    expand_from_query(input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}

/// Derive `verdict::FromBody`.
///
/// Each field not skipped for deserialization is taken from the body under
/// its serde name and decoded with its own `Deserialize` impl. Every member
/// is decoded before any field is assigned, so a failure leaves the value
/// untouched. Fields the body does not mention keep their current value.
///
/// # Example
///
/// ```rust,ignore
/// #[derive(Default, Deserialize, Schema, FromBody)]
/// struct Signup {
///     #[serde(rename = "first_name")]
///     #[validate(required)]
///     name: String,
///
///     #[serde(skip)]
///     directory: Directory,
/// }
/// ```
#[proc_macro_derive(FromBody)]
pub fn derive_from_body(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    expand_from_body(input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}

fn named_fields(input: &DeriveInput, derive: &str) -> syn::Result<Vec<Field>> {
    match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(fields) => Ok(fields.named.iter().cloned().collect()),
            _ => Err(syn::Error::new_spanned(
                &input.ident,
                format!("{derive} can only be derived for structs with named fields"),
            )),
        },
        _ => Err(syn::Error::new_spanned(
            &input.ident,
            format!("{derive} can only be derived for structs"),
        )),
    }
}

fn ident_name(field: &Field) -> String {
    field
        .ident
        .as_ref()
        .map(|i| i.to_string().trim_start_matches("r#").to_string())
        .unwrap_or_default()
}

fn wire_name(ident: &str, rename: Option<&String>, rename_all: Option<RenameAll>) -> String {
    match (rename, rename_all) {
        (Some(name), _) => name.clone(),
        (None, Some(rule)) => rule.apply(ident),
        (None, None) => ident.to_string(),
    }
}

fn is_option(ty: &Type) -> bool {
    match ty {
        Type::Path(path) => path
            .path
            .segments
            .last()
            .map(|s| s.ident == "Option")
            .unwrap_or(false),
        _ => false,
    }
}

fn expand_schema(input: DeriveInput) -> syn::Result<TokenStream2> {
    let fields = named_fields(&input, "Schema")?;
    let container = ContainerAttrs::parse(&input.attrs)?;
    let name = &input.ident;
    let schema_name = name.to_string();
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let mut table = Vec::new();
    let mut checks = Vec::new();

    for (index, field) in fields.iter().enumerate() {
        let serde = SerdeField::parse(&field.attrs)?;
        let ident = ident_name(field);
        let entry = if serde.skip_ser {
            quote!(::verdict::FieldName::hidden(#ident))
        } else {
            let wire = wire_name(&ident, serde.rename_ser.as_ref(), container.rename_all_ser);
            if wire == ident {
                quote!(::verdict::FieldName::new(#ident))
            } else {
                quote!(::verdict::FieldName::renamed(#ident, #wire))
            }
        };
        table.push(entry);

        let steps = attr::parse_validate(&field.attrs)?;
        if steps.is_empty() {
            continue;
        }

        let member = field.ident.as_ref();
        let optional = is_option(&field.ty);
        let mut statics = Vec::new();
        let mut calls = Vec::new();

        for (n, step) in steps.into_iter().enumerate() {
            match step {
                Step::Rule(rule) => calls.push(quote! {
                    check.rule(&self.#member, &#rule);
                }),
                Step::Regex(pattern) => {
                    let cell = format_ident!("REGEX_{}_{}", index, n);
                    statics.push(quote! {
                        static #cell: ::std::sync::OnceLock<::verdict::rules::RegexRule> =
                            ::std::sync::OnceLock::new();
                    });
                    calls.push(quote! {
                        check.rule(
                            &self.#member,
                            #cell.get_or_init(|| ::verdict::rules::RegexRule::new(#pattern)),
                        );
                    });
                }
                Step::Nested if optional => calls.push(quote! {
                    if let ::std::option::Option::Some(value) = &self.#member {
                        check.nested(value);
                    }
                }),
                Step::Nested => calls.push(quote! {
                    check.nested(&self.#member);
                }),
                Step::Dive if optional => calls.push(quote! {
                    check.dive(self.#member.iter().flatten());
                }),
                Step::Dive => calls.push(quote! {
                    check.dive(&self.#member);
                }),
            }
        }

        checks.push(quote! {
            {
                #(#statics)*
                let mut check = walker.field(&fields[#index]);
                #(#calls)*
            }
        });
    }

    let fields_binding = if checks.is_empty() {
        quote!()
    } else {
        quote!(let fields = <Self as ::verdict::Schema>::field_names();)
    };

    Ok(quote! {
        impl #impl_generics ::verdict::Schema for #name #ty_generics #where_clause {
            fn schema_name() -> &'static str {
                #schema_name
            }

            fn field_names() -> &'static [::verdict::FieldName] {
                const FIELDS: &[::verdict::FieldName] = &[#(#table),*];
                FIELDS
            }

            #[allow(unused_variables)]
            fn check_fields(&self, walker: &mut ::verdict::Walker<'_>) {
                #fields_binding
                #(#checks)*
            }
        }
    })
}

fn expand_from_query(input: DeriveInput) -> syn::Result<TokenStream2> {
    let fields = named_fields(&input, "FromQuery")?;
    let container = ContainerAttrs::parse(&input.attrs)?;
    let name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let mut assigns = Vec::new();
    for field in &fields {
        let serde = SerdeField::parse(&field.attrs)?;
        if serde.skip_de {
            continue;
        }
        let ident = ident_name(field);
        let key = wire_name(&ident, serde.rename_de.as_ref(), container.rename_all_de);
        let member = field.ident.as_ref();
        assigns.push(quote! {
            params.assign(#key, &mut self.#member, &mut errors);
        });
    }

    Ok(quote! {
        impl #impl_generics ::verdict::FromQuery for #name #ty_generics #where_clause {
            #[allow(unused_variables, unused_mut)]
            fn decode_query(
                &mut self,
                params: &::verdict::QueryParams,
            ) -> ::std::result::Result<(), ::verdict::QueryError> {
                let mut errors = ::std::vec::Vec::new();
                #(#assigns)*
                ::verdict::QueryError::from_conversions(errors)
            }
        }
    })
}

fn expand_from_body(input: DeriveInput) -> syn::Result<TokenStream2> {
    let fields = named_fields(&input, "FromBody")?;
    let container = ContainerAttrs::parse(&input.attrs)?;
    let name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let mut takes = Vec::new();
    let mut assigns = Vec::new();
    for (index, field) in fields.iter().enumerate() {
        let serde = SerdeField::parse(&field.attrs)?;
        if serde.skip_de {
            continue;
        }
        let ident = ident_name(field);
        let key = wire_name(&ident, serde.rename_de.as_ref(), container.rename_all_de);
        let member = field.ident.as_ref();
        let ty = &field.ty;
        let slot = format_ident!("__field{}", index);
        takes.push(quote! {
            let #slot = body.take::<#ty>(#key)?;
        });
        assigns.push(quote! {
            if let ::std::option::Option::Some(value) = #slot {
                self.#member = value;
            }
        });
    }

    Ok(quote! {
        impl #impl_generics ::verdict::FromBody for #name #ty_generics #where_clause {
            #[allow(unused_variables)]
            fn decode_body(
                &mut self,
                body: &mut ::verdict::BodyFields,
            ) -> ::std::result::Result<(), ::verdict::BodyError> {
                #(#takes)*
                #(#assigns)*
                ::std::result::Result::Ok(())
            }
        }
    })
}
