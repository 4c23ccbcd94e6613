//! Attribute parsing for `#[serde(...)]` and `#[validate(...)]`.

use proc_macro2::TokenStream;
use quote::quote;
use syn::meta::ParseNestedMeta;
use syn::{Attribute, Expr, LitStr, Token};

/// Container-level `rename_all` rule.
#[derive(Clone, Copy)]
pub enum RenameAll {
    Lower,
    Upper,
    Pascal,
    Camel,
    Snake,
    ScreamingSnake,
    Kebab,
    ScreamingKebab,
}

impl RenameAll {
    fn parse(lit: &LitStr) -> syn::Result<Self> {
        Ok(match lit.value().as_str() {
            "lowercase" => RenameAll::Lower,
            "UPPERCASE" => RenameAll::Upper,
            "PascalCase" => RenameAll::Pascal,
            "camelCase" => RenameAll::Camel,
            "snake_case" => RenameAll::Snake,
            "SCREAMING_SNAKE_CASE" => RenameAll::ScreamingSnake,
            "kebab-case" => RenameAll::Kebab,
            "SCREAMING-KEBAB-CASE" => RenameAll::ScreamingKebab,
            other => {
                return Err(syn::Error::new(
                    lit.span(),
                    format!("unknown rename_all rule `{other}`"),
                ))
            }
        })
    }

    /// Apply to a snake_case field identifier.
    pub fn apply(self, field: &str) -> String {
        match self {
            RenameAll::Lower | RenameAll::Snake => field.to_string(),
            RenameAll::Upper | RenameAll::ScreamingSnake => field.to_ascii_uppercase(),
            RenameAll::Kebab => field.replace('_', "-"),
            RenameAll::ScreamingKebab => field.replace('_', "-").to_ascii_uppercase(),
            RenameAll::Pascal => field.split('_').map(capitalize).collect(),
            RenameAll::Camel => {
                let pascal: String = field.split('_').map(capitalize).collect();
                let mut chars = pascal.chars();
                match chars.next() {
                    Some(first) => first.to_ascii_lowercase().to_string() + chars.as_str(),
                    None => String::new(),
                }
            }
        }
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
        None => String::new(),
    }
}

/// Consume whatever follows a meta item we do not care about.
fn skip(meta: &ParseNestedMeta) -> syn::Result<()> {
    if meta.input.peek(Token![=]) {
        meta.value()?.parse::<Expr>()?;
    } else if meta.input.peek(syn::token::Paren) {
        meta.parse_nested_meta(|inner| skip(&inner))?;
    }
    Ok(())
}

/// Container-level serde settings that affect naming.
#[derive(Default)]
pub struct ContainerAttrs {
    pub rename_all_ser: Option<RenameAll>,
    pub rename_all_de: Option<RenameAll>,
}

impl ContainerAttrs {
    pub fn parse(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut out = Self::default();
        for attr in attrs.iter().filter(|a| a.path().is_ident("serde")) {
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("rename_all") {
                    if meta.input.peek(Token![=]) {
                        let rule = RenameAll::parse(&meta.value()?.parse()?)?;
                        out.rename_all_ser = Some(rule);
                        out.rename_all_de = Some(rule);
                    } else {
                        meta.parse_nested_meta(|inner| {
                            let rule = RenameAll::parse(&inner.value()?.parse()?)?;
                            if inner.path.is_ident("serialize") {
                                out.rename_all_ser = Some(rule);
                            } else if inner.path.is_ident("deserialize") {
                                out.rename_all_de = Some(rule);
                            }
                            Ok(())
                        })?;
                    }
                    Ok(())
                } else {
                    skip(&meta)
                }
            })?;
        }
        Ok(out)
    }
}

/// Field-level serde settings that affect naming.
#[derive(Default)]
pub struct SerdeField {
    pub rename_ser: Option<String>,
    pub rename_de: Option<String>,
    pub skip_ser: bool,
    pub skip_de: bool,
}

impl SerdeField {
    pub fn parse(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut out = Self::default();
        for attr in attrs.iter().filter(|a| a.path().is_ident("serde")) {
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("rename") {
                    if meta.input.peek(Token![=]) {
                        let name: LitStr = meta.value()?.parse()?;
                        out.rename_ser = Some(name.value());
                        out.rename_de = Some(name.value());
                    } else {
                        meta.parse_nested_meta(|inner| {
                            let name: LitStr = inner.value()?.parse()?;
                            if inner.path.is_ident("serialize") {
                                out.rename_ser = Some(name.value());
                            } else if inner.path.is_ident("deserialize") {
                                out.rename_de = Some(name.value());
                            }
                            Ok(())
                        })?;
                    }
                    Ok(())
                } else if meta.path.is_ident("skip") {
                    out.skip_ser = true;
                    out.skip_de = true;
                    Ok(())
                } else if meta.path.is_ident("skip_serializing") {
                    out.skip_ser = true;
                    Ok(())
                } else if meta.path.is_ident("skip_deserializing") {
                    out.skip_de = true;
                    Ok(())
                } else {
                    skip(&meta)
                }
            })?;
        }
        Ok(out)
    }
}

/// One step of a field's `#[validate(...)]` list, in declared order.
pub enum Step {
    /// A rule constructor expression.
    Rule(TokenStream),
    /// A regex rule; compiled once per field through a static.
    Regex(LitStr),
    Nested,
    Dive,
}

fn bound(meta: &ParseNestedMeta) -> syn::Result<TokenStream> {
    let expr: Expr = meta.value()?.parse()?;
    Ok(quote!((#expr) as f64))
}

/// Parse `min = .., max = ..` pairs into optional bounds.
fn bounds(meta: &ParseNestedMeta, as_float: bool) -> syn::Result<(TokenStream, TokenStream)> {
    let mut min = quote!(::std::option::Option::None);
    let mut max = quote!(::std::option::Option::None);
    meta.parse_nested_meta(|inner| {
        let expr: Expr = inner.value()?.parse()?;
        let value = if as_float {
            quote!(::std::option::Option::Some((#expr) as f64))
        } else {
            quote!(::std::option::Option::Some(#expr))
        };
        if inner.path.is_ident("min") {
            min = value;
        } else if inner.path.is_ident("max") {
            max = value;
        } else {
            return Err(inner.error("expected `min` or `max`"));
        }
        Ok(())
    })?;
    Ok((min, max))
}

pub fn parse_validate(attrs: &[Attribute]) -> syn::Result<Vec<Step>> {
    let mut steps = Vec::new();
    for attr in attrs.iter().filter(|a| a.path().is_ident("validate")) {
        attr.parse_nested_meta(|meta| {
            let rules = quote!(::verdict::rules);
            let step = if meta.path.is_ident("required") {
                Step::Rule(quote!(#rules::RequiredRule::new()))
            } else if meta.path.is_ident("min") {
                let value = bound(&meta)?;
                Step::Rule(quote!(#rules::MinRule::new(#value)))
            } else if meta.path.is_ident("max") {
                let value = bound(&meta)?;
                Step::Rule(quote!(#rules::MaxRule::new(#value)))
            } else if meta.path.is_ident("range") {
                let (min, max) = bounds(&meta, true)?;
                Step::Rule(quote!(#rules::RangeRule::new(#min, #max)))
            } else if meta.path.is_ident("length") {
                let (min, max) = bounds(&meta, false)?;
                Step::Rule(quote!(#rules::LengthRule::new(#min, #max)))
            } else if meta.path.is_ident("email") {
                Step::Rule(quote!(#rules::EmailRule::new()))
            } else if meta.path.is_ident("url") {
                Step::Rule(quote!(#rules::UrlRule::new()))
            } else if meta.path.is_ident("regex") {
                Step::Regex(meta.value()?.parse()?)
            } else if meta.path.is_ident("nested") {
                Step::Nested
            } else if meta.path.is_ident("dive") {
                Step::Dive
            } else {
                return Err(meta.error(
                    "unknown validation rule, expected one of: required, min, max, range, \
                     length, email, url, regex, nested, dive",
                ));
            };
            steps.push(step);
            Ok(())
        })?;
    }
    Ok(steps)
}
