//
//  pyramid-api
//  codegen/emit.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Rendering
//!
//! Schemas are rendered to token streams with `quote`, checked item by item
//! with `syn`, then assembled into output units and pretty-printed with
//! `prettyplease`.
//!
//! | Schema | Rendered as |
//! |--------|-------------|
//! | [`ObjectSchema`] | `struct` with serde derives, camelCase wire names kept via `rename` |
//! | [`EnumSchema`] | `enum` with `value`/`from_value` and integer serde impls |
//! | [`MethodSchema`] | `const` [`Endpoint`](crate::api::Endpoint) descriptor |

use std::collections::HashSet;

use heck::{ToShoutySnakeCase, ToSnakeCase, ToUpperCamelCase};
use proc_macro2::{Ident, Literal, Span, TokenStream};
use quote::{format_ident, quote};

use super::schema::{is_reserved, EnumSchema, FieldType, MethodSchema, ObjectSchema, SchemaAttribute};
use super::ScrapeError;

/// Notice placed at the top of every generated unit.
pub const GENERATED_NOTICE: &str = "// Generated by `pyramid gen`. Do not edit by hand.";

fn doc_attrs(text: &str) -> TokenStream {
    let lines = text
        .lines()
        .map(str::trim_end)
        .map(|line| if line.is_empty() { String::new() } else { format!(" {line}") });
    quote! { #(#[doc = #lines])* }
}

/// Parses `name` as a plain identifier.
fn plain_ident(name: &str) -> Result<Ident, ScrapeError> {
    syn::parse_str::<Ident>(name).map_err(|_| ScrapeError::InvalidIdentifier(name.to_string()))
}

/// Identifier for a struct field.
///
/// Keywords become raw identifiers, except the four that cannot be raw,
/// which take a trailing `_`.
pub fn field_ident(name: &str) -> Result<Ident, ScrapeError> {
    let snake = name.to_snake_case();
    match snake.as_str() {
        "" => Err(ScrapeError::InvalidIdentifier(name.to_string())),
        "self" | "super" | "crate" => Ok(format_ident!("{}_", snake)),
        word if is_reserved(word) => Ok(Ident::new_raw(word, Span::call_site())),
        word => plain_ident(word),
    }
}

/// Identifier for a type or enum variant.
pub fn type_ident(name: &str) -> Result<Ident, ScrapeError> {
    let camel = name.to_upper_camel_case();
    if camel.is_empty() || camel == "Self" {
        return Err(ScrapeError::InvalidIdentifier(name.to_string()));
    }
    plain_ident(&camel)
}

/// Renders a field type. Named types go through [`type_ident`] so they
/// match the structs and enums rendered from the same documents; names
/// that are not identifiers degrade to `serde_json::Value`.
pub fn type_tokens(field_type: &FieldType) -> TokenStream {
    match field_type {
        FieldType::String => quote!(String),
        FieldType::Integer => quote!(i64),
        FieldType::Boolean => quote!(bool),
        FieldType::Number => quote!(f64),
        FieldType::Object => quote!(serde_json::Value),
        FieldType::Named(name) => match plain_ident(name).and_then(|_| type_ident(name)) {
            Ok(ident) => quote!(#ident),
            Err(_) => {
                tracing::warn!("type '{}' is not an identifier, using serde_json::Value", name);
                quote!(serde_json::Value)
            }
        },
        FieldType::List(inner) => {
            let inner = type_tokens(inner);
            quote!(Vec<#inner>)
        }
        FieldType::Optional(inner) => {
            let inner = type_tokens(inner);
            quote!(Option<#inner>)
        }
    }
}

/// Which `default = "..."` helper a field needs, if any.
fn default_helper(attr: &SchemaAttribute) -> Option<&'static str> {
    let value = attr.default?;
    let base = match &attr.field_type {
        FieldType::Optional(inner) => inner.as_ref(),
        other => other,
    };
    if *base != FieldType::Boolean {
        tracing::warn!(
            "ignoring boolean default on '{}' of type {}",
            attr.name,
            attr.field_type
        );
        return None;
    }

    Some(match (attr.field_type.is_optional(), value) {
        (true, true) => "default_some_true",
        (true, false) => "default_some_false",
        (false, true) => "default_true",
        (false, false) => "default_false",
    })
}

fn field_tokens(attr: &SchemaAttribute, helpers: &mut HashSet<&'static str>) -> Result<TokenStream, ScrapeError> {
    let ident = field_ident(&attr.name)?;
    let ty = type_tokens(&attr.field_type);

    let mut doc = attr.description.clone();
    if let Some(format) = attr.format.as_deref().filter(|f| !f.is_empty()) {
        if !doc.is_empty() {
            doc.push_str("\n\n");
        }
        doc.push_str(&format!("Format: {format}"));
    }
    let doc = doc_attrs(&doc);

    let rename = if ident.to_string().trim_start_matches("r#") != attr.name {
        let wire = &attr.name;
        quote!(#[serde(rename = #wire)])
    } else {
        quote!()
    };

    let serde_default = match (default_helper(attr), attr.field_type.is_optional()) {
        (Some(helper), true) => {
            helpers.insert(helper);
            quote!(#[serde(default = #helper, skip_serializing_if = "Option::is_none")])
        }
        (Some(helper), false) => {
            helpers.insert(helper);
            quote!(#[serde(default = #helper)])
        }
        (None, true) => quote!(#[serde(default, skip_serializing_if = "Option::is_none")]),
        (None, false) => quote!(),
    };

    Ok(quote! {
        #doc
        #rename
        #serde_default
        pub #ident: #ty,
    })
}

/// A rendered object plus the default helpers its fields refer to.
#[derive(Debug, Clone)]
pub struct RenderedObject {
    pub tokens: TokenStream,
    pub helpers: HashSet<&'static str>,
}

/// Renders an object schema as a struct.
///
/// Attributes with an empty name are skipped with a warning.
pub fn render_object(schema: &ObjectSchema) -> Result<RenderedObject, ScrapeError> {
    let ident = type_ident(&schema.name)?;
    let doc = doc_attrs(&format!("Generated from <{}>", schema.url));

    let mut helpers = HashSet::new();
    let mut seen = HashSet::new();
    let mut fields = Vec::with_capacity(schema.attributes.len());
    for attr in &schema.attributes {
        if attr.name.is_empty() {
            tracing::warn!("skipping unnamed attribute of {}", schema.name);
            continue;
        }
        let field = field_ident(&attr.name)?.to_string();
        if !seen.insert(field.clone()) {
            return Err(ScrapeError::InvalidIdentifier(format!(
                "{}.{} (duplicate field {})",
                schema.name, attr.name, field
            )));
        }
        fields.push(field_tokens(attr, &mut helpers)?);
    }

    let tokens = quote! {
        #doc
        #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
        pub struct #ident {
            #(#fields)*
        }
    };
    check_item(&schema.name, &tokens)?;
    Ok(RenderedObject { tokens, helpers })
}

/// Renders an enum schema as a plain enum with integer serde impls.
///
/// Members keep their enumerated names, including the trailing `_` of
/// escaped keywords, so the generated enum allows non-camel-case variants.
pub fn render_enum(schema: &EnumSchema) -> Result<TokenStream, ScrapeError> {
    let ident = type_ident(&schema.name)?;
    let doc = doc_attrs(&format!("Generated from <{}>", schema.url));

    let mut seen = HashSet::new();
    let mut variants = Vec::with_capacity(schema.members.len());
    let mut values = Vec::with_capacity(schema.members.len());
    for member in &schema.members {
        let variant = plain_ident(&member.name)?;
        if !seen.insert(member.name.as_str()) {
            return Err(ScrapeError::InvalidIdentifier(format!(
                "{}::{} (duplicate variant)",
                schema.name, member.name
            )));
        }
        variants.push(variant);
        values.push(Literal::i64_unsuffixed(member.value));
    }
    let invalid = format!("invalid {} value {{}}", schema.name);

    let tokens = quote! {
        #doc
        #[allow(non_camel_case_types)]
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum #ident {
            #(#variants = #values,)*
        }

        impl #ident {
            /// The integer sent on the wire.
            pub const fn value(self) -> i64 {
                match self {
                    #(Self::#variants => #values,)*
                }
            }

            /// Looks up the member with the given wire value.
            #[allow(unreachable_patterns)]
            pub fn from_value(value: i64) -> Option<Self> {
                match value {
                    #(#values => Some(Self::#variants),)*
                    _ => None,
                }
            }
        }

        impl serde::Serialize for #ident {
            fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_i64(self.value())
            }
        }

        impl<'de> serde::Deserialize<'de> for #ident {
            fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let value = <i64 as serde::Deserialize>::deserialize(deserializer)?;
                Self::from_value(value).ok_or_else(|| serde::de::Error::custom(format!(#invalid, value)))
            }
        }
    };
    check_items(&schema.name, &tokens)?;
    Ok(tokens)
}

/// Name of the endpoint constant for a method (`getMe` → `GET_ME`).
pub fn method_const_name(name: &str) -> String {
    name.to_shouty_snake_case()
}

/// Renders a method schema as an endpoint constant.
pub fn render_method(schema: &MethodSchema) -> Result<TokenStream, ScrapeError> {
    let ident = plain_ident(&method_const_name(&schema.name))
        .map_err(|_| ScrapeError::InvalidIdentifier(schema.name.clone()))?;

    let mut doc = schema.description.clone();
    for (title, entries) in [("Input", &schema.inputs), ("Output", &schema.outputs)] {
        if entries.is_empty() {
            continue;
        }
        doc.push_str(&format!("\n\n# {title}\n"));
        for (name, description) in entries {
            doc.push_str(&format!("\n- `{name}`: {description}"));
        }
    }
    doc.push_str(&format!("\n\nGenerated from <{}>", schema.url));
    let doc = doc_attrs(&doc);

    let name = &schema.name;
    let path = &schema.endpoint;
    let response = schema
        .response
        .as_ref()
        .map(ToString::to_string)
        .unwrap_or_else(|| "()".to_string());

    let tokens = quote! {
        #doc
        pub const #ident: Endpoint = Endpoint {
            name: #name,
            path: #path,
            response: #response,
        };
    };
    check_item(&schema.name, &tokens)?;
    Ok(tokens)
}

fn check_item(name: &str, tokens: &TokenStream) -> Result<(), ScrapeError> {
    syn::parse2::<syn::Item>(tokens.clone())
        .map(|_| ())
        .map_err(|source| ScrapeError::Render {
            name: name.to_string(),
            source,
        })
}

fn check_items(name: &str, tokens: &TokenStream) -> Result<(), ScrapeError> {
    syn::parse2::<syn::File>(tokens.clone())
        .map(|_| ())
        .map_err(|source| ScrapeError::Render {
            name: name.to_string(),
            source,
        })
}

/// Tokens for the default helpers used by an objects unit.
pub fn default_helpers(used: &HashSet<&'static str>) -> TokenStream {
    let all = [
        ("default_true", quote!(bool), quote!(true)),
        ("default_false", quote!(bool), quote!(false)),
        ("default_some_true", quote!(Option<bool>), quote!(Some(true))),
        ("default_some_false", quote!(Option<bool>), quote!(Some(false))),
    ];
    let helpers = all
        .into_iter()
        .filter(|(name, _, _)| used.contains(name))
        .map(|(name, ty, value)| {
            let ident = format_ident!("{}", name);
            quote! {
                fn #ident() -> #ty {
                    #value
                }
            }
        });
    quote!(#(#helpers)*)
}

/// Which kind of unit is being assembled; decides its imports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnitKind {
    Enums,
    Objects,
    Methods,
}

/// Assembles rendered items into a formatted source file.
pub fn render_unit(
    name: &str,
    doc: &str,
    kind: UnitKind,
    items: &[TokenStream],
) -> Result<String, ScrapeError> {
    let doc = doc
        .lines()
        .map(|line| if line.is_empty() { String::new() } else { format!(" {line}") });
    let imports = match kind {
        UnitKind::Enums => quote!(),
        UnitKind::Objects => quote! {
            use serde::{Deserialize, Serialize};
            #[allow(unused_imports)]
            use super::enums::*;
        },
        UnitKind::Methods => quote!(use pyramid_api::api::Endpoint;),
    };

    let tokens = quote! {
        #(#![doc = #doc])*
        #imports
        #(#items)*
    };
    format_file(name, tokens)
}

/// Renders the `mod.rs` declaring every unit.
pub fn render_mod(modules: &[String]) -> Result<String, ScrapeError> {
    let modules = modules
        .iter()
        .map(|m| plain_ident(m))
        .collect::<Result<Vec<_>, _>>()?;
    let tokens = quote! {
        #![doc = " Pyramid REST API definitions generated from the vendor reference."]
        #(pub mod #modules;)*
    };
    format_file("mod", tokens)
}

fn format_file(name: &str, tokens: TokenStream) -> Result<String, ScrapeError> {
    let file = syn::parse2::<syn::File>(tokens).map_err(|source| ScrapeError::Render {
        name: name.to_string(),
        source,
    })?;
    Ok(format!("{GENERATED_NOTICE}\n\n{}", prettyplease::unparse(&file)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codegen::schema::{build_attribute, build_enum_schema, EnumMember};
    use crate::codegen::TableRow;

    fn attr(cells: [&str; 4]) -> SchemaAttribute {
        build_attribute(&TableRow::zip(["Name", "Type", "Required", "Description"], cells))
    }

    fn object(attributes: Vec<SchemaAttribute>) -> ObjectSchema {
        ObjectSchema {
            name: "User".to_string(),
            url: "https://docs/definitions/User.htm".to_string(),
            attributes,
        }
    }

    fn unit(items: &[TokenStream], kind: UnitKind) -> String {
        render_unit("test", "Test unit.", kind, items).unwrap()
    }

    #[test]
    fn test_field_ident() {
        assert_eq!(field_ident("userName").unwrap().to_string(), "user_name");
        assert_eq!(field_ident("type").unwrap().to_string(), "r#type");
        assert_eq!(field_ident("self").unwrap().to_string(), "self_");
        assert!(field_ident("1st").is_err());
        assert!(field_ident("").is_err());
    }

    #[test]
    fn test_render_object() {
        let rendered = render_object(&object(vec![
            attr(["userName", "string", "Y", "the user name"]),
            attr(["active", "boolean", "N", "Default:true - whether active"]),
            attr(["roles", "string[]", "N", ""]),
            attr(["type", "integer", "Y", ""]),
        ]))
        .unwrap();
        let source = unit(&[rendered.tokens], UnitKind::Objects);

        assert!(source.starts_with(GENERATED_NOTICE));
        assert!(source.contains("pub struct User"));
        assert!(source.contains("#[serde(rename = \"userName\")]"));
        assert!(source.contains("pub user_name: String"));
        assert!(source.contains("default = \"default_some_true\""));
        assert!(source.contains("pub active: Option<bool>"));
        assert!(source.contains("pub roles: Option<Vec<String>>"));
        assert!(source.contains("pub r#type: i64"));
        assert!(rendered.helpers.contains("default_some_true"));
    }

    #[test]
    fn test_render_object_duplicate_fields() {
        let err = render_object(&object(vec![
            attr(["userId", "string", "Y", ""]),
            attr(["UserId", "string", "Y", ""]),
        ]))
        .unwrap_err();
        assert!(matches!(err, ScrapeError::InvalidIdentifier(_)));
    }

    #[test]
    fn test_render_object_skips_unnamed() {
        let rendered = render_object(&object(vec![attr(["", "string", "Y", ""])])).unwrap();
        let source = unit(&[rendered.tokens], UnitKind::Objects);
        assert!(source.contains("pub struct User {}"));
    }

    fn enum_schema(members: &[(&str, i64)]) -> EnumSchema {
        EnumSchema {
            name: "AccessType".to_string(),
            url: "https://docs/definitions/AccessType.htm".to_string(),
            members: members
                .iter()
                .map(|(name, value)| EnumMember { name: name.to_string(), value: *value })
                .collect(),
        }
    }

    #[test]
    fn test_render_enum() {
        let rows = [
            TableRow::zip(["Description", "Enumerated Name", "Value"], ["Read Access", "read", "1"]),
            TableRow::zip(["Description", "Enumerated Name", "Value"], ["Type", "type", "2"]),
        ];
        let schema = build_enum_schema("AccessType", "https://docs/definitions/AccessType.htm", &rows).unwrap();
        let source = unit(&[render_enum(&schema).unwrap()], UnitKind::Enums);

        assert!(source.contains("#[allow(non_camel_case_types)]"));
        assert!(source.contains("pub enum AccessType {"));
        assert!(source.contains("    read = 1,"));
        assert!(source.contains("    type_ = 2,"));
        assert!(source.contains("Self::type_ => 2,"));
        assert!(source.contains("1 => Some(Self::read),"));
        assert!(source.contains("impl serde::Serialize for AccessType"));
        assert!(!source.contains("int_enum!"));
    }

    #[test]
    fn test_render_enum_keeps_distinct_spellings() {
        let schema = enum_schema(&[("read_only", 1), ("readOnly", 2)]);
        let source = unit(&[render_enum(&schema).unwrap()], UnitKind::Enums);
        assert!(source.contains("read_only = 1,"));
        assert!(source.contains("readOnly = 2,"));

        let schema = enum_schema(&[("read", 1), ("read", 2)]);
        assert!(matches!(render_enum(&schema), Err(ScrapeError::InvalidIdentifier(_))));
    }

    #[test]
    fn test_render_method() {
        let schema = MethodSchema {
            name: "getUsersByName".to_string(),
            url: "https://docs/API2/access/getUsersByName.htm".to_string(),
            endpoint: "/API2/access/getUsersByName".to_string(),
            description: "Get users by name".to_string(),
            inputs: vec![("userName".to_string(), "the name".to_string())],
            outputs: vec![("Response List Type".to_string(), "User[]".to_string())],
            response: Some(FieldType::list(FieldType::Named("User".to_string()))),
        };
        let source = unit(&[render_method(&schema).unwrap()], UnitKind::Methods);

        assert!(source.contains("use pyramid_api::api::Endpoint;"));
        assert!(source.contains("pub const GET_USERS_BY_NAME: Endpoint"));
        assert!(source.contains("\"/API2/access/getUsersByName\""));
        assert!(source.contains("\"Vec<User>\""));
        assert!(source.contains("# Input"));
    }

    #[test]
    fn test_type_tokens_fallback() {
        let ty = FieldType::Named("Dictionary<string, string>".to_string());
        assert_eq!(type_tokens(&ty).to_string(), quote!(serde_json::Value).to_string());
    }

    #[test]
    fn test_render_mod() {
        let source = render_mod(&["enums".to_string(), "data_sources".to_string()]).unwrap();
        assert!(source.contains("pub mod enums;"));
        assert!(source.contains("pub mod data_sources;"));
    }

    #[test]
    fn test_default_helpers_only_used() {
        let used = HashSet::from(["default_true"]);
        let rendered = default_helpers(&used).to_string();
        assert!(rendered.contains("default_true"));
        assert!(!rendered.contains("default_false"));
    }
}
