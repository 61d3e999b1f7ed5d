//
//  pyramid-api
//  cli/api.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Direct API access command
//!
//! Sends one request to any `/API2/...` endpoint with the session token
//! added as `auth`. Useful for methods the typed client does not wrap.
//!
//! ## Examples
//!
//! ```bash
//! # By method name, for endpoints the client knows
//! pyramid api getMe
//!
//! # By path, with fields (dots build nested objects)
//! pyramid api /API2/access/getUsersByName -F userName=admin
//!
//! # With a JSON body from a file
//! pyramid api /API2/dataSources/recognizeDataBase --input body.json
//! ```

use std::fs;

use anyhow::{bail, Result};
use clap::Args;
use reqwest::Method;
use serde_json::{Map, Value};

use crate::api::endpoints;
use crate::config::Config;

use super::GlobalOptions;

/// Call an endpoint directly
#[derive(Args, Debug)]
pub struct ApiCommand {
    /// Method name (`getMe`) or path (`/API2/access/getMe`)
    pub endpoint: String,

    /// HTTP method
    #[arg(long, short = 'X', default_value = "POST")]
    pub method: String,

    /// Add a typed field (key=value; true/false/null/numbers/JSON parsed)
    #[arg(long, short = 'F', action = clap::ArgAction::Append)]
    pub field: Vec<String>,

    /// Add a string field (key=value)
    #[arg(long, action = clap::ArgAction::Append)]
    pub raw_field: Vec<String>,

    /// Read the JSON body from a file ("-" for stdin)
    #[arg(long, short = 'f')]
    pub input: Option<String>,

    /// Do not add the session token as `auth`
    #[arg(long)]
    pub no_auth: bool,
}

impl ApiCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        let config = Config::load()?;
        let path = self.resolve_path()?;
        let method = self.parse_method()?;
        let mut body = self.build_body()?;

        let api = global.connect(&config).await?;
        if !self.no_auth {
            if let Value::Object(map) = &mut body {
                map.entry("auth").or_insert_with(|| Value::String(api.token().to_string()));
            }
        }

        let response = api.call(&path, &body, method).await?;
        println!("{}", response.to_pretty());
        Ok(())
    }

    fn resolve_path(&self) -> Result<String> {
        if let Some(endpoint) = endpoints::find(&self.endpoint) {
            return Ok(endpoint.path.to_string());
        }
        if self.endpoint.starts_with('/') {
            return Ok(self.endpoint.clone());
        }
        bail!(
            "Unknown endpoint '{}'. Use a method name the client knows or a path starting with '/'",
            self.endpoint
        )
    }

    fn parse_method(&self) -> Result<Method> {
        match self.method.to_uppercase().as_str() {
            "GET" => Ok(Method::GET),
            "POST" => Ok(Method::POST),
            "PUT" => Ok(Method::PUT),
            "PATCH" => Ok(Method::PATCH),
            "DELETE" => Ok(Method::DELETE),
            _ => bail!("Unsupported HTTP method: {}", self.method),
        }
    }

    fn build_body(&self) -> Result<Value> {
        if let Some(input) = &self.input {
            let content = if input == "-" {
                let mut buffer = String::new();
                std::io::Read::read_to_string(&mut std::io::stdin(), &mut buffer)?;
                buffer
            } else {
                fs::read_to_string(input)?
            };
            return Ok(serde_json::from_str(&content)?);
        }

        let mut body = Map::new();
        for field in &self.field {
            let (key, value) = split_field(field)?;
            set_nested_value(&mut body, key, parse_value(value));
        }
        for field in &self.raw_field {
            let (key, value) = split_field(field)?;
            set_nested_value(&mut body, key, Value::String(value.to_string()));
        }
        Ok(Value::Object(body))
    }
}

fn split_field(field: &str) -> Result<(&str, &str)> {
    match field.split_once('=') {
        Some(pair) => Ok(pair),
        None => bail!("Invalid field format: {}. Expected key=value", field),
    }
}

fn parse_value(raw: &str) -> Value {
    match raw {
        "true" => Value::Bool(true),
        "false" => Value::Bool(false),
        "null" => Value::Null,
        _ => {
            if let Ok(n) = raw.parse::<i64>() {
                Value::Number(n.into())
            } else if let Some(n) = raw.parse::<f64>().ok().and_then(serde_json::Number::from_f64) {
                Value::Number(n)
            } else if raw.starts_with('[') || raw.starts_with('{') {
                serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()))
            } else {
                Value::String(raw.to_string())
            }
        }
    }
}

fn set_nested_value(obj: &mut Map<String, Value>, key: &str, value: Value) {
    match key.split_once('.') {
        None => {
            obj.insert(key.to_string(), value);
        }
        Some((first, rest)) => {
            let nested = obj
                .entry(first.to_string())
                .or_insert_with(|| Value::Object(Map::new()));
            if let Value::Object(nested) = nested {
                set_nested_value(nested, rest, value);
            }
        }
    }
}
