//! `url` subcommands: offline access to the query-string helpers.

use clap::Subcommand;
use shopstyle_core::query_string::{build_url, decode_value, get_parameter, set_parameter};

#[derive(Debug, Subcommand)]
pub enum UrlCommands {
    /// Print the decoded value of a query parameter
    Get { url: String, name: String },
    /// Set a query parameter, or remove it when no value is given
    Set {
        url: String,
        name: String,
        value: Option<String>,
    },
    /// Build a URL from a path and key=value pairs (keys are sorted)
    Build {
        path: String,
        #[arg(value_parser = parse_key_value)]
        params: Vec<(String, String)>,
        /// Append a random zzcb parameter
        #[arg(long)]
        break_cache: bool,
    },
}

/// Parses `key=value`; the value may itself contain `=`.
pub(crate) fn parse_key_value(raw: &str) -> Result<(String, String), String> {
    match raw.split_once('=') {
        Some((key, value)) if !key.is_empty() => Ok((key.to_owned(), value.to_owned())),
        _ => Err(format!("expected key=value, got '{raw}'")),
    }
}

/// # Errors
///
/// Fails when `get` finds no such parameter.
pub(crate) fn run(command: UrlCommands) -> anyhow::Result<()> {
    match command {
        UrlCommands::Get { url, name } => {
            let raw = get_parameter(&url, &name)
                .ok_or_else(|| anyhow::anyhow!("parameter '{name}' not found in '{url}'"))?;
            println!("{}", decode_value(&raw));
        }
        UrlCommands::Set { url, name, value } => {
            println!("{}", set_parameter(&url, &name, value.as_deref()));
        }
        UrlCommands::Build {
            path,
            params,
            break_cache,
        } => {
            println!("{}", build_url(&path, params, break_cache));
        }
    }
    Ok(())
}
