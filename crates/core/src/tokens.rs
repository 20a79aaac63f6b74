use log::debug;
use serde::Deserialize;

use crate::error::Result;

/// Environment variable through which npm-style package managers pass the
/// original, pre-parsed argument vector.
pub const PACKAGE_MANAGER_ARGV_VAR: &str = "npm_config_argv";

#[derive(Deserialize, Debug)]
struct PackageManagerArgv {
    original: Vec<String>,
}

/// Token stream for the current process invocation.
///
/// The raw vector is the process arguments with the program token stripped.
/// When the package-manager variable is present it takes precedence: its
/// payload carries the arguments as the user typed them, before the tool
/// re-tokenized anything containing a literal `=`.
///
/// # Errors
///
/// Returns an error when the package-manager payload is present but is not
/// valid JSON of the expected shape.
pub fn invocation_tokens() -> Result<Vec<String>> {
    let argv: Vec<String> = std::env::args().skip(1).collect();
    let payload = std::env::var(PACKAGE_MANAGER_ARGV_VAR).ok();
    resolve_tokens(argv, payload.as_deref())
}

/// Pure resolution step behind [`invocation_tokens`].
///
/// The payload's `original` vector starts with the tool and script tokens;
/// both are stripped.
pub fn resolve_tokens(argv: Vec<String>, payload: Option<&str>) -> Result<Vec<String>> {
    let Some(payload) = payload else {
        return Ok(argv);
    };

    let parsed: PackageManagerArgv = serde_json::from_str(payload)?;
    let tokens: Vec<String> = parsed.original.into_iter().skip(2).collect();
    debug!("using package-manager argument vector: {tokens:?}");
    Ok(tokens)
}
