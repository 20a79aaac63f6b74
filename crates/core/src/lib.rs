//! Askopt Core Library
//!
//! This crate provides the terminal-free half of askopt, a library that
//! resolves command-line invocation data (positional tokens, `--flag=value`
//! named tokens, free-text prompts, single-select questions) into a uniform
//! validated-option map.
//!
//! # Key Features
//!
//! - **Option Schema**: Declaration-ordered option groups with synchronous
//!   construction validation
//! - **Validation Pipeline**: Transform and validate raw values into resolved
//!   options with diagnostic messages
//! - **Named-Option Extraction**: Recover flag values from whitespace-split
//!   token streams, with an order-sensitive ambiguity check
//! - **Token Stream Source**: Process arguments with a package-manager
//!   re-quoting fallback
//! - **Error Handling**: Descriptive error types for every failure mode
//!
//! # Examples
//!
//! Extracting a named option from a pre-split token stream:
//!
//! ```
//! use askopt_core::extractor::pick_named;
//!
//! let tokens: Vec<String> = ["--env", "=", "prod"].iter().map(ToString::to_string).collect();
//! let names = vec!["--env".to_string()];
//! let window = pick_named(&tokens, "--env", &names)?;
//! assert_eq!(window.last().unwrap(), "prod");
//! # Ok::<(), askopt_core::error::Error>(())
//! ```

pub mod error;
pub mod extractor;
pub mod option_definitions;
pub mod pipeline;
pub mod schema;
pub mod tokens;
