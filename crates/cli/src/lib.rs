//! Askopt CLI Library
//!
//! This crate provides the terminal-facing half of askopt: the interactive
//! single-select engine, the free-text line prompt, help-text rendering, and
//! the parser that walks a declared option schema in order and resolves it
//! into a uniform validated-option map.
//!
//! # Architecture
//!
//! - [`parser`]: the orchestrator; resolves positional, named, free-text and
//!   choice groups strictly in that order
//! - [`select`]: raw-mode single-select questions with in-place repaint
//! - [`prompt`]: line-based free-text questions
//! - [`help`]: the generated option summary behind the reserved `help` token
//!
//! # Examples
//!
//! ```no_run
//! use indexmap::IndexMap;
//! use askopt_core::option_definitions::OptionDefinition;
//! use askopt_core::schema::CommandSchema;
//! use askopt_cli::parser::CommandParser;
//!
//! let named = IndexMap::from([(
//!     "--env".to_string(),
//!     OptionDefinition {
//!         description: "target environment".to_string(),
//!         required: true,
//!         ..Default::default()
//!     },
//! )]);
//! let schema = CommandSchema::new(IndexMap::new(), named, IndexMap::new(), IndexMap::new())?;
//!
//! let mut parser = CommandParser::new(schema)?;
//! parser.parse()?;
//! println!("env = {}", parser.option_value("--env"));
//! # Ok::<(), askopt_core::error::Error>(())
//! ```

pub mod help;
pub mod parser;
pub mod prompt;
pub mod select;
