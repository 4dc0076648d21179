//! # stylegen
//!
//! A declarative code generator for style-driven UI components. Source files
//! annotate type declarations with `@Style`, `@RegisterStyle`,
//! `@ConvenienceModifierForStyle` and `@UIComponent`; stylegen parses the
//! annotated sites, validates each macro against its declaration and expands
//! it into member and peer declarations.
//!
//! ## Pipeline
//!
//! `syntax` (parse + lower) → `validation` → `macros` (expansion rules),
//! driven per file by `engine`.
//!
//! ```rust
//! use stylegen::ast::{Declaration, MacroInvocation};
//! use stylegen::engine::{expand, ExpansionContext};
//! use stylegen::errors::SourceContext;
//!
//! let ctx = ExpansionContext::new(SourceContext::default());
//! let generated = expand(
//!     &MacroInvocation::register_style("CardStyle"),
//!     &Declaration::extension("EnvironmentValues"),
//!     &ctx,
//! )
//! .unwrap();
//! assert!(generated[0].source_text.starts_with("var cardStyle: AnyCardStyle {"));
//! ```

pub use crate::errors::{ErrorCategory, ErrorKind, StyleGenError};

pub mod ast;
pub mod cli;
pub mod config;
pub mod discovery;
pub mod engine;
pub mod errors;
pub mod macros;
pub mod syntax;
pub mod validation;
