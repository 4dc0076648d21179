//! Syntax module for stylegen sources
//!
//! `parser` turns a file into raw annotated sites; `lower` reduces each site
//! to a [`Declaration`](crate::ast::Declaration) and its
//! [`MacroInvocation`](crate::ast::MacroInvocation)s.

pub mod lower;
pub mod parser;

pub use lower::{lower_site, LoweredSite};
pub use parser::{parse, parse_str, ParsedFile, RawSite};
