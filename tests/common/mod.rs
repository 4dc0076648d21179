//! Shared helpers for the stylegen integration tests.

#![allow(dead_code)]

use std::path::PathBuf;

use stylegen::ast::GeneratedDeclaration;
use stylegen::engine::{expand_source, ExpansionContext, FileExpansion};
use stylegen::errors::SourceContext;

/// Path of a file under `tests/fixtures`.
pub fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

pub fn fixture_text(name: &str) -> String {
    std::fs::read_to_string(fixture(name)).expect("fixture exists")
}

/// Expands `text` with the default configuration.
pub fn expand_text(text: &str) -> FileExpansion {
    let ctx = ExpansionContext::new(SourceContext::from_file("test.swift", text));
    expand_source(&ctx).expect("file parses")
}

pub fn sources(generated: &[GeneratedDeclaration]) -> Vec<&str> {
    generated.iter().map(|d| d.source_text.as_str()).collect()
}

pub fn member_sources(generated: &[GeneratedDeclaration]) -> Vec<&str> {
    generated
        .iter()
        .filter(|d| d.is_member())
        .map(|d| d.source_text.as_str())
        .collect()
}

pub fn peer_sources(generated: &[GeneratedDeclaration]) -> Vec<&str> {
    generated
        .iter()
        .filter(|d| d.is_peer())
        .map(|d| d.source_text.as_str())
        .collect()
}
