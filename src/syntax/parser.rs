//! stylegen Parser
//!
//! Converts a source file into raw annotated sites with source location
//! tracking. This parser is purely syntactic: it does not know which
//! declaration kinds a macro accepts or what shape its arguments must have.
//! Text outside sites is not represented at all; callers slice it from the
//! source using the site spans.

use pest::{error::Error, iterators::Pair, Parser};
use pest_derive::Parser;

use crate::ast::Span;
use crate::errors::{ErrorReporting, SourceContext, StyleGenError, ValidationContext};

#[derive(Parser)]
#[grammar = "syntax/grammar.pest"]
struct StyleParser;

// ============================================================================
// RAW SYNTAX TREE
// ============================================================================

/// All annotated sites of one file, in source order.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedFile {
    pub sites: Vec<RawSite>,
}

/// Attributes plus whatever follows them.
#[derive(Debug, Clone, PartialEq)]
pub struct RawSite {
    pub attributes: Vec<RawAttribute>,
    pub target: Option<RawTarget>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RawAttribute {
    /// Attribute name without the `@`.
    pub name: String,
    /// True for the style macros, false for attributes passed through untouched.
    pub is_macro: bool,
    /// `None` when the attribute has no parenthesised argument list.
    pub arguments: Option<Vec<RawArgument>>,
    /// Set when a `(` follows the attribute name but the argument list does
    /// not parse.
    pub malformed_arguments: bool,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RawArgument {
    pub label: Option<String>,
    pub value: Option<RawExpression>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RawExpression {
    pub kind: RawExpressionKind,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub enum RawExpressionKind {
    /// A string literal; `interpolated` is set when it contains `\( ... )`.
    String { value: String, interpolated: bool },
    Array(Vec<RawExpression>),
    /// Anything else, kept as written.
    Other(String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum RawTarget {
    Declaration(RawDeclaration),
    /// Something that is not a type declaration, e.g. `func` or `var`.
    Unsupported { word: String, span: Span },
}

#[derive(Debug, Clone, PartialEq)]
pub struct RawDeclaration {
    pub modifiers: Vec<String>,
    pub keyword: String,
    pub name: String,
    pub generic_parameters: Vec<RawGenericParameter>,
    pub inheritance: Vec<String>,
    pub where_clause: Option<String>,
    /// Span of the text between the braces of the body.
    pub body: Span,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RawGenericParameter {
    pub name: String,
    pub constraint: Option<String>,
}

impl RawSite {
    pub fn macro_attributes(&self) -> impl Iterator<Item = &RawAttribute> {
        self.attributes.iter().filter(|a| a.is_macro)
    }
}

// ============================================================================
// PUBLIC API
// ============================================================================

/// Parse a source file into its annotated sites.
pub fn parse(source: &SourceContext) -> Result<ParsedFile, StyleGenError> {
    let text = source.content.as_str();
    if text.trim().is_empty() {
        return Ok(ParsedFile { sites: Vec::new() });
    }

    let mut pairs =
        StyleParser::parse(Rule::file, text).map_err(|e| convert_parse_error(e, source))?;

    let Some(file) = pairs.next() else {
        return Ok(ParsedFile { sites: Vec::new() });
    };

    let sites = file
        .into_inner()
        .filter(|p| p.as_rule() == Rule::site)
        .map(|p| build_site(p, text))
        .collect();

    Ok(ParsedFile { sites })
}

/// Convenience wrapper for callers holding only a string.
pub fn parse_str(text: &str) -> Result<ParsedFile, StyleGenError> {
    parse(&SourceContext::from_file("input", text))
}

// ============================================================================
// TREE BUILDERS
// ============================================================================

fn build_site(pair: Pair<Rule>, text: &str) -> RawSite {
    let span = get_span(&pair);
    let mut attributes = Vec::new();
    let mut target = None;

    for inner in pair.into_inner() {
        match inner.as_rule() {
            Rule::macro_attribute | Rule::other_attribute => {
                attributes.push(build_attribute(inner, text));
            }
            Rule::declaration => {
                target = Some(RawTarget::Declaration(build_declaration(inner)));
            }
            Rule::unsupported_declaration => {
                let span = get_span(&inner);
                let word = inner
                    .into_inner()
                    .find(|p| p.as_rule() == Rule::declaration_word)
                    .map(|p| p.as_str().to_string())
                    .unwrap_or_default();
                target = Some(RawTarget::Unsupported { word, span });
            }
            _ => {}
        }
    }

    RawSite {
        attributes,
        target,
        span,
    }
}

fn build_attribute(pair: Pair<Rule>, text: &str) -> RawAttribute {
    let is_macro = pair.as_rule() == Rule::macro_attribute;
    let span = get_span(&pair);
    let mut name = String::new();
    let mut arguments = None;

    for inner in pair.into_inner() {
        match inner.as_rule() {
            Rule::macro_name | Rule::identifier => name = inner.as_str().to_string(),
            Rule::attribute_arguments => {
                arguments = Some(inner.into_inner().map(build_argument).collect());
            }
            _ => {}
        }
    }

    let malformed_arguments = arguments.is_none()
        && text[span.end..]
            .trim_start_matches([' ', '\t'])
            .starts_with('(');

    RawAttribute {
        name,
        is_macro,
        arguments,
        malformed_arguments,
        span,
    }
}

fn build_argument(pair: Pair<Rule>) -> RawArgument {
    let span = get_span(&pair);
    let mut label = None;
    let mut value = None;

    for inner in pair.into_inner() {
        match inner.as_rule() {
            Rule::argument_label => label = Some(inner.as_str().to_string()),
            Rule::expression => value = Some(build_expression(inner)),
            _ => {}
        }
    }

    RawArgument { label, value, span }
}

fn build_expression(pair: Pair<Rule>) -> RawExpression {
    let span = get_span(&pair);
    let Some(inner) = pair.into_inner().next() else {
        return RawExpression {
            kind: RawExpressionKind::Other(String::new()),
            span,
        };
    };

    let kind = match inner.as_rule() {
        Rule::string_literal => build_string(inner),
        Rule::array_literal => {
            RawExpressionKind::Array(inner.into_inner().map(build_expression).collect())
        }
        _ => RawExpressionKind::Other(inner.as_str().trim().to_string()),
    };

    RawExpression { kind, span }
}

fn build_string(pair: Pair<Rule>) -> RawExpressionKind {
    let Some(content) = pair.into_inner().next() else {
        return RawExpressionKind::String {
            value: String::new(),
            interpolated: false,
        };
    };

    let interpolated = content
        .clone()
        .into_inner()
        .any(|p| p.as_rule() == Rule::interpolation);

    RawExpressionKind::String {
        value: unescape_string(content.as_str()),
        interpolated,
    }
}

fn build_declaration(pair: Pair<Rule>) -> RawDeclaration {
    let span = get_span(&pair);
    let mut decl = RawDeclaration {
        modifiers: Vec::new(),
        keyword: String::new(),
        name: String::new(),
        generic_parameters: Vec::new(),
        inheritance: Vec::new(),
        where_clause: None,
        body: Span::default(),
        span,
    };

    for inner in pair.into_inner() {
        match inner.as_rule() {
            Rule::modifier => decl.modifiers.push(inner.as_str().to_string()),
            Rule::declaration_keyword => decl.keyword = inner.as_str().to_string(),
            Rule::declaration_name => decl.name = inner.as_str().to_string(),
            Rule::generic_parameters => {
                decl.generic_parameters = inner.into_inner().map(build_generic_parameter).collect();
            }
            Rule::inheritance_clause => {
                decl.inheritance = inner
                    .into_inner()
                    .map(|p| p.as_str().trim().to_string())
                    .collect();
            }
            Rule::where_clause => decl.where_clause = Some(inner.as_str().trim().to_string()),
            Rule::body => {
                decl.body = inner
                    .into_inner()
                    .next()
                    .map(|content| get_span(&content))
                    .unwrap_or_default();
            }
            _ => {}
        }
    }

    decl
}

fn build_generic_parameter(pair: Pair<Rule>) -> RawGenericParameter {
    let mut name = String::new();
    let mut constraint = None;

    for inner in pair.into_inner() {
        match inner.as_rule() {
            Rule::generic_parameter_name => name = inner.as_str().to_string(),
            Rule::type_constraint => constraint = Some(inner.as_str().trim().to_string()),
            _ => {}
        }
    }

    RawGenericParameter { name, constraint }
}

// ============================================================================
// UTILITIES
// ============================================================================

fn get_span(pair: &Pair<Rule>) -> Span {
    Span {
        start: pair.as_span().start(),
        end: pair.as_span().end(),
    }
}

/// Resolves the escapes of a string literal body (quotes already removed).
fn unescape_string(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch != '\\' {
            result.push(ch);
            continue;
        }
        match chars.next() {
            Some('n') => result.push('\n'),
            Some('t') => result.push('\t'),
            Some('r') => result.push('\r'),
            Some('0') => result.push('\0'),
            Some('\\') => result.push('\\'),
            Some('"') => result.push('"'),
            Some('\'') => result.push('\''),
            Some('u') if chars.peek() == Some(&'{') => {
                chars.next();
                let hex: String = chars.by_ref().take_while(|c| *c != '}').collect();
                match u32::from_str_radix(&hex, 16).ok().and_then(char::from_u32) {
                    Some(decoded) => result.push(decoded),
                    None => {
                        result.push_str("\\u{");
                        result.push_str(&hex);
                        result.push('}');
                    }
                }
            }
            Some(other) => {
                result.push('\\');
                result.push(other);
            }
            None => result.push('\\'),
        }
    }

    result
}

// ============================================================================
// ERROR HANDLING
// ============================================================================

fn convert_parse_error(error: Error<Rule>, source: &SourceContext) -> StyleGenError {
    let span = match error.location {
        pest::error::InputLocation::Pos(pos) => Span {
            start: pos,
            end: pos,
        },
        pest::error::InputLocation::Span((start, end)) => Span { start, end },
    };

    let message = if error.to_string().contains("expected ')'") {
        "missing closing parenthesis"
    } else if error.to_string().contains("expected '}'") {
        "missing closing brace"
    } else {
        "syntax error"
    };

    ValidationContext::new(source.clone(), "parse").parse_error(message, span)
}
