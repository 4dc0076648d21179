//! The expansion pipeline: one invocation, one file, and rendering of the
//! expanded file.

use tracing::debug;

use crate::ast::{Declaration, GeneratedDeclaration, MacroInvocation, Span};
use crate::config::Config;
use crate::errors::{build_error, ErrorKind, ErrorReporting, SourceContext, StyleGenError};
use crate::macros::{expand_validated, writer::indent_lines, Indent};
use crate::syntax::parser::RawTarget;
use crate::syntax::{lower_site, parser, RawSite};
use crate::validation::{validate, Targets};

// ============================================================================
// EXPANSION CONTEXT
// ============================================================================

/// Everything one expansion reads: the source for diagnostics, the
/// configured target types and the indent unit.
#[derive(Debug, Clone)]
pub struct ExpansionContext {
    pub source: SourceContext,
    pub targets: Targets,
    pub indent: Indent,
}

impl ExpansionContext {
    pub fn new(source: SourceContext) -> Self {
        Self {
            source,
            targets: Targets::default(),
            indent: Indent::default(),
        }
    }

    pub fn from_config(source: SourceContext, config: &Config) -> Self {
        Self {
            source,
            targets: config.targets(),
            indent: config.indent(),
        }
    }

    pub fn with_targets(mut self, targets: Targets) -> Self {
        self.targets = targets;
        self
    }

    pub fn with_indent(mut self, indent: Indent) -> Self {
        self.indent = indent;
        self
    }

    fn phase(&self, phase: &'static str) -> PhaseReporter<'_> {
        PhaseReporter {
            source: &self.source,
            phase,
        }
    }
}

/// Error reporting for one pipeline phase over a borrowed source.
struct PhaseReporter<'a> {
    source: &'a SourceContext,
    phase: &'static str,
}

impl ErrorReporting for PhaseReporter<'_> {
    fn report(&self, kind: ErrorKind, span: Span) -> StyleGenError {
        build_error(self.source, self.phase, kind, span)
    }
}

// ============================================================================
// SINGLE INVOCATION
// ============================================================================

/// Validates `invocation` against `declaration`, then expands it.
///
/// Pure: the result depends only on the arguments. A validation failure
/// yields no generated declarations at all.
pub fn expand(
    invocation: &MacroInvocation,
    declaration: &Declaration,
    ctx: &ExpansionContext,
) -> Result<Vec<GeneratedDeclaration>, StyleGenError> {
    let validated = validate(invocation, declaration, &ctx.targets, &ctx.phase("validate"))?;
    Ok(expand_validated(declaration, &validated, &ctx.indent))
}

// ============================================================================
// WHOLE FILE
// ============================================================================

/// Outcome of one annotated site.
#[derive(Debug)]
pub struct SiteExpansion {
    /// Whole site, attributes included.
    pub span: Span,
    /// Spans of the known macro attributes, removed when rendering.
    pub macro_attributes: Vec<Span>,
    /// Text between the braces of the declaration body.
    pub body: Option<Span>,
    /// `None` when lowering failed.
    pub declaration: Option<Declaration>,
    pub invocations: Vec<MacroInvocation>,
    /// Members and peers of all successful invocations, in attribute order.
    pub generated: Vec<GeneratedDeclaration>,
    pub errors: Vec<StyleGenError>,
}

impl SiteExpansion {
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn members(&self) -> impl Iterator<Item = &GeneratedDeclaration> {
        self.generated.iter().filter(|d| d.is_member())
    }

    pub fn peers(&self) -> impl Iterator<Item = &GeneratedDeclaration> {
        self.generated.iter().filter(|d| d.is_peer())
    }
}

/// All sites of one file, in source order.
#[derive(Debug, Default)]
pub struct FileExpansion {
    pub sites: Vec<SiteExpansion>,
}

impl FileExpansion {
    pub fn is_empty(&self) -> bool {
        self.sites.is_empty()
    }

    pub fn has_errors(&self) -> bool {
        self.sites.iter().any(|site| !site.is_ok())
    }

    pub fn errors(&self) -> impl Iterator<Item = &StyleGenError> {
        self.sites.iter().flat_map(|site| site.errors.iter())
    }

    /// Takes the errors out, leaving the sites without them.
    pub fn take_errors(&mut self) -> Vec<StyleGenError> {
        self.sites
            .iter_mut()
            .flat_map(|site| std::mem::take(&mut site.errors))
            .collect()
    }

    pub fn generated_count(&self) -> usize {
        self.sites.iter().map(|site| site.generated.len()).sum()
    }
}

/// Parses the source in `ctx` and expands every annotated site.
///
/// Only a file-level parse failure is returned as `Err`. Failures of a
/// single site or invocation are recorded on that site, and the remaining
/// sites are still expanded.
pub fn expand_source(ctx: &ExpansionContext) -> Result<FileExpansion, StyleGenError> {
    let parsed = parser::parse(&ctx.source)?;
    let sites = parsed
        .sites
        .iter()
        .map(|site| expand_site(site, ctx))
        .collect::<Vec<_>>();

    debug!(
        file = %ctx.source.name,
        sites = sites.len(),
        "source expanded"
    );
    Ok(FileExpansion { sites })
}

fn expand_site(site: &RawSite, ctx: &ExpansionContext) -> SiteExpansion {
    let mut expansion = SiteExpansion {
        span: site.span,
        macro_attributes: site.macro_attributes().map(|a| a.span).collect(),
        body: match &site.target {
            Some(RawTarget::Declaration(decl)) => Some(decl.body),
            _ => None,
        },
        declaration: None,
        invocations: Vec::new(),
        generated: Vec::new(),
        errors: Vec::new(),
    };

    let lowered = match lower_site(site, &ctx.phase("lower")) {
        Ok(lowered) => lowered,
        Err(error) => {
            expansion.errors.push(error);
            return expansion;
        }
    };

    for invocation in &lowered.invocations {
        match expand(invocation, &lowered.declaration, ctx) {
            Ok(generated) => expansion.generated.extend(generated),
            Err(error) => expansion.errors.push(error),
        }
    }

    debug!(
        declaration = %lowered.declaration.name,
        generated = expansion.generated.len(),
        failed = expansion.errors.len(),
        "site expanded"
    );

    expansion.declaration = Some(lowered.declaration);
    expansion.invocations = lowered.invocations;
    expansion
}

// ============================================================================
// RENDERING
// ============================================================================

#[derive(Debug, Clone, Default)]
pub struct RenderOptions {
    pub indent: Indent,
    /// Written as the first line, followed by a blank line.
    pub header: Option<String>,
}

impl RenderOptions {
    pub fn from_config(config: &Config) -> Self {
        Self {
            indent: config.indent(),
            header: config.header.clone(),
        }
    }
}

/// A replacement of `start..end` in the source.
#[derive(Debug)]
struct Edit {
    start: usize,
    end: usize,
    text: String,
}

/// Renders the expanded source file.
///
/// Text outside the sites is copied verbatim. At every site the macro
/// attributes are removed, member additions are inserted at the end of the
/// body and peers follow the declaration after a blank line. Returns `None`
/// when any site failed, since the output would be incomplete.
pub fn render(source: &str, expansion: &FileExpansion, options: &RenderOptions) -> Option<String> {
    if expansion.has_errors() {
        return None;
    }

    let mut edits = Vec::new();
    for site in &expansion.sites {
        site_edits(source, site, options, &mut edits);
    }
    edits.sort_by_key(|edit| (edit.start, edit.end));

    let mut output = String::with_capacity(source.len() * 2);
    if let Some(header) = &options.header {
        output.push_str(header.trim_end());
        output.push_str("\n\n");
    }

    let mut cursor = 0;
    for edit in edits {
        if edit.start < cursor {
            continue;
        }
        output.push_str(&source[cursor..edit.start]);
        output.push_str(&edit.text);
        cursor = edit.end;
    }
    output.push_str(&source[cursor..]);

    Some(output)
}

fn site_edits(source: &str, site: &SiteExpansion, options: &RenderOptions, edits: &mut Vec<Edit>) {
    for attribute in &site.macro_attributes {
        edits.push(attribute_removal(source, *attribute));
    }

    let Some(declaration) = &site.declaration else {
        return;
    };
    let outer = line_indent(source, site.span.start);

    let members: Vec<_> = site.members().collect();
    if let (Some(body), false) = (site.body, members.is_empty()) {
        let inner = format!("{}{}", outer, options.indent.unit());
        let block = members
            .iter()
            .map(|member| indent_lines(&member.source_text, &inner))
            .collect::<Vec<_>>()
            .join("\n\n");

        let kept = source[body.start..body.end].trim_end();
        edits.push(if kept.trim().is_empty() {
            Edit {
                start: body.start,
                end: body.end,
                text: format!("\n{}\n{}", block, outer),
            }
        } else {
            Edit {
                start: body.start + kept.len(),
                end: body.end,
                text: format!("\n\n{}\n{}", block, outer),
            }
        });
    }

    let peers: Vec<_> = site.peers().collect();
    if !peers.is_empty() {
        let block = peers
            .iter()
            .map(|peer| indent_lines(&peer.source_text, &outer))
            .collect::<Vec<_>>()
            .join("\n\n");
        let anchor = peer_anchor(source, declaration.span.end);
        edits.push(Edit {
            start: anchor,
            end: anchor,
            text: format!("\n\n{}", block),
        });
    }
}

/// Where peers go: right after the declaration, or after a comment that
/// trails it on the same line.
fn peer_anchor(source: &str, end: usize) -> usize {
    let line_end = source[end..].find('\n').map_or(source.len(), |i| end + i);
    let rest = source[end..line_end].trim_end();
    let comment = rest.trim_start();
    let trailing_comment =
        comment.starts_with("//") || (comment.starts_with("/*") && comment.ends_with("*/"));
    if trailing_comment {
        end + rest.len()
    } else {
        end
    }
}

/// Removes an attribute. When it is alone on its line the whole line goes.
fn attribute_removal(source: &str, span: Span) -> Edit {
    let line_start = source[..span.start].rfind('\n').map_or(0, |i| i + 1);
    let line_end = source[span.end..]
        .find('\n')
        .map_or(source.len(), |i| span.end + i + 1);

    let before = &source[line_start..span.start];
    let after = &source[span.end..line_end];
    if before.trim().is_empty() && after.trim().is_empty() {
        return Edit {
            start: line_start,
            end: line_end,
            text: String::new(),
        };
    }

    let trailing = after.len() - after.trim_start_matches([' ', '\t']).len();
    Edit {
        start: span.start,
        end: span.end + trailing,
        text: String::new(),
    }
}

/// Leading whitespace of the line containing `offset`.
fn line_indent(source: &str, offset: usize) -> String {
    let line_start = source[..offset].rfind('\n').map_or(0, |i| i + 1);
    source[line_start..]
        .chars()
        .take_while(|c| *c == ' ' || *c == '\t')
        .collect()
}
