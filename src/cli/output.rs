//! Handles all user-facing output for the CLI.
//!
//! This module is responsible for pretty-printing, colorizing output,
//! formatting diffs, and generating JSON. Generated code and reports go to
//! stdout; diagnostics and logs go to stderr.

use std::io::Write;
use std::path::Path;

use difference::{Changeset, Difference};
use serde::Serialize;
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

use crate::ast::{Declaration, GeneratedDeclaration, MacroInvocation, Role};
use crate::engine::{FileExpansion, SiteExpansion};
use crate::errors::StyleGenError;
use crate::macros::MacroRegistry;

// ============================================================================
// STDOUT PRINTER
// ============================================================================

pub struct Printer {
    stdout: StandardStream,
}

impl Printer {
    pub fn new(choice: ColorChoice) -> Self {
        Self {
            stdout: StandardStream::stdout(choice),
        }
    }

    fn colored(&mut self, color: Color, bold: bool, text: &str) {
        let _ = self
            .stdout
            .set_color(ColorSpec::new().set_fg(Some(color)).set_bold(bold));
        let _ = write!(self.stdout, "{}", text);
        let _ = self.stdout.reset();
    }

    pub fn plain(&mut self, text: &str) {
        let _ = writeln!(self.stdout, "{}", text);
    }

    /// Prints the generated declarations of every successful site.
    pub fn print_expansion(&mut self, expansion: &FileExpansion) {
        let mut first = true;
        for site in expansion.sites.iter().filter(|site| site.is_ok()) {
            let Some(declaration) = &site.declaration else {
                continue;
            };
            if !first {
                let _ = writeln!(self.stdout);
            }
            first = false;
            self.print_site(site, declaration);
        }
    }

    fn print_site(&mut self, site: &SiteExpansion, declaration: &Declaration) {
        let macros = site
            .invocations
            .iter()
            .map(|invocation| invocation.name.to_string())
            .collect::<Vec<_>>()
            .join(" ");
        self.colored(
            Color::Yellow,
            true,
            &format!("// --- {} {}: {} ---", declaration.kind.keyword(), declaration.name, macros),
        );
        let _ = writeln!(self.stdout);

        for generated in &site.generated {
            let role = match generated.role {
                Role::MemberAddition => "member",
                Role::PeerType => "peer",
            };
            self.colored(Color::Cyan, false, &format!("// {}", role));
            let _ = writeln!(self.stdout);
            let _ = writeln!(self.stdout, "{}", generated.source_text);
        }
    }

    /// One status line, e.g. `generated Card+Generated.swift`.
    pub fn status(&mut self, label: &str, color: Color, path: &Path) {
        self.colored(color, true, &format!("{:>10}", label));
        let _ = writeln!(self.stdout, " {}", path.display());
    }

    /// Line diff from the file on disk to the freshly rendered output.
    pub fn print_diff(&mut self, on_disk: &str, fresh: &str) {
        let changeset = Changeset::new(on_disk, fresh, "\n");
        for diff in &changeset.diffs {
            match diff {
                Difference::Same(text) => {
                    for line in text.split('\n') {
                        let _ = writeln!(self.stdout, " {}", line);
                    }
                }
                Difference::Add(text) => self.diff_lines(Color::Green, '+', text),
                Difference::Rem(text) => self.diff_lines(Color::Red, '-', text),
            }
        }
    }

    fn diff_lines(&mut self, color: Color, marker: char, text: &str) {
        let _ = self.stdout.set_color(ColorSpec::new().set_fg(Some(color)));
        for line in text.split('\n') {
            let _ = writeln!(self.stdout, "{}{}", marker, line);
        }
        let _ = self.stdout.reset();
    }

    pub fn print_macro_table(&mut self, registry: &MacroRegistry) {
        for def in registry.iter() {
            self.colored(Color::Green, true, def.signature);
            let _ = writeln!(self.stdout);
            let _ = writeln!(self.stdout, "    attaches to: {}", def.attaches_to);
            let _ = writeln!(self.stdout, "    {}", def.summary);
            if !def.members.is_empty() {
                let _ = writeln!(self.stdout, "    members: {}", def.members.join(", "));
            }
            if !def.peers.is_empty() {
                let _ = writeln!(self.stdout, "    peers: {}", def.peers.join(", "));
            }
        }
    }
}

// ============================================================================
// JSON
// ============================================================================

#[derive(Debug, Serialize)]
pub struct DiagnosticReport {
    pub code: String,
    /// The macro the error is attributed to, e.g. `@Style`.
    #[serde(rename = "macro", skip_serializing_if = "Option::is_none")]
    pub macro_name: Option<String>,
    pub message: String,
}

impl From<&StyleGenError> for DiagnosticReport {
    fn from(error: &StyleGenError) -> Self {
        Self {
            code: error.diagnostic_info.error_code.clone(),
            macro_name: error.kind.macro_name().map(|name| name.to_string()),
            message: error.message(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SiteReport<'a> {
    pub declaration: Option<&'a Declaration>,
    pub invocations: &'a [MacroInvocation],
    pub generated: &'a [GeneratedDeclaration],
    pub errors: Vec<DiagnosticReport>,
}

pub fn expansion_report(expansion: &FileExpansion) -> Vec<SiteReport<'_>> {
    expansion
        .sites
        .iter()
        .map(|site| SiteReport {
            declaration: site.declaration.as_ref(),
            invocations: &site.invocations,
            generated: &site.generated,
            errors: site.errors.iter().map(DiagnosticReport::from).collect(),
        })
        .collect()
}
