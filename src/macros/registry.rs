//! Macro registry for lookup and listing of the built-in macros.
//!
//! The registry describes what each macro attaches to, what it takes and
//! which names it introduces. Expansion itself dispatches on
//! [`ValidatedInvocation`](crate::validation::ValidatedInvocation); the
//! registry is what `list-macros` prints, and shape errors quote a macro's
//! signature from it.
//!
//! # Example
//! ```rust
//! use stylegen::ast::MacroName;
//! use stylegen::macros::MacroRegistry;
//! let registry = MacroRegistry::builtin();
//! let def = registry.lookup(MacroName::Style).unwrap();
//! assert_eq!(def.signature, "@Style(subViews: [String])");
//! ```

use serde::Serialize;

use crate::ast::MacroName;
use crate::validation::Targets;

/// Static description of one macro.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MacroDef {
    pub name: MacroName,
    pub signature: &'static str,
    /// Declaration the macro must be attached to, with the configured
    /// target types filled in.
    pub attaches_to: String,
    pub summary: &'static str,
    /// Names added inside the annotated declaration. `*` stands for a name
    /// derived from the arguments.
    pub members: &'static [&'static str],
    /// Names added next to the annotated declaration.
    pub peers: &'static [&'static str],
}

/// The macro table, in declaration order.
#[derive(Debug, Clone)]
pub struct MacroRegistry {
    defs: Vec<MacroDef>,
}

impl MacroRegistry {
    /// The table for the default target types.
    pub fn builtin() -> Self {
        Self::for_targets(&Targets::default())
    }

    pub fn for_targets(targets: &Targets) -> Self {
        Self {
            defs: vec![
                MacroDef {
                    name: MacroName::Style,
                    signature: "@Style(subViews: [String])",
                    attaches_to: "protocol".to_string(),
                    summary: "Declares a view style with one configuration slot per sub-view.",
                    members: &["Body", "Configuration", "makeBody"],
                    peers: &["*Configuration", "Default*", "Any*", "*Key"],
                },
                MacroDef {
                    name: MacroName::RegisterStyle,
                    signature: "@RegisterStyle(String)",
                    attaches_to: format!("extension {}", targets.environment_type),
                    summary: "Adds an environment accessor for the style's key.",
                    members: &["*"],
                    peers: &[],
                },
                MacroDef {
                    name: MacroName::ConvenienceModifierForStyle,
                    signature: "@ConvenienceModifierForStyle(String)",
                    attaches_to: format!("extension {}", targets.view_type),
                    summary: "Adds a view modifier that installs the style in the environment.",
                    members: &["*"],
                    peers: &[],
                },
                MacroDef {
                    name: MacroName::UIComponent,
                    signature: "@UIComponent",
                    attaches_to: "struct".to_string(),
                    summary: "Adds content closures and a body rendered by the registered style.",
                    members: &["style", "Configuration", "*", "body"],
                    peers: &[],
                },
            ],
        }
    }

    pub fn lookup(&self, name: MacroName) -> Option<&MacroDef> {
        self.defs.iter().find(|def| def.name == name)
    }

    pub fn contains(&self, name: MacroName) -> bool {
        self.lookup(name).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = &MacroDef> {
        self.defs.iter()
    }

    pub fn len(&self) -> usize {
        self.defs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.defs.is_empty()
    }
}

impl Default for MacroRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}
