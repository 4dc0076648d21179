//! # Template Expander
//!
//! One expansion rule per macro, each a pure function from validated
//! arguments to generated declarations. The rules share the identifier case
//! transforms in [`utils`] and the indentation-aware [`CodeWriter`].
//!
//! ## Module Structure
//!
//! - **`style`**, **`register_style`**, **`convenience_modifier`**,
//!   **`ui_component`**: the expansion rules
//! - **`expander`**: dispatch on [`ValidatedInvocation`](crate::validation::ValidatedInvocation)
//! - **`registry`**: the macro table
//! - **`writer`**, **`utils`**: shared helpers

pub mod convenience_modifier;
pub mod expander;
pub mod register_style;
pub mod registry;
pub mod style;
pub mod ui_component;
pub mod utils;
pub mod writer;

pub use expander::expand_validated;
pub use registry::{MacroDef, MacroRegistry};
pub use utils::{is_identifier, with_first_character_lowercased, with_first_character_uppercased};
pub use writer::{CodeWriter, Indent};
