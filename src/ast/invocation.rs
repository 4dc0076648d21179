//! Macro invocations and their literal arguments.

use serde::Serialize;
use std::fmt;

use super::Span;

/// The four macros the engine knows how to expand.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize)]
pub enum MacroName {
    Style,
    RegisterStyle,
    ConvenienceModifierForStyle,
    UIComponent,
}

impl MacroName {
    pub const ALL: [MacroName; 4] = [
        MacroName::Style,
        MacroName::RegisterStyle,
        MacroName::ConvenienceModifierForStyle,
        MacroName::UIComponent,
    ];

    /// Resolves an attribute name (without `@`) to a macro.
    pub fn from_attribute(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|m| m.as_str() == name)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Style => "Style",
            Self::RegisterStyle => "RegisterStyle",
            Self::ConvenienceModifierForStyle => "ConvenienceModifierForStyle",
            Self::UIComponent => "UIComponent",
        }
    }
}

impl fmt::Display for MacroName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "@{}", self.as_str())
    }
}

/// A literal argument value, already reduced from the parsed expression.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ArgumentValue {
    String(String),
    StringList(Vec<String>),
}

impl ArgumentValue {
    pub fn shape(&self) -> &'static str {
        match self {
            Self::String(_) => "`String`",
            Self::StringList(_) => "`[String]`",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MacroArgument {
    pub label: Option<String>,
    pub value: ArgumentValue,
    pub span: Span,
}

impl MacroArgument {
    pub fn unlabeled(value: ArgumentValue) -> Self {
        Self {
            label: None,
            value,
            span: Span::default(),
        }
    }

    pub fn labeled(label: impl Into<String>, value: ArgumentValue) -> Self {
        Self {
            label: Some(label.into()),
            value,
            span: Span::default(),
        }
    }
}

/// One macro attribute attached to a declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MacroInvocation {
    pub name: MacroName,
    pub arguments: Vec<MacroArgument>,
    pub span: Span,
}

impl MacroInvocation {
    pub fn new(name: MacroName, arguments: Vec<MacroArgument>) -> Self {
        Self {
            name,
            arguments,
            span: Span::default(),
        }
    }

    /// `@Style(subViews: [...])`
    pub fn style<I, S>(sub_views: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(
            MacroName::Style,
            vec![MacroArgument::labeled(
                "subViews",
                ArgumentValue::StringList(sub_views.into_iter().map(Into::into).collect()),
            )],
        )
    }

    /// `@RegisterStyle("S")`
    pub fn register_style(style_name: impl Into<String>) -> Self {
        Self::new(
            MacroName::RegisterStyle,
            vec![MacroArgument::unlabeled(ArgumentValue::String(
                style_name.into(),
            ))],
        )
    }

    /// `@ConvenienceModifierForStyle("S")`
    pub fn convenience_modifier(style_name: impl Into<String>) -> Self {
        Self::new(
            MacroName::ConvenienceModifierForStyle,
            vec![MacroArgument::unlabeled(ArgumentValue::String(
                style_name.into(),
            ))],
        )
    }

    /// `@UIComponent`
    pub fn ui_component() -> Self {
        Self::new(MacroName::UIComponent, Vec::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn attribute_names_resolve() {
        assert_eq!(MacroName::from_attribute("Style"), Some(MacroName::Style));
        assert_eq!(
            MacroName::from_attribute("UIComponent"),
            Some(MacroName::UIComponent)
        );
        assert_eq!(MacroName::from_attribute("MainActor"), None);
        assert_eq!(MacroName::from_attribute("style"), None);
    }

    #[test]
    fn display_carries_at_sign() {
        assert_eq!(MacroName::RegisterStyle.to_string(), "@RegisterStyle");
    }
}
