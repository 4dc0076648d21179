//! The annotated declaration a macro is attached to.

use serde::Serialize;
use std::fmt;

use super::Span;

/// Classification of an annotated type declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "extended_type")]
pub enum DeclarationKind {
    Protocol,
    StructType,
    ClassType,
    EnumType,
    ActorType,
    /// `extension T`, carrying the extended type as written (`T`, `A.B`).
    ExtensionOfType(String),
}

impl DeclarationKind {
    /// Maps a declaration keyword to its kind. Extensions need the extended
    /// type name, which the caller passes separately.
    pub fn from_keyword(keyword: &str, name: &str) -> Option<Self> {
        match keyword {
            "protocol" => Some(Self::Protocol),
            "struct" => Some(Self::StructType),
            "class" => Some(Self::ClassType),
            "enum" => Some(Self::EnumType),
            "actor" => Some(Self::ActorType),
            "extension" => Some(Self::ExtensionOfType(name.to_string())),
            _ => None,
        }
    }

    /// The keyword this kind is declared with.
    pub fn keyword(&self) -> &'static str {
        match self {
            Self::Protocol => "protocol",
            Self::StructType => "struct",
            Self::ClassType => "class",
            Self::EnumType => "enum",
            Self::ActorType => "actor",
            Self::ExtensionOfType(_) => "extension",
        }
    }

    pub fn is_extension_of(&self, type_name: &str) -> bool {
        matches!(self, Self::ExtensionOfType(extended) if extended == type_name)
    }
}

impl fmt::Display for DeclarationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ExtensionOfType(extended) => write!(f, "extension of `{}`", extended),
            other => f.write_str(other.keyword()),
        }
    }
}

/// Access-level modifier found on a declaration.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AccessLevel {
    Open,
    Public,
    Package,
    Internal,
    FilePrivate,
    Private,
}

impl AccessLevel {
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword {
            "open" => Some(Self::Open),
            "public" => Some(Self::Public),
            "package" => Some(Self::Package),
            "internal" => Some(Self::Internal),
            "fileprivate" => Some(Self::FilePrivate),
            "private" => Some(Self::Private),
            _ => None,
        }
    }

    pub fn keyword(&self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Public => "public",
            Self::Package => "package",
            Self::Internal => "internal",
            Self::FilePrivate => "fileprivate",
            Self::Private => "private",
        }
    }

    /// The modifier as a prefix for generated members, trailing space included.
    pub fn prefix(access: Option<AccessLevel>) -> String {
        access
            .map(|level| format!("{} ", level.keyword()))
            .unwrap_or_default()
    }
}

impl fmt::Display for AccessLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// A named type declaration or extension, as far as the expanders need it.
///
/// For extensions `name` is the extended type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Declaration {
    pub name: String,
    pub kind: DeclarationKind,
    pub generic_parameters: Vec<String>,
    pub access: Option<AccessLevel>,
    pub span: Span,
}

impl Declaration {
    /// Builds a declaration with no generics, no access modifier and no span.
    /// Mostly useful when driving the expanders without a source file.
    pub fn new(name: impl Into<String>, kind: DeclarationKind) -> Self {
        Self {
            name: name.into(),
            kind,
            generic_parameters: Vec::new(),
            access: None,
            span: Span::default(),
        }
    }

    pub fn protocol(name: impl Into<String>) -> Self {
        Self::new(name, DeclarationKind::Protocol)
    }

    pub fn structure(name: impl Into<String>) -> Self {
        Self::new(name, DeclarationKind::StructType)
    }

    pub fn extension(extended_type: impl Into<String>) -> Self {
        let extended_type = extended_type.into();
        Self::new(
            extended_type.clone(),
            DeclarationKind::ExtensionOfType(extended_type),
        )
    }

    pub fn with_generics<I, S>(mut self, parameters: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.generic_parameters = parameters.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_access(mut self, access: AccessLevel) -> Self {
        self.access = Some(access);
        self
    }
}
