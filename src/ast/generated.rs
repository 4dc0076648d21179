//! Output units of an expansion.

use serde::Serialize;

/// Where a generated declaration goes relative to the annotated one.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Inserted inside the annotated declaration's body.
    MemberAddition,
    /// Placed next to the annotated declaration, at the same scope.
    PeerType,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GeneratedDeclaration {
    pub role: Role,
    pub source_text: String,
}

impl GeneratedDeclaration {
    pub fn member(source_text: impl Into<String>) -> Self {
        Self {
            role: Role::MemberAddition,
            source_text: source_text.into(),
        }
    }

    pub fn peer(source_text: impl Into<String>) -> Self {
        Self {
            role: Role::PeerType,
            source_text: source_text.into(),
        }
    }

    pub fn is_member(&self) -> bool {
        self.role == Role::MemberAddition
    }

    pub fn is_peer(&self) -> bool {
        self.role == Role::PeerType
    }
}
