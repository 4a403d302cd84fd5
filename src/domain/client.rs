use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ClientId;
use crate::format::digits_only;

pub const MIN_NAME_LEN: usize = 2;
pub const MIN_PHONE_DIGITS: usize = 10;

/// Individual (CPF) or organization (CNPJ).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ClientKind {
    #[default]
    #[serde(rename = "PF", alias = "Individual")]
    Individual,
    #[serde(rename = "PJ", alias = "Organization")]
    Organization,
}

impl ClientKind {
    /// Classifies a national ID by its digit count: 11 → CPF, 14 → CNPJ.
    ///
    /// Only used to migrate records stored before the kind was persisted.
    pub fn infer(document: &str) -> Option<Self> {
        match digits_only(document).len() {
            11 => Some(Self::Individual),
            14 => Some(Self::Organization),
            _ => None,
        }
    }

    pub fn document_len(self) -> usize {
        match self {
            Self::Individual => 11,
            Self::Organization => 14,
        }
    }

    pub fn document_label(self) -> &'static str {
        match self {
            Self::Individual => "CPF",
            Self::Organization => "CNPJ",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Individual => "Individual",
            Self::Organization => "Organization",
        }
    }
}

/// Postal address. Every part is optional; digits-only zip code.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Address {
    pub street: Option<String>,
    pub number: Option<String>,
    pub complement: Option<String>,
    pub neighborhood: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip_code: Option<String>,
}

impl Address {
    pub fn is_empty(&self) -> bool {
        [
            &self.street,
            &self.number,
            &self.complement,
            &self.neighborhood,
            &self.city,
            &self.state,
            &self.zip_code,
        ]
        .iter()
        .all(|part| part.is_none())
    }
}

/// A customer of the organization.
#[derive(Debug, Clone, PartialEq)]
pub struct Client {
    pub id: ClientId,
    pub name: String,
    pub kind: ClientKind,
    /// Digits only.
    pub document: Option<String>,
    /// Digits only.
    pub phone: Option<String>,
    pub email: Option<String>,
    pub fantasy_name: Option<String>,
    pub state_registration: Option<String>,
    pub address: Address,
    pub observations: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Validated, normalized input for creating or replacing a client.
#[derive(Debug, Clone, PartialEq)]
pub struct ClientDraft {
    pub name: String,
    pub kind: ClientKind,
    pub document: Option<String>,
    pub phone: String,
    pub email: Option<String>,
    pub fantasy_name: Option<String>,
    pub state_registration: Option<String>,
    pub address: Address,
    pub observations: Option<String>,
}

/// The slice of a client that order listings join in.
#[derive(Debug, Clone, PartialEq)]
pub struct ClientSummary {
    pub id: ClientId,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
}

impl Client {
    pub fn summary(&self) -> ClientSummary {
        ClientSummary {
            id: self.id,
            name: self.name.clone(),
            email: self.email.clone(),
            phone: self.phone.clone(),
        }
    }

    /// Search-bar match: name or email (case-insensitive) or raw document.
    pub fn matches(&self, term: &str) -> bool {
        let needle = term.to_lowercase();
        self.name.to_lowercase().contains(&needle)
            || self.document.as_deref().is_some_and(|d| d.contains(term))
            || self
                .email
                .as_deref()
                .is_some_and(|e| e.to_lowercase().contains(&needle))
    }
}
