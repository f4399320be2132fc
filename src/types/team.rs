//! Time Surge
//!
//! Um time agrupa trabalhadores (surgers) que podem ser atribuídos a
//! projetos. A lista `members` é sempre o roster reportado pelo servidor,
//! nunca uma união/diferença calculada localmente.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

use super::require_id;
use crate::error::Result;

/// Representa um time Surge
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Team {
    /// ID atribuído pelo servidor
    pub id: String,

    /// Nome do time
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Descrição do time
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// IDs dos membros (roster do servidor)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub members: Vec<String>,

    /// Data de criação (ISO-8601)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl Team {
    /// Constrói um time a partir de um payload do servidor
    ///
    /// Falha com `MissingId` se o payload não trouxer `id`.
    pub fn from_value(value: Value) -> Result<Self> {
        require_id(&value)?;
        Ok(serde_json::from_value(value)?)
    }
}

impl fmt::Display for Team {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "surge.Team#{}", self.id)
    }
}
