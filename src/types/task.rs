//! Tarefa Surge
//!
//! Uma tarefa pertence a um projeto e carrega os dados de trabalho em
//! `fields` (as colunas do CSV de ingestão viram chaves deste mapa).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

use super::require_id;
use crate::error::Result;

/// Representa uma tarefa Surge
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    /// ID atribuído pelo servidor
    pub id: String,

    /// ID do projeto dono da tarefa
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_id: Option<String>,

    /// Dados da tarefa (cabeçalho do CSV → valor da célula)
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub fields: Map<String, Value>,

    /// Tarefa já concluída?
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_complete: Option<bool>,

    /// Data de criação (ISO-8601)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl Task {
    /// Constrói uma tarefa a partir de um payload do servidor
    ///
    /// Falha com `MissingId` se o payload não trouxer `id`.
    pub fn from_value(value: Value) -> Result<Self> {
        require_id(&value)?;
        Ok(serde_json::from_value(value)?)
    }
}

impl fmt::Display for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "surge.Task#{}", self.id)
    }
}
