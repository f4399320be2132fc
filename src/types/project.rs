//! Projeto Surge
//!
//! Um projeto agrupa tarefas e define as instruções de trabalho. Campos
//! espelham os atributos de criação retornados pelo servidor.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

use super::require_id;
use crate::error::Result;

/// Representa um projeto Surge
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    /// ID atribuído pelo servidor
    pub id: String,

    /// Nome do projeto
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Instruções exibidas aos trabalhadores
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instructions: Option<String>,

    /// Status do projeto (e.g., "in_progress", "paused", "completed")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,

    /// Data de criação (ISO-8601)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,

    /// Número de tarefas do projeto
    #[serde(skip_serializing_if = "Option::is_none")]
    pub num_tasks: Option<u64>,
}

impl Project {
    /// Constrói um projeto a partir de um payload do servidor
    ///
    /// Falha com `MissingId` se o payload não trouxer `id`.
    pub fn from_value(value: Value) -> Result<Self> {
        require_id(&value)?;
        Ok(serde_json::from_value(value)?)
    }
}

impl fmt::Display for Project {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "surge.Project#{}", self.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SurgeError;
    use serde_json::json;

    fn project_payload() -> Value {
        json!({
            "id": "proj123",
            "name": "Labeling Project",
            "instructions": "Label the data",
            "status": "in_progress",
            "created_at": "2025-04-21T10:15:02Z",
            "num_tasks": 42
        })
    }

    #[test]
    fn test_from_value() {
        let project = Project::from_value(project_payload()).unwrap();
        assert_eq!(project.id, "proj123");
        assert_eq!(project.name.as_deref(), Some("Labeling Project"));
        assert_eq!(project.status.as_deref(), Some("in_progress"));
        assert_eq!(project.num_tasks, Some(42));

        let created_at = project.created_at.unwrap();
        assert_eq!(created_at.to_rfc3339(), "2025-04-21T10:15:02+00:00");
    }

    #[test]
    fn test_from_value_missing_id() {
        let err = Project::from_value(json!({"name": "No id"})).unwrap_err();
        assert!(matches!(err, SurgeError::MissingId));
    }

    #[test]
    fn test_display() {
        let project = Project::from_value(project_payload()).unwrap();
        assert_eq!(project.to_string(), "surge.Project#proj123");
    }
}
