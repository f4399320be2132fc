//! Tipos de entidade da API Surge
//!
//! Cada entidade é um snapshot imutável do estado do servidor no momento da
//! última leitura/mutação bem-sucedida. A lista de campos é fixa e tipada;
//! timestamps ISO-8601 são parseados para `DateTime<Utc>` na construção.

mod project;
mod task;
mod team;

pub use project::Project;
pub use task::Task;
pub use team::Team;

use crate::error::{Result, SurgeError};
use serde_json::Value;

/// Valida que o payload traz o campo `id` antes de desserializar
///
/// Validação local, anterior a qualquer desserialização: a ausência do id é
/// um `MissingId`, distinto dos erros de transporte.
pub(crate) fn require_id(value: &Value) -> Result<()> {
    match value.get("id") {
        Some(id) if !id.is_null() => Ok(()),
        _ => Err(SurgeError::MissingId),
    }
}
