//! Tipos de erro para o crate surge

use thiserror::Error;

/// Erros do cliente Surge
#[derive(Debug, Error)]
pub enum SurgeError {
    /// Nenhuma API key utilizável (nem explícita, nem configurada)
    #[error("No Surge API key available. Set SURGE_API_KEY or pass one explicitly")]
    MissingApiKey,

    /// Chamada mal formada (arquivo em método errado, verbo HTTP não suportado)
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Qualquer falha de transporte/HTTP. A mensagem inclui o corpo da
    /// resposta quando disponível; o erro de baixo nível é descartado.
    #[error("Surge request failed: {0}")]
    RequestFailed(String),

    /// Payload de entidade sem o campo `id` obrigatório
    #[error("Surge resource payload is missing the required 'id' field")]
    MissingId,

    /// Job de relatório reportou um status desconhecido
    #[error("Report returned unexpected status: {0}")]
    InvalidState(String),

    /// Relatório não ficou pronto dentro de max_wait
    #[error("Report failed to generate within {seconds} seconds")]
    Timeout { seconds: u64 },

    /// CSV vazio ou cabeçalho sem colunas
    #[error("Invalid CSV input: {0}")]
    InvalidCsv(String),

    /// Erro de configuração (construção do client HTTP)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Erro de parsing JSON fora do transporte
    #[error("JSON parsing failed: {0}")]
    Json(#[from] serde_json::Error),

    /// Erro de leitura do CSV
    #[error("CSV parsing failed: {0}")]
    Csv(#[from] csv_async::Error),

    /// Erro de I/O (spool temporário, escrita do artefato final)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Tipo Result padrão para o crate
pub type Result<T> = std::result::Result<T, SurgeError>;
