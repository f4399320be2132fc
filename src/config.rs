//! Configuração do cliente Surge
//!
//! A API key e a base URL vêm das variáveis de ambiente `SURGE_API_KEY` e
//! `SURGE_BASE_URL`, com override explícito via builder. Nenhum estado
//! global: a configuração é um valor passado ao `SurgeClient` na construção.

/// Base URL padrão da API Surge
pub const DEFAULT_BASE_URL: &str = "https://app.surgehq.ai/api";

/// Variável de ambiente com a API key
pub const API_KEY_ENV_VAR: &str = "SURGE_API_KEY";

/// Variável de ambiente com a base URL
pub const BASE_URL_ENV_VAR: &str = "SURGE_BASE_URL";

/// Credenciais e endereçamento da API Surge
#[derive(Debug, Clone)]
pub struct SurgeConfig {
    /// API key (username do HTTP Basic auth; a senha é vazia)
    pub api_key: Option<String>,

    /// Base URL da API (sem barra final)
    pub base_url: String,
}

impl SurgeConfig {
    /// Cria uma configuração com API key explícita e base URL padrão
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Some(api_key.into()),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Resolve a configuração a partir do ambiente
    ///
    /// - `SURGE_API_KEY`: API key (opcional aqui; a ausência só falha na
    ///   primeira requisição)
    /// - `SURGE_BASE_URL`: base URL (default `https://app.surgehq.ai/api`)
    pub fn from_env() -> Self {
        Self {
            api_key: std::env::var(API_KEY_ENV_VAR).ok(),
            base_url: std::env::var(BASE_URL_ENV_VAR)
                .unwrap_or_else(|_| DEFAULT_BASE_URL.to_string()),
        }
    }

    /// Builder: substitui a base URL (útil para testes e sandboxes)
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Builder: substitui a API key
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }
}

impl Default for SurgeConfig {
    fn default() -> Self {
        Self::from_env()
    }
}
