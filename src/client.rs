//! Cliente HTTP para a API Surge
//!
//! Todas as operações do crate passam por aqui: uma única rotina de
//! dispatch autenticada (HTTP Basic, API key como username e senha vazia)
//! que devolve o JSON decodificado ou um `SurgeError` unificado.

use crate::config::SurgeConfig;
use crate::error::{Result, SurgeError};
use reqwest::{Client as HttpClient, Method};
use serde_json::Value;
use std::time::Duration;

/// Arquivo a ser enviado via multipart (somente POST)
#[derive(Debug, Clone)]
pub struct FileUpload {
    /// Nome do campo no form multipart
    pub field_name: String,

    /// Nome do arquivo reportado ao servidor
    pub file_name: String,

    /// MIME type (opcional; o servidor infere se ausente)
    pub mime_type: Option<String>,

    /// Conteúdo do arquivo
    pub bytes: Vec<u8>,
}

impl FileUpload {
    /// Cria um upload com o campo padrão `file`
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            field_name: "file".to_string(),
            file_name: file_name.into(),
            mime_type: None,
            bytes,
        }
    }

    /// Builder: nome do campo no form
    pub fn with_field_name(mut self, field_name: impl Into<String>) -> Self {
        self.field_name = field_name.into();
        self
    }

    /// Builder: MIME type do arquivo
    pub fn with_mime_type(mut self, mime_type: impl Into<String>) -> Self {
        self.mime_type = Some(mime_type.into());
        self
    }
}

/// Cliente para interagir com a API Surge
///
/// O pool de conexões é criado uma vez na construção e compartilhado entre
/// todos os clones (managers clonam o cliente à vontade). Autenticação por
/// requisição: a API key explícita tem prioridade sobre a configurada.
///
/// # Timeouts
///
/// - Total: 30s
/// - Connect: 5s
#[derive(Clone)]
pub struct SurgeClient {
    http_client: HttpClient,
    config: SurgeConfig,
}

impl SurgeClient {
    /// Cria um novo cliente Surge a partir de uma configuração explícita
    pub fn new(config: SurgeConfig) -> Result<Self> {
        let http_client = HttpClient::builder()
            .timeout(Duration::from_secs(30))
            .connect_timeout(Duration::from_secs(5))
            .build()
            .map_err(|e| SurgeError::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            http_client,
            config,
        })
    }

    /// Cria um cliente com a configuração resolvida do ambiente
    /// (`SURGE_API_KEY`, `SURGE_BASE_URL`)
    pub fn from_env() -> Result<Self> {
        Self::new(SurgeConfig::from_env())
    }

    /// Obtém a base URL configurada
    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    /// Obtém a configuração
    pub fn config(&self) -> &SurgeConfig {
        &self.config
    }

    /// Pool HTTP compartilhado (downloads de relatório usam URLs assinadas
    /// fora da base URL, sem autenticação)
    pub(crate) fn http(&self) -> &HttpClient {
        &self.http_client
    }

    /// Constrói a URL completa para um endpoint relativo
    fn build_url(&self, endpoint: &str) -> String {
        let endpoint = endpoint.trim_start_matches('/');
        format!("{}/{}", self.config.base_url.trim_end_matches('/'), endpoint)
    }

    /// Resolve a API key: argumento explícito > configuração
    fn resolve_api_key<'a>(&'a self, override_key: Option<&'a str>) -> Result<&'a str> {
        override_key
            .or(self.config.api_key.as_deref())
            .ok_or(SurgeError::MissingApiKey)
    }

    /// Executa uma requisição autenticada e decodifica a resposta JSON
    ///
    /// Validações locais (antes de qualquer I/O de rede):
    /// - API key resolvível, senão `MissingApiKey`
    /// - arquivo só em POST, senão `InvalidRequest`
    /// - método dentro de GET/POST/PUT/DELETE, senão `InvalidRequest`
    ///
    /// Falhas de transporte, status não-2xx e corpo não decodificável
    /// viram `RequestFailed` com o corpo da resposta na mensagem.
    pub async fn request(
        &self,
        method: Method,
        endpoint: &str,
        params: Option<&Value>,
        file: Option<FileUpload>,
        api_key: Option<&str>,
    ) -> Result<Value> {
        let api_key = self.resolve_api_key(api_key)?;

        if file.is_some() && method != Method::POST {
            return Err(SurgeError::InvalidRequest(
                "Can only upload files to a POST request".to_string(),
            ));
        }

        let mut url = self.build_url(endpoint);

        let request = if method == Method::GET {
            if let Some(params) = params {
                let query = build_query(params);
                if !query.is_empty() {
                    url = format!("{}?{}", url, query);
                }
            }
            tracing::debug!("GET {}", url);
            self.http_client.get(&url)
        } else if method == Method::POST {
            tracing::debug!("POST {}", url);
            if let Some(file) = file {
                self.http_client
                    .post(&url)
                    .multipart(build_multipart(file, params)?)
            } else {
                let mut builder = self.http_client.post(&url);
                if let Some(params) = params {
                    builder = builder.json(params);
                }
                builder
            }
        } else if method == Method::PUT {
            tracing::debug!("PUT {}", url);
            let mut builder = self.http_client.put(&url);
            if let Some(params) = params {
                builder = builder.json(params);
            }
            builder
        } else if method == Method::DELETE {
            tracing::debug!("DELETE {}", url);
            self.http_client.delete(&url)
        } else {
            return Err(SurgeError::InvalidRequest(format!(
                "Unsupported HTTP method: {}",
                method
            )));
        };

        let response = request
            .basic_auth(api_key, Some(""))
            .send()
            .await
            .map_err(|e| SurgeError::RequestFailed(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| SurgeError::RequestFailed(format!("Failed to read response body: {}", e)))?;

        if !status.is_success() {
            tracing::error!("Surge API error ({}): {}", status.as_u16(), body);
            return Err(SurgeError::RequestFailed(format!(
                "HTTP status {}. {}",
                status.as_u16(),
                body
            )));
        }

        serde_json::from_str(&body).map_err(|e| {
            SurgeError::RequestFailed(format!("Failed to decode response JSON: {}. {}", e, body))
        })
    }

    /// Executa uma requisição GET (params viram query string)
    pub async fn get(
        &self,
        endpoint: &str,
        params: Option<&Value>,
        api_key: Option<&str>,
    ) -> Result<Value> {
        self.request(Method::GET, endpoint, params, None, api_key)
            .await
    }

    /// Executa uma requisição POST com corpo JSON
    pub async fn post(
        &self,
        endpoint: &str,
        params: Option<&Value>,
        api_key: Option<&str>,
    ) -> Result<Value> {
        self.request(Method::POST, endpoint, params, None, api_key)
            .await
    }

    /// Executa uma requisição POST multipart com arquivo anexado
    pub async fn post_file(
        &self,
        endpoint: &str,
        file: FileUpload,
        params: Option<&Value>,
        api_key: Option<&str>,
    ) -> Result<Value> {
        self.request(Method::POST, endpoint, params, Some(file), api_key)
            .await
    }

    /// Executa uma requisição PUT com corpo JSON
    pub async fn put(
        &self,
        endpoint: &str,
        params: Option<&Value>,
        api_key: Option<&str>,
    ) -> Result<Value> {
        self.request(Method::PUT, endpoint, params, None, api_key)
            .await
    }

    /// Executa uma requisição DELETE
    pub async fn delete(&self, endpoint: &str, api_key: Option<&str>) -> Result<Value> {
        self.request(Method::DELETE, endpoint, None, None, api_key)
            .await
    }
}

/// Serializa um objeto JSON como query string (valores nulos são omitidos)
fn build_query(params: &Value) -> String {
    let mut pairs = Vec::new();

    if let Value::Object(map) = params {
        for (key, value) in map {
            if value.is_null() {
                continue;
            }
            let raw = match value {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            };
            pairs.push(format!(
                "{}={}",
                urlencoding::encode(key),
                urlencoding::encode(&raw)
            ));
        }
    }

    pairs.join("&")
}

/// Monta o form multipart: parte de arquivo + params como campos de texto
fn build_multipart(
    file: FileUpload,
    params: Option<&Value>,
) -> Result<reqwest::multipart::Form> {
    let mut part = reqwest::multipart::Part::bytes(file.bytes).file_name(file.file_name);
    if let Some(mime) = &file.mime_type {
        part = part
            .mime_str(mime)
            .map_err(|e| SurgeError::InvalidRequest(format!("Invalid MIME type: {}", e)))?;
    }

    let mut form = reqwest::multipart::Form::new().part(file.field_name, part);

    if let Some(Value::Object(map)) = params {
        for (key, value) in map {
            if value.is_null() {
                continue;
            }
            let raw = match value {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            };
            form = form.text(key.clone(), raw);
        }
    }

    Ok(form)
}
