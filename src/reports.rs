//! Exportação de relatórios Surge
//!
//! Relatórios são gerados de forma assíncrona pelo servidor. O fluxo é uma
//! pequena máquina de estados observada por polling:
//!
//! 1. `GET /projects/{id}/report?type=..` devolve o status do job
//! 2. `CREATING`: aguarda `poll_interval` (suspensão cooperativa) e repete,
//!    até no máximo `max_wait`
//! 3. `READY`: o payload traz uma URL assinada (possivelmente em outro
//!    host); o corpo gzip é baixado em streaming para um arquivo temporário,
//!    descomprimido e entregue ao sink
//! 4. qualquer outro status é erro
//!
//! O arquivo temporário é removido ao sair do escopo da operação, com ou
//! sem sucesso.

use flate2::read::GzDecoder;
use futures_util::StreamExt;
use serde::Deserialize;
use serde_json::{json, Value};
use std::io::{Read, Write};
use std::path::Path;
use std::time::Duration;
use tempfile::NamedTempFile;

use crate::client::SurgeClient;
use crate::error::{Result, SurgeError};
use crate::projects::PROJECTS_ENDPOINT;

/// Intervalo padrão entre checagens de status
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(2);

/// Status de job reportado pelo servidor
const STATUS_CREATING: &str = "CREATING";
const STATUS_READY: &str = "READY";

/// Destino dos bytes descomprimidos do relatório
pub enum ReportSink<'a> {
    /// Arquivo no filesystem local (fechado em todos os caminhos de saída)
    File(&'a Path),

    /// Buffer em memória fornecido pelo chamador
    Buffer(&'a mut Vec<u8>),
}

/// Resposta da checagem de status do relatório
#[derive(Debug, Deserialize)]
struct ReportStatus {
    status: String,

    /// URL assinada de download (presente quando READY)
    #[serde(default)]
    url: Option<String>,

    /// Validade da URL assinada em segundos
    #[serde(default)]
    expires_in_seconds: Option<u64>,

    /// ID do job de geração (presente enquanto CREATING)
    #[serde(default)]
    job_id: Option<String>,
}

/// Gerenciador de relatórios Surge
#[derive(Clone)]
pub struct ReportManager {
    client: SurgeClient,
}

impl ReportManager {
    /// Cria um gerenciador sobre um cliente já configurado
    pub fn new(client: SurgeClient) -> Self {
        Self { client }
    }

    /// Gera (se necessário) e salva um relatório do projeto no sink
    ///
    /// Faz polling do job até `READY`, baixa o resultado comprimido em
    /// streaming e entrega os bytes descomprimidos.
    ///
    /// # Erros
    ///
    /// - `Timeout`: o job seguiu `CREATING` além de `max_wait` (checado no
    ///   topo de cada iteração, nunca interrompendo uma requisição em voo)
    /// - `InvalidState`: status desconhecido (e.g. `ERROR`)
    /// - `RequestFailed`: falha na checagem ou no download
    pub async fn save_report(
        &self,
        project_id: &str,
        report_type: &str,
        sink: ReportSink<'_>,
        poll_interval: Duration,
        max_wait: Duration,
    ) -> Result<()> {
        let endpoint = format!("{}/{}/report", PROJECTS_ENDPOINT, project_id);
        let params = json!({ "type": report_type });
        let mut waited = Duration::ZERO;

        let report = loop {
            let response = self.client.get(&endpoint, Some(&params), None).await?;
            let report: ReportStatus = serde_json::from_value(response)?;

            match report.status.as_str() {
                STATUS_READY => break report,
                STATUS_CREATING => {
                    if waited + poll_interval > max_wait {
                        return Err(SurgeError::Timeout {
                            seconds: max_wait.as_secs(),
                        });
                    }
                    tracing::debug!(
                        "Report job {:?} for project {} still creating, waiting {:?}",
                        report.job_id,
                        project_id,
                        poll_interval
                    );
                    tokio::time::sleep(poll_interval).await;
                    waited += poll_interval;
                }
                other => return Err(SurgeError::InvalidState(other.to_string())),
            }
        };

        let url = report.url.ok_or_else(|| {
            SurgeError::RequestFailed(
                "Report READY response did not include a download url".to_string(),
            )
        })?;
        tracing::debug!(
            "Report ready for project {} (url expires in {:?}s)",
            project_id,
            report.expires_in_seconds
        );

        let bytes = self.download_and_inflate(&url).await?;

        match sink {
            ReportSink::File(path) => tokio::fs::write(path, &bytes).await?,
            ReportSink::Buffer(buffer) => buffer.extend_from_slice(&bytes),
        }

        Ok(())
    }

    /// Baixa um relatório e devolve o conteúdo decodificado como JSON
    ///
    /// Conveniência sobre `save_report` com sink em memória. Arrays vazios
    /// são saída válida.
    pub async fn download_json(
        &self,
        project_id: &str,
        report_type: &str,
        poll_interval: Duration,
        max_wait: Duration,
    ) -> Result<Value> {
        let mut buffer = Vec::new();
        self.save_report(
            project_id,
            report_type,
            ReportSink::Buffer(&mut buffer),
            poll_interval,
            max_wait,
        )
        .await?;
        Ok(serde_json::from_slice(&buffer)?)
    }

    /// Baixa o corpo comprimido em streaming para um arquivo temporário e
    /// descomprime tudo em memória
    ///
    /// O corpo comprimido nunca é bufferizado inteiro: cada chunk vai
    /// direto para o spool em disco.
    async fn download_and_inflate(&self, url: &str) -> Result<Vec<u8>> {
        tracing::info!("📥 Downloading report from signed url");

        let response = self
            .client
            .http()
            .get(url)
            .send()
            .await
            .map_err(|e| SurgeError::RequestFailed(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SurgeError::RequestFailed(format!(
                "Report download failed with HTTP status {}. {}",
                status.as_u16(),
                body
            )));
        }

        // Removido no drop, em qualquer caminho de saída
        let mut spool = NamedTempFile::new()?;
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(|e| {
                SurgeError::RequestFailed(format!("Report download interrupted: {}", e))
            })?;
            spool.write_all(&chunk)?;
        }
        spool.flush()?;

        let mut decoder = GzDecoder::new(spool.reopen()?);
        let mut bytes = Vec::new();
        decoder.read_to_end(&mut bytes)?;
        Ok(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SurgeConfig;
    use flate2::write::GzEncoder;
    use flate2::Compression;
    use httpmock::prelude::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Instant;

    fn manager(base_url: &str) -> ReportManager {
        let client =
            SurgeClient::new(SurgeConfig::new("test-api-key").with_base_url(base_url)).unwrap();
        ReportManager::new(client)
    }

    fn gzip(bytes: &[u8]) -> Vec<u8> {
        let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(bytes).unwrap();
        encoder.finish().unwrap()
    }

    async fn mock_ready_report(server: &MockServer, payload: &[u8]) {
        let download_url = server.url("/report-download");
        server
            .mock_async(move |when, then| {
                when.method(GET)
                    .path("/projects/proj123/report")
                    .query_param("type", "export_json");
                then.status(200).json_body(serde_json::json!({
                    "status": "READY",
                    "url": download_url,
                    "expires_in_seconds": 3600
                }));
            })
            .await;
        let compressed = gzip(payload);
        server
            .mock_async(move |when, then| {
                when.method(GET).path("/report-download");
                then.status(200).body(compressed);
            })
            .await;
    }

    #[tokio::test]
    async fn test_save_report_to_buffer() {
        let server = MockServer::start_async().await;
        mock_ready_report(&server, b"[{\"id\":\"1\"}]").await;

        let mut buffer = Vec::new();
        manager(&server.base_url())
            .save_report(
                "proj123",
                "export_json",
                ReportSink::Buffer(&mut buffer),
                Duration::from_millis(10),
                Duration::from_secs(10),
            )
            .await
            .unwrap();

        assert_eq!(buffer, b"[{\"id\":\"1\"}]");
    }

    #[tokio::test]
    async fn test_save_report_to_file() {
        let server = MockServer::start_async().await;
        mock_ready_report(&server, b"decompressed data").await;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.json");
        manager(&server.base_url())
            .save_report(
                "proj123",
                "export_json",
                ReportSink::File(&path),
                Duration::from_millis(10),
                Duration::from_secs(10),
            )
            .await
            .unwrap();

        let written = std::fs::read(&path).unwrap();
        assert_eq!(written, b"decompressed data");
    }

    // Compartilhado pelos matchers do teste de sequenciamento; os matchers
    // de httpmock são ponteiros de função, então o estado precisa ser global
    static STATUS_CHECKS: AtomicUsize = AtomicUsize::new(0);

    #[tokio::test]
    async fn test_creating_then_ready_polls_once() {
        let server = MockServer::start_async().await;

        let creating = server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/projects/proj123/report")
                    .matches(|_req| {
                        STATUS_CHECKS
                            .compare_exchange(0, 1, Ordering::SeqCst, Ordering::SeqCst)
                            .is_ok()
                    });
                then.status(200).json_body(serde_json::json!({
                    "status": "CREATING",
                    "job_id": "job123"
                }));
            })
            .await;

        let download_url = server.url("/report-download");
        let ready = server
            .mock_async(move |when, then| {
                when.method(GET)
                    .path("/projects/proj123/report")
                    .matches(|_req| STATUS_CHECKS.load(Ordering::SeqCst) > 0);
                then.status(200).json_body(serde_json::json!({
                    "status": "READY",
                    "url": download_url,
                    "expires_in_seconds": 3600
                }));
            })
            .await;

        let compressed = gzip(b"[]");
        server
            .mock_async(move |when, then| {
                when.method(GET).path("/report-download");
                then.status(200).body(compressed);
            })
            .await;

        let poll_interval = Duration::from_millis(100);
        let start = Instant::now();
        let result = manager(&server.base_url())
            .download_json("proj123", "export_json", poll_interval, Duration::from_secs(10))
            .await
            .unwrap();

        // Exatamente duas checagens de status, com uma espera entre elas
        assert_eq!(creating.hits_async().await, 1);
        assert_eq!(ready.hits_async().await, 1);
        assert!(start.elapsed() >= poll_interval);
        assert_eq!(result, serde_json::json!([]));
    }

    #[tokio::test]
    async fn test_timeout_when_stuck_creating() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET).path("/projects/proj123/report");
                then.status(200).json_body(serde_json::json!({
                    "status": "CREATING",
                    "job_id": "job123"
                }));
            })
            .await;

        let err = manager(&server.base_url())
            .save_report(
                "proj123",
                "export_json",
                ReportSink::Buffer(&mut Vec::new()),
                Duration::from_secs(2),
                Duration::from_secs(2),
            )
            .await
            .unwrap_err();

        assert_eq!(
            err.to_string(),
            "Report failed to generate within 2 seconds"
        );
        // Primeira checagem espera, segunda estoura o limite
        assert_eq!(mock.hits_async().await, 2);
    }

    #[tokio::test]
    async fn test_unrecognized_status_is_invalid_state() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/projects/proj123/report");
                then.status(200)
                    .json_body(serde_json::json!({"status": "ERROR"}));
            })
            .await;

        let err = manager(&server.base_url())
            .save_report(
                "proj123",
                "export_json",
                ReportSink::Buffer(&mut Vec::new()),
                Duration::from_millis(10),
                Duration::from_secs(1),
            )
            .await
            .unwrap_err();

        match err {
            SurgeError::InvalidState(status) => assert_eq!(status, "ERROR"),
            other => panic!("expected InvalidState, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_download_json_empty_array() {
        let server = MockServer::start_async().await;
        mock_ready_report(&server, b"[]").await;

        let result = manager(&server.base_url())
            .download_json(
                "proj123",
                "export_json",
                DEFAULT_POLL_INTERVAL,
                Duration::from_secs(10),
            )
            .await
            .unwrap();

        assert_eq!(result, serde_json::json!([]));
    }

    #[tokio::test]
    async fn test_download_json_round_trip() {
        let server = MockServer::start_async().await;
        let payload = serde_json::json!([
            {"id": "1", "val": 1},
            {"id": "2", "val": 2}
        ]);
        mock_ready_report(&server, payload.to_string().as_bytes()).await;

        let result = manager(&server.base_url())
            .download_json(
                "proj123",
                "export_json",
                Duration::from_millis(10),
                Duration::from_secs(10),
            )
            .await
            .unwrap();

        assert_eq!(result, payload);
    }
}
