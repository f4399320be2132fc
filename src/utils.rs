//! Utilitários de carga de dados
//!
//! Leitura assíncrona de CSVs locais no formato esperado pela criação em
//! lote de tasks: primeira linha são os nomes de campo, cada linha seguinte
//! vira um mapa campo → valor.

use csv_async::AsyncReaderBuilder;
use futures_util::StreamExt;
use std::collections::HashMap;
use std::path::Path;

use crate::error::{Result, SurgeError};

/// Carrega linhas de um CSV como mapas campo → valor
///
/// A primeira linha é tratada como cabeçalho. O pareamento com as linhas de
/// dados é posicional: valores além do número de colunas do cabeçalho são
/// descartados, e linhas curtas produzem mapas sem as chaves restantes.
///
/// # Erros
///
/// Retorna `InvalidCsv` para arquivo vazio ou cabeçalho sem colunas, e
/// propaga erros de I/O e de parsing do CSV.
pub async fn load_tasks_data_from_csv(
    path: impl AsRef<Path>,
) -> Result<Vec<HashMap<String, String>>> {
    let path = path.as_ref();
    let file = tokio::fs::File::open(path).await?;

    // Cabeçalho lido manualmente para distinguir "arquivo vazio" de
    // "arquivo sem linhas de dados"
    let mut reader = AsyncReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .create_reader(file);
    let mut records = reader.records();

    let headers = match records.next().await {
        Some(record) => record?,
        None => {
            return Err(SurgeError::InvalidCsv(format!(
                "CSV file {} is empty",
                path.display()
            )))
        }
    };
    if headers.is_empty() || headers.iter().all(|h| h.is_empty()) {
        return Err(SurgeError::InvalidCsv(format!(
            "CSV file {} has no columns in the header row",
            path.display()
        )));
    }
    let headers: Vec<String> = headers.iter().map(str::to_string).collect();

    let mut rows = Vec::new();
    while let Some(record) = records.next().await {
        let record = record?;
        let mut row = HashMap::with_capacity(headers.len());
        for (i, header) in headers.iter().enumerate() {
            if let Some(value) = record.get(i) {
                row.insert(header.clone(), value.to_string());
            }
        }
        rows.push(row);
    }

    tracing::debug!("Loaded {} rows from {}", rows.len(), path.display());
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn csv_file(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[tokio::test]
    async fn test_load_rows() {
        let file = csv_file("question,answer\nWhat is 2+2?,4\nCapital of France?,Paris\n");

        let rows = load_tasks_data_from_csv(file.path()).await.unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0]["question"], "What is 2+2?");
        assert_eq!(rows[0]["answer"], "4");
        assert_eq!(rows[1]["question"], "Capital of France?");
        assert_eq!(rows[1]["answer"], "Paris");
    }

    #[tokio::test]
    async fn test_header_only_file_yields_no_rows() {
        let file = csv_file("question,answer\n");

        let rows = load_tasks_data_from_csv(file.path()).await.unwrap();

        assert!(rows.is_empty());
    }

    #[tokio::test]
    async fn test_empty_file_is_invalid() {
        let file = csv_file("");

        let err = load_tasks_data_from_csv(file.path()).await.unwrap_err();

        match err {
            SurgeError::InvalidCsv(msg) => assert!(msg.contains("empty")),
            other => panic!("expected InvalidCsv, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_long_row_is_truncated_to_headers() {
        let file = csv_file("a,b\n1,2,3\n");

        let rows = load_tasks_data_from_csv(file.path()).await.unwrap();

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].len(), 2);
        assert_eq!(rows[0]["a"], "1");
        assert_eq!(rows[0]["b"], "2");
    }

    #[tokio::test]
    async fn test_short_row_omits_missing_columns() {
        let file = csv_file("a,b\n1\n");

        let rows = load_tasks_data_from_csv(file.path()).await.unwrap();

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].len(), 1);
        assert_eq!(rows[0]["a"], "1");
        assert!(!rows[0].contains_key("b"));
    }

    #[tokio::test]
    async fn test_missing_file_is_io_error() {
        let err = load_tasks_data_from_csv("/nonexistent/tasks.csv")
            .await
            .unwrap_err();

        assert!(matches!(err, SurgeError::Io(_)));
    }
}
