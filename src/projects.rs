//! Gerenciamento de projetos Surge
//!
//! CRUD de projetos mais a criação em lote de tarefas (inclusive a partir
//! de um CSV local, via `utils::load_tasks_data_from_csv`).

use serde::Serialize;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::path::Path;

use crate::client::SurgeClient;
use crate::error::{Result, SurgeError};
use crate::types::{Project, Task};
use crate::utils::load_tasks_data_from_csv;

pub(crate) const PROJECTS_ENDPOINT: &str = "projects";

/// Payload para criar um novo projeto
#[derive(Debug, Clone, Serialize)]
pub struct CreateProjectRequest {
    /// Nome do projeto (obrigatório)
    pub name: String,

    /// Instruções exibidas aos trabalhadores
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instructions: Option<String>,

    /// Número de trabalhadores por tarefa
    #[serde(skip_serializing_if = "Option::is_none")]
    pub num_workers_per_task: Option<u32>,
}

impl CreateProjectRequest {
    /// Cria um request com apenas o nome
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            instructions: None,
            num_workers_per_task: None,
        }
    }

    /// Builder: define as instruções
    pub fn with_instructions(mut self, instructions: impl Into<String>) -> Self {
        self.instructions = Some(instructions.into());
        self
    }

    /// Builder: define o número de trabalhadores por tarefa
    pub fn with_num_workers_per_task(mut self, num_workers: u32) -> Self {
        self.num_workers_per_task = Some(num_workers);
        self
    }
}

/// Gerenciador de projetos Surge
///
/// Clonável; todos os clones compartilham o pool HTTP do `SurgeClient`.
#[derive(Clone)]
pub struct ProjectManager {
    client: SurgeClient,
}

impl ProjectManager {
    /// Cria um gerenciador sobre um cliente já configurado
    pub fn new(client: SurgeClient) -> Self {
        Self { client }
    }

    /// Cria um novo projeto
    ///
    /// `POST /projects`
    pub async fn create(&self, request: &CreateProjectRequest) -> Result<Project> {
        tracing::debug!("Creating Surge project '{}'", request.name);
        let params = serde_json::to_value(request)?;
        let response = self
            .client
            .post(PROJECTS_ENDPOINT, Some(&params), None)
            .await?;
        Project::from_value(response)
    }

    /// Lista os projetos da conta
    ///
    /// `GET /projects`
    pub async fn list(&self) -> Result<Vec<Project>> {
        let response = self.client.get(PROJECTS_ENDPOINT, None, None).await?;
        parse_project_list(response)
    }

    /// Busca um projeto pelo ID
    ///
    /// `GET /projects/{id}`
    pub async fn retrieve(&self, project_id: &str) -> Result<Project> {
        let endpoint = format!("{}/{}", PROJECTS_ENDPOINT, project_id);
        let response = self.client.get(&endpoint, None, None).await?;
        Project::from_value(response)
    }

    /// Atualiza um projeto; o servidor devolve o snapshot completo
    ///
    /// `PUT /projects/{id}`
    pub async fn update(&self, project_id: &str, fields: &Value) -> Result<Project> {
        let endpoint = format!("{}/{}", PROJECTS_ENDPOINT, project_id);
        let response = self.client.put(&endpoint, Some(fields), None).await?;
        Project::from_value(response)
    }

    /// Remove um projeto, devolvendo o payload bruto de sucesso
    ///
    /// `DELETE /projects/{id}`
    pub async fn delete(&self, project_id: &str) -> Result<Value> {
        let endpoint = format!("{}/{}", PROJECTS_ENDPOINT, project_id);
        self.client.delete(&endpoint, None).await
    }

    /// Cria tarefas em lote dentro de um projeto
    ///
    /// `POST /projects/{id}/tasks`
    ///
    /// Cada mapa vira o `fields` de uma tarefa criada no servidor.
    pub async fn create_tasks(
        &self,
        project_id: &str,
        tasks_data: &[HashMap<String, String>],
    ) -> Result<Vec<Task>> {
        tracing::info!(
            "📋 Creating {} tasks in project {}",
            tasks_data.len(),
            project_id
        );
        let endpoint = format!("{}/{}/tasks", PROJECTS_ENDPOINT, project_id);
        let params = json!({ "tasks": tasks_data });
        let response = self.client.post(&endpoint, Some(&params), None).await?;

        let items = expect_array(response, "tasks")?;
        items.into_iter().map(Task::from_value).collect()
    }

    /// Cria tarefas em lote a partir de um CSV local
    ///
    /// A primeira linha do CSV fornece os nomes dos campos.
    pub async fn create_tasks_from_csv(
        &self,
        project_id: &str,
        csv_path: impl AsRef<Path>,
    ) -> Result<Vec<Task>> {
        let tasks_data = load_tasks_data_from_csv(csv_path).await?;
        self.create_tasks(project_id, &tasks_data).await
    }
}

fn parse_project_list(response: Value) -> Result<Vec<Project>> {
    let items = expect_array(response, "projects")?;
    items.into_iter().map(Project::from_value).collect()
}

/// Exige que a resposta seja um array JSON
pub(crate) fn expect_array(response: Value, what: &str) -> Result<Vec<Value>> {
    match response {
        Value::Array(items) => Ok(items),
        other => Err(SurgeError::RequestFailed(format!(
            "Expected a JSON array of {}, got: {}",
            what, other
        ))),
    }
}
