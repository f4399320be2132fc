//! Gerenciamento de tarefas Surge
//!
//! CRUD de tarefas individuais. Criação em lote vive em
//! `ProjectManager::create_tasks`, que é o caminho usado pela ingestão de
//! CSV.

use serde::Serialize;
use serde_json::{json, Map, Value};

use crate::client::SurgeClient;
use crate::error::Result;
use crate::projects::expect_array;
use crate::types::Task;

pub(crate) const TASKS_ENDPOINT: &str = "tasks";

/// Payload para criar uma tarefa avulsa
#[derive(Debug, Clone, Serialize)]
pub struct CreateTaskRequest {
    /// Projeto dono da tarefa (obrigatório)
    pub project_id: String,

    /// Dados da tarefa (chave → valor exibido ao trabalhador)
    #[serde(skip_serializing_if = "Map::is_empty")]
    pub fields: Map<String, Value>,
}

impl CreateTaskRequest {
    /// Cria um request vazio para o projeto
    pub fn new(project_id: impl Into<String>) -> Self {
        Self {
            project_id: project_id.into(),
            fields: Map::new(),
        }
    }

    /// Builder: adiciona um campo de dados
    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(key.into(), value.into());
        self
    }
}

/// Gerenciador de tarefas Surge
#[derive(Clone)]
pub struct TaskManager {
    client: SurgeClient,
}

impl TaskManager {
    /// Cria um gerenciador sobre um cliente já configurado
    pub fn new(client: SurgeClient) -> Self {
        Self { client }
    }

    /// Cria uma tarefa avulsa
    ///
    /// `POST /tasks`
    pub async fn create(&self, request: &CreateTaskRequest) -> Result<Task> {
        tracing::debug!("Creating Surge task in project {}", request.project_id);
        let params = serde_json::to_value(request)?;
        let response = self.client.post(TASKS_ENDPOINT, Some(&params), None).await?;
        Task::from_value(response)
    }

    /// Lista tarefas, opcionalmente filtrando por projeto
    ///
    /// `GET /tasks[?project_id=..]`
    pub async fn list(&self, project_id: Option<&str>) -> Result<Vec<Task>> {
        let params = project_id.map(|id| json!({ "project_id": id }));
        let response = self
            .client
            .get(TASKS_ENDPOINT, params.as_ref(), None)
            .await?;
        let items = expect_array(response, "tasks")?;
        items.into_iter().map(Task::from_value).collect()
    }

    /// Busca uma tarefa pelo ID
    ///
    /// `GET /tasks/{id}`
    pub async fn retrieve(&self, task_id: &str) -> Result<Task> {
        let endpoint = format!("{}/{}", TASKS_ENDPOINT, task_id);
        let response = self.client.get(&endpoint, None, None).await?;
        Task::from_value(response)
    }

    /// Atualiza uma tarefa; o servidor devolve o snapshot completo
    ///
    /// `PUT /tasks/{id}`
    pub async fn update(&self, task_id: &str, fields: &Value) -> Result<Task> {
        let endpoint = format!("{}/{}", TASKS_ENDPOINT, task_id);
        let response = self.client.put(&endpoint, Some(fields), None).await?;
        Task::from_value(response)
    }

    /// Remove uma tarefa, devolvendo o payload bruto de sucesso
    ///
    /// `DELETE /tasks/{id}`
    pub async fn delete(&self, task_id: &str) -> Result<Value> {
        let endpoint = format!("{}/{}", TASKS_ENDPOINT, task_id);
        self.client.delete(&endpoint, None).await
    }
}
