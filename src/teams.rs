//! Gerenciamento de times Surge
//!
//! CRUD de times mais a mutação de roster: `add_surgers`/`remove_surgers`
//! postam a lista de IDs em um sub-endpoint dedicado e devolvem o snapshot
//! atualizado do time — o roster resultante é sempre o do servidor.

use serde::Serialize;
use serde_json::{json, Value};

use crate::client::SurgeClient;
use crate::error::Result;
use crate::projects::expect_array;
use crate::types::Team;

pub(crate) const TEAMS_ENDPOINT: &str = "teams";

/// Payload para criar um novo time
#[derive(Debug, Clone, Serialize)]
pub struct CreateTeamRequest {
    /// Nome do time (obrigatório)
    pub name: String,

    /// Descrição do time
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// IDs dos membros iniciais
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub members: Vec<String>,
}

impl CreateTeamRequest {
    /// Cria um request com apenas o nome
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            members: Vec::new(),
        }
    }

    /// Builder: define a descrição
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Builder: define os membros iniciais
    pub fn with_members(mut self, members: Vec<String>) -> Self {
        self.members = members;
        self
    }
}

/// Gerenciador de times Surge
#[derive(Clone)]
pub struct TeamManager {
    client: SurgeClient,
}

impl TeamManager {
    /// Cria um gerenciador sobre um cliente já configurado
    pub fn new(client: SurgeClient) -> Self {
        Self { client }
    }

    /// Cria um novo time
    ///
    /// `POST /teams`
    pub async fn create(&self, request: &CreateTeamRequest) -> Result<Team> {
        tracing::debug!("Creating Surge team '{}'", request.name);
        let params = serde_json::to_value(request)?;
        let response = self.client.post(TEAMS_ENDPOINT, Some(&params), None).await?;
        Team::from_value(response)
    }

    /// Lista os times da conta
    ///
    /// `GET /teams/list`
    pub async fn list(&self) -> Result<Vec<Team>> {
        let endpoint = format!("{}/list", TEAMS_ENDPOINT);
        let response = self.client.get(&endpoint, None, None).await?;
        let items = expect_array(response, "teams")?;
        items.into_iter().map(Team::from_value).collect()
    }

    /// Busca um time pelo ID
    ///
    /// `GET /teams/{id}`
    pub async fn retrieve(&self, team_id: &str) -> Result<Team> {
        let endpoint = format!("{}/{}", TEAMS_ENDPOINT, team_id);
        let response = self.client.get(&endpoint, None, None).await?;
        Team::from_value(response)
    }

    /// Atualiza um time; o servidor devolve o snapshot completo
    ///
    /// `PUT /teams/{id}`
    pub async fn update(&self, team_id: &str, fields: &Value) -> Result<Team> {
        let endpoint = format!("{}/{}", TEAMS_ENDPOINT, team_id);
        let response = self.client.put(&endpoint, Some(fields), None).await?;
        Team::from_value(response)
    }

    /// Remove um time, devolvendo o payload bruto de sucesso
    ///
    /// `DELETE /teams/{id}`
    pub async fn delete(&self, team_id: &str) -> Result<Value> {
        let endpoint = format!("{}/{}", TEAMS_ENDPOINT, team_id);
        self.client.delete(&endpoint, None).await
    }

    /// Adiciona surgers ao time
    ///
    /// `POST /teams/{id}/add_surgers` com `{"surger_ids": [..]}`
    pub async fn add_surgers(&self, team_id: &str, surger_ids: &[String]) -> Result<Team> {
        tracing::debug!("Adding {} surgers to team {}", surger_ids.len(), team_id);
        let endpoint = format!("{}/{}/add_surgers", TEAMS_ENDPOINT, team_id);
        let params = json!({ "surger_ids": surger_ids });
        let response = self.client.post(&endpoint, Some(&params), None).await?;
        Team::from_value(response)
    }

    /// Remove surgers do time
    ///
    /// `POST /teams/{id}/remove_surgers` com `{"surger_ids": [..]}`
    pub async fn remove_surgers(&self, team_id: &str, surger_ids: &[String]) -> Result<Team> {
        tracing::debug!(
            "Removing {} surgers from team {}",
            surger_ids.len(),
            team_id
        );
        let endpoint = format!("{}/{}/remove_surgers", TEAMS_ENDPOINT, team_id);
        let params = json!({ "surger_ids": surger_ids });
        let response = self.client.post(&endpoint, Some(&params), None).await?;
        Team::from_value(response)
    }
}
