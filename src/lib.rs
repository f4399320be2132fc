//! Cliente assíncrono da API Surge HQ
//!
//! Este crate fornece uma interface tipo-segura e ergonômica para a API de
//! anotação de dados da Surge HQ, incluindo:
//!
//! - Projects manager (CRUD de projetos e criação de tasks em lote)
//! - Tasks manager (CRUD de tasks com filtro por projeto)
//! - Teams manager (CRUD de times e gestão de roster de anotadores)
//! - Reports (polling de geração + download de relatórios comprimidos)
//! - Carga de tasks a partir de CSV local
//!
//! # Autenticação
//!
//! A chave de API vai como usuário em HTTP Basic auth, com senha vazia.
//! Ela pode vir de três lugares, em ordem de precedência:
//!
//! 1. Override por chamada (nos helpers de transporte do [`SurgeClient`])
//! 2. [`SurgeConfig::with_api_key`] / [`SurgeConfig::new`]
//! 3. Variável de ambiente `SURGE_API_KEY`
//!
//! A URL base segue `SURGE_BASE_URL` quando definida, com fallback para o
//! endpoint de produção.
//!
//! # Exemplo Básico
//!
//! ```rust,ignore
//! use surge::{SurgeClient, ProjectManager, CreateProjectRequest};
//!
//! #[tokio::main]
//! async fn main() -> surge::Result<()> {
//!     // Lê SURGE_API_KEY e SURGE_BASE_URL do ambiente
//!     let client = SurgeClient::from_env()?;
//!
//!     let projects = ProjectManager::new(client);
//!     let project = projects
//!         .create(&CreateProjectRequest::new("Categorize products"))
//!         .await?;
//!
//!     projects
//!         .create_tasks_from_csv(&project.id, "tasks.csv")
//!         .await?;
//!
//!     Ok(())
//! }
//! ```

// Módulos públicos
pub mod client;
pub mod config;
pub mod error;
pub mod projects;
pub mod reports;
pub mod tasks;
pub mod teams;
pub mod types;
pub mod utils;

// Re-exports principais
pub use client::{FileUpload, SurgeClient};
pub use config::SurgeConfig;
pub use error::{Result, SurgeError};
pub use projects::{CreateProjectRequest, ProjectManager};
pub use reports::{ReportManager, ReportSink, DEFAULT_POLL_INTERVAL};
pub use tasks::{CreateTaskRequest, TaskManager};
pub use teams::{CreateTeamRequest, TeamManager};
pub use types::{Project, Task, Team};
pub use utils::load_tasks_data_from_csv;
