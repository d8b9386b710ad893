// src/config.rs

use std::{env, sync::Arc, time::Duration};

use anyhow::Context;
use sqlx::{postgres::PgPoolOptions, PgPool};

use crate::{
    db::{MemoriaStore, MemoryStore, PgStore, Store},
    services::{
        cadastro_service::CadastroService, email_service::EmailService,
        locadora_service::LocadoraService, professor_service::ProfessorService,
        transacao_service::TransacaoService, vantagem_service::VantagemService,
    },
};

/// Configuração lida do ambiente (e do `.env`, se existir).
#[derive(Debug, Clone)]
pub struct Config {
    /// Sem `DATABASE_URL` a aplicação roda com o store em memória.
    pub database_url: Option<String>,
    pub bind_addr: String,
    pub bcrypt_cost: u32,
    pub db_max_connections: u32,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let database_url = env::var("DATABASE_URL").ok().filter(|url| !url.trim().is_empty());
        let bind_addr = env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".to_string());

        let bcrypt_cost = match env::var("BCRYPT_COST") {
            Ok(valor) => valor
                .parse()
                .with_context(|| format!("BCRYPT_COST inválido: {valor}"))?,
            Err(_) => bcrypt::DEFAULT_COST,
        };
        let db_max_connections = match env::var("DB_MAX_CONNECTIONS") {
            Ok(valor) => valor
                .parse()
                .with_context(|| format!("DB_MAX_CONNECTIONS inválido: {valor}"))?,
            Err(_) => 5,
        };

        Ok(Self {
            database_url,
            bind_addr,
            bcrypt_cost,
            db_max_connections,
        })
    }
}

#[derive(Clone)]
pub struct AppState {
    // Presente só quando a aplicação usa Postgres (necessário para as migrações)
    pub db_pool: Option<PgPool>,
    pub professor_service: ProfessorService,
    pub vantagem_service: VantagemService,
    pub transacao_service: TransacaoService,
    pub cadastro_service: CadastroService,
    pub locadora_service: LocadoraService,
}

impl AppState {
    pub async fn new(config: &Config) -> anyhow::Result<Self> {
        let Some(database_url) = &config.database_url else {
            tracing::warn!("⚠️ DATABASE_URL não definida: usando o store em memória");
            let store: Arc<dyn Store> = Arc::new(MemoriaStore::new());
            return Ok(Self::montar(store, None, config.bcrypt_cost));
        };

        let db_pool = PgPoolOptions::new()
            .max_connections(config.db_max_connections)
            .acquire_timeout(Duration::from_secs(3))
            .connect(database_url)
            .await?;

        tracing::info!("✅ Conexão com o banco de dados estabelecida com sucesso!");

        let store: Arc<dyn Store> = Arc::new(PgStore::new(db_pool.clone()));
        Ok(Self::montar(store, Some(db_pool), config.bcrypt_cost))
    }

    /// Estado sobre um store em memória vazio.
    pub fn em_memoria(bcrypt_cost: u32) -> Self {
        Self::montar(Arc::new(MemoriaStore::new()), None, bcrypt_cost)
    }

    // --- Monta o grafo de dependências ---
    fn montar(store: Arc<dyn Store>, db_pool: Option<PgPool>, bcrypt_cost: u32) -> Self {
        let notificador = Arc::new(EmailService::new());

        Self {
            db_pool,
            professor_service: ProfessorService::new(store.clone(), notificador.clone(), bcrypt_cost),
            vantagem_service: VantagemService::new(store.clone(), notificador),
            transacao_service: TransacaoService::new(store.clone()),
            cadastro_service: CadastroService::new(store),
            locadora_service: LocadoraService::new(MemoryStore::new(), MemoryStore::new()),
        }
    }
}
