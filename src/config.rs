// src/config.rs

use sqlx::{postgres::PgPoolOptions, PgPool};
use std::{env, time::Duration};

use crate::{
    db::{
        AccountsRepository, AiRepository, AnalyticsRepository, ChatRepository, CropRepository,
        FarmRepository, InventoryRepository, LivestockRepository, MarketplaceRepository,
        ProduceRepository, WorkforceRepository,
    },
    services::{AssistantService, AuthService, ChatHub, MarketplaceService, WorkforceService},
};

const DEFAULT_GROQ_BASE_URL: &str = "https://api.groq.com/openai/v1";

#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,
    pub jwt_secret: String,

    pub accounts_repo: AccountsRepository,
    pub farm_repo: FarmRepository,
    pub crop_repo: CropRepository,
    pub livestock_repo: LivestockRepository,
    pub inventory_repo: InventoryRepository,
    pub produce_repo: ProduceRepository,
    pub marketplace_repo: MarketplaceRepository,
    pub workforce_repo: WorkforceRepository,
    pub chat_repo: ChatRepository,
    pub ai_repo: AiRepository,
    pub analytics_repo: AnalyticsRepository,

    pub auth_service: AuthService,
    pub marketplace_service: MarketplaceService,
    pub workforce_service: WorkforceService,
    pub assistant_service: AssistantService,
    pub chat_hub: ChatHub,
}

impl AppState {
    pub async fn new() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let database_url =
            env::var("DATABASE_URL").map_err(|_| anyhow::anyhow!("DATABASE_URL deve ser definida"))?;
        let jwt_secret =
            env::var("JWT_SECRET").map_err(|_| anyhow::anyhow!("JWT_SECRET deve ser definido"))?;
        let groq_api_key = env::var("GROQ_API_KEY").unwrap_or_default();
        // GROQ_BASE_URL permite apontar para um mock nos testes.
        let groq_base_url =
            env::var("GROQ_BASE_URL").unwrap_or_else(|_| DEFAULT_GROQ_BASE_URL.to_string());

        let db_pool = PgPoolOptions::new()
            .max_connections(5)
            .acquire_timeout(Duration::from_secs(3))
            .connect(&database_url)
            .await?;

        tracing::info!("✅ Conexão com o banco de dados estabelecida com sucesso!");

        Ok(Self::build(db_pool, jwt_secret, groq_api_key, groq_base_url))
    }

    // Monta o gráfico de dependências a partir de uma pool já criada
    // (os testes usam connect_lazy e passam por aqui).
    pub fn build(
        db_pool: PgPool,
        jwt_secret: String,
        groq_api_key: String,
        groq_base_url: String,
    ) -> Self {
        let accounts_repo = AccountsRepository::new(db_pool.clone());
        let farm_repo = FarmRepository::new(db_pool.clone());
        let crop_repo = CropRepository::new(db_pool.clone());
        let livestock_repo = LivestockRepository::new(db_pool.clone());
        let inventory_repo = InventoryRepository::new(db_pool.clone());
        let produce_repo = ProduceRepository::new(db_pool.clone());
        let marketplace_repo = MarketplaceRepository::new(db_pool.clone());
        let workforce_repo = WorkforceRepository::new(db_pool.clone());
        let chat_repo = ChatRepository::new(db_pool.clone());
        let ai_repo = AiRepository::new(db_pool.clone());
        let analytics_repo = AnalyticsRepository::new(db_pool.clone());

        let auth_service =
            AuthService::new(accounts_repo.clone(), jwt_secret.clone(), db_pool.clone());
        let marketplace_service =
            MarketplaceService::new(marketplace_repo.clone(), db_pool.clone());
        let workforce_service = WorkforceService::new(workforce_repo.clone(), db_pool.clone());
        let assistant_service =
            AssistantService::new(ai_repo.clone(), groq_api_key, groq_base_url);
        let chat_hub = ChatHub::new();

        Self {
            db_pool,
            jwt_secret,
            accounts_repo,
            farm_repo,
            crop_repo,
            livestock_repo,
            inventory_repo,
            produce_repo,
            marketplace_repo,
            workforce_repo,
            chat_repo,
            ai_repo,
            analytics_repo,
            auth_service,
            marketplace_service,
            workforce_service,
            assistant_service,
            chat_hub,
        }
    }
}
