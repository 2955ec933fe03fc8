pub mod accounts_repo;
pub use accounts_repo::AccountsRepository;
pub mod farms_repo;
pub use farms_repo::FarmRepository;
pub mod crops_repo;
pub use crops_repo::CropRepository;
pub mod livestock_repo;
pub use livestock_repo::LivestockRepository;
pub mod inventory_repo;
pub use inventory_repo::InventoryRepository;
pub mod produce_repo;
pub use produce_repo::ProduceRepository;
pub mod marketplace_repo;
pub use marketplace_repo::MarketplaceRepository;
pub mod workforce_repo;
pub use workforce_repo::WorkforceRepository;
pub mod communications_repo;
pub use communications_repo::ChatRepository;
pub mod ai_repo;
pub use ai_repo::AiRepository;
pub mod analytics_repo;
pub use analytics_repo::AnalyticsRepository;
