pub mod assistant;
pub mod auth;
pub mod chat;
pub mod marketplace_service;
pub mod workforce_service;

pub use assistant::AssistantService;
pub use auth::AuthService;
pub use chat::ChatHub;
pub use marketplace_service::MarketplaceService;
pub use workforce_service::WorkforceService;
