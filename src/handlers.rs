// src/handlers.rs

pub mod accounts;
pub mod ai;
pub mod analytics;
pub mod auth;
pub mod communications;
pub mod crops;
pub mod farms;
pub mod inventory;
pub mod livestock;
pub mod marketplace;
pub mod produce;
pub mod workforce;
pub mod ws;
