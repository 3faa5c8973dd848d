// Core voting module - items, ledgers, and aggregate stats.

pub mod voting_models;
pub mod voting_service;

pub use voting_models::*;
pub use voting_service::*;
