pub mod app_config;
pub mod catalog_repo;
pub mod database;
pub mod inventory_repo;
pub mod memory;

pub use app_config::Config;
pub use catalog_repo::PostgresCatalogRepository;
pub use database::DbClient;
pub use inventory_repo::PostgresInventoryRepository;
pub use memory::{InMemoryCatalog, InMemoryInventory};
