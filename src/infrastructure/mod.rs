pub mod database;
pub mod storage;

pub use database::{init_database, DatabaseConfig, SeaOrmRepositoryProvider};
pub use storage::InMemoryRepositoryProvider;
