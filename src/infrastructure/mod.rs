//! Infrastructure layer - external concerns

pub mod database;

pub use database::{
    init_database, init_in_memory_database, run_migrations, DatabaseConfig,
};
pub use database::repositories::SeaOrmContactRepository;
