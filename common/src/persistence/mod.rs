use crate::config::CONFIG;
use diesel_async::pooled_connection::deadpool::Pool;
use diesel_async::pooled_connection::AsyncDieselConnectionManager;
use diesel_async::AsyncPgConnection;
use diesel_migrations::{embed_migrations, EmbeddedMigrations};

pub mod models;
pub mod schema;

pub const PG_MIGRATIONS: EmbeddedMigrations = embed_migrations!("src/persistence/migrations");

pub type PgPool = Pool<AsyncPgConnection>;

pub fn pg_pool(db_url: impl Into<String>) -> PgPool {
    let config = AsyncDieselConnectionManager::<AsyncPgConnection>::new(db_url);
    Pool::builder(config).build().expect("build pool")
}

pub fn init_pg_pool() -> PgPool {
    pg_pool(CONFIG.postgres.url())
}
