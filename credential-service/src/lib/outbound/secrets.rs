pub mod postgres;

pub use postgres::PostgresSecretProvider;
