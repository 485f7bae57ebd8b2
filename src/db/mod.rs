// The registration database.
mod game;
mod history;
mod player;
mod registration;
mod reminder;

use std::str::FromStr;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};

use crate::logic::{config::Config, error::Result, io::database_file, types::Db};

// Connect to the database and bring the schema up to date.
pub async fn setup(config: &Config) -> Result<Db> {
    let db = match &config.database_dir {
        Some(dir) => {
            let path = database_file(dir).map_err(sqlx::Error::Io)?;
            let options = SqliteConnectOptions::new()
                .filename(&path)
                .create_if_missing(true)
                .foreign_keys(true);

            tracing::info!(path = %path.display(), "opening database");
            SqlitePoolOptions::new()
                .max_connections(config.max_connections.max(1))
                .connect_with(options).await?
        }

        // Every connection to an in-memory database gets its own database,
        // so keep exactly one and never let it go.
        None => {
            let options = SqliteConnectOptions::from_str("sqlite::memory:")?.foreign_keys(true);
            SqlitePoolOptions::new()
                .max_connections(1)
                .min_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
                .connect_with(options).await?
        }
    };

    sqlx::migrate!("sql/migrations").run(&db).await?;
    return Ok(db);
}
