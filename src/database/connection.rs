//! Configuración de conexión a PostgreSQL
//!
//! Este módulo maneja el pool de conexiones a la base de datos.

use anyhow::{Context, Result};
use sqlx::postgres::{PgPool, PgPoolOptions};
use std::time::Duration;

/// Crear un pool de conexiones a la base de datos
pub async fn create_pool(database_url: Option<&str>) -> Result<PgPool> {
    let database_url = match database_url {
        Some(url) => url.to_string(),
        None => std::env::var("DATABASE_URL")
            .context("DATABASE_URL must be set in environment variables")?,
    };

    let pool = PgPoolOptions::new()
        .max_connections(20)
        .min_connections(2)
        .acquire_timeout(Duration::from_secs(30))
        .idle_timeout(Duration::from_secs(300))
        .connect(&database_url)
        .await
        .context("Error connecting to PostgreSQL")?;

    Ok(pool)
}
