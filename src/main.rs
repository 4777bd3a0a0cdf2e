use anyhow::Result;
use dotenvy::dotenv;
use std::net::SocketAddr;
use tokio::signal;
use tracing::{error, info};

use rental_booking::config::environment::EnvironmentConfig;
use rental_booking::database::{create_pool, init_schema};
use rental_booking::routes::create_app;
use rental_booking::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Cargar variables de entorno
    dotenv().ok();

    // Configurar logging
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    info!("🚗 Vehicle Rental Booking API");
    info!("=============================");

    let config = EnvironmentConfig::from_env();

    // Inicializar base de datos
    let pool = match create_pool(None).await {
        Ok(pool) => pool,
        Err(e) => {
            error!("❌ Error conectando a la base de datos: {}", e);
            return Err(e);
        }
    };

    init_schema(&pool).await?;
    info!("✅ Schema de base de datos inicializado");

    // Crear router de la API
    let addr: SocketAddr = config.server_url().parse()?;
    let app = create_app(AppState::new(pool, config));

    info!("🌐 Servidor iniciando en http://{}", addr);
    info!("🔍 Endpoints disponibles:");
    info!("   POST   /api/v1/auth/signup - Registro de usuario");
    info!("   POST   /api/v1/auth/signin - Login");
    info!("   GET    /api/v1/users - Listar usuarios (admin)");
    info!("   PUT    /api/v1/users/:id - Actualizar usuario");
    info!("   DELETE /api/v1/users/:id - Eliminar usuario (admin)");
    info!("   GET    /api/v1/vehicles - Listar vehículos");
    info!("   GET    /api/v1/vehicles/:id - Obtener vehículo");
    info!("   POST   /api/v1/vehicles - Crear vehículo (admin)");
    info!("   PUT    /api/v1/vehicles/:id - Actualizar vehículo (admin)");
    info!("   DELETE /api/v1/vehicles/:id - Eliminar vehículo (admin)");
    info!("   POST   /api/v1/bookings - Crear booking");
    info!("   GET    /api/v1/bookings - Listar bookings");
    info!("   PUT    /api/v1/bookings/:id - Cancelar / marcar devuelto");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("👋 Servidor terminado");
    Ok(())
}

/// Señal de apagado graceful
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("🛑 Señal Ctrl+C recibida, apagando servidor...");
        },
        _ = terminate => {
            info!("🛑 Señal de terminación recibida, apagando servidor...");
        },
    }
}
