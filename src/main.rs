use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use dotenvy::dotenv;
use tokio::signal;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

use fleet_maintenance::config::database::DatabaseConfig;
use fleet_maintenance::config::environment::EnvironmentConfig;
use fleet_maintenance::middleware::cors::cors_middleware;
use fleet_maintenance::notifications::{EventBroadcaster, LettreMailer};
use fleet_maintenance::routes::create_api_router;
use fleet_maintenance::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Cargar variables de entorno
    dotenv().ok();

    // Configurar logging
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    info!("🛞 Fleet Maintenance - Gestión de neumáticos de flota");
    info!("=====================================================");

    let config = EnvironmentConfig::default();

    // Inicializar base de datos
    let pool = match DatabaseConfig::default().create_pool().await {
        Ok(pool) => {
            info!("✅ Conexión a PostgreSQL establecida");
            pool
        }
        Err(e) => {
            error!("❌ Error conectando a la base de datos: {}", e);
            return Err(anyhow::anyhow!("Error de base de datos: {}", e));
        }
    };

    // Canal de eventos en tiempo real y transporte de correo
    let broadcaster = EventBroadcaster::new(config.event_buffer_size);
    let mailer = Arc::new(LettreMailer::from_config(&config)?);

    let state = AppState::new(pool, config, broadcaster, mailer);

    // Escáner de desgaste en background, un ciclo por tick
    let scan_period = Duration::from_secs(state.config.wear_scan_interval_secs);
    tokio::spawn(state.wear_scanner().run_scheduler(scan_period));

    let app = create_api_router()
        .layer(TraceLayer::new_for_http())
        .layer(cors_middleware())
        .with_state(state.clone());

    let addr: SocketAddr = state.config.server_url().parse()?;

    info!("🌐 Servidor iniciando en http://{}", addr);
    info!("🔍 Endpoints disponibles:");
    info!("   GET    /health - Health check");
    info!("🛞 Endpoints - Neumáticos:");
    info!("   POST   /api/tires - Registrar neumático");
    info!("   GET    /api/tires - Listar neumáticos (paginado, con filtros)");
    info!("   GET    /api/tires/:id - Obtener neumático");
    info!("   GET    /api/tires/code/:code - Buscar por código (válido para uso)");
    info!("   PUT    /api/tires/:id - Actualizar neumático");
    info!("   DELETE /api/tires/:id - Eliminar neumático");
    info!("   PATCH  /api/tires/:id/analysis - Reclasificar tras análisis");
    info!("🚚 Endpoints - Instalaciones:");
    info!("   POST   /api/vehicle-tires - Montar lote de neumáticos");
    info!("   GET    /api/vehicle-tires/vehicle/:vehicle_id - Instalaciones del vehículo");
    info!("   GET    /api/vehicle-tires/vehicle/:vehicle_id/maintenance/:maintenance_id - Por mantenimiento");
    info!("   PATCH  /api/vehicle-tires/:id/replace - Marcar para cambio");
    info!("   DELETE /api/vehicle-tires/discharge/:tire_id - Dar de baja");
    info!("🔧 Endpoints - Mantenimiento:");
    info!("   GET    /api/maintenance/:id - Mantenimiento con datos del vehículo");
    info!("📡 Endpoints - Eventos:");
    info!("   GET    /api/events - Feed SSE de avisos de desgaste");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| {
            error!("❌ Error del servidor: {}", e);
            anyhow::anyhow!(e)
        })?;

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
