use actix_web::{web, App, HttpServer};
use console_backend::config::Config;
use console_backend::middleware::cors::cors_middleware;
use console_backend::middleware::request_trace::RequestTrace;
use console_backend::middleware::require_role::RequireRole;
use console_backend::middleware::token_auth::TokenAuth;
use console_backend::middleware::trace_span::TraceSpan;
use console_backend::routes;
use console_backend::state::app_state::AppState;
use console_backend::telemetry;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    telemetry::init_tracing();

    // Environment variables must be set by the runtime environment:
    // - Docker: Set via docker-compose env_file or docker run --env-file
    // - Local dev: Source env files manually (e.g., set -a; . ./.env; set +a)
    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            // A missing or placeholder JWT secret must stop the process, not
            // degrade into per-request failures.
            eprintln!("❌ {e}");
            std::process::exit(1);
        }
    };

    println!(
        "🚀 Starting admin console backend on http://{}:{}",
        config.host, config.port
    );

    let app_state = AppState::new(config.security());
    let data = web::Data::new(app_state);

    let host = config.host.clone();
    let port = config.port;

    HttpServer::new(move || {
        App::new()
            // Outermost to innermost: CORS decorates every response including
            // rendered rejections, RequestTrace owns the trace scope, TraceSpan
            // reads the trace id RequestTrace inserted.
            .wrap(TraceSpan)
            .wrap(RequestTrace)
            .wrap(cors_middleware())
            .app_data(data.clone())
            .route("/", web::get().to(routes::health::root))
            .service(
                web::scope("/api/profile")
                    .wrap(TokenAuth)
                    .configure(routes::profile::configure_routes),
            )
            .service(
                web::scope("/api/admin")
                    // TokenAuth is the outer wrap so the role gate sees a
                    // verified identity.
                    .wrap(RequireRole::global_admin())
                    .wrap(TokenAuth)
                    .configure(routes::admin::configure_routes),
            )
            .configure(routes::configure)
    })
    .bind((host.as_str(), port))?
    .run()
    .await
}
