mod api;
mod content;
mod database;
mod middleware;
mod models;
mod render;
mod services;
mod utils;

use actix_cors::Cors;
use actix_files::Files;
use actix_web::{middleware::Logger, web, App, HttpServer};
use dotenv::dotenv;
use std::env;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load environment variables
    dotenv().ok();

    // Initialize logger
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    // Get configuration from environment
    let host = env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port = env::var("PORT").unwrap_or_else(|_| "5000".to_string());
    let database_url = env::var("DATABASE_URL").expect("DATABASE_URL must be set");
    let allowed_origin =
        env::var("ALLOWED_ORIGIN").unwrap_or_else(|_| "http://localhost:3000".to_string());
    let upload_dir = services::upload_service::upload_dir();

    log::info!("🚀 Starting Skills Service...");
    log::info!("📊 Database: {}", database_url);

    // Avatar/upload directory must exist before actix-files mounts it
    std::fs::create_dir_all(&upload_dir)?;
    log::info!("🖼️  Upload dir: {}", upload_dir);

    // Initialize MongoDB connection
    let db = database::MongoDB::new(&database_url)
        .await
        .expect("Failed to connect to MongoDB");

    let db_data = web::Data::new(db.clone());

    log::info!("✅ MongoDB connected successfully");
    log::info!("📚 Course catalog loaded: {} courses", content::COURSES.len());

    log::info!("🌐 Server starting on {}:{}", host, port);
    log::info!("📄 OpenAPI spec at: http://{}:{}/api-docs/openapi.json", host, port);

    // Start HTTP server
    HttpServer::new(move || {
        let cors = Cors::default()
            .allowed_origin(&allowed_origin)
            .allowed_methods(vec!["GET", "POST", "PUT", "DELETE", "OPTIONS"])
            .allowed_headers(vec![
                actix_web::http::header::AUTHORIZATION,
                actix_web::http::header::CONTENT_TYPE,
                actix_web::http::header::ACCEPT,
            ])
            .supports_credentials()
            .max_age(3600);

        // Generate OpenAPI specification
        let openapi = api::swagger::ApiDoc::openapi();

        App::new()
            .app_data(db_data.clone())
            .wrap(cors)
            .wrap(middleware::SecurityHeaders)
            .wrap(Logger::default())
            // Swagger UI
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}").url("/api-docs/openapi.json", openapi.clone()),
            )
            // Health check
            .route("/health", web::get().to(api::health::health_check))
            // Auth: register/login/logout are open, the rest requires a token
            .service(
                web::scope("/api/auth")
                    .route("/register", web::post().to(api::auth::register))
                    .route("/login", web::post().to(api::auth::login))
                    .route("/logout", web::post().to(api::auth::logout))
                    .service(
                        web::resource("/me")
                            .wrap(middleware::AuthMiddleware)
                            .route(web::get().to(api::auth::get_me)),
                    )
                    .service(
                        web::resource("/update-profile")
                            .wrap(middleware::AuthMiddleware)
                            .route(web::put().to(api::auth::update_profile)),
                    )
                    .service(
                        web::resource("/toggle-save-lesson")
                            .wrap(middleware::AuthMiddleware)
                            .route(web::post().to(api::auth::toggle_save_lesson)),
                    )
                    .service(
                        web::resource("/progress")
                            .wrap(middleware::AuthMiddleware)
                            .route(web::put().to(api::auth::update_progress)),
                    ),
            )
            // Course catalog (public, compiled into the binary)
            .service(
                web::scope("/api/courses")
                    .route("", web::get().to(api::courses::list_courses))
                    .route("/{course_id}", web::get().to(api::courses::get_course))
                    .route(
                        "/{course_id}/modules/{module_id}/lessons/{lesson_id}",
                        web::get().to(api::courses::get_lesson),
                    ),
            )
            // Feedback: listing is public, posting checks the bearer token
            .service(
                web::resource("/api/feedback")
                    .route(web::get().to(api::feedback::list_feedback))
                    .route(web::post().to(api::feedback::create_feedback)),
            )
            // Homework relay
            .service(
                web::resource("/api/homework")
                    .wrap(middleware::AuthMiddleware)
                    .route(web::post().to(api::homework::submit_homework)),
            )
            // Stored avatars
            .service(Files::new("/uploads", upload_dir.clone()))
    })
    .bind(format!("{}:{}", host, port))?
    .run()
    .await
}
