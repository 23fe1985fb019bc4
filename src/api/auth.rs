use crate::{
    database::MongoDB,
    middleware::auth::current_user_id,
    models::PublicUser,
    services::{
        auth_service::{
            self, AuthResponse, LoginRequest, ProfileUpdate, ProgressUpdateRequest,
            RegisterRequest, ToggleSaveRequest,
        },
        upload_service,
    },
    utils::AppError,
};
use actix_multipart::Multipart;
use actix_web::{web, HttpRequest, HttpResponse};
use futures::TryStreamExt;

// Uploaded avatars are capped well below actix's own payload limit
const MAX_AVATAR_BYTES: usize = 5 * 1024 * 1024;

#[utoipa::path(
    post,
    path = "/api/auth/register",
    tag = "Auth",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Registration successful", body = AuthResponse),
        (status = 400, description = "Missing or malformed fields"),
        (status = 409, description = "Email already in use")
    )
)]
pub async fn register(
    db: web::Data<MongoDB>,
    request: web::Json<RegisterRequest>,
) -> Result<HttpResponse, AppError> {
    log::info!("📝 POST /api/auth/register - email: {}", request.email);

    let response = auth_service::register(&db, &request).await?;
    Ok(HttpResponse::Created().json(response))
}

#[utoipa::path(
    post,
    path = "/api/auth/login",
    tag = "Auth",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = AuthResponse),
        (status = 401, description = "Invalid email or password")
    )
)]
pub async fn login(
    db: web::Data<MongoDB>,
    request: web::Json<LoginRequest>,
) -> Result<HttpResponse, AppError> {
    log::info!("🔐 POST /api/auth/login - email: {}", request.email);

    let response = auth_service::login(&db, &request).await?;
    Ok(HttpResponse::Ok().json(response))
}

// Sessions are stateless; logout only acknowledges so the client can
// discard its token.
#[utoipa::path(
    post,
    path = "/api/auth/logout",
    tag = "Auth",
    responses(
        (status = 200, description = "Logged out; the client discards its token")
    )
)]
pub async fn logout() -> HttpResponse {
    log::info!("👋 POST /api/auth/logout");

    HttpResponse::Ok().json(serde_json::json!({
        "success": true,
        "message": "Logged out"
    }))
}

#[utoipa::path(
    get,
    path = "/api/auth/me",
    tag = "Auth",
    responses(
        (status = 200, description = "Current user", body = PublicUser),
        (status = 401, description = "Missing, malformed or expired token"),
        (status = 404, description = "User no longer exists")
    ),
    security(("bearer_auth" = []))
)]
pub async fn get_me(db: web::Data<MongoDB>, req: HttpRequest) -> Result<HttpResponse, AppError> {
    let user_id = current_user_id(&req)?;
    log::info!("👤 GET /api/auth/me - {}", user_id);

    let user = auth_service::get_user(&db, &user_id).await?;
    Ok(HttpResponse::Ok().json(serde_json::json!({
        "success": true,
        "user": PublicUser::from(&user)
    })))
}

async fn parse_profile_form(mut payload: Multipart) -> Result<ProfileUpdate, AppError> {
    let mut update = ProfileUpdate::default();

    while let Some(mut field) = payload
        .try_next()
        .await
        .map_err(|e| AppError::Validation(format!("Invalid multipart payload: {}", e)))?
    {
        let field_name = field
            .content_disposition()
            .get_name()
            .unwrap_or_default()
            .to_string();

        let mut bytes: Vec<u8> = Vec::new();
        while let Some(chunk) = field
            .try_next()
            .await
            .map_err(|e| AppError::Validation(format!("Invalid multipart payload: {}", e)))?
        {
            if bytes.len() + chunk.len() > MAX_AVATAR_BYTES {
                return Err(AppError::Validation("Uploaded file is too large".into()));
            }
            bytes.extend_from_slice(&chunk);
        }

        match field_name.as_str() {
            "avatar" => {
                if !bytes.is_empty() {
                    let file_name = field
                        .content_disposition()
                        .get_filename()
                        .unwrap_or("avatar")
                        .to_string();
                    update.avatar = Some(upload_service::save_avatar(&file_name, &bytes).await?);
                }
            }
            "name" | "email" | "password" => {
                let value = String::from_utf8(bytes)
                    .map_err(|_| AppError::Validation("Form fields must be UTF-8".into()))?;
                match field_name.as_str() {
                    "name" => update.name = Some(value),
                    "email" => update.email = Some(value),
                    _ => update.password = Some(value),
                }
            }
            _ => {} // unknown field, already drained
        }
    }

    Ok(update)
}

#[utoipa::path(
    put,
    path = "/api/auth/update-profile",
    tag = "Auth",
    responses(
        (status = 200, description = "Profile updated, fresh token issued"),
        (status = 400, description = "Invalid field or unsupported avatar format"),
        (status = 401, description = "Unauthorized"),
        (status = 409, description = "Email already in use by another account")
    ),
    security(("bearer_auth" = []))
)]
pub async fn update_profile(
    db: web::Data<MongoDB>,
    req: HttpRequest,
    payload: Multipart,
) -> Result<HttpResponse, AppError> {
    let user_id = current_user_id(&req)?;
    log::info!("✏️  PUT /api/auth/update-profile - {}", user_id);

    let update = parse_profile_form(payload).await?;
    let (token, user) = auth_service::update_profile(&db, &user_id, update).await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "success": true,
        "token": token,
        "user": user
    })))
}

#[utoipa::path(
    post,
    path = "/api/auth/toggle-save-lesson",
    tag = "Auth",
    request_body = ToggleSaveRequest,
    responses(
        (status = 200, description = "Bookmark toggled", body = auth_service::ToggleSaveResponse),
        (status = 401, description = "Unauthorized")
    ),
    security(("bearer_auth" = []))
)]
pub async fn toggle_save_lesson(
    db: web::Data<MongoDB>,
    req: HttpRequest,
    request: web::Json<ToggleSaveRequest>,
) -> Result<HttpResponse, AppError> {
    let user_id = current_user_id(&req)?;
    log::info!(
        "🔖 POST /api/auth/toggle-save-lesson - {} ({}/{})",
        user_id,
        request.course_id,
        request.lesson_id
    );

    let response = auth_service::toggle_save_lesson(&db, &user_id, &request).await?;
    Ok(HttpResponse::Ok().json(response))
}

#[utoipa::path(
    put,
    path = "/api/auth/progress",
    tag = "Auth",
    request_body = ProgressUpdateRequest,
    responses(
        (status = 200, description = "Progress updated"),
        (status = 400, description = "Invalid quiz score or empty lesson id"),
        (status = 401, description = "Unauthorized")
    ),
    security(("bearer_auth" = []))
)]
pub async fn update_progress(
    db: web::Data<MongoDB>,
    req: HttpRequest,
    request: web::Json<ProgressUpdateRequest>,
) -> Result<HttpResponse, AppError> {
    let user_id = current_user_id(&req)?;
    log::info!("📈 PUT /api/auth/progress - {}", user_id);

    let progress = auth_service::update_progress(&db, &user_id, &request).await?;
    Ok(HttpResponse::Ok().json(serde_json::json!({
        "success": true,
        "progress": progress
    })))
}
