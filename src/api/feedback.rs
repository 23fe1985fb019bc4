use crate::{
    database::MongoDB,
    middleware::auth::current_user_id,
    models::FeedbackEntry,
    services::feedback_service::{self, CreateFeedbackRequest},
    utils::AppError,
};
use actix_web::{web, HttpRequest, HttpResponse};

#[utoipa::path(
    get,
    path = "/api/feedback",
    tag = "Feedback",
    responses(
        (status = 200, description = "Ten most recent entries, newest first", body = [FeedbackEntry])
    )
)]
pub async fn list_feedback(db: web::Data<MongoDB>) -> Result<HttpResponse, AppError> {
    log::info!("💬 GET /api/feedback");

    let entries = feedback_service::list_recent(&db).await?;
    Ok(HttpResponse::Ok().json(serde_json::json!({
        "success": true,
        "data": entries
    })))
}

#[utoipa::path(
    post,
    path = "/api/feedback",
    tag = "Feedback",
    request_body = CreateFeedbackRequest,
    responses(
        (status = 201, description = "Feedback stored", body = FeedbackEntry),
        (status = 401, description = "Unauthorized"),
        (status = 409, description = "This user already submitted feedback")
    ),
    security(("bearer_auth" = []))
)]
pub async fn create_feedback(
    db: web::Data<MongoDB>,
    req: HttpRequest,
    request: web::Json<CreateFeedbackRequest>,
) -> Result<HttpResponse, AppError> {
    let user_id = current_user_id(&req)?;
    log::info!("💬 POST /api/feedback - {} ({}⭐)", user_id, request.rating);

    let entry = feedback_service::create(&db, &user_id, &request).await?;
    Ok(HttpResponse::Created().json(serde_json::json!({
        "success": true,
        "data": entry
    })))
}
