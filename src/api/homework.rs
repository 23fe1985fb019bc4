use crate::{
    database::MongoDB,
    middleware::auth::current_user_id,
    services::{
        auth_service,
        homework_service::{self, HomeworkSubmission},
    },
    utils::AppError,
};
use actix_multipart::Multipart;
use actix_web::{web, HttpRequest, HttpResponse};
use futures::TryStreamExt;

const MAX_DOCUMENT_BYTES: usize = 20 * 1024 * 1024;

async fn parse_submission(mut payload: Multipart) -> Result<HomeworkSubmission, AppError> {
    let mut file_name = String::new();
    let mut file_bytes: Vec<u8> = Vec::new();
    let mut lesson_title = String::new();
    let mut message = String::new();

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
            if bytes.len() + chunk.len() > MAX_DOCUMENT_BYTES {
                return Err(AppError::Validation("Uploaded file is too large".into()));
            }
            bytes.extend_from_slice(&chunk);
        }

        match field_name.as_str() {
            "document" => {
                file_name = field
                    .content_disposition()
                    .get_filename()
                    .unwrap_or("homework")
                    .to_string();
                file_bytes = bytes;
            }
            "lessonTitle" => {
                lesson_title = String::from_utf8(bytes)
                    .map_err(|_| AppError::Validation("Form fields must be UTF-8".into()))?;
            }
            "message" => {
                message = String::from_utf8(bytes)
                    .map_err(|_| AppError::Validation("Form fields must be UTF-8".into()))?;
            }
            _ => {}
        }
    }

    Ok(HomeworkSubmission {
        file_name,
        file_bytes,
        lesson_title,
        message,
    })
}

#[utoipa::path(
    post,
    path = "/api/homework",
    tag = "Homework",
    responses(
        (status = 200, description = "Document relayed to the teacher"),
        (status = 400, description = "Missing file or lesson title"),
        (status = 401, description = "Unauthorized"),
        (status = 502, description = "Bot API unreachable or rejected the document")
    ),
    security(("bearer_auth" = []))
)]
pub async fn submit_homework(
    db: web::Data<MongoDB>,
    req: HttpRequest,
    payload: Multipart,
) -> Result<HttpResponse, AppError> {
    let user_id = current_user_id(&req)?;
    log::info!("📤 POST /api/homework - {}", user_id);

    let student = auth_service::get_user(&db, &user_id).await?;
    let submission = parse_submission(payload).await?;

    homework_service::relay(&student.name, submission).await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "success": true,
        "message": "Homework submitted to the teacher"
    })))
}
