use crate::{content, render, utils::AppError};
use actix_web::{web, HttpResponse};

#[utoipa::path(
    get,
    path = "/api/courses",
    tag = "Courses",
    responses(
        (status = 200, description = "Course catalog, lesson bodies elided")
    )
)]
pub async fn list_courses() -> HttpResponse {
    log::info!("📚 GET /api/courses");

    HttpResponse::Ok().json(serde_json::json!({
        "success": true,
        "data": &*content::COURSES
    }))
}

#[utoipa::path(
    get,
    path = "/api/courses/{course_id}",
    tag = "Courses",
    responses(
        (status = 200, description = "One course with its modules and lessons"),
        (status = 404, description = "Unknown course")
    )
)]
pub async fn get_course(path: web::Path<String>) -> Result<HttpResponse, AppError> {
    let course_id = path.into_inner();
    log::info!("📚 GET /api/courses/{}", course_id);

    let course = content::find_course(&course_id)
        .ok_or_else(|| AppError::NotFound(format!("Unknown course: {}", course_id)))?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "success": true,
        "data": course
    })))
}

#[utoipa::path(
    get,
    path = "/api/courses/{course_id}/modules/{module_id}/lessons/{lesson_id}",
    tag = "Courses",
    responses(
        (status = 200, description = "Lesson metadata plus rendered display blocks"),
        (status = 404, description = "Unknown course, module or lesson")
    )
)]
pub async fn get_lesson(path: web::Path<(String, String, String)>) -> Result<HttpResponse, AppError> {
    let (course_id, module_id, lesson_id) = path.into_inner();
    log::info!(
        "📖 GET /api/courses/{}/modules/{}/lessons/{}",
        course_id,
        module_id,
        lesson_id
    );

    let (course, module, lesson) = content::find_lesson(&course_id, &module_id, &lesson_id)
        .ok_or_else(|| AppError::NotFound("Lesson not found".into()))?;

    let blocks = render::render(lesson.content);

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "success": true,
        "data": {
            "courseId": course.id,
            "moduleId": module.id,
            "lesson": lesson,
            "blocks": blocks,
        }
    })))
}
