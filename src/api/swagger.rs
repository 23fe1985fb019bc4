use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Skills Service API",
        version = "1.0.0",
        description = "E-learning platform backend. \n\n**Authentication:** endpoints marked with a lock require a JWT Bearer token obtained from register or login.\n\n**Features:**\n- Email/password accounts with profile and avatar management\n- Compiled-in course catalog with server-side lesson rendering\n- Lesson bookmarks and learning progress\n- One rating + comment per user\n- Homework relay to the teacher's messaging bot"
    ),
    paths(
        // Auth endpoints
        crate::api::auth::register,
        crate::api::auth::login,
        crate::api::auth::logout,
        crate::api::auth::get_me,
        crate::api::auth::update_profile,
        crate::api::auth::toggle_save_lesson,
        crate::api::auth::update_progress,

        // Catalog
        crate::api::courses::list_courses,
        crate::api::courses::get_course,
        crate::api::courses::get_lesson,

        // Feedback
        crate::api::feedback::list_feedback,
        crate::api::feedback::create_feedback,

        // Homework
        crate::api::homework::submit_homework,

        // Health
        crate::api::health::health_check,
    ),
    components(
        schemas(
            crate::services::auth_service::RegisterRequest,
            crate::services::auth_service::LoginRequest,
            crate::services::auth_service::AuthResponse,
            crate::services::auth_service::ToggleSaveRequest,
            crate::services::auth_service::ToggleSaveResponse,
            crate::services::auth_service::ProgressUpdateRequest,
            crate::services::feedback_service::CreateFeedbackRequest,
            crate::models::PublicUser,
            crate::models::FeedbackEntry,
            crate::api::health::HealthResponse,
        )
    ),
    tags(
        (name = "Auth", description = "Registration, login, profile, bookmarks and progress."),
        (name = "Courses", description = "Static course catalog and rendered lessons."),
        (name = "Feedback", description = "Platform ratings, one per user."),
        (name = "Homework", description = "Submission relay to the teacher's messaging bot."),
        (name = "Health", description = "Service and database status."),
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("Enter your JWT token"))
                        .build(),
                ),
            );
        }
    }
}
