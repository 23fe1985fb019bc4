use crate::{
    database::MongoDB,
    models::{
        toggle_saved, CompletedLesson, LastViewed, Progress, ProgressView, PublicUser, QuizScore,
        Role, SavedLesson, SavedLessonView, User, DEFAULT_AVATAR,
    },
    services::upload_service,
    utils::AppError,
};
use bcrypt::{hash, verify, DEFAULT_COST};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use lazy_static::lazy_static;
use mongodb::bson::{self, doc, oid::ObjectId, DateTime as BsonDateTime};
use regex::Regex;
use serde::{Deserialize, Serialize};

const TOKEN_LIFETIME_DAYS: i64 = 7;

lazy_static! {
    static ref EMAIL_RE: Regex = Regex::new(r"^\S+@\S+\.\S+$").unwrap();
}

// JWT Claims
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    pub sub: String, // user_id
    pub email: String,
    pub iat: usize,
    pub exp: usize,
}

#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct AuthResponse {
    pub success: bool,
    pub token: String,
    pub user: PublicUser,
}

#[derive(Debug, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ToggleSaveRequest {
    pub course_id: String,
    pub module_id: String,
    pub lesson_id: String,
    pub title: String,
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ToggleSaveResponse {
    pub success: bool,
    pub saved_lessons: Vec<SavedLessonView>,
    pub is_saved: bool,
}

/// Profile fields after the multipart form has been parsed. `avatar` is the
/// already-stored URL, not the raw upload.
#[derive(Debug, Default)]
pub struct ProfileUpdate {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub avatar: Option<String>,
}

#[derive(Debug, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProgressUpdateRequest {
    pub completed_lesson_id: Option<String>,
    pub quiz_score: Option<QuizScoreRequest>,
    pub last_viewed: Option<LastViewedRequest>,
}

#[derive(Debug, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct QuizScoreRequest {
    pub quiz_id: String,
    pub score: i32,
    pub total: i32,
}

#[derive(Debug, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LastViewedRequest {
    pub course_id: String,
    pub module_id: String,
    pub lesson_id: String,
}

fn jwt_secret() -> String {
    std::env::var("JWT_SECRET").unwrap_or_else(|_| "default-secret-change-me".to_string())
}

// Generate session token
pub fn generate_token(user: &User) -> Result<String, AppError> {
    let now = Utc::now();
    let claims = Claims {
        sub: user.user_id.clone(),
        email: user.email.clone(),
        iat: now.timestamp() as usize,
        exp: (now + Duration::days(TOKEN_LIFETIME_DAYS)).timestamp() as usize,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(jwt_secret().as_ref()),
    )
    .map_err(|e| AppError::Internal(format!("Failed to generate token: {}", e)))
}

/// Verifies a session token. An expired token and a malformed one are
/// different failures and must stay distinguishable for the client.
pub fn verify_token(token: &str) -> Result<Claims, AppError> {
    let validation = Validation::default();

    decode::<Claims>(
        token,
        &DecodingKey::from_secret(jwt_secret().as_ref()),
        &validation,
    )
    .map(|data| data.claims)
    .map_err(|e| match e.kind() {
        jsonwebtoken::errors::ErrorKind::ExpiredSignature => {
            AppError::Unauthorized("Token has expired".into())
        }
        _ => AppError::Unauthorized("Invalid token".into()),
    })
}

fn validate_registration(name: &str, email: &str, password: &str) -> Result<(), AppError> {
    if name.trim().is_empty() || email.trim().is_empty() || password.is_empty() {
        return Err(AppError::Validation(
            "Name, email and password are required".into(),
        ));
    }
    if !EMAIL_RE.is_match(email.trim()) {
        return Err(AppError::Validation("Invalid email address".into()));
    }
    if password.len() < 6 {
        return Err(AppError::Validation(
            "Password must be at least 6 characters".into(),
        ));
    }
    Ok(())
}

// User registration
pub async fn register(db: &MongoDB, request: &RegisterRequest) -> Result<AuthResponse, AppError> {
    validate_registration(&request.name, &request.email, &request.password)?;

    let email = request.email.trim().to_lowercase();
    let collection = db.collection::<User>("users");

    if collection
        .find_one(doc! { "email": &email })
        .await
        .map_err(AppError::db)?
        .is_some()
    {
        return Err(AppError::Conflict("Email already in use".into()));
    }

    let hashed = hash(&request.password, DEFAULT_COST)
        .map_err(|e| AppError::Internal(format!("Failed to hash password: {}", e)))?;

    let new_user = User {
        id: None,
        user_id: ObjectId::new().to_hex(),
        name: request.name.trim().to_string(),
        email,
        password: hashed,
        avatar: DEFAULT_AVATAR.to_string(),
        role: Role::Student,
        saved_lessons: vec![],
        progress: Progress::default(),
        created_at: Some(BsonDateTime::now()),
        updated_at: Some(BsonDateTime::now()),
    };

    collection.insert_one(&new_user).await.map_err(AppError::db)?;

    let token = generate_token(&new_user)?;

    log::info!("✅ User registered: {}", new_user.email);

    Ok(AuthResponse {
        success: true,
        token,
        user: PublicUser::from(&new_user),
    })
}

// User login. Unknown email and wrong password share one message so the
// endpoint cannot be used to enumerate accounts.
pub async fn login(db: &MongoDB, request: &LoginRequest) -> Result<AuthResponse, AppError> {
    if request.email.trim().is_empty() || request.password.is_empty() {
        return Err(AppError::Validation("Email and password are required".into()));
    }

    let invalid = || AppError::Unauthorized("Invalid email or password".into());

    let collection = db.collection::<User>("users");
    let user = collection
        .find_one(doc! { "email": request.email.trim().to_lowercase() })
        .await
        .map_err(AppError::db)?
        .ok_or_else(invalid)?;

    let valid = verify(&request.password, &user.password)
        .map_err(|e| AppError::Internal(format!("Password verification error: {}", e)))?;
    if !valid {
        return Err(invalid());
    }

    let token = generate_token(&user)?;

    Ok(AuthResponse {
        success: true,
        token,
        user: PublicUser::from(&user),
    })
}

pub async fn get_user(db: &MongoDB, user_id: &str) -> Result<User, AppError> {
    db.collection::<User>("users")
        .find_one(doc! { "user_id": user_id })
        .await
        .map_err(AppError::db)?
        .ok_or_else(|| AppError::NotFound("User not found".into()))
}

/// Partial profile replace. Password is re-hashed only when a non-blank
/// value was supplied; an email change is re-checked for duplicates.
/// Returns a fresh token alongside the updated user.
pub async fn update_profile(
    db: &MongoDB,
    user_id: &str,
    update: ProfileUpdate,
) -> Result<(String, PublicUser), AppError> {
    let collection = db.collection::<User>("users");
    let mut user = get_user(db, user_id).await?;

    if let Some(name) = update.name {
        if !name.trim().is_empty() {
            user.name = name.trim().to_string();
        }
    }

    if let Some(email) = update.email {
        let email = email.trim().to_lowercase();
        if !email.is_empty() && email != user.email {
            if !EMAIL_RE.is_match(&email) {
                return Err(AppError::Validation("Invalid email address".into()));
            }
            if collection
                .find_one(doc! { "email": &email })
                .await
                .map_err(AppError::db)?
                .is_some()
            {
                return Err(AppError::Conflict(
                    "Email already in use by another account".into(),
                ));
            }
            user.email = email;
        }
    }

    if let Some(password) = update.password {
        if !password.trim().is_empty() {
            if password.len() < 6 {
                return Err(AppError::Validation(
                    "Password must be at least 6 characters".into(),
                ));
            }
            user.password = hash(&password, DEFAULT_COST)
                .map_err(|e| AppError::Internal(format!("Failed to hash password: {}", e)))?;
        }
    }

    if let Some(avatar) = update.avatar {
        if avatar != user.avatar {
            // The replaced file would otherwise stay on disk forever
            upload_service::remove_stored(&user.avatar).await;
        }
        user.avatar = avatar;
    }

    user.updated_at = Some(BsonDateTime::now());

    collection
        .update_one(
            doc! { "user_id": user_id },
            doc! { "$set": {
                "name": &user.name,
                "email": &user.email,
                "password": &user.password,
                "avatar": &user.avatar,
                "updated_at": user.updated_at,
            }},
        )
        .await
        .map_err(AppError::db)?;

    let token = generate_token(&user)?;

    log::info!("✅ Profile updated: {}", user.user_id);

    Ok((token, PublicUser::from(&user)))
}

/// Bookmark toggle on the composite key (course_id, lesson_id): present
/// removes, absent appends. One document write either way.
pub async fn toggle_save_lesson(
    db: &MongoDB,
    user_id: &str,
    request: &ToggleSaveRequest,
) -> Result<ToggleSaveResponse, AppError> {
    if request.course_id.trim().is_empty() || request.lesson_id.trim().is_empty() {
        return Err(AppError::Validation(
            "courseId and lessonId are required".into(),
        ));
    }

    let mut user = get_user(db, user_id).await?;

    let is_saved = toggle_saved(
        &mut user.saved_lessons,
        SavedLesson {
            course_id: request.course_id.clone(),
            module_id: request.module_id.clone(),
            lesson_id: request.lesson_id.clone(),
            title: request.title.clone(),
            saved_at: BsonDateTime::now(),
        },
    );

    let saved = bson::to_bson(&user.saved_lessons)
        .map_err(|e| AppError::Internal(format!("Serialization error: {}", e)))?;

    db.collection::<User>("users")
        .update_one(
            doc! { "user_id": user_id },
            doc! { "$set": {
                "saved_lessons": saved,
                "updated_at": BsonDateTime::now(),
            }},
        )
        .await
        .map_err(AppError::db)?;

    Ok(ToggleSaveResponse {
        success: true,
        saved_lessons: user.saved_lessons.iter().map(SavedLessonView::from).collect(),
        is_saved,
    })
}

/// Applies the requested progress mutations in place. Completing an
/// already-completed lesson is a no-op; the quiz percentage is computed
/// here, never trusted from the client.
fn apply_progress(progress: &mut Progress, request: &ProgressUpdateRequest) -> Result<(), AppError> {
    if let Some(lesson_id) = &request.completed_lesson_id {
        if lesson_id.trim().is_empty() {
            return Err(AppError::Validation("completedLessonId is empty".into()));
        }
        let already = progress
            .completed_lessons
            .iter()
            .any(|c| &c.lesson_id == lesson_id);
        if !already {
            progress.completed_lessons.push(CompletedLesson {
                lesson_id: lesson_id.clone(),
                completed_at: BsonDateTime::now(),
            });
        }
    }

    if let Some(quiz) = &request.quiz_score {
        if quiz.total <= 0 || quiz.score < 0 || quiz.score > quiz.total {
            return Err(AppError::Validation("Invalid quiz score".into()));
        }
        progress.quiz_scores.push(QuizScore {
            quiz_id: quiz.quiz_id.clone(),
            score: quiz.score,
            total: quiz.total,
            percentage: f64::from(quiz.score) / f64::from(quiz.total) * 100.0,
            date: BsonDateTime::now(),
        });
    }

    if let Some(viewed) = &request.last_viewed {
        progress.last_viewed = Some(LastViewed {
            course_id: viewed.course_id.clone(),
            module_id: viewed.module_id.clone(),
            lesson_id: viewed.lesson_id.clone(),
            timestamp: BsonDateTime::now(),
        });
    }

    Ok(())
}

/// Applies any combination of progress mutations in one document write.
pub async fn update_progress(
    db: &MongoDB,
    user_id: &str,
    request: &ProgressUpdateRequest,
) -> Result<ProgressView, AppError> {
    let mut user = get_user(db, user_id).await?;

    apply_progress(&mut user.progress, request)?;

    let progress = bson::to_bson(&user.progress)
        .map_err(|e| AppError::Internal(format!("Serialization error: {}", e)))?;

    db.collection::<User>("users")
        .update_one(
            doc! { "user_id": user_id },
            doc! { "$set": {
                "progress": progress,
                "updated_at": BsonDateTime::now(),
            }},
        )
        .await
        .map_err(AppError::db)?;

    Ok(ProgressView::from(&user.progress))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dummy_user() -> User {
        User {
            id: None,
            user_id: "abc123".into(),
            name: "Sokha".into(),
            email: "sokha@example.com".into(),
            password: String::new(),
            avatar: DEFAULT_AVATAR.into(),
            role: Role::Student,
            saved_lessons: vec![],
            progress: Progress::default(),
            created_at: None,
            updated_at: None,
        }
    }

    #[test]
    fn test_token_roundtrip() {
        let token = generate_token(&dummy_user()).unwrap();
        let claims = verify_token(&token).unwrap();
        assert_eq!(claims.sub, "abc123");
        assert_eq!(claims.email, "sokha@example.com");
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn test_expired_and_malformed_tokens_are_distinct() {
        let now = Utc::now();
        let stale = Claims {
            sub: "abc123".into(),
            email: "sokha@example.com".into(),
            iat: (now - Duration::days(8)).timestamp() as usize,
            exp: (now - Duration::days(1)).timestamp() as usize,
        };
        let expired_token = encode(
            &Header::default(),
            &stale,
            &EncodingKey::from_secret(jwt_secret().as_ref()),
        )
        .unwrap();

        let expired_msg = verify_token(&expired_token).unwrap_err().to_string();
        let malformed_msg = verify_token("not-a-token").unwrap_err().to_string();

        assert_eq!(expired_msg, "Token has expired");
        assert_eq!(malformed_msg, "Invalid token");
        assert_ne!(expired_msg, malformed_msg);
    }

    #[test]
    fn test_registration_validation() {
        assert!(validate_registration("Sokha", "sokha@example.com", "secret1").is_ok());
        assert!(validate_registration("", "sokha@example.com", "secret1").is_err());
        assert!(validate_registration("Sokha", "not-an-email", "secret1").is_err());
        assert!(validate_registration("Sokha", "sokha@example.com", "short").is_err());
    }

    #[test]
    fn test_completed_lesson_add_is_idempotent() {
        let mut progress = Progress::default();
        let request = ProgressUpdateRequest {
            completed_lesson_id: Some("word-lesson-1".into()),
            quiz_score: None,
            last_viewed: None,
        };

        apply_progress(&mut progress, &request).unwrap();
        apply_progress(&mut progress, &request).unwrap();

        assert_eq!(progress.completed_lessons.len(), 1);
        assert_eq!(progress.completed_lessons[0].lesson_id, "word-lesson-1");
    }

    #[test]
    fn test_quiz_percentage_is_computed_server_side() {
        let mut progress = Progress::default();
        let request = ProgressUpdateRequest {
            completed_lesson_id: None,
            quiz_score: Some(QuizScoreRequest {
                quiz_id: "excel-quiz-1".into(),
                score: 3,
                total: 4,
            }),
            last_viewed: None,
        };

        apply_progress(&mut progress, &request).unwrap();

        assert_eq!(progress.quiz_scores.len(), 1);
        assert_eq!(progress.quiz_scores[0].percentage, 75.0);
    }

    #[test]
    fn test_quiz_score_bounds() {
        let mut progress = Progress::default();
        let bad = |score, total| ProgressUpdateRequest {
            completed_lesson_id: None,
            quiz_score: Some(QuizScoreRequest {
                quiz_id: "q1".into(),
                score,
                total,
            }),
            last_viewed: None,
        };

        assert!(apply_progress(&mut progress, &bad(5, 4)).is_err());
        assert!(apply_progress(&mut progress, &bad(-1, 4)).is_err());
        assert!(apply_progress(&mut progress, &bad(0, 0)).is_err());
        assert!(progress.quiz_scores.is_empty());
    }

    #[test]
    fn test_last_viewed_is_replaced() {
        let mut progress = Progress::default();
        let view = |lesson: &str| ProgressUpdateRequest {
            completed_lesson_id: None,
            quiz_score: None,
            last_viewed: Some(LastViewedRequest {
                course_id: "ms-word".into(),
                module_id: "word-module-1".into(),
                lesson_id: lesson.into(),
            }),
        };

        apply_progress(&mut progress, &view("word-lesson-1")).unwrap();
        apply_progress(&mut progress, &view("word-lesson-2")).unwrap();

        assert_eq!(progress.last_viewed.as_ref().unwrap().lesson_id, "word-lesson-2");
    }

    #[test]
    fn test_password_hash_roundtrip() {
        let hashed = hash("hunter42", DEFAULT_COST).unwrap();
        assert!(verify("hunter42", &hashed).unwrap());
        assert!(!verify("hunter43", &hashed).unwrap());
    }
}
