use crate::{
    database::MongoDB,
    models::{Feedback, FeedbackAuthor, FeedbackEntry, User, DEFAULT_AVATAR},
    services::auth_service,
    utils::AppError,
};
use futures::TryStreamExt;
use mongodb::bson::{doc, DateTime as BsonDateTime};
use mongodb::error::{ErrorKind, WriteFailure};
use serde::Deserialize;
use std::collections::HashMap;

const COLLECTION: &str = "feedback";
const LIST_LIMIT: i64 = 10;

#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct CreateFeedbackRequest {
    pub rating: i32,
    #[serde(default)]
    pub comment: String,
}

// Mongo duplicate-key write error, raised by the unique feedback(user_id)
// index when two submissions race past the existence check.
fn is_duplicate_key(e: &mongodb::error::Error) -> bool {
    matches!(
        e.kind.as_ref(),
        ErrorKind::Write(WriteFailure::WriteError(we)) if we.code == 11000
    )
}

fn validate_rating(rating: i32) -> Result<(), AppError> {
    if !(1..=5).contains(&rating) {
        return Err(AppError::Validation("Rating must be between 1 and 5".into()));
    }
    Ok(())
}

/// Stores one rating per user; a second submission is rejected before the
/// insert (the unique index backs this up against races).
pub async fn create(
    db: &MongoDB,
    user_id: &str,
    request: &CreateFeedbackRequest,
) -> Result<FeedbackEntry, AppError> {
    validate_rating(request.rating)?;

    let author = auth_service::get_user(db, user_id).await?;

    let collection = db.collection::<Feedback>(COLLECTION);
    if collection
        .find_one(doc! { "user_id": user_id })
        .await
        .map_err(AppError::db)?
        .is_some()
    {
        return Err(AppError::Conflict(
            "You have already submitted feedback".into(),
        ));
    }

    let feedback = Feedback {
        id: None,
        user_id: user_id.to_string(),
        rating: request.rating,
        comment: request.comment.trim().to_string(),
        created_at: BsonDateTime::now(),
    };

    if let Err(e) = collection.insert_one(&feedback).await {
        if is_duplicate_key(&e) {
            return Err(AppError::Conflict(
                "You have already submitted feedback".into(),
            ));
        }
        return Err(AppError::db(e));
    }

    log::info!("✅ Feedback stored for user {}", user_id);

    Ok(FeedbackEntry {
        rating: feedback.rating,
        comment: feedback.comment,
        created_at: feedback
            .created_at
            .try_to_rfc3339_string()
            .unwrap_or_default(),
        user: FeedbackAuthor {
            name: author.name,
            avatar: author.avatar,
        },
    })
}

/// The ten most recent entries, newest first, with authors resolved in a
/// single `$in` query. A deleted author degrades to a placeholder.
pub async fn list_recent(db: &MongoDB) -> Result<Vec<FeedbackEntry>, AppError> {
    let collection = db.collection::<Feedback>(COLLECTION);

    let feedbacks: Vec<Feedback> = collection
        .find(doc! {})
        .sort(doc! { "created_at": -1 })
        .limit(LIST_LIMIT)
        .await
        .map_err(AppError::db)?
        .try_collect()
        .await
        .map_err(AppError::db)?;

    let user_ids: Vec<String> = feedbacks.iter().map(|f| f.user_id.clone()).collect();

    let authors: Vec<User> = db
        .collection::<User>("users")
        .find(doc! { "user_id": { "$in": user_ids } })
        .await
        .map_err(AppError::db)?
        .try_collect()
        .await
        .map_err(AppError::db)?;

    let by_id: HashMap<&str, &User> = authors.iter().map(|u| (u.user_id.as_str(), u)).collect();

    Ok(feedbacks
        .iter()
        .map(|f| FeedbackEntry {
            rating: f.rating,
            comment: f.comment.clone(),
            created_at: f.created_at.try_to_rfc3339_string().unwrap_or_default(),
            user: match by_id.get(f.user_id.as_str()) {
                Some(u) => FeedbackAuthor {
                    name: u.name.clone(),
                    avatar: u.avatar.clone(),
                },
                None => FeedbackAuthor {
                    name: "Deleted user".to_string(),
                    avatar: DEFAULT_AVATAR.to_string(),
                },
            },
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rating_bounds() {
        assert!(validate_rating(1).is_ok());
        assert!(validate_rating(5).is_ok());
        assert!(validate_rating(0).is_err());
        assert!(validate_rating(6).is_err());
        assert!(validate_rating(-3).is_err());
    }

    #[test]
    fn test_non_write_errors_are_not_duplicates() {
        let io = std::io::Error::new(std::io::ErrorKind::ConnectionReset, "reset");
        assert!(!is_duplicate_key(&mongodb::error::Error::from(io)));
    }
}
