use mongodb::bson::{oid::ObjectId, DateTime as BsonDateTime};
use serde::{Deserialize, Serialize};

/// One rating + comment per user, enforced by the unique `user_id` index
/// and an existence check before insert.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Feedback {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub user_id: String,
    pub rating: i32,
    pub comment: String,
    pub created_at: BsonDateTime,
}

/// Listed entry with the author resolved from the users collection.
#[derive(Debug, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackEntry {
    pub rating: i32,
    pub comment: String,
    pub created_at: String,
    pub user: FeedbackAuthor,
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct FeedbackAuthor {
    pub name: String,
    pub avatar: String,
}
