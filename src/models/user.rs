use mongodb::bson::{oid::ObjectId, DateTime as BsonDateTime};
use serde::{Deserialize, Serialize};

pub const DEFAULT_AVATAR: &str = "/assets/default-avatar.png";

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, utoipa::ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Student,
    Teacher,
    Admin,
}

impl Default for Role {
    fn default() -> Self {
        Role::Student
    }
}

/// User document as stored in the `users` collection. `user_id` is the
/// primary identifier used everywhere outside the database; `_id` stays
/// internal. The bcrypt hash never leaves through the API (see PublicUser).
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct User {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub user_id: String,
    pub name: String,
    pub email: String,
    pub password: String,
    #[serde(default = "default_avatar")]
    pub avatar: String,
    #[serde(default)]
    pub role: Role,
    #[serde(default)]
    pub saved_lessons: Vec<SavedLesson>,
    #[serde(default)]
    pub progress: Progress,
    pub created_at: Option<BsonDateTime>,
    pub updated_at: Option<BsonDateTime>,
}

fn default_avatar() -> String {
    DEFAULT_AVATAR.to_string()
}

/// Bookmark entry embedded in the user document. Uniqueness is on the
/// composite key (course_id, lesson_id), enforced by `toggle_saved`.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct SavedLesson {
    pub course_id: String,
    pub module_id: String,
    pub lesson_id: String,
    pub title: String,
    pub saved_at: BsonDateTime,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct Progress {
    #[serde(default)]
    pub completed_lessons: Vec<CompletedLesson>,
    #[serde(default)]
    pub quiz_scores: Vec<QuizScore>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_viewed: Option<LastViewed>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct CompletedLesson {
    pub lesson_id: String,
    pub completed_at: BsonDateTime,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct QuizScore {
    pub quiz_id: String,
    pub score: i32,
    pub total: i32,
    pub percentage: f64,
    pub date: BsonDateTime,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct LastViewed {
    pub course_id: String,
    pub module_id: String,
    pub lesson_id: String,
    pub timestamp: BsonDateTime,
}

/// Toggles a bookmark in place. Returns true if the entry was added,
/// false if an existing one was removed.
pub fn toggle_saved(list: &mut Vec<SavedLesson>, entry: SavedLesson) -> bool {
    if let Some(idx) = list
        .iter()
        .position(|l| l.lesson_id == entry.lesson_id && l.course_id == entry.course_id)
    {
        list.remove(idx);
        false
    } else {
        list.push(entry);
        true
    }
}

// ---------------------------------------------------------------------------
// JSON views (camelCase, BSON dates rendered as RFC 3339 strings)
// ---------------------------------------------------------------------------

fn fmt_date(dt: &BsonDateTime) -> String {
    dt.try_to_rfc3339_string().unwrap_or_default()
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PublicUser {
    pub id: String,
    pub name: String,
    pub email: String,
    pub avatar: String,
    pub role: Role,
    pub saved_lessons: Vec<SavedLessonView>,
    pub progress: ProgressView,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SavedLessonView {
    pub course_id: String,
    pub module_id: String,
    pub lesson_id: String,
    pub title: String,
    pub saved_at: String,
}

#[derive(Debug, Serialize, Default, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProgressView {
    pub completed_lessons: Vec<CompletedLessonView>,
    pub quiz_scores: Vec<QuizScoreView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_viewed: Option<LastViewedView>,
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CompletedLessonView {
    pub lesson_id: String,
    pub completed_at: String,
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct QuizScoreView {
    pub quiz_id: String,
    pub score: i32,
    pub total: i32,
    pub percentage: f64,
    pub date: String,
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LastViewedView {
    pub course_id: String,
    pub module_id: String,
    pub lesson_id: String,
    pub timestamp: String,
}

impl From<&SavedLesson> for SavedLessonView {
    fn from(l: &SavedLesson) -> Self {
        SavedLessonView {
            course_id: l.course_id.clone(),
            module_id: l.module_id.clone(),
            lesson_id: l.lesson_id.clone(),
            title: l.title.clone(),
            saved_at: fmt_date(&l.saved_at),
        }
    }
}

impl From<&Progress> for ProgressView {
    fn from(p: &Progress) -> Self {
        ProgressView {
            completed_lessons: p
                .completed_lessons
                .iter()
                .map(|c| CompletedLessonView {
                    lesson_id: c.lesson_id.clone(),
                    completed_at: fmt_date(&c.completed_at),
                })
                .collect(),
            quiz_scores: p
                .quiz_scores
                .iter()
                .map(|q| QuizScoreView {
                    quiz_id: q.quiz_id.clone(),
                    score: q.score,
                    total: q.total,
                    percentage: q.percentage,
                    date: fmt_date(&q.date),
                })
                .collect(),
            last_viewed: p.last_viewed.as_ref().map(|v| LastViewedView {
                course_id: v.course_id.clone(),
                module_id: v.module_id.clone(),
                lesson_id: v.lesson_id.clone(),
                timestamp: fmt_date(&v.timestamp),
            }),
        }
    }
}

impl From<&User> for PublicUser {
    fn from(u: &User) -> Self {
        PublicUser {
            id: u.user_id.clone(),
            name: u.name.clone(),
            email: u.email.clone(),
            avatar: u.avatar.clone(),
            role: u.role,
            saved_lessons: u.saved_lessons.iter().map(SavedLessonView::from).collect(),
            progress: ProgressView::from(&u.progress),
            created_at: u.created_at.as_ref().map(fmt_date),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(course: &str, lesson: &str) -> SavedLesson {
        SavedLesson {
            course_id: course.to_string(),
            module_id: "m1".to_string(),
            lesson_id: lesson.to_string(),
            title: "Lesson".to_string(),
            saved_at: BsonDateTime::now(),
        }
    }

    #[test]
    fn test_toggle_adds_then_removes() {
        let mut list = Vec::new();

        assert!(toggle_saved(&mut list, entry("c1", "l1")));
        assert_eq!(list.len(), 1);

        assert!(!toggle_saved(&mut list, entry("c1", "l1")));
        assert!(list.is_empty());
    }

    #[test]
    fn test_toggle_keys_on_course_and_lesson() {
        let mut list = Vec::new();
        toggle_saved(&mut list, entry("c1", "l1"));

        // Same lesson id under another course is a different bookmark
        assert!(toggle_saved(&mut list, entry("c2", "l1")));
        assert_eq!(list.len(), 2);

        assert!(!toggle_saved(&mut list, entry("c1", "l1")));
        assert_eq!(list.len(), 1);
        assert_eq!(list[0].course_id, "c2");
    }

    #[test]
    fn test_double_toggle_restores_state() {
        let mut list = vec![entry("c1", "l1")];

        toggle_saved(&mut list, entry("c1", "l2"));
        toggle_saved(&mut list, entry("c1", "l2"));

        assert_eq!(list.len(), 1);
        assert_eq!(list[0].lesson_id, "l1");
    }

    #[test]
    fn test_public_user_hides_password() {
        let user = User {
            id: None,
            user_id: "u1".into(),
            name: "Dara".into(),
            email: "dara@example.com".into(),
            password: "$2b$12$hash".into(),
            avatar: DEFAULT_AVATAR.into(),
            role: Role::default(),
            saved_lessons: vec![],
            progress: Progress::default(),
            created_at: Some(BsonDateTime::now()),
            updated_at: None,
        };

        let json = serde_json::to_value(PublicUser::from(&user)).unwrap();
        assert!(json.get("password").is_none());
        assert_eq!(json["role"], "student");
        assert_eq!(json["id"], "u1");
    }
}
