use crate::utils::AppError;

/// A homework upload after multipart parsing.
#[derive(Debug)]
pub struct HomeworkSubmission {
    pub file_name: String,
    pub file_bytes: Vec<u8>,
    pub lesson_title: String,
    pub message: String,
}

fn bot_token() -> Result<String, AppError> {
    std::env::var("TELEGRAM_BOT_TOKEN")
        .map_err(|_| AppError::Internal("TELEGRAM_BOT_TOKEN not configured".into()))
}

fn chat_id() -> Result<String, AppError> {
    std::env::var("TELEGRAM_CHAT_ID")
        .map_err(|_| AppError::Internal("TELEGRAM_CHAT_ID not configured".into()))
}

fn build_caption(student_name: &str, lesson_title: &str, message: &str) -> String {
    format!(
        "🆕 New homework received!\n👤 Student: {}\n📖 Lesson: {}\n💬 Message: {}",
        student_name,
        lesson_title,
        if message.trim().is_empty() {
            "(none)"
        } else {
            message
        }
    )
}

/// Forwards the uploaded document to the messaging bot's sendDocument
/// endpoint. No retry: a transport error or a non-ok bot reply surfaces
/// to the caller as an upstream failure.
pub async fn relay(student_name: &str, submission: HomeworkSubmission) -> Result<(), AppError> {
    if submission.file_bytes.is_empty() {
        return Err(AppError::Validation("No file was uploaded".into()));
    }
    if submission.lesson_title.trim().is_empty() {
        return Err(AppError::Validation("lessonTitle is required".into()));
    }

    let token = bot_token()?;
    let chat = chat_id()?;
    let caption = build_caption(student_name, &submission.lesson_title, &submission.message);

    let part = reqwest::multipart::Part::bytes(submission.file_bytes)
        .file_name(submission.file_name.clone());
    let form = reqwest::multipart::Form::new()
        .text("chat_id", chat)
        .text("caption", caption)
        .part("document", part);

    let url = format!("https://api.telegram.org/bot{}/sendDocument", token);

    let response = reqwest::Client::new()
        .post(&url)
        .multipart(form)
        .send()
        .await
        .map_err(|e| AppError::Upstream(format!("Bot API unreachable: {}", e)))?;

    let body: serde_json::Value = response
        .json()
        .await
        .map_err(|e| AppError::Upstream(format!("Invalid bot API response: {}", e)))?;

    if body["ok"].as_bool() != Some(true) {
        let description = body["description"].as_str().unwrap_or("unknown error");
        log::warn!("❌ Bot API rejected the document: {}", description);
        return Err(AppError::Upstream(format!(
            "Bot API rejected the document: {}",
            description
        )));
    }

    log::info!(
        "✅ Homework relayed: {} ({})",
        submission.file_name,
        submission.lesson_title
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_caption_includes_all_fields() {
        let caption = build_caption("Sokha", "Formatting text", "my first try");
        assert!(caption.contains("Sokha"));
        assert!(caption.contains("Formatting text"));
        assert!(caption.contains("my first try"));
    }

    #[test]
    fn test_caption_empty_message_placeholder() {
        let caption = build_caption("Sokha", "Formatting text", "   ");
        assert!(caption.contains("(none)"));
    }
}
