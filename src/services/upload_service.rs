use crate::utils::AppError;
use uuid::Uuid;

const ALLOWED_EXTENSIONS: [&str; 4] = ["jpg", "jpeg", "png", "webp"];

pub fn upload_dir() -> String {
    std::env::var("UPLOAD_DIR").unwrap_or_else(|_| "./uploads".to_string())
}

fn image_extension(file_name: &str) -> Result<String, AppError> {
    let ext = file_name
        .rsplit('.')
        .next()
        .filter(|e| *e != file_name)
        .map(str::to_lowercase)
        .unwrap_or_default();

    if ALLOWED_EXTENSIONS.contains(&ext.as_str()) {
        Ok(ext)
    } else {
        Err(AppError::Validation(
            "Avatar must be a jpg, jpeg, png or webp image".into(),
        ))
    }
}

/// Writes the uploaded avatar under UPLOAD_DIR with a fresh uuid name and
/// returns the public URL path served by the /uploads mount.
pub async fn save_avatar(file_name: &str, bytes: &[u8]) -> Result<String, AppError> {
    if bytes.is_empty() {
        return Err(AppError::Validation("Uploaded avatar is empty".into()));
    }
    let ext = image_extension(file_name)?;

    let dir = upload_dir();
    tokio::fs::create_dir_all(&dir)
        .await
        .map_err(|e| AppError::Internal(format!("Failed to create upload dir: {}", e)))?;

    let stored_name = format!("{}.{}", Uuid::new_v4(), ext);
    let path = format!("{}/{}", dir.trim_end_matches('/'), stored_name);

    tokio::fs::write(&path, bytes)
        .await
        .map_err(|e| AppError::Internal(format!("Failed to store avatar: {}", e)))?;

    log::info!("✅ Avatar stored: {}", path);

    Ok(format!("/uploads/{}", stored_name))
}

fn stored_file_name(url_path: &str) -> Option<&str> {
    let name = url_path.strip_prefix("/uploads/")?;
    if name.is_empty() || name.contains('/') || name.contains("..") {
        return None;
    }
    Some(name)
}

/// Best-effort removal of a previously stored file. Bundled assets and
/// anything outside the /uploads mount are left alone, and a missing
/// file is not an error.
pub async fn remove_stored(url_path: &str) {
    if let Some(name) = stored_file_name(url_path) {
        let path = format!("{}/{}", upload_dir().trim_end_matches('/'), name);
        if let Err(e) = tokio::fs::remove_file(&path).await {
            log::debug!("Old upload not removed ({}): {}", path, e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stored_file_name_only_matches_uploads() {
        assert_eq!(stored_file_name("/uploads/a1b2.png"), Some("a1b2.png"));
        assert_eq!(stored_file_name("/assets/default-avatar.png"), None);
        assert_eq!(stored_file_name("/uploads/"), None);
        assert_eq!(stored_file_name("/uploads/../secrets.txt"), None);
        assert_eq!(stored_file_name("/uploads/nested/file.png"), None);
    }

    #[test]
    fn test_extension_whitelist() {
        assert_eq!(image_extension("me.PNG").unwrap(), "png");
        assert_eq!(image_extension("photo.tag.jpeg").unwrap(), "jpeg");
        assert!(image_extension("script.exe").is_err());
        assert!(image_extension("noextension").is_err());
        assert!(image_extension("archive.tar.gz").is_err());
    }
}
