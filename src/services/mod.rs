pub mod auth_service;
pub mod feedback_service;
pub mod homework_service;
pub mod upload_service;
