pub mod auth;
pub mod courses;
pub mod feedback;
pub mod health;
pub mod homework;
pub mod swagger;
