pub mod feedback;
pub mod user;

pub use feedback::*;
pub use user::*;
