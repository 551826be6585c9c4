pub mod movie;
pub mod user_preference;
