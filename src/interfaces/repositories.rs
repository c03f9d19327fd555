pub mod contact;
pub mod notifier;
pub mod sqlx_repo;
