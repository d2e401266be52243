// school-backend/src/domain/mod.rs
pub mod permission;
pub mod role_model;
pub mod role_table;
pub mod user_model;
