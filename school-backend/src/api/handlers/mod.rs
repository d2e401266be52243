// school-backend/src/api/handlers/mod.rs
pub mod permission_handler;
pub mod system_handler;
