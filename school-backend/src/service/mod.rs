// school-backend/src/service/mod.rs
pub mod guard_service;
