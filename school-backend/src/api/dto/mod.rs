// school-backend/src/api/dto/mod.rs
pub mod permission_dto;

pub use crate::types::ApiResponse;
