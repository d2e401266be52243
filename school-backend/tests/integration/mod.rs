// tests/integration/mod.rs

pub mod middleware;
