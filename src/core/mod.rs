// src/core/mod.rs
pub mod accountant;
pub mod dictionary;
pub mod diversity;
pub mod engine;
pub mod matcher;
pub mod pos;
pub mod types;
pub mod universe;
