// src/db/mod.rs
// DOCUMENTATION: Database module organization
// PURPOSE: Re-export database components

pub mod memory_store;
pub mod photo_repository;
pub mod photo_store;

pub use memory_store::*;
pub use photo_repository::*;
pub use photo_store::*;
