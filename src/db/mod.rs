// src/db/mod.rs
// DOCUMENTATION: Database module organization
// PURPOSE: Re-export database components

pub mod photo_repository;

pub use photo_repository::*;
