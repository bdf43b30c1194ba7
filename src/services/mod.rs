// src/services/mod.rs
// DOCUMENTATION: Services module organization
// PURPOSE: Re-export service components

pub mod local_storage;
pub mod photo_service;
pub mod s3_storage;
pub mod storage;

pub use local_storage::*;
pub use photo_service::*;
pub use s3_storage::*;
pub use storage::*;
