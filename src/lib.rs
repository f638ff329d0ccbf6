//! Video game catalogue backend.
//!
//! Provides:
//! - Soft-delete aware CRUD for genres, platforms, companies and video games
//! - Transactional create/update of a video game together with its genre,
//!   platform, publisher and developer links
//! - A REST API over the service layer

pub mod config;
pub mod db;
pub mod entities;
pub mod error;
pub mod repository;
pub mod routes;
pub mod services;
pub mod state;
