//! Common library for the gallery catalog service
//!
//! This crate provides shared functionality used across the services of the
//! community-website backend, including the catalog error taxonomy and the
//! process-lifetime remote listing cache.

pub mod cache;
pub mod error;
