//! Headless engine for a movie discovery UI: debounced search, a selection store
//! that fetches recommendations, and client-side paging with a detail overlay.

pub mod api;
pub mod config;
pub mod error;
pub mod middleware;
pub mod models;
pub mod services;
