//! Backend service handlers for frontend-driven requests.
//!
//! This module groups async request handlers that operate on the shared
//! `AppContext`, perform side effects (network, subprocess, filesystem), and
//! emit results or notifications back to the frontend.

pub mod capture_service;
pub mod config_service;
pub mod convert_service;
pub mod library_service;
pub mod overlay_service;
pub mod scrape_service;

/// Represents a type that is used in all handlers as an application context.
pub(crate) type AppContextHandle = std::sync::Arc<crate::app::AppContext>;
