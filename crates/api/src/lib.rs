//! HTTP API: form endpoints for invoice create/edit/delete.

pub mod app;
pub mod middleware;
pub mod navigation;
