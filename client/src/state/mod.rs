//! Session state: view-model entities, form inputs, and derived views.
//!
//! DESIGN
//! ======
//! The store is an explicit value handed to whoever needs it. Derived views
//! (`board`, `timeline`, `dashboard`) are free functions over slices so they
//! never hold a borrow on the store longer than a render pass.

pub mod app;
pub mod auth;
pub mod board;
pub mod dashboard;
pub mod forms;
pub mod model;
pub mod timeline;
