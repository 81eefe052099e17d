//! Networking modules for the REST backend.
//!
//! SYSTEM CONTEXT
//! ==============
//! `types` mirrors backend JSON, `normalize` and `payloads` are the single
//! translation boundary into and out of the view model, and `api` performs
//! the HTTP calls.

pub mod api;
pub mod error;
pub mod normalize;
pub mod payloads;
pub mod types;
