//! # pm-client
//!
//! Client core for the project-management workspace: typed backend records,
//! the normalizer that turns them into the UI view model (and back into
//! request payloads), the session state store, and a thin REST client.
//!
//! Rendering lives elsewhere; everything here is plain data and async HTTP.

pub mod config;
pub mod net;
pub mod state;
