//! Calendar view over scheduled content.
//!
//! Read-only: items get a `scheduledDate` through the content endpoints and
//! show up here. Nothing is published automatically.

pub mod dtos;
pub mod handlers;
pub mod routes;
