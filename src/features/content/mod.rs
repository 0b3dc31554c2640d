//! Content items planned on the calendar.
//!
//! Every item belongs to exactly one user. `updated_at` starts equal to
//! `created_at` and moves strictly forward on each update.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Description |
//! |--------|----------|-------------|
//! | POST | `/api/content` | Create an item |
//! | GET | `/api/content` | List items (filter by status, user, type) |
//! | GET | `/api/content/{id}` | Get an item |
//! | PUT | `/api/content/{id}` | Update an item |
//! | DELETE | `/api/content/{id}` | Delete an item |
//! | GET | `/api/users/{id}/content` | Items owned by a user |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

pub use services::ContentService;
