//! Users of the content calendar.
//!
//! Passwords arrive already hashed; this feature only stores them and never
//! returns them.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Description |
//! |--------|----------|-------------|
//! | POST | `/api/users` | Create a user |
//! | GET | `/api/users` | List users |
//! | GET | `/api/users/{id}` | Get a user |
//! | DELETE | `/api/users/{id}` | Delete a user that owns no content |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

pub use services::UserService;
