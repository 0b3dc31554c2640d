/// Default page size for pagination
pub const DEFAULT_PAGE_SIZE: i64 = 10;

/// Maximum page size allowed
pub const MAX_PAGE_SIZE: i64 = 100;

/// Body of the `GET /` endpoint
pub const WELCOME_MESSAGE: &str = "Welcome to the Content Calendar API";
