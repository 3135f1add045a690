pub mod require_jwt;

pub use require_jwt::{CurrentUser, RequireJWT};
