use serde::{Deserialize, Serialize};

/// Claims carried by the bearer tokens issued at login. `sub` holds the
/// user's email address.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct TokenClaim {
    pub sub: String,
    pub iat: usize,
    pub exp: usize,
}
