//! Application-wide constants

pub const DEFAULT_PAGE_SIZE: u32 = 6;
pub const MAX_PAGE_SIZE: u32 = 100;
pub const SUMMARY_LENGTH: usize = 100;
pub const TOKEN_TYPE_ACCESS: &str = "access";
pub const DEFAULT_ACCESS_TOKEN_EXPIRY: i64 = 86400;
pub const BCRYPT_COST: u32 = 10;
