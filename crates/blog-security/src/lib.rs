//! # Blog Security
//! 
//! Security utilities: JWT access tokens and password hashing.

pub mod jwt;
pub mod password;

pub use jwt::{Claims, JwtService};
pub use password::PasswordService;
