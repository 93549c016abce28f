//! Auth domain - session token verification
//!
//! Login, registration and password handling live outside this service;
//! requests arrive with a signed token naming the member and their role.

pub mod jwt;

pub use jwt::{Claims, JwtService};
