pub mod claims;
pub mod role;
pub mod token;
