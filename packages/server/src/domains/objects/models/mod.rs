pub mod found_object;

pub use found_object::*;
