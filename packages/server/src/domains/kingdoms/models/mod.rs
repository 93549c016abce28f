pub mod kingdom;

pub use kingdom::*;
