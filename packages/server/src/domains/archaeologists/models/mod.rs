pub mod archaeologist;

pub use archaeologist::*;
