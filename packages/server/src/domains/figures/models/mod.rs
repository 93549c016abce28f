pub mod figure;

pub use figure::*;
