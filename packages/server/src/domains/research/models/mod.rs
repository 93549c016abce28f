pub mod research_link;

pub use research_link::*;
