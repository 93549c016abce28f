//! Figures domain - historical figures, optionally attributed to a kingdom

pub mod models;

pub use models::{CreateFigure, Figure, FigureListing};
