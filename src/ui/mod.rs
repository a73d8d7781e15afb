pub mod ci;
pub mod error;
pub mod json;
pub mod progress;
pub mod terminal;
pub mod theme;
