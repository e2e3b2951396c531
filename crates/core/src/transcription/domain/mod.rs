pub mod engine;
pub mod error;
pub mod language;
pub mod params;
pub mod segment;
