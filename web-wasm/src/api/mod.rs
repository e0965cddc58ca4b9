//! Remote calls made from the browser

pub mod gemini;

pub use gemini::analyze_image;
