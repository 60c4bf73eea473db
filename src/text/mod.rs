pub mod indicators;

pub use indicators::analyze_text;
