pub mod analysis;

pub use analysis::{AnalysisHandler, NUTRITION_PROMPT};
