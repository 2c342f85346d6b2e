pub mod ai_service;
pub mod gemini; // Google Gemini multimodal API
pub mod ingestion;

pub use ai_service::VisionService;
pub use gemini::GeminiService;
