pub mod ai_service;
pub mod groq; // Groq vision model
pub mod image_host;
pub mod imgbb; // ImgBB image hosting

pub use ai_service::{AnalysisError, VisionAnalyzer};
pub use groq::GroqClient;
pub use image_host::{HostError, ImageHost};
pub use imgbb::ImgbbClient;
