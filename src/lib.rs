pub mod config;
pub mod consensus;
pub mod discordance;
pub mod input;
pub mod models;
pub mod orchestrator;
pub mod render;
pub mod report;
pub mod sentences;
pub mod similarity;
pub mod vectorize;
pub mod viz_export;

pub use config::AnalysisConfig;
pub use models::{AnalysisReport, ConsensusItem, DiscordanceItem, Document, Statistics};
pub use report::analyze_documents;
