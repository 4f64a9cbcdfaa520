// Module declarations
pub mod config;
pub mod export;
pub mod gateway;
pub mod models;
pub mod prompts;
pub mod research;
pub mod server;
pub mod storage;
pub mod views;

// Re-export the domain types for use in handlers and tests
pub use models::{
    Aspect, ResearchRequest, ResearchResult, ResearchTopic, Study, StudyError, FULL_COMPARISON,
};
