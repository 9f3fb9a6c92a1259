pub mod chunk;
pub mod client;
pub mod config;
pub mod docx;
pub mod endpoints;
pub mod error;
pub mod extract;
pub mod orchestrator;
pub mod output;
pub mod progress;
pub mod response;
