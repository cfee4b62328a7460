pub mod config;
pub mod dashboard;
pub mod errors;
pub mod insights;
pub mod llm_client;
pub mod routes;
pub mod state;
