pub mod auth;
pub mod chart;
pub mod config;
pub mod db;
pub mod errors;
pub mod experiences;
pub mod llm_client;
pub mod models;
pub mod organizer;
pub mod report;
pub mod routes;
pub mod state;
