//! Résumé typesetter: classifies the lines of a plain-text résumé and lays them out
//! onto fixed-size pages as a backend-agnostic render plan.

pub mod classify;
pub mod config;
pub mod errors;
pub mod layout;
pub mod llm_client;
pub mod matching;
pub mod pipeline;
pub mod render;
pub mod routes;
pub mod state;
pub mod text;
