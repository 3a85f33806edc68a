//! Clients for the hosted inference endpoint.

pub mod groq_api_agent;

pub use groq_api_agent::{API_KEY_ENV, GroqApiAgent};
