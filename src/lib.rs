//! MCP server exposing Sarvam translation, transliteration and language
//! identification as tools.

pub mod catalog;
pub mod config;
pub mod error;
pub mod mcp;
pub mod provider;
pub mod server;
pub mod tools;
