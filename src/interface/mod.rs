pub mod input;
pub mod mcp;
