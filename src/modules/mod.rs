pub mod attr;
pub mod config;
pub mod dynamo;
pub mod error;
pub mod product;
