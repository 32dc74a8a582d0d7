pub mod common;
pub mod config;
pub mod frame;
pub mod logging;
pub mod parser;
pub mod pipeline;
pub mod sample;
pub mod schema;
pub mod storage;
