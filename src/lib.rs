pub mod config;
pub mod error;
pub mod fetcher;
pub mod format;
pub mod harvest;
pub mod model;
pub mod parser;
pub mod storage;
pub mod utils;
pub mod xml;
