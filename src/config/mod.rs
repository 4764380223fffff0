//! Configuration module for webmirror
//!
//! Configuration is optional: every key has a default matching the
//! reference crawl behavior (depth 20, output directory `scraped`), and a
//! TOML file can override them.

mod parser;
mod types;
mod validation;

pub use parser::load_config;
pub use types::{Config, CrawlerConfig, OutputConfig};
pub use validation::validate;
