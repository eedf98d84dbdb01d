pub mod catalog;
pub mod cli;
pub mod commit;
pub mod conf;
pub mod dedup;
pub mod enrichment;
pub mod filter;
pub mod loader;
pub mod logging;
pub mod parse;
pub mod pipeline;
pub mod resolve;
pub mod store;
pub mod types;
