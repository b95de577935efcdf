pub mod analytics;
pub mod args;
pub mod broker;
pub mod distance;
pub mod filter;
pub mod pad;
pub mod payload;
pub mod plugin;
pub mod value;
