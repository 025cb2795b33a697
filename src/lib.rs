pub mod config;
pub mod humanize;
pub mod observability;
pub mod pipeline;
pub mod source;
pub mod storage;
pub mod worker;
