pub mod config;
pub mod csv_file;
pub mod discord;
pub mod division;
pub mod error;
pub mod handler;
pub mod logging;
pub mod model;
pub mod normalize;
pub mod report;
pub mod resolver;
pub mod schedule;
pub mod ttm;
