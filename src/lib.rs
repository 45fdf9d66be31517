pub mod app;
pub mod backend;
pub mod bootstrap;
pub mod config;
pub mod cron;
pub mod records;
pub mod shared;
pub mod submission;
pub mod validators;
pub mod views;
pub mod wizard;
