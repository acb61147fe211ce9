pub mod catalog;
pub mod config;
pub mod download;
pub mod filter;
pub mod review;
pub mod view;
