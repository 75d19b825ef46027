pub mod app;
pub mod config;
pub mod mapping_file;

mod platform;

pub mod utils;

#[cfg(test)]
mod tests;
