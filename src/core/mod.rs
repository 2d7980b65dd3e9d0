pub mod config;
pub mod element;
pub mod port;
pub mod port_cache;
pub mod registry;
pub mod types;

#[cfg(test)]
mod tests;
