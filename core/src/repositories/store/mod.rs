//! Key-value store port with TTLs, sets and counters.

mod r#trait;
pub use r#trait::KeyValueStore;

mod memory;
pub use memory::InMemoryStore;

#[cfg(test)]
mod tests;
