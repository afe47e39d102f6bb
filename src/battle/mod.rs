pub mod engine;
pub mod events;
pub mod policy;
pub mod resolution;
pub mod rng;
pub mod scheduler;

#[cfg(test)]
mod tests;
