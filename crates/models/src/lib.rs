//! Persistence model for provider records: entity, identifier, field
//! constraints and connection helpers.

pub mod errors;
pub mod db;
pub mod provider;

#[cfg(test)]
mod tests;
