//! Service layer for provider records.
//! - `ProviderService` exposes the five resource operations.
//! - Persistence sits behind `ProviderRepository` so the store can be swapped in tests.

pub mod errors;
pub mod provider;
#[cfg(test)]
pub mod test_support;
