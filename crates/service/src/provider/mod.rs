pub mod repository;
pub mod service;

pub use repository::{ProviderRepository, SeaOrmProviderRepository};
pub use service::ProviderService;
