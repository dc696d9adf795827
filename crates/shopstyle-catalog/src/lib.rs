pub mod client;
pub mod envelope;
pub mod error;
pub mod fetch;
pub mod products;
pub mod reference;
pub(crate) mod retry;
pub mod selection;
pub mod session;

pub use client::CatalogClient;
pub use envelope::ApiEnvelope;
pub use error::CatalogError;
pub use fetch::Fetch;
pub use products::ProductCache;
pub use reference::ReferenceCache;
pub use selection::SelectionSet;
pub use session::SsData;
