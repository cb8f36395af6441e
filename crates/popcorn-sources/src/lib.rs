pub mod error;
pub mod factory;
pub mod omdb;
pub mod traits;

pub use error::CatalogError;
pub use factory::create_catalog_source;
pub use omdb::OmdbClient;
pub use traits::CatalogSource;
