pub mod compare;
pub mod controller;
pub mod filter;
pub mod location;

pub use compare::CompareView;
pub use controller::{BrowseController, BrowseOptions};
pub use filter::{BrowseFilter, Facet};
pub use location::{Location, LocationSearch};
