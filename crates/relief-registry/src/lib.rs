pub mod observer;
pub mod policy;
pub mod query;
mod registry;
mod seed;
mod shared;

pub use observer::{RegistryEvent, RegistryObserver};
pub use policy::TransitionPolicy;
pub use query::{ReportStats, SearchFilter, SortKey, UrgencyCounts};
pub use registry::ReportRegistry;
pub use shared::SharedRegistry;
