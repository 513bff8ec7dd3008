pub mod dependency_map;
pub mod dialect;
pub mod history;

pub use dependency_map::{DependencyMap, UNPINNED_VERSION};
pub use dialect::Dialect;
pub use history::HistoryRecord;
