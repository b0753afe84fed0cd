mod store;
mod pipeline;
mod table;

pub use store::{InMemorySnapshotStore, SnapshotStore};
pub use pipeline::{ChangeMonitor, MonitorEntry, MonitorFailure, MonitorReport};
pub use table::AssessmentTableRow;
