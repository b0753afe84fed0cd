mod tier;
mod assessment;
mod classifier;
mod engine;

pub use tier::Tier;
pub use assessment::{AssessmentSignals, ChangeAssessment};
pub use classifier::{classify, Classification, Signals};
pub use engine::ChangeEngine;
