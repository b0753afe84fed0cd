pub mod error;
pub mod config;
pub mod snapshot;
pub mod text;
pub mod similarity;
pub mod detect;
pub mod classify;
pub mod diff;
pub mod monitor;

pub use error::{PolicyDriftError, Result};
pub use config::{BoilerplateRule, EngineConfig, MagnitudeBands};
pub use snapshot::{ContentHash, RawSnapshot, Snapshot};
pub use text::{split_sentences, BreadcrumbStripper, Normalizer, SentenceProfile, Vocabulary};
pub use similarity::{jaccard, SimilarityStrategy};
pub use detect::{
    ChangeVerifier, CriticalScan, CriticalTermScanner, PolicyExtractor, SentenceDiff, SentenceDiffer,
    StructuralDetector, StructuralVerdict, Verification,
};
pub use classify::{classify, AssessmentSignals, ChangeAssessment, ChangeEngine, Classification, Signals, Tier};
pub use diff::{format_document_diff, format_sentence_diff, has_changes};
pub use monitor::{AssessmentTableRow, ChangeMonitor, InMemorySnapshotStore, MonitorEntry, MonitorFailure, MonitorReport, SnapshotStore};
