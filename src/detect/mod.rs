mod structural;
mod policy;
mod differ;
mod critical;
mod verifier;

pub use structural::{StructuralDetector, StructuralVerdict};
pub use policy::PolicyExtractor;
pub use differ::{SentenceDiff, SentenceDiffer};
pub use critical::{CriticalScan, CriticalTermScanner};
pub use verifier::{ChangeVerifier, Verification};
