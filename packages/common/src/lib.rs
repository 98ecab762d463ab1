pub mod confidentiality;
pub mod indicator;
pub mod relation;
pub mod signing;
pub mod status;
pub mod storage;

pub use confidentiality::Confidentiality;
pub use indicator::UsageIndicator;
pub use relation::{ObjectType, RelationKind};
pub use signing::{ChecksumAlgorithm, SignatureKind};
pub use status::DocumentStatus;
