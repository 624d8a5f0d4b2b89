//! Core skill types and logic

pub mod discovery;
pub mod index;
pub mod parser;
pub mod prompt;
pub mod search;
pub mod skill;
pub mod tokens;
pub mod usage;
pub mod validation;

pub use discovery::{DEFAULT_DESCRIPTOR, DiscoveryError, Scanner};
pub use index::{Collision, IndexDiagnostics, SkillIndex};
pub use parser::{DescriptorParser, ParsedDescriptor};
pub use search::{MatchTier, SearchQuery};
pub use skill::{SkillContent, SkillMetadata, SkillType};
pub use tokens::TokenEstimator;
pub use usage::{OperationKind, SkillUsage, UsageStats};
pub use validation::ValidationWarning;
