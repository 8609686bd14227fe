//! Feasibility scoring and matching of needs against capacities.

pub mod context;
pub mod feasibility;
pub mod matcher;
pub mod record;
pub mod score;
pub mod scoring;

mod error;

pub use context::{MatchContext, TrustWeights};
pub use error::{Error, Result};
pub use feasibility::{Evaluator, FeasibilityStatus, classify};
pub use matcher::{Candidate, MatchOutcome, MatchRequest, Matcher};
pub use record::{MatchIds, MatchRecord, RecordExtras, build_match_record};
pub use score::{Breakdown, Dimension, Score, ScoreDetail, SkillCheck, SkillSide};
