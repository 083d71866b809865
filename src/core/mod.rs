pub mod records;
pub mod report;
pub mod row;
pub mod split;

pub use records::{ActorRecord, EnrichedPair, LabeledExample, Pair};
pub use report::{LabelStats, PipelineReport, SplitReport};
pub use row::{Group, Row};
pub use split::{Split, SplitData};
