pub mod error;
pub mod io;
pub mod models;
pub mod scoring;
pub mod stages;

pub use error::{Error, Result};
pub use io::{parse_transcript, read_transcript, JsonReport, ScoreTable, TimelineText};
pub use models::{ClassifiedLine, Conversation, RawLine, Timeline, Turn};
pub use scoring::{score_all, MetricScore, ScoreReport, ScoringConfig};
pub use stages::{build_timeline, classify, TimelineConfig};
