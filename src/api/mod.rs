//! Dashboard-facing API
//!
//! Display state and formatting, the session that owns platform handles, the
//! latest-reading pipeline and the ambient light theme controller.

pub mod types;
pub mod formatting;
pub mod session;
pub mod nonblocking;
pub mod theme;

pub use types::{ApplyOutcome, DisplayState, OutputFormat, Sequence};
pub use formatting::{formatter_for, DisplayFormatter, JsonFormatter, TextFormatter};
pub use session::{Session, SessionState};
pub use nonblocking::{AdvisoryPipeline, PipelineStats, ProcessedUpdate, RequestHandle};
pub use theme::{Theme, ThemeController};
