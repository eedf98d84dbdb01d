pub mod tracing;
pub mod workspace;

pub use tracing::{CapturedEvent, EventCapture, capture_events};
pub use workspace::TestWorkspace;
