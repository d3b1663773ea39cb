pub mod extraction;
pub mod features;
pub mod triage;
pub mod explain;
pub mod narrative;
pub mod trend;
pub mod processor;

pub use extraction::*;
pub use features::*;
pub use triage::*;
pub use explain::*;
pub use narrative::*;
pub use trend::*;
pub use processor::*;
