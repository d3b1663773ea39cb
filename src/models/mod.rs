pub mod feature;
pub mod record;
pub mod decision;
pub mod attribution;
pub mod narrative;
pub mod trend;

pub use feature::*;
pub use record::*;
pub use decision::*;
pub use attribution::*;
pub use narrative::*;
pub use trend::*;
