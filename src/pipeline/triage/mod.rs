pub mod rules;
pub mod department;
pub mod engine;

pub use rules::*;
pub use department::*;
pub use engine::*;
