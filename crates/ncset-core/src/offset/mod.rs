mod candidate;
mod generation;
mod registry;
mod searcher;

pub use candidate::*;
pub use generation::*;
pub use registry::*;
pub use searcher::*;
