mod enums;
mod model;

pub use enums::*;
pub use model::*;
