//! i-menu slot table: item catalog and byte codec.

mod catalog;
pub mod codec;

pub use catalog::*;
pub use codec::{Slots, validate_slot_value};
