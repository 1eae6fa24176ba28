mod base;
mod bit_filter;
mod counting_filter;

pub(crate) use self::base::sealed::{ClearSlots, SlotStore};
pub use self::base::{Filter, RemovableFilter};
pub use self::bit_filter::BitFilter;
pub use self::counting_filter::CountingFilter;
