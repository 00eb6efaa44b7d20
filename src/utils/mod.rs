pub mod picker;
pub mod slots;

pub use picker::{display_order, pick_direct, pick_rejection};
pub use slots::{build_slots, eligible_slots};
