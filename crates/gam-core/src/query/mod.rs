// ── Query layer ──
//
// Keyed read-through cache plus list view state. Reads flow through
// [`QueryCache`] so repeated renders of the same view hit the network
// at most once per staleness window; mutations invalidate by scope.

pub mod cache;
pub mod key;
pub mod list;

pub use cache::{InvalidationScope, QueryCache};
pub use key::{QueryKey, Resource};
pub use list::{ColumnSpec, ListController, PageSummary, PAGE_SIZES};
