//! Pure search-session model: parameters, result items, the pagination cursor, and the
//! decisions that drive incremental loading. Nothing in here performs I/O.

pub mod cursor;
pub mod hybrid;
pub mod item;
pub mod paging;
pub mod params;
pub mod wire;

mod error;

pub use cursor::PaginationCursor;
pub use error::{Error, Result};
pub use hybrid::{BALANCED_HYBRID_WEIGHT, KEYWORD_HYBRID_WEIGHT, derive_hybrid_weight};
pub use item::ResultItem;
pub use paging::{PagingPolicy, auto_continue_threshold, has_more};
pub use params::{BackendMode, DistanceStrategy, Filters, ParameterPatch, SearchParameters};
pub use wire::{DistanceBound, SearchPage, SearchRequest};
