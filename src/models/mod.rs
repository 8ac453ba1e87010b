pub mod search;
pub mod sort;

pub use search::SearchRequest;
pub use sort::{Sort, SortMode, SortOrder};
