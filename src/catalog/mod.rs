pub mod normalize;
pub mod search;

pub use normalize::normalize;
pub use search::{LIST_SEARCH_FIELDS, SearchField, Searchable, filter};
