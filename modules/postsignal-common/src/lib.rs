pub mod config;
pub mod criteria;
pub mod error;
pub mod numeric;
pub mod query;

pub use config::Config;
pub use criteria::{
    ensure_valid, validate, violations, CriteriaViolation, InvalidCriteria, PostSearchCriteria,
    PostSearchCriteriaBuilder, SortDirection, SortField,
};
pub use error::PostSignalError;
pub use numeric::{count_from_json, parse_count};
pub use query::{search, SearchPage};

pub use postsignal_world::*;
