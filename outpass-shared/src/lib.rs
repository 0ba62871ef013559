pub mod pii;
pub mod paging;

pub use pii::Masked;
pub use paging::{PageRequest, PagingError};
