//! Gateway types module
//!
//! - [`response`]: `ApiError`, error codes and the error body
//! - [`extract`]: `Json`/`Query`/`Path` wrappers rejecting with `ApiError`
//! - [`page`]: `skip`/`limit` parameters and their bounds

pub mod extract;
pub mod page;
pub mod response;

pub use extract::{ApiJson, ApiPath, ApiQuery};
pub use page::{PageLimits, PageParams};
pub use response::{ApiError, ErrorBody, ErrorCode};
