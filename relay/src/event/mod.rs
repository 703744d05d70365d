//! GitHub webhook event handling.
//!
//! Decodes the push payload and derives the template parameters passed on to
//! Azure DevOps.
//!
//! ## Processing Flow
//!
//! ```text
//! raw body → PushEvent::from_slice() → extract_parameters() → TemplateParameters
//! ```

pub mod extract;
pub mod types;

pub use extract::{environment_from_ref, extract_parameters, repository_name_from_full_name};
pub use types::{PushEvent, Repository, BRANCH_REF_PREFIX, DEFAULT_REF};
