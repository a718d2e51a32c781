//! Core services: listing, form validation, and post mutation.

mod form;
mod listing;
mod pagination;
mod posts;

pub use form::{FieldErrors, PostForm, PostInput, Validated, ValidatedPost};
pub use listing::{Feed, ListingService};
pub use pagination::{PAGE_SIZE, PageRequest, Pager};
pub use posts::{CreateOutcome, EditOutcome, PostService};
