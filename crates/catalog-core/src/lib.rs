//! # catalog-core
//!
//! Model and workflows for the catalog back-office: categories, tags and
//! product variants.
//!
//! The remote API is reached only through the [`CatalogStore`] and
//! [`OptionService`] traits; this crate contains no transport. The central
//! workflow is the variant edit:
//!
//! ```ignore
//! use catalog_core::VariantEditSession;
//!
//! let mut session = VariantEditSession::load(&store, "v1").await?;
//! session.remove_option("Blue");
//! session.add_option("Green");
//! let outcome = session.submit(&store, &store).await?;
//! ```

pub mod apply;
pub mod error;
pub mod filter;
pub mod model;
pub mod reconcile;
pub mod session;
mod traits;
pub mod validation;

pub use apply::{ApplyReport, apply_diff};
pub use error::{CatalogError, Result, ServiceError};
pub use filter::{Searchable, search, sort_by_name};
pub use model::{
    Category, CategoryDraft, NewVariant, OptionValue, Tag, TagDraft, Variant, VariantOption,
    VariantUpdate,
};
pub use reconcile::{OptionsDiff, reconcile, sanitize_options};
pub use session::{SubmitOutcome, VariantEditSession};
pub use traits::{CatalogStore, OptionService};
pub use validation::{FieldError, ValidationErrors};
