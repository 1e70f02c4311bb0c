//! Edit session for a variant's name and options.
//!
//! The session captures the options as loaded, lets the caller mutate a
//! working copy locally and, on submit, sends a base-fields update followed by
//! the per-option additions and removals computed by [`reconcile`].

use tracing::{debug, info};

use crate::apply::{ApplyReport, apply_diff};
use crate::error::{CatalogError, Result};
use crate::model::{Variant, VariantOption, VariantUpdate};
use crate::reconcile::{OptionsDiff, reconcile, sanitize_options};
use crate::traits::{CatalogStore, OptionService};
use crate::validation::validate_variant_edit;

/// Result of a successful submit.
#[derive(Debug, Clone)]
pub struct SubmitOutcome {
    /// Variant as returned by the base-fields update.
    pub variant: Variant,
    pub report: ApplyReport,
}

#[derive(Debug, Clone)]
pub struct VariantEditSession {
    variant_id: String,
    name: String,
    original: Vec<VariantOption>,
    current: Vec<VariantOption>,
}

impl VariantEditSession {
    /// Seeds a session from an already fetched variant.
    #[must_use]
    pub fn new(variant: Variant) -> Self {
        Self {
            variant_id: variant.id,
            name: variant.name,
            current: variant.options.clone(),
            original: variant.options,
        }
    }

    /// Fetches the variant and seeds a session from it.
    pub async fn load(store: &dyn CatalogStore, variant_id: &str) -> Result<Self> {
        let variant = store.get_variant(variant_id).await?;
        debug!(
            variant_id = %variant_id,
            options = variant.options.len(),
            "Loaded variant for editing"
        );
        Ok(Self::new(variant))
    }

    pub fn variant_id(&self) -> &str {
        &self.variant_id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Options as loaded at session start.
    pub fn original(&self) -> &[VariantOption] {
        &self.original
    }

    /// Working copy of the options.
    pub fn options(&self) -> &[VariantOption] {
        &self.current
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// Adds an option to the working copy.
    ///
    /// Blank input and exact duplicates of a current value are ignored. A value
    /// that belonged to a persisted option removed earlier in this session is
    /// restored with its identifier instead of being queued as new.
    ///
    /// Returns `true` if the working copy changed.
    pub fn add_option(&mut self, value: &str) -> bool {
        let value = value.trim();
        if value.is_empty() || self.current.iter().any(|o| o.value == value) {
            return false;
        }

        let restored = self
            .original
            .iter()
            .find(|o| {
                o.value == value
                    && o.id.as_deref().is_some_and(|id| {
                        !self.current.iter().any(|c| c.id.as_deref() == Some(id))
                    })
            })
            .cloned();

        self.current
            .push(restored.unwrap_or_else(|| VariantOption::new(value)));
        true
    }

    /// Removes the option with this value, trimmed the same way as
    /// [`add_option`](Self::add_option). Returns `true` if one was removed.
    pub fn remove_option(&mut self, value: &str) -> bool {
        let value = value.trim();
        match self.current.iter().position(|o| o.value == value) {
            Some(index) => {
                self.current.remove(index);
                true
            }
            None => false,
        }
    }

    /// Remote changes the current working copy would produce.
    #[must_use]
    pub fn pending_diff(&self) -> OptionsDiff {
        reconcile(&self.original, &self.current)
    }

    /// Runs field validation without sending anything.
    pub fn validate(&self) -> Result<()> {
        validate_variant_edit(&self.name, self.current.iter().map(|o| o.value.as_str()))?;
        Ok(())
    }

    /// Validates, sends the base-fields update, then reconciles options.
    ///
    /// A failed base update aborts before any option call. Option calls stop at
    /// the first failure and are not rolled back.
    pub async fn submit(
        self,
        store: &dyn CatalogStore,
        options: &dyn OptionService,
    ) -> Result<SubmitOutcome> {
        self.validate()?;

        let update = VariantUpdate {
            name: self.name.trim().to_string(),
            options: sanitize_options(&self.current),
        };
        let variant = store
            .update_variant(&self.variant_id, &update)
            .await
            .map_err(|e| CatalogError::remote_update(&e))?;

        let diff = reconcile(&self.original, &self.current);
        let report = apply_diff(options, &self.variant_id, &diff).await?;

        info!(
            variant_id = %self.variant_id,
            added = report.added.len(),
            removed = report.removed.len(),
            "Variant saved"
        );
        Ok(SubmitOutcome { variant, report })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;

    use super::*;
    use crate::apply::tests::RecordingService;
    use crate::error::ServiceError;
    use crate::model::{Category, CategoryDraft, NewVariant, Tag, TagDraft};

    fn sample() -> Variant {
        Variant {
            id: "v1".to_string(),
            name: "Color".to_string(),
            options: vec![
                VariantOption::persisted("1", "Red"),
                VariantOption::persisted("2", "Blue"),
            ],
        }
    }

    /// Only the variant calls are reachable from a session.
    struct VariantOnlyStore {
        variant: Variant,
        fail_update: bool,
        updates: Mutex<Vec<VariantUpdate>>,
    }

    impl VariantOnlyStore {
        fn new(fail_update: bool) -> Self {
            Self {
                variant: sample(),
                fail_update,
                updates: Mutex::new(Vec::new()),
            }
        }
    }

    fn unsupported<T>() -> std::result::Result<T, ServiceError> {
        Err(ServiceError::new(405, "unsupported"))
    }

    #[async_trait]
    impl CatalogStore for VariantOnlyStore {
        async fn list_categories(&self) -> std::result::Result<Vec<Category>, ServiceError> {
            unsupported()
        }
        async fn get_category(&self, _: &str) -> std::result::Result<Category, ServiceError> {
            unsupported()
        }
        async fn create_category(
            &self,
            _: &CategoryDraft,
        ) -> std::result::Result<Category, ServiceError> {
            unsupported()
        }
        async fn update_category(
            &self,
            _: &str,
            _: &CategoryDraft,
        ) -> std::result::Result<Category, ServiceError> {
            unsupported()
        }
        async fn delete_category(&self, _: &str) -> std::result::Result<(), ServiceError> {
            unsupported()
        }
        async fn list_tags(&self) -> std::result::Result<Vec<Tag>, ServiceError> {
            unsupported()
        }
        async fn get_tag(&self, _: &str) -> std::result::Result<Tag, ServiceError> {
            unsupported()
        }
        async fn create_tag(&self, _: &TagDraft) -> std::result::Result<Tag, ServiceError> {
            unsupported()
        }
        async fn update_tag(&self, _: &str, _: &TagDraft) -> std::result::Result<Tag, ServiceError> {
            unsupported()
        }
        async fn delete_tag(&self, _: &str) -> std::result::Result<(), ServiceError> {
            unsupported()
        }
        async fn list_variants(&self) -> std::result::Result<Vec<Variant>, ServiceError> {
            Ok(vec![self.variant.clone()])
        }
        async fn get_variant(&self, id: &str) -> std::result::Result<Variant, ServiceError> {
            if id == self.variant.id {
                Ok(self.variant.clone())
            } else {
                Err(ServiceError::not_found("Variant", id))
            }
        }
        async fn create_variant(
            &self,
            _: &NewVariant,
        ) -> std::result::Result<Variant, ServiceError> {
            unsupported()
        }
        async fn update_variant(
            &self,
            _: &str,
            update: &VariantUpdate,
        ) -> std::result::Result<Variant, ServiceError> {
            if self.fail_update {
                return Err(ServiceError::new(409, "name already taken"));
            }
            self.updates.lock().unwrap().push(update.clone());
            Ok(Variant {
                name: update.name.clone(),
                ..self.variant.clone()
            })
        }
        async fn delete_variant(&self, _: &str) -> std::result::Result<(), ServiceError> {
            unsupported()
        }
    }

    #[test]
    fn test_add_duplicate_is_noop() {
        let mut session = VariantEditSession::new(sample());
        assert!(!session.add_option("Red"));
        assert!(!session.add_option("   "));
        assert!(session.add_option("red"));
        assert_eq!(session.options().len(), 3);
    }

    #[test]
    fn test_add_trims_input() {
        let mut session = VariantEditSession::new(sample());
        assert!(session.add_option("  Green "));
        assert_eq!(session.options()[2], VariantOption::new("Green"));
    }

    #[test]
    fn test_remove_trims_input() {
        let mut session = VariantEditSession::new(sample());
        assert!(!session.remove_option("   "));
        assert!(session.remove_option(" Blue "));
        assert!(!session.remove_option("blue"));
        assert_eq!(session.options(), &[VariantOption::persisted("1", "Red")]);
    }

    #[test]
    fn test_remove_then_readd_restores_identifier() {
        let mut session = VariantEditSession::new(sample());
        assert!(session.remove_option("Blue"));
        assert!(session.add_option("Blue"));

        assert_eq!(session.options()[1], VariantOption::persisted("2", "Blue"));
        assert!(session.pending_diff().is_empty());
    }

    #[test]
    fn test_pending_diff() {
        let mut session = VariantEditSession::new(sample());
        session.remove_option("Blue");
        session.add_option("Green");

        let diff = session.pending_diff();
        assert_eq!(diff.to_add, vec![VariantOption::new("Green")]);
        assert_eq!(diff.to_remove, vec![VariantOption::persisted("2", "Blue")]);
        assert_eq!(session.original().len(), 2);
    }

    #[tokio::test]
    async fn test_load_unknown_variant() {
        let store = VariantOnlyStore::new(false);
        let err = VariantEditSession::load(&store, "missing").await.unwrap_err();
        assert!(matches!(err, CatalogError::Remote(ref e) if e.is_not_found()));
    }

    #[tokio::test]
    async fn test_submit_updates_then_reconciles() {
        let store = VariantOnlyStore::new(false);
        let service = RecordingService::default();
        let mut session = VariantEditSession::load(&store, "v1").await.unwrap();
        session.set_name("Colour");
        session.remove_option("Blue");
        session.add_option("Green");

        let outcome = session.submit(&store, &service).await.unwrap();

        assert_eq!(outcome.variant.name, "Colour");
        let updates = store.updates.lock().unwrap();
        let values: Vec<&str> = updates[0].options.iter().map(|o| o.value.as_str()).collect();
        assert_eq!(values, vec!["Red", "Green"]);
        assert_eq!(service.calls(), vec!["add:Green", "remove:2"]);
        assert_eq!(outcome.report.removed.len(), 1);
    }

    #[tokio::test]
    async fn test_failed_update_skips_reconciliation() {
        let store = VariantOnlyStore::new(true);
        let service = RecordingService::default();
        let mut session = VariantEditSession::new(sample());
        session.add_option("Green");

        let err = session.submit(&store, &service).await.unwrap_err();

        assert!(matches!(err, CatalogError::RemoteUpdateFailure { .. }));
        assert!(service.calls().is_empty());
    }

    #[tokio::test]
    async fn test_invalid_name_sends_nothing() {
        let store = VariantOnlyStore::new(false);
        let service = RecordingService::default();
        let mut session = VariantEditSession::new(sample());
        session.set_name("  ");

        let err = session.submit(&store, &service).await.unwrap_err();

        assert!(err.is_validation());
        assert!(store.updates.lock().unwrap().is_empty());
    }
}
