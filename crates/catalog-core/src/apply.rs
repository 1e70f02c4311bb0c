//! Sequential application of an [`OptionsDiff`] through an [`OptionService`].

use tracing::{debug, warn};

use crate::error::{CatalogError, Result};
use crate::model::VariantOption;
use crate::reconcile::OptionsDiff;
use crate::traits::OptionService;

/// Options changed remotely by a completed [`apply_diff`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApplyReport {
    /// Options as returned by the store, with their new identifiers.
    pub added: Vec<VariantOption>,
    pub removed: Vec<VariantOption>,
}

impl ApplyReport {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty()
    }
}

/// Applies additions, then removals, one call at a time.
///
/// The first failing call stops the sequence. Calls that already succeeded
/// stay applied; the returned error names the option whose call failed.
pub async fn apply_diff(
    service: &dyn OptionService,
    variant_id: &str,
    diff: &OptionsDiff,
) -> Result<ApplyReport> {
    let mut report = ApplyReport::default();

    for option in &diff.to_add {
        debug!(variant_id = %variant_id, value = %option.value, "Adding option");
        let added = service
            .add_option(variant_id, &option.value)
            .await
            .map_err(|e| {
                warn!(
                    variant_id = %variant_id,
                    value = %option.value,
                    applied = report.added.len(),
                    error = %e,
                    "Option add failed, aborting reconciliation"
                );
                CatalogError::remote_add(&option.value, &e)
            })?;
        report.added.push(added);
    }

    for option in &diff.to_remove {
        // Only persisted options reach `to_remove`.
        let Some(option_id) = option.id.as_deref() else {
            continue;
        };
        debug!(
            variant_id = %variant_id,
            option_id = %option_id,
            value = %option.value,
            "Removing option"
        );
        service
            .remove_option(variant_id, option_id)
            .await
            .map_err(|e| {
                warn!(
                    variant_id = %variant_id,
                    value = %option.value,
                    applied = report.added.len() + report.removed.len(),
                    error = %e,
                    "Option remove failed, aborting reconciliation"
                );
                CatalogError::remote_remove(&option.value, &e)
            })?;
        report.removed.push(option.clone());
    }

    Ok(report)
}
