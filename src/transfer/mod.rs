//! Import and export of plan collections
//!
//! The portable format is a pretty-printed JSON array of plan records, the
//! same shape the persisted settings hold under `plans`. Import merges such
//! an array into an existing collection, renaming records whose identifier
//! is already taken.

use std::collections::HashSet;

use chrono::NaiveDate;
use serde_json::Value;

use crate::error::PlanError;
use crate::ids::generate_id;
use crate::models::{ExportFormat, Plan};
use crate::store::PlanStore;

pub mod markdown;

pub use markdown::MarkdownRenderer;

const IMPORTED_ID_SUFFIX: &str = "-imported";
const IMPORTED_NAME_SUFFIX: &str = " (Imported)";

/// How to treat individual malformed records in an import file
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ImportPolicy {
    /// Skip malformed records and report them
    #[default]
    Lenient,
    /// Reject the whole file on the first malformed record
    Strict,
}

/// A record that could not be imported
#[derive(Debug, Clone, PartialEq)]
pub struct ImportFailure {
    /// Position of the record in the imported array
    pub index: usize,
    pub message: String,
}

#[derive(Debug, Clone)]
pub struct ImportOutcome {
    /// Existing plans followed by the imported ones
    pub plans: Vec<Plan>,
    /// Identifiers of the imported plans, after collision renaming
    pub imported: Vec<String>,
    pub failures: Vec<ImportFailure>,
}

/// What `PlanStore::import_plans` reports back
#[derive(Debug, Clone, Default)]
pub struct ImportReport {
    pub imported: Vec<String>,
    pub failures: Vec<ImportFailure>,
}

/// Serialize plans as a pretty-printed JSON array
pub fn export_all(plans: &[Plan]) -> Result<String, PlanError> {
    Ok(serde_json::to_string_pretty(plans)?)
}

/// Render plans in the requested export format
pub fn render(plans: &[Plan], format: ExportFormat) -> Result<String, PlanError> {
    match format {
        ExportFormat::Json => export_all(plans),
        ExportFormat::Markdown => Ok(MarkdownRenderer::default().render_all(plans)),
    }
}

/// `business-plans-YYYY-MM-DD.<ext>`
pub fn export_file_name(date: NaiveDate, format: ExportFormat) -> String {
    format!(
        "business-plans-{}.{}",
        date.format("%Y-%m-%d"),
        format.extension()
    )
}

fn rename_on_collision(plan: &mut Plan, taken: &HashSet<String>) {
    if plan.id.trim().is_empty() {
        plan.id = generate_id();
        return;
    }
    if !taken.contains(&plan.id) {
        return;
    }
    let original = plan.id.clone();
    while taken.contains(&plan.id) {
        plan.id.push_str(IMPORTED_ID_SUFFIX);
    }
    plan.name.push_str(IMPORTED_NAME_SUFFIX);
    tracing::debug!(from = %original, to = %plan.id, "renamed colliding plan on import");
}

/// Merge the plans encoded in `text` into `existing`.
///
/// The top level must be a JSON array; anything else is an
/// [`PlanError::ImportFormat`] and nothing is merged. An imported record
/// whose id collides with an existing plan, or with an earlier record of the
/// same file, gets `-imported` appended to its id (repeatedly until unique)
/// and ` (Imported)` appended to its name.
pub fn import_all(
    text: &str,
    existing: Vec<Plan>,
    policy: ImportPolicy,
) -> Result<ImportOutcome, PlanError> {
    let value: Value = serde_json::from_str(text)
        .map_err(|e| PlanError::ImportFormat(format!("not valid JSON: {}", e)))?;
    let Value::Array(records) = value else {
        return Err(PlanError::ImportFormat(
            "expected a JSON array of plans".to_string(),
        ));
    };

    let mut taken: HashSet<String> = existing.iter().map(|p| p.id.clone()).collect();
    let mut plans = existing;
    let mut imported = Vec::new();
    let mut failures = Vec::new();

    for (index, record) in records.into_iter().enumerate() {
        let mut plan: Plan = match serde_json::from_value(record) {
            Ok(plan) => plan,
            Err(e) => match policy {
                ImportPolicy::Strict => {
                    return Err(PlanError::ImportFormat(format!("record {}: {}", index, e)));
                }
                ImportPolicy::Lenient => {
                    tracing::warn!(index, error = %e, "skipping malformed plan record");
                    failures.push(ImportFailure {
                        index,
                        message: e.to_string(),
                    });
                    continue;
                }
            },
        };
        rename_on_collision(&mut plan, &taken);
        taken.insert(plan.id.clone());
        imported.push(plan.id.clone());
        plans.push(plan);
    }

    tracing::info!(
        imported = imported.len(),
        failed = failures.len(),
        "plans imported"
    );
    Ok(ImportOutcome {
        plans,
        imported,
        failures,
    })
}

impl PlanStore {
    /// Merge an export file into the store; the active plan is kept, or set
    /// to the first plan if none was selected
    pub fn import_plans(
        &mut self,
        text: &str,
        policy: ImportPolicy,
    ) -> Result<ImportReport, PlanError> {
        let outcome = import_all(text, self.plans().to_vec(), policy)?;
        self.replace_plans(outcome.plans);
        Ok(ImportReport {
            imported: outcome.imported,
            failures: outcome.failures,
        })
    }

    pub fn export_plans(&self) -> Result<String, PlanError> {
        export_all(self.plans())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Product, TemplateKind};
    use crate::templates::create_plan;

    #[test]
    fn test_export_is_pretty_array() {
        let plan = create_plan("Acme", TemplateKind::Blank);
        let json = export_all(std::slice::from_ref(&plan)).unwrap();
        assert!(json.starts_with("[\n  {"));
        assert!(!json.contains("\"activePlanId\""));
        assert!(json.contains("\"lastUpdated\""));
    }

    #[test]
    fn test_round_trip_preserves_plans() {
        let mut plan = create_plan("Acme", TemplateKind::PluginBusiness);
        let product = Product {
            name: "Widget".to_string(),
            ..Default::default()
        };
        plan.add_entity(product).unwrap();
        let json = export_all(std::slice::from_ref(&plan)).unwrap();
        let outcome = import_all(&json, Vec::new(), ImportPolicy::Lenient).unwrap();
        assert_eq!(outcome.plans, vec![plan]);
        assert!(outcome.failures.is_empty());
    }

    #[test]
    fn test_non_array_is_rejected_before_merge() {
        let existing = vec![create_plan("Acme", TemplateKind::Blank)];
        for text in ["{\"plans\": []}", "42", "not json"] {
            let err = import_all(text, existing.clone(), ImportPolicy::Lenient).unwrap_err();
            assert!(matches!(err, PlanError::ImportFormat(_)), "{}", text);
        }
    }

    #[test]
    fn test_collision_renames_id_and_name() {
        let mut a = create_plan("Acme", TemplateKind::Blank);
        a.id = "A".to_string();
        let json = export_all(std::slice::from_ref(&a)).unwrap();

        let outcome = import_all(&json, vec![a.clone()], ImportPolicy::Lenient).unwrap();
        assert_eq!(outcome.plans.len(), 2);
        assert_eq!(outcome.plans[1].id, "A-imported");
        assert_eq!(outcome.plans[1].name, "Acme (Imported)");
        assert_eq!(outcome.imported, vec!["A-imported"]);
    }

    #[test]
    fn test_repeated_import_keeps_ids_unique() {
        let mut a = create_plan("Acme", TemplateKind::Blank);
        a.id = "A".to_string();
        let json = export_all(&[a.clone(), a.clone()]).unwrap();

        let outcome = import_all(&json, vec![a], ImportPolicy::Lenient).unwrap();
        let ids: Vec<&str> = outcome.plans.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["A", "A-imported", "A-imported-imported"]);
        assert_eq!(outcome.plans[2].name, "Acme (Imported)");
    }

    #[test]
    fn test_lenient_skips_bad_records_strict_rejects() {
        let good = create_plan("Good", TemplateKind::Blank);
        let mut records = vec![serde_json::to_value(&good).unwrap()];
        records.push(serde_json::json!({ "id": "x", "name": "Bad", "createdAt": "yesterday" }));
        let text = serde_json::to_string(&records).unwrap();

        let outcome = import_all(&text, Vec::new(), ImportPolicy::Lenient).unwrap();
        assert_eq!(outcome.imported, vec![good.id.clone()]);
        assert_eq!(outcome.failures.len(), 1);
        assert_eq!(outcome.failures[0].index, 1);

        let err = import_all(&text, Vec::new(), ImportPolicy::Strict).unwrap_err();
        assert!(matches!(err, PlanError::ImportFormat(_)));
    }

    #[test]
    fn test_export_file_name() {
        let date = NaiveDate::from_ymd_opt(2025, 3, 7).unwrap();
        assert_eq!(
            export_file_name(date, ExportFormat::Json),
            "business-plans-2025-03-07.json"
        );
        assert_eq!(
            export_file_name(date, ExportFormat::Markdown),
            "business-plans-2025-03-07.md"
        );
    }

    #[test]
    fn test_store_import_activates_first_when_empty() {
        let plan = create_plan("Acme", TemplateKind::Blank);
        let json = export_all(std::slice::from_ref(&plan)).unwrap();

        let mut store = PlanStore::new();
        let report = store.import_plans(&json, ImportPolicy::Lenient).unwrap();
        assert_eq!(report.imported, vec![plan.id.clone()]);
        assert_eq!(store.active_plan_id(), plan.id);

        let other = store.create_plan("Other", TemplateKind::Blank).unwrap();
        store.import_plans(&json, ImportPolicy::Lenient).unwrap();
        assert_eq!(store.active_plan_id(), other);
        assert_eq!(store.plans().len(), 3);
    }
}
