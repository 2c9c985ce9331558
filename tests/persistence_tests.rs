// Integration tests for persistence and import/export
// Tests the SQLite gateway, settings normalization and export round trips

use anyhow::Result;
use bizplan::config::BizplanPaths;
use bizplan::db::{load_store, save_store, Database, MemoryGateway, PersistenceGateway};
use bizplan::models::{
    BillingCycle, Expense, ExpenseFrequency, MilestoneStatus, PricingTier, Product, ProductStatus,
    TemplateKind,
};
use bizplan::store::{ListRef, PlanStore, ScalarField};
use bizplan::transfer::{export_all, import_all, ImportPolicy};
use bizplan::{lifecycle, metrics, templates};
use tempfile::TempDir;

/// Setup test environment
fn setup() -> Result<(TempDir, BizplanPaths, Database)> {
    let temp_dir = TempDir::new()?;
    let paths = BizplanPaths::at(temp_dir.path());
    paths.ensure_dirs()?;
    let db = Database::init(&paths)?;
    Ok((temp_dir, paths, db))
}

fn populated_store() -> Result<PlanStore> {
    let mut store = PlanStore::new();
    let id = store.create_plan("BK", TemplateKind::PluginBusiness)?;
    let plan = store.plan_mut(&id)?;

    let product = plan.add_entity(Product {
        name: "Habit Tracker".to_string(),
        sku: "HT-01".to_string(),
        ..Default::default()
    })?;
    plan.add_tier(
        &product,
        PricingTier {
            name: "Pro".to_string(),
            price: 49.0,
            billing_cycle: BillingCycle::Yearly,
            ..Default::default()
        },
    )?;
    plan.add_entity(Expense {
        name: "Hosting".to_string(),
        amount: 120.0,
        frequency: ExpenseFrequency::Yearly,
        ..Default::default()
    })?;
    plan.apply_field(ScalarField::Tagline, "Tools for a Better Life")?;
    lifecycle::advance_product(plan, &product)?;

    store.create_plan("Side Project", TemplateKind::Saas)?;
    Ok(store)
}

#[test]
fn test_sqlite_round_trip() -> Result<()> {
    let (_temp, paths, db) = setup()?;
    let store = populated_store()?;
    save_store(&db, &store)?;
    drop(db);

    let reopened = Database::open(&paths)?;
    let loaded = load_store(&reopened)?;
    assert_eq!(loaded.settings(), store.settings());
    assert_eq!(loaded.active_plan_id(), store.active_plan_id());

    let plan = &loaded.plans()[0];
    assert_eq!(plan.products[0].status, ProductStatus::Development);
    assert_eq!(metrics::monthly_expenses(&plan.financial.expenses), 10.0);
    Ok(())
}

#[test]
fn test_dangling_active_plan_is_repaired_on_load() -> Result<()> {
    let store = populated_store()?;
    let mut settings = store.into_settings();
    settings.active_plan_id = "deleted-long-ago".to_string();
    let first = settings.plans[0].id.clone();

    let gateway = MemoryGateway::new();
    gateway.save(&settings)?;
    let loaded = load_store(&gateway)?;
    assert_eq!(loaded.active_plan_id(), first);
    Ok(())
}

#[test]
fn test_export_import_round_trip() -> Result<()> {
    let store = populated_store()?;
    let json = export_all(store.plans())?;

    let outcome = import_all(&json, Vec::new(), ImportPolicy::Strict)?;
    assert_eq!(outcome.plans.as_slice(), store.plans());
    assert_eq!(outcome.imported.len(), 2);
    Ok(())
}

#[test]
fn test_reimport_into_same_store_renames() -> Result<()> {
    let mut store = populated_store()?;
    let original_ids: Vec<String> = store.plans().iter().map(|p| p.id.clone()).collect();
    let json = store.export_plans()?;

    let report = store.import_plans(&json, ImportPolicy::Lenient)?;
    assert_eq!(store.plans().len(), 4);
    for (imported, original) in report.imported.iter().zip(&original_ids) {
        assert_eq!(imported, &format!("{}-imported", original));
    }
    assert_eq!(store.plans()[2].name, "BK (Imported)");
    Ok(())
}

#[test]
fn test_non_array_import_leaves_store_untouched() -> Result<()> {
    let mut store = populated_store()?;
    let before = store.settings().clone();
    assert!(store
        .import_plans(r#"{"plans": []}"#, ImportPolicy::Lenient)
        .is_err());
    assert_eq!(store.settings(), &before);
    Ok(())
}

#[test]
fn test_legacy_blob_with_short_category_names_loads() -> Result<()> {
    let plan = templates::create_plan("Legacy", TemplateKind::Blank);
    let mut value = serde_json::to_value(&plan)?;
    value["products"] = serde_json::json!([{
        "id": "p1",
        "sku": "",
        "name": "Old Plugin",
        "category": "wordpress",
        "description": "",
        "features": [],
        "pricingTiers": [],
        "status": "launched",
        "tags": []
    }]);
    let blob = serde_json::json!({ "plans": [value] });

    let gateway = MemoryGateway::with_json(blob.to_string());
    let store = load_store(&gateway)?;
    let loaded = &store.plans()[0];
    assert_eq!(loaded.products[0].category.as_str(), "wordpress-product");
    assert_eq!(store.active_plan_id(), plan.id);
    Ok(())
}

#[test]
fn test_milestones_and_core_values_survive_save() -> Result<()> {
    let (_temp, _paths, db) = setup()?;
    let mut store = populated_store()?;
    let id = store.active_plan_id().to_string();
    let plan = store.plan_mut(&id)?;

    let milestone = plan.add_entity(bizplan::models::Milestone {
        title: "First 100 customers".to_string(),
        ..Default::default()
    })?;
    lifecycle::set_milestone_status(plan, &milestone, MilestoneStatus::Completed)?;
    plan.push_item(&ListRef::CoreValues, "Honesty")?;
    plan.push_item(&ListRef::CoreValues, "Craft")?;
    plan.move_item(&ListRef::CoreValues, 1, 0)?;
    save_store(&db, &store)?;

    let loaded = load_store(&db)?;
    let plan = loaded.plan(&id).expect("plan saved");
    assert!(plan.milestone(&milestone).and_then(|m| m.completed_date.as_ref()).is_some());
    assert_eq!(plan.executive.core_values, vec!["Craft", "Honesty"]);
    Ok(())
}
