// Integration tests for the CLI command layer
// Each test works against its own temporary data directory

use anyhow::Result;
use bizplan::commands::{self, MilestoneOperation, OutputFormat, ProductOperation, ValueOperation};
use bizplan::config::BizplanPaths;
use bizplan::db::{load_store, Database};
use bizplan::models::{
    BillingCycle, ExportFormat, MilestoneCategory, MilestoneStatus, ProductCategory, ProductStatus,
};
use bizplan::store::{PlanDetails, PlanStore};
use tempfile::TempDir;

fn setup() -> Result<(TempDir, BizplanPaths)> {
    let temp_dir = TempDir::new()?;
    let paths = BizplanPaths::at(temp_dir.path().join("home"));
    commands::init(&paths, false)?;
    Ok((temp_dir, paths))
}

fn reload(paths: &BizplanPaths) -> Result<PlanStore> {
    load_store(&Database::open(paths)?)
}

#[test]
fn test_commands_require_init() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let paths = BizplanPaths::at(temp_dir.path());
    let err = commands::list(&paths).unwrap_err();
    assert!(err.to_string().contains("bizplan init"));
    Ok(())
}

#[test]
fn test_init_with_sample_seeds_active_plan() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let paths = BizplanPaths::at(temp_dir.path());
    commands::init(&paths, true)?;
    let store = reload(&paths)?;
    assert_eq!(store.plans().len(), 1);
    assert_eq!(store.active_plan().map(|p| p.name.as_str()), Some("BK"));
    commands::stats(&paths, None)?;
    Ok(())
}

#[test]
fn test_new_plan_and_lifecycle() -> Result<()> {
    let (_temp, paths) = setup()?;
    let first = commands::new_plan(&paths, "Acme", Some("consulting"))?;
    let second = commands::new_plan(&paths, "Beta Co", None)?;

    let store = reload(&paths)?;
    assert_eq!(store.active_plan_id(), second);
    assert_eq!(store.plan(&first).map(|p| p.color.as_str()), Some("#27ae60"));

    commands::activate(&paths, &first)?;
    assert_eq!(reload(&paths)?.active_plan_id(), first);

    commands::show(&paths, None, OutputFormat::Summary)?;
    commands::show(&paths, Some(&second), OutputFormat::Json)?;
    commands::list(&paths)?;
    Ok(())
}

#[test]
fn test_unknown_template_is_rejected() -> Result<()> {
    let (_temp, paths) = setup()?;
    let err = commands::new_plan(&paths, "Acme", Some("franchise")).unwrap_err();
    assert!(err.to_string().contains("Invalid template"));
    assert!(reload(&paths)?.is_empty());
    Ok(())
}

#[test]
fn test_delete_requires_confirmation() -> Result<()> {
    let (_temp, paths) = setup()?;
    let a = commands::new_plan(&paths, "A", None)?;
    let b = commands::new_plan(&paths, "B", None)?;

    assert!(commands::delete(&paths, &b, false).is_err());
    assert_eq!(reload(&paths)?.plans().len(), 2);

    commands::delete(&paths, &b, true)?;
    let store = reload(&paths)?;
    assert_eq!(store.active_plan_id(), a);

    commands::reset(&paths, true)?;
    let store = reload(&paths)?;
    assert!(store.is_empty());
    assert_eq!(store.active_plan_id(), "");
    Ok(())
}

#[test]
fn test_edit_plan_details() -> Result<()> {
    let (_temp, paths) = setup()?;
    let id = commands::new_plan(&paths, "Acme", None)?;
    commands::edit(
        &paths,
        &id,
        PlanDetails {
            name: Some("Acme Labs".to_string()),
            icon: Some("🧪".to_string()),
            ..Default::default()
        },
    )?;
    let store = reload(&paths)?;
    let plan = store.plan(&id).expect("plan exists");
    assert_eq!(plan.name, "Acme Labs");
    assert_eq!(plan.icon, "🧪");
    Ok(())
}

#[test]
fn test_product_commands() -> Result<()> {
    let (_temp, paths) = setup()?;
    commands::new_plan(&paths, "Acme", Some("plugin-business"))?;
    commands::product(
        &paths,
        None,
        ProductOperation::Add {
            name: "Habit Tracker".to_string(),
            category: ProductCategory::ObsidianProduct,
            sku: Some("HT".to_string()),
            description: None,
            price: Some(49.0),
            cycle: BillingCycle::Yearly,
        },
    )?;

    let product_id = reload(&paths)?.active_plan().expect("active").products[0].id.clone();
    commands::product(&paths, None, ProductOperation::Advance { id: product_id.clone() })?;
    commands::product(&paths, None, ProductOperation::Duplicate { id: product_id.clone() })?;
    commands::product(&paths, None, ProductOperation::List)?;

    let store = reload(&paths)?;
    let plan = store.active_plan().expect("active");
    assert_eq!(plan.products.len(), 2);
    assert_eq!(plan.products[0].status, ProductStatus::Development);
    assert_eq!(plan.products[0].pricing_tiers[0].price, 49.0);
    assert_eq!(plan.products[1].sku, "HT-COPY");
    assert_ne!(
        plan.products[0].pricing_tiers[0].id,
        plan.products[1].pricing_tiers[0].id
    );

    commands::product(&paths, None, ProductOperation::Remove { id: product_id })?;
    assert_eq!(reload(&paths)?.active_plan().expect("active").products.len(), 1);
    Ok(())
}

fn add_priced(paths: &BizplanPaths, price: f64) -> Result<()> {
    commands::product(
        paths,
        None,
        ProductOperation::Add {
            name: "Widget".to_string(),
            category: ProductCategory::Other,
            sku: None,
            description: None,
            price: Some(price),
            cycle: BillingCycle::Monthly,
        },
    )
}

#[test]
fn test_product_add_rejects_invalid_price() -> Result<()> {
    let (_temp, paths) = setup()?;
    commands::new_plan(&paths, "Acme", None)?;

    for price in [f64::NAN, f64::INFINITY, -5.0] {
        assert!(add_priced(&paths, price).is_err());
    }

    let store = reload(&paths)?;
    assert!(store.active_plan().expect("active").products.is_empty());
    commands::list(&paths)?;

    add_priced(&paths, 0.0)?;
    let store = reload(&paths)?;
    assert_eq!(store.active_plan().expect("active").products[0].pricing_tiers[0].price, 0.0);
    Ok(())
}

#[test]
fn test_milestone_commands() -> Result<()> {
    let (_temp, paths) = setup()?;
    commands::new_plan(&paths, "Acme", None)?;
    commands::milestone(
        &paths,
        None,
        MilestoneOperation::Add {
            title: "Launch".to_string(),
            category: MilestoneCategory::Product,
            target_date: Some("2026-01-15".to_string()),
            description: None,
        },
    )?;
    let id = reload(&paths)?.active_plan().expect("active").roadmap.milestones[0].id.clone();

    commands::milestone(
        &paths,
        None,
        MilestoneOperation::Status {
            id: id.clone(),
            status: MilestoneStatus::Completed,
        },
    )?;
    commands::milestone(&paths, None, MilestoneOperation::List)?;

    let store = reload(&paths)?;
    let milestone = store.active_plan().and_then(|p| p.milestone(&id)).expect("milestone");
    assert_eq!(milestone.status, MilestoneStatus::Completed);
    assert!(milestone.completed_date.is_some());
    Ok(())
}

#[test]
fn test_value_commands_use_one_based_positions() -> Result<()> {
    let (_temp, paths) = setup()?;
    commands::new_plan(&paths, "Acme", None)?;
    for value in ["Honesty", "Craft", "Care"] {
        commands::value(&paths, None, ValueOperation::Add { value: value.to_string() })?;
    }
    commands::value(&paths, None, ValueOperation::Move { from: 3, to: 2 })?;
    commands::value(&paths, None, ValueOperation::Remove { index: 1 })?;

    let store = reload(&paths)?;
    assert_eq!(
        store.active_plan().expect("active").executive.core_values,
        vec!["Care", "Craft"]
    );

    let err = commands::value(&paths, None, ValueOperation::Move { from: 1, to: 5 }).unwrap_err();
    assert!(err.to_string().contains("out of range"));
    Ok(())
}

#[tokio::test]
async fn test_set_commits_field() -> Result<()> {
    let (_temp, paths) = setup()?;
    let id = commands::new_plan(&paths, "Acme", None)?;
    commands::set(&paths, None, "executive.mission", "Help people build habits").await?;
    commands::set(&paths, Some(&id), "startupCosts", "2500").await?;

    let store = reload(&paths)?;
    let plan = store.plan(&id).expect("plan exists");
    assert_eq!(plan.executive.mission, "Help people build habits");
    assert_eq!(plan.financial.startup_costs, 2500.0);

    assert!(commands::set(&paths, None, "motto", "x").await.is_err());
    Ok(())
}

#[test]
fn test_export_and_import_files() -> Result<()> {
    let (temp, paths) = setup()?;
    commands::new_plan(&paths, "Acme", Some("saas"))?;

    let json_file = commands::export(&paths, None, None)?;
    let name = json_file.file_name().and_then(|n| n.to_str()).unwrap_or_default();
    assert!(name.starts_with("business-plans-") && name.ends_with(".json"));
    assert!(json_file.starts_with(&paths.exports));

    let md_file = commands::export(&paths, Some(temp.path()), Some(ExportFormat::Markdown))?;
    assert!(std::fs::read_to_string(&md_file)?.contains("# ☁️ Acme"));

    let imported = commands::import(&paths, &json_file, false)?;
    assert_eq!(imported.len(), 1);
    assert!(imported[0].ends_with("-imported"));
    assert_eq!(reload(&paths)?.plans().len(), 2);

    let bad = temp.path().join("bad.json");
    std::fs::write(&bad, "{\"not\": \"an array\"}")?;
    assert!(commands::import(&paths, &bad, false).is_err());
    assert_eq!(reload(&paths)?.plans().len(), 2);
    Ok(())
}

#[test]
fn test_validate_command() -> Result<()> {
    let (_temp, paths) = setup()?;
    commands::new_plan(&paths, "Acme", None)?;
    commands::validate(&paths, None, true)?;

    commands::product(
        &paths,
        None,
        ProductOperation::Add {
            name: "No Price".to_string(),
            category: ProductCategory::Other,
            sku: None,
            description: None,
            price: None,
            cycle: BillingCycle::OneTime,
        },
    )?;
    commands::validate(&paths, None, false)?;
    assert!(commands::validate(&paths, None, true).is_err());
    Ok(())
}
