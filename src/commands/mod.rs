//! CLI commands for bizplan

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};

use crate::config::{load_config, save_config, BizplanPaths, Config};
use crate::db::{load_store, save_store, Database};
use crate::display::{format_currency, format_cycle_price, format_date, format_timestamp};
use crate::editing::{commit, EditDebouncer};
use crate::ids::generate_id;
use crate::lifecycle;
use crate::metrics::{self, PlanOverview};
use crate::models::{
    BillingCycle, ExportFormat, Milestone, MilestoneCategory, MilestoneStatus, Plan, PricingTier,
    Product, ProductCategory, TemplateKind,
};
use crate::store::{ListRef, PlanDetails, PlanStore, ScalarField};
use crate::templates;
use crate::transfer::{self, ImportPolicy};
use crate::validation;

/// A loaded store together with where it came from
struct Workspace {
    config: Config,
    db: Database,
    store: PlanStore,
}

impl Workspace {
    fn open(paths: &BizplanPaths) -> Result<Self> {
        ensure_initialized(paths)?;
        let config = load_config(paths)?;
        let db = Database::open(paths)?;
        let store = load_store(&db)?;
        Ok(Self { config, db, store })
    }

    fn save(&self) -> Result<()> {
        save_store(&self.db, &self.store)
    }

    /// The plan named by `id`, or the active plan
    fn resolve(&self, id: Option<&str>) -> Result<String> {
        match id {
            Some(id) => {
                if self.store.plan(id).is_none() {
                    bail!("Plan not found: {}", id);
                }
                Ok(id.to_string())
            }
            None => match self.store.active_plan() {
                Some(plan) => Ok(plan.id.clone()),
                None => bail!("No active plan. Create one with: bizplan new <name>"),
            },
        }
    }

    fn plan(&self, id: &str) -> Result<&Plan> {
        self.store
            .plan(id)
            .with_context(|| format!("Plan not found: {}", id))
    }

    fn plan_mut(&mut self, id: &str) -> Result<&mut Plan> {
        Ok(self.store.plan_mut(id)?)
    }
}

fn ensure_initialized(paths: &BizplanPaths) -> Result<()> {
    if !paths.is_initialized() {
        bail!("bizplan not initialized. Run `bizplan init` first.");
    }
    Ok(())
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

/// Initialize bizplan for first-time setup
pub fn init(paths: &BizplanPaths, sample: bool) -> Result<()> {
    if paths.is_initialized() {
        println!("bizplan is already initialized at {}", paths.root.display());
        return Ok(());
    }

    println!("Initializing bizplan at {}...", paths.root.display());

    paths.ensure_dirs()?;
    println!("  Created directory structure");

    save_config(paths, &Config::default())?;
    println!("  Created config.toml");

    let db = Database::init(paths)?;
    let mut store = PlanStore::new();
    if sample {
        let plan = templates::sample_plan();
        println!("  Added sample plan: {}", plan.name);
        store.add_plan(plan);
    }
    save_store(&db, &store)?;
    println!("  Created database");

    println!();
    println!("bizplan initialized successfully!");
    println!();
    println!("Next steps:");
    println!("  bizplan new <name> --template saas    Create a plan");
    println!("  bizplan list                          List all plans");
    println!("  bizplan show                          Show the active plan");

    Ok(())
}

/// Create a new plan from a template and make it active
pub fn new_plan(paths: &BizplanPaths, name: &str, template: Option<&str>) -> Result<String> {
    let mut ws = Workspace::open(paths)?;

    let kind = match template {
        Some(t) => t.parse::<TemplateKind>()?,
        None => ws.config.default_template,
    };

    let id = ws.store.create_plan(name, kind)?;
    ws.save()?;

    println!("Created plan: {}", id);
    println!("  Name:     {}", name.trim());
    println!("  Template: {} {}", kind.icon(), kind.label());

    Ok(id)
}

/// List all plans
pub fn list(paths: &BizplanPaths) -> Result<()> {
    let ws = Workspace::open(paths)?;

    if ws.store.is_empty() {
        println!("No plans found.");
        println!("Create one with: bizplan new <name>");
        return Ok(());
    }

    println!(
        "{:<2} {:<34} {:<28} {:<9} {:<12}",
        "", "ID", "NAME", "PRODUCTS", "UPDATED"
    );
    println!("{}", "-".repeat(88));

    for plan in ws.store.plans() {
        let marker = if plan.id == ws.store.active_plan_id() { "*" } else { "" };
        println!(
            "{:<2} {:<34} {:<28} {:<9} {:<12}",
            marker,
            truncate(&plan.id, 34),
            truncate(&format!("{} {}", plan.icon, plan.name), 26),
            plan.products.len(),
            format_timestamp(&plan.last_updated)
        );
    }

    Ok(())
}

#[derive(Debug, Clone, Copy)]
pub enum OutputFormat {
    Json,
    Summary,
}

/// Show a plan, the active one by default
pub fn show(paths: &BizplanPaths, id: Option<&str>, format: OutputFormat) -> Result<()> {
    let ws = Workspace::open(paths)?;
    let plan = ws.plan(&ws.resolve(id)?)?;

    match format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(plan)?;
            println!("{}", json);
        }
        OutputFormat::Summary => print_plan_summary(plan),
    }

    Ok(())
}

fn print_plan_summary(plan: &Plan) {
    let exec = &plan.executive;

    println!("{} {}", plan.icon, plan.name);
    println!("{}", "=".repeat(50));
    println!("ID:       {}", plan.id);
    if !plan.description.is_empty() {
        println!("About:    {}", plan.description);
    }
    if !exec.tagline.is_empty() {
        println!("Tagline:  {}", exec.tagline);
    }
    if !exec.mission.is_empty() {
        println!("Mission:  {}", exec.mission);
    }

    if !exec.core_values.is_empty() {
        println!();
        println!("Core values:");
        for (idx, value) in exec.core_values.iter().enumerate() {
            println!("  {}. {}", idx + 1, value);
        }
    }

    if !plan.products.is_empty() {
        println!();
        println!("Products: {}", plan.products.len());
        for (idx, product) in plan.products.iter().take(5).enumerate() {
            println!(
                "  {} {} ({} {})",
                product.category.icon(),
                product.name,
                product.status.icon(),
                product.status.label()
            );
            if idx == 4 && plan.products.len() > 5 {
                println!("  ... and {} more", plan.products.len() - 5);
            }
        }
    }

    println!();
    println!("Created:  {}", format_timestamp(&plan.created_at));
    println!("Updated:  {}", format_timestamp(&plan.last_updated));
}

/// Make a plan the active one
pub fn activate(paths: &BizplanPaths, id: &str) -> Result<()> {
    let mut ws = Workspace::open(paths)?;
    ws.store.set_active(id)?;
    ws.save()?;
    println!("Active plan: {}", id);
    Ok(())
}

/// Edit a plan's name, description, icon or color
pub fn edit(paths: &BizplanPaths, id: &str, details: PlanDetails) -> Result<()> {
    let mut ws = Workspace::open(paths)?;
    ws.store.update_plan_details(id, details)?;
    ws.save()?;
    println!("✓ Updated plan {}", id);
    Ok(())
}

/// Delete a plan and everything it owns
pub fn delete(paths: &BizplanPaths, id: &str, yes: bool) -> Result<()> {
    if !yes {
        bail!("Deleting a plan cannot be undone. Re-run with --yes to confirm.");
    }
    let mut ws = Workspace::open(paths)?;
    let removed = ws.store.delete_plan(id)?;
    ws.save()?;

    println!("✓ Deleted plan: {}", removed.name);
    match ws.store.active_plan() {
        Some(active) => println!("  Active plan is now: {}", active.name),
        None => println!("  No plans left"),
    }
    Ok(())
}

/// Delete every plan
pub fn reset(paths: &BizplanPaths, yes: bool) -> Result<()> {
    if !yes {
        bail!("This will permanently delete ALL plans. Re-run with --yes to confirm.");
    }
    let mut ws = Workspace::open(paths)?;
    let count = ws.store.reset();
    ws.save()?;
    println!("✓ All plans have been reset ({} removed)", count);
    Ok(())
}

/// Print dashboard numbers for a plan
pub fn stats(paths: &BizplanPaths, id: Option<&str>) -> Result<()> {
    let ws = Workspace::open(paths)?;
    let plan = ws.plan(&ws.resolve(id)?)?;
    let overview = PlanOverview::compute(plan);

    println!("{} {}", plan.icon, plan.display_name());
    println!("{}", "=".repeat(50));
    println!(
        "Products:          {} ({} launched)",
        overview.product_count, overview.launched_count
    );
    println!("Monthly revenue:   {}", format_currency(overview.monthly_revenue));
    println!("Monthly expenses:  {}", format_currency(overview.monthly_expenses));
    println!("Monthly net:       {}", format_currency(overview.monthly_net()));
    println!(
        "Tooling cost:      {}/month",
        format_currency(metrics::monthly_tech_cost(&plan.technology.stack))
    );
    println!(
        "Milestones:        {}/{} completed",
        overview.milestones_completed, overview.milestones_total
    );
    println!("Summary complete:  {}%", overview.completion);

    let upcoming = metrics::recent_milestones(plan, 5);
    if !upcoming.is_empty() {
        println!();
        println!("Milestones:");
        for m in upcoming {
            println!("  {} {} {}", m.status.icon(), m.title, format_date(&m.target_date));
        }
    }

    Ok(())
}

/// Validate a plan and report lint warnings
pub fn validate(paths: &BizplanPaths, id: Option<&str>, strict: bool) -> Result<()> {
    let ws = Workspace::open(paths)?;
    let plan = ws.plan(&ws.resolve(id)?)?;

    println!("Validating plan: {}", plan.name);
    println!();

    print!("Structure... ");
    match validation::validate_plan(plan) {
        Ok(()) => println!("✓ passed"),
        Err(e) => {
            println!("✗ failed");
            println!("{}", e);
            bail!("Validation failed");
        }
    }

    print!("Linting... ");
    let warnings = validation::lint_plan(plan);
    if warnings.is_empty() {
        println!("✓ no warnings");
    } else {
        println!("⚠ {} warning(s)", warnings.len());
        for warning in &warnings {
            println!("  ⚠ {}", warning);
        }
        if strict {
            bail!("Validation failed in strict mode due to warnings");
        }
    }

    println!();
    println!("Validation complete!");
    Ok(())
}

/// Write every plan to an export file and return its path.
///
/// The format comes from the argument, then config.toml, then the stored
/// preference. `output` may be a file or an existing directory.
pub fn export(
    paths: &BizplanPaths,
    output: Option<&Path>,
    format: Option<ExportFormat>,
) -> Result<PathBuf> {
    let ws = Workspace::open(paths)?;
    let format = format
        .or(ws.config.export.format)
        .unwrap_or(ws.store.settings().export_format);

    let file_name = transfer::export_file_name(chrono::Local::now().date_naive(), format);
    let target = match output {
        Some(path) if path.is_dir() => path.join(file_name),
        Some(path) => path.to_path_buf(),
        None => paths.export_dir(&ws.config).join(file_name),
    };
    if let Some(parent) = target.parent() {
        std::fs::create_dir_all(parent).context("Failed to create export directory")?;
    }

    let content = transfer::render(ws.store.plans(), format)?;
    std::fs::write(&target, content)
        .with_context(|| format!("Failed to write {}", target.display()))?;

    println!(
        "✓ Exported {} plan(s) to {}",
        ws.store.plans().len(),
        target.display()
    );
    Ok(target)
}

/// Merge plans from an export file
pub fn import(paths: &BizplanPaths, file: &Path, strict: bool) -> Result<Vec<String>> {
    let mut ws = Workspace::open(paths)?;
    let text = std::fs::read_to_string(file)
        .with_context(|| format!("Failed to read {}", file.display()))?;

    let policy = if strict {
        ImportPolicy::Strict
    } else {
        ImportPolicy::Lenient
    };
    let report = ws
        .store
        .import_plans(&text, policy)
        .context("Failed to import plans. Invalid file format.")?;
    ws.save()?;

    println!("✓ Imported {} plan(s)", report.imported.len());
    for failure in &report.failures {
        println!("  ⚠ Skipped record {}: {}", failure.index, failure.message);
    }
    Ok(report.imported)
}

#[derive(Debug, Clone)]
pub enum ProductOperation {
    Add {
        name: String,
        category: ProductCategory,
        sku: Option<String>,
        description: Option<String>,
        price: Option<f64>,
        cycle: BillingCycle,
    },
    List,
    Duplicate {
        id: String,
    },
    Advance {
        id: String,
    },
    Remove {
        id: String,
    },
}

pub fn product(paths: &BizplanPaths, plan: Option<&str>, op: ProductOperation) -> Result<()> {
    let mut ws = Workspace::open(paths)?;
    let plan_id = ws.resolve(plan)?;

    match op {
        ProductOperation::Add {
            name,
            category,
            sku,
            description,
            price,
            cycle,
        } => {
            if name.trim().is_empty() {
                bail!("Please enter a product name");
            }
            let pricing_tiers = match price {
                Some(price) => vec![PricingTier {
                    id: generate_id(),
                    name: "Standard".to_string(),
                    price,
                    billing_cycle: cycle,
                    ..Default::default()
                }],
                None => Vec::new(),
            };
            let id = ws.plan_mut(&plan_id)?.add_entity(Product {
                name: name.trim().to_string(),
                category,
                sku: sku.unwrap_or_default(),
                description: description.unwrap_or_default(),
                pricing_tiers,
                ..Default::default()
            })?;
            ws.save()?;
            println!("✓ Added product {} ({})", name.trim(), id);
        }
        ProductOperation::List => {
            let plan = ws.plan(&plan_id)?;
            if plan.products.is_empty() {
                println!("No products yet.");
                return Ok(());
            }
            for p in &plan.products {
                let prices: Vec<String> = p
                    .pricing_tiers
                    .iter()
                    .map(|t| format_cycle_price(t.price, t.billing_cycle))
                    .collect();
                println!(
                    "{:<34} {} {:<28} {} {:<12} {}",
                    p.id,
                    p.category.icon(),
                    truncate(&p.name, 28),
                    p.status.icon(),
                    p.status.label(),
                    prices.join(" · ")
                );
            }
        }
        ProductOperation::Duplicate { id } => {
            let copy = ws.plan_mut(&plan_id)?.duplicate_product(&id)?;
            ws.save()?;
            println!("✓ Duplicated product {} as {}", id, copy);
        }
        ProductOperation::Advance { id } => {
            let status = lifecycle::advance_product(ws.plan_mut(&plan_id)?, &id)?;
            ws.save()?;
            println!("✓ Product {} is now {} {}", id, status.icon(), status.label());
        }
        ProductOperation::Remove { id } => {
            if ws.plan_mut(&plan_id)?.delete_entity::<Product>(&id) {
                ws.save()?;
                println!("✓ Removed product {}", id);
            } else {
                println!("No product with id {}", id);
            }
        }
    }
    Ok(())
}

#[derive(Debug, Clone)]
pub enum MilestoneOperation {
    Add {
        title: String,
        category: MilestoneCategory,
        target_date: Option<String>,
        description: Option<String>,
    },
    List,
    Status {
        id: String,
        status: MilestoneStatus,
    },
    Remove {
        id: String,
    },
}

pub fn milestone(paths: &BizplanPaths, plan: Option<&str>, op: MilestoneOperation) -> Result<()> {
    let mut ws = Workspace::open(paths)?;
    let plan_id = ws.resolve(plan)?;

    match op {
        MilestoneOperation::Add {
            title,
            category,
            target_date,
            description,
        } => {
            if title.trim().is_empty() {
                bail!("Please enter a milestone title");
            }
            let id = ws.plan_mut(&plan_id)?.add_entity(Milestone {
                title: title.trim().to_string(),
                category,
                target_date: target_date.unwrap_or_default(),
                description: description.unwrap_or_default(),
                ..Default::default()
            })?;
            ws.save()?;
            println!("✓ Added milestone {} ({})", title.trim(), id);
        }
        MilestoneOperation::List => {
            let plan = ws.plan(&plan_id)?;
            if plan.roadmap.milestones.is_empty() {
                println!("No milestones yet.");
                return Ok(());
            }
            for m in &plan.roadmap.milestones {
                println!(
                    "{:<34} {} {:<30} {:<14} {}",
                    m.id,
                    m.status.icon(),
                    truncate(&m.title, 30),
                    format_date(&m.target_date),
                    m.status
                );
            }
        }
        MilestoneOperation::Status { id, status } => {
            lifecycle::set_milestone_status(ws.plan_mut(&plan_id)?, &id, status)?;
            ws.save()?;
            println!("✓ Milestone {} is now {} {}", id, status.icon(), status);
        }
        MilestoneOperation::Remove { id } => {
            if ws.plan_mut(&plan_id)?.delete_entity::<Milestone>(&id) {
                ws.save()?;
                println!("✓ Removed milestone {}", id);
            } else {
                println!("No milestone with id {}", id);
            }
        }
    }
    Ok(())
}

/// Core value edits; indices are 1-based as printed by `show`
#[derive(Debug, Clone)]
pub enum ValueOperation {
    Add { value: String },
    Move { from: usize, to: usize },
    Remove { index: usize },
}

fn zero_based(index: usize) -> Result<usize> {
    index
        .checked_sub(1)
        .context("Positions start at 1")
}

pub fn value(paths: &BizplanPaths, plan: Option<&str>, op: ValueOperation) -> Result<()> {
    let mut ws = Workspace::open(paths)?;
    let plan_id = ws.resolve(plan)?;
    let plan = ws.plan_mut(&plan_id)?;
    let list = ListRef::CoreValues;

    match op {
        ValueOperation::Add { value } => {
            if value.trim().is_empty() {
                bail!("Please enter a core value");
            }
            let index = plan.push_item(&list, &value)?;
            println!("✓ Added core value #{}", index + 1);
        }
        ValueOperation::Move { from, to } => {
            plan.move_item(&list, zero_based(from)?, zero_based(to)?)?;
            println!("✓ Moved core value {} to {}", from, to);
        }
        ValueOperation::Remove { index } => {
            let removed = plan.remove_item(&list, zero_based(index)?)?;
            println!("✓ Removed core value: {}", removed);
        }
    }
    ws.save()?;
    Ok(())
}

/// Set one scalar field, committing it through the edit debouncer
pub async fn set(paths: &BizplanPaths, plan: Option<&str>, field: &str, value: &str) -> Result<()> {
    let mut ws = Workspace::open(paths)?;
    let plan_id = ws.resolve(plan)?;
    let field: ScalarField = field.parse()?;

    let (debouncer, mut edits) = EditDebouncer::new(ws.config.editor.debounce());
    debouncer.push((plan_id, field), value);
    // leaving the command is the blur: commit now rather than wait
    let delivered = debouncer.flush_all();

    for _ in 0..delivered {
        if let Some(edit) = edits.recv().await {
            commit(&mut ws.store, edit)?;
        }
    }
    ws.save()?;

    println!("✓ {} updated", field);
    Ok(())
}
