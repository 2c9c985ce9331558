//! Derived values computed from a plan's current state
//!
//! Everything here is read-only over borrowed data.

use crate::models::{
    Expense, ExpenseFrequency, ExecutiveSummary, Milestone, MilestoneStatus, Plan, Product,
    ProductStatus, RevenueStream, TechBilling, TechStackItem,
};

/// Number of executive summary fields tracked by [`completion_score`]
pub const TRACKED_EXECUTIVE_FIELDS: usize = 9;

/// Sum of monthly estimates; streams are already expressed per month
pub fn monthly_revenue(streams: &[RevenueStream]) -> f64 {
    streams.iter().map(|s| s.monthly_estimate).sum()
}

/// Expenses normalized to a monthly amount. One-time costs count as zero.
pub fn monthly_expenses(expenses: &[Expense]) -> f64 {
    expenses
        .iter()
        .map(|e| match e.frequency {
            ExpenseFrequency::Monthly => e.amount,
            ExpenseFrequency::Yearly => e.amount / 12.0,
            ExpenseFrequency::OneTime => 0.0,
        })
        .sum()
}

/// Tech stack costs normalized the same way as expenses
pub fn monthly_tech_cost(stack: &[TechStackItem]) -> f64 {
    stack
        .iter()
        .map(|t| match t.billing_cycle {
            TechBilling::Monthly => t.cost,
            TechBilling::Yearly => t.cost / 12.0,
            TechBilling::OneTime | TechBilling::Free => 0.0,
        })
        .sum()
}

pub fn monthly_net(plan: &Plan) -> f64 {
    monthly_revenue(&plan.financial.revenue_streams) - monthly_expenses(&plan.financial.expenses)
}

/// Records carrying a lifecycle status
pub trait HasStatus {
    type Status: PartialEq;

    fn status(&self) -> &Self::Status;
}

impl HasStatus for Product {
    type Status = ProductStatus;

    fn status(&self) -> &ProductStatus {
        &self.status
    }
}

impl HasStatus for Milestone {
    type Status = MilestoneStatus;

    fn status(&self) -> &MilestoneStatus {
        &self.status
    }
}

/// Items whose status equals `status`, in their original order
pub fn filter_by_status<'a, T: HasStatus>(items: &'a [T], status: &T::Status) -> Vec<&'a T> {
    items.iter().filter(|item| item.status() == status).collect()
}

pub fn products_by_status<'a>(products: &'a [Product], status: ProductStatus) -> Vec<&'a Product> {
    filter_by_status(products, &status)
}

pub fn milestones_by_status<'a>(
    milestones: &'a [Milestone],
    status: MilestoneStatus,
) -> Vec<&'a Milestone> {
    filter_by_status(milestones, &status)
}

/// Percentage of tracked executive summary fields that are filled in
pub fn completion_score(exec: &ExecutiveSummary) -> u8 {
    let scalars = [
        &exec.business_name,
        &exec.tagline,
        &exec.mission,
        &exec.vision,
        &exec.founder,
        &exec.founded_date,
        &exec.target_market,
        &exec.unique_value,
    ];
    let filled = scalars.iter().filter(|s| !s.is_empty()).count()
        + usize::from(!exec.core_values.is_empty());

    (100.0 * filled as f64 / TRACKED_EXECUTIVE_FIELDS as f64).round() as u8
}

/// Headline numbers for a plan dashboard
#[derive(Debug, Clone, PartialEq)]
pub struct PlanOverview {
    pub product_count: usize,
    pub launched_count: usize,
    pub monthly_revenue: f64,
    pub monthly_expenses: f64,
    pub milestones_completed: usize,
    pub milestones_total: usize,
    pub completion: u8,
}

impl PlanOverview {
    pub fn compute(plan: &Plan) -> Self {
        Self {
            product_count: plan.products.len(),
            launched_count: products_by_status(&plan.products, ProductStatus::Launched).len(),
            monthly_revenue: monthly_revenue(&plan.financial.revenue_streams),
            monthly_expenses: monthly_expenses(&plan.financial.expenses),
            milestones_completed: milestones_by_status(
                &plan.roadmap.milestones,
                MilestoneStatus::Completed,
            )
            .len(),
            milestones_total: plan.roadmap.milestones.len(),
            completion: completion_score(&plan.executive),
        }
    }

    pub fn monthly_net(&self) -> f64 {
        self.monthly_revenue - self.monthly_expenses
    }
}

/// The first `limit` milestones in roadmap order
pub fn recent_milestones(plan: &Plan, limit: usize) -> &[Milestone] {
    let end = plan.roadmap.milestones.len().min(limit);
    &plan.roadmap.milestones[..end]
}
