//! Status transitions for products and milestones
//!
//! Products move forward through an ordered lifecycle:
//! idea -> development -> beta -> launched -> retired
//!
//! Reaching `launched` stamps a launch date when none was recorded, and
//! completing a milestone stamps its completion date.

use chrono::Utc;

use crate::error::PlanError;
use crate::models::{MilestoneStatus, Plan, ProductStatus};

#[derive(Debug, thiserror::Error)]
pub enum LifecycleError {
    #[error("Product {0} is retired and cannot advance further")]
    Terminal(String),

    #[error("Cannot move product {id} backwards from {from} to {to}")]
    BackwardTransition {
        id: String,
        from: ProductStatus,
        to: ProductStatus,
    },

    #[error("Product {id} is already {status}")]
    AlreadyAtStatus { id: String, status: ProductStatus },
}

fn today() -> String {
    Utc::now().date_naive().format("%Y-%m-%d").to_string()
}

/// Advance a product to the next lifecycle stage and return it
pub fn advance_product(plan: &mut Plan, product_id: &str) -> Result<ProductStatus, PlanError> {
    let current = plan
        .product(product_id)
        .map(|p| p.status)
        .ok_or_else(|| PlanError::not_found("Product", product_id))?;

    let next = current
        .next()
        .ok_or_else(|| LifecycleError::Terminal(product_id.to_string()))?;
    set_product_status(plan, product_id, next)?;
    Ok(next)
}

/// Move a product forward to `target`, skipping intermediate stages if needed
pub fn set_product_status(
    plan: &mut Plan,
    product_id: &str,
    target: ProductStatus,
) -> Result<(), PlanError> {
    let product = plan
        .products
        .iter_mut()
        .find(|p| p.id == product_id)
        .ok_or_else(|| PlanError::not_found("Product", product_id))?;

    if product.status == target {
        return Err(LifecycleError::AlreadyAtStatus {
            id: product_id.to_string(),
            status: target,
        }
        .into());
    }
    if target < product.status {
        return Err(LifecycleError::BackwardTransition {
            id: product_id.to_string(),
            from: product.status,
            to: target,
        }
        .into());
    }

    tracing::debug!(
        product = product_id,
        from = %product.status,
        to = %target,
        "product status change"
    );
    product.status = target;
    if target == ProductStatus::Launched
        && product.launch_date.as_deref().map_or(true, str::is_empty)
    {
        product.launch_date = Some(today());
    }
    plan.touch();
    Ok(())
}

/// Set a milestone's status, keeping `completedDate` consistent with it
pub fn set_milestone_status(
    plan: &mut Plan,
    milestone_id: &str,
    status: MilestoneStatus,
) -> Result<(), PlanError> {
    let milestone = plan
        .roadmap
        .milestones
        .iter_mut()
        .find(|m| m.id == milestone_id)
        .ok_or_else(|| PlanError::not_found("Milestone", milestone_id))?;

    milestone.status = status;
    match status {
        MilestoneStatus::Completed => {
            if milestone.completed_date.is_none() {
                milestone.completed_date = Some(today());
            }
        }
        _ => milestone.completed_date = None,
    }
    plan.touch();
    Ok(())
}
