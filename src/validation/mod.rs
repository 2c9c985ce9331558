//! Structural checks for plans
//!
//! `validate_plan` rejects data that would break rendering or metrics;
//! `lint_plan` reports advisory issues without failing.

use std::collections::HashSet;
use std::sync::OnceLock;

use regex::Regex;

use crate::error::PlanError;
use crate::models::{Plan, ProductStatus};
use crate::store::Entity;

const HEX_COLOR: &str = r"^#[0-9a-fA-F]{6}$";

/// Validate a plan, returning the first hard error found
pub fn validate_plan(plan: &Plan) -> Result<(), PlanError> {
    if plan.name.trim().is_empty() {
        return Err(PlanError::validation("Plan name", "must not be empty"));
    }

    for product in &plan.products {
        if product.name.trim().is_empty() {
            return Err(PlanError::validation(
                format!("Product {}", product.id),
                "has an empty name",
            ));
        }
        for tier in &product.pricing_tiers {
            if tier.name.trim().is_empty() {
                return Err(PlanError::validation(
                    format!("Pricing tier {} of {}", tier.id, product.name),
                    "has an empty name",
                ));
            }
            if !tier.price.is_finite() || tier.price < 0.0 {
                return Err(PlanError::validation(
                    format!("Pricing tier {} of {}", tier.name, product.name),
                    format!("has an invalid price {}", tier.price),
                ));
            }
        }
    }

    for value in &plan.executive.core_values {
        if value.trim().is_empty() {
            return Err(PlanError::validation("Core value", "must not be empty"));
        }
    }

    Ok(())
}

fn duplicate_ids<T: Entity>(plan: &Plan, warnings: &mut Vec<String>) {
    let mut seen = HashSet::new();
    for item in T::collection(plan) {
        if !seen.insert(item.id()) {
            warnings.push(format!("Duplicate {} ID: {}", T::KIND.to_lowercase(), item.id()));
        }
    }
}

fn is_hex_color(color: &str) -> bool {
    static PATTERN: OnceLock<Option<Regex>> = OnceLock::new();
    PATTERN
        .get_or_init(|| Regex::new(HEX_COLOR).ok())
        .as_ref()
        .is_some_and(|re| re.is_match(color))
}

/// Check for common plan issues (lint-like checks)
pub fn lint_plan(plan: &Plan) -> Vec<String> {
    let mut warnings = Vec::new();

    if !is_hex_color(&plan.color) {
        warnings.push(format!("Color '{}' is not a #rrggbb value", plan.color));
    }

    duplicate_ids::<crate::models::Product>(plan, &mut warnings);
    duplicate_ids::<crate::models::Bundle>(plan, &mut warnings);
    duplicate_ids::<crate::models::Competitor>(plan, &mut warnings);
    duplicate_ids::<crate::models::MarketingChannel>(plan, &mut warnings);
    duplicate_ids::<crate::models::OperationalProcess>(plan, &mut warnings);
    duplicate_ids::<crate::models::TechStackItem>(plan, &mut warnings);
    duplicate_ids::<crate::models::RevenueStream>(plan, &mut warnings);
    duplicate_ids::<crate::models::Expense>(plan, &mut warnings);
    duplicate_ids::<crate::models::LegalDocument>(plan, &mut warnings);
    duplicate_ids::<crate::models::Milestone>(plan, &mut warnings);

    for product in &plan.products {
        if product.pricing_tiers.is_empty() && product.status != ProductStatus::Retired {
            warnings.push(format!("{}: No pricing tiers defined", product.name));
        }
        if product.status == ProductStatus::Launched
            && product.launch_date.as_deref().map_or(true, str::is_empty)
        {
            warnings.push(format!("{}: Launched without a launch date", product.name));
        }
    }

    let product_ids: HashSet<&str> = plan.products.iter().map(|p| p.id.as_str()).collect();
    for bundle in &plan.bundles {
        for id in &bundle.product_ids {
            if !product_ids.contains(id.as_str()) {
                warnings.push(format!("{}: References non-existent product {}", bundle.name, id));
            }
        }
    }

    warnings
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Bundle, PricingTier, Product, TemplateKind};
    use crate::templates::create_plan;

    #[test]
    fn test_template_plans_are_valid() {
        for kind in TemplateKind::ALL {
            let plan = create_plan("Acme", *kind);
            validate_plan(&plan).unwrap();
            assert!(lint_plan(&plan).is_empty(), "{:?}", lint_plan(&plan));
        }
    }

    #[test]
    fn test_negative_tier_price_is_rejected() {
        // Loaded data bypasses the checks in add_tier
        let mut plan = create_plan("Acme", TemplateKind::Blank);
        plan.products.push(Product {
            id: "p1".to_string(),
            name: "Widget".to_string(),
            pricing_tiers: vec![PricingTier {
                id: "t1".to_string(),
                name: "Broken".to_string(),
                price: -5.0,
                ..Default::default()
            }],
            ..Default::default()
        });
        let err = validate_plan(&plan).unwrap_err();
        assert!(err.to_string().contains("invalid price"));
    }

    #[test]
    fn test_blank_plan_name_is_rejected() {
        let mut plan = create_plan("Acme", TemplateKind::Blank);
        plan.name = "  ".to_string();
        assert!(matches!(
            validate_plan(&plan).unwrap_err(),
            PlanError::Validation { .. }
        ));
    }

    #[test]
    fn test_lint_findings() {
        let mut plan = create_plan("Acme", TemplateKind::Blank);
        plan.color = "blue".to_string();
        let product = Product {
            name: "Widget".to_string(),
            status: ProductStatus::Launched,
            ..Default::default()
        };
        plan.add_entity(product).unwrap();
        let bundle = Bundle {
            name: "Everything".to_string(),
            product_ids: vec!["ghost".to_string()],
            ..Default::default()
        };
        plan.add_entity(bundle).unwrap();
        let dup = plan.products[0].clone();
        plan.products.push(dup);

        let warnings = lint_plan(&plan);
        assert!(warnings.iter().any(|w| w.contains("#rrggbb")));
        assert!(warnings.iter().any(|w| w.contains("Duplicate product ID")));
        assert!(warnings.iter().any(|w| w.contains("No pricing tiers")));
        assert!(warnings.iter().any(|w| w.contains("launch date")));
        assert!(warnings.iter().any(|w| w.contains("non-existent product ghost")));
    }
}
