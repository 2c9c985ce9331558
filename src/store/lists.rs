//! Editing of ordered string lists inside a plan
//!
//! Core values, product features, market lists, funnel stages, compliance
//! notes and quarterly goals are plain strings identified by position.

use crate::error::PlanError;
use crate::models::{FunnelStage, Plan};

/// Address of an ordered string list inside a plan
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListRef {
    CoreValues,
    ProductFeatures(String),
    Trends,
    TargetSegments,
    Differentiators,
    Opportunities,
    Threats,
    Funnel(FunnelStage),
    ComplianceNotes,
    QuarterlyGoals(String),
}

impl ListRef {
    fn label(&self) -> String {
        match self {
            ListRef::CoreValues => "core value".to_string(),
            ListRef::ProductFeatures(id) => format!("feature of product {}", id),
            ListRef::Trends => "trend".to_string(),
            ListRef::TargetSegments => "target segment".to_string(),
            ListRef::Differentiators => "differentiator".to_string(),
            ListRef::Opportunities => "opportunity".to_string(),
            ListRef::Threats => "threat".to_string(),
            ListRef::Funnel(stage) => format!("{} tactic", stage.label().to_lowercase()),
            ListRef::ComplianceNotes => "compliance note".to_string(),
            ListRef::QuarterlyGoals(q) => format!("goal for {}", q),
        }
    }
}

fn list_mut<'a>(
    plan: &'a mut Plan,
    list: &ListRef,
    create: bool,
) -> Result<&'a mut Vec<String>, PlanError> {
    Ok(match list {
        ListRef::CoreValues => &mut plan.executive.core_values,
        ListRef::ProductFeatures(id) => {
            &mut plan
                .products
                .iter_mut()
                .find(|p| &p.id == id)
                .ok_or_else(|| PlanError::not_found("Product", id.as_str()))?
                .features
        }
        ListRef::Trends => &mut plan.market.trends,
        ListRef::TargetSegments => &mut plan.market.target_segments,
        ListRef::Differentiators => &mut plan.market.differentiators,
        ListRef::Opportunities => &mut plan.market.opportunities,
        ListRef::Threats => &mut plan.market.threats,
        ListRef::Funnel(stage) => plan.marketing.funnel.stage_mut(*stage),
        ListRef::ComplianceNotes => &mut plan.legal.compliance_notes,
        ListRef::QuarterlyGoals(quarter) => {
            let goals = &mut plan.roadmap.quarterly_goals;
            if create {
                goals.entry(quarter.clone()).or_default()
            } else {
                goals
                    .get_mut(quarter)
                    .ok_or_else(|| PlanError::not_found("Quarter", quarter.as_str()))?
            }
        }
    })
}

fn clean(list: &ListRef, value: &str) -> Result<String, PlanError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(PlanError::validation(list.label(), "must not be empty"));
    }
    Ok(value.to_string())
}

fn check_index(index: usize, len: usize) -> Result<(), PlanError> {
    if index >= len {
        return Err(PlanError::IndexOutOfRange { index, len });
    }
    Ok(())
}

impl Plan {
    pub fn list(&self, list: &ListRef) -> Option<&Vec<String>> {
        match list {
            ListRef::CoreValues => Some(&self.executive.core_values),
            ListRef::ProductFeatures(id) => self.product(id).map(|p| &p.features),
            ListRef::Trends => Some(&self.market.trends),
            ListRef::TargetSegments => Some(&self.market.target_segments),
            ListRef::Differentiators => Some(&self.market.differentiators),
            ListRef::Opportunities => Some(&self.market.opportunities),
            ListRef::Threats => Some(&self.market.threats),
            ListRef::Funnel(stage) => Some(self.marketing.funnel.stage(*stage)),
            ListRef::ComplianceNotes => Some(&self.legal.compliance_notes),
            ListRef::QuarterlyGoals(q) => self.roadmap.quarterly_goals.get(q),
        }
    }

    /// Append a trimmed, non-empty value; returns its index
    pub fn push_item(&mut self, list: &ListRef, value: &str) -> Result<usize, PlanError> {
        let value = clean(list, value)?;
        let items = list_mut(self, list, true)?;
        items.push(value);
        let index = items.len() - 1;
        self.touch();
        Ok(index)
    }

    pub fn set_item(&mut self, list: &ListRef, index: usize, value: &str) -> Result<(), PlanError> {
        let value = clean(list, value)?;
        let items = list_mut(self, list, false)?;
        check_index(index, items.len())?;
        items[index] = value;
        self.touch();
        Ok(())
    }

    pub fn remove_item(&mut self, list: &ListRef, index: usize) -> Result<String, PlanError> {
        let items = list_mut(self, list, false)?;
        check_index(index, items.len())?;
        let removed = items.remove(index);
        self.touch();
        Ok(removed)
    }

    /// Move the item at `from` to position `to`.
    ///
    /// Moving by one position swaps the two neighbours. Both indices are
    /// checked before anything is touched.
    pub fn move_item(&mut self, list: &ListRef, from: usize, to: usize) -> Result<(), PlanError> {
        let items = list_mut(self, list, false)?;
        check_index(from, items.len())?;
        check_index(to, items.len())?;
        if from == to {
            return Ok(());
        }
        let item = items.remove(from);
        items.insert(to, item);
        self.touch();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Product, TemplateKind};
    use crate::templates::create_plan;

    fn values(plan: &Plan) -> Vec<&str> {
        plan.executive.core_values.iter().map(String::as_str).collect()
    }

    #[test]
    fn test_core_value_editing() {
        let mut plan = create_plan("Test", TemplateKind::Blank);
        plan.push_item(&ListRef::CoreValues, "  Honesty ").unwrap();
        plan.push_item(&ListRef::CoreValues, "Craft").unwrap();
        plan.push_item(&ListRef::CoreValues, "Care").unwrap();
        assert_eq!(values(&plan), vec!["Honesty", "Craft", "Care"]);

        plan.move_item(&ListRef::CoreValues, 2, 1).unwrap();
        assert_eq!(values(&plan), vec!["Honesty", "Care", "Craft"]);

        plan.set_item(&ListRef::CoreValues, 0, "Integrity").unwrap();
        assert_eq!(plan.remove_item(&ListRef::CoreValues, 2).unwrap(), "Craft");
        assert_eq!(values(&plan), vec!["Integrity", "Care"]);
    }

    #[test]
    fn test_move_out_of_range_leaves_list_untouched() {
        let mut plan = create_plan("Test", TemplateKind::Nonprofit);
        let before = plan.clone();
        let err = plan.move_item(&ListRef::CoreValues, 2, 3).unwrap_err();
        assert!(matches!(err, PlanError::IndexOutOfRange { index: 3, len: 3 }));
        assert_eq!(plan, before);
    }

    #[test]
    fn test_blank_value_is_rejected() {
        let mut plan = create_plan("Test", TemplateKind::Blank);
        let err = plan.push_item(&ListRef::Threats, "   ").unwrap_err();
        assert!(matches!(err, PlanError::Validation { .. }));
        assert!(plan.market.threats.is_empty());
    }

    #[test]
    fn test_product_features_and_quarters() {
        let mut plan = create_plan("Test", TemplateKind::Blank);
        let product = Product {
            name: "Widget".to_string(),
            ..Default::default()
        };
        let pid = plan.add_entity(product).unwrap();
        let features = ListRef::ProductFeatures(pid);
        plan.push_item(&features, "Sync").unwrap();
        assert_eq!(plan.list(&features).unwrap(), &vec!["Sync".to_string()]);

        let missing = ListRef::ProductFeatures("nope".to_string());
        assert!(plan.push_item(&missing, "X").unwrap_err().is_not_found());

        let q1 = ListRef::QuarterlyGoals("2025-Q1".to_string());
        assert!(plan.remove_item(&q1, 0).unwrap_err().is_not_found());
        plan.push_item(&q1, "Ship v1").unwrap();
        assert_eq!(plan.roadmap.quarterly_goals["2025-Q1"], vec!["Ship v1"]);
    }

    #[test]
    fn test_funnel_stage_lists() {
        let mut plan = create_plan("Test", TemplateKind::Saas);
        let list = ListRef::Funnel(FunnelStage::Conversion);
        plan.push_item(&list, "Referral credit").unwrap();
        assert_eq!(plan.marketing.funnel.conversion.len(), 3);
    }
}
