//! Template factory for new plans
//!
//! A plan starts from an empty baseline and each non-blank template overlays
//! a fixed set of starter values. The overlay is pure: same inputs, same
//! plan apart from the fresh identifier and timestamps.

use chrono::Utc;

use crate::error::PlanError;
use crate::ids::generate_id;
use crate::models::{
    ExecutiveSummary, FinancialPlan, LegalCompliance, MarketAnalysis, MarketingSales, Operations,
    Plan, Roadmap, SalesFunnel, Technology, TemplateKind, DEFAULT_COLOR, DEFAULT_ICON,
};

/// Build a new plan named `name` from the given template
pub fn create_plan(name: &str, kind: TemplateKind) -> Plan {
    let mut plan = baseline(name);
    apply_template(&mut plan, kind);
    plan
}

/// Like [`create_plan`] but takes the template by name.
///
/// Unknown names fail instead of falling back to the blank baseline.
pub fn create_plan_named(name: &str, template: &str) -> Result<Plan, PlanError> {
    let kind: TemplateKind = template.parse()?;
    Ok(create_plan(name, kind))
}

fn baseline(name: &str) -> Plan {
    let now = Utc::now();
    Plan {
        id: generate_id(),
        name: name.to_string(),
        description: String::new(),
        icon: DEFAULT_ICON.to_string(),
        color: DEFAULT_COLOR.to_string(),
        created_at: now,
        last_updated: now,
        executive: ExecutiveSummary {
            business_name: name.to_string(),
            ..Default::default()
        },
        products: Vec::new(),
        bundles: Vec::new(),
        market: MarketAnalysis::default(),
        marketing: MarketingSales::default(),
        operations: Operations::default(),
        technology: Technology::default(),
        financial: FinancialPlan::default(),
        legal: LegalCompliance::default(),
        roadmap: Roadmap::default(),
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn apply_template(plan: &mut Plan, kind: TemplateKind) {
    match kind {
        TemplateKind::Blank => {}
        TemplateKind::PluginBusiness => {
            plan.icon = kind.icon().to_string();
            plan.color = "#9b59b6".to_string();
            plan.executive.mission =
                "Empower users with powerful, easy-to-use plugins.".to_string();
            plan.executive.core_values = strings(&[
                "User-First Design",
                "Quality & Reliability",
                "Continuous Improvement",
            ]);
            plan.market.target_segments = strings(&[
                "Small Businesses",
                "Productivity Enthusiasts",
                "Knowledge Workers",
            ]);
            plan.market.differentiators = strings(&[
                "Superior documentation",
                "Regular updates",
                "Excellent support",
            ]);
            plan.marketing.funnel = SalesFunnel {
                awareness: strings(&["Content marketing", "Plugin directories", "Social media"]),
                interest: strings(&["Free trial/lite versions", "Documentation", "Demo videos"]),
                consideration: strings(&[
                    "Comparison guides",
                    "Testimonials",
                    "Feature highlights",
                ]),
                conversion: strings(&["Promotional discounts", "Bundle deals"]),
                retention: strings(&["Email updates", "New features", "Community engagement"]),
            };
            plan.legal.licensing_model = "GPL for PHP, commercial EULA for JS/assets".to_string();
            plan.technology.payment_processors = strings(&["Stripe", "PayPal"]);
        }
        TemplateKind::Saas => {
            plan.icon = kind.icon().to_string();
            plan.color = "#3498db".to_string();
            plan.market.target_segments = strings(&["SMBs", "Enterprise", "Startups"]);
            plan.marketing.funnel = SalesFunnel {
                awareness: strings(&["SEO", "Content marketing", "Paid ads"]),
                interest: strings(&["Free trial", "Webinars", "Case studies"]),
                consideration: strings(&["Demo calls", "ROI calculator", "Comparisons"]),
                conversion: strings(&["Annual discount", "Onboarding support"]),
                retention: strings(&["Customer success", "Feature updates", "Community"]),
            };
        }
        TemplateKind::Consulting => {
            plan.icon = kind.icon().to_string();
            plan.color = "#27ae60".to_string();
            plan.market.target_segments =
                strings(&["Businesses needing expertise", "Project-based clients"]);
            plan.marketing.funnel = SalesFunnel {
                awareness: strings(&["Networking", "Referrals", "LinkedIn"]),
                interest: strings(&["Portfolio", "Case studies", "Blog"]),
                consideration: strings(&["Discovery calls", "Proposals"]),
                conversion: strings(&["Contract signing"]),
                retention: strings(&["Ongoing retainers", "Follow-up projects"]),
            };
        }
        TemplateKind::Nonprofit => {
            plan.icon = kind.icon().to_string();
            plan.color = "#e74c3c".to_string();
            plan.executive.core_values =
                strings(&["Community Impact", "Transparency", "Sustainability"]);
            plan.market.target_segments = strings(&["Donors", "Volunteers", "Beneficiaries"]);
        }
    }
}

/// A fully written-out showcase plan, used by `init` to seed a fresh store
pub fn sample_plan() -> Plan {
    let mut plan = create_plan("BK", TemplateKind::PluginBusiness);
    let exec = &mut plan.executive;
    exec.business_name = "BK".to_string();
    exec.tagline = "Tools for a Better Life".to_string();
    exec.mission = "Empower humanity to develop habits for a better quality of life through \
                    powerful, easy-to-use WordPress and Obsidian.md plugins."
        .to_string();
    exec.vision = "A world where technology helps people live healthier, more organized, and \
                   more intentional lives."
        .to_string();
    exec.target_market = "Churches, non-profits, small businesses, and productivity enthusiasts \
                          seeking tools for better habits and organization."
        .to_string();
    exec.unique_value = "Integrated suite of plugins focused on wellness, productivity, and \
                         community - with superior support and regular updates."
        .to_string();
    plan
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_plan_is_empty_baseline() {
        let plan = create_plan("Acme", TemplateKind::Blank);
        assert_eq!(plan.name, "Acme");
        assert_eq!(plan.executive.business_name, "Acme");
        assert_eq!(plan.icon, DEFAULT_ICON);
        assert_eq!(plan.color, DEFAULT_COLOR);
        assert_eq!(plan.created_at, plan.last_updated);
        assert!(plan.products.is_empty());
        assert!(plan.executive.core_values.is_empty());
        assert!(plan.market.target_segments.is_empty());
        assert!(plan.roadmap.quarterly_goals.is_empty());
        assert_eq!(plan.financial.startup_costs, 0.0);
    }

    #[test]
    fn test_plugin_business_overlay() {
        let plan = create_plan("Plugins", TemplateKind::PluginBusiness);
        assert_eq!(plan.icon, "🔌");
        assert_eq!(plan.color, "#9b59b6");
        assert_eq!(plan.executive.core_values.len(), 3);
        assert_eq!(plan.marketing.funnel.conversion.len(), 2);
        assert_eq!(plan.technology.payment_processors, vec!["Stripe", "PayPal"]);
        assert!(!plan.legal.licensing_model.is_empty());
    }

    #[test]
    fn test_nonprofit_overlay() {
        let plan = create_plan("Shelter", TemplateKind::Nonprofit);
        assert_eq!(plan.color, "#e74c3c");
        assert_eq!(
            plan.market.target_segments,
            vec!["Donors", "Volunteers", "Beneficiaries"]
        );
        assert!(plan.marketing.funnel.awareness.is_empty());
    }

    #[test]
    fn test_templates_differ_only_in_identity_between_runs() {
        let a = create_plan("Same", TemplateKind::Consulting);
        let mut b = create_plan("Same", TemplateKind::Consulting);
        assert_ne!(a.id, b.id);
        b.id = a.id.clone();
        b.created_at = a.created_at;
        b.last_updated = a.last_updated;
        assert_eq!(a, b);
    }

    #[test]
    fn test_unknown_template_is_configuration_error() {
        let err = create_plan_named("X", "franchise").unwrap_err();
        assert!(matches!(err, PlanError::Configuration(_)));
        assert!(create_plan_named("X", "saas").is_ok());
    }

    #[test]
    fn test_sample_plan_is_filled_in() {
        let plan = sample_plan();
        assert_eq!(plan.executive.tagline, "Tools for a Better Life");
        assert_eq!(crate::metrics::completion_score(&plan.executive), 78);
    }
}
