//! Data models for business plans
//!
//! These mirror the portable JSON structure used for persistence and
//! export. Field names are camelCase on the wire.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub mod entities;
pub mod kinds;

pub use entities::{
    Bundle, Competitor, Expense, FinancialProjection, LegalDocument, MarketingChannel, Milestone,
    OperationalProcess, PricingTier, Product, RevenueStream, TechStackItem,
};
pub use kinds::{
    BillingCycle, ChannelStatus, ChannelType, ExpenseCategory, ExpenseFrequency, ExportFormat,
    LegalDocumentStatus, LegalDocumentType, MilestoneCategory, MilestoneStatus, ProcessCategory,
    ProcessFrequency, ProductCategory, ProductStatus, RevenueType, TechBilling, TechCategory,
    TemplateKind,
};

pub const DEFAULT_ICON: &str = "📊";
pub const DEFAULT_COLOR: &str = "#3498db";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExecutiveSummary {
    pub business_name: String,
    pub tagline: String,
    pub mission: String,
    pub vision: String,
    pub core_values: Vec<String>,
    pub target_market: String,
    pub unique_value: String,
    pub founded_date: String,
    pub founder: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MarketAnalysis {
    pub market_size: String,
    pub growth_rate: String,
    pub trends: Vec<String>,
    pub target_segments: Vec<String>,
    pub competitors: Vec<Competitor>,
    pub differentiators: Vec<String>,
    pub opportunities: Vec<String>,
    pub threats: Vec<String>,
}

/// Tactics grouped by funnel stage
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SalesFunnel {
    pub awareness: Vec<String>,
    pub interest: Vec<String>,
    pub consideration: Vec<String>,
    pub conversion: Vec<String>,
    pub retention: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FunnelStage {
    Awareness,
    Interest,
    Consideration,
    Conversion,
    Retention,
}

impl FunnelStage {
    pub const ALL: [FunnelStage; 5] = [
        FunnelStage::Awareness,
        FunnelStage::Interest,
        FunnelStage::Consideration,
        FunnelStage::Conversion,
        FunnelStage::Retention,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            FunnelStage::Awareness => "Awareness",
            FunnelStage::Interest => "Interest",
            FunnelStage::Consideration => "Consideration",
            FunnelStage::Conversion => "Conversion",
            FunnelStage::Retention => "Retention",
        }
    }
}

impl SalesFunnel {
    pub fn stage(&self, stage: FunnelStage) -> &Vec<String> {
        match stage {
            FunnelStage::Awareness => &self.awareness,
            FunnelStage::Interest => &self.interest,
            FunnelStage::Consideration => &self.consideration,
            FunnelStage::Conversion => &self.conversion,
            FunnelStage::Retention => &self.retention,
        }
    }

    pub fn stage_mut(&mut self, stage: FunnelStage) -> &mut Vec<String> {
        match stage {
            FunnelStage::Awareness => &mut self.awareness,
            FunnelStage::Interest => &mut self.interest,
            FunnelStage::Consideration => &mut self.consideration,
            FunnelStage::Conversion => &mut self.conversion,
            FunnelStage::Retention => &mut self.retention,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MarketingSales {
    pub website_url: String,
    pub channels: Vec<MarketingChannel>,
    pub funnel: SalesFunnel,
    pub pricing_strategy: String,
    pub promotions: Vec<String>,
    pub partnerships: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Operations {
    pub development_process: String,
    pub release_schedule: String,
    pub support_channels: Vec<String>,
    pub distribution_method: String,
    pub processes: Vec<OperationalProcess>,
    pub tools: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Technology {
    pub stack: Vec<TechStackItem>,
    pub licensing_system: String,
    pub payment_processors: Vec<String>,
    pub analytics_tools: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FinancialPlan {
    pub revenue_streams: Vec<RevenueStream>,
    pub expenses: Vec<Expense>,
    pub projections: Vec<FinancialProjection>,
    pub startup_costs: f64,
    pub break_even_point: String,
    pub funding_needs: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LegalCompliance {
    pub business_structure: String,
    pub licensing_model: String,
    pub documents: Vec<LegalDocument>,
    pub compliance_notes: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Roadmap {
    pub milestones: Vec<Milestone>,
    /// Goals per quarter label (e.g. "2025-Q1")
    pub quarterly_goals: BTreeMap<String, Vec<String>>,
    pub long_term_vision: String,
}

/// The root aggregate: one business plan document
///
/// Built only through [`crate::templates::create_plan`]; the plan exclusively
/// owns every section and nested record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Plan {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default = "default_icon")]
    pub icon: String,
    #[serde(default = "default_color")]
    pub color: String,
    pub created_at: DateTime<Utc>,
    pub last_updated: DateTime<Utc>,

    #[serde(default)]
    pub executive: ExecutiveSummary,
    #[serde(default)]
    pub products: Vec<Product>,
    #[serde(default)]
    pub bundles: Vec<Bundle>,
    #[serde(default)]
    pub market: MarketAnalysis,
    #[serde(default)]
    pub marketing: MarketingSales,
    #[serde(default)]
    pub operations: Operations,
    #[serde(default)]
    pub technology: Technology,
    #[serde(default)]
    pub financial: FinancialPlan,
    #[serde(default)]
    pub legal: LegalCompliance,
    #[serde(default)]
    pub roadmap: Roadmap,
}

fn default_icon() -> String {
    DEFAULT_ICON.to_string()
}

fn default_color() -> String {
    DEFAULT_COLOR.to_string()
}

impl Plan {
    /// Refresh `last_updated`; every mutation of the plan or an owned record
    /// must go through here
    pub fn touch(&mut self) {
        let now = Utc::now();
        // Keep the timestamp monotonic even if the clock steps backwards
        self.last_updated = if now > self.last_updated {
            now
        } else {
            self.last_updated + chrono::Duration::nanoseconds(1)
        };
    }

    pub fn product(&self, id: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    pub fn milestone(&self, id: &str) -> Option<&Milestone> {
        self.roadmap.milestones.iter().find(|m| m.id == id)
    }

    /// Name shown in headings: the business name when set, else the plan name
    pub fn display_name(&self) -> &str {
        if self.executive.business_name.trim().is_empty() {
            &self.name
        } else {
            &self.executive.business_name
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_touch_is_monotonic() {
        let mut plan = crate::templates::create_plan("Test", TemplateKind::Blank);
        let before = plan.last_updated;
        plan.touch();
        assert!(plan.last_updated > before);
        assert_eq!(plan.created_at, before);
    }

    #[test]
    fn test_plan_uses_camel_case_fields() {
        let plan = crate::templates::create_plan("Test", TemplateKind::Blank);
        let json = serde_json::to_value(&plan).unwrap();
        assert!(json.get("lastUpdated").is_some());
        assert!(json.get("createdAt").is_some());
        assert!(json["executive"].get("businessName").is_some());
        assert!(json["roadmap"].get("quarterlyGoals").is_some());
        assert!(json["financial"].get("revenueStreams").is_some());
    }

    #[test]
    fn test_display_name_falls_back_to_plan_name() {
        let mut plan = crate::templates::create_plan("Acme", TemplateKind::Blank);
        plan.executive.business_name = "Acme Plugins LLC".to_string();
        assert_eq!(plan.display_name(), "Acme Plugins LLC");
        plan.executive.business_name.clear();
        assert_eq!(plan.display_name(), "Acme");
    }
}
