//! Records held in a plan's nested collections
//!
//! Each record with an `id` is unique within its owning collection only.

use serde::{Deserialize, Serialize};

use super::kinds::{
    BillingCycle, ChannelStatus, ChannelType, ExpenseCategory, ExpenseFrequency,
    LegalDocumentStatus, LegalDocumentType, MilestoneCategory, MilestoneStatus, ProcessCategory,
    ProcessFrequency, ProductCategory, ProductStatus, RevenueType, TechBilling, TechCategory,
};

/// A price point offered for a product
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PricingTier {
    #[serde(default)]
    pub id: String,
    pub name: String,
    pub price: f64,
    pub billing_cycle: BillingCycle,
    #[serde(default)]
    pub features: Vec<String>,
    #[serde(default)]
    pub is_popular: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub sku: String,
    pub name: String,
    pub category: ProductCategory,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub features: Vec<String>,
    #[serde(default)]
    pub pricing_tiers: Vec<PricingTier>,
    pub status: ProductStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub launch_date: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl Product {
    pub fn tier(&self, id: &str) -> Option<&PricingTier> {
        self.pricing_tiers.iter().find(|t| t.id == id)
    }

    /// Lowest tier price, if the product has any tiers
    pub fn starting_price(&self) -> Option<f64> {
        self.pricing_tiers
            .iter()
            .map(|t| t.price)
            .fold(None, |min, p| Some(min.map_or(p, |m: f64| m.min(p))))
    }
}

/// Several products sold together at a discount
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bundle {
    #[serde(default)]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub product_ids: Vec<String>,
    #[serde(default)]
    pub discount_percent: f64,
    #[serde(default)]
    pub price: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Competitor {
    #[serde(default)]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub website: String,
    #[serde(default)]
    pub products: String,
    #[serde(default)]
    pub strengths: Vec<String>,
    #[serde(default)]
    pub weaknesses: Vec<String>,
    #[serde(default)]
    pub pricing: String,
    #[serde(default)]
    pub notes: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketingChannel {
    #[serde(default)]
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub channel_type: ChannelType,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub budget: f64,
    pub status: ChannelStatus,
    #[serde(default)]
    pub metrics: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OperationalProcess {
    #[serde(default)]
    pub id: String,
    pub name: String,
    pub category: ProcessCategory,
    #[serde(default)]
    pub description: String,
    pub frequency: ProcessFrequency,
    #[serde(default)]
    pub tools: Vec<String>,
    #[serde(default)]
    pub owner: String,
}

/// A tool or service the business pays for
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TechStackItem {
    #[serde(default)]
    pub id: String,
    pub category: TechCategory,
    pub name: String,
    #[serde(default)]
    pub purpose: String,
    #[serde(default)]
    pub cost: f64,
    pub billing_cycle: TechBilling,
    #[serde(default)]
    pub notes: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RevenueStream {
    #[serde(default)]
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub revenue_type: RevenueType,
    /// Already expressed per month
    pub monthly_estimate: f64,
    #[serde(default)]
    pub notes: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Expense {
    #[serde(default)]
    pub id: String,
    pub name: String,
    pub category: ExpenseCategory,
    pub amount: f64,
    pub frequency: ExpenseFrequency,
    #[serde(default)]
    pub notes: String,
}

/// Yearly forecast row, keyed by `year`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinancialProjection {
    pub year: i32,
    #[serde(default)]
    pub revenue: f64,
    #[serde(default)]
    pub expenses: f64,
    #[serde(default)]
    pub profit: f64,
    #[serde(default)]
    pub customers: u32,
    #[serde(default)]
    pub notes: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegalDocument {
    #[serde(default)]
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub document_type: LegalDocumentType,
    pub status: LegalDocumentStatus,
    #[serde(default)]
    pub last_updated: String,
    #[serde(default)]
    pub notes: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Milestone {
    #[serde(default)]
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub category: MilestoneCategory,
    #[serde(default)]
    pub target_date: String,
    pub status: MilestoneStatus,
    /// Free-text success metrics
    #[serde(default)]
    pub metrics: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_date: Option<String>,
    #[serde(default)]
    pub notes: String,
}
