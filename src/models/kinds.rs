//! Closed enumerations used across the plan schema
//!
//! Every variant serializes to the kebab-case name used in exported files.
//! Unknown names fail to deserialize, and `FromStr` rejects them with a
//! configuration error.

use serde::{Deserialize, Serialize};

use crate::error::PlanError;

macro_rules! kind_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident ($what:literal) {
            $( $(#[$vmeta:meta])* $variant:ident => $text:literal $(| $alias:literal)* ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(
            Debug,
            Clone,
            Copy,
            Default,
            PartialEq,
            Eq,
            PartialOrd,
            Ord,
            Hash,
            Serialize,
            Deserialize,
        )]
        #[serde(rename_all = "kebab-case")]
        pub enum $name {
            $( $(#[$vmeta])* $(#[serde(alias = $alias)])* $variant ),+
        }

        impl $name {
            /// All variants in declaration order
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $text),+
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $name {
            type Err = PlanError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s.trim().to_lowercase().as_str() {
                    $($text $(| $alias)* => Ok($name::$variant),)+
                    _ => Err(PlanError::Configuration(format!(
                        "Invalid {}: {}. Use: {}",
                        $what,
                        s,
                        [$($text),+].join(", ")
                    ))),
                }
            }
        }
    };
}

kind_enum! {
    /// Starter configuration used to pre-populate a new plan
    pub enum TemplateKind ("template") {
        #[default]
        Blank => "blank",
        PluginBusiness => "plugin-business",
        Saas => "saas",
        Consulting => "consulting",
        Nonprofit => "nonprofit",
    }
}

impl TemplateKind {
    pub fn label(&self) -> &'static str {
        match self {
            TemplateKind::Blank => "Blank Plan",
            TemplateKind::PluginBusiness => "Plugin Business",
            TemplateKind::Saas => "SaaS Business",
            TemplateKind::Consulting => "Consulting",
            TemplateKind::Nonprofit => "Non-profit",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            TemplateKind::Blank => "📄",
            TemplateKind::PluginBusiness => "🔌",
            TemplateKind::Saas => "☁️",
            TemplateKind::Consulting => "💼",
            TemplateKind::Nonprofit => "❤️",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            TemplateKind::Blank => "Start from scratch",
            TemplateKind::PluginBusiness => "WordPress/Obsidian plugins",
            TemplateKind::Saas => "Software as a Service",
            TemplateKind::Consulting => "Professional services",
            TemplateKind::Nonprofit => "Mission-driven organization",
        }
    }
}

kind_enum! {
    pub enum ProductCategory ("product category") {
        WordpressProduct => "wordpress-product" | "wordpress",
        ObsidianProduct => "obsidian-product" | "obsidian",
        Service => "service",
        #[default]
        Other => "other",
    }
}

impl ProductCategory {
    pub fn icon(&self) -> &'static str {
        match self {
            ProductCategory::WordpressProduct => "🔷",
            ProductCategory::ObsidianProduct => "💎",
            ProductCategory::Service => "🛠️",
            ProductCategory::Other => "📦",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ProductCategory::WordpressProduct => "WordPress Plugin",
            ProductCategory::ObsidianProduct => "Obsidian Plugin",
            ProductCategory::Service => "Service",
            ProductCategory::Other => "Other",
        }
    }
}

kind_enum! {
    /// Product lifecycle, ordered from first to last stage
    pub enum ProductStatus ("product status") {
        #[default]
        Idea => "idea",
        Development => "development",
        Beta => "beta",
        Launched => "launched",
        Retired => "retired",
    }
}

impl ProductStatus {
    /// Next stage in the lifecycle, `None` once retired
    pub fn next(&self) -> Option<ProductStatus> {
        match self {
            ProductStatus::Idea => Some(ProductStatus::Development),
            ProductStatus::Development => Some(ProductStatus::Beta),
            ProductStatus::Beta => Some(ProductStatus::Launched),
            ProductStatus::Launched => Some(ProductStatus::Retired),
            ProductStatus::Retired => None,
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            ProductStatus::Idea => "💡",
            ProductStatus::Development => "🔧",
            ProductStatus::Beta => "🧪",
            ProductStatus::Launched => "🚀",
            ProductStatus::Retired => "📁",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ProductStatus::Idea => "Idea",
            ProductStatus::Development => "Development",
            ProductStatus::Beta => "Beta",
            ProductStatus::Launched => "Launched",
            ProductStatus::Retired => "Retired",
        }
    }
}

kind_enum! {
    /// How a price recurs
    pub enum BillingCycle ("billing cycle") {
        #[default]
        OneTime => "one-time",
        Monthly => "monthly",
        Yearly => "yearly",
        Lifetime => "lifetime",
    }
}

impl BillingCycle {
    /// Compact suffix appended to a price ("/mo")
    pub fn short_suffix(&self) -> &'static str {
        match self {
            BillingCycle::OneTime => "",
            BillingCycle::Monthly => "/mo",
            BillingCycle::Yearly => "/yr",
            BillingCycle::Lifetime => " lifetime",
        }
    }

    /// Long-form suffix appended to a price ("/month")
    pub fn long_suffix(&self) -> &'static str {
        match self {
            BillingCycle::OneTime => "",
            BillingCycle::Monthly => "/month",
            BillingCycle::Yearly => "/year",
            BillingCycle::Lifetime => " (lifetime)",
        }
    }
}

kind_enum! {
    pub enum MilestoneCategory ("milestone category") {
        Product => "product",
        Revenue => "revenue",
        Customer => "customer",
        Marketing => "marketing",
        Operations => "operations",
        #[default]
        Other => "other",
    }
}

kind_enum! {
    pub enum MilestoneStatus ("milestone status") {
        #[default]
        Planned => "planned",
        InProgress => "in-progress",
        Completed => "completed",
        Delayed => "delayed",
    }
}

impl MilestoneStatus {
    pub fn icon(&self) -> &'static str {
        match self {
            MilestoneStatus::Planned => "📋",
            MilestoneStatus::InProgress => "🔄",
            MilestoneStatus::Completed => "✅",
            MilestoneStatus::Delayed => "⚠️",
        }
    }
}

kind_enum! {
    pub enum ChannelType ("marketing channel type") {
        Content => "content",
        Social => "social",
        Email => "email",
        Paid => "paid",
        Partnership => "partnership",
        Directory => "directory",
        #[default]
        Other => "other",
    }
}

kind_enum! {
    pub enum ChannelStatus ("marketing channel status") {
        #[default]
        Planned => "planned",
        Active => "active",
        Paused => "paused",
    }
}

kind_enum! {
    pub enum ProcessCategory ("process category") {
        #[default]
        Development => "development",
        Support => "support",
        Distribution => "distribution",
        Admin => "admin",
    }
}

kind_enum! {
    pub enum ProcessFrequency ("process frequency") {
        Daily => "daily",
        Weekly => "weekly",
        Monthly => "monthly",
        #[default]
        AsNeeded => "as-needed",
    }
}

kind_enum! {
    pub enum TechCategory ("tech stack category") {
        Ecommerce => "ecommerce",
        Licensing => "licensing",
        Hosting => "hosting",
        Analytics => "analytics",
        Support => "support",
        Development => "development",
        #[default]
        Other => "other",
    }
}

kind_enum! {
    /// Billing cycle of a tool in the tech stack
    pub enum TechBilling ("tech billing cycle") {
        #[default]
        Monthly => "monthly",
        Yearly => "yearly",
        OneTime => "one-time",
        Free => "free",
    }
}

kind_enum! {
    pub enum RevenueType ("revenue stream type") {
        #[default]
        ProductSales => "product-sales",
        Subscriptions => "subscriptions",
        Renewals => "renewals",
        Services => "services",
        Other => "other",
    }
}

kind_enum! {
    pub enum ExpenseCategory ("expense category") {
        Hosting => "hosting",
        Tools => "tools",
        Marketing => "marketing",
        PaymentFees => "payment-fees",
        Support => "support",
        Development => "development",
        Legal => "legal",
        #[default]
        Other => "other",
    }
}

kind_enum! {
    pub enum ExpenseFrequency ("expense frequency") {
        #[default]
        Monthly => "monthly",
        Yearly => "yearly",
        OneTime => "one-time",
    }
}

kind_enum! {
    pub enum LegalDocumentType ("legal document type") {
        License => "license",
        Eula => "eula",
        Privacy => "privacy",
        Terms => "terms",
        Refund => "refund",
        #[default]
        Other => "other",
    }
}

kind_enum! {
    pub enum LegalDocumentStatus ("legal document status") {
        #[default]
        Draft => "draft",
        Review => "review",
        Active => "active",
    }
}

kind_enum! {
    /// Format used by `export`
    pub enum ExportFormat ("export format") {
        #[default]
        Json => "json",
        Markdown => "markdown",
    }
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Json => "json",
            ExportFormat::Markdown => "md",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kebab_case_round_trip() {
        for cycle in BillingCycle::ALL {
            let json = serde_json::to_string(cycle).unwrap();
            assert_eq!(json, format!("\"{}\"", cycle.as_str()));
            let back: BillingCycle = serde_json::from_str(&json).unwrap();
            assert_eq!(&back, cycle);
        }
        assert_eq!(
            serde_json::to_string(&MilestoneStatus::InProgress).unwrap(),
            "\"in-progress\""
        );
        assert_eq!(
            serde_json::to_string(&ExpenseCategory::PaymentFees).unwrap(),
            "\"payment-fees\""
        );
    }

    #[test]
    fn test_unknown_variant_is_rejected() {
        let err = serde_json::from_str::<ProductStatus>("\"shipped\"");
        assert!(err.is_err());

        let err = "shipped".parse::<ProductStatus>().unwrap_err();
        assert!(matches!(err, PlanError::Configuration(_)));
        assert!(err.to_string().contains("idea, development"));
    }

    #[test]
    fn test_product_category_aliases() {
        let cat: ProductCategory = serde_json::from_str("\"wordpress\"").unwrap();
        assert_eq!(cat, ProductCategory::WordpressProduct);
        let cat: ProductCategory = "obsidian".parse().unwrap();
        assert_eq!(cat, ProductCategory::ObsidianProduct);
        assert_eq!(
            serde_json::to_string(&ProductCategory::WordpressProduct).unwrap(),
            "\"wordpress-product\""
        );
    }

    #[test]
    fn test_product_status_is_ordered() {
        assert!(ProductStatus::Idea < ProductStatus::Beta);
        assert!(ProductStatus::Launched < ProductStatus::Retired);
        assert_eq!(ProductStatus::Beta.next(), Some(ProductStatus::Launched));
        assert_eq!(ProductStatus::Retired.next(), None);
    }

    #[test]
    fn test_template_kind_parse() {
        assert_eq!(
            "Plugin-Business".parse::<TemplateKind>().unwrap(),
            TemplateKind::PluginBusiness
        );
        assert!("startup".parse::<TemplateKind>().is_err());
    }
}
