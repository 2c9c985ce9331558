//! Single-field patches, the unit an editing surface commits after debouncing

use std::str::FromStr;

use crate::error::PlanError;
use crate::models::Plan;

/// A scalar text field of a plan, addressed by its dotted wire path
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScalarField {
    Name,
    Description,
    Icon,
    Color,
    BusinessName,
    Tagline,
    Mission,
    Vision,
    TargetMarket,
    UniqueValue,
    FoundedDate,
    Founder,
    MarketSize,
    GrowthRate,
    WebsiteUrl,
    PricingStrategy,
    DevelopmentProcess,
    ReleaseSchedule,
    DistributionMethod,
    LicensingSystem,
    StartupCosts,
    BreakEvenPoint,
    FundingNeeds,
    BusinessStructure,
    LicensingModel,
    LongTermVision,
}

impl ScalarField {
    pub const ALL: [ScalarField; 26] = [
        ScalarField::Name,
        ScalarField::Description,
        ScalarField::Icon,
        ScalarField::Color,
        ScalarField::BusinessName,
        ScalarField::Tagline,
        ScalarField::Mission,
        ScalarField::Vision,
        ScalarField::TargetMarket,
        ScalarField::UniqueValue,
        ScalarField::FoundedDate,
        ScalarField::Founder,
        ScalarField::MarketSize,
        ScalarField::GrowthRate,
        ScalarField::WebsiteUrl,
        ScalarField::PricingStrategy,
        ScalarField::DevelopmentProcess,
        ScalarField::ReleaseSchedule,
        ScalarField::DistributionMethod,
        ScalarField::LicensingSystem,
        ScalarField::StartupCosts,
        ScalarField::BreakEvenPoint,
        ScalarField::FundingNeeds,
        ScalarField::BusinessStructure,
        ScalarField::LicensingModel,
        ScalarField::LongTermVision,
    ];

    pub fn path(&self) -> &'static str {
        match self {
            ScalarField::Name => "name",
            ScalarField::Description => "description",
            ScalarField::Icon => "icon",
            ScalarField::Color => "color",
            ScalarField::BusinessName => "executive.businessName",
            ScalarField::Tagline => "executive.tagline",
            ScalarField::Mission => "executive.mission",
            ScalarField::Vision => "executive.vision",
            ScalarField::TargetMarket => "executive.targetMarket",
            ScalarField::UniqueValue => "executive.uniqueValue",
            ScalarField::FoundedDate => "executive.foundedDate",
            ScalarField::Founder => "executive.founder",
            ScalarField::MarketSize => "market.marketSize",
            ScalarField::GrowthRate => "market.growthRate",
            ScalarField::WebsiteUrl => "marketing.websiteUrl",
            ScalarField::PricingStrategy => "marketing.pricingStrategy",
            ScalarField::DevelopmentProcess => "operations.developmentProcess",
            ScalarField::ReleaseSchedule => "operations.releaseSchedule",
            ScalarField::DistributionMethod => "operations.distributionMethod",
            ScalarField::LicensingSystem => "technology.licensingSystem",
            ScalarField::StartupCosts => "financial.startupCosts",
            ScalarField::BreakEvenPoint => "financial.breakEvenPoint",
            ScalarField::FundingNeeds => "financial.fundingNeeds",
            ScalarField::BusinessStructure => "legal.businessStructure",
            ScalarField::LicensingModel => "legal.licensingModel",
            ScalarField::LongTermVision => "roadmap.longTermVision",
        }
    }

    fn text_mut<'a>(&self, plan: &'a mut Plan) -> Option<&'a mut String> {
        let field = match self {
            ScalarField::Name => &mut plan.name,
            ScalarField::Description => &mut plan.description,
            ScalarField::Icon => &mut plan.icon,
            ScalarField::Color => &mut plan.color,
            ScalarField::BusinessName => &mut plan.executive.business_name,
            ScalarField::Tagline => &mut plan.executive.tagline,
            ScalarField::Mission => &mut plan.executive.mission,
            ScalarField::Vision => &mut plan.executive.vision,
            ScalarField::TargetMarket => &mut plan.executive.target_market,
            ScalarField::UniqueValue => &mut plan.executive.unique_value,
            ScalarField::FoundedDate => &mut plan.executive.founded_date,
            ScalarField::Founder => &mut plan.executive.founder,
            ScalarField::MarketSize => &mut plan.market.market_size,
            ScalarField::GrowthRate => &mut plan.market.growth_rate,
            ScalarField::WebsiteUrl => &mut plan.marketing.website_url,
            ScalarField::PricingStrategy => &mut plan.marketing.pricing_strategy,
            ScalarField::DevelopmentProcess => &mut plan.operations.development_process,
            ScalarField::ReleaseSchedule => &mut plan.operations.release_schedule,
            ScalarField::DistributionMethod => &mut plan.operations.distribution_method,
            ScalarField::LicensingSystem => &mut plan.technology.licensing_system,
            ScalarField::StartupCosts => return None,
            ScalarField::BreakEvenPoint => &mut plan.financial.break_even_point,
            ScalarField::FundingNeeds => &mut plan.financial.funding_needs,
            ScalarField::BusinessStructure => &mut plan.legal.business_structure,
            ScalarField::LicensingModel => &mut plan.legal.licensing_model,
            ScalarField::LongTermVision => &mut plan.roadmap.long_term_vision,
        };
        Some(field)
    }
}

impl std::fmt::Display for ScalarField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.path())
    }
}

impl FromStr for ScalarField {
    type Err = PlanError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        ScalarField::ALL
            .iter()
            .copied()
            .find(|f| {
                let path = f.path();
                path.eq_ignore_ascii_case(wanted)
                    || path
                        .rsplit('.')
                        .next()
                        .is_some_and(|leaf| leaf.eq_ignore_ascii_case(wanted))
            })
            .ok_or_else(|| PlanError::Configuration(format!("Unknown plan field: {}", s)))
    }
}

impl Plan {
    /// Overwrite one scalar field and refresh `last_updated`.
    ///
    /// The plan name may not be blank; `financial.startupCosts` must parse as
    /// a non-negative number.
    pub fn apply_field(&mut self, field: ScalarField, value: &str) -> Result<(), PlanError> {
        match field {
            ScalarField::Name if value.trim().is_empty() => {
                return Err(PlanError::validation("Plan name", "must not be empty"));
            }
            ScalarField::StartupCosts => {
                let amount: f64 = value.trim().parse().map_err(|_| {
                    PlanError::validation(field.path(), format!("is not a number: {}", value))
                })?;
                if !amount.is_finite() || amount < 0.0 {
                    return Err(PlanError::validation(field.path(), "must be zero or more"));
                }
                self.financial.startup_costs = amount;
            }
            _ => {
                let value = if field == ScalarField::Name {
                    value.trim()
                } else {
                    value
                };
                if let Some(slot) = field.text_mut(self) {
                    *slot = value.to_string();
                }
            }
        }
        self.touch();
        tracing::debug!(plan = %self.id, field = field.path(), "field applied");
        Ok(())
    }
}
