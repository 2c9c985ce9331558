//! CRUD over a plan's nested collections
//!
//! Every collection of identified records is addressed through the
//! [`Entity`] trait, so the add/update/delete contract is written once.

use crate::error::PlanError;
use crate::ids::generate_id;
use crate::models::{
    Bundle, Competitor, Expense, FinancialProjection, LegalDocument, MarketingChannel, Milestone,
    OperationalProcess, Plan, PricingTier, Product, RevenueStream, TechStackItem,
};

/// A record stored in one of a plan's identified collections
pub trait Entity: Clone {
    /// Human-readable kind used in errors and logs
    const KIND: &'static str;

    fn id(&self) -> &str;
    fn set_id(&mut self, id: String);
    fn collection(plan: &Plan) -> &Vec<Self>;
    fn collection_mut(plan: &mut Plan) -> &mut Vec<Self>;

    /// Money fields of the record, checked on every add and update
    fn amounts(&self) -> Vec<(&'static str, f64)> {
        Vec::new()
    }
}

macro_rules! impl_entity {
    ($ty:ty, $kind:literal, $($field:ident).+ $(, |$item:ident| $amounts:expr)?) => {
        impl Entity for $ty {
            const KIND: &'static str = $kind;

            fn id(&self) -> &str {
                &self.id
            }

            fn set_id(&mut self, id: String) {
                self.id = id;
            }

            fn collection(plan: &Plan) -> &Vec<Self> {
                &plan.$($field).+
            }

            fn collection_mut(plan: &mut Plan) -> &mut Vec<Self> {
                &mut plan.$($field).+
            }

            $(
                fn amounts(&self) -> Vec<(&'static str, f64)> {
                    let $item = self;
                    $amounts
                }
            )?
        }
    };
}

impl_entity!(Product, "Product", products, |p| {
    p.pricing_tiers.iter().map(|t| ("price", t.price)).collect()
});
impl_entity!(Bundle, "Bundle", bundles, |b| {
    vec![("discountPercent", b.discount_percent), ("price", b.price)]
});
impl_entity!(Competitor, "Competitor", market.competitors);
impl_entity!(MarketingChannel, "Marketing channel", marketing.channels, |c| {
    vec![("budget", c.budget)]
});
impl_entity!(OperationalProcess, "Process", operations.processes);
impl_entity!(TechStackItem, "Tech stack item", technology.stack, |t| vec![("cost", t.cost)]);
impl_entity!(RevenueStream, "Revenue stream", financial.revenue_streams, |r| {
    vec![("monthlyEstimate", r.monthly_estimate)]
});
impl_entity!(Expense, "Expense", financial.expenses, |e| vec![("amount", e.amount)]);
impl_entity!(LegalDocument, "Legal document", legal.documents);
impl_entity!(Milestone, "Milestone", roadmap.milestones);

/// Reject NaN, infinite and negative amounts. serde_json writes non-finite
/// floats as `null`, which the store cannot read back.
fn check_amount(kind: &str, field: &str, value: f64) -> Result<(), PlanError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(PlanError::validation(
            format!("{} {}", kind, field),
            format!("must be zero or more, got {}", value),
        ))
    }
}

fn check_amounts<T: Entity>(data: &T) -> Result<(), PlanError> {
    for (field, value) in data.amounts() {
        check_amount(T::KIND, field, value)?;
    }
    Ok(())
}

impl Plan {
    pub fn entity<T: Entity>(&self, id: &str) -> Option<&T> {
        T::collection(self).iter().find(|e| e.id() == id)
    }

    /// Append `data` under a fresh identifier and return that identifier.
    /// Any identifier already on `data` is replaced.
    pub fn add_entity<T: Entity>(&mut self, mut data: T) -> Result<String, PlanError> {
        check_amounts(&data)?;
        let id = generate_id();
        data.set_id(id.clone());
        T::collection_mut(self).push(data);
        self.touch();
        tracing::debug!(plan = %self.id, kind = T::KIND, id = %id, "entity added");
        Ok(id)
    }

    /// Replace the record `id` wholesale. The stored identifier is kept.
    pub fn update_entity<T: Entity>(&mut self, id: &str, mut data: T) -> Result<(), PlanError> {
        check_amounts(&data)?;
        let slot = T::collection_mut(self)
            .iter_mut()
            .find(|e| e.id() == id)
            .ok_or_else(|| PlanError::not_found(T::KIND, id))?;
        data.set_id(id.to_string());
        *slot = data;
        self.touch();
        tracing::debug!(plan = %self.id, kind = T::KIND, id, "entity updated");
        Ok(())
    }

    /// Remove the record `id`. Returns false, without error, if it was absent.
    pub fn delete_entity<T: Entity>(&mut self, id: &str) -> bool {
        let items = T::collection_mut(self);
        let before = items.len();
        items.retain(|e| e.id() != id);
        if items.len() == before {
            tracing::warn!(plan = %self.id, kind = T::KIND, id, "delete of absent entity ignored");
            return false;
        }
        self.touch();
        tracing::debug!(plan = %self.id, kind = T::KIND, id, "entity deleted");
        true
    }

    fn product_mut(&mut self, product_id: &str) -> Result<&mut Product, PlanError> {
        self.products
            .iter_mut()
            .find(|p| p.id == product_id)
            .ok_or_else(|| PlanError::not_found("Product", product_id))
    }

    /// Append a pricing tier to a product
    pub fn add_tier(
        &mut self,
        product_id: &str,
        mut tier: PricingTier,
    ) -> Result<String, PlanError> {
        check_amount("Pricing tier", "price", tier.price)?;
        let id = generate_id();
        tier.id = id.clone();
        self.product_mut(product_id)?.pricing_tiers.push(tier);
        self.touch();
        Ok(id)
    }

    pub fn update_tier(
        &mut self,
        product_id: &str,
        tier_id: &str,
        mut tier: PricingTier,
    ) -> Result<(), PlanError> {
        check_amount("Pricing tier", "price", tier.price)?;
        let product = self.product_mut(product_id)?;
        let slot = product
            .pricing_tiers
            .iter_mut()
            .find(|t| t.id == tier_id)
            .ok_or_else(|| PlanError::not_found("Pricing tier", tier_id))?;
        tier.id = tier_id.to_string();
        *slot = tier;
        self.touch();
        Ok(())
    }

    /// Remove a tier. Absent tiers are ignored; an absent product is an error.
    pub fn delete_tier(&mut self, product_id: &str, tier_id: &str) -> Result<bool, PlanError> {
        let product = self.product_mut(product_id)?;
        let before = product.pricing_tiers.len();
        product.pricing_tiers.retain(|t| t.id != tier_id);
        if product.pricing_tiers.len() == before {
            tracing::warn!(product = product_id, tier = tier_id, "delete of absent tier ignored");
            return Ok(false);
        }
        self.touch();
        Ok(true)
    }

    /// Insert or replace the projection for `projection.year`, leaving the
    /// rows sorted by year. Rows loaded out of order are sorted here too.
    pub fn upsert_projection(
        &mut self,
        projection: FinancialProjection,
    ) -> Result<(), PlanError> {
        check_amount("Projection", "revenue", projection.revenue)?;
        check_amount("Projection", "expenses", projection.expenses)?;
        if !projection.profit.is_finite() {
            return Err(PlanError::validation("Projection profit", "must be a finite number"));
        }

        let rows = &mut self.financial.projections;
        match rows.iter().position(|p| p.year == projection.year) {
            Some(index) => rows[index] = projection,
            None => rows.push(projection),
        }
        rows.sort_by_key(|p| p.year);
        self.touch();
        Ok(())
    }

    pub fn remove_projection(&mut self, year: i32) -> bool {
        let rows = &mut self.financial.projections;
        let before = rows.len();
        rows.retain(|p| p.year != year);
        if rows.len() == before {
            return false;
        }
        self.touch();
        true
    }

    /// Deep-copy a product under fresh identifiers and return the new id.
    ///
    /// The copy's name gains " (Copy)" and a non-empty SKU gains "-COPY".
    pub fn duplicate_product(&mut self, product_id: &str) -> Result<String, PlanError> {
        let mut copy = self
            .product(product_id)
            .cloned()
            .ok_or_else(|| PlanError::not_found("Product", product_id))?;

        copy.name = format!("{} (Copy)", copy.name);
        if !copy.sku.is_empty() {
            copy.sku = format!("{}-COPY", copy.sku);
        }
        for tier in &mut copy.pricing_tiers {
            tier.id = generate_id();
        }
        let id = self.add_entity(copy)?;
        tracing::info!(plan = %self.id, source = product_id, copy = %id, "product duplicated");
        Ok(id)
    }
}
