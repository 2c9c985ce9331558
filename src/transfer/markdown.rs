//! Markdown rendering of plans for the `markdown` export format

use std::fmt::Write;

use crate::display::{format_currency, format_date, format_tier_price, format_timestamp};
use crate::metrics::{self, PlanOverview};
use crate::models::{FunnelStage, Plan};

/// Renders plans as Markdown documents
#[derive(Debug, Clone, Default)]
pub struct MarkdownRenderer {
    /// Emit section headings even when a section has no content
    pub include_empty_sections: bool,
}

fn bullets(out: &mut String, items: &[String]) {
    for item in items {
        let _ = writeln!(out, "- {}", item);
    }
}

fn field(out: &mut String, label: &str, value: &str) {
    if !value.trim().is_empty() {
        let _ = writeln!(out, "**{}:** {}  ", label, value);
    }
}

impl MarkdownRenderer {
    pub fn render_all(&self, plans: &[Plan]) -> String {
        plans
            .iter()
            .map(|p| self.render_plan(p))
            .collect::<Vec<_>>()
            .join("\n---\n\n")
    }

    pub fn render_plan(&self, plan: &Plan) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "# {} {}\n", plan.icon, plan.name);
        if !plan.description.is_empty() {
            let _ = writeln!(out, "{}\n", plan.description);
        }
        let _ = writeln!(
            out,
            "_Last updated: {}_\n",
            format_timestamp(&plan.last_updated)
        );

        self.overview(&mut out, plan);
        self.executive(&mut out, plan);
        self.products(&mut out, plan);
        self.market(&mut out, plan);
        self.marketing(&mut out, plan);
        self.financial(&mut out, plan);
        self.legal(&mut out, plan);
        self.roadmap(&mut out, plan);
        out
    }

    fn section(&self, out: &mut String, title: &str, has_content: bool) -> bool {
        if has_content || self.include_empty_sections {
            let _ = writeln!(out, "## {}\n", title);
            true
        } else {
            false
        }
    }

    fn overview(&self, out: &mut String, plan: &Plan) {
        let o = PlanOverview::compute(plan);
        let _ = writeln!(out, "## Overview\n");
        let _ = writeln!(out, "| Metric | Value |");
        let _ = writeln!(out, "| --- | --- |");
        let _ = writeln!(out, "| Products | {} ({} launched) |", o.product_count, o.launched_count);
        let _ = writeln!(out, "| Monthly revenue | {} |", format_currency(o.monthly_revenue));
        let _ = writeln!(out, "| Monthly expenses | {} |", format_currency(o.monthly_expenses));
        let _ = writeln!(
            out,
            "| Milestones | {}/{} completed |",
            o.milestones_completed, o.milestones_total
        );
        let _ = writeln!(out, "| Executive summary | {}% complete |\n", o.completion);
    }

    fn executive(&self, out: &mut String, plan: &Plan) {
        let e = &plan.executive;
        if !self.section(out, "Executive Summary", metrics::completion_score(e) > 0) {
            return;
        }
        field(out, "Business", &e.business_name);
        field(out, "Tagline", &e.tagline);
        field(out, "Founder", &e.founder);
        field(out, "Founded", &format_date(&e.founded_date));
        field(out, "Mission", &e.mission);
        field(out, "Vision", &e.vision);
        field(out, "Target market", &e.target_market);
        field(out, "Unique value", &e.unique_value);
        if !e.core_values.is_empty() {
            let _ = writeln!(out, "\n### Core Values\n");
            bullets(out, &e.core_values);
        }
        out.push('\n');
    }

    fn products(&self, out: &mut String, plan: &Plan) {
        if !self.section(out, "Products", !plan.products.is_empty()) {
            return;
        }
        for product in &plan.products {
            let _ = writeln!(
                out,
                "### {} {}\n",
                product.category.icon(),
                product.name
            );
            let _ = writeln!(
                out,
                "{} {} · {}\n",
                product.status.icon(),
                product.status.label(),
                product.category.label()
            );
            if !product.description.is_empty() {
                let _ = writeln!(out, "{}\n", product.description);
            }
            for tier in &product.pricing_tiers {
                let popular = if tier.is_popular { " ⭐" } else { "" };
                let price = format_tier_price(tier);
                let _ = writeln!(out, "- **{}**: {}{}", tier.name, price, popular);
            }
            if !product.features.is_empty() {
                let _ = writeln!(out, "\nFeatures:\n");
                bullets(out, &product.features);
            }
            out.push('\n');
        }
    }

    fn market(&self, out: &mut String, plan: &Plan) {
        let m = &plan.market;
        let has = !m.market_size.is_empty()
            || !m.target_segments.is_empty()
            || !m.competitors.is_empty()
            || !m.differentiators.is_empty();
        if !self.section(out, "Market Analysis", has) {
            return;
        }
        field(out, "Market size", &m.market_size);
        field(out, "Growth rate", &m.growth_rate);
        for (title, items) in [
            ("Trends", &m.trends),
            ("Target Segments", &m.target_segments),
            ("Differentiators", &m.differentiators),
            ("Opportunities", &m.opportunities),
            ("Threats", &m.threats),
        ] {
            if !items.is_empty() {
                let _ = writeln!(out, "\n### {}\n", title);
                bullets(out, items);
            }
        }
        if !m.competitors.is_empty() {
            let _ = writeln!(out, "\n### Competitors\n");
            for c in &m.competitors {
                let _ = writeln!(out, "- **{}** {}", c.name, c.website);
            }
        }
        out.push('\n');
    }

    fn marketing(&self, out: &mut String, plan: &Plan) {
        let m = &plan.marketing;
        let funnel_empty = FunnelStage::ALL.iter().all(|s| m.funnel.stage(*s).is_empty());
        if !self.section(out, "Marketing & Sales", !funnel_empty || !m.channels.is_empty()) {
            return;
        }
        field(out, "Website", &m.website_url);
        field(out, "Pricing strategy", &m.pricing_strategy);
        for stage in FunnelStage::ALL {
            let tactics = m.funnel.stage(stage);
            if !tactics.is_empty() {
                let _ = writeln!(out, "\n### {}\n", stage.label());
                bullets(out, tactics);
            }
        }
        if !m.channels.is_empty() {
            let _ = writeln!(out, "\n### Channels\n");
            for c in &m.channels {
                let _ = writeln!(out, "- **{}** ({}, {})", c.name, c.channel_type, c.status);
            }
        }
        out.push('\n');
    }

    fn financial(&self, out: &mut String, plan: &Plan) {
        let f = &plan.financial;
        let has = !f.revenue_streams.is_empty()
            || !f.expenses.is_empty()
            || !f.projections.is_empty();
        if !self.section(out, "Financial Plan", has) {
            return;
        }
        for s in &f.revenue_streams {
            let _ = writeln!(
                out,
                "- Revenue: **{}** {}/month",
                s.name,
                format_currency(s.monthly_estimate)
            );
        }
        for e in &f.expenses {
            let _ = writeln!(
                out,
                "- Expense: **{}** {} ({})",
                e.name,
                format_currency(e.amount),
                e.frequency
            );
        }
        if !f.projections.is_empty() {
            let _ = writeln!(out, "\n| Year | Revenue | Expenses | Profit | Customers |");
            let _ = writeln!(out, "| --- | --- | --- | --- | --- |");
            for p in &f.projections {
                let _ = writeln!(
                    out,
                    "| {} | {} | {} | {} | {} |",
                    p.year,
                    format_currency(p.revenue),
                    format_currency(p.expenses),
                    format_currency(p.profit),
                    p.customers
                );
            }
        }
        out.push('\n');
    }

    fn legal(&self, out: &mut String, plan: &Plan) {
        let l = &plan.legal;
        let has = !l.business_structure.is_empty() || !l.documents.is_empty();
        if !self.section(out, "Legal & Compliance", has) {
            return;
        }
        field(out, "Structure", &l.business_structure);
        field(out, "Licensing", &l.licensing_model);
        for d in &l.documents {
            let _ = writeln!(out, "- {} ({}, {})", d.name, d.document_type, d.status);
        }
        bullets(out, &l.compliance_notes);
        out.push('\n');
    }

    fn roadmap(&self, out: &mut String, plan: &Plan) {
        let r = &plan.roadmap;
        let has = !r.milestones.is_empty() || !r.quarterly_goals.is_empty();
        if !self.section(out, "Roadmap", has) {
            return;
        }
        for m in &r.milestones {
            let date = format_date(&m.target_date);
            let _ = writeln!(out, "- {} **{}** {}", m.status.icon(), m.title, date);
        }
        for (quarter, goals) in &r.quarterly_goals {
            let _ = writeln!(out, "\n### {}\n", quarter);
            bullets(out, goals);
        }
        field(out, "Long-term vision", &r.long_term_vision);
        out.push('\n');
    }
}
