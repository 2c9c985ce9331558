//! The plan repository
//!
//! `PlanStore` owns the persisted settings: the plan collection, the active
//! plan pointer and the user preferences. It is constructed once from the
//! persistence gateway and handed by reference to whatever needs it.
//!
//! Invariant: when `plans` is non-empty, `active_plan_id` names one of them;
//! when `plans` is empty, `active_plan_id` is empty.

use serde::{Deserialize, Serialize};

use crate::error::PlanError;
use crate::models::{ExportFormat, Plan, TemplateKind};
use crate::templates;

pub mod entities;
pub mod fields;
pub mod lists;

pub use entities::Entity;
pub use fields::ScalarField;
pub use lists::ListRef;

/// The blob handed to and read from the persistence gateway
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    pub plans: Vec<Plan>,
    pub active_plan_id: String,
    pub show_sidebar: bool,
    pub auto_save: bool,
    pub export_format: ExportFormat,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            plans: Vec::new(),
            active_plan_id: String::new(),
            show_sidebar: true,
            auto_save: true,
            export_format: ExportFormat::Json,
        }
    }
}

impl Settings {
    /// Repair the active pointer after loading.
    ///
    /// An empty or dangling pointer falls back to the first plan; with no
    /// plans the pointer is cleared.
    pub fn normalize(&mut self) {
        match self.plans.first() {
            None => self.active_plan_id.clear(),
            Some(first) => {
                let valid = self.plans.iter().any(|p| p.id == self.active_plan_id);
                if !valid {
                    if !self.active_plan_id.is_empty() {
                        tracing::warn!(
                            active = %self.active_plan_id,
                            "active plan not found, falling back to first plan"
                        );
                    }
                    self.active_plan_id = first.id.clone();
                }
            }
        }
    }
}

/// Editable plan header fields; `None` leaves a field unchanged
#[derive(Debug, Clone, Default)]
pub struct PlanDetails {
    pub name: Option<String>,
    pub description: Option<String>,
    pub icon: Option<String>,
    pub color: Option<String>,
}

/// In-memory collection of plans plus the active selection
#[derive(Debug, Clone, Default)]
pub struct PlanStore {
    settings: Settings,
}

impl PlanStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_settings(mut settings: Settings) -> Self {
        settings.normalize();
        Self { settings }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn into_settings(self) -> Settings {
        self.settings
    }

    pub fn plans(&self) -> &[Plan] {
        &self.settings.plans
    }

    pub fn active_plan_id(&self) -> &str {
        &self.settings.active_plan_id
    }

    pub fn is_empty(&self) -> bool {
        self.settings.plans.is_empty()
    }

    pub fn plan(&self, id: &str) -> Option<&Plan> {
        self.settings.plans.iter().find(|p| p.id == id)
    }

    pub fn plan_mut(&mut self, id: &str) -> Result<&mut Plan, PlanError> {
        self.settings
            .plans
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| PlanError::not_found("Plan", id))
    }

    pub fn active_plan(&self) -> Option<&Plan> {
        self.plan(&self.settings.active_plan_id)
    }

    pub fn active_plan_mut(&mut self) -> Option<&mut Plan> {
        let id = self.settings.active_plan_id.clone();
        self.settings.plans.iter_mut().find(|p| p.id == id)
    }

    /// Append a plan. Existing plans are untouched and the active pointer
    /// only moves if the store was empty.
    pub fn add_plan(&mut self, plan: Plan) {
        tracing::info!(plan = %plan.id, name = %plan.name, "plan added");
        self.settings.plans.push(plan);
        if self.settings.active_plan_id.is_empty() {
            self.settings.normalize();
        }
    }

    /// Build a plan from a template, append it and make it active
    pub fn create_plan(&mut self, name: &str, kind: TemplateKind) -> Result<String, PlanError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(PlanError::validation("Plan name", "must not be empty"));
        }
        let plan = templates::create_plan(name, kind);
        let id = plan.id.clone();
        self.add_plan(plan);
        self.set_active(&id)?;
        Ok(id)
    }

    pub fn set_active(&mut self, id: &str) -> Result<(), PlanError> {
        if self.plan(id).is_none() {
            return Err(PlanError::not_found("Plan", id));
        }
        self.settings.active_plan_id = id.to_string();
        tracing::debug!(plan = id, "active plan changed");
        Ok(())
    }

    /// Remove a plan and everything it owns, repairing the active pointer.
    ///
    /// Irreversible; confirming intent is the caller's job.
    pub fn delete_plan(&mut self, id: &str) -> Result<Plan, PlanError> {
        let index = self
            .settings
            .plans
            .iter()
            .position(|p| p.id == id)
            .ok_or_else(|| PlanError::not_found("Plan", id))?;
        let removed = self.settings.plans.remove(index);

        if self.settings.active_plan_id == id {
            self.settings.active_plan_id = self
                .settings
                .plans
                .first()
                .map(|p| p.id.clone())
                .unwrap_or_default();
        }
        tracing::info!(plan = id, name = %removed.name, "plan deleted");
        Ok(removed)
    }

    pub fn update_plan_details(&mut self, id: &str, details: PlanDetails) -> Result<(), PlanError> {
        if let Some(name) = &details.name {
            if name.trim().is_empty() {
                return Err(PlanError::validation("Plan name", "must not be empty"));
            }
        }
        let plan = self.plan_mut(id)?;
        if let Some(name) = details.name {
            plan.name = name.trim().to_string();
        }
        if let Some(description) = details.description {
            plan.description = description;
        }
        if let Some(icon) = details.icon {
            plan.icon = icon;
        }
        if let Some(color) = details.color {
            plan.color = color;
        }
        plan.touch();
        Ok(())
    }

    /// Delete every plan and clear the active pointer
    pub fn reset(&mut self) -> usize {
        let count = self.settings.plans.len();
        self.settings.plans.clear();
        self.settings.active_plan_id.clear();
        tracing::warn!(count, "all plans removed");
        count
    }

    pub fn set_show_sidebar(&mut self, value: bool) {
        self.settings.show_sidebar = value;
    }

    pub fn set_auto_save(&mut self, value: bool) {
        self.settings.auto_save = value;
    }

    pub fn set_export_format(&mut self, format: ExportFormat) {
        self.settings.export_format = format;
    }

    /// Replace the plan collection wholesale (used by import) and repair the
    /// active pointer
    pub(crate) fn replace_plans(&mut self, plans: Vec<Plan>) {
        self.settings.plans = plans;
        self.settings.normalize();
    }
}
