//! Business units and the processes they own.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::view::{ViewField, ViewRecord};

/// Lifecycle state of a business unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnitStatus {
    Active,
    Inactive,
    Archived,
}

impl UnitStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            UnitStatus::Active => "active",
            UnitStatus::Inactive => "inactive",
            UnitStatus::Archived => "archived",
        }
    }
}

/// Populated manager reference on a business unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ManagerRef {
    pub id: String,
    pub full_name: String,
    pub email: String,
}

/// Performance metrics of a business unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnitMetrics {
    pub total_processes: u64,
    pub active_automations: u64,
    pub monthly_savings: f64,
    /// 0-100.
    pub efficiency: u8,
}

/// A business unit within the organization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BusinessUnit {
    pub id: String,
    pub name: String,
    pub code: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub status: UnitStatus,
    pub manager_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub manager: Option<ManagerRef>,
    #[serde(default)]
    pub process_ids: Vec<String>,
    pub metrics: UnitMetrics,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ViewRecord for BusinessUnit {
    // "manager" is the populated manager's full name, one level of nested text.
    const SEARCH_FIELDS: &'static [&'static str] = &["name", "code", "description", "manager"];

    fn field(&self, name: &str) -> Option<ViewField> {
        match name {
            "name" => Some(ViewField::Text(self.name.clone())),
            "code" => Some(ViewField::Text(self.code.clone())),
            "description" => self.description.clone().map(ViewField::Text),
            "manager" => self
                .manager
                .as_ref()
                .map(|m| ViewField::Text(m.full_name.clone())),
            "status" => Some(ViewField::Text(self.status.as_str().to_string())),
            "efficiency" => Some(ViewField::Number(f64::from(self.metrics.efficiency))),
            "monthly_savings" => Some(ViewField::Number(self.metrics.monthly_savings)),
            "total_processes" => Some(ViewField::Number(self.metrics.total_processes as f64)),
            "created_at" => Some(ViewField::Time(self.created_at)),
            "updated_at" => Some(ViewField::Time(self.updated_at)),
            _ => None,
        }
    }
}

/// Functional category of a process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProcessCategory {
    Finance,
    Hr,
    Operations,
    CustomerService,
    It,
    Compliance,
    Other,
}

impl ProcessCategory {
    pub fn as_str(self) -> &'static str {
        match self {
            ProcessCategory::Finance => "finance",
            ProcessCategory::Hr => "hr",
            ProcessCategory::Operations => "operations",
            ProcessCategory::CustomerService => "customer_service",
            ProcessCategory::It => "it",
            ProcessCategory::Compliance => "compliance",
            ProcessCategory::Other => "other",
        }
    }
}

/// Priority of a process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProcessPriority {
    Critical,
    High,
    Medium,
    Low,
}

impl ProcessPriority {
    pub fn as_str(self) -> &'static str {
        match self {
            ProcessPriority::Critical => "critical",
            ProcessPriority::High => "high",
            ProcessPriority::Medium => "medium",
            ProcessPriority::Low => "low",
        }
    }
}

/// Lifecycle state of a process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProcessStatus {
    Active,
    Inactive,
    Testing,
    Maintenance,
    Deprecated,
}

impl ProcessStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            ProcessStatus::Active => "active",
            ProcessStatus::Inactive => "inactive",
            ProcessStatus::Testing => "testing",
            ProcessStatus::Maintenance => "maintenance",
            ProcessStatus::Deprecated => "deprecated",
        }
    }
}

/// Process-level metrics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessMetrics {
    /// Average run duration in minutes.
    pub avg_execution_mins: u64,
    /// 0-100.
    pub success_rate: u8,
    pub monthly_executions: u64,
    /// 0-100.
    pub error_rate: u8,
    /// Monthly cost savings.
    pub cost_savings: f64,
}

/// A business process, possibly automated by one or more bots.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BusinessProcess {
    pub id: String,
    pub name: String,
    pub code: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub business_unit_id: String,
    pub category: ProcessCategory,
    pub priority: ProcessPriority,
    pub status: ProcessStatus,
    #[serde(default)]
    pub rpa_bot_ids: Vec<String>,
    pub metrics: ProcessMetrics,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ViewRecord for BusinessProcess {
    const SEARCH_FIELDS: &'static [&'static str] = &["name", "code", "description", "category"];

    fn field(&self, name: &str) -> Option<ViewField> {
        match name {
            "name" => Some(ViewField::Text(self.name.clone())),
            "code" => Some(ViewField::Text(self.code.clone())),
            "description" => self.description.clone().map(ViewField::Text),
            "category" => Some(ViewField::Text(self.category.as_str().to_string())),
            "priority" => Some(ViewField::Text(self.priority.as_str().to_string())),
            "status" => Some(ViewField::Text(self.status.as_str().to_string())),
            "automated" => Some(ViewField::Flag(!self.rpa_bot_ids.is_empty())),
            "success_rate" => Some(ViewField::Number(f64::from(self.metrics.success_rate))),
            "monthly_executions" => Some(ViewField::Number(self.metrics.monthly_executions as f64)),
            "cost_savings" => Some(ViewField::Number(self.metrics.cost_savings)),
            "created_at" => Some(ViewField::Time(self.created_at)),
            "updated_at" => Some(ViewField::Time(self.updated_at)),
            _ => None,
        }
    }
}
