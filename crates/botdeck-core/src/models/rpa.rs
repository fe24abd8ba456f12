//! RPA bot records and execution metrics.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::view::{ViewField, ViewRecord};

/// Automation technology a bot is built on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BotTechnology {
    UiPath,
    AutomationAnywhere,
    BluePrism,
    MicrosoftPowerAutomate,
    PythonSelenium,
    Custom,
}

impl BotTechnology {
    pub fn as_str(self) -> &'static str {
        match self {
            BotTechnology::UiPath => "ui_path",
            BotTechnology::AutomationAnywhere => "automation_anywhere",
            BotTechnology::BluePrism => "blue_prism",
            BotTechnology::MicrosoftPowerAutomate => "microsoft_power_automate",
            BotTechnology::PythonSelenium => "python_selenium",
            BotTechnology::Custom => "custom",
        }
    }

    /// Short display label for table output.
    pub fn label(self) -> &'static str {
        match self {
            BotTechnology::UiPath => "UiPath",
            BotTechnology::AutomationAnywhere => "AA",
            BotTechnology::BluePrism => "Blue Prism",
            BotTechnology::MicrosoftPowerAutomate => "Power Automate",
            BotTechnology::PythonSelenium => "Python",
            BotTechnology::Custom => "Custom",
        }
    }
}

/// Lifecycle state of a bot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BotStatus {
    Idle,
    Running,
    Completed,
    Failed,
    Paused,
    Maintenance,
    Disabled,
}

impl BotStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            BotStatus::Idle => "idle",
            BotStatus::Running => "running",
            BotStatus::Completed => "completed",
            BotStatus::Failed => "failed",
            BotStatus::Paused => "paused",
            BotStatus::Maintenance => "maintenance",
            BotStatus::Disabled => "disabled",
        }
    }
}

/// Runtime configuration for a bot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BotConfiguration {
    /// Cron expression; absent for manually-triggered bots.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub execution_schedule: Option<String>,
    pub retry_attempts: u32,
    pub timeout_minutes: u32,
    pub max_memory_mb: u32,
}

/// Execution counters for a bot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BotMetrics {
    pub total_executions: u64,
    pub successful_executions: u64,
    pub failed_executions: u64,
    /// Average run duration in seconds.
    pub avg_execution_secs: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_execution_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_success_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_failure_at: Option<DateTime<Utc>>,
}

impl BotMetrics {
    /// Success rate as a rounded percentage; 0 when the bot has never run.
    pub fn success_rate(&self) -> u64 {
        if self.total_executions == 0 {
            return 0;
        }
        (self.successful_executions * 100 + self.total_executions / 2) / self.total_executions
    }
}

/// An RPA bot automating a business process.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RpaBot {
    pub id: String,
    pub name: String,
    pub code: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub technology: BotTechnology,
    pub status: BotStatus,
    pub process_id: String,
    pub configuration: BotConfiguration,
    pub metrics: BotMetrics,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ViewRecord for RpaBot {
    const SEARCH_FIELDS: &'static [&'static str] = &["name", "code", "description", "technology"];

    fn field(&self, name: &str) -> Option<ViewField> {
        match name {
            "name" => Some(ViewField::Text(self.name.clone())),
            "code" => Some(ViewField::Text(self.code.clone())),
            "description" => self.description.clone().map(ViewField::Text),
            "technology" => Some(ViewField::Text(self.technology.as_str().to_string())),
            "status" => Some(ViewField::Text(self.status.as_str().to_string())),
            "total_executions" => Some(ViewField::Number(self.metrics.total_executions as f64)),
            "success_rate" => Some(ViewField::Number(self.metrics.success_rate() as f64)),
            "avg_execution_secs" => Some(ViewField::Number(self.metrics.avg_execution_secs as f64)),
            "created_at" => Some(ViewField::Time(self.created_at)),
            "updated_at" => Some(ViewField::Time(self.updated_at)),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Test: success rate rounds to the nearest percent and guards zero runs.
    #[test]
    fn test_success_rate() {
        let mut metrics = BotMetrics {
            total_executions: 0,
            successful_executions: 0,
            failed_executions: 0,
            avg_execution_secs: 0,
            last_execution_at: None,
            last_success_at: None,
            last_failure_at: None,
        };
        assert_eq!(metrics.success_rate(), 0);

        metrics.total_executions = 1245;
        metrics.successful_executions = 1198;
        assert_eq!(metrics.success_rate(), 96);
    }
}
