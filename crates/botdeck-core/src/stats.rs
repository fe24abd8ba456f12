//! Aggregate statistics for the list screens.
//!
//! All aggregates are computed over the unfiltered source collection; they
//! describe the whole fleet, never the current page or filtered subset.

use chrono::{DateTime, Datelike, Utc};

use crate::models::{BotStatus, BusinessProcess, BusinessUnit, ProcessStatus, RpaBot, UnitStatus};

/// Headline numbers for the bot fleet screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FleetStats {
    pub running: usize,
    pub idle: usize,
    pub failed: usize,
    /// Bots whose most recent execution happened today (UTC).
    pub executions_today: usize,
}

impl FleetStats {
    pub fn collect(bots: &[RpaBot], now: DateTime<Utc>) -> Self {
        let same_day = |at: DateTime<Utc>| {
            at.year() == now.year() && at.ordinal() == now.ordinal()
        };
        Self {
            running: bots.iter().filter(|b| b.status == BotStatus::Running).count(),
            idle: bots.iter().filter(|b| b.status == BotStatus::Idle).count(),
            failed: bots.iter().filter(|b| b.status == BotStatus::Failed).count(),
            executions_today: bots
                .iter()
                .filter(|b| b.metrics.last_execution_at.is_some_and(same_day))
                .count(),
        }
    }
}

/// Headline numbers for the business unit screen.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UnitStats {
    pub total: usize,
    pub active: usize,
    pub total_processes: u64,
    pub monthly_savings: f64,
}

impl UnitStats {
    pub fn collect(units: &[BusinessUnit]) -> Self {
        Self {
            total: units.len(),
            active: units
                .iter()
                .filter(|u| u.status == UnitStatus::Active)
                .count(),
            total_processes: units.iter().map(|u| u.metrics.total_processes).sum(),
            monthly_savings: units.iter().map(|u| u.metrics.monthly_savings).sum(),
        }
    }
}

/// Headline numbers for the process screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProcessStats {
    pub total: usize,
    pub active: usize,
    /// Processes with at least one assigned bot.
    pub automated: usize,
    /// Rounded mean success rate over active processes; 0 when none are active.
    pub avg_efficiency: u64,
}

impl ProcessStats {
    pub fn collect(processes: &[BusinessProcess]) -> Self {
        let active: Vec<&BusinessProcess> = processes
            .iter()
            .filter(|p| p.status == ProcessStatus::Active)
            .collect();
        let avg_efficiency = if active.is_empty() {
            0
        } else {
            let sum: u64 = active.iter().map(|p| u64::from(p.metrics.success_rate)).sum();
            let count = active.len() as u64;
            (sum + count / 2) / count
        };
        Self {
            total: processes.len(),
            active: active.len(),
            automated: processes
                .iter()
                .filter(|p| !p.rpa_bot_ids.is_empty())
                .count(),
            avg_efficiency,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::demo;
    use crate::view::{self, SortDirection, ViewCriteria};

    /// Test: fleet counters over the sample fleet.
    #[test]
    fn test_fleet_stats() {
        let bots = demo::sample_bots();
        let stats = FleetStats::collect(&bots, Utc::now());

        assert_eq!(stats.running, 1);
        assert_eq!(stats.idle, 1);
        assert_eq!(stats.failed, 1);
        // Every sample bot last ran within the past few hours.
        assert!(stats.executions_today >= 3);
    }

    /// Test: unit aggregates are plain counts and sums.
    #[test]
    fn test_unit_stats() {
        let units = demo::sample_units();
        let stats = UnitStats::collect(&units);

        assert_eq!(stats.total, 4);
        assert_eq!(stats.active, 3);
        assert_eq!(stats.total_processes, 41);
        assert!((stats.monthly_savings - 39670.0).abs() < f64::EPSILON);
    }

    /// Test: process aggregates, including the active-only efficiency mean.
    #[test]
    fn test_process_stats() {
        let processes = demo::sample_processes();
        let stats = ProcessStats::collect(&processes);

        assert_eq!(stats.total, 6);
        assert_eq!(stats.active, 3);
        assert_eq!(stats.automated, 5);
        // round((98 + 92 + 95) / 3) = 95
        assert_eq!(stats.avg_efficiency, 95);
    }

    /// Test: statistics ignore the current view criteria entirely.
    #[test]
    fn test_stats_invariant_under_view_criteria() {
        let bots = demo::sample_bots();
        let before = FleetStats::collect(&bots, Utc::now());

        let criteria = ViewCriteria::new(2)
            .with_search("invoice")
            .with_filter("status", "running")
            .with_sort("name", SortDirection::Desc)
            .with_page(3);
        let _view = view::select(&bots, &criteria);

        let after = FleetStats::collect(&bots, Utc::now());
        assert_eq!(before.running, after.running);
        assert_eq!(before.idle, after.idle);
        assert_eq!(before.failed, after.failed);
    }
}
