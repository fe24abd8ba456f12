//! List command handlers: bots, business units, processes.
//!
//! Each listing derives one page (search, filters, sort, paginate) and then
//! prints headline statistics computed over the whole collection, not the
//! filtered view.

use anyhow::{Context, Result};
use chrono::Utc;
use comfy_table::{ContentArrangement, Table};

use botdeck_core::config::Config;
use botdeck_core::directory::DirectoryClient;
use botdeck_core::models::{BusinessProcess, BusinessUnit, RpaBot};
use botdeck_core::stats::{FleetStats, ProcessStats, UnitStats};
use botdeck_core::view::{self, SortDirection, ViewCriteria, ViewPage, ViewRecord};
use botdeck_core::demo;

use crate::cli::format;

use super::auth;

/// Flags shared by every list command.
#[derive(clap::Args, Debug, Clone)]
pub struct ListArgs {
    /// Free-text search over names, codes and descriptions
    #[arg(long)]
    pub search: Option<String>,

    /// Field to sort by (e.g. name, status, success_rate)
    #[arg(long)]
    pub sort: Option<String>,

    /// Sort descending
    #[arg(long, requires = "sort")]
    pub desc: bool,

    /// Page to show (1-based)
    #[arg(long, default_value_t = 1)]
    pub page: usize,

    /// Rows per page (defaults to the configured page size)
    #[arg(long = "page-size")]
    pub page_size: Option<usize>,

    /// Use the built-in sample fleet instead of the remote API
    #[arg(long)]
    pub demo: bool,
}

impl ListArgs {
    fn criteria(&self, config: &Config) -> ViewCriteria {
        let mut criteria = ViewCriteria::new(self.page_size.unwrap_or(config.page_size))
            .with_page(self.page);
        if let Some(search) = &self.search {
            criteria = criteria.with_search(search.clone());
        }
        if let Some(field) = &self.sort {
            let direction = if self.desc {
                SortDirection::Desc
            } else {
                SortDirection::Asc
            };
            criteria = criteria.with_sort(field.clone(), direction);
        }
        criteria
    }
}

/// Bearer-authenticated client from the persisted session.
fn client(config: &Config) -> Result<DirectoryClient> {
    let session = auth::open_session(config)?;
    let token = session
        .token()
        .context("Not logged in. Run `botdeck login` first.")?;
    DirectoryClient::new(&config.api_base_url, token)
}

pub async fn bots(
    config: &Config,
    args: &ListArgs,
    status: Option<&str>,
    technology: Option<&str>,
) -> Result<()> {
    let bots: Vec<RpaBot> = if args.demo {
        demo::sample_bots()
    } else {
        client(config)?.bots().await?
    };

    let mut criteria = args.criteria(config);
    if let Some(status) = status {
        criteria = criteria.with_filter("status", status);
    }
    if let Some(technology) = technology {
        criteria = criteria.with_filter("technology", technology);
    }

    let page = view::select(&bots, &criteria);
    if page.items.is_empty() {
        println!("No bots found.");
    } else {
        let mut table = new_table(["Name", "Code", "Technology", "Status", "Runs", "Success", "Avg run"]);
        for bot in &page.items {
            table.add_row([
                bot.name.clone(),
                bot.code.clone(),
                bot.technology.label().to_string(),
                bot.status.as_str().to_string(),
                bot.metrics.total_executions.to_string(),
                format!("{}%", bot.metrics.success_rate()),
                format::duration(bot.metrics.avg_execution_secs),
            ]);
        }
        println!("{table}");
    }
    print_page_line(&page, bots.len(), "bots");

    let stats = FleetStats::collect(&bots, Utc::now());
    println!(
        "Running: {}  Idle: {}  Failed: {}  Ran today: {}",
        stats.running, stats.idle, stats.failed, stats.executions_today
    );
    Ok(())
}

pub async fn units(config: &Config, args: &ListArgs, status: Option<&str>) -> Result<()> {
    let units: Vec<BusinessUnit> = if args.demo {
        demo::sample_units()
    } else {
        client(config)?.business_units().await?
    };

    let mut criteria = args.criteria(config);
    if let Some(status) = status {
        criteria = criteria.with_filter("status", status);
    }

    let page = view::select(&units, &criteria);
    if page.items.is_empty() {
        println!("No business units found.");
    } else {
        let mut table = new_table(["Name", "Code", "Manager", "Status", "Processes", "Savings", "Efficiency"]);
        for unit in &page.items {
            let manager = unit
                .manager
                .as_ref()
                .map_or("-", |m| m.full_name.as_str());
            table.add_row([
                unit.name.clone(),
                unit.code.clone(),
                manager.to_string(),
                unit.status.as_str().to_string(),
                unit.metrics.total_processes.to_string(),
                format::money(unit.metrics.monthly_savings),
                format!("{}%", unit.metrics.efficiency),
            ]);
        }
        println!("{table}");
    }
    print_page_line(&page, units.len(), "units");

    let stats = UnitStats::collect(&units);
    println!(
        "Active: {}/{}  Processes: {}  Monthly savings: {}",
        stats.active,
        stats.total,
        stats.total_processes,
        format::money(stats.monthly_savings)
    );
    Ok(())
}

pub async fn processes(
    config: &Config,
    args: &ListArgs,
    status: Option<&str>,
    category: Option<&str>,
    priority: Option<&str>,
) -> Result<()> {
    let processes: Vec<BusinessProcess> = if args.demo {
        demo::sample_processes()
    } else {
        client(config)?.processes().await?
    };

    let mut criteria = args.criteria(config);
    if let Some(status) = status {
        criteria = criteria.with_filter("status", status);
    }
    if let Some(category) = category {
        criteria = criteria.with_filter("category", category);
    }
    if let Some(priority) = priority {
        criteria = criteria.with_filter("priority", priority);
    }

    let page = view::select(&processes, &criteria);
    if page.items.is_empty() {
        println!("No processes found.");
    } else {
        let mut table = new_table(["Name", "Code", "Category", "Priority", "Status", "Bots", "Success", "Savings"]);
        for process in &page.items {
            table.add_row([
                process.name.clone(),
                process.code.clone(),
                process.category.as_str().to_string(),
                process.priority.as_str().to_string(),
                process.status.as_str().to_string(),
                process.rpa_bot_ids.len().to_string(),
                format!("{}%", process.metrics.success_rate),
                format::money(process.metrics.cost_savings),
            ]);
        }
        println!("{table}");
    }
    print_page_line(&page, processes.len(), "processes");

    let stats = ProcessStats::collect(&processes);
    println!(
        "Active: {}/{}  Automated: {}  Avg efficiency: {}%",
        stats.active, stats.total, stats.automated, stats.avg_efficiency
    );
    Ok(())
}

fn new_table<const N: usize>(header: [&str; N]) -> Table {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(header);
    table
}

fn print_page_line<T: ViewRecord>(page: &ViewPage<'_, T>, source_len: usize, noun: &str) {
    println!(
        "Page {} of {} ({} matching, {} total {noun})",
        page.page,
        page.total_pages.max(1),
        page.filtered_count,
        source_len
    );
}
