//! Built-in sample fleet for offline use.
//!
//! Lets the list screens run without a backend (`--demo` in the CLI) and
//! gives the view tests a stable, realistic collection.

use chrono::{DateTime, Duration, TimeZone, Utc};

use crate::models::{
    BotConfiguration, BotMetrics, BotStatus, BotTechnology, BusinessProcess, BusinessUnit,
    ManagerRef, ProcessCategory, ProcessMetrics, ProcessPriority, ProcessStatus, RpaBot,
    UnitMetrics, UnitStatus,
};

fn date(year: i32, month: u32, day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, 0, 0, 0)
        .single()
        .expect("valid fixture date")
}

/// Five sample bots across the supported technologies and states.
pub fn sample_bots() -> Vec<RpaBot> {
    let now = Utc::now();
    vec![
        RpaBot {
            id: "bot_001".to_string(),
            name: "Invoice Processor".to_string(),
            code: "INV_PROC_001".to_string(),
            description: Some("Automates invoice processing and data extraction".to_string()),
            technology: BotTechnology::UiPath,
            status: BotStatus::Running,
            process_id: "proc_001".to_string(),
            configuration: BotConfiguration {
                execution_schedule: Some("0 6 * * 1-5".to_string()),
                retry_attempts: 3,
                timeout_minutes: 30,
                max_memory_mb: 512,
            },
            metrics: BotMetrics {
                total_executions: 1245,
                successful_executions: 1198,
                failed_executions: 47,
                avg_execution_secs: 145,
                last_execution_at: Some(now - Duration::minutes(15)),
                last_success_at: Some(now - Duration::minutes(15)),
                last_failure_at: None,
            },
            created_at: date(2024, 1, 10),
            updated_at: date(2024, 1, 20),
        },
        RpaBot {
            id: "bot_002".to_string(),
            name: "Data Sync Master".to_string(),
            code: "DATA_SYNC_002".to_string(),
            description: Some("Synchronizes data between multiple systems".to_string()),
            technology: BotTechnology::PythonSelenium,
            status: BotStatus::Idle,
            process_id: "proc_002".to_string(),
            configuration: BotConfiguration {
                execution_schedule: None,
                retry_attempts: 2,
                timeout_minutes: 45,
                max_memory_mb: 256,
            },
            metrics: BotMetrics {
                total_executions: 892,
                successful_executions: 845,
                failed_executions: 47,
                avg_execution_secs: 89,
                last_execution_at: Some(now - Duration::hours(2)),
                last_success_at: Some(now - Duration::hours(2)),
                last_failure_at: None,
            },
            created_at: date(2024, 1, 8),
            updated_at: date(2024, 1, 19),
        },
        RpaBot {
            id: "bot_003".to_string(),
            name: "Email Handler Pro".to_string(),
            code: "EMAIL_PROC_003".to_string(),
            description: Some("Processes incoming emails and extracts attachments".to_string()),
            technology: BotTechnology::AutomationAnywhere,
            status: BotStatus::Failed,
            process_id: "proc_003".to_string(),
            configuration: BotConfiguration {
                execution_schedule: None,
                retry_attempts: 5,
                timeout_minutes: 20,
                max_memory_mb: 384,
            },
            metrics: BotMetrics {
                total_executions: 2341,
                successful_executions: 2187,
                failed_executions: 154,
                avg_execution_secs: 67,
                last_execution_at: Some(now - Duration::minutes(30)),
                last_success_at: None,
                last_failure_at: Some(now - Duration::minutes(30)),
            },
            created_at: date(2024, 1, 12),
            updated_at: date(2024, 1, 18),
        },
        RpaBot {
            id: "bot_004".to_string(),
            name: "Report Generator".to_string(),
            code: "REPORT_GEN_004".to_string(),
            description: Some("Generates automated reports from database data".to_string()),
            technology: BotTechnology::MicrosoftPowerAutomate,
            status: BotStatus::Paused,
            process_id: "proc_004".to_string(),
            configuration: BotConfiguration {
                execution_schedule: Some("0 8 * * 1-5".to_string()),
                retry_attempts: 2,
                timeout_minutes: 60,
                max_memory_mb: 1024,
            },
            metrics: BotMetrics {
                total_executions: 456,
                successful_executions: 445,
                failed_executions: 11,
                avg_execution_secs: 234,
                last_execution_at: Some(now - Duration::hours(4)),
                last_success_at: Some(now - Duration::hours(4)),
                last_failure_at: None,
            },
            created_at: date(2024, 1, 5),
            updated_at: date(2024, 1, 17),
        },
        RpaBot {
            id: "bot_005".to_string(),
            name: "Customer Data Validator".to_string(),
            code: "CUST_VALID_005".to_string(),
            description: Some(
                "Validates and cleans customer data from various sources".to_string(),
            ),
            technology: BotTechnology::BluePrism,
            status: BotStatus::Completed,
            process_id: "proc_005".to_string(),
            configuration: BotConfiguration {
                execution_schedule: None,
                retry_attempts: 1,
                timeout_minutes: 90,
                max_memory_mb: 768,
            },
            metrics: BotMetrics {
                total_executions: 78,
                successful_executions: 78,
                failed_executions: 0,
                avg_execution_secs: 456,
                last_execution_at: Some(now - Duration::minutes(10)),
                last_success_at: Some(now - Duration::minutes(10)),
                last_failure_at: None,
            },
            created_at: date(2024, 1, 15),
            updated_at: date(2024, 1, 20),
        },
    ]
}

/// Four sample business units with populated managers.
pub fn sample_units() -> Vec<BusinessUnit> {
    vec![
        BusinessUnit {
            id: "bu_001".to_string(),
            name: "Finance Department".to_string(),
            code: "FIN".to_string(),
            description: Some(
                "Handles all financial operations, accounting, and budgeting".to_string(),
            ),
            status: UnitStatus::Active,
            manager_id: "user_001".to_string(),
            manager: Some(ManagerRef {
                id: "user_001".to_string(),
                full_name: "John Smith".to_string(),
                email: "john.smith@company.com".to_string(),
            }),
            process_ids: vec![
                "proc_001".to_string(),
                "proc_002".to_string(),
                "proc_003".to_string(),
            ],
            metrics: UnitMetrics {
                total_processes: 12,
                active_automations: 8,
                monthly_savings: 15420.0,
                efficiency: 87,
            },
            created_at: date(2024, 1, 15),
            updated_at: date(2024, 1, 20),
        },
        BusinessUnit {
            id: "bu_002".to_string(),
            name: "Human Resources".to_string(),
            code: "HR".to_string(),
            description: Some("Employee management, recruitment, and HR operations".to_string()),
            status: UnitStatus::Active,
            manager_id: "user_002".to_string(),
            manager: Some(ManagerRef {
                id: "user_002".to_string(),
                full_name: "Sarah Johnson".to_string(),
                email: "sarah.j@company.com".to_string(),
            }),
            process_ids: vec!["proc_004".to_string(), "proc_005".to_string()],
            metrics: UnitMetrics {
                total_processes: 8,
                active_automations: 5,
                monthly_savings: 8750.0,
                efficiency: 92,
            },
            created_at: date(2024, 1, 10),
            updated_at: date(2024, 1, 18),
        },
        BusinessUnit {
            id: "bu_003".to_string(),
            name: "Customer Service".to_string(),
            code: "CS".to_string(),
            description: Some(
                "Customer support, ticket management, and service operations".to_string(),
            ),
            status: UnitStatus::Active,
            manager_id: "user_003".to_string(),
            manager: Some(ManagerRef {
                id: "user_003".to_string(),
                full_name: "Mike Chen".to_string(),
                email: "mike.chen@company.com".to_string(),
            }),
            process_ids: vec![
                "proc_006".to_string(),
                "proc_007".to_string(),
                "proc_008".to_string(),
            ],
            metrics: UnitMetrics {
                total_processes: 15,
                active_automations: 10,
                monthly_savings: 12300.0,
                efficiency: 78,
            },
            created_at: date(2024, 1, 5),
            updated_at: date(2024, 1, 22),
        },
        BusinessUnit {
            id: "bu_004".to_string(),
            name: "Operations".to_string(),
            code: "OPS".to_string(),
            description: Some("Supply chain, logistics, and operational processes".to_string()),
            status: UnitStatus::Inactive,
            manager_id: "user_004".to_string(),
            manager: Some(ManagerRef {
                id: "user_004".to_string(),
                full_name: "Lisa Wong".to_string(),
                email: "lisa.wong@company.com".to_string(),
            }),
            process_ids: vec!["proc_009".to_string()],
            metrics: UnitMetrics {
                total_processes: 6,
                active_automations: 2,
                monthly_savings: 3200.0,
                efficiency: 45,
            },
            created_at: date(2023, 12, 20),
            updated_at: date(2024, 1, 15),
        },
    ]
}

/// Six sample processes across categories, priorities and states.
pub fn sample_processes() -> Vec<BusinessProcess> {
    vec![
        BusinessProcess {
            id: "1".to_string(),
            name: "Invoice Processing".to_string(),
            code: "INV-001".to_string(),
            description: Some("Automated invoice validation and payment processing".to_string()),
            business_unit_id: "bu_001".to_string(),
            category: ProcessCategory::Finance,
            priority: ProcessPriority::High,
            status: ProcessStatus::Active,
            rpa_bot_ids: vec!["bot_001".to_string(), "bot_002".to_string()],
            metrics: ProcessMetrics {
                avg_execution_mins: 15,
                success_rate: 98,
                monthly_executions: 150,
                error_rate: 2,
                cost_savings: 5000.0,
            },
            created_at: date(2024, 1, 15),
            updated_at: date(2024, 1, 20),
        },
        BusinessProcess {
            id: "2".to_string(),
            name: "Employee Onboarding".to_string(),
            code: "HR-001".to_string(),
            description: Some("Complete new employee setup and documentation".to_string()),
            business_unit_id: "bu_002".to_string(),
            category: ProcessCategory::Hr,
            priority: ProcessPriority::Medium,
            status: ProcessStatus::Active,
            rpa_bot_ids: vec!["bot_003".to_string()],
            metrics: ProcessMetrics {
                avg_execution_mins: 45,
                success_rate: 92,
                monthly_executions: 25,
                error_rate: 8,
                cost_savings: 3000.0,
            },
            created_at: date(2024, 1, 10),
            updated_at: date(2024, 1, 18),
        },
        BusinessProcess {
            id: "3".to_string(),
            name: "Customer Support Routing".to_string(),
            code: "CS-001".to_string(),
            description: Some("Intelligent ticket routing and escalation".to_string()),
            business_unit_id: "bu_003".to_string(),
            category: ProcessCategory::CustomerService,
            priority: ProcessPriority::Critical,
            status: ProcessStatus::Testing,
            rpa_bot_ids: vec!["bot_004".to_string()],
            metrics: ProcessMetrics {
                avg_execution_mins: 5,
                success_rate: 88,
                monthly_executions: 800,
                error_rate: 12,
                cost_savings: 2000.0,
            },
            created_at: date(2024, 1, 12),
            updated_at: date(2024, 1, 19),
        },
        BusinessProcess {
            id: "4".to_string(),
            name: "Inventory Reconciliation".to_string(),
            code: "OPS-001".to_string(),
            description: Some("Daily stock level verification and ordering".to_string()),
            business_unit_id: "bu_001".to_string(),
            category: ProcessCategory::Operations,
            priority: ProcessPriority::Medium,
            status: ProcessStatus::Active,
            rpa_bot_ids: vec!["bot_005".to_string(), "bot_006".to_string()],
            metrics: ProcessMetrics {
                avg_execution_mins: 30,
                success_rate: 95,
                monthly_executions: 30,
                error_rate: 5,
                cost_savings: 4000.0,
            },
            created_at: date(2024, 1, 8),
            updated_at: date(2024, 1, 17),
        },
        BusinessProcess {
            id: "5".to_string(),
            name: "Security Compliance Check".to_string(),
            code: "IT-001".to_string(),
            description: Some(
                "Automated security audit and compliance verification".to_string(),
            ),
            business_unit_id: "bu_004".to_string(),
            category: ProcessCategory::It,
            priority: ProcessPriority::High,
            status: ProcessStatus::Testing,
            rpa_bot_ids: Vec::new(),
            metrics: ProcessMetrics {
                avg_execution_mins: 60,
                success_rate: 0,
                monthly_executions: 0,
                error_rate: 0,
                cost_savings: 0.0,
            },
            created_at: date(2024, 1, 14),
            updated_at: date(2024, 1, 14),
        },
        BusinessProcess {
            id: "6".to_string(),
            name: "Payroll Processing".to_string(),
            code: "HR-002".to_string(),
            description: Some("Monthly payroll calculation and distribution".to_string()),
            business_unit_id: "bu_002".to_string(),
            category: ProcessCategory::Hr,
            priority: ProcessPriority::Critical,
            status: ProcessStatus::Maintenance,
            rpa_bot_ids: vec!["bot_007".to_string()],
            metrics: ProcessMetrics {
                avg_execution_mins: 90,
                success_rate: 99,
                monthly_executions: 12,
                error_rate: 1,
                cost_savings: 8000.0,
            },
            created_at: date(2024, 1, 1),
            updated_at: date(2024, 1, 15),
        },
    ]
}
