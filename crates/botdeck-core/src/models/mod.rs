//! Domain model: principals, RPA bots, business units and processes.

mod business;
mod rpa;
mod user;

pub use business::{
    BusinessProcess, BusinessUnit, ManagerRef, ProcessCategory, ProcessMetrics, ProcessPriority,
    ProcessStatus, UnitMetrics, UnitStatus,
};
pub use rpa::{BotConfiguration, BotMetrics, BotStatus, BotTechnology, RpaBot};
pub use user::{User, UserRole, UserStatus};
