//! Service layer: business logic over the fact store port.

pub mod scheduler;

pub use scheduler::{order_schedule, SchedulerService};
