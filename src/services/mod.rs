pub mod aggregator;
pub mod ai_client;
pub mod budget_monitor;
pub mod budget_plan;
pub mod export;
pub mod insights;
pub mod mailer;
pub mod narrative;
pub mod patterns;
pub mod savings;
