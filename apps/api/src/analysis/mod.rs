pub mod chart;
pub mod handlers;
pub mod prompts;
pub mod sections;
