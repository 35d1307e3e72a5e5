#![forbid(unsafe_code)]

pub mod app_services;
pub mod celebration;
pub mod content;
pub mod dashboard;
pub mod error;
pub mod progress;

pub use app_services::AppServices;
pub use celebration::{
    Burst, CancelToken, CelebrationEnd, CelebrationPlan, run_celebration, run_celebration_with_rng,
};
pub use content::{ContentSource, ContentStore};
pub use dashboard::{ClickContext, DashboardService, DashboardSnapshot, ToggleOutcome};
pub use error::{AppServicesError, LoadError, ProgressError};
pub use progress::ProgressService;
