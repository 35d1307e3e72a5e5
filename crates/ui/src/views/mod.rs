mod dashboard;
mod load_failed;
mod state;

pub use dashboard::DashboardView;
pub use load_failed::LoadFailedView;
pub use state::ViewError;

#[cfg(test)]
mod test_harness;
#[cfg(test)]
mod view_smoke;
