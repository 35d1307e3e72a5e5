mod confetti;
mod detail_modal;
mod intent;
mod scripts;
mod sidebar;
pub(crate) mod state;
mod topics;
mod view;

pub use view::DashboardView;

pub(crate) use intent::DashboardIntent;
#[cfg(test)]
pub(crate) use view::DashboardTestHandles;
