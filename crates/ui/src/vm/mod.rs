mod confetti_vm;
mod dashboard_vm;
mod detail_vm;
mod markdown_vm;

pub use confetti_vm::{MAX_PARTICLES, ParticleVm, particles_from_burst, push_particles};
pub use dashboard_vm::{
    DashboardVm, GroupVm, RenderInput, TabPillVm, TopicCardVm, build_dashboard_vm, topic_dom_id,
};
pub use detail_vm::{DetailBlockVm, DetailVm, NO_NOTES_PLACEHOLDER, build_detail_vm};
pub use markdown_vm::{markdown_to_html, sanitize_html};
