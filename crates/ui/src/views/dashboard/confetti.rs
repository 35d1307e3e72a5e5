use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use dioxus::prelude::*;
use services::{CancelToken, CelebrationEnd, CelebrationPlan, run_celebration};

use crate::vm::{ParticleVm, particles_from_burst, push_particles};

/// How long particles stay mounted after the last burst.
const LINGER: Duration = Duration::from_millis(2200);

/// Handle to the celebration currently on screen.
#[derive(Clone, Default)]
pub(super) struct CelebrationSlot(Rc<RefCell<Option<CancelToken>>>);

impl CelebrationSlot {
    fn replace(&self, token: CancelToken) {
        if let Some(previous) = self.0.borrow_mut().replace(token) {
            previous.cancel();
        }
    }

    pub(super) fn cancel(&self) {
        if let Some(token) = self.0.borrow_mut().take() {
            token.cancel();
        }
    }
}

/// A slot whose running celebration is cancelled when the component unmounts.
pub(super) fn use_celebration_slot() -> CelebrationSlot {
    let slot = use_hook(CelebrationSlot::default);
    let on_drop = slot.clone();
    use_drop(move || on_drop.cancel());
    slot
}

/// Run `plan` to completion, cancelling whatever `slot` was showing before.
pub(super) async fn celebrate(
    plan: CelebrationPlan,
    slot: CelebrationSlot,
    mut particles: Signal<Vec<ParticleVm>>,
) {
    let token = CancelToken::new();
    slot.replace(token.clone());
    tracing::debug!(duration_ms = plan.duration().as_millis() as u64, "celebration started");

    let mut next_key = particles.peek().last().map_or(0, |p| p.key + 1);
    let end = run_celebration(plan, token.clone(), |burst| {
        let batch = particles_from_burst(&burst, &mut next_key, &mut rand::rng());
        push_particles(&mut particles.write(), batch);
    })
    .await;
    if end == CelebrationEnd::Cancelled {
        return;
    }

    tokio::time::sleep(LINGER).await;
    if !token.is_cancelled() {
        particles.write().clear();
    }
}

#[component]
pub(super) fn ConfettiLayer(particles: Signal<Vec<ParticleVm>>) -> Element {
    rsx! {
        div { class: "confetti-layer",
            for particle in particles.read().iter() {
                span {
                    key: "{particle.key}",
                    class: "confetti-piece",
                    style: particle.style(),
                }
            }
        }
    }
}
