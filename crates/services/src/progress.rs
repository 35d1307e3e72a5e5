use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use storage::repository::KeyValueRepository;
use tracker_core::model::{MODE_PREFERENCE_KEY, Mode, ProgressRecord};

use crate::error::ProgressError;

#[derive(Debug, Default)]
struct ProgressState {
    mode: Mode,
    records: HashMap<Mode, ProgressRecord>,
}

impl ProgressState {
    fn record_mut(&mut self, mode: Mode) -> &mut ProgressRecord {
        self.records.entry(mode).or_default()
    }
}

/// Owns the per-mode progress records and the mode preference.
///
/// Every mutation is written through to the repository before the call
/// returns. If the write fails, the in-memory change is undone.
pub struct ProgressService {
    repo: Arc<dyn KeyValueRepository>,
    state: Mutex<ProgressState>,
    /// Held from mutation until the write settles, so stores land in order.
    writes: tokio::sync::Mutex<()>,
}

impl ProgressService {
    /// Read both records and the mode preference.
    ///
    /// Missing, corrupt or unreadable values fall back to defaults.
    pub async fn load(repo: Arc<dyn KeyValueRepository>) -> Self {
        let mut state = ProgressState::default();
        for mode in Mode::ALL {
            let record = read_record(repo.as_ref(), mode).await;
            state.records.insert(mode, record);
        }
        state.mode = read_mode(repo.as_ref()).await;
        tracing::debug!(mode = %state.mode, "progress loaded");

        Self {
            repo,
            state: Mutex::new(state),
            writes: tokio::sync::Mutex::new(()),
        }
    }

    fn lock(&self) -> MutexGuard<'_, ProgressState> {
        // Every mutation leaves the state consistent, so a poisoned lock is usable.
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    #[must_use]
    pub fn mode(&self) -> Mode {
        self.lock().mode
    }

    /// Snapshot of the record for `mode`.
    #[must_use]
    pub fn record(&self, mode: Mode) -> ProgressRecord {
        self.lock().records.get(&mode).cloned().unwrap_or_default()
    }

    /// Persist the mode preference.
    ///
    /// # Errors
    ///
    /// Returns `ProgressError` if the preference cannot be stored; the
    /// previous mode stays active.
    pub async fn set_mode(&self, mode: Mode) -> Result<(), ProgressError> {
        let _write = self.writes.lock().await;
        let previous = std::mem::replace(&mut self.lock().mode, mode);
        if let Err(err) = self.repo.put_value(MODE_PREFERENCE_KEY, mode.as_str()).await {
            self.lock().mode = previous;
            return Err(err.into());
        }
        Ok(())
    }

    /// Set the active section index for `mode` and persist it.
    ///
    /// # Errors
    ///
    /// Returns `ProgressError` if the record cannot be stored.
    pub async fn set_active_tab(&self, mode: Mode, index: usize) -> Result<(), ProgressError> {
        self.update_record(mode, |record| record.set_active_tab(index))
            .await
    }

    /// Flip completion for `title` in `mode`, persist, and return the new value.
    ///
    /// Any title is accepted, including ones not present in a catalog.
    ///
    /// # Errors
    ///
    /// Returns `ProgressError` if the record cannot be stored.
    pub async fn toggle_completion(&self, mode: Mode, title: &str) -> Result<bool, ProgressError> {
        self.update_record(mode, |record| record.toggle(title)).await
    }

    /// Forget everything recorded for `mode`.
    ///
    /// # Errors
    ///
    /// Returns `ProgressError` if the persisted record cannot be deleted.
    pub async fn reset(&self, mode: Mode) -> Result<(), ProgressError> {
        let _write = self.writes.lock().await;
        self.repo.delete_value(mode.progress_key()).await?;
        self.lock().records.insert(mode, ProgressRecord::default());
        tracing::info!(%mode, "progress reset");
        Ok(())
    }

    /// Apply `change` to the record for `mode` and write the result.
    ///
    /// Mutations are serialised end to end. On a failed write the record
    /// goes back to exactly what it was before `change`.
    async fn update_record<T>(
        &self,
        mode: Mode,
        change: impl FnOnce(&mut ProgressRecord) -> T,
    ) -> Result<T, ProgressError> {
        let _write = self.writes.lock().await;
        let (previous, output, encoded) = {
            let mut state = self.lock();
            let record = state.record_mut(mode);
            let previous = record.clone();
            let output = change(record);
            (previous, output, record.to_json())
        };
        let result = match encoded {
            Ok(encoded) => self.write_record(mode, &encoded).await,
            Err(err) => Err(err.into()),
        };
        if let Err(err) = result {
            self.lock().records.insert(mode, previous);
            return Err(err);
        }
        Ok(output)
    }

    async fn write_record(&self, mode: Mode, encoded: &str) -> Result<(), ProgressError> {
        self.repo
            .put_value(mode.progress_key(), encoded)
            .await
            .map_err(|err| {
                tracing::warn!(%mode, error = %err, "failed to persist progress");
                ProgressError::from(err)
            })
    }
}

async fn read_record(repo: &dyn KeyValueRepository, mode: Mode) -> ProgressRecord {
    match repo.get_value(mode.progress_key()).await {
        Ok(Some(raw)) => ProgressRecord::from_json(&raw).unwrap_or_else(|err| {
            tracing::warn!(%mode, error = %err, "discarding corrupt progress record");
            ProgressRecord::default()
        }),
        Ok(None) => ProgressRecord::default(),
        Err(err) => {
            tracing::warn!(%mode, error = %err, "could not read progress record");
            ProgressRecord::default()
        }
    }
}

async fn read_mode(repo: &dyn KeyValueRepository) -> Mode {
    match repo.get_value(MODE_PREFERENCE_KEY).await {
        Ok(Some(raw)) => Mode::parse(&raw).unwrap_or_default(),
        Ok(None) => Mode::default(),
        Err(err) => {
            tracing::warn!(error = %err, "could not read mode preference");
            Mode::default()
        }
    }
}
