use crate::model::{Catalog, ProgressRecord, Section, Topic};

/// `round(100 * completed / total)`, or 0 when there is nothing to complete.
///
/// Halves round up. The result is clamped to 100 even if `completed`
/// exceeds `total`.
#[must_use]
pub fn percent(completed: usize, total: usize) -> u8 {
    if total == 0 {
        return 0;
    }
    let completed = completed.min(total) as u128;
    let total = total as u128;
    let rounded = (200 * completed + total) / (2 * total);
    u8::try_from(rounded).unwrap_or(100)
}

/// Completed and total topic counts for some slice of a catalog.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CompletionStats {
    pub completed: usize,
    pub total: usize,
}

impl CompletionStats {
    #[must_use]
    pub fn new(completed: usize, total: usize) -> Self {
        Self { completed, total }
    }

    pub fn from_topics<'a>(
        topics: impl IntoIterator<Item = &'a Topic>,
        record: &ProgressRecord,
    ) -> Self {
        topics
            .into_iter()
            .fold(Self::default(), |mut stats, topic| {
                stats.total += 1;
                if record.is_completed(topic.title()) {
                    stats.completed += 1;
                }
                stats
            })
    }

    #[must_use]
    pub fn for_section(section: &Section, record: &ProgressRecord) -> Self {
        Self::from_topics(section.topics(), record)
    }

    #[must_use]
    pub fn percent(self) -> u8 {
        percent(self.completed, self.total)
    }

    /// True when every topic is done and there is at least one.
    #[must_use]
    pub fn is_complete(self) -> bool {
        self.total > 0 && self.completed == self.total
    }
}

/// Global and per-section completion for one mode.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogProgress {
    pub global: CompletionStats,
    pub sections: Vec<CompletionStats>,
}

impl CatalogProgress {
    #[must_use]
    pub fn compute(catalog: &Catalog, record: &ProgressRecord) -> Self {
        let sections: Vec<CompletionStats> = catalog
            .sections()
            .iter()
            .map(|section| CompletionStats::for_section(section, record))
            .collect();
        let global = sections.iter().fold(CompletionStats::default(), |acc, s| {
            CompletionStats::new(acc.completed + s.completed, acc.total + s.total)
        });
        Self { global, sections }
    }

    #[must_use]
    pub fn section(&self, index: usize) -> CompletionStats {
        self.sections.get(index).copied().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percent_handles_empty_and_rounding() {
        assert_eq!(percent(0, 0), 0);
        assert_eq!(percent(5, 0), 0);
        assert_eq!(percent(1, 3), 33);
        assert_eq!(percent(2, 3), 67);
        assert_eq!(percent(1, 8), 13);
        assert_eq!(percent(1, 200), 1);
        assert_eq!(percent(3, 3), 100);
        assert_eq!(percent(9, 3), 100);
    }

    #[test]
    fn percent_always_in_range() {
        for total in 0..40 {
            for completed in 0..=total {
                assert!(percent(completed, total) <= 100);
            }
        }
    }

    #[test]
    fn compute_counts_global_and_sections() {
        let catalog = Catalog::from_json(
            r#"[
                {"title":"A","groups":[{"name":"G","topics":["a1","a2"]}]},
                {"title":"B","groups":[{"name":"G","topics":["b1","b2","b3"]}]},
                {"title":"Empty","groups":[]}
            ]"#,
        )
        .unwrap();
        let mut record = ProgressRecord::default();
        record.set_completed("a1", true);
        record.set_completed("a2", true);
        record.set_completed("b1", true);
        record.set_completed("stale", true);

        let progress = CatalogProgress::compute(&catalog, &record);
        assert_eq!(progress.global, CompletionStats::new(3, 5));
        assert_eq!(progress.global.percent(), 60);
        assert!(progress.section(0).is_complete());
        assert_eq!(progress.section(1).percent(), 33);
        assert!(!progress.section(2).is_complete());
        assert_eq!(progress.section(2).percent(), 0);
        assert_eq!(progress.section(9), CompletionStats::default());
    }
}
