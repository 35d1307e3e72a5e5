use tracker_core::model::{Catalog, DetailIndex, Mode, ProgressRecord};
use tracker_core::progress::{CatalogProgress, CompletionStats};

/// Everything one render pass reads.
#[derive(Clone, Copy, Debug)]
pub struct RenderInput<'a> {
    pub mode: Mode,
    pub active_tab: usize,
    pub catalog: &'a Catalog,
    pub record: &'a ProgressRecord,
    pub details: &'a DetailIndex,
    pub search: &'a str,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TabPillVm {
    pub index: usize,
    pub title: String,
    pub percent: u8,
    pub percent_label: String,
    pub active: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TopicCardVm {
    pub dom_id: String,
    pub title: String,
    pub completed: bool,
    pub priority_class: String,
    pub stars: u8,
    pub note: Option<String>,
    pub has_details: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GroupVm {
    /// Position-based; group names may repeat within a section.
    pub key: String,
    pub name: String,
    pub cards: Vec<TopicCardVm>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DashboardVm {
    pub mode: Mode,
    pub logo_title: String,
    pub accent_color: &'static str,
    pub header_title: String,
    pub header_subtitle: String,
    pub tabs: Vec<TabPillVm>,
    pub groups: Vec<GroupVm>,
    pub no_results: bool,
    pub mastery_percent: u8,
    pub mastery_label: String,
    pub search: String,
}

impl DashboardVm {
    #[must_use]
    pub fn card_count(&self) -> usize {
        self.groups.iter().map(|group| group.cards.len()).sum()
    }
}

/// Stable element id for a topic card. Built from positions so that titles
/// differing only in punctuation never share an id.
#[must_use]
pub fn topic_dom_id(tab: usize, group: usize, topic: usize) -> String {
    format!("topic-{tab}-{group}-{topic}")
}

fn percent_label(stats: CompletionStats) -> String {
    format!("{}%", stats.percent())
}

#[must_use]
pub fn build_dashboard_vm(input: RenderInput<'_>) -> DashboardVm {
    let progress = CatalogProgress::compute(input.catalog, input.record);
    let active_tab = input.catalog.clamp_tab(input.active_tab);
    let query = input.search.trim().to_lowercase();

    let tabs = input
        .catalog
        .sections()
        .iter()
        .enumerate()
        .map(|(index, section)| {
            let stats = progress.section(index);
            TabPillVm {
                index,
                title: section.title.clone(),
                percent: stats.percent(),
                percent_label: percent_label(stats),
                active: index == active_tab,
            }
        })
        .collect();

    let (header_title, header_subtitle, groups) = match input.catalog.section(active_tab) {
        Some(section) => {
            let groups = section
                .groups
                .iter()
                .enumerate()
                .filter_map(|(group_idx, group)| {
                    let cards: Vec<_> = group
                        .topics
                        .iter()
                        .enumerate()
                        .filter(|(_, topic)| {
                            query.is_empty() || topic.title().to_lowercase().contains(&query)
                        })
                        .map(|(topic_idx, topic)| TopicCardVm {
                            dom_id: topic_dom_id(active_tab, group_idx, topic_idx),
                            title: topic.title().to_string(),
                            completed: input.record.is_completed(topic.title()),
                            priority_class: format!("prio-{}", topic.priority().as_str()),
                            stars: topic.priority().stars(),
                            note: topic.note().map(str::to_string),
                            has_details: input.details.has_details(topic.title()),
                        })
                        .collect();
                    (!cards.is_empty()).then(|| GroupVm {
                        key: format!("group-{active_tab}-{group_idx}"),
                        name: group.name.clone(),
                        cards,
                    })
                })
                .collect::<Vec<_>>();
            (section.title.clone(), section.subtitle.clone(), groups)
        }
        None => (String::new(), String::new(), Vec::new()),
    };

    DashboardVm {
        mode: input.mode,
        logo_title: input.mode.logo_title(),
        accent_color: input.mode.accent_color(),
        header_title,
        header_subtitle,
        tabs,
        no_results: groups.is_empty(),
        groups,
        mastery_percent: progress.global.percent(),
        mastery_label: percent_label(progress.global),
        search: input.search.to_string(),
    }
}
