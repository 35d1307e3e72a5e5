mod catalog;
mod detail;
mod mode;
mod progress_record;

pub use catalog::{Catalog, CatalogError, Group, Priority, Section, Topic};
pub use detail::{DetailBlock, DetailIndex};
pub use mode::{MODE_PREFERENCE_KEY, Mode};
pub use progress_record::ProgressRecord;
