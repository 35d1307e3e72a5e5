#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ViewError {
    /// A change could not be written; the previous state is still shown.
    SaveFailed,
}

impl ViewError {
    #[must_use]
    pub fn message(self) -> &'static str {
        match self {
            ViewError::SaveFailed => "Could not save your progress. The last change was undone.",
        }
    }
}
