/// The fetch state of a paginated scan. An empty buffer alone can't tell a scan that hasn't
/// fetched anything yet from one that is done. This tracks pages, not objects: a scan is
/// Exhausted as soon as its last page is fetched, while that page's objects may still be
/// buffered.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScanState {
    /// No page has been fetched yet.
    NotStarted,
    /// At least one page has been fetched, and the store returned a continuation token.
    InProgress,
    /// The last fetched page had no continuation token. No more pages will be fetched, but
    /// objects of that page may remain.
    Exhausted,
}

impl ScanState {
    /// Checks whether another page may be fetched.
    pub fn has_another_page(&self) -> bool {
        match self {
            Self::NotStarted | Self::InProgress => true,
            Self::Exhausted => false,
        }
    }
}
