/// Aggregate counts a presentation layer renders as quiz progress.
///
/// Degraded questions can never be checked, so they are excluded from
/// `remaining` while still counting toward `total`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionProgress {
    pub total: usize,
    pub answered: usize,
    pub remaining: usize,
    pub degraded: usize,
    pub is_complete: bool,
}
