/// Tracks which appointment, if any, a pending form submission will update.
///
/// Holds zero or one appointment id. While a target is set, a submission is
/// an update; otherwise it is a create. Cleared on cancel, on a completed
/// submission, when the targeted appointment is deleted, and on delete-all.
#[derive(Debug, Default)]
pub struct EditSession {
    target: Option<String>,
}

impl EditSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enter edit mode for the given appointment id.
    ///
    /// A second call while already editing simply retargets: the last
    /// request wins.
    pub fn begin(&mut self, id: impl Into<String>) {
        self.target = Some(id.into());
    }

    /// Current edit target, if any.
    pub fn current(&self) -> Option<&str> {
        self.target.as_deref()
    }

    /// Leave edit mode.
    pub fn end(&mut self) {
        self.target = None;
    }
}
