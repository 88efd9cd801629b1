use crate::domain::model::EntryProgress;

/// Observer for per-entry archive progress, polled for cancellation
/// before each entry is processed.
pub trait ProgressListener {
    fn on_entry(&mut self, progress: &EntryProgress);

    fn is_canceled(&self) -> bool {
        false
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NoProgress;

impl ProgressListener for NoProgress {
    fn on_entry(&mut self, _progress: &EntryProgress) {}
}

impl<F> ProgressListener for F
where
    F: FnMut(&EntryProgress),
{
    fn on_entry(&mut self, progress: &EntryProgress) {
        self(progress)
    }
}
