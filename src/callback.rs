use crate::termination::TerminationCriterion;

/// Receives the termination criterion once per generation, before the generation runs.
pub trait ProgressCallback {
    fn update(&mut self, criterion: &dyn TerminationCriterion);
}

impl<F> ProgressCallback for F
where
    F: FnMut(&dyn TerminationCriterion),
{
    fn update(&mut self, criterion: &dyn TerminationCriterion) {
        self(criterion)
    }
}

/// Handle returned by `register`, needed to unregister the callback later.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct CallbackId(u64);

/// Subscribers notified in registration order.
#[derive(Default)]
pub struct Callbacks {
    next_id: u64,
    entries: Vec<(CallbackId, Box<dyn ProgressCallback>)>,
}

impl Callbacks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, callback: Box<dyn ProgressCallback>) -> CallbackId {
        let id = CallbackId(self.next_id);
        self.next_id += 1;
        self.entries.push((id, callback));
        id
    }

    /// Returns `false` when `id` was not registered.
    pub fn unregister(&mut self, id: CallbackId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(entry, _)| *entry != id);
        self.entries.len() != before
    }

    pub fn notify(&mut self, criterion: &dyn TerminationCriterion) {
        for (_, callback) in self.entries.iter_mut() {
            callback.update(criterion);
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
