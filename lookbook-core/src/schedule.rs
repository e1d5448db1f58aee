//! Agenda of timed steps for the open/close sequences, drag settling and resize.
//!
//! The host owns the clock; it arms one wake-up for `next_due()` and calls
//! back into the track, which pops whatever has become due.

use crate::config::TrackConfig;

/// Milliseconds on the host's clock.
pub type Millis = u64;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OpenPhase {
    DisperseSiblings,
    RevealSelected,
    RepositionSelected,
    RevealInfo,
    MountMedia,
}

impl OpenPhase {
    /// Offset of this phase from the start of the open sequence.
    pub fn at(self, config: &TrackConfig) -> u32 {
        match self {
            OpenPhase::DisperseSiblings => 0,
            OpenPhase::RevealSelected => config.reveal_at_ms,
            OpenPhase::RepositionSelected => config.reposition_at_ms,
            OpenPhase::RevealInfo => config.info_at_ms,
            OpenPhase::MountMedia => config.media_at_ms,
        }
    }

    pub fn next(self) -> Option<Self> {
        match self {
            OpenPhase::DisperseSiblings => Some(OpenPhase::RevealSelected),
            OpenPhase::RevealSelected => Some(OpenPhase::RepositionSelected),
            OpenPhase::RepositionSelected => Some(OpenPhase::RevealInfo),
            OpenPhase::RevealInfo => Some(OpenPhase::MountMedia),
            OpenPhase::MountMedia => None,
        }
    }

    /// Delay between this phase and the next one.
    pub fn gap_to_next(self, config: &TrackConfig) -> Option<u32> {
        self.next().map(|n| n.at(config).saturating_sub(self.at(config)))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClosePhase {
    /// Clear the expanded index and info text.
    Release,
    /// Every restoration animation has finished.
    Complete,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ResizeStep {
    /// Debounce elapsed: adopt the new viewport.
    Settle,
    Reposition,
    Finish,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Task {
    Open(OpenPhase),
    Close(ClosePhase),
    DragSettle,
    Resize(ResizeStep),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Entry {
    pub due: Millis,
    /// Sequence token or generation the step belongs to.
    pub token: u64,
    pub task: Task,
    seq: u64,
}

/// Timer queue ordered by due time, then insertion order.
#[derive(Clone, Debug, Default)]
pub struct Agenda {
    entries: Vec<Entry>,
    next_seq: u64,
}

impl Agenda {
    pub fn schedule(&mut self, due: Millis, token: u64, task: Task) {
        let entry = Entry { due, token, task, seq: self.next_seq };
        self.next_seq += 1;
        let pos = self
            .entries
            .partition_point(|e| (e.due, e.seq) <= (entry.due, entry.seq));
        self.entries.insert(pos, entry);
    }

    /// Earliest entry due at or before `now`.
    pub fn pop_due(&mut self, now: Millis) -> Option<Entry> {
        match self.entries.first() {
            Some(e) if e.due <= now => Some(self.entries.remove(0)),
            _ => None,
        }
    }

    pub fn next_due(&self) -> Option<Millis> {
        self.entries.first().map(|e| e.due)
    }

    /// Drop every pending entry matching `pred`.
    pub fn cancel_where(&mut self, pred: impl Fn(&Entry) -> bool) {
        self.entries.retain(|e| !pred(e));
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pops_in_due_order() {
        let mut agenda = Agenda::default();
        agenda.schedule(300, 1, Task::Close(ClosePhase::Release));
        agenda.schedule(100, 1, Task::DragSettle);
        agenda.schedule(200, 1, Task::Resize(ResizeStep::Settle));
        assert_eq!(agenda.next_due(), Some(100));

        assert!(agenda.pop_due(50).is_none());
        assert_eq!(agenda.pop_due(250).map(|e| e.task), Some(Task::DragSettle));
        assert_eq!(agenda.pop_due(250).map(|e| e.task), Some(Task::Resize(ResizeStep::Settle)));
        assert!(agenda.pop_due(250).is_none());
        assert_eq!(agenda.len(), 1);
    }

    #[test]
    fn test_ties_keep_insertion_order() {
        let mut agenda = Agenda::default();
        agenda.schedule(10, 1, Task::Open(OpenPhase::RevealSelected));
        agenda.schedule(10, 1, Task::DragSettle);
        assert_eq!(agenda.pop_due(10).map(|e| e.task), Some(Task::Open(OpenPhase::RevealSelected)));
        assert_eq!(agenda.pop_due(10).map(|e| e.task), Some(Task::DragSettle));
    }

    #[test]
    fn test_cancel_where() {
        let mut agenda = Agenda::default();
        agenda.schedule(10, 1, Task::Resize(ResizeStep::Settle));
        agenda.schedule(20, 2, Task::Resize(ResizeStep::Settle));
        agenda.schedule(30, 2, Task::DragSettle);
        agenda.cancel_where(|e| matches!(e.task, Task::Resize(_)));
        assert_eq!(agenda.len(), 1);
        assert_eq!(agenda.next_due(), Some(30));
    }

    #[test]
    fn test_open_phase_offsets() {
        let cfg = TrackConfig::default();
        let mut phase = OpenPhase::DisperseSiblings;
        let mut offsets = vec![phase.at(&cfg)];
        while let Some(gap) = phase.gap_to_next(&cfg) {
            phase = phase.next().unwrap();
            offsets.push(offsets.last().unwrap() + gap);
        }
        assert_eq!(offsets, vec![0, 10, 600, 1000, 1500]);
        assert_eq!(phase, OpenPhase::MountMedia);
    }
}
