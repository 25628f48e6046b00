//! Frame review editing session over a working copy of the inclusion flags.

use sift_common::{FrameIndex, Playhead, SelectionError, SelectionResult};

use crate::frame_set::FrameSet;
use crate::report::ChangeReport;

/// Result of a batch include/exclude command.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SelectionEdit {
    /// Indices whose working flag actually flipped.
    pub changed: Vec<FrameIndex>,
    /// Whether the frame under the playhead was among the targets; its
    /// excluded-overlay may have changed, so the caller should re-render
    /// it.
    pub redraw_current: bool,
}

/// Editing session over a [`FrameSet`].
///
/// Opens with a working copy of the committed flags so the user can
/// include and exclude freely; nothing reaches the frame set until
/// [`commit`]. `commit` and [`discard`] both consume the session, so
/// exactly one of them can end it.
///
/// The playhead passed to [`open`] is shared: the playback loop advances
/// it while the session (and the front-end) reads and seeks it.
///
/// [`open`]: ReviewSession::open
/// [`commit`]: ReviewSession::commit
/// [`discard`]: ReviewSession::discard
#[derive(Debug)]
pub struct ReviewSession {
    working: Vec<bool>,
    /// Sorted, deduplicated multi-selection.
    selected: Vec<FrameIndex>,
    playhead: Playhead,
}

impl ReviewSession {
    /// Open a session on the committed state of `frames`.
    pub fn open(frames: &FrameSet, playhead: Playhead) -> Self {
        tracing::info!(
            frames = frames.frame_count(),
            included = frames.included_count(),
            "Review session opened"
        );
        Self {
            working: frames.flags().to_vec(),
            selected: Vec::new(),
            playhead,
        }
    }

    /// Total number of frames under review.
    pub fn frame_count(&self) -> usize {
        self.working.len()
    }

    /// Position of the shared playhead.
    pub fn current(&self) -> FrameIndex {
        self.playhead.position()
    }

    /// Clone of the shared playhead, for wiring up a playback controller.
    pub fn playhead(&self) -> Playhead {
        self.playhead.clone()
    }

    /// Replace the multi-selection and move the playhead to its lowest
    /// index.
    ///
    /// Fails with `EmptySelection` if `indices` is empty and with
    /// `IndexOutOfRange` if any index lies past the end of the stack; the
    /// previous selection is kept on error.
    pub fn set_selection(&mut self, indices: &[FrameIndex]) -> SelectionResult<()> {
        if indices.is_empty() {
            return Err(SelectionError::EmptySelection);
        }
        if let Some(&bad) = indices.iter().find(|i| i.0 >= self.working.len()) {
            return Err(SelectionError::IndexOutOfRange {
                index: bad.0,
                frame_count: self.working.len(),
            });
        }

        let mut selected = indices.to_vec();
        selected.sort_unstable();
        selected.dedup();

        // Sorted, so the first entry is the minimum.
        self.playhead.seek(selected[0]);
        tracing::debug!(
            count = selected.len(),
            current = %selected[0],
            "Selection replaced"
        );
        self.selected = selected;
        Ok(())
    }

    /// Empty the multi-selection. The playhead stays put.
    pub fn clear_selection(&mut self) {
        if !self.selected.is_empty() {
            tracing::debug!(count = self.selected.len(), "Selection cleared");
            self.selected.clear();
        }
    }

    /// The current multi-selection, ascending.
    pub fn selected(&self) -> &[FrameIndex] {
        &self.selected
    }

    /// True if any frames are multi-selected.
    pub fn has_selection(&self) -> bool {
        !self.selected.is_empty()
    }

    /// Mark every selected frame as included. No-op on an empty
    /// selection.
    pub fn include_selected(&mut self) -> SelectionEdit {
        self.mark_selected(true)
    }

    /// Mark every selected frame as excluded. No-op on an empty
    /// selection.
    pub fn exclude_selected(&mut self) -> SelectionEdit {
        self.mark_selected(false)
    }

    fn mark_selected(&mut self, included: bool) -> SelectionEdit {
        if self.selected.is_empty() {
            return SelectionEdit::default();
        }

        let mut changed = Vec::new();
        for &index in &self.selected {
            let flag = &mut self.working[index.0];
            if *flag != included {
                *flag = included;
                changed.push(index);
            }
        }
        let redraw_current = self.selected.contains(&self.playhead.position());
        tracing::debug!(
            targets = self.selected.len(),
            changed = changed.len(),
            included,
            "Batch selection edit"
        );
        SelectionEdit {
            changed,
            redraw_current,
        }
    }

    /// Working flag for `index`, driving the excluded-overlay on the
    /// displayed frame. Out-of-range reads as false.
    pub fn is_included(&self, index: FrameIndex) -> bool {
        self.working.get(index.0).copied().unwrap_or(false)
    }

    /// Number of frames the working copy currently marks included.
    pub fn included_count(&self) -> usize {
        self.working.iter().filter(|&&f| f).count()
    }

    /// The full working flag vector, ordered by frame index.
    pub fn working_flags(&self) -> &[bool] {
        &self.working
    }

    /// Move the shared playhead to `to`.
    ///
    /// Takes `&self` because the playhead is a shared cursor, not part of
    /// the working copy. A seek racing the playback loop resolves as last
    /// write wins; front-ends are expected to disable manual seeking
    /// while playback runs.
    pub fn seek(&self, to: FrameIndex) -> SelectionResult<()> {
        if to.0 >= self.working.len() {
            return Err(SelectionError::IndexOutOfRange {
                index: to.0,
                frame_count: self.working.len(),
            });
        }
        self.playhead.seek(to);
        Ok(())
    }

    /// Diff the working copy against `frames` without applying anything.
    pub fn changes(&self, frames: &FrameSet) -> SelectionResult<ChangeReport> {
        if frames.frame_count() != self.working.len() {
            return Err(SelectionError::FlagCountMismatch {
                working: self.working.len(),
                committed: frames.frame_count(),
            });
        }

        let mut included = Vec::new();
        let mut excluded = Vec::new();
        for (i, (&now, &before)) in self.working.iter().zip(frames.flags()).enumerate() {
            if now && !before {
                included.push(FrameIndex(i));
            } else if !now && before {
                excluded.push(FrameIndex(i));
            }
        }
        Ok(ChangeReport {
            included,
            excluded,
            remaining: self.included_count(),
        })
    }

    /// True if committing now would change the frame set.
    pub fn has_changes(&self, frames: &FrameSet) -> bool {
        frames.flags() != self.working.as_slice()
    }

    /// Commit the working copy into `frames` and report the net change.
    ///
    /// The flags are applied in a single assignment; the frame set never
    /// holds a partially applied state. On error the frame set is
    /// untouched; either way the session is over.
    pub fn commit(self, frames: &mut FrameSet) -> SelectionResult<ChangeReport> {
        let report = self.changes(frames)?;
        frames.set_flags(self.working)?;
        tracing::info!(
            newly_included = report.included.len(),
            newly_excluded = report.excluded.len(),
            remaining = report.remaining,
            "Review session committed"
        );
        Ok(report)
    }

    /// Drop the working copy; the frame set is untouched.
    pub fn discard(self) {
        tracing::info!(frames = self.working.len(), "Review session discarded");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn indices(raw: &[usize]) -> Vec<FrameIndex> {
        raw.iter().map(|&i| FrameIndex(i)).collect()
    }

    fn open_session(frame_count: usize) -> (FrameSet, ReviewSession) {
        let frames = FrameSet::all_included(frame_count);
        let session = ReviewSession::open(&frames, Playhead::default());
        (frames, session)
    }

    #[test]
    fn open_copies_committed_flags() {
        let frames = FrameSet::from_flags(vec![true, false, true]);
        let session = ReviewSession::open(&frames, Playhead::default());
        assert_eq!(session.working_flags(), frames.flags());
        assert_eq!(session.frame_count(), 3);
        assert!(!session.has_selection());
    }

    #[test]
    fn set_selection_moves_playhead_to_minimum() {
        let (_, mut session) = open_session(6);
        session.set_selection(&indices(&[4, 2, 5])).unwrap();
        assert_eq!(session.current(), FrameIndex(2));
        assert_eq!(session.selected(), indices(&[2, 4, 5]).as_slice());
    }

    #[test]
    fn set_selection_sorts_and_dedups() {
        let (_, mut session) = open_session(6);
        session.set_selection(&indices(&[3, 1, 3, 1])).unwrap();
        assert_eq!(session.selected(), indices(&[1, 3]).as_slice());
    }

    #[test]
    fn empty_selection_is_an_error() {
        let (_, mut session) = open_session(4);
        assert_eq!(
            session.set_selection(&[]).unwrap_err(),
            SelectionError::EmptySelection
        );
    }

    #[test]
    fn out_of_range_selection_keeps_previous() {
        let (_, mut session) = open_session(4);
        session.set_selection(&indices(&[1])).unwrap();
        let err = session.set_selection(&indices(&[2, 9])).unwrap_err();
        assert_eq!(
            err,
            SelectionError::IndexOutOfRange {
                index: 9,
                frame_count: 4,
            }
        );
        assert_eq!(session.selected(), indices(&[1]).as_slice());
    }

    #[test]
    fn clear_selection_empties() {
        let (_, mut session) = open_session(4);
        session.set_selection(&indices(&[0, 2])).unwrap();
        session.clear_selection();
        assert!(!session.has_selection());
    }

    #[test]
    fn exclude_then_include_replays_in_order() {
        let (_, mut session) = open_session(5);

        session.set_selection(&indices(&[1, 3])).unwrap();
        session.exclude_selected();
        assert_eq!(
            session.working_flags(),
            &[true, false, true, false, true]
        );

        session.set_selection(&indices(&[3, 4])).unwrap();
        session.exclude_selected();
        assert_eq!(
            session.working_flags(),
            &[true, false, true, false, false]
        );

        session.set_selection(&indices(&[1])).unwrap();
        session.include_selected();
        assert_eq!(
            session.working_flags(),
            &[true, true, true, false, false]
        );
        assert_eq!(session.included_count(), 3);
    }

    #[test]
    fn edit_reports_only_actual_flips() {
        let (_, mut session) = open_session(4);
        session.set_selection(&indices(&[0, 1])).unwrap();
        session.exclude_selected();

        // 0 and 1 already excluded; only 2 flips now.
        session.set_selection(&indices(&[0, 1, 2])).unwrap();
        let edit = session.exclude_selected();
        assert_eq!(edit.changed, indices(&[2]));
    }

    #[test]
    fn edit_with_empty_selection_is_a_no_op() {
        let (_, mut session) = open_session(3);
        let edit = session.include_selected();
        assert_eq!(edit, SelectionEdit::default());
        assert_eq!(session.working_flags(), &[true, true, true]);
    }

    #[test]
    fn edit_flags_current_frame_for_redraw() {
        let (_, mut session) = open_session(5);
        session.set_selection(&indices(&[2, 3])).unwrap();
        // Playhead followed the selection to 2, which is among the
        // targets.
        let edit = session.exclude_selected();
        assert!(edit.redraw_current);

        session.seek(FrameIndex(0)).unwrap();
        let edit = session.include_selected();
        assert!(!edit.redraw_current);
    }

    #[test]
    fn is_included_tracks_the_working_copy() {
        let (frames, mut session) = open_session(3);
        session.set_selection(&indices(&[1])).unwrap();
        session.exclude_selected();
        assert!(!session.is_included(FrameIndex(1)));
        // Committed state untouched until commit.
        assert!(frames.is_included(FrameIndex(1)));
    }

    #[test]
    fn seek_bounds_checked() {
        let (_, session) = open_session(3);
        session.seek(FrameIndex(2)).unwrap();
        assert_eq!(session.current(), FrameIndex(2));
        assert!(session.seek(FrameIndex(3)).is_err());
        assert_eq!(session.current(), FrameIndex(2));
    }

    #[test]
    fn commit_reports_exactly_the_diff() {
        let mut frames = FrameSet::from_flags(vec![true, true, false, true, false]);
        let mut session = ReviewSession::open(&frames, Playhead::default());

        session.set_selection(&indices(&[0, 2])).unwrap();
        session.include_selected(); // 0 stays, 2 flips on
        session.set_selection(&indices(&[1, 3])).unwrap();
        session.exclude_selected(); // 1 and 3 flip off

        let report = session.commit(&mut frames).unwrap();
        assert_eq!(report.included, indices(&[2]));
        assert_eq!(report.excluded, indices(&[1, 3]));
        assert_eq!(report.remaining, 2);
        assert_eq!(frames.flags(), &[true, false, true, false, false]);
    }

    #[test]
    fn commit_lists_are_disjoint_and_ascending() {
        let mut frames = FrameSet::from_flags(vec![false, true, false, true, false, true]);
        let mut session = ReviewSession::open(&frames, Playhead::default());
        session.set_selection(&indices(&[4, 0, 2])).unwrap();
        session.include_selected();
        session.set_selection(&indices(&[5, 1])).unwrap();
        session.exclude_selected();

        let report = session.commit(&mut frames).unwrap();
        assert_eq!(report.included, indices(&[0, 2, 4]));
        assert_eq!(report.excluded, indices(&[1, 5]));
        for idx in &report.included {
            assert!(!report.excluded.contains(idx));
        }
    }

    #[test]
    fn commit_without_edits_reports_nothing() {
        let (mut frames, session) = open_session(4);
        let report = session.commit(&mut frames).unwrap();
        assert!(!report.has_changes());
        assert_eq!(report.remaining, 4);
        assert_eq!(frames.included_count(), 4);
    }

    #[test]
    fn discard_leaves_frame_set_untouched() {
        let (frames, mut session) = open_session(5);
        session.set_selection(&indices(&[0, 1, 2, 3, 4])).unwrap();
        session.exclude_selected();
        assert_eq!(session.included_count(), 0);

        session.discard();
        assert_eq!(frames.included_count(), 5);
        assert_eq!(frames.flags(), &[true; 5]);
    }

    #[test]
    fn changes_previews_without_applying() {
        let (frames, mut session) = open_session(3);
        session.set_selection(&indices(&[1])).unwrap();
        session.exclude_selected();

        assert!(session.has_changes(&frames));
        let report = session.changes(&frames).unwrap();
        assert_eq!(report.excluded, indices(&[1]));
        assert_eq!(frames.included_count(), 3);

        // Undo the edit; the preview empties out again.
        session.include_selected();
        assert!(!session.has_changes(&frames));
    }

    #[test]
    fn commit_rejects_resized_frame_set() {
        let (_, session) = open_session(4);
        let mut shrunk = FrameSet::all_included(3);
        let err = session.commit(&mut shrunk).unwrap_err();
        assert_eq!(
            err,
            SelectionError::FlagCountMismatch {
                working: 4,
                committed: 3,
            }
        );
        assert_eq!(shrunk.included_count(), 3);
    }
}
