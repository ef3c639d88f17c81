pub mod course_detail;
pub mod course_list;
pub mod dashboard;
pub mod draft;

use tracing::warn;

pub use course_detail::{CourseDetailState, CourseDetailView};
pub use course_list::{CourseListState, CourseListView, LikeRequest, LikeState};
pub use dashboard::{DashboardState, DashboardView};
pub use draft::{CourseDraft, DraftField, DraftView};

/// Identifies one mounting of a view. Results tagged with an older
/// generation belong to a view that is gone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Generation(u64);

/// Holds at most one mounted instance of a view.
#[derive(Debug)]
pub struct ViewSlot<S> {
    name: &'static str,
    generation: u64,
    state: Option<S>,
}

impl<S> ViewSlot<S> {
    pub fn new(name: &'static str) -> Self {
        Self { name, generation: 0, state: None }
    }

    /// Replaces whatever was mounted with a fresh state.
    pub fn mount(&mut self, state: S) -> Generation {
        self.generation += 1;
        self.state = Some(state);
        Generation(self.generation)
    }

    pub fn unmount(&mut self) {
        self.state = None;
    }

    pub fn is_mounted(&self) -> bool {
        self.state.is_some()
    }

    pub fn current(&self) -> Option<(Generation, &S)> {
        self.state.as_ref().map(|state| (Generation(self.generation), state))
    }

    pub fn current_mut(&mut self) -> Option<(Generation, &mut S)> {
        let generation = Generation(self.generation);
        self.state.as_mut().map(|state| (generation, state))
    }

    /// The mounted state, only if it is still the one `generation` refers to.
    /// A miss means a late result must be dropped.
    pub fn live_mut(&mut self, generation: Generation) -> Option<&mut S> {
        if generation.0 != self.generation || self.state.is_none() {
            warn!(
                "Discarding late result for unmounted {} view (generation {})",
                self.name, generation.0
            );
            return None;
        }
        self.state.as_mut()
    }
}
