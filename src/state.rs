use std::sync::Arc;

use tokio::sync::Mutex;

use crate::services::CatalogService;
use crate::views::{CourseDetailState, CourseListState, DashboardState, Generation, ViewSlot};

#[derive(Clone)]
pub struct AppState {
    pub service: Arc<CatalogService>,
    pub session: Arc<Mutex<Session>>,
}

impl AppState {
    pub fn new(service: CatalogService) -> Self {
        Self {
            service: Arc::new(service),
            session: Arc::new(Mutex::new(Session::default())),
        }
    }
}

/// The views of one browsing session. Navigation shows a single view at a
/// time, so mounting one unmounts the others.
#[derive(Debug)]
pub struct Session {
    pub list: ViewSlot<CourseListState>,
    pub detail: ViewSlot<CourseDetailState>,
    pub dashboard: ViewSlot<DashboardState>,
}

impl Default for Session {
    fn default() -> Self {
        Self {
            list: ViewSlot::new("course list"),
            detail: ViewSlot::new("course detail"),
            dashboard: ViewSlot::new("dashboard"),
        }
    }
}

impl Session {
    pub fn mount_list(&mut self, state: CourseListState) -> Generation {
        self.detail.unmount();
        self.dashboard.unmount();
        self.list.mount(state)
    }

    pub fn mount_detail(&mut self, state: CourseDetailState) -> Generation {
        self.list.unmount();
        self.dashboard.unmount();
        self.detail.mount(state)
    }

    pub fn mount_dashboard(&mut self, state: DashboardState) -> Generation {
        self.list.unmount();
        self.detail.unmount();
        self.dashboard.mount(state)
    }
}
