//! View router
//!
//! Exclusive toggle between the list view and the detail view. The
//! outgoing controller's pollers are always torn down before the incoming
//! controller starts, so no two views' timers ever run concurrently.

use std::sync::{Arc, Mutex};

use solwatch_core::domain::log::LogKind;
use solwatch_core::domain::solution::SolutionId;

use crate::controller::detail::SolutionDetailController;
use crate::controller::list::SolutionListController;

/// Which view is currently live.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActiveView {
    List,
    Detail(SolutionId),
}

pub struct ViewRouter {
    list: Arc<SolutionListController>,
    detail: Arc<SolutionDetailController>,
    active: Mutex<ActiveView>,
}

impl ViewRouter {
    pub fn new(list: Arc<SolutionListController>, detail: Arc<SolutionDetailController>) -> Self {
        Self {
            list,
            detail,
            active: Mutex::new(ActiveView::List),
        }
    }

    /// Activate the list view, tearing down the detail pollers first.
    pub fn show_list(&self) {
        self.detail.deactivate();
        self.list.activate();
        *self.active.lock().unwrap() = ActiveView::List;
    }

    /// Activate the detail view for one solution, tearing down the list
    /// poller first.
    pub async fn show_detail(&self, id: SolutionId, kind: LogKind) {
        self.list.deactivate();
        *self.active.lock().unwrap() = ActiveView::Detail(id.clone());
        self.detail.activate(id, kind).await;
    }

    pub fn active(&self) -> ActiveView {
        self.active.lock().unwrap().clone()
    }
}
