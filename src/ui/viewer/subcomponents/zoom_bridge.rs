// SPDX-License-Identifier: MPL-2.0
//! Zoom state bridge.
//!
//! Carries zoom reports from each page's zoom surface into the observable
//! `zoom_scale`/`fit_zoom_scale` of [`ViewerState`]. Reports are remembered
//! per page so the values can be republished when the selection changes;
//! only the selected page's values are ever visible in the viewer state.

use super::zoom_surface::ZoomReport;
use crate::ui::viewer::state::{PageId, ViewerState};
use std::collections::HashMap;

/// Values published for a page whose surface has not been measured yet.
pub const UNMEASURED: ZoomReport = ZoomReport {
    current: 1.0,
    fit: 1.0,
};

#[derive(Debug, Clone, Default)]
pub struct Bridge {
    reports: HashMap<PageId, ZoomReport>,
}

impl Bridge {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores a page's report and publishes it if the page is selected.
    pub fn record(&mut self, state: &mut ViewerState, page: PageId, report: ZoomReport) {
        self.reports.insert(page, report);
        if state.selected_id() == Some(page) {
            state.set_zoom(report.current, report.fit);
        }
    }

    /// Publishes the last known values of `page`.
    pub fn republish(&self, state: &mut ViewerState, page: PageId) {
        let report = self.report(page).unwrap_or(UNMEASURED);
        state.set_zoom(report.current, report.fit);
    }

    pub fn report(&self, page: PageId) -> Option<ZoomReport> {
        self.reports.get(&page).copied()
    }
}
