// src/navigation/mod.rs
//
// Page / requests-tab / selected-day state machine.

use std::collections::HashSet;

use serde::Serialize;

use crate::error::NavigationError;
use crate::models::{NotificationTarget, Page, Request, RequestStatus, ScheduleDay};

pub mod timeline;

/// Tabs of the requests page, by their display index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum RequestsTab {
    All,
    Pending,
    Approved,
    Rejected,
}

impl RequestsTab {
    pub const ALL: [RequestsTab; 4] = [
        RequestsTab::All,
        RequestsTab::Pending,
        RequestsTab::Approved,
        RequestsTab::Rejected,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    pub fn includes(self, request: &Request) -> bool {
        match self {
            RequestsTab::All => true,
            RequestsTab::Pending => request.status == RequestStatus::Pending,
            RequestsTab::Approved => request.status == RequestStatus::Approved,
            RequestsTab::Rejected => request.status == RequestStatus::Rejected,
        }
    }
}

/// The day shown on the day timeline, with the list it was picked from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectedDay {
    pub day: ScheduleDay,
    pub index: usize,
    pub schedule: Vec<ScheduleDay>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NavigationState {
    page: Page,
    requests_tab_index: usize,
    selected_day: Option<SelectedDay>,
}

impl Default for NavigationState {
    fn default() -> Self {
        Self {
            page: Page::Home,
            requests_tab_index: 0,
            selected_day: None,
        }
    }
}

impl NavigationState {
    pub fn page(&self) -> Page {
        self.page
    }

    /// Only meaningful while on the requests page.
    pub fn requests_tab_index(&self) -> usize {
        self.requests_tab_index
    }

    /// `Some` exactly when the page is the day timeline.
    pub fn selected_day(&self) -> Option<&SelectedDay> {
        self.selected_day.as_ref()
    }
}

/// UI events that move the user around the dashboard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavEvent {
    OpenPage(Page),
    OpenRequestsTab(usize),
    OpenDayTimeline {
        day: ScheduleDay,
        index: usize,
        schedule: Vec<ScheduleDay>,
    },
    CloseDayTimeline,
    Back,
}

impl From<NotificationTarget> for NavEvent {
    fn from(target: NotificationTarget) -> Self {
        match target {
            NotificationTarget::OpenPage { page } => NavEvent::OpenPage(page),
            NotificationTarget::OpenRequestsTab { index } => NavEvent::OpenRequestsTab(index),
        }
    }
}

#[derive(Debug, Default)]
pub struct NavigationCoordinator {
    state: NavigationState,
}

impl NavigationCoordinator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &NavigationState {
        &self.state
    }

    pub fn go_to(&mut self, page: Page) -> Result<(), NavigationError> {
        if page == Page::DayTimeline {
            return Err(NavigationError::DayRequired(page));
        }
        tracing::debug!(from = %self.state.page, to = %page, "navigate");
        self.state.page = page;
        self.state.selected_day = None;
        Ok(())
    }

    pub fn go_to_requests_tab(&mut self, tab_index: usize) {
        tracing::debug!(from = %self.state.page, tab = tab_index, "open requests tab");
        self.state.page = Page::Requests;
        self.state.requests_tab_index = tab_index;
        self.state.selected_day = None;
    }

    pub fn open_day_timeline(
        &mut self,
        day: ScheduleDay,
        index: usize,
        schedule: Vec<ScheduleDay>,
    ) -> Result<(), NavigationError> {
        match schedule.get(index) {
            None => {
                return Err(NavigationError::IndexOutOfRange {
                    index,
                    len: schedule.len(),
                })
            }
            Some(at) if *at != day => {
                return Err(NavigationError::DayMismatch { day_id: day.id, index })
            }
            Some(_) => {}
        }
        let mut seen = HashSet::new();
        if let Some(dup) = schedule.iter().find(|d| !seen.insert(d.id)) {
            return Err(NavigationError::DuplicateDayId(dup.id));
        }
        tracing::debug!(from = %self.state.page, day = day.id, index, "open day timeline");
        self.state.page = Page::DayTimeline;
        self.state.selected_day = Some(SelectedDay { day, index, schedule });
        Ok(())
    }

    pub fn close_day_timeline(&mut self) {
        tracing::debug!(from = %self.state.page, "close day timeline");
        self.state.page = Page::Schedule;
        self.state.selected_day = None;
    }

    /// Replaces the selected day with another day of the same schedule and
    /// returns its index. Re-selecting the current day keeps the index.
    /// The schedule itself is never modified.
    pub fn change_selected_day(&mut self, day: ScheduleDay) -> Result<usize, NavigationError> {
        let selected = self.selected_mut()?;
        let index = if selected.schedule.get(selected.index).map(|d| d.id) == Some(day.id) {
            selected.index
        } else {
            selected
                .schedule
                .iter()
                .position(|d| d.id == day.id)
                .ok_or(NavigationError::DayNotInSchedule(day.id))?
        };
        self.change_selected_day_at(index, day)
    }

    /// Selects `day` at a known position of the selected schedule.
    pub fn change_selected_day_at(
        &mut self,
        index: usize,
        day: ScheduleDay,
    ) -> Result<usize, NavigationError> {
        let selected = self.selected_mut()?;
        match selected.schedule.get(index) {
            None => {
                return Err(NavigationError::IndexOutOfRange {
                    index,
                    len: selected.schedule.len(),
                })
            }
            Some(at) if at.id != day.id => {
                return Err(NavigationError::DayMismatch { day_id: day.id, index })
            }
            Some(_) => {}
        }
        tracing::debug!(day = day.id, index, "selected day changed");
        selected.day = day;
        selected.index = index;
        Ok(index)
    }

    fn selected_mut(&mut self) -> Result<&mut SelectedDay, NavigationError> {
        let page = self.state.page;
        self.state
            .selected_day
            .as_mut()
            .ok_or(NavigationError::NotOnDayTimeline(page))
    }

    pub fn dispatch(&mut self, event: NavEvent) -> Result<(), NavigationError> {
        match event {
            NavEvent::OpenPage(page) => self.go_to(page),
            NavEvent::OpenRequestsTab(index) => {
                self.go_to_requests_tab(index);
                Ok(())
            }
            NavEvent::OpenDayTimeline { day, index, schedule } => {
                self.open_day_timeline(day, index, schedule)
            }
            NavEvent::CloseDayTimeline => {
                self.close_day_timeline();
                Ok(())
            }
            NavEvent::Back => match self.state.page {
                Page::DayTimeline => {
                    self.close_day_timeline();
                    Ok(())
                }
                Page::Home => Ok(()),
                _ => self.go_to(Page::Home),
            },
        }
    }
}
