// src/navigation/timeline.rs
//
// Stepping through the schedule from the day timeline page. Every move is
// reported to the coordinator so both sides agree on the selected day.

use crate::error::NavigationError;
use crate::models::ScheduleDay;

use super::NavigationCoordinator;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Boundary {
    Start,
    End,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    Moved(ScheduleDay),
    /// Nothing further in that direction; the index did not change.
    Boundary(Boundary),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Direction {
    Previous,
    Next,
}

#[derive(Debug, Clone)]
pub struct DayTimelineSelector {
    schedule: Vec<ScheduleDay>,
    index: usize,
}

impl DayTimelineSelector {
    pub fn new(schedule: Vec<ScheduleDay>, index: usize) -> Result<Self, NavigationError> {
        if index >= schedule.len() {
            return Err(NavigationError::IndexOutOfRange {
                index,
                len: schedule.len(),
            });
        }
        Ok(Self { schedule, index })
    }

    /// Selector positioned on the coordinator's selected day.
    pub fn attach(nav: &NavigationCoordinator) -> Result<Self, NavigationError> {
        let state = nav.state();
        let selected = state
            .selected_day()
            .ok_or(NavigationError::NotOnDayTimeline(state.page()))?;
        Self::new(selected.schedule.clone(), selected.index)
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn len(&self) -> usize {
        self.schedule.len()
    }

    pub fn is_empty(&self) -> bool {
        self.schedule.is_empty()
    }

    pub fn current(&self) -> &ScheduleDay {
        &self.schedule[self.index]
    }

    pub fn has_next(&self) -> bool {
        self.index + 1 < self.schedule.len()
    }

    pub fn has_previous(&self) -> bool {
        self.index > 0
    }

    pub fn next(&mut self, nav: &mut NavigationCoordinator) -> Result<Step, NavigationError> {
        self.step(Direction::Next, nav)
    }

    pub fn previous(&mut self, nav: &mut NavigationCoordinator) -> Result<Step, NavigationError> {
        self.step(Direction::Previous, nav)
    }

    pub fn step(
        &mut self,
        direction: Direction,
        nav: &mut NavigationCoordinator,
    ) -> Result<Step, NavigationError> {
        self.check_in_sync(nav)?;

        let target = match direction {
            Direction::Next if self.has_next() => self.index + 1,
            Direction::Next => return Ok(Step::Boundary(Boundary::End)),
            Direction::Previous if self.has_previous() => self.index - 1,
            Direction::Previous => return Ok(Step::Boundary(Boundary::Start)),
        };

        let day = self.schedule[target].clone();
        self.index = nav.change_selected_day_at(target, day.clone())?;
        Ok(Step::Moved(day))
    }

    fn check_in_sync(&self, nav: &NavigationCoordinator) -> Result<(), NavigationError> {
        let state = nav.state();
        let selected = state
            .selected_day()
            .ok_or(NavigationError::NotOnDayTimeline(state.page()))?;
        let same_days = selected
            .schedule
            .iter()
            .map(|d| d.id)
            .eq(self.schedule.iter().map(|d| d.id));
        if selected.index != self.index || !same_days {
            return Err(NavigationError::SelectorOutOfSync);
        }
        Ok(())
    }
}
