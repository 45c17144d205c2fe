// src/store/seed.rs
//
// Built-in reference data used when no reference file is configured.

use crate::models::{
    DayStatus, Kpi, KpiStatus, Notification, NotificationTarget, Page, ScheduleDay, UserProfile,
};
use crate::navigation::RequestsTab;

use super::ReferenceData;

pub fn reference_data() -> ReferenceData {
    ReferenceData {
        schedule: schedule(),
        kpis: kpis(),
        user: user(),
        notifications: notifications(),
    }
}

fn day(id: i64, date: &str, shift: &str, activity: &str, status: DayStatus) -> ScheduleDay {
    ScheduleDay {
        id,
        date: date.to_string(),
        shift: shift.to_string(),
        activity: activity.to_string(),
        status,
    }
}

pub fn schedule() -> Vec<ScheduleDay> {
    vec![
        day(1, "Mon 12", "08:00 - 16:00", "Inbound calls", DayStatus::Active),
        day(2, "Tue 13", "08:00 - 16:00", "Inbound calls", DayStatus::Upcoming),
        day(3, "Wed 14", "10:00 - 18:00", "Email queue", DayStatus::Upcoming),
        day(4, "Thu 15", "10:00 - 18:00", "Training", DayStatus::Upcoming),
        day(5, "Fri 16", "08:00 - 16:00", "Chat support", DayStatus::Upcoming),
        day(6, "Sat 17", "Off", "Rest day", DayStatus::Off),
        day(7, "Sun 18", "Off", "Rest day", DayStatus::Off),
    ]
}

fn kpi(label: &str, value: &str, target: &str, status: KpiStatus) -> Kpi {
    Kpi {
        label: label.to_string(),
        value: value.to_string(),
        target: target.to_string(),
        status,
    }
}

pub fn kpis() -> Vec<Kpi> {
    vec![
        kpi("Adherence", "94%", "92%", KpiStatus::Success),
        kpi("Average handle time", "6m 10s", "5m 30s", KpiStatus::Warning),
        kpi("Customer satisfaction", "4.6", "4.5", KpiStatus::Success),
        kpi("First contact resolution", "68%", "75%", KpiStatus::Danger),
    ]
}

pub fn user() -> UserProfile {
    UserProfile {
        name: "Alex Morgan".to_string(),
        role: "Customer Service Agent".to_string(),
        avatar_ref: "avatars/alex-morgan.png".to_string(),
    }
}

pub fn notifications() -> Vec<Notification> {
    vec![
        Notification {
            id: 1,
            title: "Request awaiting approval".to_string(),
            message: "Your vacation request is pending review.".to_string(),
            target: NotificationTarget::OpenRequestsTab {
                index: RequestsTab::Pending.index(),
            },
        },
        Notification {
            id: 2,
            title: "Shift swap approved".to_string(),
            message: "Your shift swap for Thu 15 was approved.".to_string(),
            target: NotificationTarget::OpenRequestsTab {
                index: RequestsTab::Approved.index(),
            },
        },
        Notification {
            id: 3,
            title: "Coaching session scheduled".to_string(),
            message: "A coaching session was added to your week.".to_string(),
            target: NotificationTarget::OpenPage { page: Page::Coaching },
        },
    ]
}
