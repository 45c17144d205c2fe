use std::collections::HashSet;

use serde_json::json;
use tempfile::TempDir;

use wfm_dashboard::config::Config;
use wfm_dashboard::db::{FileStore, MemoryStore};
use wfm_dashboard::error::NavigationError;
use wfm_dashboard::models::{Page, Payload, RequestStatus, RequestType};
use wfm_dashboard::navigation::timeline::{Boundary, DayTimelineSelector, Direction, Step};
use wfm_dashboard::navigation::RequestsTab;
use wfm_dashboard::store::{seed, EntityStore, LoadOutcome};
use wfm_dashboard::AppState;

fn payload(v: serde_json::Value) -> Payload {
    v.as_object().cloned().unwrap_or_default()
}

fn file_state(dir: &TempDir) -> AppState {
    let storage = FileStore::open(dir.path()).unwrap();
    let store = EntityStore::new(Box::new(storage), "wfm_requests", seed::reference_data());
    let mut state = AppState::new(store);
    state.load();
    state
}

fn assert_selection_invariant(state: &AppState) {
    let nav = state.navigation.state();
    assert_eq!(nav.selected_day().is_some(), nav.page() == Page::DayTimeline);
}

#[test]
fn vacation_request_is_pending_and_listed_first() {
    let mut state = AppState::new(EntityStore::new(
        Box::new(MemoryStore::new()),
        "wfm_requests",
        seed::reference_data(),
    ));
    state.load();
    state
        .store
        .submit_request(RequestType::Dispute, payload(json!({"evidence": "call-77"})));

    let out = state.store.submit_request(
        RequestType::Vacation,
        payload(json!({"startDate": "2024-02-10", "endDate": "2024-02-12"})),
    );

    assert!(out.warning.is_none());
    assert_eq!(out.request.status, RequestStatus::Pending);
    assert_eq!(out.request.kind, RequestType::Vacation);
    assert_eq!(state.store.list_requests()[0], out.request);

    let wire = serde_json::to_value(&out.request).unwrap();
    assert_eq!(wire["status"], "Pending");
    assert_eq!(wire["type"], "Vacation");
    assert_eq!(wire["startDate"], "2024-02-10");
    assert!(wire["id"].is_u64());
}

#[test]
fn rapid_submissions_get_distinct_ids_newest_first() {
    let dir = TempDir::new().unwrap();
    let mut state = file_state(&dir);

    let mut submitted = Vec::new();
    for i in 0..50 {
        let kind = if i % 2 == 0 {
            RequestType::ShiftSwap
        } else {
            RequestType::Vacation
        };
        submitted.push(state.store.submit_request(kind, Payload::new()).request.id);
    }

    let unique: HashSet<u64> = submitted.iter().copied().collect();
    assert_eq!(unique.len(), submitted.len());
    assert!(submitted.windows(2).all(|w| w[0] < w[1]));

    let listed: Vec<u64> = state.store.list_requests().iter().map(|r| r.id).collect();
    submitted.reverse();
    assert_eq!(listed, submitted);
}

#[test]
fn requests_survive_a_restart() {
    let dir = TempDir::new().unwrap();
    let before = {
        let mut state = file_state(&dir);
        state.store.submit_request(
            RequestType::Vacation,
            payload(json!({"startDate": "2024-02-10", "endDate": "2024-02-12"})),
        );
        state.store.submit_request(
            RequestType::ShiftSwap,
            payload(json!({"targetShift": "Thu 15", "reason": "exam"})),
        );
        state.store.list_requests().to_vec()
    };

    let mut restarted = file_state(&dir);
    assert_eq!(restarted.store.list_requests(), before.as_slice());

    // ids keep increasing past what was reloaded
    let newest = restarted
        .store
        .submit_request(RequestType::Dispute, Payload::new())
        .request;
    assert!(before.iter().all(|r| r.id < newest.id));
}

#[test]
fn corrupt_file_starts_empty() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("wfm_requests.json"), "[{\"id\":").unwrap();

    let storage = FileStore::open(dir.path()).unwrap();
    let mut store = EntityStore::new(Box::new(storage), "wfm_requests", seed::reference_data());
    assert!(matches!(store.load_from_persistence(), LoadOutcome::Recovered(_)));
    assert!(store.list_requests().is_empty());

    // the next submit overwrites the corrupt record
    store.submit_request(RequestType::Vacation, Payload::new());
    let reopened = file_state(&dir);
    assert_eq!(reopened.store.list_requests().len(), 1);
}

#[test]
fn reads_are_stable_without_mutation() {
    let dir = TempDir::new().unwrap();
    let mut state = file_state(&dir);
    state.store.submit_request(RequestType::Vacation, Payload::new());

    assert_eq!(state.store.list_requests(), state.store.list_requests());
    assert_eq!(state.store.schedule(), state.store.schedule());
    assert_eq!(state.store.schedule(), seed::schedule().as_slice());
    assert_eq!(state.store.kpis(), seed::kpis().as_slice());
    assert_eq!(state.store.user(), &seed::user());
}

#[test]
fn pending_notification_opens_pending_tab() {
    let dir = TempDir::new().unwrap();
    let mut state = file_state(&dir);

    state.navigation.go_to_requests_tab(2);
    assert_eq!(state.navigation.state().page(), Page::Requests);
    assert_eq!(state.navigation.state().requests_tab_index(), 2);

    state.navigation.go_to(Page::Home).unwrap();
    state.open_notification(1).unwrap();
    assert_eq!(state.navigation.state().page(), Page::Requests);
    assert_eq!(
        state.navigation.state().requests_tab_index(),
        RequestsTab::Pending.index()
    );

    assert_eq!(
        state.open_notification(404),
        Err(NavigationError::UnknownNotification(404))
    );
    assert_eq!(state.navigation.state().page(), Page::Requests);
}

#[test]
fn open_then_close_day_timeline() {
    let dir = TempDir::new().unwrap();
    let mut state = file_state(&dir);
    let schedule = state.store.schedule().to_vec();

    state
        .navigation
        .open_day_timeline(schedule[1].clone(), 1, schedule.clone())
        .unwrap();
    assert_selection_invariant(&state);
    assert_eq!(state.navigation.state().selected_day().unwrap().day, schedule[1]);

    state.navigation.close_day_timeline();
    assert_eq!(state.navigation.state().page(), Page::Schedule);
    assert!(state.navigation.state().selected_day().is_none());
}

#[test]
fn previous_on_first_day_stays_put() {
    let schedule: Vec<_> = seed::schedule().into_iter().take(4).collect();
    let mut state = AppState::new(EntityStore::new(
        Box::new(MemoryStore::new()),
        "wfm_requests",
        seed::reference_data(),
    ));
    state
        .navigation
        .open_day_timeline(schedule[0].clone(), 0, schedule.clone())
        .unwrap();
    let mut selector = DayTimelineSelector::attach(&state.navigation).unwrap();

    assert_eq!(
        selector.previous(&mut state.navigation),
        Ok(Step::Boundary(Boundary::Start))
    );
    assert_eq!(selector.index(), 0);
    assert_eq!(selector.current(), &schedule[0]);
    assert_eq!(state.navigation.state().selected_day().unwrap().index, 0);
}

#[test]
fn stepping_through_the_week_keeps_navigation_in_step() {
    let dir = TempDir::new().unwrap();
    let mut state = file_state(&dir);
    let len = state.store.schedule().len();

    state.open_schedule_day(0).unwrap();
    for expected in 1..len {
        match state.step_day(Direction::Next).unwrap() {
            Step::Moved(day) => {
                let selected = state.navigation.state().selected_day().unwrap();
                assert_eq!(selected.index, expected);
                assert_eq!(selected.day, day);
            }
            Step::Boundary(b) => panic!("hit {b:?} early at {expected}"),
        }
        assert_selection_invariant(&state);
    }
    assert_eq!(
        state.step_day(Direction::Next),
        Ok(Step::Boundary(Boundary::End))
    );
    assert_eq!(state.navigation.state().selected_day().unwrap().index, len - 1);

    state.navigation.go_to(Page::Performance).unwrap();
    assert_selection_invariant(&state);
    assert_eq!(
        state.step_day(Direction::Previous),
        Err(NavigationError::NotOnDayTimeline(Page::Performance))
    );
    assert_eq!(
        state.open_schedule_day(len),
        Err(NavigationError::IndexOutOfRange { index: len, len })
    );
}

#[test]
fn quota_exceeded_is_a_warning_not_a_failure() {
    let dir = TempDir::new().unwrap();
    let config = Config {
        data_dir: dir.path().to_path_buf(),
        storage_quota_bytes: Some(32),
        ..Config::default()
    };
    let mut state = AppState::from_config(&config).unwrap();

    let out = state.store.submit_request(
        RequestType::Vacation,
        payload(json!({"startDate": "2024-02-10", "endDate": "2024-02-12"})),
    );
    assert!(out.warning.is_some());
    assert_eq!(state.store.list_requests().len(), 1);
    assert_eq!(state.store.list_requests_for_tab(RequestsTab::Pending).len(), 1);
}

#[test]
fn quota_keeps_storage_durable() {
    let dir = TempDir::new().unwrap();
    let config = Config {
        data_dir: dir.path().to_path_buf(),
        storage_quota_bytes: Some(64 * 1024),
        ..Config::default()
    };
    let submitted = {
        let mut state = AppState::from_config(&config).unwrap();
        let out = state.store.submit_request(
            RequestType::ShiftSwap,
            payload(json!({"targetShift": "Wed 14", "reason": "appointment"})),
        );
        assert!(out.warning.is_none());
        out.request
    };

    let restarted = AppState::from_config(&config).unwrap();
    assert_eq!(restarted.store.list_requests(), std::slice::from_ref(&submitted));
}

#[test]
fn record_from_an_older_build_is_not_lost() {
    let dir = TempDir::new().unwrap();
    let older = json!([{"id": 7, "type": "Vacation", "status": "Approved", "startDate": "2024-01-01"}]);
    std::fs::write(dir.path().join("wfm_requests.json"), older.to_string()).unwrap();

    let mut state = file_state(&dir);
    state.store.submit_request(RequestType::Dispute, Payload::new());
    assert_eq!(state.store.list_requests()[1].id, 7);

    let restarted = file_state(&dir);
    let kept = &restarted.store.list_requests()[1];
    assert_eq!((kept.id, kept.status, kept.date), (7, RequestStatus::Approved, None));
    assert_eq!(kept.payload["startDate"], "2024-01-01");
}
