// src/store/mod.rs

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::db::KeyValueStore;
use crate::error::{PersistenceReadError, PersistenceWriteError, ReferenceDataError};
use crate::models::{
    Kpi, Notification, Payload, Request, RequestStatus, RequestType, ScheduleDay, UserProfile,
    RESERVED_KEYS,
};
use crate::navigation::RequestsTab;

pub mod seed;

// ───────────────────────────────────────
// Reference data
// ───────────────────────────────────────
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReferenceData {
    pub schedule: Vec<ScheduleDay>,
    pub kpis: Vec<Kpi>,
    pub user: UserProfile,
    #[serde(default)]
    pub notifications: Vec<Notification>,
}

impl ReferenceData {
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ReferenceDataError> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|source| ReferenceDataError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let data: Self = serde_json::from_str(&raw).map_err(|source| ReferenceDataError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        let mut seen = HashSet::new();
        if let Some(day) = data.schedule.iter().find(|d| !seen.insert(d.id)) {
            return Err(ReferenceDataError::DuplicateDayId {
                path: path.to_path_buf(),
                id: day.id,
            });
        }
        Ok(data)
    }
}

// ───────────────────────────────────────
// Ids
// ───────────────────────────────────────

/// Millisecond-timestamp ids, bumped past the previous id when the clock
/// has not moved (or moved backwards). Ids already handed out or loaded are
/// never issued again; once `u64::MAX` is used the generator restarts from
/// the clock and skips taken ids.
#[derive(Debug, Clone, Default)]
pub struct IdGenerator {
    last: Option<u64>,
    taken: HashSet<u64>,
}

impl IdGenerator {
    pub fn seeded(taken: impl IntoIterator<Item = u64>) -> Self {
        let taken: HashSet<u64> = taken.into_iter().collect();
        Self {
            last: taken.iter().max().copied(),
            taken,
        }
    }

    pub fn next_at(&mut self, now: DateTime<Utc>) -> u64 {
        let millis = u64::try_from(now.timestamp_millis()).unwrap_or(0);
        let mut id = match self.last {
            None => millis,
            Some(last) => match last.checked_add(1) {
                Some(after) => millis.max(after),
                None => millis,
            },
        };
        while self.taken.contains(&id) {
            id = id.wrapping_add(1);
        }
        self.taken.insert(id);
        self.last = Some(id);
        id
    }

    pub fn next_id(&mut self) -> u64 {
        self.next_at(Utc::now())
    }
}

// ───────────────────────────────────────
// Store
// ───────────────────────────────────────

/// Result of `load_from_persistence`. Never a failure.
#[derive(Debug)]
pub enum LoadOutcome {
    /// Nothing stored under the key yet.
    Empty,
    /// `unreadable` records are not listed but are written back on every save.
    Restored { loaded: usize, unreadable: usize },
    /// Stored state was unusable; the store started empty.
    Recovered(PersistenceReadError),
}

#[derive(Debug)]
pub struct Submitted {
    pub request: Request,
    /// Set when the request is only held in memory.
    pub warning: Option<PersistenceWriteError>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RequestCounts {
    pub pending: usize,
    pub approved: usize,
    pub rejected: usize,
}

pub struct EntityStore {
    requests: Vec<Request>,
    unreadable: Vec<serde_json::Value>,
    ids: IdGenerator,
    storage: Box<dyn KeyValueStore>,
    storage_key: String,
    reference: ReferenceData,
}

impl EntityStore {
    pub fn new(
        storage: Box<dyn KeyValueStore>,
        storage_key: impl Into<String>,
        reference: ReferenceData,
    ) -> Self {
        Self {
            requests: Vec::new(),
            unreadable: Vec::new(),
            ids: IdGenerator::default(),
            storage,
            storage_key: storage_key.into(),
            reference,
        }
    }

    pub fn load_from_persistence(&mut self) -> LoadOutcome {
        self.requests.clear();
        self.unreadable.clear();
        let outcome = match self.read_persisted() {
            Ok(None) => LoadOutcome::Empty,
            Ok(Some(decoded)) => {
                let loaded = decoded.requests.len();
                let unreadable = decoded.unreadable.len();
                self.requests = decoded.requests;
                self.unreadable = decoded.unreadable;
                LoadOutcome::Restored { loaded, unreadable }
            }
            Err(e) => {
                tracing::warn!(key = %self.storage_key, error = %e, "discarding stored requests");
                LoadOutcome::Recovered(e)
            }
        };

        let taken = self
            .requests
            .iter()
            .map(|r| r.id)
            .chain(self.unreadable.iter().filter_map(raw_id));
        self.ids = IdGenerator::seeded(taken);
        tracing::info!(
            requests = self.requests.len(),
            unreadable = self.unreadable.len(),
            "request store loaded"
        );
        outcome
    }

    fn read_persisted(&self) -> Result<Option<Decoded>, PersistenceReadError> {
        match self.storage.get(&self.storage_key)? {
            None => Ok(None),
            Some(bytes) => decode_requests(&bytes).map(Some),
        }
    }

    pub fn submit_request(&mut self, kind: RequestType, mut payload: Payload) -> Submitted {
        for key in RESERVED_KEYS {
            if payload.remove(key).is_some() {
                tracing::warn!(field = key, "ignoring reserved field in request payload");
            }
        }

        let now = Utc::now();
        let request = Request {
            id: self.ids.next_at(now),
            kind,
            status: RequestStatus::Pending,
            date: Some(now),
            payload,
        };
        self.requests.insert(0, request.clone());
        tracing::info!(id = request.id, kind = %request.kind, "request submitted");

        let warning = self.persist().err();
        if let Some(e) = &warning {
            tracing::warn!(id = request.id, error = %e, "request kept in memory only");
        }
        Submitted { request, warning }
    }

    fn persist(&mut self) -> Result<(), PersistenceWriteError> {
        let mut records = Vec::with_capacity(self.requests.len() + self.unreadable.len());
        for request in &self.requests {
            records.push(serde_json::to_value(request)?);
        }
        records.extend(self.unreadable.iter().cloned());
        let bytes = serde_json::to_vec(&records)?;
        self.storage.set(&self.storage_key, &bytes)?;
        Ok(())
    }

    /// Most recent first.
    pub fn list_requests(&self) -> &[Request] {
        &self.requests
    }

    pub fn list_requests_for_tab(&self, tab: RequestsTab) -> Vec<&Request> {
        self.requests.iter().filter(|r| tab.includes(r)).collect()
    }

    pub fn list_requests_of_type(&self, kind: &RequestType) -> Vec<&Request> {
        self.requests.iter().filter(|r| &r.kind == kind).collect()
    }

    pub fn request_counts(&self) -> RequestCounts {
        self.requests
            .iter()
            .fold(RequestCounts::default(), |mut c, r| {
                match r.status {
                    RequestStatus::Pending => c.pending += 1,
                    RequestStatus::Approved => c.approved += 1,
                    RequestStatus::Rejected => c.rejected += 1,
                }
                c
            })
    }

    pub fn schedule(&self) -> &[ScheduleDay] {
        &self.reference.schedule
    }

    pub fn kpis(&self) -> &[Kpi] {
        &self.reference.kpis
    }

    pub fn user(&self) -> &UserProfile {
        &self.reference.user
    }

    pub fn notifications(&self) -> &[Notification] {
        &self.reference.notifications
    }

    pub fn notification(&self, id: i64) -> Option<&Notification> {
        self.reference.notifications.iter().find(|n| n.id == id)
    }
}

struct Decoded {
    requests: Vec<Request>,
    unreadable: Vec<serde_json::Value>,
}

fn raw_id(value: &serde_json::Value) -> Option<u64> {
    value.get("id").and_then(serde_json::Value::as_u64)
}

/// Decodes the stored array record by record. Records that no longer fit
/// the model (or repeat an id) are kept verbatim instead of failing the load.
fn decode_requests(bytes: &[u8]) -> Result<Decoded, PersistenceReadError> {
    let raw: Vec<serde_json::Value> = serde_json::from_slice(bytes)?;
    let mut seen = HashSet::new();
    let mut decoded = Decoded {
        requests: Vec::with_capacity(raw.len()),
        unreadable: Vec::new(),
    };

    for (pos, value) in raw.into_iter().enumerate() {
        match serde_json::from_value::<Request>(value.clone()) {
            Ok(req) if seen.insert(req.id) => decoded.requests.push(req),
            Ok(req) => {
                tracing::warn!(pos, id = req.id, "keeping duplicate stored request unlisted");
                decoded.unreadable.push(value);
            }
            Err(e) => {
                tracing::warn!(pos, error = %e, "keeping unreadable stored request unlisted");
                decoded.unreadable.push(value);
            }
        }
    }
    Ok(decoded)
}
