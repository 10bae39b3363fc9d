use tracing::warn;

use crate::domain::{UserCreate, UserRecord, UserReplace};

/// In-memory, insertion-ordered collection of user records.
///
/// Ids are drawn from a count of every record ever created (seeds included),
/// so an id freed by a delete is never handed out again.
#[derive(Debug, Default)]
pub struct UserStore {
    records: Vec<UserRecord>,
    issued: u64,
}

impl UserStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_seed(seed: impl IntoIterator<Item = UserRecord>) -> Self {
        let mut store = Self::new();
        for record in seed {
            if store.position(&record.user_id).is_some() {
                warn!(user_id = %record.user_id, "Duplicate seed record ignored");
                continue;
            }
            store.records.push(record);
            store.issued += 1;
        }
        store
    }

    /// Assigns the next free id and appends the record. Returns the new id.
    pub fn insert(&mut self, payload: UserCreate) -> String {
        let id = self.next_id();
        self.records.push(UserRecord::from_create(id.clone(), payload));
        id
    }

    pub fn find_by_id(&self, id: &str) -> Option<&UserRecord> {
        self.records.iter().find(|record| record.user_id == id)
    }

    /// Overwrites every mutable field of the record, keeping its position.
    pub fn replace(&mut self, id: &str, replacement: UserReplace) -> Option<&UserRecord> {
        let index = self.position(id)?;
        let slot = &mut self.records[index];
        slot.name = replacement.name;
        slot.email = replacement.email;
        Some(&*slot)
    }

    /// Removes the record and hands it back so callers keep its last state.
    pub fn remove_by_id(&mut self, id: &str) -> Option<UserRecord> {
        let index = self.position(id)?;
        Some(self.records.remove(index))
    }

    pub fn list_all(&self) -> Vec<UserRecord> {
        self.records.clone()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[allow(dead_code)]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.records.iter().position(|record| record.user_id == id)
    }

    // Seeds may already occupy numeric ids ahead of the counter.
    fn next_id(&mut self) -> String {
        loop {
            self.issued += 1;
            let candidate = self.issued.to_string();
            if self.position(&candidate).is_none() {
                return candidate;
            }
        }
    }
}
