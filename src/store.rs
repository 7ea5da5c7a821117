//! Block-list state and mode policy.
//!
//! All of the rule's mutable state lives here: the blocked-name set, the
//! opportunistic name → user-id index, the observed room-position indexes,
//! and the rewrite mode. Names are case-insensitive and [`block_key`] is
//! the single normalization point, applied at every boundary so membership
//! tests, id tracking and persistence can never disagree on case.

use std::collections::{HashMap, HashSet};
use std::fmt;

use tracing::{debug, warn};

use crate::storage::{Storage, Value};

/// Storage key for the persisted mode name.
const MODE_KEY: &str = "MODE";
/// Storage key for the persisted block list.
const BLOCKS_KEY: &str = "BLOCKS";

/// Canonical form of a user name for block-list purposes.
///
/// Every membership test, insertion and id-index key goes through this one
/// function. Name equality on this key is the only blocking criterion; no
/// identity check ties a name to an account beyond it.
pub fn block_key(name: &str) -> String {
    name.to_lowercase()
}

/// Rewrite policy for blocked users in room lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Blocked users are removed from room lists entirely.
    #[default]
    Invisible,
    /// Blocked users stay in room lists with their identity stripped.
    Ghost,
}

impl Mode {
    /// Persisted / display name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Invisible => "Invisible",
            Self::Ghost => "Ghost",
        }
    }

    /// Parse a mode name, case-insensitively.
    pub fn parse(s: &str) -> Option<Self> {
        if s.eq_ignore_ascii_case("invisible") {
            Some(Self::Invisible)
        } else if s.eq_ignore_ascii_case("ghost") {
            Some(Self::Ghost)
        } else {
            None
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Block-list state with synchronous best-effort persistence.
///
/// Mutations persist before returning; a storage failure is logged and the
/// in-memory state stands (the next successful write resynchronizes).
pub struct BlockStore {
    blocked: HashSet<String>,
    ids: HashMap<String, i32>,
    room_indexes: HashSet<i32>,
    mode: Mode,
    storage: Box<dyn Storage + Send>,
}

impl BlockStore {
    /// Open the store, hydrating the block list and mode from storage.
    ///
    /// A missing key means first run; a read failure is logged and treated
    /// as empty.
    pub fn open(storage: Box<dyn Storage + Send>) -> Self {
        let mut store = Self {
            blocked: HashSet::new(),
            ids: HashMap::new(),
            room_indexes: HashSet::new(),
            mode: Mode::default(),
            storage,
        };
        store.hydrate();
        store
    }

    fn hydrate(&mut self) {
        match self.storage.get(MODE_KEY) {
            Ok(Some(Value::Text(name))) => match Mode::parse(&name) {
                Some(mode) => self.mode = mode,
                None => warn!(value = %name, "ignoring unrecognized persisted mode"),
            },
            Ok(Some(Value::List(_))) => {
                warn!("persisted mode has the wrong shape, using default");
            }
            Ok(None) => {}
            Err(e) => warn!(error = %e, "failed to read persisted mode"),
        }

        match self.storage.get(BLOCKS_KEY) {
            Ok(Some(Value::List(names))) => {
                self.blocked = names.iter().map(|n| block_key(n)).collect();
                debug!(count = self.blocked.len(), "hydrated block list");
            }
            Ok(Some(Value::Text(_))) => {
                warn!("persisted block list has the wrong shape, starting empty");
            }
            Ok(None) => {}
            Err(e) => warn!(error = %e, "failed to read persisted block list"),
        }
    }

    /// Add a name to the block list. Returns `false` if it was already
    /// there. Persists either way.
    pub fn block(&mut self, name: &str) -> bool {
        let added = self.blocked.insert(block_key(name));
        self.persist_blocks();
        added
    }

    /// Remove a name from the block list, along with its cached id.
    /// Returns `false` if it was not blocked.
    pub fn unblock(&mut self, name: &str) -> bool {
        let key = block_key(name);
        let removed = self.blocked.remove(&key);
        self.ids.remove(&key);
        self.persist_blocks();
        removed
    }

    /// Case-insensitive membership test.
    pub fn is_blocked(&self, name: &str) -> bool {
        self.blocked.contains(&block_key(name))
    }

    /// True if `id` is the last-observed id of any blocked name.
    ///
    /// Absence only means the user has not been seen in a room list since
    /// start; callers let the packet pass in that case.
    pub fn is_blocked_id(&self, id: i32) -> bool {
        self.ids.values().any(|&known| known == id)
    }

    /// Snapshot of the blocked names in stable (sorted) order.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.blocked.iter().cloned().collect();
        names.sort();
        names
    }

    /// Record a room-list sighting of a blocked user.
    ///
    /// The id index holds entries only for currently blocked names, so
    /// sightings of anyone else are ignored. The latest sighting wins.
    pub fn record_sighting(&mut self, name: &str, id: i32, room_index: i32) {
        let key = block_key(name);
        if !self.blocked.contains(&key) {
            return;
        }
        self.room_indexes.insert(room_index);
        self.ids.insert(key, id);
    }

    /// Last-observed id for a name, if it is blocked and has been seen.
    pub fn known_id(&self, name: &str) -> Option<i32> {
        self.ids.get(&block_key(name)).copied()
    }

    /// Room-position indexes observed for blocked users.
    pub fn room_indexes(&self) -> &HashSet<i32> {
        &self.room_indexes
    }

    /// Current rewrite mode.
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Switch the rewrite mode and persist it.
    pub fn set_mode(&mut self, mode: Mode) {
        self.mode = mode;
        if let Err(e) = self
            .storage
            .put(MODE_KEY, Value::Text(mode.as_str().to_string()))
        {
            warn!(error = %e, mode = %mode, "failed to persist mode");
        }
    }

    fn persist_blocks(&mut self) {
        let names = self.names();
        if let Err(e) = self.storage.put(BLOCKS_KEY, Value::List(names)) {
            warn!(error = %e, "failed to persist block list");
        }
    }
}
