//! Packet interception handlers and dispatch.
//!
//! The host proxy registers one callback per intercepted packet type and
//! direction; each callback resolves to a [`PacketKind`] and lands in
//! [`Interceptor::intercept`]. The intercepted set is a closed enum rather
//! than runtime string lookup, so a typo in a packet-type name cannot
//! survive compilation and registration can be validated at startup
//! against [`PacketKind::ALL`].

mod friend_request;
mod lookups;
mod room_users;

use hotel_proto::{Direction, Message, ProtoError};
use parking_lot::Mutex;
use tracing::{debug, warn};

use crate::config::Config;
use crate::console::ConsoleCommand;
use crate::error::CommandError;
use crate::outbound::{Directive, OutboundSink};
use crate::storage::{JsonFileStorage, StorageError};
use crate::store::{BlockStore, Mode};

/// The packet types this rule intercepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PacketKind {
    /// Server → client room user list.
    RoomUsers,
    /// Client → server badge lookup on a profile.
    GetSelectedBadges,
    /// Client → server relationship lookup on a profile.
    GetRelationshipStatusInfo,
    /// Client → server extended profile lookup.
    GetExtendedProfile,
    /// Client → server group details lookup.
    GetHabboGroupDetails,
    /// Server → client incoming friend request.
    NewFriendRequest,
}

impl PacketKind {
    /// Every intercepted packet type, for host registration at startup.
    pub const ALL: [PacketKind; 6] = [
        PacketKind::RoomUsers,
        PacketKind::GetSelectedBadges,
        PacketKind::GetRelationshipStatusInfo,
        PacketKind::GetExtendedProfile,
        PacketKind::GetHabboGroupDetails,
        PacketKind::NewFriendRequest,
    ];

    /// Wire name of the packet type.
    pub fn name(self) -> &'static str {
        match self {
            Self::RoomUsers => "Users",
            Self::GetSelectedBadges => "GetSelectedBadges",
            Self::GetRelationshipStatusInfo => "GetRelationshipStatusInfo",
            Self::GetExtendedProfile => "GetExtendedProfile",
            Self::GetHabboGroupDetails => "GetHabboGroupDetails",
            Self::NewFriendRequest => "NewFriendRequest",
        }
    }

    /// Direction this packet type travels.
    pub fn direction(self) -> Direction {
        match self {
            Self::RoomUsers | Self::NewFriendRequest => Direction::ToClient,
            Self::GetSelectedBadges
            | Self::GetRelationshipStatusInfo
            | Self::GetExtendedProfile
            | Self::GetHabboGroupDetails => Direction::ToServer,
        }
    }

    /// Resolve a registration back to a kind.
    ///
    /// `None` for packet types this rule does not intercept, including a
    /// known name travelling in the wrong direction.
    pub fn from_name(name: &str, direction: Direction) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.name() == name && kind.direction() == direction)
    }
}

struct Inner {
    store: BlockStore,
    sink: Box<dyn OutboundSink + Send>,
}

/// The interception/decision core.
///
/// Owns all mutable state behind one lock: packet callbacks and operator
/// commands may arrive on different host threads, and every decision must
/// see a consistent block list.
pub struct Interceptor {
    inner: Mutex<Inner>,
}

impl Interceptor {
    /// Create the core from an opened block store and an outbound sink.
    pub fn new(store: BlockStore, sink: Box<dyn OutboundSink + Send>) -> Self {
        Self {
            inner: Mutex::new(Inner { store, sink }),
        }
    }

    /// Create the core with file-backed storage from configuration.
    pub fn from_config(
        config: &Config,
        sink: Box<dyn OutboundSink + Send>,
    ) -> Result<Self, StorageError> {
        let storage = JsonFileStorage::open(config.storage.path.clone())?;
        Ok(Self::new(BlockStore::open(Box::new(storage)), sink))
    }

    /// Handle one intercepted message.
    ///
    /// On a decode error the message is left unblocked and unmodified and
    /// the error goes back to the host: a failed blocking decision must
    /// not break the user's connection.
    pub fn intercept(&self, kind: PacketKind, msg: &mut Message) -> Result<(), ProtoError> {
        let mut inner = self.inner.lock();
        let result = match kind {
            PacketKind::RoomUsers => room_users::handle(&mut inner.store, msg),
            PacketKind::GetSelectedBadges
            | PacketKind::GetRelationshipStatusInfo
            | PacketKind::GetExtendedProfile
            | PacketKind::GetHabboGroupDetails => lookups::handle(&inner.store, msg),
            PacketKind::NewFriendRequest => friend_request::handle(&inner.store, msg),
        };
        if let Err(ref e) = result {
            warn!(packet = kind.name(), error = %e, "packet left untouched after decode error");
        }
        result
    }

    /// Block a user: remember the name, engage the game-side ignore,
    /// persist.
    pub fn block(&self, name: &str) {
        let mut inner = self.inner.lock();
        inner.store.block(name);
        inner.sink.send(Directive::IgnoreUser(name.to_string()));
        debug!(name = %name, "blocked user");
    }

    /// Unblock a user and lift the game-side ignore.
    pub fn unblock(&self, name: &str) {
        let mut inner = self.inner.lock();
        inner.store.unblock(name);
        inner.sink.send(Directive::UnignoreUser(name.to_string()));
        debug!(name = %name, "unblocked user");
    }

    /// Case-insensitive block-list membership.
    pub fn is_blocked(&self, name: &str) -> bool {
        self.inner.lock().store.is_blocked(name)
    }

    /// Snapshot of blocked names in display order.
    pub fn blocked_names(&self) -> Vec<String> {
        self.inner.lock().store.names()
    }

    /// Current rewrite mode.
    pub fn mode(&self) -> Mode {
        self.inner.lock().store.mode()
    }

    /// Switch the rewrite mode.
    pub fn set_mode(&self, mode: Mode) {
        self.inner.lock().store.set_mode(mode);
    }

    /// Parse and run one operator console line, returning the reply text.
    pub fn run_command(&self, line: &str) -> Result<String, CommandError> {
        match ConsoleCommand::parse(line)? {
            ConsoleCommand::Block(name) => {
                self.block(&name);
                Ok(format!("You successfully blocked: {name}"))
            }
            ConsoleCommand::Unblock(name) => {
                self.unblock(&name);
                Ok(format!("You successfully unblocked: {name}"))
            }
            ConsoleCommand::ListBlocked => {
                let mut reply = String::from("You blocked the following users:\n");
                for name in self.blocked_names() {
                    reply.push_str("\n* ");
                    reply.push_str(&name);
                }
                Ok(reply)
            }
            ConsoleCommand::SetMode(mode) => {
                self.set_mode(mode);
                Ok(format!("Set mode to \"{mode}\""))
            }
        }
    }
}
