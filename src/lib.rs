//! trollblock - user-blocking interception rule for a hotel-game MITM proxy.
//!
//! The host proxy decodes each intercepted packet and hands it here; the
//! [`Interceptor`] decides, per packet, whether to drop it, rewrite it, or
//! let it pass, based on an operator-maintained block-list:
//!
//! - room user lists are filtered so blocked users are removed
//!   ([`Mode::Invisible`]) or stripped to an anonymous ghost
//!   ([`Mode::Ghost`]);
//! - outbound profile/social lookups for a blocked user's id are dropped;
//! - incoming friend requests from blocked names are dropped;
//! - blocking also engages the game's own ignore feature via an outbound
//!   directive.
//!
//! The proxy side — transport, framing, extension lifecycle, the console
//! I/O loop — is the host's concern. This library owns only the decision
//! core and its state, plus the small collaborator seams the host plugs
//! into: [`Storage`] for persistence, [`OutboundSink`] for server-bound
//! directives, and [`PacketKind`] for interception registration.

pub mod config;
pub mod console;
pub mod error;
pub mod handlers;
pub mod outbound;
pub mod storage;
pub mod store;

pub use config::{Config, ConfigError, StorageConfig};
pub use console::{ConsoleCommand, HELP_TEXT};
pub use error::CommandError;
pub use handlers::{Interceptor, PacketKind};
pub use outbound::{Directive, NullSink, OutboundSink, RecordingSink};
pub use storage::{JsonFileStorage, MemoryStorage, Storage, StorageError, Value};
pub use store::{BlockStore, Mode, block_key};
