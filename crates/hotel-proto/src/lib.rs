//! # hotel-proto
//!
//! Packet-structure and room-entity codec for the hotel game protocol.
//!
//! This crate owns the protocol *structure* layer consumed by interception
//! extensions running inside a man-in-the-middle proxy:
//!
//! - [`Packet`]: header id plus body bytes, with a sequential body reader
//!   and append-style writers (big-endian integers, length-prefixed UTF-8
//!   strings, single-byte booleans)
//! - [`Entity`]: one record of a room user list, with parse/encode for the
//!   whole list
//! - [`Message`]: the mutable handle a proxy hands to an interception
//!   callback, carrying the packet, its direction and the block verdict
//!
//! Wire framing (the outer length-delimited TCP frame) and the transport
//! itself belong to the proxy and are out of scope here.

#![deny(clippy::all)]
#![warn(missing_docs)]

pub mod entity;
pub mod error;
pub mod message;
pub mod packet;

pub use entity::{Entity, EntityDetails, EntityKind, Gender};
pub use error::{ProtoError, Result};
pub use message::{Direction, Message};
pub use packet::{BodyReader, Packet};
