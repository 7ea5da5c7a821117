//! Gates for outbound profile/social lookup packets.

use hotel_proto::{Message, ProtoError};

use crate::store::BlockStore;

/// Block an outbound lookup whose leading user id belongs to a blocked
/// name.
///
/// The id index only fills in as blocked users are seen in room lists, so
/// an id never observed since start cannot match and the packet passes.
/// The packet itself is never modified.
pub(crate) fn handle(store: &BlockStore, msg: &mut Message) -> Result<(), ProtoError> {
    let user_id = msg.packet().reader().read_i32()?;
    if store.is_blocked_id(user_id) {
        msg.set_blocked(true);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;
    use hotel_proto::{Direction, Packet};

    fn lookup_message(user_id: i32) -> Message {
        let mut packet = Packet::new(351);
        packet.write_i32(user_id);
        Message::new(packet, Direction::ToServer)
    }

    fn store_with_sighting(name: &str, id: i32) -> BlockStore {
        let mut store = BlockStore::open(Box::new(MemoryStorage::new()));
        store.block(name);
        store.record_sighting(name, id, 0);
        store
    }

    #[test]
    fn blocks_lookup_for_a_known_blocked_id() {
        let store = store_with_sighting("alice", 42);
        let mut msg = lookup_message(42);
        handle(&store, &mut msg).unwrap();
        assert!(msg.is_blocked());
    }

    #[test]
    fn allows_lookup_for_an_unknown_id() {
        let store = store_with_sighting("alice", 42);
        let mut msg = lookup_message(99);
        handle(&store, &mut msg).unwrap();
        assert!(!msg.is_blocked());
    }

    #[test]
    fn allows_when_blocked_user_was_never_sighted() {
        let mut store = BlockStore::open(Box::new(MemoryStorage::new()));
        store.block("alice");
        let mut msg = lookup_message(42);
        handle(&store, &mut msg).unwrap();
        assert!(!msg.is_blocked());
    }

    #[test]
    fn empty_body_fails_open() {
        let store = store_with_sighting("alice", 42);
        let mut msg = Message::new(Packet::new(351), Direction::ToServer);
        assert!(handle(&store, &mut msg).is_err());
        assert!(!msg.is_blocked());
    }
}
