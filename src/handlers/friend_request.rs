//! Gate for incoming friend requests.

use hotel_proto::{Message, ProtoError};

use crate::store::BlockStore;

/// Drop a friend request whose sender is on the block list.
///
/// The sender's display name is the second field, after a leading numeric
/// id. Pure predicate: no store mutation, no packet rewrite.
pub(crate) fn handle(store: &BlockStore, msg: &mut Message) -> Result<(), ProtoError> {
    let sender = {
        let mut reader = msg.packet().reader();
        reader.read_i32()?;
        reader.read_string()?
    };
    if store.is_blocked(&sender) {
        msg.set_blocked(true);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;
    use hotel_proto::{Direction, Packet};

    fn request_message(sender: &str) -> Message {
        let mut packet = Packet::new(735);
        packet.write_i32(1);
        packet.write_string(sender).unwrap();
        Message::new(packet, Direction::ToClient)
    }

    fn store_blocking(name: &str) -> BlockStore {
        let mut store = BlockStore::open(Box::new(MemoryStorage::new()));
        store.block(name);
        store
    }

    #[test]
    fn blocks_request_from_blocked_sender_any_case() {
        let store = store_blocking("Bob");
        let mut msg = request_message("BOB");
        handle(&store, &mut msg).unwrap();
        assert!(msg.is_blocked());
    }

    #[test]
    fn allows_request_from_other_senders() {
        let store = store_blocking("Bob");
        let mut msg = request_message("alice");
        handle(&store, &mut msg).unwrap();
        assert!(!msg.is_blocked());
    }

    #[test]
    fn truncated_request_fails_open() {
        let store = store_blocking("Bob");
        let mut packet = Packet::new(735);
        packet.write_i32(1);
        let mut msg = Message::new(packet, Direction::ToClient);
        assert!(handle(&store, &mut msg).is_err());
        assert!(!msg.is_blocked());
    }
}
