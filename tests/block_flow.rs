//! End-to-end block/unblock flows driven through the public API.

use hotel_proto::{Direction, Entity, EntityDetails, Gender, Message, Packet};
use trollblock::{
    BlockStore, Directive, Interceptor, JsonFileStorage, MemoryStorage, Mode, PacketKind,
    RecordingSink,
};

fn room_user(name: &str, id: i32, index: i32) -> Entity {
    Entity {
        id,
        name: name.to_string(),
        motto: "afk".to_string(),
        figure: "hr-100-61.hd-180-7".to_string(),
        index,
        x: 1,
        y: 1,
        z: "0.0".to_string(),
        direction: 2,
        details: EntityDetails::User {
            gender: Gender::Female,
            group_id: 0,
            group_status: 0,
            group_name: String::new(),
            swim_figure: String::new(),
            activity_points: 0,
            moderator: false,
        },
    }
}

fn room_users_message(entities: &[Entity]) -> Message {
    let packet = Entity::build_packet(entities, 28).expect("room list encodes");
    Message::new(packet, Direction::ToClient)
}

fn friend_request_message(sender: &str) -> Message {
    let mut packet = Packet::new(735);
    packet.write_i32(1);
    packet.write_string(sender).expect("sender name encodes");
    Message::new(packet, Direction::ToClient)
}

fn profile_lookup_message(user_id: i32) -> Message {
    let mut packet = Packet::new(351);
    packet.write_i32(user_id);
    Message::new(packet, Direction::ToServer)
}

#[test]
fn block_sight_gate_unblock_flow() {
    let sink = RecordingSink::new();
    let store = BlockStore::open(Box::new(MemoryStorage::new()));
    let interceptor = Interceptor::new(store, Box::new(sink.clone()));

    // Operator blocks Alice; the game-side ignore directive goes out.
    interceptor.run_command("block Alice").unwrap();
    assert_eq!(sink.take(), vec![Directive::IgnoreUser("Alice".to_string())]);

    // Alice shows up in a room list (id 42, position 3) and is filtered out.
    let mut room = room_users_message(&[room_user("Bob", 7, 0), room_user("Alice", 42, 3)]);
    interceptor.intercept(PacketKind::RoomUsers, &mut room).unwrap();
    let remaining = Entity::parse_all(&mut room.packet().reader()).unwrap();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].name, "Bob");

    // Her friend request (any case) is now dropped.
    let mut request = friend_request_message("alice");
    interceptor
        .intercept(PacketKind::NewFriendRequest, &mut request)
        .unwrap();
    assert!(request.is_blocked());

    // So is a profile lookup for her sighted id.
    let mut lookup = profile_lookup_message(42);
    interceptor
        .intercept(PacketKind::GetExtendedProfile, &mut lookup)
        .unwrap();
    assert!(lookup.is_blocked());

    // Unblocking lifts everything, including the cached id.
    interceptor.run_command("unblock Alice").unwrap();
    assert_eq!(
        sink.take(),
        vec![Directive::UnignoreUser("Alice".to_string())]
    );

    let mut request = friend_request_message("alice");
    interceptor
        .intercept(PacketKind::NewFriendRequest, &mut request)
        .unwrap();
    assert!(!request.is_blocked());

    let mut lookup = profile_lookup_message(42);
    interceptor
        .intercept(PacketKind::GetExtendedProfile, &mut lookup)
        .unwrap();
    assert!(!lookup.is_blocked());
}

#[test]
fn block_list_and_mode_survive_restart() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("trollblock.json");

    {
        let storage = JsonFileStorage::open(&path).unwrap();
        let mut store = BlockStore::open(Box::new(storage));
        store.block("Alice");
        store.block("bob");
        store.set_mode(Mode::Ghost);
    }

    let reopened = BlockStore::open(Box::new(JsonFileStorage::open(&path).unwrap()));
    assert_eq!(
        reopened.names(),
        vec!["alice".to_string(), "bob".to_string()]
    );
    assert_eq!(reopened.mode(), Mode::Ghost);
    assert!(reopened.is_blocked("ALICE"));
}

#[test]
fn ghost_mode_flow_keeps_room_population() {
    let store = BlockStore::open(Box::new(MemoryStorage::new()));
    let interceptor = Interceptor::new(store, Box::new(trollblock::NullSink));
    interceptor.run_command("block Alice").unwrap();
    interceptor.run_command("set-mode ghost").unwrap();

    let mut room = room_users_message(&[room_user("Alice", 42, 3), room_user("Bob", 7, 0)]);
    interceptor.intercept(PacketKind::RoomUsers, &mut room).unwrap();

    let entities = Entity::parse_all(&mut room.packet().reader()).unwrap();
    assert_eq!(entities.len(), 2);
    assert_eq!(entities[0].name, "Ghost");
    assert_eq!(entities[0].figure, "");
    assert_eq!(entities[1].name, "Bob");
}
