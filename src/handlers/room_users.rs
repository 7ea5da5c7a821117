//! Room user-list filtering.

use hotel_proto::{Entity, EntityDetails, EntityKind, Gender, Message, ProtoError};
use tracing::debug;

use crate::store::{BlockStore, Mode};

/// Name shown in place of a blocked user in ghost mode. Combined with an
/// empty figure string the client renders the placeholder ghost avatar.
const GHOST_NAME: &str = "Ghost";

/// Filter one room user-list packet against the block list.
///
/// Retained entities keep their original order and the rebuilt body
/// replaces the old one under the same header id. Non-user entities pass
/// through untouched. This is the only writer of the name → id index and
/// the room-index set.
pub(crate) fn handle(store: &mut BlockStore, msg: &mut Message) -> Result<(), ProtoError> {
    let entities = Entity::parse_all(&mut msg.packet().reader())?;
    let mode = store.mode();

    let mut kept: Vec<Entity> = Vec::with_capacity(entities.len());
    let mut dropped = 0usize;
    let mut ghosted = 0usize;

    for mut entity in entities {
        if entity.kind() != EntityKind::User {
            kept.push(entity);
            continue;
        }
        if !store.is_blocked(&entity.name) {
            kept.push(entity);
            continue;
        }

        store.record_sighting(&entity.name, entity.id, entity.index);
        match mode {
            Mode::Ghost => {
                ghost(&mut entity);
                ghosted += 1;
                kept.push(entity);
            }
            Mode::Invisible => dropped += 1,
        }
    }

    if dropped > 0 || ghosted > 0 {
        debug!(dropped, ghosted, "rewrote room user list");
    }

    let header = msg.packet().header();
    let rebuilt = Entity::build_packet(&kept, header)?;
    msg.packet_mut().set_body(rebuilt.body());
    Ok(())
}

/// Strip a blocked user's identity down to the ghost placeholder.
fn ghost(entity: &mut Entity) {
    entity.name = GHOST_NAME.to_string();
    entity.figure.clear();
    entity.motto.clear();
    if let EntityDetails::User {
        gender, group_name, ..
    } = &mut entity.details
    {
        *gender = Gender::Male;
        group_name.clear();
    }
}
