//! Room-entity records.
//!
//! A room user-list packet body carries an entity count followed by that
//! many records. Each record starts with a common identity and position
//! block, then a kind discriminator, then a kind-specific detail payload.
//! Only user entities carry the presentation attributes (gender, group,
//! swim figure) a client renders for avatars; pets and bots have their own
//! trailing fields and must round-trip untouched.

use crate::error::{ProtoError, Result};
use crate::packet::{BodyReader, Packet};

/// Entity kind discriminator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    /// A human player.
    User,
    /// A pet.
    Pet,
    /// A bot from the legacy bot system.
    LegacyBot,
    /// A scripted room bot.
    Bot,
}

impl EntityKind {
    /// Decode the wire discriminator.
    pub fn from_id(id: i32) -> Result<Self> {
        match id {
            1 => Ok(Self::User),
            2 => Ok(Self::Pet),
            3 => Ok(Self::LegacyBot),
            4 => Ok(Self::Bot),
            other => Err(ProtoError::UnknownEntityKind(other)),
        }
    }

    /// The wire discriminator.
    pub fn as_id(self) -> i32 {
        match self {
            Self::User => 1,
            Self::Pet => 2,
            Self::LegacyBot => 3,
            Self::Bot => 4,
        }
    }
}

/// Avatar gender code of a user entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Gender {
    /// Wire code `M`.
    Male,
    /// Wire code `F`.
    Female,
    /// Wire code `U`.
    Unisex,
}

impl Gender {
    /// Decode a wire gender code, case-insensitively.
    pub fn from_code(code: &str) -> Result<Self> {
        if code.eq_ignore_ascii_case("m") {
            Ok(Self::Male)
        } else if code.eq_ignore_ascii_case("f") {
            Ok(Self::Female)
        } else if code.eq_ignore_ascii_case("u") {
            Ok(Self::Unisex)
        } else {
            Err(ProtoError::UnknownGender(code.to_string()))
        }
    }

    /// The wire code.
    pub fn code(self) -> &'static str {
        match self {
            Self::Male => "M",
            Self::Female => "F",
            Self::Unisex => "U",
        }
    }
}

/// Kind-specific trailing payload of an entity record.
#[derive(Debug, Clone, PartialEq)]
pub enum EntityDetails {
    /// Trailing fields of a human player.
    User {
        /// Avatar gender.
        gender: Gender,
        /// Id of the favourite group, 0 for none.
        group_id: i32,
        /// Membership status within the favourite group.
        group_status: i32,
        /// Display name of the favourite group.
        group_name: String,
        /// Figure used while swimming, empty when unset.
        swim_figure: String,
        /// Achievement score.
        activity_points: i32,
        /// Whether the player is a moderator.
        moderator: bool,
    },
    /// Trailing fields of a pet.
    Pet {
        /// Pet breed/subtype id.
        subtype: i32,
        /// Owning player's id.
        owner_id: i32,
        /// Owning player's name.
        owner_name: String,
        /// Rarity level.
        rarity: i32,
        /// Whether a saddle is equipped.
        saddle: bool,
        /// Whether a player is riding the pet.
        riding: bool,
        /// Whether the pet can breed.
        breedable: bool,
        /// Whether the pet can be harvested.
        harvestable: bool,
        /// Whether the pet can be revived.
        revivable: bool,
    },
    /// Legacy bots carry no trailing fields.
    LegacyBot,
    /// Trailing fields of a scripted room bot.
    Bot {
        /// Gender code string as sent on the wire.
        gender: String,
        /// Owning player's id.
        owner_id: i32,
        /// Owning player's name.
        owner_name: String,
        /// Enabled skill ids.
        skills: Vec<i16>,
    },
}

impl EntityDetails {
    /// The kind this payload belongs to.
    pub fn kind(&self) -> EntityKind {
        match self {
            Self::User { .. } => EntityKind::User,
            Self::Pet { .. } => EntityKind::Pet,
            Self::LegacyBot => EntityKind::LegacyBot,
            Self::Bot { .. } => EntityKind::Bot,
        }
    }
}

/// One record in a room's user/occupant list.
#[derive(Debug, Clone, PartialEq)]
pub struct Entity {
    /// Global user/pet/bot id.
    pub id: i32,
    /// Display name.
    pub name: String,
    /// Motto line shown under the name.
    pub motto: String,
    /// Avatar figure descriptor; an empty string renders the placeholder
    /// ghost avatar.
    pub figure: String,
    /// In-room position index.
    pub index: i32,
    /// Tile x coordinate.
    pub x: i32,
    /// Tile y coordinate.
    pub y: i32,
    /// Height within the tile, as the wire's decimal string.
    pub z: String,
    /// Facing direction.
    pub direction: i32,
    /// Kind discriminator and kind-specific payload.
    pub details: EntityDetails,
}

impl Entity {
    /// The entity's kind.
    pub fn kind(&self) -> EntityKind {
        self.details.kind()
    }

    /// Parse one entity record from a body reader.
    pub fn parse(reader: &mut BodyReader<'_>) -> Result<Self> {
        let id = reader.read_i32()?;
        let name = reader.read_string()?;
        let motto = reader.read_string()?;
        let figure = reader.read_string()?;
        let index = reader.read_i32()?;
        let x = reader.read_i32()?;
        let y = reader.read_i32()?;
        let z = reader.read_string()?;
        let direction = reader.read_i32()?;
        let kind = EntityKind::from_id(reader.read_i32()?)?;

        let details = match kind {
            EntityKind::User => EntityDetails::User {
                gender: Gender::from_code(&reader.read_string()?)?,
                group_id: reader.read_i32()?,
                group_status: reader.read_i32()?,
                group_name: reader.read_string()?,
                swim_figure: reader.read_string()?,
                activity_points: reader.read_i32()?,
                moderator: reader.read_bool()?,
            },
            EntityKind::Pet => EntityDetails::Pet {
                subtype: reader.read_i32()?,
                owner_id: reader.read_i32()?,
                owner_name: reader.read_string()?,
                rarity: reader.read_i32()?,
                saddle: reader.read_bool()?,
                riding: reader.read_bool()?,
                breedable: reader.read_bool()?,
                harvestable: reader.read_bool()?,
                revivable: reader.read_bool()?,
            },
            EntityKind::LegacyBot => EntityDetails::LegacyBot,
            EntityKind::Bot => {
                let gender = reader.read_string()?;
                let owner_id = reader.read_i32()?;
                let owner_name = reader.read_string()?;
                let count = reader.read_i32()?;
                let count =
                    usize::try_from(count).map_err(|_| ProtoError::InvalidCount(count))?;
                let mut skills = Vec::with_capacity(count.min(64));
                for _ in 0..count {
                    skills.push(reader.read_i16()?);
                }
                EntityDetails::Bot {
                    gender,
                    owner_id,
                    owner_name,
                    skills,
                }
            }
        };

        Ok(Self {
            id,
            name,
            motto,
            figure,
            index,
            x,
            y,
            z,
            direction,
            details,
        })
    }

    /// Parse a full room list: entity count followed by the records.
    pub fn parse_all(reader: &mut BodyReader<'_>) -> Result<Vec<Self>> {
        let count = reader.read_i32()?;
        let count = usize::try_from(count).map_err(|_| ProtoError::InvalidCount(count))?;
        let mut entities = Vec::with_capacity(count.min(256));
        for _ in 0..count {
            entities.push(Self::parse(reader)?);
        }
        Ok(entities)
    }

    /// Append this entity's record to a packet body.
    pub fn write(&self, packet: &mut Packet) -> Result<()> {
        packet.write_i32(self.id);
        packet.write_string(&self.name)?;
        packet.write_string(&self.motto)?;
        packet.write_string(&self.figure)?;
        packet.write_i32(self.index);
        packet.write_i32(self.x);
        packet.write_i32(self.y);
        packet.write_string(&self.z)?;
        packet.write_i32(self.direction);
        packet.write_i32(self.kind().as_id());

        match &self.details {
            EntityDetails::User {
                gender,
                group_id,
                group_status,
                group_name,
                swim_figure,
                activity_points,
                moderator,
            } => {
                packet.write_string(gender.code())?;
                packet.write_i32(*group_id);
                packet.write_i32(*group_status);
                packet.write_string(group_name)?;
                packet.write_string(swim_figure)?;
                packet.write_i32(*activity_points);
                packet.write_bool(*moderator);
            }
            EntityDetails::Pet {
                subtype,
                owner_id,
                owner_name,
                rarity,
                saddle,
                riding,
                breedable,
                harvestable,
                revivable,
            } => {
                packet.write_i32(*subtype);
                packet.write_i32(*owner_id);
                packet.write_string(owner_name)?;
                packet.write_i32(*rarity);
                packet.write_bool(*saddle);
                packet.write_bool(*riding);
                packet.write_bool(*breedable);
                packet.write_bool(*harvestable);
                packet.write_bool(*revivable);
            }
            EntityDetails::LegacyBot => {}
            EntityDetails::Bot {
                gender,
                owner_id,
                owner_name,
                skills,
            } => {
                packet.write_string(gender)?;
                packet.write_i32(*owner_id);
                packet.write_string(owner_name)?;
                packet.write_i32(skills.len() as i32);
                for skill in skills {
                    packet.write_i16(*skill);
                }
            }
        }
        Ok(())
    }

    /// Build a fresh packet of the given header from an entity sequence.
    pub fn build_packet(entities: &[Entity], header: u16) -> Result<Packet> {
        let mut packet = Packet::new(header);
        packet.write_i32(entities.len() as i32);
        for entity in entities {
            entity.write(&mut packet)?;
        }
        Ok(packet)
    }
}
