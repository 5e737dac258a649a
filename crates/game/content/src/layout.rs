//! Arena layouts: ASCII tile grids turned into populated worlds.

use std::collections::BTreeMap;

use game_core::{
    ActorTemplate, EntityId, ErrorSeverity, Faction, GameError, GridError, GridWorld,
    PlayerProfile, Position, RegistryError, SpellRegistry,
};

use crate::archetypes::ArchetypeCatalog;

pub const WALL_GLYPH: char = '#';
pub const FLOOR_GLYPH: char = '.';
pub const PLAYER_GLYPH: char = '@';
pub const VOID_GLYPH: char = ' ';

const BUILTIN_ARENA: &str = "\
############
#..........#
#.@....b...#
#....##....#
#....##..s.#
#..........#
#...w...o..#
############";

/// Tile grid plus a legend mapping spawn glyphs to archetype keys.
///
/// `#` is a wall, `.` a floor, `@` the player and a space is void (no tile at
/// all). Any other glyph must appear in the legend and spawns that archetype
/// on a floor tile.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ArenaLayout {
    pub tiles: Vec<String>,
    #[cfg_attr(feature = "serde", serde(default = "default_legend"))]
    pub legend: BTreeMap<char, String>,
}

/// A freshly built world and who was placed in it.
#[derive(Clone, Debug)]
pub struct Arena {
    pub world: GridWorld,
    pub player: EntityId,
    /// Archetype spawns in reading order.
    pub spawns: Vec<EntityId>,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LayoutError {
    #[error("layout has no tiles")]
    Empty,

    #[error("unknown glyph {glyph:?} at {position}")]
    UnknownGlyph { glyph: char, position: Position },

    #[error("legend maps {glyph:?} to unknown archetype '{key}'")]
    UnknownArchetype { glyph: char, key: String },

    #[error("layout has no player tile")]
    MissingPlayer,

    #[error("second player tile at {0}")]
    DuplicatePlayer(Position),

    #[error(transparent)]
    Registry(#[from] RegistryError),

    #[error(transparent)]
    Grid(#[from] GridError),
}

impl GameError for LayoutError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Grid(err) => err.severity(),
            _ => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Empty => "LAYOUT_EMPTY",
            Self::UnknownGlyph { .. } => "LAYOUT_UNKNOWN_GLYPH",
            Self::UnknownArchetype { .. } => "LAYOUT_UNKNOWN_ARCHETYPE",
            Self::MissingPlayer => "LAYOUT_MISSING_PLAYER",
            Self::DuplicatePlayer(_) => "LAYOUT_DUPLICATE_PLAYER",
            Self::Registry(err) => err.error_code(),
            Self::Grid(err) => err.error_code(),
        }
    }
}

/// Glyphs recognised when a layout does not bring its own legend.
pub fn default_legend() -> BTreeMap<char, String> {
    [
        ('b', "bat"),
        ('s', "spider"),
        ('w', "wolf"),
        ('m', "slime"),
        ('o', "orc"),
        ('h', "shade"),
        ('g', "golem"),
    ]
    .into_iter()
    .map(|(glyph, key)| (glyph, key.to_owned()))
    .collect()
}

/// Player template from the configured profile.
pub fn player_template(
    profile: &PlayerProfile,
    registry: &SpellRegistry,
) -> Result<ActorTemplate, RegistryError> {
    let spells = profile
        .spells
        .iter()
        .map(|name| registry.resolve(name))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(ActorTemplate::creature("PLAYER", Faction::Ally, profile.health)
        .with_weight(profile.weight)
        .with_spells(spells))
}

impl ArenaLayout {
    /// Reads a bare ASCII grid using the default legend.
    pub fn parse(text: &str) -> Self {
        let tiles = text
            .lines()
            .map(str::trim_end)
            .filter(|line| !line.is_empty())
            .map(str::to_owned)
            .collect();
        Self {
            tiles,
            legend: default_legend(),
        }
    }

    pub fn builtin() -> Self {
        Self::parse(BUILTIN_ARENA)
    }

    pub fn width(&self) -> u32 {
        self.tiles
            .iter()
            .map(|row| row.chars().count())
            .max()
            .unwrap_or(0) as u32
    }

    pub fn height(&self) -> u32 {
        self.tiles.len() as u32
    }

    fn glyphs(&self) -> impl Iterator<Item = (Position, char)> + '_ {
        self.tiles.iter().enumerate().flat_map(|(y, row)| {
            row.chars()
                .enumerate()
                .map(move |(x, glyph)| (Position::new(x as i32, y as i32), glyph))
        })
    }

    /// Populates a world: terrain first, then the player, then archetype
    /// spawns in reading order, so spawn ids follow the layout.
    pub fn build_world(
        &self,
        catalog: &ArchetypeCatalog,
        registry: &SpellRegistry,
        profile: &PlayerProfile,
    ) -> Result<Arena, LayoutError> {
        if self.width() == 0 {
            return Err(LayoutError::Empty);
        }

        let mut world = GridWorld::new(self.width(), self.height());
        let mut player_at = None;
        let mut spawns = Vec::new();

        for (position, glyph) in self.glyphs() {
            match glyph {
                VOID_GLYPH => continue,
                WALL_GLYPH => {
                    world.spawn(&ActorTemplate::wall(), position)?;
                    continue;
                }
                FLOOR_GLYPH => {}
                PLAYER_GLYPH => {
                    if player_at.is_some() {
                        return Err(LayoutError::DuplicatePlayer(position));
                    }
                    player_at = Some(position);
                }
                other => {
                    let key = self
                        .legend
                        .get(&other)
                        .ok_or(LayoutError::UnknownGlyph {
                            glyph: other,
                            position,
                        })?;
                    let archetype =
                        catalog
                            .get(key)
                            .ok_or_else(|| LayoutError::UnknownArchetype {
                                glyph: other,
                                key: key.clone(),
                            })?;
                    spawns.push((position, archetype.template(key)));
                }
            }
            world.spawn(&ActorTemplate::floor(), position)?;
        }

        let player_at = player_at.ok_or(LayoutError::MissingPlayer)?;
        let player = world.spawn_player(&player_template(profile, registry)?, player_at)?;

        let spawns = spawns
            .iter()
            .map(|(position, template)| world.spawn(template, *position))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Arena {
            world,
            player,
            spawns,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use game_core::{Density, SpellKind};

    fn build(text: &str) -> Result<Arena, LayoutError> {
        ArenaLayout::parse(text).build_world(
            &ArchetypeCatalog::builtin(),
            &SpellRegistry::standard(),
            &PlayerProfile::default(),
        )
    }

    #[test]
    fn builds_terrain_player_and_spawns() {
        let arena = build("#####\n#@.b#\n#####").unwrap();
        let world = &arena.world;

        assert_eq!((world.width(), world.height()), (5, 3));
        assert_eq!(arena.player, EntityId::PLAYER);
        assert_eq!(world.actor(arena.player).unwrap().position, Position::new(1, 1));

        let bat = world.actor(arena.spawns[0]).unwrap();
        assert_eq!(bat.name, "BAT");
        assert_eq!(bat.archetype.as_deref(), Some("bat"));
        assert_eq!(bat.position, Position::new(3, 1));

        let wall = world.first_blocker(Position::new(0, 0), Density::Wall.as_set());
        assert!(wall.is_some());
        assert!(world.can_enter(Position::new(2, 1)));
    }

    #[test]
    fn player_gets_configured_loadout() {
        let arena = build("@").unwrap();
        let player = arena.world.actor(arena.player).unwrap();
        assert_eq!(player.spells.slot(1).unwrap().spell.kind, SpellKind::Zap);
        assert_eq!(player.spells.slot(0).unwrap().spell.kind, SpellKind::Barrier);
    }

    #[test]
    fn void_squares_have_no_occupants() {
        let arena = build("@ .").unwrap();
        assert!(arena.world.occupant_ids(Position::new(1, 0)).is_empty());
        assert_eq!(arena.world.occupant_ids(Position::new(2, 0)).len(), 1);
    }

    #[test]
    fn rejects_bad_layouts() {
        assert_eq!(build("").unwrap_err(), LayoutError::Empty);
        assert_eq!(build("...").unwrap_err(), LayoutError::MissingPlayer);
        assert_eq!(
            build("@.@").unwrap_err(),
            LayoutError::DuplicatePlayer(Position::new(2, 0))
        );
        assert!(matches!(
            build("@z").unwrap_err(),
            LayoutError::UnknownGlyph { glyph: 'z', .. }
        ));
    }

    #[test]
    fn legend_must_name_known_archetypes() {
        let mut layout = ArenaLayout::parse("@x");
        layout.legend.insert('x', "dragon".into());
        let err = layout
            .build_world(
                &ArchetypeCatalog::builtin(),
                &SpellRegistry::standard(),
                &PlayerProfile::default(),
            )
            .unwrap_err();
        assert_eq!(err.error_code(), "LAYOUT_UNKNOWN_ARCHETYPE");
    }

    #[test]
    fn builtin_arena_is_valid() {
        let arena = ArenaLayout::builtin()
            .build_world(
                &ArchetypeCatalog::builtin(),
                &SpellRegistry::standard(),
                &PlayerProfile::default(),
            )
            .unwrap();
        assert_eq!(arena.spawns.len(), 4);
    }
}
