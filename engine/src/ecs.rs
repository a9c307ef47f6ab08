//! Entity component system boilerplate.

use bitflags::bitflags;
use derive_more::{Deref, DerefMut};
use serde::{Deserialize, Serialize};

use crate::prelude::*;

/// What sort of thing the entity is, decides which area collection it goes
/// in.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Kind {
    Player,
    Monster,
    Item,
    Doodad,
}

impl Kind {
    pub fn is_character(self) -> bool {
        matches!(self, Kind::Player | Kind::Monster)
    }
}

/// Grid position of a placed entity. Entities without one are hidden.
///
/// Never write this with `Entity::set`, a zero vector is a valid position
/// and must not be treated as a removable default.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Pos(pub IVec2);

bitflags! {
    /// Collision groups, see `Collision`.
    #[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
    pub struct Groups: u8 {
        const CHARACTER = 1 << 0;
        const WALL = 1 << 1;
        const FLYING = 1 << 2;
        const LIQUID = 1 << 3;
    }
}

/// Asymmetric collision rule.
///
/// Entity A can't share a cell with entity B if A's `blocked_by` set
/// intersects B's `blocks` set.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct Collision {
    pub blocks: Groups,
    pub blocked_by: Groups,
}

impl Collision {
    pub const CHARACTER: Collision = Collision {
        blocks: Groups::CHARACTER,
        blocked_by: Groups::CHARACTER.union(Groups::WALL),
    };

    pub const WALL: Collision = Collision {
        blocks: Groups::CHARACTER.union(Groups::WALL),
        blocked_by: Groups::WALL,
    };

    pub const ITEM: Collision = Collision {
        blocks: Groups::empty(),
        blocked_by: Groups::WALL,
    };
}

#[derive(Clone, Debug, Eq, PartialEq, Default)]
pub struct Name(pub String);

#[derive(Copy, Clone, Debug, Eq, PartialEq, Default)]
pub struct Icon(pub char);

/// Id of the content recipe the entity was made from.
#[derive(Clone, Debug, Eq, PartialEq, Default)]
pub struct RecipeId(pub String);

/// Current hit points of a character. Zero is dead.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Default)]
pub struct Health(pub i32);

/// Dead flag for entities that don't have health.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Default)]
pub struct IsDead(pub bool);

/// Doodad doesn't block line of sight.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Default)]
pub struct IsTransparent(pub bool);

/// Recipe ids of opaque doodads a monster can see through.
#[derive(Clone, Debug, Eq, PartialEq, Default, Deref, DerefMut)]
pub struct SeeThrough(pub Vec<String>);

#[derive(Copy, Clone, Debug, Eq, PartialEq, Default)]
pub struct ActionPoints(pub i32);

#[derive(Clone, Debug, Eq, PartialEq, Default)]
pub struct DeathMessage(pub String);

/// Experience given to the player when the monster dies.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Default)]
pub struct XpAward(pub i32);

/// Experience collected by the player.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Default)]
pub struct Xp(pub i32);

/// Item that can be used for melee attacks.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Default)]
pub struct Weapon {
    pub damage: i32,
    /// Action points spent on a single attack.
    pub attack_cost: i32,
}

/// Weapon held by a character. The held item is hidden.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Default)]
pub struct Wielding(pub Option<Entity>);

/// Items carried by a character, all of them hidden.
#[derive(Clone, Debug, Eq, PartialEq, Default, Deref, DerefMut)]
pub struct Inventory(pub Vec<Entity>);

#[derive(
    Copy, Clone, Debug, Eq, PartialEq, Default, Serialize, Deserialize,
)]
#[serde(default, rename_all = "kebab-case")]
pub struct Stats {
    /// Maximum health.
    pub health: i32,
    /// Radius of the square the character can see into.
    pub sight: i32,
    /// Attack speed.
    pub speed: i32,
    pub movement_speed: i32,
    /// Deciban odds for landing an attack.
    pub to_hit: i32,
    /// Deciban odds for evading an attack.
    pub dodge: i32,
    /// Damage added to every successful attack.
    pub damage: i32,
    /// Damage subtracted from every received hit.
    pub armor: i32,
}

impl std::ops::Add for Stats {
    type Output = Stats;

    fn add(mut self, rhs: Self) -> Self::Output {
        self += rhs;
        self
    }
}

impl std::ops::AddAssign for Stats {
    fn add_assign(&mut self, rhs: Self) {
        self.health += rhs.health;
        self.sight += rhs.sight;
        self.speed += rhs.speed;
        self.movement_speed += rhs.movement_speed;
        self.to_hit += rhs.to_hit;
        self.dodge += rhs.dodge;
        self.damage += rhs.damage;
        self.armor += rhs.armor;
    }
}

/// Change to a character's statistics, temporary or innate.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct Modifier {
    pub name: String,
    /// Flat bonus to effective stats while the modifier is active.
    pub bonus: Stats,
    /// Health lost every turn, poison and the like.
    pub damage_per_turn: i32,
    /// Turns left, negative values never expire.
    pub duration: i32,
    pub tick_message: Option<String>,
    pub expire_message: Option<String>,
}

impl Default for Modifier {
    fn default() -> Self {
        Modifier {
            name: Default::default(),
            bonus: Default::default(),
            damage_per_turn: 0,
            duration: -1,
            tick_message: None,
            expire_message: None,
        }
    }
}

#[derive(Clone, Debug, Eq, PartialEq, Default, Deref, DerefMut)]
pub struct Modifiers(pub Vec<Modifier>);

////////////////////////////////

/// Entity component system. Stores all the data of game entities.
#[derive(Default, Deref, DerefMut)]
pub(crate) struct Ecs(pub(crate) hecs::World);
