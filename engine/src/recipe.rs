//! Content templates for making entities.

use std::str::FromStr;

use anyhow::{anyhow, bail, Result};
use serde::{Deserialize, Deserializer, Serialize};
use strum::{Display, EnumString};

use crate::{ai::Ai, ecs::*, prelude::*, DEFAULT_SIGHT};

#[derive(Copy, Clone, Debug, Eq, PartialEq, Display, EnumString)]
pub enum MonsterType {
    #[strum(serialize = "normal melee")]
    NormalMelee,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Display, EnumString)]
pub enum DoodadType {
    #[strum(serialize = "wall")]
    Wall,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Display, EnumString)]
pub enum ItemType {
    #[strum(serialize = "weapon")]
    Weapon,
    #[strum(serialize = "junk")]
    Junk,
}

/// Common interface of recipe types for the recipe bank.
pub trait Recipe {
    /// What the recipe makes, for error messages.
    const KIND: &'static str;

    fn id(&self) -> &str;
}

#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct MonsterRecipe {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub name: String,
    pub icon: char,
    pub ai: String,
    pub stats: Stats,
    /// Ids of opaque doodads the monster can see through.
    pub see_through: Vec<String>,
    pub death_message: Option<String>,
    /// Experience awarded for killing the monster.
    pub xp: i32,
    /// Item recipe id of the monster's weapon.
    pub wields: Option<String>,
}

impl Recipe for MonsterRecipe {
    const KIND: &'static str = "monster";

    fn id(&self) -> &str {
        &self.id
    }
}

#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct DoodadRecipe {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub name: String,
    pub icon: char,
    pub transparent: bool,
}

impl Recipe for DoodadRecipe {
    const KIND: &'static str = "doodad";

    fn id(&self) -> &str {
        &self.id
    }
}

#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct ItemRecipe {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub name: String,
    pub icon: char,
    pub damage: i32,
    /// Action points spent on an attack with the item.
    pub attack_cost: i32,
}

impl Recipe for ItemRecipe {
    const KIND: &'static str = "item";

    fn id(&self) -> &str {
        &self.id
    }
}

/// Collection of all recipes, keyed by recipe id.
///
/// Serialized as lists of recipes.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct Bank {
    #[serde(deserialize_with = "by_id")]
    pub monsters: IndexMap<String, MonsterRecipe>,
    #[serde(deserialize_with = "by_id")]
    pub doodads: IndexMap<String, DoodadRecipe>,
    #[serde(deserialize_with = "by_id")]
    pub items: IndexMap<String, ItemRecipe>,
}

fn by_id<'de, D, R>(d: D) -> std::result::Result<IndexMap<String, R>, D::Error>
where
    D: Deserializer<'de>,
    R: Recipe + Deserialize<'de>,
{
    let list = Vec::<R>::deserialize(d)?;
    Ok(list.into_iter().map(|r| (r.id().to_owned(), r)).collect())
}

fn lookup<'a, R: Recipe>(
    map: &'a IndexMap<String, R>,
    id: &str,
) -> Result<&'a R> {
    map.get(id)
        .ok_or_else(|| anyhow!("Unknown {} recipe '{id}'", R::KIND))
}

impl Bank {
    pub fn monster(&self, id: &str) -> Result<&MonsterRecipe> {
        lookup(&self.monsters, id)
    }

    pub fn doodad(&self, id: &str) -> Result<&DoodadRecipe> {
        lookup(&self.doodads, id)
    }

    pub fn item(&self, id: &str) -> Result<&ItemRecipe> {
        lookup(&self.items, id)
    }

    pub fn add_monster(&mut self, recipe: MonsterRecipe) {
        self.monsters.insert(recipe.id.clone(), recipe);
    }

    pub fn add_doodad(&mut self, recipe: DoodadRecipe) {
        self.doodads.insert(recipe.id.clone(), recipe);
    }

    pub fn add_item(&mut self, recipe: ItemRecipe) {
        self.items.insert(recipe.id.clone(), recipe);
    }
}

fn parse_type<T: FromStr>(kind: &str, tag: &str) -> Result<T> {
    match tag.parse() {
        Ok(t) => Ok(t),
        Err(_) => bail!("Unknown {kind} type '{tag}'"),
    }
}

/// Fill in stats that must not be zero for a working character.
fn character_stats(mut stats: Stats) -> Stats {
    if stats.sight == 0 {
        stats.sight = DEFAULT_SIGHT;
    }
    stats
}

impl Area {
    /// Spawn a new hidden monster.
    ///
    /// The bank is used to look up the monster's weapon.
    pub fn monster_from_recipe(
        &mut self,
        bank: &Bank,
        recipe: &MonsterRecipe,
    ) -> Result<Entity> {
        let MonsterType::NormalMelee = parse_type("monster", &recipe.kind)?;
        let ai = match recipe.ai.parse::<AiKind>() {
            Ok(ai) => ai,
            Err(_) => bail!("Unknown AI type '{}'", recipe.ai),
        };

        let weapon = match &recipe.wields {
            Some(id) => {
                let item = bank
                    .items
                    .get(id)
                    .ok_or_else(|| anyhow!("Unknown item '{id}'"))?;
                Some(self.item_from_recipe(item)?)
            }
            None => None,
        };

        let stats = character_stats(recipe.stats);
        let e = Entity(self.ecs.spawn((
            Kind::Monster,
            Name(recipe.name.clone()),
            Icon(recipe.icon),
            RecipeId(recipe.id.clone()),
            Collision::CHARACTER,
            stats,
        )));
        e.set(self, Health(stats.health));
        e.set(self, Ai::new(ai));
        e.set(self, SeeThrough(recipe.see_through.clone()));
        e.set(
            self,
            DeathMessage(recipe.death_message.clone().unwrap_or_default()),
        );
        e.set(self, XpAward(recipe.xp));
        e.set(self, Wielding(weapon));

        if stats.health <= 0 {
            log::warn!(
                "Area::monster_from_recipe: {} has no health",
                recipe.id
            );
        }
        Ok(e)
    }

    /// Spawn a new hidden doodad.
    pub fn doodad_from_recipe(
        &mut self,
        recipe: &DoodadRecipe,
    ) -> Result<Entity> {
        let DoodadType::Wall = parse_type("doodad", &recipe.kind)?;

        let e = Entity(self.ecs.spawn((
            Kind::Doodad,
            Name(recipe.name.clone()),
            Icon(recipe.icon),
            RecipeId(recipe.id.clone()),
            Collision::WALL,
        )));
        e.set(self, IsTransparent(recipe.transparent));
        Ok(e)
    }

    /// Spawn a new hidden item.
    pub fn item_from_recipe(&mut self, recipe: &ItemRecipe) -> Result<Entity> {
        let kind: ItemType = parse_type("item", &recipe.kind)?;

        let e = Entity(self.ecs.spawn((
            Kind::Item,
            Name(recipe.name.clone()),
            Icon(recipe.icon),
            RecipeId(recipe.id.clone()),
            Collision::ITEM,
        )));
        if kind == ItemType::Weapon {
            // Inserted directly, a weapon with all-zero stats is still a
            // weapon.
            self.ecs.insert_one(*e, Weapon {
                damage: recipe.damage,
                attack_cost: recipe.attack_cost,
            })?;
        }
        Ok(e)
    }

    /// Spawn a new hidden player character.
    pub fn spawn_player(&mut self, name: &str, stats: Stats) -> Entity {
        let stats = character_stats(stats);
        let e = Entity(self.ecs.spawn((
            Kind::Player,
            Name(name.to_owned()),
            Icon('@'),
            Collision::CHARACTER,
            stats,
        )));
        e.set(self, Health(stats.health));
        e
    }
}
