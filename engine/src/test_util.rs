//! Shared fixtures for unit tests.

use crate::{
    ecs::Stats, prelude::*, Bank, DoodadRecipe, ItemRecipe, MonsterRecipe,
};

pub const ZOMBIE_XP: i32 = 5;
pub const STATUE_XP: i32 = 2;
pub const SWORD_DAMAGE: i32 = 4;

pub fn test_area() -> Area {
    Area::new(10, 10).with_seed("test")
}

pub fn zombie_recipe() -> MonsterRecipe {
    MonsterRecipe {
        id: "zombie".into(),
        kind: "normal melee".into(),
        name: "zombie".into(),
        icon: 'z',
        ai: "melee zombie".into(),
        stats: Stats {
            health: 10,
            speed: 10,
            movement_speed: 10,
            ..Default::default()
        },
        xp: ZOMBIE_XP,
        ..Default::default()
    }
}

pub fn wall_recipe() -> DoodadRecipe {
    DoodadRecipe {
        id: "wall".into(),
        kind: "wall".into(),
        name: "wall".into(),
        icon: '#',
        transparent: false,
    }
}

pub fn sword_recipe() -> ItemRecipe {
    ItemRecipe {
        id: "sword".into(),
        kind: "weapon".into(),
        name: "sword".into(),
        icon: '/',
        damage: SWORD_DAMAGE,
        attack_cost: 8,
    }
}

pub fn bank() -> Bank {
    let mut ret = Bank::default();
    ret.add_monster(zombie_recipe());
    ret.add_doodad(wall_recipe());
    ret.add_item(sword_recipe());
    ret
}

pub fn zombie(r: &mut Area) -> Entity {
    r.monster_from_recipe(&bank(), &zombie_recipe()).unwrap()
}

/// Zombie that sees through walls.
pub fn ghost(r: &mut Area) -> Entity {
    let recipe = MonsterRecipe {
        id: "ghost".into(),
        name: "ghost".into(),
        see_through: vec!["wall".into()],
        ..zombie_recipe()
    };
    r.monster_from_recipe(&bank(), &recipe).unwrap()
}

/// Monster that never does anything.
pub fn statue(r: &mut Area) -> Entity {
    let recipe = MonsterRecipe {
        id: "statue".into(),
        name: "statue".into(),
        ai: "inert".into(),
        xp: STATUE_XP,
        ..zombie_recipe()
    };
    r.monster_from_recipe(&bank(), &recipe).unwrap()
}

/// Monster with a sword.
pub fn knight(r: &mut Area) -> Entity {
    let recipe = MonsterRecipe {
        id: "knight".into(),
        name: "knight".into(),
        wields: Some("sword".into()),
        ..zombie_recipe()
    };
    r.monster_from_recipe(&bank(), &recipe).unwrap()
}

pub fn player(r: &mut Area) -> Entity {
    r.spawn_player("tester", Stats {
        health: 20,
        ..Default::default()
    })
}

pub fn wall(r: &mut Area) -> Entity {
    r.doodad_from_recipe(&wall_recipe()).unwrap()
}

pub fn glass(r: &mut Area) -> Entity {
    let recipe = DoodadRecipe {
        id: "glass".into(),
        name: "glass wall".into(),
        transparent: true,
        ..wall_recipe()
    };
    r.doodad_from_recipe(&recipe).unwrap()
}

pub fn sword(r: &mut Area) -> Entity {
    r.item_from_recipe(&sword_recipe()).unwrap()
}

pub fn junk(r: &mut Area) -> Entity {
    let recipe = ItemRecipe {
        id: "bone".into(),
        kind: "junk".into(),
        name: "bone".into(),
        ..sword_recipe()
    };
    r.item_from_recipe(&recipe).unwrap()
}
