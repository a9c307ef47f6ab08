use std::hash::Hash;

use anyhow::{bail, Result};
use rand::seq::SliceRandom;

use crate::{
    ecs::*, prelude::*, DoodadRecipe, VisibilityMatrix, MAX_AREA_CELLS,
};

/// A single bounded grid level and everything in it.
pub struct Area {
    width: i32,
    height: i32,
    pub(crate) ecs: Ecs,
    player: Option<Entity>,
    monsters: Vec<Entity>,
    items: Vec<Entity>,
    doodads: Vec<Entity>,
    pub(crate) visibility: VisibilityMatrix,
    pub(crate) rng: GameRng,
    pub(crate) turn: u64,
}

impl AsRef<Area> for Area {
    fn as_ref(&self) -> &Area {
        self
    }
}

impl AsMut<Area> for Area {
    fn as_mut(&mut self) -> &mut Area {
        self
    }
}

/// Which entities `Area::entities_at` returns.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Filter {
    pub alive_only: bool,
    pub player: bool,
    pub doodads: bool,
    pub items: bool,
    pub monsters: bool,
}

impl Default for Filter {
    fn default() -> Self {
        Filter::ALIVE
    }
}

impl Filter {
    /// Everything that is still alive.
    pub const ALIVE: Filter = Filter {
        alive_only: true,
        player: true,
        doodads: true,
        items: true,
        monsters: true,
    };

    /// Everything, dead or alive.
    pub const ANY: Filter = Filter {
        alive_only: false,
        ..Filter::ALIVE
    };

    /// Live entities of a single kind.
    pub fn only(kind: Kind) -> Filter {
        Filter {
            alive_only: true,
            player: kind == Kind::Player,
            doodads: kind == Kind::Doodad,
            items: kind == Kind::Item,
            monsters: kind == Kind::Monster,
        }
    }
}

impl Area {
    /// Create an empty area with no memory of any cell.
    ///
    /// Panics on dimensions that `Area::from_scratch` would reject.
    pub fn new(width: i32, height: i32) -> Area {
        assert!(
            valid_dimensions(width, height),
            "Area::new: invalid dimensions {width}x{height}"
        );
        let mut ret = Area {
            width,
            height,
            ecs: Default::default(),
            player: None,
            monsters: Default::default(),
            items: Default::default(),
            doodads: Default::default(),
            visibility: Default::default(),
            rng: util::srng(&(width, height)),
            turn: 0,
        };
        ret.reset_visibility_matrix();
        ret
    }

    /// Create an empty area with its edges walled off.
    pub fn from_scratch(
        width: i32,
        height: i32,
        wall: &DoodadRecipe,
    ) -> Result<Area> {
        if !valid_dimensions(width, height) {
            bail!("Invalid area dimensions {width}x{height}");
        }
        let mut ret = Area::new(width, height);
        for pos in ret.all_coordinates().collect::<Vec<_>>() {
            if pos.x > 0 && pos.y > 0 && pos.x < width - 1 && pos.y < height - 1
            {
                continue;
            }
            let e = ret.doodad_from_recipe(wall)?;
            if !ret.add_entity(&e, pos) {
                log::warn!("Area::from_scratch: can't wall {pos}");
                ret.ecs.despawn(*e)?;
            }
        }
        Ok(ret)
    }

    /// Reseed the random number generator of the area.
    pub fn with_seed(mut self, seed: &(impl Hash + ?Sized)) -> Self {
        self.rng = util::srng(seed);
        self
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    /// Number of completed turns.
    pub fn turn(&self) -> u64 {
        self.turn
    }

    pub fn in_bounds(&self, pos: IVec2) -> bool {
        (0..self.width).contains(&pos.x) && (0..self.height).contains(&pos.y)
    }

    /// Every cell of the area in row-major order.
    pub fn all_coordinates(&self) -> impl Iterator<Item = IVec2> {
        let (w, h) = (self.width, self.height);
        (0..h).flat_map(move |y| (0..w).map(move |x| ivec2(x, y)))
    }

    pub fn player(&self) -> Option<Entity> {
        self.player
    }

    pub fn monsters(&self) -> &[Entity] {
        &self.monsters
    }

    pub fn items(&self) -> &[Entity] {
        &self.items
    }

    pub fn doodads(&self) -> &[Entity] {
        &self.doodads
    }

    /// Iterate all tracked entities.
    pub fn entities(&self) -> impl Iterator<Item = Entity> + '_ {
        self.player
            .iter()
            .chain(&self.doodads)
            .chain(&self.items)
            .chain(&self.monsters)
            .copied()
    }

    pub fn entities_at(&self, pos: IVec2, filter: Filter) -> Vec<Entity> {
        let mut ret = Vec::new();
        let mut scan = |included: bool, es: &[Entity]| {
            if !included {
                return;
            }
            ret.extend(es.iter().copied().filter(|e| {
                e.loc(self) == Some(pos)
                    && (!filter.alive_only || e.is_alive(self))
            }));
        };

        scan(filter.player, self.player.as_slice());
        scan(filter.doodads, &self.doodads);
        scan(filter.items, &self.items);
        scan(filter.monsters, &self.monsters);
        ret
    }

    /// Whether `e` could be placed at `pos` right now.
    pub fn can_place(&self, e: &Entity, pos: IVec2) -> bool {
        self.in_bounds(pos)
            && self
                .entities_at(pos, Filter::ALIVE)
                .iter()
                .all(|blocker| !e.would_collide(self, blocker, pos))
    }

    /// Move an entity to a new position.
    ///
    /// Does not touch the entity collections. Returns false and leaves the
    /// entity where it was if the position is out of bounds or blocked.
    pub fn place_entity(&mut self, e: &Entity, pos: IVec2) -> bool {
        if !self.can_place(e, pos) {
            return false;
        }
        e.set_loc(self, pos);
        true
    }

    /// Place an entity that isn't in any area yet and start tracking it.
    pub fn add_entity(&mut self, e: &Entity, pos: IVec2) -> bool {
        let Some(kind) = e.kind(self) else {
            log::warn!("Area::add_entity: {e} has no kind");
            return false;
        };

        if self.tracks(e) {
            log::warn!("Area::add_entity: {e} is already in the area");
            return false;
        }
        if kind == Kind::Player && self.player.is_some() {
            log::warn!("Area::add_entity: area already has a player");
            return false;
        }

        if !self.place_entity(e, pos) {
            return false;
        }

        match kind {
            Kind::Player => self.player = Some(*e),
            Kind::Monster => self.monsters.push(*e),
            Kind::Item => self.items.push(*e),
            Kind::Doodad => self.doodads.push(*e),
        }
        true
    }

    /// Whether the entity is in one of the area's collections.
    pub fn tracks(&self, e: &Entity) -> bool {
        self.entities().any(|a| a == *e)
    }

    /// Try to add the entity at every cell of the area in random order.
    pub fn add_entity_randomly(&mut self, e: &Entity) -> bool {
        let mut cells: Vec<IVec2> = self.all_coordinates().collect();
        cells.shuffle(&mut self.rng);
        cells.into_iter().any(|pos| self.add_entity(e, pos))
    }

    pub fn shift_entity(&mut self, e: &Entity, dir: IVec2) -> bool {
        match e.loc(self) {
            Some(pos) => self.place_entity(e, pos + dir),
            None => false,
        }
    }

    /// Bring the player into the area at a random position.
    pub fn enter(&mut self, player: &Entity) -> bool {
        if !self.add_entity_randomly(player) {
            return false;
        }
        self.update_visibility_matrix();
        true
    }

    /// Stop tracking an entity and take it off the grid.
    ///
    /// The entity stays alive in the ECS, eg. for going into an inventory.
    pub fn remove_entity(&mut self, e: &Entity) -> bool {
        let removed = match e.kind(self) {
            Some(Kind::Player) if self.player == Some(*e) => {
                self.player = None;
                true
            }
            Some(Kind::Monster) => remove_from(&mut self.monsters, e),
            Some(Kind::Item) => remove_from(&mut self.items, e),
            Some(Kind::Doodad) => remove_from(&mut self.doodads, e),
            _ => false,
        };
        if removed {
            e.hide(self);
        }
        removed
    }

    /// Sweep dead entities out of the area and destroy them.
    pub fn remove_dead_entities(&mut self) {
        let mut dead = Vec::new();
        for e in self.entities() {
            if !e.is_alive(self) {
                dead.push(e);
            }
        }
        if dead.is_empty() {
            return;
        }

        if self.player.is_some_and(|p| dead.contains(&p)) {
            self.player = None;
        }
        self.monsters.retain(|e| !dead.contains(e));
        self.items.retain(|e| !dead.contains(e));
        self.doodads.retain(|e| !dead.contains(e));

        for e in dead {
            log::info!("Area::remove_dead_entities: removing {e}");
            // Carried items don't exist outside their owner.
            let carried = e.inventory(self).into_iter().chain(e.wielded(self));
            for item in carried.collect::<Vec<_>>() {
                let _ = self.ecs.despawn(*item);
            }
            let _ = self.ecs.despawn(*e);
        }
    }

    pub fn scenario_status(&self) -> ScenarioStatus {
        match self.player {
            Some(p) if p.is_alive(self) => ScenarioStatus::Ongoing,
            _ => ScenarioStatus::Lost,
        }
    }
}

fn valid_dimensions(width: i32, height: i32) -> bool {
    width > 0
        && height > 0
        && (width as i64 * height as i64) <= MAX_AREA_CELLS as i64
}

fn remove_from(es: &mut Vec<Entity>, e: &Entity) -> bool {
    let Some(i) = es.iter().position(|x| x == e) else {
        return false;
    };
    es.remove(i);
    true
}

#[cfg(test)]
mod test {
    use quickcheck_macros::quickcheck;

    use super::*;
    use crate::test_util::*;

    #[quickcheck]
    fn placement_invariant(x: i8, y: i8, bx: u8, by: u8) -> bool {
        let mut r = test_area();
        let (x, y) = (x as i32 % 12, y as i32 % 12);
        let blocker_pos = ivec2(bx as i32 % 10, by as i32 % 10);

        let z = zombie(&mut r);
        let blocker = zombie(&mut r);
        assert!(r.add_entity(&z, ivec2(5, 5)));
        r.add_entity(&blocker, blocker_pos);

        let pos = ivec2(x, y);
        let before = z.loc(&r);
        let expect = r.in_bounds(pos)
            && r
                .entities_at(pos, Filter::ALIVE)
                .iter()
                .all(|b| !z.would_collide(&r, b, pos));

        let ok = r.place_entity(&z, pos);
        ok == expect
            && if ok {
                z.loc(&r) == Some(pos)
            } else {
                z.loc(&r) == before
            }
    }

    #[test]
    fn placement_out_of_bounds() {
        let mut r = test_area();
        let z = zombie(&mut r);
        assert!(!r.add_entity(&z, ivec2(-1, 0)));
        assert!(!r.add_entity(&z, ivec2(0, 10)));
        assert!(z.hidden(&r));
        assert!(r.monsters().is_empty());
    }

    #[test]
    fn walls_block_characters_not_items() {
        let mut r = test_area();
        let w = wall(&mut r);
        let z = zombie(&mut r);
        let i = sword(&mut r);
        let i2 = sword(&mut r);
        assert!(r.add_entity(&w, ivec2(3, 3)));
        assert!(!r.add_entity(&z, ivec2(3, 3)));
        assert!(!r.add_entity(&i, ivec2(3, 3)));

        assert!(r.add_entity(&i, ivec2(4, 4)));
        assert!(r.add_entity(&i2, ivec2(4, 4)));
        assert!(r.add_entity(&z, ivec2(4, 4)));
        assert_eq!(r.entities_at(ivec2(4, 4), Filter::ALIVE), vec![i, i2, z]);
        assert_eq!(r.entities_at(ivec2(4, 4), Filter::only(Kind::Item)), vec![
            i, i2
        ]);
    }

    #[test]
    fn player_goes_in_own_slot() {
        let mut r = test_area();
        let p = player(&mut r);
        let p2 = player(&mut r);
        assert!(r.add_entity(&p, ivec2(1, 1)));
        assert_eq!(r.player(), Some(p));
        assert!(r.monsters().is_empty());
        assert!(!r.add_entity(&p2, ivec2(2, 2)));
        assert_eq!(r.player(), Some(p));
    }

    #[test]
    fn entities_are_added_once() {
        let mut r = test_area();
        let z = zombie(&mut r);
        let s = sword(&mut r);
        assert!(r.add_entity(&z, ivec2(1, 1)));
        assert!(!r.add_entity(&z, ivec2(5, 5)));
        assert_eq!(z.loc(&r), Some(ivec2(1, 1)));
        assert_eq!(r.monsters(), &[z]);

        assert!(r.add_entity(&s, ivec2(1, 1)));
        assert!(!r.add_entity_randomly(&s));
        assert_eq!(r.items(), &[s]);

        let p = player(&mut r);
        assert!(r.add_entity(&p, ivec2(2, 2)));
        assert!(!r.add_entity(&p, ivec2(3, 3)));
        assert_eq!(p.loc(&r), Some(ivec2(2, 2)));

        // Removed entities can come back.
        assert!(r.remove_entity(&z));
        assert!(r.add_entity(&z, ivec2(5, 5)));
        assert_eq!(r.monsters(), &[z]);
    }

    #[test]
    fn bad_dimensions_are_errors() {
        for (w, h) in [(0, 5), (5, 0), (-3, 4), (i32::MAX, i32::MAX)] {
            assert!(Area::from_scratch(w, h, &wall_recipe()).is_err());
        }
        assert!(Area::from_scratch(1, 1, &wall_recipe()).is_ok());
    }

    #[test]
    #[should_panic]
    fn new_rejects_empty_area() {
        let _ = Area::new(0, 5);
    }

    #[test]
    fn shifting() {
        let mut r = test_area();
        let z = zombie(&mut r);
        let w = wall(&mut r);
        assert!(!r.shift_entity(&z, ivec2(1, 0)));
        assert!(r.add_entity(&z, ivec2(1, 1)));
        assert!(r.add_entity(&w, ivec2(2, 2)));
        assert!(r.shift_entity(&z, ivec2(1, 0)));
        assert_eq!(z.loc(&r), Some(ivec2(2, 1)));
        assert!(!r.shift_entity(&z, ivec2(0, 1)));
        assert_eq!(z.loc(&r), Some(ivec2(2, 1)));
    }

    #[test]
    fn dead_are_swept() {
        let mut r = test_area();
        let z1 = zombie(&mut r);
        let z2 = zombie(&mut r);
        let w = wall(&mut r);
        assert!(r.add_entity(&z1, ivec2(1, 1)));
        assert!(r.add_entity(&z2, ivec2(2, 1)));
        assert!(r.add_entity(&w, ivec2(3, 1)));

        z1.die(&mut r);
        w.die(&mut r);
        // Dead things don't block.
        assert!(r.entities_at(ivec2(1, 1), Filter::ALIVE).is_empty());
        assert_eq!(r.entities_at(ivec2(1, 1), Filter::ANY), vec![z1]);

        r.remove_dead_entities();
        assert_eq!(r.monsters(), &[z2]);
        assert!(r.doodads().is_empty());
        assert!(r.ecs.contains(*z2));
        assert!(!r.ecs.contains(*z1));

        // Belongings go with the body.
        let s = sword(&mut r);
        assert!(r.add_entity(&s, ivec2(2, 1)));
        assert!(z2.pick_up(&mut r, &s));
        z2.die(&mut r);
        r.remove_dead_entities();
        assert!(!r.ecs.contains(*s));
    }

    #[test]
    fn removing_hides() {
        let mut r = test_area();
        let i = sword(&mut r);
        assert!(r.add_entity(&i, ivec2(1, 1)));
        assert!(r.remove_entity(&i));
        assert!(i.hidden(&r));
        assert!(r.items().is_empty());
        assert!(!r.remove_entity(&i));
    }

    #[test]
    fn border_walls() {
        let r = Area::from_scratch(6, 5, &wall_recipe()).unwrap();
        assert_eq!(r.doodads().len(), 2 * 6 + 2 * 3);
        for pos in r.all_coordinates() {
            let edge = pos.x == 0 || pos.y == 0 || pos.x == 5 || pos.y == 4;
            assert_eq!(
                !r.entities_at(pos, Filter::only(Kind::Doodad)).is_empty(),
                edge
            );
        }
    }

    #[test]
    fn random_placement_fills_area() {
        let mut r = Area::new(3, 3).with_seed("fill");
        for _ in 0..9 {
            let z = zombie(&mut r);
            assert!(r.add_entity_randomly(&z));
        }
        let z = zombie(&mut r);
        assert!(!r.add_entity_randomly(&z));
        assert_eq!(r.monsters().len(), 9);
    }

    #[test]
    fn entering_and_losing() {
        let mut r = Area::from_scratch(8, 8, &wall_recipe()).unwrap();
        let p = player(&mut r);
        assert!(r.enter(&p));
        assert_eq!(r.scenario_status(), ScenarioStatus::Ongoing);
        let pos = p.loc(&r).unwrap();
        assert!(r.visibility.get(pos).unwrap().visible());

        p.die(&mut r);
        r.remove_dead_entities();
        assert_eq!(r.player(), None);
        assert_eq!(r.scenario_status(), ScenarioStatus::Lost);
    }
}
