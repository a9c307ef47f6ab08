//! The player's memory of the area.

use bitflags::bitflags;

use crate::{area::Filter, prelude::*};

bitflags! {
    /// How much the player knows about a cell.
    ///
    /// Levels are a set, sensing something and seeing the cell can coexist.
    #[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
    pub struct Levels: u8 {
        const NEVER_SEEN = 1 << 0;
        const SENSE_DOODADS = 1 << 1;
        const SENSE_ITEMS = 1 << 2;
        const SENSE_MONSTERS = 1 << 3;
        const VISIBLE = 1 << 4;
    }
}

/// Snapshot of an entity as it was when last seen.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Glimpse {
    pub entity: Entity,
    pub name: String,
    pub icon: char,
}

impl Glimpse {
    fn new(r: &impl AsRef<Area>, e: Entity) -> Self {
        Glimpse {
            entity: e,
            name: e.name(r),
            icon: e.icon(r),
        }
    }
}

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct VisibilityInfo {
    pub levels: Levels,
    pub remembered_doodads: Vec<Glimpse>,
    pub remembered_items: Vec<Glimpse>,
    pub remembered_monsters: Vec<Glimpse>,
}

impl VisibilityInfo {
    pub fn never_seen(&self) -> bool {
        self.levels.contains(Levels::NEVER_SEEN)
    }

    pub fn visible(&self) -> bool {
        self.levels.contains(Levels::VISIBLE)
    }

    pub fn sense_doodads(&self) -> bool {
        self.levels.contains(Levels::SENSE_DOODADS)
    }

    pub fn sense_items(&self) -> bool {
        self.levels.contains(Levels::SENSE_ITEMS)
    }

    pub fn sense_monsters(&self) -> bool {
        self.levels.contains(Levels::SENSE_MONSTERS)
    }
}

/// Visibility info for every cell of an area.
#[derive(Clone, Debug, Default)]
pub struct VisibilityMatrix {
    width: i32,
    cells: Vec<VisibilityInfo>,
}

impl VisibilityMatrix {
    fn idx(&self, pos: IVec2) -> Option<usize> {
        if self.width <= 0 || pos.x < 0 || pos.y < 0 || pos.x >= self.width {
            return None;
        }
        let i = (pos.y * self.width + pos.x) as usize;
        (i < self.cells.len()).then_some(i)
    }

    pub fn get(&self, pos: IVec2) -> Option<&VisibilityInfo> {
        self.idx(pos).map(|i| &self.cells[i])
    }

    fn get_mut(&mut self, pos: IVec2) -> Option<&mut VisibilityInfo> {
        self.idx(pos).map(|i| &mut self.cells[i])
    }
}

impl Area {
    pub fn visibility_matrix(&self) -> &VisibilityMatrix {
        &self.visibility
    }

    /// Forget everything about the area.
    pub(crate) fn reset_visibility_matrix(&mut self) {
        let n = self.width() as usize * self.height() as usize;
        self.visibility = VisibilityMatrix {
            width: self.width(),
            cells: vec![
                VisibilityInfo {
                    levels: Levels::NEVER_SEEN,
                    ..Default::default()
                };
                n
            ],
        };
    }

    /// Recompute what the player sees.
    ///
    /// Visible cells get their remembered contents refreshed. Cells that go
    /// out of view keep whatever was remembered about them.
    pub fn update_visibility_matrix(&mut self) {
        let player = self.player();
        let mut matrix = std::mem::take(&mut self.visibility);

        for pos in self.all_coordinates() {
            let Some(info) = matrix.get_mut(pos) else {
                continue;
            };

            if !player.is_some_and(|p| self.can_see(&p, pos)) {
                info.levels.remove(Levels::VISIBLE);
                continue;
            }

            let glimpses = |kind| -> Vec<Glimpse> {
                self.entities_at(pos, Filter::only(kind))
                    .into_iter()
                    .map(|e| Glimpse::new(self, e))
                    .collect()
            };

            info.levels = Levels::VISIBLE;
            info.remembered_doodads = glimpses(Kind::Doodad);
            info.remembered_items = glimpses(Kind::Item);
            info.remembered_monsters = glimpses(Kind::Monster);
        }

        self.visibility = matrix;
    }
}

#[cfg(test)]
mod test {
    use super::Levels;
    use crate::{prelude::*, test_util::*};

    #[test]
    fn starts_unseen() {
        let r = test_area();
        for pos in r.all_coordinates() {
            let info = r.visibility_matrix().get(pos).unwrap();
            assert!(info.never_seen());
            assert!(!info.visible());
        }
        assert!(r.visibility_matrix().get(ivec2(10, 0)).is_none());
        assert!(r.visibility_matrix().get(ivec2(0, -1)).is_none());
    }

    #[test]
    fn seen_cells_lose_never_seen() {
        let mut r = test_area();
        let p = player(&mut r);
        let w = wall(&mut r);
        assert!(r.add_entity(&p, ivec2(1, 1)));
        assert!(r.add_entity(&w, ivec2(3, 1)));
        r.update_visibility_matrix();

        let m = r.visibility_matrix();
        assert!(m.get(ivec2(1, 1)).unwrap().visible());
        assert!(!m.get(ivec2(1, 1)).unwrap().never_seen());
        let wall_cell = m.get(ivec2(3, 1)).unwrap();
        assert!(wall_cell.visible());
        assert_eq!(wall_cell.remembered_doodads[0].entity, w);
        assert!(m.get(ivec2(5, 1)).unwrap().never_seen());
    }

    #[test]
    fn memory_persists_through_occlusion() {
        let mut r = test_area();
        let p = player(&mut r);
        let z = zombie(&mut r);
        assert!(r.add_entity(&p, ivec2(1, 5)));
        assert!(r.add_entity(&z, ivec2(5, 5)));
        r.update_visibility_matrix();

        let info = r.visibility_matrix().get(ivec2(5, 5)).unwrap();
        assert!(info.visible());
        assert!(info.remembered_monsters.iter().any(|g| g.entity == z));

        // Put a wall in between.
        let w = wall(&mut r);
        assert!(r.add_entity(&w, ivec2(3, 5)));
        r.update_visibility_matrix();

        let info = r.visibility_matrix().get(ivec2(5, 5)).unwrap();
        assert!(!info.visible());
        assert!(!info.never_seen());
        assert!(info.remembered_monsters.iter().any(|g| g.entity == z));
    }

    #[test]
    fn sensing_survives_losing_sight() {
        let mut r = test_area();
        let p = player(&mut r);
        assert!(r.add_entity(&p, ivec2(1, 1)));
        r.update_visibility_matrix();

        r.visibility
            .get_mut(ivec2(8, 8))
            .unwrap()
            .levels
            .insert(Levels::SENSE_ITEMS | Levels::VISIBLE);
        let w = wall(&mut r);
        assert!(r.add_entity(&w, ivec2(7, 7)));
        r.update_visibility_matrix();

        let info = r.visibility_matrix().get(ivec2(8, 8)).unwrap();
        assert!(!info.visible());
        assert!(info.sense_items());
    }

    #[test]
    fn no_player_no_sight() {
        let mut r = test_area();
        let p = player(&mut r);
        assert!(r.add_entity(&p, ivec2(1, 1)));
        r.update_visibility_matrix();
        p.die(&mut r);
        r.remove_dead_entities();
        r.update_visibility_matrix();
        assert!(r.all_coordinates().all(|pos| !r
            .visibility_matrix()
            .get(pos)
            .unwrap()
            .visible()));
    }
}
