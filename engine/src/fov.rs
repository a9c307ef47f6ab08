//! Line of sight.

use util::dda_line;

use crate::{area::Filter, prelude::*};

impl Entity {
    /// Whether the position is inside the square the entity can see into.
    ///
    /// Hidden entities see nothing.
    pub fn within_sight(&self, r: &impl AsRef<Area>, pos: IVec2) -> bool {
        let Some(origin) = self.loc(r) else {
            return false;
        };
        (pos - origin).chess_len() <= self.stats(r).sight
    }
}

impl Area {
    /// Whether the viewer has a clear line of sight to the position.
    ///
    /// Any live entity opaque to the viewer on the cells leading up to the
    /// target blocks sight. The target cell itself never blocks.
    pub fn can_see(&self, viewer: &Entity, pos: IVec2) -> bool {
        let Some(origin) = viewer.loc(self) else {
            return false;
        };
        if !self.in_bounds(pos) || !viewer.within_sight(self, pos) {
            return false;
        }

        let line = dda_line(origin, pos);
        for &cell in &line[..line.len() - 1] {
            if self
                .entities_at(cell, Filter::ALIVE)
                .iter()
                .any(|e| !e.is_transparent_for(self, viewer))
            {
                return false;
            }
        }
        true
    }
}
