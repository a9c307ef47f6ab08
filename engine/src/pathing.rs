use std::collections::VecDeque;

use pathfinding::prelude::*;

use crate::prelude::*;

impl Area {
    /// Find a path for the entity to the destination.
    ///
    /// The destination cell is always considered enterable so that a path
    /// can lead up to an occupied cell like the one a pursued enemy stands
    /// in. The starting cell is not included in the returned waypoints.
    pub fn path(&self, e: &Entity, dest: IVec2) -> Option<VecDeque<IVec2>> {
        let start = e.loc(self)?;
        if !self.in_bounds(dest) {
            return None;
        }

        let (path, _) = astar(
            &start,
            |&a| {
                DIR_8
                    .iter()
                    .map(move |&d| a + d)
                    .filter(|&n| n == dest || self.can_place(e, n))
                    .map(|n| (n, 1))
                    .collect::<Vec<_>>()
            },
            |&a| (dest - a).chess_len(),
            |&a| a == dest,
        )?;

        let mut path = VecDeque::from(path);
        path.pop_front();
        Some(path)
    }
}
