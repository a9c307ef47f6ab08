//! Carrying out AI tasks.

use rand::seq::SliceRandom;
use util::segment_interpolation;

use crate::{ai::Ai, ecs::*, prelude::*};

/// Action point cost of a single step by movement speed.
const MOVEMENT_COST: [(f32, f32); 5] =
    [(0.0, 30.0), (10.0, 10.0), (20.0, 7.0), (25.0, 5.0), (30.0, 1.0)];

/// Action point cost of an unarmed attack by speed.
const UNARMED_ATTACK_COST: [(f32, f32); 5] =
    [(0.0, 20.0), (10.0, 10.0), (20.0, 5.0), (25.0, 3.0), (30.0, 1.0)];

impl Entity {
    pub fn movement_cost(&self, r: &impl AsRef<Area>) -> i32 {
        let speed = self.stats(r).movement_speed as f32;
        segment_interpolation(speed, &MOVEMENT_COST).round() as i32
    }

    pub fn attack_cost(&self, r: &impl AsRef<Area>) -> i32 {
        if let Some(weapon) = self.wielded(r).and_then(|w| w.weapon(r)) {
            return weapon.attack_cost;
        }
        let speed = self.stats(r).speed as f32;
        segment_interpolation(speed, &UNARMED_ATTACK_COST).round() as i32
    }

    /// Carry out a task and spend the action points it costs.
    ///
    /// Returns the cost, or `None` if the entity couldn't act this turn.
    /// `CarryOn` repeats the most recent task, other tasks go into the task
    /// history.
    pub fn execute_task(
        &self,
        r: &mut impl AsMut<Area>,
        task: Task,
    ) -> Option<i32> {
        let r = r.as_mut();

        let task = if task == Task::CarryOn {
            self.last_task(r)?
        } else {
            self.with_mut::<Ai, _>(r, |ai| ai.last_tasks.push(task));
            task
        };

        let cost = self.perform(r, task)?;
        let ap = self.action_points(r);
        self.set(r, ActionPoints(ap - cost));
        Some(cost)
    }

    fn perform(&self, r: &mut Area, task: Task) -> Option<i32> {
        match task {
            Task::Attack(target) => self.melee(r, &target),
            Task::CarryOn => {
                panic!("Entity::perform: CarryOn can't be performed directly")
            }
            Task::CastSpell(target) => {
                log::debug!("Entity::perform: {self} can't cast at {target}");
                None
            }
            Task::Explore => self.explore(r),
            Task::Follow(target) => {
                log::debug!("Entity::perform: {self} can't follow {target}");
                None
            }
            Task::Investigate(pos) => self.move_along(r, pos, false),
            Task::Pursue(target) => {
                let pos = target.loc(r)?;
                self.move_along(r, pos, true)
            }
            Task::Rest | Task::Wait => Some(0),
            Task::Retreat(threat) => self.retreat(r, threat),
            Task::StepAside => {
                log::debug!("Entity::perform: {self} can't step aside");
                None
            }
        }
    }

    fn melee(&self, r: &mut Area, target: &Entity) -> Option<i32> {
        if !target.is_alive(r) || self.distance(r, target) != Some(1) {
            return None;
        }

        let cost = self.attack_cost(r);
        if cost > self.action_points(r) {
            return None;
        }

        let weapon = self.wielded(r);
        r.resolve_attack(self, weapon, target);
        Some(cost)
    }

    /// Take one step along the cached path towards `dest`.
    ///
    /// A pursuit path gets replanned when the target has moved away from its
    /// end.
    fn move_along(
        &self,
        r: &mut Area,
        dest: IVec2,
        is_pursuit: bool,
    ) -> Option<i32> {
        let mut ai = self.get::<Ai>(r);

        let replan = match &ai.chosen_path {
            None => true,
            Some(path) if path.is_empty() => true,
            Some(path) => is_pursuit && path.back() != Some(&dest),
        };
        if replan {
            ai.chosen_path = r.path(self, dest);
        }

        let ret = match ai.chosen_path.as_ref().map(|p| p.len()) {
            None => None,
            // Already there.
            Some(0) => Some(0),
            Some(_) => {
                let cost = self.movement_cost(r);
                if cost > self.action_points(r) {
                    None
                } else {
                    let next =
                        ai.chosen_path.as_mut().and_then(|p| p.pop_front());
                    if next.is_some_and(|pos| r.place_entity(self, pos)) {
                        Some(cost)
                    } else {
                        // Something got in the way, plan again next time.
                        ai.chosen_path = None;
                        None
                    }
                }
            }
        };

        self.set(r, ai);
        ret
    }

    fn explore(&self, r: &mut Area) -> Option<i32> {
        let cost = self.movement_cost(r);
        if cost > self.action_points(r) {
            return None;
        }

        let mut dirs = DIR_8;
        dirs.shuffle(&mut r.rng);
        dirs.into_iter()
            .any(|d| r.shift_entity(self, d))
            .then_some(cost)
    }

    fn retreat(&self, r: &mut Area, threat: IVec2) -> Option<i32> {
        let pos = self.loc(r)?;
        let dir = threat.dir8_towards(&pos);
        if dir == IVec2::ZERO {
            return None;
        }

        let cost = self.movement_cost(r);
        if cost > self.action_points(r) {
            return None;
        }
        r.shift_entity(self, dir).then_some(cost)
    }
}
