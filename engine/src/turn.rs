//! Turn sequencing.

use crate::{area::Filter, prelude::*};

/// Things the player can do on their turn.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum PlayerAction {
    /// Move in a direction, attacks a monster standing there.
    Step(IVec2),
    /// Pass the turn.
    Wait,
    /// Pick up the first item on the player's cell.
    PickUp,
    /// Drop a carried item.
    Drop(Entity),
    /// Wield a weapon from the inventory.
    Wield(Entity),
    /// Put the wielded weapon away.
    Unwield,
}

impl Area {
    /// Run one turn of the world.
    ///
    /// Status effects run first, then the dead get their death actions and
    /// are swept away, and finally the surviving monsters act.
    pub fn tick(&mut self) {
        let living: Vec<Entity> = self
            .entities()
            .filter(|e| !e.is_player(self) && e.is_alive(self))
            .collect();
        for e in living {
            e.tick(self);
        }

        let dying: Vec<Entity> = self
            .entities()
            .filter(|e| !e.is_alive(self) && !e.hidden(self))
            .collect();
        for e in dying {
            e.death_action(self);
        }

        self.remove_dead_entities();

        for m in self.monsters().to_vec() {
            if m.hidden(self) || !m.is_alive(self) {
                continue;
            }
            m.grant_action_points(self);
            let task = m.evaluate(self);
            m.execute_task(self, task);
        }

        self.turn += 1;
    }

    /// Perform a player action and run the turn.
    ///
    /// Returns false without passing time if the action can't be done.
    pub fn act(&mut self, action: PlayerAction) -> bool {
        let Some(player) = self.player() else {
            return false;
        };
        if !player.is_alive(self) {
            return false;
        }

        let Some(pos) = player.loc(self) else {
            return false;
        };

        let done = match action {
            PlayerAction::Step(dir) => {
                let target = self
                    .entities_at(pos + dir, Filter::only(Kind::Monster))
                    .first()
                    .copied();
                if let Some(target) = target {
                    let weapon = player.wielded(self);
                    self.resolve_attack(&player, weapon, &target);
                    true
                } else if self.shift_entity(&player, dir) {
                    self.update_visibility_matrix();
                    true
                } else {
                    false
                }
            }
            PlayerAction::Wait => true,
            PlayerAction::PickUp => {
                let item = self
                    .entities_at(pos, Filter::only(Kind::Item))
                    .first()
                    .copied();
                item.is_some_and(|item| player.pick_up(self, &item))
            }
            PlayerAction::Drop(item) => player.drop_item(self, &item),
            PlayerAction::Wield(item) => player.wield(self, &item),
            PlayerAction::Unwield => player.unwield(self),
        };
        if !done {
            return false;
        }

        self.tick();
        self.update_visibility_matrix();
        true
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{ecs::*, test_util::*};

    #[test]
    fn poisoned_monster_dies_before_acting() {
        let mut r = test_area();
        let p = player(&mut r);
        let z = zombie(&mut r);
        assert!(r.add_entity(&p, ivec2(1, 1)));
        assert!(r.add_entity(&z, ivec2(2, 1)));

        z.set_health(&mut r, 1);
        z.add_modifier(&mut r, Modifier {
            name: "poison".into(),
            damage_per_turn: 5,
            duration: 3,
            ..Default::default()
        });

        let hp = p.health(&r);
        r.tick();
        assert_eq!(p.xp(&r), ZOMBIE_XP);
        assert!(r.monsters().is_empty());
        // The zombie never got to swing.
        assert_eq!(p.health(&r), hp);
        assert_eq!(r.turn(), 1);
    }

    #[test]
    fn dying_is_reported_in_order() {
        let mut r = test_area();
        let p = player(&mut r);
        let z = zombie(&mut r);
        assert!(r.add_entity(&p, ivec2(1, 1)));
        assert!(r.add_entity(&z, ivec2(3, 1)));
        z.set_health(&mut r, 1);
        z.add_modifier(&mut r, Modifier {
            name: "rot".into(),
            damage_per_turn: 5,
            duration: 1,
            tick_message: Some("The zombie rots.".into()),
            expire_message: Some("The rot runs its course.".into()),
            ..Default::default()
        });

        let messages = Receiver::default();
        r.tick();
        let text = |channel, s: &str| Msg::Message(channel, s.to_string());
        assert_eq!(messages.try_iter().collect::<Vec<_>>(), vec![
            text(Channel::ModifierTick, "The zombie rots."),
            text(Channel::ModifierTick, "The rot runs its course."),
            text(Channel::MonsterDeath, "The zombie dies."),
            Msg::Death(z, ivec2(3, 1)),
        ]);
    }

    #[test]
    fn player_death_is_reported() {
        let mut r = test_area();
        let p = player(&mut r);
        assert!(r.add_entity(&p, ivec2(1, 1)));
        let messages = Receiver::default();
        p.die(&mut r);
        r.tick();
        assert_eq!(messages.try_iter().collect::<Vec<_>>(), vec![
            Msg::Message(Channel::Normal, "You die...".into()),
            Msg::Death(p, ivec2(1, 1)),
        ]);
        assert_eq!(r.player(), None);
    }

    #[test]
    fn player_handles_items() {
        let mut r = test_area();
        let p = player(&mut r);
        let s = sword(&mut r);
        assert!(r.add_entity(&p, ivec2(1, 1)));
        assert!(r.add_entity(&s, ivec2(2, 1)));

        // Nothing to pick up or wield yet, no time passes.
        assert!(!r.act(PlayerAction::PickUp));
        assert!(!r.act(PlayerAction::Wield(s)));
        assert_eq!(r.turn(), 0);

        let messages = Receiver::default();
        assert!(r.act(PlayerAction::Step(ivec2(1, 0))));
        assert!(r.act(PlayerAction::PickUp));
        assert!(r.act(PlayerAction::Wield(s)));
        assert_eq!(p.wielded(&r), Some(s));
        assert!(r.act(PlayerAction::Unwield));
        assert!(!r.act(PlayerAction::Unwield));
        assert!(r.act(PlayerAction::Drop(s)));
        assert_eq!(r.entities_at(ivec2(2, 1), Filter::only(Kind::Item)), vec![
            s
        ]);
        assert_eq!(r.turn(), 5);

        let log: Vec<_> = messages.try_iter().collect();
        assert_eq!(log, vec![
            Msg::Message(Channel::Normal, "You pick up the sword.".into()),
            Msg::Message(Channel::Normal, "You wield the sword.".into()),
            Msg::Message(Channel::Normal, "You put away the sword.".into()),
            Msg::Message(Channel::Normal, "You drop the sword.".into()),
        ]);
    }

    #[test]
    fn monsters_close_in_and_attack() {
        let mut r = test_area();
        let p = player(&mut r);
        let z = zombie(&mut r);
        assert!(r.add_entity(&p, ivec2(1, 1)));
        assert!(r.add_entity(&z, ivec2(6, 1)));

        for _ in 0..4 {
            r.tick();
        }
        assert_eq!(z.distance(&r, &p), Some(1));
        assert!(z.is_alarmed(&r));
        assert!(z
            .task_history(&r)
            .iter()
            .all(|t| matches!(t, Task::Pursue(_) | Task::Attack(_))));
    }

    #[test]
    fn player_walks_and_bumps() {
        let mut r = test_area();
        let p = player(&mut r);
        let z = statue(&mut r);
        let w = wall(&mut r);
        assert!(r.add_entity(&p, ivec2(1, 1)));
        assert!(r.add_entity(&z, ivec2(3, 1)));
        assert!(r.add_entity(&w, ivec2(1, 2)));

        assert!(!r.act(PlayerAction::Step(ivec2(0, 1))));
        assert_eq!(r.turn(), 0);

        assert!(r.act(PlayerAction::Step(ivec2(1, 0))));
        assert_eq!(p.loc(&r), Some(ivec2(2, 1)));
        assert_eq!(r.turn(), 1);
        assert!(r.visibility_matrix().get(ivec2(2, 1)).unwrap().visible());

        // Bumping into the statue attacks it instead of moving.
        p.add_modifier(&mut r, Modifier {
            bonus: Stats {
                to_hit: 200,
                damage: 100,
                ..Default::default()
            },
            ..Default::default()
        });
        assert!(r.act(PlayerAction::Step(ivec2(1, 0))));
        assert_eq!(p.loc(&r), Some(ivec2(2, 1)));
        assert!(r.monsters().is_empty());
        assert_eq!(p.xp(&r), STATUE_XP);

        assert!(r.act(PlayerAction::Wait));
        assert_eq!(r.turn(), 3);
    }

    #[test]
    fn zombies_kill_player() {
        let mut r = test_area();
        let p = r.spawn_player("victim", Stats {
            health: 1,
            ..Default::default()
        });
        assert!(r.add_entity(&p, ivec2(1, 1)));
        for x in 0..3 {
            let z = zombie(&mut r);
            z.add_modifier(&mut r, Modifier {
                bonus: Stats {
                    to_hit: 200,
                    damage: 5,
                    ..Default::default()
                },
                ..Default::default()
            });
            assert!(r.add_entity(&z, ivec2(x, 2)));
        }

        r.tick();
        assert!(!p.is_alive(&r));
        assert_eq!(r.scenario_status(), ScenarioStatus::Lost);
        assert!(!r.act(PlayerAction::Wait));

        // Body gets cleaned up on the next turn.
        r.tick();
        assert_eq!(r.player(), None);
    }
}
