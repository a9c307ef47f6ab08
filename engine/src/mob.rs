//! Entity logic for characters.
use crate::{ecs::*, prelude::*, AP_PER_TURN, MAX_ACTION_POINTS};

impl Entity {
    /// Return current stats for an entity, factoring in its modifiers.
    ///
    /// This method should always be used when querying the stats of a
    /// character during gameplay, the raw `Stats` component has the base
    /// stats that don't include bonuses.
    pub fn stats(&self, r: &impl AsRef<Area>) -> Stats {
        let base = self.get::<Stats>(r);
        self.with::<Modifiers, _>(r, |ms| {
            ms.iter().fold(base, |acc, m| acc + m.bonus)
        })
    }

    pub fn base_stats(&self, r: &impl AsRef<Area>) -> Stats {
        self.get::<Stats>(r)
    }

    pub fn modifiers(&self, r: &impl AsRef<Area>) -> Vec<Modifier> {
        self.get::<Modifiers>(r).0
    }

    pub fn add_modifier(&self, r: &mut impl AsMut<Area>, m: Modifier) {
        self.with_mut::<Modifiers, _>(r, |ms| ms.push(m.clone()));
    }

    pub fn health(&self, r: &impl AsRef<Area>) -> i32 {
        self.get::<Health>(r).0
    }

    pub fn max_health(&self, r: &impl AsRef<Area>) -> i32 {
        self.stats(r).health
    }

    /// Set health, clamped between zero and maximum health.
    pub fn set_health(&self, r: &mut impl AsMut<Area>, hp: i32) {
        let r = r.as_mut();
        let hp = hp.min(self.max_health(r)).max(0);
        self.set(r, Health(hp));
    }

    pub fn damage(&self, r: &mut impl AsMut<Area>, amount: i32) {
        let r = r.as_mut();
        self.set_health(r, self.health(r) - amount);
    }

    pub fn heal(&self, r: &mut impl AsMut<Area>, amount: i32) {
        let r = r.as_mut();
        self.set_health(r, self.health(r) + amount);
    }

    pub fn wielded(&self, r: &impl AsRef<Area>) -> Option<Entity> {
        self.get::<Wielding>(r).0
    }

    pub fn action_points(&self, r: &impl AsRef<Area>) -> i32 {
        self.get::<ActionPoints>(r).0
    }

    /// Give the entity its action points for a new turn.
    pub fn grant_action_points(&self, r: &mut impl AsMut<Area>) {
        let r = r.as_mut();
        let ap = (self.action_points(r) + AP_PER_TURN).min(MAX_ACTION_POINTS);
        self.set(r, ActionPoints(ap));
    }

    pub fn xp(&self, r: &impl AsRef<Area>) -> i32 {
        self.get::<Xp>(r).0
    }

    pub fn gain_xp(&self, r: &mut impl AsMut<Area>, amount: i32) {
        let r = r.as_mut();
        self.set(r, Xp(self.xp(r) + amount));
    }

    /// Per-turn update, runs status effects.
    pub fn tick(&self, r: &mut impl AsMut<Area>) {
        let r = r.as_mut();
        if !self.is_character(r) {
            return;
        }

        let mut mods = self.get::<Modifiers>(r);
        let mut damage = 0;
        mods.retain_mut(|m| {
            damage += m.damage_per_turn;
            if let Some(text) = &m.tick_message {
                msg!(Channel::ModifierTick; "{}", text);
            }

            if m.duration > 0 {
                m.duration -= 1;
            }
            if m.duration == 0 {
                if let Some(text) = &m.expire_message {
                    msg!(Channel::ModifierTick; "{}", text);
                }
                return false;
            }
            true
        });
        self.set(r, mods);

        // Also clamps health to a maximum that may have just changed.
        self.set_health(r, self.health(r) - damage);
    }

    /// Things that happen when the entity dies.
    ///
    /// Hidden entities have no death action.
    pub fn death_action(&self, r: &mut impl AsMut<Area>) {
        let r = r.as_mut();
        let Some(pos) = self.loc(r) else { return };

        match self.kind(r) {
            Some(Kind::Monster) => {
                let text = match self.get::<DeathMessage>(r).0 {
                    s if s.is_empty() => format!("The {} dies.", self.name(r)),
                    s => s,
                };
                msg!(Channel::MonsterDeath; "{}", text);
                send_msg(Msg::Death(*self, pos));

                let award = self.get::<XpAward>(r).0;
                if let Some(player) = r.player() {
                    player.gain_xp(r, award);
                }
                log::info!("Entity::death_action: {self} died at {pos}");
            }
            Some(Kind::Player) => {
                msg!(Channel::Normal; "You die...");
                send_msg(Msg::Death(*self, pos));
                log::info!("Entity::death_action: player {self} died at {pos}");
            }
            Some(Kind::Doodad | Kind::Item) | None => {}
        }
    }
}
