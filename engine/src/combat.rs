use rand::Rng;

use crate::prelude::*;

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum AttackOutcome {
    /// Attack landed for this much damage after armor.
    Hit(i32),
    Miss,
}

impl Area {
    /// Resolve a melee attack and apply the damage to the defender.
    ///
    /// Hit chance is the attacker's to-hit against the defender's dodge as
    /// deciban odds. Damage is reduced by armor but never goes negative.
    pub fn resolve_attack(
        &mut self,
        attacker: &Entity,
        weapon: Option<Entity>,
        defender: &Entity,
    ) -> AttackOutcome {
        let (a, d) = (attacker.stats(self), defender.stats(self));
        let odds = Odds(a.to_hit - d.dodge);

        let hit: bool = self.rng.sample(odds);
        let outcome = if hit {
            let weapon_damage = weapon
                .and_then(|w| w.weapon(self))
                .map_or(0, |w| w.damage);
            let damage = (weapon_damage + a.damage - d.armor).max(0);
            defender.damage(self, damage);
            send_msg(Msg::Hurt(*defender));
            AttackOutcome::Hit(damage)
        } else {
            send_msg(Msg::Miss(*defender));
            AttackOutcome::Miss
        };

        self.report_attack(attacker, defender, outcome);
        log::debug!(
            "Area::resolve_attack: {attacker} vs {defender} at {odds}: \
             {outcome:?}"
        );
        outcome
    }

    fn report_attack(
        &self,
        attacker: &Entity,
        defender: &Entity,
        outcome: AttackOutcome,
    ) {
        use AttackOutcome::*;

        let (a, d) = (attacker.name(self), defender.name(self));
        if attacker.is_player(self) {
            let channel = Channel::PlayerAttack;
            match outcome {
                Hit(n) => msg!(channel; "You hit the {} for {} damage.", d, n),
                Miss => msg!(channel; "You miss the {}.", d),
            }
        } else if defender.is_player(self) {
            let channel = Channel::MonsterAttack;
            match outcome {
                Hit(n) => msg!(channel; "The {} hits you for {} damage.", a, n),
                Miss => msg!(channel; "The {} misses you.", a),
            }
        } else {
            let channel = Channel::MonsterAttack;
            match outcome {
                Hit(n) => {
                    msg!(channel; "The {} hits the {} for {} damage.", a, d, n)
                }
                Miss => msg!(channel; "The {} misses the {}.", a, d),
            }
        }
    }
}
