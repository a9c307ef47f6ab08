//! Entity logic for carried and wielded items.

use crate::{ecs::*, prelude::*, INVENTORY_SLOTS};

impl Entity {
    pub fn is_item(&self, r: &impl AsRef<Area>) -> bool {
        self.kind(r) == Some(Kind::Item)
    }

    /// Weapon stats of an item, `None` if it isn't a weapon.
    pub fn weapon(&self, r: &impl AsRef<Area>) -> Option<Weapon> {
        let r = r.as_ref();
        r.ecs.get::<&Weapon>(**self).ok().map(|w| *w)
    }

    /// Carried items, not counting the wielded one.
    pub fn inventory(&self, r: &impl AsRef<Area>) -> Vec<Entity> {
        self.get::<Inventory>(r).0
    }

    pub fn carries(&self, r: &impl AsRef<Area>, item: &Entity) -> bool {
        self.wielded(r) == Some(*item) || self.inventory(r).contains(item)
    }

    /// Pick up an item lying on the character's cell.
    ///
    /// The item leaves the area and goes into the inventory.
    pub fn pick_up(&self, r: &mut impl AsMut<Area>, item: &Entity) -> bool {
        let r = r.as_mut();
        if !self.is_character(r) || !item.is_item(r) || !item.is_alive(r) {
            return false;
        }
        match (self.loc(r), item.loc(r)) {
            (Some(a), Some(b)) if a == b => {}
            _ => return false,
        }

        if self.inventory(r).len() >= INVENTORY_SLOTS {
            if self.is_player(r) {
                msg!(Channel::Normal; "You can't carry any more.");
            }
            return false;
        }

        if !r.remove_entity(item) {
            return false;
        }
        self.with_mut::<Inventory, _>(r, |inv| inv.push(*item));
        self.report(r, "pick up", item);
        true
    }

    /// Put a carried or wielded item down on the character's cell.
    pub fn drop_item(&self, r: &mut impl AsMut<Area>, item: &Entity) -> bool {
        let r = r.as_mut();
        if !self.carries(r, item) {
            return false;
        }
        let Some(pos) = self.loc(r) else {
            return false;
        };
        if !r.add_entity(item, pos) {
            return false;
        }

        if self.wielded(r) == Some(*item) {
            self.set(r, Wielding(None));
        } else {
            self.with_mut::<Inventory, _>(r, |inv| inv.retain(|e| e != item));
        }
        self.report(r, "drop", item);
        true
    }

    /// Wield a weapon from the inventory.
    ///
    /// A previously wielded weapon goes into the inventory in its place.
    pub fn wield(&self, r: &mut impl AsMut<Area>, item: &Entity) -> bool {
        let r = r.as_mut();
        if !self.inventory(r).contains(item) || item.weapon(r).is_none() {
            return false;
        }

        let old = self.wielded(r);
        self.with_mut::<Inventory, _>(r, |inv| {
            inv.retain(|e| e != item);
            inv.extend(old);
        });
        self.set(r, Wielding(Some(*item)));
        self.report(r, "wield", item);
        true
    }

    /// Move the wielded weapon into the inventory.
    pub fn unwield(&self, r: &mut impl AsMut<Area>) -> bool {
        let r = r.as_mut();
        let Some(item) = self.wielded(r) else {
            return false;
        };
        if self.inventory(r).len() >= INVENTORY_SLOTS {
            return false;
        }

        self.set(r, Wielding(None));
        self.with_mut::<Inventory, _>(r, |inv| inv.push(item));
        self.report(r, "put away", &item);
        true
    }

    fn report(&self, r: &Area, verb: &str, item: &Entity) {
        if self.is_player(r) {
            msg!(Channel::Normal; "You {} the {}.", verb, item.name(r));
        } else {
            log::debug!("Entity::report: {self} {verb} {item}");
        }
    }
}
