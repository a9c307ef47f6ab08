//! Generic entity logic.
use std::fmt;

use derive_more::Deref;
use hecs::Component;

use crate::{ecs::*, prelude::*};

// Dummy wrapper so we can write impls for it directly instead of deriving a
// trait for hecs::Entity and writing every fn signature twice.
/// Game entity identifier datatype. All the actual contents live in the ECS.
#[derive(Copy, Clone, Hash, Eq, Ord, PartialEq, PartialOrd, Debug, Deref)]
pub struct Entity(pub(crate) hecs::Entity);

impl Entity {
    pub(crate) fn get<T>(&self, r: &impl AsRef<Area>) -> T
    where
        T: Component + Clone + Default,
    {
        let r = r.as_ref();
        r.ecs
            .get::<&T>(**self)
            .map(|c| (*c).clone())
            .unwrap_or_default()
    }

    pub(crate) fn set<T>(&self, r: &mut impl AsMut<Area>, val: T)
    where
        T: Component + Default + PartialEq,
    {
        let r = r.as_mut();
        if val == T::default() {
            // Remove default values, abstraction layer assumes components are
            // always present but defaulted.
            //
            // Will give an error if the component wasn't there to begin with,
            // just ignore that.
            let _ = r.ecs.remove_one::<T>(**self);
        } else if r.ecs.insert_one(**self, val).is_err() {
            log::warn!("Entity::set: {self} does not exist");
        }
    }

    /// Access a component using a closure.
    ///
    /// Use for complex components that aren't just atomic values.
    pub(crate) fn with<T: Component + Default, U>(
        &self,
        r: &impl AsRef<Area>,
        f: impl Fn(&T) -> U,
    ) -> U {
        let r = r.as_ref();
        let scratch = T::default();
        if let Ok(c) = r.ecs.get::<&T>(**self) {
            f(&*c)
        } else {
            f(&scratch)
        }
    }

    /// Access and mutate a component using a closure.
    ///
    /// Use for complex components that aren't just atomic values.
    pub(crate) fn with_mut<T: Component + Default + Eq, U>(
        &self,
        r: &mut impl AsMut<Area>,
        mut f: impl FnMut(&mut T) -> U,
    ) -> U {
        let r = r.as_mut();
        let mut delete = false;
        let mut insert = false;
        let ret;

        let mut scratch = T::default();
        if let Ok(query) = r.ecs.query_one_mut::<&mut T>(**self) {
            ret = f(&mut *query);
            // We created a default value once, reuse it here.
            if *query == scratch {
                delete = true;
            }
        } else {
            ret = f(&mut scratch);
            if scratch != T::default() {
                insert = true;
            }
        }

        if delete {
            // Component became default value, remove from ECS.
            let _ = r.ecs.remove_one::<T>(**self);
        } else if insert && r.ecs.insert_one(**self, scratch).is_err() {
            log::warn!("Entity::with_mut: {self} does not exist");
        }

        ret
    }

    pub fn kind(&self, r: &impl AsRef<Area>) -> Option<Kind> {
        let r = r.as_ref();
        r.ecs.get::<&Kind>(**self).ok().map(|k| *k)
    }

    pub fn is_player(&self, r: &impl AsRef<Area>) -> bool {
        self.kind(r) == Some(Kind::Player)
    }

    pub fn is_monster(&self, r: &impl AsRef<Area>) -> bool {
        self.kind(r) == Some(Kind::Monster)
    }

    pub fn is_character(&self, r: &impl AsRef<Area>) -> bool {
        self.kind(r).is_some_and(Kind::is_character)
    }

    pub fn name(&self, r: &impl AsRef<Area>) -> String {
        self.get::<Name>(r).0
    }

    pub fn recipe_id(&self, r: &impl AsRef<Area>) -> String {
        self.get::<RecipeId>(r).0
    }

    pub fn icon(&self, r: &impl AsRef<Area>) -> char {
        match self.get::<Icon>(r) {
            Icon('\0') => '?',
            Icon(c) => c,
        }
    }

    ////////////////////////////////
    // Position

    /// Position of the entity, `None` if it's hidden.
    pub fn loc(&self, r: &impl AsRef<Area>) -> Option<IVec2> {
        let r = r.as_ref();
        r.ecs.get::<&Pos>(**self).ok().map(|p| p.0)
    }

    /// Set position without any collision or bounds checks.
    pub(crate) fn set_loc(&self, r: &mut impl AsMut<Area>, pos: IVec2) {
        let r = r.as_mut();
        if r.ecs.insert_one(**self, Pos(pos)).is_err() {
            log::warn!("Entity::set_loc: {self} does not exist");
        }
    }

    /// Take the entity out of the grid, eg. when it's put in an inventory.
    pub fn hide(&self, r: &mut impl AsMut<Area>) {
        let r = r.as_mut();
        let _ = r.ecs.remove_one::<Pos>(**self);
    }

    pub fn hidden(&self, r: &impl AsRef<Area>) -> bool {
        self.loc(r).is_none()
    }

    /// Chessboard distance to other entity, `None` if either is hidden.
    pub fn distance(
        &self,
        r: &impl AsRef<Area>,
        other: &Entity,
    ) -> Option<i32> {
        let (Some(a), Some(b)) = (self.loc(r), other.loc(r)) else {
            return None;
        };
        Some((b - a).chess_len())
    }

    ////////////////////////////////
    // Collision

    /// Whether this entity can ever be blocked by the other one.
    ///
    /// The relation is not symmetric, a character is blocked by a wall but
    /// the wall is not blocked by the character.
    pub fn can_collide(&self, r: &impl AsRef<Area>, other: &Entity) -> bool {
        if self == other {
            return false;
        }
        let (a, b) = (self.get::<Collision>(r), other.get::<Collision>(r));
        a.blocked_by.intersects(b.blocks)
    }

    pub fn collides(&self, r: &impl AsRef<Area>, other: &Entity) -> bool {
        match self.loc(r) {
            Some(pos) => self.would_collide(r, other, pos),
            None => false,
        }
    }

    /// Whether this entity would collide with other if it were at `pos`.
    ///
    /// Does not move the entity.
    pub fn would_collide(
        &self,
        r: &impl AsRef<Area>,
        other: &Entity,
        pos: IVec2,
    ) -> bool {
        other.loc(r) == Some(pos) && self.can_collide(r, other)
    }

    ////////////////////////////////
    // Life and death

    pub fn is_alive(&self, r: &impl AsRef<Area>) -> bool {
        if self.is_character(r) {
            self.get::<Health>(r).0 > 0
        } else {
            !self.get::<IsDead>(r).0
        }
    }

    /// Mark the entity dead.
    ///
    /// The entity stays in the area until dead entities are swept.
    pub fn die(&self, r: &mut impl AsMut<Area>) {
        let r = r.as_mut();
        if self.is_character(r) {
            self.set(r, Health(0));
        } else {
            self.set(r, IsDead(true));
        }
    }

    ////////////////////////////////
    // Visibility

    /// Whether `viewer` can see through this entity.
    pub fn is_transparent_for(
        &self,
        r: &impl AsRef<Area>,
        viewer: &Entity,
    ) -> bool {
        if self.kind(r) != Some(Kind::Doodad) || self.get::<IsTransparent>(r).0
        {
            return true;
        }

        // Opaque doodad, some monsters have special sight.
        if viewer.is_monster(r) {
            let id = self.recipe_id(r);
            return viewer.with::<SeeThrough, _>(r, |s| s.contains(&id));
        }

        false
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0.id())
    }
}
