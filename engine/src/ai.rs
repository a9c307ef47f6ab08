//! Monsters figuring out what to do on their own.
use std::collections::VecDeque;

use strum::{Display, EnumString};

use crate::{prelude::*, INVESTIGATE_RADIUS, REMEMBERED_TASKS};

/// Something a monster decided to do.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Task {
    Attack(Entity),
    /// Keep doing whatever was done last turn.
    CarryOn,
    CastSpell(Entity),
    Explore,
    Follow(Entity),
    /// Go look at a spot where something was last seen.
    Investigate(IVec2),
    Pursue(Entity),
    Rest,
    /// Back off from a threat at the given position.
    Retreat(IVec2),
    StepAside,
    Wait,
}

#[derive(
    Copy, Clone, Debug, Default, Eq, PartialEq, Hash, Display, EnumString,
)]
pub enum AiKind {
    /// Never does anything.
    #[default]
    #[strum(serialize = "inert")]
    Inert,
    /// Goes straight for the player and hits them.
    #[strum(serialize = "melee zombie")]
    MeleeZombie,
}

/// Fixed-size memory of the most recent tasks, oldest get overwritten.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub(crate) struct TaskHistory {
    buf: [Option<Task>; REMEMBERED_TASKS],
    head: usize,
    len: usize,
}

impl TaskHistory {
    pub fn push(&mut self, task: Task) {
        self.buf[(self.head + self.len) % REMEMBERED_TASKS] = Some(task);
        if self.len < REMEMBERED_TASKS {
            self.len += 1;
        } else {
            self.head = (self.head + 1) % REMEMBERED_TASKS;
        }
    }

    pub fn last(&self) -> Option<Task> {
        if self.len == 0 {
            return None;
        }
        self.buf[(self.head + self.len - 1) % REMEMBERED_TASKS]
    }

    /// Iterate tasks from oldest to newest.
    pub fn iter(&self) -> impl Iterator<Item = Task> + '_ {
        (0..self.len)
            .filter_map(|i| self.buf[(self.head + i) % REMEMBERED_TASKS])
    }

    pub fn len(&self) -> usize {
        self.len
    }
}

/// Monster mind state that persists between turns.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub(crate) struct Ai {
    pub kind: AiKind,
    /// Set when the monster first spots an enemy, never cleared.
    pub alarmed: bool,
    /// Where the enemy was last seen.
    pub alarm_coordinates: Option<IVec2>,
    /// Remaining waypoints of the current movement task.
    pub chosen_path: Option<VecDeque<IVec2>>,
    pub last_tasks: TaskHistory,
}

impl Ai {
    pub fn new(kind: AiKind) -> Self {
        Ai {
            kind,
            ..Default::default()
        }
    }
}

impl Entity {
    pub fn ai_kind(&self, r: &impl AsRef<Area>) -> AiKind {
        self.with::<Ai, _>(r, |ai| ai.kind)
    }

    pub fn is_alarmed(&self, r: &impl AsRef<Area>) -> bool {
        self.with::<Ai, _>(r, |ai| ai.alarmed)
    }

    pub fn alarm_coordinates(&self, r: &impl AsRef<Area>) -> Option<IVec2> {
        self.with::<Ai, _>(r, |ai| ai.alarm_coordinates)
    }

    pub fn last_task(&self, r: &impl AsRef<Area>) -> Option<Task> {
        self.with::<Ai, _>(r, |ai| ai.last_tasks.last())
    }

    /// Tasks the entity has started, oldest first.
    pub fn task_history(&self, r: &impl AsRef<Area>) -> Vec<Task> {
        self.with::<Ai, _>(r, |ai| ai.last_tasks.iter().collect())
    }

    /// Decide what to do this turn.
    ///
    /// Updates the alarm state. The cached path is dropped whenever a new
    /// movement task is started instead of continuing the previous one.
    pub fn evaluate(&self, r: &mut impl AsMut<Area>) -> Task {
        let r = r.as_mut();

        let mut ai = self.get::<Ai>(r);
        let task = match ai.kind {
            AiKind::Inert => Task::Rest,
            AiKind::MeleeZombie => self.evaluate_melee_zombie(r, &mut ai),
        };
        self.set(r, ai);

        log::debug!("Entity::evaluate: {self} decides to {task:?}");
        task
    }

    fn evaluate_melee_zombie(&self, r: &Area, ai: &mut Ai) -> Task {
        let Some(pos) = self.loc(r) else {
            return Task::Rest;
        };
        let last = ai.last_tasks.last();

        if let Some((target, target_pos)) = self.visible_enemy(r) {
            ai.alarmed = true;
            ai.alarm_coordinates = Some(target_pos);

            if self.distance(r, &target) == Some(1) {
                return Task::Attack(target);
            }
            if matches!(last, Some(Task::Pursue(_))) {
                return Task::CarryOn;
            }
            ai.chosen_path = None;
            return Task::Pursue(target);
        }

        if let (true, Some(alarm)) = (ai.alarmed, ai.alarm_coordinates) {
            let far = (alarm - pos).chess_len() > INVESTIGATE_RADIUS;
            if matches!(last, Some(Task::Investigate(_))) && far {
                return Task::CarryOn;
            }
            ai.chosen_path = None;
            return Task::Investigate(alarm);
        }

        Task::Rest
    }

    /// The enemy this entity can currently see, and where it is.
    fn visible_enemy(&self, r: &Area) -> Option<(Entity, IVec2)> {
        if self.is_player(r) {
            return None;
        }
        let player = r.player()?;
        let pos = player.loc(r)?;
        (player.is_alive(r) && r.can_see(self, pos)).then_some((player, pos))
    }
}
