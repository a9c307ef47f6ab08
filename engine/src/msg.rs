//! Emitting messages about instant events to the UI layer

use std::{
    cell::RefCell,
    sync::mpsc::{self, Sender},
};

use derive_more::Deref;
use strum::Display;

use crate::prelude::*;

/// Message log channels, the UI can style or filter them separately.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Display)]
#[strum(serialize_all = "kebab-case")]
pub enum Channel {
    ModifierTick,
    MonsterAttack,
    MonsterDeath,
    Normal,
    PlayerAttack,
}

/// Interface for receiving game event messages for displaying.
#[derive(Clone, Debug, PartialEq)]
pub enum Msg {
    /// Text message for the message log.
    Message(Channel, String),

    /// Entity is hurt.
    Hurt(Entity),

    /// An attack missed an entity.
    Miss(Entity),

    /// Entity dies at position, play a death animation.
    Death(Entity, IVec2),
}

thread_local! {
    static RCV: RefCell<Option<Sender<Msg>>> = const { RefCell::new(None) };
}

/// Claims the message channel of the current thread, only the most recently
/// created receiver gets messages.
#[derive(Deref)]
pub struct Receiver(mpsc::Receiver<Msg>);

impl Default for Receiver {
    fn default() -> Self {
        let (send, recv) = mpsc::channel();
        RCV.with(|rcv| *rcv.borrow_mut() = Some(send));
        Receiver(recv)
    }
}

pub fn send_msg(msg: Msg) {
    RCV.with(|rcv| {
        if let Some(sender) = rcv.borrow().as_ref() {
            // Receiver may have been dropped, messages just go nowhere then.
            let _ = sender.send(msg);
        }
    });
}

#[macro_export]
macro_rules! msg {
    // NB. Even the simple cases needs to be wrapped in `format!` in case the
    // fmt string is doing named variable capture.
    ($channel:expr; $fmt:expr) => {
        $crate::send_msg($crate::Msg::Message($channel, format!($fmt)))
    };

    ($channel:expr; $fmt:expr, $($arg:expr),*) => {
        $crate::send_msg($crate::Msg::Message(
            $channel,
            format!($fmt, $($arg),*),
        ))
    };
}
