//! Per-container change notification.
//!
//! Every [`Object`](crate::Object) and [`Array`](crate::Array) owns its own
//! listener list. A successful mutation raises a [`ChangePhase::Changing`]
//! event, applies the change, then raises [`ChangePhase::Changed`] to the
//! same snapshot of listeners. Events never bubble to enclosing containers,
//! and a failed mutation raises nothing.

use crate::value::Value;
use std::fmt;
use std::sync::Arc;

/// A change callback. Listeners run synchronously on the mutating call.
pub type Listener = Arc<dyn Fn(&ChangeEvent<'_>) + Send + Sync>;

/// Handle returned by `subscribe`, used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChangeKind {
    Add,
    Remove,
    Replace,
    Clear,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChangePhase {
    /// Raised before the container is modified.
    Changing,
    /// Raised after the container is modified.
    Changed,
}

/// The slot a change applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChangeKey<'a> {
    Name(&'a str),
    Position(usize),
}

impl fmt::Display for ChangeKey<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChangeKey::Name(name) => write!(f, "\"{name}\""),
            ChangeKey::Position(index) => write!(f, "[{index}]"),
        }
    }
}

/// One notification.
///
/// `value` is the inserted or replacing value for `Add`/`Replace`, the
/// removed value for `Remove`, and `None` for `Clear`. `key` is `None` only
/// for `Clear`.
#[derive(Debug, Clone, Copy)]
pub struct ChangeEvent<'a> {
    pub phase: ChangePhase,
    pub change: ChangeKind,
    pub key: Option<ChangeKey<'a>>,
    pub value: Option<&'a Value>,
}

impl<'a> ChangeEvent<'a> {
    pub fn name(&self) -> Option<&'a str> {
        match self.key {
            Some(ChangeKey::Name(name)) => Some(name),
            _ => None,
        }
    }

    pub fn position(&self) -> Option<usize> {
        match self.key {
            Some(ChangeKey::Position(index)) => Some(index),
            _ => None,
        }
    }
}

/// The listener list of one container. Clones start empty: subscriptions
/// belong to the instance they were made on.
#[derive(Default)]
pub(crate) struct Listeners {
    next_id: u64,
    entries: Vec<(ListenerId, Listener)>,
}

impl Listeners {
    pub(crate) fn subscribe(&mut self, listener: Listener) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.entries.push((id, listener));
        id
    }

    pub(crate) fn unsubscribe(&mut self, id: ListenerId) -> bool {
        match self.entries.iter().position(|(entry, _)| *entry == id) {
            Some(index) => {
                self.entries.remove(index);
                true
            }
            None => false,
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    /// Listeners registered right now, in registration order.
    pub(crate) fn snapshot(&self) -> Dispatch {
        Dispatch(self.entries.iter().map(|(_, l)| Arc::clone(l)).collect())
    }
}

impl Clone for Listeners {
    fn clone(&self) -> Self {
        Listeners::default()
    }
}

impl fmt::Debug for Listeners {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Listeners({})", self.entries.len())
    }
}

/// A frozen listener set used for both phases of one mutation.
pub(crate) struct Dispatch(Vec<Listener>);

impl Dispatch {
    pub(crate) fn raise(
        &self,
        phase: ChangePhase,
        change: ChangeKind,
        key: Option<ChangeKey<'_>>,
        value: Option<&Value>,
    ) {
        if self.0.is_empty() {
            return;
        }
        let event = ChangeEvent {
            phase,
            change,
            key,
            value,
        };
        for listener in &self.0 {
            listener(&event);
        }
    }
}
