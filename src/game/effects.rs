//! Timed food effects and the modifiers they drive.
//!
//! Each [`EffectKind`] owns its apply/revert behaviour on [`Modifiers`].
//! At most one instance per kind is active; reapplying resets its expiry.
//! Speed and Slow write the same modifier, so applying one supersedes the
//! other and an expiry can always revert that modifier to baseline.

use crate::core::constants::{
    DOUBLE_SCORE_MULTIPLIER, SLOW_INTERVAL_RATIO, SPEED_INTERVAL_RATIO,
};
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EffectKind {
    Speed,
    Slow,
    Double,
}

/// Which shared value an effect modifies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Slot {
    TickInterval,
    ScoreMultiplier,
}

impl EffectKind {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Speed => "speed",
            Self::Slow => "slow",
            Self::Double => "double",
        }
    }

    fn slot(&self) -> Slot {
        match self {
            Self::Speed | Self::Slow => Slot::TickInterval,
            Self::Double => Slot::ScoreMultiplier,
        }
    }

    fn apply_to(&self, modifiers: &mut Modifiers) {
        match self {
            Self::Speed => {
                modifiers.tick_interval_ms = scale(modifiers.base_interval_ms, SPEED_INTERVAL_RATIO)
            }
            Self::Slow => {
                modifiers.tick_interval_ms = scale(modifiers.base_interval_ms, SLOW_INTERVAL_RATIO)
            }
            Self::Double => modifiers.multiplier = DOUBLE_SCORE_MULTIPLIER,
        }
    }

    fn revert(&self, modifiers: &mut Modifiers) {
        match self.slot() {
            Slot::TickInterval => modifiers.tick_interval_ms = modifiers.base_interval_ms,
            Slot::ScoreMultiplier => modifiers.multiplier = 1,
        }
    }
}

fn scale(base: u64, (num, den): (u64, u64)) -> u64 {
    (base * num / den).max(1)
}

/// Values the effects act on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Modifiers {
    /// Interval chosen by difficulty.
    pub base_interval_ms: u64,
    /// Interval currently in force.
    pub tick_interval_ms: u64,
    pub multiplier: u32,
}

impl Modifiers {
    pub fn new(base_interval_ms: u64) -> Self {
        Self {
            base_interval_ms,
            tick_interval_ms: base_interval_ms,
            multiplier: 1,
        }
    }
}

/// Outcome of [`EffectManager::apply`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Applied {
    /// The effect was already active and its timer was reset.
    pub refreshed: bool,
    /// Another effect on the same modifier that was removed.
    pub superseded: Option<EffectKind>,
}

#[derive(Debug, Clone, Default)]
pub struct EffectManager {
    /// Effect kind -> expiry time on the game clock (ms).
    active: BTreeMap<EffectKind, u64>,
}

impl EffectManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Activate `kind` until `now_ms + duration_ms`, replacing any pending
    /// expiry for the same kind.
    pub fn apply(
        &mut self,
        kind: EffectKind,
        duration_ms: u64,
        now_ms: u64,
        modifiers: &mut Modifiers,
    ) -> Applied {
        let superseded = self
            .active
            .keys()
            .copied()
            .find(|other| *other != kind && other.slot() == kind.slot());
        if let Some(other) = superseded {
            self.active.remove(&other);
        }

        let refreshed = self.active.insert(kind, now_ms + duration_ms).is_some();
        kind.apply_to(modifiers);

        Applied {
            refreshed,
            superseded,
        }
    }

    /// Remove `kind` and revert its modifier. Returns false if it was not active.
    pub fn expire(&mut self, kind: EffectKind, modifiers: &mut Modifiers) -> bool {
        if self.active.remove(&kind).is_none() {
            return false;
        }
        kind.revert(modifiers);
        true
    }

    /// Earliest pending expiry.
    pub fn next_expiry(&self) -> Option<(EffectKind, u64)> {
        self.active
            .iter()
            .min_by_key(|(_, at)| **at)
            .map(|(&kind, &at)| (kind, at))
    }

    /// Expire every effect due at or before `now_ms`, earliest first.
    pub fn expire_due(&mut self, now_ms: u64, modifiers: &mut Modifiers) -> Vec<EffectKind> {
        let mut expired = Vec::new();
        while let Some((kind, at)) = self.next_expiry() {
            if at > now_ms {
                break;
            }
            self.expire(kind, modifiers);
            expired.push(kind);
        }
        expired
    }

    pub fn is_active(&self, kind: EffectKind) -> bool {
        self.active.contains_key(&kind)
    }

    pub fn remaining_ms(&self, kind: EffectKind, now_ms: u64) -> Option<u64> {
        self.active.get(&kind).map(|&at| at.saturating_sub(now_ms))
    }

    /// Active effects in kind order.
    pub fn active(&self) -> impl Iterator<Item = (EffectKind, u64)> + '_ {
        self.active.iter().map(|(&kind, &at)| (kind, at))
    }

    pub fn len(&self) -> usize {
        self.active.len()
    }

    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }

    /// Drop every effect and restore baseline modifiers.
    pub fn clear(&mut self, modifiers: &mut Modifiers) {
        self.active.clear();
        *modifiers = Modifiers::new(modifiers.base_interval_ms);
    }
}
