//! Timed status effects on the dog: panic, slowed, stink.

use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum StatusEffectKind {
    /// Lane changes take longer.
    Panic,
    /// Scroll speed drops.
    Slowed,
    /// Stamina regen is reduced.
    Stink,
}

impl StatusEffectKind {
    pub fn display_name(&self) -> &'static str {
        match self {
            StatusEffectKind::Panic => "Panic",
            StatusEffectKind::Slowed => "Slowed",
            StatusEffectKind::Stink => "Stink",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StatusEffect {
    pub kind: StatusEffectKind,
    pub remaining: f32,
}

/// At most one instance per kind. Re-adding keeps the longer remaining time.
#[derive(Debug, Clone, Default)]
pub struct StatusEffectSystem {
    effects: BTreeMap<StatusEffectKind, f32>,
}

impl StatusEffectSystem {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reset(&mut self) {
        self.effects.clear();
    }

    /// Apply an effect; refresh sets remaining to `max(existing, duration)`.
    pub fn add(&mut self, kind: StatusEffectKind, duration: f32) {
        if duration <= 0.0 {
            return;
        }
        let slot = self.effects.entry(kind).or_insert(0.0);
        *slot = slot.max(duration);
    }

    pub fn update(&mut self, dt: f32) {
        if dt <= 0.0 {
            return;
        }
        self.effects.retain(|_, remaining| {
            *remaining -= dt;
            *remaining > 0.0
        });
    }

    pub fn is_active(&self, kind: StatusEffectKind) -> bool {
        self.effects.contains_key(&kind)
    }

    pub fn remaining(&self, kind: StatusEffectKind) -> Option<f32> {
        self.effects.get(&kind).copied()
    }

    /// Active effects sorted by display name.
    pub fn active_list(&self) -> Vec<StatusEffect> {
        let mut list: Vec<StatusEffect> = self
            .effects
            .iter()
            .map(|(kind, remaining)| StatusEffect { kind: *kind, remaining: *remaining })
            .collect();
        list.sort_by_key(|e| e.kind.display_name());
        list
    }
}
