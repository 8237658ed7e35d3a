//! Combat-related components.

use bevy::prelude::*;

// Re-export from core to avoid duplication
pub use crate::core::{DamageEvent, DamageTaken, DeathEvent};

/// Result of applying damage to a `Health` pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DamageOutcome {
    /// Target was already dead; nothing changed.
    Rejected,
    /// Damage landed and the target survived.
    Wounded,
    /// Damage landed and brought health to zero.
    Killed,
}

impl DamageOutcome {
    pub fn landed(self) -> bool {
        self != DamageOutcome::Rejected
    }
}

/// Shared damageable capability carried by both agents and the player.
///
/// Role-specific reactions (retaliation for agents, lives for the player)
/// are separate systems keyed on the role marker, not subtypes of this.
#[derive(Component, Debug, Clone, PartialEq)]
pub struct Health {
    pub current: f32,
    pub maximum: f32,
}

impl Health {
    pub fn new(max: f32) -> Self {
        Self {
            current: max,
            maximum: max,
        }
    }

    /// Subtract `amount`. Dead pools reject further damage.
    pub fn apply_damage(&mut self, amount: f32) -> DamageOutcome {
        if self.is_dead() {
            return DamageOutcome::Rejected;
        }

        self.current = (self.current - amount).max(0.0);

        if self.is_dead() {
            DamageOutcome::Killed
        } else {
            DamageOutcome::Wounded
        }
    }

    /// Heal up to the maximum. Returns the amount actually restored.
    /// Dead pools cannot be healed; use `revive` for that.
    ///
    /// Entry point for external healers such as item pickups.
    pub fn restore(&mut self, amount: f32) -> f32 {
        if self.is_dead() {
            return 0.0;
        }
        let actual = amount.min(self.maximum - self.current).max(0.0);
        self.current += actual;
        actual
    }

    /// Drop straight to zero.
    pub fn die(&mut self) -> DamageOutcome {
        let current = self.current;
        self.apply_damage(current.max(f32::MIN_POSITIVE))
    }

    /// Bring a dead pool back to full.
    pub fn revive(&mut self) {
        self.current = self.maximum;
    }

    pub fn is_dead(&self) -> bool {
        self.current <= 0.0
    }
}

/// Marker component for entities that have died (prevents multiple death events).
#[derive(Component, Debug)]
pub struct Dead;

/// Despawns the entity when the timer runs out.
#[derive(Component)]
pub struct DespawnTimer(pub Timer);

impl DespawnTimer {
    pub fn after(seconds: f32) -> Self {
        Self(Timer::from_seconds(seconds, TimerMode::Once))
    }
}
