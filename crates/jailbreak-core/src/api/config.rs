use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::core::physics::CollisionFilter;
use crate::core::time::Millis;
use crate::error::{SimError, SimResult};

/// Collision category bits.
pub mod category {
    pub const PLAYER: u32 = 0x0001;
    pub const PLAYER_ATTACK: u32 = 0x0002;
    pub const ENEMY: u32 = 0x0004;
    pub const ENVIRONMENT: u32 = 0x0008;
    pub const TRIGGER: u32 = 0x0010;
}

/// Category/mask assignment for every kind of body.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CollisionLayers {
    pub player: CollisionFilter,
    /// Player mask while a dodge is running: environment only.
    pub player_dodge_mask: u32,
    pub player_attack: CollisionFilter,
    pub enemy: CollisionFilter,
    pub environment: CollisionFilter,
    pub trigger: CollisionFilter,
}

impl Default for CollisionLayers {
    fn default() -> Self {
        use category::*;
        Self {
            player: CollisionFilter::new(PLAYER, ENVIRONMENT | ENEMY),
            player_dodge_mask: ENVIRONMENT,
            player_attack: CollisionFilter::new(PLAYER_ATTACK, ENEMY),
            enemy: CollisionFilter::new(ENEMY, ENVIRONMENT | PLAYER | PLAYER_ATTACK),
            environment: CollisionFilter::new(ENVIRONMENT, PLAYER | ENEMY),
            trigger: CollisionFilter::new(TRIGGER, PLAYER),
        }
    }
}

/// Gameplay constants. Lengths in px, speeds in px/s, times in ms.
///
/// Defaults come from a 60 Hz per-step tuning: a speed of `v` px/step is
/// `60·v` px/s and an acceleration of `a` px/step² is `3600·a` px/s². A
/// one-step force `F` on mass `m` becomes a velocity change of
/// `F/m · (1000/60)²` px/step. Jump and dodge are a 0.12 force on the
/// 1.6-mass player (1250 px/s), and the lunge is a 0.08 force on the
/// 1.225-mass zombie (about 1088 px/s).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub player_speed: f32,
    /// `|vy|` below this counts as standing on something.
    pub grounded_velocity: f32,
    /// Upward velocity change of a jump.
    pub jump_speed: f32,
    /// Horizontal velocity change of a dodge roll.
    pub dodge_speed: f32,
    pub dodge_duration: Millis,
    pub hit_stop_duration: Millis,
    pub attack_duration: Millis,
    pub coyote_time: Millis,
    pub jump_buffer_time: Millis,
    /// Post-hit invulnerability window.
    pub iframe_duration: Millis,
    pub hitbox_size: Vec2,

    pub zombie_speed: f32,
    pub aggro_distance: f32,
    pub attack_distance: f32,
    /// Horizontal velocity change of a zombie lunge.
    pub lunge_speed: f32,
    pub lunge_cooldown: Millis,

    pub player_max_hp: i32,
    pub zombie_max_hp: i32,
    pub player_damage: i32,
    pub zombie_damage: i32,

    pub layers: CollisionLayers,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            player_speed: 300.0,
            grounded_velocity: 30.0,
            jump_speed: 1250.0,
            dodge_speed: 1250.0,
            dodge_duration: 300.0,
            hit_stop_duration: 50.0,
            attack_duration: 150.0,
            coyote_time: 100.0,
            jump_buffer_time: 50.0,
            iframe_duration: 500.0,
            hitbox_size: Vec2::new(30.0, 40.0),

            zombie_speed: 120.0,
            aggro_distance: 200.0,
            attack_distance: 40.0,
            lunge_speed: 1088.4,
            lunge_cooldown: 1000.0,

            player_max_hp: 100,
            zombie_max_hp: 30,
            player_damage: 20,
            zombie_damage: 10,

            layers: CollisionLayers::default(),
        }
    }
}

/// Configuration for a simulation session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Arena width in px.
    pub world_width: f32,
    /// Arena height in px.
    pub world_height: f32,
    /// Gravity in px/s². Y points down.
    pub gravity: Vec2,
    /// Largest frame delta fed to the physics step.
    pub max_frame_dt_ms: Millis,
    pub tuning: Tuning,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            world_width: 375.0,
            world_height: 812.0,
            gravity: Vec2::new(0.0, 800.0),
            max_frame_dt_ms: 50.0,
            tuning: Tuning::default(),
        }
    }
}

impl SimConfig {
    /// Parse a (possibly partial) JSON document; missing fields keep defaults.
    pub fn from_json(json: &str) -> SimResult<Self> {
        let config: SimConfig =
            serde_json::from_str(json).map_err(|e| SimError::ConfigParse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> SimResult<()> {
        let t = &self.tuning;
        let positive = [
            ("world_width", self.world_width as f64),
            ("world_height", self.world_height as f64),
            ("max_frame_dt_ms", self.max_frame_dt_ms),
            ("player_speed", t.player_speed as f64),
            ("grounded_velocity", t.grounded_velocity as f64),
            ("jump_speed", t.jump_speed as f64),
            ("zombie_speed", t.zombie_speed as f64),
            ("aggro_distance", t.aggro_distance as f64),
            ("attack_distance", t.attack_distance as f64),
            ("attack_duration", t.attack_duration),
            ("dodge_duration", t.dodge_duration),
            ("hitbox_width", t.hitbox_size.x as f64),
            ("hitbox_height", t.hitbox_size.y as f64),
        ];
        for (name, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(SimError::InvalidConfig(format!(
                    "{name} must be positive, got {value}"
                )));
            }
        }

        let non_negative = [
            ("dodge_speed", t.dodge_speed as f64),
            ("lunge_speed", t.lunge_speed as f64),
            ("lunge_cooldown", t.lunge_cooldown),
            ("hit_stop_duration", t.hit_stop_duration),
            ("coyote_time", t.coyote_time),
            ("jump_buffer_time", t.jump_buffer_time),
            ("iframe_duration", t.iframe_duration),
        ];
        for (name, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(SimError::InvalidConfig(format!(
                    "{name} must be non-negative, got {value}"
                )));
            }
        }

        if !self.gravity.is_finite() {
            return Err(SimError::InvalidConfig("gravity must be finite".into()));
        }
        if t.player_max_hp <= 0 || t.zombie_max_hp <= 0 {
            return Err(SimError::InvalidConfig("max hp must be positive".into()));
        }
        if t.attack_distance >= t.aggro_distance {
            return Err(SimError::InvalidConfig(
                "attack_distance must be below aggro_distance".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert_eq!(SimConfig::default().validate(), Ok(()));
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let config = SimConfig::from_json(r#"{ "tuning": { "player_speed": 250.0 } }"#).unwrap();
        assert_eq!(config.tuning.player_speed, 250.0);
        assert_eq!(config.tuning.zombie_max_hp, 30);
        assert_eq!(config.world_width, 375.0);
    }

    #[test]
    fn rejects_bad_values() {
        let err = SimConfig::from_json(r#"{ "max_frame_dt_ms": 0.0 }"#).unwrap_err();
        assert!(matches!(err, SimError::InvalidConfig(_)));

        let err = SimConfig::from_json(r#"{ "tuning": { "aggro_distance": 10.0 } }"#).unwrap_err();
        assert!(matches!(err, SimError::InvalidConfig(_)));
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        let err = SimConfig::from_json("{ not json").unwrap_err();
        assert!(matches!(err, SimError::ConfigParse(_)));
    }

    #[test]
    fn zombies_and_player_touch_but_dodging_player_does_not() {
        let layers = CollisionLayers::default();
        assert!(layers.enemy.interacts_with(&layers.player));
        assert!(layers.player_attack.interacts_with(&layers.enemy));
        assert!(!layers.player_attack.interacts_with(&layers.player));

        let dodging = CollisionFilter::new(layers.player.category, layers.player_dodge_mask);
        assert!(!dodging.interacts_with(&layers.enemy));
        assert!(dodging.interacts_with(&layers.environment));
    }
}
