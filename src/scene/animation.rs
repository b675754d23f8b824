//! Per-frame node animation.
//!
//! Motions are authored as a rate per 1/60 s tick and rescaled by real
//! elapsed time, so playback speed is identical at any refresh rate.

use glam::{Quat, Vec3};
use std::f32::consts::TAU;

use crate::scene::asset::{NodeHandle, ParkAsset};

/// Ticks per second the authored rates are expressed in.
pub const TICK_RATE: f32 = 60.0;

/// How a named sub-object moves, in asset-local units per tick.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Motion {
    /// Continuous rotation about the node's local +Y axis.
    Spin { radians_per_tick: f32 },
    /// Straight fall along -Y; past `floor` the node snaps back up to
    /// `ceiling` and falls again.
    Fall {
        units_per_tick: f32,
        floor: f32,
        ceiling: f32,
    },
}

impl Motion {
    /// Next channel value after `dt` seconds: accumulated angle for Spin,
    /// current height for Fall.
    pub fn step(&self, value: f32, dt: f32) -> f32 {
        match *self {
            Motion::Spin { radians_per_tick } => {
                (value + radians_per_tick * TICK_RATE * dt).rem_euclid(TAU)
            }
            Motion::Fall {
                units_per_tick,
                floor,
                ceiling,
            } => {
                let next = value - units_per_tick * TICK_RATE * dt;
                if next < floor {
                    ceiling
                } else {
                    next
                }
            }
        }
    }
}

/// A motion bound to a resolved node.
///
/// Binding happens once when the asset arrives; per-frame updates go
/// through the stored handle, never through another name lookup.
#[derive(Debug, Clone)]
pub struct NodeAnimator {
    node: NodeHandle,
    motion: Motion,
    value: f32,
    base_rotation: Quat,
    base_translation: Vec3,
}

impl NodeAnimator {
    /// Resolve `name` inside the asset. A missing name is reported once
    /// and yields no animator; the scene renders without that motion.
    pub fn bind(asset: &ParkAsset, name: &str, motion: Motion) -> Option<Self> {
        let Some(node) = asset.find_node(name) else {
            log::warn!(
                "animation target {name:?} not present in {}; motion skipped",
                asset.label()
            );
            return None;
        };
        let (translation, rotation, _scale) = asset.local_trs(node);
        let value = match motion {
            Motion::Spin { .. } => 0.0,
            Motion::Fall { .. } => translation.y,
        };
        Some(Self {
            node,
            motion,
            value,
            base_rotation: rotation,
            base_translation: translation,
        })
    }

    pub fn node(&self) -> NodeHandle {
        self.node
    }

    /// Current channel value, mainly for inspection in tests and the HUD.
    pub fn value(&self) -> f32 {
        self.value
    }

    /// Advance by `dt` seconds and write the new local transform into the
    /// asset. Transforms are written absolutely from the bound base, so
    /// repeated frames accumulate no drift.
    pub fn advance(&mut self, asset: &mut ParkAsset, dt: f32) {
        self.value = self.motion.step(self.value, dt);
        match self.motion {
            Motion::Spin { .. } => {
                let spun = self.base_rotation * Quat::from_rotation_y(self.value);
                asset.set_local_rotation(self.node, spun);
            }
            Motion::Fall { .. } => {
                let mut translation = self.base_translation;
                translation.y = self.value;
                asset.set_local_translation(self.node, translation);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TERRAIN_RATE: f32 = 0.0025;

    #[test]
    fn test_spin_rate_scales_with_elapsed_time() {
        let motion = Motion::Spin {
            radians_per_tick: TERRAIN_RATE,
        };
        // One second at a per-tick rate of 0.0025 covers 0.15 radians.
        let after_one_second = motion.step(0.0, 1.0);
        assert!((after_one_second - 0.15).abs() < 1e-6);

        let after_half_second = motion.step(0.0, 0.5);
        assert!((after_half_second - 0.075).abs() < 1e-6);
    }

    #[test]
    fn test_spin_accumulates_across_frames() {
        let motion = Motion::Spin {
            radians_per_tick: TERRAIN_RATE,
        };
        let mut value = 0.0;
        for _ in 0..4 {
            value = motion.step(value, 0.25);
        }
        let in_one_go = motion.step(0.0, 1.0);
        assert!(
            (value - in_one_go).abs() < 1e-5,
            "four quarter-second frames should equal one full second"
        );
    }

    #[test]
    fn test_spin_wraps_at_full_turn() {
        let motion = Motion::Spin {
            radians_per_tick: 0.1,
        };
        // 0.1 * 60 * 2.0 = 12 radians, which is TAU + ~5.717.
        let value = motion.step(0.0, 2.0);
        assert!(value >= 0.0 && value < TAU);
        assert!((value - (12.0 - TAU)).abs() < 1e-4);
    }

    #[test]
    fn test_fall_decrements_height() {
        let motion = Motion::Fall {
            units_per_tick: 0.05,
            floor: -100.0,
            ceiling: 6.5,
        };
        let value = motion.step(6.5, 1.0);
        assert!((value - 3.5).abs() < 1e-5, "0.05 * 60 covers 3 units per second");
    }

    #[test]
    fn test_fall_wraps_floor_to_ceiling() {
        let motion = Motion::Fall {
            units_per_tick: 0.05,
            floor: -1.5,
            ceiling: 6.5,
        };
        let mut value = -1.4;
        value = motion.step(value, 0.1);
        assert_eq!(value, 6.5, "passing the floor snaps back to the ceiling");
    }

    #[test]
    fn test_fall_zero_dt_holds_position() {
        let motion = Motion::Fall {
            units_per_tick: 0.05,
            floor: -1.5,
            ceiling: 6.5,
        };
        assert_eq!(motion.step(2.0, 0.0), 2.0);
    }
}
