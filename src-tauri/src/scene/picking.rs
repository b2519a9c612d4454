//! Pointer ray hit testing against clickable props.

use bevy::math::{Mat4, Vec3};
use serde::{Deserialize, Serialize};

/// Props that react to clicks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PropTarget {
    LightSwitch,
    ResumePaper,
    /// The "View Projects" overlay on the monitor screen
    Monitor,
}

/// Distance along a ray to a box centered at the origin, or `None` on a miss.
///
/// A ray starting inside the box reports `0.0`.
pub fn ray_box_distance(origin: Vec3, direction: Vec3, half_extents: Vec3) -> Option<f32> {
    let mut t_min = 0.0_f32;
    let mut t_max = f32::INFINITY;

    for axis in 0..3 {
        let o = origin[axis];
        let d = direction[axis];
        let h = half_extents[axis];

        if d.abs() < 1e-8 {
            if o < -h || o > h {
                return None;
            }
            continue;
        }

        let inv = 1.0 / d;
        let (t0, t1) = {
            let a = (-h - o) * inv;
            let b = (h - o) * inv;
            if a <= b {
                (a, b)
            } else {
                (b, a)
            }
        };
        t_min = t_min.max(t0);
        t_max = t_max.min(t1);
        if t_min > t_max {
            return None;
        }
    }
    Some(t_min)
}

/// Candidate box: world matrix of its center plus local half extents
#[derive(Debug, Clone, Copy)]
pub struct PickVolume<T> {
    pub target: T,
    pub world: Mat4,
    pub half_extents: Vec3,
}

/// Nearest volume hit by the ray.
pub fn pick_nearest<T: Copy>(
    origin: Vec3,
    direction: Vec3,
    volumes: impl IntoIterator<Item = PickVolume<T>>,
) -> Option<T> {
    volumes
        .into_iter()
        .filter_map(|volume| {
            let inverse = volume.world.inverse();
            let local_origin = inverse.transform_point3(origin);
            let local_direction = inverse.transform_vector3(direction);
            ray_box_distance(local_origin, local_direction, volume.half_extents)
                .map(|t| (t, volume.target))
        })
        .min_by(|a, b| a.0.total_cmp(&b.0))
        .map(|(_, target)| target)
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::math::Quat;

    #[test]
    fn hits_box_in_front() {
        let t = ray_box_distance(Vec3::new(0.0, 0.0, 5.0), Vec3::NEG_Z, Vec3::ONE);
        assert_eq!(t, Some(4.0));
    }

    #[test]
    fn misses_box_to_the_side() {
        let t = ray_box_distance(Vec3::new(3.0, 0.0, 5.0), Vec3::NEG_Z, Vec3::ONE);
        assert_eq!(t, None);
    }

    #[test]
    fn ignores_box_behind_origin() {
        let t = ray_box_distance(Vec3::new(0.0, 0.0, 5.0), Vec3::Z, Vec3::ONE);
        assert_eq!(t, None);
    }

    #[test]
    fn inside_box_reports_zero() {
        let t = ray_box_distance(Vec3::ZERO, Vec3::X, Vec3::ONE);
        assert_eq!(t, Some(0.0));
    }

    #[test]
    fn nearest_volume_wins() {
        let volumes = [
            PickVolume {
                target: PropTarget::Monitor,
                world: Mat4::from_translation(Vec3::new(0.0, 0.0, -2.0)),
                half_extents: Vec3::splat(0.5),
            },
            PickVolume {
                target: PropTarget::ResumePaper,
                world: Mat4::from_translation(Vec3::new(0.0, 0.0, 1.0)),
                half_extents: Vec3::splat(0.5),
            },
        ];
        let hit = pick_nearest(Vec3::new(0.0, 0.0, 5.0), Vec3::NEG_Z, volumes);
        assert_eq!(hit, Some(PropTarget::ResumePaper));
    }

    #[test]
    fn rotated_thin_plane_is_pickable() {
        // Paper lying flat: local Z (thickness) becomes world Y.
        let world = Mat4::from_rotation_translation(
            Quat::from_rotation_x(-std::f32::consts::FRAC_PI_2),
            Vec3::new(-1.2, -1.44, -0.8),
        );
        let volume = PickVolume {
            target: PropTarget::ResumePaper,
            world,
            half_extents: Vec3::new(0.4, 0.55, 0.005),
        };
        let hit = pick_nearest(Vec3::new(-1.2, 0.0, -0.8), Vec3::NEG_Y, [volume]);
        assert_eq!(hit, Some(PropTarget::ResumePaper));
        let miss = pick_nearest(Vec3::new(0.5, 0.0, -0.8), Vec3::NEG_Y, [volume]);
        assert_eq!(miss, None);
    }
}
