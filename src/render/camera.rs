use glam::{Mat4, Vec3};

use crate::math::Aabb;
use crate::scene::asset::EmbeddedCamera;

/// Far plane used when an embedded camera leaves it open-ended.
pub const DEFAULT_FAR: f32 = 1000.0;

/// Margin applied when framing a scene with no embedded camera, so the
/// geometry does not touch the viewport edges.
const FRAMING_SLACK: f32 = 1.2;

/// The camera the viewport renders through.
///
/// Either the asset's first embedded camera (with the page's field of
/// view applied over it) or a framing default derived from the scene
/// bounds. wgpu clip space matches what `Mat4::perspective_rh` produces,
/// so no extra conversion matrix is involved.
#[derive(Copy, Clone, Debug)]
pub struct ActiveCamera {
    pub view: Mat4,
    /// Vertical field of view, radians.
    pub fov_y: f32,
    pub znear: f32,
    pub zfar: f32,
}

impl ActiveCamera {
    /// Camera from an embedded node: the view is the inverse of the
    /// node's global transform, the field of view comes from the page,
    /// near/far from the asset.
    pub fn from_embedded(camera: EmbeddedCamera, node_transform: Mat4, fov_degrees: f32) -> Self {
        Self {
            view: node_transform.inverse(),
            fov_y: fov_degrees.to_radians(),
            znear: camera.znear.max(1e-3),
            zfar: camera.zfar.unwrap_or(DEFAULT_FAR),
        }
    }

    /// Fallback when the asset embeds no camera: pull back along +Z far
    /// enough that the whole bounding sphere fits the field of view.
    pub fn framing(bounds: Aabb, fov_degrees: f32) -> Self {
        let fov_y = fov_degrees.to_radians();
        let center = bounds.center();
        let radius = bounds.radius().max(1.0);
        let distance = radius / (fov_y * 0.5).tan() * FRAMING_SLACK;
        let eye = center + Vec3::new(0.0, radius * 0.5, distance);

        Self {
            view: Mat4::look_at_rh(eye, center, Vec3::Y),
            fov_y,
            znear: (distance - radius * 2.0).max(0.05),
            zfar: distance + radius * 4.0,
        }
    }

    pub fn view_proj(&self, aspect: f32) -> Mat4 {
        Mat4::perspective_rh(self.fov_y, aspect.max(1e-3), self.znear, self.zfar) * self.view
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec4Swizzles;

    #[test]
    fn test_fov_override_wins_over_embedded() {
        let embedded = EmbeddedCamera {
            yfov: 1.2,
            znear: 0.1,
            zfar: Some(500.0),
        };
        let camera = ActiveCamera::from_embedded(embedded, Mat4::IDENTITY, 30.0);
        assert!((camera.fov_y - 30.0_f32.to_radians()).abs() < 1e-6);
        assert_eq!(camera.znear, 0.1);
        assert_eq!(camera.zfar, 500.0);
    }

    #[test]
    fn test_open_ended_far_plane_gets_default() {
        let embedded = EmbeddedCamera {
            yfov: 1.0,
            znear: 0.1,
            zfar: None,
        };
        let camera = ActiveCamera::from_embedded(embedded, Mat4::IDENTITY, 45.0);
        assert_eq!(camera.zfar, DEFAULT_FAR);
    }

    #[test]
    fn test_view_inverts_camera_node_transform() {
        let node_transform = Mat4::from_translation(Vec3::new(0.0, 2.0, 8.0));
        let embedded = EmbeddedCamera {
            yfov: 1.0,
            znear: 0.1,
            zfar: None,
        };
        let camera = ActiveCamera::from_embedded(embedded, node_transform, 45.0);
        // The camera's own position lands at the view-space origin.
        let at_origin = camera.view.transform_point3(Vec3::new(0.0, 2.0, 8.0));
        assert!(at_origin.length() < 1e-5);
    }

    #[test]
    fn test_framing_contains_scene() {
        let bounds = Aabb::new(Vec3::splat(-3.0), Vec3::splat(3.0));
        let camera = ActiveCamera::framing(bounds, 45.0);
        let view_proj = camera.view_proj(16.0 / 9.0);

        for corner in [
            Vec3::new(-3.0, -3.0, -3.0),
            Vec3::new(3.0, 3.0, 3.0),
            Vec3::new(-3.0, 3.0, 3.0),
            Vec3::new(3.0, -3.0, -3.0),
        ] {
            let clip = view_proj * corner.extend(1.0);
            let ndc = clip.xyz() / clip.w;
            assert!(
                ndc.x.abs() <= 1.0 && ndc.y.abs() <= 1.0,
                "corner {corner} lands outside the viewport at {ndc}"
            );
            assert!(ndc.z >= 0.0 && ndc.z <= 1.0, "corner {corner} outside depth range");
        }
    }
}
