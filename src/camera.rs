use minicube_geom::{Mat4, Vec3};

pub struct FlyCamera {
    pub position: Vec3,
    pub yaw: f32,   // degrees
    pub pitch: f32, // degrees, positive looks down
    pub fov_deg: f32,
    pub mouse_sensitivity: f32,
}

impl FlyCamera {
    pub fn new(position: Vec3) -> Self {
        Self {
            position,
            yaw: -90.0,
            pitch: 0.0,
            fov_deg: 70.0,
            mouse_sensitivity: 0.1,
        }
    }

    pub fn front(&self) -> Vec3 {
        let yaw_rad = self.yaw.to_radians();
        let pitch_rad = self.pitch.to_radians();
        Vec3::new(
            yaw_rad.cos() * pitch_rad.cos(),
            -pitch_rad.sin(),
            yaw_rad.sin() * pitch_rad.cos(),
        )
        .normalized()
    }

    pub fn right(&self) -> Vec3 {
        self.front().cross(Vec3::UP).normalized()
    }

    /// Mouse-look from a pointer delta in pixels.
    pub fn look(&mut self, dx: f32, dy: f32) {
        self.yaw += dx * self.mouse_sensitivity;
        self.pitch += dy * self.mouse_sensitivity;
        self.pitch = self.pitch.clamp(-89.9, 89.9);
    }

    // Movement integration lives with the caller
    pub fn translate(&mut self, delta: Vec3) {
        self.position += delta;
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.position + self.front(), Vec3::UP)
    }

    pub fn projection(&self, aspect: f32, near: f32, far: f32) -> Mat4 {
        Mat4::perspective_rh_gl(self.fov_deg.to_radians(), aspect, near, far)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: Vec3, b: Vec3) -> bool {
        (a - b).length() < 1e-5
    }

    #[test]
    fn default_looks_down_negative_z() {
        let cam = FlyCamera::new(Vec3::ZERO);
        assert!(close(cam.front(), Vec3::new(0.0, 0.0, -1.0)));
        assert!(close(cam.right(), Vec3::new(1.0, 0.0, 0.0)));
    }

    #[test]
    fn positive_pitch_looks_down() {
        let mut cam = FlyCamera::new(Vec3::ZERO);
        cam.look(0.0, 300.0);
        assert!(cam.front().y < 0.0);
        assert!((cam.pitch - 30.0).abs() < 1e-4);
    }

    #[test]
    fn pitch_is_clamped() {
        let mut cam = FlyCamera::new(Vec3::ZERO);
        cam.look(0.0, 10_000.0);
        assert_eq!(cam.pitch, 89.9);
        cam.look(0.0, -1e6);
        assert_eq!(cam.pitch, -89.9);
    }

    #[test]
    fn view_puts_target_ahead() {
        let mut cam = FlyCamera::new(Vec3::new(4.0, 12.0, 20.0));
        cam.look(37.0, 150.0);
        let view = cam.view_matrix();
        assert!(close(view.transform_point(cam.position), Vec3::ZERO));
        let ahead = view.transform_point(cam.position + cam.front() * 5.0);
        assert!(close(ahead, Vec3::new(0.0, 0.0, -5.0)));
    }

    #[test]
    fn translate_moves_position() {
        let mut cam = FlyCamera::new(Vec3::ZERO);
        cam.translate(cam.front() * 2.0);
        assert!(close(cam.position, Vec3::new(0.0, 0.0, -2.0)));
    }
}
