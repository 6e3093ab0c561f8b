//! Small vector/matrix types shared by the region, mesh and camera code.
#![forbid(unsafe_code)]

use core::ops::{Add, AddAssign, Div, Mul, Sub};

#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(test, derive(proptest_derive::Arbitrary))]
pub struct Vec3 {
    #[cfg_attr(test, proptest(strategy = "-1e3f32..1e3"))]
    pub x: f32,
    #[cfg_attr(test, proptest(strategy = "-1e3f32..1e3"))]
    pub y: f32,
    #[cfg_attr(test, proptest(strategy = "-1e3f32..1e3"))]
    pub z: f32,
}

impl Vec3 {
    pub const ZERO: Vec3 = Vec3::new(0.0, 0.0, 0.0);
    pub const UP: Vec3 = Vec3::new(0.0, 1.0, 0.0);

    #[inline]
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    #[inline]
    pub const fn splat(v: f32) -> Self {
        Self { x: v, y: v, z: v }
    }

    #[inline]
    pub fn dot(self, rhs: Vec3) -> f32 {
        self.x * rhs.x + self.y * rhs.y + self.z * rhs.z
    }

    #[inline]
    pub fn cross(self, rhs: Vec3) -> Vec3 {
        Vec3 {
            x: self.y * rhs.z - self.z * rhs.y,
            y: self.z * rhs.x - self.x * rhs.z,
            z: self.x * rhs.y - self.y * rhs.x,
        }
    }

    #[inline]
    pub fn length(self) -> f32 {
        self.dot(self).sqrt()
    }

    #[inline]
    pub fn normalized(self) -> Vec3 {
        let len = self.length();
        if len > 0.0 { self / len } else { self }
    }

    #[inline]
    pub fn to_array(self) -> [f32; 3] {
        [self.x, self.y, self.z]
    }
}

impl Add for Vec3 {
    type Output = Vec3;
    #[inline]
    fn add(self, rhs: Vec3) -> Vec3 {
        Vec3::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl AddAssign for Vec3 {
    #[inline]
    fn add_assign(&mut self, rhs: Vec3) {
        self.x += rhs.x;
        self.y += rhs.y;
        self.z += rhs.z;
    }
}

impl Sub for Vec3 {
    type Output = Vec3;
    #[inline]
    fn sub(self, rhs: Vec3) -> Vec3 {
        Vec3::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl Mul<f32> for Vec3 {
    type Output = Vec3;
    #[inline]
    fn mul(self, rhs: f32) -> Vec3 {
        Vec3::new(self.x * rhs, self.y * rhs, self.z * rhs)
    }
}

impl Div<f32> for Vec3 {
    type Output = Vec3;
    #[inline]
    fn div(self, rhs: f32) -> Vec3 {
        Vec3::new(self.x / rhs, self.y / rhs, self.z / rhs)
    }
}

/// Axis-aligned box used for region containment tests.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    #[inline]
    pub const fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Axis-aligned cube with its minimum corner at `min`.
    #[inline]
    pub fn cube(min: Vec3, extent: f32) -> Self {
        Self::new(min, min + Vec3::splat(extent))
    }

    /// Half-open containment: `min` is inside, `max` is not.
    #[inline]
    pub fn contains(&self, p: Vec3) -> bool {
        p.x >= self.min.x
            && p.x < self.max.x
            && p.y >= self.min.y
            && p.y < self.max.y
            && p.z >= self.min.z
            && p.z < self.max.z
    }
}

/// Column-major 4x4 matrix, laid out the way shader uniforms expect it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Mat4 {
    pub cols: [[f32; 4]; 4],
}

impl Default for Mat4 {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Mat4 {
    pub const IDENTITY: Mat4 = Mat4 {
        cols: [
            [1.0, 0.0, 0.0, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ],
    };

    /// Right-handed view matrix looking from `eye` toward `target`.
    pub fn look_at_rh(eye: Vec3, target: Vec3, up: Vec3) -> Mat4 {
        let f = (target - eye).normalized();
        let s = f.cross(up).normalized();
        let u = s.cross(f);
        Mat4 {
            cols: [
                [s.x, u.x, -f.x, 0.0],
                [s.y, u.y, -f.y, 0.0],
                [s.z, u.z, -f.z, 0.0],
                [-s.dot(eye), -u.dot(eye), f.dot(eye), 1.0],
            ],
        }
    }

    /// OpenGL-style perspective projection (clip z in [-1, 1]).
    pub fn perspective_rh_gl(fovy_radians: f32, aspect: f32, near: f32, far: f32) -> Mat4 {
        let f = 1.0 / (fovy_radians / 2.0).tan();
        let nf = 1.0 / (near - far);
        Mat4 {
            cols: [
                [f / aspect, 0.0, 0.0, 0.0],
                [0.0, f, 0.0, 0.0],
                [0.0, 0.0, (far + near) * nf, -1.0],
                [0.0, 0.0, 2.0 * far * near * nf, 0.0],
            ],
        }
    }

    #[inline]
    pub fn transform_point(&self, p: Vec3) -> Vec3 {
        let c = &self.cols;
        let x = c[0][0] * p.x + c[1][0] * p.y + c[2][0] * p.z + c[3][0];
        let y = c[0][1] * p.x + c[1][1] * p.y + c[2][1] * p.z + c[3][1];
        let z = c[0][2] * p.x + c[1][2] * p.y + c[2][2] * p.z + c[3][2];
        let w = c[0][3] * p.x + c[1][3] * p.y + c[2][3] * p.z + c[3][3];
        if w != 0.0 && w != 1.0 {
            Vec3::new(x / w, y / w, z / w)
        } else {
            Vec3::new(x, y, z)
        }
    }

    /// Flattened column-major values for uniform upload.
    #[inline]
    pub fn to_cols_array(&self) -> [f32; 16] {
        let mut out = [0.0; 16];
        for (i, col) in self.cols.iter().enumerate() {
            out[i * 4..i * 4 + 4].copy_from_slice(col);
        }
        out
    }
}

impl Mul for Mat4 {
    type Output = Mat4;
    fn mul(self, rhs: Mat4) -> Mat4 {
        let mut cols = [[0.0f32; 4]; 4];
        for (c, out_col) in cols.iter_mut().enumerate() {
            for (r, out) in out_col.iter_mut().enumerate() {
                *out = (0..4).map(|k| self.cols[k][r] * rhs.cols[c][k]).sum();
            }
        }
        Mat4 { cols }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn cross_is_orthogonal(a in any::<Vec3>(), b in any::<Vec3>()) {
            let c = a.cross(b);
            let scale = 1.0 + a.length() * a.length() * b.length();
            prop_assert!(c.dot(a).abs() <= 1e-3 * scale);
        }
    }

    #[test]
    fn identity_is_neutral_for_mul() {
        let view = Mat4::look_at_rh(Vec3::new(1.0, 2.0, 3.0), Vec3::ZERO, Vec3::UP);
        assert_eq!(view * Mat4::IDENTITY, view);
        assert_eq!(Mat4::IDENTITY * view, view);
    }

    #[test]
    fn cols_array_is_column_major() {
        let mut m = Mat4::IDENTITY;
        m.cols[3] = [5.0, 6.0, 7.0, 1.0];
        let flat = m.to_cols_array();
        assert_eq!(&flat[12..16], &[5.0, 6.0, 7.0, 1.0]);
    }
}
