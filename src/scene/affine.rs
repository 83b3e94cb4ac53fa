// src/scene/affine.rs
//! 2D アフィン変換の行列計算。
//!
//! 行列は Canvas の `setTransform(a, b, c, d, e, f)` と同じ並びで持つよ:
//!
//! ```text
//! | a c e |
//! | b d f |
//! | 0 0 1 |
//! ```

use crate::components::position::Position;
use crate::components::transform::Transform;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Affine {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
    pub e: f64,
    pub f: f64,
}

impl Affine {
    pub const IDENTITY: Affine = Affine {
        a: 1.0,
        b: 0.0,
        c: 0.0,
        d: 1.0,
        e: 0.0,
        f: 0.0,
    };

    /// ローカル変形を行列にする。適用順は 拡大 → 回転 → 平行移動。
    pub fn from_transform(t: &Transform) -> Self {
        let (sin, cos) = t.rotation.to_radians().sin_cos();
        Affine {
            a: cos * t.scale_x,
            b: sin * t.scale_x,
            c: -sin * t.scale_y,
            d: cos * t.scale_y,
            e: t.x,
            f: t.y,
        }
    }

    /// `self * other` (先に `other`、その後 `self` を適用する)
    pub fn then_apply_to(&self, other: &Affine) -> Affine {
        Affine {
            a: self.a * other.a + self.c * other.b,
            b: self.b * other.a + self.d * other.b,
            c: self.a * other.c + self.c * other.d,
            d: self.b * other.c + self.d * other.d,
            e: self.a * other.e + self.c * other.f + self.e,
            f: self.b * other.e + self.d * other.f + self.f,
        }
    }

    pub fn apply(&self, p: Position) -> Position {
        Position {
            x: self.a * p.x + self.c * p.y + self.e,
            y: self.b * p.x + self.d * p.y + self.f,
        }
    }

    /// 逆行列。拡大率 0 などで潰れている場合は None。
    pub fn invert(&self) -> Option<Affine> {
        let det = self.a * self.d - self.b * self.c;
        if det == 0.0 || !det.is_finite() {
            return None;
        }
        Some(Affine {
            a: self.d / det,
            b: -self.b / det,
            c: -self.c / det,
            d: self.a / det,
            e: (self.c * self.f - self.d * self.e) / det,
            f: (self.b * self.e - self.a * self.f) / det,
        })
    }
}
