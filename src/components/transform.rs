// src/components/transform.rs

use serde::{Deserialize, Serialize};

/// ノードのローカル変形 (位置・拡大率・回転) だよ！
///
/// レイアウト計算の結果 (カードの目標の姿) も、
/// アニメーション途中の姿も、全部この型で表すよ。
/// `rotation` は度 (degree) で持つ。
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub x: f64,
    pub y: f64,
    pub scale_x: f64,
    pub scale_y: f64,
    pub rotation: f64,
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Transform {
    pub const IDENTITY: Transform = Transform {
        x: 0.0,
        y: 0.0,
        scale_x: 1.0,
        scale_y: 1.0,
        rotation: 0.0,
    };

    /// 位置と一様な拡大率だけを持つ (回転なし) 変形を作る。
    pub fn placed(x: f64, y: f64, scale: f64) -> Self {
        Self {
            x,
            y,
            scale_x: scale,
            scale_y: scale,
            rotation: 0.0,
        }
    }

    /// `self` から `target` へ、進み具合 `t` (0.0〜1.0) で線形補間する。
    pub fn lerp(&self, target: &Transform, t: f64) -> Transform {
        let t = t.clamp(0.0, 1.0);
        let mix = |from: f64, to: f64| from + (to - from) * t;
        Transform {
            x: mix(self.x, target.x),
            y: mix(self.y, target.y),
            scale_x: mix(self.scale_x, target.scale_x),
            scale_y: mix(self.scale_y, target.scale_y),
            rotation: mix(self.rotation, target.rotation),
        }
    }
}
