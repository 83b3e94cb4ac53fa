// src/components/position.rs

// serde を使う宣言！位置情報を JSON で JavaScript 側に返すよ！
use serde::{Deserialize, Serialize};

/// 2D空間での位置を表す値だよ！ (x, y) 座標を持つよ。📍
///
/// ノードのローカル座標にも、シーン全体での絶対座標にも使う汎用の型。
/// どっちの座標系なのかは、返してくる関数の名前で区別してね！
///
/// 座標の型は `f64`。Canvas の API が f64 を使うから、それに合わせてるよ。
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// 2つの位置がほぼ同じかどうか (浮動小数点の誤差を許す)。
    pub fn approx_eq(&self, other: &Position, epsilon: f64) -> bool {
        (self.x - other.x).abs() <= epsilon && (self.y - other.y).abs() <= epsilon
    }
}
