// src/components/card_visual.rs

// serde を使う宣言！カードの状態を JavaScript から JSON で受け取るよ！
use serde::{Deserialize, Serialize};

use crate::config::layout::INVERTED_FACE_ROTATION;

/// 画面に描かれるカード1枚の状態だよ！🃏
///
/// 本当のゲーム状態 (どのスートの何番か、とか) はサーバー側が持ってるから、
/// ここにあるのはレイアウトとアニメーションに必要なフラグだけ。
///
/// - `clued`: ヒントをもらったカードかどうか (手札の「ロック」判定に使う)
/// - `misplayed`: ミスプレイで捨てられたカードかどうか
/// - `turn_discarded`: 捨てられたターン (まだ捨てられてないなら None)
/// - `animating`: 今まさにアニメーション中かどうか
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CardVisual {
    #[serde(default)]
    pub clued: bool,
    #[serde(default)]
    pub misplayed: bool,
    #[serde(default)]
    pub turn_discarded: Option<i32>,
    #[serde(default, skip_deserializing)]
    pub animating: bool,
    /// レイアウト前の回転フックを持つカードかどうか。
    #[serde(default)]
    pub rotatable: bool,
    /// 絵柄の向き (度)。`apply_pre_layout_rotation` で変わるよ。
    #[serde(default, skip_deserializing)]
    pub face_rotation: f64,
}

impl CardVisual {
    /// 回転フックを持つカードを作る。
    pub fn rotatable() -> Self {
        Self {
            rotatable: true,
            ..Self::default()
        }
    }

    pub fn is_clued(&self) -> bool {
        self.clued
    }

    /// コンテナに入る直前に呼ばれるフックだよ！
    /// 向かい側のプレイヤーの手札 (`invert = true`) に入るなら絵柄をひっくり返す。
    /// 回転フックを持たないカードは何もしない。
    pub fn apply_pre_layout_rotation(&mut self, invert: bool) {
        if !self.rotatable {
            return;
        }
        self.face_rotation = if invert { INVERTED_FACE_ROTATION } else { 0.0 };
    }
}
