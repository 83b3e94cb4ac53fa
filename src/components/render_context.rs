// src/components/render_context.rs

use std::fmt;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

/// アニメーションが終わった後に呼ぶコールバック。
/// Wasm はシングルスレッドなので `Rc` で十分だよ。
pub type PostAnimationCallback = Rc<dyn Fn()>;

/// レイアウト計算が参照する、テーブル全体の描画フラグたち。
///
/// グローバル変数じゃなくて、レイアウトを呼ぶたびに参照で渡す値だよ！
/// アニメーションを予約する瞬間に読んだ値がそのまま使われるので、
/// 後からフラグを変えても、もう走ってるアニメーションには影響しない。
#[derive(Clone, Default, Serialize, Deserialize)]
pub struct RenderContext {
    /// アニメーションを飛ばして、最終位置に一瞬で置く
    #[serde(default)]
    pub fast_mode: bool,
    /// 今のターン番号
    #[serde(default)]
    pub current_turn: i32,
    /// スピードランモード (場札へのアニメーションを飛ばすので、1ターン早くここに来る)
    #[serde(default)]
    pub speedrun_mode: bool,
    /// アニメーション完了時に呼ぶコールバック (予約した時点のものが使われる)
    #[serde(skip)]
    pub post_animation_layout: Option<PostAnimationCallback>,
}

impl fmt::Debug for RenderContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RenderContext")
            .field("fast_mode", &self.fast_mode)
            .field("current_turn", &self.current_turn)
            .field("speedrun_mode", &self.speedrun_mode)
            .field("post_animation_layout", &self.post_animation_layout.is_some())
            .finish()
    }
}

impl RenderContext {
    /// このカードが「今捨てられたばかり」かどうか。
    ///
    /// 通常は前のターン (`current_turn - 1`) に捨てられたカード。
    /// スピードランでは1ターン早くここに来るので、今のターン (`current_turn`) と比べる。
    pub fn is_just_discarded(&self, turn_discarded: Option<i32>) -> bool {
        let expected = if self.speedrun_mode {
            self.current_turn
        } else {
            self.current_turn - 1
        };
        turn_discarded == Some(expected)
    }
}
