// src/config/layout.rs
//! 手札・捨て札レイアウトに関する定数と、コンテナの設定を定義するよ！
//! カード間の最大の隙間とか、アニメーションの長さとか。

use serde::{Deserialize, Serialize};

pub const MAX_CARD_GAP: f64 = 10.0; // カード同士の隙間の上限 (これ以上は広げない)
pub const TWEEN_DURATION: f64 = 0.5; // レイアウト変更アニメーションの長さ (秒)
pub const MISPLAY_SPIN_DEGREES: f64 = 360.0; // ミスプレイしたカードが回転しながら入ってくる角度
pub const INVERTED_FACE_ROTATION: f64 = 180.0; // 向かい側のプレイヤーのカードはひっくり返す

/// 捨て札置き場を表すプレイヤー番号だよ。
/// これのコンテナはポインタイベントを受け取らない (listening = false)。
pub const DISCARD_PILE_PLAYER: i32 = -1;

/// コンテナ内でカードの並びをどう寄せるか。
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Align {
    /// 左 (reverse なら右) に詰める
    #[default]
    Left,
    /// 余白があれば真ん中に寄せる
    Center,
}

/// レイアウトコンテナを作る時の設定。
///
/// JavaScript 側から JSON で渡されることを想定してるので、
/// 省略できるフィールドには `#[serde(default)]` を付けてあるよ！
/// 例: `{"x": 10, "y": 20, "width": 500, "height": 100, "player": 0}`
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct LayoutConfig {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    #[serde(default)]
    pub align: Align,
    #[serde(default)]
    pub reverse: bool,
    #[serde(default)]
    pub invert_cards: bool,
    /// コンテナ自身の向き (度)
    #[serde(default)]
    pub rotation: f64,
    /// 持ち主のプレイヤー番号。捨て札置き場なら `DISCARD_PILE_PLAYER`。
    #[serde(default = "default_player")]
    pub player: i32,
}

fn default_player() -> i32 {
    DISCARD_PILE_PLAYER
}

impl LayoutConfig {
    /// 手札のコンテナだけがポインタイベントを受け取るよ。
    pub fn listening(&self) -> bool {
        self.player != DISCARD_PILE_PLAYER
    }

    /// JSON 文字列から設定を読み込む。
    pub fn from_json(json: &str) -> Result<Self, String> {
        serde_json::from_str(json).map_err(|e| format!("Invalid layout config: {}", e))
    }
}
