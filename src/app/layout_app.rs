// src/app/layout_app.rs
//! JavaScript から使うための入口。中身は `TableView` に丸投げするだけ。

use std::rc::Rc;

use js_sys::Function;
use log::{error, warn};
use wasm_bindgen::prelude::*;

use crate::app::table_view::{ContainerId, TableView};
use crate::components::{CardVisual, Position};
use crate::config::layout::LayoutConfig;
use crate::console_log;
use crate::scene::NodeId;

/// テーブルのレイアウトエンジン (Wasm 公開用) だよ！
///
/// ID は全部 usize のまま JavaScript とやりとりする。
/// 設定やカードの状態は JSON 文字列で受け取って、serde_json で読むよ。
#[wasm_bindgen]
pub struct CardLayoutApp {
    table: TableView,
}

impl Default for CardLayoutApp {
    fn default() -> Self {
        Self::new()
    }
}

#[wasm_bindgen]
impl CardLayoutApp {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self {
            table: TableView::new(),
        }
    }

    /// 手札か捨て札置き場を作って、その番号を返す。
    pub fn add_container(&mut self, config_json: &str) -> Result<usize, JsValue> {
        let config = LayoutConfig::from_json(config_json).map_err(|e| JsValue::from_str(&e))?;
        let id = self.table.add_container(&config);
        console_log(&format!("CardLayoutApp: container {} ready (player {})", id.0, config.player));
        Ok(id.0)
    }

    /// カードを (x, y) に作って、そのノード番号を返す。
    pub fn create_card(
        &mut self,
        card_json: &str,
        width: f64,
        height: f64,
        x: f64,
        y: f64,
    ) -> Result<usize, JsValue> {
        let card = parse_card(card_json)?;
        let node = self.table.create_card(card, width, height, Position::new(x, y));
        Ok(node.0)
    }

    /// カードの状態 (ヒント・ミスプレイ・捨てたターン) を更新する。
    pub fn set_card_state(&mut self, card: usize, card_json: &str) -> Result<(), JsValue> {
        let state = parse_card(card_json)?;
        let found = self.table.update_card(NodeId(card), |visual| {
            visual.clued = state.clued;
            visual.misplayed = state.misplayed;
            visual.turn_discarded = state.turn_discarded;
        });
        if found {
            Ok(())
        } else {
            warn!("CardLayoutApp: set_card_state for unknown card {}", card);
            Err(JsValue::from_str(&format!("Unknown card {}", card)))
        }
    }

    pub fn place_card(&mut self, card: usize, container: usize) -> Result<(), JsValue> {
        self.table
            .place_card(NodeId(card), ContainerId(container))
            .map_err(|e| JsValue::from_str(&e))
    }

    pub fn release_card(&mut self, card: usize) -> Result<(), JsValue> {
        self.table
            .release_card(NodeId(card))
            .map_err(|e| JsValue::from_str(&e))
    }

    pub fn destroy_card(&mut self, card: usize) -> bool {
        self.table.destroy_card(NodeId(card))
    }

    pub fn move_card_within(&mut self, card: usize, index: usize) -> Result<(), JsValue> {
        self.table
            .move_card_within(NodeId(card), index)
            .map_err(|e| JsValue::from_str(&e))
    }

    pub fn set_fast_mode(&mut self, fast_mode: bool) {
        self.table.context_mut().fast_mode = fast_mode;
    }

    pub fn set_turn(&mut self, turn: i32) {
        self.table.context_mut().current_turn = turn;
    }

    pub fn set_speedrun(&mut self, speedrun: bool) {
        self.table.context_mut().speedrun_mode = speedrun;
    }

    /// アニメーション後に呼ぶ関数を登録する (null で解除)。
    ///
    /// 呼ばれるのは `tick` の中なので、この関数から同じ CardLayoutApp を
    /// 同期的に触ると wasm-bindgen に弾かれるよ。必要なら setTimeout などで逃がしてね。
    pub fn set_post_animation_layout(&mut self, callback: Option<Function>) {
        self.table.context_mut().post_animation_layout = callback.map(|f| {
            let wrapped: Rc<dyn Fn()> = Rc::new(move || {
                if let Err(e) = f.call0(&JsValue::NULL) {
                    error!("CardLayoutApp: post-animation callback threw");
                    web_sys::console::error_1(&e);
                }
            });
            wrapped
        });
    }

    /// 時間を進める。完了したアニメーションの数を返す。
    pub fn tick(&mut self, dt: f64) -> usize {
        self.table.tick(dt)
    }

    pub fn cancel_all_animations(&mut self) -> usize {
        self.table.cancel_all_animations()
    }

    pub fn has_running_animations(&self) -> bool {
        self.table.has_running_animations()
    }

    /// カードのローカル変形を JSON で返す。
    pub fn card_transform_json(&self, card: usize) -> Result<String, JsValue> {
        let transform = self
            .table
            .card_transform(NodeId(card))
            .ok_or_else(|| JsValue::from_str(&format!("Unknown card {}", card)))?;
        serde_json::to_string(&transform).map_err(|e| JsValue::from_str(&e.to_string()))
    }

    pub fn card_draggable(&self, card: usize) -> bool {
        self.table
            .card(NodeId(card))
            .is_some_and(|child| child.is_draggable())
    }

    pub fn is_locked(&self, container: usize) -> Result<bool, JsValue> {
        self.table
            .is_locked(ContainerId(container))
            .ok_or_else(|| JsValue::from_str(&format!("Unknown container {}", container)))
    }

    /// コンテナの中心の絶対座標を `{"x": .., "y": ..}` で返す。
    pub fn absolute_center_json(&self, container: usize) -> Result<String, JsValue> {
        let center = self
            .table
            .absolute_center(ContainerId(container))
            .ok_or_else(|| JsValue::from_str(&format!("Unknown container {}", container)))?;
        serde_json::to_string(&center).map_err(|e| JsValue::from_str(&e.to_string()))
    }
}

fn parse_card(card_json: &str) -> Result<CardVisual, JsValue> {
    serde_json::from_str::<CardVisual>(card_json)
        .map_err(|e| JsValue::from_str(&format!("Invalid card state: {}", e)))
}
