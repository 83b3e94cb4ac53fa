// src/lib.rs
//! カードゲームのテーブル用レイアウトエンジン！
//!
//! 手札や捨て札置き場 (固定サイズの長方形) の中に、カードを一様な拡大率で並べて、
//! 並びが変わるたびにアニメーションさせるよ。
//! ブラウザからは `CardLayoutApp` 経由で、Rust からは `TableView` / `LayoutContainer` を直接使う。

// WASM と JavaScript を繋ぐための基本！
use wasm_bindgen::prelude::*;

// 自分で作ったモジュールたち！
pub mod animation;
pub mod app;
pub mod components;
pub mod config;
pub mod layout;
pub mod scene;

pub use animation::{Animator, FinishedTween, TweenHandle, Tweener};
pub use app::layout_app::CardLayoutApp;
pub use app::table_view::{ContainerId, TableView};
pub use components::{CardVisual, Position, PostAnimationCallback, RenderContext, Transform};
pub use config::{Align, LayoutConfig};
pub use layout::{LayoutChild, LayoutContainer};
pub use scene::{NodeId, SceneGraph};

// JavaScript の console.log を Rust から呼び出すための準備 (extern ブロック)。
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = console, js_name = log)]
    fn console_log(s: &str);
}

// ネイティブ (cargo test とか) では console が無いので log クレートに流す
#[cfg(not(target_arch = "wasm32"))]
fn console_log(s: &str) {
    log::info!("{}", s);
}

// main 関数の代わりに、Wasm がロードされた時に最初に実行される関数だよ。
#[wasm_bindgen(start)]
pub fn set_panic_hook() {
    console_error_panic_hook::set_once();
    console_log("card_layout: panic hook set!");
}
