// src/animation/mod.rs
//! Animation executor: time-bounded, cancelable tweens of node transforms.

pub mod tweener;

#[cfg(test)]
pub(crate) mod recording;

use serde::{Deserialize, Serialize};

use crate::components::transform::Transform;
use crate::scene::{NodeId, SceneGraph};

pub use tweener::Tweener;

/// 再生中のアニメーションを指す番号札だよ。キャンセルする時もこれを使う。
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TweenHandle(pub u64);

/// 最後まで再生し終わったアニメーションの通知。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FinishedTween {
    pub handle: TweenHandle,
    pub node: NodeId,
}

/// アニメーションを再生してくれる係 (実行器) のインターフェイスだよ！🎬
///
/// レイアウトコンテナはこのトレイト越しにアニメーションを予約するだけで、
/// 時間を進める仕組みは実装側にお任せ。
pub trait Animator {
    /// `node` の今の変形から `target` まで、`duration` 秒かけて1回だけ動かす。
    fn play(
        &mut self,
        graph: &SceneGraph,
        node: NodeId,
        target: Transform,
        duration: f64,
    ) -> TweenHandle;

    /// アニメーションを破棄する。破棄したものの完了通知は二度と来ない。
    /// もう終わっている (or 知らない) 番号札なら何もしない。
    fn destroy(&mut self, handle: TweenHandle);
}
