// src/animation/tweener.rs

use std::collections::BTreeMap;

use log::{debug, warn};

use crate::animation::{Animator, FinishedTween, TweenHandle};
use crate::components::transform::Transform;
use crate::scene::{NodeId, SceneGraph};

/// 1本分のアニメーション。開始時の変形を覚えておいて、線形に補間するよ。
#[derive(Debug, Clone)]
struct Tween {
    node: NodeId,
    from: Transform,
    to: Transform,
    duration: f64,
    elapsed: f64,
}

/// `Animator` の標準実装。`advance` を毎フレーム呼んで時間を進めてね！⏱️
#[derive(Debug, Default)]
pub struct Tweener {
    // BTreeMap にしてるのは、完了通知の順番を毎回同じにするため
    tweens: BTreeMap<TweenHandle, Tween>,
    next_handle: u64,
}

impl Tweener {
    pub fn new() -> Self {
        Self::default()
    }

    /// 再生中のアニメーションの数
    pub fn len(&self) -> usize {
        self.tweens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tweens.is_empty()
    }

    pub fn is_running(&self, handle: TweenHandle) -> bool {
        self.tweens.contains_key(&handle)
    }

    /// 時間を `dt` 秒進めて、各ノードに途中の変形を書き込む。
    ///
    /// # 戻り値
    /// 今回の呼び出しで最後まで再生し終わったアニメーションの一覧 (番号札の順)。
    /// 終わったものは内部から消えるので、通知は1回だけだよ。
    pub fn advance(&mut self, graph: &mut SceneGraph, dt: f64) -> Vec<FinishedTween> {
        let mut finished = Vec::new();
        let mut vanished = Vec::new();

        for (&handle, tween) in self.tweens.iter_mut() {
            tween.elapsed += dt.max(0.0);
            let progress = if tween.duration > 0.0 {
                tween.elapsed / tween.duration
            } else {
                1.0
            };
            let current = tween.from.lerp(&tween.to, progress);
            if graph.set_transform(tween.node, current).is_err() {
                warn!(
                    "Tweener: node {:?} disappeared while tween {:?} was running",
                    tween.node, handle
                );
                vanished.push(handle);
                continue;
            }
            if progress >= 1.0 {
                finished.push(FinishedTween {
                    handle,
                    node: tween.node,
                });
            }
        }

        for handle in vanished {
            self.tweens.remove(&handle);
        }
        for done in &finished {
            self.tweens.remove(&done.handle);
        }
        if !finished.is_empty() {
            debug!("Tweener: {} tween(s) finished", finished.len());
        }
        finished
    }
}

impl Animator for Tweener {
    fn play(
        &mut self,
        graph: &SceneGraph,
        node: NodeId,
        target: Transform,
        duration: f64,
    ) -> TweenHandle {
        let handle = TweenHandle(self.next_handle);
        self.next_handle += 1;
        let from = graph.transform(node).unwrap_or(target);
        self.tweens.insert(
            handle,
            Tween {
                node,
                from,
                to: target,
                duration,
                elapsed: 0.0,
            },
        );
        handle
    }

    fn destroy(&mut self, handle: TweenHandle) {
        self.tweens.remove(&handle);
    }
}
