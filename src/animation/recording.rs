// src/animation/recording.rs
// テスト用の Animator。時間は進めず、予約と破棄を記録するだけ。

use crate::animation::{Animator, TweenHandle};
use crate::components::transform::Transform;
use crate::scene::{NodeId, SceneGraph};

/// `play` が呼ばれた時の記録
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct PlayedTween {
    pub handle: TweenHandle,
    pub node: NodeId,
    /// 予約した瞬間のノードの変形 (ミスプレイ回転の確認用)
    pub start: Transform,
    pub target: Transform,
    pub duration: f64,
}

#[derive(Debug, Default)]
pub(crate) struct RecordingAnimator {
    pub played: Vec<PlayedTween>,
    pub destroyed: Vec<TweenHandle>,
    next_handle: u64,
}

impl RecordingAnimator {
    /// まだ破棄されていない予約
    pub fn live(&self) -> Vec<&PlayedTween> {
        self.played
            .iter()
            .filter(|p| !self.destroyed.contains(&p.handle))
            .collect()
    }
}

impl Animator for RecordingAnimator {
    fn play(
        &mut self,
        graph: &SceneGraph,
        node: NodeId,
        target: Transform,
        duration: f64,
    ) -> TweenHandle {
        let handle = TweenHandle(self.next_handle);
        self.next_handle += 1;
        self.played.push(PlayedTween {
            handle,
            node,
            start: graph.transform(node).unwrap_or_default(),
            target,
            duration,
        });
        handle
    }

    fn destroy(&mut self, handle: TweenHandle) {
        self.destroyed.push(handle);
    }
}
