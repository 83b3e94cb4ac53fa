// src/layout/child.rs

use crate::animation::{Animator, TweenHandle};
use crate::components::card_visual::CardVisual;
use crate::components::position::Position;
use crate::components::render_context::PostAnimationCallback;
use crate::scene::{NodeId, SceneGraph};

/// 子が今持っているアニメーションの番号札と、
/// 予約した時点で登録されていたアニメーション後コールバック。
pub(crate) struct ActiveTween {
    pub handle: TweenHandle,
    pub post_animation: Option<PostAnimationCallback>,
}

/// カード1枚を包む位置決め用のラッパーだよ！
///
/// シーングラフ上のノード1つと、その上に描かれるカード (`CardVisual`) を持ってる。
/// コンテナに入っている間、カードはこの子が独占的に持つよ。
/// 再生中のアニメーションは多くても1本だけ。
pub struct LayoutChild {
    node: NodeId,
    pub card: CardVisual,
    tween: Option<ActiveTween>,
    draggable: bool,
}

impl LayoutChild {
    /// シーングラフにノードを作って、カードを包んだ子を作る。
    /// 最初はルートの子 (どのコンテナにも入っていない) だよ。
    pub fn new(graph: &mut SceneGraph, card: CardVisual, width: f64, height: f64) -> Self {
        let node = graph.create_node(width, height);
        Self::wrap(node, card)
    }

    /// 既にあるノードを包む。
    pub fn wrap(node: NodeId, card: CardVisual) -> Self {
        Self {
            node,
            card,
            tween: None,
            draggable: false,
        }
    }

    pub fn node(&self) -> NodeId {
        self.node
    }

    pub fn width(&self, graph: &SceneGraph) -> f64 {
        graph.width(self.node)
    }

    pub fn height(&self, graph: &SceneGraph) -> f64 {
        graph.height(self.node)
    }

    pub fn absolute_position(&self, graph: &SceneGraph) -> Option<Position> {
        graph.absolute_position(self.node)
    }

    pub fn is_draggable(&self) -> bool {
        self.draggable
    }

    /// ドラッグできるかどうかを決め直す。
    /// 手札 (listening なコンテナ) にあって、動いていなくて、まだ捨てられていないカードだけ。
    pub fn check_set_draggable(&mut self, listening: bool) {
        self.draggable =
            listening && !self.card.animating && self.card.turn_discarded.is_none();
    }

    pub fn active_tween(&self) -> Option<TweenHandle> {
        self.tween.as_ref().map(|t| t.handle)
    }

    /// 再生中のアニメーションがあれば破棄する。
    ///
    /// # 戻り値
    /// 何か破棄したら `true`。
    pub fn cancel_tween<A: Animator + ?Sized>(&mut self, animator: &mut A) -> bool {
        match self.tween.take() {
            Some(active) => {
                animator.destroy(active.handle);
                true
            }
            None => false,
        }
    }

    /// 新しいアニメーションを覚える。前のものが残っていたら先に破棄するよ。
    pub(crate) fn replace_tween<A: Animator + ?Sized>(
        &mut self,
        animator: &mut A,
        active: ActiveTween,
    ) {
        self.cancel_tween(animator);
        self.tween = Some(active);
    }

    /// `handle` が自分のアニメーションなら取り出す。
    pub(crate) fn take_tween_if(&mut self, handle: TweenHandle) -> Option<ActiveTween> {
        if self.active_tween() == Some(handle) {
            self.tween.take()
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::recording::RecordingAnimator;
    use crate::components::transform::Transform;

    #[test]
    fn draggable_only_in_listening_container_when_idle() {
        let mut graph = SceneGraph::new();
        let mut child = LayoutChild::new(&mut graph, CardVisual::default(), 50.0, 70.0);

        child.check_set_draggable(true);
        assert!(child.is_draggable());

        child.check_set_draggable(false);
        assert!(!child.is_draggable(), "捨て札置き場のカードはドラッグできない");

        child.card.animating = true;
        child.check_set_draggable(true);
        assert!(!child.is_draggable(), "アニメーション中はドラッグできない");

        child.card.animating = false;
        child.card.turn_discarded = Some(3);
        child.check_set_draggable(true);
        assert!(!child.is_draggable(), "捨てられたカードはドラッグできない");
    }

    #[test]
    fn replacing_a_tween_destroys_the_previous_one() {
        let mut graph = SceneGraph::new();
        let mut animator = RecordingAnimator::default();
        let mut child = LayoutChild::new(&mut graph, CardVisual::default(), 50.0, 70.0);

        let first = animator.play(&graph, child.node(), Transform::IDENTITY, 0.5);
        child.replace_tween(&mut animator, ActiveTween { handle: first, post_animation: None });
        let second = animator.play(&graph, child.node(), Transform::IDENTITY, 0.5);
        child.replace_tween(&mut animator, ActiveTween { handle: second, post_animation: None });

        assert_eq!(animator.destroyed, vec![first]);
        assert_eq!(child.active_tween(), Some(second));
        assert!(child.take_tween_if(first).is_none(), "古い番号札は一致しない");
        assert!(child.take_tween_if(second).is_some());
        assert!(!child.cancel_tween(&mut animator), "もう何も残ってない");
    }
}
