// src/layout/container.rs
//! A player's hand (or a discard pile): an ordered row of `LayoutChild`ren
//! that keeps every card scaled, spaced and animated inside a fixed slot.

use itertools::Itertools;
use log::{debug, info, warn};

use crate::animation::{Animator, FinishedTween};
use crate::components::position::Position;
use crate::components::render_context::RenderContext;
use crate::components::transform::Transform;
use crate::config::layout::{Align, LayoutConfig, MISPLAY_SPIN_DEGREES, TWEEN_DURATION};
use crate::layout::calculator::{calculate_layout, ChildSize, LayoutParams};
use crate::layout::child::{ActiveTween, LayoutChild};
use crate::scene::{NodeId, SceneGraph};

/// 手札 (または捨て札置き場) のレイアウトコンテナだよ！🖐️🃏
///
/// シーングラフ上にグループ用のノードを1つ持って、その子としてカードを並べる。
/// 子の並び順 (`children`) は手札の順番そのものなので、
/// シーングラフ上の重なり順といつも一致させておくよ。
pub struct LayoutContainer {
    node: NodeId,
    align: Align,
    reverse: bool,
    invert_cards: bool,
    /// コンテナ自身の向き (度)
    rotation: f64,
    listening: bool,
    player: i32,
    children: Vec<LayoutChild>,
}

impl LayoutContainer {
    /// 設定からコンテナを作って、シーングラフに登録する。
    pub fn new(graph: &mut SceneGraph, config: &LayoutConfig) -> Self {
        let node = graph.create_node(config.width, config.height);
        if let Some(n) = graph.node_mut(node) {
            n.transform = Transform {
                x: config.x,
                y: config.y,
                scale_x: 1.0,
                scale_y: 1.0,
                rotation: config.rotation,
            };
            n.listening = config.listening();
        }
        info!(
            "LayoutContainer: created {:?} for player {} at ({}, {}) {} x {}",
            node, config.player, config.x, config.y, config.width, config.height
        );
        Self {
            node,
            align: config.align,
            reverse: config.reverse,
            invert_cards: config.invert_cards,
            rotation: config.rotation,
            listening: config.listening(),
            player: config.player,
            children: Vec::new(),
        }
    }

    pub fn node(&self) -> NodeId {
        self.node
    }

    pub fn align(&self) -> Align {
        self.align
    }

    pub fn is_reverse(&self) -> bool {
        self.reverse
    }

    pub fn invert_cards(&self) -> bool {
        self.invert_cards
    }

    pub fn rotation(&self) -> f64 {
        self.rotation
    }

    pub fn is_listening(&self) -> bool {
        self.listening
    }

    pub fn player(&self) -> i32 {
        self.player
    }

    pub fn width(&self, graph: &SceneGraph) -> f64 {
        graph.width(self.node)
    }

    pub fn height(&self, graph: &SceneGraph) -> f64 {
        graph.height(self.node)
    }

    /// 手札の順番どおりの子
    pub fn children(&self) -> &[LayoutChild] {
        &self.children
    }

    /// 全部のアニメーションを止めたい時は、これで子を回して `cancel_tween` してね。
    pub fn children_mut(&mut self) -> &mut [LayoutChild] {
        &mut self.children
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    pub fn contains(&self, node: NodeId) -> bool {
        self.children.iter().any(|c| c.node() == node)
    }

    pub fn child(&self, node: NodeId) -> Option<&LayoutChild> {
        self.children.iter().find(|c| c.node() == node)
    }

    /// カードを手札の一番最後に加える。
    ///
    /// 付け替える前の絶対座標を覚えておいて、付け替えた後にそこへ戻すので、
    /// カードは元の場所からスーッと動いてくるように見えるよ (瞬間移動しない)。
    pub fn add<A: Animator + ?Sized>(
        &mut self,
        graph: &mut SceneGraph,
        animator: &mut A,
        ctx: &RenderContext,
        mut child: LayoutChild,
    ) -> Result<(), String> {
        child.card.apply_pre_layout_rotation(self.invert_cards);

        let pos = child
            .absolute_position(graph)
            .ok_or_else(|| format!("Card node {:?} is not in the scene", child.node()))?;
        graph.add_child(self.node, child.node())?;
        graph.set_absolute_position(child.node(), pos)?;

        info!(
            "LayoutContainer {:?}: added card {:?} (now {} cards)",
            self.node,
            child.node(),
            self.children.len() + 1
        );
        self.children.push(child);
        self.do_layout(graph, animator, ctx);
        Ok(())
    }

    /// カードを手札から抜いて、持ち主を呼び出し側に返す。
    ///
    /// 抜いたカードは見た目の位置を保ったままルートに付け替えられるので、
    /// そのまま別のコンテナに `add` できるよ。残りのカードは並べ直す。
    pub fn remove<A: Animator + ?Sized>(
        &mut self,
        graph: &mut SceneGraph,
        animator: &mut A,
        ctx: &RenderContext,
        node: NodeId,
    ) -> Option<LayoutChild> {
        let index = self.children.iter().position(|c| c.node() == node)?;
        let mut child = self.children.remove(index);

        // 完了通知はもう来ないので、ここでアニメーション中フラグも下ろしておく
        if child.cancel_tween(animator) {
            child.card.animating = false;
        }

        match child.absolute_position(graph) {
            Some(pos) => {
                let root = graph.root();
                let reparented = graph
                    .add_child(root, node)
                    .and_then(|_| graph.set_absolute_position(node, pos));
                if let Err(e) = reparented {
                    warn!("LayoutContainer {:?}: failed to release {:?}: {}", self.node, node, e);
                }
            }
            None => warn!("LayoutContainer {:?}: removed card {:?} has no scene node", self.node, node),
        }
        child.check_set_draggable(false);

        info!(
            "LayoutContainer {:?}: removed card {:?} ({} cards left)",
            self.node,
            node,
            self.children.len()
        );
        self.do_layout(graph, animator, ctx);
        Some(child)
    }

    /// 手札の中でカードの順番を変える (シーングラフの重なり順も一緒に)。
    pub fn move_child<A: Animator + ?Sized>(
        &mut self,
        graph: &mut SceneGraph,
        animator: &mut A,
        ctx: &RenderContext,
        node: NodeId,
        index: usize,
    ) -> Result<(), String> {
        if !self.contains(node) {
            return Err(format!(
                "Card {:?} is not in container {:?}",
                node, self.node
            ));
        }
        graph.set_child_index(node, index)?;
        self.on_children_reordered(graph, animator, ctx);
        Ok(())
    }

    /// シーングラフ側で子の重なり順が変わった時に呼ぶフック。
    /// `children` をシーングラフの順番に合わせてから並べ直すよ。
    pub fn on_children_reordered<A: Animator + ?Sized>(
        &mut self,
        graph: &mut SceneGraph,
        animator: &mut A,
        ctx: &RenderContext,
    ) {
        let order = graph.children(self.node);
        self.children.sort_by_key(|c| {
            order
                .iter()
                .position(|&n| n == c.node())
                .unwrap_or(usize::MAX)
        });
        self.do_layout(graph, animator, ctx);
    }

    /// 全部のカードの目標位置を計算して、置くかアニメーションを予約する。✨
    ///
    /// `ctx` はこの呼び出しの瞬間の値が使われる。
    /// アニメーション後コールバックも、ここで予約した時点のものが各アニメーションに結び付くよ。
    pub fn do_layout<A: Animator + ?Sized>(
        &mut self,
        graph: &mut SceneGraph,
        animator: &mut A,
        ctx: &RenderContext,
    ) {
        let params = LayoutParams {
            width: self.width(graph),
            height: self.height(graph),
            align: self.align,
            reverse: self.reverse,
        };
        let sizes: Vec<ChildSize> = self
            .children
            .iter()
            .map(|c| ChildSize::new(c.width(graph), c.height(graph)))
            .collect();
        let plan = calculate_layout(&params, &sizes);
        debug!(
            "LayoutContainer {:?}: layout {} cards, gap {:.2}, used width {:.2}, start x {:.2}",
            self.node,
            sizes.len(),
            plan.gap,
            plan.used_width,
            plan.start_x
        );

        let stored_post_animation = ctx.post_animation_layout.clone();

        for (child, target) in self.children.iter_mut().zip_eq(plan.targets) {
            let Some(target) = target else {
                debug!("LayoutContainer {:?}: skipping unmeasured card {:?}", self.node, child.node());
                continue;
            };

            child.cancel_tween(animator);

            if ctx.fast_mode {
                if let Err(e) = graph.set_transform(child.node(), target) {
                    warn!("LayoutContainer {:?}: {}", self.node, e);
                }
                child.card.animating = false;
                child.check_set_draggable(self.listening);
                continue;
            }

            child.card.animating = true;
            if child.card.misplayed && ctx.is_just_discarded(child.card.turn_discarded) {
                // ミスプレイしたばかりのカードは、くるっと回りながら入ってくる
                if let Some(node) = graph.node_mut(child.node()) {
                    node.transform.rotation = MISPLAY_SPIN_DEGREES;
                }
            }
            let handle = animator.play(graph, child.node(), target, TWEEN_DURATION);
            child.replace_tween(
                animator,
                ActiveTween {
                    handle,
                    post_animation: stored_post_animation.clone(),
                },
            );
        }
    }

    /// アニメーションが終わった通知を受け取る。
    ///
    /// 自分の子の (まだ有効な) アニメーションだったら、アニメーション中フラグを下ろして、
    /// ドラッグ可否を決め直して、予約時のコールバックを呼ぶ。
    ///
    /// # 戻り値
    /// 自分の子のアニメーションだったら `true`。
    pub fn on_tween_finished(&mut self, finished: &FinishedTween) -> bool {
        let listening = self.listening;
        let Some(child) = self.children.iter_mut().find(|c| c.node() == finished.node) else {
            return false;
        };
        let Some(active) = child.take_tween_if(finished.handle) else {
            return false;
        };

        child.card.animating = false;
        child.check_set_draggable(listening);
        if let Some(callback) = active.post_animation {
            callback();
        }
        true
    }

    /// コンテナの中心の絶対座標 (コンテナの回転を考慮する)。
    /// 手札から出るエフェクトの基準点とかに使うよ。
    pub fn absolute_center(&self, graph: &SceneGraph) -> Option<Position> {
        let pos = graph.absolute_position(self.node)?;
        let w = self.width(graph);
        let h = self.height(graph);
        let (sin, cos) = self.rotation.to_radians().sin_cos();
        Some(Position {
            x: pos.x + w / 2.0 * cos - h / 2.0 * sin,
            y: pos.y + w / 2.0 * sin + h / 2.0 * cos,
        })
    }

    /// 全部のカードにヒントがついていたら「ロック」状態。空の手札もロック扱い。
    pub fn is_locked(&self) -> bool {
        self.children.iter().all(|c| c.card.is_clued())
    }
}

#[cfg(test)]
#[path = "container_tests.rs"]
mod tests;
