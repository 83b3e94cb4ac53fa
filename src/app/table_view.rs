// src/app/table_view.rs
//! テーブル全体 (シーングラフ・アニメーション・手札と捨て札) をまとめて動かす係。

use std::collections::HashMap;

use itertools::Itertools;
use log::{info, warn};
use serde::{Deserialize, Serialize};

use crate::animation::Tweener;
use crate::components::{CardVisual, Position, RenderContext, Transform};
use crate::config::layout::LayoutConfig;
use crate::layout::{LayoutChild, LayoutContainer};
use crate::scene::{NodeId, SceneGraph};

/// テーブル上のコンテナ (手札 or 捨て札置き場) の番号
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ContainerId(pub usize);

/// テーブルのレイアウト状態を全部持ってる構造体だよ！
///
/// - `graph`: 全ノードのシーングラフ
/// - `tweener`: アニメーションの実行器
/// - `containers`: 手札と捨て札置き場
/// - `loose_cards`: どのコンテナにも入っていないカード (山札とか、場に出たカードとか)
/// - `context`: 描画フラグ。レイアウトするたびに参照で渡す
pub struct TableView {
    graph: SceneGraph,
    tweener: Tweener,
    containers: Vec<LayoutContainer>,
    loose_cards: HashMap<NodeId, LayoutChild>,
    context: RenderContext,
}

impl Default for TableView {
    fn default() -> Self {
        Self::new()
    }
}

impl TableView {
    pub fn new() -> Self {
        Self {
            graph: SceneGraph::new(),
            tweener: Tweener::new(),
            containers: Vec::new(),
            loose_cards: HashMap::new(),
            context: RenderContext::default(),
        }
    }

    pub fn graph(&self) -> &SceneGraph {
        &self.graph
    }

    pub fn context(&self) -> &RenderContext {
        &self.context
    }

    /// フラグを書き換える用。走っているアニメーションには影響しないよ。
    pub fn context_mut(&mut self) -> &mut RenderContext {
        &mut self.context
    }

    pub fn add_container(&mut self, config: &LayoutConfig) -> ContainerId {
        let container = LayoutContainer::new(&mut self.graph, config);
        self.containers.push(container);
        ContainerId(self.containers.len() - 1)
    }

    pub fn container(&self, id: ContainerId) -> Option<&LayoutContainer> {
        self.containers.get(id.0)
    }

    /// 新しいカードを `at` (絶対座標) に作る。どのコンテナにも入っていない状態だよ。
    pub fn create_card(&mut self, card: CardVisual, width: f64, height: f64, at: Position) -> NodeId {
        let child = LayoutChild::new(&mut self.graph, card, width, height);
        let node = child.node();
        if let Err(e) = self.graph.set_absolute_position(node, at) {
            warn!("TableView: could not place new card {:?}: {}", node, e);
        }
        self.loose_cards.insert(node, child);
        info!("TableView: created card {:?} at ({}, {})", node, at.x, at.y);
        node
    }

    /// カードを探す (コンテナの中でも、外でも)。
    pub fn card(&self, node: NodeId) -> Option<&LayoutChild> {
        self.loose_cards.get(&node).or_else(|| {
            self.containers
                .iter()
                .find_map(|c| c.child(node))
        })
    }

    /// カードの状態を書き換える (ヒントがついた、とか)。
    /// 並びは変わらないのでレイアウトはし直さないよ。
    pub fn update_card<F: FnOnce(&mut CardVisual)>(&mut self, node: NodeId, update: F) -> bool {
        if let Some(child) = self.loose_cards.get_mut(&node) {
            update(&mut child.card);
            return true;
        }
        for container in self.containers.iter_mut() {
            if let Some(child) = container.children_mut().iter_mut().find(|c| c.node() == node) {
                update(&mut child.card);
                return true;
            }
        }
        false
    }

    /// カードを `target` の手札の一番最後に入れる。
    /// 別のコンテナに入っていたら、そこから抜いてから入れるよ。
    pub fn place_card(&mut self, node: NodeId, target: ContainerId) -> Result<(), String> {
        if target.0 >= self.containers.len() {
            return Err(format!("Unknown container {:?}", target));
        }
        let child = self
            .take_card(node)
            .ok_or_else(|| format!("Unknown card {:?}", node))?;
        self.containers[target.0].add(&mut self.graph, &mut self.tweener, &self.context, child)
    }

    /// カードをコンテナから出して、外に置いておく (位置はそのまま)。
    pub fn release_card(&mut self, node: NodeId) -> Result<(), String> {
        let child = self
            .take_card(node)
            .ok_or_else(|| format!("Unknown card {:?}", node))?;
        self.loose_cards.insert(node, child);
        Ok(())
    }

    /// カードをシーンから完全に消す。
    pub fn destroy_card(&mut self, node: NodeId) -> bool {
        match self.take_card(node) {
            Some(_) => self.graph.destroy_node(node),
            None => false,
        }
    }

    /// 手札の中でカードの順番を変える。
    pub fn move_card_within(&mut self, node: NodeId, index: usize) -> Result<(), String> {
        let (position, container) = self
            .containers
            .iter_mut()
            .find_position(|c| c.contains(node))
            .ok_or_else(|| format!("Card {:?} is not in any container", node))?;
        info!("TableView: moving card {:?} to index {} of container {}", node, index, position);
        container.move_child(&mut self.graph, &mut self.tweener, &self.context, node, index)
    }

    /// 時間を `dt` 秒進めて、終わったアニメーションを持ち主のコンテナに届ける。
    ///
    /// # 戻り値
    /// 完了処理をしたアニメーションの数
    pub fn tick(&mut self, dt: f64) -> usize {
        let finished = self.tweener.advance(&mut self.graph, dt);
        finished
            .iter()
            .filter(|done| {
                self.containers
                    .iter_mut()
                    .any(|container| container.on_tween_finished(done))
            })
            .count()
    }

    /// 全部のアニメーションを今の位置で止める。
    pub fn cancel_all_animations(&mut self) -> usize {
        let mut cancelled = 0;
        for container in self.containers.iter_mut() {
            let listening = container.is_listening();
            for child in container.children_mut() {
                if child.cancel_tween(&mut self.tweener) {
                    child.card.animating = false;
                    child.check_set_draggable(listening);
                    cancelled += 1;
                }
            }
        }
        info!("TableView: cancelled {} animation(s)", cancelled);
        cancelled
    }

    pub fn has_running_animations(&self) -> bool {
        !self.tweener.is_empty()
    }

    pub fn card_transform(&self, node: NodeId) -> Option<Transform> {
        self.graph.transform(node)
    }

    pub fn card_absolute_position(&self, node: NodeId) -> Option<Position> {
        self.graph.absolute_position(node)
    }

    pub fn is_locked(&self, id: ContainerId) -> Option<bool> {
        self.container(id).map(|c| c.is_locked())
    }

    pub fn absolute_center(&self, id: ContainerId) -> Option<Position> {
        self.container(id).and_then(|c| c.absolute_center(&self.graph))
    }

    /// カードをどこからでも取り出す (コンテナからなら並べ直しも走る)。
    fn take_card(&mut self, node: NodeId) -> Option<LayoutChild> {
        if let Some(child) = self.loose_cards.remove(&node) {
            return Some(child);
        }
        let container = self.containers.iter_mut().find(|c| c.contains(node))?;
        container.remove(&mut self.graph, &mut self.tweener, &self.context, node)
    }
}
