// src/scene/graph.rs

// HashMap: NodeId をキーにして、ノードのデータを高速に引けるようにする。
use std::collections::HashMap;

use log::debug;

use crate::components::position::Position;
use crate::components::transform::Transform;
use crate::scene::affine::Affine;
use crate::scene::node::{Node, NodeId, NodeIdAllocator};

/// 画面上の全ノードの親子関係と変形を管理する、シーングラフの本体だよ！🌳
///
/// 作った時点でルートノードが1つだけある。新しいノードは最初ルートの子になって、
/// `add_child` で別の親 (手札のコンテナとか) に付け替えるんだ。
pub struct SceneGraph {
    /// 生きているノード全部
    nodes: HashMap<NodeId, Node>,
    ids: NodeIdAllocator,
    root: NodeId,
}

impl Default for SceneGraph {
    fn default() -> Self {
        Self::new()
    }
}

impl SceneGraph {
    /// ルートノードだけを持つ新しいシーングラフを作る。
    pub fn new() -> Self {
        let mut ids = NodeIdAllocator::default();
        let root = ids.allocate();
        let mut nodes = HashMap::new();
        nodes.insert(root, Node::new(0.0, 0.0));
        SceneGraph { nodes, ids, root }
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    /// 新しいノードを作ってルートの一番手前にぶら下げる。
    pub fn create_node(&mut self, width: f64, height: f64) -> NodeId {
        let id = self.ids.allocate();
        let mut node = Node::new(width, height);
        node.parent = Some(self.root);
        self.nodes.insert(id, node);
        if let Some(root) = self.nodes.get_mut(&self.root) {
            root.children.push(id);
        }
        debug!("SceneGraph: created node {:?} ({} x {})", id, width, height);
        id
    }

    /// ノードとその子孫を全部破棄する。ルートは破棄できないよ。
    ///
    /// # 戻り値
    /// 何か破棄したら `true`、存在しないノードやルートなら `false`。
    pub fn destroy_node(&mut self, id: NodeId) -> bool {
        if id == self.root || !self.nodes.contains_key(&id) {
            return false;
        }
        self.detach(id);
        let mut pending = vec![id];
        while let Some(current) = pending.pop() {
            if let Some(node) = self.nodes.remove(&current) {
                pending.extend(node.children);
            }
        }
        debug!("SceneGraph: destroyed node {:?}", id);
        true
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(&id)
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(&id)
    }

    pub fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(&id)
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes.get(&id).and_then(|n| n.parent)
    }

    /// 子ノード一覧 (z-order 順)。存在しないノードなら空。
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.nodes.get(&id).map(|n| n.children.as_slice()).unwrap_or(&[])
    }

    pub fn width(&self, id: NodeId) -> f64 {
        self.nodes.get(&id).map_or(0.0, |n| n.width)
    }

    pub fn height(&self, id: NodeId) -> f64 {
        self.nodes.get(&id).map_or(0.0, |n| n.height)
    }

    pub fn transform(&self, id: NodeId) -> Option<Transform> {
        self.nodes.get(&id).map(|n| n.transform)
    }

    pub fn set_transform(&mut self, id: NodeId, transform: Transform) -> Result<(), String> {
        let node = self.require_mut(id)?;
        node.transform = transform;
        Ok(())
    }

    /// `child` を `parent` の一番手前の子として付け替える。
    /// 前の親からは自動的に外れるよ。ローカル変形はそのまま (見た目の位置は変わりうる)。
    pub fn add_child(&mut self, parent: NodeId, child: NodeId) -> Result<(), String> {
        self.require(parent)?;
        self.require(child)?;
        if child == self.root {
            return Err("The root node cannot be re-parented".to_string());
        }
        if self.is_ancestor_or_self(child, parent) {
            return Err(format!(
                "Cannot add node {:?} under its own descendant {:?}",
                child, parent
            ));
        }
        self.detach(child);
        if let Some(node) = self.nodes.get_mut(&child) {
            node.parent = Some(parent);
        }
        if let Some(node) = self.nodes.get_mut(&parent) {
            node.children.push(child);
        }
        Ok(())
    }

    /// 親の中での重なり順 (0 が一番奥)。
    pub fn child_index(&self, child: NodeId) -> Option<usize> {
        let parent = self.parent(child)?;
        self.children(parent).iter().position(|&c| c == child)
    }

    /// 親の中で `child` の重なり順を `index` に変える。
    /// `index` が範囲外なら一番手前に置く。
    pub fn set_child_index(&mut self, child: NodeId, index: usize) -> Result<(), String> {
        let parent = self
            .parent(child)
            .ok_or_else(|| format!("Node {:?} has no parent", child))?;
        let siblings = &mut self.require_mut(parent)?.children;
        let current = siblings
            .iter()
            .position(|&c| c == child)
            .ok_or_else(|| format!("Node {:?} is missing from its parent's children", child))?;
        let moved = siblings.remove(current);
        let index = index.min(siblings.len());
        siblings.insert(index, moved);
        Ok(())
    }

    /// ルートからこのノードまでの変形を全部かけ合わせた行列。
    pub fn absolute_transform(&self, id: NodeId) -> Option<Affine> {
        let mut chain = Vec::new();
        let mut current = Some(id);
        while let Some(cid) = current {
            let node = self.nodes.get(&cid)?;
            chain.push(node.transform);
            current = node.parent;
        }
        Some(
            chain
                .iter()
                .rev()
                .fold(Affine::IDENTITY, |acc, t| acc.then_apply_to(&Affine::from_transform(t))),
        )
    }

    /// ノードの原点がシーン全体のどこにあるか。
    pub fn absolute_position(&self, id: NodeId) -> Option<Position> {
        self.absolute_transform(id)
            .map(|m| m.apply(Position::default()))
    }

    /// ノードの原点がシーン全体で `pos` に来るように、ローカルの x, y を設定する。
    pub fn set_absolute_position(&mut self, id: NodeId, pos: Position) -> Result<(), String> {
        let parent_matrix = match self.require(id)?.parent {
            Some(parent) => self
                .absolute_transform(parent)
                .ok_or_else(|| format!("Parent of node {:?} vanished", id))?,
            None => Affine::IDENTITY,
        };
        let inverse = parent_matrix
            .invert()
            .ok_or_else(|| format!("Parent of node {:?} has a degenerate transform", id))?;
        let local = inverse.apply(pos);
        let node = self.require_mut(id)?;
        node.transform.x = local.x;
        node.transform.y = local.y;
        Ok(())
    }

    // --- 内部ヘルパー ---

    fn require(&self, id: NodeId) -> Result<&Node, String> {
        self.nodes
            .get(&id)
            .ok_or_else(|| format!("Unknown scene node {:?}", id))
    }

    fn require_mut(&mut self, id: NodeId) -> Result<&mut Node, String> {
        self.nodes
            .get_mut(&id)
            .ok_or_else(|| format!("Unknown scene node {:?}", id))
    }

    /// `ancestor` が `id` 自身かその祖先なら true。
    fn is_ancestor_or_self(&self, ancestor: NodeId, id: NodeId) -> bool {
        let mut current = Some(id);
        while let Some(cid) = current {
            if cid == ancestor {
                return true;
            }
            current = self.parent(cid);
        }
        false
    }

    /// 今の親の children から外す (parent フィールドも消す)。
    fn detach(&mut self, id: NodeId) {
        let Some(parent) = self.nodes.get_mut(&id).and_then(|n| n.parent.take()) else {
            return;
        };
        if let Some(parent_node) = self.nodes.get_mut(&parent) {
            parent_node.children.retain(|&c| c != id);
        }
    }
}

#[cfg(test)]
#[path = "graph_tests.rs"]
mod tests;
