// src/scene/node.rs

use serde::{Deserialize, Serialize};

use crate::components::transform::Transform;

/// シーングラフの中のノードを指すただの識別子（ID）だよ！
/// カード1枚1枚、手札のコンテナ、捨て札置き場、ルートノードもみんなノード。
///
/// JavaScript 側とやりとりする時は、中の usize をそのまま渡すよ。
#[derive(PartialEq, Eq, PartialOrd, Ord, Hash, Clone, Copy, Debug, Serialize, Deserialize)]
pub struct NodeId(pub usize);

/// 新しい NodeId を発行する係。
/// 単純に番号を増やし続けるだけ。削除されたIDは再利用しないよ
/// (再利用すると、破棄済みのノードを指す古いIDが別のノードに化けちゃうからね)。
#[derive(Default, Debug)]
pub struct NodeIdAllocator {
    next_id: usize,
}

impl NodeIdAllocator {
    pub fn allocate(&mut self) -> NodeId {
        let id = self.next_id;
        self.next_id += 1;
        NodeId(id)
    }
}

/// シーングラフの1ノード分のデータ。
/// 親子関係 (`parent`, `children`) は `SceneGraph` だけが書き換えるよ。
#[derive(Debug, Clone)]
pub struct Node {
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,
    /// 親から見たローカル変形
    pub transform: Transform,
    pub width: f64,
    pub height: f64,
    /// ポインタイベントを受け取るかどうか
    pub listening: bool,
}

impl Node {
    pub(crate) fn new(width: f64, height: f64) -> Self {
        Self {
            parent: None,
            children: Vec::new(),
            transform: Transform::IDENTITY,
            width,
            height,
            listening: true,
        }
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// 子ノードを重なり順 (z-order) で返す。先頭が一番奥。
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn allocator_gives_sequential_unique_ids() {
        let mut ids = NodeIdAllocator::default();
        let a = ids.allocate();
        let b = ids.allocate();
        let c = ids.allocate();
        assert_eq!((a, b, c), (NodeId(0), NodeId(1), NodeId(2)));
    }

    #[test]
    fn new_node_is_detached_identity() {
        let node = Node::new(50.0, 70.0);
        assert_eq!(node.parent(), None);
        assert!(node.children().is_empty());
        assert_eq!(node.transform, Transform::IDENTITY);
        assert!(node.listening);
    }
}
