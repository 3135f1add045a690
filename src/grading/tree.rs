//! 评价树
//!
//! 由课程的扁平节点列表构建，维护 父节点 -> 有序子节点 的索引。
//! 构建时校验结构（悬空父节点、叶子带子节点、环），之后的计分过程不再做检查。

use std::collections::HashMap;

use crate::errors::{RakutanError, Result};
use crate::models::nodes::entities::{EvaluationNode, InputType};
use crate::models::nodes::responses::EvaluationNodeTree;

#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    /// 接受直接录入
    Leaf { input_type: InputType },
    /// 聚合子节点，`children` 按 (order, id) 排序
    Branch { children: Vec<i64> },
}

#[derive(Debug, Clone)]
pub struct TreeNode {
    pub node: EvaluationNode,
    pub kind: NodeKind,
}

impl TreeNode {
    pub fn id(&self) -> i64 {
        self.node.id
    }

    pub fn weight(&self) -> f64 {
        self.node.weight
    }

    pub fn children(&self) -> &[i64] {
        match &self.kind {
            NodeKind::Leaf { .. } => &[],
            NodeKind::Branch { children } => children,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct EvaluationTree {
    nodes: HashMap<i64, TreeNode>,
    roots: Vec<i64>,
}

impl EvaluationTree {
    pub fn empty() -> Self {
        Self::default()
    }

    /// 从同一课程的扁平节点列表构建
    pub fn build(mut nodes: Vec<EvaluationNode>) -> Result<Self> {
        nodes.sort_by_key(|n| (n.order, n.id));

        if let Some(first) = nodes.first() {
            let course_id = first.course_id;
            if let Some(stray) = nodes.iter().find(|n| n.course_id != course_id) {
                return Err(RakutanError::invalid_tree(format!(
                    "node {} belongs to course {}, expected {}",
                    stray.id, stray.course_id, course_id
                )));
            }
        }

        let mut children: HashMap<i64, Vec<i64>> = HashMap::new();
        let mut roots = Vec::new();
        let mut by_id: HashMap<i64, EvaluationNode> = HashMap::with_capacity(nodes.len());

        for node in &nodes {
            if !node.weight.is_finite() || node.weight < 0.0 {
                return Err(RakutanError::invalid_tree(format!(
                    "node {} has invalid weight {}",
                    node.id, node.weight
                )));
            }
            if by_id.insert(node.id, node.clone()).is_some() {
                return Err(RakutanError::invalid_tree(format!(
                    "duplicate node id {}",
                    node.id
                )));
            }
        }

        for node in &nodes {
            match node.parent_id {
                None => roots.push(node.id),
                Some(parent_id) => {
                    let parent = by_id.get(&parent_id).ok_or_else(|| {
                        RakutanError::invalid_tree(format!(
                            "node {} references missing parent {}",
                            node.id, parent_id
                        ))
                    })?;
                    if parent.is_leaf {
                        return Err(RakutanError::invalid_tree(format!(
                            "leaf node {} has child {}",
                            parent_id, node.id
                        )));
                    }
                    children.entry(parent_id).or_default().push(node.id);
                }
            }
        }

        // 每个节点只有一个父节点，从根出发不可达的节点必然处于环中
        let mut reachable = 0usize;
        let mut stack: Vec<i64> = roots.clone();
        while let Some(id) = stack.pop() {
            reachable += 1;
            if let Some(kids) = children.get(&id) {
                stack.extend(kids.iter().copied());
            }
        }
        if reachable != by_id.len() {
            return Err(RakutanError::invalid_tree(format!(
                "{} node(s) are part of a parent cycle",
                by_id.len() - reachable
            )));
        }

        let nodes = by_id
            .into_iter()
            .map(|(id, node)| {
                let kind = if node.is_leaf {
                    NodeKind::Leaf {
                        input_type: node.input_type,
                    }
                } else {
                    NodeKind::Branch {
                        children: children.remove(&id).unwrap_or_default(),
                    }
                };
                (id, TreeNode { node, kind })
            })
            .collect();

        Ok(Self { nodes, roots })
    }

    pub fn get(&self, id: i64) -> Option<&TreeNode> {
        self.nodes.get(&id)
    }

    /// 顶层节点，按 (order, id) 排序
    pub fn roots(&self) -> &[i64] {
        &self.roots
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// 节点深度，顶层节点为 1
    pub fn depth(&self, id: i64) -> Option<usize> {
        let mut depth = 0;
        let mut current = self.nodes.get(&id)?;
        loop {
            depth += 1;
            match current.node.parent_id {
                None => return Some(depth),
                Some(parent_id) => current = self.nodes.get(&parent_id)?,
            }
        }
    }

    /// 前序遍历，兄弟节点按 order 排列
    pub fn pre_order(&self) -> Vec<i64> {
        let mut order = Vec::with_capacity(self.nodes.len());
        let mut stack: Vec<i64> = self.roots.iter().rev().copied().collect();
        while let Some(id) = stack.pop() {
            order.push(id);
            if let Some(node) = self.nodes.get(&id) {
                stack.extend(node.children().iter().rev().copied());
            }
        }
        order
    }

    /// 转为嵌套形式，供 API 输出
    pub fn to_nested(&self) -> Vec<EvaluationNodeTree> {
        self.roots.iter().filter_map(|id| self.nest(*id)).collect()
    }

    fn nest(&self, id: i64) -> Option<EvaluationNodeTree> {
        let tree_node = self.nodes.get(&id)?;
        Some(EvaluationNodeTree {
            node: tree_node.node.clone(),
            children: tree_node
                .children()
                .iter()
                .filter_map(|child| self.nest(*child))
                .collect(),
        })
    }
}
