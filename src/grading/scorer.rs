use std::collections::HashMap;

use super::leaf::score_leaf;
use super::tree::{EvaluationTree, NodeKind, TreeNode};
use crate::models::entries::entities::Entry;
use crate::models::grading::requests::ScoreMode;

/// 节点得分（0-1）；`Absent` 表示该子树下没有任何已完成的数据
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NodeScore {
    Present(f64),
    Absent,
}

impl NodeScore {
    pub fn value(self) -> Option<f64> {
        match self {
            NodeScore::Present(value) => Some(value),
            NodeScore::Absent => None,
        }
    }

    pub fn unwrap_or(self, default: f64) -> f64 {
        self.value().unwrap_or(default)
    }

    /// 没有可用数据时的结果：current 模式缺省，其余模式按 0
    fn empty(mode: ScoreMode) -> Self {
        match mode {
            ScoreMode::Current => NodeScore::Absent,
            ScoreMode::Predicted | ScoreMode::Max => NodeScore::Present(0.0),
        }
    }
}

/// 针对单个学生的录入对评价树计分
pub struct Scorer<'a> {
    tree: &'a EvaluationTree,
    entries: HashMap<i64, &'a Entry>,
}

impl<'a> Scorer<'a> {
    /// `entries` 应只包含同一学生的录入
    pub fn new(tree: &'a EvaluationTree, entries: &'a [Entry]) -> Self {
        let entries = entries.iter().map(|e| (e.node_id, e)).collect();
        Self { tree, entries }
    }

    /// 自底向上递归计分，每个分支节点把子节点权重归一化
    pub fn score_node(&self, node: &TreeNode, mode: ScoreMode) -> NodeScore {
        match &node.kind {
            NodeKind::Leaf { input_type } => match self.entries.get(&node.id()) {
                Some(entry) if entry.is_completed() => {
                    NodeScore::Present(score_leaf(*input_type, entry))
                }
                _ => match mode {
                    ScoreMode::Current => NodeScore::Absent,
                    ScoreMode::Predicted => NodeScore::Present(0.0),
                    ScoreMode::Max => NodeScore::Present(1.0),
                },
            },
            NodeKind::Branch { children } => {
                let mut weighted_sum = 0.0;
                let mut total_weight = 0.0;
                let mut any_present = false;

                for child in children.iter().filter_map(|id| self.tree.get(*id)) {
                    if let NodeScore::Present(score) = self.score_node(child, mode) {
                        any_present = true;
                        weighted_sum += child.weight() * score;
                        total_weight += child.weight();
                    }
                }

                if !any_present {
                    return NodeScore::empty(mode);
                }
                if total_weight == 0.0 {
                    return NodeScore::Present(0.0);
                }
                NodeScore::Present(weighted_sum / total_weight)
            }
        }
    }

    /// 按 ID 计分，节点不存在时返回 None
    pub fn score_node_by_id(&self, node_id: i64, mode: ScoreMode) -> Option<NodeScore> {
        self.tree
            .get(node_id)
            .map(|node| self.score_node(node, mode))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grading::test_support::{branch, completed_score, leaf, pending};

    fn score(tree: &EvaluationTree, entries: &[Entry], id: i64, mode: ScoreMode) -> NodeScore {
        Scorer::new(tree, entries)
            .score_node_by_id(id, mode)
            .expect("node exists")
    }

    fn assert_present(actual: NodeScore, expected: f64) {
        match actual {
            NodeScore::Present(value) => assert!(
                (value - expected).abs() < 1e-9,
                "expected {expected}, got {value}"
            ),
            NodeScore::Absent => panic!("expected {expected}, got Absent"),
        }
    }

    #[test]
    fn test_leaf_modes_without_entry() {
        let tree = EvaluationTree::build(vec![leaf(1, None, 100.0)]).unwrap();

        assert_eq!(score(&tree, &[], 1, ScoreMode::Current), NodeScore::Absent);
        assert_present(score(&tree, &[], 1, ScoreMode::Predicted), 0.0);
        assert_present(score(&tree, &[], 1, ScoreMode::Max), 1.0);
    }

    #[test]
    fn test_pending_entry_treated_as_absent() {
        let tree = EvaluationTree::build(vec![leaf(1, None, 100.0)]).unwrap();
        let mut entry = pending(1);
        entry.earned = Some(100.0);
        entry.max = Some(100.0);
        let entries = vec![entry];

        assert_eq!(
            score(&tree, &entries, 1, ScoreMode::Current),
            NodeScore::Absent
        );
        assert_present(score(&tree, &entries, 1, ScoreMode::Predicted), 0.0);
        assert_present(score(&tree, &entries, 1, ScoreMode::Max), 1.0);
    }

    #[test]
    fn test_sibling_weights_normalized() {
        let tree = EvaluationTree::build(vec![
            branch(1, None, 100.0),
            leaf(2, Some(1), 30.0),
            leaf(3, Some(1), 30.0),
        ])
        .unwrap();
        let entries = vec![
            completed_score(2, 100.0, 100.0),
            completed_score(3, 50.0, 100.0),
        ];

        assert_present(score(&tree, &entries, 1, ScoreMode::Predicted), 0.75);
    }

    #[test]
    fn test_nested_structure() {
        // 1 -> 2(50) -> 3(100)
        //   -> 4(50)
        let tree = EvaluationTree::build(vec![
            branch(1, None, 100.0),
            branch(2, Some(1), 50.0),
            leaf(3, Some(2), 100.0),
            leaf(4, Some(1), 50.0),
        ])
        .unwrap();
        let entries = vec![completed_score(3, 10.0, 10.0)];

        assert_present(score(&tree, &entries, 1, ScoreMode::Predicted), 0.5);
        assert_present(score(&tree, &entries, 1, ScoreMode::Current), 1.0);
        assert_present(score(&tree, &entries, 1, ScoreMode::Max), 1.0);
    }

    #[test]
    fn test_current_vs_predicted_mixed() {
        let tree = EvaluationTree::build(vec![
            branch(1, None, 100.0),
            leaf(2, Some(1), 10.0),
            leaf(3, Some(1), 10.0),
            leaf(4, Some(1), 10.0),
        ])
        .unwrap();
        let entries = vec![completed_score(2, 100.0, 100.0), pending(3)];

        assert_present(score(&tree, &entries, 1, ScoreMode::Current), 1.0);
        assert_present(score(&tree, &entries, 1, ScoreMode::Predicted), 1.0 / 3.0);
    }

    #[test]
    fn test_childless_branch() {
        let tree = EvaluationTree::build(vec![branch(1, None, 100.0)]).unwrap();

        assert_eq!(score(&tree, &[], 1, ScoreMode::Current), NodeScore::Absent);
        assert_present(score(&tree, &[], 1, ScoreMode::Predicted), 0.0);
        assert_present(score(&tree, &[], 1, ScoreMode::Max), 0.0);
    }

    #[test]
    fn test_absent_propagates_through_branches() {
        let tree = EvaluationTree::build(vec![
            branch(1, None, 100.0),
            branch(2, Some(1), 50.0),
            leaf(3, Some(2), 100.0),
            branch(4, Some(1), 50.0),
        ])
        .unwrap();

        assert_eq!(score(&tree, &[], 1, ScoreMode::Current), NodeScore::Absent);
        assert_eq!(score(&tree, &[], 2, ScoreMode::Current), NodeScore::Absent);
    }

    #[test]
    fn test_zero_total_weight() {
        let tree = EvaluationTree::build(vec![
            branch(1, None, 100.0),
            leaf(2, Some(1), 0.0),
            leaf(3, Some(1), 0.0),
        ])
        .unwrap();
        let entries = vec![completed_score(2, 10.0, 10.0)];

        assert_present(score(&tree, &entries, 1, ScoreMode::Current), 0.0);
        assert_present(score(&tree, &entries, 1, ScoreMode::Max), 0.0);
    }

    #[test]
    fn test_max_bounds_other_modes() {
        // 不含空分支和零权重节点时，max 同时是 predicted 和 current 的上界
        let tree = EvaluationTree::build(vec![
            branch(1, None, 100.0),
            branch(2, Some(1), 40.0),
            leaf(3, Some(2), 70.0),
            leaf(4, Some(2), 30.0),
            leaf(5, Some(1), 35.0),
            branch(6, Some(1), 25.0),
            leaf(7, Some(6), 5.0),
        ])
        .unwrap();

        let scenarios: Vec<Vec<Entry>> = vec![
            vec![],
            vec![completed_score(3, 20.0, 100.0)],
            vec![completed_score(3, 90.0, 100.0), completed_score(5, 0.0, 10.0)],
            vec![
                completed_score(3, 100.0, 100.0),
                completed_score(4, 40.0, 100.0),
                completed_score(5, 7.0, 10.0),
                completed_score(7, 1.0, 2.0),
            ],
            vec![pending(3), completed_score(7, 3.0, 3.0)],
        ];

        for entries in &scenarios {
            let scorer = Scorer::new(&tree, entries);
            for id in tree.pre_order() {
                let max = scorer.score_node_by_id(id, ScoreMode::Max).unwrap();
                let predicted = scorer.score_node_by_id(id, ScoreMode::Predicted).unwrap();
                let current = scorer.score_node_by_id(id, ScoreMode::Current).unwrap();

                let max = max.value().expect("max is never absent");
                let predicted = predicted.value().expect("predicted is never absent");
                assert!(max + 1e-12 >= predicted, "node {id}: {max} < {predicted}");
                assert!(
                    max + 1e-12 >= current.unwrap_or(0.0),
                    "node {id}: max {max} < current {current:?}"
                );
            }
        }
    }

    #[test]
    fn test_current_can_exceed_predicted() {
        // current 只在已完成部分内归一化，因此可以高于 predicted
        let tree = EvaluationTree::build(vec![
            branch(1, None, 100.0),
            leaf(2, Some(1), 50.0),
            leaf(3, Some(1), 50.0),
        ])
        .unwrap();
        let entries = vec![completed_score(2, 9.0, 10.0)];

        assert_present(score(&tree, &entries, 1, ScoreMode::Current), 0.9);
        assert_present(score(&tree, &entries, 1, ScoreMode::Predicted), 0.45);
    }

    #[test]
    fn test_unknown_node() {
        let tree = EvaluationTree::build(vec![leaf(1, None, 100.0)]).unwrap();
        assert!(
            Scorer::new(&tree, &[])
                .score_node_by_id(99, ScoreMode::Max)
                .is_none()
        );
    }
}
