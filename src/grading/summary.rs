use super::scorer::{NodeScore, Scorer};
use super::tree::EvaluationTree;
use crate::models::entries::entities::Entry;
use crate::models::grading::requests::ScoreMode;
use crate::models::grading::responses::{CourseSummary, NodeScoreView};
use crate::models::thresholds::entities::DEFAULT_THRESHOLD;

/// 保留指定小数位，恰好一半时取偶数
fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round_ties_even() / factor
}

fn zero_summary() -> CourseSummary {
    CourseSummary {
        current_score: 0.0,
        predicted_score: 0.0,
        max_score: 0.0,
        deficit: 0.0,
        is_fail_predicted: false,
        is_certain_fail: false,
        threshold: DEFAULT_THRESHOLD,
    }
}

/// 课程总评（0-100 分制）
///
/// 只有一个顶层节点且它有子节点时，把它的子节点当作顶层看待；
/// 此时根节点自身的权重不参与计算。
///
/// 未定义的权重（顶层权重之和不足 100 的部分）视为还能拿满，计入 `max_score`。
pub fn summarize(tree: &EvaluationTree, entries: &[Entry], threshold: Option<f64>) -> CourseSummary {
    let roots = tree.roots();
    if roots.is_empty() {
        return zero_summary();
    }

    let working_set = match roots {
        [root] => match tree.get(*root) {
            Some(node) if !node.children().is_empty() => node.children(),
            _ => roots,
        },
        _ => roots,
    };

    let scorer = Scorer::new(tree, entries);
    let mut defined_weight_sum = 0.0;
    let mut current_weighted_sum = 0.0;
    let mut predicted_weighted_sum = 0.0;
    let mut max_weighted_sum = 0.0;

    for node in working_set.iter().filter_map(|id| tree.get(*id)) {
        let weight = node.weight();
        defined_weight_sum += weight;

        if let NodeScore::Present(score) = scorer.score_node(node, ScoreMode::Current) {
            current_weighted_sum += weight * score;
        }
        predicted_weighted_sum += weight * scorer.score_node(node, ScoreMode::Predicted).unwrap_or(0.0);
        max_weighted_sum += weight * scorer.score_node(node, ScoreMode::Max).unwrap_or(0.0);
    }

    let current_score = current_weighted_sum;
    let predicted_score = if defined_weight_sum == 0.0 {
        0.0
    } else {
        predicted_weighted_sum / defined_weight_sum * 100.0
    };
    let undefined_weight = (100.0 - defined_weight_sum).max(0.0);
    let max_score = max_weighted_sum + undefined_weight;

    let threshold = threshold.unwrap_or(DEFAULT_THRESHOLD);
    let deficit = (threshold - predicted_score).max(0.0);

    CourseSummary {
        current_score: round_to(current_score, 2),
        predicted_score: round_to(predicted_score, 2),
        max_score: round_to(max_score, 2),
        deficit: round_to(deficit, 2),
        is_fail_predicted: predicted_score < threshold,
        is_certain_fail: max_score < threshold,
        threshold,
    }
}

/// 逐节点的三种模式得分，按前序遍历顺序输出
pub fn score_all(tree: &EvaluationTree, entries: &[Entry]) -> Vec<NodeScoreView> {
    let scorer = Scorer::new(tree, entries);

    tree.pre_order()
        .into_iter()
        .filter_map(|id| tree.get(id))
        .map(|node| NodeScoreView {
            node_id: node.id(),
            current: scorer
                .score_node(node, ScoreMode::Current)
                .value()
                .map(|v| round_to(v, 4)),
            predicted: round_to(scorer.score_node(node, ScoreMode::Predicted).unwrap_or(0.0), 4),
            max: round_to(scorer.score_node(node, ScoreMode::Max).unwrap_or(0.0), 4),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grading::test_support::{branch, completed_score, leaf, pending};

    #[test]
    fn test_single_root_flattened() {
        let tree = EvaluationTree::build(vec![
            branch(1, None, 100.0),
            leaf(2, Some(1), 30.0),
            leaf(3, Some(1), 30.0),
        ])
        .unwrap();
        let entries = vec![completed_score(2, 10.0, 10.0), completed_score(3, 5.0, 5.0)];

        let summary = summarize(&tree, &entries, None);
        assert_eq!(summary.predicted_score, 100.0);
        assert_eq!(summary.current_score, 60.0);
        // 未定义的 40 视为还能拿满
        assert_eq!(summary.max_score, 100.0);
        assert!(!summary.is_fail_predicted);
        assert_eq!(summary.deficit, 0.0);
    }

    #[test]
    fn test_single_root_weight_ignored() {
        let tree = EvaluationTree::build(vec![
            branch(1, None, 20.0),
            leaf(2, Some(1), 50.0),
            leaf(3, Some(1), 50.0),
        ])
        .unwrap();
        let entries = vec![completed_score(2, 1.0, 1.0)];

        let summary = summarize(&tree, &entries, None);
        assert_eq!(summary.current_score, 50.0);
        assert_eq!(summary.predicted_score, 50.0);
        assert_eq!(summary.max_score, 100.0);
    }

    #[test]
    fn test_fail_prediction() {
        let tree = EvaluationTree::build(vec![leaf(1, None, 50.0), leaf(2, None, 50.0)]).unwrap();
        let entries = vec![completed_score(1, 0.0, 100.0), pending(2)];

        let summary = summarize(&tree, &entries, Some(60.0));
        assert_eq!(summary.predicted_score, 0.0);
        assert_eq!(summary.max_score, 50.0);
        assert_eq!(summary.current_score, 0.0);
        assert!(summary.is_fail_predicted);
        assert!(summary.is_certain_fail);
        assert_eq!(summary.deficit, 60.0);
        assert_eq!(summary.threshold, 60.0);
    }

    #[test]
    fn test_multiple_roots() {
        let tree = EvaluationTree::build(vec![leaf(1, None, 40.0), leaf(2, None, 40.0)]).unwrap();
        let entries = vec![completed_score(1, 5.0, 10.0)];

        let summary = summarize(&tree, &entries, None);
        assert_eq!(summary.current_score, 20.0);
        assert_eq!(summary.predicted_score, 25.0);
        assert_eq!(summary.max_score, 80.0);
        assert_eq!(summary.deficit, 35.0);
        assert!(summary.is_fail_predicted);
        assert!(!summary.is_certain_fail);
    }

    #[test]
    fn test_single_leaf_root_not_flattened() {
        let tree = EvaluationTree::build(vec![leaf(1, None, 100.0)]).unwrap();
        let entries = vec![completed_score(1, 8.0, 10.0)];

        let summary = summarize(&tree, &entries, Some(85.0));
        assert_eq!(summary.current_score, 80.0);
        assert_eq!(summary.predicted_score, 80.0);
        assert_eq!(summary.max_score, 80.0);
        assert_eq!(summary.deficit, 5.0);
        assert!(summary.is_certain_fail);
    }

    #[test]
    fn test_rounding() {
        let tree = EvaluationTree::build(vec![
            leaf(1, None, 30.0),
            leaf(2, None, 30.0),
            leaf(3, None, 30.0),
        ])
        .unwrap();
        let entries = vec![completed_score(1, 1.0, 1.0)];

        let summary = summarize(&tree, &entries, None);
        assert_eq!(summary.predicted_score, 33.33);
        assert_eq!(summary.deficit, 26.67);
        assert_eq!(summary.max_score, 100.0);
    }

    #[test]
    fn test_round_half_to_even() {
        // 以下值在二进制中可精确表示，乘以 10^n 后恰好是 .5
        assert_eq!(round_to(0.125, 2), 0.12);
        assert_eq!(round_to(0.375, 2), 0.38);
        assert_eq!(round_to(-0.125, 2), -0.12);
        assert_eq!(round_to(12.5, 0), 12.0);
        assert_eq!(round_to(13.5, 0), 14.0);
    }

    #[test]
    fn test_comparison_uses_unrounded_value() {
        // predicted = 59.998，四舍五入后为 60.00，但仍低于及格线
        let tree = EvaluationTree::build(vec![leaf(1, None, 100.0)]).unwrap();
        let entries = vec![completed_score(1, 59.998, 100.0)];

        let summary = summarize(&tree, &entries, None);
        assert_eq!(summary.predicted_score, 60.0);
        assert!(summary.is_fail_predicted);
        assert_eq!(summary.deficit, 0.0);
    }

    #[test]
    fn test_empty_tree_zero_summary() {
        let summary = summarize(&EvaluationTree::empty(), &[], Some(80.0));
        assert_eq!(summary, zero_summary());
        assert_eq!(summary.threshold, 60.0);
    }

    #[test]
    fn test_zero_defined_weight() {
        let tree = EvaluationTree::build(vec![leaf(1, None, 0.0)]).unwrap();
        let entries = vec![completed_score(1, 1.0, 1.0)];

        let summary = summarize(&tree, &entries, None);
        assert_eq!(summary.predicted_score, 0.0);
        assert_eq!(summary.max_score, 100.0);
    }

    #[test]
    fn test_summarize_idempotent() {
        let tree = EvaluationTree::build(vec![
            branch(1, None, 100.0),
            branch(2, Some(1), 60.0),
            leaf(3, Some(2), 50.0),
            leaf(4, Some(2), 50.0),
            leaf(5, Some(1), 40.0),
        ])
        .unwrap();
        let entries = vec![completed_score(3, 7.0, 9.0), pending(4)];

        let first = summarize(&tree, &entries, Some(55.0));
        let second = summarize(&tree, &entries, Some(55.0));
        assert_eq!(first, second);
    }

    #[test]
    fn test_score_all_pre_order() {
        let tree = EvaluationTree::build(vec![
            branch(1, None, 100.0),
            leaf(2, Some(1), 10.0),
            leaf(3, Some(1), 10.0),
            leaf(4, Some(1), 10.0),
        ])
        .unwrap();
        let entries = vec![completed_score(2, 1.0, 1.0)];

        let views = score_all(&tree, &entries);
        let ids: Vec<i64> = views.iter().map(|v| v.node_id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4]);

        assert_eq!(views[0].current, Some(1.0));
        assert_eq!(views[0].predicted, 0.3333);
        assert_eq!(views[0].max, 1.0);
        assert_eq!(views[2].current, None);
        assert_eq!(views[2].predicted, 0.0);
        assert_eq!(views[2].max, 1.0);
    }
}
