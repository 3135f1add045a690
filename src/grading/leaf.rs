use crate::models::entries::entities::Entry;
use crate::models::nodes::entities::InputType;

/// 按录入方式计算原始得分率，缺少分母或分子时按 0 处理
pub fn base_fraction(input_type: InputType, entry: &Entry) -> f64 {
    match input_type {
        // none 退化为得分制
        InputType::Score | InputType::None => match (entry.earned, entry.max) {
            (Some(earned), Some(max)) if max > 0.0 => earned / max,
            _ => 0.0,
        },
        InputType::Rate => entry.rate.map_or(0.0, |rate| rate / 100.0),
        InputType::Attendance => match (entry.attended, entry.total) {
            (Some(attended), Some(total)) if total > 0 => f64::from(attended) / f64::from(total),
            _ => 0.0,
        },
    }
}

/// 叶子节点得分，结果在 [0, 1]
///
/// 先换算为 100 分制并加上调整分，再截断到 [0, 100]。
/// 只应对 completed 的录入调用，未完成的情况在节点层处理。
pub fn score_leaf(input_type: InputType, entry: &Entry) -> f64 {
    let points = base_fraction(input_type, entry) * 100.0 + entry.adjustment;
    if points.is_nan() {
        return 0.0;
    }
    points.clamp(0.0, 100.0) / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grading::test_support::{completed_rate, completed_score, entry};

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-9,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn test_score_basic() {
        let e = completed_score(1, 80.0, 100.0);
        assert_close(score_leaf(InputType::Score, &e), 0.8);
    }

    #[test]
    fn test_score_adjustment() {
        let mut e = completed_score(1, 80.0, 100.0);
        e.adjustment = 5.0;
        assert_close(score_leaf(InputType::Score, &e), 0.85);

        e.adjustment = -10.0;
        assert_close(score_leaf(InputType::Score, &e), 0.7);
    }

    #[test]
    fn test_missing_or_zero_max_is_zero() {
        let mut e = completed_score(1, 8.0, 0.0);
        assert_eq!(score_leaf(InputType::Score, &e), 0.0);

        e.max = None;
        assert_eq!(score_leaf(InputType::Score, &e), 0.0);

        e.max = Some(10.0);
        e.earned = None;
        assert_eq!(score_leaf(InputType::Score, &e), 0.0);
    }

    #[test]
    fn test_none_falls_back_to_score() {
        let e = completed_score(1, 3.0, 4.0);
        assert_close(score_leaf(InputType::None, &e), 0.75);
    }

    #[test]
    fn test_rate() {
        let e = completed_rate(1, 62.5);
        assert_close(score_leaf(InputType::Rate, &e), 0.625);

        let mut missing = entry(1);
        missing.rate = None;
        assert_eq!(score_leaf(InputType::Rate, &missing), 0.0);
    }

    #[test]
    fn test_attendance() {
        let mut e = entry(1);
        e.attended = Some(12);
        e.total = Some(15);
        assert_close(score_leaf(InputType::Attendance, &e), 0.8);

        e.total = Some(0);
        assert_eq!(score_leaf(InputType::Attendance, &e), 0.0);

        e.total = None;
        assert_eq!(score_leaf(InputType::Attendance, &e), 0.0);
    }

    #[test]
    fn test_fields_of_other_input_types_ignored() {
        let mut e = completed_rate(1, 90.0);
        e.earned = Some(1.0);
        e.max = Some(10.0);
        assert_close(score_leaf(InputType::Rate, &e), 0.9);
        assert_close(score_leaf(InputType::Score, &e), 0.1);
    }

    #[test]
    fn test_clamped_for_extreme_adjustments() {
        for adjustment in [-10000.0, -150.0, -1.0, 0.0, 1.0, 150.0, 10000.0] {
            for (earned, max) in [(0.0, 100.0), (50.0, 100.0), (100.0, 100.0), (250.0, 100.0)] {
                let mut e = completed_score(1, earned, max);
                e.adjustment = adjustment;
                let score = score_leaf(InputType::Score, &e);
                assert!((0.0..=1.0).contains(&score), "{score} out of range");
            }
        }

        let mut bonus = completed_score(1, 90.0, 100.0);
        bonus.adjustment = 10000.0;
        assert_eq!(score_leaf(InputType::Score, &bonus), 1.0);

        let mut penalty = completed_score(1, 90.0, 100.0);
        penalty.adjustment = -10000.0;
        assert_eq!(score_leaf(InputType::Score, &penalty), 0.0);
    }

    #[test]
    fn test_adjustment_alone_counts() {
        let mut e = entry(1);
        e.adjustment = 40.0;
        assert_close(score_leaf(InputType::Score, &e), 0.4);
    }
}
