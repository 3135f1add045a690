//! 计分引擎
//!
//! 纯计算，不做任何 IO：服务层负责加载节点和录入，构建 [`EvaluationTree`] 后交给这里。
//!
//! - [`leaf`]：单个叶子节点的得分
//! - [`scorer`]：按三种模式递归计算节点得分
//! - [`summary`]：课程总评与逐节点明细

pub mod leaf;
pub mod scorer;
pub mod summary;
pub mod tree;

pub use leaf::score_leaf;
pub use scorer::{NodeScore, Scorer};
pub use summary::{score_all, summarize};
pub use tree::{EvaluationTree, NodeKind, TreeNode};

#[cfg(test)]
pub(crate) mod test_support {
    use chrono::Utc;

    use crate::models::entries::entities::{Entry, EntryStatus};
    use crate::models::nodes::entities::{EvaluationNode, InputType};

    pub fn branch(id: i64, parent_id: Option<i64>, weight: f64) -> EvaluationNode {
        EvaluationNode {
            id,
            course_id: 1,
            parent_id,
            name: format!("node-{id}"),
            weight,
            input_type: InputType::None,
            is_leaf: false,
            order: 0,
            due_date: None,
        }
    }

    pub fn leaf(id: i64, parent_id: Option<i64>, weight: f64) -> EvaluationNode {
        EvaluationNode {
            input_type: InputType::Score,
            is_leaf: true,
            ..branch(id, parent_id, weight)
        }
    }

    /// 已完成但没有任何数值的录入
    pub fn entry(node_id: i64) -> Entry {
        Entry {
            id: node_id,
            user_id: 1,
            node_id,
            earned: None,
            max: None,
            rate: None,
            attended: None,
            total: None,
            adjustment: 0.0,
            status: EntryStatus::Completed,
            updated_at: Utc::now(),
        }
    }

    pub fn completed_score(node_id: i64, earned: f64, max: f64) -> Entry {
        Entry {
            earned: Some(earned),
            max: Some(max),
            ..entry(node_id)
        }
    }

    pub fn completed_rate(node_id: i64, rate: f64) -> Entry {
        Entry {
            rate: Some(rate),
            ..entry(node_id)
        }
    }

    pub fn pending(node_id: i64) -> Entry {
        Entry {
            status: EntryStatus::Pending,
            ..entry(node_id)
        }
    }
}
