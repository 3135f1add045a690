//! 预导入模块，方便使用

pub use super::courses::{ActiveModel as CourseActiveModel, Entity as Courses, Model as CourseModel};
pub use super::entries::{ActiveModel as EntryActiveModel, Entity as Entries, Model as EntryModel};
pub use super::evaluation_nodes::{
    ActiveModel as EvaluationNodeActiveModel, Entity as EvaluationNodes,
    Model as EvaluationNodeModel,
};
pub use super::thresholds::{
    ActiveModel as ThresholdActiveModel, Entity as Thresholds, Model as ThresholdModel,
};
