use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 创建课程表
        manager
            .create_table(
                Table::create()
                    .table(Courses::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Courses::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Courses::OwnerId).big_integer().not_null())
                    .col(ColumnDef::new(Courses::Name).string().not_null())
                    .col(ColumnDef::new(Courses::Year).integer().not_null())
                    .col(ColumnDef::new(Courses::Term).string().not_null())
                    .col(
                        ColumnDef::new(Courses::IsRequired)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(Courses::CreatedAt).big_integer().not_null())
                    .col(ColumnDef::new(Courses::UpdatedAt).big_integer().not_null())
                    .to_owned(),
            )
            .await?;

        // 创建评价节点表（父节点自引用，删除时级联整个子树）
        manager
            .create_table(
                Table::create()
                    .table(EvaluationNodes::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(EvaluationNodes::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(EvaluationNodes::CourseId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(EvaluationNodes::ParentId)
                            .big_integer()
                            .null(),
                    )
                    .col(ColumnDef::new(EvaluationNodes::Name).string().not_null())
                    .col(ColumnDef::new(EvaluationNodes::Weight).double().not_null())
                    .col(
                        ColumnDef::new(EvaluationNodes::InputType)
                            .string()
                            .not_null()
                            .default("none"),
                    )
                    .col(
                        ColumnDef::new(EvaluationNodes::IsLeaf)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(EvaluationNodes::SortOrder)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(ColumnDef::new(EvaluationNodes::DueDate).string().null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(EvaluationNodes::Table, EvaluationNodes::CourseId)
                            .to(Courses::Table, Courses::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(EvaluationNodes::Table, EvaluationNodes::ParentId)
                            .to(EvaluationNodes::Table, EvaluationNodes::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建成绩录入表
        manager
            .create_table(
                Table::create()
                    .table(Entries::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Entries::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Entries::UserId).big_integer().not_null())
                    .col(ColumnDef::new(Entries::NodeId).big_integer().not_null())
                    .col(ColumnDef::new(Entries::Earned).double().null())
                    .col(ColumnDef::new(Entries::MaxPoints).double().null())
                    .col(ColumnDef::new(Entries::Rate).double().null())
                    .col(ColumnDef::new(Entries::Attended).integer().null())
                    .col(ColumnDef::new(Entries::Total).integer().null())
                    .col(
                        ColumnDef::new(Entries::Adjustment)
                            .double()
                            .not_null()
                            .default(0.0),
                    )
                    .col(
                        ColumnDef::new(Entries::Status)
                            .string()
                            .not_null()
                            .default("pending"),
                    )
                    .col(ColumnDef::new(Entries::UpdatedAt).big_integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(Entries::Table, Entries::NodeId)
                            .to(EvaluationNodes::Table, EvaluationNodes::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建及格线表（每门课程一条）
        manager
            .create_table(
                Table::create()
                    .table(Thresholds::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Thresholds::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Thresholds::CourseId)
                            .big_integer()
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(Thresholds::ThresholdType)
                            .string()
                            .not_null()
                            .default("root_only"),
                    )
                    .col(
                        ColumnDef::new(Thresholds::Value)
                            .double()
                            .not_null()
                            .default(60.0),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Thresholds::Table, Thresholds::CourseId)
                            .to(Courses::Table, Courses::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建索引
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_courses_owner_id")
                    .table(Courses::Table)
                    .col(Courses::OwnerId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_evaluation_nodes_course_id")
                    .table(EvaluationNodes::Table)
                    .col(EvaluationNodes::CourseId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_evaluation_nodes_parent_id")
                    .table(EvaluationNodes::Table)
                    .col(EvaluationNodes::ParentId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_evaluation_nodes_due_date")
                    .table(EvaluationNodes::Table)
                    .col(EvaluationNodes::DueDate)
                    .to_owned(),
            )
            .await?;

        // (user_id, node_id) 唯一，录入依赖此约束做 upsert
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_entries_user_node")
                    .table(Entries::Table)
                    .col(Entries::UserId)
                    .col(Entries::NodeId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 按照创建的相反顺序删除
        manager
            .drop_table(Table::drop().table(Thresholds::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Entries::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(EvaluationNodes::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Courses::Table).to_owned())
            .await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
enum Courses {
    #[sea_orm(iden = "courses")]
    Table,
    Id,
    OwnerId,
    Name,
    Year,
    Term,
    IsRequired,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum EvaluationNodes {
    #[sea_orm(iden = "evaluation_nodes")]
    Table,
    Id,
    CourseId,
    ParentId,
    Name,
    Weight,
    InputType,
    IsLeaf,
    SortOrder,
    DueDate,
}

#[derive(DeriveIden)]
enum Entries {
    #[sea_orm(iden = "entries")]
    Table,
    Id,
    UserId,
    NodeId,
    Earned,
    MaxPoints,
    Rate,
    Attended,
    Total,
    Adjustment,
    Status,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Thresholds {
    #[sea_orm(iden = "thresholds")]
    Table,
    Id,
    CourseId,
    ThresholdType,
    Value,
}
