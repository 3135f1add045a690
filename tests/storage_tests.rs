//! SeaOrmStorage 集成测试，每个用例使用独立的临时 SQLite 文件

use chrono::NaiveDate;
use tempfile::TempDir;

use rakutan_checker::config::DatabaseConfig;
use rakutan_checker::grading::{EvaluationTree, summarize};
use rakutan_checker::models::PaginationQuery;
use rakutan_checker::models::courses::entities::CourseTerm;
use rakutan_checker::models::courses::requests::{
    CourseListQuery, CreateCourseRequest, UpdateCourseRequest,
};
use rakutan_checker::models::entries::entities::EntryStatus;
use rakutan_checker::models::entries::requests::UpsertEntryRequest;
use rakutan_checker::models::nodes::entities::{EvaluationNode, InputType};
use rakutan_checker::models::nodes::requests::{CreateNodeRequest, UpdateNodeRequest};
use rakutan_checker::storage::Storage;
use rakutan_checker::storage::sea_orm_storage::SeaOrmStorage;

const OWNER: i64 = 1;

async fn setup() -> (TempDir, SeaOrmStorage) {
    let dir = tempfile::tempdir().expect("create temp dir");
    let path = dir.path().join("rakutan-test.db");
    let config = DatabaseConfig {
        url: path.to_string_lossy().into_owned(),
        pool_size: 1,
        timeout: 5,
    };
    let storage = SeaOrmStorage::connect(&config)
        .await
        .expect("connect to temp sqlite");
    (dir, storage)
}

fn course_request(name: &str, year: i32, term: CourseTerm) -> CreateCourseRequest {
    CreateCourseRequest {
        name: name.to_string(),
        year,
        term,
        is_required: false,
    }
}

fn node_request(
    parent_id: Option<i64>,
    name: &str,
    weight: f64,
    is_leaf: bool,
) -> CreateNodeRequest {
    CreateNodeRequest {
        parent_id,
        name: name.to_string(),
        weight,
        input_type: if is_leaf {
            InputType::Score
        } else {
            InputType::None
        },
        is_leaf,
        order: 0,
        due_date: None,
    }
}

fn list_query(owner_id: i64) -> CourseListQuery {
    CourseListQuery {
        owner_id,
        pagination: PaginationQuery::default(),
        year: None,
        term: None,
        search: None,
    }
}

async fn create_leaf(
    storage: &SeaOrmStorage,
    course_id: i64,
    parent: Option<i64>,
) -> EvaluationNode {
    storage
        .create_node(course_id, node_request(parent, "課題", 50.0, true))
        .await
        .expect("create leaf")
}

#[tokio::test]
async fn test_course_crud() {
    let (_dir, storage) = setup().await;

    let course = storage
        .create_course(OWNER, course_request("線形代数", 2025, CourseTerm::Early))
        .await
        .unwrap();
    assert_eq!(course.owner_id, OWNER);
    assert_eq!(course.term, CourseTerm::Early);

    let fetched = storage.get_course_by_id(course.id).await.unwrap().unwrap();
    assert_eq!(fetched.name, "線形代数");

    let updated = storage
        .update_course(
            course.id,
            UpdateCourseRequest {
                name: Some("線形代数II".to_string()),
                year: None,
                term: Some(CourseTerm::Late),
                is_required: Some(true),
            },
        )
        .await
        .unwrap()
        .unwrap();
    assert_eq!(updated.name, "線形代数II");
    assert_eq!(updated.year, 2025);
    assert_eq!(updated.term, CourseTerm::Late);
    assert!(updated.is_required);

    let missing = storage
        .update_course(
            9999,
            UpdateCourseRequest {
                name: Some("x".to_string()),
                year: None,
                term: None,
                is_required: None,
            },
        )
        .await
        .unwrap();
    assert!(missing.is_none());

    assert!(storage.delete_course(course.id).await.unwrap());
    assert!(storage.get_course_by_id(course.id).await.unwrap().is_none());
    assert!(!storage.delete_course(course.id).await.unwrap());
}

#[tokio::test]
async fn test_course_list_scoped_to_owner_with_filters() {
    let (_dir, storage) = setup().await;

    storage
        .create_course(OWNER, course_request("解析学", 2024, CourseTerm::Early))
        .await
        .unwrap();
    storage
        .create_course(OWNER, course_request("代数学", 2025, CourseTerm::Late))
        .await
        .unwrap();
    storage
        .create_course(OWNER, course_request("100%_special", 2025, CourseTerm::Early))
        .await
        .unwrap();
    storage
        .create_course(2, course_request("他人の講義", 2025, CourseTerm::Early))
        .await
        .unwrap();

    let all = storage
        .list_courses_with_pagination(list_query(OWNER))
        .await
        .unwrap();
    assert_eq!(all.pagination.total, 3);
    assert!(all.items.iter().all(|c| c.owner_id == OWNER));
    // 年份倒序
    assert_eq!(all.items.last().unwrap().year, 2024);

    let mut by_year = list_query(OWNER);
    by_year.year = Some(2025);
    by_year.term = Some(CourseTerm::Late);
    let filtered = storage.list_courses_with_pagination(by_year).await.unwrap();
    assert_eq!(filtered.items.len(), 1);
    assert_eq!(filtered.items[0].name, "代数学");

    // LIKE 通配符按字面匹配
    let mut search = list_query(OWNER);
    search.search = Some("%_".to_string());
    let found = storage.list_courses_with_pagination(search).await.unwrap();
    assert_eq!(found.items.len(), 1);
    assert_eq!(found.items[0].name, "100%_special");
}

#[tokio::test]
async fn test_nodes_ordered_and_updated() {
    let (_dir, storage) = setup().await;
    let course = storage
        .create_course(OWNER, course_request("物理", 2025, CourseTerm::FullYear))
        .await
        .unwrap();

    let root = storage
        .create_node(course.id, node_request(None, "総合", 100.0, false))
        .await
        .unwrap();
    let mut second = node_request(Some(root.id), "期末", 60.0, true);
    second.order = 2;
    let second = storage.create_node(course.id, second).await.unwrap();
    let mut first = node_request(Some(root.id), "中間", 40.0, true);
    first.order = 1;
    first.due_date = NaiveDate::from_ymd_opt(2025, 6, 1);
    let first = storage.create_node(course.id, first).await.unwrap();

    let tree = EvaluationTree::build(storage.list_course_nodes(course.id).await.unwrap()).unwrap();
    assert_eq!(tree.get(root.id).unwrap().children(), &[first.id, second.id]);

    let updated = storage
        .update_node(
            first.id,
            UpdateNodeRequest {
                weight: Some(30.0),
                due_date: Some(None),
                ..Default::default()
            },
        )
        .await
        .unwrap()
        .unwrap();
    assert_eq!(updated.weight, 30.0);
    assert_eq!(updated.due_date, None);
    assert_eq!(updated.name, "中間");
    assert_eq!(updated.parent_id, Some(root.id));
}

#[tokio::test]
async fn test_upsert_keeps_single_row_and_merges() {
    let (_dir, storage) = setup().await;
    let course = storage
        .create_course(OWNER, course_request("化学", 2025, CourseTerm::Early))
        .await
        .unwrap();
    let leaf = create_leaf(&storage, course.id, None).await;

    let first = storage
        .upsert_entry(
            OWNER,
            UpsertEntryRequest {
                node_id: leaf.id,
                earned: Some(Some(40.0)),
                max: Some(Some(50.0)),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(first.status, EntryStatus::Pending);

    // 省略的字段保持原值
    let second = storage
        .upsert_entry(
            OWNER,
            UpsertEntryRequest {
                node_id: leaf.id,
                status: Some(EntryStatus::Completed),
                adjustment: Some(5.0),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(second.earned, Some(40.0));
    assert_eq!(second.max, Some(50.0));
    assert_eq!(second.adjustment, 5.0);
    assert_eq!(second.status, EntryStatus::Completed);

    // 显式 null 清空
    let third = storage
        .upsert_entry(
            OWNER,
            UpsertEntryRequest {
                node_id: leaf.id,
                earned: Some(None),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(third.earned, None);
    assert_eq!(third.max, Some(50.0));

    let entries = storage.list_course_entries(OWNER, course.id).await.unwrap();
    assert_eq!(entries.len(), 1);

    // 其他用户的录入互不影响
    storage
        .upsert_entry(
            2,
            UpsertEntryRequest {
                node_id: leaf.id,
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(storage.list_course_entries(OWNER, course.id).await.unwrap().len(), 1);
    assert_eq!(storage.list_course_entries(2, course.id).await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_threshold_ensure_is_idempotent() {
    let (_dir, storage) = setup().await;
    let course = storage
        .create_course(OWNER, course_request("英語", 2025, CourseTerm::Early))
        .await
        .unwrap();

    assert!(storage.get_threshold(course.id).await.unwrap().is_none());

    let ensured = storage.ensure_threshold(course.id).await.unwrap();
    assert_eq!(ensured.value, 60.0);
    let again = storage.ensure_threshold(course.id).await.unwrap();
    assert_eq!(again, ensured);

    let set = storage.set_threshold(course.id, 70.0).await.unwrap();
    assert_eq!(set.value, 70.0);

    // ensure 不覆盖已设置的值
    assert_eq!(storage.ensure_threshold(course.id).await.unwrap().value, 70.0);
    assert_eq!(
        storage.get_threshold(course.id).await.unwrap().unwrap().value,
        70.0
    );
}

#[tokio::test]
async fn test_delete_node_removes_subtree_and_entries() {
    let (_dir, storage) = setup().await;
    let course = storage
        .create_course(OWNER, course_request("統計", 2025, CourseTerm::Late))
        .await
        .unwrap();

    let root = storage
        .create_node(course.id, node_request(None, "総合", 100.0, false))
        .await
        .unwrap();
    let group = storage
        .create_node(course.id, node_request(Some(root.id), "レポート", 50.0, false))
        .await
        .unwrap();
    let nested = create_leaf(&storage, course.id, Some(group.id)).await;
    let sibling = create_leaf(&storage, course.id, Some(root.id)).await;

    for node_id in [nested.id, sibling.id] {
        storage
            .upsert_entry(
                OWNER,
                UpsertEntryRequest {
                    node_id,
                    status: Some(EntryStatus::Completed),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
    }

    assert!(storage.delete_node(group.id).await.unwrap());
    assert!(!storage.delete_node(group.id).await.unwrap());

    let remaining: Vec<i64> = storage
        .list_course_nodes(course.id)
        .await
        .unwrap()
        .iter()
        .map(|n| n.id)
        .collect();
    assert_eq!(remaining.len(), 2);
    assert!(remaining.contains(&root.id));
    assert!(remaining.contains(&sibling.id));

    assert!(storage.get_entry(OWNER, nested.id).await.unwrap().is_none());
    assert!(storage.get_entry(OWNER, sibling.id).await.unwrap().is_some());
}

#[tokio::test]
async fn test_delete_course_cascades() {
    let (_dir, storage) = setup().await;
    let course = storage
        .create_course(OWNER, course_request("情報", 2025, CourseTerm::Early))
        .await
        .unwrap();
    let root = storage
        .create_node(course.id, node_request(None, "総合", 100.0, false))
        .await
        .unwrap();
    let leaf = create_leaf(&storage, course.id, Some(root.id)).await;
    storage
        .upsert_entry(
            OWNER,
            UpsertEntryRequest {
                node_id: leaf.id,
                ..Default::default()
            },
        )
        .await
        .unwrap();
    storage.ensure_threshold(course.id).await.unwrap();

    assert!(storage.delete_course(course.id).await.unwrap());

    assert!(storage.list_course_nodes(course.id).await.unwrap().is_empty());
    assert!(storage.get_node_by_id(leaf.id).await.unwrap().is_none());
    assert!(storage.get_entry(OWNER, leaf.id).await.unwrap().is_none());
    assert!(storage.get_threshold(course.id).await.unwrap().is_none());
}

#[tokio::test]
async fn test_events_ordered_by_due_date() {
    let (_dir, storage) = setup().await;
    let math = storage
        .create_course(OWNER, course_request("数学", 2025, CourseTerm::Early))
        .await
        .unwrap();
    let history = storage
        .create_course(OWNER, course_request("歴史", 2025, CourseTerm::Early))
        .await
        .unwrap();
    let foreign = storage
        .create_course(2, course_request("他人", 2025, CourseTerm::Early))
        .await
        .unwrap();

    let mut late = node_request(None, "期末試験", 60.0, true);
    late.due_date = NaiveDate::from_ymd_opt(2025, 7, 30);
    storage.create_node(math.id, late).await.unwrap();

    let mut early = node_request(None, "小テスト", 10.0, true);
    early.due_date = NaiveDate::from_ymd_opt(2025, 5, 10);
    storage.create_node(history.id, early).await.unwrap();

    storage
        .create_node(math.id, node_request(None, "出席", 30.0, true))
        .await
        .unwrap();

    let mut other = node_request(None, "他人の課題", 10.0, true);
    other.due_date = NaiveDate::from_ymd_opt(2025, 4, 1);
    storage.create_node(foreign.id, other).await.unwrap();

    let events = storage.list_events(OWNER).await.unwrap();
    let names: Vec<&str> = events.iter().map(|e| e.name.as_str()).collect();
    assert_eq!(names, vec!["小テスト", "期末試験"]);
    assert_eq!(events[0].course_name, "歴史");
    assert_eq!(events[1].course_name, "数学");

    assert!(storage.list_events(3).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_summary_from_stored_data() {
    let (_dir, storage) = setup().await;
    let course = storage
        .create_course(OWNER, course_request("経済", 2025, CourseTerm::Early))
        .await
        .unwrap();
    let root = storage
        .create_node(course.id, node_request(None, "総合", 100.0, false))
        .await
        .unwrap();
    let done = create_leaf(&storage, course.id, Some(root.id)).await;
    let todo = create_leaf(&storage, course.id, Some(root.id)).await;

    storage
        .upsert_entry(
            OWNER,
            UpsertEntryRequest {
                node_id: done.id,
                earned: Some(Some(0.0)),
                max: Some(Some(100.0)),
                status: Some(EntryStatus::Completed),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    storage
        .upsert_entry(
            OWNER,
            UpsertEntryRequest {
                node_id: todo.id,
                ..Default::default()
            },
        )
        .await
        .unwrap();

    let tree = EvaluationTree::build(storage.list_course_nodes(course.id).await.unwrap()).unwrap();
    let entries = storage.list_course_entries(OWNER, course.id).await.unwrap();
    let threshold = storage.ensure_threshold(course.id).await.unwrap();
    let summary = summarize(&tree, &entries, Some(threshold.value));

    assert_eq!(summary.predicted_score, 0.0);
    assert_eq!(summary.max_score, 50.0);
    assert_eq!(summary.deficit, 60.0);
    assert!(summary.is_fail_predicted);
    assert!(summary.is_certain_fail);
}
