//! Service tests for list management and the cascade delete.

use std::sync::Arc;

use crate::context::RequestContext;
use crate::field::{
    adapters::memory::InMemoryFieldDefinitionRepository,
    domain::{FieldDefinition, FieldDraft, FieldKind, FieldPlacement},
    ports::{FieldDefinitionRepository, FieldRepositoryError, MockFieldDefinitionRepository},
};
use crate::list::{
    adapters::memory::InMemoryListRepository,
    domain::{DEFAULT_LIST_COLOR, ListId, ListPatch},
    services::{CascadeProgress, CascadeStep, CreateListRequest, ListService, ListServiceError},
};
use crate::task::{
    adapters::memory::InMemoryTaskRepository,
    domain::{Task, TaskDraft, TaskPlacement, TaskQuery},
    ports::TaskRepository,
};
use crate::workspace::domain::{UserId, WorkspaceId};
use mockable::DefaultClock;
use rstest::{fixture, rstest};

type TestService = ListService<
    InMemoryListRepository,
    InMemoryTaskRepository,
    InMemoryFieldDefinitionRepository,
    DefaultClock,
>;

struct Harness {
    service: TestService,
    tasks: Arc<InMemoryTaskRepository>,
    fields: Arc<InMemoryFieldDefinitionRepository>,
    ctx: RequestContext,
}

#[fixture]
fn harness() -> Harness {
    let tasks = Arc::new(InMemoryTaskRepository::new());
    let fields = Arc::new(InMemoryFieldDefinitionRepository::new());
    let service = ListService::new(
        Arc::new(InMemoryListRepository::new()),
        Arc::clone(&tasks),
        Arc::clone(&fields),
        Arc::new(DefaultClock),
    );
    Harness {
        service,
        tasks,
        fields,
        ctx: RequestContext::new(WorkspaceId::new(), UserId::new()),
    }
}

async fn seed_task(
    tasks: &InMemoryTaskRepository,
    ctx: &RequestContext,
    list_id: ListId,
    order: i64,
) {
    let placement = TaskPlacement {
        list_id,
        workspace_id: ctx.workspace_id,
        order,
        created_by: ctx.user_id,
    };
    let task = Task::new(TaskDraft::new(format!("Task {order}")), placement, &DefaultClock)
        .expect("task should be valid");
    tasks.store(&task).await.expect("task store should succeed");
}

async fn seed_field(
    fields: &InMemoryFieldDefinitionRepository,
    ctx: &RequestContext,
    list_id: ListId,
) {
    let placement = FieldPlacement {
        list_id,
        workspace_id: ctx.workspace_id,
        order: 0,
        created_by: ctx.user_id,
    };
    let draft = FieldDraft::new("Notes", FieldKind::Text);
    let field =
        FieldDefinition::new(draft, placement, &DefaultClock).expect("field should be valid");
    fields.store(&field).await.expect("field store should succeed");
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn create_appends_lists_in_order(harness: Harness) {
    let mut orders = Vec::new();
    for name in ["Backlog", "Doing", "Done"] {
        let list = harness
            .service
            .create(&harness.ctx, CreateListRequest::new(name))
            .await
            .expect("list creation should succeed");
        orders.push(list.order());
    }

    let lists = harness
        .service
        .list(&harness.ctx)
        .await
        .expect("listing should succeed");

    assert_eq!(orders, vec![0, 1, 2]);
    let names: Vec<&str> = lists.iter().map(|list| list.name()).collect();
    assert_eq!(names, vec!["Backlog", "Doing", "Done"]);
    assert!(lists.iter().all(|list| list.color() == DEFAULT_LIST_COLOR));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn create_rejects_blank_name(harness: Harness) {
    let result = harness
        .service
        .create(&harness.ctx, CreateListRequest::new("  "))
        .await;

    assert!(matches!(result, Err(ListServiceError::Domain(_))));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn lists_are_scoped_to_the_caller_workspace(harness: Harness) {
    let list = harness
        .service
        .create(&harness.ctx, CreateListRequest::new("Private"))
        .await
        .expect("list creation should succeed");
    let stranger = RequestContext::new(WorkspaceId::new(), UserId::new());

    let lookup = harness.service.get(&stranger, list.id()).await;
    let listing = harness
        .service
        .list(&stranger)
        .await
        .expect("listing should succeed");

    assert!(matches!(lookup, Err(ListServiceError::NotFound(id)) if id == list.id()));
    assert!(listing.is_empty());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn update_applies_patch(harness: Harness) {
    let list = harness
        .service
        .create(
            &harness.ctx,
            CreateListRequest::new("Sprint").with_description("Two weeks"),
        )
        .await
        .expect("list creation should succeed");
    let patch = ListPatch {
        icon: Some("🏁".to_owned()),
        description: Some(None),
        ..ListPatch::default()
    };

    let updated = harness
        .service
        .update(&harness.ctx, list.id(), patch)
        .await
        .expect("update should succeed");

    assert_eq!(updated.icon(), "🏁");
    assert_eq!(updated.description(), None);
    assert_eq!(updated.name(), "Sprint");
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn delete_cascades_to_tasks_and_fields(harness: Harness) {
    let list = harness
        .service
        .create(&harness.ctx, CreateListRequest::new("Doomed"))
        .await
        .expect("list creation should succeed");
    let survivor = harness
        .service
        .create(&harness.ctx, CreateListRequest::new("Survivor"))
        .await
        .expect("list creation should succeed");
    for order in 0..3 {
        seed_task(&harness.tasks, &harness.ctx, list.id(), order).await;
    }
    seed_task(&harness.tasks, &harness.ctx, survivor.id(), 0).await;
    seed_field(&harness.fields, &harness.ctx, list.id()).await;

    let deletion = harness
        .service
        .delete(&harness.ctx, list.id())
        .await
        .expect("cascade delete should succeed");

    assert_eq!(deletion.tasks_deleted, 3);
    assert_eq!(deletion.fields_deleted, 1);
    assert!(matches!(
        harness.service.get(&harness.ctx, list.id()).await,
        Err(ListServiceError::NotFound(_))
    ));
    let orphaned_tasks = harness
        .tasks
        .query(list.id(), &TaskQuery::default())
        .await
        .expect("task query should succeed");
    assert!(orphaned_tasks.is_empty());
    let orphaned_fields = harness
        .fields
        .list_by_list(list.id())
        .await
        .expect("field listing should succeed");
    assert!(orphaned_fields.is_empty());
    let surviving_tasks = harness
        .tasks
        .query(survivor.id(), &TaskQuery::default())
        .await
        .expect("task query should succeed");
    assert_eq!(surviving_tasks.len(), 1);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn delete_of_unknown_list_is_not_found(harness: Harness) {
    let missing = ListId::new();

    let result = harness.service.delete(&harness.ctx, missing).await;

    assert!(matches!(result, Err(ListServiceError::NotFound(id)) if id == missing));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn failed_field_step_reports_partial_progress() {
    let lists = Arc::new(InMemoryListRepository::new());
    let tasks = Arc::new(InMemoryTaskRepository::new());
    let mut fields = MockFieldDefinitionRepository::new();
    fields.expect_delete_by_list().times(1).returning(|_| {
        Err(FieldRepositoryError::persistence(std::io::Error::other(
            "connection reset",
        )))
    });
    fields.expect_max_order().never();
    let service = ListService::new(
        Arc::clone(&lists),
        Arc::clone(&tasks),
        Arc::new(fields),
        Arc::new(DefaultClock),
    );
    let ctx = RequestContext::new(WorkspaceId::new(), UserId::new());
    let list = service
        .create(&ctx, CreateListRequest::new("Fragile"))
        .await
        .expect("list creation should succeed");
    seed_task(&tasks, &ctx, list.id(), 0).await;
    seed_task(&tasks, &ctx, list.id(), 1).await;

    let result = service.delete(&ctx, list.id()).await;

    let Err(ListServiceError::Cascade(failure)) = result else {
        panic!("expected a cascade failure");
    };
    assert_eq!(failure.list_id, list.id());
    assert_eq!(failure.failed_step, CascadeStep::FieldDefinitions);
    assert_eq!(
        failure.progress,
        CascadeProgress {
            tasks_deleted: Some(2),
            fields_deleted: None,
        }
    );
    let kept = service
        .get(&ctx, list.id())
        .await
        .expect("list should remain after a failed cascade");
    assert_eq!(kept.name(), "Fragile");
}
