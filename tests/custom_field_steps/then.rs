//! Then steps for custom field BDD scenarios.

use super::world::{CustomFieldWorld, run_async};
use rstest_bdd_macros::then;
use serde_json::Value;
use trellis::field::{domain::FieldKind, ports::FieldDefinitionRepository as _};
use trellis::list::ports::ListRepository as _;
use trellis::task::{
    domain::{TaskDomainError, TaskQuery},
    ports::TaskRepository as _,
    services::TaskServiceError,
};

#[then(r#"the task has "{field}" set to "{value}""#)]
fn task_has_value(
    world: &CustomFieldWorld,
    field: String,
    value: String,
) -> Result<(), eyre::Report> {
    let definition = world.field(&field)?;
    let expected = if definition.kind() == FieldKind::Number {
        serde_json::from_str(&value)?
    } else {
        Value::from(value)
    };
    let task = match world.last_task_result.as_ref() {
        Some(Ok(task)) => task,
        other => return Err(eyre::eyre!("expected a created task, got {other:?}")),
    };
    let stored = task
        .custom_fields
        .iter()
        .find(|entry| entry.field_id == definition.id())
        .map(|entry| &entry.value);
    if stored != Some(&expected) {
        return Err(eyre::eyre!("expected {expected}, found {stored:?}"));
    }
    Ok(())
}

#[then("task creation fails with an invalid custom field value")]
fn creation_fails(world: &CustomFieldWorld) -> Result<(), eyre::Report> {
    let result = world
        .last_task_result
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing task result"))?;
    if !matches!(
        result,
        Err(TaskServiceError::Domain(
            TaskDomainError::InvalidCustomFieldValue { .. }
        ))
    ) {
        return Err(eyre::eyre!(
            "expected InvalidCustomFieldValue error, got {result:?}"
        ));
    }
    Ok(())
}

#[then("the list, its tasks and its fields are gone")]
fn list_is_gone(world: &CustomFieldWorld) -> Result<(), eyre::Report> {
    let list = world.list()?;
    let deletion = world
        .last_deletion
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing cascade result"))?;
    if deletion.tasks_deleted != 1 || deletion.fields_deleted != 1 {
        return Err(eyre::eyre!("unexpected cascade counts: {deletion:?}"));
    }
    let repositories = &world.repositories;
    let remaining_list = run_async(repositories.lists.find(list.workspace_id(), list.id()))?;
    let remaining_tasks =
        run_async(repositories.tasks.query(list.id(), &TaskQuery::default()))?;
    let remaining_fields = run_async(repositories.fields.list_by_list(list.id()))?;
    if remaining_list.is_some() || !remaining_tasks.is_empty() || !remaining_fields.is_empty() {
        return Err(eyre::eyre!("cascade left records behind"));
    }
    Ok(())
}
