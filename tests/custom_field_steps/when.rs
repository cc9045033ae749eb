//! When steps for custom field BDD scenarios.

use super::world::{CustomFieldWorld, run_async};
use eyre::WrapErr;
use rstest_bdd_macros::when;
use serde_json::Value;
use trellis::field::domain::FieldKind;
use trellis::task::{domain::CustomFieldValue, services::CreateTaskRequest};

#[when(r#"a task "{task}" is created with "{field}" set to "{value}""#)]
fn task_created(
    world: &mut CustomFieldWorld,
    task: String,
    field: String,
    value: String,
) -> Result<(), eyre::Report> {
    create_task(world, task, &field, &value)
}

#[when("the list is deleted")]
fn list_deleted(world: &mut CustomFieldWorld) -> Result<(), eyre::Report> {
    let ctx = world.context()?;
    let list_id = world.list()?.id();
    let deletion = run_async(world.state.lists.delete(&ctx, list_id))
        .wrap_err("delete list in scenario")?;
    world.last_deletion = Some(deletion);
    Ok(())
}

/// Creates a task with one custom field entry, recording the outcome.
///
/// Number fields take the step text as a JSON number; every other kind
/// takes it as a string.
pub fn create_task(
    world: &mut CustomFieldWorld,
    task: String,
    field: &str,
    value: &str,
) -> Result<(), eyre::Report> {
    let ctx = world.context()?;
    let list_id = world.list()?.id();
    let definition = world.field(field)?;
    let json = if definition.kind() == FieldKind::Number {
        serde_json::from_str(value).wrap_err("parse number from scenario")?
    } else {
        Value::from(value)
    };
    let request = CreateTaskRequest::new(task)
        .with_custom_fields(vec![CustomFieldValue::new(definition.id(), json)]);
    let result = run_async(world.state.tasks.create(&ctx, list_id, request));
    world.last_task_result = Some(result);
    Ok(())
}
