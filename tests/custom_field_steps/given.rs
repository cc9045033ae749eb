//! Given steps for custom field BDD scenarios.

use super::when::create_task;
use super::world::{CustomFieldWorld, run_async};
use eyre::WrapErr;
use rstest_bdd_macros::given;
use trellis::field::{
    domain::{FieldSettings, SelectOption},
    services::CreateFieldRequest,
};
use trellis::list::services::CreateListRequest;

#[given(r#"a list named "{name}""#)]
fn list_named(world: &mut CustomFieldWorld, name: String) -> Result<(), eyre::Report> {
    let ctx = world.context()?;
    let list = run_async(world.state.lists.create(&ctx, CreateListRequest::new(name)))
        .wrap_err("create list for scenario")?;
    world.list = Some(list);
    Ok(())
}

#[given(r#"a select field "{name}" offering "{values}""#)]
fn select_field(
    world: &mut CustomFieldWorld,
    name: String,
    values: String,
) -> Result<(), eyre::Report> {
    let options = values
        .split(',')
        .map(|value| SelectOption::new(value.trim(), value.trim()))
        .collect();
    add_field(
        world,
        CreateFieldRequest::new(name, "select").with_options(options),
    )
}

#[given(r#"a number field "{name}" between {min:f64} and {max:f64}"#)]
fn number_field(
    world: &mut CustomFieldWorld,
    name: String,
    min: f64,
    max: f64,
) -> Result<(), eyre::Report> {
    add_field(
        world,
        CreateFieldRequest::new(name, "number")
            .with_settings(FieldSettings::default().with_range(Some(min), Some(max))),
    )
}

#[given(r#"a task "{task}" is created with "{field}" set to "{value}""#)]
fn existing_task(
    world: &mut CustomFieldWorld,
    task: String,
    field: String,
    value: String,
) -> Result<(), eyre::Report> {
    create_task(world, task, &field, &value)?;
    match world.last_task_result.as_ref() {
        Some(Ok(_)) => Ok(()),
        other => Err(eyre::eyre!("expected task creation to succeed, got {other:?}")),
    }
}

fn add_field(
    world: &mut CustomFieldWorld,
    request: CreateFieldRequest,
) -> Result<(), eyre::Report> {
    let ctx = world.context()?;
    let list_id = world.list()?.id();
    let name = request.name.clone();
    let field = run_async(world.state.fields.create(&ctx, list_id, request))
        .wrap_err("create field for scenario")?;
    world.fields.insert(name, field);
    Ok(())
}
