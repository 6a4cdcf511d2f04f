//! BDD step definitions for status translation feature

use cucumber::{given, then, when};
use serde_json::{json, Value};

use homework_bot::translator::{parse_status, ReviewStatus};
use homework_bot::validator::WorkItemRecord;

use crate::world::{kind_named, HomeworkBotWorld};

fn record(value: Value) -> WorkItemRecord {
    match value {
        Value::Object(fields) => WorkItemRecord::new(fields),
        other => panic!("homework must be an object, got {other}"),
    }
}

#[given(expr = "a homework {string} with status {string}")]
fn homework_with_status(world: &mut HomeworkBotWorld, name: String, status: String) {
    world.homework = Some(record(json!({"homework_name": name, "status": status})));
}

#[given(expr = "a homework with status {string} but no name")]
fn homework_without_name(world: &mut HomeworkBotWorld, status: String) {
    world.homework = Some(record(json!({"status": status})));
}

#[given(expr = "a homework {string} without a status")]
fn homework_without_status(world: &mut HomeworkBotWorld, name: String) {
    world.homework = Some(record(json!({"homework_name": name})));
}

#[when("the homework is translated")]
fn homework_translated(world: &mut HomeworkBotWorld) {
    let homework = world.homework.as_ref().expect("homework not set");
    world.translation = Some(parse_status(homework));
}

#[then(expr = "the notification should announce {string} for homework {string}")]
fn notification_announces(world: &mut HomeworkBotWorld, status: String, name: String) {
    let status: ReviewStatus = status.parse().unwrap();
    let result = world.translation.as_ref().expect("no translation");
    assert_eq!(
        result.as_ref().unwrap(),
        &format!(
            "Changed review status for \"{}\". {}",
            name,
            status.verdict()
        )
    );
}

#[then(expr = "translation should fail with {string}")]
fn translation_fails_with(world: &mut HomeworkBotWorld, kind: String) {
    let result = world.translation.as_ref().expect("no translation");
    match result {
        Err(e) => assert_eq!(e.kind(), kind_named(&kind), "{e}"),
        Ok(text) => panic!("expected {kind}, got {text:?}"),
    }
}
