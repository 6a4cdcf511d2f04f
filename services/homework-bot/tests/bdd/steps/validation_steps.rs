//! BDD step definitions for response validation feature

use cucumber::{given, then, when};
use serde_json::{json, Value};

use homework_bot::validator::check_response;

use crate::world::{kind_named, HomeworkBotWorld};

#[given(expr = "a status payload with homeworks {string}")]
fn payload_with_homeworks(world: &mut HomeworkBotWorld, names: String) {
    let homeworks: Vec<Value> = names
        .split(',')
        .map(|name| json!({"homework_name": name.trim(), "status": "reviewing"}))
        .collect();
    world.payload = Some(json!({"homeworks": homeworks, "current_date": 0}));
}

#[given("a status payload with no homeworks")]
fn payload_empty(world: &mut HomeworkBotWorld) {
    world.payload = Some(json!({"homeworks": [], "current_date": 0}));
}

#[given("a status payload without a homeworks field")]
fn payload_without_field(world: &mut HomeworkBotWorld) {
    world.payload = Some(json!({"current_date": 0}));
}

#[given("a status payload whose homeworks field is not a list")]
fn payload_non_list(world: &mut HomeworkBotWorld) {
    world.payload = Some(json!({"homeworks": "approved"}));
}

#[given("a status payload that is a list")]
fn payload_is_list(world: &mut HomeworkBotWorld) {
    world.payload = Some(json!([{"homework_name": "X", "status": "approved"}]));
}

#[when("the payload is checked")]
fn payload_checked(world: &mut HomeworkBotWorld) {
    let payload = world.payload.as_ref().expect("payload not set");
    world.check_result = Some(check_response(payload));
}

#[then(expr = "the checked homework should be {string}")]
fn checked_homework_is(world: &mut HomeworkBotWorld, name: String) {
    let result = world.check_result.as_ref().expect("no check result");
    let homework = result.as_ref().unwrap();
    assert_eq!(homework.get("homework_name"), Some(&Value::from(name)));
}

#[then(expr = "checking should fail with {string}")]
fn checking_fails_with(world: &mut HomeworkBotWorld, kind: String) {
    let result = world.check_result.as_ref().expect("no check result");
    match result {
        Err(e) => assert_eq!(e.kind(), kind_named(&kind), "{e}"),
        Ok(homework) => panic!("expected {kind}, got {homework:?}"),
    }
}
