use serde_json::json;
use shared::domain::{SessionId, StoryId, StoryStatus, ViewPointId};

use super::*;

fn target(id: &str, index: i64) -> TestTarget {
    TestTarget {
        id: TestTargetId::from(id),
        name: format!("target {id}"),
        index,
        plans: Vec::new(),
    }
}

fn group(id: &str, index: i64, test_targets: Vec<TestTarget>) -> Group {
    Group {
        id: GroupId::from(id),
        name: format!("group {id}"),
        index,
        test_targets,
    }
}

fn matrix(id: &str, index: i64, groups: Vec<Group>) -> TestMatrix {
    TestMatrix {
        id: TestMatrixId::from(id),
        name: format!("matrix {id}"),
        index,
        groups,
        view_points: Vec::new(),
    }
}

fn session(id: &str) -> Session {
    Session {
        id: SessionId::from(id),
        name: format!("session {id}"),
        is_done: false,
        done_date: String::new(),
        test_item: String::new(),
        tester_name: String::new(),
        memo: String::new(),
    }
}

fn story(id: &str, sessions: Vec<Session>) -> Story {
    Story {
        id: StoryId::from(id),
        test_matrix_id: TestMatrixId::from("m1"),
        test_target_id: TestTargetId::from("t1"),
        view_point_id: ViewPointId::from("v1"),
        status: StoryStatus::OutOfScope,
        sessions,
    }
}

fn seeded_store() -> TestManagementStore {
    let mut store = TestManagementStore::new();
    store.set_managed_data(
        Some(vec![story("s1", vec![session("se1"), session("se2")])]),
        vec![
            matrix(
                "m1",
                0,
                vec![
                    group("g1", 0, vec![target("t1", 0), target("t2", 1)]),
                    group("g2", 1, Vec::new()),
                ],
            ),
            matrix("m2", 1, vec![group("g1", 0, vec![target("t1", 0)])]),
        ],
    );
    store
}

#[test]
fn updating_groups_under_one_matrix_leaves_sibling_matrix_untouched() {
    let mut store = seeded_store();
    let sibling_before = store.test_matrix(&TestMatrixId::from("m2")).cloned();

    store.update_groups(
        &TestMatrixId::from("m1"),
        vec![group("g1", 0, Vec::new()), group("g3", 2, Vec::new())],
    );

    assert_eq!(
        store.test_matrix(&TestMatrixId::from("m2")).cloned(),
        sibling_before
    );
    let m1 = store.test_matrix(&TestMatrixId::from("m1")).expect("m1");
    let group_ids: Vec<&str> = m1.groups.iter().map(|g| g.id.as_str()).collect();
    assert_eq!(group_ids, vec!["g1", "g2", "g3"]);
    assert!(m1.groups[0].test_targets.is_empty());
}

#[test]
fn update_test_targets_matches_existing_entries_by_identity() {
    let mut store = seeded_store();
    store.update_test_targets(
        &TestMatrixId::from("m1"),
        &GroupId::from("g1"),
        vec![TestTarget {
            name: "renamed".to_string(),
            ..target("t2", 1)
        }],
    );

    let m1 = store.test_matrix(&TestMatrixId::from("m1")).expect("m1");
    let targets = &m1.groups[0].test_targets;
    assert_eq!(targets.len(), 2);
    assert_eq!(targets[0], target("t1", 0));
    assert_eq!(targets[1].name, "renamed");

    let m2 = store.test_matrix(&TestMatrixId::from("m2")).expect("m2");
    assert_eq!(m2.groups[0].test_targets, vec![target("t1", 0)]);
}

#[test]
fn nested_update_for_unknown_parent_is_a_no_op() {
    let mut store = seeded_store();
    let before = store.state().clone();

    store.update_groups(&TestMatrixId::from("missing"), vec![group("g9", 0, Vec::new())]);
    store.add_test_target(
        &TestMatrixId::from("m1"),
        &GroupId::from("missing"),
        target("t9", 0),
    );

    assert_eq!(store.state(), &before);
}

#[test]
fn add_test_matrix_never_duplicates_identity() {
    let mut store = seeded_store();
    store.add_test_matrix(matrix("m1", 0, Vec::new()));

    assert_eq!(store.test_matrices().len(), 2);
    let m1 = store.test_matrix(&TestMatrixId::from("m1")).expect("m1");
    assert!(m1.groups.is_empty());
}

#[test]
fn delete_group_is_keyed_by_identity_and_parent() {
    let mut store = seeded_store();
    store.delete_group(&TestMatrixId::from("m1"), &GroupId::from("g1"));

    let m1 = store.test_matrix(&TestMatrixId::from("m1")).expect("m1");
    assert_eq!(m1.groups.len(), 1);
    assert_eq!(m1.groups[0].id, GroupId::from("g2"));
    let m2 = store.test_matrix(&TestMatrixId::from("m2")).expect("m2");
    assert_eq!(m2.groups.len(), 1);
}

#[test]
fn merge_does_not_delete_entries_missing_from_batch() {
    let mut store = seeded_store();
    store.update_test_matrices(vec![matrix("m3", 2, Vec::new())]);

    let ids: Vec<&str> = store.test_matrices().iter().map(|m| m.id.as_str()).collect();
    assert_eq!(ids, vec!["m1", "m2", "m3"]);

    store.delete_test_matrix(&TestMatrixId::from("m2"));
    let ids: Vec<&str> = store.test_matrices().iter().map(|m| m.id.as_str()).collect();
    assert_eq!(ids, vec!["m1", "m3"]);
}

#[test]
fn set_managed_data_without_stories_keeps_current_stories() {
    let mut store = seeded_store();
    store.set_managed_data(None, vec![matrix("m9", 0, Vec::new())]);

    assert_eq!(store.stories().len(), 1);
    assert_eq!(store.test_matrices().len(), 1);
    assert_eq!(store.test_matrices()[0].id, TestMatrixId::from("m9"));
}

#[test]
fn set_story_rejects_out_of_range_index() {
    let mut store = seeded_store();
    let err = store
        .set_story(3, story("s9", Vec::new()))
        .expect_err("must fail");

    assert_eq!(err, StoreError::StoryIndexOutOfRange { index: 3, len: 1 });
    assert_eq!(store.stories()[0].id, StoryId::from("s1"));
}

#[test]
fn set_session_replaces_in_place() {
    let mut store = seeded_store();
    let mut done = session("se2");
    done.is_done = true;

    store.set_session(0, 1, done.clone()).expect("set session");

    let sessions = &store.stories()[0].sessions;
    assert_eq!(sessions.len(), 2);
    assert_eq!(sessions[0].id, SessionId::from("se1"));
    assert_eq!(sessions[1], done);

    let err = store
        .set_session(0, 5, session("se9"))
        .expect_err("must fail");
    assert_eq!(
        err,
        StoreError::SessionIndexOutOfRange {
            story_index: 0,
            index: 5,
            len: 2
        }
    );
}

#[test]
fn temp_story_is_detached_from_story_list() {
    let mut store = seeded_store();
    let editing = store.stories()[0].clone();
    store.set_temp_story(editing);
    store.set_session(0, 0, session("replaced")).expect("set session");

    let temp = store.temp_story().expect("temp story");
    assert_eq!(temp.sessions[0].id, SessionId::from("se1"));

    store.clear_temp_story();
    assert!(store.temp_story().is_none());
}

#[test]
fn apply_dispatches_serialized_mutations() {
    let mut store = seeded_store();
    let mutation: StoreMutation = serde_json::from_value(json!({
        "type": "add_test_target",
        "payload": {
            "testMatrixId": "m1",
            "groupId": "g2",
            "testTarget": { "id": "t7", "name": "payment", "index": 0 }
        }
    }))
    .expect("mutation");

    store.apply(mutation).expect("apply");
    store
        .apply(StoreMutation::SetProjectId {
            project_id: ProjectId::from("p1"),
        })
        .expect("apply");

    let m1 = store.test_matrix(&TestMatrixId::from("m1")).expect("m1");
    assert_eq!(m1.groups[1].test_targets[0].id, TestTargetId::from("t7"));
    assert_eq!(store.project_id(), Some(&ProjectId::from("p1")));

    let err = store
        .apply(StoreMutation::SetStory {
            index: 9,
            data: story("s9", Vec::new()),
        })
        .expect_err("must fail");
    assert_eq!(err, StoreError::StoryIndexOutOfRange { index: 9, len: 1 });
}

mod properties {
    use std::collections::HashSet;

    use proptest::prelude::*;

    use super::*;

    fn arb_groups() -> impl Strategy<Value = Vec<Group>> {
        prop::collection::vec(
            (0usize..6, 0i64..4, 0usize..3).prop_map(|(id, index, targets)| {
                let test_targets = (0..targets)
                    .map(|n| target(&format!("t{n}"), n as i64))
                    .collect();
                group(&format!("g{id}"), index, test_targets)
            }),
            0..8,
        )
    }

    fn arb_targets() -> impl Strategy<Value = Vec<TestTarget>> {
        prop::collection::vec(
            (0usize..6, 0i64..4).prop_map(|(id, index)| target(&format!("t{id}"), index)),
            0..8,
        )
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(256))]

        #[test]
        fn group_batches_never_touch_sibling_matrix(batches in prop::collection::vec(arb_groups(), 1..4)) {
            let mut store = seeded_store();
            let sibling = store.test_matrix(&TestMatrixId::from("m2")).cloned();
            let stories = store.stories().to_vec();

            for batch in batches {
                store.update_groups(&TestMatrixId::from("m1"), batch);
            }

            prop_assert_eq!(store.test_matrix(&TestMatrixId::from("m2")).cloned(), sibling);
            prop_assert_eq!(store.stories(), stories.as_slice());
            let m1 = store.test_matrix(&TestMatrixId::from("m1")).expect("m1");
            let unique: HashSet<&str> = m1.groups.iter().map(|g| g.id.as_str()).collect();
            prop_assert_eq!(unique.len(), m1.groups.len());
            prop_assert!(m1.groups.windows(2).all(|pair| pair[0].index <= pair[1].index));
        }

        #[test]
        fn target_batches_stay_under_their_group(batch in arb_targets()) {
            let mut store = seeded_store();
            let sibling = store.test_matrix(&TestMatrixId::from("m2")).cloned();
            let untouched_group = store
                .test_matrix(&TestMatrixId::from("m1"))
                .map(|m| m.groups[0].clone());

            store.update_test_targets(&TestMatrixId::from("m1"), &GroupId::from("g2"), batch.clone());
            store.update_test_targets(&TestMatrixId::from("m1"), &GroupId::from("g2"), batch);

            prop_assert_eq!(store.test_matrix(&TestMatrixId::from("m2")).cloned(), sibling);
            let m1 = store.test_matrix(&TestMatrixId::from("m1")).expect("m1");
            prop_assert_eq!(Some(m1.groups[0].clone()), untouched_group);
            let targets = &m1.groups[1].test_targets;
            let unique: HashSet<&str> = targets.iter().map(|t| t.id.as_str()).collect();
            prop_assert_eq!(unique.len(), targets.len());
        }
    }
}
