//! Service orchestration tests for task creation, scoped listing, field
//! updates, and deletion.

use super::fixtures::{Harness, create_request, due_in};
use crate::notification::ports::NotificationRepository;
use crate::task::domain::{TaskChanges, TaskId, TaskPriority, TaskStatus};
use crate::task::ports::TaskRepository;
use crate::task::query::ListTasksRequest;
use crate::task::services::TaskServiceError;
use crate::user::domain::{AuthContext, Role};
use rstest::{fixture, rstest};

#[fixture]
fn harness() -> Harness {
    Harness::new()
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn create_persists_with_defaults_and_is_retrievable(harness: Harness) {
    let (creator, auth) = harness.register("alice", Role::Regular);

    let created = harness
        .service
        .create(&auth, create_request("Ship release"))
        .await
        .expect("task creation should succeed");

    assert_eq!(created.status(), TaskStatus::ToDo);
    assert_eq!(created.priority(), TaskPriority::Medium);
    assert_eq!(created.created_by(), creator);

    let fetched = harness
        .service
        .get(&auth, created.id())
        .await
        .expect("creator can read back their task");
    assert_eq!(fetched, created);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn create_rejects_anonymous_callers(harness: Harness) {
    let result = harness
        .service
        .create(&AuthContext::anonymous(), create_request("Ship release"))
        .await;

    assert!(matches!(result, Err(TaskServiceError::Unauthorized(_))));
    let remaining = harness.tasks.list_all().await.expect("in-memory listing");
    assert!(remaining.is_empty());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn create_notifies_each_initial_assignee(harness: Harness) {
    let (_, auth) = harness.register("alice", Role::Regular);
    let (bob, _) = harness.register("bob", Role::Regular);
    let (carol, _) = harness.register("carol", Role::Regular);

    let created = harness
        .service
        .create(
            &auth,
            create_request("Ship release").with_assignees([bob, carol]),
        )
        .await
        .expect("task creation should succeed");

    for assignee in [bob, carol] {
        let inbox = harness
            .notifications
            .list_for_user(assignee)
            .await
            .expect("in-memory inbox");
        assert_eq!(inbox.len(), 1);
        assert!(inbox.iter().all(|notification| {
            notification.task_id() == created.id()
                && notification.message() == "You have been assigned to a new task: Ship release"
        }));
    }
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn get_hides_tasks_outside_the_caller_scope(harness: Harness) {
    let (_, creator_auth) = harness.register("alice", Role::Regular);
    let (_, stranger_auth) = harness.register("mallory", Role::Regular);
    let (_, admin_auth) = harness.register("root", Role::Admin);

    let created = harness
        .service
        .create(&creator_auth, create_request("Private task"))
        .await
        .expect("task creation should succeed");

    let denied = harness.service.get(&stranger_auth, created.id()).await;
    assert!(matches!(
        denied,
        Err(TaskServiceError::Forbidden { action: "access" })
    ));

    let admin_view = harness
        .service
        .get(&admin_auth, created.id())
        .await
        .expect("administrators see every task");
    assert_eq!(admin_view.id(), created.id());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn get_reports_missing_tasks(harness: Harness) {
    let (_, auth) = harness.register("alice", Role::Regular);
    let missing = TaskId::new();

    let result = harness.service.get(&auth, missing).await;
    assert!(matches!(
        result,
        Err(TaskServiceError::TaskNotFound(id)) if id == missing
    ));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn list_returns_only_the_member_scope(harness: Harness) {
    let (_, alice_auth) = harness.register("alice", Role::Regular);
    let (_, bob_auth) = harness.register("bob", Role::Regular);
    let (_, admin_auth) = harness.register("root", Role::Admin);

    for title in ["Alice one", "Alice two"] {
        harness
            .service
            .create(&alice_auth, create_request(title))
            .await
            .expect("task creation should succeed");
    }
    harness
        .service
        .create(&bob_auth, create_request("Bob only"))
        .await
        .expect("task creation should succeed");

    let alice_page = harness
        .service
        .list(&alice_auth, &ListTasksRequest::new())
        .await
        .expect("scoped listing");
    assert_eq!(alice_page.total, 2);
    assert_eq!(alice_page.count, 2);

    let admin_page = harness
        .service
        .list(&admin_auth, &ListTasksRequest::new())
        .await
        .expect("unrestricted listing");
    assert_eq!(admin_page.total, 3);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn list_applies_projection_and_pagination(harness: Harness) {
    let (_, auth) = harness.register("alice", Role::Regular);
    for title in ["One", "Two", "Three"] {
        harness
            .service
            .create(&auth, create_request(title))
            .await
            .expect("task creation should succeed");
    }

    let request = ListTasksRequest {
        select: Some("title".to_owned()),
        limit: Some(2),
        ..ListTasksRequest::new()
    };
    let page = harness
        .service
        .list(&auth, &request)
        .await
        .expect("projected listing");

    assert_eq!(page.count, 2);
    assert_eq!(page.total, 3);
    assert!(page.pagination.next.is_some_and(|cursor| cursor.page == 2));
    assert!(page.pagination.prev.is_none());
    for item in &page.items {
        let object = item.as_object().expect("projected item is an object");
        assert!(object.contains_key("id"));
        assert!(object.contains_key("title"));
        assert!(!object.contains_key("description"));
    }
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn list_rejects_unknown_sort_fields(harness: Harness) {
    let (_, auth) = harness.register("alice", Role::Regular);
    let request = ListTasksRequest {
        sort: Some("rating".to_owned()),
        ..ListTasksRequest::new()
    };

    let result = harness.service.list(&auth, &request).await;
    assert!(matches!(result, Err(TaskServiceError::Query(_))));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn update_is_limited_to_creator_and_admin(harness: Harness) {
    let (_, creator_auth) = harness.register("alice", Role::Regular);
    let (bob, bob_auth) = harness.register("bob", Role::Regular);
    let (_, admin_auth) = harness.register("root", Role::Admin);

    let created = harness
        .service
        .create(
            &creator_auth,
            create_request("Editable").with_assignees([bob]),
        )
        .await
        .expect("task creation should succeed");

    let denied = harness
        .service
        .update(
            &bob_auth,
            created.id(),
            TaskChanges::new().with_title("Hijacked"),
        )
        .await;
    assert!(matches!(
        denied,
        Err(TaskServiceError::Forbidden { action: "update" })
    ));

    let renamed = harness
        .service
        .update(
            &admin_auth,
            created.id(),
            TaskChanges::new().with_title("Renamed by admin"),
        )
        .await
        .expect("administrators may edit any task");
    assert_eq!(renamed.title(), "Renamed by admin");
    assert_eq!(renamed.created_by(), created.created_by());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn update_rejects_invalid_fields_without_persisting(harness: Harness) {
    let (_, auth) = harness.register("alice", Role::Regular);
    let created = harness
        .service
        .create(&auth, create_request("Stable title"))
        .await
        .expect("task creation should succeed");

    let result = harness
        .service
        .update(&auth, created.id(), TaskChanges::new().with_title("   "))
        .await;
    assert!(matches!(result, Err(TaskServiceError::Validation(_))));

    let stored = harness
        .service
        .get(&auth, created.id())
        .await
        .expect("task still readable");
    assert_eq!(stored.title(), "Stable title");
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn update_notifies_only_newly_added_assignees(harness: Harness) {
    let (_, auth) = harness.register("alice", Role::Regular);
    let (bob, _) = harness.register("bob", Role::Regular);
    let (carol, _) = harness.register("carol", Role::Regular);

    let created = harness
        .service
        .create(&auth, create_request("Rotating crew").with_assignees([bob]))
        .await
        .expect("task creation should succeed");

    harness
        .service
        .update(
            &auth,
            created.id(),
            TaskChanges::new()
                .with_assigned_to([bob, carol])
                .with_due_date(due_in(14)),
        )
        .await
        .expect("creator may update the task");

    let bob_inbox = harness
        .notifications
        .list_for_user(bob)
        .await
        .expect("in-memory inbox");
    assert_eq!(bob_inbox.len(), 1, "retained assignees are not re-notified");

    let carol_inbox = harness
        .notifications
        .list_for_user(carol)
        .await
        .expect("in-memory inbox");
    assert_eq!(carol_inbox.len(), 1);
    assert!(carol_inbox.iter().all(|notification| {
        notification.message() == "You have been assigned to task: Rotating crew"
    }));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn delete_removes_the_task_for_authorized_callers_only(harness: Harness) {
    let (_, creator_auth) = harness.register("alice", Role::Regular);
    let (bob, bob_auth) = harness.register("bob", Role::Regular);

    let created = harness
        .service
        .create(
            &creator_auth,
            create_request("Disposable").with_assignees([bob]),
        )
        .await
        .expect("task creation should succeed");

    let denied = harness.service.delete(&bob_auth, created.id()).await;
    assert!(matches!(
        denied,
        Err(TaskServiceError::Forbidden { action: "delete" })
    ));

    harness
        .service
        .delete(&creator_auth, created.id())
        .await
        .expect("creator may delete their task");

    let gone = harness.service.get(&creator_auth, created.id()).await;
    assert!(matches!(gone, Err(TaskServiceError::TaskNotFound(_))));
}
