//! Behavioural integration tests for the listing pipeline: raw parameter
//! parsing, scope enforcement, filtering, sorting, pagination, and
//! projection through the public API.

mod test_helpers;

use taskhub::task::domain::{TaskPriority, TaskStatus};
use taskhub::task::query::{ListTasksRequest, QueryError};
use taskhub::task::services::{CreateTaskRequest, TaskServiceError};
use taskhub::user::domain::Role;
use test_helpers::{App, due_in};

async fn seed_backlog(app: &App, auth: &taskhub::user::domain::AuthContext) {
    let specs: [(&str, TaskPriority, i64); 4] = [
        ("Patch edge proxy", TaskPriority::High, 1),
        ("Refresh TLS certs", TaskPriority::Medium, 3),
        ("Archive old dashboards", TaskPriority::Low, 10),
        ("Write retro notes", TaskPriority::Medium, 5),
    ];
    for (title, priority, offset) in specs {
        app.lifecycle
            .create(
                auth,
                CreateTaskRequest::new(title, "Backlog fixture", due_in(offset))
                    .with_priority(priority),
            )
            .await
            .expect("task creation should succeed");
    }
}

#[tokio::test(flavor = "multi_thread")]
async fn raw_parameters_drive_filtering_and_sorting() {
    let app = App::new();
    let (_, auth) = app.register("alice", Role::Regular);
    seed_backlog(&app, &auth).await;

    // Filter by priority through the raw key/value surface.
    let request =
        ListTasksRequest::from_pairs([("priority", "Medium"), ("sort", "dueDate")])
            .expect("allow-listed parameters");
    let page = app
        .lifecycle
        .list(&auth, &request)
        .await
        .expect("filtered listing");

    assert_eq!(page.total, 2);
    let titles: Vec<&str> = page
        .items
        .iter()
        .filter_map(|item| item.get("title").and_then(|title| title.as_str()))
        .collect();
    assert_eq!(titles, vec!["Refresh TLS certs", "Write retro notes"]);
}

#[tokio::test(flavor = "multi_thread")]
async fn priority_sort_orders_high_before_low() {
    let app = App::new();
    let (_, auth) = app.register("alice", Role::Regular);
    seed_backlog(&app, &auth).await;

    let request = ListTasksRequest {
        sort: Some("priority".to_owned()),
        select: Some("priority".to_owned()),
        ..ListTasksRequest::new()
    };
    let page = app
        .lifecycle
        .list(&auth, &request)
        .await
        .expect("sorted listing");

    let priorities: Vec<&str> = page
        .items
        .iter()
        .filter_map(|item| item.get("priority").and_then(|priority| priority.as_str()))
        .collect();
    assert_eq!(priorities, vec!["High", "Medium", "Medium", "Low"]);
}

#[tokio::test(flavor = "multi_thread")]
async fn pagination_walks_the_backlog_without_overlap() {
    let app = App::new();
    let (_, auth) = app.register("alice", Role::Regular);
    seed_backlog(&app, &auth).await;

    let mut seen = Vec::new();
    let mut page_number = 1;
    loop {
        let request = ListTasksRequest {
            sort: Some("dueDate".to_owned()),
            page: Some(page_number),
            limit: Some(3),
            ..ListTasksRequest::new()
        };
        let page = app
            .lifecycle
            .list(&auth, &request)
            .await
            .expect("paginated listing");
        for item in &page.items {
            let id = item
                .get("id")
                .and_then(|value| value.as_str())
                .map(str::to_owned)
                .expect("serialized task carries an id");
            assert!(!seen.contains(&id), "page overlap on {id}");
            seen.push(id);
        }
        match page.pagination.next {
            Some(cursor) => page_number = cursor.page,
            None => break,
        }
    }
    assert_eq!(seen.len(), 4);
}

#[tokio::test(flavor = "multi_thread")]
async fn due_date_window_filters_inclusively() {
    let app = App::new();
    let (_, auth) = app.register("alice", Role::Regular);
    seed_backlog(&app, &auth).await;

    let request = ListTasksRequest {
        due_date_after: Some(due_in(3)),
        due_date_before: Some(due_in(5)),
        select: Some("title".to_owned()),
        sort: Some("dueDate".to_owned()),
        ..ListTasksRequest::new()
    };
    let page = app
        .lifecycle
        .list(&auth, &request)
        .await
        .expect("windowed listing");

    let titles: Vec<&str> = page
        .items
        .iter()
        .filter_map(|item| item.get("title").and_then(|title| title.as_str()))
        .collect();
    assert_eq!(titles, vec!["Refresh TLS certs", "Write retro notes"]);
}

#[tokio::test(flavor = "multi_thread")]
async fn operator_style_parameters_are_rejected_outright() {
    let app = App::new();
    let (_, auth) = app.register("alice", Role::Regular);
    seed_backlog(&app, &auth).await;

    let parse = ListTasksRequest::from_pairs([("status[$ne]", "Completed")]);
    assert!(matches!(parse, Err(QueryError::UnknownParameter(_))));

    let request = ListTasksRequest {
        sort: Some("status;DROP TABLE tasks".to_owned()),
        ..ListTasksRequest::new()
    };
    let listed = app.lifecycle.list(&auth, &request).await;
    assert!(matches!(listed, Err(TaskServiceError::Query(_))));
}

#[tokio::test(flavor = "multi_thread")]
async fn status_filter_composes_with_member_scope() {
    let app = App::new();
    let (_, alice_auth) = app.register("alice", Role::Regular);
    let (_, bob_auth) = app.register("bob", Role::Regular);

    let alice_task = app
        .lifecycle
        .create(
            &alice_auth,
            CreateTaskRequest::new("Alice completed", "Fixture", due_in(2)),
        )
        .await
        .expect("task creation should succeed");
    app.lifecycle
        .update_status(&alice_auth, alice_task.id(), TaskStatus::Completed)
        .await
        .expect("creator completes the task");

    let bob_task = app
        .lifecycle
        .create(
            &bob_auth,
            CreateTaskRequest::new("Bob completed", "Fixture", due_in(2)),
        )
        .await
        .expect("task creation should succeed");
    app.lifecycle
        .update_status(&bob_auth, bob_task.id(), TaskStatus::Completed)
        .await
        .expect("creator completes the task");

    // The same filter returns different rows per caller scope.
    let request = ListTasksRequest::from_pairs([("status", "Completed"), ("select", "title")])
        .expect("allow-listed parameters");
    let alice_page = app
        .lifecycle
        .list(&alice_auth, &request)
        .await
        .expect("scoped listing");
    assert_eq!(alice_page.total, 1);
    assert!(alice_page.items.iter().all(|item| {
        item.get("title").and_then(|title| title.as_str()) == Some("Alice completed")
    }));
}
