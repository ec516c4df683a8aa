//! The todo scenario over real HTTP.
//!
//! # Design
//! Starts the server on a random port with an in-memory store, then drives it
//! with ureq. Redirects are not followed, so each mutation's `302` and
//! `Location` are observed directly; the store handle is kept to check what
//! each request actually persisted.

use chrono::NaiveDate;
use todo_core::{TodoFields, TodoStore};
use todo_web::{shared, Db};

fn agent() -> ureq::Agent {
    ureq::Agent::config_builder()
        .http_status_as_error(false)
        .max_redirects(0)
        .build()
        .new_agent()
}

/// Serves `db` on an ephemeral port from a background thread.
fn start(db: Db) -> String {
    let std_listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = std_listener.local_addr().unwrap();
    std_listener.set_nonblocking(true).unwrap();

    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async {
            let listener = tokio::net::TcpListener::from_std(std_listener).unwrap();
            todo_web::run(listener, db).await
        })
        .unwrap();
    });

    format!("http://{addr}")
}

fn count(db: &Db) -> usize {
    db.blocking_lock().count().unwrap()
}

fn location(response: &ureq::http::Response<ureq::Body>) -> &str {
    response.headers()["location"].to_str().unwrap()
}

#[test]
fn todo_scenario() {
    let store = TodoStore::open_in_memory().unwrap();
    let seed = store
        .create(&TodoFields {
            title: "Test TODO".to_string(),
            description: "A sample todo item".to_string(),
            due_date: NaiveDate::from_ymd_opt(2025, 1, 1),
            is_resolved: false,
        })
        .unwrap();
    let db = shared(store);
    let base = start(db.clone());
    let agent = agent();

    // list shows the seeded title
    let mut resp = agent.get(&format!("{base}/")).call().unwrap();
    assert_eq!(resp.status(), 200);
    assert!(resp.body_mut().read_to_string().unwrap().contains("Test TODO"));

    // create redirects back to the list
    let resp = agent
        .post(&format!("{base}/create/"))
        .send_form([
            ("title", "New TODO"),
            ("description", "Desc"),
            ("due_date", "2025-12-31"),
            ("is_resolved", "False"),
        ])
        .unwrap();
    assert_eq!(resp.status(), 302);
    assert_eq!(location(&resp), "/");
    assert_eq!(count(&db), 2);

    // create without a title re-renders the form
    let mut resp = agent
        .post(&format!("{base}/create/"))
        .send_form([
            ("title", ""),
            ("description", "Missing title"),
            ("due_date", "2025-12-31"),
            ("is_resolved", "False"),
        ])
        .unwrap();
    assert_eq!(resp.status(), 200);
    assert!(resp
        .body_mut()
        .read_to_string()
        .unwrap()
        .contains("This field is required"));
    assert_eq!(count(&db), 2);

    // edit replaces the seeded record
    let resp = agent
        .post(&format!("{base}/edit/{}/", seed.id))
        .send_form([
            ("title", "Updated title"),
            ("description", "Updated desc"),
            ("due_date", "2030-01-01"),
            ("is_resolved", "True"),
        ])
        .unwrap();
    assert_eq!(resp.status(), 302);
    let updated = db.blocking_lock().get(seed.id).unwrap().unwrap();
    assert_eq!(updated.title, "Updated title");
    assert!(updated.is_resolved);

    // toggle twice lands back where it started
    for expected in [false, true] {
        let resp = agent
            .get(&format!("{base}/toggle/{}/", seed.id))
            .call()
            .unwrap();
        assert_eq!(resp.status(), 302);
        let todo = db.blocking_lock().get(seed.id).unwrap().unwrap();
        assert_eq!(todo.is_resolved, expected);
    }

    // delete removes it
    let resp = agent
        .get(&format!("{base}/delete/{}/", seed.id))
        .call()
        .unwrap();
    assert_eq!(resp.status(), 302);
    assert_eq!(count(&db), 1);

    // and it is gone for good
    let resp = agent
        .get(&format!("{base}/toggle/{}/", seed.id))
        .call()
        .unwrap();
    assert_eq!(resp.status(), 404);
}
