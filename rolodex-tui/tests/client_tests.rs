//! The REST client and the app state machine against a live server.
//!
//! Each test binds the real router to `127.0.0.1:0` with an in-memory store.

use std::time::Duration;

use rolodex_api::{create_api_router, ApiConfig, ContactService, ErrorCode};
use rolodex_core::{ContactField, ContactId};
use rolodex_test_utils::fixtures::{full_fields, minimal_fields};
use rolodex_tui::api_client::{ApiClientError, RestClient};
use rolodex_tui::commands::{execute, Command};
use rolodex_tui::config::{ThemeConfig, TuiConfig};
use rolodex_tui::form::DUPLICATE_EMAIL_MESSAGE;
use rolodex_tui::keys::Action;
use rolodex_tui::state::{App, Effect};

async fn spawn_server() -> String {
    let app = create_api_router(ContactService::in_memory(), &ApiConfig::default());
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}", addr)
}

fn client(base_url: &str) -> RestClient {
    RestClient::with_base_url(base_url, Duration::from_secs(5)).unwrap()
}

fn config(base_url: &str) -> TuiConfig {
    TuiConfig {
        api_base_url: base_url.to_string(),
        request_timeout_ms: 5_000,
        notification_ttl_ms: 4_000,
        persistence_path: "tmp/rolodex-tui.json".into(),
        theme: ThemeConfig {
            name: "plain".to_string(),
        },
        refresh_after_mutation: false,
    }
}

/// Run effects until the app stops asking for work.
async fn drive(app: &mut App, client: &RestClient, mut effect: Effect) {
    while let Effect::Run(command) = effect {
        let outcome = execute(client, command).await;
        effect = app.apply(outcome);
    }
}

#[tokio::test]
async fn test_client_crud_round() {
    let base = spawn_server().await;
    let api = client(&base);

    assert!(api.list_contacts().await.unwrap().is_empty());

    let created = api.create_contact(&minimal_fields()).await.unwrap();
    assert_eq!(created.fields, minimal_fields());

    let listed = api.list_contacts().await.unwrap();
    assert_eq!(listed, vec![created.clone()]);

    let mut changed = created.fields.clone();
    changed.last_name = "C".to_string();
    let updated = api.update_contact(created.id, &changed).await.unwrap();
    assert_eq!(updated.id, created.id);
    assert_eq!(updated.fields.last_name, "C");

    let message = api.delete_contact(created.id).await.unwrap();
    assert_eq!(message.message, "Contact deleted successfully");
    assert!(api.list_contacts().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_client_reports_server_errors() {
    let base = spawn_server().await;
    let api = client(&base);

    api.create_contact(&minimal_fields()).await.unwrap();
    let err = api.create_contact(&minimal_fields()).await.unwrap_err();
    assert!(err.is_duplicate_email());
    assert!(matches!(
        err,
        ApiClientError::Api {
            status: 400,
            code: Some(ErrorCode::DuplicateEmail),
            ..
        }
    ));

    let err = api.delete_contact(ContactId::now_v7()).await.unwrap_err();
    assert!(err.is_not_found());
    assert_eq!(err.server_message(), Some("Contact not found"));
}

#[tokio::test]
async fn test_client_transport_error() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let api = client(&format!("http://{}", addr));
    let err = api.list_contacts().await.unwrap_err();
    assert!(matches!(err, ApiClientError::Transport(_)));
    assert!(!err.is_duplicate_email());
}

#[tokio::test]
async fn test_app_create_list_delete_against_server() {
    let base = spawn_server().await;
    let api = client(&base);
    let mut app = App::new(config(&base));

    let startup = app.startup();
    drive(&mut app, &api, Effect::Run(startup)).await;
    assert!(app.cache.is_loaded());
    assert!(app.cache.is_empty());

    app.handle(Action::FocusForm);
    for (field, value) in [
        (ContactField::FirstName, "A"),
        (ContactField::LastName, "B"),
        (ContactField::Email, "a@b.com"),
        (ContactField::PhoneNumber, "123"),
    ] {
        app.create_form.set_value(field, value);
    }
    let effect = app.handle(Action::Confirm);
    drive(&mut app, &api, effect).await;
    assert_eq!(app.cache.len(), 1);
    assert_eq!(app.cache.contacts()[0].fields, minimal_fields());

    // Same email again is rejected and the form keeps its message.
    for (field, value) in [
        (ContactField::FirstName, "X"),
        (ContactField::LastName, "Y"),
        (ContactField::Email, "a@b.com"),
        (ContactField::PhoneNumber, "9"),
    ] {
        app.create_form.set_value(field, value);
    }
    let effect = app.handle(Action::Confirm);
    drive(&mut app, &api, effect).await;
    assert_eq!(app.create_form.error.as_deref(), Some(DUPLICATE_EMAIL_MESSAGE));
    assert_eq!(app.cache.len(), 1);

    app.handle(Action::Cancel);
    app.handle(Action::DeleteItem);
    let effect = app.handle(Action::Confirm);
    drive(&mut app, &api, effect).await;
    assert!(app.cache.is_empty());
    assert!(api.list_contacts().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_app_refresh_after_mutation_matches_server() {
    let base = spawn_server().await;
    let api = client(&base);
    let mut app = App::new(TuiConfig {
        refresh_after_mutation: true,
        ..config(&base)
    });

    // Written behind the app's back; a refetch picks it up.
    api.create_contact(&full_fields()).await.unwrap();

    let effect = app.apply(execute(&api, Command::Create(minimal_fields())).await);
    assert_eq!(effect, Effect::Run(Command::FetchAll));
    drive(&mut app, &api, effect).await;
    assert_eq!(app.cache.len(), 2);
}
