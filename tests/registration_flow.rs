mod common;

use common::{FakeHosting, FakeProbe, Harness, settle_check};
use std::sync::atomic::Ordering;
use std::time::Duration;
use subdomain_registrar::application::controller::notice;
use subdomain_registrar::application::controller::view::CHECKING;
use subdomain_registrar::application::controller::{RegistrationState, StatusTone};
use subdomain_registrar::application::services::RegistrationRequest;
use subdomain_registrar::domain::entities::SubdomainName;
use subdomain_registrar::domain::repositories::SELECTED_FOLDER_KEY;
use subdomain_registrar::error::{ProvisioningStep, RegistrarError};

fn messages(registrar: &mut subdomain_registrar::application::controller::Registrar) -> Vec<String> {
    registrar
        .drain_notices()
        .into_iter()
        .map(|n| n.message)
        .collect()
}

fn request(name: &str) -> RegistrationRequest {
    RegistrationRequest {
        owner: "alice".to_string(),
        subdomain: SubdomainName::parse(name).unwrap(),
        parent_path: "/home/alice/sites/".to_string(),
    }
}

#[tokio::test(start_paused = true)]
async fn test_end_to_end_registration() {
    let harness = Harness::new(FakeHosting::default(), FakeProbe::default());
    let mut registrar = harness.registrar(Some("alice"), Some("/home/alice/sites"));

    registrar.sign_in().await;
    registrar.select_folder().await;
    registrar.input_changed("MyBlog");

    let status = registrar.view().status.unwrap();
    assert_eq!(status.tone, StatusTone::Checking);
    assert_eq!(status.text, CHECKING);

    settle_check(&mut registrar).await;

    let view = registrar.view();
    assert_eq!(view.status.unwrap().text, "myblog.puter.site is available!");
    assert!(view.register_enabled);

    let registration = registrar.register().await.expect("registration succeeds");

    assert_eq!(registration.target_path, "/home/alice/sites/myblog");
    assert_eq!(registration.site_url, "https://myblog.puter.site");

    let page = harness
        .filesystem
        .file("/home/alice/sites/myblog/index.html")
        .expect("landing page written");
    assert!(page.contains("myblog.puter.site"));

    let record = harness.hosting.records.lock().unwrap()["myblog"].clone();
    assert_eq!(record.owner, "alice");
    assert_eq!(record.root_dir, "/home/alice/sites/myblog");

    let view = registrar.view();
    assert_eq!(
        view.success_url.as_deref(),
        Some("https://myblog.puter.site")
    );
    assert!(!view.registering);

    let notices = messages(&mut registrar);
    assert!(notices.contains(&notice::SIGNED_IN.to_string()));
    assert!(notices.contains(&notice::FOLDER_SAVED.to_string()));
    assert!(notices.contains(&notice::REGISTERED.to_string()));

    assert_eq!(harness.probe.calls(), vec!["https://myblog.puter.site/"]);
    assert_eq!(
        harness
            .remote
            .values
            .lock()
            .unwrap()
            .get(&("alice".to_string(), SELECTED_FOLDER_KEY.to_string()))
            .cloned(),
        Some("/home/alice/sites".to_string())
    );
}

#[tokio::test(start_paused = true)]
async fn test_invalid_input_never_probes() {
    let harness = Harness::new(FakeHosting::default(), FakeProbe::default());
    let mut registrar = harness.registrar(Some("alice"), Some("/home/alice/sites"));

    registrar.sign_in().await;
    registrar.select_folder().await;
    registrar.input_changed("My_Blog");

    tokio::time::sleep(Duration::from_secs(1)).await;

    let view = registrar.view();
    assert_eq!(
        view.status.unwrap().text,
        "Domain can only contain lowercase letters, numbers, and hyphens"
    );
    assert!(!view.register_enabled);
    assert!(harness.probe.calls().is_empty());

    registrar.drain_notices();
    assert!(registrar.register().await.is_none());
    assert_eq!(
        messages(&mut registrar),
        vec![notice::REGISTER_PRECONDITION.to_string()]
    );
    assert_eq!(harness.filesystem.mkdir_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test(start_paused = true)]
async fn test_taken_name_cannot_be_registered() {
    let harness = Harness::new(
        FakeHosting::default(),
        FakeProbe::default().with_taken(&["taken"]),
    );
    let mut registrar = harness.registrar(Some("alice"), Some("/home/alice/sites"));

    registrar.sign_in().await;
    registrar.select_folder().await;
    registrar.input_changed("taken");
    settle_check(&mut registrar).await;

    let view = registrar.view();
    let status = view.status.unwrap();
    assert_eq!(status.tone, StatusTone::Taken);
    assert_eq!(status.text, "taken.puter.site is already taken");
    assert!(!view.register_enabled);

    assert!(registrar.register().await.is_none());
    assert_eq!(harness.hosting.bind_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test(start_paused = true)]
async fn test_probe_failure_is_reported_as_taken() {
    let harness = Harness::new(FakeHosting::default(), FakeProbe::default());
    harness.probe.fail.store(true, Ordering::SeqCst);
    let mut registrar = harness.registrar(Some("alice"), Some("/home/alice/sites"));

    registrar.sign_in().await;
    registrar.input_changed("myblog");
    settle_check(&mut registrar).await;

    let view = registrar.view();
    assert_eq!(view.status.unwrap().text, notice::CHECK_FAILED);
    assert!(!view.register_enabled);
    assert!(messages(&mut registrar).contains(&notice::CHECK_FAILED.to_string()));
}

#[tokio::test(start_paused = true)]
async fn test_sign_out_clears_folder_and_disables_controls() {
    let harness = Harness::new(FakeHosting::default(), FakeProbe::default());
    let mut registrar = harness.registrar(Some("alice"), Some("/home/alice/sites"));

    registrar.sign_in().await;
    registrar.select_folder().await;
    registrar.input_changed("myblog");
    settle_check(&mut registrar).await;
    assert!(registrar.view().register_enabled);

    registrar.sign_out();

    let view = registrar.view();
    assert!(!view.signed_in);
    assert!(!view.input_enabled);
    assert!(!view.folder_enabled);
    assert!(!view.register_enabled);
    assert_eq!(view.user_label, "Not signed in");
    assert_eq!(view.folder_label, "No folder selected");
    assert!(messages(&mut registrar).contains(&notice::SIGNED_OUT.to_string()));
}

#[tokio::test(start_paused = true)]
async fn test_folder_choice_restored_on_next_sign_in() {
    let harness = Harness::new(FakeHosting::default(), FakeProbe::default());

    let mut first = harness.registrar(Some("alice"), Some("/home/alice/sites"));
    first.sign_in().await;
    first.select_folder().await;

    let mut second = harness.registrar(Some("alice"), None);
    second.sign_in().await;

    assert_eq!(second.view().folder_label, "📁 /home/alice/sites");
}

#[tokio::test(start_paused = true)]
async fn test_failed_login_keeps_session_empty() {
    let harness = Harness::new(FakeHosting::default(), FakeProbe::default());
    let mut registrar = harness.registrar(None, Some("/home/alice/sites"));

    registrar.sign_in().await;
    registrar.select_folder().await;

    assert!(!registrar.view().signed_in);
    assert_eq!(registrar.view().folder_label, "No folder selected");
    assert_eq!(
        messages(&mut registrar),
        vec![notice::LOGIN_FAILED.to_string()]
    );
}

#[tokio::test(start_paused = true)]
async fn test_remote_failure_falls_back_to_local_store() {
    let harness = Harness::new(FakeHosting::default(), FakeProbe::default());
    harness
        .local
        .values
        .lock()
        .unwrap()
        .insert(SELECTED_FOLDER_KEY.to_string(), "/home/shared".to_string());
    harness.remote.fail.store(true, Ordering::SeqCst);

    let mut registrar = harness.registrar(Some("alice"), Some("/home/alice/sites"));
    registrar.sign_in().await;

    assert_eq!(registrar.view().folder_label, "📁 /home/shared");
    assert!(messages(&mut registrar).contains(&notice::FOLDER_LOAD_FAILED.to_string()));

    registrar.select_folder().await;

    assert_eq!(registrar.view().folder_label, "📁 /home/alice/sites");
    assert_eq!(
        messages(&mut registrar),
        vec![notice::FOLDER_SAVE_FAILED.to_string()]
    );
}

#[tokio::test]
async fn test_concurrent_registrations_run_once() {
    let harness = Harness::new(FakeHosting::default(), FakeProbe::default());
    let service = harness.registration.clone();
    let req = request("myblog");

    let (first, second) = tokio::join!(service.register(&req), service.register(&req));

    let outcomes = [first, second];
    let registered = outcomes.iter().filter(|o| o.is_ok()).count();
    let skipped = outcomes
        .iter()
        .filter(|o| matches!(o, Err(RegistrarError::ConcurrencyReject)))
        .count();

    assert_eq!(registered, 1);
    assert_eq!(skipped, 1);
    assert_eq!(harness.filesystem.mkdir_calls.load(Ordering::SeqCst), 1);
    assert_eq!(harness.filesystem.write_calls.load(Ordering::SeqCst), 1);
    assert_eq!(harness.hosting.bind_calls.load(Ordering::SeqCst), 1);
    assert!(!service.is_in_flight());
}

#[tokio::test]
async fn test_reregistration_is_idempotent() {
    let harness = Harness::new(FakeHosting::default(), FakeProbe::default());
    let service = harness.registration.clone();

    let first = service.register(&request("myblog")).await.unwrap();
    let page = harness
        .filesystem
        .file("/home/alice/sites/myblog/index.html")
        .unwrap();
    let second = service.register(&request("myblog")).await.unwrap();

    assert_eq!(first.site_url, second.site_url);
    assert_eq!(first.target_path, second.target_path);
    assert_eq!(
        harness
            .filesystem
            .file("/home/alice/sites/myblog/index.html")
            .unwrap(),
        page
    );
    assert_eq!(harness.hosting.records.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn test_write_failure_stops_before_binding() {
    let harness = Harness::new(FakeHosting::default(), FakeProbe::default());
    *harness.filesystem.fail_write.lock().unwrap() = Some("disk full".to_string());

    let err = harness
        .registration
        .register(&request("myblog"))
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        RegistrarError::Provisioning {
            step: ProvisioningStep::WriteContent,
            ..
        }
    ));
    assert_eq!(err.to_string(), "disk full");
    assert_eq!(harness.hosting.bind_calls.load(Ordering::SeqCst), 0);
    assert!(!harness.registration.is_in_flight());
}

#[tokio::test(start_paused = true)]
async fn test_name_held_by_another_owner_fails_at_binding() {
    let harness = Harness::new(
        FakeHosting::default().with_binding("bob", "myblog", "/home/bob/myblog"),
        FakeProbe::default(),
    );
    let mut registrar = harness.registrar(Some("alice"), Some("/home/alice/sites"));

    registrar.sign_in().await;
    registrar.select_folder().await;
    registrar.input_changed("myblog");
    settle_check(&mut registrar).await;
    registrar.drain_notices();

    assert!(registrar.register().await.is_none());

    assert!(matches!(
        registrar.state().registration,
        RegistrationState::Failed { .. }
    ));
    assert_eq!(
        messages(&mut registrar),
        vec!["Failed to register subdomain: Subdomain 'myblog' is already taken".to_string()]
    );
    assert_eq!(
        harness.hosting.records.lock().unwrap()["myblog"].owner,
        "bob"
    );
}
