//! Wire-level behaviour: headers and multipart bodies.

#![allow(clippy::unwrap_used, clippy::indexing_slicing)]

use std::collections::HashSet;

use stampdesk_console::api::ops;
use stampdesk_console::screens::FormPhase;
use stampdesk_console::screens::entities::{
    business_create, business_update, profile_create, profile_update,
};
use stampdesk_console::{Navigator, Route};
use stampdesk_core::FileUpload;
use stampdesk_core::forms::{NewBusinessDraft, ProfileDraft};
use stampdesk_integration_tests::{MockServer, TOKEN};
use uuid::Uuid;

fn names(fields: &[(String, String)]) -> Vec<&str> {
    fields.iter().map(|(name, _)| name.as_str()).collect()
}

#[tokio::test]
async fn test_requests_carry_bearer_and_request_id() {
    let server = MockServer::start().await;
    let client = server.signed_in_client().await;

    client.refetch::<ops::GetCurrentUser>(()).await.unwrap();
    client.refetch::<ops::GetCurrentUser>(()).await.unwrap();

    let requests = server.requests();
    let login = &requests[0];
    assert_eq!(login.path, "/api/auth/login-with-password");
    assert_eq!(login.authorization, None);

    let bearer = format!("Bearer {TOKEN}");
    let mut ids = HashSet::new();
    for request in &requests[1..] {
        assert_eq!(request.authorization.as_deref(), Some(bearer.as_str()));
        let id = Uuid::parse_str(request.request_id.as_deref().unwrap()).unwrap();
        assert_eq!(id.get_version_num(), 4);
        ids.insert(id);
    }
    assert_eq!(ids.len(), 2);
}

#[tokio::test]
async fn test_business_update_sends_multipart_galleries() {
    let server = MockServer::start().await;
    let client = server.signed_in_client().await;
    let mut nav = Navigator::new(Route::BusinessUpdate);

    let mut screen = business_update();
    screen.load(&client, &mut nav).await;
    assert_eq!(screen.draft.short_name, "ACM");

    screen.draft.name = "Acme Holdings".to_string();
    screen.draft.logo = Some(FileUpload::new("logo.png", vec![0x89, b'P', b'N', b'G']));
    screen.draft.slide_images = vec![
        FileUpload::new("one.jpg", vec![1]),
        FileUpload::new("two.jpg", vec![2]),
    ];

    let saved = screen.submit(&client, &mut nav).await.unwrap();
    assert_eq!(saved.name, "Acme Holdings");
    assert_eq!(nav.current(), &Route::BusinessList);

    let form = server.last_form("/business/update").unwrap();
    let sent = names(&form);
    for field in [
        "name",
        "shortName",
        "fullName",
        "code",
        "phone",
        "email",
        "taxCode",
        "addressFull",
        "provinceCode",
        "districtCode",
        "wardCode",
        "website",
        "logo",
    ] {
        assert!(sent.contains(&field), "missing {field}");
    }
    assert!(!sent.contains(&"youtube"));
    let slides: Vec<_> = form
        .iter()
        .filter(|(name, _)| name == "slideImages")
        .map(|(_, value)| value.as_str())
        .collect();
    assert_eq!(slides, ["file:one.jpg", "file:two.jpg"]);
}

#[tokio::test]
async fn test_business_without_name_is_rejected_locally() {
    let server = MockServer::start().await;
    let client = server.signed_in_client().await;
    let before = server.requests().len();
    let mut nav = Navigator::new(Route::BusinessCreate);

    let mut screen = business_create(NewBusinessDraft {
        name: "   ".to_string(),
        ..NewBusinessDraft::default()
    });
    assert!(screen.submit(&client, &mut nav).await.is_none());
    assert_eq!(screen.phase(), &FormPhase::Failed("Name is required".to_string()));
    assert_eq!(server.requests().len(), before);
    assert!(server.last_form("/business/create").is_none());
}

#[tokio::test]
async fn test_business_create_posts_form() {
    let server = MockServer::start().await;
    let client = server.signed_in_client().await;
    let mut nav = Navigator::new(Route::BusinessCreate);

    let mut screen = business_create(NewBusinessDraft {
        name: "Beta Foods".to_string(),
        tax_code: "0309999999".to_string(),
        ..NewBusinessDraft::default()
    });
    let created = screen.submit(&client, &mut nav).await.unwrap();
    assert_eq!(created.name, "Beta Foods");
    assert_eq!(nav.current(), &Route::BusinessList);

    let form = server.last_form("/business/create").unwrap();
    assert_eq!(names(&form), ["name", "taxCode"]);
}

#[tokio::test]
async fn test_profile_update_uploads_avatar() {
    let server = MockServer::start().await;
    let client = server.signed_in_client().await;
    let mut nav = Navigator::new(Route::UpdateProfile);

    let mut screen = profile_update();
    screen.load(&client, &mut nav).await;
    assert_eq!(screen.draft.full_name, "Jane Doe");

    screen.draft.full_name = "Jane Q. Doe".to_string();
    screen.draft.avatar = Some(FileUpload::new("me.png", vec![7, 7, 7]));
    let saved = screen.submit(&client, &mut nav).await.unwrap();

    assert_eq!(saved.full_name, "Jane Q. Doe");
    assert_eq!(nav.current(), &Route::Profile);
    let form = server.last_form("/user/update-profile").unwrap();
    assert!(form.contains(&("avatar".to_string(), "file:me.png".to_string())));
    assert!(form.contains(&("full_name".to_string(), "Jane Q. Doe".to_string())));
}

#[tokio::test]
async fn test_profile_create_posts_form() {
    let server = MockServer::start().await;
    let client = server.signed_in_client().await;
    let mut nav = Navigator::new(Route::CreateProfile);

    let mut screen = profile_create(ProfileDraft {
        full_name: "Jane Doe".to_string(),
        email: "jane@example.com".to_string(),
        ..ProfileDraft::default()
    });
    let created = screen.submit(&client, &mut nav).await.unwrap();

    assert_eq!(created.full_name, "Jane Doe");
    assert_eq!(nav.current(), &Route::Profile);
    let form = server.last_form("/user/create-profile").unwrap();
    assert!(form.contains(&("full_name".to_string(), "Jane Doe".to_string())));
    assert!(!names(&form).contains(&"avatar"));
}
