//! Tests for account handlers.

use super::*;
use crate::domain::{Role, User, UserId};
use crate::inbound::http::test_utils::{TestPorts, session_cookie, test_session_middleware};
use actix_web::http::StatusCode;
use actix_web::{App, HttpResponse, get, test as actix_test};
use rstest::{fixture, rstest};
use serde_json::{Value, json};

#[fixture]
fn cy() -> User {
    User {
        id: UserId::new(7),
        username: "cy".into(),
        first_name: "Cy".into(),
        last_name: "Customer".into(),
        role: Role::Customer,
        email: "cy@example.com".into(),
        phone: "5550100".into(),
    }
}

#[get("/whoami")]
async fn whoami(session: SessionContext) -> ApiResult<HttpResponse> {
    let id = session.require_user_id()?;
    Ok(HttpResponse::Ok().body(id.to_string()))
}

macro_rules! init_app {
    ($ports:expr) => {
        actix_test::init_service(
            App::new()
                .app_data(web::Data::new($ports.into_state()))
                .wrap(test_session_middleware())
                .service(login)
                .service(register)
                .service(update_profile)
                .service(whoami),
        )
        .await
    };
}

#[rstest]
#[actix_web::test]
async fn login_returns_profile_and_sets_session(cy: User) {
    let mut ports = TestPorts::default();
    ports
        .users
        .expect_login()
        .withf(|creds| creds.username() == "cy" && creds.password() == "pw")
        .times(1)
        .return_once(move |_| Ok(cy));
    let app = init_app!(ports);

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/login")
            .set_json(json!({"username": " cy ", "password": "pw"}))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::OK);
    let cookie = session_cookie(&res);
    let body: Value = actix_test::read_body_json(res).await;
    assert_eq!(body["user"]["id"], 7);
    assert_eq!(body["user"]["role"], "customer");
    assert_eq!(body["user"]["phoneNumber"], "5550100");
    assert!(body["user"].get("password").is_none());

    let me = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri("/whoami")
            .cookie(cookie)
            .to_request(),
    )
    .await;
    assert_eq!(actix_test::read_body(me).await, "7");
}

#[rstest]
#[case("   ", "pw", "username", "empty_username")]
#[case("cy", "", "password", "empty_password")]
#[actix_web::test]
async fn login_rejects_blank_fields(
    #[case] username: &str,
    #[case] password: &str,
    #[case] field: &str,
    #[case] code: &str,
) {
    let app = init_app!(TestPorts::default());

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/login")
            .set_json(LoginRequest {
                username: username.into(),
                password: password.into(),
            })
            .to_request(),
    )
    .await;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = actix_test::read_body_json(res).await;
    assert_eq!(body["code"], "invalid_request");
    assert_eq!(body["details"]["field"], field);
    assert_eq!(body["details"]["code"], code);
}

#[rstest]
#[actix_web::test]
async fn login_failure_is_unauthorised_without_cookie() {
    let mut ports = TestPorts::default();
    ports
        .users
        .expect_login()
        .return_once(|_| Err(Error::unauthorized("invalid credentials")));
    let app = init_app!(ports);

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/login")
            .set_json(json!({"username": "cy", "password": "nope"}))
            .to_request(),
    )
    .await;

    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    assert!(res.response().cookies().all(|c| c.name() != "session"));
}

#[rstest]
#[actix_web::test]
async fn register_creates_customer(cy: User) {
    let mut ports = TestPorts::default();
    ports
        .users
        .expect_register()
        .withf(|reg| reg.username == "cy" && reg.phone == "5550100")
        .return_once(move |_| Ok(cy));
    let app = init_app!(ports);

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/register")
            .set_json(json!({
                "username": "cy",
                "password": "pw",
                "firstName": "Cy",
                "lastName": "Customer",
                "email": "cy@example.com",
                "phoneNumber": "5550100",
            }))
            .to_request(),
    )
    .await;

    assert_eq!(res.status(), StatusCode::CREATED);
    let body: Value = actix_test::read_body_json(res).await;
    assert_eq!(body["user"]["username"], "cy");
}

#[rstest]
#[actix_web::test]
async fn register_reports_invalid_email_field() {
    let app = init_app!(TestPorts::default());

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/register")
            .set_json(json!({
                "username": "cy",
                "password": "pw",
                "firstName": "Cy",
                "lastName": "Customer",
                "email": "not-an-address",
                "phoneNumber": "5550100",
            }))
            .to_request(),
    )
    .await;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = actix_test::read_body_json(res).await;
    assert_eq!(body["details"]["field"], "email");
}

#[rstest]
#[actix_web::test]
async fn register_conflict_passes_through() {
    let mut ports = TestPorts::default();
    ports.users.expect_register().return_once(|_| {
        Err(Error::conflict("email already registered").with_details(json!({"field": "email"})))
    });
    let app = init_app!(ports);

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/register")
            .set_json(json!({
                "username": "cy",
                "password": "pw",
                "firstName": "Cy",
                "lastName": "Customer",
                "email": "cy@example.com",
                "phoneNumber": "5550100",
            }))
            .to_request(),
    )
    .await;

    assert_eq!(res.status(), StatusCode::CONFLICT);
}

#[rstest]
#[actix_web::test]
async fn update_profile_forwards_only_supplied_fields(mut cy: User) {
    cy.email = "cy@new.example".into();
    let mut ports = TestPorts::default();
    ports
        .users
        .expect_update_profile()
        .withf(|username, changes| {
            username == "cy"
                && changes.email.as_deref() == Some("cy@new.example")
                && changes.first_name.is_none()
                && changes.phone.is_none()
        })
        .return_once(move |_, _| Ok(cy));
    let app = init_app!(ports);

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::put()
            .uri("/update-profile")
            .set_json(json!({"username": "cy", "email": "cy@new.example"}))
            .to_request(),
    )
    .await;

    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = actix_test::read_body_json(res).await;
    assert_eq!(body["user"]["email"], "cy@new.example");
}

#[rstest]
#[actix_web::test]
async fn update_profile_requires_username() {
    let app = init_app!(TestPorts::default());

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::put()
            .uri("/update-profile")
            .set_json(json!({"email": "cy@new.example"}))
            .to_request(),
    )
    .await;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = actix_test::read_body_json(res).await;
    assert_eq!(body["details"]["code"], "missing_field");
}
