use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use folio_api_rest::{RestServer, RestServerConfig, CONTACT_BODY_LIMIT};
use folio_core_contact_contracts::{ContactService, MockContactService};
use folio_core_contact_impl::{ContactServiceConfig, ContactServiceImpl};
use folio_email_contracts::{Email, EmailSendError, EmailService, MockEmailService};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use tower::ServiceExt;

fn router(contact: impl ContactService) -> Router {
    let config = RestServerConfig {
        addr: ([127, 0, 0, 1], 0).into(),
    };
    RestServer::new(contact, config).router()
}

fn relay(email: impl EmailService) -> Router {
    let config = ContactServiceConfig {
        subject_prefix: "Portfolio Contact: ".into(),
    };
    router(ContactServiceImpl::new(email, config))
}

async fn post(router: Router, body: impl Into<Body>) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(Method::POST)
        .uri("/contact")
        .header(header::CONTENT_TYPE, "application/json")
        .body(body.into())
        .unwrap();
    let response = router.oneshot(request).await.unwrap();
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&body).unwrap())
}

fn valid() -> Value {
    json!({
        "name": "Max Mustermann",
        "email": "max.mustermann@example.de",
        "subject": "Test",
        "message": "Hello World!",
        "honeypot": "",
    })
}

fn with(field: &str, value: Value) -> String {
    let mut form = valid();
    form[field] = value;
    form.to_string()
}

fn expected_email() -> Email {
    Email {
        subject: "Portfolio Contact: Test".into(),
        body: "New contact message from your portfolio website\n\n\
               Name: Max Mustermann\n\
               Email: max.mustermann@example.de\n\
               Subject: Test\n\n\
               Message:\nHello World!\n"
            .into(),
        reply_to: Some("max.mustermann@example.de".into()),
    }
}

#[tokio::test]
async fn ok() {
    // Arrange
    let email = MockEmailService::new().with_send(expected_email(), Ok(()));

    // Act
    let (status, body) = post(relay(email), valid().to_string()).await;

    // Assert
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "ok": true }));
}

#[tokio::test]
async fn ok_without_content_type() {
    // Arrange
    let email = MockEmailService::new().with_send(expected_email(), Ok(()));
    let request = Request::builder()
        .method(Method::POST)
        .uri("/contact")
        .body(Body::from(valid().to_string()))
        .unwrap();

    // Act
    let response = relay(email).oneshot(request).await.unwrap();

    // Assert
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn honeypot() {
    // Arrange
    let email = MockEmailService::new();

    // Act
    let (status, body) = post(relay(email), with("honeypot", json!("I am a bot"))).await;

    // Assert
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "ok": true }));
}

#[tokio::test]
async fn honeypot_skips_validation() {
    // Arrange
    let email = MockEmailService::new();

    // Act
    let (status, body) = post(relay(email), json!({ "honeypot": "x" }).to_string()).await;

    // Assert
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "ok": true }));
}

#[tokio::test]
async fn invalid_json() {
    for payload in ["", "{", "not json", "[1, 2]", "\"name\"", "null"] {
        // Arrange
        let contact = MockContactService::new();

        // Act
        let (status, body) = post(router(contact), payload).await;

        // Assert
        assert_eq!(status, StatusCode::BAD_REQUEST, "{payload:?}");
        assert_eq!(body, json!({ "detail": "Invalid JSON" }), "{payload:?}");
    }
}

#[tokio::test]
async fn missing_or_empty_field() {
    for field in ["name", "email", "subject", "message"] {
        for value in [Value::Null, json!(""), json!("   "), json!(1)] {
            // Arrange
            let email = MockEmailService::new();

            // Act
            let (status, body) = post(relay(email), with(field, value.clone())).await;

            // Assert
            assert_eq!(status, StatusCode::BAD_REQUEST, "{field} = {value}");
            assert_eq!(
                body,
                json!({ "detail": format!("Missing or empty field: {field}") }),
                "{field} = {value}"
            );
        }
    }
}

#[tokio::test]
async fn too_long() {
    for (field, max, detail) in [
        ("name", 100, "name too long"),
        ("subject", 150, "subject too long"),
        ("message", 4000, "message too long"),
    ] {
        // Arrange
        let email = MockEmailService::new();

        // Act
        let (status, body) = post(relay(email), with(field, json!("x".repeat(max + 1)))).await;

        // Assert
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({ "detail": detail }));
    }
}

#[tokio::test]
async fn message_far_too_long() {
    // Arrange
    let email = MockEmailService::new();
    let message = "x".repeat(3 * 1024 * 1024);

    // Act
    let (status, body) = post(relay(email), with("message", json!(message))).await;

    // Assert
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "detail": "message too long" }));
}

#[tokio::test]
async fn body_too_large() {
    // Arrange
    let email = MockEmailService::new();
    let message = "x".repeat(CONTACT_BODY_LIMIT + 1);

    // Act
    let (status, body) = post(relay(email), with("message", json!(message))).await;

    // Assert
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "detail": "Request body too large" }));
}

#[tokio::test]
async fn invalid_email() {
    for address in ["max.mustermann", "max@example"] {
        // Arrange
        let email = MockEmailService::new();

        // Act
        let (status, body) = post(relay(email), with("email", json!(address))).await;

        // Assert
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({ "detail": "invalid email" }));
    }
}

#[tokio::test]
async fn send_error() {
    // Arrange
    let email = MockEmailService::new().with_send(
        expected_email(),
        Err(EmailSendError::Delivery(anyhow::anyhow!("auth rejected"))),
    );

    // Act
    let (status, body) = post(relay(email), valid().to_string()).await;

    // Assert
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        body,
        json!({ "detail": "Failed to send email: auth rejected" })
    );
}

#[tokio::test]
async fn missing_config() {
    // Arrange
    let email = MockEmailService::new().with_send(
        expected_email(),
        Err(EmailSendError::MissingConfig(vec!["SMTP_USERNAME", "SMTP_PASSWORD"])),
    );

    // Act
    let (status, body) = post(relay(email), valid().to_string()).await;

    // Assert
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        body,
        json!({ "detail": "Failed to send email: Email config missing: SMTP_USERNAME, SMTP_PASSWORD" })
    );
}

#[tokio::test]
async fn wrong_method() {
    // Arrange
    let request = Request::builder()
        .method(Method::GET)
        .uri("/contact")
        .body(Body::empty())
        .unwrap();

    // Act
    let response = router(MockContactService::new())
        .oneshot(request)
        .await
        .unwrap();

    // Assert
    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
}
