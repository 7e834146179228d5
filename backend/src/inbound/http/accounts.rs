//! Account API handlers.
//!
//! ```text
//! POST /api/auth/register {"name":"Ada","email":"ada@example.com","password":"secret"}
//! POST /api/auth/login {"email":"ada@example.com","password":"secret"}
//! ```

use actix_web::{HttpResponse, post, web};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::ports::LoginOutcome;
use crate::domain::{LoginCredentials, Registration, User};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{login_error, registration_error};

/// Registration request body for `POST /api/auth/register`.
#[derive(Deserialize, ToSchema)]
pub struct RegisterRequest {
    #[schema(example = "Ada Lovelace")]
    pub name: String,
    #[schema(example = "ada@example.com")]
    pub email: String,
    /// At least six characters.
    #[schema(example = "secret", min_length = 6)]
    pub password: String,
}

/// Login request body for `POST /api/auth/login`.
#[derive(Deserialize, ToSchema)]
pub struct LoginRequest {
    #[schema(example = "ada@example.com")]
    pub email: String,
    #[schema(example = "secret")]
    pub password: String,
}

/// Successful login: a bearer token and the authenticated user.
#[derive(Debug, Serialize, ToSchema)]
pub struct LoginResponse {
    /// HS256 JWT to send as `Authorization: Bearer <token>`.
    pub token: String,
    /// Instant after which the token is rejected.
    pub expires_at: DateTime<Utc>,
    pub user: User,
}

impl From<LoginOutcome> for LoginResponse {
    fn from(outcome: LoginOutcome) -> Self {
        Self {
            token: outcome.token.token,
            expires_at: outcome.token.claims.expires_at,
            user: outcome.user,
        }
    }
}

/// Create an account.
#[utoipa::path(
    post,
    path = "/api/auth/register",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "User created", body = User),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 409, description = "Email already registered", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["auth"],
    operation_id = "register",
    security([])
)]
#[post("/register")]
pub async fn register(
    state: web::Data<HttpState>,
    payload: web::Json<RegisterRequest>,
) -> ApiResult<HttpResponse> {
    let RegisterRequest {
        name,
        email,
        password,
    } = payload.into_inner();
    let registration =
        Registration::try_from_parts(&name, &email, &password).map_err(registration_error)?;
    let user = state.registration.register(&registration).await?;
    Ok(HttpResponse::Created().json(user))
}

/// Exchange email and password for a bearer token.
///
/// Unknown emails and wrong passwords fail identically with 401.
#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login success", body = LoginResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Invalid credentials", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["auth"],
    operation_id = "login",
    security([])
)]
#[post("/login")]
pub async fn login(
    state: web::Data<HttpState>,
    payload: web::Json<LoginRequest>,
) -> ApiResult<web::Json<LoginResponse>> {
    let LoginRequest { email, password } = payload.into_inner();
    let credentials = LoginCredentials::try_from_parts(&email, &password).map_err(login_error)?;
    let outcome = state.login.authenticate(&credentials).await?;
    Ok(web::Json(outcome.into()))
}

/// Mount the account endpoints under `/api/auth`.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(web::scope("/api/auth").service(register).service(login));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::{AccessClaims, IssuedToken};
    use crate::domain::{EmailAddress, Error, UserId, UserName};
    use crate::inbound::http::test_utils::{TestPorts, api_app};
    use actix_web::http::StatusCode;
    use actix_web::test;
    use rstest::rstest;
    use serde_json::{Value, json};

    fn created_at() -> DateTime<Utc> {
        DateTime::parse_from_rfc3339("2025-08-01T09:00:00Z")
            .expect("fixture timestamp")
            .with_timezone(&Utc)
    }

    fn ada() -> User {
        User::new(
            UserId::new(1).expect("id"),
            UserName::new("Ada").expect("name"),
            EmailAddress::new("ada@example.com").expect("email"),
            created_at(),
        )
    }

    #[rstest]
    #[actix_web::test]
    async fn register_returns_created_user_without_password() {
        let mut ports = TestPorts::default();
        ports
            .registration
            .expect_register()
            .withf(|reg| reg.email().as_ref() == "ada@example.com" && reg.password() == "secret")
            .times(1)
            .returning(|_| Ok(ada()));
        let app = test::init_service(api_app(ports)).await;

        let res = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/api/auth/register")
                .set_json(json!({"name": "Ada", "email": "ada@example.com", "password": "secret"}))
                .to_request(),
        )
        .await;

        assert_eq!(res.status(), StatusCode::CREATED);
        let body: Value = test::read_body_json(res).await;
        assert_eq!(
            body,
            json!({
                "id": 1,
                "name": "Ada",
                "email": "ada@example.com",
                "created_at": "2025-08-01T09:00:00Z",
            })
        );
    }

    #[rstest]
    #[case(json!({"name": "Ada", "email": "ada@example.com", "password": "12345"}), "password")]
    #[case(json!({"name": " ", "email": "ada@example.com", "password": "secret"}), "name")]
    #[case(json!({"name": "Ada", "email": "nope", "password": "secret"}), "email")]
    #[actix_web::test]
    async fn invalid_registration_is_rejected_before_the_service(
        #[case] payload: Value,
        #[case] field: &str,
    ) {
        let mut ports = TestPorts::default();
        ports.registration.expect_register().never();
        let app = test::init_service(api_app(ports)).await;

        let res = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/api/auth/register")
                .set_json(payload)
                .to_request(),
        )
        .await;

        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["code"], "invalid_request");
        assert_eq!(body["details"]["field"], field);
    }

    #[rstest]
    #[actix_web::test]
    async fn duplicate_email_is_a_conflict() {
        let mut ports = TestPorts::default();
        ports
            .registration
            .expect_register()
            .returning(|_| Err(Error::conflict("email already registered")));
        let app = test::init_service(api_app(ports)).await;

        let res = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/api/auth/register")
                .set_json(json!({"name": "Ada", "email": "ada@example.com", "password": "secret"}))
                .to_request(),
        )
        .await;

        assert_eq!(res.status(), StatusCode::CONFLICT);
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["error"], "email already registered");
    }

    #[rstest]
    #[actix_web::test]
    async fn login_returns_token_and_user() {
        let mut ports = TestPorts::default();
        ports.login.expect_authenticate().times(1).returning(|_| {
            let user = ada();
            Ok(LoginOutcome {
                token: IssuedToken {
                    token: "signed.jwt.value".to_owned(),
                    claims: AccessClaims {
                        user_id: user.id(),
                        email: user.email().clone(),
                        issued_at: created_at(),
                        expires_at: created_at() + chrono::TimeDelta::hours(24),
                    },
                },
                user,
            })
        });
        let app = test::init_service(api_app(ports)).await;

        let res = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/api/auth/login")
                .set_json(json!({"email": "ada@example.com", "password": "secret"}))
                .to_request(),
        )
        .await;

        assert_eq!(res.status(), StatusCode::OK);
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["token"], "signed.jwt.value");
        assert_eq!(body["expires_at"], "2025-08-02T09:00:00Z");
        assert_eq!(body["user"]["id"], 1);
        assert!(body["user"].get("password_hash").is_none());
    }

    #[rstest]
    #[actix_web::test]
    async fn malformed_login_body_is_a_bad_request() {
        let mut ports = TestPorts::default();
        ports.login.expect_authenticate().never();
        let app = test::init_service(api_app(ports)).await;

        let res = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/api/auth/login")
                .insert_header(("content-type", "application/json"))
                .set_payload("{\"email\": ")
                .to_request(),
        )
        .await;

        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["details"]["code"], "invalid_body");
    }
}
