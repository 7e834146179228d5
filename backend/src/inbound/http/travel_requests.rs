//! Travel request API handlers.
//!
//! ```text
//! POST   /api/travel-requests {"requester_name":"Ada","destination":"Lisbon",...}
//! GET    /api/travel-requests?status=approved&destination=lis
//! GET    /api/travel-requests/{id}
//! PUT    /api/travel-requests/{id}/status {"status":"approved"}
//! DELETE /api/travel-requests/{id}
//! ```
//!
//! Every handler takes an [`AuthenticatedUser`] as its first argument, so an
//! unauthenticated call is rejected before the body, path or any port is
//! looked at.

use actix_web::{HttpResponse, delete, get, post, put, web};
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};

use crate::domain::ports::{CancelTravelRequest, CreateTravelRequest, UpdateTravelStatusRequest};
use crate::domain::{TravelRequest, TravelRequestDraft, TravelRequestSearch};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::AuthenticatedUser;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{parse_request_id, travel_request_error};

/// Body of `POST /api/travel-requests`.
///
/// camelCase spellings are accepted as aliases.
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateTravelRequestBody {
    #[serde(alias = "requesterName")]
    #[schema(example = "Ada Lovelace")]
    pub requester_name: String,
    #[schema(example = "Lisbon")]
    pub destination: String,
    #[serde(alias = "departureDate")]
    #[schema(example = "2025-08-15", format = Date)]
    pub departure_date: String,
    #[serde(alias = "returnDate")]
    #[schema(example = "2025-08-20", format = Date)]
    pub return_date: String,
}

/// Body of `PUT /api/travel-requests/{id}/status`.
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateStatusBody {
    /// One of `requested`, `approved`, `cancelled`.
    #[schema(example = "approved")]
    pub status: String,
}

/// Listing filters. Every filter is optional; malformed dates are ignored.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListTravelRequestsQuery {
    /// Exact status; an unknown value matches nothing.
    pub status: Option<String>,
    /// Case-insensitive substring of the destination.
    pub destination: Option<String>,
    /// Earliest departure date (`YYYY-MM-DD`, inclusive).
    pub start_date: Option<String>,
    /// Latest return date (`YYYY-MM-DD`, inclusive).
    pub end_date: Option<String>,
    /// Created on or after this day (`YYYY-MM-DD`, UTC).
    pub created_after: Option<String>,
    /// Created on or before this day (`YYYY-MM-DD`, UTC).
    pub created_before: Option<String>,
}

impl From<ListTravelRequestsQuery> for TravelRequestSearch {
    fn from(query: ListTravelRequestsQuery) -> Self {
        Self {
            status: query.status,
            destination: query.destination,
            start_date: query.start_date,
            end_date: query.end_date,
            created_after: query.created_after,
            created_before: query.created_before,
        }
    }
}

/// Create a travel request owned and created by the caller.
#[utoipa::path(
    post,
    path = "/api/travel-requests",
    request_body = CreateTravelRequestBody,
    responses(
        (status = 201, description = "Travel request created", body = TravelRequest),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["travel-requests"],
    operation_id = "createTravelRequest"
)]
#[post("")]
pub async fn create_travel_request(
    user: AuthenticatedUser,
    state: web::Data<HttpState>,
    payload: web::Json<CreateTravelRequestBody>,
) -> ApiResult<HttpResponse> {
    let body = payload.into_inner();
    let draft = TravelRequestDraft::try_from_parts(
        &body.requester_name,
        &body.destination,
        &body.departure_date,
        &body.return_date,
    )
    .map_err(travel_request_error)?;

    let created = state
        .travel_requests
        .create(CreateTravelRequest {
            actor: user.user_id(),
            draft,
        })
        .await?;
    Ok(HttpResponse::Created().json(created))
}

/// List travel requests, newest first.
#[utoipa::path(
    get,
    path = "/api/travel-requests",
    params(ListTravelRequestsQuery),
    responses(
        (status = 200, description = "Matching travel requests", body = [TravelRequest]),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["travel-requests"],
    operation_id = "listTravelRequests"
)]
#[get("")]
pub async fn list_travel_requests(
    _user: AuthenticatedUser,
    state: web::Data<HttpState>,
    query: web::Query<ListTravelRequestsQuery>,
) -> ApiResult<web::Json<Vec<TravelRequest>>> {
    let requests = state
        .travel_requests_query
        .list(query.into_inner().into())
        .await?;
    Ok(web::Json(requests))
}

/// Fetch one travel request.
#[utoipa::path(
    get,
    path = "/api/travel-requests/{id}",
    params(("id" = i64, Path, description = "Travel request identifier")),
    responses(
        (status = 200, description = "Travel request", body = TravelRequest),
        (status = 400, description = "Invalid identifier", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["travel-requests"],
    operation_id = "getTravelRequest"
)]
#[get("/{id}")]
pub async fn get_travel_request(
    _user: AuthenticatedUser,
    state: web::Data<HttpState>,
    path: web::Path<i64>,
) -> ApiResult<web::Json<TravelRequest>> {
    let id = parse_request_id(path.into_inner())?;
    let request = state.travel_requests_query.get(id).await?;
    Ok(web::Json(request))
}

/// Change a travel request's status.
///
/// The request's creator is always refused, whatever the target status.
#[utoipa::path(
    put,
    path = "/api/travel-requests/{id}/status",
    params(("id" = i64, Path, description = "Travel request identifier")),
    request_body = UpdateStatusBody,
    responses(
        (status = 200, description = "Updated travel request", body = TravelRequest),
        (status = 400, description = "Invalid status or identifier", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Caller created this request", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["travel-requests"],
    operation_id = "updateTravelRequestStatus"
)]
#[put("/{id}/status")]
pub async fn update_travel_request_status(
    user: AuthenticatedUser,
    state: web::Data<HttpState>,
    path: web::Path<i64>,
    payload: Result<web::Json<UpdateStatusBody>, actix_web::Error>,
) -> ApiResult<web::Json<TravelRequest>> {
    let id = parse_request_id(path.into_inner())?;
    // An unreadable body still has to reach the creator check first.
    let status = payload.ok().map(|body| body.into_inner().status);
    let updated = state
        .travel_requests
        .update_status(UpdateTravelStatusRequest {
            actor: user.user_id(),
            id,
            status,
        })
        .await?;
    Ok(web::Json(updated))
}

/// Cancel a travel request.
#[utoipa::path(
    delete,
    path = "/api/travel-requests/{id}",
    params(("id" = i64, Path, description = "Travel request identifier")),
    responses(
        (status = 200, description = "Cancelled travel request", body = TravelRequest),
        (status = 400, description = "Already cancelled or invalid identifier", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["travel-requests"],
    operation_id = "cancelTravelRequest"
)]
#[delete("/{id}")]
pub async fn cancel_travel_request(
    user: AuthenticatedUser,
    state: web::Data<HttpState>,
    path: web::Path<i64>,
) -> ApiResult<web::Json<TravelRequest>> {
    let id = parse_request_id(path.into_inner())?;
    let cancelled = state
        .travel_requests
        .cancel(CancelTravelRequest {
            actor: user.user_id(),
            id,
        })
        .await?;
    Ok(web::Json(cancelled))
}

/// Mount the travel request endpoints under `/api/travel-requests`.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/travel-requests")
            .service(create_travel_request)
            .service(list_travel_requests)
            .service(update_travel_request_status)
            .service(get_travel_request)
            .service(cancel_travel_request),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{
        Error, TravelDates, TravelRequestId, TravelRequestParts, TravelStatus, UserId,
    };
    use crate::inbound::http::test_utils::{TestPorts, api_app, authorise_as};
    use actix_web::http::StatusCode;
    use actix_web::test;
    use chrono::{DateTime, NaiveDate, Utc};
    use rstest::rstest;
    use serde_json::{Value, json};

    fn now() -> DateTime<Utc> {
        DateTime::parse_from_rfc3339("2025-08-01T09:00:00Z")
            .expect("fixture timestamp")
            .with_timezone(&Utc)
    }

    fn request(status: TravelStatus) -> TravelRequest {
        TravelRequest::new(TravelRequestParts {
            id: TravelRequestId::new(5).expect("id"),
            requester_name: "Ada".to_owned(),
            destination: "Lisbon".to_owned(),
            dates: TravelDates::new(
                NaiveDate::from_ymd_opt(2025, 8, 15).expect("date"),
                NaiveDate::from_ymd_opt(2025, 8, 20).expect("date"),
            )
            .expect("dates"),
            status,
            owner_id: UserId::new(1).expect("id"),
            creator_id: UserId::new(1).expect("id"),
            created_at: now(),
            updated_at: now(),
        })
    }

    #[rstest]
    #[case(test::TestRequest::post().uri("/api/travel-requests"))]
    #[case(test::TestRequest::get().uri("/api/travel-requests"))]
    #[case(test::TestRequest::get().uri("/api/travel-requests/5"))]
    #[case(test::TestRequest::put().uri("/api/travel-requests/5/status"))]
    #[case(test::TestRequest::delete().uri("/api/travel-requests/5"))]
    #[actix_web::test]
    async fn every_route_requires_a_token(#[case] request: test::TestRequest) {
        let mut ports = TestPorts::default();
        ports.travel_requests.expect_create().never();
        ports.travel_requests.expect_update_status().never();
        ports.travel_requests.expect_cancel().never();
        ports.travel_requests_query.expect_get().never();
        ports.travel_requests_query.expect_list().never();
        let app = test::init_service(api_app(ports)).await;

        let res = test::call_service(&app, request.to_request()).await;

        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["code"], "unauthorized");
    }

    #[rstest]
    #[actix_web::test]
    async fn create_passes_caller_as_creator() {
        let mut ports = TestPorts::default();
        authorise_as(&mut ports.tokens, 1);
        ports
            .travel_requests
            .expect_create()
            .withf(|cmd| cmd.actor.get() == 1 && cmd.draft.destination() == "Lisbon")
            .times(1)
            .returning(|_| Ok(request(TravelStatus::Requested)));
        let app = test::init_service(api_app(ports)).await;

        let res = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/api/travel-requests")
                .insert_header(("Authorization", "Bearer token"))
                .set_json(json!({
                    "requesterName": "Ada",
                    "destination": "Lisbon",
                    "departureDate": "2025-08-15",
                    "returnDate": "2025-08-20",
                }))
                .to_request(),
        )
        .await;

        assert_eq!(res.status(), StatusCode::CREATED);
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["status"], "requested");
        assert_eq!(body["departure_date"], "2025-08-15");
        assert_eq!(body["creator_id"], 1);
    }

    #[rstest]
    #[case("2025-08-20", "2025-08-19", StatusCode::BAD_REQUEST)]
    #[case("2025-08-20", "2025-08-20", StatusCode::CREATED)]
    #[case("20/08/2025", "2025-08-20", StatusCode::BAD_REQUEST)]
    #[actix_web::test]
    async fn create_validates_dates(
        #[case] departure: &str,
        #[case] ret: &str,
        #[case] expected: StatusCode,
    ) {
        let mut ports = TestPorts::default();
        authorise_as(&mut ports.tokens, 1);
        ports
            .travel_requests
            .expect_create()
            .returning(|_| Ok(request(TravelStatus::Requested)));
        let app = test::init_service(api_app(ports)).await;

        let res = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/api/travel-requests")
                .insert_header(("Authorization", "Bearer token"))
                .set_json(json!({
                    "requester_name": "Ada",
                    "destination": "Lisbon",
                    "departure_date": departure,
                    "return_date": ret,
                }))
                .to_request(),
        )
        .await;

        assert_eq!(res.status(), expected);
    }

    #[rstest]
    #[actix_web::test]
    async fn list_forwards_query_filters() {
        let mut ports = TestPorts::default();
        authorise_as(&mut ports.tokens, 2);
        ports
            .travel_requests_query
            .expect_list()
            .withf(|search| {
                search.status.as_deref() == Some("approved")
                    && search.destination.as_deref() == Some("lis")
                    && search.created_before.as_deref() == Some("2025-08-31")
            })
            .times(1)
            .returning(|_| Ok(Vec::new()));
        let app = test::init_service(api_app(ports)).await;

        let res = test::call_service(
            &app,
            test::TestRequest::get()
                .uri("/api/travel-requests?status=approved&destination=lis&created_before=2025-08-31")
                .insert_header(("Authorization", "Bearer token"))
                .to_request(),
        )
        .await;

        assert_eq!(res.status(), StatusCode::OK);
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body, json!([]));
    }

    #[rstest]
    #[case("/api/travel-requests/abc")]
    #[case("/api/travel-requests/0")]
    #[actix_web::test]
    async fn invalid_ids_are_bad_requests(#[case] uri: &str) {
        let mut ports = TestPorts::default();
        authorise_as(&mut ports.tokens, 2);
        ports.travel_requests_query.expect_get().never();
        let app = test::init_service(api_app(ports)).await;

        let res = test::call_service(
            &app,
            test::TestRequest::get()
                .uri(uri)
                .insert_header(("Authorization", "Bearer token"))
                .to_request(),
        )
        .await;

        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["details"]["field"], "id");
    }

    #[rstest]
    #[actix_web::test]
    async fn unknown_id_is_not_found() {
        let mut ports = TestPorts::default();
        authorise_as(&mut ports.tokens, 2);
        ports
            .travel_requests_query
            .expect_get()
            .returning(|_| Err(Error::not_found("travel request not found")));
        let app = test::init_service(api_app(ports)).await;

        let res = test::call_service(
            &app,
            test::TestRequest::get()
                .uri("/api/travel-requests/99")
                .insert_header(("Authorization", "Bearer token"))
                .to_request(),
        )
        .await;

        assert_eq!(res.status(), StatusCode::NOT_FOUND);
    }

    #[rstest]
    #[actix_web::test]
    async fn update_status_forwards_raw_status_and_actor() {
        let mut ports = TestPorts::default();
        authorise_as(&mut ports.tokens, 2);
        ports
            .travel_requests
            .expect_update_status()
            .withf(|cmd| {
                cmd.actor.get() == 2 && cmd.id.get() == 5 && cmd.status.as_deref() == Some("approved")
            })
            .times(1)
            .returning(|_| Ok(request(TravelStatus::Approved)));
        let app = test::init_service(api_app(ports)).await;

        let res = test::call_service(
            &app,
            test::TestRequest::put()
                .uri("/api/travel-requests/5/status")
                .insert_header(("Authorization", "Bearer token"))
                .set_json(json!({"status": "approved"}))
                .to_request(),
        )
        .await;

        assert_eq!(res.status(), StatusCode::OK);
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["status"], "approved");
    }

    #[rstest]
    #[actix_web::test]
    async fn creator_status_change_is_forbidden() {
        let mut ports = TestPorts::default();
        authorise_as(&mut ports.tokens, 1);
        ports
            .travel_requests
            .expect_update_status()
            .returning(|_| Err(Error::forbidden("creator cannot change status")));
        let app = test::init_service(api_app(ports)).await;

        let res = test::call_service(
            &app,
            test::TestRequest::put()
                .uri("/api/travel-requests/5/status")
                .insert_header(("Authorization", "Bearer token"))
                .set_json(json!({"status": "approved"}))
                .to_request(),
        )
        .await;

        assert_eq!(res.status(), StatusCode::FORBIDDEN);
    }

    #[rstest]
    #[case(test::TestRequest::put().set_json(json!({})))]
    #[case(test::TestRequest::put().set_json(json!({"status": 5})))]
    #[case(test::TestRequest::put().insert_header(("Content-Type", "application/json")).set_payload("{"))]
    #[case(test::TestRequest::put())]
    #[actix_web::test]
    async fn unreadable_status_body_still_reaches_the_service(#[case] request: test::TestRequest) {
        let mut ports = TestPorts::default();
        authorise_as(&mut ports.tokens, 1);
        ports
            .travel_requests
            .expect_update_status()
            .withf(|cmd| cmd.actor.get() == 1 && cmd.status.is_none())
            .times(1)
            .returning(|_| Err(Error::forbidden("creator cannot change status")));
        let app = test::init_service(api_app(ports)).await;

        let res = test::call_service(
            &app,
            request
                .uri("/api/travel-requests/5/status")
                .insert_header(("Authorization", "Bearer token"))
                .to_request(),
        )
        .await;

        assert_eq!(res.status(), StatusCode::FORBIDDEN);
    }

    #[rstest]
    #[actix_web::test]
    async fn cancel_returns_cancelled_record() {
        let mut ports = TestPorts::default();
        authorise_as(&mut ports.tokens, 1);
        ports
            .travel_requests
            .expect_cancel()
            .withf(|cmd| cmd.actor.get() == 1 && cmd.id.get() == 5)
            .times(1)
            .returning(|_| Ok(request(TravelStatus::Cancelled)));
        let app = test::init_service(api_app(ports)).await;

        let res = test::call_service(
            &app,
            test::TestRequest::delete()
                .uri("/api/travel-requests/5")
                .insert_header(("Authorization", "Bearer token"))
                .to_request(),
        )
        .await;

        assert_eq!(res.status(), StatusCode::OK);
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["status"], "cancelled");
    }
}
