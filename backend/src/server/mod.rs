//! Server construction and middleware wiring.

mod config;

pub use config::{ServerConfig, settings_from_process_env};

use actix_web::dev::{Server, ServerHandle, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::middleware::{NormalizePath, TrailingSlash};
use actix_web::{App, HttpServer, web};
use tracing::info;

use user_lookup::Trace;
#[cfg(debug_assertions)]
use user_lookup::doc::ApiDoc;
use user_lookup::domain::ports::UserLookupQuery;
use user_lookup::inbound::http::health::{HealthState, live, ready};
use user_lookup::inbound::http::state::HttpState;
use user_lookup::inbound::http::users::get_user;
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

use std::future::Future;
use std::sync::Arc;

#[derive(Clone)]
struct AppDependencies {
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
}

fn build_app(
    deps: AppDependencies,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let AppDependencies {
        health_state,
        http_state,
    } = deps;

    let app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .wrap(Trace)
        .wrap(NormalizePath::new(TrailingSlash::Trim))
        .service(get_user)
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));

    app
}

/// Construct an Actix HTTP server serving user lookups and health probes.
///
/// # Parameters
/// - `health_state`: shared probe state; readiness is flipped by the caller
///   once the document store answers.
/// - `config`: pre-built [`ServerConfig`] holding the bind address.
/// - `users`: lookup use-case shared by every worker.
///
/// # Returns
/// A spawned [`Server`] that must be awaited to drive the listener.
///
/// # Errors
/// Propagates [`std::io::Error`] when binding the socket fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
    users: Arc<dyn UserLookupQuery>,
) -> std::io::Result<Server> {
    let http_state = web::Data::new(HttpState::new(users));
    let ServerConfig { bind_addr } = config;

    let server = HttpServer::new(move || {
        build_app(AppDependencies {
            health_state: health_state.clone(),
            http_state: http_state.clone(),
        })
    })
    .bind(bind_addr)?
    .run();

    Ok(server)
}

/// Wait for `shutdown`, then fail liveness probes and stop the server
/// gracefully so in-flight requests can finish.
pub async fn drain_on<F>(shutdown: F, health_state: web::Data<HealthState>, handle: ServerHandle)
where
    F: Future<Output = ()>,
{
    shutdown.await;
    info!("shutdown requested; draining HTTP server");
    health_state.mark_unhealthy();
    handle.stop(true).await;
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;
    use actix_web::test as actix_test;
    use rstest::rstest;
    use std::net::{Ipv4Addr, SocketAddr};
    use user_lookup::domain::{Age, TRACE_ID_HEADER, User, UserId, UserLookupService};
    use user_lookup::outbound::persistence::InMemoryUserRepository;

    const STORED_ID: &str = "507f1f77bcf86cd799439011";

    fn deps(health_state: web::Data<HealthState>) -> AppDependencies {
        let id = UserId::new(STORED_ID).expect("valid id");
        let repository = InMemoryUserRepository::default()
            .with_user(User::new(id).with_name("Ada").with_age(Age::from_whole(36)));
        let service = UserLookupService::new(Arc::new(repository));
        AppDependencies {
            health_state,
            http_state: web::Data::new(HttpState::new(Arc::new(service))),
        }
    }

    #[rstest]
    #[actix_web::test]
    async fn app_serves_user_lookups_with_trace_header() {
        let app =
            actix_test::init_service(build_app(deps(web::Data::new(HealthState::new())))).await;

        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::get()
                .uri(&format!("/users/{STORED_ID}"))
                .to_request(),
        )
        .await;

        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers().contains_key(TRACE_ID_HEADER));
    }

    #[rstest]
    #[case("/users/507f1f77bcf86cd799439011/")]
    #[case("//users//507f1f77bcf86cd799439011")]
    #[actix_web::test]
    async fn lookup_paths_are_normalised(#[case] uri: &str) {
        let app =
            actix_test::init_service(build_app(deps(web::Data::new(HealthState::new())))).await;

        let response =
            actix_test::call_service(&app, actix_test::TestRequest::get().uri(uri).to_request())
                .await;

        assert_eq!(response.status(), StatusCode::OK);
        let body: serde_json::Value = actix_test::read_body_json(response).await;
        assert_eq!(body["_id"], STORED_ID);
    }

    #[rstest]
    #[actix_web::test]
    async fn drain_fails_liveness_and_stops_the_server() {
        let health_state = web::Data::new(HealthState::new());
        let AppDependencies { http_state, .. } = deps(health_state.clone());
        let server = create_server(
            health_state.clone(),
            ServerConfig::new(SocketAddr::from((Ipv4Addr::LOCALHOST, 0))),
            http_state.users.clone(),
        )
        .expect("bind an ephemeral port");
        let handle = server.handle();
        let running = actix_web::rt::spawn(server);

        drain_on(std::future::ready(()), health_state.clone(), handle).await;

        assert!(!health_state.is_alive());
        running
            .await
            .expect("server task joins")
            .expect("server stops cleanly");
    }

    #[rstest]
    #[actix_web::test]
    async fn readiness_follows_health_state() {
        let health_state = web::Data::new(HealthState::new());
        let app = actix_test::init_service(build_app(deps(health_state.clone()))).await;

        let before = actix_test::call_service(
            &app,
            actix_test::TestRequest::get()
                .uri("/health/ready")
                .to_request(),
        )
        .await;
        assert_eq!(before.status(), StatusCode::SERVICE_UNAVAILABLE);

        health_state.mark_ready();
        let after = actix_test::call_service(
            &app,
            actix_test::TestRequest::get()
                .uri("/health/ready")
                .to_request(),
        )
        .await;
        assert_eq!(after.status(), StatusCode::OK);
    }

    #[rstest]
    #[actix_web::test]
    async fn unknown_routes_are_not_found() {
        let app =
            actix_test::init_service(build_app(deps(web::Data::new(HealthState::new())))).await;

        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::get().uri("/users").to_request(),
        )
        .await;

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
