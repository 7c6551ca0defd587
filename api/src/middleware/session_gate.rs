//! Session middleware guarding route scopes by role.
//!
//! Every request through a gate is hydrated from its cookies (or a Bearer
//! header for the access token). Rejections answer 401 and clear the session
//! cookies; a transparent refresh sets the reissued pair on the way out.
//! Handlers read the outcome through the `SessionContext` and `CurrentUser`
//! extractors.

use std::{
    future::{ready, Ready},
    rc::Rc,
};

use actix_web::{
    body::EitherBody,
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    error::ErrorUnauthorized,
    web, Error, FromRequest, HttpMessage, HttpRequest, HttpResponse,
};
use futures_util::future::LocalBoxFuture;
use tracing::error;

use gk_core::domain::{Role, User};
use gk_core::errors::DomainError;
use gk_core::services::Session;
use gk_shared::errors::{error_codes, ErrorResponse};

use crate::handlers::{cookies, handle_domain_error};
use crate::state::AppState;

/// Outcome of the gate, injected into request extensions
#[derive(Debug, Clone)]
pub struct SessionContext {
    /// Effective role, `guest` for anonymous callers
    pub role: Role,
    pub user: Option<User>,
}

impl SessionContext {
    fn guest() -> Self {
        Self {
            role: Role::Guest,
            user: None,
        }
    }
}

/// Session middleware factory
pub struct SessionGate {
    permitted: Rc<Vec<Role>>,
}

impl SessionGate {
    /// Gate that admits everyone, guests included, while still hydrating sessions
    pub fn open() -> Self {
        Self::roles(&[])
    }

    /// Gate that admits only the listed roles
    pub fn roles(permitted: &[Role]) -> Self {
        Self {
            permitted: Rc::new(permitted.to_vec()),
        }
    }
}

impl<S, B> Transform<S, ServiceRequest> for SessionGate
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = SessionGateMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(SessionGateMiddleware {
            service: Rc::new(service),
            permitted: Rc::clone(&self.permitted),
        }))
    }
}

/// Session middleware service
pub struct SessionGateMiddleware<S> {
    service: Rc<S>,
    permitted: Rc<Vec<Role>>,
}

impl<S, B> Service<ServiceRequest> for SessionGateMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);
        let permitted = Rc::clone(&self.permitted);

        Box::pin(async move {
            let Some(state) = req.app_data::<web::Data<AppState>>().cloned() else {
                error!("Application state is not registered; session gate cannot run");
                let response = HttpResponse::InternalServerError().json(ErrorResponse::new(
                    error_codes::INTERNAL_ERROR,
                    "An internal error occurred",
                ));
                return Ok(req.into_response(response).map_into_right_body());
            };

            let credentials = cookies::credentials_from(req.request(), &state.cookies);
            let session = match state.sessions.hydrate(&credentials, permitted.as_slice()).await {
                Ok(session) => session,
                Err(e) => {
                    let response = handle_domain_error(&e, &state.cookies);
                    return Ok(req.into_response(response).map_into_right_body());
                }
            };

            if let Some(reason) = session.rejection() {
                let response = handle_domain_error(&DomainError::Auth(reason.clone()), &state.cookies);
                return Ok(req.into_response(response).map_into_right_body());
            }

            let Session {
                role,
                user,
                reissued,
                ..
            } = session;
            req.extensions_mut().insert(SessionContext { role, user });

            let mut res = service.call(req).await?;
            if let Some(pair) = reissued {
                cookies::set_pair(res.response_mut(), &state.cookies, &pair)?;
            }

            Ok(res.map_into_left_body())
        })
    }
}

/// Session of the current request; guest when no gate ran
impl FromRequest for SessionContext {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut actix_web::dev::Payload) -> Self::Future {
        let context = req
            .extensions()
            .get::<SessionContext>()
            .cloned()
            .unwrap_or_else(SessionContext::guest);
        ready(Ok(context))
    }
}

/// Extractor for a hydrated user
pub struct CurrentUser(pub User);

impl FromRequest for CurrentUser {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut actix_web::dev::Payload) -> Self::Future {
        let result = req
            .extensions()
            .get::<SessionContext>()
            .and_then(|ctx| ctx.user.clone())
            .map(CurrentUser)
            .ok_or_else(|| ErrorUnauthorized("Authentication required"));

        ready(result)
    }
}
