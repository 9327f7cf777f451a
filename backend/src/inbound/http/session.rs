//! Session helpers keeping handlers free of framework-specific logic.
//!
//! Wraps the Actix session so handlers only persist, read, or check the
//! authenticated user id.

use actix_session::Session;
use actix_web::{FromRequest, HttpRequest, dev::Payload};
use futures_util::future::LocalBoxFuture;
use serde_json::json;
use tracing::warn;

use crate::domain::{Error, UserId};

pub(crate) const USER_ID_KEY: &str = "user_id";

/// Newtype wrapper exposing higher-level session operations.
#[derive(Clone)]
pub struct SessionContext(Session);

impl SessionContext {
    pub fn new(session: Session) -> Self {
        Self(session)
    }

    /// Persist the authenticated user's id in the session cookie.
    pub fn persist_user(&self, user_id: UserId) -> Result<(), Error> {
        self.0.renew();
        self.0
            .insert(USER_ID_KEY, user_id.get())
            .map_err(|error| Error::internal(format!("failed to persist session: {error}")))
    }

    /// Current user id, if a valid one is stored.
    pub fn user_id(&self) -> Result<Option<UserId>, Error> {
        match self.0.get::<i32>(USER_ID_KEY) {
            Ok(id) => Ok(id.map(UserId::new)),
            Err(error) => {
                warn!(%error, "unreadable user id in session cookie");
                Ok(None)
            }
        }
    }

    /// Require an authenticated user id or return `401 Unauthorized`.
    pub fn require_user_id(&self) -> Result<UserId, Error> {
        self.user_id()?
            .ok_or_else(|| Error::unauthorized("login required"))
    }

    /// Require that the logged-in user is the one named in the request.
    ///
    /// Missing session: `401`. Different user: `403`.
    pub fn require_acting_user(&self, acting_user: UserId) -> Result<UserId, Error> {
        let current = self.require_user_id()?;
        if current != acting_user {
            return Err(Error::forbidden("acting user does not match the session")
                .with_details(json!({ "userId": acting_user.get() })));
        }
        Ok(current)
    }
}

impl FromRequest for SessionContext {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let fut = Session::from_request(req, payload);
        Box::pin(async move { fut.await.map(SessionContext::new) })
    }
}
