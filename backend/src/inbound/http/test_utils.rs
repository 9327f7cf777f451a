//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::{Cookie, Key};
use actix_web::dev::ServiceResponse;

use super::state::HttpState;
use crate::domain::ports::{
    MockAppointmentsQuery, MockAvailabilityQuery, MockBookingCommand, MockNotificationInbox,
    MockServiceCatalogue, MockUserAccounts,
};

/// Session middleware with a fresh key, cookie `session`, and no `Secure`
/// flag so plain HTTP test requests keep it.
pub fn test_session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name("session".to_owned())
        .cookie_secure(false)
        .build()
}

/// Session cookie set by a response.
pub fn session_cookie<B>(res: &ServiceResponse<B>) -> Cookie<'static> {
    res.response()
        .cookies()
        .find(|cookie| cookie.name() == "session")
        .expect("session cookie set")
        .into_owned()
}

/// One mock per driving port; set expectations, then call [`TestPorts::into_state`].
#[derive(Default)]
pub struct TestPorts {
    pub users: MockUserAccounts,
    pub catalogue: MockServiceCatalogue,
    pub availability: MockAvailabilityQuery,
    pub bookings: MockBookingCommand,
    pub notifications: MockNotificationInbox,
    pub appointments: MockAppointmentsQuery,
}

impl TestPorts {
    pub fn into_state(self) -> HttpState {
        HttpState {
            users: Arc::new(self.users),
            catalogue: Arc::new(self.catalogue),
            availability: Arc::new(self.availability),
            bookings: Arc::new(self.bookings),
            notifications: Arc::new(self.notifications),
            appointments: Arc::new(self.appointments),
        }
    }
}
