//! Shared HTTP adapter state.
//!
//! Handlers receive this through `web::Data` and only see driving ports, so
//! they stay testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{
    AppointmentsQuery, AvailabilityQuery, BookingCommand, NotificationInbox, ServiceCatalogue,
    UserAccounts,
};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub users: Arc<dyn UserAccounts>,
    pub catalogue: Arc<dyn ServiceCatalogue>,
    pub availability: Arc<dyn AvailabilityQuery>,
    pub bookings: Arc<dyn BookingCommand>,
    pub notifications: Arc<dyn NotificationInbox>,
    pub appointments: Arc<dyn AppointmentsQuery>,
}
