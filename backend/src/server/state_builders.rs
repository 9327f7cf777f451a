//! Assemble domain services over the Diesel, SMTP, and argon2 adapters.

use std::sync::Arc;
use std::time::Duration;

use mockable::DefaultClock;
use tracing::info;

use crate::domain::ports::{BookingMailer, BookingMailerError, DisabledBookingMailer};
use crate::domain::{
    AppointmentQueryService, AvailabilityService, BookingService, CatalogueService,
    NotificationService, UserAccountService,
};
use crate::inbound::http::state::HttpState;
use crate::outbound::mail::{SmtpBookingMailer, SmtpConfig};
use crate::outbound::password::Argon2PasswordHasher;
use crate::outbound::persistence::{
    DbPool, DieselAppointmentRepository, DieselBookingRepository, DieselNotificationRepository,
    DieselScheduleRepository, DieselServiceRepository, DieselUserRepository,
};

/// SMTP mailer when a relay is configured, otherwise the disabled one.
pub fn build_mailer(
    smtp: Option<&SmtpConfig>,
) -> Result<Arc<dyn BookingMailer>, BookingMailerError> {
    match smtp {
        Some(config) => {
            info!(host = %config.host, port = config.port, "booking email enabled");
            Ok(Arc::new(SmtpBookingMailer::new(config)?))
        }
        None => {
            info!("no SMTP host configured; booking email disabled");
            Ok(Arc::new(DisabledBookingMailer))
        }
    }
}

/// Wire every driving port to its service over one shared pool.
pub fn build_http_state(
    pool: &DbPool,
    mailer: Arc<dyn BookingMailer>,
    mail_timeout: Duration,
) -> HttpState {
    let users = Arc::new(DieselUserRepository::new(pool.clone()));
    let schedule = Arc::new(DieselScheduleRepository::new(pool.clone()));
    let services = Arc::new(DieselServiceRepository::new(pool.clone()));
    let clock = Arc::new(DefaultClock);

    HttpState {
        users: Arc::new(UserAccountService::new(
            users.clone(),
            Arc::new(Argon2PasswordHasher::new()),
        )),
        catalogue: Arc::new(CatalogueService::new(services, users, schedule.clone())),
        availability: Arc::new(AvailabilityService::new(schedule)),
        bookings: Arc::new(
            BookingService::new(
                Arc::new(DieselBookingRepository::new(pool.clone())),
                mailer,
                clock.clone(),
            )
            .with_mail_timeout(mail_timeout),
        ),
        notifications: Arc::new(NotificationService::new(Arc::new(
            DieselNotificationRepository::new(pool.clone()),
        ))),
        appointments: Arc::new(AppointmentQueryService::new(
            Arc::new(DieselAppointmentRepository::new(pool.clone())),
            clock,
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn missing_relay_disables_email() {
        let mailer = build_mailer(None).expect("disabled mailer builds");
        assert!(!mailer.is_enabled());
    }
}
