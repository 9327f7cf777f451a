//! In-memory stand-ins for the booking persistence ports.
//!
//! One mutex guards the whole store so `commit_booking` is atomic in the same
//! way the Diesel transaction is.
#![allow(dead_code, reason = "each suite uses a different subset")]

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use barbershop::domain::ports::{
    AppointmentRepository, AppointmentRepositoryError, BookingRepository, BookingRepositoryError,
    NotificationRepository, NotificationRepositoryError, ScheduleRepository,
    ScheduleRepositoryError,
};
use barbershop::domain::{
    Appointment, AppointmentId, AppointmentStatus, BookingParty, BookingPlan, BookingRecord,
    Contact, Notification, NotificationId, NotificationKind, NotificationStatus, ServiceId, Slot,
    SlotId, SlotKey, SlotStatus, UserId, booking_notification_message,
};
use chrono::NaiveDate;

#[derive(Default)]
struct Store {
    contacts: HashMap<UserId, Contact>,
    services: HashMap<ServiceId, String>,
    slots: Vec<Slot>,
    appointments: Vec<Appointment>,
    notifications: Vec<Notification>,
}

/// Shop state shared by every port implementation.
#[derive(Default)]
pub struct InMemoryShop {
    store: Mutex<Store>,
}

impl InMemoryShop {
    fn lock(&self) -> MutexGuard<'_, Store> {
        self.store.lock().unwrap_or_else(|err| err.into_inner())
    }

    pub fn add_person(&self, id: UserId, name: &str, email: &str) {
        self.lock().contacts.insert(
            id,
            Contact {
                name: name.to_owned(),
                email: email.to_owned(),
            },
        );
    }

    pub fn add_service(&self, id: ServiceId, name: &str) {
        self.lock().services.insert(id, name.to_owned());
    }

    pub fn add_open_slot(&self, key: SlotKey) -> SlotId {
        let mut store = self.lock();
        let id = SlotId::new(next_id(store.slots.len()));
        store.slots.push(Slot {
            id,
            barber_id: key.barber_id,
            day: key.day,
            range: key.range,
            status: SlotStatus::Available,
        });
        id
    }

    pub fn appointment_count(&self) -> usize {
        self.lock().appointments.len()
    }
}

fn next_id(len: usize) -> i32 {
    i32::try_from(len + 1).unwrap_or(i32::MAX)
}

#[async_trait]
impl BookingRepository for InMemoryShop {
    async fn commit_booking(
        &self,
        plan: &BookingPlan,
    ) -> Result<BookingRecord, BookingRepositoryError> {
        let request = &plan.request;
        let key = request.slot;
        let mut store = self.lock();

        let barber = store
            .contacts
            .get(&key.barber_id)
            .cloned()
            .ok_or_else(|| BookingRepositoryError::barber_not_found(key.barber_id))?;
        let service_name = store
            .services
            .get(&request.service_id)
            .cloned()
            .ok_or_else(|| BookingRepositoryError::service_not_found(request.service_id))?;
        let recipient = match &request.party {
            BookingParty::Customer(id) => store
                .contacts
                .get(id)
                .cloned()
                .ok_or_else(|| BookingRepositoryError::customer_not_found(*id))?,
            BookingParty::Guest(guest) => guest.contact(),
        };

        let slot = store
            .slots
            .iter_mut()
            .find(|slot| slot.key() == key)
            .ok_or_else(|| BookingRepositoryError::slot_not_found(key))?;
        if slot.status != SlotStatus::Available {
            return Err(BookingRepositoryError::slot_unavailable(key));
        }
        slot.status = SlotStatus::Unavailable;
        let slot_id = slot.id;

        let appointment = Appointment {
            id: AppointmentId::new(next_id(store.appointments.len())),
            party: request.party.clone(),
            barber_id: key.barber_id,
            service_id: request.service_id,
            slot_id,
            starts_at: key.starts_at(),
            ends_at: key.ends_at(),
            status: AppointmentStatus::Confirmed,
        };
        store.appointments.push(appointment.clone());

        let notification = Notification {
            id: NotificationId::new(next_id(store.notifications.len())),
            user_id: key.barber_id,
            appointment_id: appointment.id,
            message: booking_notification_message(&recipient.name, &service_name, &key),
            kind: NotificationKind::BookingCreated,
            created_at: plan.booked_at,
            status: NotificationStatus::Unread,
        };
        store.notifications.push(notification);

        Ok(BookingRecord {
            appointment,
            slot: key,
            barber,
            recipient,
            service_name,
        })
    }
}

#[async_trait]
impl ScheduleRepository for InMemoryShop {
    async fn list_available_dates(
        &self,
        barber_id: &UserId,
    ) -> Result<Vec<NaiveDate>, ScheduleRepositoryError> {
        let mut days: Vec<_> = self
            .lock()
            .slots
            .iter()
            .filter(|slot| slot.barber_id == *barber_id && slot.is_available())
            .map(|slot| slot.day)
            .collect();
        days.sort_unstable();
        days.dedup();
        Ok(days)
    }

    async fn list_available_slots(
        &self,
        barber_id: &UserId,
        day: NaiveDate,
    ) -> Result<Vec<Slot>, ScheduleRepositoryError> {
        let mut slots: Vec<_> = self
            .lock()
            .slots
            .iter()
            .filter(|slot| slot.barber_id == *barber_id && slot.day == day && slot.is_available())
            .cloned()
            .collect();
        slots.sort_by_key(|slot| slot.range.start());
        Ok(slots)
    }

    async fn list_barber_slots(
        &self,
        barber_id: &UserId,
    ) -> Result<Vec<Slot>, ScheduleRepositoryError> {
        let mut slots: Vec<_> = self
            .lock()
            .slots
            .iter()
            .filter(|slot| slot.barber_id == *barber_id)
            .cloned()
            .collect();
        slots.sort_by_key(|slot| (slot.day, slot.range.start()));
        Ok(slots)
    }
}

#[async_trait]
impl NotificationRepository for InMemoryShop {
    async fn list_for_user(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<Notification>, NotificationRepositoryError> {
        let mut found: Vec<_> = self
            .lock()
            .notifications
            .iter()
            .filter(|n| n.user_id == *user_id)
            .cloned()
            .collect();
        found.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(found)
    }

    async fn mark_read(&self, id: &NotificationId) -> Result<bool, NotificationRepositoryError> {
        let mut store = self.lock();
        let Some(found) = store.notifications.iter_mut().find(|n| n.id == *id) else {
            return Ok(false);
        };
        found.status = NotificationStatus::Read;
        Ok(true)
    }

    async fn mark_all_read(
        &self,
        ids: &[NotificationId],
    ) -> Result<usize, NotificationRepositoryError> {
        let mut changed = 0;
        for n in &mut self.lock().notifications {
            if ids.contains(&n.id) && n.status == NotificationStatus::Unread {
                n.status = NotificationStatus::Read;
                changed += 1;
            }
        }
        Ok(changed)
    }
}

#[async_trait]
impl AppointmentRepository for InMemoryShop {
    async fn find_by_id(
        &self,
        id: &AppointmentId,
    ) -> Result<Option<Appointment>, AppointmentRepositoryError> {
        Ok(self.lock().appointments.iter().find(|a| a.id == *id).cloned())
    }

    async fn list_for_barber(
        &self,
        barber_id: &UserId,
    ) -> Result<Vec<Appointment>, AppointmentRepositoryError> {
        let mut found: Vec<_> = self
            .lock()
            .appointments
            .iter()
            .filter(|a| a.barber_id == *barber_id)
            .cloned()
            .collect();
        found.sort_by_key(|a| a.starts_at);
        Ok(found)
    }

    async fn list_for_barber_between(
        &self,
        barber_id: &UserId,
        first: NaiveDate,
        last: NaiveDate,
    ) -> Result<Vec<Appointment>, AppointmentRepositoryError> {
        let mut found: Vec<_> = self
            .lock()
            .appointments
            .iter()
            .filter(|a| a.barber_id == *barber_id)
            .filter(|a| (first..=last).contains(&a.starts_at.date()))
            .cloned()
            .collect();
        found.sort_by_key(|a| a.starts_at);
        Ok(found)
    }
}
