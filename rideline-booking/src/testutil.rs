use crate::producer::CreatedEventProducer;
use async_trait::async_trait;
use chrono::Utc;
use rideline_domain::booking::{Booking, RideStatus};
use rideline_domain::events::BookingCreated;
use rideline_domain::repository::{BookingRepository, BoxError, CreateBookingParams};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;
use uuid::Uuid;

#[derive(Default)]
pub(crate) struct FakeBookingRepo {
    bookings: Mutex<Vec<Booking>>,
    create_calls: AtomicUsize,
    fail_create: bool,
    fail_writes: AtomicBool,
}

impl FakeBookingRepo {
    pub(crate) fn failing() -> Self {
        Self { fail_create: true, ..Self::default() }
    }

    pub(crate) fn set_write_failure(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    pub(crate) fn create_calls(&self) -> usize {
        self.create_calls.load(Ordering::SeqCst)
    }

    pub(crate) fn stored(&self) -> Vec<Booking> {
        self.bookings.lock().unwrap().clone()
    }

    pub(crate) fn insert(&self, booking: Booking) {
        self.bookings.lock().unwrap().push(booking);
    }
}

#[async_trait]
impl BookingRepository for FakeBookingRepo {
    async fn create(&self, params: CreateBookingParams) -> Result<Booking, BoxError> {
        self.create_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_create {
            return Err("booking store unavailable".into());
        }
        let booking = Booking {
            booking_id: params.booking_id,
            pickup: params.pickup,
            dropoff: params.dropoff,
            price: params.price,
            ride_status: params.ride_status,
            driver_id: params.driver_id,
            created_at: Utc::now(),
        };
        self.bookings.lock().unwrap().push(booking.clone());
        Ok(booking)
    }

    async fn list_all(&self) -> Result<Vec<Booking>, BoxError> {
        let mut all = self.bookings.lock().unwrap().clone();
        all.reverse();
        Ok(all)
    }

    async fn mark_accepted(&self, booking_id: Uuid, driver_id: &str) -> Result<bool, BoxError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err("booking store unavailable".into());
        }
        let mut bookings = self.bookings.lock().unwrap();
        for booking in bookings.iter_mut() {
            if booking.booking_id == booking_id && booking.ride_status == RideStatus::Requested {
                booking.ride_status = RideStatus::Accepted;
                booking.driver_id = Some(driver_id.to_string());
                return Ok(true);
            }
        }
        Ok(false)
    }
}

#[derive(Default)]
pub(crate) struct FakeCreatedProducer {
    events: Mutex<Vec<BookingCreated>>,
    fail: bool,
}

impl FakeCreatedProducer {
    pub(crate) fn failing() -> Self {
        Self { fail: true, ..Self::default() }
    }

    pub(crate) fn published(&self) -> Vec<BookingCreated> {
        self.events.lock().unwrap().clone()
    }
}

#[async_trait]
impl CreatedEventProducer for FakeCreatedProducer {
    async fn publish_booking_created(&self, evt: &BookingCreated) -> Result<(), BoxError> {
        if self.fail {
            return Err("broker unreachable".into());
        }
        self.events.lock().unwrap().push(evt.clone());
        Ok(())
    }
}
