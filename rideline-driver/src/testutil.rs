use crate::producer::AcceptedEventProducer;
use async_trait::async_trait;
use chrono::Utc;
use rideline_domain::driver::Driver;
use rideline_domain::events::BookingAccepted;
use rideline_domain::job::{Job, JobStatus};
use rideline_domain::repository::{BoxError, DriverRepository, JobRepository, NewJob};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;
use uuid::Uuid;

#[derive(Default)]
pub(crate) struct FakeDriverRepo {
    drivers: Vec<Driver>,
}

impl FakeDriverRepo {
    pub(crate) fn with_available(driver_id: &str) -> Self {
        Self {
            drivers: vec![Driver {
                driver_id: driver_id.to_string(),
                name: "Asha".to_string(),
                is_available: true,
            }],
        }
    }

    pub(crate) fn with_unavailable(driver_id: &str) -> Self {
        Self {
            drivers: vec![Driver {
                driver_id: driver_id.to_string(),
                name: "Asha".to_string(),
                is_available: false,
            }],
        }
    }

    pub(crate) fn with_roster(driver_ids: &[&str]) -> Self {
        Self {
            drivers: driver_ids
                .iter()
                .map(|id| Driver {
                    driver_id: (*id).to_string(),
                    name: (*id).to_string(),
                    is_available: true,
                })
                .collect(),
        }
    }
}

#[async_trait]
impl DriverRepository for FakeDriverRepo {
    async fn list_all(&self) -> Result<Vec<Driver>, BoxError> {
        Ok(self.drivers.clone())
    }

    async fn get(&self, driver_id: &str) -> Result<Option<Driver>, BoxError> {
        Ok(self.drivers.iter().find(|d| d.driver_id == driver_id).cloned())
    }
}

#[derive(Default)]
pub(crate) struct FakeJobRepo {
    jobs: Mutex<Vec<Job>>,
    fail: bool,
    fail_inserts: AtomicBool,
    insert_calls: AtomicUsize,
    try_accept_calls: AtomicUsize,
}

impl FakeJobRepo {
    pub(crate) fn failing() -> Self {
        Self { fail: true, ..Self::default() }
    }

    pub(crate) fn set_insert_failure(&self, fail: bool) {
        self.fail_inserts.store(fail, Ordering::SeqCst);
    }

    pub(crate) fn insert_calls(&self) -> usize {
        self.insert_calls.load(Ordering::SeqCst)
    }

    pub(crate) fn try_accept_calls(&self) -> usize {
        self.try_accept_calls.load(Ordering::SeqCst)
    }

    pub(crate) fn stored(&self) -> Vec<Job> {
        self.jobs.lock().unwrap().clone()
    }
}

#[async_trait]
impl JobRepository for FakeJobRepo {
    async fn insert_open_job(&self, job: NewJob) -> Result<(), BoxError> {
        self.insert_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail || self.fail_inserts.load(Ordering::SeqCst) {
            return Err("job store unavailable".into());
        }
        let mut jobs = self.jobs.lock().unwrap();
        if jobs.iter().any(|j| j.booking_id == job.booking_id) {
            return Ok(()); // conflict on existing id is a silent no-op
        }
        jobs.push(Job {
            booking_id: job.booking_id,
            pickup: job.pickup,
            dropoff: job.dropoff,
            price: job.price,
            status: JobStatus::Open,
            accepted_driver_id: None,
            created_at: Utc::now(),
        });
        Ok(())
    }

    async fn list_open(&self) -> Result<Vec<Job>, BoxError> {
        let jobs = self.jobs.lock().unwrap();
        Ok(jobs.iter().filter(|j| j.status == JobStatus::Open).cloned().collect())
    }

    async fn try_accept(&self, booking_id: Uuid, driver_id: &str) -> Result<bool, BoxError> {
        self.try_accept_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err("job store unavailable".into());
        }
        let mut jobs = self.jobs.lock().unwrap();
        for job in jobs.iter_mut() {
            if job.booking_id == booking_id && job.status == JobStatus::Open {
                job.status = JobStatus::Taken;
                job.accepted_driver_id = Some(driver_id.to_string());
                return Ok(true);
            }
        }
        Ok(false)
    }
}

#[derive(Default)]
pub(crate) struct FakeAcceptedProducer {
    events: Mutex<Vec<BookingAccepted>>,
    fail: bool,
}

impl FakeAcceptedProducer {
    pub(crate) fn failing() -> Self {
        Self { fail: true, ..Self::default() }
    }

    pub(crate) fn published(&self) -> Vec<BookingAccepted> {
        self.events.lock().unwrap().clone()
    }
}

#[async_trait]
impl AcceptedEventProducer for FakeAcceptedProducer {
    async fn publish_booking_accepted(&self, evt: &BookingAccepted) -> Result<(), BoxError> {
        if self.fail {
            return Err("broker unreachable".into());
        }
        self.events.lock().unwrap().push(evt.clone());
        Ok(())
    }
}
