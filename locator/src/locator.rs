//! The locator itself: postal code in, nearest facility out.
//!
//! A submission goes through normalisation, one geocoder call and a linear search.  Every
//! submission gets a ticket from a counter and only the latest one may change the state; the
//! earlier ones come back as `Outcome::Stale`.
//!
//! When the result is still current and a user is logged in, it is saved through the
//! `PreferenceStore` (create the first time, update afterwards).  Writes go one at a time and
//! a write whose ticket has been superseded before it starts is dropped, so a user never gets
//! two records and the last write is the latest result.  A failed save is reported beside the
//! result.
//!

use std::fmt::{Debug, Formatter};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use tokio::sync::Mutex as WriteLock;
use tracing::{debug, info, trace, warn};

use conecta_access::{Geocoder, PreferencePayload, PreferenceStore, SavedPreference, Session};
use conecta_common::PostalCode;

use crate::{nearest, Facility, LocatorError, LocatorResult, LocatorState};

/// What happened to a submission
///
#[derive(Clone, Debug, PartialEq)]
pub enum Outcome {
    /// This submission set the state
    Applied {
        state: LocatorState,
        /// Set when the result could not be saved
        persistence: Option<LocatorError>,
    },
    /// A newer submission superseded this one, nothing changed
    Stale,
}

pub struct Locator {
    /// Postal code resolution
    geocoder: Arc<dyn Geocoder>,
    /// Static table, scan order
    facilities: Vec<Facility>,
    /// Where results are saved, if anywhere
    store: Option<Arc<dyn PreferenceStore>>,
    /// Current user
    session: Arc<Session>,
    /// Last ticket handed out
    seq: AtomicU64,
    state: Mutex<LocatorState>,
    /// Last known saved record
    saved: Mutex<Option<SavedPreference>>,
    /// Held across a create/update
    writing: WriteLock<()>,
}

impl Debug for Locator {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Locator")
            .field("geocoder", &self.geocoder.name())
            .field("facilities", &self.facilities.len())
            .field("store", &self.store.is_some())
            .field("seq", &self.seq.load(Ordering::Relaxed))
            .finish()
    }
}

impl Locator {
    pub fn new(geocoder: Arc<dyn Geocoder>, facilities: Vec<Facility>, session: Arc<Session>) -> Self {
        Locator {
            geocoder,
            facilities,
            store: None,
            session,
            seq: AtomicU64::new(0),
            state: Mutex::new(LocatorState::Idle),
            saved: Mutex::new(None),
            writing: WriteLock::new(()),
        }
    }

    /// Save results there
    ///
    pub fn with_store(mut self, store: Arc<dyn PreferenceStore>) -> Self {
        self.store = Some(store);
        self
    }

    /// Stop saving results
    ///
    pub fn without_store(mut self) -> Self {
        self.store = None;
        self
    }

    pub fn facilities(&self) -> &[Facility] {
        &self.facilities
    }

    /// Copy of the current state
    ///
    pub fn state(&self) -> LocatorState {
        self.state.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    /// Last known saved record
    ///
    pub fn saved(&self) -> Option<SavedPreference> {
        self.saved.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    /// Fetch the saved record of the current user, once, typically at startup.
    ///
    #[tracing::instrument(skip(self))]
    pub async fn load_saved(&self) -> Result<Option<SavedPreference>, LocatorError> {
        let (Some(store), Some(user)) = (&self.store, self.session.public_id()) else {
            debug!("no store or anonymous user");
            return Ok(None);
        };

        let saved = store.fetch(&user).await?;
        trace!("saved = {saved:?}");
        *self.saved.lock().unwrap_or_else(PoisonError::into_inner) = saved.clone();
        Ok(saved)
    }

    /// Run a search for `input` and drive the state machine.
    ///
    #[tracing::instrument(skip(self))]
    pub async fn submit(&self, input: &str) -> Outcome {
        let seq = self.seq.fetch_add(1, Ordering::SeqCst) + 1;
        self.state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .submit(seq);

        let outcome = self.search(input).await;

        let state = {
            let mut current = self.state.lock().unwrap_or_else(PoisonError::into_inner);
            if !current.complete(seq, outcome) {
                return Outcome::Stale;
            }
            current.clone()
        };

        let persistence = match state.result() {
            Some(res) => self.persist(seq, res).await.err(),
            None => None,
        };
        if let Some(e) = &persistence {
            warn!("{e}");
        }

        Outcome::Applied { state, persistence }
    }

    /// Normalise, resolve, then search.
    ///
    async fn search(&self, input: &str) -> Result<LocatorResult, LocatorError> {
        let postal_code = PostalCode::parse(input)?;

        let location = self.geocoder.resolve(&postal_code).await?;
        debug!("{postal_code} is at {location}");

        let found = nearest(&location, &self.facilities).ok_or(LocatorError::NoResult)?;
        info!(
            "nearest to {} is {} ({:.2} km)",
            postal_code.masked(),
            found.facility.name,
            found.distance
        );

        Ok(LocatorResult {
            postal_code,
            location,
            facility: found.facility,
            distance: found.distance,
        })
    }

    /// Is `seq` still the last ticket handed out?
    ///
    #[inline]
    fn is_current(&self, seq: u64) -> bool {
        self.seq.load(Ordering::SeqCst) == seq
    }

    /// Save `res` for the current user, update if there is already a record.
    ///
    async fn persist(&self, seq: u64, res: &LocatorResult) -> Result<(), LocatorError> {
        let (Some(store), Some(user)) = (&self.store, self.session.public_id()) else {
            trace!("not saving");
            return Ok(());
        };

        let _writing = self.writing.lock().await;
        if !self.is_current(seq) {
            debug!("submission {seq} superseded, not saving");
            return Ok(());
        }

        let data = PreferencePayload {
            facility_name: res.facility.name.clone(),
            postal_code: res.postal_code.to_string(),
        };
        let known = self.saved().map(|s| s.id);

        let saved = match known {
            Some(id) => store.update(id, &data).await?,
            None => store.create(&user, &data).await?,
        };
        // Kept even when superseded meanwhile: the record exists and the newer write, queued
        // behind us, must update it instead of creating another one.
        if !self.is_current(seq) {
            debug!("submission {seq} superseded while saving");
        }
        debug!("saved as {}", saved.id);
        *self.saved.lock().unwrap_or_else(PoisonError::into_inner) = Some(saved);
        Ok(())
    }
}
