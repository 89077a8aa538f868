//! `find` and `saved`: the commands talking to the outside world.
//!

use std::sync::Arc;

use eyre::{eyre, Result};
use tabled::builder::Builder;
use tabled::settings::Style;
use tracing::{info, trace, warn};

use conecta_access::{ApiClient, GoogleGeocoder, PreferenceStore, RestPreferenceStore, SavedPreference, Session};
use conecta_common::{PostalCode, Status};
use conecta_locator::{load_facilities, Locator, LocatorResult, LocatorState, Outcome};

use crate::{Config, FindOpts};

/// Session from the configuration, anonymous if there is none
///
fn session_from(cfg: &Config) -> Arc<Session> {
    Arc::new(match &cfg.session {
        Some(user) => Session::with_user(user.clone()),
        None => Session::new(),
    })
}

/// Preference store on the portal API, if one is configured
///
fn store_from(cfg: &Config, session: Arc<Session>) -> Result<Option<RestPreferenceStore>> {
    match &cfg.api {
        Some(site) => Ok(Some(RestPreferenceStore::new(ApiClient::new(site, session)?))),
        None => Ok(None),
    }
}

/// Resolve the CEP and print the nearest facility.
///
#[tracing::instrument(skip(cfg))]
pub async fn find_nearest(cfg: &Config, fopts: &FindOpts) -> Result<String> {
    trace!("enter");

    let cep = PostalCode::parse(&fopts.cep)?;

    let session = session_from(cfg);
    let geocoder = GoogleGeocoder::new(&cfg.geocoding.site())?.with_region(cfg.geocoding.region());
    let facilities = load_facilities(cfg.facilities.as_deref())?;

    let mut locator = Locator::new(Arc::new(geocoder), facilities, session.clone());

    if fopts.no_save {
        info!("not saving the result");
    } else if let Some(store) = store_from(cfg, session)? {
        locator = locator.with_store(Arc::new(store));
        if let Err(e) = locator.load_saved().await {
            // Without the existing record id a save would create a duplicate
            warn!("can not read saved preference, result will not be saved: {e}");
            eprintln!("Warning: can not read saved preference, result will not be saved.");
            locator = locator.without_store();
        }
    }

    let (state, persistence) = match locator.submit(cep.as_str()).await {
        Outcome::Applied { state, persistence } => (state, persistence),
        Outcome::Stale => return Err(eyre!("search superseded")),
    };

    if let Some(e) = persistence {
        eprintln!("Warning: {e}");
    }

    match state {
        LocatorState::Found(res) => Ok(format_result(&res)),
        LocatorState::NotFound => Ok(String::from("No facility found.")),
        LocatorState::Error(e) => Err(e.into()),
        other => Err(eyre!("unexpected locator state {}", other.as_ref())),
    }
}

/// Display a locator result.
///
pub fn format_result(res: &LocatorResult) -> String {
    let mut builder = Builder::default();
    builder.push_record(["CEP", res.postal_code.masked().as_str()]);
    builder.push_record(["Location", res.location.to_string().as_str()]);
    builder.push_record(["Nearest", res.facility.name.as_str()]);
    builder.push_record(["Address", res.facility.address.as_str()]);
    builder.push_record(["Distance", format!("{:.2} km", res.distance).as_str()]);

    builder.build().with(Style::rounded()).to_string()
}

/// Display a saved record.
///
pub fn format_saved(saved: &SavedPreference) -> String {
    let mut builder = Builder::default();
    builder.push_record(["Id", saved.id.to_string().as_str()]);
    builder.push_record(["Facility", saved.facility_name.as_str()]);
    builder.push_record(["CEP", saved.postal_code.as_str()]);

    builder.build().with(Style::rounded()).to_string()
}

/// Fetch and print what the configured user has saved.
///
#[tracing::instrument(skip(cfg))]
pub async fn show_saved(cfg: &Config) -> Result<String> {
    let session = session_from(cfg);
    let user = session
        .public_id()
        .ok_or_else(|| Status::MissingConfigParameter("session".to_string()))?;
    let store = store_from(cfg, session)?.ok_or_else(|| Status::MissingConfigParameter("api".to_string()))?;

    match store.fetch(&user).await? {
        Some(saved) => Ok(format_saved(&saved)),
        None => Ok(String::from("Nothing saved yet.")),
    }
}
