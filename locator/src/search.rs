//! Nearest-facility search.
//!
//! Plain linear scan, the table is small.  The minimum is tracked with a strict `<` so the
//! first facility in table order wins a tie.
//!

use serde::Serialize;
use tracing::trace;

use conecta_common::GeoLocation;

use crate::Facility;

/// Nearest facility and its distance in km
///
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Nearest {
    pub facility: Facility,
    pub distance: f64,
}

/// Find the facility closest to `from`, `None` if there is nothing to pick from.
///
#[tracing::instrument(skip(facilities), fields(n = facilities.len()))]
pub fn nearest(from: &GeoLocation, facilities: &[Facility]) -> Option<Nearest> {
    let mut best: Option<(&Facility, f64)> = None;

    for f in facilities {
        let d = from.distance_to(&f.location());
        if d.is_nan() {
            trace!("skipping {}", f.id);
            continue;
        }
        match best {
            Some((_, min)) if d >= min => (),
            _ => best = Some((f, d)),
        }
    }

    best.map(|(f, distance)| {
        trace!("nearest = {} at {distance:.3} km", f.id);
        Nearest {
            facility: f.clone(),
            distance,
        }
    })
}
