//! Facility (clinic) table.
//!
//! The table is static: the built-in one is compiled in from `facilities.json`, another one can
//! be loaded from a file with the same layout.  Order in the file is the scan order, which
//! decides ties in `nearest()`.
//!

use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use eyre::{eyre, Result};
use serde::{Deserialize, Serialize};
use tabled::builder::Builder;
use tabled::settings::Style;
use tracing::{debug, trace};

use conecta_common::GeoLocation;

/// Current facilities file version
const FACILITIES_FILE_VER: usize = 1;

/// A clinic with a fixed position.
///
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct Facility {
    pub id: String,
    pub name: String,
    pub address: String,
    pub postal_code: String,
    pub lat: f64,
    pub lng: f64,
}

impl Facility {
    /// Position of the facility
    ///
    #[inline]
    pub fn location(&self) -> GeoLocation {
        GeoLocation::new(self.lat, self.lng)
    }
}

/// On-disk structure for the facilities file
///
#[derive(Debug, Deserialize)]
struct FacilitiesFile {
    /// Version number for safety
    version: usize,
    /// List of facilities, in scan order
    facilities: Vec<Facility>,
}

/// Check a loaded table: unique ids, coordinates in range and not the `(0, 0)` placeholder.
///
fn check_facilities(list: &[Facility]) -> Result<()> {
    let mut seen = BTreeSet::new();
    for f in list {
        if !seen.insert(f.id.as_str()) {
            return Err(eyre!("duplicate facility id {}", f.id));
        }
        let loc = f.location();
        if !loc.is_valid() || (loc.lat == 0. && loc.lng == 0.) {
            return Err(eyre!("bad coordinates for {} ({}): {}", f.id, f.name, loc));
        }
    }
    Ok(())
}

/// Parse a facilities file.
///
#[tracing::instrument(skip(data))]
pub fn parse_facilities(data: &str) -> Result<Vec<Facility>> {
    let file: FacilitiesFile = serde_json::from_str(data)?;
    if file.version != FACILITIES_FILE_VER {
        return Err(eyre!(
            "Bad facilities file version {}, expected {FACILITIES_FILE_VER}",
            file.version
        ));
    }
    check_facilities(&file.facilities)?;
    debug!("{} facilities", file.facilities.len());
    Ok(file.facilities)
}

/// Load all facilities, from `fname` or the built-in table.
///
#[tracing::instrument]
pub fn load_facilities(fname: Option<&Path>) -> Result<Vec<Facility>> {
    trace!("enter");

    let data = match fname {
        Some(fname) => fs::read_to_string(fname)?,
        None => include_str!("facilities.json").to_owned(),
    };
    parse_facilities(&data)
}

/// List loaded facilities
///
#[tracing::instrument(skip(data))]
pub fn list_facilities(data: &[Facility]) -> Result<String> {
    let header = vec!["Id", "Name", "Address", "CEP", "Lat/Lng"];

    let mut builder = Builder::default();
    builder.push_record(header);

    data.iter().for_each(|f| {
        let point = f.location().to_string();
        builder.push_record(vec![
            f.id.as_str(),
            f.name.as_str(),
            f.address.as_str(),
            f.postal_code.as_str(),
            point.as_str(),
        ]);
    });

    let table = builder.build().with(Style::modern()).to_string();
    Ok(format!("List all facilities ({}):\n{table}", data.len()))
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn test_builtin_facilities() -> Result<()> {
        let list = load_facilities(None)?;
        assert_eq!(30, list.len());

        let first = &list[0];
        assert_eq!("u1", first.id);
        assert_eq!("USAFA Aloha", first.name);
        assert_eq!(GeoLocation::new(-24.0195538, -46.5147097), first.location());
        assert_eq!("u30", list[29].id);
        Ok(())
    }

    #[test]
    fn test_load_from_file() -> Result<()> {
        let mut file = tempfile::NamedTempFile::new()?;
        write!(
            file,
            r#"{{"version": 1, "facilities": [
                {{"id": "a", "name": "A", "address": "", "postal_code": "11700-000", "lat": 1.0, "lng": 1.0}}
            ]}}"#
        )?;
        let list = load_facilities(Some(file.path()))?;
        assert_eq!(1, list.len());
        assert_eq!("A", list[0].name);
        Ok(())
    }

    #[test]
    fn test_bad_version() {
        let r = parse_facilities(r#"{"version": 2, "facilities": []}"#);
        assert!(r.is_err());
    }

    #[test]
    fn test_empty_table_is_fine() -> Result<()> {
        let list = parse_facilities(r#"{"version": 1, "facilities": []}"#)?;
        assert!(list.is_empty());
        Ok(())
    }

    #[test]
    fn test_duplicate_id() {
        let r = parse_facilities(
            r#"{"version": 1, "facilities": [
                {"id": "a", "name": "A", "address": "", "postal_code": "", "lat": 1.0, "lng": 1.0},
                {"id": "a", "name": "B", "address": "", "postal_code": "", "lat": 2.0, "lng": 2.0}
            ]}"#,
        );
        assert!(r.is_err());
    }

    #[test]
    fn test_missing_coordinates() {
        let r = parse_facilities(
            r#"{"version": 1, "facilities": [
                {"id": "a", "name": "A", "address": "", "postal_code": "", "lat": 0.0, "lng": 0.0}
            ]}"#,
        );
        assert!(r.is_err());

        let r = parse_facilities(
            r#"{"version": 1, "facilities": [
                {"id": "a", "name": "A", "address": "", "postal_code": "", "lat": -24.0, "lng": 200.0}
            ]}"#,
        );
        assert!(r.is_err());
    }

    #[test]
    fn test_list_facilities() -> Result<()> {
        let list = load_facilities(None)?;
        let s = list_facilities(&list)?;
        assert!(s.starts_with("List all facilities (30):"));
        assert!(s.contains("USAFA Vila Sônia"));
        assert!(s.contains("11717-005"));
        Ok(())
    }
}
