//! `check` and `distance`, the offline helpers.
//!

use eyre::{eyre, Result};
use tabled::builder::Builder;
use tabled::settings::Style;

use conecta_common::{
    validate_cep, validate_cpf, validate_email, validate_phone, GeoLocation, PasswordCheck,
};

use crate::{CheckKind, CheckOpts, DistOpts};

/// Run a validator, an invalid value is an error.
///
#[tracing::instrument(skip_all, fields(kind = ?copts.kind))]
pub fn check_value(copts: &CheckOpts) -> Result<String> {
    let value = copts.value.as_str();

    let ok = match copts.kind {
        CheckKind::Cpf => validate_cpf(value),
        CheckKind::Cep => validate_cep(value),
        CheckKind::Phone => validate_phone(value),
        CheckKind::Email => validate_email(value),
        CheckKind::Password => {
            let report = PasswordCheck::new(value);
            let table = password_report(&report);
            if !report.is_valid() {
                return Err(eyre!("weak password\n{table}"));
            }
            return Ok(table);
        }
    };

    if ok {
        Ok(format!("{value}: valid"))
    } else {
        Err(eyre!("{value}: invalid {:?}", copts.kind))
    }
}

fn password_report(report: &PasswordCheck) -> String {
    let mark = |b: bool| if b { "ok" } else { "missing" };

    let mut builder = Builder::default();
    builder.push_record(["Rule", "Status"]);
    builder.push_record(["at least 8 characters", mark(report.min_length)]);
    builder.push_record(["one uppercase letter", mark(report.uppercase)]);
    builder.push_record(["one digit", mark(report.number)]);
    builder.push_record(["one special character", mark(report.special_char)]);

    builder.build().with(Style::modern()).to_string()
}

/// Haversine distance between the two points.
///
#[tracing::instrument]
pub fn distance(dopts: &DistOpts) -> Result<String> {
    let from = GeoLocation::new(dopts.lat1, dopts.lng1);
    let to = GeoLocation::new(dopts.lat2, dopts.lng2);
    if !from.is_valid() || !to.is_valid() {
        return Err(eyre!("coordinates out of range"));
    }
    Ok(format!("{:.3} km", from.distance_to(&to)))
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(CheckKind::Cpf, "529.982.247-25", true)]
    #[case(CheckKind::Cpf, "111.111.111-11", false)]
    #[case(CheckKind::Cep, "11717-005", true)]
    #[case(CheckKind::Cep, "1171-005", false)]
    #[case(CheckKind::Phone, "(13) 99765-4321", true)]
    #[case(CheckKind::Email, "maria@example.com", true)]
    #[case(CheckKind::Email, "maria@example", false)]
    #[case(CheckKind::Password, "Secr3t!pass", true)]
    #[case(CheckKind::Password, "secret", false)]
    fn test_check_value(#[case] kind: CheckKind, #[case] value: &str, #[case] ok: bool) {
        let copts = CheckOpts {
            kind,
            value: value.to_string(),
        };
        assert_eq!(ok, check_value(&copts).is_ok());
    }

    #[test]
    fn test_distance() {
        let dopts = DistOpts {
            lat1: 0.,
            lng1: 0.,
            lat2: 0.,
            lng2: 1.,
        };
        assert_eq!("111.195 km", distance(&dopts).unwrap());

        let dopts = DistOpts {
            lat1: 91.,
            lng1: 0.,
            lat2: 0.,
            lng2: 0.,
        };
        assert!(distance(&dopts).is_err());
    }
}
