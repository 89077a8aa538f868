//! Module describing all possible commands and sub-commands to the `conectactl` main driver
//!
//! The main command is `find`: it takes a CEP, asks the geocoder where it is and prints the
//! nearest USAFA along with the distance.  If a user session is configured, the result is
//! saved on the portal unless `--no-save` is given.
//!
//! The other commands do not need the network:
//!
//! - `list facilities` shows the clinic table
//! - `distance` is the raw haversine between two points
//! - `check` runs one of the form validators on a value
//!
//! `completion` is here just to configure the various shells completion system.
//!

use std::path::PathBuf;

use clap::{
    crate_authors, crate_description, crate_name, crate_version, Parser, ValueEnum,
};
use clap_complete::shells::Shell;

/// CLI options
#[derive(Parser)]
#[command(disable_version_flag = true)]
#[clap(name = crate_name!(), about = crate_description!())]
#[clap(version = crate_version!(), author = crate_authors!())]
pub struct Opts {
    /// configuration file.
    #[clap(short = 'c', long)]
    pub config: Option<PathBuf>,
    /// Use hierarchical output for logs.
    #[clap(long)]
    pub use_tree: bool,
    /// Also log into hourly files in this directory.
    #[clap(long)]
    pub use_file: Option<PathBuf>,
    /// Sub-commands (see below).
    #[clap(subcommand)]
    pub subcmd: SubCommand,
}

// ------

/// All sub-commands:
///
/// `check (cpf|cep|phone|email|password) VALUE`
/// `completion SHELL`
/// `distance LAT1 LNG1 LAT2 LNG2`
/// `find [--no-save] CEP`
/// `list facilities`
/// `saved`
/// `version`
///
#[derive(Debug, Parser)]
pub enum SubCommand {
    /// Run one of the form validators
    Check(CheckOpts),
    /// Generate Completion stuff
    Completion(ComplOpts),
    /// Distance in km between two points
    Distance(DistOpts),
    /// Find the nearest facility from a CEP
    Find(FindOpts),
    /// List things
    List(ListOpts),
    /// Show the saved result of the configured user
    Saved,
    /// List all package versions
    Version,
}

// ------

/// Options for `find`
///
#[derive(Debug, Parser)]
pub struct FindOpts {
    /// Do not save the result on the portal
    #[clap(long)]
    pub no_save: bool,
    /// Postal code, with or without the mask
    pub cep: String,
}

// ------

/// Two points, `lat lng` each, in degrees
///
#[derive(Debug, Parser)]
#[command(allow_negative_numbers = true)]
pub struct DistOpts {
    pub lat1: f64,
    pub lng1: f64,
    pub lat2: f64,
    pub lng2: f64,
}

// ------

/// Options for `check`
///
#[derive(Debug, Parser)]
pub struct CheckOpts {
    #[clap(value_parser)]
    pub kind: CheckKind,
    pub value: String,
}

/// What `check` can validate
///
#[derive(Clone, Copy, Debug, Ord, PartialOrd, Eq, PartialEq, ValueEnum)]
pub enum CheckKind {
    /// CPF, checksum included
    Cpf,
    /// 8-digit CEP
    Cep,
    /// Phone number with area code
    Phone,
    /// E-mail address
    Email,
    /// Password strength
    Password,
}

// ------

/// Options to generate completion files at runtime
///
#[derive(Debug, Parser)]
pub struct ComplOpts {
    #[clap(value_parser)]
    pub shell: Shell,
}

// ------

/// All `list` sub-commands:
///
/// `list facilities`
///
#[derive(Debug, Parser)]
pub struct ListOpts {
    #[clap(value_parser)]
    pub cmd: ListSubCommand,
}

/// These are the sub-commands for `list`
///
#[derive(Clone, Copy, Debug, Ord, PartialOrd, Eq, PartialEq, ValueEnum)]
pub enum ListSubCommand {
    /// List all facilities
    Facilities,
}
