use std::io;

use clap::{crate_authors, crate_description, crate_version, CommandFactory, Parser};
use clap_complete::generate;
use eyre::Result;
use tracing::{info, trace};

use conecta_common::init_logging;
use conectactl::{
    check_value, distance, find_nearest, list_things, load_config, show_saved, Opts, SubCommand,
};

/// Binary name, using a different binary name
pub const NAME: &str = env!("CARGO_BIN_NAME");
/// Binary version
pub const VERSION: &str = crate_version!();
/// Authors
pub const AUTHORS: &str = crate_authors!();

#[tokio::main]
async fn main() -> Result<()> {
    let opts = Opts::parse();

    // Initialise logging early
    //
    init_logging(NAME, opts.use_tree, opts.use_file.clone())?;
    trace!("Logging initialised.");

    // Banner
    //
    banner()?;

    handle_subcmd(&opts).await
}

async fn handle_subcmd(opts: &Opts) -> Result<()> {
    let cfn = opts.config.as_deref();

    match &opts.subcmd {
        // Handle `find cep`
        //
        SubCommand::Find(fopts) => {
            trace!("find");

            let cfg = load_config(cfn)?;
            println!("{}", find_nearest(&cfg, fopts).await?);
        }

        // Handle `saved`
        //
        SubCommand::Saved => {
            trace!("saved");

            let cfg = load_config(cfn)?;
            println!("{}", show_saved(&cfg).await?);
        }

        // Standalone `list` command
        //
        SubCommand::List(lopts) => {
            info!("Listing {:?}", lopts.cmd);

            let cfg = load_config(cfn)?;
            println!("{}", list_things(&cfg, lopts.cmd)?);
        }

        SubCommand::Distance(dopts) => println!("{}", distance(dopts)?),

        SubCommand::Check(copts) => println!("{}", check_value(copts)?),

        // Standalone completion generation
        //
        // NOTE: you can generate UNIX shells completion on Windows and vice-versa.  Not worth
        //       trying to limit depending on the OS.
        //
        SubCommand::Completion(copts) => {
            let generator = copts.shell;
            generate(generator, &mut Opts::command(), NAME, &mut io::stdout());
        }

        // Standalone `version` command
        //
        SubCommand::Version => {
            eprintln!("Modules: ");
            eprintln!("\t{}", version());
            eprintln!("\t{}", conecta_common::version());
            eprintln!("\t{}", conecta_access::version());
            eprintln!("\t{}", conecta_locator::version());
        }
    }
    Ok(())
}

/// Return our version number
///
#[inline]
pub fn version() -> String {
    format!("{}/{}", NAME, VERSION)
}

/// Display banner
///
fn banner() -> Result<()> {
    Ok(eprintln!(
        r##"
{}/{} by {}
{}
"##,
        NAME,
        VERSION,
        AUTHORS,
        crate_description!()
    ))
}
