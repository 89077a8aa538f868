use eyre::Result;

use conecta_locator::{list_facilities, load_facilities};

use crate::{Config, ListSubCommand};

/// Handle `list`
///
#[tracing::instrument(skip(cfg))]
pub fn list_things(cfg: &Config, cmd: ListSubCommand) -> Result<String> {
    match cmd {
        ListSubCommand::Facilities => {
            let list = load_facilities(cfg.facilities.as_deref())?;
            list_facilities(&list)
        }
    }
}
