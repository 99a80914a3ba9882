use anyhow::{Result, bail};
use wiretrace_engine::Dispatcher;
use wiretrace_types::{NormalizeOutcome, ParsedView, Protocol};

use super::view::print_outcome;
use crate::config::Config;
use crate::store::ExchangeStore;
use crate::types::OutputFormat;

pub fn handle(config: &Config, tag: &str, id: &str, format: OutputFormat) -> Result<()> {
    let dispatcher = Dispatcher::with_limits(config.preview);

    let protocol = match tag.parse::<Protocol>() {
        Ok(protocol) => protocol,
        Err(err) => {
            let outcome = NormalizeOutcome::from(Err::<ParsedView, _>(err));
            return print_outcome(&outcome, format);
        }
    };

    let Some(raw) = ExchangeStore::new(config).find(protocol, id)? else {
        bail!("No {} exchange with id '{}'", protocol, id);
    };

    print_outcome(&dispatcher.outcome(tag, &raw), format)
}
