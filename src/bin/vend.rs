use anyhow::{anyhow, Context, Result};
use log::{error, info, warn};
use std::env::args;
use std::fs::File;
use std::io::{self, BufReader};
use vending_machine::{
    csv::{CatalogRow, InputRow},
    types::action::Action,
    Config, VendingMachine,
};

fn run() -> Result<()> {
    let args: Vec<String> = args().collect();
    let session_filepath = args
        .get(1)
        .context(anyhow!("Missing session file as first positional argument."))?;

    let config = match args.get(2) {
        Some(catalog_filepath) => {
            info!("Reading catalog from {:?}", catalog_filepath);
            let catalog_reader = BufReader::new(
                File::open(catalog_filepath)
                    .with_context(|| format!("Opening catalog {:?}", catalog_filepath))?,
            );
            Config::from_catalog_reader(catalog_reader)?
        }
        None => Config::default(),
    };
    let mut machine = VendingMachine::new(config)?;

    info!("Reading session from {:?}", session_filepath);
    let session_reader = BufReader::new(
        File::open(session_filepath)
            .with_context(|| format!("Opening session {:?}", session_filepath))?,
    );
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(session_reader);

    for (index, result) in csv_reader.deserialize().enumerate() {
        let row: InputRow = result?;
        let action: Action = match row.try_into() {
            Ok(action) => action,
            Err(error) => {
                warn!("Action {index} invalid: {error}");
                continue;
            }
        };
        match machine.apply(action) {
            Ok(outcome) => info!("Action {index}: {outcome}"),
            Err(error) => warn!("Action {index} not applied: {error}"),
        }
    }

    let unspent = machine.get_deposit_back();
    if !unspent.is_empty() {
        warn!("Unspent deposit {:?} returned at end of session", unspent);
    }

    let mut csv_writer = csv::Writer::from_writer(io::stdout());
    for product in machine.catalog().iter() {
        csv_writer.serialize(CatalogRow::from(product))?;
    }
    csv_writer.flush()?;
    Ok(())
}

fn main() {
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    match run() {
        Ok(()) => {}
        Err(error) => {
            error!("{}", error);
            std::process::exit(1)
        }
    }
}
