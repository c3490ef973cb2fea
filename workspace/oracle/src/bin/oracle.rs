use std::io::Result;

use clap::Parser;

use oracle::{Arguments, Config};

fn main() -> Result<()> {
  let environment = dotenv::dotenv();
  let arguments = Arguments::parse();

  let mut logger = env_logger::Builder::from_default_env();
  if let Some(filter) = arguments.log_level.as_ref() {
    logger.parse_filters(filter);
  }
  logger.init();

  if let Err(error) = environment {
    log::debug!("no environment loaded from '.env' - {}", error);
  }

  let config = Config::from_arguments(arguments)?;
  log::info!("configuration ready - {:?}", config);

  async_std::task::block_on(async {
    let predictions = oracle::workflow::connect(&config)?;
    oracle::workflow::settle(oracle::workflow::run(&predictions, &config).await)
  })
}
