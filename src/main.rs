use log::{debug, error, info};

use mosaicart::{FormUpdate, MosaicConfig, MosaicSession, ToggleOutcome};

/// Parse `key=value` arguments into form edits
fn parse_args(
  args: impl Iterator<Item = String>
) -> Result<Vec<FormUpdate>, mosaicart::Error>
{   args.map(|arg| FormUpdate::parse_pair(&arg)).collect()
}

async fn run() -> Result<(), mosaicart::Error>
{   let updates = parse_args(std::env::args().skip(1))?;
    let config = MosaicConfig::from_env();
    info!("Using mosaic endpoint {}", config.endpoint);

    let session = MosaicSession::new(config)?;

    for update in updates
    {   let mut rx = session.update_form(update).await?;
        if let Some(reply) = rx.recv().await
        {   reply?;
        }
    }

    let mut rx = session.toggle_or_reset().await?;
    match rx.recv().await
    {   Some(Ok(ToggleOutcome::Loaded(mosaic))) => {
          println!("Mosaic URL: {}", mosaic.mosaic_url);
          println!("Album: {}", mosaic.album_name);
          if let Some(artist) = &mosaic.artist_name
          {   println!("Artist: {}", artist);
          }
        }
      , Some(Ok(ToggleOutcome::Reset)) => {
          debug!("Session reset");
        }
      , Some(Err(e)) => {
          // Already logged by the session; the form stays as entered.
          debug!("Submission failed: {}", e);
        }
      , None => {
          error!("Session closed before replying");
        }
    }

    session.shutdown().await
}

#[tokio::main]
async fn main()
{   dotenv::dotenv().ok();
    env_logger::Builder::from_env(
      env_logger::Env::default().default_filter_or("info")
    ).init();

    if let Err(e) = run().await
    {   error!("{}", e);
        std::process::exit(1);
    }
}
