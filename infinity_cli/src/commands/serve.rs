use anyhow::Result;
use clap::Args;
use infinity_mock::config::parse_bind;
use infinity_mock::MockConfig;

#[derive(Args)]
pub struct ServeArgs {
    /// Address to listen on (overrides INFINITY_MOCK_BIND)
    #[arg(long)]
    pub bind: Option<String>,

    /// Seed for repeatable data (overrides INFINITY_MOCK_SEED)
    #[arg(long)]
    pub seed: Option<u64>,
}

pub async fn run(args: &ServeArgs) -> Result<()> {
    let mut config = MockConfig::from_env()?;

    if let Some(ref bind) = args.bind {
        config = config.with_bind(parse_bind(bind)?);
    }
    if args.seed.is_some() {
        config = config.with_seed(args.seed);
    }

    eprintln!(
        "Serving mock API on http://{} ({})",
        config.bind,
        match config.seed {
            Some(seed) => format!("seed {}", seed),
            None => "unseeded".to_string(),
        }
    );

    infinity_mock::serve(config).await?;
    Ok(())
}
