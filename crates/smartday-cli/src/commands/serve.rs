use clap::Args;
use smartday_core::Config;

#[derive(Args)]
pub struct ServeArgs {
    /// Address to listen on (default: server.bind from config)
    #[arg(short, long)]
    bind: Option<String>,
}

pub fn run(args: ServeArgs, config: Config) -> Result<(), Box<dyn std::error::Error>> {
    let bind = args.bind.unwrap_or_else(|| config.server.bind.clone());
    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(crate::server::serve(&bind, &config))
}
