use clap::Parser;
use dotenv::dotenv;
use emi_chat::cli::Args;
use std::error::Error;
use std::fs::OpenOptions;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error + Send + Sync>> {
    dotenv().ok();
    let args = Args::parse();

    let default_filter = if args.debug { "debug" } else { "info" };
    let mut logger = env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(default_filter)
    );
    // The interactive view owns the terminal, so logs go to a file.
    if args.pregunta.is_none() {
        let file = OpenOptions::new().create(true).append(true).open(&args.log_file)?;
        logger.target(env_logger::Target::Pipe(Box::new(file)));
    }
    logger.init();

    emi_chat::run(args).await
}
