use dashboard::{Dashboard, Settings, input_from_args};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let settings = Settings::from_env();
    let dashboard = Dashboard::from_settings(&settings);
    let mut stdin = BufReader::new(tokio::io::stdin());

    let input = match input_from_args(std::env::args().skip(1)) {
        Some(input) => input,
        None => {
            println!("Enter a YouTube channel ID, URL, or @handle to begin analysis.");
            let mut line = String::new();
            stdin.read_line(&mut line).await?;
            line.trim().to_string()
        }
    };
    if input.is_empty() {
        anyhow::bail!("no channel input given");
    }

    let analysis = dashboard.analyze(&input).await?;
    println!("{}", dashboard.report(&analysis).await);

    dashboard
        .run_interactive(&analysis, stdin, tokio::io::stdout())
        .await?;
    Ok(())
}
