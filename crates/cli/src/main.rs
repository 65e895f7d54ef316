mod convert;

use anyhow::{bail, Result};
use ascii_models::{BannerKind, ErrorShape};
use ascii_render::ScreenMode;
use clap::{Parser, Subcommand};
use convert::{ConvertOptions, DEFAULT_ASPECT, DEFAULT_CHARSET, DEFAULT_WIDTH};
use futures::StreamExt;
use reqwest::Client;
use std::io::Write;
use std::path::PathBuf;
use tracing::{error, info};

#[derive(Parser)]
#[command(name = "ascii-cli")]
#[command(about = "CLI tool for ASCII Streamer")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[arg(long, global = true, default_value = "http://localhost:8000")]
    endpoint: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert an animated GIF into a frame JSON asset
    Convert {
        /// Input GIF
        #[arg(long)]
        input: PathBuf,
        /// Output JSON file
        #[arg(long)]
        output: PathBuf,
        /// Columns per frame
        #[arg(long, default_value_t = DEFAULT_WIDTH)]
        width: u32,
        /// Row scale relative to the source aspect ratio
        #[arg(long, default_value_t = DEFAULT_ASPECT)]
        aspect: f64,
        /// Glyphs from darkest to brightest
        #[arg(long, default_value = DEFAULT_CHARSET)]
        charset: String,
    },
    /// List animations served by the endpoint
    List,
    /// Play an animation in this terminal
    Play {
        /// Animation name
        name: String,
        /// Seconds between frames
        #[arg(long)]
        delay: Option<f64>,
        /// Use the alternate screen buffer
        #[arg(long)]
        alt: bool,
        /// Banner override (big or ticker)
        #[arg(long)]
        banner: Option<BannerKind>,
        /// Stop after this many passes
        #[arg(long)]
        loops: Option<u32>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let client = Client::builder()
        .user_agent(concat!("ascii-cli/", env!("CARGO_PKG_VERSION")))
        .build()?;

    match cli.command {
        Commands::Convert {
            input,
            output,
            width,
            aspect,
            charset,
        } => {
            let opts = ConvertOptions::new(width, aspect, &charset)?;
            let count = convert::convert_file(&input, &output, &opts)?;
            println!("Wrote {} frames to {}", count, output.display());
        }
        Commands::List => {
            for name in list_animations(&client, &cli.endpoint).await? {
                println!("{name}");
            }
        }
        Commands::Play {
            name,
            delay,
            alt,
            banner,
            loops,
        } => {
            let params = PlayParams {
                name,
                delay,
                alt,
                banner,
                loops,
            };
            let mut stdout = std::io::stdout();
            play_animation(&client, &cli.endpoint, &params, &mut stdout).await?;
        }
    }

    Ok(())
}

#[derive(Debug)]
struct PlayParams {
    name: String,
    delay: Option<f64>,
    alt: bool,
    banner: Option<BannerKind>,
    loops: Option<u32>,
}

impl PlayParams {
    fn query(&self) -> Vec<(&'static str, String)> {
        let mut query = vec![("alt", self.alt.to_string())];
        if let Some(delay) = self.delay {
            query.push(("delay", delay.to_string()));
        }
        if let Some(banner) = self.banner {
            query.push(("banner", banner.to_string()));
        }
        if let Some(loops) = self.loops {
            query.push(("loops", loops.to_string()));
        }
        query
    }
}

fn describe_error(status: reqwest::StatusCode, text: &str) -> String {
    match serde_json::from_str::<ErrorShape>(text) {
        Ok(shape) => format!("{} ({}): {}", status, shape.error_type, shape.detail),
        Err(_) => format!("{}: {}", status, text),
    }
}

async fn error_detail(response: reqwest::Response) -> String {
    let status = response.status();
    let text = response.text().await.unwrap_or_default();
    describe_error(status, &text)
}

async fn list_animations(client: &Client, endpoint: &str) -> Result<Vec<String>> {
    info!("Listing animations");

    let response = client.get(format!("{endpoint}/a")).send().await?;

    if !response.status().is_success() {
        let detail = error_detail(response).await;
        error!("Failed to list animations: {}", detail);
        bail!(detail);
    }

    Ok(response.json().await?)
}

/// Copies the stream into `out` until it ends or ctrl-c arrives.
async fn play_animation<W: Write>(
    client: &Client,
    endpoint: &str,
    params: &PlayParams,
    out: &mut W,
) -> Result<()> {
    info!("Playing animation: {}", params.name);

    let response = client
        .get(format!("{endpoint}/a/{}", params.name))
        .query(&params.query())
        .send()
        .await?;

    if !response.status().is_success() {
        let detail = error_detail(response).await;
        error!("Failed to play {}: {}", params.name, detail);
        bail!(detail);
    }

    let mode = ScreenMode::from_alt(params.alt);
    let mut body = response.bytes_stream();

    let copy = async {
        while let Some(chunk) = body.next().await {
            let chunk = chunk?;
            out.write_all(&chunk)?;
            out.flush()?;
        }
        Ok::<_, anyhow::Error>(())
    };

    let interrupted = tokio::select! {
        result = copy => {
            result?;
            false
        }
        Ok(()) = tokio::signal::ctrl_c() => true,
    };

    // Interrupted streams never carry the end sequence.
    if interrupted {
        out.write_all(mode.end_sequence().as_bytes())?;
        out.flush()?;
    }

    Ok(())
}
