//! `captionsmith` command line front end

use std::fmt::Write as _;
use std::path::PathBuf;
use std::process::ExitCode;

use captionsmith::telemetry::{self, SubscriberConfig};
use captionsmith::utils::load_upload;
use captionsmith::{
    CaptionRequest, CaptionRequester, CaptionStyle, ConfigError, OpenAiClient, OpenAiConfig,
};
use clap::{Parser, Subcommand};

/// Setup problems and bad input
const EXIT_SETUP: u8 = 2;

const EMPTY_DESCRIPTION_WARNING: &str = "Please type something to describe your photo.";

#[derive(Debug, Parser)]
#[command(
    name = "captionsmith",
    version,
    about = "Generate aesthetic captions from a description or a photo"
)]
struct Cli {
    /// Model to use instead of CAPTIONSMITH_MODEL / the default
    #[arg(long, global = true)]
    model: Option<String>,

    /// trace, debug, info, warn or error
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Caption a photo from a written description
    Text {
        #[arg(short, long, default_value_t)]
        style: CaptionStyle,

        /// Example: sunset at Lake Michigan with coffee in my hand
        description: Vec<String>,
    },
    /// Caption an uploaded photo (jpg / jpeg / png)
    Image {
        #[arg(short, long, default_value_t)]
        style: CaptionStyle,

        /// Declared type of the photo; sniffed from the file when omitted
        #[arg(long)]
        mime_type: Option<String>,

        path: PathBuf,
    },
    /// List the available caption styles
    Styles,
}

/// Input collected from the command line, not yet validated.
enum Pending {
    Description(String),
    Photo {
        path: PathBuf,
        mime_type: Option<String>,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    if let Some(warning) = dotenv_warning(dotenvy::dotenv()) {
        eprintln!("{warning}");
    }
    let cli = Cli::parse();

    if let Err(e) = logging_config(cli.log_level.as_deref()).and_then(telemetry::init_subscriber)
    {
        eprintln!("warning: {e}");
    }

    let (style, pending) = match cli.command {
        Command::Styles => {
            for style in CaptionStyle::ALL {
                println!("{style}");
            }
            return ExitCode::SUCCESS;
        }
        Command::Text { style, description } => {
            (style, Pending::Description(description.join(" ")))
        }
        Command::Image {
            style,
            mime_type,
            path,
        } => (style, Pending::Photo { path, mime_type }),
    };

    let requester = match build_requester(cli.model.as_deref()) {
        Ok(requester) => requester,
        Err(e) => {
            eprintln!("Setup error: {e}");
            return ExitCode::from(EXIT_SETUP);
        }
    };

    let (request, busy) = match pending {
        Pending::Description(description) => match text_request(&description, style) {
            Some(request) => (request, "Thinking of cute captions..."),
            None => {
                eprintln!("{EMPTY_DESCRIPTION_WARNING}");
                return ExitCode::from(EXIT_SETUP);
            }
        },
        Pending::Photo { path, mime_type } => match load_upload(&path, mime_type.as_deref()).await
        {
            Ok(image) => (
                CaptionRequest::image(image, style),
                "Looking at your photo and writing captions...",
            ),
            Err(e) => {
                eprintln!("{e}");
                return ExitCode::from(EXIT_SETUP);
            }
        },
    };

    eprintln!("{busy}");
    match requester.generate(&request).await {
        Ok(captions) => {
            print!("{}", render_captions(&captions));
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}

/// A missing `.env` is fine; one that can't be read or parsed is worth a warning.
fn dotenv_warning<T>(result: Result<T, dotenvy::Error>) -> Option<String> {
    match result {
        Ok(_) => None,
        Err(e) if e.not_found() => None,
        Err(e) => Some(format!("warning: could not load .env file: {e}")),
    }
}

fn logging_config(level: Option<&str>) -> Result<SubscriberConfig, ConfigError> {
    let mut config = SubscriberConfig::from_env()?;
    if let Some(level) = level {
        config.log_level = SubscriberConfig::builder()
            .log_level_str(level)?
            .build()
            .log_level;
    }
    Ok(config)
}

fn build_requester(model: Option<&str>) -> Result<CaptionRequester<OpenAiClient>, ConfigError> {
    let mut config = OpenAiConfig::from_env()?;
    if let Some(model) = model {
        config = config.with_model(model);
    }
    CaptionRequester::from_config(config)
}

/// `None` when the description is blank.
fn text_request(description: &str, style: CaptionStyle) -> Option<CaptionRequest> {
    let description = description.trim();
    (!description.is_empty()).then(|| CaptionRequest::text(description, style))
}

fn render_captions(captions: &[String]) -> String {
    if captions.is_empty() {
        return "No captions came back this time. Try again in a moment.\n".to_string();
    }
    let mut out = String::from("✨ Captions\n");
    for caption in captions {
        let _ = writeln!(out, "• {caption}");
    }
    out
}
