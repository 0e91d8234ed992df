mod cli;

use std::{error::Error, path::PathBuf};

use billdb::{
    api::HttpClient,
    config::{self, Config},
    detect, qrcode, Format, Parser as BillParser,
};
use clap::Parser;
use log::debug;

#[derive(Parser)]
#[command(name = env!("CARGO_BIN_NAME"))]
#[command(bin_name = env!("CARGO_BIN_NAME"))]
enum Cli {
    #[command(about = "Prints tool version")]
    #[command(long_about = None)]
    Version,

    #[command(about = "Prints detected format of the input")]
    #[command(long_about = None)]
    Detect(DetectArgs),

    #[command(about = "Fetches a bill by verification url or qr string")]
    #[command(long_about = None)]
    Parse(ParseArgs),

    #[command(about = "Fetches a bill by qr code on the image")]
    #[command(long_about = None)]
    Qr(QrArgs),
}

#[derive(clap::Args)]
struct DetectArgs {
    #[arg()]
    input: String,
}

#[derive(clap::Args)]
struct ParseArgs {
    #[arg(short='c', long, default_value=Some("./config.toml"))]
    config_path: PathBuf,

    #[arg()]
    input: String,
}

#[derive(clap::Args)]
struct QrArgs {
    #[arg(short='c', long, default_value=Some("./config.toml"))]
    config_path: PathBuf,

    #[arg()]
    image: PathBuf,
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    match Cli::parse() {
        Cli::Version => {
            println!(env!("CARGO_PKG_VERSION"));
        }
        Cli::Detect(args) => {
            println!("{}", detect(&args.input)?);
        }
        Cli::Parse(args) => {
            // Формат проверяем до загрузки конфига, чтобы не создавать его зря.
            let format = detect(&args.input)?;

            debug!("Подгружаем конфиг из {:?}", args.config_path);
            let cfg = config::load(args.config_path)?;

            fetch(cfg, format, &args.input)?;
        }
        Cli::Qr(args) => {
            debug!("Распознаём QR код на {:?}", args.image);
            let input = qrcode::decode_image(&args.image)?;
            let format = detect(&input)?;

            debug!("Подгружаем конфиг из {:?}", args.config_path);
            let cfg = config::load(args.config_path)?;

            fetch(cfg, format, &input)?;
        }
    };

    Ok(())
}

fn fetch(mut cfg: Config, format: Format, input: &str) -> anyhow::Result<()> {
    if format == Format::Russia && cfg.russia.password.is_none() {
        cfg.russia.password = Some(cli::ask_password()?);
    }

    let parser = BillParser::new(HttpClient::new()?, cfg);
    let bill = parser.parse(input)?;

    println!("{}", serde_json::to_string_pretty(&bill)?);

    Ok(())
}
