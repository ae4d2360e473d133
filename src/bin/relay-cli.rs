use clap::{Args, Parser, Subcommand};
use serde_json::{json, Value};

#[derive(Parser)]
#[command(name = "relay-cli")]
#[command(about = "Query a running license relay", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:8000")]
    url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Full-text search of the Illinois roster
    Illinois {
        /// Search text (name, license number, city...)
        query: String,
    },
    /// Search the Colorado license dataset
    Colorado(ColoradoArgs),
    /// Search the California DCA registry
    California(CaliforniaArgs),
    /// Check relay liveness
    Health,
}

#[derive(Args)]
#[group(required = true, multiple = false)]
struct ColoradoArgs {
    /// "first last" or a last name
    #[arg(long)]
    name: Option<String>,
    #[arg(long)]
    license: Option<String>,
}

#[derive(Args)]
#[group(required = true, multiple = false)]
struct CaliforniaArgs {
    /// "first last", "last, first" or a last name
    #[arg(long)]
    name: Option<String>,
    /// One or more license numbers
    #[arg(long, num_args = 1..)]
    license: Vec<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();
    let base = cli.url.trim_end_matches('/');

    let res = match cli.command {
        Commands::Illinois { query } => {
            client
                .get(format!("{}/ill-api", base))
                .query(&[("q", query)])
                .send()
                .await?
        }
        Commands::Colorado(args) => {
            let params = match (args.name, args.license) {
                (Some(name), _) => vec![("searchType", "name".to_string()), ("name", name)],
                (None, Some(license)) => vec![
                    ("searchType", "license".to_string()),
                    ("licensenumber", license),
                ],
                (None, None) => return Err("one of --name or --license is required".into()),
            };
            client
                .get(format!("{}/colorado-api", base))
                .query(&params)
                .send()
                .await?
        }
        Commands::California(args) => {
            let body = match args.name {
                Some(name) => json!({ "name": name }),
                None => json!({ "licenseNumbers": args.license }),
            };
            client
                .post(format!("{}/cali-api", base))
                .json(&body)
                .send()
                .await?
        }
        Commands::Health => client.get(format!("{}/health", base)).send().await?,
    };

    print_response(res).await
}

async fn print_response(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    let text = res.text().await?;
    let rendered = match serde_json::from_str::<Value>(&text) {
        Ok(json) => serde_json::to_string_pretty(&json)?,
        Err(_) => text,
    };

    if !status.is_success() {
        eprintln!("Error: relay returned status {}", status);
        if !rendered.is_empty() {
            eprintln!("{}", rendered);
        }
        std::process::exit(1);
    }

    println!("{}", rendered);
    Ok(())
}
