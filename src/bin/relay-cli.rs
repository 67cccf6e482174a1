use clap::{Parser, Subcommand};
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};

#[derive(Parser)]
#[command(name = "relay-cli")]
#[command(about = "Smoke-test a running miniPCB relay", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:8787")]
    url: String,

    /// Value for the X-Proxy-Key header.
    #[arg(short, long, env = "PROXY_KEY")]
    key: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check relay liveness
    Health,
    /// List upstream models
    Models,
    /// POST a JSON body to an /api route (e.g. `chat '{"input":"hi"}'`)
    Post {
        route: String,
        body: String,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();
    let base = cli.url.trim_end_matches('/');

    let mut headers = HeaderMap::new();
    if let Some(key) = cli.key.as_deref().filter(|k| !k.is_empty()) {
        headers.insert("x-proxy-key", HeaderValue::from_str(key)?);
    }

    let res = match cli.command {
        Commands::Health => {
            client
                .get(format!("{}/api/health", base))
                .send()
                .await?
        }
        Commands::Models => {
            client
                .get(format!("{}/api/models", base))
                .headers(headers)
                .send()
                .await?
        }
        Commands::Post { route, body } => {
            serde_json::from_str::<serde_json::Value>(&body)
                .map_err(|e| format!("body is not valid JSON: {}", e))?;
            client
                .post(format!("{}/api/{}", base, route.trim_start_matches('/')))
                .headers(headers)
                .header(CONTENT_TYPE, "application/json")
                .body(body)
                .send()
                .await?
        }
    };

    print_response(res).await
}

async fn print_response(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    let text = res.text().await?;

    if !status.is_success() {
        eprintln!("Error: relay returned status {}", status);
    } else {
        println!("Status: {}", status);
    }

    match serde_json::from_str::<serde_json::Value>(&text) {
        Ok(json) => println!("{}", serde_json::to_string_pretty(&json)?),
        Err(_) => println!("{}", text),
    }
    Ok(())
}
