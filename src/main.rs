use anyhow::Result;
use tracing::info;

use telecom_master::api_client::ChatClient;
use telecom_master::chat_tui::ChatTui;
use telecom_master::config::config::Config;
use telecom_master::logging::init_logging;
use telecom_master::mock::MockFixture;

fn print_help() {
    println!("telecom-master - terminal client for the TelecomMaster complaint agent");
    println!();
    println!("USAGE:");
    println!("    telecom-master [OPTIONS]");
    println!();
    println!("OPTIONS:");
    println!("    --mock               Answer from the built-in fixture, no network");
    println!("    --api-url <URL>      Backend base URL (overrides config and env)");
    println!("    -h, --help           Print this help");
    println!();
    println!("ENVIRONMENT:");
    println!("    TELECOM_API_BASE_URL Backend base URL");
    println!("    TELECOM_USE_MOCK     Set to 1/true to force mock mode");
    println!("    RUST_LOG             Log filter (default: info)");
    println!();
    println!("KEYS:");
    println!("    Enter                Send the message");
    println!("    Esc                  Cancel while processing, otherwise quit");
    println!("    Ctrl+R               Start a new session");
}

fn main() -> Result<()> {
    let mut force_mock = false;
    let mut api_url: Option<String> = None;

    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-h" | "--help" => {
                print_help();
                return Ok(());
            }
            "--mock" => force_mock = true,
            "--api-url" => {
                api_url = Some(
                    args.next()
                        .ok_or_else(|| anyhow::anyhow!("--api-url requires a value"))?,
                );
            }
            other => {
                eprintln!("Unknown argument: {other}");
                print_help();
                std::process::exit(1);
            }
        }
    }

    let log_path = init_logging()?;

    let mut config = Config::load()?;
    if force_mock {
        config.api.use_mock = true;
    }
    if let Some(url) = api_url {
        config.api.base_url = url;
    }

    info!(
        base_url = %config.api.base_url,
        use_mock = config.api.use_mock,
        "starting telecom-master"
    );

    let client = if config.api.use_mock {
        ChatClient::mock(MockFixture::default().with_delay(config.api.mock_delay()))
    } else {
        ChatClient::live(&config.api.base_url, config.api.timeout())?
    };

    let mut app = ChatTui::new(client, config.session.clone());
    let result = app.run();

    println!("Log file: {}", log_path.display());
    result
}
