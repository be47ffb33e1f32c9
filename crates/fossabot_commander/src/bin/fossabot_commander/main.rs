use fossabot_commander::{
    AttoHttpClient, Commander, Config, Context, DefaultRequestFactory, Error, LogFacade,
};

const CONFIG_FILE: &str = "fossabot.toml";
const CONFIG_EXAMPLE: &str = "fossabot.toml.example";
const TOKEN_ENV: &str = "FOSSABOT_CUSTOMAPI_TOKEN";

fn load_config() -> anyhow::Result<Config> {
    match Config::load_from_file(CONFIG_FILE) {
        Ok(config) => Ok(config),
        Err(err) => {
            log::warn!("{:#}", err);
            write_default()
        }
    }
}

fn write_default() -> anyhow::Result<Config> {
    eprintln!("cannot load config. creating a default at '{}'", CONFIG_EXAMPLE);
    eprintln!("copy it to '{}' and edit it then rerun", CONFIG_FILE);

    std::fs::write(CONFIG_EXAMPLE, Config::default().to_toml()?)?;
    std::process::exit(1);
}

fn greet(context: Option<&Context>) -> anyhow::Result<String> {
    let context = match context {
        Some(context) => context,
        None => return Ok("hello from fossabot_commander".into()),
    };

    let channel = context.channel();
    let response = match context.message() {
        Some(msg) if msg.user().is_elevated() => format!(
            "hey {}, {} is {}",
            msg.user().display_name(),
            channel.display_name(),
            if channel.is_live() { "live" } else { "offline" }
        ),
        Some(msg) => format!(
            "hello {}, welcome to {}'s chat",
            msg.user().display_name(),
            channel.display_name()
        ),
        None => format!("hello {}", channel.display_name()),
    };
    Ok(response)
}

fn main() -> anyhow::Result<()> {
    simple_env_load::load_env_from(&[".env", ".env.dev"]);

    alto_logger::init_alt_term_logger()?;

    let config = load_config()?;

    let mut args = std::env::args().skip(1).collect::<Vec<_>>();
    let fetch_context = match args.iter().position(|arg| arg == "--no-context") {
        Some(pos) => {
            args.remove(pos);
            false
        }
        None => true,
    };

    let token = match args.into_iter().next().or_else(|| std::env::var(TOKEN_ENV).ok()) {
        Some(token) => token,
        None => anyhow::bail!(
            "usage: fossabot_commander [--no-context] <token> (or set {})",
            TOKEN_ENV
        ),
    };

    let commander = Commander::from_config(
        &config,
        AttoHttpClient::default(),
        DefaultRequestFactory,
        Some(Box::new(LogFacade)),
    )?;

    match commander.run_command(&greet, &token, fetch_context) {
        Ok(response) => {
            println!("{}", response);
            Ok(())
        }
        Err(Error::RateLimit(err)) => {
            let bucket = err.rate_limit().cloned().unwrap_or_default();
            let show = |n: Option<u64>| n.map_or_else(|| "?".to_string(), |n| n.to_string());
            eprintln!(
                "rate limited: {}/{} requests left, resets at {}",
                show(bucket.remaining()),
                show(bucket.total()),
                bucket
                    .resets_at()
                    .map_or_else(|| "?".to_string(), |ts| ts.to_rfc3339())
            );
            std::process::exit(2);
        }
        Err(err) => Err(err.into()),
    }
}
