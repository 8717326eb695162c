use clap::{Arg, ArgAction, Command, ValueHint};
use std::path::PathBuf;

/// CLI arguments for tandem-server
#[derive(Debug, Clone)]
pub struct CliArgs {
    pub port: Option<u16>,
    pub data_dir: Option<PathBuf>,
    pub jwt_secret: Option<String>,
    pub jwt_expiration_days: Option<u64>,
    pub allow_signup: Option<bool>,
    pub secure_cookies: Option<bool>,
    pub log_level: Option<String>,
}

impl CliArgs {
    /// Parse command line arguments
    pub fn parse() -> Self {
        let matches = Command::new("tandem-server")
            .version(tandem::VERSION)
            .author("Tandem Contributors")
            .about("HTTP API server for the Tandem language-exchange service")
            .long_about(
                r#"Tandem Server provides the REST API for the Tandem language-exchange
application: signup and login, profile onboarding, peer recommendations,
friend requests, and chat-provider token issuance. Data is kept in an
embedded document database.

The server can be configured through command line arguments or environment
variables. Command line arguments take precedence over environment variables.

Examples:
  tandem-server --port 8080 --data-dir ./data
  tandem-server --jwt-expiration-days 14 --secure-cookies
  tandem-server --allow-signup=false --log-level debug"#,
            )
            .arg(
                Arg::new("port")
                    .short('p')
                    .long("port")
                    .value_name("PORT")
                    .help("Port to listen on")
                    .long_help(
                        "Port number for the HTTP server to listen on.
Environment variable: TANDEM_PORT",
                    )
                    .value_hint(ValueHint::Other)
                    .value_parser(clap::value_parser!(u16)),
            )
            .arg(
                Arg::new("data_dir")
                    .short('d')
                    .long("data-dir")
                    .value_name("DIR")
                    .help("Directory for persistent storage")
                    .long_help(
                        "Directory where the embedded database keeps its files.
When omitted the server runs on in-memory storage and loses all data on
shutdown, which is only useful for local development.
Environment variable: TANDEM_DATA_DIR",
                    )
                    .value_hint(ValueHint::DirPath)
                    .value_parser(clap::value_parser!(PathBuf)),
            )
            .arg(
                Arg::new("jwt_secret")
                    .long("jwt-secret")
                    .value_name("SECRET")
                    .help("JWT signing secret")
                    .long_help(
                        "Secret key used for signing session tokens. Should be a
long, random string. If not provided, one will be generated automatically
and existing sessions will not survive a restart.
Environment variable: TANDEM_JWT_SECRET",
                    )
                    .value_hint(ValueHint::Other),
            )
            .arg(
                Arg::new("jwt_expiration")
                    .long("jwt-expiration-days")
                    .value_name("DAYS")
                    .help("Session token lifetime in days")
                    .long_help(
                        "How long session tokens and cookies remain valid before
expiring. Default is 7 days.
Environment variable: TANDEM_JWT_EXPIRATION_DAYS",
                    )
                    .value_parser(clap::value_parser!(u64)),
            )
            .arg(
                Arg::new("allow_signup")
                    .long("allow-signup")
                    .value_name("BOOL")
                    .help("Allow user registration")
                    .long_help(
                        "Allow new users to register accounts via the signup API.
Set to false in deployments where account creation is handled elsewhere.
Environment variable: TANDEM_ALLOW_SIGNUP",
                    )
                    .value_parser(clap::value_parser!(bool)),
            )
            .arg(
                Arg::new("secure_cookies")
                    .long("secure-cookies")
                    .help("Mark session cookies Secure")
                    .long_help(
                        "Set the Secure attribute on session cookies so browsers
only send them over HTTPS. Enable in production deployments.
Environment variable: TANDEM_SECURE_COOKIES",
                    )
                    .action(ArgAction::SetTrue),
            )
            .arg(
                Arg::new("log_level")
                    .long("log-level")
                    .value_name("LEVEL")
                    .help("Logging level")
                    .long_help(
                        "Set the logging level. Valid values: error, warn, info, debug, trace
Environment variable: RUST_LOG",
                    )
                    .value_parser(["error", "warn", "info", "debug", "trace"]),
            )
            .arg(
                Arg::new("help_env")
                    .long("help-env")
                    .help("Show all environment variables")
                    .long_help(
                        "Display a comprehensive list of all environment variables
that can be used to configure the server.",
                    )
                    .action(ArgAction::SetTrue),
            )
            .get_matches();

        // Handle special help for environment variables
        if matches.get_flag("help_env") {
            Self::print_env_help();
            std::process::exit(0);
        }

        Self {
            port: matches.get_one::<u16>("port").copied(),
            data_dir: matches.get_one::<PathBuf>("data_dir").cloned(),
            jwt_secret: matches.get_one::<String>("jwt_secret").cloned(),
            jwt_expiration_days: matches.get_one::<u64>("jwt_expiration").copied(),
            allow_signup: matches.get_one::<bool>("allow_signup").copied(),
            secure_cookies: if matches.get_flag("secure_cookies") {
                Some(true)
            } else {
                None
            },
            log_level: matches.get_one::<String>("log_level").cloned(),
        }
    }

    /// Print comprehensive environment variable help
    fn print_env_help() {
        println!("Tandem Server Environment Variables");
        println!("===================================");
        println!();
        println!("Server Configuration:");
        println!("  TANDEM_PORT                 - Server port (default: 3000)");
        println!("  TANDEM_DATA_DIR             - Storage directory (default: in-memory)");
        println!();
        println!("Sessions:");
        println!("  TANDEM_JWT_SECRET           - JWT signing secret (auto-generated if not set)");
        println!("  TANDEM_JWT_EXPIRATION_DAYS  - Token lifetime in days (default: 7)");
        println!("  TANDEM_ALLOW_SIGNUP         - Allow user registration (default: true)");
        println!("  TANDEM_SECURE_COOKIES       - Mark cookies Secure (default: false)");
        println!();
        println!("Chat Provider:");
        println!("  STREAM_API_KEY              - Chat provider API key");
        println!("  STREAM_API_SECRET           - Chat provider API secret");
        println!("  STREAM_API_URL              - Chat provider endpoint override");
        println!();
        println!("Logging:");
        println!("  RUST_LOG                    - Logging level (error, warn, info, debug, trace)");
        println!();
        println!("Note: Command line arguments take precedence over environment variables.");
        println!("Use --help for CLI argument documentation.");
    }
}
