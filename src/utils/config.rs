#![forbid(unsafe_code)]

use std::{env, fs, path::Path};

use anyhow::{Result, anyhow};
use lazy_static::lazy_static;
use log::{info, warn, error, LevelFilter};
use log4rs::append::console::{ConsoleAppender, Target};
use log4rs::config::{Appender, Config as LogConfig, Root};
use serde::Deserialize;
use structopt::StructOpt;
use toml;

use crate::utils::{hello_utils::get_absolute_path, errors::Errors};

// ***************************************************************************
//                                Constants
// ***************************************************************************
// Configuration file locations.  The log4rs file is optional and lives next
// to the application configuration file.
const ENV_CONFIG_FILE      : &str = "HELLO_SERVER_CONFIG";
const DEFAULT_CONFIG_FILE  : &str = "~/.hello_server/hello.toml";
const LOG4RS_CONFIG_FILE   : &str = "log4rs.yml"; // relative to config file dir

// Networking.  These are configurable defaults, not a contract: the
// historical development-server default was 127.0.0.1:5000.
const DEFAULT_HTTP_ADDR    : &str = "127.0.0.1";
const DEFAULT_HTTP_PORT    : u16  = 5000;

// ***************************************************************************
//                             Static Variables
// ***************************************************************************
// Assign the command line arguments BEFORE RUNTIME_CTX is initialized in main.
lazy_static! {
    pub static ref HELLO_ARGS: HelloArgs = init_hello_args();
}

// ***************************************************************************
//                               Config Structs
// ***************************************************************************
// ---------------------------------------------------------------------------
// CommandLineArgs:
// ---------------------------------------------------------------------------
#[derive(Debug, StructOpt)]
#[structopt(name = "hello_args", about = "Command line arguments for Hello Server.")]
pub struct HelloArgs {
    /// Specify the application configuration file.
    ///
    /// The configuration file path is calculated using the following
    /// priority order:
    ///
    ///   1. If set, the value of the HELLO_SERVER_CONFIG environment variable,
    ///
    ///   2. Otherwise, if set, the value of the --config-file command line argument,
    ///
    ///   3. Otherwise, ~/.hello_server/hello.toml
    ///
    #[structopt(short, long)]
    pub config_file: Option<String>,
}

// ---------------------------------------------------------------------------
// Parms:
// ---------------------------------------------------------------------------
#[derive(Debug)]
#[allow(dead_code)]
pub struct Parms {
    pub config_file: String,
    pub config: Config,
}

// ---------------------------------------------------------------------------
// RuntimeCtx:
// ---------------------------------------------------------------------------
#[derive(Debug)]
#[allow(dead_code)]
pub struct RuntimeCtx {
    pub parms: Parms,
    pub hello_args: &'static HelloArgs,
}

// ---------------------------------------------------------------------------
// Config:
// ---------------------------------------------------------------------------
#[derive(Debug, Deserialize)]
#[allow(dead_code)]
pub struct Config {
    pub title: String,
    pub http_addr: String,
    pub http_port: u16,
}

impl Config {
    pub fn new() -> Self {
        Config::default()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            title: "Hello Server".to_string(),
            http_addr: DEFAULT_HTTP_ADDR.to_string(),
            http_port: DEFAULT_HTTP_PORT,
        }
    }
}

// ***************************************************************************
//                             Argument Functions
// ***************************************************************************
// ---------------------------------------------------------------------------
// init_hello_args:
// ---------------------------------------------------------------------------
/** Get the command line arguments. */
fn init_hello_args() -> HelloArgs {
    HelloArgs::from_args()
}

// ---------------------------------------------------------------------------
// get_config_file_path:
// ---------------------------------------------------------------------------
fn get_config_file_path() -> String {
    // Order of precedence:
    //  1. Environment variable
    //  2. Command line --config-file argument
    //  3. Default location
    //
    let config_file = env::var(ENV_CONFIG_FILE).unwrap_or_else(
        |_| {
            match HELLO_ARGS.config_file.clone() {
                Some(f) => f,
                None => DEFAULT_CONFIG_FILE.to_string(),
            }
        });

    // Canonicalize the path.
    get_absolute_path(&config_file)
}

// ***************************************************************************
//                               Log Functions
// ***************************************************************************
// ---------------------------------------------------------------------------
// init_log:
// ---------------------------------------------------------------------------
/** Initialize log4rs logging.  If a log4rs.yml file exists next to the
 * application configuration file it takes precedence; otherwise a default
 * console configuration is installed so the server runs without any
 * external files.
 */
pub fn init_log() {
    let logconfig = init_log_config();
    if Path::new(&logconfig).is_file() {
        match log4rs::init_file(logconfig.clone(), Default::default()) {
            Ok(_) => (),
            Err(e) => {
                println!("{}", e);
                let s = format!("{}", Errors::Log4rsInitialization(logconfig));
                panic!("{}", s);
            },
        }
        info!("Log4rs initialized using: {}", logconfig);
    } else {
        init_default_log();
        info!("Log4rs initialized using the default console configuration.");
    }
}

// ---------------------------------------------------------------------------
// init_default_log:
// ---------------------------------------------------------------------------
/** Install a console logger at info level.  Log records target stderr so
 * that stdout carries only the startup announcement.
 */
fn init_default_log() {
    let stderr = ConsoleAppender::builder().target(Target::Stderr).build();
    let config = LogConfig::builder()
        .appender(Appender::builder().build("stderr", Box::new(stderr)))
        .build(Root::builder().appender("stderr").build(LevelFilter::Info))
        .unwrap_or_else(|e| {
            let s = format!("{}", Errors::Log4rsInitialization(e.to_string()));
            panic!("{}", s);
        });
    if let Err(e) = log4rs::init_config(config) {
        let s = format!("{}", Errors::Log4rsInitialization(e.to_string()));
        panic!("{}", s);
    }
}

// ---------------------------------------------------------------------------
// init_log_config:
// ---------------------------------------------------------------------------
fn init_log_config() -> String {
    let config_file = get_config_file_path();
    match Path::new(&config_file).parent() {
        Some(dir) => dir.join(LOG4RS_CONFIG_FILE).to_string_lossy().into_owned(),
        None => LOG4RS_CONFIG_FILE.to_string(),
    }
}

// ***************************************************************************
//                             Parms Functions
// ***************************************************************************
// ---------------------------------------------------------------------------
// get_parms:
// ---------------------------------------------------------------------------
/** Retrieve the application parameters from the configuration file specified
 * either through an environment variable or as a command line argument.  If
 * neither is provided, an attempt is made to use the default file path.  A
 * missing file is not an error; the compiled-in defaults apply.
 */
fn get_parms() -> Result<Parms> {
    // Get the candidate config file path.
    let config_file_abs = get_config_file_path();

    // Read the configuration file.
    info!("{}", Errors::ReadingConfigFile(config_file_abs.clone()));
    let contents = match fs::read_to_string(&config_file_abs) {
        Ok(c) => c,
        Err(_) => {
            // Logged rather than printed so stdout stays reserved for the
            // startup announcement.
            warn!("Unable to read configuration at {}. Using default values.", config_file_abs);
            return Ok(Parms { config_file: Default::default(), config: Config::new() });
        }
    };

    // Parse the toml configuration.
    let config : Config = match toml::from_str(&contents) {
        Ok(c)  => c,
        Err(e) => {
            let msg = format!("{}\n   {}", Errors::TOMLParseError(config_file_abs), e);
            error!("{}", msg);
            return Result::Err(anyhow!(msg));
        }
    };

    Ok(Parms { config_file: config_file_abs, config })
}

// ***************************************************************************
//                             Config Functions
// ***************************************************************************
// ---------------------------------------------------------------------------
// init_runtime_context:
// ---------------------------------------------------------------------------
pub fn init_runtime_context() -> RuntimeCtx {
    // If this fails the application aborts.
    let parms = get_parms().expect("FAILED to read configuration file.");
    RuntimeCtx { parms, hello_args: &HELLO_ARGS }
}

// ***************************************************************************
//                                  Tests
// ***************************************************************************
#[cfg(test)]
mod tests {
    use crate::utils::config::Config;

    #[test]
    fn default_config_values() {
        let config = Config::new();
        assert_eq!(config.http_addr, "127.0.0.1");
        assert_eq!(config.http_port, 5000);
        assert_eq!(config.title, "Hello Server");
    }

    #[test]
    fn parse_full_config() {
        let doc = r#"
            title = "My Hello"
            http_addr = "0.0.0.0"
            http_port = 8080
        "#;
        let config: Config = toml::from_str(doc).expect("full document parses");
        assert_eq!(config.title, "My Hello");
        assert_eq!(config.http_addr, "0.0.0.0");
        assert_eq!(config.http_port, 8080);
    }

    #[test]
    fn partial_config_is_an_error() {
        // All fields are required in the file when one is present.
        let doc = r#"http_port = 8080"#;
        assert!(toml::from_str::<Config>(doc).is_err());
    }
}
