use std::path::PathBuf;

use thiserror::Error;

pub const DEFAULT_ROM: &str = "PokemonEmeraldRom.gba";
pub const DEFAULT_COUNT: usize = 10;
pub const DEFAULT_START: u32 = 0x0800_0000;

pub const USAGE: &str =
    "usage: gbadis [ROM] [COUNT] [--count N] [--start HEX] [--thumb] [--json] [--log-file]";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub rom: PathBuf,
    pub count: usize,
    pub start: u32,
    pub thumb: bool,
    pub json: bool,
    pub log_file: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            rom: PathBuf::from(DEFAULT_ROM),
            count: DEFAULT_COUNT,
            start: DEFAULT_START,
            thumb: false,
            json: false,
            log_file: false,
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("`{0}` needs a value")]
    MissingValue(&'static str),

    #[error("`{0}` is not an instruction count")]
    BadCount(String),

    #[error("`{0}` is not a hex address")]
    BadAddress(String),

    #[error("unknown option `{0}`")]
    UnknownOption(String),

    #[error("unexpected argument `{0}`")]
    Unexpected(String),
}

impl Config {
    /// Parses the arguments after the program name.
    ///
    /// The first bare argument is the ROM path, the second the count.
    ///
    /// # Errors
    ///
    /// Unknown options, missing option values and unparsable numbers.
    pub fn parse<I>(args: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = String>,
    {
        let mut config = Self::default();
        let mut positional = 0;
        let mut args = args.into_iter();

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--thumb" => config.thumb = true,
                "--json" => config.json = true,
                "--log-file" => config.log_file = true,
                "--count" => {
                    let value = args.next().ok_or(ConfigError::MissingValue("--count"))?;
                    config.count = parse_count(value)?;
                }
                "--start" => {
                    let value = args.next().ok_or(ConfigError::MissingValue("--start"))?;
                    config.start = parse_address(value)?;
                }
                option if option.starts_with("--") => {
                    return Err(ConfigError::UnknownOption(arg));
                }
                _ => {
                    match positional {
                        0 => config.rom = PathBuf::from(arg),
                        1 => config.count = parse_count(arg)?,
                        _ => return Err(ConfigError::Unexpected(arg)),
                    }
                    positional += 1;
                }
            }
        }

        Ok(config)
    }
}

fn parse_count(value: String) -> Result<usize, ConfigError> {
    value.parse().map_err(|_| ConfigError::BadCount(value))
}

fn parse_address(value: String) -> Result<u32, ConfigError> {
    let digits = value
        .strip_prefix("0x")
        .or_else(|| value.strip_prefix("0X"))
        .unwrap_or(&value)
        .replace('_', "");

    u32::from_str_radix(&digits, 16).map_err(|_| ConfigError::BadAddress(value))
}
