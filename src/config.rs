use super::clock::Padding;

pub const DEFAULT_SIDE: u32 = 448;
/// Largest accepted `--size`, keeps the shm pool size well inside `i32`
pub const MAX_SIDE: u32 = 8192;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// `yyyy/MM/dd HH:mm:ss`, current time when absent
    pub date: Option<String>,
    pub padding: Padding,
    /// Requested side of the square layer surface
    pub side: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            date: None,
            padding: Padding::default(),
            side: DEFAULT_SIDE,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_args(std::env::args().skip(1))
    }

    pub fn from_args<I, S>(args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut config = Self::default();
        let mut args = args.into_iter();

        while let Some(arg) = args.next() {
            let flag: &str = arg.as_ref();
            if !matches!(flag, "--date" | "--padding" | "--size") {
                log::warn!("Ignoring argument {flag:?}");
                continue;
            }

            let Some(value) = args.next() else {
                log::warn!("Missing value for {flag}");
                break;
            };
            let value: &str = value.as_ref();

            match flag {
                "--date" => config.date = Some(value.to_string()),
                "--padding" => match value.parse() {
                    Ok(amount) => config.padding = Padding::uniform(amount),
                    Err(e) => log::warn!("Ignoring --padding {value:?}: {e}"),
                },
                _ => match value.parse() {
                    Ok(side) if (1..=MAX_SIDE).contains(&side) => config.side = side,
                    _ => log::warn!("Ignoring --size {value:?}, expected 1..={MAX_SIDE}"),
                },
            }
        }

        config
    }
}
