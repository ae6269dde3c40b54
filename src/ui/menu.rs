use std::io::{self, BufRead, Write};

use crate::config::{AppConfig, MenuHeader};
use crate::currency::{ConversionTable, Currency};
use crate::data::model::{DatasetError, Stat};
use crate::state::{AppState, Settings};

// ---------------------------------------------------------------------------
// Menu choices
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Show(Stat),
    Load,
    Quit,
}

impl MenuChoice {
    pub fn from_number(n: i64) -> Option<Self> {
        match n {
            1 => Some(MenuChoice::Show(Stat::Avg)),
            2 => Some(MenuChoice::Show(Stat::Min)),
            3 => Some(MenuChoice::Show(Stat::Max)),
            4 => Some(MenuChoice::Load),
            9 => Some(MenuChoice::Quit),
            _ => None,
        }
    }
}

const MENU_TEXT: &str = "\
Main Menu
1 - Print Average Rent by Location and Property Type
2 - Print Minimum Rent by Location and Property Type
3 - Print Maximum Rent by Location and Property Type
4 - Load Data
9 - Quit
";

// ---------------------------------------------------------------------------
// Console – line-oriented prompt over any reader / writer
// ---------------------------------------------------------------------------

pub struct Console<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Print `message` and read one line. `None` means end of input.
    pub fn prompt(&mut self, message: &str) -> io::Result<Option<String>> {
        write!(self.output, "{message}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        let trimmed = line.trim_end_matches(['\r', '\n']).len();
        line.truncate(trimmed);
        Ok(Some(line))
    }

    pub fn say(&mut self, text: &str) -> io::Result<()> {
        writeln!(self.output, "{text}")
    }

    pub fn write_raw(&mut self, text: &str) -> io::Result<()> {
        write!(self.output, "{text}")
    }

    pub fn into_output(self) -> W {
        self.output
    }
}

// ---------------------------------------------------------------------------
// Start-up questions
// ---------------------------------------------------------------------------

/// Greet the user and settle the session settings, asking only for what the
/// config does not already provide. Returns `None` if input ends first.
pub fn setup<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    config: &AppConfig,
) -> io::Result<Option<Settings>> {
    let Some(name) = console.prompt("Please enter your name: ")? else {
        return Ok(None);
    };
    console.say(&format!("Hi {}, welcome to the rental database.", name.trim()))?;

    let home_currency = match config.home_currency {
        Some(c) => c,
        None => match ask_currency(console)? {
            Some(c) => c,
            None => return Ok(None),
        },
    };

    let header = match &config.header {
        Some(h) => h.clone(),
        None => match ask_header(console)? {
            Some(h) => h,
            None => return Ok(None),
        },
    };

    Ok(Some(Settings {
        home_currency,
        header,
        copyright: config.copyright.clone(),
        data_path: config.data_path.clone(),
    }))
}

fn ask_currency<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
) -> io::Result<Option<Currency>> {
    loop {
        let Some(answer) = console.prompt("What is your home currency? ")? else {
            return Ok(None);
        };
        match answer.parse::<Currency>() {
            Ok(c) => return Ok(Some(c)),
            Err(e) => {
                log::debug!("{e}");
                console.say("Please enter AUD, USD, EUR, CAD, GBP, CHF, NZD or JPY")?;
            }
        }
    }
}

fn ask_header<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
) -> io::Result<Option<MenuHeader>> {
    loop {
        let Some(answer) = console.prompt("Enter a header for the menu:\n")? else {
            return Ok(None);
        };
        match MenuHeader::new(answer) {
            Ok(h) => return Ok(Some(h)),
            Err(e) => {
                log::debug!("{e}");
                console.say("Header must be a string less than or equal to thirty characters long")?;
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Main menu loop
// ---------------------------------------------------------------------------

/// Run the menu until the user quits or input ends.
pub fn run<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    state: &mut AppState,
) -> io::Result<()> {
    let table = ConversionTable::new(state.settings.home_currency);
    console.write_raw(&table.to_string())?;
    console.say(&state.settings.copyright)?;

    loop {
        console.say(state.settings.header.as_str())?;
        console.write_raw(MENU_TEXT)?;

        let Some(answer) = console.prompt("What is your choice? ")? else {
            return Ok(());
        };
        let number = match answer.trim().parse::<i64>() {
            Ok(n) => n,
            Err(_) => {
                console.say("Please enter a number")?;
                continue;
            }
        };

        match MenuChoice::from_number(number) {
            Some(MenuChoice::Show(stat)) => show_grid(console, state, stat)?,
            Some(MenuChoice::Load) => load(console, state)?,
            Some(MenuChoice::Quit) => {
                console.say("Goodbye!  Thank you for using the database")?;
                return Ok(());
            }
            None => console.say("Please enter a valid number")?,
        }
    }
}

fn show_grid<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    state: &AppState,
    stat: Stat,
) -> io::Result<()> {
    log::debug!("Rendering {stat} rent table");
    match state.grid(stat) {
        Ok(table) => console.write_raw(&table.to_string()),
        Err(DatasetError::EmptyDataset) => console.say("Please load a DataSet first"),
        Err(e) => console.say(&format!("Error: {e}")),
    }
}

fn load<R: BufRead, W: Write>(console: &mut Console<R, W>, state: &mut AppState) -> io::Result<()> {
    match state.reload() {
        Ok(n) => console.say(&format!("Loaded {n} listings")),
        Err(e) => {
            let reason = state
                .status_message
                .clone()
                .unwrap_or_else(|| format!("{e:#}"));
            console.say(&format!("Could not load data: {reason}"))
        }
    }
}
