//! Interactive console session.
//!
//! A [`Session`] asks for a city, month and day, prints the four statistic
//! groups for the matching trips, offers each group's raw data page by page
//! and finally offers a restart. Input and output are generic so a session
//! can run on stdin/stdout or on scripted buffers.

use log::{info, warn};
use std::io::{BufRead, Write};
use std::time::Instant;

use crate::core::domain::City;
use crate::core::error::{BikeshareError, BikeshareResult};
use crate::core::store::RecordStore;
use crate::io::loaders::DataSourceRegistry;
use crate::report;
use crate::services::{
    compute_duration_stats, compute_station_stats, compute_time_stats, compute_user_stats,
    StatGroup,
};
use crate::time::{parse_day_filter, parse_month_filter, DayOfWeek, Month};
use crate::transformations::filtering::{FilteredView, TripFilter};
use crate::transformations::pagination::pages;

const CITY_PROMPT: &str = "Would you like to see data for Chicago, New York City or Washington?: ";
const MONTH_PROMPT: &str =
    "\nFor which month do you want to see data? Choose a month from january to june: ";
const DAY_PROMPT: &str = "\nFor which day of the week would you like to see data?: ";
const WASHINGTON_PROMPT: &str = "\nThere is no gender and birth year data available for \
    Washington, would you like to continue? Enter yes or no.\n";
const MORE_RAW_PROMPT: &str = "Would you like to see more raw data? Enter yes or no.\n";
const RESTART_PROMPT: &str = "\nWould you like to restart? Enter yes or no.\n";

/// Whether the session should keep going after a step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

/// One interactive run over an input and an output stream.
pub struct Session<R, W> {
    input: R,
    output: W,
    registry: DataSourceRegistry,
    page_size: usize,
}

impl<R: BufRead, W: Write> Session<R, W> {
    /// # Errors
    /// * `BikeshareError::InvalidPageSize` when `page_size` is zero
    pub fn new(
        input: R,
        output: W,
        registry: DataSourceRegistry,
        page_size: usize,
    ) -> BikeshareResult<Self> {
        if page_size == 0 {
            return Err(BikeshareError::InvalidPageSize);
        }
        Ok(Self {
            input,
            output,
            registry,
            page_size,
        })
    }

    /// Run until the user declines a restart or input ends.
    ///
    /// # Errors
    /// Only failures to read input or write output end the session with an
    /// error. Load failures are reported to the user, who is asked again.
    pub fn run(&mut self) -> BikeshareResult<()> {
        writeln!(self.output, "Hello! Let's explore some US bikeshare data!")?;

        loop {
            let Some((city, filter)) = self.choose_filters()? else {
                return Ok(());
            };

            let store = match self.registry.load(city.source_id()) {
                Ok(store) => store,
                Err(e) => {
                    if e.is_recoverable() {
                        info!("Could not load {}: {}", city, e);
                    } else {
                        warn!("Could not load {}: {}", city, e);
                    }
                    writeln!(self.output, "\n{}\n", e)?;
                    continue;
                }
            };

            if self.present(&store, filter)? == Flow::Quit {
                return Ok(());
            }

            match self.prompt(RESTART_PROMPT)? {
                Some(answer) if answer == "yes" => continue,
                _ => return Ok(()),
            }
        }
    }

    /// Give back the output stream, e.g. to inspect a scripted run
    pub fn into_output(self) -> W {
        self.output
    }

    /// Ask for city, month and day. `None` means input ended.
    fn choose_filters(&mut self) -> BikeshareResult<Option<(City, TripFilter)>> {
        let Some(city) = self.choose_city()? else {
            return Ok(None);
        };
        let Some(month) = self.choose_month()? else {
            return Ok(None);
        };
        let Some(weekday) = self.choose_day()? else {
            return Ok(None);
        };
        writeln!(self.output, "{}", report::separator())?;

        info!(
            "Session selected {} with month={:?} day={:?}",
            city, month, weekday
        );
        Ok(Some((city, TripFilter::new(month, weekday))))
    }

    fn choose_city(&mut self) -> BikeshareResult<Option<City>> {
        loop {
            let Some(answer) = self.prompt(CITY_PROMPT)? else {
                return Ok(None);
            };
            match City::from_source_id(&answer) {
                Err(_) => {
                    writeln!(
                        self.output,
                        "\nYou've input '{}'. Please select one of the following cities? : \
                         Chicago, New York City or Washington.\n \
                         Check your spelling and try again :-)\n",
                        answer
                    )?;
                }
                Ok(City::Washington) => match self.prompt(WASHINGTON_PROMPT)? {
                    None => return Ok(None),
                    Some(confirm) if confirm == "no" => continue,
                    Some(_) => return Ok(Some(City::Washington)),
                },
                Ok(city) => return Ok(Some(city)),
            }
        }
    }

    fn choose_month(&mut self) -> BikeshareResult<Option<Option<Month>>> {
        loop {
            let Some(answer) = self.prompt(MONTH_PROMPT)? else {
                return Ok(None);
            };
            match parse_month_filter(&answer) {
                Some(month) => return Ok(Some(month)),
                None => writeln!(
                    self.output,
                    "\nAre you sure you've selected a month from january to june? \
                     You've input {} \nPlease check your spelling and try again :-)\n",
                    answer
                )?,
            }
        }
    }

    fn choose_day(&mut self) -> BikeshareResult<Option<Option<DayOfWeek>>> {
        loop {
            let Some(answer) = self.prompt(DAY_PROMPT)? else {
                return Ok(None);
            };
            match parse_day_filter(&answer) {
                Some(day) => return Ok(Some(day)),
                None => writeln!(
                    self.output,
                    "Are you sure you've input the day of the week correctly? \
                     You've input {}\nPlease check your spelling and try again :-)\n",
                    answer
                )?,
            }
        }
    }

    fn present(&mut self, store: &RecordStore, filter: TripFilter) -> BikeshareResult<Flow> {
        let view = filter.apply(store);
        if view.is_empty() {
            writeln!(self.output, "\n{}", report::no_trips_message(&filter))?;
            writeln!(self.output, "{}", report::separator())?;
            return Ok(Flow::Continue);
        }

        for group in StatGroup::ALL {
            if self.present_group(&view, group)? == Flow::Quit {
                return Ok(Flow::Quit);
            }
        }
        Ok(Flow::Continue)
    }

    fn present_group(&mut self, view: &FilteredView<'_>, group: StatGroup) -> BikeshareResult<Flow> {
        writeln!(self.output, "\nCalculating {}...\n", group.title())?;
        let started = Instant::now();

        let body = match render_group(view, group) {
            Ok(text) => text,
            Err(BikeshareError::EmptyDataset) => "No data available.".to_string(),
            Err(e) => return Err(e),
        };
        writeln!(self.output, "{}", body)?;
        writeln!(
            self.output,
            "\nThis took {:.4} seconds.",
            started.elapsed().as_secs_f64()
        )?;

        let prompt = format!(
            "Would you like to see raw {} data? Enter yes or no.\n",
            group.label()
        );
        let flow = match self.prompt(&prompt)? {
            None => Flow::Quit,
            Some(answer) if answer == "no" => Flow::Continue,
            Some(_) => self.page_raw_data(view, group)?,
        };

        writeln!(self.output, "{}", report::separator())?;
        Ok(flow)
    }

    fn page_raw_data(&mut self, view: &FilteredView<'_>, group: StatGroup) -> BikeshareResult<Flow> {
        for page in pages(view, group.raw_columns(), self.page_size)? {
            writeln!(self.output, "{}", report::render_page(&page))?;
            match self.prompt(MORE_RAW_PROMPT)? {
                None => return Ok(Flow::Quit),
                Some(answer) if answer == "yes" => {}
                Some(_) => break,
            }
        }
        Ok(Flow::Continue)
    }

    /// Print a prompt and read one answer, trimmed and lower-cased.
    /// `None` means the input has ended.
    fn prompt(&mut self, message: &str) -> BikeshareResult<Option<String>> {
        write!(self.output, "{}", message)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_lowercase()))
    }
}

fn render_group(view: &FilteredView<'_>, group: StatGroup) -> BikeshareResult<String> {
    Ok(match group {
        StatGroup::Time => report::render_time_stats(&compute_time_stats(view)?),
        StatGroup::Station => report::render_station_stats(&compute_station_stats(view)?),
        StatGroup::Duration => report::render_duration_stats(&compute_duration_stats(view)?),
        StatGroup::User => report::render_user_stats(&compute_user_stats(view)?),
    })
}
