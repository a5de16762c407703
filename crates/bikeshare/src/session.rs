//! The interactive explore / report / page / restart loop.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use bikeshare_core::error::BikeshareError;
use bikeshare_core::models::{City, DayFilter, MonthFilter, TripFilter};
use bikeshare_data::analysis::analyze;
use bikeshare_data::reader::{load_city, CityData};
use bikeshare_ui::prompt::{self, Prompter};
use bikeshare_ui::report::{render_banner, render_empty, render_report, RAW_RULE};
use bikeshare_ui::table_view::RawPager;
use tracing::info;

/// Answers supplied on the command line for the first pass.
#[derive(Debug, Clone, Copy, Default)]
pub struct Presets {
    pub city: Option<City>,
    pub month: Option<MonthFilter>,
    pub day: Option<DayFilter>,
}

/// A validated city and filter pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection {
    pub city: City,
    pub filter: TripFilter,
}

pub struct Session<R, W> {
    prompter: Prompter<R, W>,
    data_dir: PathBuf,
    page_size: usize,
    presets: Presets,
}

impl<R: BufRead, W: Write> Session<R, W> {
    pub fn new(prompter: Prompter<R, W>, data_dir: PathBuf, page_size: usize) -> Self {
        Self {
            prompter,
            data_dir,
            page_size,
            presets: Presets::default(),
        }
    }

    pub fn with_presets(mut self, presets: Presets) -> Self {
        self.presets = presets;
        self
    }

    /// Run passes until the user declines to restart or input ends.
    pub fn run(&mut self) -> io::Result<()> {
        writeln!(
            self.prompter.output(),
            "\nHello! Let's explore some US bikeshare data!"
        )?;

        loop {
            let Some(selection) = self.select()? else {
                info!("input ended during selection");
                return Ok(());
            };
            self.explore(selection)?;

            if !self.prompter.confirm(prompt::RESTART)? {
                return Ok(());
            }
        }
    }

    /// Resolve city, month and day, using presets once and then prompting.
    fn select(&mut self) -> io::Result<Option<Selection>> {
        let presets = std::mem::take(&mut self.presets);

        let Some(city) = self.resolve(presets.city, &prompt::CITY)? else {
            return Ok(None);
        };
        let Some(month) = self.resolve(presets.month, &prompt::MONTH)? else {
            return Ok(None);
        };
        let Some(day) = self.resolve(presets.day, &prompt::DAY)? else {
            return Ok(None);
        };

        Ok(Some(Selection {
            city,
            filter: TripFilter::new(month, day),
        }))
    }

    fn resolve<T>(&mut self, preset: Option<T>, field: &prompt::Prompt) -> io::Result<Option<T>>
    where
        T: std::str::FromStr<Err = BikeshareError>,
    {
        match preset {
            Some(value) => Ok(Some(value)),
            None => self.prompter.ask(field),
        }
    }

    /// Load, report and page through one city.
    ///
    /// Load failures are reported and end the pass; they do not end the run.
    fn explore(&mut self, selection: Selection) -> io::Result<()> {
        let Selection { city, filter } = selection;

        let CityData { raw, trips } = match load_city(&self.data_dir, city) {
            Ok(data) => data,
            Err(err) => {
                info!("failed to load {}: {}", city, err);
                writeln!(self.prompter.output(), "Could not load {city} data: {err}")?;
                return Ok(());
            }
        };

        let trips = trips.into_filtered(&filter);
        let out = self.prompter.output();
        write!(out, "{}", render_banner(city, &filter, trips.len()))?;

        match analyze(&trips) {
            Ok(report) => write!(out, "{}", render_report(&report))?,
            Err(BikeshareError::EmptyResult) => write!(out, "{}", render_empty(city, &filter))?,
            Err(err) => writeln!(out, "Could not compute statistics: {err}")?,
        }

        let mut pager = RawPager::new(&raw, self.page_size);
        while self.prompter.confirm(prompt::RAW_DATA)? {
            match pager.next_page() {
                Some(page) => write!(self.prompter.output(), "{page}")?,
                None => {
                    writeln!(self.prompter.output(), "No more rows to show.")?;
                    break;
                }
            }
        }
        writeln!(self.prompter.output(), "{RAW_RULE}")?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Month;
    use std::io::Cursor;
    use tempfile::TempDir;

    const CHICAGO_CSV: &str = "\
,Start Time,End Time,Trip Duration,Start Station,End Station,User Type,Gender,Birth Year
1,2017-01-02 08:10:00,2017-01-02 08:20:00,600,Canal St & Adams St,Clinton St & Madison St,Subscriber,Male,1985.0
2,2017-01-02 08:30:00,2017-01-02 08:40:00,600,Canal St & Adams St,Clinton St & Madison St,Subscriber,Female,1990.0
3,2017-01-03 17:05:00,2017-01-03 17:25:00,1200,Clinton St & Madison St,Canal St & Adams St,Customer,,
4,2017-02-06 09:00:00,2017-02-06 09:10:00,600,Canal St & Adams St,Wells St & Elm St,Subscriber,Male,1985.0
5,2017-03-07 09:00:00,2017-03-07 09:10:00,600,Wells St & Elm St,Canal St & Adams St,Subscriber,Male,1970.0
6,2017-03-08 09:00:00,2017-03-08 09:10:00,600,Wells St & Elm St,Canal St & Adams St,Subscriber,Male,1970.0
7,2017-04-09 09:00:00,2017-04-09 09:10:00,600,Wells St & Elm St,Canal St & Adams St,Customer,,
";

    const WASHINGTON_CSV: &str = "\
,Start Time,End Time,Trip Duration,Start Station,End Station,User Type
1,2017-06-21 08:36:34,2017-06-21 08:44:43,489.066,14th & Belmont St NW,15th & K St NW,Subscriber
";

    fn data_dir() -> TempDir {
        let tmp = TempDir::new().expect("tempdir");
        std::fs::write(tmp.path().join("chicago.csv"), CHICAGO_CSV).expect("write");
        std::fs::write(tmp.path().join("washington.csv"), WASHINGTON_CSV).expect("write");
        tmp
    }

    fn run(dir: &TempDir, input: &str, presets: Presets) -> String {
        let mut output = Vec::new();
        {
            let prompter = Prompter::new(Cursor::new(input.as_bytes().to_vec()), &mut output);
            let mut session =
                Session::new(prompter, dir.path().to_path_buf(), 5).with_presets(presets);
            session.run().expect("run");
        }
        String::from_utf8(output).expect("utf8")
    }

    #[test]
    fn test_full_pass_all_months_all_days() {
        let dir = data_dir();
        let out = run(&dir, "chicago\nall\nall\nno\nno\n", Presets::default());

        assert!(out.contains("Exploring Chicago trips for all months, all days: 7 trips matched."));
        assert!(out.contains("Most Popular Month: January"));
        assert!(out.contains("Most Popular Start Hour: 09:00"));
        assert!(out.contains("Most Popular Start Station: Canal St & Adams St"));
        assert!(out.contains("Most Popular Route: Wells St & Elm St to Canal St & Adams St"));
        assert!(out.contains("Number of Each Gender Type:"));
        assert!(out.contains("Oldest User Born: 1970"));
        assert!(out.contains(RAW_RULE));
    }

    #[test]
    fn test_invalid_answers_reprompt() {
        let dir = data_dir();
        let out = run(
            &dir,
            "gotham\nchicago\njuly\njanuary\nfunday\nmonday\nno\nno\n",
            Presets::default(),
        );

        assert!(out.contains(prompt::CITY.invalid));
        assert!(out.contains(prompt::MONTH.invalid));
        assert!(out.contains(prompt::DAY.invalid));
        assert!(out.contains("Exploring Chicago trips for January, Monday: 2 trips matched."));
    }

    #[test]
    fn test_empty_selection_reported_not_crashing() {
        let dir = data_dir();
        let out = run(&dir, "chicago\njune\nall\nno\nno\n", Presets::default());

        assert!(out.contains("0 trips matched"));
        assert!(out.contains("No trips match the selected filters"));
        assert!(!out.contains("Most Popular Month"));
    }

    #[test]
    fn test_missing_columns_degrade_gracefully() {
        let dir = data_dir();
        let out = run(&dir, "washington\nall\nall\nno\nno\n", Presets::default());

        assert!(out.contains("Gender data isn't available for Washington."));
        assert!(out.contains("Birth year data isn't available for Washington."));
    }

    #[test]
    fn test_raw_pages_show_unfiltered_rows() {
        let dir = data_dir();
        // Filter to March, then page through all seven raw rows.
        let out = run(&dir, "chicago\nmarch\nall\nyes\nyes\nyes\nno\n", Presets::default());

        assert!(out.contains("2 trips matched"));
        assert!(out.contains("2017-01-02 08:10:00"));
        assert!(out.contains("2017-04-09 09:00:00"));
        assert!(out.contains("No more rows to show."));
    }

    #[test]
    fn test_restart_runs_another_pass() {
        let dir = data_dir();
        let out = run(
            &dir,
            "chicago\nall\nall\nno\nYES\nwashington\nall\nall\nno\nno\n",
            Presets::default(),
        );

        assert!(out.contains("Exploring Chicago trips"));
        assert!(out.contains("Exploring Washington trips"));
    }

    #[test]
    fn test_presets_answer_first_pass_only() {
        let dir = data_dir();
        let presets = Presets {
            city: Some(City::Chicago),
            month: Some(MonthFilter::Month(Month::January)),
            day: Some(DayFilter::All),
        };
        let out = run(&dir, "no\nyes\nwashington\nall\nall\nno\nno\n", presets);

        assert!(out.contains("Exploring Chicago trips for January, all days: 3 trips matched."));
        assert_eq!(out.matches(prompt::CITY.question).count(), 1);
        assert!(out.contains("Exploring Washington trips"));
    }

    #[test]
    fn test_missing_city_file_is_reported() {
        let dir = data_dir();
        let out = run(&dir, "new york city\nall\nall\nno\n", Presets::default());

        assert!(out.contains("Could not load New York City data: Failed to read file"));
    }

    #[test]
    fn test_end_of_input_exits_cleanly() {
        let dir = data_dir();
        let out = run(&dir, "", Presets::default());
        assert!(out.contains("Hello! Let's explore some US bikeshare data!"));
    }
}
