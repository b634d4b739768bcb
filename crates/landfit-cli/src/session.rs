//! Interactive console session.
//!
//! Shows the ranked country list, asks which mode to run and which countries
//! to use, and prints the answer. Unknown country names are reported and
//! asked for again. End of input stops the session quietly.

use std::io::{self, BufRead, Write};

use landfit_core::utils::{format_area, format_list};
use landfit_core::{fit, times_fits, CountryAreaTable, FitResult, TableOrigin};
use tracing::debug;

/// Width of the banner and divider lines
const RULE_WIDTH: usize = 97;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Which other countries fit inside one country
    Fill,
    /// How many times one country fits into another
    Ratio,
}

impl Mode {
    /// Empty input picks the default mode
    fn parse(input: &str) -> Option<Self> {
        match input.trim() {
            "" | "1" => Some(Mode::Fill),
            "2" => Some(Mode::Ratio),
            _ => None,
        }
    }
}

pub struct Session<'a, R, W> {
    table: &'a CountryAreaTable,
    input: R,
    output: W,
}

impl<'a, R: BufRead, W: Write> Session<'a, R, W> {
    pub fn new(table: &'a CountryAreaTable, input: R, output: W) -> Self {
        Self {
            table,
            input,
            output,
        }
    }

    /// Run one question-and-answer cycle
    pub fn run(&mut self, origin: &TableOrigin) -> io::Result<()> {
        self.intro(origin)?;

        let Some(mode) = self.prompt_mode()? else {
            return self.end_of_input();
        };
        debug!(?mode, "Mode selected");

        match mode {
            Mode::Fill => {
                let Some(target) = self.prompt_country("Enter a country: ")? else {
                    return self.end_of_input();
                };
                self.run_fill(target)
            }
            Mode::Ratio => {
                let Some(container) = self.prompt_country("Enter a country: ")? else {
                    return self.end_of_input();
                };
                let Some(contained) = self.prompt_country("Enter a country to fit inside it: ")?
                else {
                    return self.end_of_input();
                };
                self.run_ratio(container, contained)
            }
        }
    }

    fn rule(&mut self, c: char) -> io::Result<()> {
        writeln!(self.output, "{}", c.to_string().repeat(RULE_WIDTH))
    }

    fn intro(&mut self, origin: &TableOrigin) -> io::Result<()> {
        self.rule('~')?;
        writeln!(
            self.output,
            "Countries ranked by land area in square kilometres, downloaded from the web."
        )?;
        match origin {
            TableOrigin::Cache { age } => {
                writeln!(self.output, "Using the saved copy of the list ({}).", age)?
            }
            TableOrigin::Fetched => writeln!(self.output, "The list was downloaded just now.")?,
        }
        writeln!(self.output, "There are two modes:")?;
        writeln!(
            self.output,
            "    1. Choose one country and see which other countries fit inside it,\n       taking the largest countries first."
        )?;
        writeln!(
            self.output,
            "    2. Choose two countries and see how many times the second one fits into the first."
        )?;
        writeln!(
            self.output,
            "Below are all {} countries to choose from, largest to smallest.",
            self.table.len()
        )?;
        self.rule('~')?;
        writeln!(self.output, "{}", format_list(self.table.names(), "(no countries)"))
    }

    fn end_of_input(&mut self) -> io::Result<()> {
        writeln!(self.output)?;
        debug!("Input closed before a question was answered");
        Ok(())
    }

    /// Prompt and read one line. `None` at end of input.
    fn read_line(&mut self, prompt: &str) -> io::Result<Option<String>> {
        write!(self.output, "{}", prompt)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    fn prompt_mode(&mut self) -> io::Result<Option<Mode>> {
        loop {
            let Some(answer) = self.read_line("\nChoose a mode, 1 or 2 [1]: ")? else {
                return Ok(None);
            };
            match Mode::parse(&answer) {
                Some(mode) => return Ok(Some(mode)),
                None => writeln!(self.output, "Please enter 1 or 2.")?,
            }
        }
    }

    /// Ask until the answer names a country in the table
    fn prompt_country(&mut self, prompt: &str) -> io::Result<Option<usize>> {
        loop {
            let Some(answer) = self.read_line(prompt)? else {
                return Ok(None);
            };
            match self.table.position(&answer) {
                Some(index) => return Ok(Some(index)),
                None => {
                    debug!(input = %answer, "Unknown country");
                    writeln!(
                        self.output,
                        "Sorry, {:?} is not in the list. Check the spelling and try again.",
                        answer
                    )?;
                }
            }
        }
    }

    fn run_fill(&mut self, target: usize) -> io::Result<()> {
        let Some(country) = self.table.get(target) else {
            return Ok(());
        };
        let (name, area) = (country.name.clone(), country.area);
        writeln!(self.output, "{} has an area of {} sq km.", name, format_area(area))?;

        let result = fit(area, self.table, Some(target));
        self.render_fill(&name, area, &result)
    }

    fn render_fill(&mut self, name: &str, area: f64, result: &FitResult) -> io::Result<()> {
        writeln!(self.output)?;
        self.rule('-')?;
        writeln!(
            self.output,
            "The number of countries that fit inside {} is {}.",
            name, result.count_of_matches
        )?;
        writeln!(self.output, "Those countries are:")?;
        writeln!(
            self.output,
            "{}",
            format_list(result.matched_countries.iter().map(String::as_str), "(none)")
        )?;
        writeln!(
            self.output,
            "Their total area is {} sq km, which is {} sq km short of {} ({} sq km).",
            format_area(result.total_area),
            format_area(result.remainder),
            name,
            format_area(area)
        )?;
        self.rule('-')
    }

    fn run_ratio(&mut self, container: usize, contained: usize) -> io::Result<()> {
        let (Some(outer), Some(inner)) = (self.table.get(container), self.table.get(contained))
        else {
            return Ok(());
        };
        let (outer, inner) = (outer.clone(), inner.clone());

        writeln!(self.output)?;
        self.rule('-')?;
        match times_fits(outer.area, inner.area) {
            Some(ratio) => writeln!(
                self.output,
                "{} ({} sq km) fits into {} ({} sq km) {} whole times ({:.2} exactly).",
                inner.name,
                format_area(inner.area),
                outer.name,
                format_area(outer.area),
                ratio.whole_times,
                ratio.times
            )?,
            None => writeln!(
                self.output,
                "{} has no measurable area, so it cannot be compared with {}.",
                inner.name, outer.name
            )?,
        }
        self.rule('-')
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use landfit_core::CountryArea;

    fn table() -> CountryAreaTable {
        CountryAreaTable::new(vec![
            CountryArea::new("Russia", 17_000_000.0),
            CountryArea::new("Canada", 9_985_000.0),
            CountryArea::new("USA", 9_834_000.0),
            CountryArea::new("Germany", 357_022.0),
            CountryArea::new("Holy See (Vatican City)", 0.0),
        ])
        .expect("valid table")
    }

    fn run_with(input: &str) -> String {
        let table = table();
        let mut output = Vec::new();
        Session::new(&table, input.as_bytes(), &mut output)
            .run(&TableOrigin::Fetched)
            .expect("session runs");
        String::from_utf8(output).expect("utf-8 output")
    }

    #[test]
    fn test_mode_parse() {
        assert_eq!(Mode::parse(""), Some(Mode::Fill));
        assert_eq!(Mode::parse(" 1 "), Some(Mode::Fill));
        assert_eq!(Mode::parse("2"), Some(Mode::Ratio));
        assert_eq!(Mode::parse("3"), None);
    }

    #[test]
    fn test_intro_lists_all_countries() {
        let output = run_with("");
        assert!(output.contains("Russia, Canada, USA, Germany, Holy See (Vatican City)"));
        assert!(output.contains("There are two modes:"));
    }

    #[test]
    fn test_fill_for_russia() {
        let output = run_with("1\nrussia\n");
        assert!(output.contains("Russia has an area of 17,000,000 sq km."));
        assert!(output.contains("The number of countries that fit inside Russia is 3."));
        assert!(output.contains("Canada, Germany, Holy See (Vatican City)"));
        assert!(output.contains("short of Russia"));
    }

    #[test]
    fn test_unknown_country_prompts_again() {
        let output = run_with("\nAtlantis\nCanada\n");
        assert!(output.contains("Sorry, \"Atlantis\" is not in the list."));
        assert_eq!(output.matches("Enter a country: ").count(), 2);
        assert!(output.contains("The number of countries that fit inside Canada is 2."));
    }

    #[test]
    fn test_unknown_country_then_end_of_input() {
        let output = run_with("1\nAtlantis\n");
        assert!(output.contains("Sorry, \"Atlantis\" is not in the list."));
        assert!(!output.contains("The number of countries"));
    }

    #[test]
    fn test_invalid_mode_prompts_again() {
        let output = run_with("7\n1\nGermany\n");
        assert!(output.contains("Please enter 1 or 2."));
        assert!(output.contains("The number of countries that fit inside Germany is 1."));
    }

    #[test]
    fn test_ratio_mode() {
        let output = run_with("2\nRussia\nGermany\n");
        assert!(output.contains("Germany (357,022 sq km) fits into Russia (17,000,000 sq km) 47 whole times"));
    }

    #[test]
    fn test_ratio_mode_with_zero_area() {
        let output = run_with("2\nRussia\nholy see (vatican city)\n");
        assert!(output.contains("Holy See (Vatican City) has no measurable area"));
    }
}
