use crate::app::render::{write_course, write_course_list};
use crate::core::{CatalogSession, CatalogSource, SettingsProvider};
use crate::utils::error::{CatalogError, Result};
use std::io::{BufRead, Write};

const MENU: &str = "\
|--------------------------
|- 1. Load Data Structure
|- 2. Print Course List
|- 3. Print Course
|- 9. Exit program
|--------------------------
|- Enter choice: ";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Choice {
    Load,
    PrintList,
    PrintCourse,
    Exit,
}

impl Choice {
    fn parse(input: &str) -> Option<Self> {
        match input.trim().parse::<u32>().ok()? {
            1 => Some(Self::Load),
            2 => Some(Self::PrintList),
            3 => Some(Self::PrintCourse),
            9 => Some(Self::Exit),
            _ => None,
        }
    }
}

/// Interactive text menu over a [`CatalogSession`].
///
/// Menus and results go to `output`. Recoverable errors and rejected rows
/// go to `errors` and the loop continues. An unopenable course file ends
/// the loop with the error so the caller can exit.
pub struct Menu<S, C, R, W, E>
where
    S: CatalogSource,
    C: SettingsProvider,
    R: BufRead,
    W: Write,
    E: Write,
{
    source: S,
    config: C,
    input: R,
    output: W,
    errors: E,
    session: CatalogSession,
}

impl<S, C, R, W, E> Menu<S, C, R, W, E>
where
    S: CatalogSource,
    C: SettingsProvider,
    R: BufRead,
    W: Write,
    E: Write,
{
    pub fn new(source: S, config: C, input: R, output: W, errors: E) -> Self {
        Self {
            source,
            config,
            input,
            output,
            errors,
            session: CatalogSession::new(),
        }
    }

    pub fn session(&self) -> &CatalogSession {
        &self.session
    }

    pub fn run(&mut self) -> Result<()> {
        loop {
            write!(self.output, "{}", MENU)?;
            self.output.flush()?;

            let Some(line) = self.read_line()? else {
                tracing::debug!("Input closed, leaving menu");
                return Ok(());
            };
            writeln!(self.output)?;

            let outcome = match Choice::parse(&line) {
                Some(Choice::Load) => self.load(),
                Some(Choice::PrintList) => self.print_list(),
                Some(Choice::PrintCourse) => self.print_course(),
                Some(Choice::Exit) => {
                    writeln!(self.output, "Thanks for using the program.")?;
                    return Ok(());
                }
                None => {
                    writeln!(self.output, "Invalid choice!\n")?;
                    Ok(())
                }
            };

            match outcome {
                Ok(()) => {}
                Err(e) if e.is_recoverable() => {
                    tracing::debug!("{} ({:?})", e, e.category());
                    writeln!(self.errors, "{}\n", e.user_friendly_message())?;
                }
                Err(e) => return Err(e),
            }
        }
    }

    fn read_line(&mut self) -> Result<Option<String>> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line))
    }

    fn load(&mut self) -> Result<()> {
        self.session.load(&self.source, &self.config)?;

        for row in self.session.rejected_rows()? {
            writeln!(
                self.errors,
                "ERROR: Row needs at least 2 values. Row {} not read!",
                row.line
            )?;
        }
        writeln!(self.output, "File loaded successfully.\n")?;
        Ok(())
    }

    fn print_list(&mut self) -> Result<()> {
        let courses = self.session.courses()?;
        write_course_list(&mut self.output, &courses)
    }

    fn print_course(&mut self) -> Result<()> {
        if !self.session.is_loaded() {
            return Err(CatalogError::NotLoaded);
        }

        write!(self.output, "|- Enter course ID (ex: CSCI100): ")?;
        self.output.flush()?;

        let Some(id) = self.read_line()? else {
            return Ok(());
        };
        writeln!(self.output)?;

        let course = self.session.lookup(&id)?;
        write_course(&mut self.output, &course)
    }
}
