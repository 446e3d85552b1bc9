//! `discovery run`: the interactive read-eval loop over a diagnostic engine.
//!
//! Input and output are generic so the loop can be driven from memory in
//! tests. End of input quits from any prompt.

use std::io::{BufRead, Write};
use std::path::PathBuf;

use anyhow::Result;
use tracing::debug;

use discovery_core::{Activity, DiagnosticEngine, MAX_CONFIDENCE, Outcome};

use crate::export_cmd;
use crate::render;

/// What the user chose from a results or completion menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MenuChoice {
    Restart,
    Quit,
}

/// Interactive session state.
pub struct Session<R, W> {
    engine: DiagnosticEngine,
    input: R,
    out: W,
    export_dir: PathBuf,
    /// Every file written by the export action, oldest first.
    exported: Vec<PathBuf>,
}

impl<R: BufRead, W: Write> Session<R, W> {
    pub fn new(engine: DiagnosticEngine, input: R, out: W, export_dir: PathBuf) -> Self {
        Self {
            engine,
            input,
            out,
            export_dir,
            exported: Vec::new(),
        }
    }

    pub fn engine(&self) -> &DiagnosticEngine {
        &self.engine
    }

    pub fn exported(&self) -> &[PathBuf] {
        &self.exported
    }

    /// Run until the user quits or input ends.
    pub fn run(&mut self) -> Result<()> {
        loop {
            let Some(step) = self.engine.current_step().cloned() else {
                render::completed(&mut self.out, self.engine.steps().len())?;
                match self.completed_menu()? {
                    MenuChoice::Restart => {
                        self.engine.restart();
                        continue;
                    }
                    MenuChoice::Quit => return Ok(()),
                }
            };

            render::step_card(&mut self.out, &step, self.engine.steps().len())?;
            let Some(answer) = self.prompt("Answer (or ? for help): ")? else {
                return Ok(());
            };

            let outcome = if answer.trim() == "?" {
                self.engine.request_help()
            } else {
                let Some(raw) = self.prompt("Confidence 1-5 (or 'help'): ")? else {
                    return Ok(());
                };
                if is_help(&raw) {
                    self.engine.request_help()
                } else {
                    self.engine.submit_answer(&answer, parse_rating(&raw))
                }
            };

            match outcome {
                Outcome::Advanced(_) => {
                    render::summary(&mut self.out, self.engine.plan())?;
                }
                // The loop header renders completion.
                Outcome::Completed => {}
                Outcome::NeedsHelp {
                    step_title,
                    activities,
                } => {
                    render::results(&mut self.out, &step_title, &activities)?;
                    // A failure ends the run; only a restart resumes it.
                    match self.results_menu(&activities)? {
                        MenuChoice::Restart => self.engine.restart(),
                        MenuChoice::Quit => return Ok(()),
                    }
                }
            }
        }
    }

    fn results_menu(&mut self, activities: &[Activity]) -> Result<MenuChoice> {
        loop {
            let prompt = if activities.is_empty() {
                "[e]xport, [r]estart, [q]uit: "
            } else {
                "Number for details, [e]xport, [r]estart, [q]uit: "
            };
            let Some(line) = self.prompt(prompt)? else {
                return Ok(MenuChoice::Quit);
            };
            let choice = line.trim().to_lowercase();
            match choice.as_str() {
                "e" | "export" => self.export()?,
                "r" | "restart" => return Ok(MenuChoice::Restart),
                "q" | "quit" => return Ok(MenuChoice::Quit),
                other => match other
                    .parse::<usize>()
                    .ok()
                    .and_then(|n| n.checked_sub(1))
                    .and_then(|i| activities.get(i))
                {
                    Some(activity) => render::activity_details(&mut self.out, activity)?,
                    None => writeln!(self.out, "Unrecognized choice: {other:?}")?,
                },
            }
        }
    }

    fn completed_menu(&mut self) -> Result<MenuChoice> {
        loop {
            let Some(line) = self.prompt("[e]xport, [r]estart, [q]uit: ")? else {
                return Ok(MenuChoice::Quit);
            };
            let choice = line.trim().to_lowercase();
            match choice.as_str() {
                "e" | "export" => self.export()?,
                "r" | "restart" => return Ok(MenuChoice::Restart),
                "q" | "quit" => return Ok(MenuChoice::Quit),
                other => writeln!(self.out, "Unrecognized choice: {other:?}")?,
            }
        }
    }

    fn export(&mut self) -> Result<()> {
        let document = self.engine.export_plan();
        let path = export_cmd::write_plan_file(&self.export_dir, &document, chrono::Local::now())?;
        writeln!(self.out, "Plan exported to {}", path.display())?;
        self.exported.push(path);
        Ok(())
    }

    /// Print `label` and read one line. Returns `None` at end of input.
    fn prompt(&mut self, label: &str) -> Result<Option<String>> {
        write!(self.out, "{label}")?;
        self.out.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            debug!("end of input");
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }
}

/// Parse a confidence rating. Anything outside 1..=5 counts as absent.
pub fn parse_rating(raw: &str) -> Option<u8> {
    raw.trim()
        .parse::<u8>()
        .ok()
        .filter(|n| (1..=MAX_CONFIDENCE).contains(n))
}

fn is_help(raw: &str) -> bool {
    matches!(raw.trim().to_lowercase().as_str(), "help" | "h" | "?")
}
