//! Command-file driver for the per-user filter registry.
//!
//! Input is a stream of whitespace separated tokens:
//!
//! ```text
//! <label> <expectedItemCount>
//! <op> <user> <item>
//! ...
//! ```
//!
//! where `op` is `add` or `check`. Users and items are raw bytes, only the
//! header count and the operation have to be ASCII. Every `add` answers
//! `Ok`, every `check` answers `Probably` or `No`. The header itself is
//! acknowledged with a leading `Ok`, and answers are joined with `\n`.
use crate::cuckoo::{CuckooFilterConfig, Membership};
use crate::error::{CommandError, Result};
use crate::registry::FilterRegistry;
use std::{fmt, fs, path::Path};
use tracing::{debug, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Add,
    Check,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    pub op: Operation,
    pub user: Vec<u8>,
    pub item: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandFile {
    pub label: String,
    pub expected_items: usize,
    pub commands: Vec<Command>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Response {
    Ok,
    Probably,
    No,
}

impl Response {
    pub fn as_str(&self) -> &'static str {
        match self {
            Response::Ok => "Ok",
            Response::Probably => "Probably",
            Response::No => "No",
        }
    }
}

impl From<Membership> for Response {
    fn from(membership: Membership) -> Self {
        match membership {
            Membership::Probable => Response::Probably,
            Membership::Absent => Response::No,
        }
    }
}

impl fmt::Display for Response {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of running a command file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Report {
    pub responses: Vec<Response>,
    /// Adds abandoned because the user's filter was full
    pub exhausted: usize,
    pub users: usize,
    pub memory_bytes: usize,
}

impl Report {
    pub fn render(&self) -> String {
        std::iter::once(Response::Ok.as_str())
            .chain(self.responses.iter().map(Response::as_str))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Largest header count accepted. Each user's filter is allocated up front,
/// so this caps a single filter at 128 MiB of buckets.
pub const MAX_EXPECTED_ITEMS: usize = 1 << 24;

fn parse_item_count(token: &[u8]) -> Result<usize> {
    let invalid = |error: String| CommandError::InvalidItemCount {
        value: String::from_utf8_lossy(token).into_owned(),
        error,
    };
    let count = std::str::from_utf8(token)
        .map_err(|e| invalid(e.to_string()))?
        .parse::<usize>()
        .map_err(|e| invalid(e.to_string()))?;
    if count > MAX_EXPECTED_ITEMS {
        return Err(invalid(format!(
            "exceeds the maximum of {MAX_EXPECTED_ITEMS}"
        )));
    }
    Ok(count)
}

pub fn parse_commands(input: impl AsRef<[u8]>) -> Result<CommandFile> {
    let mut tokens = input
        .as_ref()
        .split(u8::is_ascii_whitespace)
        .filter(|token| !token.is_empty());

    let label = tokens.next().ok_or(CommandError::MissingHeader)?;
    let count = tokens.next().ok_or(CommandError::MissingHeader)?;
    let expected_items = parse_item_count(count)?;

    let rest: Vec<&[u8]> = tokens.collect();
    let mut commands = Vec::with_capacity(rest.len() / 3);

    for (idx, record) in rest.chunks(3).enumerate() {
        let [op, user, item] = record else {
            warn!(
                record = idx + 1,
                tokens = record.len(),
                "ignoring incomplete trailing record"
            );
            break;
        };
        let op = match *op {
            b"add" => Operation::Add,
            b"check" => Operation::Check,
            other => {
                return Err(CommandError::UnknownOperation {
                    record: idx + 1,
                    op: String::from_utf8_lossy(other).into_owned(),
                });
            }
        };
        commands.push(Command {
            op,
            user: user.to_vec(),
            item: item.to_vec(),
        });
    }

    Ok(CommandFile {
        label: String::from_utf8_lossy(label).into_owned(),
        expected_items,
        commands,
    })
}

/// Applies commands to a registry of per-user filters.
pub struct CommandProcessor {
    registry: FilterRegistry,
    exhausted: usize,
}

impl CommandProcessor {
    /// `template` supplies kick bound and seed, `expected_items` the sizing.
    pub fn new(
        template: CuckooFilterConfig,
        expected_items: usize,
    ) -> Result<Self> {
        let config = CuckooFilterConfig {
            expected_items,
            ..template
        };
        Ok(Self {
            registry: FilterRegistry::new(config)?,
            exhausted: 0,
        })
    }

    pub fn registry(&self) -> &FilterRegistry {
        &self.registry
    }

    pub fn execute(&mut self, command: &Command) -> Result<Response> {
        let item = command.item.as_slice();
        match command.op {
            Operation::Add => match self.registry.add(&command.user, item) {
                Ok(outcome) => {
                    if outcome.kicks() > 0 {
                        debug!(
                            user = %String::from_utf8_lossy(&command.user),
                            kicks = outcome.kicks(),
                            "add needed relocation"
                        );
                    }
                    Ok(Response::Ok)
                }
                Err(e) if e.is_exhausted() => {
                    warn!(
                        user = %String::from_utf8_lossy(&command.user),
                        item = %String::from_utf8_lossy(&command.item),
                        error = %e,
                        "add abandoned"
                    );
                    self.exhausted += 1;
                    Ok(Response::Ok)
                }
                Err(e) => Err(e.into()),
            },
            Operation::Check => {
                Ok(self.registry.check(&command.user, item).into())
            }
        }
    }

    pub fn run(mut self, file: &CommandFile) -> Result<Report> {
        let responses = file
            .commands
            .iter()
            .map(|command| self.execute(command))
            .collect::<Result<Vec<_>>>()?;

        Ok(Report {
            responses,
            exhausted: self.exhausted,
            users: self.registry.len(),
            memory_bytes: self.registry.approx_memory_bytes(),
        })
    }
}

pub fn run_commands(
    file: &CommandFile,
    template: CuckooFilterConfig,
) -> Result<Report> {
    CommandProcessor::new(template, file.expected_items)?.run(file)
}

/// Read `input`, run it, and write the rendered answers to `output`.
pub fn process_file(
    input: &Path,
    output: &Path,
    template: CuckooFilterConfig,
) -> Result<Report> {
    let bytes = fs::read(input)?;
    let file = parse_commands(&bytes)?;
    info!(
        label = %file.label,
        expected_items = file.expected_items,
        records = file.commands.len(),
        "parsed command file"
    );

    let report = run_commands(&file, template)?;
    fs::write(output, report.render())?;
    Ok(report)
}
