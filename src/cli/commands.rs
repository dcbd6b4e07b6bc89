//! CLI command implementations
//!
//! Every editing command opens the record file into a session, applies one
//! operation and saves. A save validates every row first, so a command that
//! would leave an invalid row behind changes nothing on disk.

use std::path::{Path, PathBuf};

use serde_json::{json, Value};

use crate::config::EditorConfig;
use crate::import::MemberSheet;
use crate::observability::{Event, Logger, Severity};
use crate::record::{Field, Record, LINE_WIDTH};
use crate::session::{Session, SessionError};
use crate::transfer::{transmit, Credentials, DirectoryUploader, TransferPlan, TransferTarget};
use crate::validation::Validator;

use super::args::{Cli, Command};
use super::errors::{CliError, CliResult};
use super::io::{write_error, write_response};

/// Parse arguments, run the command and print its JSON response
pub fn run() -> CliResult<()> {
    let cli = Cli::parse_args();
    let outcome = configure(&cli).and_then(|config| run_command(&config, cli.command));

    match outcome {
        Ok(data) => write_response(data),
        Err(e) => {
            write_error(e.code(), e.message())?;
            Err(e)
        }
    }
}

fn configure(cli: &Cli) -> CliResult<EditorConfig> {
    let severity = Severity::parse(&cli.log_level)
        .ok_or_else(|| CliError::invalid_argument(format!("Unknown log level: '{}'", cli.log_level)))?;
    Logger::set_min_severity(severity);
    Ok(EditorConfig::load_or_default(cli.config.as_deref())?)
}

/// Run the appropriate command based on CLI args
pub fn run_command(config: &EditorConfig, cmd: Command) -> CliResult<Value> {
    match cmd {
        Command::Show { file } => show(config, &file),
        Command::Validate { file } => validate(config, &file),
        Command::Fields => Ok(fields()),
        Command::Add { file, values } => add(config, file.as_deref(), &values),
        Command::Set {
            file,
            row,
            field,
            value,
        } => set(config, &file, row, &field, &value),
        Command::Duplicate { file, row } => duplicate(config, &file, row),
        Command::Delete { file, row } => delete(config, &file, row),
        Command::SetEffectiveDate { file, date } => set_effective_date(config, &file, &date),
        Command::Merge { file, from } => merge(config, &file, &from),
        Command::ImportMembers {
            file,
            sheet,
            select,
        } => import_members(config, file.as_deref(), &sheet, &select),
        Command::Transmit { file, drop_dir } => transmit_file(config, &file, &drop_dir),
    }
}

/// Rows of a record file, as read
pub fn show(config: &EditorConfig, file: &Path) -> CliResult<Value> {
    let session = Session::open_file(config, file)?;
    Ok(json!({
        "path": file.display().to_string(),
        "rows": session.rows(),
    }))
}

/// Validates every row; fails with the first invalid field
pub fn validate(config: &EditorConfig, file: &Path) -> CliResult<Value> {
    let session = Session::open_file(config, file)?;
    let validated = session.validated().map_err(|e| {
        let expected = session.validator().rule(e.field()).map_or("a value", |r| r.describe());
        CliError::new(e.code(), format!("{}; expected {}", e, expected))
    })?;
    Ok(json!({
        "path": file.display().to_string(),
        "valid": true,
        "rows": validated.len(),
    }))
}

/// Column layout, rules and per-field help text
pub fn fields() -> Value {
    let validator = Validator::new();
    let columns: Vec<Value> = Field::ALL
        .iter()
        .map(|&field| {
            json!({
                "name": field.name(),
                "offset": field.offset(),
                "width": field.width(),
                "rule": validator.rule(field).map(|r| r.describe()),
                "hint": field.hint(),
            })
        })
        .collect();
    json!({ "line_width": LINE_WIDTH, "fields": columns })
}

/// Appends a row built from `FIELD=VALUE` assignments
pub fn add(config: &EditorConfig, file: Option<&Path>, assignments: &[String]) -> CliResult<Value> {
    let values = assignments
        .iter()
        .map(|a| parse_assignment(a))
        .collect::<CliResult<Vec<_>>>()?;

    let (mut session, file) = open_or_new(config, file)?;

    let index = session.store_mut().add_row();
    for (field, value) in values {
        session.store_mut().set_field(index, field, value);
    }
    session.save_as(&file)?;

    Logger::info(Event::RowAdded, &[("row", (index + 1).to_string().as_str())]);
    row_response(&session, index)
}

/// Sets one field of one row
pub fn set(config: &EditorConfig, file: &Path, row: usize, field: &str, value: &str) -> CliResult<Value> {
    let field = parse_field(field)?;
    let mut session = Session::open_file(config, file)?;
    let index = row_index(&session, row)?;

    session.store_mut().set_field(index, field, value);
    session.save()?;

    Logger::info(
        Event::RowUpdated,
        &[("field", field.name()), ("row", row.to_string().as_str())],
    );
    row_response(&session, index)
}

/// Inserts a copy of a row below it with the configured overrides
pub fn duplicate(config: &EditorConfig, file: &Path, row: usize) -> CliResult<Value> {
    let mut session = Session::open_file(config, file)?;
    let index = row_index(&session, row)?;

    let copy = session
        .store_mut()
        .duplicate(index)
        .ok_or_else(|| out_of_range(row))?;
    session.save()?;

    Logger::info(
        Event::RowDuplicated,
        &[
            ("from", row.to_string().as_str()),
            ("row", (copy + 1).to_string().as_str()),
        ],
    );
    row_response(&session, copy)
}

/// Removes one row
pub fn delete(config: &EditorConfig, file: &Path, row: usize) -> CliResult<Value> {
    let mut session = Session::open_file(config, file)?;
    let index = row_index(&session, row)?;

    let removed: Record = session
        .store_mut()
        .delete(index)
        .ok_or_else(|| out_of_range(row))?;
    session.save()?;

    Logger::info(Event::RowDeleted, &[("row", row.to_string().as_str())]);
    Ok(json!({
        "removed": removed,
        "rows": session.rows().len(),
    }))
}

/// Applies one effective date to every row
pub fn set_effective_date(config: &EditorConfig, file: &Path, date: &str) -> CliResult<Value> {
    let mut session = Session::open_file(config, file)?;
    if !session.store_mut().set_effective_date(date) {
        return Err(CliError::invalid_argument(format!(
            "Effective date must be DD-MM-YYYY, got '{}'",
            date
        )));
    }
    session.save()?;

    let count = session.rows().len();
    Logger::info(
        Event::EffectiveDateApplied,
        &[("date", date), ("rows", count.to_string().as_str())],
    );
    Ok(json!({ "effective_date": date, "rows": count }))
}

/// Appends the rows of `from` to `file`
pub fn merge(config: &EditorConfig, file: &Path, from: &Path) -> CliResult<Value> {
    let mut session = Session::open_file(config, file)?;
    let added = session.merge_file(from)?;
    session.save()?;
    Ok(json!({ "added": added, "rows": session.rows().len() }))
}

/// Lists sheet members, or appends rows for the selected ones
///
/// Selections count member rows from 1, like rows everywhere else on the
/// command line.
pub fn import_members(
    config: &EditorConfig,
    file: Option<&Path>,
    sheet: &Path,
    select: &[usize],
) -> CliResult<Value> {
    let sheet = MemberSheet::load(sheet)?;
    if select.is_empty() {
        return Ok(json!({ "members": sheet.names() }));
    }

    let selection = select
        .iter()
        .map(|&n| {
            n.checked_sub(1)
                .ok_or_else(|| CliError::invalid_argument("Member numbers start at 1"))
        })
        .collect::<CliResult<Vec<_>>>()?;

    let (mut session, file) = open_or_new(config, file)?;
    let records = sheet.select(&selection, session.store().overrides())?;
    let imported = records.len();
    for record in records {
        session.store_mut().push(record);
    }
    session.save_as(&file)?;

    Logger::info(Event::MembersImported, &[("count", imported.to_string().as_str())]);
    Ok(json!({ "imported": imported, "rows": session.rows().len() }))
}

/// Saves the file, then delivers it under `drop_dir`
pub fn transmit_file(config: &EditorConfig, file: &Path, drop_dir: &Path) -> CliResult<Value> {
    let mut session = Session::open_file(config, file)?;
    let plan = TransferPlan::prepare(&mut session, None, TransferTarget::from_config(&config.transfer))?;
    let credentials = Credentials::from_config(&config.transfer);
    let uploader = DirectoryUploader::new(drop_dir);

    let receipt = transmit(&plan, &credentials, &uploader, &mut |sent: u64, total: u64| {
        Logger::trace(
            Event::TransferProgress,
            &[("sent", sent.to_string().as_str()), ("total", total.to_string().as_str())],
        );
    })?;
    Ok(serde_json::to_value(receipt)?)
}

/// Opens `file` if it exists, otherwise starts an empty session.
///
/// Without a file the configured default name is used.
fn open_or_new(config: &EditorConfig, file: Option<&Path>) -> CliResult<(Session, PathBuf)> {
    let session = Session::new(config);
    let file = file.map_or_else(|| PathBuf::from(session.default_filename()), Path::to_path_buf);
    if file.exists() {
        return Ok((Session::open_file(config, &file)?, file));
    }
    Ok((session, file))
}

fn parse_assignment(assignment: &str) -> CliResult<(Field, String)> {
    let (name, value) = assignment
        .split_once('=')
        .ok_or_else(|| CliError::invalid_argument(format!("Expected FIELD=VALUE, got '{}'", assignment)))?;
    Ok((parse_field(name.trim())?, value.to_string()))
}

fn parse_field(name: &str) -> CliResult<Field> {
    Field::from_name(name).ok_or_else(|| CliError::invalid_argument(format!("Unknown field: '{}'", name)))
}

/// Converts a 1-based row number to an index into the session rows
fn row_index(session: &Session, row: usize) -> CliResult<usize> {
    match row.checked_sub(1) {
        Some(index) if index < session.rows().len() => Ok(index),
        _ => Err(out_of_range(row)),
    }
}

fn out_of_range(row: usize) -> CliError {
    SessionError::RowOutOfRange(row).into()
}

fn row_response(session: &Session, index: usize) -> CliResult<Value> {
    Ok(json!({
        "row": index + 1,
        "record": session.rows().get(index),
        "rows": session.rows().len(),
    }))
}
