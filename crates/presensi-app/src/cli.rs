//! Command line parsing for `presensi-generate`.

use anyhow::{Context, Result, anyhow, bail};
use presensi_db::db::enums::AttendanceStatus;
use presensi_service::generator::GenerateOptions;
use uuid::Uuid;

pub const USAGE: &str = "\
usage: presensi-generate <schedule-id> [options]

options:
  --tenant ID                 reject schedules of any other tenant
  --timezone TZ               IANA timezone of the rule times
  --csst ID                   default teaching assignment
  --room ID                   room for every session
  --teacher ID                teacher for every session
  --session-type ID           session type instead of the tenant default
  --attendance-status STATUS  open | closed
  --title TEXT                title for every session
  --batch-size N              rows per insert statement
  --dry-run                   print the sessions without inserting them";

#[derive(Debug)]
pub struct Command {
    pub schedule_id: Uuid,
    pub options: GenerateOptions,
    pub dry_run: bool,
}

/// ## Summary
/// Parses the arguments following the program name.
///
/// ## Errors
/// Returns an error naming the offending argument if the command line is invalid.
pub fn parse_args<I>(args: I) -> Result<Command>
where
    I: IntoIterator<Item = String>,
{
    let mut args = args.into_iter();
    let mut schedule_id = None;
    let mut options = GenerateOptions::default();
    let mut dry_run = false;

    while let Some(arg) = args.next() {
        let mut value = || {
            args.next()
                .ok_or_else(|| anyhow!("missing value for {arg}"))
        };
        match arg.as_str() {
            "--tenant" => options.tenant_id = Some(parse_id(&value()?)?),
            "--timezone" => options.timezone = Some(value()?),
            "--csst" => options.default_csst_id = Some(parse_id(&value()?)?),
            "--room" => options.default_room_id = Some(parse_id(&value()?)?),
            "--teacher" => options.default_teacher_id = Some(parse_id(&value()?)?),
            "--session-type" => options.default_session_type_id = Some(parse_id(&value()?)?),
            "--attendance-status" => {
                options.default_attendance_status = Some(value()?.parse::<AttendanceStatus>()?);
            }
            "--title" => options.default_title = Some(value()?),
            "--batch-size" => {
                let raw = value()?;
                options.batch_size = Some(
                    raw.parse()
                        .with_context(|| format!("invalid batch size: {raw}"))?,
                );
            }
            "--dry-run" => dry_run = true,
            flag if flag.starts_with("--") => bail!("unknown option: {flag}"),
            positional => {
                if schedule_id.is_some() {
                    bail!("unexpected argument: {positional}");
                }
                schedule_id = Some(parse_id(positional)?);
            }
        }
    }

    Ok(Command {
        schedule_id: schedule_id.ok_or_else(|| anyhow!("missing schedule id"))?,
        options,
        dry_run,
    })
}

fn parse_id(raw: &str) -> Result<Uuid> {
    Uuid::parse_str(raw).with_context(|| format!("invalid id: {raw}"))
}
