// CLI API module - the shared parse / validate / compute / print harness
use crate::error::CalcError;
use clap::error::ErrorKind;
use clap::{Arg, Args, Command, FromArgMatches, ValueEnum};
use serde::ser::Error as _;
use serde::{Serialize, Serializer};
use serde_json::value::RawValue;
use serde_json::Value;
use std::ffi::OsString;
use std::fmt;
use std::io::{self, Write};
use std::process::ExitCode;
use tracing::debug;
use tracing_subscriber::EnvFilter;

// Output format for results
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Json,
    Csv,
    Table,
}

/// A stateless numeric calculator driven by positional command-line arguments.
///
/// `validate` rejects inputs outside the calculator's domain; `compute` is
/// pure and must produce a fully populated record for any validated input.
pub trait Calculator {
    /// Binary name shown in usage text
    const NAME: &'static str;
    const ABOUT: &'static str;
    /// Worked example appended to the help text
    const EXAMPLE: &'static str;

    type Inputs: Args + fmt::Debug;
    type Output: Serialize + fmt::Debug;

    fn validate(inputs: &Self::Inputs) -> Result<(), CalcError>;

    fn compute(inputs: &Self::Inputs) -> Self::Output;
}

/// Serialize an `f64` as a JSON number with exactly two decimals.
///
/// Non-finite values have no JSON representation and fail serialization.
pub fn fixed2<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    if !value.is_finite() {
        return Err(S::Error::custom("result is not finite"));
    }
    let raw = RawValue::from_string(format!("{value:.2}")).map_err(S::Error::custom)?;
    raw.serialize(serializer)
}

/// Value parser for numeric arguments; `nan` and `inf` are rejected.
pub fn finite_f64(raw: &str) -> Result<f64, String> {
    let value: f64 = raw.parse().map_err(|e| format!("{e}"))?;
    if value.is_finite() {
        Ok(value)
    } else {
        Err("number must be finite".to_string())
    }
}

/// Install the stderr log subscriber. `RUST_LOG` overrides the `warn` default.
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn"));
    // A second init (tests) keeps the first subscriber
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .try_init();
}

/// Entry point for the calculator binaries.
pub fn run<C: Calculator>() -> ExitCode {
    init_logging();
    let mut out = io::stdout();
    let mut err = io::stderr();
    ExitCode::from(run_with::<C>(std::env::args_os(), &mut out, &mut err))
}

/// Run one invocation of `C` against `args` (program name first).
///
/// Returns the process exit code: 0 on success or help, 1 otherwise. On
/// failure a one-line diagnostic and the full usage text go to `err` and
/// nothing is written to `out`.
pub fn run_with<C: Calculator>(
    args: impl IntoIterator<Item = impl Into<OsString> + Clone>,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> u8 {
    let mut cmd = command::<C>();
    match evaluate::<C>(&mut cmd, args, out) {
        Ok(()) => 0,
        Err(e) => {
            debug!(calculator = C::NAME, error = ?e, "invocation failed");
            // Nothing useful is left to do if stderr itself is gone
            let _ = writeln!(err, "Error: {e}");
            let _ = writeln!(err);
            let _ = write!(err, "{}", cmd.render_help());
            1
        }
    }
}

/// Render a result record in the requested format, newline terminated.
pub fn render<T: Serialize>(output: &T, format: OutputFormat) -> Result<String, CalcError> {
    let text = match format {
        OutputFormat::Json => {
            let mut json = serde_json::to_string_pretty(output)?;
            json.push('\n');
            json
        }
        OutputFormat::Csv => {
            let mut csv = String::from("field,value\n");
            for (name, value) in fields(output)? {
                csv.push_str(&format!("{name},{value}\n"));
            }
            csv
        }
        OutputFormat::Table => table(&fields(output)?),
    };
    Ok(text)
}

fn command<C: Calculator>() -> Command {
    let cmd = Command::new(C::NAME)
        .version(env!("CARGO_PKG_VERSION"))
        .after_help(C::EXAMPLE)
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .value_name("FORMAT")
                .help("Output format")
                .value_parser(clap::value_parser!(OutputFormat))
                .default_value("json"),
        );
    // The derive sets `about` from the input struct docs, so override it last
    C::Inputs::augment_args(cmd)
        .about(C::ABOUT)
        .long_about(None::<&'static str>)
}

/// Spell out a leading zero on negative numbers such as `-.5`.
///
/// Clap only reads a token as a negative number when a digit follows the
/// dash; anything else starting with `-` is taken for a flag.
fn numeric_argument(arg: OsString) -> OsString {
    match arg.to_str() {
        Some(text) if text.starts_with("-.") && finite_f64(text).is_ok() => {
            OsString::from(format!("-0{}", &text[1..]))
        }
        _ => arg,
    }
}

fn evaluate<C: Calculator>(
    cmd: &mut Command,
    args: impl IntoIterator<Item = impl Into<OsString> + Clone>,
    out: &mut dyn Write,
) -> Result<(), CalcError> {
    let args = args.into_iter().map(|arg| numeric_argument(arg.into()));
    let matches = match cmd.try_get_matches_from_mut(args) {
        Ok(matches) => matches,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            write!(out, "{}", e.render())?;
            return Ok(());
        }
        Err(e) => return Err(usage_error(&e)),
    };

    let inputs = C::Inputs::from_arg_matches(&matches)
        .map_err(|e| usage_error(&e))?;
    let format = matches
        .get_one::<OutputFormat>("output")
        .copied()
        .unwrap_or_default();
    debug!(calculator = C::NAME, ?inputs, ?format, "parsed inputs");

    C::validate(&inputs)?;
    let output = C::compute(&inputs);
    debug!(calculator = C::NAME, ?output, "computed");

    // Render fully before writing so a failure leaves stdout empty
    let text = render(&output, format)?;
    out.write_all(text.as_bytes())?;
    out.flush()?;
    Ok(())
}

/// Collapse clap's multi-line message into a single diagnostic line.
fn usage_error(e: &clap::Error) -> CalcError {
    let rendered = e.render().to_string();
    let message = rendered
        .split("\n\n")
        .next()
        .unwrap_or_default()
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join(" ");
    let message = message.strip_prefix("error: ").unwrap_or(&message);
    CalcError::Usage(message.to_string())
}

fn fields<T: Serialize>(output: &T) -> Result<Vec<(String, String)>, CalcError> {
    let fields = match serde_json::to_value(output)? {
        Value::Object(map) => map
            .into_iter()
            .map(|(name, value)| (name, display(&value)))
            .collect(),
        other => vec![("value".to_string(), display(&other))],
    };
    Ok(fields)
}

fn display(value: &Value) -> String {
    match value {
        Value::Number(n) => n
            .as_f64()
            .map_or_else(|| n.to_string(), |f| format!("{f:.2}")),
        other => other.to_string(),
    }
}

fn table(fields: &[(String, String)]) -> String {
    let name_w = fields
        .iter()
        .map(|(name, _)| name.chars().count())
        .max()
        .unwrap_or(0);
    let value_w = fields
        .iter()
        .map(|(_, value)| value.chars().count())
        .max()
        .unwrap_or(0);
    let bar = |left: &str, mid: &str, right: &str| {
        let name_bar = "═".repeat(name_w + 2);
        let value_bar = "═".repeat(value_w + 2);
        format!("{left}{name_bar}{mid}{value_bar}{right}\n")
    };

    let mut text = bar("╔", "╤", "╗");
    for (name, value) in fields {
        text.push_str(&format!("║ {name:<name_w$} │ {value:>value_w$} ║\n"));
    }
    text.push_str(&bar("╚", "╧", "╝"));
    text
}
