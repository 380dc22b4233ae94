use anyhow::Result;
use dclscraper::{error::ParseError, export, fetch, parse};
use std::{fs, io, path::Path, path::PathBuf, time::Duration};
use tokio::time::{sleep, Instant};
use tracing::{error, info};
use tracing_subscriber::{fmt, EnvFilter};

const OUT_DIR: &str = "output";
const REQUEST_DELAY: Duration = Duration::from_millis(200);

#[derive(Debug, Clone, Copy)]
struct Options {
    help: bool,
    flush: bool,
    flush_only: bool,
    date_range_only: bool,
    show_detail: bool,
    json: bool,
    csv: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            help: false,
            flush: false,
            flush_only: false,
            date_range_only: false,
            show_detail: true,
            json: false,
            csv: true,
        }
    }
}

fn parse_args() -> Options {
    let mut opts = Options::default();
    for arg in std::env::args().skip(1) {
        match arg.as_str() {
            "--help" => opts.help = true,
            "--flush" => opts.flush = true,
            "--flush-only" => opts.flush_only = true,
            "--date-range-only" => opts.date_range_only = true,
            "--show-detail" => opts.show_detail = true,
            "--hide-detail" => opts.show_detail = false,
            "--json" => opts.json = true,
            "--no-json" => opts.json = false,
            "--csv" => opts.csv = true,
            "--no-csv" => opts.csv = false,
            other => eprintln!("unknown flag {other} (see --help)"),
        }
    }
    opts
}

fn print_help() {
    println!("[USAGE] dclscraper");
    println!();
    println!("dclscraper --help            this message");
    println!("dclscraper <option>");
    println!();
    println!("<option>:");
    println!("  --flush            flush the output dir before any action");
    println!("  --flush-only       only flush the output dir, no further actions");
    println!("  --date-range-only  print the available date range and exit");
    println!("  --json             also write the structured JSON dump");
    println!("  --no-json          skip the JSON dump (default)");
    println!("  --csv              write the tabular CSV (default)");
    println!("  --no-csv           skip the CSV");
    println!("  --show-detail      log each date/court pair (default)");
    println!("  --hide-detail      only log the final tally");
}

#[derive(Debug, Default)]
struct Stats {
    total: u32,
    ok: u32,
    failure: u32,
    notimpl: u32,
}

/// Cumulative request pacing: each wait adds the step to a running total and
/// sleeps for the total, so pacing stretches as the run grows.
#[derive(Debug)]
struct RateLimiter {
    step: Duration,
    total: Duration,
}

impl RateLimiter {
    fn new(step: Duration) -> Self {
        Self {
            step,
            total: Duration::ZERO,
        }
    }

    async fn wait(&mut self) {
        if self.step.is_zero() {
            return;
        }
        self.total += self.step;
        sleep(self.total).await;
    }
}

enum Outcome {
    Done,
    NotImplemented,
    Failed(String),
}

/// Fetch, parse and write one date/court pair. Never fatal: every failure
/// collapses into an outcome for the tally.
async fn process_one(
    client: &reqwest::Client,
    date_code: &str,
    court_code: &str,
    opts: &Options,
    out_dir: &Path,
) -> Outcome {
    let html = match fetch::causes_page(client, date_code, court_code).await {
        Ok(html) => html,
        Err(e) => return Outcome::Failed(format!("{e:#}")),
    };

    let mut result = match parse::parse_causes(&html, court_code) {
        Ok(result) => result,
        Err(ParseError::UnsupportedLayout(_)) => return Outcome::NotImplemented,
        Err(e) => return Outcome::Failed(e.to_string()),
    };
    result.annotate(date_code, court_code, &fetch::causes_url(date_code, court_code));

    if opts.json {
        if let Err(e) = export::json::write_json(&result, out_dir) {
            return Outcome::Failed(format!("{e:#}"));
        }
    }
    if opts.csv {
        if let Err(e) = export::csv::write_csv(&result, out_dir) {
            return Outcome::Failed(format!("{e:#}"));
        }
    }
    Outcome::Done
}

fn flush_output(out_dir: &Path) -> Result<()> {
    info!("flushing {}", out_dir.display());
    match fs::remove_dir_all(out_dir) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e.into()),
    }
}

fn pad_right(s: &str, width: usize) -> String {
    let s = s.trim();
    if s.len() < width {
        format!("{s}{}", " ".repeat(width - s.len()))
    } else {
        s.to_string()
    }
}

fn format_elapsed(elapsed: Duration) -> String {
    if elapsed < Duration::from_secs(1) {
        format!("{} ms", elapsed.as_millis())
    } else {
        format!("{} s", elapsed.as_secs())
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder().with_env_filter(env).init();

    let opts = parse_args();
    if opts.help {
        print_help();
        return Ok(());
    }

    let out_dir = PathBuf::from(OUT_DIR);
    if opts.flush || opts.flush_only {
        flush_output(&out_dir)?;
        if opts.flush_only {
            return Ok(());
        }
    }
    fs::create_dir_all(&out_dir)?;

    let client = fetch::client()?;
    let start = Instant::now();

    info!("loading available date-range from the source server");
    let date_range = fetch::date_range(&client).await?;
    if opts.date_range_only {
        info!(?date_range, "available date-range");
        return Ok(());
    }
    if opts.show_detail {
        info!(?date_range, "available date-range");
    }

    let mut stats = Stats::default();
    let mut limiter = RateLimiter::new(REQUEST_DELAY);

    for date_code in &date_range {
        limiter.wait().await;
        let courts = match fetch::avail_courts(&client, date_code).await {
            Ok(courts) => courts,
            Err(e) => {
                error!(date = %date_code, "court list failed: {e:#}");
                continue;
            }
        };

        for court in courts {
            stats.total += 1;
            limiter.wait().await;
            let tag = pad_right(&court.code, 7);
            match process_one(&client, date_code, &court.code, &opts, &out_dir).await {
                Outcome::Done => {
                    stats.ok += 1;
                    if opts.show_detail {
                        info!("processing {date_code} {tag} ☑︎");
                    }
                }
                Outcome::NotImplemented => {
                    stats.notimpl += 1;
                    if opts.show_detail {
                        info!("processing {date_code} {tag} not-implemented");
                    }
                }
                Outcome::Failed(reason) => {
                    stats.failure += 1;
                    if opts.show_detail {
                        error!("processing {date_code} {tag} {reason}");
                    }
                }
            }
        }
    }

    info!(
        total = stats.total,
        ok = stats.ok,
        failure = stats.failure,
        notimpl = stats.notimpl,
        elapsed = %format_elapsed(start.elapsed()),
        "completed"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pad_right_pads_short_codes_only() {
        assert_eq!(pad_right("DC", 7), "DC     ");
        assert_eq!(pad_right(" KTMAG ", 7), "KTMAG  ");
        assert_eq!(pad_right("LONGCODE", 7), "LONGCODE");
    }

    #[test]
    fn elapsed_under_a_second_reports_millis() {
        assert_eq!(format_elapsed(Duration::from_millis(450)), "450 ms");
        assert_eq!(format_elapsed(Duration::from_millis(2300)), "2 s");
    }
}
