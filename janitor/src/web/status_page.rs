//! HTML status page.
//!
//! Read-only: rendering never touches the database or starts a run, so the
//! page renders no matter how earlier runs ended.

use chrono::{DateTime, Utc};
use chrono_tz::Tz;

use crate::run_tracker::{ActiveRun, RunRecord};
use crate::web::AppState;

const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S %Z";

#[derive(Debug, Clone)]
pub struct StatusView {
    pub now: DateTime<Utc>,
    pub timezone: Tz,
    pub schedule: String,
    pub next_run: Option<DateTime<Utc>>,
    pub last_run: Option<RunRecord>,
    pub active_run: Option<ActiveRun>,
    pub paths: Vec<String>,
}

impl StatusView {
    pub async fn collect(state: &AppState) -> Self {
        let tracker = state.cleanup_service.tracker();

        Self {
            now: state.clock.now(),
            timezone: state.schedule.timezone(),
            schedule: state.schedule.schedule().to_string(),
            next_run: state.schedule.next_run().await,
            last_run: tracker.last_run(),
            active_run: tracker.active_run(),
            paths: state.cleanup_service.targets().to_vec(),
        }
    }

    fn local(&self, time: DateTime<Utc>) -> String {
        time.with_timezone(&self.timezone)
            .format(TIME_FORMAT)
            .to_string()
    }
}

pub fn render_status_page(view: &StatusView) -> String {
    let next_run = view
        .next_run
        .map(|t| view.local(t))
        .unwrap_or_else(|| "not scheduled".to_string());

    let last_run = match &view.last_run {
        Some(run) => {
            let outcome = if run.success { "succeeded" } else { "failed" };
            let mut line = format!("{} ({}, {})", view.local(run.finished_at), run.trigger, outcome);
            if let Some(error) = &run.error {
                line.push_str(&format!(": {}", error));
            }
            line
        }
        None => "not run yet".to_string(),
    };

    let in_progress = match &view.active_run {
        Some(run) => format!(
            "<p class=\"running\">A {} cleanup has been running since {}.</p>",
            run.trigger,
            escape_html(&view.local(run.started_at))
        ),
        None => String::new(),
    };

    let paths: String = view
        .paths
        .iter()
        .map(|p| format!("<li><code>{}</code></li>", escape_html(p)))
        .collect::<Vec<_>>()
        .join("\n          ");

    format!(
        r#"<!DOCTYPE html>
<html>
  <head>
    <meta charset="utf-8">
    <title>Game Data Cleanup</title>
    <style>
      body {{ font-family: Arial, sans-serif; padding: 20px; }}
      table {{ border-collapse: collapse; margin-bottom: 16px; }}
      th {{ text-align: left; padding-right: 16px; }}
      .running {{ color: #b06000; }}
      button {{
        background: #4285f4;
        color: white;
        border: none;
        padding: 10px 15px;
        border-radius: 4px;
        cursor: pointer;
        font-size: 16px;
      }}
    </style>
  </head>
  <body>
    <h1>Game Data Cleanup</h1>
    <table>
      <tr><th>Current time</th><td>{now}</td></tr>
      <tr><th>Schedule</th><td><code>{schedule}</code> ({timezone})</td></tr>
      <tr><th>Next run</th><td>{next_run}</td></tr>
      <tr><th>Last run</th><td>{last_run}</td></tr>
    </table>
    {in_progress}
    <p>Each run removes these database paths:</p>
    <ul>
          {paths}
    </ul>
    <button onclick="window.location.href='?trigger=manual'">
      Clear All Game Data Now
    </button>
  </body>
</html>
"#,
        now = escape_html(&view.local(view.now)),
        schedule = escape_html(&view.schedule),
        timezone = escape_html(view.timezone.name()),
        next_run = escape_html(&next_run),
        last_run = escape_html(&last_run),
        in_progress = in_progress,
        paths = paths,
    )
}

fn escape_html(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
