use crate::insights::InsightState;
use crate::library::library_view;
use crate::rewards::badge_board;
use crate::seed::Catalog;
use crate::stats::{compute_stats_at, in_progress_goals, IN_PROGRESS_LIMIT};
use crate::streak::{calculate_streak_at, is_completed_on};
use crate::tracker::Tracker;
use chrono::NaiveDate;
use std::fmt::Write;

pub fn render_index(
    today: NaiveDate,
    tracker: &Tracker,
    catalog: &Catalog,
    insights: &InsightState,
) -> String {
    let stats = compute_stats_at(today, &tracker.goals, &tracker.habits);

    fill(INDEX_HTML, |key| {
        let value = match key {
            "USER" => escape(&tracker.user.username),
            "DATE" => today.format("%A, %B %-d").to_string(),
            "ACTIVE" => stats.active_goals.to_string(),
            "COMPLETED" => stats.completed_goals.to_string(),
            "HABITS_TODAY" => format!("{} / {}", stats.habits_completed_today, stats.total_habits),
            "STREAK" => format!("{} days", stats.longest_streak),
            "POINTS" => tracker.user.points.to_string(),
            "IN_PROGRESS" => render_in_progress(tracker),
            "HABITS" => render_habits(today, tracker),
            "GOALS" => render_goals(tracker),
            "LIBRARY" => render_library(tracker, catalog),
            "BADGES" => render_badges(tracker, catalog),
            "INSIGHTS" => render_insights(insights),
            "PENDING" => insights.is_pending().to_string(),
            _ => return None,
        };
        Some(value)
    })
}

/// Substitutes `{{KEY}}` markers in one left-to-right pass. Substituted text is
/// never scanned again, so user or provider text that happens to contain a
/// marker is emitted as is. Unknown keys are left untouched.
fn fill(template: &str, lookup: impl Fn(&str) -> Option<String>) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(start) = rest.find("{{") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        let replaced = after
            .find("}}")
            .and_then(|end| lookup(&after[..end]).map(|value| (end, value)));
        match replaced {
            Some((end, value)) => {
                out.push_str(&value);
                rest = &after[end + 2..];
            }
            None => {
                out.push_str("{{");
                rest = after;
            }
        }
    }
    out.push_str(rest);
    out
}

fn render_in_progress(tracker: &Tracker) -> String {
    let goals = in_progress_goals(&tracker.goals, IN_PROGRESS_LIMIT);
    if goals.is_empty() {
        return r#"<p class="muted">No goals in progress. Time to start one!</p>"#.to_string();
    }
    let mut out = String::new();
    for view in goals {
        let _ = write!(
            out,
            r#"<div class="progress-row"><div class="row-head"><span>{}</span><span>{}%</span></div><div class="bar"><div style="width: {}%"></div></div></div>"#,
            escape(&view.goal.title),
            view.progress,
            view.progress
        );
    }
    out
}

fn render_habits(today: NaiveDate, tracker: &Tracker) -> String {
    let mut out = String::new();
    for habit in &tracker.habits {
        let done = is_completed_on(today, &habit.logs);
        let streak = calculate_streak_at(today, &habit.logs).current_streak;
        let _ = write!(
            out,
            r#"<li class="habit{}"><div><strong>{}</strong><small>{} · {} · streak {}</small></div><form method="post" action="/habits/{}/toggle"><button type="submit">{}</button></form></li>"#,
            if done { " done" } else { "" },
            escape(&habit.name),
            habit.frequency.label(),
            escape(&habit.reminder_time),
            streak,
            escape(&habit.id),
            if done { "Undo" } else { "Done today" }
        );
    }
    out
}

fn render_goals(tracker: &Tracker) -> String {
    let mut out = String::new();
    for goal in &tracker.goals {
        let _ = write!(
            out,
            r#"<article class="goal priority-{:?}"><header><h3>{}</h3><span class="tag">{}</span></header><p class="muted">{} · due {} · {}%</p><ul>"#,
            goal.priority,
            escape(&goal.title),
            goal.status.label(),
            escape(&goal.category),
            goal.due_date.format("%Y-%m-%d"),
            goal.progress()
        );
        for milestone in &goal.milestones {
            let _ = write!(
                out,
                r#"<li><form method="post" action="/goals/{}/milestones/{}/toggle"><button class="check{}" type="submit">{}</button></form>{}</li>"#,
                escape(&goal.id),
                escape(&milestone.id),
                if milestone.completed { " on" } else { "" },
                if milestone.completed { "✓" } else { "" },
                escape(&milestone.text)
            );
        }
        out.push_str("</ul></article>");
    }
    out
}

fn render_library(tracker: &Tracker, catalog: &Catalog) -> String {
    let library = library_view(catalog, tracker);
    let mut out = String::from("<h3>Goals</h3><ul>");
    for entry in &library.goals {
        library_row(
            &mut out,
            &format!("/library/goals/{}", entry.suggestion.id),
            &entry.suggestion.title,
            &entry.suggestion.category,
            &entry.suggestion.description,
            entry.added,
        );
    }
    out.push_str("</ul><h3>Habits</h3><ul>");
    for entry in &library.habits {
        library_row(
            &mut out,
            &format!("/library/habits/{}", entry.suggestion.id),
            &entry.suggestion.name,
            &entry.suggestion.category,
            &entry.suggestion.description,
            entry.added,
        );
    }
    out.push_str("</ul>");
    out
}

fn library_row(
    out: &mut String,
    action: &str,
    title: &str,
    category: &str,
    description: &str,
    added: bool,
) {
    let _ = write!(
        out,
        r#"<li class="suggestion"><div><strong>{}</strong> <span class="tag">{}</span><small>{}</small></div><form method="post" action="{}"><button type="submit"{}>{}</button></form></li>"#,
        escape(title),
        escape(category),
        escape(description),
        escape(action),
        if added { " disabled" } else { "" },
        if added { "Added" } else { "Add" }
    );
}

fn render_badges(tracker: &Tracker, catalog: &Catalog) -> String {
    let mut out = String::new();
    for status in badge_board(&tracker.user, &catalog.badges) {
        let _ = write!(
            out,
            r#"<div class="badge{}" title="{}"><span>{}</span>{}</div>"#,
            if status.earned { " earned" } else { "" },
            escape(&status.badge.description),
            status.badge.icon,
            escape(&status.badge.name)
        );
    }
    out
}

fn render_insights(insights: &InsightState) -> String {
    match insights {
        InsightState::Idle => {
            r#"<p class="muted">Ask for a quick analysis of your goals and habits.</p>"#.to_string()
        }
        InsightState::Pending => r#"<p class="muted">Analyzing…</p>"#.to_string(),
        InsightState::Failed { message } => format!(r#"<p class="error">{}</p>"#, escape(message)),
        InsightState::Ready { .. } => {
            let mut out = String::from("<ul>");
            for line in insights.lines() {
                let _ = write!(out, "<li>{}</li>", escape(line.trim_start_matches(['-', '*', '•', ' '])));
            }
            out.push_str("</ul>");
            out
        }
    }
}

fn escape(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>Habitboard</title>
  <style>
    :root {
      --bg: #111827;
      --surface: #1f2937;
      --ink: #f9fafb;
      --muted: #9ca3af;
      --accent: #6366f1;
      --ok: #22c55e;
      --warn: #f97316;
      --error: #f87171;
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      background: var(--bg);
      color: var(--ink);
      font-family: "Inter", "Segoe UI", sans-serif;
      padding: 32px 18px 48px;
    }

    main {
      width: min(1100px, 100%);
      margin: 0 auto;
      display: grid;
      gap: 24px;
    }

    h1, h2, h3 {
      margin: 0;
    }

    .muted {
      color: var(--muted);
    }

    .cards {
      display: grid;
      grid-template-columns: repeat(auto-fit, minmax(200px, 1fr));
      gap: 16px;
    }

    .card, section {
      background: var(--surface);
      border-radius: 14px;
      padding: 20px;
    }

    .card strong {
      display: block;
      font-size: 1.8rem;
      margin-top: 6px;
    }

    .grid {
      display: grid;
      grid-template-columns: repeat(auto-fit, minmax(320px, 1fr));
      gap: 24px;
    }

    .chart {
      display: flex;
      align-items: flex-end;
      gap: 10px;
      height: 180px;
      margin-top: 16px;
    }

    .chart div {
      flex: 1;
      display: flex;
      flex-direction: column;
      justify-content: flex-end;
      align-items: center;
      gap: 6px;
      height: 100%;
      font-size: 0.8rem;
      color: var(--muted);
    }

    .chart span.fill {
      width: 100%;
      background: var(--accent);
      border-radius: 6px 6px 0 0;
      min-height: 2px;
    }

    .bar {
      background: #374151;
      border-radius: 999px;
      height: 8px;
    }

    .bar div {
      background: var(--accent);
      border-radius: 999px;
      height: 8px;
    }

    .row-head {
      display: flex;
      justify-content: space-between;
      margin: 12px 0 6px;
    }

    ul {
      list-style: none;
      padding: 0;
      margin: 12px 0 0;
    }

    .habit {
      display: flex;
      justify-content: space-between;
      align-items: center;
      padding: 10px 0;
      border-bottom: 1px solid #374151;
    }

    .habit small {
      display: block;
      color: var(--muted);
    }

    .habit.done strong {
      color: var(--ok);
    }

    button {
      background: var(--accent);
      border: 0;
      color: var(--ink);
      border-radius: 8px;
      padding: 8px 12px;
      cursor: pointer;
    }

    .goal {
      border-left: 4px solid var(--ok);
      padding-left: 14px;
      margin-top: 16px;
    }

    .goal.priority-Medium {
      border-color: #eab308;
    }

    .goal.priority-High {
      border-color: var(--error);
    }

    .goal header {
      display: flex;
      justify-content: space-between;
    }

    .goal li {
      display: flex;
      align-items: center;
      gap: 8px;
      margin: 6px 0;
    }

    .check {
      width: 22px;
      height: 22px;
      padding: 0;
      background: #374151;
    }

    .check.on {
      background: var(--ok);
    }

    .tag {
      font-size: 0.75rem;
      background: #374151;
      border-radius: 999px;
      padding: 4px 10px;
    }

    .badges {
      display: grid;
      grid-template-columns: repeat(auto-fit, minmax(110px, 1fr));
      gap: 12px;
      margin-top: 12px;
    }

    .badge {
      text-align: center;
      opacity: 0.4;
      filter: grayscale(1);
    }

    .badge span {
      display: block;
      font-size: 2rem;
    }

    .badge.earned {
      opacity: 1;
      filter: none;
    }

    .suggestion small {
      display: block;
      color: var(--muted);
    }

    button:disabled {
      background: #374151;
      cursor: default;
    }

    .error {
      color: var(--error);
    }
  </style>
</head>
<body>
  <main>
    <header>
      <h1>Welcome back, {{USER}}!</h1>
      <p class="muted">{{DATE}} · here is a summary of your progress.</p>
    </header>

    <div class="cards">
      <div class="card">Active goals<strong>{{ACTIVE}}</strong></div>
      <div class="card">Completed goals<strong>{{COMPLETED}}</strong></div>
      <div class="card">Habits done today<strong>{{HABITS_TODAY}}</strong></div>
      <div class="card">Longest streak<strong>{{STREAK}}</strong></div>
    </div>

    <div class="grid">
      <section>
        <h2>Habit activity</h2>
        <p class="muted">Completed habits over the last 7 days.</p>
        <div class="chart" id="chart"></div>
      </section>
      <section>
        <h2>Goals in progress</h2>
        {{IN_PROGRESS}}
      </section>
    </div>

    <section>
      <h2>AI insights</h2>
      <div id="insights">{{INSIGHTS}}</div>
      <form method="post" action="/insights"><button type="submit">Generate analysis</button></form>
    </section>

    <div class="grid">
      <section>
        <h2>Habits</h2>
        <ul>{{HABITS}}</ul>
      </section>
      <section>
        <h2>Goals</h2>
        {{GOALS}}
      </section>
    </div>

    <section>
      <h2>Library</h2>
      <p class="muted">Suggested goals and habits to add to your lists.</p>
      <div class="library">{{LIBRARY}}</div>
    </section>

    <section>
      <h2>Rewards · {{POINTS}} points</h2>
      <div class="badges">{{BADGES}}</div>
    </section>
  </main>

  <script>
    const chartEl = document.getElementById('chart');
    let pending = {{PENDING}};

    const renderChart = (points) => {
      const max = Math.max(1, ...points.map((point) => point.count));
      chartEl.innerHTML = points
        .map((point) => `<div><span>${point.count}</span><span class="fill" style="height: ${(point.count / max) * 80}%"></span><span>${point.label}</span></div>`)
        .join('');
    };

    const loadStats = async () => {
      const res = await fetch('/api/stats');
      if (!res.ok) {
        throw new Error('Unable to load stats');
      }
      const data = await res.json();
      renderChart(data.recent_activity);
    };

    const pollInsights = async () => {
      const res = await fetch('/api/insights');
      if (!res.ok) {
        return;
      }
      const data = await res.json();
      if (data.status === 'pending') {
        setTimeout(pollInsights, 1000);
      } else {
        window.location.reload();
      }
    };

    loadStats().catch((err) => {
      chartEl.textContent = err.message;
    });

    if (pending) {
      setTimeout(pollInsights, 1000);
    }
  </script>
</body>
</html>
"#;
