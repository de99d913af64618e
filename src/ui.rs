use crate::calendar::Calendar;
use crate::emoji::EmojiTable;
use crate::models::{Task, TaskList, TaskStatus};
use crate::session::Session;
use std::fmt::Write;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthView {
    Login,
    Register,
}

impl AuthView {
    pub fn from_query(view: Option<&str>) -> Self {
        match view {
            Some("register") => AuthView::Register,
            _ => AuthView::Login,
        }
    }
}

pub fn render_auth(view: AuthView, message: Option<&str>) -> String {
    let (title, action, toggle) = match view {
        AuthView::Login => (
            "Login",
            "/login",
            r#"Don't have an account? <a href="/?view=register">Register here.</a>"#,
        ),
        AuthView::Register => (
            "Register",
            "/register",
            r#"Already have an account? <a href="/">Login here.</a>"#,
        ),
    };

    fill(
        AUTH_HTML,
        &[
            ("STYLE", STYLE),
            ("TITLE", title),
            ("ACTION", action),
            ("MESSAGE", &render_message(message)),
            ("TOGGLE", toggle),
        ],
    )
}

pub fn render_index(
    session: &Session,
    calendar: &Calendar,
    emoji: &EmojiTable,
    message: Option<&str>,
) -> String {
    let username = session.username.as_deref().unwrap_or_default();
    fill(
        INDEX_HTML,
        &[
            ("STYLE", STYLE),
            ("USERNAME", &escape_html(username)),
            ("MESSAGE", &render_message(message)),
            ("DAILY", &render_tasks(session.list(TaskList::Daily), TaskList::Daily, emoji)),
            ("TODAY", &render_tasks(session.list(TaskList::Today), TaskList::Today, emoji)),
            ("CALENDAR", &render_calendar(calendar)),
        ],
    )
}

/// Substitutes `{{KEY}}` markers in one pass over `template`. Inserted values are
/// never scanned again, so user text that looks like a marker stays literal.
fn fill(template: &str, values: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(open) = rest.find("{{") {
        out.push_str(&rest[..open]);
        let after = &rest[open + 2..];
        let Some(close) = after.find("}}") else {
            rest = &rest[open..];
            break;
        };
        let key = &after[..close];
        match values.iter().find(|(name, _)| *name == key) {
            Some((_, value)) => out.push_str(value),
            None => out.push_str(&rest[open..open + 2 + close + 2]),
        }
        rest = &after[close + 2..];
    }
    out.push_str(rest);
    out
}

fn render_message(message: Option<&str>) -> String {
    match message {
        Some(message) => format!(r#"<p class="message">{}</p>"#, escape_html(message)),
        None => String::new(),
    }
}

fn render_tasks(tasks: &[Task], list: TaskList, emoji: &EmojiTable) -> String {
    if tasks.is_empty() {
        return r#"<p class="no-tasks">No tasks yet.</p>"#.to_string();
    }

    let (move_label, move_title) = match list {
        TaskList::Daily => ("➡️ Today", "Move to Today's Tasks"),
        TaskList::Today => ("⬅️ Daily", "Move to Daily Tasks"),
    };

    let mut html = String::from(r#"<ul class="todo-list">"#);
    for task in tasks {
        let id = escape_html(&urlencoding::encode(&task.id));
        let _ = write!(
            html,
            r#"<li class="todo-item status-{status}"><span class="task-text">{emoji} {text}</span>"#,
            status = task.status,
            emoji = emoji.emoji_for(&task.text),
            text = escape_html(&task.text),
        );

        let _ = write!(html, r#"<form class="status-controls" method="post" action="/tasks/{id}/status">"#);
        for status in TaskStatus::ALL {
            let active = if status == task.status { " active" } else { "" };
            let _ = write!(
                html,
                r#"<button class="status-btn{active}" type="submit" name="status" value="{value}">{label}</button>"#,
                value = status.as_str(),
                label = status.label(),
            );
        }
        html.push_str("</form>");

        let _ = write!(
            html,
            r#"<div class="task-actions"><form method="post" action="/tasks/{id}/move"><button class="move-button" type="submit" title="{move_title}">{move_label}</button></form><form method="post" action="/tasks/{id}/delete"><button class="delete-button" type="submit">Delete</button></form></div></li>"#
        );
    }
    html.push_str("</ul>");
    html
}

fn render_calendar(calendar: &Calendar) -> String {
    let mut html = String::from(r#"<div class="calendar-month-names-row">"#);
    for month in &calendar.months {
        let _ = write!(
            html,
            r#"<div class="calendar-month-name" style="grid-column-start: {}">{}</div>"#,
            month.grid_column_start, month.name
        );
    }
    html.push_str(r#"</div><div class="calendar-days-grid">"#);

    for day in &calendar.days {
        let (class, title) = if day.is_completed {
            ("completed-day", format!("Completed on {}", day.date))
        } else {
            ("no-activity-day", format!("No activity on {}", day.date))
        };
        let today = if day.is_today { " today-day" } else { "" };
        let _ = write!(
            html,
            r#"<div class="calendar-day {class}{today}" title="{title}" style="grid-row-start: {}"></div>"#,
            day.day_of_week + 1
        );
    }
    html.push_str("</div>");
    html
}

fn escape_html(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

const STYLE: &str = r#"
    @import url('https://fonts.googleapis.com/css2?family=Space+Grotesk:wght@400;500;600&family=Fraunces:wght@600&display=swap');

    :root {
      --bg: #f4f1ea;
      --ink: #25282b;
      --muted: #6b6862;
      --accent: #3c7a5a;
      --card: rgba(255, 255, 255, 0.9);
      --cell: #e3e0d8;
      --cell-done: #3c9a5f;
    }

    * { box-sizing: border-box; }

    body {
      margin: 0;
      min-height: 100vh;
      background: linear-gradient(160deg, var(--bg), #e9efe6);
      color: var(--ink);
      font-family: "Space Grotesk", "Trebuchet MS", sans-serif;
      padding: 32px 18px 48px;
    }

    .app-container {
      width: min(980px, 100%);
      margin: 0 auto;
      background: var(--card);
      border-radius: 24px;
      box-shadow: 0 20px 50px rgba(37, 40, 43, 0.12);
      padding: 32px;
      display: grid;
      gap: 24px;
    }

    h1, h2, h3 { font-family: "Fraunces", Georgia, serif; margin: 0; }

    .app-header { display: flex; align-items: center; gap: 16px; flex-wrap: wrap; }
    .app-header p { margin: 0; color: var(--muted); flex: 1; }

    .message { margin: 0; padding: 10px 14px; border-radius: 12px; background: #fff4d6; }

    button {
      font: inherit;
      border: 0;
      border-radius: 10px;
      padding: 6px 12px;
      cursor: pointer;
      background: #ebe8e1;
    }

    .todo-input-form { display: grid; grid-template-columns: 1fr auto auto; gap: 8px; }
    .todo-input, .auth-form-container input {
      font: inherit;
      padding: 10px 12px;
      border-radius: 10px;
      border: 1px solid #d6d2c8;
    }
    .add-button { background: var(--accent); color: white; }
    .suggestion-box { grid-column: 1 / -1; color: var(--muted); }
    .suggestion-text { background: none; padding: 0; color: var(--accent); text-decoration: underline; }

    .task-columns { display: grid; grid-template-columns: repeat(auto-fit, minmax(320px, 1fr)); gap: 24px; }
    .todo-list { list-style: none; padding: 0; margin: 12px 0; display: grid; gap: 10px; }
    .todo-item { display: grid; gap: 6px; padding: 12px; border-radius: 14px; background: white; }
    .todo-item.status-done .task-text { text-decoration: line-through; color: var(--muted); }
    .status-controls, .task-actions { display: flex; gap: 6px; flex-wrap: wrap; }
    .status-btn.active { background: var(--accent); color: white; }
    .delete-button { background: #f6d5cf; }
    .no-tasks { color: var(--muted); }

    .daily-calendar-container { display: grid; gap: 8px; }
    .calendar-main-grid { overflow-x: auto; padding-bottom: 6px; }
    .calendar-month-names-row, .calendar-days-grid {
      display: grid;
      grid-auto-columns: 14px;
      column-gap: 3px;
    }
    .calendar-month-names-row { font-size: 0.7rem; color: var(--muted); height: 16px; }
    .calendar-days-grid { grid-template-rows: repeat(7, 14px); grid-auto-flow: column; row-gap: 3px; }
    .calendar-day { width: 14px; height: 14px; border-radius: 3px; background: var(--cell); }
    .completed-day { background: var(--cell-done); }
    .today-day { outline: 2px solid var(--ink); }

    .auth-form-container { width: min(380px, 100%); margin: 0 auto; display: grid; gap: 12px; }
    .auth-form-container form { display: grid; gap: 10px; }
    .toggle-auth { color: var(--muted); }
"#;

const AUTH_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>To-Do · {{TITLE}}</title>
  <style>{{STYLE}}</style>
</head>
<body>
  <main class="app-container auth-page">
    <div class="auth-form-container">
      <h2>{{TITLE}}</h2>
      <form method="post" action="{{ACTION}}">
        <input type="text" name="username" placeholder="Username" required />
        <input type="password" name="password" placeholder="Password" required />
        <button class="add-button" type="submit">{{TITLE}}</button>
      </form>
      {{MESSAGE}}
      <p class="toggle-auth">{{TOGGLE}}</p>
    </div>
  </main>
</body>
</html>
"#;

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>My Categorized To-Do List</title>
  <style>{{STYLE}}</style>
</head>
<body>
  <main class="app-container">
    <header class="app-header">
      <h1>My Categorized To-Do List</h1>
      <p>Welcome, {{USERNAME}}!</p>
      <form method="post" action="/logout">
        <button class="logout-button" type="submit">Logout</button>
      </form>
    </header>
    {{MESSAGE}}

    <form class="todo-input-form" method="post" action="/tasks" autocomplete="off">
      <input id="task-input" class="todo-input" type="text" name="text" placeholder="Add a new task..." />
      <button class="add-button" type="submit" name="list" value="daily">Add Daily</button>
      <button class="add-button" type="submit" name="list" value="today">Add Today</button>
      <div id="suggestion-box" class="suggestion-box" hidden>
        Did you mean: <button id="suggestion-text" class="suggestion-text" type="button"></button>?
      </div>
    </form>

    <div class="task-columns">
      <section class="task-column daily-tasks-column">
        <h2>Daily Tasks</h2>
        {{DAILY}}
        <div class="daily-calendar-container">
          <h3>Daily Task Activity</h3>
          <div id="calendar-grid" class="calendar-main-grid">
            {{CALENDAR}}
          </div>
          <form method="post" action="/calendar/more">
            <button class="load-more-history-button" type="submit">Load More History</button>
          </form>
        </div>
      </section>

      <section class="task-column todays-tasks-column">
        <h2>Today's Tasks</h2>
        {{TODAY}}
      </section>
    </div>
  </main>

  <script>
    const grid = document.getElementById('calendar-grid');
    requestAnimationFrame(() => {
      grid.scrollLeft = grid.scrollWidth;
    });

    const input = document.getElementById('task-input');
    const box = document.getElementById('suggestion-box');
    const text = document.getElementById('suggestion-text');

    const hideSuggestion = () => {
      box.hidden = true;
      text.textContent = '';
    };

    input.addEventListener('input', async () => {
      const value = input.value;
      try {
        const res = await fetch('/api/suggest?q=' + encodeURIComponent(value));
        if (!res.ok || input.value !== value) {
          return;
        }
        const data = await res.json();
        if (data.suggestion) {
          text.textContent = data.suggestion;
          box.hidden = false;
        } else {
          hideSuggestion();
        }
      } catch (err) {
        hideSuggestion();
      }
    });

    text.addEventListener('click', () => {
      input.value = text.textContent;
      hideSuggestion();
      input.focus();
    });
  </script>
</body>
</html>
"#;
