use crate::calendar::{DayCell, Placement};
use crate::models::CalendarView;

const WEEKDAYS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

pub fn render_calendar(view: &CalendarView) -> String {
    INDEX_HTML
        .replace("{{LABEL}}", &view.label)
        .replace("{{BOOKED}}", &view.booked_in_month.to_string())
        .replace("{{GRID}}", &render_grid(&view.cells))
}

fn render_grid(cells: &[DayCell]) -> String {
    let mut grid = String::new();
    for day in WEEKDAYS {
        grid.push_str(&format!("<div class=\"weekday\">{day}</div>"));
    }
    for cell in cells {
        grid.push_str(&format!(
            "<div class=\"{}\">{}</div>",
            cell_class(cell),
            cell.day_number
        ));
    }
    grid
}

fn cell_class(cell: &DayCell) -> &'static str {
    match (cell.placement, cell.is_booked) {
        (Placement::PrevMonth, _) => "day prev-month",
        (Placement::NextMonth, _) => "day next-month",
        (Placement::CurrentMonth, true) => "day highlighted-date",
        (Placement::CurrentMonth, false) => "day",
    }
}

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>Booked Sessions</title>
  <style>
    @import url('https://fonts.googleapis.com/css2?family=Space+Grotesk:wght@400;500;600&family=Fraunces:wght@600&display=swap');

    :root {
      --bg-1: #f8f3e6;
      --bg-2: #f5d3a7;
      --ink: #2b2a28;
      --accent: #ff6b4a;
      --accent-2: #2f4858;
      --card: rgba(255, 255, 255, 0.86);
      --shadow: 0 24px 60px rgba(47, 72, 88, 0.18);
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      min-height: 100vh;
      background: radial-gradient(circle at top, var(--bg-2), transparent 60%),
        linear-gradient(135deg, var(--bg-1), #ffe9d4 60%, #f9f2e9 100%);
      color: var(--ink);
      font-family: "Space Grotesk", "Trebuchet MS", sans-serif;
      display: grid;
      place-items: center;
      padding: 32px 18px 48px;
    }

    .app {
      width: min(720px, 100%);
      background: var(--card);
      backdrop-filter: blur(12px);
      border-radius: 28px;
      box-shadow: var(--shadow);
      padding: 36px;
      display: grid;
      gap: 24px;
    }

    header {
      display: flex;
      align-items: center;
      justify-content: space-between;
      gap: 12px;
    }

    h1 {
      font-family: "Fraunces", "Georgia", serif;
      font-weight: 600;
      font-size: clamp(1.6rem, 4vw, 2.4rem);
      margin: 0;
      text-align: center;
      flex: 1;
    }

    .subtitle {
      margin: 0;
      color: #5f5c57;
      font-size: 0.95rem;
      text-align: center;
    }

    button {
      appearance: none;
      border: none;
      border-radius: 999px;
      padding: 12px 18px;
      font-size: 1rem;
      font-weight: 600;
      cursor: pointer;
      background: var(--accent-2);
      color: white;
      box-shadow: 0 10px 24px rgba(47, 72, 88, 0.3);
    }

    button:active {
      transform: scale(0.98);
    }

    .btn-light {
      background: white;
      color: var(--accent-2);
      box-shadow: 0 8px 16px rgba(47, 72, 88, 0.12);
    }

    #calendar {
      display: grid;
      grid-template-columns: repeat(7, 1fr);
      gap: 8px;
    }

    .weekday {
      text-align: center;
      font-size: 0.8rem;
      text-transform: uppercase;
      letter-spacing: 0.12em;
      color: #8b857d;
    }

    .day {
      background: white;
      border-radius: 14px;
      padding: 14px 0;
      text-align: center;
      font-weight: 500;
      border: 1px solid rgba(47, 72, 88, 0.08);
    }

    .day.prev-month,
    .day.next-month {
      background: transparent;
      color: #b8b1a8;
    }

    .day.highlighted-date {
      background: var(--accent);
      color: white;
      box-shadow: 0 10px 24px rgba(255, 107, 74, 0.3);
    }

    .actions {
      display: flex;
      justify-content: center;
      gap: 12px;
    }

    .status {
      font-size: 0.95rem;
      color: #6b645d;
      min-height: 1.2em;
      text-align: center;
    }

    .status[data-type="error"] {
      color: #c63b2b;
    }
  </style>
</head>
<body>
  <main class="app">
    <header>
      <form id="prev-form" method="post" action="/calendar/prev">
        <button id="prevMonth" type="submit">&larr;</button>
      </form>
      <h1 id="monthYear">{{LABEL}}</h1>
      <form id="next-form" method="post" action="/calendar/next">
        <button id="nextMonth" type="submit">&rarr;</button>
      </form>
    </header>
    <p class="subtitle"><span id="booked-count">{{BOOKED}}</span> booked day(s) this month</p>

    <section id="calendar">{{GRID}}</section>

    <section class="actions">
      <form method="post" action="/calendar/today">
        <button class="btn-light" type="submit">Today</button>
      </form>
      <button class="btn-light" id="reload" type="button">Refresh bookings</button>
    </section>

    <div class="status" id="status"></div>
  </main>

  <script>
    const calendarEl = document.getElementById('calendar');
    const labelEl = document.getElementById('monthYear');
    const bookedEl = document.getElementById('booked-count');
    const statusEl = document.getElementById('status');
    const weekdays = ['Sun', 'Mon', 'Tue', 'Wed', 'Thu', 'Fri', 'Sat'];

    const setStatus = (message, type) => {
      statusEl.textContent = message;
      statusEl.dataset.type = type || '';
    };

    const cellClass = (cell) => {
      if (cell.placement === 'prev_month') return 'day prev-month';
      if (cell.placement === 'next_month') return 'day next-month';
      return cell.is_booked ? 'day highlighted-date' : 'day';
    };

    const render = (view) => {
      labelEl.textContent = view.label;
      bookedEl.textContent = view.booked_in_month;
      const head = weekdays.map((day) => `<div class="weekday">${day}</div>`).join('');
      const body = view.cells
        .map((cell) => `<div class="${cellClass(cell)}">${cell.day_number}</div>`)
        .join('');
      calendarEl.innerHTML = head + body;
    };

    const request = async (method, url) => {
      const res = await fetch(url, { method });
      if (!res.ok) {
        const body = await res.json().catch(() => ({}));
        throw new Error(body.error || 'Request failed');
      }
      return res.json();
    };

    const navigate = (direction) => (event) => {
      event.preventDefault();
      request('POST', `/api/calendar/${direction}`)
        .then(render)
        .catch((err) => setStatus(err.message, 'error'));
    };

    document.getElementById('prev-form').addEventListener('submit', navigate('prev'));
    document.getElementById('next-form').addEventListener('submit', navigate('next'));

    document.getElementById('reload').addEventListener('click', async () => {
      try {
        setStatus('Refreshing...', 'info');
        const outcome = await request('POST', '/api/booked-dates/reload');
        if (outcome.status === 'degraded') {
          setStatus(`Bookings unavailable: ${outcome.reason}`, 'error');
        } else {
          setStatus('', '');
        }
        render(await request('GET', '/api/calendar'));
      } catch (err) {
        setStatus(err.message, 'error');
      }
    });
  </script>
</body>
</html>
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::{generate_grid, BookedDateSet, CalendarDate, CalendarViewState};

    #[test]
    fn page_marks_booked_and_adjacent_days() {
        let state = CalendarViewState::new(2025, 0);
        let booked: BookedDateSet = [CalendarDate::new(14, 0, 2025).unwrap()]
            .into_iter()
            .collect();
        let view = CalendarView {
            year: 2025,
            month: 0,
            label: state.label(),
            booked_in_month: 1,
            cells: generate_grid(&state, &booked),
        };

        let html = render_calendar(&view);
        assert!(html.contains("<h1 id=\"monthYear\">January 2025</h1>"));
        assert!(html.contains("<div class=\"day prev-month\">29</div>"));
        assert!(html.contains("<div class=\"day highlighted-date\">14</div>"));
        assert!(html.contains("<div class=\"day next-month\">1</div>"));
        assert!(!html.contains("{{"));

        let grid = render_grid(&view.cells);
        assert_eq!(grid.matches("class=\"weekday\"").count(), 7);
        assert_eq!(grid.matches("<div").count(), 7 + 35);
    }
}
