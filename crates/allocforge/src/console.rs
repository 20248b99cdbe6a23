//! Colorful console output for solver events.
//!
//! Provides a custom `tracing` layer that formats solver events with colors.
//! Output goes to stderr so that stdout stays free for assignment dumps.

use std::io::{self, Write};
use std::sync::OnceLock;

use allocforge_core::HardSoftCost;
use num_format::{Locale, ToFormattedString};
use owo_colors::OwoColorize;
use tracing::field::{Field, Visit};
use tracing::{Event, Subscriber};
use tracing_subscriber::layer::{Context, SubscriberExt};
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

static INIT: OnceLock<()> = OnceLock::new();

const DEFAULT_DIRECTIVE: &str = "allocforge_solver=info";

/// Initializes the console output at the default level.
///
/// Safe to call multiple times - only the first call has effect.
/// `RUST_LOG` overrides the default filter when set.
pub fn init() {
    init_with_directive(DEFAULT_DIRECTIVE);
}

/// Initializes the console output with `directive` as the fallback filter,
/// e.g. `"allocforge_solver=debug"`.
pub fn init_with_directive(directive: &str) {
    INIT.get_or_init(|| {
        print_banner();

        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(directive));

        // another subscriber may already be installed by the host
        let _ = tracing_subscriber::registry()
            .with(filter)
            .with(SolverConsoleLayer)
            .try_init();
    });
}

fn print_banner() {
    let version_line = format!("allocforge v{}", env!("CARGO_PKG_VERSION"));
    let mut stderr = io::stderr().lock();
    let _ = writeln!(stderr, "{}", version_line.bright_cyan().bold());
    let _ = stderr.flush();
}

/// A tracing layer that formats solver events with colors.
#[derive(Debug, Clone, Copy, Default)]
pub struct SolverConsoleLayer;

impl<S: Subscriber> Layer<S> for SolverConsoleLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        if !event.metadata().target().starts_with("allocforge_solver") {
            return;
        }

        let mut visitor = EventVisitor::default();
        event.record(&mut visitor);

        let output = format_solver_event(&visitor);
        if !output.is_empty() {
            let _ = writeln!(io::stderr(), "{}", output);
        }
    }
}

#[derive(Debug, Default)]
struct EventVisitor {
    event: Option<String>,
    phase: Option<String>,
    phase_index: Option<u64>,
    duration_ms: Option<u64>,
    steps: Option<u64>,
    speed: Option<u64>,
    moves_evaluated: Option<u64>,
    score: Option<String>,
    client_count: Option<u64>,
    resource_count: Option<u64>,
    restarts: Option<u64>,
    seed: Option<u64>,
    step: Option<u64>,
    fallback: Option<u64>,
    clients: Option<u64>,
    resource: Option<u64>,
}

impl EventVisitor {
    fn set_text(&mut self, name: &str, value: String) {
        match name {
            "event" => self.event = Some(value),
            "phase" => self.phase = Some(value),
            "score" => self.score = Some(value),
            _ => {}
        }
    }
}

impl Visit for EventVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        let s = format!("{:?}", value);
        self.set_text(field.name(), s.trim_matches('"').to_string());
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        self.set_text(field.name(), value.to_string());
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        match field.name() {
            "phase_index" => self.phase_index = Some(value),
            "duration_ms" => self.duration_ms = Some(value),
            "steps" => self.steps = Some(value),
            "speed" => self.speed = Some(value),
            "moves_evaluated" => self.moves_evaluated = Some(value),
            "client_count" => self.client_count = Some(value),
            "resource_count" => self.resource_count = Some(value),
            "restarts" => self.restarts = Some(value),
            "seed" => self.seed = Some(value),
            "step" => self.step = Some(value),
            "fallback" => self.fallback = Some(value),
            "clients" => self.clients = Some(value),
            "resource" => self.resource = Some(value),
            _ => {}
        }
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        self.record_u64(field, value.max(0) as u64);
    }
}

fn format_solver_event(v: &EventVisitor) -> String {
    match v.event.as_deref().unwrap_or("") {
        "solve_start" => format_solve_start(v),
        "phase_start" => format_phase_start(v),
        "phase_end" => format_phase_end(v),
        "new_best" => format_new_best(v),
        "construction_fallback" => format_fallback(v),
        "solve_end" => format_solve_end(v),
        _ => String::new(),
    }
}

fn format_solve_start(v: &EventVisitor) -> String {
    let clients = v.client_count.unwrap_or(0);
    let resources = v.resource_count.unwrap_or(0);

    format!(
        "{} {} {} client count ({}), resource count ({}), restarts ({}), seed ({}), problem scale ({})",
        timestamp().bright_black(),
        "INFO".bright_green(),
        "[Solver]".bright_cyan(),
        clients.to_formatted_string(&Locale::en).bright_yellow(),
        resources.to_formatted_string(&Locale::en).bright_yellow(),
        v.restarts.unwrap_or(1).to_formatted_string(&Locale::en).bright_yellow(),
        v.seed.unwrap_or(0),
        problem_scale(clients as usize, resources as usize).bright_magenta()
    )
}

fn format_phase_start(v: &EventVisitor) -> String {
    let phase = v.phase.as_deref().unwrap_or("Unknown");

    format!(
        "{} {} {} {} phase ({}) started",
        timestamp().bright_black(),
        "INFO".bright_green(),
        format!("[{}]", phase).bright_cyan(),
        phase.white().bold(),
        v.phase_index.unwrap_or(0).to_string().yellow()
    )
}

fn format_phase_end(v: &EventVisitor) -> String {
    let phase = v.phase.as_deref().unwrap_or("Unknown");
    let steps = v.steps.unwrap_or(0);

    let mut line = format!(
        "{} {} {} {} phase ({}) ended: time spent ({}), step total ({})",
        timestamp().bright_black(),
        "INFO".bright_green(),
        format!("[{}]", phase).bright_cyan(),
        phase.white().bold(),
        v.phase_index.unwrap_or(0).to_string().yellow(),
        format_duration_ms(v.duration_ms.unwrap_or(0)).yellow(),
        steps.to_formatted_string(&Locale::en).white()
    );
    if let Some(speed) = v.speed {
        line.push_str(&format!(
            ", move evaluation speed ({}/sec)",
            speed.to_formatted_string(&Locale::en).bright_magenta().bold()
        ));
    }
    if let Some(score) = v.score.as_deref() {
        line.push_str(&format!(", best score ({})", format_score(score)));
    }
    line
}

fn format_new_best(v: &EventVisitor) -> String {
    format!(
        "    {} Step {:>7} | {}",
        "->".bright_blue(),
        v.step.unwrap_or(0).to_formatted_string(&Locale::en).white(),
        format_score(v.score.as_deref().unwrap_or("N/A"))
    )
}

fn format_fallback(v: &EventVisitor) -> String {
    format!(
        "{} {} {} {} clients sent to fallback resource {}",
        timestamp().bright_black(),
        "WARN".bright_yellow(),
        "[Construction]".bright_cyan(),
        v.clients.unwrap_or(0).to_formatted_string(&Locale::en).bright_yellow(),
        v.resource.unwrap_or(0)
    )
}

fn format_solve_end(v: &EventVisitor) -> String {
    let score = v.score.as_deref().unwrap_or("N/A");
    let is_feasible = score
        .parse::<HardSoftCost>()
        .map(|c| c.is_feasible())
        .unwrap_or(false);

    let mut output = format!(
        "{} {} {} Solving ended: best score ({}), seed ({}), step total ({})",
        timestamp().bright_black(),
        "INFO".bright_green(),
        "[Solver]".bright_cyan(),
        format_score(score),
        v.seed.unwrap_or(0),
        v.steps.unwrap_or(0).to_formatted_string(&Locale::en)
    );

    let status = if is_feasible {
        "FEASIBLE ASSIGNMENT FOUND".bright_green().bold().to_string()
    } else {
        "INFEASIBLE (capacity exceeded)".bright_red().bold().to_string()
    };
    output.push_str(&format!("\n    {}", status));
    output
}

fn timestamp() -> String {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| format!("{:5}.{:03}", d.as_secs() % 100000, d.subsec_millis()))
        .unwrap_or_else(|_| "    0.000".to_string())
}

fn format_duration_ms(ms: u64) -> String {
    if ms < 1000 {
        format!("{}ms", ms)
    } else if ms < 60_000 {
        format!("{:.2}s", ms as f64 / 1000.0)
    } else {
        format!("{}m {}s", ms / 60_000, (ms % 60_000) / 1000)
    }
}

/// Colors a `"Xhard/Ysoft"` cost: any hard cost is red, zero is green.
fn format_score(score: &str) -> String {
    match score.parse::<HardSoftCost>() {
        Ok(cost) => {
            let hard = format!("{}hard", cost.hard());
            let hard = if cost.is_feasible() {
                hard.bright_green().to_string()
            } else {
                hard.bright_red().to_string()
            };
            format!("{}/{}", hard, format!("{}soft", cost.soft()).white())
        }
        Err(_) => score.white().to_string(),
    }
}

/// `resources ^ clients`, in scientific notation.
fn problem_scale(clients: usize, resources: usize) -> String {
    if clients == 0 || resources == 0 {
        return "0".to_string();
    }

    let log_scale = (clients as f64) * (resources as f64).log10();
    let exponent = log_scale.floor() as i32;
    let mantissa = 10f64.powf(log_scale - exponent as f64);

    format!("{:.3} x 10^{}", mantissa, exponent)
}
