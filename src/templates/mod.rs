use crate::errors::{DetailedError, ErrorSource};
use minijinja::{Environment, Value};
use once_cell::sync::Lazy;

/// Every template the site renders, compiled into the binary.
static TEMPLATES: &[(&str, &str)] = &[
    ("page.html", include_str!("page.html")),
    ("navbar.html", include_str!("navbar.html")),
    ("hero.html", include_str!("hero.html")),
    ("destinations.html", include_str!("destinations.html")),
    ("about.html", include_str!("about.html")),
    ("gallery.html", include_str!("gallery.html")),
    ("services.html", include_str!("services.html")),
    ("reviews.html", include_str!("reviews.html")),
    ("faq.html", include_str!("faq.html")),
    ("booking.html", include_str!("booking.html")),
    ("footer.html", include_str!("footer.html")),
];

static DEBUG_ERROR_TEMPLATE: &str = include_str!("debug_error.html");

static DEBUG_ENV: Lazy<Environment<'static>> = Lazy::new(|| {
    let mut env = Environment::new();
    if let Err(e) = env.add_template("debug_error.html", DEBUG_ERROR_TEMPLATE) {
        log::error!("Debug error template does not compile: {}", e);
    }
    env
});

pub fn template_source(name: &str) -> Option<&'static str> {
    if name == "debug_error.html" {
        return Some(DEBUG_ERROR_TEMPLATE);
    }
    TEMPLATES
        .iter()
        .find(|(template_name, _)| *template_name == name)
        .map(|(_, source)| *source)
}

/// Renders a rating as filled and empty stars out of five.
fn stars(rating: u32) -> String {
    let filled = rating.min(5) as usize;
    format!("{}{}", "★".repeat(filled), "☆".repeat(5 - filled))
}

/// Resolves a content image path: absolute URLs pass through, everything
/// else is served from the static directory.
fn media(path: String, prefix: String) -> String {
    if path.starts_with("http://") || path.starts_with("https://") {
        path
    } else {
        format!("{}/{}", prefix.trim_end_matches('/'), path.trim_start_matches('/'))
    }
}

pub fn build_environment() -> Result<Environment<'static>, minijinja::Error> {
    let mut env = Environment::new();
    for &(name, source) in TEMPLATES {
        env.add_template(name, source)?;
    }
    env.add_filter("stars", stars);
    env.add_filter("media", media);
    Ok(env)
}

/// Numbered source lines around `line_num`, the failing line flagged.
fn code_snippet(code: &str, line_num: usize, radius: usize) -> Vec<(usize, &str, bool)> {
    let lines: Vec<_> = code.lines().collect();
    let start_line = line_num.saturating_sub(radius + 1);
    let end_line = (line_num + radius).min(lines.len());
    (start_line..end_line)
        .map(|i| (i + 1, lines[i], i + 1 == line_num))
        .collect()
}

pub fn render_structured_debug_error(detailed_error: &DetailedError) -> String {
    log_detailed_error(detailed_error);

    let mut context = std::collections::HashMap::new();
    context.insert("error", Value::from_serialize(detailed_error));

    if let Some(ErrorSource::Template(tmpl_err)) = &detailed_error.error_source {
        if let Some(code) = &tmpl_err.source_code {
            let numbered_lines: Vec<_> = code_snippet(code, tmpl_err.line, 6)
                .into_iter()
                .map(|(number, content, highlight)| {
                    minijinja::context! {
                        number => number,
                        content => content,
                        highlight => highlight,
                    }
                })
                .collect();
            context.insert("code_snippet", Value::from(numbered_lines));
        }
    }

    let mut rendered = DEBUG_ENV
        .get_template("debug_error.html")
        .and_then(|tmpl| tmpl.render(Value::from(context)))
        .unwrap_or_else(|e| {
            log::error!("Failed to render structured debug error page: {}", e);
            "<h1>Internal Server Error</h1><p>Could not render the debug error page.</p>".to_string()
        });

    add_debug_marker(&mut rendered);
    rendered
}

pub fn render_production_error(detailed_error: &DetailedError) -> String {
    log_production_error(detailed_error);
    "<h1>Internal Server Error</h1><p>An unexpected error occurred.</p>".to_string()
}

pub fn log_production_error(detailed_error: &DetailedError) {
    log::error!("An error occurred on route: {}", detailed_error.route.as_deref().unwrap_or("unknown"));
    match &detailed_error.error_source {
        Some(ErrorSource::Template(tmpl_err)) => {
            log::error!("Type: Template Error");
            log::error!("Message: {}", tmpl_err.detail);
            log::error!("File: {}", tmpl_err.name);
        }
        Some(ErrorSource::Internal(message)) => {
            log::error!("Type: Internal Error");
            log::error!("Message: {}", message);
        }
        None => log::error!("Message: {}", detailed_error.message),
    }
    log::debug!("Error details: {}", detailed_error.to_json());
}

pub fn log_detailed_error(detailed_error: &DetailedError) {
    const RED: &str = "\x1b[31m";
    const RESET: &str = "\x1b[0m";

    log::error!("{}[ERROR]{}", RED, RESET);
    if let Some(route) = &detailed_error.route {
        log::error!("{}  Page: {}{}", RED, route, RESET);
    }

    match &detailed_error.error_source {
        Some(ErrorSource::Template(tmpl_err)) => {
            log::error!("{}  Error: {}{}", RED, tmpl_err.detail, RESET);
            log::error!("{}  File: {} @ line {}{}", RED, tmpl_err.name, tmpl_err.line, RESET);
            if let Some(code) = &tmpl_err.source_code {
                log::error!("");
                log::error!("{}  Code:{}", RED, RESET);
                for (num, line, is_highlighted) in code_snippet(code, tmpl_err.line, 2) {
                    if is_highlighted {
                        log::error!("{}   > {:>4} | {}{}", RED, num, line, RESET);
                    } else {
                        log::error!("{}     {:>4} | {}{}", RED, num, line, RESET);
                    }
                }
            }
        }
        Some(ErrorSource::Internal(message)) => {
            log::error!("{}  Error: {}{}", RED, message, RESET);
        }
        None => {
            log::error!("{}  Error: {}{}", RED, detailed_error.message, RESET);
        }
    }
}

fn add_debug_marker(rendered: &mut String) {
    let marker = format!("<!-- debug_rendered: {} -->", chrono::Local::now().timestamp());
    match rendered.rfind("</body>") {
        Some(body_end_pos) => rendered.insert_str(body_end_pos, &format!("{}\n", marker)),
        None => rendered.push_str(&marker),
    }
}
