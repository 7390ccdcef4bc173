//! Query routing
//!
//! Regex intent classification over free-text queries, parameter
//! extraction, and dispatch into the engine's resolution paths. Every
//! outcome — including every failure — is a structured
//! [`NavigationResponse`]; nothing here returns an error type.
//!
//! Honorific queries ("where is ma'am …") are claimed by the faculty
//! rule before the generic "where is" route pattern can see them, so the
//! three intents stay mutually exclusive.

use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use crate::engine::NavEngine;
use crate::types::{NavigationResponse, PathResult, SearchResults};

/// Shown per category when rendering search results.
const SEARCH_DISPLAY_CAP: usize = 5;

// ─── Intent patterns ──────────────────────────────────────────

/// Route-intent verb phrases ("how do i get to", "navigate to", …).
static ROUTE_VERB_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)(?:how (?:do i|can i) (?:get|go) (?:to|from))|(?:navigate (?:to|from))|(?:directions? (?:to|from))|(?:route (?:to|from))|(?:way to)",
    )
    .unwrap()
});

/// Generic locate phrases, shared with destination extraction.
static LOCATE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)where is|find|locate").unwrap());

/// Explicit "from X to Y" phrasing.
static FROM_TO_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)from .+ to .+").unwrap());

/// Honorific after a locate phrase marks a faculty query.
static FACULTY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)(?:where (?:is|can i find)\s+(?:ma'am|sir|prof|professor|teacher|faculty))|(?:(?:find|locate)\s+(?:ma'am|sir|prof|professor))",
    )
    .unwrap()
});

// ─── Extraction patterns ──────────────────────────────────────

static FROM_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)from\s+([a-z0-9\s]+?)(?:\s+to|\s*$)").unwrap());

static TO_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)to\s+([a-z0-9\s]+?)(?:\s+from|\s*$)").unwrap());

static WHERE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(?:where is|find|locate)\s+([a-z0-9\s]+?)(?:\?|$)").unwrap());

static GET_TO_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:get to|go to|navigate to|directions? to)\s+([a-z0-9\s]+?)(?:\?|$)").unwrap()
});

/// Faculty name after an honorific, stopping at '?', "from", or "at".
static FACULTY_NAME_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:ma'am|sir|prof(?:essor)?)\s+([a-z\s]+?)(?:\?|$|from|at)").unwrap()
});

// ─── Classification ───────────────────────────────────────────

/// Query intent, mutually exclusive.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Intent {
    Route,
    Faculty,
    Search,
}

/// Classify a free-text query.
pub fn classify(query: &str) -> Intent {
    if FACULTY_RE.is_match(query) {
        return Intent::Faculty;
    }
    if ROUTE_VERB_RE.is_match(query) || LOCATE_RE.is_match(query) || FROM_TO_RE.is_match(query) {
        return Intent::Route;
    }
    Intent::Search
}

/// Cheap keyword pre-filter so a chat layer can decide whether a message
/// belongs to this engine at all.
pub fn is_navigation_query(query: &str) -> bool {
    const KEYWORDS: &[&str] = &[
        "where",
        "how",
        "get to",
        "go to",
        "navigate",
        "direction",
        "route",
        "way to",
        "find",
        "locate",
        "location",
        "room",
        "floor",
        "building",
        "ma'am",
        "sir",
        "professor",
        "faculty",
        "teacher",
    ];
    let query = query.to_lowercase();
    KEYWORDS.iter().any(|keyword| query.contains(keyword))
}

fn capture<'a>(re: &Regex, query: &'a str) -> Option<&'a str> {
    re.captures(query)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim())
}

// ─── Dispatch ─────────────────────────────────────────────────

/// Resolve one free-text query into a structured response.
pub(crate) fn handle(
    engine: &NavEngine,
    query: &str,
    start_hint: Option<&str>,
) -> NavigationResponse {
    let intent = classify(query);
    debug!(?intent, query, "query classified");

    match intent {
        Intent::Route => handle_route(engine, query, start_hint),
        Intent::Faculty => handle_faculty(engine, query, start_hint),
        Intent::Search => handle_search(engine, query),
    }
}

fn handle_route(engine: &NavEngine, query: &str, start_hint: Option<&str>) -> NavigationResponse {
    let from = capture(&FROM_RE, query);
    let to = capture(&TO_RE, query);

    let (start, destination) = match (from, to) {
        (Some(from), Some(to)) => (from.to_string(), Some(to)),
        _ => {
            let destination = capture(&GET_TO_RE, query).or_else(|| capture(&WHERE_RE, query));
            let start = start_hint.unwrap_or(engine.default_origin()).to_string();
            (start, destination)
        }
    };

    let Some(destination) = destination.filter(|d| !d.is_empty()) else {
        return NavigationResponse::error(
            "I couldn't understand the destination. Please specify where you want to go. \
             For example: 'How do I get to the Library?' or 'Navigate from MIS to Registrar'",
        );
    };

    let Some(dest_id) = engine.resolve_location(destination) else {
        return NavigationResponse::error(format!(
            "I couldn't find \"{destination}\". Please check the location name and try again. \
             You can ask \"What locations are available?\" to list them."
        ));
    };

    let Some(start_id) = engine.resolve_location(&start) else {
        return NavigationResponse::error(format!(
            "I couldn't find the starting location \"{start}\". \
             Please check the name and try again."
        ));
    };

    let Some(result) = engine.solve(start_id, dest_id) else {
        return NavigationResponse::error(format!(
            "I couldn't find a route to \"{destination}\" from \"{start}\". \
             It may be unreachable with the current routing settings."
        ));
    };

    let message = format_path_result(&result);
    NavigationResponse::route(message, result)
}

fn handle_faculty(engine: &NavEngine, query: &str, start_hint: Option<&str>) -> NavigationResponse {
    let Some(name) = capture(&FACULTY_NAME_RE, query).filter(|n| !n.is_empty()) else {
        return NavigationResponse::error(
            "Please specify the faculty member's name. \
             For example: 'Where is Ma'am Jennifer Magbanlac?'",
        );
    };

    let Some(record) = engine.find_faculty(name).cloned() else {
        return NavigationResponse::error(format!(
            "I couldn't find \"{name}\". Please check the name and try again."
        ));
    };

    let start = start_hint.unwrap_or(engine.default_origin());
    let Some(start_id) = engine.resolve_location(start) else {
        return NavigationResponse::error(format!(
            "I couldn't find the starting location \"{start}\". \
             Please check the name and try again."
        ));
    };

    let Some(result) = engine.route_to_faculty(start_id, &record) else {
        return NavigationResponse::error(format!(
            "I couldn't find a route to {}'s known locations right now.",
            record.name
        ));
    };

    let mut message = format!("**{}**\n", record.name);
    if let Some(role) = &record.role {
        message.push_str(&format!("*{role}*\n\n"));
    }
    if let Some(schedule) = &record.schedule {
        message.push_str(&format!("📅 **Schedule:** {schedule}\n\n"));
    }
    message.push_str(&format_path_result(&result));

    NavigationResponse::route(message, result)
}

fn handle_search(engine: &NavEngine, query: &str) -> NavigationResponse {
    let results = engine.search_all(query);

    if results.is_empty() {
        return NavigationResponse::error(format!(
            "No results found for \"{query}\". \
             Try searching for rooms, departments, services, or faculty members."
        ));
    }

    let message = format_search_results(query, &results);
    NavigationResponse::search(message, results)
}

// ─── Formatting ───────────────────────────────────────────────

fn format_path_result(result: &PathResult) -> String {
    let verdict = if result.accessibility_friendly {
        "✅ Accessible"
    } else {
        "⚠️ Uses stairs"
    };

    let mut message = String::from("## 🗺️ Route Found\n\n");
    message.push_str(&format!("📏 **Distance:** {} units\n", result.distance));
    message.push_str(&format!(
        "⏱️ **Estimated Time:** {} minutes\n",
        result.estimated_time_minutes
    ));
    message.push_str(&format!("🏢 **Floor Changes:** {}\n", result.floor_changes));
    message.push_str(&format!("♿ **Accessibility:** {verdict}\n\n"));
    message.push_str("### 📍 Step-by-Step Directions:\n\n");
    for (i, step) in result.directions.iter().enumerate() {
        message.push_str(&format!("{}. {step}\n", i + 1));
    }
    message
}

fn format_search_results(query: &str, results: &SearchResults) -> String {
    let mut message = format!("**Search Results for \"{query}\":**\n\n");

    if !results.locations.is_empty() {
        message.push_str("📍 **Locations:**\n");
        for hit in results.locations.iter().take(SEARCH_DISPLAY_CAP) {
            message.push_str(&format!("• **{}** ({})", hit.name, hit.floor));
            if let Some(description) = &hit.description {
                message.push_str(&format!(" - {description}"));
            }
            message.push('\n');
        }
        message.push('\n');
    }

    if !results.faculty.is_empty() {
        message.push_str("👩‍🏫 **Faculty:**\n");
        for record in results.faculty.iter().take(SEARCH_DISPLAY_CAP) {
            message.push_str(&format!("• **{}**", record.name));
            if let Some(role) = &record.role {
                message.push_str(&format!(" - {role}"));
            }
            message.push('\n');
        }
        message.push('\n');
    }

    if !results.departments.is_empty() {
        message.push_str("🏢 **Departments:**\n");
        for hit in results.departments.iter().take(SEARCH_DISPLAY_CAP) {
            message.push_str(&format!("• **{}** ({})\n", hit.name, hit.floor));
        }
        message.push('\n');
    }

    if !results.services.is_empty() {
        message.push_str("🛎️ **Services:**\n");
        for service in results.services.iter().take(SEARCH_DISPLAY_CAP) {
            message.push_str(&format!("• **{}**", service.name));
            if let Some(description) = &service.description {
                message.push_str(&format!(" - {description}"));
            }
            message.push('\n');
        }
        message.push('\n');
    }

    message.push_str("\nWould you like directions to any of these locations?");
    message
}
