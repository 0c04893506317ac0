//! Token substitution for path and filename templates

use chrono::NaiveDateTime;

use super::context::RunContext;

/// Timestamp format used by `%time` (and by the empty-template fallback)
pub const TIME_FORMAT: &str = "%Y-%m-%d-%H%M%S";

/// Date format used by `%date`
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Substitute recognized tokens in a template string.
///
/// Recognized tokens are `%time`, `%date`, `%seed`, `%model` and
/// `%counter`. Anything else, including unrecognized `%`-sequences, passes
/// through verbatim; a template with no tokens resolves to itself.
///
/// The timestamp is passed in by the caller so that multiple templates
/// resolved for the same invocation (path and filename) see the same
/// instant.
///
/// An empty template resolves to the `%time` stamp, so a default filename
/// is never empty.
pub fn resolve(template: &str, ctx: &RunContext, now: NaiveDateTime) -> String {
    if template.is_empty() {
        return now.format(TIME_FORMAT).to_string();
    }

    let seed = match ctx.seed {
        Some(s) => s.to_string(),
        None => "unknown".to_string(),
    };
    let model = match &ctx.model_name {
        Some(m) => normalize_text(m),
        None => "unknown".to_string(),
    };

    let replacements = [
        ("%date", now.format(DATE_FORMAT).to_string()),
        ("%time", now.format(TIME_FORMAT).to_string()),
        ("%model", model),
        ("%seed", seed),
        ("%counter", ctx.counter.to_string()),
    ];

    let mut result = template.to_string();
    for (token, value) in &replacements {
        result = result.replace(token, value);
    }
    result
}

/// Collapse runs of whitespace to single spaces.
///
/// Model names pulled out of host metadata can carry newlines or tabs;
/// those would end up in filenames otherwise.
pub fn normalize_text(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
