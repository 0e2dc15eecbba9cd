//! Aggressive submodule detection
//!
//! After the heading and list passes, each module is offered extra submodules mined
//! from the rest of the page: tables, definition lists, class-hinted sections,
//! generic lists, code blocks, and help/FAQ link sections, with a paragraph-mention
//! fallback for modules that still have none.
//!
//! Each pass is a plain function from `(content root, module name)` to candidate
//! pairs. The miner only ever adds names a module does not already have.
//!
//! The relevance gate (module name or any keyword appearing somewhere in a region's
//! text) is coarse and produces false positives on long pages. It is a heuristic,
//! not a correctness guarantee.

use crate::extract::text::{
    char_len, clean_text, element_text, find_next, has_class_hint, raw_text, selector,
};
use crate::model::{Candidate, Module};
use crate::ExtractError;
use regex::Regex;
use scraper::ElementRef;
use std::sync::LazyLock;

/// Modules already holding more submodules than this are left alone
pub const SKIP_THRESHOLD: usize = 15;

/// Longest accepted submodule name
pub const MAX_SUBMODULE_CHARS: usize = 100;

/// Words that mark a region as likely to describe features or settings
const SUBMODULE_KEYWORDS: &[&str] = &[
    "feature", "tool", "setting", "option", "preference", "configuration",
    "function", "method", "property", "attribute", "parameter",
    "api", "endpoint", "service", "utility", "helper",
    "component", "element", "widget", "control",
    "page", "screen", "view", "section", "panel",
    "create", "edit", "delete", "manage", "configure",
    "upload", "download", "share", "publish", "post",
    "privacy", "security", "permission", "access", "role",
    "notification", "alert", "message", "comment", "feedback",
    "profile", "account", "user", "group", "team",
    "search", "filter", "sort", "browse", "navigate",
    "import", "export", "backup", "restore", "sync",
    "report", "analytics", "statistics", "metric", "dashboard",
    "schedule", "calendar", "event", "reminder",
    "payment", "subscription", "billing", "invoice", "transaction",
    "integration", "connection", "plugin", "extension", "add-on",
];

/// Section class hints for API/feature reference blocks
const SECTION_CLASS_HINTS: &[&str] =
    &["api", "method", "function", "property", "feature", "tool", "setting"];

/// Section class hints for help centers and FAQs
const HELP_CLASS_HINTS: &[&str] = &["help", "faq", "guide", "tutorial", "howto", "how-to"];

/// Identifiers introduced by these words in code blocks become submodules
const CODE_KEYWORDS: &[&str] = &[
    "function", "method", "class", "property", "attribute", "parameter", "option", "setting",
    "feature",
];

static SUBMODULE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)(?:sub|child)[\s\-_]?modules?|components?|features?|functions?|methods?|properties?|attributes?|parameters?|options?|settings?|configurations?|apis?|endpoints?|services?|utilities?|helpers?|tools?|plugins?|extensions?|add-?ons?",
    )
    .expect("hardcoded regex pattern is valid")
});

static CODE_PATTERNS: LazyLock<Vec<(&'static str, Regex)>> = LazyLock::new(|| {
    CODE_KEYWORDS
        .iter()
        .map(|keyword| {
            let pattern = format!(r"(?i){}\s+([a-zA-Z0-9_]+)", keyword);
            (
                *keyword,
                Regex::new(&pattern).expect("hardcoded regex pattern is valid"),
            )
        })
        .collect()
});

/// A single mining pass over the content root for one module
type MiningPass = fn(ElementRef<'_>, &str) -> Result<Vec<Candidate>, ExtractError>;

/// Passes run for every eligible module, in order
const PASSES: &[(&str, MiningPass)] = &[
    ("tables", table_rows),
    ("definition-lists", definition_lists),
    ("sections", hinted_sections),
    ("lists", generic_lists),
    ("code-blocks", code_blocks),
    ("help-sections", help_links),
];

/// Augments each module's submodules with candidates mined from the page
///
/// Modules with more than [`SKIP_THRESHOLD`] submodules are skipped. A pass that fails
/// is logged and the remaining passes still run.
pub fn mine_submodules(root: ElementRef<'_>, modules: &mut [Module]) {
    for module in modules.iter_mut() {
        if module.submodules.len() > SKIP_THRESHOLD {
            continue;
        }

        let before = module.submodules.len();

        for (label, pass) in PASSES {
            run_pass(label, *pass, root, module);
        }

        if module.submodules.is_empty() {
            run_pass("paragraph-mentions", paragraph_mentions, root, module);
        }

        tracing::trace!(
            "Mined {} extra submodules for '{}'",
            module.submodules.len() - before,
            module.name
        );
    }
}

fn run_pass(label: &str, pass: MiningPass, root: ElementRef<'_>, module: &mut Module) {
    match pass(root, &module.name) {
        Ok(candidates) => merge_candidates(module, candidates),
        Err(e) => tracing::warn!("Submodule pass '{}' failed for '{}': {}", label, module.name, e),
    }
}

/// Adds acceptable candidates that the module does not already have
fn merge_candidates(module: &mut Module, candidates: Vec<Candidate>) {
    for candidate in candidates {
        if is_acceptable_name(&candidate.name, &module.name) {
            module.add_submodule(candidate.name, candidate.description);
        }
    }
}

fn is_acceptable_name(name: &str, module_name: &str) -> bool {
    !name.is_empty() && char_len(name) <= MAX_SUBMODULE_CHARS && name != module_name
}

/// Whether a region's text relates to the module or to features in general
fn is_relevant(region_text: &str, module_name: &str) -> bool {
    let text = region_text.to_lowercase();
    text.contains(&module_name.to_lowercase())
        || SUBMODULE_KEYWORDS.iter().any(|keyword| text.contains(keyword))
        || SUBMODULE_PATTERN.is_match(&text)
}

/// Pass 1: table rows after the header, first cell as name and second as description
fn table_rows(root: ElementRef<'_>, module_name: &str) -> Result<Vec<Candidate>, ExtractError> {
    let tables = selector("table")?;
    let rows = selector("tr")?;
    let cells = selector("td, th")?;
    let mut candidates = Vec::new();

    for table in root.select(&tables) {
        if !is_relevant(&raw_text(table), module_name) {
            continue;
        }

        for row in table.select(&rows).skip(1) {
            let row_cells: Vec<_> = row.select(&cells).collect();
            if row_cells.len() >= 2 {
                candidates.push(Candidate::new(
                    element_text(row_cells[0]),
                    element_text(row_cells[1]),
                ));
            }
        }
    }

    Ok(candidates)
}

/// Pass 2: `dt` terms with the next `dd` as description
fn definition_lists(
    root: ElementRef<'_>,
    module_name: &str,
) -> Result<Vec<Candidate>, ExtractError> {
    let lists = selector("dl")?;
    let terms = selector("dt")?;
    let mut candidates = Vec::new();

    for list in root.select(&lists) {
        if !is_relevant(&raw_text(list), module_name) {
            continue;
        }

        for term in list.select(&terms) {
            let description = find_next(root, term, "dd")
                .map(element_text)
                .unwrap_or_default();
            candidates.push(Candidate::new(element_text(term), description));
        }
    }

    Ok(candidates)
}

/// Pass 3: sub-headings inside API/feature sections, with the next paragraph
fn hinted_sections(
    root: ElementRef<'_>,
    module_name: &str,
) -> Result<Vec<Candidate>, ExtractError> {
    let sections = selector("div, section")?;
    let headings = selector("h3, h4, h5, h6")?;
    let mut candidates = Vec::new();

    for section in root
        .select(&sections)
        .filter(|element| has_class_hint(*element, SECTION_CLASS_HINTS))
    {
        if !is_relevant(&raw_text(section), module_name) {
            continue;
        }

        for heading in section.select(&headings) {
            let description = find_next(root, heading, "p")
                .map(element_text)
                .unwrap_or_default();
            candidates.push(Candidate::new(element_text(heading), description));
        }
    }

    Ok(candidates)
}

/// Pass 4: list items split on a colon or dash, or named by bold text or a link
fn generic_lists(root: ElementRef<'_>, module_name: &str) -> Result<Vec<Candidate>, ExtractError> {
    let lists = selector("ul, ol")?;
    let items = selector("li")?;
    let bold = selector("strong, b")?;
    let link = selector("a")?;
    let mut candidates = Vec::new();

    for list in root.select(&lists) {
        if !is_relevant(&raw_text(list), module_name) {
            continue;
        }

        for item in list.select(&items) {
            let item_text = element_text(item);

            let candidate = if let Some((name, rest)) = item_text.split_once(':') {
                Candidate::new(clean_text(name), clean_text(rest))
            } else if let Some((name, rest)) = item_text.split_once(" - ") {
                Candidate::new(clean_text(name), clean_text(rest))
            } else if let Some(strong) = item.select(&bold).next() {
                named_by(strong, &item_text)
            } else if let Some(anchor) = item.select(&link).next() {
                named_by(anchor, &item_text)
            } else {
                Candidate::new(
                    item_text.clone(),
                    format!("Feature or setting in {}", module_name),
                )
            };

            candidates.push(candidate);
        }
    }

    Ok(candidates)
}

/// Candidate named by an inner element, described by the remaining item text
fn named_by(element: ElementRef<'_>, item_text: &str) -> Candidate {
    let name = element_text(element);
    let description = if name.is_empty() {
        item_text.to_string()
    } else {
        clean_text(item_text.replace(&name, "").as_str())
    };
    Candidate::new(name, description)
}

/// Pass 5: identifiers declared in code, e.g. `function parse` or `class Reader`
fn code_blocks(root: ElementRef<'_>, module_name: &str) -> Result<Vec<Candidate>, ExtractError> {
    let blocks = selector("pre, code")?;
    let mut candidates = Vec::new();

    for block in root.select(&blocks) {
        let code = raw_text(block);

        for (keyword, pattern) in CODE_PATTERNS.iter() {
            for captures in pattern.captures_iter(&code) {
                if let Some(identifier) = captures.get(1) {
                    candidates.push(Candidate::new(
                        identifier.as_str(),
                        format!("{} in {}", capitalize(keyword), module_name),
                    ));
                }
            }
        }
    }

    Ok(candidates)
}

/// Pass 6: every link inside a help, FAQ or guide section
fn help_links(root: ElementRef<'_>, module_name: &str) -> Result<Vec<Candidate>, ExtractError> {
    let sections = selector("div, section")?;
    let links = selector("a")?;
    let mut candidates = Vec::new();

    for section in root
        .select(&sections)
        .filter(|element| has_class_hint(*element, HELP_CLASS_HINTS))
    {
        for anchor in section.select(&links) {
            let link_text = element_text(anchor);
            if link_text.is_empty() {
                continue;
            }

            let title = clean_text(anchor.value().attr("title"));
            let parent_paragraph = anchor
                .parent()
                .and_then(ElementRef::wrap)
                .filter(|parent| parent.value().name() == "p");

            let description = if !title.is_empty() {
                title
            } else if let Some(paragraph) = parent_paragraph {
                clean_text(raw_text(paragraph).replace(&link_text, "").as_str())
            } else {
                format!("Help topic in {}", module_name)
            };

            candidates.push(Candidate::new(link_text, description));
        }
    }

    Ok(candidates)
}

/// Pass 7: emphasized text and links in paragraphs that mention the module
fn paragraph_mentions(
    root: ElementRef<'_>,
    module_name: &str,
) -> Result<Vec<Candidate>, ExtractError> {
    let paragraphs = selector("p")?;
    let emphasis = selector("strong, b, a, em")?;
    let needle = module_name.to_lowercase();
    let mut candidates = Vec::new();

    for paragraph in root.select(&paragraphs) {
        if !raw_text(paragraph).to_lowercase().contains(&needle) {
            continue;
        }

        for element in paragraph.select(&emphasis) {
            candidates.push(Candidate::new(
                element_text(element),
                format!("Feature mentioned in {} documentation", module_name),
            ));
        }
    }

    Ok(candidates)
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::Html;

    fn mine(html: &str, modules: &mut [Module]) {
        let document = Html::parse_document(html);
        let body = document
            .select(&selector("body").unwrap())
            .next()
            .unwrap();
        mine_submodules(body, modules);
    }

    #[test]
    fn test_table_rows() {
        let mut modules = vec![Module::new("Settings", "")];
        mine(
            r#"<table>
                <tr><th>Option</th><th>Meaning</th></tr>
                <tr><td>timeout</td><td>Seconds to wait</td></tr>
                <tr><td>retries</td><td>Attempts</td></tr>
                <tr><td>lonely</td></tr>
            </table>"#,
            &mut modules,
        );

        let subs = &modules[0].submodules;
        assert_eq!(subs.len(), 2);
        assert_eq!(subs["timeout"], "Seconds to wait");
        assert_eq!(subs["retries"], "Attempts");
        assert!(!subs.contains_key("Option"));
    }

    #[test]
    fn test_irrelevant_table_ignored() {
        let mut modules = vec![Module::new("Zebra", "")];
        mine(
            "<table><tr><td>a</td><td>b</td></tr><tr><td>x</td><td>y</td></tr></table>",
            &mut modules,
        );
        assert!(modules[0].submodules.is_empty());
    }

    #[test]
    fn test_definition_list() {
        let mut modules = vec![Module::new("Glossary", "")];
        mine(
            "<dl><dt>Glossary term</dt><dd>First</dd><dt>Other</dt><dd>Second</dd></dl>",
            &mut modules,
        );

        let subs = &modules[0].submodules;
        assert_eq!(subs["Glossary term"], "First");
        assert_eq!(subs["Other"], "Second");
    }

    #[test]
    fn test_hinted_section_headings() {
        let mut modules = vec![Module::new("Client", "")];
        mine(
            r#"<div class="api-methods">
                <h3>connect</h3><p>Opens a connection.</p>
                <h4>close</h4><p>Closes it.</p>
            </div>"#,
            &mut modules,
        );

        let subs = &modules[0].submodules;
        assert_eq!(subs["connect"], "Opens a connection.");
        assert_eq!(subs["close"], "Closes it.");
    }

    #[test]
    fn test_generic_list_variants() {
        let mut modules = vec![Module::new("Editor", "")];
        mine(
            r#"<ul>
                <li>Spellcheck: finds typos</li>
                <li>Autosave - keeps drafts</li>
                <li><strong>Themes</strong> change colors</li>
                <li><a href="/x">Plugins</a> extend the editor</li>
                <li>Word count</li>
            </ul>"#,
            &mut modules,
        );

        let subs = &modules[0].submodules;
        assert_eq!(subs["Spellcheck"], "finds typos");
        assert_eq!(subs["Autosave"], "keeps drafts");
        assert_eq!(subs["Themes"], "change colors");
        assert_eq!(subs["Plugins"], "extend the editor");
        assert_eq!(subs["Word count"], "Feature or setting in Editor");
    }

    #[test]
    fn test_code_block_identifiers() {
        let mut modules = vec![Module::new("Runtime", "")];
        mine(
            "<pre>class Reader:\n    pass\n\nfunction parse_input() {}</pre>",
            &mut modules,
        );

        let subs = &modules[0].submodules;
        assert_eq!(subs["Reader"], "Class in Runtime");
        assert_eq!(subs["parse_input"], "Function in Runtime");
    }

    #[test]
    fn test_help_section_links() {
        let mut modules = vec![Module::new("Support", "")];
        mine(
            r#"<div class="help-center">
                <a href="/reset" title="Reset your password">Reset password</a>
                <p>Read <a href="/2fa">Two-factor</a> to secure logins.</p>
                <span><a href="/contact">Contact us</a></span>
            </div>"#,
            &mut modules,
        );

        let subs = &modules[0].submodules;
        assert_eq!(subs["Reset password"], "Reset your password");
        assert_eq!(subs["Two-factor"], "Read to secure logins.");
        assert_eq!(subs["Contact us"], "Help topic in Support");
    }

    #[test]
    fn test_paragraph_fallback_only_when_empty() {
        let html = "<p>The <b>Exporter</b> works with <a href='/csv'>CSV files</a>.</p>";

        let mut modules = vec![Module::new("exporter", "")];
        mine(html, &mut modules);
        let subs = &modules[0].submodules;
        assert_eq!(subs["Exporter"], "Feature mentioned in exporter documentation");
        assert_eq!(subs["CSV files"], "Feature mentioned in exporter documentation");

        let mut modules = vec![Module::new("exporter", "")];
        modules[0].set_submodule("existing", "kept");
        mine(html, &mut modules);
        assert_eq!(modules[0].submodules.len(), 1);
    }

    #[test]
    fn test_skips_module_over_threshold() {
        let mut module = Module::new("Full", "");
        for i in 0..16 {
            module.set_submodule(format!("sub{}", i), "d");
        }
        let mut modules = vec![module];

        mine(
            "<table><tr><th>h</th></tr><tr><td>feature</td><td>new</td></tr></table>",
            &mut modules,
        );
        assert_eq!(modules[0].submodules.len(), 16);
    }

    #[test]
    fn test_never_overwrites_existing() {
        let mut module = Module::new("Settings", "");
        module.set_submodule("timeout", "first");
        let mut modules = vec![module];

        mine(
            "<table><tr><th>Setting</th></tr><tr><td>timeout</td><td>replacement</td></tr></table>",
            &mut modules,
        );
        assert_eq!(modules[0].submodules["timeout"], "first");
    }

    #[test]
    fn test_rejects_own_name_and_long_names() {
        let long = "n".repeat(101);
        let html = format!(
            "<table><tr><th>h</th></tr><tr><td>Settings</td><td>self</td></tr><tr><td>{}</td><td>long</td></tr></table>",
            long
        );
        let mut modules = vec![Module::new("Settings", "")];
        mine(&html, &mut modules);
        assert!(modules[0].submodules.is_empty());
    }

    #[test]
    fn test_is_relevant() {
        assert!(is_relevant("All about WIDGETS here", "Widgets"));
        assert!(is_relevant("change a setting", "Zebra"));
        assert!(is_relevant("sub-modules listed", "Zebra"));
        assert!(!is_relevant("nothing to see", "Zebra"));
    }

    #[test]
    fn test_capitalize() {
        assert_eq!(capitalize("function"), "Function");
        assert_eq!(capitalize(""), "");
    }
}
