//! Text cleanup applied to both renditions before matching.
//!
//! The output is a single line: no control characters, no runs of whitespace,
//! and only word characters plus `: . - _ /` as punctuation. Identifier
//! patterns and the whitespace tokenizer both rely on that shape.

use std::sync::OnceLock;

use fancy_regex::Regex as FancyRegex;
use regex::Regex;
use unicode_normalization::UnicodeNormalization;

struct Rules {
    control: Regex,
    escaped_quote: Regex,
    case_boundary: FancyRegex,
    glued_url: FancyRegex,
    dashes: Regex,
    tight_punct: FancyRegex,
    disallowed: Regex,
    hyphens: Regex,
    underscores: Regex,
    dots: Regex,
    slashes: Regex,
    whitespace: Regex,
}

fn rules() -> &'static Rules {
    static RULES: OnceLock<Rules> = OnceLock::new();
    RULES.get_or_init(|| Rules {
        control: Regex::new(r"[\x00-\x1F\x7F]").unwrap(),
        escaped_quote: Regex::new(r#"\\(['"“”‘’`´])"#).unwrap(),
        case_boundary: FancyRegex::new(r"(?<=[a-z])(?=[A-Z])").unwrap(),
        glued_url: FancyRegex::new(r"(?<=[a-zA-Z])(?=https?://)").unwrap(),
        dashes: Regex::new(r"[\u{2010}\u{2011}\u{2012}\u{2013}\u{2014}\u{2212}]").unwrap(),
        tight_punct: FancyRegex::new(r"([,;!?)\]\}])(?=\S)").unwrap(),
        disallowed: Regex::new(r"[^\w\s:.\-_/]").unwrap(),
        hyphens: Regex::new(r"-{2,}").unwrap(),
        underscores: Regex::new(r"_{2,}").unwrap(),
        dots: Regex::new(r"\.{2,}").unwrap(),
        slashes: Regex::new(r"/{3,}").unwrap(),
        whitespace: Regex::new(r"\s+").unwrap(),
    })
}

/// Normalise raw extracted text into the single-line form the matcher expects.
pub fn clean_text(raw: &str) -> String {
    let r = rules();

    // Compatibility forms: ligatures, full-width digits and letters.
    let text: String = raw.nfkc().collect();

    let text = r.control.replace_all(&text, " ");
    let text = r.escaped_quote.replace_all(&text, "$1");
    let text = fancy_replace(&r.case_boundary, &text, " ");
    let text = fancy_replace(&r.glued_url, &text, " ");
    let text = r.dashes.replace_all(&text, "-");
    let text = fancy_replace(&r.tight_punct, &text, "$1 ");
    let text = r.disallowed.replace_all(&text, " ");

    let text = r.hyphens.replace_all(&text, "-");
    let text = r.underscores.replace_all(&text, "_");
    let text = r.dots.replace_all(&text, ".");
    let text = r.slashes.replace_all(&text, "//");

    let text = r.whitespace.replace_all(&text, " ");
    text.trim().to_string()
}

/// `fancy-regex` replacement; on a backtracking error the text is left as is.
fn fancy_replace(re: &FancyRegex, text: &str, rep: &str) -> String {
    match re.try_replacen(text, 0, rep) {
        Ok(out) => out.into_owned(),
        Err(e) => {
            tracing::warn!("Text cleanup rule skipped: {e}");
            text.to_string()
        }
    }
}
