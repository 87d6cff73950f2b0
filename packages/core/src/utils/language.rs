//! Source language auto-detection for pasted code
//!
//! A fixed, ordered table of regular expressions. Each language lists a few
//! signatures; the first language whose signatures score at least its
//! threshold wins. The ordering matters: TypeScript is tested before
//! JavaScript because most TypeScript is also valid JavaScript, and JSON before
//! everything because a JSON object also looks like a JavaScript literal.

use regex::Regex;
use std::sync::LazyLock;

/// Label used when nothing matches
pub const PLAINTEXT: &str = "plaintext";

struct LanguageRule {
    language: &'static str,
    patterns: Vec<Regex>,
    threshold: usize,
}

fn rule(language: &'static str, threshold: usize, patterns: &[&str]) -> LanguageRule {
    LanguageRule {
        language,
        patterns: patterns.iter().map(|p| Regex::new(p).unwrap()).collect(),
        threshold,
    }
}

static LANGUAGE_RULES: LazyLock<Vec<LanguageRule>> = LazyLock::new(|| {
    vec![
        rule("json", 1, &[r#"^\s*[\[{]\s*"[^"]+"\s*:"#, r#"^\s*\[\s*("|\d|\{|\])"#]),
        rule(
            "html",
            1,
            &[r"(?i)<!doctype html", r"(?i)</?(html|head|body|div|span|section|ul|li|p)(\s[^>]*)?>"],
        ),
        rule(
            "css",
            2,
            &[
                r"(?m)^\s*[.#]?[a-zA-Z][\w\-.#: ]*\{",
                r"(?m)^\s*[a-z\-]+\s*:\s*[^;]+;\s*$",
                r"@media|@import|:root",
            ],
        ),
        rule(
            "python",
            1,
            &[
                r"(?m)^\s*def \w+\(.*\)\s*(->\s*[\w\[\], ]+)?:\s*$",
                r"(?m)^\s*(from [\w.]+ )?import [\w., ]+$",
                r"(?m)^\s*class \w+(\(.*\))?:\s*$",
                r#"if __name__ == ['"]__main__['"]"#,
                r"\bprint\(",
            ],
        ),
        rule(
            "rust",
            1,
            &[
                r"\bfn \w+(<[^>]*>)?\(",
                r"\blet mut \w+",
                r"\bimpl(<[^>]*>)? \w+",
                r"\b(pub )?(struct|enum|trait) \w+",
                r"\w+!\(",
                r"\buse \w+(::\w+)+",
            ],
        ),
        rule(
            "typescript",
            1,
            &[
                r"\binterface \w+\s*\{",
                r"\btype \w+\s*=",
                r"\b(const|let|var)\s+\w+\s*:\s*[A-Za-z\[\]<>]+\s*=",
                r"\)\s*:\s*(string|number|boolean|void|Promise<)",
                r"@(Component|Injectable|NgModule|Input|Output)\(",
                r"\b(public|private|protected|readonly) \w+\s*[:(]",
            ],
        ),
        rule(
            "java",
            1,
            &[
                r"\bpublic (static )?(class|void|final) ",
                r"\bSystem\.out\.println\(",
                r"(?m)^\s*import java\.",
                r"\bpublic static void main\(String\[\]",
            ],
        ),
        rule(
            "csharp",
            1,
            &[
                r"(?m)^\s*using System(\.\w+)*;",
                r"\bnamespace \w+(\.\w+)*",
                r"\bConsole\.Write(Line)?\(",
                r"\{\s*get;\s*set;\s*\}",
            ],
        ),
        rule(
            "go",
            1,
            &[
                r"(?m)^package \w+\s*$",
                r"\bfunc (\(\w+ \*?\w+\) )?\w+\(",
                r"\bfmt\.Print",
                r":= ",
            ],
        ),
        rule(
            "sql",
            1,
            &[
                r"(?i)\bselect\b[\s\S]+\bfrom\b",
                r"(?i)\binsert\s+into\b",
                r"(?i)\bcreate\s+(table|index|view)\b",
                r"(?i)\bupdate\s+\w+\s+set\b",
                r"(?i)\bdelete\s+from\b",
            ],
        ),
        rule(
            "bash",
            1,
            &[
                r"^#!/(usr/)?bin/(env )?(ba|z)?sh",
                r"(?m)^\s*(sudo|apt|apt-get|brew|npm|npx|yarn|pnpm|git|cd|ls|echo|export|curl|docker|cargo|ng) ",
                r"\$\{?\w+\}?",
            ],
        ),
        rule(
            "javascript",
            1,
            &[
                r"\b(const|let|var)\s+\w+\s*=",
                r"\bfunction\s*\w*\s*\(",
                r"=>",
                r"\bconsole\.(log|error|warn)\(",
                r"\brequire\(",
                r"\b(module\.)?exports\b",
                r"\bdocument\.\w+",
            ],
        ),
    ]
});

/// Guess the language of a code snippet
///
/// # Examples
///
/// ```
/// use portfolio_core::utils::detect_language;
///
/// assert_eq!(detect_language("def greet(name):\n    print(name)"), "python");
/// assert_eq!(detect_language("const x = () => 42;"), "javascript");
/// assert_eq!(detect_language("just some words"), "plaintext");
/// ```
pub fn detect_language(code: &str) -> &'static str {
    let code = code.trim();
    if code.is_empty() {
        return PLAINTEXT;
    }

    LANGUAGE_RULES
        .iter()
        .find(|rule| {
            let hits = rule.patterns.iter().filter(|p| p.is_match(code)).count();
            hits >= rule.threshold
        })
        .map(|rule| rule.language)
        .unwrap_or(PLAINTEXT)
}
