//! Effect code sanitization
//!
//! Best-effort text filter, not a parser. It strips one class wrapper of the
//! form `[export default] class <X>Effect extends BaseEffect {` and the final
//! closing brace. Assumes a single top-level class whose closing brace is the
//! last one in the file; anything else may come out as an inert fragment.

use std::sync::OnceLock;

use regex::Regex;

/// Members that mark the remaining text as an inlined class body.
const CLASS_MEMBER_MARKERS: &[&str] = &["constructor(", "initialize(", "render("];

pub const INLINED_CLASS_COMMENT: &str = "// Original effect code inlined";

struct Patterns {
    exported_class: Regex,
    bare_class: Regex,
    trailing_brace: Regex,
}

fn patterns() -> &'static Patterns {
    static PATTERNS: OnceLock<Patterns> = OnceLock::new();
    PATTERNS.get_or_init(|| Patterns {
        exported_class: Regex::new(r"export\s+default\s+class\s+\w+Effect\s+extends\s+BaseEffect\s*\{")
            .expect("static regex"),
        bare_class: Regex::new(r"\Aclass\s+\w+Effect\s+extends\s+BaseEffect\s*\{").expect("static regex"),
        trailing_brace: Regex::new(r"\}\s*\z").expect("static regex"),
    })
}

/// Turn raw effect source into a body that can sit inside `(element, params) => { ... }`.
pub fn sanitize_code(raw: &str) -> String {
    let p = patterns();
    let stripped = p.exported_class.replace(raw, "");
    let stripped = p.bare_class.replace(&stripped, "");
    let stripped = p.trailing_brace.replace(&stripped, "");
    let body = stripped.trim();

    if CLASS_MEMBER_MARKERS.iter().any(|m| body.contains(m)) {
        format!("\n    {}\n    {}\n    ", INLINED_CLASS_COMMENT, body)
    } else {
        body.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exported_class_unwrapped_and_marked() {
        let raw = "export default class PulseGlowEffect extends BaseEffect {\n  constructor() { super(); }\n  render(ctx) { ctx.draw(); }\n}\n";
        let out = sanitize_code(raw);
        assert!(!out.contains("class PulseGlowEffect"));
        assert!(out.contains(INLINED_CLASS_COMMENT));
        assert!(out.contains("render(ctx) { ctx.draw(); }"));
        assert!(!out.trim_end().ends_with("}\n}"));
    }

    #[test]
    fn test_bare_class_unwrapped() {
        let raw = "class NeonEffect extends BaseEffect {\n  initialize() {}\n}";
        let out = sanitize_code(raw);
        assert!(out.contains("initialize() {}"));
        assert!(!out.contains("class NeonEffect"));
    }

    #[test]
    fn test_plain_functions_not_wrapped() {
        let raw = "function tick(el) {\n  el.style.opacity = 1;\n}\n";
        let out = sanitize_code(raw);
        assert!(!out.contains(INLINED_CLASS_COMMENT));
        // Only the final brace is stripped.
        assert_eq!(out, "function tick(el) {\n  el.style.opacity = 1;");
    }

    #[test]
    fn test_bare_class_must_lead() {
        let raw = "// header\nclass NeonEffect extends BaseEffect {\n  x = 1;\n}";
        let out = sanitize_code(raw);
        assert!(out.contains("class NeonEffect"));
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(sanitize_code("   \n"), "");
    }
}
