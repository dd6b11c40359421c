//! Identifier transforms. All pure and total.

/// `pulse-glow` -> `pulseGlow`. Every hyphen is dropped and the character
/// after it upper-cased; the leading character is lower-cased.
pub fn camel_case(id: &str) -> String {
    let mut out = String::with_capacity(id.len());
    let mut upper_next = false;
    for ch in id.chars() {
        if ch == '-' {
            upper_next = true;
            continue;
        }
        if upper_next {
            out.extend(ch.to_uppercase());
            upper_next = false;
        } else if out.is_empty() {
            out.extend(ch.to_lowercase());
        } else {
            out.push(ch);
        }
    }
    out
}

/// `pulse-glow` -> `Pulse Glow`
pub fn title_case(id: &str) -> String {
    id.split('-')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Name of the exported binding in a generated module.
pub fn binding_name(id: &str) -> String {
    format!("{}Effect", camel_case(id))
}

pub fn module_file_name(id: &str, suffix: &str) -> String {
    format!("{}{}", id, suffix)
}

/// Whether `name` can be used as a bare script identifier.
pub fn is_script_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' || c == '$' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_camel_case() {
        assert_eq!(camel_case("pulse-glow"), "pulseGlow");
        assert_eq!(camel_case("neon"), "neon");
        assert_eq!(camel_case("quantum-glitch-wave"), "quantumGlitchWave");
        assert_eq!(camel_case("glow-3d"), "glow3d");
        assert_eq!(camel_case(""), "");
    }

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("pulse-glow"), "Pulse Glow");
        assert_eq!(title_case("neon"), "Neon");
        assert_eq!(title_case("glow-3d"), "Glow 3d");
    }

    #[test]
    fn test_binding_name() {
        assert_eq!(binding_name("pulse-glow"), "pulseGlowEffect");
        assert!(is_script_identifier(&binding_name("pulse-glow")));
        assert!(!is_script_identifier(&binding_name("3d-spin")));
        assert!(!is_script_identifier(&binding_name("neon sign")));
    }
}
