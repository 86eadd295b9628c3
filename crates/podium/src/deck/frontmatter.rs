use serde::Deserialize;

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct DeckMeta {
    pub title: Option<String>,
    pub theme: Option<String>,
}

/// Split an optional `---` delimited YAML header off the top of a deck file.
///
/// Returns the parsed metadata and the remaining body. A document without a
/// header yields default metadata and the whole input as body.
pub fn extract(content: &str) -> Result<(DeckMeta, String), serde_yaml::Error> {
    let content = content.trim_start_matches('\u{feff}').replace("\r\n", "\n");

    let Some(rest) = content.strip_prefix("---\n") else {
        return Ok((DeckMeta::default(), content));
    };

    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        if line.trim_end() == "---" {
            let header = &rest[..offset];
            let body = rest[offset + line.len()..].to_string();
            let meta = if header.trim().is_empty() {
                DeckMeta::default()
            } else {
                serde_yaml::from_str(header)?
            };
            return Ok((meta, body));
        }
        offset += line.len();
    }

    // Unterminated header: treat the whole file as slide content.
    Ok((DeckMeta::default(), content))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_front_matter() {
        let (meta, body) = extract("# Hello\n\nWorld").unwrap();
        assert_eq!(meta, DeckMeta::default());
        assert_eq!(body, "# Hello\n\nWorld");
    }

    #[test]
    fn test_title_and_theme() {
        let (meta, body) = extract("---\ntitle: Reduction Kinetics\ntheme: dark\n---\n# One").unwrap();
        assert_eq!(meta.title.as_deref(), Some("Reduction Kinetics"));
        assert_eq!(meta.theme.as_deref(), Some("dark"));
        assert_eq!(body, "# One");
    }

    #[test]
    fn test_unknown_keys_ignored() {
        let (meta, _) = extract("---\ntitle: T\nauthor: someone\n---\nbody").unwrap();
        assert_eq!(meta.title.as_deref(), Some("T"));
    }

    #[test]
    fn test_unterminated_header_is_body() {
        let (meta, body) = extract("---\ntitle: T\n# Slide").unwrap();
        assert_eq!(meta, DeckMeta::default());
        assert!(body.contains("# Slide"));
    }

    #[test]
    fn test_malformed_yaml_errors() {
        assert!(extract("---\ntitle: [unclosed\n---\nbody").is_err());
    }
}
