pub mod frontmatter;
pub mod splitter;

use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;

use crate::error::DeckError;

static HEADING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^#{1,6}\s+(.+?)\s*#*\s*$").expect("valid heading regex"));

/// One unit of presentation content. The navigator only cares about the
/// slide's position and its optional title.
#[derive(Debug, Clone, PartialEq)]
pub struct Slide {
    pub title: Option<String>,
    /// The raw markdown text of the slide, title line included.
    pub body: String,
}

impl Slide {
    pub fn new(title: Option<&str>, body: impl Into<String>) -> Self {
        Self {
            title: title.map(str::to_string),
            body: body.into(),
        }
    }

    /// Build a slide from its raw markdown, taking the first heading as title.
    pub fn from_markdown(raw: &str) -> Self {
        Self {
            title: title_line(raw).map(|(_, title)| title),
            body: raw.to_string(),
        }
    }

    /// Body text with the title heading line removed, for rendering under the title.
    pub fn content(&self) -> String {
        let skip = self
            .title
            .as_ref()
            .and_then(|_| title_line(&self.body))
            .map(|(index, _)| index);
        self.body
            .lines()
            .enumerate()
            .filter(|(i, _)| Some(*i) != skip)
            .map(|(_, line)| line)
            .collect::<Vec<_>>()
            .join("\n")
            .trim()
            .to_string()
    }
}

/// Line index and text of the first heading outside fenced code.
fn title_line(raw: &str) -> Option<(usize, String)> {
    let mut in_fence = false;
    for (index, line) in raw.lines().enumerate() {
        let trimmed = line.trim_start();
        if trimmed.starts_with("```") || trimmed.starts_with("~~~") {
            in_fence = !in_fence;
            continue;
        }
        if in_fence {
            continue;
        }
        if let Some(caps) = HEADING.captures(trimmed) {
            return Some((index, caps[1].to_string()));
        }
    }
    None
}

/// A fixed, ordered, non-empty sequence of slides.
#[derive(Debug, Clone)]
pub struct Deck {
    title: Option<String>,
    theme: Option<String>,
    slides: Vec<Slide>,
}

impl Deck {
    /// Build a deck. An empty slide list is rejected: every other component
    /// relies on there being at least one slide to show.
    pub fn new(slides: Vec<Slide>) -> Result<Self, DeckError> {
        if slides.is_empty() {
            return Err(DeckError::Empty);
        }
        Ok(Self {
            title: None,
            theme: None,
            slides,
        })
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Parse a markdown deck: optional front matter, then slide bodies.
    pub fn parse(content: &str) -> Result<Self, DeckError> {
        let (meta, body) = frontmatter::extract(content)?;
        let slides = splitter::split(&body)
            .iter()
            .map(|raw| Slide::from_markdown(raw))
            .collect();
        let mut deck = Self::new(slides)?;
        deck.title = meta.title;
        deck.theme = meta.theme;
        Ok(deck)
    }

    /// Load a deck file. Without a front matter title the file stem is used.
    pub fn load(path: &Path) -> Result<Self, DeckError> {
        let content = std::fs::read_to_string(path).map_err(|source| DeckError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let mut deck = Self::parse(&content)?;
        if deck.title.is_none() {
            deck.title = path
                .file_stem()
                .map(|stem| stem.to_string_lossy().to_string());
        }
        Ok(deck)
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn theme(&self) -> Option<&str> {
        self.theme.as_deref()
    }

    pub fn slide_count(&self) -> usize {
        self.slides.len()
    }

    pub fn slide(&self, index: usize) -> Option<&Slide> {
        self.slides.get(index)
    }

    pub fn slides(&self) -> &[Slide] {
        &self.slides
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_deck_rejected() {
        assert!(matches!(Deck::new(Vec::new()), Err(DeckError::Empty)));
        assert!(matches!(Deck::parse("\n\n"), Err(DeckError::Empty)));
        assert!(matches!(
            Deck::parse("---\ntitle: Nothing here\n---\n"),
            Err(DeckError::Empty)
        ));
    }

    #[test]
    fn test_parse_titles_and_meta() {
        let content = "---\ntitle: Wüstite Reduction Kinetics\n---\n\
                       # Introduction\n\nWhy iron oxides matter\n\n\
                       # Methods\n\n- TGA\n- XRD\n\n---\n\nNo heading here";
        let deck = Deck::parse(content).unwrap();
        assert_eq!(deck.title(), Some("Wüstite Reduction Kinetics"));
        assert_eq!(deck.slide_count(), 3);
        assert_eq!(deck.slides()[0].title.as_deref(), Some("Introduction"));
        assert_eq!(deck.slides()[1].title.as_deref(), Some("Methods"));
        assert_eq!(deck.slides()[2].title, None);
    }

    #[test]
    fn test_title_from_h2_and_closing_hashes() {
        let slide = Slide::from_markdown("Some intro\n\n## Results ##\n\nText");
        assert_eq!(slide.title.as_deref(), Some("Results"));
    }

    #[test]
    fn test_title_ignores_code_comments() {
        let slide = Slide::from_markdown("```sh\n# not a title\n```\n\n# Real");
        assert_eq!(slide.title.as_deref(), Some("Real"));
    }

    #[test]
    fn test_content_strips_title_line() {
        let slide = Slide::from_markdown("# Methods\n\n- TGA\n- XRD");
        assert_eq!(slide.content(), "- TGA\n- XRD");

        let untitled = Slide::from_markdown("Just text");
        assert_eq!(untitled.content(), "Just text");
    }

    #[test]
    fn test_content_keeps_code_comments() {
        let slide = Slide::from_markdown("```sh\n# not a title\n```\n\n# Real\n\nbody");
        assert_eq!(slide.title.as_deref(), Some("Real"));
        assert_eq!(slide.content(), "```sh\n# not a title\n```\n\n\nbody");
    }

    #[test]
    fn test_load_missing_file() {
        let err = Deck::load(Path::new("/definitely/not/here.md")).unwrap_err();
        assert!(matches!(err, DeckError::Read { .. }));
    }

    #[test]
    fn test_load_uses_file_stem_as_title() {
        let dir = std::env::temp_dir().join(format!("podium-deck-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("kinetics-talk.md");
        std::fs::write(&path, "# One\n\n# Two\n").unwrap();

        let deck = Deck::load(&path).unwrap();
        assert_eq!(deck.title(), Some("kinetics-talk"));
        assert_eq!(deck.slide_count(), 2);

        std::fs::remove_dir_all(&dir).unwrap();
    }
}
