/// Split a deck body (front matter already removed) into raw slide texts.
///
/// Slide breaks come from:
/// 1. a `---` line with blank lines (or the document edge) on both sides
/// 2. three or more consecutive blank lines
/// 3. a `# ` heading when the slide being built already has content
///
/// Nothing inside a fenced code block ever starts a new slide.
pub fn split(body: &str) -> Vec<String> {
    let body = body.replace("\r\n", "\n");
    let lines: Vec<&str> = body.split('\n').collect();

    let mut slides = Vec::new();
    let mut current: Vec<&str> = Vec::new();
    let mut fence: Option<Fence> = None;
    let mut blank_run = 0;

    for (i, line) in lines.iter().enumerate() {
        let trimmed = line.trim();

        if let Some(open) = &fence {
            if open.closes(trimmed) {
                fence = None;
            }
            current.push(line);
            continue;
        }

        if let Some(open) = Fence::opening(trimmed) {
            fence = Some(open);
            blank_run = 0;
            current.push(line);
            continue;
        }

        if trimmed.is_empty() {
            blank_run += 1;
            if blank_run == 3 {
                flush(&mut current, &mut slides);
            } else if blank_run < 3 {
                current.push(line);
            }
            continue;
        }

        let prev_blank = blank_run > 0 || i == 0;
        blank_run = 0;

        if is_dash_separator(trimmed) {
            let next_blank = lines.get(i + 1).is_none_or(|l| l.trim().is_empty());
            if prev_blank && next_blank {
                flush(&mut current, &mut slides);
                continue;
            }
        }

        if line.starts_with("# ") && has_content(&current) {
            flush(&mut current, &mut slides);
        }

        current.push(line);
    }

    flush(&mut current, &mut slides);
    slides
}

struct Fence {
    marker: char,
    len: usize,
}

impl Fence {
    fn opening(trimmed: &str) -> Option<Self> {
        let marker = trimmed.chars().next()?;
        if marker != '`' && marker != '~' {
            return None;
        }
        let len = trimmed.chars().take_while(|&c| c == marker).count();
        (len >= 3).then_some(Self { marker, len })
    }

    fn closes(&self, trimmed: &str) -> bool {
        let count = trimmed.chars().take_while(|&c| c == self.marker).count();
        count >= self.len && trimmed.chars().skip(count).all(char::is_whitespace)
    }
}

fn has_content(lines: &[&str]) -> bool {
    lines.iter().any(|l| !l.trim().is_empty())
}

fn flush(current: &mut Vec<&str>, slides: &mut Vec<String>) {
    let text = current.join("\n").trim().to_string();
    if !text.is_empty() {
        slides.push(text);
    }
    current.clear();
}

fn is_dash_separator(line: &str) -> bool {
    line.len() >= 3 && line.chars().all(|c| c == '-')
}
