//! Line unfolding and VEVENT block splitting.

const EVENT_BEGIN: &str = "BEGIN:VEVENT";

/// Normalize line endings to `\n` and join folded continuation lines.
///
/// A line starting with a space or tab continues the previous one; exactly
/// that one whitespace character is removed.
pub fn unfold(content: &str) -> String {
    let normalized = content.replace("\r\n", "\n").replace('\r', "\n");
    let mut unfolded = String::with_capacity(normalized.len());

    for (i, line) in normalized.split('\n').enumerate() {
        match line.strip_prefix([' ', '\t']) {
            Some(continuation) => unfolded.push_str(continuation),
            None => {
                if i > 0 {
                    unfolded.push('\n');
                }
                unfolded.push_str(line);
            }
        }
    }

    unfolded
}

/// The unparsed text of one VEVENT, starting at its `BEGIN:VEVENT` line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawBlock<'a> {
    text: &'a str,
}

impl<'a> RawBlock<'a> {
    pub fn new(text: &'a str) -> Self {
        RawBlock { text }
    }

    #[cfg(test)]
    pub fn as_str(&self) -> &'a str {
        self.text
    }

    /// Property lines that belong to the event itself.
    ///
    /// Skips the opening `BEGIN:VEVENT`, anything inside nested components
    /// (VALARM and friends), and stops at the block's own `END:` line.
    /// A block with no `END:VEVENT` runs to the end of its span.
    pub fn property_lines(&self) -> impl Iterator<Item = &'a str> + 'a {
        self.text
            .lines()
            .skip(1)
            .scan(0usize, |depth, line| {
                if line.starts_with("BEGIN:") {
                    *depth += 1;
                    Some(None)
                } else if line.starts_with("END:") {
                    if *depth == 0 {
                        return None;
                    }
                    *depth -= 1;
                    Some(None)
                } else if *depth == 0 {
                    Some(Some(line))
                } else {
                    Some(None)
                }
            })
            .flatten()
    }
}

/// Split unfolded text into one block per `BEGIN:VEVENT` marker.
///
/// Each block runs up to the next marker or the end of the text. Anything
/// before the first marker (calendar headers, VTIMEZONE definitions) is dropped.
pub fn split_blocks(unfolded: &str) -> Vec<RawBlock<'_>> {
    let mut offset = 0;
    let starts: Vec<usize> = unfolded
        .split('\n')
        .filter_map(|line| {
            let line_start = offset;
            offset += line.len() + 1;
            (line.trim_end() == EVENT_BEGIN).then_some(line_start)
        })
        .collect();

    starts
        .iter()
        .enumerate()
        .map(|(i, &start)| {
            let end = starts.get(i + 1).copied().unwrap_or(unfolded.len());
            RawBlock::new(&unfolded[start..end])
        })
        .collect()
}
