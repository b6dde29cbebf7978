//! Text wrapping for console log lines

/// Wraps each line of `text` at word boundaries so no line exceeds `max_width`
/// characters, unless a single word is longer. Continuation lines repeat the
/// original line's leading indentation.
pub fn wrap_text(text: &str, max_width: usize) -> String {
    let mut wrapped_lines = Vec::new();

    for line in text.lines() {
        if line.chars().count() <= max_width {
            wrapped_lines.push(line.to_string());
            continue;
        }

        let content = line.trim_start();
        let indent = &line[..line.len() - content.len()];

        let indent_width = indent.chars().count();
        let mut current = String::from(indent);
        let mut current_width = indent_width;
        let mut line_started = false;

        // Split on single spaces so runs of spaces inside a line survive.
        for word in content.split(' ') {
            let word_width = word.chars().count();

            if line_started && current_width + 1 + word_width > max_width {
                wrapped_lines.push(std::mem::take(&mut current));
                current.push_str(indent);
                current.push_str(word);
                current_width = indent_width + word_width;
                continue;
            }

            if line_started {
                current.push(' ');
                current_width += 1;
            }
            current.push_str(word);
            current_width += word_width;
            line_started = true;
        }

        wrapped_lines.push(current);
    }

    wrapped_lines.join("\n")
}
