//! Percent-style label templates.
//!
//! The centre disc's title is treated as a printf-style template applied to
//! the disc's share of its pie (always 100 for a single full wedge). Plain
//! titles pass through untouched; `%%` collapses to a literal percent sign.

/// Render `template` with `value` substituted for each conversion.
///
/// Supported conversions: `%d`/`%i` (truncated integer), `%f`/`%F` with an
/// optional precision (`%.1f`), `%s` (shortest float form) and `%%`.
/// A minimum field width (`%5.1f`) pads with spaces on the left. Anything
/// else is copied through literally.
///
/// # Examples
/// ```
/// use aarshjul_types::formatting::format_percent_template;
/// assert_eq!(format_percent_template("Årshjul 2025", 100.0), "Årshjul 2025");
/// assert_eq!(format_percent_template("%1.1f%%", 100.0), "100.0%");
/// assert_eq!(format_percent_template("%d", 42.7), "42");
/// ```
pub fn format_percent_template(template: &str, value: f64) -> String {
    let mut out = String::with_capacity(template.len());
    let mut chars = template.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '%' {
            out.push(c);
            continue;
        }

        let mut spec = String::from("%");
        let mut width = String::new();
        let mut precision: Option<String> = None;

        while let Some(&d) = chars.peek() {
            if d.is_ascii_digit() {
                match precision.as_mut() {
                    Some(p) => p.push(d),
                    None => width.push(d),
                }
            } else if d == '.' && precision.is_none() {
                precision = Some(String::new());
            } else {
                break;
            }
            spec.push(d);
            chars.next();
        }

        let Some(conversion) = chars.next() else {
            out.push_str(&spec);
            break;
        };

        let formatted = match conversion {
            '%' if spec.len() == 1 => Some("%".to_string()),
            'd' | 'i' => Some(format!("{}", value.trunc() as i64)),
            'f' | 'F' => {
                let digits = precision
                    .as_deref()
                    .map(|p| p.parse::<usize>().unwrap_or(0))
                    .unwrap_or(6);
                Some(format!("{:.*}", digits, value))
            }
            's' => Some(shortest_float(value)),
            _ => None,
        };

        match formatted {
            Some(text) => {
                let min_width = width.parse::<usize>().unwrap_or(0);
                let len = text.chars().count();
                if len < min_width {
                    out.extend(std::iter::repeat_n(' ', min_width - len));
                }
                out.push_str(&text);
            }
            None => {
                out.push_str(&spec);
                out.push(conversion);
            }
        }
    }

    out
}

/// Float rendering that always keeps one fractional digit for whole values.
fn shortest_float(value: f64) -> String {
    if value.fract() == 0.0 && value.is_finite() {
        format!("{:.1}", value)
    } else {
        format!("{}", value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_title_unchanged() {
        assert_eq!(format_percent_template("2025", 100.0), "2025");
        assert_eq!(format_percent_template("", 100.0), "");
    }

    #[test]
    fn test_escaped_percent() {
        assert_eq!(format_percent_template("100%% plan", 100.0), "100% plan");
    }

    #[test]
    fn test_conversions() {
        assert_eq!(format_percent_template("%.0f", 100.0), "100");
        assert_eq!(format_percent_template("%.2f", 100.0), "100.00");
        assert_eq!(format_percent_template("%f", 100.0), "100.000000");
        assert_eq!(format_percent_template("%s", 100.0), "100.0");
        assert_eq!(format_percent_template("[%6.1f]", 100.0), "[ 100.0]");
    }

    #[test]
    fn test_unknown_and_trailing_specifiers_kept() {
        assert_eq!(format_percent_template("50%x", 100.0), "50%x");
        assert_eq!(format_percent_template("end %", 100.0), "end %");
        assert_eq!(format_percent_template("end %.", 100.0), "end %.");
    }
}
