use crate::{pattern, LazyPattern};
use once_cell::sync::Lazy;
use parser_framework::{Driver, Fields, NodeRef, RegexPattern, Result, ScanContext, Syntax};
use serde_json::Value;

static NUMBER: LazyPattern = Lazy::new(|| RegexPattern::new(r"-?\d+(?:\.\d+)?"));
static TEXT_CHUNK: LazyPattern = Lazy::new(|| RegexPattern::new(r#"[^"\\]+"#));
static UNICODE_DIGITS: LazyPattern = Lazy::new(|| RegexPattern::new(r#"[^}"]*"#));

const ESCAPES: [(&str, char); 4] = [("\\n", '\n'), ("\\t", '\t'), ("\\\"", '"'), ("\\\\", '\\')];

/// Integer or decimal literal, optionally negative. Integers outside the
/// `i64` range are kept as floats.
pub struct Number;

impl Syntax for Number {
    const NAME: &'static str = "Number";

    fn recognize(driver: &Driver, _rest: &str, _options: Option<&Value>) -> Result<bool> {
        driver.is(pattern(&NUMBER)?, None)
    }

    fn consume(driver: &mut Driver, fields: &mut Fields, _options: Option<&Value>) -> Result<()> {
        let literal = driver.expect(pattern(&NUMBER)?, Some("expected a number"))?;
        let value = match literal.parse::<i64>() {
            Ok(int) => Value::from(int),
            Err(_) => match literal.parse::<f64>() {
                Ok(float) if float.is_finite() => Value::from(float),
                _ => return driver.fail(format!("invalid number: {}", literal)),
            },
        };
        fields.set("value", value);
        Ok(())
    }

    fn render(node: NodeRef<'_>, _options: Option<&Value>) -> String {
        match node.scalar("value") {
            Some(Value::Number(number)) => match number.as_f64() {
                Some(float) if number.is_f64() => render_float(float),
                _ => number.to_string(),
            },
            _ => String::new(),
        }
    }
}

// Positional notation only; the literal syntax has no exponent.
fn render_float(float: f64) -> String {
    if float.fract() == 0.0 {
        format!("{:.1}", float)
    } else {
        float.to_string()
    }
}

/// Double-quoted string. Supports `\n`, `\t`, `\"`, `\\` and `\u{hex}`.
///
/// Rendering escapes control characters as `\u{..}`; with the option
/// `{"ascii": true}` every non-ASCII character is escaped too.
pub struct Text;

impl Syntax for Text {
    const NAME: &'static str = "Text";

    fn recognize(driver: &Driver, _rest: &str, _options: Option<&Value>) -> Result<bool> {
        driver.is("\"", None)
    }

    fn consume(driver: &mut Driver, fields: &mut Fields, _options: Option<&Value>) -> Result<()> {
        driver.expect("\"", None)?;
        let mut value = String::new();

        loop {
            if let Some(chunk) = driver.read(pattern(&TEXT_CHUNK)?)? {
                value.push_str(&chunk);
                continue;
            }
            if driver.read("\"")?.is_some() {
                break;
            }
            if driver.read("\\u{")?.is_some() {
                let hex = driver.expect(pattern(&UNICODE_DIGITS)?, None)?;
                driver.expect("}", Some("unterminated unicode escape"))?;
                value.push(driver.parse_unicode(&hex)?);
                continue;
            }

            let mut escaped = None;
            for (sequence, ch) in ESCAPES {
                if driver.read(sequence)?.is_some() {
                    escaped = Some(ch);
                    break;
                }
            }
            match escaped {
                Some(ch) => value.push(ch),
                None if driver.is_end() => return driver.fail("unterminated text"),
                None => return driver.fail("invalid escape sequence"),
            }
        }

        fields.set("value", value);
        Ok(())
    }

    fn render(node: NodeRef<'_>, options: Option<&Value>) -> String {
        let ascii = options
            .and_then(|options| options.get("ascii"))
            .and_then(Value::as_bool)
            .unwrap_or(false);

        let mut out = String::from("\"");
        for ch in node.str("value").unwrap_or_default().chars() {
            match ch {
                '"' => out.push_str("\\\""),
                '\\' => out.push_str("\\\\"),
                '\n' => out.push_str("\\n"),
                '\t' => out.push_str("\\t"),
                ch if ch.is_control() || (ascii && !ch.is_ascii()) => {
                    out.push_str(&format!("\\u{{{:x}}}", ch as u32))
                }
                ch => out.push(ch),
            }
        }
        out.push('"');
        out
    }
}
