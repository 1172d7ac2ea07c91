use crate::literal::{Number, Text};
use crate::{pattern, LazyPattern};
use once_cell::sync::Lazy;
use parser_framework::{Driver, Fields, NodeRef, RegexPattern, Result, ScanContext, Syntax};
use serde_json::Value;

static IDENTIFIER: LazyPattern = Lazy::new(|| RegexPattern::new(r"[A-Za-z_][A-Za-z0-9_]*"));
static CALL: LazyPattern = Lazy::new(|| RegexPattern::new(r"[A-Za-z_][A-Za-z0-9_]*\s*\("));
static OPEN_PAREN: LazyPattern = Lazy::new(|| RegexPattern::new(r"\s*\("));

/// Case-sensitive name. Trailing space is left to the caller.
pub struct Identifier;

impl Syntax for Identifier {
    const NAME: &'static str = "Identifier";

    fn recognize(driver: &Driver, _rest: &str, _options: Option<&Value>) -> Result<bool> {
        driver.is(pattern(&IDENTIFIER)?, None)
    }

    fn consume(driver: &mut Driver, fields: &mut Fields, _options: Option<&Value>) -> Result<()> {
        let name = driver.expect(pattern(&IDENTIFIER)?, Some("expected an identifier"))?;
        fields.set("name", name);
        Ok(())
    }

    fn render(node: NodeRef<'_>, _options: Option<&Value>) -> String {
        node.str("name").unwrap_or_default().to_string()
    }
}

/// `name(arg, ...)`
pub struct Call;

impl Syntax for Call {
    const NAME: &'static str = "Call";

    fn recognize(driver: &Driver, _rest: &str, _options: Option<&Value>) -> Result<bool> {
        driver.is(pattern(&CALL)?, None)
    }

    fn consume(driver: &mut Driver, fields: &mut Fields, options: Option<&Value>) -> Result<()> {
        fields.set("name", driver.parse::<Identifier>(options)?);
        driver.skip_space();
        driver.expect("(", None)?;
        driver.skip_space();

        let args = if driver.is_match(")")? {
            Vec::new()
        } else {
            driver.parse_comma::<Expression>(options)?
        };
        fields.set("args", args);

        driver.skip_space();
        driver.expect(")", None)?;
        Ok(())
    }

    fn render(node: NodeRef<'_>, options: Option<&Value>) -> String {
        let name = node.child("name").map(|name| name.render(options));
        let args: Vec<_> = node
            .children("args")
            .iter()
            .map(|arg| arg.render(options))
            .collect();
        format!("{}({})", name.unwrap_or_default(), args.join(", "))
    }
}

/// Any value: text, number, call or identifier. Exactly one of the fields
/// `text`, `number`, `call`, `identifier` is set.
pub struct Expression;

const ALTERNATIVES: [&str; 4] = ["text", "number", "call", "identifier"];

impl Syntax for Expression {
    const NAME: &'static str = "Expression";

    fn recognize(driver: &Driver, _rest: &str, options: Option<&Value>) -> Result<bool> {
        Ok(driver.is_node::<Text>(options)?
            || driver.is_node::<Number>(options)?
            || driver.is_node::<Identifier>(options)?)
    }

    fn consume(driver: &mut Driver, fields: &mut Fields, options: Option<&Value>) -> Result<()> {
        if driver.is_node::<Text>(options)? {
            fields.set("text", driver.parse::<Text>(options)?);
        } else if driver.is_node::<Number>(options)? {
            fields.set("number", driver.parse::<Number>(options)?);
        } else if driver.is_node::<Identifier>(options)? {
            // a name followed by `(` is re-read as a call
            let name = driver.parse::<Identifier>(options)?;
            if driver.is(pattern(&OPEN_PAREN)?, None)? {
                driver.set_position_before(name)?;
                fields.set("call", driver.parse::<Call>(options)?);
            } else {
                fields.set("identifier", name);
            }
        } else {
            return driver.fail("expected an expression");
        }
        Ok(())
    }

    fn render(node: NodeRef<'_>, options: Option<&Value>) -> String {
        ALTERNATIVES
            .iter()
            .find_map(|field| node.child(field))
            .map(|value| value.render(options))
            .unwrap_or_default()
    }
}
