//! Minimal parser example.
//!
//! Demonstrates the parser-framework workflow:
//! 1. Define node types by implementing `Syntax`.
//! 2. Register them in a grammar.
//! 3. Drive a parse and inspect the resulting tree.
//!
//! The example parses an assignment list such as `a = 1, b = 22`.

use once_cell::sync::Lazy;
use parser_framework::{
    Driver, Fields, Grammar, NodeRef, RegexPattern, Registry, Result, ScanContext, Syntax,
};
use serde_json::Value;
use std::sync::Arc;

static DIGITS: Lazy<std::result::Result<RegexPattern, parser_framework::ScanError>> =
    Lazy::new(|| RegexPattern::new(r"\d+"));

fn digits() -> Result<&'static RegexPattern> {
    DIGITS.as_ref().map_err(Clone::clone)
}

struct Assignment;

impl Syntax for Assignment {
    const NAME: &'static str = "Assignment";

    fn recognize(driver: &Driver, _rest: &str, _options: Option<&Value>) -> Result<bool> {
        Ok(driver.is_word(None))
    }

    fn consume(driver: &mut Driver, fields: &mut Fields, _options: Option<&Value>) -> Result<()> {
        fields.set("name", driver.expect_word(None)?);
        driver.expect("=", None)?;
        driver.skip_space();
        let value = driver.expect(digits()?, Some("expected a number"))?;
        fields.set("value", value);
        Ok(())
    }

    fn render(node: NodeRef<'_>, _options: Option<&Value>) -> String {
        format!(
            "{} = {}",
            node.str("name").unwrap_or_default(),
            node.str("value").unwrap_or_default()
        )
    }
}

struct Assignments;

static REGISTRY: Lazy<Result<Arc<Registry>>> =
    Lazy::new(|| Registry::builder().register::<Assignment>().build());

impl Grammar for Assignments {
    fn registry() -> Result<Arc<Registry>> {
        REGISTRY.clone()
    }
}

fn main() -> Result<()> {
    let mut driver = Driver::new::<Assignments>("a = 1, B = 22,\n c = 333")?;
    let ids = driver.parse_comma::<Assignment>(None)?;

    for id in ids {
        let node = driver.node(id);
        println!("{} -> {}", node.to_json(), node.render(None));
    }

    let mut broken = Driver::new::<Assignments>("a = 1,\nb = x")?;
    if let Err(err) = broken.parse_comma::<Assignment>(None) {
        println!("{}", err);
    }
    Ok(())
}
