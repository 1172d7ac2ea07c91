//! A small grammar shared by the integration tests.
#![allow(dead_code)]

use once_cell::sync::Lazy;
use parser_framework::{
    Driver, Fields, Grammar, NodeRef, RegexPattern, Registry, Result, ScanContext, Syntax,
};
use serde_json::Value;
use std::sync::Arc;

static DIGITS: Lazy<RegexPattern> = Lazy::new(|| RegexPattern::new(r"\d+").unwrap());
static LETTERS: Lazy<RegexPattern> = Lazy::new(|| RegexPattern::new("[a-z]+").unwrap());

fn upper(options: Option<&Value>) -> bool {
    options
        .and_then(|options| options.get("upper"))
        .and_then(Value::as_bool)
        .unwrap_or(false)
}

/// Any word; trailing space is consumed with it.
pub struct AnyWord;

impl Syntax for AnyWord {
    const NAME: &'static str = "AnyWord";

    fn recognize(driver: &Driver, _rest: &str, _options: Option<&Value>) -> Result<bool> {
        Ok(driver.is_word(None))
    }

    fn consume(driver: &mut Driver, fields: &mut Fields, options: Option<&Value>) -> Result<()> {
        let word = driver.expect_word(None)?;
        if upper(options) {
            fields.set("word", word.to_uppercase());
        } else {
            fields.set("word", word);
        }
        Ok(())
    }

    fn render(node: NodeRef<'_>, _options: Option<&Value>) -> String {
        node.str("word").unwrap_or_default().to_string()
    }
}

/// Digits only; trailing space is left alone.
pub struct Number;

impl Syntax for Number {
    const NAME: &'static str = "Number";

    fn recognize(driver: &Driver, _rest: &str, _options: Option<&Value>) -> Result<bool> {
        driver.is(&*DIGITS, None)
    }

    fn consume(driver: &mut Driver, fields: &mut Fields, _options: Option<&Value>) -> Result<()> {
        let digits = driver.expect(&*DIGITS, None)?;
        fields.set("value", digits.parse::<i64>().unwrap_or_default());
        Ok(())
    }

    fn render(node: NodeRef<'_>, _options: Option<&Value>) -> String {
        node.scalar("value").map(Value::to_string).unwrap_or_default()
    }
}

/// Lowercase letters read by pattern; trailing space is left alone.
pub struct Letters;

impl Syntax for Letters {
    const NAME: &'static str = "Letters";

    fn recognize(driver: &Driver, _rest: &str, _options: Option<&Value>) -> Result<bool> {
        driver.is(&*LETTERS, None)
    }

    fn consume(driver: &mut Driver, fields: &mut Fields, _options: Option<&Value>) -> Result<()> {
        fields.set("word", driver.expect(&*LETTERS, None)?);
        Ok(())
    }

    fn render(node: NodeRef<'_>, _options: Option<&Value>) -> String {
        node.str("word").unwrap_or_default().to_string()
    }
}

/// `hello <AnyWord>`
pub struct Greeting;

impl Syntax for Greeting {
    const NAME: &'static str = "Greeting";

    fn recognize(driver: &Driver, _rest: &str, _options: Option<&Value>) -> Result<bool> {
        Ok(driver.is_word(Some("hello")))
    }

    fn consume(driver: &mut Driver, fields: &mut Fields, options: Option<&Value>) -> Result<()> {
        driver.expect_word(Some("hello"))?;
        fields.set("name", driver.parse::<AnyWord>(options)?);
        Ok(())
    }

    fn render(node: NodeRef<'_>, options: Option<&Value>) -> String {
        let name = node.child("name").map(|name| name.render(options));
        format!("hello {}", name.unwrap_or_default())
    }
}

/// Whitespace-separated words ended by `.`
pub struct Sentence;

impl Syntax for Sentence {
    const NAME: &'static str = "Sentence";

    fn recognize(driver: &Driver, _rest: &str, _options: Option<&Value>) -> Result<bool> {
        Ok(driver.is_word(None))
    }

    fn consume(driver: &mut Driver, fields: &mut Fields, options: Option<&Value>) -> Result<()> {
        fields.set("words", driver.parse_chain::<AnyWord>(options)?);
        driver.expect(".", None)?;
        Ok(())
    }

    fn render(node: NodeRef<'_>, options: Option<&Value>) -> String {
        let words: Vec<_> = node
            .children("words")
            .iter()
            .map(|word| word.render(options))
            .collect();
        format!("{}.", words.join(" "))
    }
}

/// `( Nested )` or a word.
pub struct Nested;

impl Syntax for Nested {
    const NAME: &'static str = "Nested";

    fn recognize(driver: &Driver, _rest: &str, _options: Option<&Value>) -> Result<bool> {
        Ok(driver.is_match("(")? || driver.is_word(None))
    }

    fn consume(driver: &mut Driver, fields: &mut Fields, options: Option<&Value>) -> Result<()> {
        if driver.read("(")?.is_some() {
            fields.set("inner", driver.parse::<Nested>(options)?);
            driver.expect(")", None)?;
        } else {
            fields.set("word", driver.expect_word(None)?);
        }
        Ok(())
    }

    fn render(node: NodeRef<'_>, options: Option<&Value>) -> String {
        match node.child("inner") {
            Some(inner) => format!("({})", inner.render(options)),
            None => node.str("word").unwrap_or_default().to_string(),
        }
    }
}

/// Always recognized, consumes nothing.
pub struct Empty;

impl Syntax for Empty {
    const NAME: &'static str = "Empty";

    fn recognize(_driver: &Driver, _rest: &str, _options: Option<&Value>) -> Result<bool> {
        Ok(true)
    }

    fn consume(_driver: &mut Driver, _fields: &mut Fields, _options: Option<&Value>) -> Result<()> {
        Ok(())
    }

    fn render(_node: NodeRef<'_>, _options: Option<&Value>) -> String {
        String::new()
    }
}

/// Parses a word but renders text that cannot be parsed back.
pub struct Garbled;

impl Syntax for Garbled {
    const NAME: &'static str = "Garbled";

    fn recognize(driver: &Driver, _rest: &str, _options: Option<&Value>) -> Result<bool> {
        Ok(driver.is_word(None))
    }

    fn consume(driver: &mut Driver, fields: &mut Fields, _options: Option<&Value>) -> Result<()> {
        fields.set("word", driver.expect_word(None)?);
        Ok(())
    }

    fn render(_node: NodeRef<'_>, _options: Option<&Value>) -> String {
        "***".to_string()
    }
}

pub struct TestGrammar;

static REGISTRY: Lazy<Result<Arc<Registry>>> = Lazy::new(|| {
    Registry::builder()
        .register::<AnyWord>()
        .register::<Number>()
        .register::<Letters>()
        .register::<Greeting>()
        .register::<Sentence>()
        .register::<Nested>()
        .register::<Empty>()
        .register::<Garbled>()
        .build()
});

impl Grammar for TestGrammar {
    fn registry() -> Result<Arc<Registry>> {
        REGISTRY.clone()
    }
}

pub fn driver_for(text: &str) -> Driver {
    Driver::new::<TestGrammar>(text).unwrap()
}

/// The `word` or `value` field of each node, as JSON.
pub fn values(driver: &Driver, ids: &[parser_framework::NodeId]) -> Vec<Value> {
    ids.iter()
        .map(|id| {
            let node = driver.node(*id);
            node.scalar("word")
                .or_else(|| node.scalar("value"))
                .cloned()
                .unwrap_or(Value::Null)
        })
        .collect()
}
