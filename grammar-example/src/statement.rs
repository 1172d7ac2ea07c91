use crate::expression::{Expression, Identifier};
use parser_framework::{Driver, Fields, NodeRef, Result, ScanContext, Syntax};
use serde_json::Value;

/// `let name = expression;`
pub struct Let;

impl Syntax for Let {
    const NAME: &'static str = "Let";

    fn recognize(driver: &Driver, _rest: &str, _options: Option<&Value>) -> Result<bool> {
        Ok(driver.is_word(Some("let")))
    }

    fn consume(driver: &mut Driver, fields: &mut Fields, options: Option<&Value>) -> Result<()> {
        driver.expect_word(Some("let"))?;
        fields.set("name", driver.parse::<Identifier>(options)?);
        driver.skip_space();
        driver.expect("=", None)?;
        driver.skip_space();
        fields.set("value", driver.parse::<Expression>(options)?);
        driver.skip_space();
        driver.expect(";", None)?;
        Ok(())
    }

    fn render(node: NodeRef<'_>, options: Option<&Value>) -> String {
        let part = |field: &str| {
            node.child(field)
                .map(|child| child.render(options))
                .unwrap_or_default()
        };
        format!("let {} = {};", part("name"), part("value"))
    }
}

/// Zero or more `let` statements filling the whole input.
pub struct Script;

impl Syntax for Script {
    const NAME: &'static str = "Script";

    fn recognize(_driver: &Driver, _rest: &str, _options: Option<&Value>) -> Result<bool> {
        Ok(true)
    }

    fn consume(driver: &mut Driver, fields: &mut Fields, options: Option<&Value>) -> Result<()> {
        fields.set("statements", driver.parse_chain::<Let>(options)?);
        driver.skip_space();
        if !driver.is_end() {
            return driver.fail("expected word: let");
        }
        Ok(())
    }

    fn render(node: NodeRef<'_>, options: Option<&Value>) -> String {
        node.children("statements")
            .iter()
            .map(|statement| statement.render(options))
            .collect::<Vec<_>>()
            .join("\n")
    }
}
