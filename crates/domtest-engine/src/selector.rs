//! Selector types accepted in test steps.

use std::fmt;
use std::str::FromStr;

use domtest_browser::Locator;

use crate::error::EngineError;

/// The closed set of selector types a step may use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SelectorType {
    Id,
    Name,
    XPath,
    Css,
    Class,
    Tag,
    DataTestId,
}

impl SelectorType {
    pub fn as_str(&self) -> &'static str {
        match self {
            SelectorType::Id => "id",
            SelectorType::Name => "name",
            SelectorType::XPath => "xpath",
            SelectorType::Css => "css",
            SelectorType::Class => "class",
            SelectorType::Tag => "tag",
            SelectorType::DataTestId => "data-testid",
        }
    }

    /// Map to the browser's native lookup strategy.
    pub fn to_locator(self, value: &str) -> Locator {
        let value = value.to_string();
        match self {
            SelectorType::Id => Locator::Id(value),
            SelectorType::Name => Locator::Name(value),
            SelectorType::XPath => Locator::XPath(value),
            SelectorType::Css => Locator::Css(value),
            SelectorType::Class => Locator::ClassName(value),
            SelectorType::Tag => Locator::TagName(value),
            SelectorType::DataTestId => {
                Locator::Css(format!("[data-testid=\"{}\"]", escape_attribute(&value)))
            }
        }
    }
}

impl FromStr for SelectorType {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "id" => Ok(SelectorType::Id),
            "name" => Ok(SelectorType::Name),
            "xpath" => Ok(SelectorType::XPath),
            "css" => Ok(SelectorType::Css),
            "class" => Ok(SelectorType::Class),
            "tag" => Ok(SelectorType::Tag),
            "data-testid" => Ok(SelectorType::DataTestId),
            _ => Err(EngineError::InvalidSelector(s.to_string())),
        }
    }
}

impl fmt::Display for SelectorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Escape a value for a double-quoted CSS attribute selector.
fn escape_attribute(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        if matches!(c, '"' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}
