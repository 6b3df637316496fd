//! Formatted text, used for inventory titles.

use std::fmt::Display;

use bitflags::bitflags;

/// What a text component displays.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TextContent {
    Literal(String),
    /// A translation key, resolved on the client.
    Translatable { key: String, args: Vec<Text> },
    /// An entity selector such as `@p`.
    Selector(String),
    /// The score of `name` in `objective`.
    Score { name: String, objective: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextColor {
    Black,
    DarkBlue,
    DarkGreen,
    DarkAqua,
    DarkRed,
    DarkPurple,
    Gold,
    Gray,
    DarkGray,
    Blue,
    Green,
    Aqua,
    Red,
    LightPurple,
    Yellow,
    White,
}

bitflags! {
    #[derive(Default)]
    pub struct TextStyle: u8 {
        const BOLD = 0x01;
        const ITALIC = 0x02;
        const UNDERLINED = 0x04;
        const STRIKETHROUGH = 0x08;
        const OBFUSCATED = 0x10;
    }
}

/// A text component with optional formatting and children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Text {
    content: TextContent,
    color: Option<TextColor>,
    style: TextStyle,
    children: Vec<Text>,
}

impl Text {
    /// Plain unformatted text.
    pub fn of(literal: impl Into<String>) -> Self {
        Self::builder(TextContent::Literal(literal.into())).build()
    }

    pub fn builder(content: TextContent) -> TextBuilder {
        TextBuilder {
            text: Text {
                content,
                color: None,
                style: TextStyle::empty(),
                children: Vec::new(),
            },
        }
    }

    pub fn content(&self) -> &TextContent {
        &self.content
    }

    pub fn color(&self) -> Option<TextColor> {
        self.color
    }

    pub fn style(&self) -> TextStyle {
        self.style
    }

    pub fn children(&self) -> &[Text] {
        &self.children
    }

    /// The text with all formatting stripped. Translation keys,
    /// selectors and scores are rendered unresolved.
    pub fn to_plain(&self) -> String {
        let mut out = String::new();
        self.write_plain(&mut out);
        out
    }

    fn write_plain(&self, out: &mut String) {
        match &self.content {
            TextContent::Literal(s) | TextContent::Selector(s) => out.push_str(s),
            TextContent::Translatable { key, args } => {
                out.push_str(key);
                if !args.is_empty() {
                    out.push('(');
                    for (idx, arg) in args.iter().enumerate() {
                        if idx > 0 {
                            out.push_str(", ");
                        }
                        arg.write_plain(out);
                    }
                    out.push(')');
                }
            }
            TextContent::Score { name, objective } => {
                out.push_str(name);
                out.push('@');
                out.push_str(objective);
            }
        }
        for child in &self.children {
            child.write_plain(out);
        }
    }
}

impl Display for Text {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_plain())
    }
}

impl From<&str> for Text {
    fn from(value: &str) -> Self {
        Self::of(value)
    }
}

/// Builder shared by every kind of [`TextContent`].
#[derive(Debug, Clone)]
pub struct TextBuilder {
    text: Text,
}

impl TextBuilder {
    pub fn color(mut self, color: TextColor) -> Self {
        self.text.color = Some(color);
        self
    }

    pub fn style(mut self, style: TextStyle) -> Self {
        self.text.style |= style;
        self
    }

    pub fn append(mut self, child: impl Into<Text>) -> Self {
        self.text.children.push(child.into());
        self
    }

    pub fn build(self) -> Text {
        self.text
    }
}
