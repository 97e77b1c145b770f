use std::fmt;
use std::str::FromStr;

use crate::error::DomError;

/// Element tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tag {
    Form,
    Input,
    TextArea,
    Select,
    Button,
    /// Any non-control container (`div`, `fieldset`, ...).
    Group,
}

impl Tag {
    pub fn as_str(self) -> &'static str {
        match self {
            Tag::Form => "form",
            Tag::Input => "input",
            Tag::TextArea => "textarea",
            Tag::Select => "select",
            Tag::Button => "button",
            Tag::Group => "div",
        }
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The `type` of an `<input>` element.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum InputType {
    Radio,
    Checkbox,
    Button,
    Color,
    Date,
    DatetimeLocal,
    Email,
    File,
    Hidden,
    Image,
    Month,
    Number,
    Password,
    Range,
    Reset,
    Search,
    Submit,
    Tel,
    #[default]
    Text,
    Time,
    Url,
    Week,
}

impl InputType {
    pub const ALL: [InputType; 22] = [
        InputType::Radio,
        InputType::Checkbox,
        InputType::Button,
        InputType::Color,
        InputType::Date,
        InputType::DatetimeLocal,
        InputType::Email,
        InputType::File,
        InputType::Hidden,
        InputType::Image,
        InputType::Month,
        InputType::Number,
        InputType::Password,
        InputType::Range,
        InputType::Reset,
        InputType::Search,
        InputType::Submit,
        InputType::Tel,
        InputType::Text,
        InputType::Time,
        InputType::Url,
        InputType::Week,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            InputType::Radio => "radio",
            InputType::Checkbox => "checkbox",
            InputType::Button => "button",
            InputType::Color => "color",
            InputType::Date => "date",
            InputType::DatetimeLocal => "datetime-local",
            InputType::Email => "email",
            InputType::File => "file",
            InputType::Hidden => "hidden",
            InputType::Image => "image",
            InputType::Month => "month",
            InputType::Number => "number",
            InputType::Password => "password",
            InputType::Range => "range",
            InputType::Reset => "reset",
            InputType::Search => "search",
            InputType::Submit => "submit",
            InputType::Tel => "tel",
            InputType::Text => "text",
            InputType::Time => "time",
            InputType::Url => "url",
            InputType::Week => "week",
        }
    }

    /// Whether the input carries user data. Buttons of any flavour do not.
    pub fn holds_data(self) -> bool {
        !matches!(
            self,
            InputType::Submit | InputType::Button | InputType::Reset | InputType::Image
        )
    }
}

impl fmt::Display for InputType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InputType {
    type Err = DomError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        InputType::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| DomError::UnknownInputType(s.to_string()))
    }
}
