use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{StoryError, StoryResult};

/// Named parameter a scene template may reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TemplateParam {
    Year,
}

impl TemplateParam {
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Year => "year",
        }
    }

    fn from_name(name: &str) -> Option<Self> {
        match name {
            "year" => Some(Self::Year),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TemplateSegment {
    Text(String),
    Param(TemplateParam),
}

/// Values substituted into templates at dispatch time.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TemplateParams {
    pub year: Option<String>,
}

impl TemplateParams {
    #[must_use]
    pub fn with_year(mut self, year: impl Into<String>) -> Self {
        self.year = Some(year.into());
        self
    }

    fn get(&self, param: TemplateParam) -> Option<&str> {
        match param {
            TemplateParam::Year => self.year.as_deref(),
        }
    }
}

/// Title or narrative text with `{name}` placeholders.
///
/// `{{` and `}}` produce literal braces. Parsing happens once, when the scene
/// list is built, so rendering never searches strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TextTemplate {
    segments: Vec<TemplateSegment>,
}

impl TextTemplate {
    pub fn parse(source: &str) -> StoryResult<Self> {
        let mut segments = Vec::new();
        let mut text = String::new();
        let mut chars = source.chars().peekable();

        while let Some(ch) = chars.next() {
            match ch {
                '{' if chars.peek() == Some(&'{') => {
                    chars.next();
                    text.push('{');
                }
                '}' if chars.peek() == Some(&'}') => {
                    chars.next();
                    text.push('}');
                }
                '{' => {
                    let mut name = String::new();
                    let mut closed = false;
                    for next in chars.by_ref() {
                        if next == '}' {
                            closed = true;
                            break;
                        }
                        name.push(next);
                    }
                    if !closed {
                        return Err(StoryError::InvalidTemplate(format!(
                            "unclosed placeholder in `{source}`"
                        )));
                    }
                    let param = TemplateParam::from_name(name.trim()).ok_or_else(|| {
                        StoryError::InvalidTemplate(format!(
                            "unknown placeholder `{{{name}}}` in `{source}`"
                        ))
                    })?;
                    if !text.is_empty() {
                        segments.push(TemplateSegment::Text(std::mem::take(&mut text)));
                    }
                    segments.push(TemplateSegment::Param(param));
                }
                '}' => {
                    return Err(StoryError::InvalidTemplate(format!(
                        "unmatched `}}` in `{source}`"
                    )));
                }
                other => text.push(other),
            }
        }

        if !text.is_empty() {
            segments.push(TemplateSegment::Text(text));
        }
        Ok(Self { segments })
    }

    /// Plain text with no placeholders.
    #[must_use]
    pub fn literal(text: impl Into<String>) -> Self {
        let text = text.into();
        let segments = if text.is_empty() {
            Vec::new()
        } else {
            vec![TemplateSegment::Text(text)]
        };
        Self { segments }
    }

    #[must_use]
    pub fn from_segments(segments: Vec<TemplateSegment>) -> Self {
        Self { segments }
    }

    #[must_use]
    pub fn segments(&self) -> &[TemplateSegment] {
        &self.segments
    }

    #[must_use]
    pub fn uses(&self, param: TemplateParam) -> bool {
        self.segments
            .iter()
            .any(|segment| *segment == TemplateSegment::Param(param))
    }

    /// True when the template can only render whitespace.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.segments.iter().all(|segment| match segment {
            TemplateSegment::Text(text) => text.trim().is_empty(),
            TemplateSegment::Param(_) => false,
        })
    }

    pub fn render(&self, params: &TemplateParams) -> StoryResult<String> {
        let mut out = String::new();
        for segment in &self.segments {
            match segment {
                TemplateSegment::Text(text) => out.push_str(text),
                TemplateSegment::Param(param) => {
                    let value = params
                        .get(*param)
                        .ok_or(StoryError::MissingTemplateParameter(param.name()))?;
                    out.push_str(value);
                }
            }
        }
        Ok(out)
    }
}

impl TryFrom<String> for TextTemplate {
    type Error = StoryError;

    fn try_from(value: String) -> StoryResult<Self> {
        Self::parse(&value)
    }
}

impl From<TextTemplate> for String {
    fn from(template: TextTemplate) -> Self {
        template.to_string()
    }
}

impl fmt::Display for TextTemplate {
    /// Writes the template back in its source form.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for segment in &self.segments {
            match segment {
                TemplateSegment::Text(text) => {
                    f.write_str(&text.replace('{', "{{").replace('}', "}}"))?;
                }
                TemplateSegment::Param(param) => write!(f, "{{{}}}", param.name())?,
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_named_year_parameter() {
        let template = TextTemplate::parse("Top Countries in {year}").expect("parse");
        assert!(template.uses(TemplateParam::Year));
        let rendered = template
            .render(&TemplateParams::default().with_year("2016"))
            .expect("render");
        assert_eq!(rendered, "Top Countries in 2016");
    }

    #[test]
    fn blank_only_without_parameters() {
        assert!(TextTemplate::literal("").is_blank());
        assert!(TextTemplate::parse("  ").expect("parse").is_blank());
        assert!(!TextTemplate::parse("{year}").expect("parse").is_blank());
        assert!(!TextTemplate::literal("Totals").is_blank());
    }

    #[test]
    fn missing_parameter_is_reported() {
        let template = TextTemplate::parse("in {year}").expect("parse");
        let err = template
            .render(&TemplateParams::default())
            .expect_err("year is unset");
        assert!(matches!(err, StoryError::MissingTemplateParameter("year")));
    }

    #[test]
    fn escaped_braces_round_trip_through_display() {
        let template = TextTemplate::parse("{{literal}} {year}").expect("parse");
        assert!(!template.segments().is_empty());
        assert_eq!(template.to_string(), "{{literal}} {year}");
        let rendered = template
            .render(&TemplateParams::default().with_year("2020"))
            .expect("render");
        assert_eq!(rendered, "{literal} 2020");
    }

    #[test]
    fn rejects_unknown_and_unclosed_placeholders() {
        assert!(TextTemplate::parse("{country}").is_err());
        assert!(TextTemplate::parse("open {year").is_err());
        assert!(TextTemplate::parse("stray }").is_err());
    }
}
