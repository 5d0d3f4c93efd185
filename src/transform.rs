//! Transformers as data.
//!
//! This module provides two types to assemble conversions at runtime:
//!
//! - [`Transform`]: one container transformer plus its parameters
//! - [`Pipeline`]: an ordered list of transforms applied one after another
//!
//! Both are serde-(de)serializable, so a pipeline can live in whatever config
//! format the caller already uses. Both also parse from a compact text form:
//! `op[:arg[:arg]]` for a transform and `;`-separated transforms for a pipeline.
//!
//! ## Examples
//!
//! ```rust
//! use varconv::{value, Pipeline, Transform};
//!
//! let pipeline = Pipeline::new()
//!     .then(Transform::RemoveHtml)
//!     .then(Transform::Trim)
//!     .then(Transform::StrMaxLength { length: 5 });
//!
//! let input = value!({ "title": "  <b>Hello world</b> " });
//! assert_eq!(pipeline.apply(&input), value!({ "title": "Hello" }));
//!
//! let parsed: Pipeline = "remove_html; trim; str_max_length:5".parse().unwrap();
//! assert_eq!(parsed, pipeline);
//! ```

use crate::{array, coerce, text, Error, Result, Value};
use serde::{Deserialize, Serialize};
use std::fmt::{self, Write as _};
use std::str::FromStr;

fn default_separator() -> String {
    " ".to_string()
}

/// One container transformer and its parameters.
///
/// Serialized internally tagged by `"op"`:
///
/// ```rust
/// use varconv::Transform;
///
/// let t: Transform = serde_json::from_str(r#"{"op":"replace","from":"a","to":"b"}"#).unwrap();
/// assert_eq!(t, Transform::Replace { from: "a".into(), to: "b".into() });
///
/// let t: Transform = serde_json::from_str(r#"{"op":"to_line"}"#).unwrap();
/// assert_eq!(t, Transform::ToLine { separator: " ".into() });
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Transform {
    ToNumber,
    ToBool {
        #[serde(default)]
        default: bool,
    },
    ToString,
    ToInt,
    ToFloat,
    ToFirstLine,
    ToLine {
        #[serde(default = "default_separator")]
        separator: String,
    },
    RemoveHtml,
    EscapeSpecialChars,
    Trim,
    Replace {
        from: String,
        to: String,
    },
    RemoveNumbers,
    ToLowercase,
    ToUppercase,
    ToMinimum {
        bound: f64,
    },
    ToMaximum {
        bound: f64,
    },
    ToAbsolute,
    StrMaxLength {
        length: i64,
    },
}

impl Transform {
    /// The snake_case op name, as used in the serialized and compact forms.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Transform::ToNumber => "to_number",
            Transform::ToBool { .. } => "to_bool",
            Transform::ToString => "to_string",
            Transform::ToInt => "to_int",
            Transform::ToFloat => "to_float",
            Transform::ToFirstLine => "to_first_line",
            Transform::ToLine { .. } => "to_line",
            Transform::RemoveHtml => "remove_html",
            Transform::EscapeSpecialChars => "escape_special_chars",
            Transform::Trim => "trim",
            Transform::Replace { .. } => "replace",
            Transform::RemoveNumbers => "remove_numbers",
            Transform::ToLowercase => "to_lowercase",
            Transform::ToUppercase => "to_uppercase",
            Transform::ToMinimum { .. } => "to_minimum",
            Transform::ToMaximum { .. } => "to_maximum",
            Transform::ToAbsolute => "to_absolute",
            Transform::StrMaxLength { .. } => "str_max_length",
        }
    }

    /// Applies the transformer to every leaf of `value`, keeping its shape.
    #[must_use]
    pub fn apply(&self, value: &Value) -> Value {
        match self {
            Transform::ToNumber => array::to_number(value),
            Transform::ToBool { default } => array::to_bool(value, *default),
            Transform::ToString => array::to_string(value),
            Transform::ToInt => array::to_int(value),
            Transform::ToFloat => array::to_float(value),
            Transform::ToFirstLine => array::to_first_line(value),
            Transform::ToLine { separator } => array::to_line(value, separator),
            Transform::RemoveHtml => array::remove_html(value),
            Transform::EscapeSpecialChars => array::escape_special_chars(value),
            Transform::Trim => array::trim(value),
            Transform::Replace { from, to } => array::replace(value, from, to),
            Transform::RemoveNumbers => array::remove_numbers(value),
            Transform::ToLowercase => array::to_lowercase(value),
            Transform::ToUppercase => array::to_uppercase(value),
            Transform::ToMinimum { bound } => array::to_minimum(value, *bound),
            Transform::ToMaximum { bound } => array::to_maximum(value, *bound),
            Transform::ToAbsolute => array::to_absolute(value),
            Transform::StrMaxLength { length } => array::str_max_length(value, *length),
        }
    }

    /// Applies only the leaf rule to `value`, without recursing.
    ///
    /// A container passed here is treated as a single loose value, so for
    /// example `ToBool` answers whether it is non-empty.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use varconv::{value, Transform, Value};
    ///
    /// let t = Transform::ToBool { default: false };
    /// assert_eq!(t.apply_leaf(&value!([1])), Value::Bool(true));
    /// assert_eq!(t.apply(&value!([1])), value!([true]));
    /// ```
    #[must_use]
    pub fn apply_leaf(&self, value: &Value) -> Value {
        let loose = || coerce::to_string(value);
        match self {
            Transform::ToNumber => Value::Number(coerce::to_number(value)),
            Transform::ToBool { default } => Value::Bool(coerce::to_bool(value, *default)),
            Transform::ToString => Value::String(loose()),
            Transform::ToInt => Value::from(coerce::to_int(value)),
            Transform::ToFloat => Value::from(coerce::to_float(value)),
            Transform::ToFirstLine => Value::String(text::first_line(&loose())),
            Transform::ToLine { separator } => {
                Value::String(text::join_lines(&loose(), separator))
            }
            Transform::RemoveHtml => Value::String(text::strip_tags(&loose())),
            Transform::EscapeSpecialChars => Value::String(text::escape_special_chars(&loose())),
            Transform::Trim => Value::String(text::trim(&loose()).to_string()),
            Transform::Replace { from, to } => Value::String(text::replace(&loose(), from, to)),
            Transform::RemoveNumbers => Value::String(text::remove_numbers(&loose())),
            Transform::ToLowercase => Value::String(loose().to_lowercase()),
            Transform::ToUppercase => Value::String(loose().to_uppercase()),
            Transform::ToMinimum { bound } => Value::from(coerce::to_minimum(value, *bound)),
            Transform::ToMaximum { bound } => Value::from(coerce::to_maximum(value, *bound)),
            Transform::ToAbsolute => Value::Number(coerce::to_absolute(value)),
            Transform::StrMaxLength { length } => {
                Value::String(text::str_max_length(&loose(), *length))
            }
        }
    }
}

/// Text argument with `\`, `:` and `;` escaped by a backslash.
struct Escaped<'a>(&'a str);

impl fmt::Display for Escaped<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for c in self.0.chars() {
            if matches!(c, '\\' | ':' | ';') {
                f.write_char('\\')?;
            }
            f.write_char(c)?;
        }
        Ok(())
    }
}

/// Splits on every `sep` not preceded by an escaping backslash. Segments keep
/// their escapes.
fn split_unescaped(s: &str, sep: char) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut start = 0;
    let mut escaped = false;
    for (i, c) in s.char_indices() {
        if escaped {
            escaped = false;
        } else if c == '\\' {
            escaped = true;
        } else if c == sep {
            parts.push(&s[start..i]);
            start = i + c.len_utf8();
        }
    }
    parts.push(&s[start..]);
    parts
}

fn split_once_unescaped(s: &str, sep: char) -> Option<(&str, &str)> {
    let head = split_unescaped(s, sep).into_iter().next()?;
    s.get(head.len() + sep.len_utf8()..).map(|rest| (head, rest))
}

/// Drops the backslash of every escape. A trailing lone backslash is kept.
fn unescape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars();
    while let Some(c) = chars.next() {
        match c {
            '\\' => out.push(chars.next().unwrap_or('\\')),
            other => out.push(other),
        }
    }
    out
}

impl fmt::Display for Transform {
    /// Writes the compact form accepted by [`FromStr`].
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = self.name();
        match self {
            Transform::ToBool { default } => write!(f, "{}:{}", name, default),
            Transform::ToLine { separator } => write!(f, "{}:{}", name, Escaped(separator)),
            Transform::Replace { from, to } => {
                write!(f, "{}:{}:{}", name, Escaped(from), Escaped(to))
            }
            Transform::ToMinimum { bound } | Transform::ToMaximum { bound } => {
                write!(f, "{}:{}", name, bound)
            }
            Transform::StrMaxLength { length } => write!(f, "{}:{}", name, length),
            _ => f.write_str(name),
        }
    }
}

fn required<'a>(op: &str, arg: Option<&'a str>) -> Result<&'a str> {
    arg.ok_or_else(|| Error::invalid_argument(op, "missing argument"))
}

fn parsed<T>(op: &str, arg: Option<&str>) -> Result<T>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    let arg = required(op, arg)?;
    arg.trim()
        .parse()
        .map_err(|e| Error::invalid_argument(op, format!("`{}`: {}", arg, e)))
}

impl FromStr for Transform {
    type Err = Error;

    /// Parses the compact form `op[:arg[:arg]]`.
    ///
    /// - `to_bool[:true|false]` (default `false`)
    /// - `to_line[:separator]` (default a single space)
    /// - `replace:from:to`
    /// - in text arguments a backslash escapes the next character, so `\:`,
    ///   `\;` and `\\` stand for `:`, `;` and `\`
    /// - `to_minimum:bound`, `to_maximum:bound`, `str_max_length:length`
    /// - every other op takes no argument
    ///
    /// # Examples
    ///
    /// ```rust
    /// use varconv::{Error, Transform};
    ///
    /// assert_eq!("trim".parse::<Transform>().unwrap(), Transform::Trim);
    /// assert_eq!(
    ///     "to_bool:true".parse::<Transform>().unwrap(),
    ///     Transform::ToBool { default: true }
    /// );
    /// assert!(matches!(
    ///     "to_minimum:low".parse::<Transform>(),
    ///     Err(Error::InvalidArgument { .. })
    /// ));
    /// ```
    fn from_str(s: &str) -> Result<Self> {
        let (op, arg) = match split_once_unescaped(s, ':') {
            Some((op, arg)) => (op.trim(), Some(arg)),
            None => (s.trim(), None),
        };

        let transform = match op {
            "to_bool" => Transform::ToBool {
                default: match arg {
                    Some(_) => parsed(op, arg)?,
                    None => false,
                },
            },
            "to_line" => Transform::ToLine {
                separator: arg.map_or_else(default_separator, unescape),
            },
            "replace" => {
                let arg = required(op, arg)?;
                let (from, to) = split_once_unescaped(arg, ':')
                    .ok_or_else(|| Error::invalid_argument(op, "expected `from:to`"))?;
                Transform::Replace {
                    from: unescape(from),
                    to: unescape(to),
                }
            }
            "to_minimum" => Transform::ToMinimum {
                bound: parsed(op, arg)?,
            },
            "to_maximum" => Transform::ToMaximum {
                bound: parsed(op, arg)?,
            },
            "str_max_length" => Transform::StrMaxLength {
                length: parsed(op, arg)?,
            },
            _ => {
                let transform = match op {
                    "to_number" => Transform::ToNumber,
                    "to_string" => Transform::ToString,
                    "to_int" => Transform::ToInt,
                    "to_float" => Transform::ToFloat,
                    "to_first_line" => Transform::ToFirstLine,
                    "remove_html" => Transform::RemoveHtml,
                    "escape_special_chars" => Transform::EscapeSpecialChars,
                    "trim" => Transform::Trim,
                    "remove_numbers" => Transform::RemoveNumbers,
                    "to_lowercase" => Transform::ToLowercase,
                    "to_uppercase" => Transform::ToUppercase,
                    "to_absolute" => Transform::ToAbsolute,
                    _ => return Err(Error::unknown_transform(op)),
                };
                if arg.is_some() {
                    return Err(Error::invalid_argument(op, "takes no argument"));
                }
                transform
            }
        };

        Ok(transform)
    }
}

/// An ordered list of [`Transform`]s.
///
/// Each step preserves shape, so the whole pipeline does too. Serializes as a
/// plain list of transforms.
///
/// # Examples
///
/// ```rust
/// use varconv::{value, Pipeline, Transform};
///
/// let pipeline: Pipeline = serde_json::from_str(
///     r#"[{"op":"trim"},{"op":"to_bool","default":true}]"#,
/// ).unwrap();
/// assert_eq!(pipeline.len(), 2);
/// assert_eq!(pipeline.apply(&value!([" 0 ", "?"])), value!([false, true]));
/// ```
#[derive(Clone, Debug, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Pipeline {
    steps: Vec<Transform>,
}

impl Pipeline {
    /// Creates an empty pipeline. Applying it returns a copy of the input.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a step.
    #[must_use]
    pub fn then(mut self, transform: Transform) -> Self {
        self.steps.push(transform);
        self
    }

    /// Appends a step in place.
    pub fn push(&mut self, transform: Transform) {
        self.steps.push(transform);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Transform> {
        self.steps.iter()
    }

    /// Runs every step in order, each on the output of the previous one.
    #[must_use]
    pub fn apply(&self, value: &Value) -> Value {
        let mut steps = self.steps.iter().enumerate();
        let Some((_, first)) = steps.next() else {
            return value.clone();
        };

        tracing::debug!(step = 0, transform = %first, "applying pipeline step");
        let mut current = first.apply(value);
        for (index, step) in steps {
            tracing::debug!(step = index, transform = %step, "applying pipeline step");
            current = step.apply(&current);
        }
        current
    }
}

impl fmt::Display for Pipeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, step) in self.steps.iter().enumerate() {
            if i > 0 {
                f.write_str(";")?;
            }
            write!(f, "{}", step)?;
        }
        Ok(())
    }
}

impl FromStr for Pipeline {
    type Err = Error;

    /// Parses `;`-separated compact transforms. Blank segments are skipped
    /// and `\;` inside an argument does not split.
    fn from_str(s: &str) -> Result<Self> {
        split_unescaped(s, ';')
            .into_iter()
            .filter(|segment| !segment.trim().is_empty())
            .map(str::parse::<Transform>)
            .collect()
    }
}

impl From<Vec<Transform>> for Pipeline {
    fn from(steps: Vec<Transform>) -> Self {
        Pipeline { steps }
    }
}

impl FromIterator<Transform> for Pipeline {
    fn from_iter<T: IntoIterator<Item = Transform>>(iter: T) -> Self {
        Pipeline {
            steps: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a Pipeline {
    type Item = &'a Transform;
    type IntoIter = std::slice::Iter<'a, Transform>;

    fn into_iter(self) -> Self::IntoIter {
        self.steps.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value;

    #[test]
    fn test_compact_form_roundtrips() {
        let transforms = vec![
            Transform::ToNumber,
            Transform::ToBool { default: true },
            Transform::ToLine {
                separator: " | ".to_string(),
            },
            Transform::Replace {
                from: "a".to_string(),
                to: "b:c".to_string(),
            },
            Transform::ToMinimum { bound: -2.5 },
            Transform::StrMaxLength { length: -4 },
            Transform::EscapeSpecialChars,
        ];
        for t in transforms {
            let parsed: Transform = t.to_string().parse().unwrap();
            assert_eq!(parsed, t);
        }
    }

    #[test]
    fn test_text_arguments_escape_separators() {
        let replace = Transform::Replace {
            from: "a:b".to_string(),
            to: "c;d\\".to_string(),
        };
        assert_eq!(replace.to_string(), r"replace:a\:b:c\;d\\");
        assert_eq!(replace.to_string().parse::<Transform>().unwrap(), replace);

        let pipeline = Pipeline::new()
            .then(Transform::ToLine {
                separator: "; ".to_string(),
            })
            .then(Transform::Trim);
        assert_eq!(pipeline.to_string(), r"to_line:\; ;trim");
        assert_eq!(pipeline.to_string().parse::<Pipeline>().unwrap(), pipeline);
    }

    #[test]
    fn test_unescaped_colon_in_replacement_is_literal() {
        assert_eq!(
            "replace:a:b:c".parse::<Transform>().unwrap(),
            Transform::Replace {
                from: "a".to_string(),
                to: "b:c".to_string(),
            }
        );
        assert_eq!(
            r"to_line:x\".parse::<Transform>().unwrap(),
            Transform::ToLine {
                separator: r"x\".to_string()
            }
        );
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(
            "shout".parse::<Transform>(),
            Err(Error::unknown_transform("shout"))
        );
        assert!(matches!(
            "trim:now".parse::<Transform>(),
            Err(Error::InvalidArgument { .. })
        ));
        assert!(matches!(
            "replace:nocolon".parse::<Transform>(),
            Err(Error::InvalidArgument { .. })
        ));
        assert!(matches!(
            "str_max_length".parse::<Transform>(),
            Err(Error::InvalidArgument { .. })
        ));
        assert!(matches!(
            "to_bool:maybe".parse::<Transform>(),
            Err(Error::InvalidArgument { .. })
        ));
    }

    #[test]
    fn test_parse_defaults() {
        assert_eq!(
            "to_bool".parse::<Transform>().unwrap(),
            Transform::ToBool { default: false }
        );
        assert_eq!(
            "to_line".parse::<Transform>().unwrap(),
            Transform::ToLine {
                separator: " ".to_string()
            }
        );
        assert_eq!(
            " to_maximum: 10 ".parse::<Transform>().unwrap(),
            Transform::ToMaximum { bound: 10.0 }
        );
    }

    #[test]
    fn test_apply_matches_array_functions() {
        let input = value!({ "a": ["<i>x</i>\n2", { "b": (-7) }] });
        assert_eq!(Transform::RemoveHtml.apply(&input), array::remove_html(&input));
        assert_eq!(
            Transform::ToLine {
                separator: "/".to_string()
            }
            .apply(&input),
            array::to_line(&input, "/")
        );
        assert_eq!(Transform::ToAbsolute.apply(&input), array::to_absolute(&input));
    }

    #[test]
    fn test_pipeline_parse_and_display() {
        let pipeline: Pipeline = "trim; ;to_uppercase;str_max_length:2".parse().unwrap();
        assert_eq!(pipeline.len(), 3);
        assert_eq!(pipeline.to_string(), "trim;to_uppercase;str_max_length:2");
        assert_eq!(pipeline.apply(&value!([" abc "])), value!(["AB"]));
    }

    #[test]
    fn test_empty_pipeline_is_identity() {
        let input = value!({ "k": [1, "two"] });
        let pipeline = Pipeline::new();
        assert!(pipeline.is_empty());
        assert_eq!(pipeline.apply(&input), input);
    }
}
