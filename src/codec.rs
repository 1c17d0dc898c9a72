//! Parameter text codec
//!
//! Models are written as three lines, each a label followed by a bracketed,
//! comma-separated list:
//!
//! ```text
//! gaussian [a, b, c]
//! means [1, 0.5, -0.3]
//! spreads [0.707, 0.707, 0.707]
//! ```
//!
//! Lines are split on runs of `[`, `]`, `,` and spaces. The first token of
//! each line is a label (possibly empty, as in `[a, b, c]`); the label of the
//! candidate line names the noise family when parsing into the [`Noise`]
//! enum and is ignored otherwise.
//!
//! [`Noise`]: crate::model::noise::Noise

use std::fmt::{Debug, Display};
use std::hash::Hash;

use crate::error::{ModelError, ModelResult, ParseError};
use crate::model::traits::NoiseFamily;
use crate::model::utility::RandomUtilityModel;

/// Parsed parameter text
#[derive(Clone, Debug, PartialEq)]
pub struct ParamText {
    /// Label of the candidate line
    pub label: String,
    /// Candidate identities, as text
    pub candidates: Vec<String>,
    /// Utility mean per candidate
    pub means: Vec<f64>,
    /// Spread per candidate
    pub spreads: Vec<f64>,
}

impl ParamText {
    /// Parse the three-line parameter format
    pub fn parse(text: &str) -> Result<Self, ParseError> {
        let lines: Vec<&str> = text.trim_end().lines().collect();
        if lines.len() != 3 {
            return Err(ParseError::LineCount {
                actual: lines.len(),
            });
        }

        let (label, candidates) = split_line(lines[0]);
        let m = candidates.len();
        let means = parse_numbers(lines[1], 2, m)?;
        let spreads = parse_numbers(lines[2], 3, m)?;

        Ok(Self {
            label: label.to_string(),
            candidates: candidates.into_iter().map(str::to_string).collect(),
            means,
            spreads,
        })
    }

    /// Render in the three-line parameter format
    pub fn render(&self) -> String {
        format!(
            "{} {}\nmeans {}\nspreads {}",
            self.label,
            bracketed(&self.candidates),
            bracketed(&self.means),
            bracketed(&self.spreads)
        )
    }
}

fn is_delimiter(c: char) -> bool {
    matches!(c, '[' | ']' | ',' | ' ')
}

fn split_line(line: &str) -> (&str, Vec<&str>) {
    let mut parts = line.split(is_delimiter);
    let label = parts.next().unwrap_or("");
    (label, parts.filter(|t| !t.is_empty()).collect())
}

fn parse_numbers(line: &str, line_no: usize, expected: usize) -> Result<Vec<f64>, ParseError> {
    let (_, tokens) = split_line(line);
    if tokens.len() != expected {
        return Err(ParseError::TokenCount {
            line: line_no,
            expected,
            actual: tokens.len(),
        });
    }
    tokens
        .into_iter()
        .map(|token| {
            token.parse::<f64>().map_err(|_| ParseError::InvalidNumber {
                line: line_no,
                token: token.to_string(),
            })
        })
        .collect()
}

fn bracketed<D: Display>(items: &[D]) -> String {
    let inner: Vec<String> = items.iter().map(|i| i.to_string()).collect();
    format!("[{}]", inner.join(", "))
}

impl<T, N> RandomUtilityModel<T, N>
where
    T: Clone + Eq + Hash + Debug + Display,
    N: NoiseFamily,
{
    /// Encode candidates, strengths, and spreads as parameter text
    ///
    /// Fails if a candidate renders as empty text or contains a delimiter
    /// or line break, since the text could not be parsed back.
    pub fn to_param_string(&self) -> ModelResult<String> {
        let candidates = self
            .candidates()
            .iter()
            .map(|c| {
                let text = c.to_string();
                let splits = text.chars().any(|ch| is_delimiter(ch) || ch.is_whitespace());
                if text.is_empty() || splits {
                    return Err(ModelError::Serialization(format!(
                        "candidate {:?} cannot be written as a parameter token",
                        text
                    )));
                }
                Ok(text)
            })
            .collect::<ModelResult<Vec<_>>>()?;

        Ok(ParamText {
            label: self.noise().label().to_string(),
            candidates,
            means: self.strengths().to_vec(),
            spreads: self.noise().spreads(self.num_candidates()),
        }
        .render())
    }
}

impl<N: NoiseFamily> RandomUtilityModel<String, N> {
    /// Decode a model from parameter text
    ///
    /// Candidate identities are kept as text.
    pub fn parse_params(text: &str) -> ModelResult<Self> {
        let params = ParamText::parse(text)?;
        trace_debug!(
            label = %params.label,
            candidates = params.candidates.len(),
            "parsed parameter text"
        );
        let noise = N::from_spreads(&params.label, params.spreads)?;
        Self::from_parts(params.candidates, params.means, noise)
    }
}
