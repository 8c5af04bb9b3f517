// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Selecting sources with boolean expressions over their attributes.
//!
//! A [`Selection`] is a tree of comparisons like `Flux > 1e-7`, joined with
//! "and", "or" and "not". Before a selection is used, it is checked against
//! the registry of [`SelectionParam`]s with [`Selection::validate`];
//! comparisons against unknown attributes are dropped (and reported back),
//! so evaluation only ever sees known attributes. Every attribute other than
//! `Name` comes from a source's fit result; sources without one are never
//! selected by expressions that use such attributes.

mod parse;

use std::{cmp::Ordering, fmt::Display, str::FromStr};

use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::srclist::Source;

/// All of the source attributes that selections can refer to.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    strum_macros::Display,
    strum_macros::EnumIter,
    strum_macros::EnumString,
    strum_macros::IntoStaticStr,
)]
pub enum SelectionParam {
    /// The source's name.
    Name,

    Flux,
    FluxErr,
    FluxUL,
    SqrtTS,

    /// The angular distance to the map centre that was given when the fit
    /// result was merged \[degrees\]
    Dist,

    /// Fitted Galactic longitude \[degrees\]
    L,

    /// Fitted Galactic latitude \[degrees\]
    B,

    Counts,
    CountsErr,
    CountsUL,
    Exp,
    Index,
    IndexErr,
    Par2,
    Par2Err,
    Par3,
    Par3Err,
    ErgLog,
    ErgLogErr,
}

impl SelectionParam {
    /// Does this attribute come from a source's fit result?
    pub fn needs_multi(self) -> bool {
        !matches!(self, SelectionParam::Name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CompareOp {
    #[serde(rename = "==")]
    Eq,

    #[serde(rename = "!=")]
    Ne,

    #[serde(rename = "<")]
    Lt,

    #[serde(rename = "<=")]
    Le,

    #[serde(rename = ">")]
    Gt,

    #[serde(rename = ">=")]
    Ge,
}

impl CompareOp {
    fn test(self, ord: Ordering) -> bool {
        match self {
            CompareOp::Eq => ord == Ordering::Equal,
            CompareOp::Ne => ord != Ordering::Equal,
            CompareOp::Lt => ord == Ordering::Less,
            CompareOp::Le => ord != Ordering::Greater,
            CompareOp::Gt => ord == Ordering::Greater,
            CompareOp::Ge => ord != Ordering::Less,
        }
    }
}

impl Display for CompareOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            CompareOp::Eq => "==",
            CompareOp::Ne => "!=",
            CompareOp::Lt => "<",
            CompareOp::Le => "<=",
            CompareOp::Gt => ">",
            CompareOp::Ge => ">=",
        };
        write!(f, "{s}")
    }
}

/// The right-hand side of a comparison.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SelectionValue {
    Number(f64),
    Text(String),
}

impl Display for SelectionValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SelectionValue::Number(n) => write!(f, "{n}"),
            SelectionValue::Text(s) => write!(f, "\"{s}\""),
        }
    }
}

/// A boolean expression over source attributes. Field names are plain
/// strings here; they are checked by [`Selection::validate`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Selection {
    Compare {
        field: String,
        op: CompareOp,
        value: SelectionValue,
    },
    And(Vec<Selection>),
    Or(Vec<Selection>),
    Not(Box<Selection>),
}

impl Selection {
    /// Convenience constructor for a single comparison.
    pub fn compare<S: Into<String>>(field: S, op: CompareOp, value: SelectionValue) -> Selection {
        Selection::Compare {
            field: field.into(),
            op,
            value,
        }
    }

    /// Select sources by name.
    pub fn name_is<S: Into<String>>(name: S) -> Selection {
        Selection::compare("Name", CompareOp::Eq, SelectionValue::Text(name.into()))
    }

    /// Check every field name against the [`SelectionParam`] registry.
    /// Comparisons with unknown fields are removed; any "and", "or" or "not"
    /// left with nothing to combine is removed too. The unknown names are
    /// returned in the result (once each, in the order they appear).
    pub fn validate(&self) -> ValidSelection {
        let mut dropped = vec![];
        let condition = Condition::from_selection(self, &mut dropped);
        let mut valid = ValidSelection {
            condition,
            dropped: dropped.into_iter().unique().collect(),
            needs_multi: false,
        };
        valid.needs_multi = valid.params().into_iter().any(SelectionParam::needs_multi);
        valid
    }
}

impl FromStr for Selection {
    type Err = crate::srclist::SelectionParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse::parse_selection(s)
    }
}

impl Display for Selection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Nested "and"s and "or"s get brackets so that the output parses back
        // to the same tree.
        fn write_child(f: &mut std::fmt::Formatter<'_>, child: &Selection) -> std::fmt::Result {
            match child {
                Selection::And(_) | Selection::Or(_) => write!(f, "({child})"),
                _ => write!(f, "{child}"),
            }
        }

        match self {
            Selection::Compare { field, op, value } => write!(f, "{field} {op} {value}"),
            Selection::And(children) | Selection::Or(children) => {
                let joiner = if matches!(self, Selection::And(_)) {
                    " && "
                } else {
                    " || "
                };
                for (i, child) in children.iter().enumerate() {
                    if i > 0 {
                        write!(f, "{joiner}")?;
                    }
                    write_child(f, child)?;
                }
                Ok(())
            }
            Selection::Not(child) => write!(f, "!({child})"),
        }
    }
}

/// A [`Selection`] containing only registered attributes.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidSelection {
    condition: Option<Condition>,
    dropped: Vec<String>,
    needs_multi: bool,
}

impl ValidSelection {
    /// The field names that weren't recognised and were removed.
    pub fn dropped(&self) -> &[String] {
        &self.dropped
    }

    /// If nothing is left after validation, nothing can be selected.
    pub fn is_empty(&self) -> bool {
        self.condition.is_none()
    }

    /// The distinct attributes used, in the order they first appear.
    pub fn params(&self) -> Vec<SelectionParam> {
        let mut params = vec![];
        if let Some(c) = &self.condition {
            c.collect_params(&mut params);
        }
        params.into_iter().unique().collect()
    }

    /// Do any of the attributes come from a fit result?
    pub fn needs_multi(&self) -> bool {
        self.needs_multi
    }

    /// Is this source selected? Sources without a fit result are never
    /// selected if any attribute needs one, and nothing is selected by an
    /// empty selection.
    pub fn matches(&self, source: &Source) -> bool {
        match &self.condition {
            None => false,
            Some(_) if self.needs_multi && source.multi.is_none() => false,
            Some(c) => c.eval(source),
        }
    }
}

/// A validated [`Selection`].
#[derive(Debug, Clone, PartialEq)]
enum Condition {
    Compare {
        param: SelectionParam,
        op: CompareOp,
        value: SelectionValue,
    },
    And(Vec<Condition>),
    Or(Vec<Condition>),
    Not(Box<Condition>),
}

impl Condition {
    fn from_selection(s: &Selection, dropped: &mut Vec<String>) -> Option<Condition> {
        match s {
            Selection::Compare { field, op, value } => match SelectionParam::from_str(field) {
                Ok(param) => Some(Condition::Compare {
                    param,
                    op: *op,
                    value: value.clone(),
                }),
                Err(_) => {
                    dropped.push(field.clone());
                    None
                }
            },
            Selection::And(children) => {
                let children: Vec<Condition> = children
                    .iter()
                    .filter_map(|c| Condition::from_selection(c, dropped))
                    .collect();
                (!children.is_empty()).then_some(Condition::And(children))
            }
            Selection::Or(children) => {
                let children: Vec<Condition> = children
                    .iter()
                    .filter_map(|c| Condition::from_selection(c, dropped))
                    .collect();
                (!children.is_empty()).then_some(Condition::Or(children))
            }
            Selection::Not(child) => {
                Condition::from_selection(child, dropped).map(|c| Condition::Not(Box::new(c)))
            }
        }
    }

    fn collect_params(&self, params: &mut Vec<SelectionParam>) {
        match self {
            Condition::Compare { param, .. } => params.push(*param),
            Condition::And(children) | Condition::Or(children) => {
                for c in children {
                    c.collect_params(params);
                }
            }
            Condition::Not(child) => child.collect_params(params),
        }
    }

    fn eval(&self, source: &Source) -> bool {
        match self {
            Condition::Compare { param, op, value } => match param {
                SelectionParam::Name => compare_text(&source.name, *op, value),
                _ => {
                    let lhs = source.multi.as_ref().and_then(|m| m.value_of(*param));
                    compare_number(lhs, *op, value)
                }
            },
            Condition::And(children) => children.iter().all(|c| c.eval(source)),
            Condition::Or(children) => children.iter().any(|c| c.eval(source)),
            Condition::Not(child) => !child.eval(source),
        }
    }
}

/// Text is compared lexically. A number is compared via its text form.
fn compare_text(lhs: &str, op: CompareOp, rhs: &SelectionValue) -> bool {
    match rhs {
        SelectionValue::Text(s) => op.test(lhs.cmp(s.as_str())),
        SelectionValue::Number(n) => op.test(lhs.cmp(n.to_string().as_str())),
    }
}

/// Numbers are compared numerically; text on the right is parsed as a
/// number. If either side is missing, NaN or not a number, only "!=" is true.
fn compare_number(lhs: Option<f64>, op: CompareOp, rhs: &SelectionValue) -> bool {
    let rhs = match rhs {
        SelectionValue::Number(n) => Some(*n),
        SelectionValue::Text(s) => s.trim().parse().ok(),
    };
    match lhs.zip(rhs).and_then(|(l, r)| l.partial_cmp(&r)) {
        Some(ord) => op.test(ord),
        None => op == CompareOp::Ne,
    }
}
