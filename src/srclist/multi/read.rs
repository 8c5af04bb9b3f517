// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Parsing of the fitter's ".source" output files.

use std::{fs::File, io::BufReader, path::Path};

use log::{debug, trace};

use super::FitResult;
use crate::{
    constants::{FIT_RESULT_COMMENT, FIT_RESULT_NUM_LINES},
    srclist::ReadFitResultError,
};

/// A whitespace-separated token of a fitter-output line. Some tokens are
/// comma-separated lists.
#[derive(Debug)]
enum Token {
    Scalar(String),
    List(Vec<String>),
}

/// Read a fitter-output file into a [`FitResult`].
pub fn parse_fit_result_file<P: AsRef<Path>>(path: P) -> Result<FitResult, ReadFitResultError> {
    fn inner(path: &Path) -> Result<FitResult, ReadFitResultError> {
        debug!("Parsing fit-result file {}", path.display());
        let mut f = BufReader::new(File::open(path)?);
        parse_fit_result(&mut f)
    }
    inner(path.as_ref())
}

/// Parse a buffer containing fitter output into a [`FitResult`].
pub fn parse_fit_result<T: std::io::BufRead>(buf: &mut T) -> Result<FitResult, ReadFitResultError> {
    let mut body = vec![];
    let mut line = String::new();
    while buf.read_line(&mut line)? > 0 {
        if !line.starts_with(FIT_RESULT_COMMENT) {
            body.push(line.trim_end_matches(['\n', '\r']).to_string());
        }
        line.clear();
    }
    if body.len() != FIT_RESULT_NUM_LINES {
        return Err(ReadFitResultError::WrongNumberOfLines {
            expected: FIT_RESULT_NUM_LINES,
            got: body.len(),
        });
    }

    let mut tokens = vec![];
    for (line_num, line) in body.iter().enumerate() {
        for token in tokenise_line(line_num, line)? {
            tokens.push((line_num, token));
        }
    }
    trace!("Fit-result file has {} fields", tokens.len());

    let mut f = FieldReader {
        tokens: tokens.into_iter(),
        position: 0,
    };
    // Struct fields are evaluated in the order written, so this reads the
    // tokens in file order.
    let fit_result = FitResult {
        label: f.text("label")?,
        fix: f.number("fix")?,
        si_start: f.number("si_start")?,
        ul_conf_level: f.number("ul_conf_level")?,
        src_loc_conf_level: f.number("src_loc_conf_level")?,
        start_l: f.number("start_l")?,
        start_b: f.number("start_b")?,
        start_flux: f.number("start_flux")?,
        lmin: f.number("lmin")?,
        lmax: f.number("lmax")?,
        bmin: f.number("bmin")?,
        bmax: f.number("bmax")?,

        typefun: f.number("typefun")?,
        par2_start: f.number("par2_start")?,
        par3_start: f.number("par3_start")?,
        galmode2: f.number("galmode2")?,
        galmode2fit: f.number("galmode2fit")?,
        isomode2: f.number("isomode2")?,
        isomode2fit: f.number("isomode2fit")?,
        edpcor: f.number("edpcor")?,
        fluxcor: f.number("fluxcor")?,
        integratortype: f.number("integratortype")?,
        expratio_eval: f.number("expratio_eval")?,
        expratio_minthr: f.number("expratio_minthr")?,
        expratio_maxthr: f.number("expratio_maxthr")?,
        expratio_size: f.number("expratio_size")?,

        sqrt_ts: f.number("sqrt_ts")?,
        l_peak: f.number("l_peak")?,
        b_peak: f.number("b_peak")?,
        dist_peak: f.number("dist_peak")?,

        l: f.number("l")?,
        b: f.number("b")?,
        r: f.number("r")?,
        ell_a: f.number("ell_a")?,
        ell_b: f.number("ell_b")?,
        ell_phi: f.number("ell_phi")?,

        counts: f.number("counts")?,
        counts_err: f.number("counts_err")?,
        counts_ul: f.number("counts_ul")?,
        flux: f.number("flux")?,
        flux_err: f.number("flux_err")?,
        flux_ul: f.number("flux_ul")?,

        exp: f.number("exp")?,
        exp_ratio: f.number("exp_ratio")?,
        flux_per_channel: f.numbers("flux_per_channel")?,

        index: f.number("index")?,
        index_err: f.number("index_err")?,
        par2: f.number("par2")?,
        par2_err: f.number("par2_err")?,
        par3: f.number("par3")?,
        par3_err: f.number("par3_err")?,

        erg_log: f.number("erg_log")?,
        erg_log_err: f.number("erg_log_err")?,
        erg_log_ul: f.number("erg_log_ul")?,

        gal_coeffs: f.numbers("gal_coeffs")?,
        gal_coeffs_err: f.numbers("gal_coeffs_err")?,
        gal_zero_coeffs: f.numbers("gal_zero_coeffs")?,
        gal_zero_coeffs_err: f.numbers("gal_zero_coeffs_err")?,
        iso_coeffs: f.numbers("iso_coeffs")?,
        iso_coeffs_err: f.numbers("iso_coeffs_err")?,
        iso_zero_coeffs: f.numbers("iso_zero_coeffs")?,
        iso_zero_coeffs_err: f.numbers("iso_zero_coeffs_err")?,

        start_data_tt: f.number("start_data_tt")?,
        end_data_tt: f.number("end_data_tt")?,
        start_data_utc: f.text("start_data_utc")?,
        end_data_utc: f.text("end_data_utc")?,
        start_data_mjd: f.number("start_data_mjd")?,
        end_data_mjd: f.number("end_data_mjd")?,

        emins: f.numbers("emins")?,
        emaxs: f.numbers("emaxs")?,
        fov_mins: f.numbers("fov_mins")?,
        fov_maxs: f.numbers("fov_maxs")?,
        albedo: f.number("albedo")?,
        binsize: f.number("binsize")?,
        expstep: f.number("expstep")?,
        phasecode: f.number("phasecode")?,
        skytype: f.number("skytype")?,

        fit_status0: f.number("fit_status0")?,
        fcn0: f.number("fcn0")?,
        edm0: f.number("edm0")?,
        nvpar0: f.number("nvpar0")?,
        nparx0: f.number("nparx0")?,
        iter0: f.number("iter0")?,
        fit_status1: f.number("fit_status1")?,
        fcn1: f.number("fcn1")?,
        edm1: f.number("edm1")?,
        nvpar1: f.number("nvpar1")?,
        nparx1: f.number("nparx1")?,
        iter1: f.number("iter1")?,

        fit_src_cts: f.number("fit_src_cts")?,
        fit_gal_cts: f.number("fit_gal_cts")?,
        fit_iso_cts: f.number("fit_iso_cts")?,

        dist: None,
    };
    f.finish()?;

    Ok(fit_result)
}

/// Split a line into its tokens. What counts as a token depends on which line
/// this is (`line_num` counts from 0 and excludes comments).
fn tokenise_line(line_num: usize, line: &str) -> Result<Vec<Token>, ReadFitResultError> {
    let words: Vec<&str> = line.split_whitespace().collect();
    let tokens = match line_num {
        // Strip the decoration around the longitude/latitude ranges, e.g.
        // "[ 75.0 , 81.0 ]" or "[75.0,81.0]".
        0 => words
            .iter()
            .flat_map(|w| w.split(','))
            .map(|w| w.trim_matches(|c: char| matches!(c, '[' | ']')))
            .filter(|w| !w.is_empty())
            .map(|w| Token::Scalar(w.to_string()))
            .collect(),

        // The last word is the flux of each channel.
        5 => match words.split_last() {
            Some((last, rest)) => rest
                .iter()
                .map(|w| Token::Scalar(w.to_string()))
                .chain(std::iter::once(Token::List(split_list(last))))
                .collect(),
            None => return Err(ReadFitResultError::MalformedLine(line_num)),
        },

        // Coefficients and their errors.
        8..=11 => match words.as_slice() {
            [coeffs, errors, ..] => vec![
                Token::List(split_list(coeffs)),
                Token::List(split_list(errors)),
            ],
            _ => return Err(ReadFitResultError::MalformedLine(line_num)),
        },

        // Energy bins and field-of-view bins as "min..max" lists, followed by
        // five scalars.
        13 => {
            if words.len() < 7 {
                return Err(ReadFitResultError::MalformedLine(line_num));
            }
            let (emins, emaxs) = split_ranges(line_num, words[0])?;
            let (fov_mins, fov_maxs) = split_ranges(line_num, words[1])?;
            let mut tokens = vec![
                Token::List(emins),
                Token::List(emaxs),
                Token::List(fov_mins),
                Token::List(fov_maxs),
            ];
            tokens.extend(
                words[words.len() - 5..]
                    .iter()
                    .map(|w| Token::Scalar(w.to_string())),
            );
            tokens
        }

        _ => words.iter().map(|w| Token::Scalar(w.to_string())).collect(),
    };
    Ok(tokens)
}

fn split_list(s: &str) -> Vec<String> {
    s.split(',')
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .collect()
}

/// "100..300,300..1000" -> (["100", "300"], ["300", "1000"])
fn split_ranges(
    line_num: usize,
    s: &str,
) -> Result<(Vec<String>, Vec<String>), ReadFitResultError> {
    let mut mins = vec![];
    let mut maxs = vec![];
    for range in split_list(s) {
        match range.split_once("..") {
            Some((min, max)) => {
                mins.push(min.to_string());
                maxs.push(max.to_string());
            }
            None => {
                return Err(ReadFitResultError::MalformedRange {
                    line_num,
                    range: range.to_string(),
                })
            }
        }
    }
    Ok((mins, maxs))
}

/// Hands out tokens in order, converting them to the type of the field being
/// filled.
struct FieldReader {
    tokens: std::vec::IntoIter<(usize, Token)>,
    position: usize,
}

impl FieldReader {
    fn next(&mut self, field: &'static str) -> Result<(usize, Token), ReadFitResultError> {
        let position = self.position;
        self.position += 1;
        self.tokens
            .next()
            .ok_or(ReadFitResultError::MissingField { field, position })
    }

    fn text(&mut self, field: &'static str) -> Result<String, ReadFitResultError> {
        match self.next(field)? {
            (_, Token::Scalar(s)) => Ok(s),
            (line_num, Token::List(_)) => Err(ReadFitResultError::UnexpectedList { line_num, field }),
        }
    }

    fn number(&mut self, field: &'static str) -> Result<f64, ReadFitResultError> {
        match self.next(field)? {
            (line_num, Token::Scalar(s)) => parse_float(line_num, field, &s),
            (line_num, Token::List(_)) => Err(ReadFitResultError::UnexpectedList { line_num, field }),
        }
    }

    fn numbers(&mut self, field: &'static str) -> Result<Vec<f64>, ReadFitResultError> {
        match self.next(field)? {
            (line_num, Token::List(l)) => l.iter().map(|s| parse_float(line_num, field, s)).collect(),
            (line_num, Token::Scalar(_)) => Err(ReadFitResultError::ExpectedList { line_num, field }),
        }
    }

    /// Complain if any tokens weren't used.
    fn finish(self) -> Result<(), ReadFitResultError> {
        match self.tokens.len() {
            0 => Ok(()),
            num => Err(ReadFitResultError::SurplusFields {
                expected: self.position,
                got: self.position + num,
            }),
        }
    }
}

fn parse_float(line_num: usize, field: &'static str, s: &str) -> Result<f64, ReadFitResultError> {
    s.parse().map_err(|_| ReadFitResultError::ParseFloat {
        line_num,
        field,
        string: s.to_string(),
    })
}
