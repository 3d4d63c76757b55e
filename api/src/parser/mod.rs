//! Field Description File Parser

use photon_core::base::*;
use photon_core::error::*;
use photon_core::params::*;
use photon_core::paramset::ParamSet;
use pest::iterators::{Pair, Pairs};
use pest::Parser;
use std::fs;
use std::path::Path;

/// The `pest` parser generated from a grammar.
#[derive(Parser)]
#[grammar = "parser/grammar.pest"]
struct FieldParser;

/// Reads a field description file and returns the validated descriptions in
/// file order.
///
/// * `path` - File path.
pub fn parse_file<P: AsRef<Path>>(path: P) -> Result<Vec<FieldDescription>> {
    let path = path.as_ref();
    let unparsed_file = fs::read_to_string(path)?;
    debug!("Parsing '{}'", path.display());
    parse_str(&unparsed_file)
        .map_err(|e| match e {
            FieldError::Parse(msg) => FieldError::Parse(format!("{}: {}", path.display(), msg)),
            e => e,
        })
}

/// Parses the contents of a field description file and returns the
/// validated descriptions in file order.
///
/// * `unparsed_file` - Contents of the file.
pub fn parse_str(unparsed_file: &str) -> Result<Vec<FieldDescription>> {
    let file = FieldParser::parse(Rule::file, unparsed_file)
        .map_err(|e| FieldError::Parse(e.to_string()))?
        .next()
        .ok_or_else(|| FieldError::Parse(String::from("empty input")))?;

    let mut descriptions = vec![];
    for pair in file.into_inner() {
        match pair.as_rule() {
            Rule::field_stmt => descriptions.push(parse_field_stmt(pair.into_inner())?),
            Rule::EOI => (), // Done
            rule => return Err(unexpected(rule)),
        }
    }
    Ok(descriptions)
}

/// Parse a `field_stmt` rule of the grammar.
///
/// * `pairs` - The inner token pairs for matched `field_stmt` rule.
fn parse_field_stmt(mut pairs: Pairs<Rule>) -> Result<FieldDescription> {
    let kind = next_pair(&mut pairs)?.as_str().to_owned();
    let name = parse_quoted_str(next_pair(&mut pairs)?)?;

    let mut params = ParamSet::new();
    for pair in pairs {
        parse_param(pair.into_inner(), &mut params)?;
    }
    debug!("{} '{}'\n{}", kind, name, params);

    match kind.as_str() {
        "DetectorField" => FieldDescription::detector(&name, &params),
        "EmitterField" => FieldDescription::emitter(&name, &params),
        _ => Err(FieldError::Parse(format!("unknown field kind '{}'", kind))),
    }
}

/// Parse a `param` rule of the grammar and add the parameter to a
/// `ParamSet`.
///
/// * `pairs`  - The inner token pairs for matched `param` rule.
/// * `params` - The `ParamSet` to update.
fn parse_param(mut pairs: Pairs<Rule>, params: &mut ParamSet) -> Result<()> {
    let mut decl = next_pair(&mut pairs)?.into_inner();
    let param_type = next_pair(&mut decl)?.as_str();
    let ident = next_pair(&mut decl)?.as_str();
    let value = next_pair(&mut pairs)?;

    if params.declared_type(ident).is_some() {
        warn!("Parameter '{}' given more than once; using the last value", ident);
        params.ints.remove(ident);
        params.floats.remove(ident);
        params.strings.remove(ident);
    }

    match param_type {
        "integer" => {
            let values = parse_numbers(value, ident)?
                .iter()
                .map(|s| {
                    s.parse::<Int>().map_err(|_| {
                        FieldError::Parse(format!("'{}' expects integers, got '{}'", ident, s))
                    })
                })
                .collect::<Result<Vec<_>>>()?;
            params.add_int(ident, &values);
        }
        "float" => {
            let values = parse_numbers(value, ident)?
                .iter()
                .map(|s| {
                    s.parse::<Float>().map_err(|_| {
                        FieldError::Parse(format!("'{}' expects floats, got '{}'", ident, s))
                    })
                })
                .collect::<Result<Vec<_>>>()?;
            params.add_float(ident, &values);
        }
        "string" => {
            let values = match value.as_rule() {
                Rule::quoted_str => vec![parse_quoted_str(value)?],
                Rule::string_list => value
                    .into_inner()
                    .map(parse_quoted_str)
                    .collect::<Result<Vec<_>>>()?,
                _ => {
                    return Err(FieldError::Parse(format!(
                        "'{}' expects strings, got '{}'",
                        ident,
                        value.as_str()
                    )))
                }
            };
            params.add_string(ident, &values);
        }
        t => return Err(FieldError::Parse(format!("unknown parameter type '{}'", t))),
    }
    Ok(())
}

/// Returns the numeric tokens of a `number` or `number_list` value.
///
/// * `value` - The value token pair.
/// * `ident` - Parameter name for error messages.
fn parse_numbers<'a>(value: Pair<'a, Rule>, ident: &str) -> Result<Vec<&'a str>> {
    match value.as_rule() {
        Rule::number => Ok(vec![value.as_str()]),
        Rule::number_list => Ok(value.into_inner().map(|p| p.as_str()).collect()),
        _ => Err(FieldError::Parse(format!(
            "'{}' expects numbers, got {}",
            ident,
            value.as_str()
        ))),
    }
}

/// Parse a `quoted_str` rule and return the text between the quotes.
///
/// * `pair` - The matched `quoted_str` token pair.
fn parse_quoted_str(pair: Pair<Rule>) -> Result<String> {
    let mut inner = pair.into_inner();
    Ok(next_pair(&mut inner)?.as_str().to_owned())
}

/// Returns the next token pair or a parse error if there is none.
///
/// * `pairs` - Token pairs.
fn next_pair<'a>(pairs: &mut Pairs<'a, Rule>) -> Result<Pair<'a, Rule>> {
    pairs
        .next()
        .ok_or_else(|| FieldError::Parse(String::from("unexpected end of statement")))
}

fn unexpected(rule: Rule) -> FieldError {
    FieldError::Parse(format!("unexpected {:?}", rule))
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    const DETECTOR: &str = r#"
        # Fiber detector.
        DetectorField "fiber"
            "string detector_type" "one-sided"
            "float pitch" 2.2
            "float anisotropy" 0.9
            "integer dims" [20 30 40]
            "float emitter_size" [10 8 0]
            "integer hops" 1000   # small budget
    "#;

    #[test]
    fn parse_detector_field() {
        let fields = parse_str(DETECTOR).unwrap();
        assert_eq!(fields.len(), 1);

        let field = &fields[0];
        assert_eq!(field.name, "fiber");
        assert_eq!(field.kind, FieldKind::Detector);
        assert_eq!(field.hops, 1000);
        assert_eq!(field.seed, 0);
        assert_eq!(field.params.dims(), [20, 30, 40]);
        assert_eq!(field.params.pitch(), 2.2);
        assert_eq!(field.params.anisotropy(), 0.9);
        assert_eq!(field.params.emitter_size(), [10.0, 8.0, 0.0]);
        assert_eq!(field.params.scatter_length(), DEFAULT_SCATTER_LENGTH);
        assert_eq!(field.params.detector_type(), DetectorType::OneSided);
        assert!(field.params.beam().is_none());
    }

    #[test]
    fn parse_multiple_fields() {
        let input = format!(
            "{}\n{}",
            DETECTOR,
            r#"EmitterField "led"
                   "integer dims" [16 16 16]
                   "float pitch" 1
                   "float beam_compression" 3
                   "float y_steer" -15.5
                   "float scatter_length" inf"#
        );
        let fields = parse_str(&input).unwrap();
        assert_eq!(fields.len(), 2);

        let led = &fields[1];
        assert_eq!(led.kind, FieldKind::Emitter);
        assert_eq!(led.hops, DEFAULT_HOPS);
        assert_eq!(led.params.detector_type(), DetectorType::TwoSided);
        assert!(led.params.scatter_length().is_infinite());
        let beam = led.params.beam().unwrap();
        assert_eq!(beam.compression, 3.0);
        assert_eq!(beam.xy_aspect, 1.0);
        assert_eq!(beam.y_steer, -15.5);
    }

    #[test]
    fn empty_file_has_no_fields() {
        assert!(parse_str("  # nothing here\n").unwrap().is_empty());
    }

    #[test]
    fn syntax_errors_are_reported() {
        assert!(matches!(
            parse_str(r#"DetectorField "x" "float pitch" [1 2"#),
            Err(FieldError::Parse(_))
        ));
        assert!(matches!(
            parse_str(r#"Camera "x""#),
            Err(FieldError::Parse(_))
        ));
    }

    #[test]
    fn wrong_value_kinds_are_rejected() {
        assert!(matches!(
            parse_str(r#"DetectorField "x" "integer dims" [1.5 2 3]"#),
            Err(FieldError::Parse(_))
        ));
        assert!(matches!(
            parse_str(r#"DetectorField "x" "float pitch" "wide""#),
            Err(FieldError::Parse(_))
        ));
    }

    #[test]
    fn unknown_keys_fail_validation() {
        let result = parse_str(
            r#"DetectorField "x"
                   "integer dims" [10 10 10]
                   "float beam_compression" 2"#,
        );
        match result {
            Err(FieldError::UnrecognizedParameter(names)) => {
                assert_eq!(names, vec![String::from("\"float beam_compression\"")]);
            }
            r => panic!("unexpected {:?}", r),
        }
    }

    #[test]
    fn missing_dims_fail_validation() {
        assert!(matches!(
            parse_str(r#"DetectorField "x" "float pitch" 1"#),
            Err(FieldError::MissingParameter(_))
        ));
    }

    #[test]
    fn repeated_parameter_uses_last_value() {
        let fields = parse_str(
            r#"DetectorField "x"
                   "integer dims" [10 10 10]
                   "float pitch" 1
                   "float pitch" 2"#,
        )
        .unwrap();
        assert_eq!(fields[0].params.pitch(), 2.0);
    }
}
