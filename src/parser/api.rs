use std::time::Instant;

use pest::error::{Error, ErrorVariant};
use pest::iterators::Pair;
use pest::Parser;
use pest_derive::Parser;

use super::ast::CodeNode;
use super::CodeParser;
use crate::runner::ds::error::JErrorType;
use crate::runner::ds::symbol::Interner;
use crate::runner::ds::value::JackValue;

#[derive(Parser)]
#[grammar = "parser/code_grammar.pest"] // relative to src
pub struct CodeTreeParser;

impl CodeTreeParser {
    /// Read `source` into top-level nodes, interning every form and symbol
    /// through `interner`.
    pub fn parse_to_codes(source: &str, interner: &Interner) -> Result<Vec<CodeNode>, Error<Rule>> {
        let start = Instant::now();
        let mut pairs = <CodeTreeParser as Parser<Rule>>::parse(Rule::program, source)?;
        let mut codes = vec![];
        if let Some(program) = pairs.next() {
            for pair in program.into_inner() {
                if pair.as_rule() == Rule::EOI {
                    continue;
                }
                codes.push(build_code_node(pair, interner)?);
            }
        }
        tracing::debug!(
            nodes = codes.len(),
            elapsed_us = start.elapsed().as_micros() as u64,
            "read code tree"
        );
        Ok(codes)
    }
}

impl CodeParser for CodeTreeParser {
    fn parse(&self, source: &str, interner: &Interner) -> Result<Vec<CodeNode>, JErrorType> {
        CodeTreeParser::parse_to_codes(source, interner)
            .map_err(|e| JErrorType::SyntaxError(e.to_string()))
    }
}

fn get_unexpected_error(id: i32, pair: &Pair<Rule>) -> Error<Rule> {
    let message = format!("Unexpected state reached [{:?}] - {}", pair.as_rule(), id);
    Error::new_from_span(ErrorVariant::CustomError { message }, pair.as_span())
}

fn get_custom_error(message: String, pair: &Pair<Rule>) -> Error<Rule> {
    Error::new_from_span(ErrorVariant::CustomError { message }, pair.as_span())
}

fn build_code_node(pair: Pair<Rule>, interner: &Interner) -> Result<CodeNode, Error<Rule>> {
    Ok(match pair.as_rule() {
        Rule::tagged => {
            let mut inner = pair.clone().into_inner();
            let head = match inner.next() {
                Some(head) if head.as_rule() == Rule::form_name => head,
                _ => return Err(get_unexpected_error(1, &pair)),
            };
            let form = interner.form(&head.as_str()[1..]);
            let args = inner
                .map(|p| build_code_node(p, interner))
                .collect::<Result<Vec<_>, _>>()?;
            CodeNode::Tagged(form, args)
        }
        Rule::sequence => CodeNode::Sequence(
            pair.into_inner()
                .map(|p| build_code_node(p, interner))
                .collect::<Result<Vec<_>, _>>()?,
        ),
        Rule::symbol => CodeNode::Symbol(interner.symbol(pair.as_str())),
        Rule::quoted_symbol => {
            CodeNode::Literal(JackValue::Symbol(interner.symbol(&pair.as_str()[1..])))
        }
        Rule::form_value => CodeNode::Literal(JackValue::Form(interner.form(&pair.as_str()[1..]))),
        Rule::string => {
            let s = pair.as_str();
            CodeNode::Literal(JackValue::String(unescape(&s[1..s.len() - 1])))
        }
        Rule::integer => CodeNode::Literal(build_integer(&pair)?),
        Rule::float => {
            let f = pair
                .as_str()
                .parse::<f64>()
                .map_err(|e| get_custom_error(e.to_string(), &pair))?;
            CodeNode::Literal(JackValue::float(f))
        }
        Rule::boolean => CodeNode::Literal(JackValue::Boolean(pair.as_str() == "true")),
        Rule::null => CodeNode::Literal(JackValue::Null),
        _ => return Err(get_unexpected_error(2, &pair)),
    })
}

/// Integers too large for i64 are read as floats.
fn build_integer(pair: &Pair<Rule>) -> Result<JackValue, Error<Rule>> {
    let s = pair.as_str();
    match s.parse::<i64>() {
        Ok(i) => Ok(JackValue::integer(i)),
        Err(_) => s
            .parse::<f64>()
            .map(JackValue::float)
            .map_err(|e| get_custom_error(e.to_string(), pair)),
    }
}

fn unescape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('r') => out.push('\r'),
            Some('0') => out.push('\0'),
            Some(other) => out.push(other),
            None => {}
        }
    }
    out
}
