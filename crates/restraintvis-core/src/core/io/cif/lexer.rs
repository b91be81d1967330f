//! mmCIF tokenizer.
//!
//! Splits STAR/mmCIF text into data block headers, `loop_` keywords, data names
//! and values. Quoted values only close on a quote followed by whitespace, so
//! apostrophes inside names such as `O5'` survive.

use super::CifError;
use nom::{
    IResult,
    branch::alt,
    bytes::complete::{tag_no_case, take_while, take_while1},
    character::complete::{char, multispace1, not_line_ending},
    combinator::{eof, map, peek, recognize, value, verify},
    error::{Error, ErrorKind},
    multi::many0,
    sequence::{preceded, terminated},
};

#[derive(Debug, Clone, PartialEq)]
pub enum Token<'a> {
    DataBlock(&'a str),
    Loop,
    /// Full data name including the leading underscore, e.g. `_struct_asym.id`.
    DataName(&'a str),
    Value(&'a str),
    TextField(String),
}

impl Token<'_> {
    pub fn is_value(&self) -> bool {
        matches!(self, Token::Value(_) | Token::TextField(_))
    }

    pub fn as_value(&self) -> Option<&str> {
        match self {
            Token::Value(v) => Some(v),
            Token::TextField(v) => Some(v),
            _ => None,
        }
    }
}

/// A token with the byte offset it started at, used for error reporting.
#[derive(Debug, Clone, PartialEq)]
pub struct Spanned<'a> {
    pub token: Token<'a>,
    pub offset: usize,
}

pub fn line_at(input: &str, offset: usize) -> usize {
    input[..offset.min(input.len())].matches('\n').count() + 1
}

fn skip_ws_comments(input: &str) -> IResult<&str, ()> {
    let (input, _) = many0(alt((
        value((), multispace1),
        value((), preceded(char('#'), not_line_ending)),
    )))(input)?;
    Ok((input, ()))
}

fn data_block(input: &str) -> IResult<&str, Token<'_>> {
    map(
        preceded(tag_no_case("data_"), take_while(|c: char| !c.is_whitespace())),
        Token::DataBlock,
    )(input)
}

fn loop_keyword(input: &str) -> IResult<&str, Token<'_>> {
    value(
        Token::Loop,
        terminated(tag_no_case("loop_"), peek(alt((multispace1, eof)))),
    )(input)
}

fn data_name(input: &str) -> IResult<&str, Token<'_>> {
    map(
        recognize(preceded(
            char('_'),
            take_while1(|c: char| !c.is_whitespace()),
        )),
        Token::DataName,
    )(input)
}

fn quoted(quote: char) -> impl Fn(&str) -> IResult<&str, Token<'_>> {
    move |input: &str| {
        let (body, _) = char(quote)(input)?;
        let mut chars = body.char_indices().peekable();
        while let Some((i, c)) = chars.next() {
            if c != quote {
                continue;
            }
            let closes = chars.peek().is_none_or(|(_, next)| next.is_whitespace());
            if closes {
                return Ok((&body[i + c.len_utf8()..], Token::Value(&body[..i])));
            }
        }
        Err(nom::Err::Error(Error::new(input, ErrorKind::Char)))
    }
}

fn unquoted(input: &str) -> IResult<&str, Token<'_>> {
    map(
        verify(take_while1(|c: char| !c.is_whitespace()), |s: &str| {
            !s.starts_with(['\'', '"'])
        }),
        Token::Value,
    )(input)
}

fn text_field(input: &str) -> IResult<&str, Token<'_>> {
    let (body, _) = char(';')(input)?;
    match body.find("\n;") {
        Some(end) => Ok((
            &body[end + 2..],
            Token::TextField(body[..end].trim().to_string()),
        )),
        None => Err(nom::Err::Failure(Error::new(input, ErrorKind::TakeUntil))),
    }
}

fn token(input: &str) -> IResult<&str, Token<'_>> {
    alt((
        data_block,
        loop_keyword,
        data_name,
        quoted('\''),
        quoted('"'),
        unquoted,
    ))(input)
}

/// Tokenizes a whole mmCIF document.
///
/// Semicolon text fields are only recognized when the `;` opens a line.
pub fn tokenize(input: &str) -> Result<Vec<Spanned<'_>>, CifError> {
    let mut tokens = Vec::new();
    let mut rest = input;

    loop {
        let offset = input.len() - rest.len();
        let (after_ws, _) = skip_ws_comments(rest).map_err(|_| CifError::Parse {
            line: line_at(input, offset),
            message: "malformed whitespace or comment".to_string(),
        })?;
        rest = after_ws;
        if rest.is_empty() {
            break;
        }

        let offset = input.len() - rest.len();
        let at_line_start = offset == 0 || input[..offset].ends_with('\n');
        let parsed = if at_line_start && rest.starts_with(';') {
            text_field(rest)
        } else {
            token(rest)
        };

        let (next, token) = parsed.map_err(|_| CifError::Parse {
            line: line_at(input, offset),
            message: if rest.starts_with(';') {
                "unterminated text field".to_string()
            } else {
                "unterminated quoted value".to_string()
            },
        })?;
        tokens.push(Spanned { token, offset });
        rest = next;
    }

    Ok(tokens)
}
